//! The half-hourly precipitation upstream, modelled as a black box.
//!
//! Implementations return raw half-hour points for a UTC day, in any order;
//! the fusion client does all reprojection and aggregation. The bundled
//! [`SyntheticHalfHourly`] produces a deterministic, afternoon-peaked pattern
//! for offline use — consumers must not depend on its shape.

use crate::precipitation::error::PrecipitationError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// One half-hour precipitation estimate from the upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfHourlyPoint {
    pub timestamp_utc: DateTime<Utc>,
    pub mm_per_hr: f64,
    /// Upstream quality flag, 0–100.
    pub quality: f64,
}

/// A source of half-hourly precipitation estimates.
///
/// The contract is deliberately thin: 48 half-hour buckets for the requested
/// UTC day, in any order. Errors and empty results are both treated as "this
/// source has nothing" by the fusion client.
pub trait HalfHourlySource: Send + Sync {
    fn half_hourly(
        &self,
        lat: f64,
        lon: f64,
        utc_day: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Vec<HalfHourlyPoint>, PrecipitationError>> + Send;
}

/// Deterministic synthetic half-hourly source.
///
/// Generates an afternoon-peaked rate curve with multiplicative variability,
/// seeded from the day and coordinate so repeated queries agree. Stands in
/// for the real satellite product when it is unavailable.
#[derive(Debug, Clone, Default)]
pub struct SyntheticHalfHourly;

impl HalfHourlySource for SyntheticHalfHourly {
    async fn half_hourly(
        &self,
        lat: f64,
        lon: f64,
        utc_day: NaiveDate,
    ) -> Result<Vec<HalfHourlyPoint>, PrecipitationError> {
        let mut rng = SmallRng::seed_from_u64(point_seed(lat, lon, utc_day));
        let midnight = Utc.from_utc_datetime(
            &utc_day
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| PrecipitationError::Source("invalid UTC day".to_string()))?,
        );

        let points = (0..48)
            .map(|half_hour| {
                let timestamp_utc = midnight + Duration::minutes(30 * half_hour);
                let hour_of_day = half_hour as f64 * 0.5;
                // Convective afternoon peak around 15:00, dry overnight.
                let base = (1.0 - ((hour_of_day - 15.0) / 9.0).powi(2)).max(0.0) * 1.5;
                let variability = rng.random_range(0.5..2.0);
                let quality = rng.random_range(70.0..100.0);
                HalfHourlyPoint {
                    timestamp_utc,
                    mm_per_hr: base * variability,
                    quality,
                }
            })
            .collect();
        Ok(points)
    }
}

fn point_seed(lat: f64, lon: f64, utc_day: NaiveDate) -> u64 {
    let lat_part = (lat * 1000.0).round() as i64;
    let lon_part = (lon * 1000.0).round() as i64;
    (utc_day.num_days_from_ce() as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(lat_part as u64)
        .rotate_left(17)
        .wrapping_add(lon_part as u64)
}
