//! Fused hourly precipitation for a local day.
//!
//! Prefers the half-hourly source (48 UTC buckets reprojected into the target
//! zone and aggregated per local hour); falls back to the daily reanalysis
//! total spread uniformly over 24 hours. Both legs can be disabled; when
//! everything is off or fails the client hands back an empty list and lets
//! the caller decide.

use crate::precipitation::error::PrecipitationError;
use crate::precipitation::halfhourly::{HalfHourlyPoint, HalfHourlySource, SyntheticHalfHourly};
use crate::reanalysis::{ReanalysisClient, PARAM_PRECIPITATION};
use crate::sampling::PrecipSource;
use crate::settings::Settings;
use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;
use log::{info, warn};

/// Quality assigned to hours synthesised from the daily fallback.
const FALLBACK_QUALITY: f64 = 0.8;

/// Precipitation aggregated over one local hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPrecip {
    /// Local hour of day, 0–23.
    pub hour: u32,
    /// Total precipitation that fell in the hour, mm.
    pub total_mm: f64,
    /// Mean precipitation rate over the hour, mm/h.
    pub avg_rate_mm_per_hr: f64,
    /// Number of half-hour points that contributed.
    pub data_points: u32,
    /// Mean quality of the contributing points, 0–1.
    pub quality: f64,
    pub source: PrecipSource,
}

/// Client fusing the half-hourly source with the daily reanalysis fallback.
pub struct PrecipitationClient<S = SyntheticHalfHourly> {
    half_hourly: Option<S>,
    fallback: Option<ReanalysisClient>,
}

impl<S: HalfHourlySource> PrecipitationClient<S> {
    /// Wires the two legs according to the `half_hourly_enabled` /
    /// `precipitation_fallback_enabled` settings.
    pub fn new(half_hourly: S, fallback: ReanalysisClient, settings: &Settings) -> Self {
        PrecipitationClient {
            half_hourly: settings.half_hourly_enabled.then_some(half_hourly),
            fallback: settings.precipitation_fallback_enabled.then_some(fallback),
        }
    }

    /// Hourly precipitation for the UTC day of `date`, reprojected into
    /// `zone`, ordered by local hour.
    ///
    /// Returns an empty list when every enabled leg failed or produced
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`PrecipitationError::InvalidCoordinate`] — the only error surfaced;
    /// coordinate validation happens before any transport work.
    pub async fn hourly_precipitation(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
        zone: Tz,
    ) -> Result<Vec<HourlyPrecip>, PrecipitationError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(PrecipitationError::InvalidCoordinate { lat, lon });
        }

        if let Some(source) = &self.half_hourly {
            match source.half_hourly(lat, lon, date).await {
                Ok(points) if !points.is_empty() => {
                    return Ok(aggregate_by_local_hour(&points, zone));
                }
                Ok(_) => warn!("Half-hourly source returned no points for {date}"),
                Err(e) => warn!("Half-hourly source failed for {date}: {e}"),
            }
        }

        if let Some(reanalysis) = &self.fallback {
            match reanalysis
                .daily_series(lat, lon, date, date, &[PARAM_PRECIPITATION])
                .await
            {
                Ok(series) => {
                    let daily_mm = series
                        .get(PARAM_PRECIPITATION)
                        .and_then(|days| days.get(&date.format("%Y%m%d").to_string()))
                        .copied()
                        .flatten()
                        .unwrap_or(0.0);
                    info!("Synthesising uniform hours from daily total {daily_mm:.2} mm");
                    return Ok(uniform_fallback_hours(daily_mm));
                }
                Err(e) => warn!("Daily precipitation fallback failed for {date}: {e}"),
            }
        }

        Ok(Vec::new())
    }

    /// The fused rate for one local hour, if the fusion produced that hour.
    pub async fn rate_at_hour(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
        hour: u32,
        zone: Tz,
    ) -> Result<Option<HourlyPrecip>, PrecipitationError> {
        let hours = self.hourly_precipitation(lat, lon, date, zone).await?;
        Ok(hours.into_iter().find(|h| h.hour == hour))
    }
}

/// Buckets half-hour points by their local hour. Each point contributes
/// `rate * 0.5 h` of accumulation; the hour's quality is the mean of its
/// points' flags, normalised to [0, 1].
fn aggregate_by_local_hour(points: &[HalfHourlyPoint], zone: Tz) -> Vec<HourlyPrecip> {
    let mut totals = [0.0f64; 24];
    let mut qualities = [0.0f64; 24];
    let mut counts = [0u32; 24];

    for point in points {
        let local = point.timestamp_utc.with_timezone(&zone);
        let hour = local.hour() as usize;
        totals[hour] += point.mm_per_hr * 0.5;
        qualities[hour] += point.quality;
        counts[hour] += 1;
    }

    (0..24)
        .filter(|&hour| counts[hour] > 0)
        .map(|hour| {
            let n = counts[hour];
            let hours_covered = n as f64 * 0.5;
            HourlyPrecip {
                hour: hour as u32,
                total_mm: totals[hour],
                avg_rate_mm_per_hr: totals[hour] / hours_covered,
                data_points: n,
                quality: (qualities[hour] / n as f64) / 100.0,
                source: PrecipSource::HalfHourly,
            }
        })
        .collect()
}

/// 24 uniform hours at `daily / 24`, marked as fallback data.
fn uniform_fallback_hours(daily_mm: f64) -> Vec<HourlyPrecip> {
    let rate = daily_mm / 24.0;
    (0..24)
        .map(|hour| HourlyPrecip {
            hour,
            total_mm: rate,
            avg_rate_mm_per_hr: rate,
            data_points: 1,
            quality: FALLBACK_QUALITY,
            source: PrecipSource::HalfHourlyFallback,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// A canned half-hourly source for exercising the fusion paths.
    struct FixedSource(Vec<HalfHourlyPoint>);

    impl HalfHourlySource for FixedSource {
        async fn half_hourly(
            &self,
            _lat: f64,
            _lon: f64,
            _utc_day: NaiveDate,
        ) -> Result<Vec<HalfHourlyPoint>, PrecipitationError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl HalfHourlySource for FailingSource {
        async fn half_hourly(
            &self,
            _lat: f64,
            _lon: f64,
            _utc_day: NaiveDate,
        ) -> Result<Vec<HalfHourlyPoint>, PrecipitationError> {
            Err(PrecipitationError::Source("satellite offline".to_string()))
        }
    }

    fn june_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()
    }

    fn settings_with_base(url: &str) -> Settings {
        Settings::builder().base_url(url).backoff_base_ms(1).build()
    }

    fn reanalysis_stub(settings: &Settings) -> ReanalysisClient {
        ReanalysisClient::new(reqwest::Client::new(), settings)
    }

    fn steady_rain_points(rate: f64, quality: f64) -> Vec<HalfHourlyPoint> {
        let midnight = Utc
            .with_ymd_and_hms(2020, 6, 15, 0, 0, 0)
            .single()
            .unwrap();
        (0..48)
            .map(|i| HalfHourlyPoint {
                timestamp_utc: midnight + Duration::minutes(30 * i),
                mm_per_hr: rate,
                quality,
            })
            .collect()
    }

    #[tokio::test]
    async fn aggregates_half_hours_into_local_hours() {
        let settings = settings_with_base("http://127.0.0.1:9");
        let client = PrecipitationClient::new(
            FixedSource(steady_rain_points(2.0, 90.0)),
            reanalysis_stub(&settings),
            &settings,
        );

        // UTC zone keeps the arithmetic transparent: each hour gets two
        // half-hour points at 2 mm/h, each contributing 1 mm.
        let hours = client
            .hourly_precipitation(0.0, 0.0, june_day(), chrono_tz::UTC)
            .await
            .unwrap();

        assert_eq!(hours.len(), 24);
        for h in &hours {
            assert_eq!(h.data_points, 2);
            assert!((h.total_mm - 2.0).abs() < 1e-12);
            assert!((h.avg_rate_mm_per_hr - 2.0).abs() < 1e-12);
            assert!((h.quality - 0.9).abs() < 1e-12);
            assert_eq!(h.source, PrecipSource::HalfHourly);
        }
    }

    #[tokio::test]
    async fn reprojects_points_into_the_target_zone() {
        let settings = settings_with_base("http://127.0.0.1:9");
        let client = PrecipitationClient::new(
            FixedSource(steady_rain_points(2.0, 80.0)),
            reanalysis_stub(&settings),
            &settings,
        );

        // Fortaleza is UTC-3: the UTC day's first points land on local
        // hour 21 of the previous evening.
        let hours = client
            .hourly_precipitation(-3.73, -38.52, june_day(), chrono_tz::America::Fortaleza)
            .await
            .unwrap();

        assert_eq!(hours.len(), 24);
        let by_hour: Vec<u32> = hours.iter().map(|h| h.hour).collect();
        assert!(by_hour.contains(&21));
        assert!(by_hour.windows(2).all(|w| w[0] < w[1]), "sorted by hour");
    }

    #[tokio::test]
    async fn falls_back_to_uniform_daily_spread() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("parameters", PARAM_PRECIPITATION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": {"parameter": {
                    "PRECTOTCORR": {"20200615": 48.0}
                }}
            })))
            .mount(&server)
            .await;

        let settings = settings_with_base(&server.uri());
        let client = PrecipitationClient::new(
            FailingSource,
            reanalysis_stub(&settings),
            &settings,
        );

        let hours = client
            .hourly_precipitation(0.0, 0.0, june_day(), chrono_tz::UTC)
            .await
            .unwrap();

        assert_eq!(hours.len(), 24);
        for h in &hours {
            assert!((h.avg_rate_mm_per_hr - 2.0).abs() < 1e-12);
            assert!((h.quality - FALLBACK_QUALITY).abs() < 1e-12);
            assert_eq!(h.source, PrecipSource::HalfHourlyFallback);
        }
    }

    #[tokio::test]
    async fn empty_when_both_legs_disabled() {
        let settings = Settings::builder()
            .base_url("http://127.0.0.1:9")
            .half_hourly_enabled(false)
            .precipitation_fallback_enabled(false)
            .build();
        let client = PrecipitationClient::new(
            FixedSource(steady_rain_points(5.0, 90.0)),
            reanalysis_stub(&settings),
            &settings,
        );

        let hours = client
            .hourly_precipitation(0.0, 0.0, june_day(), chrono_tz::UTC)
            .await
            .unwrap();
        assert!(hours.is_empty());
    }

    #[tokio::test]
    async fn validates_coordinates_before_transport() {
        let settings = settings_with_base("http://127.0.0.1:9");
        let client = PrecipitationClient::new(
            FixedSource(Vec::new()),
            reanalysis_stub(&settings),
            &settings,
        );
        assert!(matches!(
            client
                .hourly_precipitation(120.0, 0.0, june_day(), chrono_tz::UTC)
                .await,
            Err(PrecipitationError::InvalidCoordinate { .. })
        ));
    }

    #[tokio::test]
    async fn rate_at_hour_picks_one_bucket() {
        let settings = settings_with_base("http://127.0.0.1:9");
        let client = PrecipitationClient::new(
            FixedSource(steady_rain_points(3.0, 100.0)),
            reanalysis_stub(&settings),
            &settings,
        );
        let hour = client
            .rate_at_hour(0.0, 0.0, june_day(), 14, chrono_tz::UTC)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hour.hour, 14);
        assert!((hour.avg_rate_mm_per_hr - 3.0).abs() < 1e-12);
    }
}
