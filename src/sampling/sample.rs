//! The sample data model: one historical daily observation and the
//! per-request collection that owns them.

use crate::indices::{feels_like, heat_index, wind_chill};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a sample's hourly precipitation rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrecipSource {
    /// Daily reanalysis total, spread uniformly when an hourly rate is needed.
    #[serde(rename = "reanalysis")]
    Reanalysis,
    /// Aggregated from the half-hourly source.
    #[serde(rename = "half-hourly")]
    HalfHourly,
    /// Half-hourly source failed; daily total synthesised into uniform hours.
    #[serde(rename = "half-hourly-fallback")]
    HalfHourlyFallback,
}

impl PrecipSource {
    pub fn label(&self) -> &'static str {
        match self {
            PrecipSource::Reanalysis => "reanalysis",
            PrecipSource::HalfHourly => "half-hourly",
            PrecipSource::HalfHourlyFallback => "half-hourly-fallback",
        }
    }
}

impl fmt::Display for PrecipSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single historical daily observation at the query point.
///
/// The civil timestamp carries the query's activity hour as a label (the
/// reanalysis is daily, so the hour identifies the activity window rather
/// than a sensor reading time); `ts_utc` is the instant that civil time
/// corresponds to. Derived indices are computed at construction and are
/// `None` outside their validity domain — a missing sensor never reaches
/// this type.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub ts_utc: DateTime<Utc>,
    pub ts_local: NaiveDateTime,
    pub year: i32,
    pub doy: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_c: f64,
    pub relative_humidity: f64,
    pub wind_speed_ms: f64,
    pub precip_daily_mm: f64,
    pub precip_hourly_mm: Option<f64>,
    pub precip_source: PrecipSource,
    pub heat_index_c: Option<f64>,
    pub wind_chill_c: Option<f64>,
    pub feels_like_c: f64,
}

impl WeatherSample {
    /// Builds a sample from raw sensor values, computing the derived indices.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ts_utc: DateTime<Utc>,
        ts_local: NaiveDateTime,
        latitude: f64,
        longitude: f64,
        temperature_c: f64,
        relative_humidity: f64,
        wind_speed_ms: f64,
        precip_daily_mm: f64,
    ) -> Self {
        let heat_index_c = heat_index(temperature_c, relative_humidity);
        let wind_chill_c = wind_chill(temperature_c, wind_speed_ms);
        let feels_like_c = feels_like(
            temperature_c,
            Some(relative_humidity),
            Some(wind_speed_ms),
        );

        WeatherSample {
            ts_utc,
            year: ts_local.year(),
            doy: ts_local.ordinal(),
            ts_local,
            latitude,
            longitude,
            temperature_c,
            relative_humidity,
            wind_speed_ms,
            precip_daily_mm,
            precip_hourly_mm: None,
            precip_source: PrecipSource::Reanalysis,
            heat_index_c,
            wind_chill_c,
            feels_like_c,
        }
    }

    /// Attaches an hourly precipitation rate from a fused source.
    pub fn with_hourly_precipitation(mut self, mm_per_h: f64, source: PrecipSource) -> Self {
        self.precip_hourly_mm = Some(mm_per_h);
        self.precip_source = source;
        self
    }

    /// The hourly precipitation rate used for flagging and export: the fused
    /// hourly value when present, otherwise the daily total spread over 24 h.
    pub fn hourly_precip_rate(&self) -> f64 {
        self.precip_hourly_mm
            .unwrap_or(self.precip_daily_mm / 24.0)
    }
}

/// All samples collected for one query, with the query envelope and coverage
/// bookkeeping. Samples are ordered year-ascending, then date-ascending.
#[derive(Debug, Clone)]
pub struct SampleCollection {
    pub samples: Vec<WeatherSample>,

    pub latitude: f64,
    pub longitude: f64,
    pub target_date: NaiveDate,
    pub target_hour: u32,
    pub window_days: u32,
    /// Inclusive `(first, last)` baseline years.
    pub baseline_years: (i32, i32),

    pub years_requested: u32,
    pub years_with_data: u32,
    pub total_samples: usize,
    pub coverage_adequate: bool,

    pub zone: Tz,
}

impl SampleCollection {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    /// A sample on a given day with the given sensors; timestamps are derived
    /// from the date at 12:00 UTC, which is all the analysis code looks at.
    pub(crate) fn sample_on(
        year: i32,
        month: u32,
        day: u32,
        temperature_c: f64,
        relative_humidity: f64,
        wind_speed_ms: f64,
        precip_daily_mm: f64,
    ) -> WeatherSample {
        let ts_utc = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("test timestamp");
        WeatherSample::new(
            ts_utc,
            ts_utc.naive_utc(),
            -3.7319,
            -38.5267,
            temperature_c,
            relative_humidity,
            wind_speed_ms,
            precip_daily_mm,
        )
    }

    /// A benign sample: mild, dry, calm.
    pub(crate) fn calm_sample(year: i32, month: u32, day: u32) -> WeatherSample {
        sample_on(year, month, day, 20.0, 50.0, 2.0, 0.0)
    }
}
