//! Collects historical weather samples around a target day-of-year.
//!
//! For each baseline year the collector fetches the daily series covering the
//! seasonal window, keeps the days where all required sensors report, and
//! stamps each sample with the query's local activity hour. Yearly fetches
//! run sequentially to keep upstream usage predictable; a failing year is
//! logged and skipped.

use crate::precipitation::{HalfHourlySource, PrecipitationClient, SyntheticHalfHourly};
use crate::reanalysis::{
    ReanalysisClient, ReanalysisError, PARAM_HUMIDITY, PARAM_PRECIPITATION, PARAM_TEMPERATURE,
    PARAM_WIND,
};
use crate::sampling::error::SampleError;
use crate::sampling::sample::{SampleCollection, WeatherSample};
use crate::settings::Settings;
use crate::zone::clock::{day_of_year, local_instant, parse_date, year_length};
use crate::zone::ZoneResolver;
use bon::bon;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, info, warn};

/// Default seasonal half-window when the caller doesn't pass one.
const DEFAULT_WINDOW_DAYS: u32 = 15;

/// The collector wires the reanalysis client, the precipitation client and
/// the zone resolver into the sample-acquisition operation.
pub struct SampleCollector<'a, S = SyntheticHalfHourly> {
    reanalysis: &'a ReanalysisClient,
    precipitation: &'a PrecipitationClient<S>,
    zones: &'a ZoneResolver,
    settings: &'a Settings,
}

#[bon]
impl<'a, S: HalfHourlySource> SampleCollector<'a, S> {
    pub fn new(
        reanalysis: &'a ReanalysisClient,
        precipitation: &'a PrecipitationClient<S>,
        zones: &'a ZoneResolver,
        settings: &'a Settings,
    ) -> Self {
        SampleCollector {
            reanalysis,
            precipitation,
            zones,
            settings,
        }
    }

    /// Collects samples over `date`'s day-of-year ± `window_days` at the
    /// target local hour, across the baseline years.
    ///
    /// The window clamps to each year's `[1, year length]` — it does not
    /// reach into neighbouring years; with a multi-decade baseline the edge
    /// loss averages out. Samples come back ordered year-ascending, then
    /// date-ascending, and the result is deterministic for identical
    /// upstream responses.
    ///
    /// `hourly_precipitation(true)` additionally fuses the half-hourly
    /// source for every sampled day and attaches the target-hour rate; the
    /// default keeps the single daily fetch per year.
    ///
    /// # Errors
    ///
    /// * Validation: [`SampleError::InvalidLatitude`] /
    ///   [`SampleError::InvalidLongitude`] / [`SampleError::InvalidHour`] /
    ///   [`SampleError::InvalidBaseline`] / [`SampleError::Zone`].
    /// * [`SampleError::AllYearsFailed`] when no baseline year could be
    ///   fetched at all.
    /// * [`SampleError::InsufficientCoverage`] when coverage misses the
    ///   configured minima and `enforce_coverage` is on.
    #[builder]
    pub async fn collect(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
        hour: u32,
        window_days: Option<u32>,
        baseline: Option<(i32, i32)>,
        #[builder(default = false)] hourly_precipitation: bool,
    ) -> Result<SampleCollection, SampleError> {
        let window_days = window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        let (baseline_start, baseline_end) = baseline
            .unwrap_or((self.settings.baseline_start, self.settings.baseline_end));

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SampleError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SampleError::InvalidLongitude(longitude));
        }
        if hour > 23 {
            return Err(SampleError::InvalidHour(hour));
        }
        if baseline_start > baseline_end {
            return Err(SampleError::InvalidBaseline {
                start: baseline_start,
                end: baseline_end,
            });
        }

        let target_date = parse_date(date)?;
        let target_doy = day_of_year(target_date);
        let zone = self.zones.resolve(latitude, longitude)?;
        info!("Resolved timezone for ({latitude}, {longitude}): {zone}");

        let mut samples: Vec<WeatherSample> = Vec::new();
        let mut years_with_data = 0u32;
        let mut failed_years = 0u32;
        let mut last_failure: Option<ReanalysisError> = None;

        for year in baseline_start..=baseline_end {
            match self
                .collect_year(
                    latitude,
                    longitude,
                    year,
                    target_doy,
                    hour,
                    window_days,
                    zone,
                    hourly_precipitation,
                )
                .await
            {
                Ok(year_samples) => {
                    if year_samples.is_empty() {
                        warn!("Year {year}: no samples collected");
                    } else {
                        debug!("Year {year}: collected {} samples", year_samples.len());
                        years_with_data += 1;
                        samples.extend(year_samples);
                    }
                }
                Err(e) => {
                    warn!("Failed to collect samples for year {year}: {e}");
                    failed_years += 1;
                    last_failure = Some(e);
                }
            }
        }

        let years_requested = (baseline_end - baseline_start + 1) as u32;
        if failed_years == years_requested {
            if let Some(failure) = last_failure {
                return Err(SampleError::AllYearsFailed(failure));
            }
        }

        let coverage_adequate = years_with_data >= self.settings.min_years
            && samples.len() >= self.settings.min_samples;

        if !coverage_adequate && self.settings.enforce_coverage {
            return Err(SampleError::InsufficientCoverage {
                years_with_data,
                min_years: self.settings.min_years,
                total_samples: samples.len(),
                min_samples: self.settings.min_samples,
            });
        }

        info!(
            "Sample collection complete: {} samples from {years_with_data}/{years_requested} years, coverage adequate: {coverage_adequate}",
            samples.len()
        );

        Ok(SampleCollection {
            total_samples: samples.len(),
            samples,
            latitude,
            longitude,
            target_date,
            target_hour: hour,
            window_days,
            baseline_years: (baseline_start, baseline_end),
            years_requested,
            years_with_data,
            coverage_adequate,
            zone,
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn collect_year(
        &self,
        latitude: f64,
        longitude: f64,
        year: i32,
        target_doy: u32,
        hour: u32,
        window_days: u32,
        zone: Tz,
        hourly_precipitation: bool,
    ) -> Result<Vec<WeatherSample>, ReanalysisError> {
        let start_doy = target_doy.saturating_sub(window_days).max(1);
        let end_doy = (target_doy + window_days).min(year_length(year));

        // DOYs within [1, year length] always resolve to dates.
        let (Some(start_date), Some(end_date)) = (
            NaiveDate::from_yo_opt(year, start_doy),
            NaiveDate::from_yo_opt(year, end_doy),
        ) else {
            return Ok(Vec::new());
        };

        debug!("Fetching year {year}, DOY {start_doy}-{end_doy} ({start_date} to {end_date})");

        let series = self
            .reanalysis
            .daily_series(
                latitude,
                longitude,
                start_date,
                end_date,
                &[
                    PARAM_TEMPERATURE,
                    PARAM_HUMIDITY,
                    PARAM_WIND,
                    PARAM_PRECIPITATION,
                ],
            )
            .await?;

        let value_on = |param: &str, key: &str| -> Option<f64> {
            series.get(param).and_then(|days| days.get(key)).copied().flatten()
        };

        let mut samples = Vec::new();
        let date_keys: Vec<String> = series
            .get(PARAM_TEMPERATURE)
            .map(|days| days.keys().cloned().collect())
            .unwrap_or_default();

        for key in date_keys {
            let Ok(sample_date) = NaiveDate::parse_from_str(&key, "%Y%m%d") else {
                warn!("Skipping unparseable date key '{key}'");
                continue;
            };

            let temperature = value_on(PARAM_TEMPERATURE, &key);
            let humidity = value_on(PARAM_HUMIDITY, &key);
            let wind = value_on(PARAM_WIND, &key);
            let (Some(temperature_c), Some(relative_humidity), Some(wind_speed_ms)) =
                (temperature, humidity, wind)
            else {
                debug!("Skipping {key}: missing critical sensor data");
                continue;
            };
            // Dry periods often report no precipitation at all.
            let precip_daily_mm = value_on(PARAM_PRECIPITATION, &key).unwrap_or(0.0);

            let Ok(local) = local_instant(sample_date, hour, zone) else {
                continue;
            };
            let mut sample = WeatherSample::new(
                local.with_timezone(&Utc),
                local.naive_local(),
                latitude,
                longitude,
                temperature_c,
                relative_humidity,
                wind_speed_ms,
                precip_daily_mm,
            );

            if hourly_precipitation {
                match self
                    .precipitation
                    .rate_at_hour(latitude, longitude, sample_date, hour, zone)
                    .await
                {
                    Ok(Some(fused)) => {
                        sample = sample
                            .with_hourly_precipitation(fused.avg_rate_mm_per_hr, fused.source);
                    }
                    Ok(None) => debug!("No fused precipitation for {key} hour {hour}"),
                    Err(e) => warn!("Precipitation fusion failed for {key}: {e}"),
                }
            }

            samples.push(sample);
        }

        Ok(samples)
    }
}
