//! The main entry point for running historical weather risk assessments.
//!
//! Provides constructors for configuring the client (settings, cache
//! location) and builder-style operations for the risk assessment, the
//! sample export, and raw sample collection.

use crate::assessment::{Detail, RiskReport};
use crate::error::AlmanacError;
use crate::export::{export_rows, to_csv, to_json, ExportFormat};
use crate::precipitation::{PrecipitationClient, SyntheticHalfHourly};
use crate::reanalysis::{default_cache_dir, prepare_cache_dir, ReanalysisClient};
use crate::sampling::{SampleCollection, SampleCollector};
use crate::settings::Settings;
use crate::zone::ZoneResolver;
use bon::bon;
use std::path::PathBuf;
use std::time::Duration;

/// Client for historical-odds weather risk assessment.
///
/// Owns the shared HTTP connection pool, the reanalysis and precipitation
/// clients, and the timezone resolver. Construct once at process start and
/// reuse across requests; per-request state lives entirely in the returned
/// values.
///
/// # Example
///
/// ```no_run
/// use almanac::{Almanac, AlmanacError, ConditionKind, Detail};
///
/// #[tokio::main]
/// async fn main() -> Result<(), AlmanacError> {
///     let almanac = Almanac::new().await?;
///
///     // Odds of adverse weather for a June afternoon in Fortaleza.
///     let report = almanac
///         .risk_assessment()
///         .latitude(-3.7319)
///         .longitude(-38.5267)
///         .date("2024-06-15")
///         .hour(14)
///         .detail(Detail::Full)
///         .call()
///         .await?;
///
///     let wet = report.probability_of(ConditionKind::Wet).unwrap();
///     println!(
///         "P(very wet) = {:.1}% (95% CI {:.1}%..{:.1}%)",
///         wet.probability * 100.0,
///         wet.ci_lower * 100.0,
///         wet.ci_upper * 100.0,
///     );
///     Ok(())
/// }
/// ```
pub struct Almanac {
    settings: Settings,
    reanalysis: ReanalysisClient,
    precipitation: PrecipitationClient,
    zones: ZoneResolver,
}

#[bon]
impl Almanac {
    /// Creates a client with default settings and the platform cache
    /// directory (e.g. `~/.cache/almanac` on Linux).
    ///
    /// # Errors
    ///
    /// * [`AlmanacError::CacheDirResolution`] when the platform has no cache
    ///   directory.
    /// * [`AlmanacError::CacheDirCreation`] when it cannot be created.
    /// * [`AlmanacError::HttpClient`] when the HTTP pool cannot be built.
    pub async fn new() -> Result<Self, AlmanacError> {
        let cache_folder = default_cache_dir().map_err(AlmanacError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder).await
    }

    /// Creates a client with default settings and a specific cache folder.
    ///
    /// # Errors
    ///
    /// See [`Almanac::new`]; resolution of the platform directory is skipped.
    pub async fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, AlmanacError> {
        Self::configure().cache_folder(cache_folder).call().await
    }

    /// Builder-style constructor with full control.
    ///
    /// * `settings` — overrides [`Settings::default`].
    /// * `cache_folder` — response cache location; the platform default is
    ///   used when omitted.
    /// * `disable_cache(true)` — run without any on-disk cache.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use almanac::{Almanac, AlmanacError, Settings};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), AlmanacError> {
    /// let almanac = Almanac::configure()
    ///     .settings(Settings::builder().windy_wind_ms(15.0).build())
    ///     .disable_cache(true)
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn configure(
        settings: Option<Settings>,
        cache_folder: Option<PathBuf>,
        #[builder(default = false)] disable_cache: bool,
    ) -> Result<Self, AlmanacError> {
        let settings = settings.unwrap_or_default();

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_s))
            .read_timeout(Duration::from_secs(settings.read_timeout_s))
            .build()
            .map_err(AlmanacError::HttpClient)?;

        let reanalysis = if disable_cache {
            ReanalysisClient::new(http.clone(), &settings)
        } else {
            let cache_folder = match cache_folder {
                Some(folder) => folder,
                None => default_cache_dir().map_err(AlmanacError::CacheDirResolution)?,
            };
            prepare_cache_dir(&cache_folder)
                .await
                .map_err(|e| AlmanacError::CacheDirCreation(cache_folder.clone(), e))?;
            ReanalysisClient::with_cache(http.clone(), &settings, &cache_folder)
        };

        // The precipitation fallback shares the HTTP pool but skips the
        // response cache; its single-day requests are cheap.
        let precipitation = PrecipitationClient::new(
            SyntheticHalfHourly,
            ReanalysisClient::new(http, &settings),
            &settings,
        );

        Ok(Almanac {
            zones: ZoneResolver::new()?,
            settings,
            reanalysis,
            precipitation,
        })
    }

    /// The settings this client runs with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A sample collector wired to this client, for callers that want the
    /// raw [`SampleCollection`] instead of an assembled report.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use almanac::{Almanac, AlmanacError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), AlmanacError> {
    /// let almanac = Almanac::new().await?;
    /// let collection = almanac
    ///     .samples()
    ///     .collect()
    ///     .latitude(52.52)
    ///     .longitude(13.40)
    ///     .date("2024-07-01")
    ///     .hour(18)
    ///     .call()
    ///     .await?;
    /// println!("{} samples from {} years", collection.len(), collection.years_with_data);
    /// # Ok(())
    /// # }
    /// ```
    pub fn samples(&self) -> SampleCollector<'_> {
        SampleCollector::new(
            &self.reanalysis,
            &self.precipitation,
            &self.zones,
            &self.settings,
        )
    }

    /// Runs a risk assessment: collects samples, flags them, and returns the
    /// probabilities (plus distributions and trends at [`Detail::Full`]).
    ///
    /// `window_days` defaults to the operational window from the settings;
    /// `baseline` to the settings' baseline period.
    ///
    /// # Errors
    ///
    /// Everything [`SampleCollector::collect`] can return, plus
    /// [`crate::AnalysisError::EmptySamples`] when coverage enforcement is
    /// off and nothing was collected.
    #[builder]
    pub async fn risk_assessment(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
        hour: u32,
        window_days: Option<u32>,
        baseline: Option<(i32, i32)>,
        #[builder(default)] detail: Detail,
        #[builder(default = false)] hourly_precipitation: bool,
    ) -> Result<RiskReport, AlmanacError> {
        let collection = self
            .collect_with_defaults(
                latitude,
                longitude,
                date,
                hour,
                window_days,
                baseline,
                hourly_precipitation,
            )
            .await?;
        Ok(RiskReport::from_collection(
            &collection,
            &self.settings,
            detail,
        )?)
    }

    /// Exports the per-sample rows for the same envelope as
    /// [`Almanac::risk_assessment`], rendered as CSV or JSON.
    #[builder]
    pub async fn export(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
        hour: u32,
        window_days: Option<u32>,
        baseline: Option<(i32, i32)>,
        format: ExportFormat,
        #[builder(default = false)] hourly_precipitation: bool,
    ) -> Result<String, AlmanacError> {
        let collection = self
            .collect_with_defaults(
                latitude,
                longitude,
                date,
                hour,
                window_days,
                baseline,
                hourly_precipitation,
            )
            .await?;
        let rows = export_rows(&collection, &self.settings);
        match format {
            ExportFormat::Csv => Ok(to_csv(&rows)),
            ExportFormat::Json => Ok(to_json(&rows)?),
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn collect_with_defaults(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
        hour: u32,
        window_days: Option<u32>,
        baseline: Option<(i32, i32)>,
        hourly_precipitation: bool,
    ) -> Result<SampleCollection, AlmanacError> {
        let window = window_days.unwrap_or(self.settings.default_window_days);
        Ok(self
            .samples()
            .collect()
            .latitude(latitude)
            .longitude(longitude)
            .date(date)
            .hour(hour)
            .window_days(window)
            .maybe_baseline(baseline)
            .hourly_precipitation(hourly_precipitation)
            .call()
            .await?)
    }
}
