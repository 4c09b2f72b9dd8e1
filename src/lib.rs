//! # Almanac
//!
//! This crate estimates the probability that an outdoor activity at a given
//! location, calendar date and local hour runs into adverse weather — very
//! hot, very cold, very windy, very wet, or any of those — from a reanalysis
//! archive of historical daily meteorology.
//!
//! For every baseline year the same seasonal window (day-of-year ± a few
//! days) is sampled, each daily observation is flagged against configurable
//! thresholds (using the NWS heat-index and wind-chill formulas where they
//! apply), and the flagged share becomes a point estimate with an exact
//! Clopper–Pearson binomial confidence interval. Full-detail reports add
//! per-parameter histograms and year-over-year exceedance trends.
//!
//! ## Features
//!
//! *   **Risk assessment by coordinate**: resolve the local timezone, sample
//!     decades of history around the target day-of-year, and report odds per
//!     condition with exact 95 % confidence intervals.
//! *   **Apparent-temperature aware**: hot and cold thresholds apply to heat
//!     index and wind chill in their validity domains, falling back to air
//!     temperature outside them.
//! *   **Fused precipitation**: a half-hourly source is aggregated per local
//!     hour, with a uniform daily-total fallback when it is unavailable.
//! *   **Resilient fetching**: jittered exponential backoff, rate-limit
//!     awareness, per-year skip-and-continue, and an optional on-disk
//!     response cache with TTL.
//! *   **Exports**: per-sample CSV or JSON rows carrying sensors, derived
//!     indices and condition flags.
//! *   Asynchronous API using `tokio`.
//!
//! ## Usage Example
//!
//! ```no_run
//! use almanac::{Almanac, AlmanacError, ConditionKind, Detail, ExportFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AlmanacError> {
//!     let almanac = Almanac::new().await?;
//!
//!     // --- Example 1: lean assessment for a summer afternoon in Berlin ---
//!     let report = almanac
//!         .risk_assessment()
//!         .latitude(52.52)
//!         .longitude(13.40)
//!         .date("2024-07-20")
//!         .hour(15)
//!         .call()
//!         .await?;
//!
//!     for p in &report.probabilities {
//!         println!(
//!             "{:>6}: {:5.1}%  (95% CI {:.1}%..{:.1}%)",
//!             p.condition.label(),
//!             p.probability * 100.0,
//!             p.ci_lower * 100.0,
//!             p.ci_upper * 100.0,
//!         );
//!     }
//!
//!     // --- Example 2: full detail adds distributions and trends ---
//!     let full = almanac
//!         .risk_assessment()
//!         .latitude(52.52)
//!         .longitude(13.40)
//!         .date("2024-07-20")
//!         .hour(15)
//!         .detail(Detail::Full)
//!         .call()
//!         .await?;
//!
//!     if let Some(trends) = &full.trends {
//!         for t in trends {
//!             if t.significant {
//!                 println!("{} is trending at {:+.3}/year", t.condition, t.slope);
//!             }
//!         }
//!     }
//!
//!     // --- Example 3: export the underlying samples ---
//!     let csv = almanac
//!         .export()
//!         .latitude(52.52)
//!         .longitude(13.40)
//!         .date("2024-07-20")
//!         .hour(15)
//!         .format(ExportFormat::Csv)
//!         .call()
//!         .await?;
//!     println!("{} rows exported", csv.lines().count() - 1);
//!
//!     let hot = report.probability_of(ConditionKind::Hot);
//!     println!("hot details: {hot:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Key Components
//!
//! *   [`Almanac`]: the main client struct with the operation surface.
//! *   [`Settings`]: immutable configuration (thresholds, coverage gates,
//!     transport policy).
//! *   [`ConditionKind`]: the adverse-condition vocabulary.
//! *   [`RiskReport`] / [`ProbabilityResult`]: assessment results.
//! *   [`SampleCollection`] / [`WeatherSample`]: the raw collected samples.
//! *   [`AlmanacError`]: the primary error type of the crate.
//!
//! Check the specific function/method documentation for details on
//! arguments, return types, and potential errors.

mod almanac;
mod analysis;
mod assessment;
mod condition;
mod error;
mod export;
mod indices;
mod precipitation;
mod reanalysis;
mod sampling;
mod settings;
mod thresholds;
mod zone;

pub use almanac::Almanac;

pub use analysis::{
    all_trends, clopper_pearson, distribution, probability, sample_distributions,
    validate_sample_coverage, AnalysisError, CoverageReport, Distribution, HistogramBin,
    ProbabilityResult, Trend, TrendPoint, DEFAULT_CONFIDENCE_LEVEL,
};
pub use assessment::{CoverageSummary, Detail, RiskReport, ThresholdSummary};
pub use condition::ConditionKind;
pub use export::{export_rows, to_csv, to_json, ExportError, ExportFormat, ExportRow};
pub use indices::{feels_like, heat_index, wind_chill};
pub use precipitation::{
    HalfHourlyPoint, HalfHourlySource, HourlyPrecip, PrecipitationClient, PrecipitationError,
    SyntheticHalfHourly,
};
pub use reanalysis::{
    DailySeries, ReanalysisClient, ReanalysisError, PARAM_HUMIDITY, PARAM_PRECIPITATION,
    PARAM_TEMPERATURE, PARAM_WIND,
};
pub use sampling::{
    PrecipSource, SampleCollection, SampleCollector, SampleError, WeatherSample,
};
pub use settings::Settings;
pub use thresholds::{flag_conditions, ConditionFlags};
pub use zone::{clock, ZoneError, ZoneResolver};

pub use error::{AlmanacError, Result};
