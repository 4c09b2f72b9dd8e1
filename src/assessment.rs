//! The risk-assessment response: probabilities for the reported condition
//! kinds, the thresholds they were judged against, and (at full detail)
//! distributions and trends.

use crate::analysis::{
    all_trends, probability, sample_distributions, AnalysisError, Distribution,
    ProbabilityResult, Trend,
};
use crate::condition::ConditionKind;
use crate::sampling::SampleCollection;
use crate::settings::Settings;
use chrono::NaiveDate;
use chrono_tz::Tz;

/// How much of the analysis to run and return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Probabilities and coverage only.
    #[default]
    Lean,
    /// Probabilities plus distributions and trends.
    Full,
}

/// The thresholds a report was evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSummary {
    pub hot_heat_index_c: f64,
    pub cold_wind_chill_c: f64,
    pub windy_wind_ms: f64,
    pub wet_rain_mm_per_h: f64,
}

impl From<&Settings> for ThresholdSummary {
    fn from(settings: &Settings) -> Self {
        ThresholdSummary {
            hot_heat_index_c: settings.hot_heat_index_c,
            cold_wind_chill_c: settings.cold_wind_chill_c,
            windy_wind_ms: settings.windy_wind_ms,
            wet_rain_mm_per_h: settings.wet_rain_mm_per_h,
        }
    }
}

/// Coverage echoed from the collection that backed the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageSummary {
    pub years_requested: u32,
    pub years_with_data: u32,
    pub total_samples: usize,
    pub adequate: bool,
}

/// Complete result of the risk-assessment operation.
#[derive(Debug, Clone)]
pub struct RiskReport {
    pub latitude: f64,
    pub longitude: f64,
    pub target_date: NaiveDate,
    pub target_hour: u32,
    pub window_days: u32,
    pub baseline_years: (i32, i32),
    pub zone: Tz,
    pub coverage: CoverageSummary,
    pub thresholds: ThresholdSummary,
    /// One result per reported kind, in [`ConditionKind::reported`] order.
    pub probabilities: Vec<ProbabilityResult>,
    /// Present at [`Detail::Full`].
    pub distributions: Option<Vec<Distribution>>,
    /// Present at [`Detail::Full`].
    pub trends: Option<Vec<Trend>>,
}

impl RiskReport {
    /// Runs the analysis over a collection.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::EmptySamples`] when the collection holds no samples
    /// (possible only with coverage enforcement off).
    pub fn from_collection(
        collection: &SampleCollection,
        settings: &Settings,
        detail: Detail,
    ) -> Result<RiskReport, AnalysisError> {
        let probabilities = ConditionKind::reported()
            .iter()
            .map(|&kind| probability(&collection.samples, kind, settings))
            .collect::<Result<Vec<_>, _>>()?;

        let (distributions, trends) = match detail {
            Detail::Lean => (None, None),
            Detail::Full => (
                Some(sample_distributions(&collection.samples, settings)),
                Some(all_trends(&collection.samples, settings)),
            ),
        };

        Ok(RiskReport {
            latitude: collection.latitude,
            longitude: collection.longitude,
            target_date: collection.target_date,
            target_hour: collection.target_hour,
            window_days: collection.window_days,
            baseline_years: collection.baseline_years,
            zone: collection.zone,
            coverage: CoverageSummary {
                years_requested: collection.years_requested,
                years_with_data: collection.years_with_data,
                total_samples: collection.total_samples,
                adequate: collection.coverage_adequate,
            },
            thresholds: ThresholdSummary::from(settings),
            probabilities,
            distributions,
            trends,
        })
    }

    /// The probability result for one of the reported kinds.
    pub fn probability_of(&self, kind: ConditionKind) -> Option<&ProbabilityResult> {
        self.probabilities.iter().find(|p| p.condition == kind)
    }
}
