//! Statistical analysis over collected samples: probabilities with exact
//! intervals, parameter distributions, and yearly exceedance trends.

mod distributions;
mod error;
mod probability;
mod special;
mod trends;

pub use distributions::{distribution, sample_distributions, Distribution, HistogramBin};
pub use error::AnalysisError;
pub use probability::{
    clopper_pearson, probability, validate_sample_coverage, CoverageReport, ProbabilityResult,
    DEFAULT_CONFIDENCE_LEVEL,
};
pub use trends::{all_trends, exceedance_counts_by_year, trend, Trend, TrendPoint};
