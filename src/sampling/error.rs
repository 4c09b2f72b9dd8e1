use crate::reanalysis::ReanalysisError;
use crate::zone::ZoneError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Invalid latitude {0}: must be -90 to 90")]
    InvalidLatitude(f64),

    #[error("Invalid longitude {0}: must be -180 to 180")]
    InvalidLongitude(f64),

    #[error("Invalid target hour {0}: must be 0-23")]
    InvalidHour(u32),

    #[error("Invalid baseline years: {start} is after {end}")]
    InvalidBaseline { start: i32, end: i32 },

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error("Insufficient coverage: {years_with_data} years with data (need {min_years}), {total_samples} samples (need {min_samples})")]
    InsufficientCoverage {
        years_with_data: u32,
        min_years: u32,
        total_samples: usize,
        min_samples: usize,
    },

    #[error("Every baseline year failed to fetch")]
    AllYearsFailed(#[source] ReanalysisError),
}
