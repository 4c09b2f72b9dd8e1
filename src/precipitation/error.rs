use crate::reanalysis::ReanalysisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrecipitationError {
    #[error("Invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Half-hourly precipitation source failed: {0}")]
    Source(String),

    #[error(transparent)]
    Reanalysis(#[from] ReanalysisError),
}
