use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReanalysisError {
    #[error("Invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Rate limited by the reanalysis archive (still HTTP 429 after {attempts} attempts)")]
    RateLimited { attempts: u32 },

    #[error("Reanalysis request for {url} failed with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Network request failed for {0}")]
    Transport(String, #[source] reqwest::Error),

    #[error("Malformed reanalysis response: {0}")]
    BadResponse(String),
}

impl ReanalysisError {
    /// Whether another attempt could reasonably succeed.
    pub(crate) fn is_retryable(&self) -> bool {
        match self {
            ReanalysisError::Transport(..) => true,
            ReanalysisError::HttpStatus { status, .. } => {
                matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    pub(crate) fn is_rate_limit(&self) -> bool {
        matches!(
            self,
            ReanalysisError::HttpStatus { status, .. } if status.as_u16() == 429
        )
    }
}
