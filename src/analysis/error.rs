use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Cannot compute a probability over an empty sample set")]
    EmptySamples,
}
