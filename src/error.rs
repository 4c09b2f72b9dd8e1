use crate::analysis::AnalysisError;
use crate::export::ExportError;
use crate::precipitation::PrecipitationError;
use crate::reanalysis::ReanalysisError;
use crate::sampling::SampleError;
use crate::zone::ZoneError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error of the crate, aggregating the per-module error kinds.
#[derive(Debug, Error)]
pub enum AlmanacError {
    #[error("Failed to resolve cache directory")]
    CacheDirResolution(#[source] std::io::Error),

    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to construct the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error(transparent)]
    Zone(#[from] ZoneError),

    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error(transparent)]
    Reanalysis(#[from] ReanalysisError),

    #[error(transparent)]
    Precipitation(#[from] PrecipitationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T> = std::result::Result<T, AlmanacError>;
