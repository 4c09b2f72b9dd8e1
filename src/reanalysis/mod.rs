//! Daily reanalysis archive access.

mod cache;
mod client;
mod error;

pub(crate) use cache::{default_cache_dir, prepare_cache_dir};
pub use client::{
    DailySeries, ReanalysisClient, PARAM_HUMIDITY, PARAM_PRECIPITATION, PARAM_TEMPERATURE,
    PARAM_WIND,
};
pub use error::ReanalysisError;
