//! Hourly precipitation, fused from a half-hourly source with a daily
//! reanalysis fallback.

mod client;
mod error;
mod halfhourly;

pub use client::{HourlyPrecip, PrecipitationClient};
pub use error::PrecipitationError;
pub use halfhourly::{HalfHourlyPoint, HalfHourlySource, SyntheticHalfHourly};
