//! Historical sample acquisition: the sample data model and the year-chunked
//! collector.

mod collector;
mod error;
pub(crate) mod sample;

pub use collector::SampleCollector;
pub use error::SampleError;
pub use sample::{PrecipSource, SampleCollection, WeatherSample};
