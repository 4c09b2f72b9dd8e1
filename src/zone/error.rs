use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("Invalid coordinate ({lat}, {lon}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("No timezone found for coordinates ({lat}, {lon})")]
    NoZoneFound { lat: f64, lon: f64 },

    #[error("Unknown IANA zone name '{0}'")]
    UnknownZone(String),

    #[error("Invalid date '{0}': expected strict YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid day-of-year {0}: must be in [1, 365]")]
    InvalidDayOfYear(u32),

    #[error("Invalid hour {0}: must be in [0, 23]")]
    InvalidHour(u32),
}
