//! Crate configuration: thresholds, coverage gates, transport policy and
//! operational defaults.

use bon::Builder;

/// Immutable settings value consumed by the collector, threshold engine and
/// clients. Construct with [`Settings::default`] for the canonical values or
/// with [`Settings::builder`] to override individual knobs; units are encoded
/// in the field names.
///
/// # Example
///
/// ```
/// use almanac::Settings;
///
/// let settings = Settings::builder()
///     .windy_wind_ms(15.0)
///     .enforce_coverage(false)
///     .build();
/// assert_eq!(settings.hot_heat_index_c, 41.0);
/// assert_eq!(settings.windy_wind_ms, 15.0);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Settings {
    /// Very-hot threshold on the heat index (or air temperature when the
    /// index is undefined), °C.
    #[builder(default = 41.0)]
    pub hot_heat_index_c: f64,

    /// Very-cold threshold on the wind chill (or air temperature when the
    /// index is undefined), °C.
    #[builder(default = -10.0)]
    pub cold_wind_chill_c: f64,

    /// Very-windy threshold on wind speed, m/s.
    #[builder(default = 10.8)]
    pub windy_wind_ms: f64,

    /// Very-wet threshold on the hourly precipitation rate, mm/h.
    #[builder(default = 4.0)]
    pub wet_rain_mm_per_h: f64,

    /// Minimum distinct years with data for adequate coverage.
    #[builder(default = 15)]
    pub min_years: u32,

    /// Minimum total samples for adequate coverage.
    #[builder(default = 8)]
    pub min_samples: usize,

    /// Fail closed (`InsufficientCoverage`) when coverage is inadequate;
    /// otherwise the collection is returned flagged `adequate = false`.
    #[builder(default = true)]
    pub enforce_coverage: bool,

    /// HTTP connect timeout, seconds.
    #[builder(default = 10)]
    pub connect_timeout_s: u64,

    /// HTTP read timeout, seconds.
    #[builder(default = 30)]
    pub read_timeout_s: u64,

    /// Attempts per upstream request (first try included).
    #[builder(default = 3)]
    pub retries: u32,

    /// Base delay of the jittered exponential backoff, milliseconds.
    #[builder(default = 1000)]
    pub backoff_base_ms: u64,

    /// First year of the default baseline period.
    #[builder(default = 2001)]
    pub baseline_start: i32,

    /// Last year of the default baseline period.
    #[builder(default = 2023)]
    pub baseline_end: i32,

    /// Day-of-year half-window used by the high-level operations when the
    /// caller does not pass one. The collector's own call-site default is 15.
    #[builder(default = 7)]
    pub default_window_days: u32,

    /// Base URL of the reanalysis archive.
    #[builder(default = "https://power.larc.nasa.gov".to_string(), into)]
    pub base_url: String,

    /// Whether the half-hourly precipitation source is consulted at all.
    #[builder(default = true)]
    pub half_hourly_enabled: bool,

    /// Whether precipitation falls back to the daily reanalysis total when
    /// the half-hourly source yields nothing.
    #[builder(default = true)]
    pub precipitation_fallback_enabled: bool,

    /// TTL for the optional on-disk response cache, days.
    #[builder(default = 30)]
    pub cache_ttl_days: u64,

    /// Histogram bin count for distributions.
    #[builder(default = 20)]
    pub histogram_bins: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::builder().build()
    }
}
