//! Histograms and descriptive statistics for the meteorological parameters.
//!
//! When a parameter has a threshold inside the observed range, the bin edges
//! are built as two half-linspaces that meet exactly at the threshold, so the
//! flagged share of the distribution can be read straight off the bins.

use crate::sampling::WeatherSample;
use crate::settings::Settings;
use ordered_float::OrderedFloat;

/// One left-closed/right-open histogram bin; the final bin of a distribution
/// is closed on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// `count / total`, summing to 1 across a non-empty distribution.
    pub frequency: f64,
}

/// Histogram plus descriptive statistics for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub parameter: String,
    pub unit: String,
    pub bins: Vec<HistogramBin>,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (ddof = 1) when more than one value, else 0.
    pub std_dev: f64,
    pub threshold: Option<f64>,
}

/// Builds the distribution of `values` with `n_bins` bins.
///
/// An empty input produces empty bins and zero statistics. A threshold
/// strictly inside the value range is pinned as an interior bin edge.
pub fn distribution(
    parameter: &str,
    unit: &str,
    values: &[f64],
    threshold: Option<f64>,
    n_bins: usize,
) -> Distribution {
    if values.is_empty() || n_bins == 0 {
        return Distribution {
            parameter: parameter.to_string(),
            unit: unit.to_string(),
            bins: Vec::new(),
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            threshold,
        };
    }

    let mut vmin = f64::INFINITY;
    let mut vmax = f64::NEG_INFINITY;
    for &v in values {
        vmin = vmin.min(v);
        vmax = vmax.max(v);
    }
    // A constant series still needs bins with positive width.
    if vmin == vmax {
        vmin -= 0.5;
        vmax += 0.5;
    }

    let edges = match threshold {
        Some(t) if vmin < t && t < vmax => {
            let mut edges = linspace(vmin, t, n_bins / 2 + 1);
            edges.extend_from_slice(&linspace(t, vmax, n_bins / 2 + 1)[1..]);
            edges
        }
        _ => linspace(vmin, vmax, n_bins + 1),
    };

    let bin_count = edges.len() - 1;
    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let idx = match edges.partition_point(|e| *e <= v) {
            0 => 0,
            i => (i - 1).min(bin_count - 1),
        };
        counts[idx] += 1;
    }

    let total = values.len();
    let bins = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            lower: edges[i],
            upper: edges[i + 1],
            count,
            frequency: count as f64 / total as f64,
        })
        .collect();

    let mean = values.iter().sum::<f64>() / total as f64;
    let std_dev = if total > 1 {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (total - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    let mut sorted: Vec<OrderedFloat<f64>> = values.iter().map(|&v| OrderedFloat(v)).collect();
    sorted.sort_unstable();
    let median = if total % 2 == 1 {
        sorted[total / 2].into_inner()
    } else {
        (sorted[total / 2 - 1].into_inner() + sorted[total / 2].into_inner()) / 2.0
    };

    Distribution {
        parameter: parameter.to_string(),
        unit: unit.to_string(),
        bins,
        mean,
        median,
        std_dev,
        threshold,
    }
}

/// Distributions for the six reported parameters: raw sensors, the hourly
/// precipitation rate, and the two validity-filtered indices.
pub fn sample_distributions(samples: &[WeatherSample], settings: &Settings) -> Vec<Distribution> {
    let n_bins = settings.histogram_bins;

    let temperatures: Vec<f64> = samples.iter().map(|s| s.temperature_c).collect();
    let humidities: Vec<f64> = samples.iter().map(|s| s.relative_humidity).collect();
    let winds: Vec<f64> = samples.iter().map(|s| s.wind_speed_ms).collect();
    let precip_rates: Vec<f64> = samples.iter().map(|s| s.hourly_precip_rate()).collect();
    let heat_indices: Vec<f64> = samples.iter().filter_map(|s| s.heat_index_c).collect();
    let wind_chills: Vec<f64> = samples.iter().filter_map(|s| s.wind_chill_c).collect();

    vec![
        distribution("temperature", "°C", &temperatures, None, n_bins),
        distribution("relative_humidity", "%", &humidities, None, n_bins),
        distribution(
            "wind_speed",
            "m/s",
            &winds,
            Some(settings.windy_wind_ms),
            n_bins,
        ),
        distribution(
            "precipitation",
            "mm/h",
            &precip_rates,
            Some(settings.wet_rain_mm_per_h),
            n_bins,
        ),
        distribution(
            "heat_index",
            "°C",
            &heat_indices,
            Some(settings.hot_heat_index_c),
            n_bins,
        ),
        distribution(
            "wind_chill",
            "°C",
            &wind_chills,
            Some(settings.cold_wind_chill_c),
            n_bins,
        ),
    ]
}

/// `n` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| {
            if i == n - 1 {
                end
            } else {
                start + step * i as f64
            }
        })
        .collect()
}
