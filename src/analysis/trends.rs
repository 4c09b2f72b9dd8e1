//! Year-over-year exceedance trends with ordinary-least-squares slope and an
//! approximate stepped p-value.

use crate::condition::ConditionKind;
use crate::sampling::WeatherSample;
use crate::settings::Settings;
use crate::thresholds::flag_conditions;
use std::collections::BTreeMap;

/// Exceedance rate of one year.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    /// Fraction of the year's samples that exceeded, in `[0, 1]`.
    pub rate: f64,
}

/// Trend of a condition across the baseline years.
///
/// `points` is empty when fewer than two distinct years had samples; slope
/// and p-value then stay at their inert values (0 and 1).
#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    pub condition: ConditionKind,
    /// Strictly year-ascending.
    pub points: Vec<TrendPoint>,
    /// Rate change per year.
    pub slope: f64,
    pub p_value: f64,
    /// `p_value < 0.05`.
    pub significant: bool,
}

/// Per-year `(positives, total)` tallies for a condition, year-ascending.
pub fn exceedance_counts_by_year(
    samples: &[WeatherSample],
    condition: ConditionKind,
    settings: &Settings,
) -> BTreeMap<i32, (usize, usize)> {
    let mut by_year: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
    for sample in samples {
        let entry = by_year.entry(sample.year).or_insert((0, 0));
        if flag_conditions(sample, settings).matches(condition) {
            entry.0 += 1;
        }
        entry.1 += 1;
    }
    by_year
}

/// Fits the yearly exceedance rates for `condition`.
pub fn trend(samples: &[WeatherSample], condition: ConditionKind, settings: &Settings) -> Trend {
    let counts = exceedance_counts_by_year(samples, condition, settings);

    if counts.len() < 2 {
        return Trend {
            condition,
            points: Vec::new(),
            slope: 0.0,
            p_value: 1.0,
            significant: false,
        };
    }

    let points: Vec<TrendPoint> = counts
        .iter()
        .map(|(&year, &(positives, total))| TrendPoint {
            year,
            rate: positives as f64 / total as f64,
        })
        .collect();

    let x: Vec<f64> = points.iter().map(|p| p.year as f64).collect();
    let y: Vec<f64> = points.iter().map(|p| p.rate).collect();
    let (slope, p_value) = ols_slope_and_p_value(&x, &y);

    Trend {
        condition,
        points,
        slope,
        p_value,
        significant: p_value < 0.05,
    }
}

/// Trends for the five reported condition kinds.
pub fn all_trends(samples: &[WeatherSample], settings: &Settings) -> Vec<Trend> {
    ConditionKind::reported()
        .iter()
        .map(|&kind| trend(samples, kind, settings))
        .collect()
}

/// OLS slope plus a stepped p-value from the t-statistic.
///
/// The p-value is a conservative staircase over the usual two-sided critical
/// values (2.576, 1.96, 1.645) rather than a full t-distribution tail; with
/// no residual degrees of freedom, or a degenerate x-spread, the fit refuses
/// significance.
fn ols_slope_and_p_value(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n = x.len();
    debug_assert_eq!(n, y.len());
    if n < 2 {
        return (0.0, 1.0);
    }

    let x_mean = x.iter().sum::<f64>() / n as f64;
    let y_mean = y.iter().sum::<f64>() / n as f64;

    let sxx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
    if sxx == 0.0 {
        return (0.0, 1.0);
    }

    let sxy: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum();
    let slope = sxy / sxx;

    let df = n as f64 - 2.0;
    if df <= 0.0 {
        return (slope, 1.0);
    }

    let sse: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| {
            let predicted = slope * (xi - x_mean) + y_mean;
            (yi - predicted).powi(2)
        })
        .sum();

    let se = (sse / df / sxx).sqrt();
    let t = if se == 0.0 {
        if slope == 0.0 {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        slope / se
    };

    let p_value = match t.abs() {
        t if t > 2.576 => 0.01,
        t if t > 1.96 => 0.05,
        t if t > 1.645 => 0.10,
        _ => 0.5,
    };

    (slope, p_value)
}
