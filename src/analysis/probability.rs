//! Probability of an adverse condition with Clopper–Pearson exact binomial
//! confidence intervals.

use crate::analysis::error::AnalysisError;
use crate::analysis::special::inv_beta_cdf;
use crate::condition::ConditionKind;
use crate::sampling::WeatherSample;
use crate::settings::Settings;
use crate::thresholds::flag_conditions;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Default confidence level for the exact interval.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Point estimate and exact confidence interval for one condition kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityResult {
    pub condition: ConditionKind,
    /// `k / n`, or 0 when there are no samples.
    pub probability: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub confidence_level: f64,
    pub total_samples: usize,
    pub positive_samples: usize,
    /// Span in years between the oldest and newest sample, inclusive.
    pub coverage_years: u32,
    /// Adequacy is gated on the number of distinct years that actually
    /// produced samples, not on the span: with skipped years in between,
    /// the span overstates coverage.
    pub coverage_adequate: bool,
    pub analysis_at: DateTime<Utc>,
}

impl ProbabilityResult {
    /// Width of the confidence interval.
    pub fn ci_width(&self) -> f64 {
        self.ci_upper - self.ci_lower
    }

    /// Half the CI width relative to the point estimate; `None` when the
    /// estimate is zero.
    pub fn relative_error(&self) -> Option<f64> {
        if self.probability == 0.0 {
            None
        } else {
            Some(self.ci_width() / 2.0 / self.probability)
        }
    }
}

/// Clopper–Pearson exact binomial interval for `successes` out of `trials`.
///
/// The interval comes from Beta-distribution quantiles: the lower bound is
/// the `α/2` quantile of `Beta(k, n−k+1)` and the upper the `1−α/2` quantile
/// of `Beta(k+1, n−k)`, with the conventional closed endpoints at `k = 0`
/// and `k = n`. `successes <= trials` is the caller's contract.
pub fn clopper_pearson(successes: usize, trials: usize, confidence_level: f64) -> (f64, f64) {
    debug_assert!(successes <= trials);
    debug_assert!((0.0..1.0).contains(&confidence_level) && confidence_level > 0.0);

    let alpha = 1.0 - confidence_level;

    if trials == 0 {
        return (0.0, 1.0);
    }

    let k = successes as f64;
    let n = trials as f64;

    if successes == 0 {
        let upper = inv_beta_cdf(1.0 - alpha / 2.0, 1.0, n);
        return (0.0, upper);
    }
    if successes == trials {
        let lower = inv_beta_cdf(alpha / 2.0, n, 1.0);
        return (lower, 1.0);
    }

    let lower = inv_beta_cdf(alpha / 2.0, k, n - k + 1.0);
    let upper = inv_beta_cdf(1.0 - alpha / 2.0, k + 1.0, n - k);
    (lower, upper)
}

/// Counts the samples matching `condition` and wraps the exact interval with
/// coverage metadata.
///
/// # Errors
///
/// [`AnalysisError::EmptySamples`] when the sample set is empty.
pub fn probability(
    samples: &[WeatherSample],
    condition: ConditionKind,
    settings: &Settings,
) -> Result<ProbabilityResult, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::EmptySamples);
    }

    let positive_samples = samples
        .iter()
        .filter(|sample| flag_conditions(sample, settings).matches(condition))
        .count();
    let total_samples = samples.len();
    let point_estimate = positive_samples as f64 / total_samples as f64;

    let (ci_lower, ci_upper) =
        clopper_pearson(positive_samples, total_samples, DEFAULT_CONFIDENCE_LEVEL);

    let coverage_years = coverage_year_span(samples);
    let coverage_adequate = distinct_year_count(samples) >= settings.min_years
        && total_samples >= settings.min_samples;

    Ok(ProbabilityResult {
        condition,
        probability: point_estimate,
        ci_lower,
        ci_upper,
        confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        total_samples,
        positive_samples,
        coverage_years,
        coverage_adequate,
        analysis_at: Utc::now(),
    })
}

/// `max.year − min.year + 1` across the samples' civil years; 0 when empty.
pub(crate) fn coverage_year_span(samples: &[WeatherSample]) -> u32 {
    let years = samples.iter().map(|s| s.year);
    match (years.clone().min(), years.max()) {
        (Some(min), Some(max)) => (max - min + 1) as u32,
        _ => 0,
    }
}

/// Number of distinct civil years that contributed at least one sample.
pub(crate) fn distinct_year_count(samples: &[WeatherSample]) -> u32 {
    samples
        .iter()
        .map(|s| s.year)
        .collect::<BTreeSet<_>>()
        .len() as u32
}

/// Coverage validation report against the configured minima.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub total_samples: usize,
    /// Inclusive oldest-to-newest year span.
    pub coverage_years: u32,
    /// Distinct years that contributed samples; this is what the adequacy
    /// gate compares against `min_years`.
    pub distinct_years: u32,
    pub min_years: u32,
    pub min_samples: usize,
    pub meets_years: bool,
    pub meets_samples: bool,
    pub meets_overall: bool,
    /// Mean of the two requirement ratios; 1.0 means exactly adequate.
    pub adequacy_score: f64,
}

/// Checks a sample set against the coverage minima without computing any
/// probabilities.
pub fn validate_sample_coverage(samples: &[WeatherSample], settings: &Settings) -> CoverageReport {
    let total_samples = samples.len();
    let coverage_years = coverage_year_span(samples);
    let distinct_years = distinct_year_count(samples);

    let meets_years = distinct_years >= settings.min_years;
    let meets_samples = total_samples >= settings.min_samples;

    let adequacy_score = if settings.min_years > 0 && settings.min_samples > 0 {
        (distinct_years as f64 / settings.min_years as f64) * 0.5
            + (total_samples as f64 / settings.min_samples as f64) * 0.5
    } else {
        0.0
    };

    CoverageReport {
        total_samples,
        coverage_years,
        distinct_years,
        min_years: settings.min_years,
        min_samples: settings.min_samples,
        meets_years,
        meets_samples,
        meets_overall: meets_years && meets_samples,
        adequacy_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::sample::test_support::{calm_sample, sample_on};

    /// `n` samples of which the first `k` are very hot.
    fn hot_mix(n: usize, k: usize) -> Vec<WeatherSample> {
        (0..n)
            .map(|i| {
                let day = (i % 28) as u32 + 1;
                let year = 2001 + (i / 28) as i32;
                if i < k {
                    // 45 °C at 50 % humidity is far past any hot threshold.
                    sample_on(year, 6, day, 45.0, 50.0, 2.0, 0.0)
                } else {
                    calm_sample(year, 6, day)
                }
            })
            .collect()
    }

    #[test]
    fn zero_successes_interval() {
        let (lower, upper) = clopper_pearson(0, 100, 0.95);
        assert_eq!(lower, 0.0);
        assert!(upper > 0.030 && upper < 0.040, "upper = {upper}");
    }

    #[test]
    fn symmetric_centre_interval() {
        let (lower, upper) = clopper_pearson(50, 100, 0.95);
        assert!((lower - 0.398).abs() < 0.001, "lower = {lower}");
        assert!((upper - 0.602).abs() < 0.001, "upper = {upper}");
        let centre = (lower + upper) / 2.0;
        assert!((centre - 0.5).abs() < 0.05);
    }

    #[test]
    fn interval_brackets_the_estimate_and_stays_in_unit_range() {
        for (k, n) in [(0usize, 1usize), (1, 1), (3, 10), (17, 23), (99, 100)] {
            let (lower, upper) = clopper_pearson(k, n, 0.95);
            let p = k as f64 / n as f64;
            assert!(
                (0.0..=1.0).contains(&lower) && (0.0..=1.0).contains(&upper),
                "bounds out of range for k={k} n={n}"
            );
            assert!(lower <= p && p <= upper, "p outside CI for k={k} n={n}");
        }
    }

    #[test]
    fn interval_shrinks_as_samples_grow_at_fixed_ratio() {
        let mut last_width = f64::INFINITY;
        for n in [10usize, 100, 1000] {
            let (lower, upper) = clopper_pearson(n / 2, n, 0.95);
            let width = upper - lower;
            assert!(width < last_width, "width did not shrink at n={n}");
            last_width = width;
        }
    }

    #[test]
    fn all_successes_edge() {
        let (lower, upper) = clopper_pearson(50, 50, 0.95);
        assert_eq!(upper, 1.0);
        assert!(lower < 1.0 && lower > 0.9);
    }

    #[test]
    fn no_trials_is_the_whole_unit_interval() {
        assert_eq!(clopper_pearson(0, 0, 0.95), (0.0, 1.0));
    }

    #[test]
    fn probability_counts_flags_and_reports_coverage() {
        let samples = hot_mix(100, 50);
        let settings = Settings::default();
        let result = probability(&samples, ConditionKind::Hot, &settings).unwrap();

        assert_eq!(result.probability, 0.5);
        assert_eq!(result.positive_samples, 50);
        assert_eq!(result.total_samples, 100);
        assert!(result.ci_lower <= 0.5 && 0.5 <= result.ci_upper);
        // 100 samples across 2001..2004 shy of the 15-year gate.
        assert!(!result.coverage_adequate);
        assert!(result.relative_error().is_some());
    }

    #[test]
    fn probability_of_empty_set_is_an_error() {
        let settings = Settings::default();
        assert!(matches!(
            probability(&[], ConditionKind::Any, &settings),
            Err(AnalysisError::EmptySamples)
        ));
    }

    #[test]
    fn zero_rate_has_open_upper_bound() {
        let samples = hot_mix(100, 0);
        let settings = Settings::default();
        let result = probability(&samples, ConditionKind::Hot, &settings).unwrap();
        assert_eq!(result.probability, 0.0);
        assert_eq!(result.ci_lower, 0.0);
        assert!(result.ci_upper > 0.0);
        assert!(result.relative_error().is_none());
    }

    #[test]
    fn coverage_report_tracks_both_requirements() {
        let settings = Settings::builder().min_years(2).min_samples(4).build();
        let samples = vec![
            calm_sample(2010, 6, 1),
            calm_sample(2010, 6, 2),
            calm_sample(2012, 6, 1),
            calm_sample(2012, 6, 2),
        ];
        let report = validate_sample_coverage(&samples, &settings);
        assert_eq!(report.coverage_years, 3);
        assert_eq!(report.distinct_years, 2);
        assert!(report.meets_years);
        assert!(report.meets_samples);
        assert!(report.meets_overall);
        assert!(report.adequacy_score >= 1.0);

        let thin = validate_sample_coverage(&samples[..2], &settings);
        assert!(!thin.meets_samples);
        assert!(!thin.meets_overall);
    }

    #[test]
    fn sparse_years_do_not_pass_the_adequacy_gate() {
        // Only the first and last baseline year delivered data: the span is
        // wide, but two years of evidence cannot satisfy a 15-year gate.
        let mut samples: Vec<WeatherSample> =
            (1..=10).map(|day| calm_sample(2001, 6, day)).collect();
        samples.extend((1..=10).map(|day| calm_sample(2023, 6, day)));
        let settings = Settings::default();

        let result = probability(&samples, ConditionKind::Any, &settings).unwrap();
        assert_eq!(result.coverage_years, 23);
        assert!(!result.coverage_adequate);

        let report = validate_sample_coverage(&samples, &settings);
        assert_eq!(report.coverage_years, 23);
        assert_eq!(report.distinct_years, 2);
        assert!(!report.meets_years);
        assert!(!report.meets_overall);
    }

    #[test]
    fn coverage_span_is_inclusive() {
        assert_eq!(coverage_year_span(&[]), 0);
        assert_eq!(distinct_year_count(&[]), 0);
        let one = vec![calm_sample(2015, 6, 1)];
        assert_eq!(coverage_year_span(&one), 1);
        assert_eq!(distinct_year_count(&one), 1);
    }
}
