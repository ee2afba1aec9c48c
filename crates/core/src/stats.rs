//! Two-sample statistics for the event study.
//!
//! Price arithmetic stays in `Decimal` elsewhere in the workspace; the
//! routines here take `f64` samples converted at the call site. Every
//! routine reports an unusable input as `None` rather than a fabricated
//! value.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Outcome of Welch's unequal-variance t-test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WelchTest {
    /// t statistic (first sample mean minus second).
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
}

/// Sample mean. `None` for an empty sample.
#[must_use]
pub fn mean(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    Some(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Unbiased sample variance. `None` below two observations.
#[must_use]
pub fn sample_variance(sample: &[f64]) -> Option<f64> {
    if sample.len() < 2 {
        return None;
    }
    let m = mean(sample)?;
    let sum_squares: f64 = sample.iter().map(|x| (x - m) * (x - m)).sum();
    Some(sum_squares / (sample.len() - 1) as f64)
}

/// Welch's unequal-variance t-test between two samples.
///
/// Returns `None` when either sample has fewer than two observations or
/// when both samples are constant (zero pooled standard error).
#[must_use]
pub fn welch_t_test(first: &[f64], second: &[f64]) -> Option<WelchTest> {
    let mean_a = mean(first)?;
    let mean_b = mean(second)?;
    let var_a = sample_variance(first)?;
    let var_b = sample_variance(second)?;
    let n_a = first.len() as f64;
    let n_b = second.len() as f64;

    let se_a = var_a / n_a;
    let se_b = var_b / n_b;
    let pooled = se_a + se_b;
    if pooled < f64::EPSILON {
        return None;
    }

    let statistic = (mean_a - mean_b) / pooled.sqrt();

    // Welch-Satterthwaite approximation
    let df_denominator = se_a * se_a / (n_a - 1.0) + se_b * se_b / (n_b - 1.0);
    if df_denominator < f64::EPSILON {
        return None;
    }
    let degrees_of_freedom = pooled * pooled / df_denominator;

    let p_value = two_tailed_p(statistic, degrees_of_freedom)?;
    Some(WelchTest {
        statistic,
        degrees_of_freedom,
        p_value,
    })
}

/// Two-tailed p-value for a t statistic.
///
/// `None` when the degrees of freedom are not positive.
#[must_use]
pub fn two_tailed_p(statistic: f64, degrees_of_freedom: f64) -> Option<f64> {
    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom).ok()?;
    let p = 2.0 * (1.0 - dist.cdf(statistic.abs()));
    Some(p.clamp(0.0, 1.0))
}

/// Pearson correlation coefficient between paired samples.
///
/// Returns `None` for mismatched lengths, fewer than two pairs, or a
/// degenerate margin (either side constant).
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator < f64::EPSILON {
        return None;
    }

    Some(covariance / denominator)
}
