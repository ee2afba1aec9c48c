//! Pre/post event significance testing.
//!
//! For each window the post-event sample is the stored event returns. The
//! baseline sample is drawn from the rest of the series at anchors strided
//! by the window length, so baseline horizons never overlap each other,
//! and a blackout region around every event keeps event-driven price
//! action out of the baseline.

use serde::{Deserialize, Serialize};
use tracing::warn;

use event_study_core::config::StudyConfig;
use event_study_core::error::StudyError;
use event_study_core::price::PriceSeries;
use event_study_core::stats::{mean, welch_t_test};

use crate::dataset::EventDataset;
use crate::returns::forward_return_at;

/// Welch test outcome for one return window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Return horizon in trading days.
    pub window: usize,
    /// Baseline sample size.
    pub pre_n: usize,
    /// Event sample size.
    pub post_n: usize,
    /// Baseline mean return.
    pub pre_mean: Option<f64>,
    /// Event mean return.
    pub post_mean: Option<f64>,
    /// t statistic for baseline minus event means.
    pub statistic: Option<f64>,
    /// Welch-Satterthwaite degrees of freedom.
    pub degrees_of_freedom: Option<f64>,
    /// Two-tailed p-value, absent when either sample is unusable.
    pub p_value: Option<f64>,
    /// Significance level the verdict uses.
    pub alpha: f64,
    /// True when `p_value` is present and below `alpha`.
    pub is_significant: bool,
}

/// Runs the Welch test for every configured window.
///
/// Windows never fail individually: a window without enough observations
/// on either side reports absent statistics and the rest still run.
#[must_use]
pub fn test_windows(
    dataset: &EventDataset,
    series: &PriceSeries,
    config: &StudyConfig,
) -> Vec<TestResult> {
    let event_indices: Vec<usize> = dataset
        .events()
        .iter()
        .filter_map(|event| series.position_of(event.event_date))
        .collect();

    dataset
        .windows()
        .iter()
        .map(|&window| test_window(dataset, series, &event_indices, window, config))
        .collect()
}

fn test_window(
    dataset: &EventDataset,
    series: &PriceSeries,
    event_indices: &[usize],
    window: usize,
    config: &StudyConfig,
) -> TestResult {
    let post: Vec<f64> = dataset
        .returns_for_window(window)
        .into_iter()
        .filter_map(|ret| f64::try_from(ret).ok())
        .collect();

    let pre = baseline_sample(series, event_indices, window, config.blackout_days);

    let outcome = welch_t_test(&pre, &post);
    if outcome.is_none() {
        let smaller = pre.len().min(post.len());
        if smaller < 2 {
            let error = StudyError::insufficient_samples(2, smaller);
            warn!(
                window,
                pre_n = pre.len(),
                post_n = post.len(),
                error = %error,
                "Significance test skipped"
            );
        } else {
            warn!(
                window,
                pre_n = pre.len(),
                post_n = post.len(),
                "Significance test skipped: degenerate variance"
            );
        }
    }

    TestResult {
        window,
        pre_n: pre.len(),
        post_n: post.len(),
        pre_mean: mean(&pre),
        post_mean: mean(&post),
        statistic: outcome.map(|t| t.statistic),
        degrees_of_freedom: outcome.map(|t| t.degrees_of_freedom),
        p_value: outcome.map(|t| t.p_value),
        alpha: config.alpha,
        is_significant: outcome.is_some_and(|t| t.p_value < config.alpha),
    }
}

/// Baseline forward returns sampled outside event neighborhoods.
///
/// Anchors start at the first bar and stride by the window length. An
/// anchor is dropped when its horizon `[i, i + window]` touches the
/// blackout region of any event, or when its return cannot be computed.
fn baseline_sample(
    series: &PriceSeries,
    event_indices: &[usize],
    window: usize,
    blackout: usize,
) -> Vec<f64> {
    let len = series.len();
    let mut sample = Vec::new();
    let mut anchor = 0usize;
    while anchor + window < len {
        if !in_blackout(anchor, window, event_indices, blackout) {
            if let Ok(ret) = forward_return_at(series, anchor, window) {
                if let Ok(value) = f64::try_from(ret) {
                    sample.push(value);
                }
            }
        }
        anchor += window;
    }
    sample
}

/// True when the horizon `[anchor, anchor + window]` intersects the
/// blackout region `[event - blackout, event + blackout]` of any event.
fn in_blackout(anchor: usize, window: usize, event_indices: &[usize], blackout: usize) -> bool {
    let horizon_end = anchor + window;
    event_indices.iter().any(|&event| {
        let region_start = event.saturating_sub(blackout);
        let region_end = event + blackout;
        anchor <= region_end && region_start <= horizon_end
    })
}
