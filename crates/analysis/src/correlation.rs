//! Ratio-versus-return correlation across events.

use serde::{Deserialize, Serialize};
use tracing::debug;

use event_study_core::error::StudyError;
use event_study_core::stats::pearson;

use crate::dataset::EventDataset;
use crate::ratios::RatioKind;

/// Minimum complete pairs before a coefficient is reported.
pub const MIN_PAIRS: usize = 3;

/// Pearson correlation between one ratio and one return window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Ratio side of the pair.
    pub ratio: RatioKind,
    /// Return horizon in trading days.
    pub window: usize,
    /// Events where both the ratio and the return were present.
    pub n_pairs: usize,
    /// Correlation coefficient, absent below `MIN_PAIRS` complete pairs
    /// or under degenerate variance.
    pub coefficient: Option<f64>,
}

/// Correlates every ratio with every return window.
///
/// Observations are pairwise complete: an event enters a pair only when
/// both the ratio and that window's return are present for it, so one
/// filing's missing field never shrinks the other pairs.
#[must_use]
pub fn correlate(dataset: &EventDataset) -> Vec<CorrelationResult> {
    let mut results = Vec::with_capacity(RatioKind::ALL.len() * dataset.windows().len());
    for ratio in RatioKind::ALL {
        for &window in dataset.windows() {
            results.push(correlate_pair(dataset, ratio, window));
        }
    }
    results
}

fn correlate_pair(dataset: &EventDataset, ratio: RatioKind, window: usize) -> CorrelationResult {
    let mut ratio_values = Vec::new();
    let mut return_values = Vec::new();
    for event in dataset.events() {
        let (Some(value), Some(ret)) = (event.ratios.get(ratio), event.subject_return(window))
        else {
            continue;
        };
        let (Ok(x), Ok(y)) = (f64::try_from(value), f64::try_from(ret)) else {
            continue;
        };
        ratio_values.push(x);
        return_values.push(y);
    }

    let n_pairs = ratio_values.len();
    let coefficient = if n_pairs < MIN_PAIRS {
        let error = StudyError::insufficient_samples(MIN_PAIRS, n_pairs);
        debug!(
            ratio = ratio.name(),
            window,
            error = %error,
            "Correlation skipped"
        );
        None
    } else {
        pearson(&ratio_values, &return_values)
    };

    CorrelationResult {
        ratio,
        window,
        n_pairs,
        coefficient,
    }
}
