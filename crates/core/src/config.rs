//! Study configuration.
//!
//! One `StudyConfig` drives a whole run: which forward-return horizons to
//! measure, the significance level, and the sampling knobs for the
//! baseline and volume features.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};

/// Configuration for an event study run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Forward-return horizons in trading days.
    pub windows: Vec<usize>,
    /// Significance level for the Welch tests.
    pub alpha: f64,
    /// Trading days excluded on each side of an event when sampling the
    /// baseline.
    pub blackout_days: usize,
    /// Lookback for the trailing volume average, in trading days.
    pub volume_lookback: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            windows: vec![5, 20, 30],
            alpha: 0.05,
            blackout_days: 30,
            volume_lookback: 30,
        }
    }
}

impl StudyConfig {
    /// Creates a config with custom return windows and default knobs.
    #[must_use]
    pub fn new(windows: Vec<usize>) -> Self {
        Self {
            windows,
            ..Self::default()
        }
    }

    /// Sets the significance level.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the baseline blackout half-width in trading days.
    #[must_use]
    pub fn with_blackout_days(mut self, blackout_days: usize) -> Self {
        self.blackout_days = blackout_days;
        self
    }

    /// Sets the volume average lookback in trading days.
    #[must_use]
    pub fn with_volume_lookback(mut self, volume_lookback: usize) -> Self {
        self.volume_lookback = volume_lookback;
        self
    }

    /// Checks the config and normalizes the window list.
    ///
    /// Windows are sorted ascending and deduplicated.
    ///
    /// # Errors
    /// Returns `Configuration` when the window list is empty, a window is
    /// zero, `alpha` is outside (0, 1), or the volume lookback is zero.
    pub fn validated(mut self) -> Result<Self> {
        if self.windows.is_empty() {
            return Err(StudyError::configuration(
                "at least one return window is required",
            ));
        }
        if self.windows.contains(&0) {
            return Err(StudyError::configuration(
                "return windows must be at least 1 trading day",
            ));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(StudyError::configuration(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.volume_lookback == 0 {
            return Err(StudyError::configuration(
                "volume lookback must be at least 1 trading day",
            ));
        }

        self.windows.sort_unstable();
        self.windows.dedup();
        Ok(self)
    }
}
