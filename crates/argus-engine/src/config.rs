//! Engine configuration.
//!
//! The configuration collaborator supplies loosely-structured settings;
//! here they are explicit named, typed fields with documented defaults,
//! validated eagerly at configuration time rather than at use time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default decision cutoff for anomaly verdicts.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Default (and minimum) predictor input width.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Default floor below which `detect` short-circuits with a zero-score,
/// non-error result.
pub const DEFAULT_MIN_DATA_POINTS: usize = 10;

/// Default post-fusion score multiplier.
pub const DEFAULT_SENSITIVITY: f64 = 1.0;

/// Default background refresh cadence.
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 60;

// ── Engine Configuration ────────────────────────────────────────────────

/// Configuration for the scoring orchestrator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decision cutoff: fused scores above this are anomalies.
    pub threshold: f64,
    /// Predictor input width (floor of 10 enforced at validation).
    pub window_size: usize,
    /// Batches smaller than this return zero-score diagnostic results.
    pub min_data_points: usize,
    /// Post-fusion score multiplier.
    pub sensitivity: f64,
    /// Gates the predictive path.
    pub enable_ml: bool,
    /// Cadence of the background model-refresh and metrics tasks.
    pub update_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
            min_data_points: DEFAULT_MIN_DATA_POINTS,
            sensitivity: DEFAULT_SENSITIVITY,
            enable_ml: true,
            update_interval: Duration::from_secs(DEFAULT_UPDATE_INTERVAL_SECS),
        }
    }
}

// ── Engine Options ──────────────────────────────────────────────────────

/// Partial engine reconfiguration supplied by the configuration
/// collaborator. Unset fields keep the base configuration's value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Replaces the decision cutoff.
    pub threshold: Option<f64>,
    /// Replaces the predictor input width.
    pub window_size: Option<usize>,
    /// Replaces the scoring floor.
    pub min_data_points: Option<usize>,
    /// Replaces the post-fusion multiplier.
    pub sensitivity: Option<f64>,
    /// Enables or disables the predictive path.
    pub enable_ml: Option<bool>,
    /// Replaces the background refresh cadence.
    pub update_interval: Option<Duration>,
}

impl EngineConfig {
    /// Merge partial options over this configuration. The merged result
    /// is validated as a whole before it is returned, so an invalid
    /// option never produces a half-applied configuration.
    pub fn with_options(&self, options: &EngineOptions) -> EngineResult<EngineConfig> {
        let mut merged = self.clone();
        if let Some(threshold) = options.threshold {
            merged.threshold = threshold;
        }
        if let Some(window_size) = options.window_size {
            merged.window_size = window_size;
        }
        if let Some(min_data_points) = options.min_data_points {
            merged.min_data_points = min_data_points;
        }
        if let Some(sensitivity) = options.sensitivity {
            merged.sensitivity = sensitivity;
        }
        if let Some(enable_ml) = options.enable_ml {
            merged.enable_ml = enable_ml;
        }
        if let Some(update_interval) = options.update_interval {
            merged.update_interval = update_interval;
        }
        merged.validate()?;
        Ok(merged)
    }

    /// Validate all fields. Called at orchestrator construction so a bad
    /// configuration is rejected before any scoring happens.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "threshold must be a positive finite number, got {}",
                self.threshold
            )));
        }
        if self.window_size < DEFAULT_WINDOW_SIZE {
            return Err(EngineError::InvalidInput(format!(
                "window_size must be at least {}, got {}",
                DEFAULT_WINDOW_SIZE, self.window_size
            )));
        }
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(EngineError::InvalidInput(format!(
                "sensitivity must be a positive finite number, got {}",
                self.sensitivity
            )));
        }
        if self.update_interval.is_zero() {
            return Err(EngineError::InvalidInput(
                "update_interval must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
