//! Metrics snapshots for the metrics collaborator.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Periodic snapshot of engine state. Per-model metrics are passed
/// through opaquely from each predictor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineMetrics {
    /// Whether the orchestrator is started.
    pub running: bool,
    /// Number of registered predictive models.
    pub model_count: usize,
    /// Decision threshold in effect.
    pub threshold: f64,
    /// Predictor input width in effect.
    pub window_size: usize,
    /// Whether the predictive path is enabled.
    pub ml_enabled: bool,
    /// When this snapshot was taken.
    pub captured_at: DateTime<Utc>,
    /// Opaque per-model metrics, keyed by model name.
    #[serde(default)]
    pub models: HashMap<String, HashMap<String, serde_json::Value>>,
}
