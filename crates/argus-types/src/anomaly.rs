//! Anomaly records emitted by the predictive scoring path.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Identifier ──────────────────────────────────────────────────────────

/// Unique identifier for a detected anomaly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnomalyId(pub String);

impl AnomalyId {
    /// Generate a new unique anomaly ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for AnomalyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnomalyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "anomaly:{}", self.0)
    }
}

// ── Severity ────────────────────────────────────────────────────────────

/// Ordinal severity of a detected anomaly.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Barely over the decision threshold.
    Low,
    /// Clearly over the threshold.
    Medium,
    /// Large forecast deviation.
    High,
    /// Extreme forecast deviation.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

// ── Anomaly ─────────────────────────────────────────────────────────────

/// A flagged forecast deviation, one per window whose prediction error
/// exceeded the configured threshold.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Anomaly {
    /// Unique identifier.
    pub id: AnomalyId,
    /// Severity derived from how far the error exceeds the threshold.
    pub severity: Severity,
    /// Prediction error in scaled units, clamped to [0, 1].
    pub score: f64,
    /// Timestamp of the point that deviated.
    pub timestamp: DateTime<Utc>,
    /// Actual value observed, in raw units.
    pub observed_value: f64,
    /// Value the model predicted, in raw units.
    pub expected_value: f64,
    /// Logical source (the series name).
    pub source: String,
    /// Human-readable description.
    pub message: String,
    /// Opaque metadata passed through to collaborators.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}
