//! Engine output types: per-text analysis results and per-point fused
//! verdicts.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Analysis Result ─────────────────────────────────────────────────────

/// Output of the statistical text analyzer. Immutable, newly allocated
/// per call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Anomaly score in [0, 1]; higher means more irregular.
    pub score: f64,
    /// Confidence in the score, in [0, 1].
    pub confidence: f64,
    /// Diagnostic statistics keyed by name (entropies, p-values, ...).
    #[serde(default)]
    pub metadata: HashMap<String, f64>,
}

// ── Model Kind ──────────────────────────────────────────────────────────

/// Which scoring path produced a fused result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Only the statistical path ran.
    Statistical,
    /// Only the named predictive model ran.
    Predictive(String),
    /// Both paths produced a comparable score and were fused.
    Hybrid,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Statistical => write!(f, "statistical"),
            Self::Predictive(name) => write!(f, "{}", name),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

// ── Fused Result ────────────────────────────────────────────────────────

/// The orchestrator's per-data-point verdict. One per input point,
/// returned in input order, never mutated after creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FusedResult {
    /// Whether the fused score cleared the decision threshold.
    pub is_anomaly: bool,
    /// Fused anomaly score in [0, 1].
    pub score: f64,
    /// Confidence in the verdict, in [0, 1].
    pub confidence: f64,
    /// Timestamp of the scored point.
    pub timestamp: DateTime<Utc>,
    /// Feature values the statistical path scored.
    #[serde(default)]
    pub features: HashMap<String, f64>,
    /// Which path(s) produced this verdict.
    pub model_used: ModelKind,
    /// Wall-clock cost of scoring this batch entry.
    pub processing: Duration,
    /// Diagnostic set when the batch was below the scoring floor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
