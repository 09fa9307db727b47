//! Ingestion-facing data types: individual data points and named series.
//!
//! These are produced by the ingestion collaborator and consumed read-only
//! by the scoring engine. The `value` field arrives as loose JSON; the
//! engine only accepts numeric kinds and rejects everything else.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Data Point ──────────────────────────────────────────────────────────

/// A single observation handed to the engine by the ingestion layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataPoint {
    /// Caller-assigned identifier (opaque to the engine).
    pub id: String,
    /// When the observation was made.
    pub timestamp: DateTime<Utc>,
    /// Primary scalar value. Arrives as loose JSON; only integer and
    /// floating-point kinds are accepted by the engine.
    pub value: serde_json::Value,
    /// Named feature values used by the statistical scoring path.
    #[serde(default)]
    pub features: HashMap<String, f64>,
    /// Free-form labels (source, tenant, ...).
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Opaque metadata passed through to results.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl DataPoint {
    /// Create a point with a numeric value and no features.
    pub fn new(id: impl Into<String>, timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            id: id.into(),
            timestamp,
            value: serde_json::json!(value),
            features: HashMap::new(),
            labels: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    /// The scalar value, if it is a recognized numeric kind.
    ///
    /// Returns `None` for strings, booleans, null, arrays, and objects;
    /// the engine surfaces those as `UnsupportedValueType`.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.as_f64()
    }

    /// Human-readable name of the value's JSON kind, for error messages.
    pub fn value_kind(&self) -> &'static str {
        match &self.value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "bool",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}

// ── Time Series ─────────────────────────────────────────────────────────

/// An ordered, named sequence of points sharing a logical source.
///
/// Constructed by the caller per analysis request. The engine never
/// retains the raw series beyond a call; training retains only derived
/// state (scaler min/max and model weights).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Logical source name (also used as the anomaly `source`).
    pub name: String,
    /// Points in chronological order.
    pub points: Vec<DataPoint>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_value_accepts_integers_and_floats() {
        let mut p = DataPoint::new("p1", Utc::now(), 1.5);
        assert_eq!(p.numeric_value(), Some(1.5));

        p.value = serde_json::json!(42);
        assert_eq!(p.numeric_value(), Some(42.0));

        p.value = serde_json::json!(-7);
        assert_eq!(p.numeric_value(), Some(-7.0));
    }

    #[test]
    fn numeric_value_rejects_non_numeric_kinds() {
        let mut p = DataPoint::new("p1", Utc::now(), 0.0);

        p.value = serde_json::json!("12.5");
        assert_eq!(p.numeric_value(), None);
        assert_eq!(p.value_kind(), "string");

        p.value = serde_json::json!(true);
        assert_eq!(p.numeric_value(), None);
        assert_eq!(p.value_kind(), "bool");

        p.value = serde_json::Value::Null;
        assert_eq!(p.numeric_value(), None);
        assert_eq!(p.value_kind(), "null");

        p.value = serde_json::json!([1, 2]);
        assert_eq!(p.value_kind(), "array");
    }

    #[test]
    fn series_push_and_len() {
        let mut series = TimeSeries::new("stream-a");
        assert!(series.is_empty());

        for i in 0..5 {
            series.push(DataPoint::new(format!("p{}", i), Utc::now(), i as f64));
        }
        assert_eq!(series.len(), 5);
        assert_eq!(series.name, "stream-a");
    }

    #[test]
    fn data_point_serialization_round_trip() {
        let mut p = DataPoint::new("p1", Utc::now(), 3.25);
        p.features.insert("cpu".into(), 0.5);
        p.labels.insert("host".into(), "node-1".into());

        let json = serde_json::to_string(&p).unwrap();
        let restored: DataPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, "p1");
        assert_eq!(restored.numeric_value(), Some(3.25));
        assert_eq!(restored.features.get("cpu"), Some(&0.5));
    }

    #[test]
    fn data_point_deserializes_with_missing_maps() {
        let json = r#"{"id":"x","timestamp":"2026-01-01T00:00:00Z","value":9}"#;
        let p: DataPoint = serde_json::from_str(json).unwrap();
        assert!(p.features.is_empty());
        assert!(p.labels.is_empty());
        assert_eq!(p.numeric_value(), Some(9.0));
    }
}
