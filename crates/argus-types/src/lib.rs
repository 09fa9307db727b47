//! # argus-types
//!
//! Shared data model for the Argus anomaly scoring engine.
//!
//! These types form the boundary between the engine and its
//! collaborators: ingestion hands in [`DataPoint`] batches and
//! [`TimeSeries`], the engine hands back [`AnalysisResult`],
//! [`Anomaly`], and [`FusedResult`] values for persistence and
//! downstream alerting. All boundary types are serde-tagged.

#![deny(unsafe_code)]

pub mod anomaly;
pub mod point;
pub mod result;

pub use anomaly::{Anomaly, AnomalyId, Severity};
pub use point::{DataPoint, TimeSeries};
pub use result::{AnalysisResult, FusedResult, ModelKind};
