//! # argus-engine
//!
//! Anomaly scoring engine for generated-text streams: statistical text
//! analysis, a small trainable sequence predictor, and a fusion layer
//! that merges both verdicts under a single threshold policy.
//!
//! ## Architecture
//!
//! ```text
//!   text ──────────────► StatisticalAnalyzer ─► AnalysisResult
//!                              ▲
//!                              │ shared LanguageBaseline (read-only)
//!                              │
//!   DataPoint batch ──► ScoringOrchestrator
//!                         │         │
//!                         │         ├──► feature-band statistical score
//!                         │         └──► SequencePredictor (per model)
//!                         │                 │ window forecast errors
//!                         ▼                 ▼
//!                      fusion (average score + confidence, "hybrid")
//!                         │
//!                         ▼
//!                     FusedResult[] ─► persistence / alerting collaborators
//! ```
//!
//! The engine has no network or file surface of its own; it is a
//! library-level computation boundary. Ingestion hands in text or
//! data-point batches, configuration supplies [`EngineConfig`], and the
//! metrics collaborator reads [`EngineMetrics`] snapshots.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use argus_engine::{EngineConfig, ScoringOrchestrator};
//! use argus_types::DataPoint;
//! use chrono::Utc;
//!
//! # async fn run() -> Result<(), argus_engine::EngineError> {
//! let engine = ScoringOrchestrator::new(EngineConfig::default())?;
//! engine.start().await?;
//!
//! let analysis = engine.analyze_text("some sampled output text");
//! println!("text score = {:.2}", analysis.score);
//!
//! let batch: Vec<DataPoint> = (0..20)
//!     .map(|i| DataPoint::new(format!("p{}", i), Utc::now(), i as f64))
//!     .collect();
//! for result in engine.detect(&batch)? {
//!     println!("{} score = {:.2}", result.model_used, result.score);
//! }
//!
//! engine.stop()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod predictor;
pub mod statistical;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use cancel::CancelToken;
pub use config::{EngineConfig, EngineOptions};
pub use error::{EngineError, EngineResult};
pub use metrics::EngineMetrics;
pub use orchestrator::ScoringOrchestrator;
pub use predictor::{
    FeedForwardNetwork, MinMaxScaler, PredictorConfig, PredictorOptions, SequencePredictor,
};
pub use statistical::{
    AnalyzerConfig, ChiSquareHeuristic, LanguageBaseline, NormalTwoTailed, StatisticalAnalyzer,
    TailProbability, WilsonHilferty,
};
