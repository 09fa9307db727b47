//! Trainable sequence prediction: a small feed-forward network that
//! learns the "normal" numeric shape of a stream and flags forecast
//! deviations.
//!
//! ## Architecture
//!
//! ```text
//!   raw series ──► MinMaxScaler ──► sliding windows
//!                                        │
//!                                        ▼
//!                              FeedForwardNetwork
//!                         (window ► window/2 ► 1, sigmoid)
//!                                        │
//!                        |prediction − actual| > threshold
//!                                        │
//!                                        ▼
//!                            Anomaly (severity laddered)
//! ```
//!
//! The model is deliberately small: interpretable, cheaply retrainable
//! per stream, and free of external ML infrastructure. "Anomalous"
//! means the recent numeric signal no longer matches the model's
//! learned expectation, a classic residual/forecast-error test.

pub mod model;
pub mod network;
pub mod scaler;

pub use model::{PredictorConfig, PredictorOptions, SequencePredictor};
pub use network::FeedForwardNetwork;
pub use scaler::MinMaxScaler;

/// Minimum (and default) sliding-window width.
pub const MIN_WINDOW_SIZE: usize = 10;

/// Default number of training epochs.
pub const DEFAULT_EPOCHS: usize = 100;

/// Default gradient-descent learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Default anomaly cutoff on the scaled prediction error.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 0.5;

/// Default post-scoring sensitivity multiplier.
pub const DEFAULT_SENSITIVITY: f64 = 1.0;
