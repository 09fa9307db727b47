use thiserror::Error;

/// Errors from the scoring engine.
///
/// Numeric edge cases (zero variance, degenerate scaler range,
/// all-identical values) are handled locally with neutral fallbacks and
/// never surface here; only structurally invalid calls propagate.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("unsupported value type: {0} (expected integer or float)")]
    UnsupportedValueType(String),

    #[error("engine is not running")]
    NotRunning,

    #[error("engine is already running")]
    AlreadyRunning,

    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("training failed: {0}")]
    TrainingFailed(String),
}

/// Convenience type alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
