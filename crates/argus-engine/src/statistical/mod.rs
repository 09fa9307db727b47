//! Statistical text analysis: entropy, goodness-of-fit, and randomness
//! statistics against an English-language baseline, fused into a single
//! anomaly score.
//!
//! ## Architecture
//!
//! ```text
//!   text
//!    │
//!    ├──► character / word / line entropy
//!    ├──► chi-square goodness-of-fit vs LanguageBaseline
//!    ├──► runs test (vowel/consonant randomness)
//!    ├──► baseline entropy deviation
//!    └──► substring-novelty complexity estimate
//!          │
//!          ▼
//!    weighted fusion ──► AnalysisResult { score, confidence, metadata }
//! ```
//!
//! The working hypothesis: generated text is more predictable (lower
//! entropy, fewer novel substrings) and diverges from natural-language
//! letter statistics. Each sub-test captures one facet; the weighted
//! fusion avoids over-trusting any single noisy statistic.

pub mod analyzer;
pub mod baseline;
pub mod distribution;

pub use analyzer::{AnalyzerConfig, StatisticalAnalyzer};
pub use baseline::LanguageBaseline;
pub use distribution::{ChiSquareHeuristic, NormalTwoTailed, TailProbability, WilsonHilferty};

/// Raw entropy below this reads as suspiciously regular (bits).
pub const DEFAULT_LOW_ENTROPY_BITS: f64 = 3.0;

/// Raw entropy above this reads as noise-like (bits).
pub const DEFAULT_HIGH_ENTROPY_BITS: f64 = 7.0;

/// Significance threshold for the goodness-of-fit and runs tests.
pub const DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Text length at which the confidence's sample-size term saturates.
pub const DEFAULT_SAMPLE_SIZE_TARGET: usize = 1000;

/// Maximum substring length considered by the complexity estimate.
pub const COMPLEXITY_WINDOW: usize = 10;
