//! The statistical text analyzer.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use argus_types::AnalysisResult;

use super::baseline::LanguageBaseline;
use super::distribution::{ChiSquareHeuristic, NormalTwoTailed, TailProbability};
use super::{
    COMPLEXITY_WINDOW, DEFAULT_HIGH_ENTROPY_BITS, DEFAULT_LOW_ENTROPY_BITS,
    DEFAULT_SAMPLE_SIZE_TARGET, DEFAULT_SIGNIFICANCE,
};

// Fusion weights. Must sum to 1.
const W_ENTROPY: f64 = 0.25;
const W_CHI_SQUARE: f64 = 0.20;
const W_RUNS: f64 = 0.20;
const W_BASELINE: f64 = 0.20;
const W_COMPLEXITY: f64 = 0.15;

// Confidence blend weights.
const W_ADEQUACY: f64 = 0.6;
const W_CONCLUSIVE: f64 = 0.2;
const W_PLAUSIBLE: f64 = 0.2;

/// Tuning knobs for the analyzer.
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    /// Raw entropy below this reads as suspiciously regular (bits).
    pub low_entropy_bits: f64,
    /// Raw entropy above this reads as noise-like (bits).
    pub high_entropy_bits: f64,
    /// Significance threshold for the p-value sub-scores.
    pub significance: f64,
    /// Text length at which the confidence's sample-size term saturates.
    pub sample_size_target: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            low_entropy_bits: DEFAULT_LOW_ENTROPY_BITS,
            high_entropy_bits: DEFAULT_HIGH_ENTROPY_BITS,
            significance: DEFAULT_SIGNIFICANCE,
            sample_size_target: DEFAULT_SAMPLE_SIZE_TARGET,
        }
    }
}

/// Computes entropy, goodness-of-fit, and randomness statistics for a
/// text sample and reduces them to one score.
///
/// Analysis is a pure function of the input text and the fixed baseline
/// table; the analyzer holds no per-call state and may be shared across
/// threads.
pub struct StatisticalAnalyzer {
    baseline: Arc<LanguageBaseline>,
    chi_square_tail: Box<dyn TailProbability>,
    runs_tail: Box<dyn TailProbability>,
    config: AnalyzerConfig,
}

impl StatisticalAnalyzer {
    /// Create an analyzer with the standard English baseline.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::with_baseline(Arc::new(LanguageBaseline::english()), config)
    }

    /// Create an analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AnalyzerConfig::default())
    }

    /// Create an analyzer sharing an existing baseline table.
    pub fn with_baseline(baseline: Arc<LanguageBaseline>, config: AnalyzerConfig) -> Self {
        let df = baseline.alphabet_size() as f64;
        Self {
            baseline,
            chi_square_tail: Box::new(ChiSquareHeuristic::new(df)),
            runs_tail: Box::new(NormalTwoTailed),
            config,
        }
    }

    /// Swap in different tail-probability models (e.g. exact CDFs).
    pub fn with_tail_models(
        mut self,
        chi_square: Box<dyn TailProbability>,
        runs: Box<dyn TailProbability>,
    ) -> Self {
        self.chi_square_tail = chi_square;
        self.runs_tail = runs;
        self
    }

    /// Analyze a text sample.
    ///
    /// Empty input returns a neutral result (score 0, confidence 0, no
    /// metadata) without error. Degenerate inputs (all-identical
    /// characters, single-line text, too few letters for the runs test)
    /// fall back to neutral statistics rather than failing.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        if text.is_empty() {
            return AnalysisResult::default();
        }

        let char_entropy = character_entropy(text);
        let word_entropy = word_entropy(text);
        let line_entropy = line_entropy(text);

        let chi_square = self.chi_square_statistic(text);
        let chi_square_p = if chi_square > 0.0 {
            self.chi_square_tail.p_value(chi_square)
        } else {
            1.0
        };

        let (runs_z, runs_p) = match runs_statistic(text) {
            Some(z) => (z, self.runs_tail.p_value(z)),
            None => (0.0, 1.0),
        };

        let baseline_entropy = self.baseline.entropy();
        let baseline_deviation = (char_entropy - baseline_entropy).abs() / baseline_entropy;

        let complexity = complexity_estimate(text);

        let score = self.fuse(
            char_entropy,
            chi_square_p,
            runs_p,
            baseline_deviation,
            complexity,
        );
        let confidence = self.confidence(text, char_entropy, chi_square_p, runs_p);

        debug!(
            score,
            confidence, char_entropy, chi_square_p, runs_p, "text analysis complete"
        );

        let mut metadata = HashMap::new();
        metadata.insert("char_entropy".into(), char_entropy);
        metadata.insert("word_entropy".into(), word_entropy);
        metadata.insert("line_entropy".into(), line_entropy);
        metadata.insert("chi_square".into(), chi_square);
        metadata.insert("chi_square_p".into(), chi_square_p);
        metadata.insert("runs_z".into(), runs_z);
        metadata.insert("runs_p".into(), runs_p);
        metadata.insert("baseline_deviation".into(), baseline_deviation);
        metadata.insert("complexity".into(), complexity);
        metadata.insert("text_len".into(), text.chars().count() as f64);

        AnalysisResult {
            score,
            confidence,
            metadata,
        }
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Pearson goodness-of-fit statistic of the text's letter+space
    /// counts against the baseline distribution. 0 when the text has no
    /// baseline symbols.
    fn chi_square_statistic(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let mut counts: HashMap<char, usize> = HashMap::new();
        let mut total = 0usize;
        for c in lower.chars() {
            if self.baseline.frequency(c).is_some() {
                *counts.entry(c).or_insert(0) += 1;
                total += 1;
            }
        }
        if total == 0 {
            return 0.0;
        }

        let total = total as f64;
        self.baseline
            .frequencies()
            .iter()
            .map(|(symbol, freq)| {
                let expected = freq * total;
                let observed = counts.get(symbol).copied().unwrap_or(0) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum()
    }

    /// Deterministic weighted fusion of the sub-test scores.
    fn fuse(
        &self,
        char_entropy: f64,
        chi_square_p: f64,
        runs_p: f64,
        baseline_deviation: f64,
        complexity: f64,
    ) -> f64 {
        let entropy_sub = if char_entropy < self.config.low_entropy_bits {
            0.8
        } else if char_entropy > self.config.high_entropy_bits {
            0.3
        } else {
            0.5
        };
        let chi_sub = if chi_square_p < self.config.significance {
            0.7
        } else {
            0.3
        };
        let runs_sub = if runs_p < self.config.significance {
            0.8
        } else {
            0.2
        };
        let baseline_sub = baseline_deviation.min(1.0);
        let complexity_sub = (1.0 - complexity / 2.0).max(0.0);

        let score = W_ENTROPY * entropy_sub
            + W_CHI_SQUARE * chi_sub
            + W_RUNS * runs_sub
            + W_BASELINE * baseline_sub
            + W_COMPLEXITY * complexity_sub;
        score.clamp(0.0, 1.0)
    }

    /// Confidence blend: sample-size adequacy, statistical
    /// conclusiveness, and entropy plausibility.
    fn confidence(&self, text: &str, char_entropy: f64, chi_square_p: f64, runs_p: f64) -> f64 {
        let len = text.chars().count() as f64;
        let adequacy = (len / self.config.sample_size_target as f64).min(1.0);

        let conclusive = [chi_square_p, runs_p]
            .iter()
            .any(|p| *p < 0.01 || *p > 0.99);
        let conclusive = if conclusive { 1.0 } else { 0.0 };

        let plausible = if (1.0..=8.0).contains(&char_entropy) {
            1.0
        } else {
            0.0
        };

        (W_ADEQUACY * adequacy + W_CONCLUSIVE * conclusive + W_PLAUSIBLE * plausible)
            .clamp(0.0, 1.0)
    }
}

impl Default for StatisticalAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ── Statistics ──────────────────────────────────────────────────────────

/// Shannon entropy (base 2) from a count distribution.
fn shannon_entropy<I: IntoIterator<Item = usize>>(counts: I, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counts
        .into_iter()
        .filter(|c| *c > 0)
        .map(|c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Entropy over lowercase letters, digits, and whitespace.
fn character_entropy(text: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c.is_whitespace() {
            *counts.entry(c).or_insert(0) += 1;
            total += 1;
        }
    }
    shannon_entropy(counts.into_values(), total)
}

/// Entropy over normalized (lowercased, punctuation-stripped) tokens.
fn word_entropy(text: &str) -> f64 {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;
    for token in text.to_lowercase().split_whitespace() {
        let word: String = token.chars().filter(|c| c.is_alphanumeric()).collect();
        if !word.is_empty() {
            *counts.entry(word).or_insert(0) += 1;
            total += 1;
        }
    }
    shannon_entropy(counts.into_values(), total)
}

/// Entropy over the distribution of trimmed line lengths. 0 for
/// single-line text.
fn line_entropy(text: &str) -> f64 {
    let lengths: Vec<usize> = text.lines().map(|l| l.trim().chars().count()).collect();
    if lengths.len() <= 1 {
        return 0.0;
    }
    let total = lengths.len();
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for len in lengths {
        *counts.entry(len).or_insert(0) += 1;
    }
    shannon_entropy(counts.into_values(), total)
}

/// Wald-Wolfowitz runs z-statistic over the vowel/consonant sequence.
///
/// Returns `None` (neutral) when the text has fewer than 10 letters or
/// only one symbol class, where the null variance degenerates.
fn runs_statistic(text: &str) -> Option<f64> {
    let classes: Vec<bool> = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .collect();
    if classes.len() < 10 {
        return None;
    }

    let n1 = classes.iter().filter(|v| **v).count() as f64;
    let n2 = classes.len() as f64 - n1;
    if n1 == 0.0 || n2 == 0.0 {
        return None;
    }

    let runs = 1 + classes.windows(2).filter(|w| w[0] != w[1]).count();
    let n = n1 + n2;
    let expected = 2.0 * n1 * n2 / n + 1.0;
    let variance = 2.0 * n1 * n2 * (2.0 * n1 * n2 - n) / (n * n * (n - 1.0));
    if variance <= 0.0 {
        return None;
    }

    Some((runs as f64 - expected) / variance.sqrt())
}

/// Compression-proxy complexity: total length of first-occurrence
/// substrings (up to `COMPLEXITY_WINDOW` chars) per input character.
/// Higher means more novel structure, i.e. less predictable text.
fn complexity_estimate(text: &str) -> f64 {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return 0.0;
    }

    let mut seen: HashSet<&[char]> = HashSet::new();
    let mut novel_length = 0usize;
    for i in 0..chars.len() {
        let max_w = COMPLEXITY_WINDOW.min(chars.len() - i);
        for w in 1..=max_w {
            if seen.insert(&chars[i..i + w]) {
                novel_length += w;
            }
        }
    }

    novel_length as f64 / chars.len() as f64
}
