//! English-language baseline frequencies.
//!
//! The table is computed once at construction and never mutated
//! afterwards; analyzers share it read-only behind an `Arc`.

use std::collections::HashMap;

/// Relative letter frequencies in natural English text, as fractions of
/// all letters (standard corpus table).
const LETTER_FREQUENCIES: [(char, f64); 26] = [
    ('a', 0.08167),
    ('b', 0.01492),
    ('c', 0.02782),
    ('d', 0.04253),
    ('e', 0.12702),
    ('f', 0.02228),
    ('g', 0.02015),
    ('h', 0.06094),
    ('i', 0.06966),
    ('j', 0.00153),
    ('k', 0.00772),
    ('l', 0.04025),
    ('m', 0.02406),
    ('n', 0.06749),
    ('o', 0.07507),
    ('p', 0.01929),
    ('q', 0.00095),
    ('r', 0.05987),
    ('s', 0.06327),
    ('t', 0.09056),
    ('u', 0.02758),
    ('v', 0.00978),
    ('w', 0.02360),
    ('x', 0.00150),
    ('y', 0.01974),
    ('z', 0.00074),
];

/// Fraction of characters that are spaces in running English text.
const SPACE_FREQUENCY: f64 = 0.18;

/// Immutable English letter+space frequency table plus the Shannon
/// entropy of that distribution.
#[derive(Debug)]
pub struct LanguageBaseline {
    frequencies: HashMap<char, f64>,
    entropy: f64,
}

impl LanguageBaseline {
    /// Build the standard English baseline. Letter fractions are scaled
    /// so letters plus space sum to 1.
    pub fn english() -> Self {
        let mut frequencies = HashMap::with_capacity(LETTER_FREQUENCIES.len() + 1);
        let letter_mass = 1.0 - SPACE_FREQUENCY;
        for (c, f) in LETTER_FREQUENCIES {
            frequencies.insert(c, f * letter_mass);
        }
        frequencies.insert(' ', SPACE_FREQUENCY);

        let entropy = frequencies
            .values()
            .filter(|p| **p > 0.0)
            .map(|p| -p * p.log2())
            .sum();

        Self {
            frequencies,
            entropy,
        }
    }

    /// Expected relative frequency of a symbol, if it is in the alphabet.
    pub fn frequency(&self, symbol: char) -> Option<f64> {
        self.frequencies.get(&symbol).copied()
    }

    /// The full expected distribution.
    pub fn frequencies(&self) -> &HashMap<char, f64> {
        &self.frequencies
    }

    /// Shannon entropy (base 2) of the expected distribution.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Number of symbols in the alphabet (26 letters plus space).
    pub fn alphabet_size(&self) -> usize {
        self.frequencies.len()
    }
}

impl Default for LanguageBaseline {
    fn default() -> Self {
        Self::english()
    }
}
