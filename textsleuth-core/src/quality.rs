//! Plausibility scoring for candidate decodings.
//!
//! A decoded string that is real prose in the reference language scores
//! high; byte noise scores near zero. The score drives the ranking of
//! brute-force cipher candidates.

use crate::lexicon::Lexicon;
use crate::snapshot::normalize_word;
use std::ops::RangeInclusive;

/// Weight of the function-word fraction.
const WEIGHT_FUNCTION_WORDS: f64 = 0.6;
/// Weight of the alphabetic-character fraction.
const WEIGHT_ALPHABETIC: f64 = 0.3;
/// Weight of the plausible-word-length fraction.
const WEIGHT_WORD_LENGTH: f64 = 0.1;
/// Inclusive bounds on a plausible word length.
const PLAUSIBLE_WORD_LEN: RangeInclusive<usize> = 2..=15;

/// Scores how much a string looks like genuine prose in the reference
/// language.
pub struct QualityScorer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> QualityScorer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Returns a plausibility score in [0, 1]. Empty input scores 0.
    ///
    /// Deterministic: identical input always yields an identical score.
    pub fn score(&self, candidate: &str) -> f64 {
        if candidate.trim().is_empty() {
            return 0.0;
        }

        let total_chars = candidate.chars().count();
        let alphabetic = candidate
            .chars()
            .filter(|&c| self.lexicon.is_supported_letter(c))
            .count();
        let alphabetic_fraction = alphabetic as f64 / total_chars as f64;

        let words: Vec<String> = candidate
            .split_whitespace()
            .map(normalize_word)
            .filter(|w| !w.is_empty())
            .collect();

        let (function_fraction, length_fraction) = if words.is_empty() {
            (0.0, 0.0)
        } else {
            let matched = words
                .iter()
                .filter(|w| self.lexicon.is_function_word(w))
                .count();
            let plausible = words
                .iter()
                .filter(|w| PLAUSIBLE_WORD_LEN.contains(&w.chars().count()))
                .count();
            (
                matched as f64 / words.len() as f64,
                plausible as f64 / words.len() as f64,
            )
        };

        (WEIGHT_FUNCTION_WORDS * function_fraction
            + WEIGHT_ALPHABETIC * alphabetic_fraction
            + WEIGHT_WORD_LENGTH * length_fraction)
            .clamp(0.0, 1.0)
    }
}
