//! Statistical writing features computed from a single text.
//!
//! These features are the shared raw material of the other analyses: the
//! authorship comparison weighs them against each other, and the anomaly
//! scan measures letter-frequency deviation against the lexicon reference.

use crate::lexicon::Lexicon;
use crate::snapshot::TextSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Words with at most this many letters count toward the short-word feature.
const SHORT_WORD_MAX_LEN: usize = 3;
/// Words with at least this many letters count toward the long-word feature.
const LONG_WORD_MIN_LEN: usize = 7;
/// A sentence with at least this many commas counts as complex.
const COMPLEX_SENTENCE_COMMAS: usize = 2;

/// Fixed-shape record of numeric writing features.
///
/// All fields are non-negative. Where a denominator is zero (no words, no
/// sentences) the corresponding ratio is 0 rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WritingMetrics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_words_per_sentence: f64,
    /// Mean count of alphabetic characters per word token.
    pub avg_word_length: f64,
    /// Distinct normalized words / total words.
    pub vocabulary_richness: f64,
    /// ASCII punctuation characters / total characters.
    pub punctuation_density: f64,
    /// Fraction of sentences containing at least two commas.
    pub sentence_complexity: f64,
    /// Words with at most 3 letters.
    pub short_word_count: usize,
    /// Words with at least 7 letters.
    pub long_word_count: usize,
}

/// Computes the full feature record for one text.
pub fn writing_metrics(snapshot: &TextSnapshot) -> WritingMetrics {
    let words = snapshot.words();
    let sentences = snapshot.sentences();

    let word_count = words.len();
    let sentence_count = sentences.len();

    let letter_lengths: Vec<usize> = words
        .iter()
        .map(|w| w.chars().filter(|c| c.is_alphabetic()).count())
        .collect();
    let total_letters: usize = letter_lengths.iter().sum();

    let distinct: HashSet<&str> = snapshot
        .normalized_words()
        .iter()
        .map(String::as_str)
        .collect();

    let total_chars = snapshot.text().chars().count();
    let punctuation = snapshot
        .text()
        .chars()
        .filter(|c| c.is_ascii_punctuation())
        .count();

    let complex_sentences = sentences
        .iter()
        .filter(|s| s.chars().filter(|&c| c == ',').count() >= COMPLEX_SENTENCE_COMMAS)
        .count();

    WritingMetrics {
        word_count,
        sentence_count,
        paragraph_count: snapshot.paragraphs().len(),
        avg_words_per_sentence: ratio(word_count, sentence_count),
        avg_word_length: ratio(total_letters, word_count),
        vocabulary_richness: ratio(distinct.len(), word_count),
        punctuation_density: ratio(punctuation, total_chars),
        sentence_complexity: ratio(complex_sentences, sentence_count),
        short_word_count: letter_lengths
            .iter()
            .filter(|&&len| len > 0 && len <= SHORT_WORD_MAX_LEN)
            .count(),
        long_word_count: letter_lengths
            .iter()
            .filter(|&&len| len >= LONG_WORD_MIN_LEN)
            .count(),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// Relative character frequencies over the supported alphabet.
///
/// Case-folded; normalized over the alphabetic subset only, so values sum
/// to 1 for any input containing at least one supported letter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharFrequencyTable {
    frequencies: HashMap<char, f64>,
}

impl CharFrequencyTable {
    pub fn frequency(&self, c: char) -> f64 {
        self.frequencies.get(&c).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Mean absolute difference against a reference table, taken over the
    /// letters observed in the text. Stays near zero for ordinary prose in
    /// the reference language; a distribution dominated by one or two
    /// letters approaches 1.
    pub fn mean_abs_deviation(&self, reference: &[(char, f64)]) -> f64 {
        if self.frequencies.is_empty() {
            return 0.0;
        }

        let total: f64 = self
            .frequencies
            .iter()
            .map(|(&letter, &observed)| {
                let expected = reference
                    .iter()
                    .find(|&&(c, _)| c == letter)
                    .map(|&(_, f)| f)
                    .unwrap_or(0.0);
                (observed - expected).abs()
            })
            .sum();

        total / self.frequencies.len() as f64
    }
}

/// Builds the character-frequency table for one text.
pub fn char_frequency(snapshot: &TextSnapshot, lexicon: &Lexicon) -> CharFrequencyTable {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;

    for c in snapshot.text().chars() {
        if !lexicon.is_supported_letter(c) {
            continue;
        }
        let folded = c.to_lowercase().next().unwrap_or(c);
        *counts.entry(folded).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return CharFrequencyTable::default();
    }

    CharFrequencyTable {
        frequencies: counts
            .into_iter()
            .map(|(c, n)| (c, n as f64 / total as f64))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::DEFAULT_LEXICON;

    #[test]
    fn test_writing_metrics_basic() {
        let snapshot = TextSnapshot::new("Katten sover djupt. Hunden, trött och blöt, skäller.");
        let m = writing_metrics(&snapshot);

        assert_eq!(m.word_count, 8);
        assert_eq!(m.sentence_count, 2);
        assert_eq!(m.paragraph_count, 1);
        assert!((m.avg_words_per_sentence - 4.0).abs() < 1e-9);
        assert!((m.vocabulary_richness - 1.0).abs() < 1e-9);
        // Only the second sentence carries two commas.
        assert!((m.sentence_complexity - 0.5).abs() < 1e-9);
        assert!(m.punctuation_density > 0.0);
    }

    #[test]
    fn test_writing_metrics_word_length_features() {
        let snapshot = TextSnapshot::new("En liten katt jagade sommarfjärilar");
        let m = writing_metrics(&snapshot);

        assert_eq!(m.short_word_count, 1); // "En"
        assert_eq!(m.long_word_count, 1); // "sommarfjärilar"
        assert!(m.avg_word_length > 4.0);
    }

    #[test]
    fn test_writing_metrics_empty_input() {
        let m = writing_metrics(&TextSnapshot::new(""));
        assert_eq!(m, WritingMetrics::default());
    }

    #[test]
    fn test_char_frequency_normalizes_over_letters_only() {
        let snapshot = TextSnapshot::new("aa bb!! 123");
        let table = char_frequency(&snapshot, &DEFAULT_LEXICON);

        assert!((table.frequency('a') - 0.5).abs() < 1e-9);
        assert!((table.frequency('b') - 0.5).abs() < 1e-9);
        assert_eq!(table.frequency('1'), 0.0);
    }

    #[test]
    fn test_char_frequency_case_folds_extended_vowels() {
        let snapshot = TextSnapshot::new("Åå");
        let table = char_frequency(&snapshot, &DEFAULT_LEXICON);
        assert!((table.frequency('å') - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_char_frequency_sums_to_one() {
        let snapshot = TextSnapshot::new("Flera ord med både vanliga och ovanliga bokstäver.");
        let table = char_frequency(&snapshot, &DEFAULT_LEXICON);
        let total: f64 = ('a'..='z')
            .chain(['å', 'ä', 'ö'])
            .map(|c| table.frequency(c))
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_deviation_zero_against_self() {
        let snapshot = TextSnapshot::new("abcdef");
        let table = char_frequency(&snapshot, &DEFAULT_LEXICON);
        let reference: Vec<(char, f64)> =
            "abcdef".chars().map(|c| (c, table.frequency(c))).collect();
        assert!(table.mean_abs_deviation(&reference) < 1e-9);
    }

    #[test]
    fn test_deviation_small_for_ordinary_prose() {
        let snapshot =
            TextSnapshot::new("Det var en helt vanlig dag och alla barn lekte ute i solen.");
        let table = char_frequency(&snapshot, &DEFAULT_LEXICON);
        let deviation = table.mean_abs_deviation(DEFAULT_LEXICON.letter_frequencies());
        assert!(deviation < 0.1, "normal prose should sit close, got {deviation}");
    }

    #[test]
    fn test_deviation_large_for_degenerate_text() {
        let snapshot = TextSnapshot::new("zzzzzzzzzz");
        let table = char_frequency(&snapshot, &DEFAULT_LEXICON);
        let deviation = table.mean_abs_deviation(DEFAULT_LEXICON.letter_frequencies());
        assert!(deviation > 0.3, "single-letter text should deviate, got {deviation}");
    }
}
