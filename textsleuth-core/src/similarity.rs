//! Two-text similarity measures for plagiarism and reuse detection.
//!
//! Four independent measures are combined into one report: distinct-word
//! overlap, sentence-level phrase matching, word-frequency cosine
//! similarity, and structural similarity of the document shape. Each
//! measure is deterministic and side-effect-free; the weighting into a
//! verdict happens downstream.

use crate::errors::AnalysisError;
use crate::snapshot::{normalize_word, TextSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Comparison inputs must be at least this long after trimming.
const MIN_COMPARISON_CHARS: usize = 10;

/// Sentences with fewer words are skipped by the phrase scan.
const MIN_PHRASE_WORDS: usize = 5;

/// Sentence pairs below this Jaccard similarity are not reported.
const PHRASE_MATCH_THRESHOLD: f64 = 0.7;

/// At most this many phrase matches are kept, best first.
const MAX_PHRASE_MATCHES: usize = 10;

/// Excerpts in phrase matches are truncated to this many characters.
const EXCERPT_MAX_CHARS: usize = 100;

/// Words must be longer than this to enter the cosine frequency vectors.
const MIN_COSINE_WORD_CHARS: usize = 2;

/// One pair of closely matching sentences across the two texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseMatch {
    /// Word-set Jaccard similarity of the pair, as a percentage.
    pub similarity_pct: f64,
    pub excerpt_a: String,
    pub excerpt_b: String,
}

/// Full comparison result between two texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Jaccard overlap of distinct normalized words, as a percentage.
    pub exact_word_overlap_pct: f64,
    /// Closest sentence pairs above the match threshold, best first.
    pub phrase_matches: Vec<PhraseMatch>,
    /// Mean best-match Jaccard per eligible sentence, both directions.
    /// `None` when either text has no sentence of at least five words.
    pub phrase_similarity: Option<f64>,
    /// Cosine similarity of the word-frequency vectors, in [0, 1].
    pub cosine_similarity: f64,
    /// Mean ratio similarity of sentence count, paragraph count, and
    /// average sentence length, in [0, 1].
    pub structural_similarity: f64,
}

/// Stateless comparison engine.
#[derive(Debug, Default)]
pub struct SimilarityEngine;

impl SimilarityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compares two texts. Either input shorter than ten characters after
    /// trimming is rejected before any statistics are computed.
    pub fn compare(
        &self,
        a: &TextSnapshot,
        b: &TextSnapshot,
    ) -> Result<SimilarityReport, AnalysisError> {
        validate_length(a, "first")?;
        validate_length(b, "second")?;

        let (phrase_matches, phrase_similarity) = phrase_analysis(a, b);

        Ok(SimilarityReport {
            exact_word_overlap_pct: round2(word_overlap(a, b) * 100.0),
            phrase_matches,
            phrase_similarity,
            cosine_similarity: cosine_similarity(a, b),
            structural_similarity: structural_similarity(a, b),
        })
    }
}

fn validate_length(snapshot: &TextSnapshot, which: &str) -> Result<(), AnalysisError> {
    if snapshot.text().trim().chars().count() < MIN_COMPARISON_CHARS {
        return Err(AnalysisError::InsufficientInput(format!(
            "{which} text must be at least {MIN_COMPARISON_CHARS} characters"
        )));
    }
    Ok(())
}

/// Jaccard overlap of the distinct normalized word sets.
fn word_overlap(a: &TextSnapshot, b: &TextSnapshot) -> f64 {
    let set_a: HashSet<&str> = a.normalized_words().iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.normalized_words().iter().map(String::as_str).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Sentence-level matching: reported pairs above the threshold plus the
/// mean best-match similarity per eligible sentence in both directions.
fn phrase_analysis(a: &TextSnapshot, b: &TextSnapshot) -> (Vec<PhraseMatch>, Option<f64>) {
    let eligible_a = eligible_sentences(a);
    let eligible_b = eligible_sentences(b);
    if eligible_a.is_empty() || eligible_b.is_empty() {
        return (Vec::new(), None);
    }

    let sets_a: Vec<HashSet<String>> = eligible_a.iter().map(|s| sentence_word_set(s)).collect();
    let sets_b: Vec<HashSet<String>> = eligible_b.iter().map(|s| sentence_word_set(s)).collect();

    let mut matches = Vec::new();
    let mut best_for_a = vec![0.0f64; sets_a.len()];
    let mut best_for_b = vec![0.0f64; sets_b.len()];

    for (i, set_a) in sets_a.iter().enumerate() {
        for (j, set_b) in sets_b.iter().enumerate() {
            let similarity = jaccard(set_a, set_b);
            best_for_a[i] = best_for_a[i].max(similarity);
            best_for_b[j] = best_for_b[j].max(similarity);

            if similarity > PHRASE_MATCH_THRESHOLD {
                matches.push(PhraseMatch {
                    similarity_pct: round2(similarity * 100.0),
                    excerpt_a: excerpt(eligible_a[i]),
                    excerpt_b: excerpt(eligible_b[j]),
                });
            }
        }
    }

    // Stable sort keeps pair discovery order on ties, so the listing is
    // reproducible across runs.
    matches.sort_by(|x, y| {
        y.similarity_pct
            .partial_cmp(&x.similarity_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(MAX_PHRASE_MATCHES);

    let mean: f64 = (best_for_a.iter().sum::<f64>() + best_for_b.iter().sum::<f64>())
        / (best_for_a.len() + best_for_b.len()) as f64;

    (matches, Some(mean))
}

fn eligible_sentences(snapshot: &TextSnapshot) -> Vec<&str> {
    snapshot
        .sentences()
        .iter()
        .map(String::as_str)
        .filter(|s| s.split_whitespace().count() >= MIN_PHRASE_WORDS)
        .collect()
}

fn sentence_word_set(sentence: &str) -> HashSet<String> {
    sentence
        .split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn excerpt(sentence: &str) -> String {
    if sentence.chars().count() <= EXCERPT_MAX_CHARS {
        return sentence.to_string();
    }
    let truncated: String = sentence.chars().take(EXCERPT_MAX_CHARS - 3).collect();
    format!("{truncated}...")
}

/// Cosine similarity over frequency vectors of words longer than two
/// characters. Zero when either vector is empty.
fn cosine_similarity(a: &TextSnapshot, b: &TextSnapshot) -> f64 {
    let freq_a = word_frequencies(a);
    let freq_b = word_frequencies(b);

    let dot: f64 = freq_a
        .iter()
        .filter_map(|(word, &count_a)| freq_b.get(word).map(|&count_b| count_a * count_b))
        .sum();

    let norm_a = freq_a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = freq_b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn word_frequencies(snapshot: &TextSnapshot) -> HashMap<&str, f64> {
    let mut frequencies: HashMap<&str, f64> = HashMap::new();
    for word in snapshot.normalized_words() {
        if word.chars().count() > MIN_COSINE_WORD_CHARS {
            *frequencies.entry(word.as_str()).or_insert(0.0) += 1.0;
        }
    }
    frequencies
}

/// Mean of the ratio similarities of sentence count, paragraph count, and
/// average sentence length.
fn structural_similarity(a: &TextSnapshot, b: &TextSnapshot) -> f64 {
    let avg_len = |s: &TextSnapshot| {
        if s.sentence_count() == 0 {
            0.0
        } else {
            s.word_count() as f64 / s.sentence_count() as f64
        }
    };

    let components = [
        ratio_similarity(a.sentence_count() as f64, b.sentence_count() as f64),
        ratio_similarity(a.paragraphs().len() as f64, b.paragraphs().len() as f64),
        ratio_similarity(avg_len(a), avg_len(b)),
    ];

    components.iter().sum::<f64>() / components.len() as f64
}

/// `1 − |x−y| / max(x, y, 1)`, so equal values score 1 and the floor on
/// the denominator keeps tiny counts well-behaved.
fn ratio_similarity(x: f64, y: f64) -> f64 {
    1.0 - (x - y).abs() / x.max(y).max(1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(a: &str, b: &str) -> SimilarityReport {
        SimilarityEngine::new()
            .compare(&TextSnapshot::new(a), &TextSnapshot::new(b))
            .expect("inputs long enough")
    }

    #[test]
    fn test_identical_texts_score_full_marks() {
        let text = "Solen lyser starkt idag. Alla barn leker glatt ute i parken hela dagen.";
        let report = compare(text, text);

        assert_eq!(report.exact_word_overlap_pct, 100.0);
        assert_eq!(report.phrase_similarity, Some(1.0));
        assert!((report.cosine_similarity - 1.0).abs() < 1e-9);
        assert!((report.structural_similarity - 1.0).abs() < 1e-9);
        assert!(!report.phrase_matches.is_empty());
    }

    #[test]
    fn test_disjoint_texts_score_near_zero() {
        let report = compare(
            "Katten sover lugnt under granen.",
            "Flygplanet landade mjukt trots dimman.",
        );
        assert_eq!(report.exact_word_overlap_pct, 0.0);
        assert_eq!(report.cosine_similarity, 0.0);
        assert!(report.phrase_matches.is_empty());
    }

    #[test]
    fn test_phrase_match_above_threshold() {
        let report = compare(
            "Den gamla båten gled sakta över sjön mot den lilla ön.",
            "Den gamla båten gled sakta över sjön mot en annan ö.",
        );

        assert_eq!(report.phrase_matches.len(), 1);
        assert!(report.phrase_matches[0].similarity_pct > 70.0);
    }

    #[test]
    fn test_phrase_similarity_none_without_long_sentences() {
        let report = compare("Korta ord. Bara två här.", "Även här. Korta satser bara.");
        assert_eq!(report.phrase_similarity, None);
        assert!(report.phrase_matches.is_empty());
    }

    #[test]
    fn test_excerpts_are_truncated() {
        let long_sentence = format!("inledning {} avslutning.", "mellanord ".repeat(30));
        let report = compare(&long_sentence, &long_sentence);

        let excerpt = &report.phrase_matches[0].excerpt_a;
        assert!(excerpt.chars().count() <= EXCERPT_MAX_CHARS);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_short_input_rejected() {
        let engine = SimilarityEngine::new();
        let ok = TextSnapshot::new("tillräckligt lång text att jämföra");
        let short = TextSnapshot::new("   kort   ");

        let err = engine.compare(&ok, &short).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientInput(_)));
        let err = engine.compare(&short, &ok).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientInput(_)));
    }

    #[test]
    fn test_cosine_ignores_short_words() {
        // Every word has at most two characters, so both vectors are empty.
        let report = compare("en av de så nu då", "en av de så nu då");
        assert_eq!(report.cosine_similarity, 0.0);
    }

    #[test]
    fn test_structural_similarity_partial() {
        let report = compare(
            "En mening här. En till där. Och en tredje.",
            "Bara en enda lång mening utan paus i hela stycket.",
        );
        assert!(report.structural_similarity > 0.0);
        assert!(report.structural_similarity < 1.0);
    }

    #[test]
    fn test_compare_is_deterministic() {
        let a = "Det regnade hela natten och vägen blev blank. Morgonen kom med sol.";
        let b = "Det regnade hela kvällen och gatan blev våt. Kvällen kom med måne.";
        assert_eq!(compare(a, b), compare(a, b));
    }
}
