//! Writing-style comparison for shared-authorship assessment.
//!
//! Two texts are reduced to their writing metrics and compared feature by
//! feature with min/max ratios, then blended into one similarity
//! percentage. The verdict ladder and the sample-size confidence curve
//! give the caller an honest read on how much the number means: style
//! features from a few dozen words are weak evidence either way.

use crate::errors::AnalysisError;
use crate::metrics::{writing_metrics, WritingMetrics};
use crate::snapshot::TextSnapshot;
use serde::{Deserialize, Serialize};

const WEIGHT_AVG_WORDS_PER_SENTENCE: f64 = 0.2;
const WEIGHT_AVG_WORD_LENGTH: f64 = 0.15;
const WEIGHT_VOCABULARY_RICHNESS: f64 = 0.2;
const WEIGHT_SENTENCE_COMPLEXITY: f64 = 0.15;
const WEIGHT_PUNCTUATION_DENSITY: f64 = 0.1;
const WEIGHT_SHORT_WORDS: f64 = 0.1;
const WEIGHT_LONG_WORDS: f64 = 0.1;

/// Comparison inputs must be at least this long after trimming.
const MIN_COMPARISON_CHARS: usize = 10;

/// Verdict ladder over the style similarity percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorshipVerdict {
    /// Similarity at or above 80 percent.
    LikelySameAuthor,
    /// Similarity in [60, 80).
    PossiblySameAuthor,
    /// Similarity in [40, 60).
    Uncertain,
    /// Similarity below 40 percent.
    UnlikelySameAuthor,
}

impl AuthorshipVerdict {
    pub fn from_similarity_pct(pct: f64) -> Self {
        if pct >= 80.0 {
            Self::LikelySameAuthor
        } else if pct >= 60.0 {
            Self::PossiblySameAuthor
        } else if pct >= 40.0 {
            Self::Uncertain
        } else {
            Self::UnlikelySameAuthor
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::LikelySameAuthor => "Likely the same author",
            Self::PossiblySameAuthor => "Possibly the same author",
            Self::Uncertain => "Authorship uncertain",
            Self::UnlikelySameAuthor => "Unlikely to be the same author",
        }
    }
}

/// How much weight the similarity number deserves, from sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Moderate,
    Low,
}

impl ConfidenceLevel {
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "Both texts are long enough for stable style features",
            Self::Moderate => "Style features are indicative but not conclusive",
            Self::Low => "Too few words for reliable style comparison",
        }
    }
}

/// Per-feature min/max similarities behind the blended score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleComponents {
    pub avg_words_per_sentence: f64,
    pub avg_word_length: f64,
    pub vocabulary_richness: f64,
    pub sentence_complexity: f64,
    pub punctuation_density: f64,
    pub short_words: f64,
    pub long_words: f64,
}

/// Outcome of one authorship comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorshipAssessment {
    /// Blended style similarity as a percentage, rounded to two decimals.
    pub similarity_pct: f64,
    pub confidence_level: ConfidenceLevel,
    pub verdict: AuthorshipVerdict,
    pub components: StyleComponents,
    pub metrics_a: WritingMetrics,
    pub metrics_b: WritingMetrics,
}

#[derive(Debug, Default)]
pub struct AuthorshipAnalyzer;

impl AuthorshipAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Compares the writing style of two texts. Either input shorter than
    /// ten characters after trimming is rejected.
    pub fn analyze(
        &self,
        a: &TextSnapshot,
        b: &TextSnapshot,
    ) -> Result<AuthorshipAssessment, AnalysisError> {
        validate_length(a, "first")?;
        validate_length(b, "second")?;

        let metrics_a = writing_metrics(a);
        let metrics_b = writing_metrics(b);

        let components = StyleComponents {
            avg_words_per_sentence: min_max_ratio(
                metrics_a.avg_words_per_sentence,
                metrics_b.avg_words_per_sentence,
            ),
            avg_word_length: min_max_ratio(metrics_a.avg_word_length, metrics_b.avg_word_length),
            vocabulary_richness: min_max_ratio(
                metrics_a.vocabulary_richness,
                metrics_b.vocabulary_richness,
            ),
            sentence_complexity: min_max_ratio(
                metrics_a.sentence_complexity,
                metrics_b.sentence_complexity,
            ),
            punctuation_density: min_max_ratio(
                metrics_a.punctuation_density,
                metrics_b.punctuation_density,
            ),
            short_words: min_max_ratio(
                metrics_a.short_word_count as f64,
                metrics_b.short_word_count as f64,
            ),
            long_words: min_max_ratio(
                metrics_a.long_word_count as f64,
                metrics_b.long_word_count as f64,
            ),
        };

        let score = WEIGHT_AVG_WORDS_PER_SENTENCE * components.avg_words_per_sentence
            + WEIGHT_AVG_WORD_LENGTH * components.avg_word_length
            + WEIGHT_VOCABULARY_RICHNESS * components.vocabulary_richness
            + WEIGHT_SENTENCE_COMPLEXITY * components.sentence_complexity
            + WEIGHT_PUNCTUATION_DENSITY * components.punctuation_density
            + WEIGHT_SHORT_WORDS * components.short_words
            + WEIGHT_LONG_WORDS * components.long_words;
        let similarity_pct = (score.clamp(0.0, 1.0) * 10_000.0).round() / 100.0;

        let smaller_sample = metrics_a.word_count.min(metrics_b.word_count);

        Ok(AuthorshipAssessment {
            similarity_pct,
            confidence_level: confidence_from_words(smaller_sample),
            verdict: AuthorshipVerdict::from_similarity_pct(similarity_pct),
            components,
            metrics_a,
            metrics_b,
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

/// Ratio of the smaller feature value to the larger. Both zero counts as
/// perfect agreement; exactly one zero as total disagreement.
fn min_max_ratio(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        1.0
    } else if a == 0.0 || b == 0.0 {
        0.0
    } else {
        a.min(b) / a.max(b)
    }
}

/// Confidence grows asymptotically with the smaller text's word count:
/// 100 words sit near the middle of the curve, 1000 close to the top.
fn confidence_from_words(words: usize) -> ConfidenceLevel {
    let confidence = 1.0 - 1.0 / (1.0 + words as f64 / 100.0);
    if confidence > 0.6 {
        ConfidenceLevel::High
    } else if confidence > 0.3 {
        ConfidenceLevel::Moderate
    } else {
        ConfidenceLevel::Low
    }
}
