//! Plagiarism risk assessment built on the similarity report.
//!
//! The four similarity measures are blended into one overall score, which
//! maps onto a risk ladder and a yes/no verdict against a configurable
//! threshold. The blend weights phrase-level matching highest: lifted
//! sentences are stronger evidence than shared vocabulary.

use crate::errors::AnalysisError;
use crate::similarity::{SimilarityEngine, SimilarityReport};
use crate::snapshot::TextSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

const WEIGHT_EXACT: f64 = 0.3;
const WEIGHT_PHRASE: f64 = 0.4;
const WEIGHT_COSINE: f64 = 0.2;
const WEIGHT_STRUCTURAL: f64 = 0.1;

/// Scores at or above this are flagged as plagiarism by default.
pub const DEFAULT_PLAGIARISM_THRESHOLD: f64 = 0.8;

/// Risk ladder over the overall similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
    Minimal,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::Critical
        } else if score >= 0.8 {
            Self::High
        } else if score >= 0.6 {
            Self::Medium
        } else if score >= 0.4 {
            Self::Low
        } else {
            Self::Minimal
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Critical => write!(f, "CRITICAL"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Minimal => write!(f, "MINIMAL"),
        }
    }
}

/// Outcome of one plagiarism check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismAssessment {
    pub is_plagiarism: bool,
    /// Blended similarity as a percentage, rounded to two decimals.
    pub overall_similarity_pct: f64,
    pub risk_level: RiskLevel,
    pub report: SimilarityReport,
    pub recommendations: Vec<String>,
}

/// Checker with a configurable decision threshold.
pub struct PlagiarismChecker {
    engine: SimilarityEngine,
    threshold: f64,
}

impl PlagiarismChecker {
    pub fn new() -> Self {
        Self {
            engine: SimilarityEngine::new(),
            threshold: DEFAULT_PLAGIARISM_THRESHOLD,
        }
    }

    /// Set the decision threshold, clamped to [0, 1].
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Compares a suspect text against the original and derives the
    /// overall score, risk level, and verdict.
    pub fn check(
        &self,
        original: &TextSnapshot,
        suspect: &TextSnapshot,
    ) -> Result<PlagiarismAssessment, AnalysisError> {
        let report = self.engine.compare(original, suspect)?;
        let score = overall_score(&report);
        let risk_level = RiskLevel::from_score(score);

        Ok(PlagiarismAssessment {
            is_plagiarism: score >= self.threshold,
            overall_similarity_pct: (score * 10_000.0).round() / 100.0,
            risk_level,
            recommendations: recommendations_for(risk_level),
            report,
        })
    }
}

impl Default for PlagiarismChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Weighted blend of the report components, each normalized to [0, 1].
/// When no sentence pair was eligible for phrase matching, the remaining
/// weights are renormalized so the score still spans the full range.
fn overall_score(report: &SimilarityReport) -> f64 {
    let exact = report.exact_word_overlap_pct / 100.0;

    let mut score = WEIGHT_EXACT * exact
        + WEIGHT_COSINE * report.cosine_similarity
        + WEIGHT_STRUCTURAL * report.structural_similarity;

    match report.phrase_similarity {
        Some(phrase) => score += WEIGHT_PHRASE * phrase,
        None => score /= WEIGHT_EXACT + WEIGHT_COSINE + WEIGHT_STRUCTURAL,
    }

    score.clamp(0.0, 1.0)
}

fn recommendations_for(risk_level: RiskLevel) -> Vec<String> {
    let texts: &[&str] = match risk_level {
        RiskLevel::Critical => &[
            "Large portions match the original nearly verbatim; treat as copied until proven otherwise.",
            "Review the matched sentence pairs side by side before drawing conclusions.",
        ],
        RiskLevel::High => &[
            "Substantial overlap with the original; request sources or a rewrite.",
            "Review the matched sentence pairs side by side before drawing conclusions.",
        ],
        RiskLevel::Medium => &[
            "Noticeable overlap; check whether shared passages are quoted and attributed.",
        ],
        RiskLevel::Low => &[
            "Minor overlap, consistent with a shared topic rather than copying.",
        ],
        RiskLevel::Minimal => &["No meaningful overlap detected."],
    };
    texts.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(original: &str, suspect: &str) -> PlagiarismAssessment {
        PlagiarismChecker::new()
            .check(&TextSnapshot::new(original), &TextSnapshot::new(suspect))
            .expect("inputs long enough")
    }

    #[test]
    fn test_identical_text_is_flagged() {
        let text = "Forskaren skrev rapporten under våren. Resultaten visade en tydlig trend över tid.";
        let assessment = check(text, text);

        assert_eq!(assessment.overall_similarity_pct, 100.0);
        assert!(assessment.is_plagiarism);
        assert_eq!(assessment.risk_level, RiskLevel::Critical);
        assert!(!assessment.recommendations.is_empty());
    }

    #[test]
    fn test_reflexivity_without_long_sentences() {
        // No sentence reaches five words, so the phrase weight is
        // redistributed; identical input must still score 100.
        let text = "Kort mening här. En till. Sista nu.";
        let assessment = check(text, text);
        assert_eq!(assessment.overall_similarity_pct, 100.0);
        assert!(assessment.is_plagiarism);
    }

    #[test]
    fn test_unrelated_text_is_minimal_risk() {
        let assessment = check(
            "Trädgården blommade i maj och bina surrade mellan rabatterna hela dagen.",
            "Serverhallen kyldes ner efter strömavbrottet innan natten var över igen.",
        );

        assert!(!assessment.is_plagiarism);
        assert!(assessment.overall_similarity_pct < 40.0);
        assert_eq!(assessment.risk_level, RiskLevel::Minimal);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let original = TextSnapshot::new("Hösten kom tidigt i år och löven föll redan i september.");
        let suspect = TextSnapshot::new("Hösten kom tidigt i år och löven föll först i oktober.");

        let strict = PlagiarismChecker::new().with_threshold(0.1);
        let lenient = PlagiarismChecker::new().with_threshold(1.0);

        let flagged = strict.check(&original, &suspect).unwrap();
        let passed = lenient.check(&original, &suspect).unwrap();
        assert!(flagged.is_plagiarism);
        assert!(!passed.is_plagiarism);
        assert_eq!(
            flagged.overall_similarity_pct,
            passed.overall_similarity_pct
        );
    }

    #[test]
    fn test_risk_ladder_buckets() {
        assert_eq!(RiskLevel::from_score(0.95), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(0.85), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(0.7), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(0.5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(0.1), RiskLevel::Minimal);
    }

    #[test]
    fn test_short_input_propagates_error() {
        let checker = PlagiarismChecker::new();
        let ok = TextSnapshot::new("en tillräckligt lång originaltext");
        let short = TextSnapshot::new("kort");
        assert!(checker.check(&ok, &short).is_err());
    }
}
