//! Public analysis facade and response envelope.
//!
//! [`ForensicsEngine`] is the single entry point for callers: it owns the
//! reference lexicon, validates input shape at the boundary, dispatches to
//! the individual analyses, and wraps every outcome in an
//! [`AnalysisResponse`]. A failure is always a returned value with
//! `success: false`; no call panics or propagates a fault to the caller.

use crate::authorship::{AuthorshipAnalyzer, AuthorshipAssessment};
use crate::cipher::{CipherDetector, CipherKind, DecodeOutcome};
use crate::errors::AnalysisError;
use crate::lexicon::Lexicon;
use crate::plagiarism::{PlagiarismAssessment, PlagiarismChecker};
use crate::snapshot::TextSnapshot;
use crate::stego::{AnomalyScan, HiddenMessageScan, SteganographyDetector};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform envelope around every analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse<T> {
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AnalysisResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            timestamp: Utc::now(),
            data: Some(data),
            error: None,
        }
    }

    fn fail(error: &AnalysisError) -> Self {
        Self {
            success: false,
            timestamp: Utc::now(),
            data: None,
            error: Some(error.to_string()),
        }
    }

    /// Unwraps the payload for callers that have already checked `success`.
    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, Some(error)) => Err(error),
            (None, None) => Err("empty response".to_string()),
        }
    }
}

/// Facade over the four forensic analyses.
pub struct ForensicsEngine {
    lexicon: Lexicon,
}

impl ForensicsEngine {
    /// Engine with the built-in Swedish reference tables.
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::swedish())
    }

    /// Engine with caller-supplied reference tables.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Brute-forces the requested cipher family over the text and ranks
    /// the candidates.
    pub fn decode_cipher(&self, text: &str, kind: CipherKind) -> AnalysisResponse<DecodeOutcome> {
        log::debug!("cipher: decoding {} chars as {kind}", text.len());
        if let Err(e) = require_text(text) {
            return AnalysisResponse::fail(&e);
        }

        let detector = CipherDetector::new(&self.lexicon);
        AnalysisResponse::ok(detector.decode(text, kind))
    }

    /// Scans for messages hidden in the text itself.
    pub fn detect_hidden_message(&self, text: &str) -> AnalysisResponse<HiddenMessageScan> {
        log::debug!("stego: hidden-message scan over {} chars", text.len());
        if let Err(e) = require_text(text) {
            return AnalysisResponse::fail(&e);
        }

        let detector = SteganographyDetector::new(&self.lexicon);
        AnalysisResponse::ok(detector.detect_hidden_message(&TextSnapshot::new(text)))
    }

    /// Scans for carrier-signal anomalies suggesting hidden content.
    pub fn detect_anomalies(&self, text: &str) -> AnalysisResponse<AnomalyScan> {
        log::debug!("stego: anomaly scan over {} chars", text.len());
        if let Err(e) = require_text(text) {
            return AnalysisResponse::fail(&e);
        }

        let detector = SteganographyDetector::new(&self.lexicon);
        AnalysisResponse::ok(detector.detect_anomalies(&TextSnapshot::new(text)))
    }

    /// Compares a suspect text against an original and grades the
    /// plagiarism risk. `threshold` defaults to 0.8.
    pub fn check_plagiarism(
        &self,
        original: &str,
        suspect: &str,
        threshold: Option<f64>,
    ) -> AnalysisResponse<PlagiarismAssessment> {
        log::debug!(
            "plagiarism: comparing {} against {} chars",
            suspect.len(),
            original.len()
        );

        let mut checker = PlagiarismChecker::new();
        if let Some(threshold) = threshold {
            checker = checker.with_threshold(threshold);
        }

        match checker.check(&TextSnapshot::new(original), &TextSnapshot::new(suspect)) {
            Ok(assessment) => AnalysisResponse::ok(assessment),
            Err(e) => AnalysisResponse::fail(&e),
        }
    }

    /// Compares the writing style of two texts.
    pub fn analyze_authorship(&self, a: &str, b: &str) -> AnalysisResponse<AuthorshipAssessment> {
        log::debug!("authorship: comparing {} and {} chars", a.len(), b.len());

        let analyzer = AuthorshipAnalyzer::new();
        match analyzer.analyze(&TextSnapshot::new(a), &TextSnapshot::new(b)) {
            Ok(assessment) => AnalysisResponse::ok(assessment),
            Err(e) => AnalysisResponse::fail(&e),
        }
    }
}

impl Default for ForensicsEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn require_text(text: &str) -> Result<(), AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::InvalidInput(
            "text is empty or missing".to_string(),
        ));
    }
    Ok(())
}
