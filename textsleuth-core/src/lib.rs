//! Deterministic text forensics.
//!
//! Four analyses over immutable text snapshots: brute-force decoding of
//! classical ciphers, detection of hidden messages and steganographic
//! anomalies, plagiarism similarity scoring, and authorship style
//! comparison. Everything is a pure function of (input, reference tables):
//! no I/O, no shared mutable state, no randomness, so any number of
//! analyses can run in parallel and identical input always produces
//! identical output.
//!
//! [`api::ForensicsEngine`] is the intended entry point; the per-analysis
//! modules are public for callers that want a single measure.

pub mod api;
pub mod authorship;
pub mod cipher;
pub mod errors;
pub mod lexicon;
pub mod metrics;
pub mod plagiarism;
pub mod quality;
pub mod similarity;
pub mod snapshot;
pub mod stego;

// Re-export common types
pub use crate::api::{AnalysisResponse, ForensicsEngine};
pub use crate::authorship::{AuthorshipAssessment, AuthorshipVerdict, ConfidenceLevel};
pub use crate::cipher::{caesar_shift, CipherCandidate, CipherKind, DecodeOutcome};
pub use crate::errors::AnalysisError;
pub use crate::lexicon::Lexicon;
pub use crate::metrics::{CharFrequencyTable, WritingMetrics};
pub use crate::plagiarism::{PlagiarismAssessment, RiskLevel};
pub use crate::similarity::SimilarityReport;
pub use crate::snapshot::TextSnapshot;
pub use crate::stego::{
    AnomalyScan, HiddenMessageScan, SecretMessage, SteganographyFinding, SuspicionLevel,
};
