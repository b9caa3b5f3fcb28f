//! Analysis error taxonomy.
//!
//! These cover input-shape problems detected at the boundary of each public
//! operation. Faults that could arise mid-computation (zero denominators,
//! malformed encodings) are prevented by construction: guards substitute
//! neutral values and malformed cipher input becomes a zero-confidence
//! candidate, so nothing in the core ever panics toward the caller.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Missing or empty text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Text too short for a meaningful comparison.
    #[error("insufficient input: {0}")]
    InsufficientInput(String),

    /// Unknown cipher kind name.
    #[error("unsupported cipher kind: {0}")]
    UnsupportedCipherKind(String),
}
