//! Brute-force decoding of classical cipher transformations.
//!
//! The search space is fixed and small: 25 Caesar rotations plus four
//! single-shot transforms. Every candidate is scored for language
//! plausibility and the list is ranked best-first. Malformed input for the
//! self-describing formats (Morse, Base64) is never an error; it yields a
//! zero-confidence candidate whose decoded text explains the problem.

use crate::errors::AnalysisError;
use crate::lexicon::Lexicon;
use crate::quality::QualityScorer;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// International Morse code, letters then digits.
const MORSE_TABLE: &[(&str, char)] = &[
    (".-", 'a'), ("-...", 'b'), ("-.-.", 'c'), ("-..", 'd'), (".", 'e'),
    ("..-.", 'f'), ("--.", 'g'), ("....", 'h'), ("..", 'i'), (".---", 'j'),
    ("-.-", 'k'), (".-..", 'l'), ("--", 'm'), ("-.", 'n'), ("---", 'o'),
    (".--.", 'p'), ("--.-", 'q'), (".-.", 'r'), ("...", 's'), ("-", 't'),
    ("..-", 'u'), ("...-", 'v'), (".--", 'w'), ("-..-", 'x'), ("-.--", 'y'),
    ("--..", 'z'), ("-----", '0'), (".----", '1'), ("..---", '2'),
    ("...--", '3'), ("....-", '4'), (".....", '5'), ("-....", '6'),
    ("--...", '7'), ("---..", '8'), ("----.", '9'),
];

/// Supported cipher transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CipherKind {
    Caesar,
    Atbash,
    Reverse,
    Morse,
    Base64,
    /// Every transform above, in one candidate list.
    All,
}

impl fmt::Display for CipherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherKind::Caesar => write!(f, "caesar"),
            CipherKind::Atbash => write!(f, "atbash"),
            CipherKind::Reverse => write!(f, "reverse"),
            CipherKind::Morse => write!(f, "morse"),
            CipherKind::Base64 => write!(f, "base64"),
            CipherKind::All => write!(f, "all"),
        }
    }
}

impl FromStr for CipherKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "caesar" => Ok(CipherKind::Caesar),
            "atbash" => Ok(CipherKind::Atbash),
            "reverse" => Ok(CipherKind::Reverse),
            "morse" => Ok(CipherKind::Morse),
            "base64" => Ok(CipherKind::Base64),
            "all" => Ok(CipherKind::All),
            other => Err(AnalysisError::UnsupportedCipherKind(other.to_string())),
        }
    }
}

/// One competing decoded output of a brute-force transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CipherCandidate {
    /// Transform identifier, e.g. `shift-7` or `atbash`.
    pub label: String,
    pub decoded: String,
    /// Language plausibility in [0, 1].
    pub confidence: f64,
}

/// All candidates produced for one request, ranked best-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeOutcome {
    pub candidates: Vec<CipherCandidate>,
    /// Highest-confidence candidate, `None` when the list is empty.
    pub best: Option<CipherCandidate>,
}

/// Brute-force decoder over the fixed transform set.
pub struct CipherDetector<'a> {
    scorer: QualityScorer<'a>,
}

impl<'a> CipherDetector<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            scorer: QualityScorer::new(lexicon),
        }
    }

    /// Decodes `text` under one transform family (or all of them) and
    /// ranks the results by confidence descending, label ascending.
    pub fn decode(&self, text: &str, kind: CipherKind) -> DecodeOutcome {
        let mut candidates = match kind {
            CipherKind::Caesar => self.caesar_candidates(text),
            CipherKind::Atbash => vec![self.scored("atbash", atbash(text))],
            CipherKind::Reverse => vec![self.scored("reverse", reverse(text))],
            CipherKind::Morse => vec![self.morse_candidate(text)],
            CipherKind::Base64 => vec![self.base64_candidate(text)],
            CipherKind::All => {
                let mut all = self.caesar_candidates(text);
                all.push(self.scored("atbash", atbash(text)));
                all.push(self.scored("reverse", reverse(text)));
                all.push(self.morse_candidate(text));
                all.push(self.base64_candidate(text));
                all
            }
        };

        rank(&mut candidates);
        let best = candidates.first().cloned();
        DecodeOutcome { candidates, best }
    }

    fn caesar_candidates(&self, text: &str) -> Vec<CipherCandidate> {
        (1..=25)
            .map(|shift| self.scored(&format!("shift-{shift}"), caesar_shift(text, shift)))
            .collect()
    }

    fn scored(&self, label: &str, decoded: String) -> CipherCandidate {
        let confidence = self.scorer.score(&decoded);
        CipherCandidate {
            label: label.to_string(),
            decoded,
            confidence,
        }
    }

    fn morse_candidate(&self, text: &str) -> CipherCandidate {
        match morse_decode(text) {
            Ok(decoded) => self.scored("morse", decoded),
            Err(reason) => CipherCandidate {
                label: "morse".to_string(),
                decoded: reason,
                confidence: 0.0,
            },
        }
    }

    fn base64_candidate(&self, text: &str) -> CipherCandidate {
        let malformed = |reason: &str| CipherCandidate {
            label: "base64".to_string(),
            decoded: reason.to_string(),
            confidence: 0.0,
        };

        match BASE64_STANDARD.decode(text.trim()) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(decoded) => self.scored("base64", decoded),
                Err(_) => malformed("[invalid format: decoded bytes are not UTF-8 text]"),
            },
            Err(_) => malformed("[invalid format: not standard Base64]"),
        }
    }
}

/// Sorts by confidence descending; ties break on label ascending so the
/// ordering is stable and reproducible.
fn rank(candidates: &mut [CipherCandidate]) {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
}

/// Rotates ASCII letters forward by `shift` positions, preserving case and
/// leaving every other character untouched.
pub fn caesar_shift(text: &str, shift: u8) -> String {
    let shift = u32::from(shift % 26);
    text.chars()
        .map(|c| match c {
            'a'..='z' => rotate(c, b'a', shift),
            'A'..='Z' => rotate(c, b'A', shift),
            _ => c,
        })
        .collect()
}

fn rotate(c: char, base: u8, shift: u32) -> char {
    let offset = (c as u32 - u32::from(base) + shift) % 26;
    char::from_u32(u32::from(base) + offset).unwrap_or(c)
}

/// Mirrors ASCII letters within the alphabet (`a`↔`z`, `b`↔`y`, ...),
/// preserving case. Applying it twice restores the input.
pub fn atbash(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => char::from(b'z' - (c as u8 - b'a')),
            'A'..='Z' => char::from(b'Z' - (c as u8 - b'A')),
            _ => c,
        })
        .collect()
}

/// Whole-string character reversal.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// Decodes Morse: words separated by double spaces, symbols by single
/// spaces. Unknown symbol groups decode to `?`; characters outside the
/// Morse alphabet make the whole input malformed.
fn morse_decode(text: &str) -> Result<String, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("[invalid format: empty Morse input]".to_string());
    }
    if trimmed.chars().any(|c| !matches!(c, '.' | '-' | ' ')) {
        return Err("[invalid format: characters outside the Morse alphabet]".to_string());
    }

    let mut out = String::new();
    for (i, word) in trimmed.split("  ").enumerate() {
        if i > 0 {
            out.push(' ');
        }
        for symbol in word.split(' ').filter(|s| !s.is_empty()) {
            let decoded = MORSE_TABLE
                .iter()
                .find(|&&(code, _)| code == symbol)
                .map(|&(_, c)| c)
                .unwrap_or('?');
            out.push(decoded);
        }
    }

    Ok(out)
}
