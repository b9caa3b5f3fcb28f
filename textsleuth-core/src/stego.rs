//! Detection of hidden messages and steganographic anomalies in text.
//!
//! Two independent scans share this module. The hidden-message scan tries a
//! fixed set of classic text-hiding schemes (acronyms, capitalization
//! cadence, numeric ASCII, whitespace binary) and reports whatever decodes
//! cleanly. The anomaly scan looks for carrier signals instead: characters
//! that should not be there, suspicious spacing, homoglyph substitution,
//! and letter-frequency drift away from the reference language.

use crate::lexicon::Lexicon;
use crate::metrics;
use crate::snapshot::TextSnapshot;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Constants
// =============================================================================

/// Minimum sentences before a sentence-initial acronym is considered.
const MIN_ACRONYM_SENTENCES: usize = 3;

/// Minimum words before a word-initial acronym is considered.
const MIN_ACRONYM_WORDS: usize = 5;

/// Word-initial acronyms are kept only in this exclusive length range.
const WORD_ACRONYM_MIN_LEN: usize = 4;
const WORD_ACRONYM_MAX_LEN: usize = 20;

/// Minimum interior capitals before cadence statistics are computed.
const MIN_INTERIOR_CAPITALS: usize = 3;

/// A cadence finding additionally requires more capitals than this.
const CADENCE_MIN_CAPITALS: usize = 5;

/// Gap variance below this fraction of the mean gap reads as intentional.
const CADENCE_VARIANCE_FACTOR: f64 = 0.2;

/// Minimum decoded values for a numeric ASCII finding.
const MIN_ASCII_VALUES: usize = 3;

/// Minimum multi-space runs for a whitespace binary finding.
const MIN_SPACE_RUNS: usize = 3;

/// Confidence per hidden-message method, ordered by how unlikely the
/// pattern is to occur naturally.
const CONF_SENTENCE_ACRONYM: f64 = 0.4;
const CONF_WORD_ACRONYM: f64 = 0.3;
const CONF_CAPITALIZATION: f64 = 0.5;
const CONF_NUMERIC_ASCII: f64 = 0.6;
const CONF_WHITESPACE_BINARY: f64 = 0.7;

/// Bonus per additional finding and its cap.
const FINDING_BONUS_STEP: f64 = 0.1;
const FINDING_BONUS_CAP: f64 = 0.2;
const OVERALL_CONFIDENCE_CAP: f64 = 0.95;

/// Anomaly confidences.
const CHAR_ANOMALY_STEP: f64 = 0.3;
const CHAR_ANOMALY_CAP: f64 = 0.9;
const CONF_SPACING: f64 = 0.4;
const SPACING_RATIO_THRESHOLD: f64 = 0.1;
const HOMOGLYPH_STEP: f64 = 0.2;
const HOMOGLYPH_CAP: f64 = 0.6;
const CONF_STATISTICAL: f64 = 0.3;

/// Mean per-letter frequency deviation beyond which text no longer looks
/// like the reference language.
const FREQ_DEVIATION_THRESHOLD: f64 = 0.3;

// =============================================================================
// Result Types
// =============================================================================

/// A decoded hidden message and the scheme that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SecretMessage {
    /// First letters of consecutive sentences.
    AcronymFromSentences { message: String, confidence: f64 },
    /// First letters of consecutive words.
    AcronymFromWords { message: String, confidence: f64 },
    /// Regularly spaced interior capitals.
    CapitalizationCadence { message: String, confidence: f64 },
    /// Digit runs decoding to printable ASCII.
    NumericAscii { message: String, confidence: f64 },
    /// Space-run lengths decoding as a bitstream.
    WhitespaceBinary { message: String, confidence: f64 },
}

impl SecretMessage {
    pub fn message(&self) -> &str {
        match self {
            Self::AcronymFromSentences { message, .. }
            | Self::AcronymFromWords { message, .. }
            | Self::CapitalizationCadence { message, .. }
            | Self::NumericAscii { message, .. }
            | Self::WhitespaceBinary { message, .. } => message,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::AcronymFromSentences { confidence, .. }
            | Self::AcronymFromWords { confidence, .. }
            | Self::CapitalizationCadence { confidence, .. }
            | Self::NumericAscii { confidence, .. }
            | Self::WhitespaceBinary { confidence, .. } => *confidence,
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::AcronymFromSentences { .. } => "acronym-sentences",
            Self::AcronymFromWords { .. } => "acronym-words",
            Self::CapitalizationCadence { .. } => "capitalization-cadence",
            Self::NumericAscii { .. } => "numeric-ascii",
            Self::WhitespaceBinary { .. } => "whitespace-binary",
        }
    }
}

/// Result of the hidden-message scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenMessageScan {
    pub secrets_found: usize,
    pub found: Vec<SecretMessage>,
    /// Mean finding confidence plus a small multi-finding bonus, capped.
    pub overall_confidence: f64,
}

/// One carrier-signal observation from the anomaly scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SteganographyFinding {
    /// Control or invisible characters outside the printable range.
    CharacterAnomaly { description: String, confidence: f64 },
    /// Unusually many multi-space runs.
    SpacingAnomaly { description: String, confidence: f64 },
    /// Look-alike substitutions from another script.
    UnicodeHomoglyph { description: String, confidence: f64 },
    /// Letter frequencies far from the reference language.
    StatisticalDeviation { description: String, confidence: f64 },
}

impl SteganographyFinding {
    pub fn description(&self) -> &str {
        match self {
            Self::CharacterAnomaly { description, .. }
            | Self::SpacingAnomaly { description, .. }
            | Self::UnicodeHomoglyph { description, .. }
            | Self::StatisticalDeviation { description, .. } => description,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::CharacterAnomaly { confidence, .. }
            | Self::SpacingAnomaly { confidence, .. }
            | Self::UnicodeHomoglyph { confidence, .. }
            | Self::StatisticalDeviation { confidence, .. } => *confidence,
        }
    }
}

/// Overall suspicion derived from the mean anomaly confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SuspicionLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl SuspicionLevel {
    fn from_mean_confidence(mean: f64) -> Self {
        if mean > 0.7 {
            Self::High
        } else if mean > 0.4 {
            Self::Medium
        } else if mean > 0.0 {
            Self::Low
        } else {
            Self::None
        }
    }
}

impl fmt::Display for SuspicionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuspicionLevel::None => write!(f, "NONE"),
            SuspicionLevel::Low => write!(f, "LOW"),
            SuspicionLevel::Medium => write!(f, "MEDIUM"),
            SuspicionLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Result of the anomaly scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyScan {
    pub findings: Vec<SteganographyFinding>,
    pub suspicion_level: SuspicionLevel,
    pub recommendations: Vec<String>,
}

// =============================================================================
// Detector
// =============================================================================

pub struct SteganographyDetector<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> SteganographyDetector<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Runs every hidden-message scheme against the text. A text with no
    /// decodable pattern yields an empty list and confidence 0.
    pub fn detect_hidden_message(&self, snapshot: &TextSnapshot) -> HiddenMessageScan {
        let mut found = Vec::new();

        if let Some(message) = sentence_acronym(snapshot) {
            found.push(message);
        }
        if let Some(message) = word_acronym(snapshot) {
            found.push(message);
        }
        if let Some(message) = capitalization_cadence(snapshot) {
            found.push(message);
        }
        if let Some(message) = numeric_ascii(snapshot) {
            found.push(message);
        }
        if let Some(message) = whitespace_binary(snapshot) {
            found.push(message);
        }

        let overall_confidence = if found.is_empty() {
            0.0
        } else {
            let mean: f64 =
                found.iter().map(SecretMessage::confidence).sum::<f64>() / found.len() as f64;
            let bonus = (FINDING_BONUS_STEP * found.len() as f64).min(FINDING_BONUS_CAP);
            (mean + bonus).min(OVERALL_CONFIDENCE_CAP)
        };

        HiddenMessageScan {
            secrets_found: found.len(),
            found,
            overall_confidence,
        }
    }

    /// Runs the four independent carrier-signal checks. Order-insensitive;
    /// zero findings is a valid result, never an error.
    pub fn detect_anomalies(&self, snapshot: &TextSnapshot) -> AnomalyScan {
        let mut findings = Vec::new();

        if let Some(finding) = self.character_anomaly(snapshot) {
            findings.push(finding);
        }
        if let Some(finding) = spacing_anomaly(snapshot) {
            findings.push(finding);
        }
        if let Some(finding) = self.homoglyph_anomaly(snapshot) {
            findings.push(finding);
        }
        if let Some(finding) = self.statistical_deviation(snapshot) {
            findings.push(finding);
        }

        let mean = if findings.is_empty() {
            0.0
        } else {
            findings
                .iter()
                .map(SteganographyFinding::confidence)
                .sum::<f64>()
                / findings.len() as f64
        };

        let recommendations = recommendations_for(&findings);

        AnomalyScan {
            suspicion_level: SuspicionLevel::from_mean_confidence(mean),
            findings,
            recommendations,
        }
    }

    fn character_anomaly(&self, snapshot: &TextSnapshot) -> Option<SteganographyFinding> {
        let count = snapshot
            .text()
            .chars()
            .filter(|&c| is_invisible_or_control(c))
            .count();
        if count == 0 {
            return None;
        }

        Some(SteganographyFinding::CharacterAnomaly {
            description: format!(
                "{count} control or invisible character(s) outside the printable range"
            ),
            confidence: (CHAR_ANOMALY_STEP * count as f64).min(CHAR_ANOMALY_CAP),
        })
    }

    fn homoglyph_anomaly(&self, snapshot: &TextSnapshot) -> Option<SteganographyFinding> {
        let lookalikes: Vec<char> = snapshot
            .text()
            .chars()
            .filter(|&c| self.lexicon.is_confusable(c))
            .collect();
        if lookalikes.is_empty() {
            return None;
        }

        let count = lookalikes.len();
        Some(SteganographyFinding::UnicodeHomoglyph {
            description: format!(
                "{count} look-alike character(s) from another script, e.g. {:?}",
                lookalikes[0]
            ),
            confidence: (HOMOGLYPH_STEP * count as f64).min(HOMOGLYPH_CAP),
        })
    }

    fn statistical_deviation(&self, snapshot: &TextSnapshot) -> Option<SteganographyFinding> {
        let table = metrics::char_frequency(snapshot, self.lexicon);
        if table.is_empty() {
            return None;
        }

        let deviation = table.mean_abs_deviation(self.lexicon.letter_frequencies());
        if deviation <= FREQ_DEVIATION_THRESHOLD {
            return None;
        }

        Some(SteganographyFinding::StatisticalDeviation {
            description: format!(
                "letter frequencies deviate {deviation:.2} from the reference language"
            ),
            confidence: CONF_STATISTICAL,
        })
    }
}

// =============================================================================
// Hidden-Message Schemes
// =============================================================================

fn sentence_acronym(snapshot: &TextSnapshot) -> Option<SecretMessage> {
    let sentences = snapshot.sentences();
    if sentences.len() < MIN_ACRONYM_SENTENCES {
        return None;
    }

    let acronym: String = sentences
        .iter()
        .filter_map(|s| s.chars().next())
        .collect();

    if acronym.chars().count() <= 2 || !acronym.chars().all(char::is_alphabetic) {
        return None;
    }

    Some(SecretMessage::AcronymFromSentences {
        message: acronym,
        confidence: CONF_SENTENCE_ACRONYM,
    })
}

fn word_acronym(snapshot: &TextSnapshot) -> Option<SecretMessage> {
    let words = snapshot.words();
    if words.len() < MIN_ACRONYM_WORDS {
        return None;
    }

    let acronym: String = words.iter().filter_map(|w| w.chars().next()).collect();
    let len = acronym.chars().count();
    if len <= WORD_ACRONYM_MIN_LEN || len >= WORD_ACRONYM_MAX_LEN {
        return None;
    }
    if !acronym
        .chars()
        .any(|c| "aeiouyåäö".contains(c.to_lowercase().next().unwrap_or(c)))
    {
        return None;
    }

    Some(SecretMessage::AcronymFromWords {
        message: acronym,
        confidence: CONF_WORD_ACRONYM,
    })
}

fn capitalization_cadence(snapshot: &TextSnapshot) -> Option<SecretMessage> {
    // Interior capitals only: the leading character of the text is expected
    // to be uppercase in normal prose.
    let capitals: Vec<(usize, char)> = snapshot
        .text()
        .chars()
        .enumerate()
        .skip(1)
        .filter(|(_, c)| c.is_uppercase())
        .collect();

    if capitals.len() < MIN_INTERIOR_CAPITALS {
        return None;
    }

    let gaps: Vec<f64> = capitals
        .windows(2)
        .map(|w| (w[1].0 - w[0].0) as f64)
        .collect();
    let mean_gap = gaps.clone().mean();
    let gap_variance = gaps.clone().variance();

    if capitals.len() <= CADENCE_MIN_CAPITALS
        || gap_variance >= CADENCE_VARIANCE_FACTOR * mean_gap
    {
        return None;
    }

    Some(SecretMessage::CapitalizationCadence {
        message: capitals.iter().map(|&(_, c)| c).collect(),
        confidence: CONF_CAPITALIZATION,
    })
}

fn numeric_ascii(snapshot: &TextSnapshot) -> Option<SecretMessage> {
    let mut values = Vec::new();
    let mut run = String::new();

    for c in snapshot.text().chars().chain(std::iter::once(' ')) {
        if c.is_ascii_digit() {
            run.push(c);
            continue;
        }
        if !run.is_empty() {
            if let Ok(value) = run.parse::<u32>() {
                if (32..=126).contains(&value) {
                    values.push(value);
                }
            }
            run.clear();
        }
    }

    if values.len() < MIN_ASCII_VALUES {
        return None;
    }

    let message: String = values
        .iter()
        .filter_map(|&v| char::from_u32(v))
        .collect();

    Some(SecretMessage::NumericAscii {
        message,
        confidence: CONF_NUMERIC_ASCII,
    })
}

fn whitespace_binary(snapshot: &TextSnapshot) -> Option<SecretMessage> {
    let runs = space_runs(snapshot.text());
    let multi_runs: Vec<usize> = runs.iter().copied().filter(|&len| len >= 2).collect();
    if multi_runs.len() < MIN_SPACE_RUNS {
        return None;
    }

    let mut counts: HashMap<usize, usize> = HashMap::new();
    for &len in &multi_runs {
        *counts.entry(len).or_insert(0) += 1;
    }
    if !(2..=4).contains(&counts.len()) {
        return None;
    }

    // The two most common run lengths carry the bits; shorter encodes 0.
    let mut by_frequency: Vec<(usize, usize)> = counts.into_iter().collect();
    by_frequency.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let zero_len = by_frequency[0].0.min(by_frequency[1].0);
    let one_len = by_frequency[0].0.max(by_frequency[1].0);

    let bits: Vec<u8> = multi_runs
        .iter()
        .filter_map(|&len| {
            if len == zero_len {
                Some(0)
            } else if len == one_len {
                Some(1)
            } else {
                None
            }
        })
        .collect();

    if bits.is_empty() || bits.len() % 8 != 0 {
        return None;
    }

    let message: String = bits
        .chunks(8)
        .map(|byte| byte.iter().fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit)))
        .filter(|&value| (32..=126).contains(&value))
        .filter_map(char::from_u32)
        .collect();

    if message.is_empty() {
        return None;
    }

    Some(SecretMessage::WhitespaceBinary {
        message,
        confidence: CONF_WHITESPACE_BINARY,
    })
}

// =============================================================================
// Anomaly Helpers
// =============================================================================

fn spacing_anomaly(snapshot: &TextSnapshot) -> Option<SteganographyFinding> {
    let runs = space_runs(snapshot.text());
    let single = runs.iter().filter(|&&len| len == 1).count();
    let multi = runs.iter().filter(|&&len| len >= 2).count();
    if multi == 0 {
        return None;
    }

    // With no single spaces at all, any multi-space run is already odd.
    let suspicious = single == 0 || multi as f64 / single as f64 > SPACING_RATIO_THRESHOLD;
    if !suspicious {
        return None;
    }

    Some(SteganographyFinding::SpacingAnomaly {
        description: format!("{multi} multi-space run(s) against {single} single space(s)"),
        confidence: CONF_SPACING,
    })
}

/// Lengths of consecutive `' '` runs, in order of appearance.
fn space_runs(text: &str) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0usize;

    for c in text.chars().chain(std::iter::once('\n')) {
        if c == ' ' {
            current += 1;
        } else if current > 0 {
            runs.push(current);
            current = 0;
        }
    }

    runs
}

/// Control characters (beyond ordinary line breaks and tabs) and invisible
/// format characters commonly used to smuggle data.
fn is_invisible_or_control(c: char) -> bool {
    if matches!(c, '\n' | '\r' | '\t') {
        return false;
    }
    if c.is_control() {
        return true;
    }
    matches!(
        c,
        '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
            | '\u{FFFD}'
    )
}

fn recommendations_for(findings: &[SteganographyFinding]) -> Vec<String> {
    let mut recommendations = Vec::new();

    for finding in findings {
        let text = match finding {
            SteganographyFinding::CharacterAnomaly { .. } => {
                "Inspect the raw bytes; strip control and zero-width characters before trusting the text."
            }
            SteganographyFinding::SpacingAnomaly { .. } => {
                "Normalize whitespace and compare against the original; repeated double spaces can carry a bitstream."
            }
            SteganographyFinding::UnicodeHomoglyph { .. } => {
                "Transliterate look-alike characters to Latin and diff against the visible text."
            }
            SteganographyFinding::StatisticalDeviation { .. } => {
                "Letter distribution does not match the expected language; try the cipher decoder on this text."
            }
        };
        recommendations.push(text.to_string());
    }

    recommendations
}

// =============================================================================
// Tests
// =============================================================================
