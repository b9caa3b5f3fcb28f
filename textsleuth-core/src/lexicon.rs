//! Reference tables for the supported language.
//!
//! Every detector receives a [`Lexicon`] at construction, keeping each
//! analysis a pure function of (input, configuration). The built-in tables
//! target Swedish: a fixed function-word list, the standard letter-frequency
//! distribution, and a Latin/Cyrillic confusable pairing used by the
//! homoglyph scan.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// The extended vowels of the Swedish alphabet, beyond ASCII a-z.
pub const EXTRA_LETTERS: [char; 3] = ['å', 'ä', 'ö'];

/// The most frequent Swedish function words. Closed list; matching is done
/// on normalized (lowercased, punctuation-stripped) tokens.
const FUNCTION_WORDS: &[&str] = &[
    "och", "i", "att", "det", "som", "en", "på", "är", "av", "för", "med",
    "till", "den", "har", "de", "inte", "om", "ett", "han", "men", "var",
    "jag", "sig", "från", "vi", "så", "kan", "man", "när", "år", "hon",
    "under", "också", "efter", "eller", "nu", "sin", "där", "vid", "mot",
    "ska", "skulle", "kommer", "ut", "får", "finns", "vara", "hade", "alla",
    "andra", "mycket", "bara", "bli", "upp", "dig", "du", "vad", "din",
];

/// Relative letter frequencies of Swedish prose. Values are fractions of
/// the alphabetic character mass and sum to 1 up to rounding.
const LETTER_FREQUENCIES: &[(char, f64)] = &[
    ('a', 0.0938), ('b', 0.0154), ('c', 0.0149), ('d', 0.0470),
    ('e', 0.1015), ('f', 0.0203), ('g', 0.0286), ('h', 0.0209),
    ('i', 0.0582), ('j', 0.0061), ('k', 0.0314), ('l', 0.0528),
    ('m', 0.0347), ('n', 0.0854), ('o', 0.0448), ('p', 0.0184),
    ('q', 0.0002), ('r', 0.0843), ('s', 0.0659), ('t', 0.0769),
    ('u', 0.0192), ('v', 0.0242), ('w', 0.0014), ('x', 0.0016),
    ('y', 0.0071), ('z', 0.0007), ('å', 0.0134), ('ä', 0.0180),
    ('ö', 0.0131),
];

/// Cyrillic characters that render identically (or nearly so) to a Latin
/// counterpart. Pairs are (cyrillic, latin).
const CONFUSABLE_PAIRS: &[(char, char)] = &[
    ('а', 'a'), ('е', 'e'), ('о', 'o'), ('р', 'p'), ('с', 'c'),
    ('у', 'y'), ('х', 'x'), ('і', 'i'), ('ѕ', 's'), ('ј', 'j'),
    ('А', 'A'), ('В', 'B'), ('Е', 'E'), ('К', 'K'), ('М', 'M'),
    ('Н', 'H'), ('О', 'O'), ('Р', 'P'), ('С', 'C'), ('Т', 'T'),
    ('Х', 'X'), ('У', 'Y'),
];

lazy_static! {
    /// Shared read-only instance of the built-in Swedish tables.
    pub static ref DEFAULT_LEXICON: Lexicon = Lexicon::swedish();
}

/// Constant reference data injected into the analysis components.
#[derive(Debug, Clone)]
pub struct Lexicon {
    function_words: HashSet<String>,
    letter_frequencies: Vec<(char, f64)>,
    confusables: Vec<(char, char)>,
    extra_letters: Vec<char>,
}

impl Lexicon {
    /// The built-in Swedish tables.
    pub fn swedish() -> Self {
        Self {
            function_words: FUNCTION_WORDS.iter().map(|w| w.to_string()).collect(),
            letter_frequencies: LETTER_FREQUENCIES.to_vec(),
            confusables: CONFUSABLE_PAIRS.to_vec(),
            extra_letters: EXTRA_LETTERS.to_vec(),
        }
    }

    /// Builds a lexicon for another language or test configuration.
    pub fn with_tables(
        function_words: impl IntoIterator<Item = String>,
        letter_frequencies: Vec<(char, f64)>,
        confusables: Vec<(char, char)>,
        extra_letters: Vec<char>,
    ) -> Self {
        Self {
            function_words: function_words.into_iter().collect(),
            letter_frequencies,
            confusables,
            extra_letters,
        }
    }

    /// Whether a normalized token is one of the reference function words.
    pub fn is_function_word(&self, word: &str) -> bool {
        self.function_words.contains(word)
    }

    /// Whether a character belongs to the supported alphabet, case-folded.
    pub fn is_supported_letter(&self, c: char) -> bool {
        if c.is_ascii_alphabetic() {
            return true;
        }
        c.to_lowercase()
            .next()
            .is_some_and(|lc| self.extra_letters.contains(&lc))
    }

    /// Reference relative frequency for a lowercase letter; 0 when the
    /// letter is outside the table.
    pub fn reference_frequency(&self, c: char) -> f64 {
        self.letter_frequencies
            .iter()
            .find(|&&(letter, _)| letter == c)
            .map(|&(_, freq)| freq)
            .unwrap_or(0.0)
    }

    pub fn letter_frequencies(&self) -> &[(char, f64)] {
        &self.letter_frequencies
    }

    pub fn confusable_pairs(&self) -> &[(char, char)] {
        &self.confusables
    }

    /// Whether a character is a known look-alike for a Latin letter.
    pub fn is_confusable(&self, c: char) -> bool {
        self.confusables.iter().any(|&(cyrillic, _)| cyrillic == c)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::swedish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_words() {
        let lexicon = Lexicon::swedish();
        assert!(lexicon.is_function_word("och"));
        assert!(lexicon.is_function_word("var"));
        assert!(!lexicon.is_function_word("katt"));
        assert!(!lexicon.is_function_word("the"));
    }

    #[test]
    fn test_supported_alphabet() {
        let lexicon = Lexicon::swedish();
        assert!(lexicon.is_supported_letter('a'));
        assert!(lexicon.is_supported_letter('Z'));
        assert!(lexicon.is_supported_letter('å'));
        assert!(lexicon.is_supported_letter('Ö'));
        assert!(!lexicon.is_supported_letter('7'));
        assert!(!lexicon.is_supported_letter('é'));
        assert!(!lexicon.is_supported_letter('а')); // Cyrillic
    }

    #[test]
    fn test_reference_frequencies_sum_to_one() {
        let lexicon = Lexicon::swedish();
        let total: f64 = lexicon.letter_frequencies().iter().map(|&(_, f)| f).sum();
        assert!((total - 1.0).abs() < 0.01);
        assert!(lexicon.reference_frequency('e') > lexicon.reference_frequency('z'));
    }

    #[test]
    fn test_confusables() {
        let lexicon = Lexicon::swedish();
        assert!(lexicon.is_confusable('а'));
        assert!(!lexicon.is_confusable('a'));
    }
}
