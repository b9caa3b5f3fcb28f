//! Immutable text snapshot with precomputed derived views.
//!
//! A snapshot is created once per analysis call and never mutated. All
//! derived views (word tokens, normalized words, sentences, paragraphs,
//! lowercase form) are computed at construction so downstream components
//! can share them without caching protocols of their own.

/// An immutable view of one input text.
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    text: String,
    lowercase: String,
    words: Vec<String>,
    normalized_words: Vec<String>,
    sentences: Vec<String>,
    paragraphs: Vec<String>,
}

impl TextSnapshot {
    pub fn new(text: &str) -> Self {
        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let normalized_words = words
            .iter()
            .map(|w| normalize_word(w))
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            lowercase: text.to_lowercase(),
            sentences: split_sentences(text),
            paragraphs: split_paragraphs(text),
            normalized_words,
            words,
            text: text.to_string(),
        }
    }

    /// The original text, unchanged.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lowercase(&self) -> &str {
        &self.lowercase
    }

    /// Whitespace-separated tokens, punctuation attached.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Lowercased tokens with edge punctuation stripped; empty tokens dropped.
    pub fn normalized_words(&self) -> &[String] {
        &self.normalized_words
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }
}

/// Splits text into sentences on runs of `.`, `!`, `?`, discarding empty
/// fragments.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(|c| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits text into paragraphs on blank-line boundaries.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                paragraphs.push(current.trim().to_string());
            }
            current.clear();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.trim().is_empty() {
        paragraphs.push(current.trim().to_string());
    }

    paragraphs
}

/// Lowercases a token and strips non-alphanumeric edge characters.
pub fn normalize_word(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_splitting_collapses_terminator_runs() {
        let sentences = split_sentences("Vänta... Vad händer? Inget!");
        assert_eq!(sentences, vec!["Vänta", "Vad händer", "Inget"]);
    }

    #[test]
    fn test_paragraph_splitting_on_blank_lines() {
        let text = "Första stycket.\nFortsätter här.\n\nAndra stycket.\n   \nTredje.";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 3);
        assert!(paragraphs[0].contains("Fortsätter"));
    }

    #[test]
    fn test_normalize_word_strips_edges_and_lowercases() {
        assert_eq!(normalize_word("\"Hej,"), "hej");
        assert_eq!(normalize_word("(dag)."), "dag");
        assert_eq!(normalize_word("ÅÄÖ"), "åäö");
        assert_eq!(normalize_word("..."), "");
    }

    #[test]
    fn test_snapshot_views() {
        let snapshot = TextSnapshot::new("Hej på dig. Vad gör du?");
        assert_eq!(snapshot.word_count(), 6);
        assert_eq!(snapshot.sentence_count(), 2);
        assert_eq!(snapshot.paragraphs().len(), 1);
        assert_eq!(snapshot.normalized_words()[2], "dig");
        assert_eq!(snapshot.lowercase(), "hej på dig. vad gör du?");
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = TextSnapshot::new("");
        assert_eq!(snapshot.word_count(), 0);
        assert_eq!(snapshot.sentence_count(), 0);
        assert!(snapshot.paragraphs().is_empty());
    }
}
