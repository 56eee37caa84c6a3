use std::collections::HashSet;

/// Built-in English stopword list: articles, conjunctions, prepositions,
/// pronouns, common filler verbs/adverbs, and single-letter contraction
/// fragments.
const ENGLISH_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "for", "on", "in", "at", "to",
    "from", "by", "of", "with", "as", "is", "it", "this", "that", "these", "those", "be", "are",
    "was", "were", "i", "you", "he", "she", "they", "we", "me", "my", "our", "your", "their",
    "has", "have", "had", "do", "did", "done", "not", "no", "so", "too", "very", "can", "will",
    "just", "what", "when", "where", "who", "why", "how", "s", "t", "d", "ll", "m", "re", "ve",
];

/// Immutable set of words excluded from term extraction.
///
/// Injected into the tokenizer and counter rather than consulted as a global,
/// so tests and non-English deployments can swap the list.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The built-in English list
    #[must_use]
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Build a set from an arbitrary word list
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_set_has_core_words() {
        let stopwords = StopwordSet::english();
        for word in ["the", "and", "it", "this", "very", "will"] {
            assert!(stopwords.contains(word), "expected stopword: {word}");
        }
        assert!(!stopwords.contains("giveaway"));
    }

    #[test]
    fn test_custom_set_is_independent() {
        let stopwords = StopwordSet::from_words(["le", "la", "et"]);
        assert!(stopwords.contains("le"));
        assert!(!stopwords.contains("the"));
        assert_eq!(stopwords.len(), 3);
    }
}
