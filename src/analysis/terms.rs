use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use super::text::is_meaningful_token;
use super::text::normalize;
use super::StopwordSet;

/// Multi-word grams below these joined lengths are dropped as low-signal
/// pairs like "ok go" (threshold counts the joining spaces).
const MIN_BIGRAM_CHARS: usize = 6;
const MIN_TRIGRAM_CHARS: usize = 10;

/// Contiguous n-word windows of a token sequence, joined by single spaces.
///
/// A sequence of length L yields `max(0, L - n + 1)` grams; `n == 1` returns
/// the tokens themselves.
#[must_use]
pub fn ngrams<S: AsRef<str>>(tokens: &[S], n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }

    tokens
        .windows(n)
        .map(|window| {
            window
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// Term-frequency table preserving first-insertion order.
///
/// Insertion order is the tie-break for ranked slices: a stable descending
/// sort keeps earlier-seen terms ahead of later ones with equal counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermCounts {
    counts: IndexMap<String, u64>,
}

impl TermCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct terms
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count for a term, zero when absent
    #[must_use]
    pub fn get(&self, term: &str) -> u64 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(term, count)| (term.as_str(), *count))
    }

    /// Add `weight` to a term's count, inserting it at the back if new
    pub fn add(&mut self, term: &str, weight: u64) {
        if let Some(count) = self.counts.get_mut(term) {
            *count += weight;
        } else {
            self.counts.insert(term.to_string(), weight);
        }
    }

    fn increment(&mut self, term: &str) {
        self.add(term, 1);
    }

    /// Fold another table into this one, scaling its counts by `weight`
    pub fn add_weighted(&mut self, other: &Self, weight: u64) {
        for (term, count) in &other.counts {
            self.add(term, count * weight);
        }
    }

    /// The `limit` highest-count terms, descending, ties in first-insertion
    /// order
    #[must_use]
    pub fn top(&self, limit: usize) -> Self {
        let mut entries: Vec<(&String, u64)> =
            self.counts.iter().map(|(term, count)| (term, *count)).collect();
        // Stable sort: entries start in insertion order, so ties keep it
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            counts: entries
                .into_iter()
                .take(limit)
                .map(|(term, count)| (term.clone(), count))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TermCounts {
    type Item = (&'a String, &'a u64);
    type IntoIter = indexmap::map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Options for [`count_terms`]
#[derive(Debug, Clone, Copy)]
pub struct CountOptions {
    pub include_bigrams: bool,
    pub include_trigrams: bool,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            include_bigrams: true,
            include_trigrams: true,
        }
    }
}

/// Count every qualifying 1-, 2-, and 3-word term across a batch of texts.
///
/// Counts accumulate into a single table. Multi-word grams are taken only
/// over words that are adjacent in the normalized text and individually pass
/// the token filter; dropping a stopword never splices its neighbors into a
/// false phrase.
#[must_use]
pub fn count_terms<S: AsRef<str>>(
    texts: &[S],
    stopwords: &StopwordSet,
    options: &CountOptions,
) -> TermCounts {
    let mut counts = TermCounts::new();

    for text in texts {
        let normalized = normalize(text.as_ref());
        let words: Vec<&str> = normalized.split(' ').collect();

        // Runs of consecutive filter-passing words; n-grams never span a
        // dropped word.
        for run in words.split(|word| !is_meaningful_token(word, stopwords)) {
            for token in run {
                counts.increment(token);
            }
            if options.include_bigrams {
                for gram in ngrams(run, 2) {
                    if gram.len() >= MIN_BIGRAM_CHARS {
                        counts.increment(&gram);
                    }
                }
            }
            if options.include_trigrams {
                for gram in ngrams(run, 3) {
                    if gram.len() >= MIN_TRIGRAM_CHARS {
                        counts.increment(&gram);
                    }
                }
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(texts: &[&str]) -> TermCounts {
        count_terms(texts, &StopwordSet::english(), &CountOptions::default())
    }

    #[test]
    fn test_ngrams_window_count() {
        let tokens = ["alpha", "bravo", "charlie", "delta"];
        assert_eq!(ngrams(&tokens, 2).len(), 3);
        assert_eq!(ngrams(&tokens, 3).len(), 2);
        assert_eq!(ngrams(&tokens, 4), vec!["alpha bravo charlie delta"]);
        assert!(ngrams(&tokens, 5).is_empty());
        assert!(ngrams(&tokens, 0).is_empty());
    }

    #[test]
    fn test_ngrams_unigrams_are_identity() {
        let tokens = vec!["summer".to_string(), "style".to_string(), "haul".to_string()];
        assert_eq!(ngrams(&tokens, 1), tokens);
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let empty: [&str; 0] = [];
        assert!(count(&empty).is_empty());
        assert!(count(&[""]).is_empty());
    }

    #[test]
    fn test_counts_accumulate_across_texts() {
        let counts = count(&["summer looks", "summer vibes"]);
        assert_eq!(counts.get("summer"), 2);
        assert_eq!(counts.get("looks"), 1);
        assert_eq!(counts.get("vibes"), 1);
    }

    #[test]
    fn test_bigram_length_threshold() {
        // "ok go" joins to 5 chars, below the 6-char floor; also both words
        // fail the token filter outright
        assert_eq!(count(&["ok go"]).get("ok go"), 0);
        assert_eq!(count(&["best vibes"]).get("best vibes"), 1);
    }

    #[test]
    fn test_trigram_length_threshold() {
        let counts = count(&["best summer looks"]);
        assert_eq!(counts.get("best summer looks"), 1);
        assert_eq!(counts.get("best summer"), 1);
        assert_eq!(counts.get("summer looks"), 1);
    }

    #[test]
    fn test_grams_never_span_dropped_words() {
        // "this" is a stopword between them; removing it must not make
        // "love trend" contiguous
        let counts = count(&["love this trend"]);
        assert_eq!(counts.get("love"), 1);
        assert_eq!(counts.get("trend"), 1);
        assert_eq!(counts.get("love trend"), 0);
        assert_eq!(counts.get("love this trend"), 0);
    }

    #[test]
    fn test_options_disable_multiword_grams() {
        let stopwords = StopwordSet::english();
        let options = CountOptions {
            include_bigrams: false,
            include_trigrams: false,
        };
        let counts = count_terms(&["best summer looks"], &stopwords, &options);
        assert_eq!(counts.get("best"), 1);
        assert_eq!(counts.get("best summer"), 0);
        assert_eq!(counts.get("best summer looks"), 0);
    }

    #[test]
    fn test_top_sorts_descending_with_insertion_tie_break() {
        let mut counts = TermCounts::new();
        counts.add("first", 2);
        counts.add("second", 5);
        counts.add("third", 2);

        let top = counts.top(3);
        let ranked: Vec<(&str, u64)> = top.iter().collect();
        assert_eq!(ranked, vec![("second", 5), ("first", 2), ("third", 2)]);
    }

    #[test]
    fn test_serializes_as_flat_ordered_map() {
        let mut counts = TermCounts::new();
        counts.add("beta", 3);
        counts.add("alpha", 1);

        let json = serde_json::to_string(&counts.top(10)).expect("serialize term counts");
        assert_eq!(json, r#"{"beta":3,"alpha":1}"#);
    }

    #[test]
    fn test_top_truncates() {
        let mut counts = TermCounts::new();
        for i in 0..50 {
            counts.add(&format!("term{i}"), 50 - i);
        }
        let top = counts.top(10);
        assert_eq!(top.len(), 10);
        assert_eq!(top.get("term0"), 50);
        assert_eq!(top.get("term49"), 0);
    }
}
