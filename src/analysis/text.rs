use std::sync::LazyLock;

use regex::Regex;

use super::StopwordSet;

/// Tokens shorter than this are dropped as low-signal noise.
pub const MIN_TOKEN_CHARS: usize = 4;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid URL pattern"));

/// Normalize raw caption/comment text for term extraction.
///
/// Lowercases, strips URLs and line breaks, removes every character that is
/// not a lowercase letter, digit, `#`, or `@`, and collapses whitespace.
/// Idempotent: `normalize(normalize(t)) == normalize(t)` for all inputs.
#[must_use]
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = URL_PATTERN.replace_all(&lowered, " ");

    let scrubbed: String = without_urls
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '#' | '@' => c,
            _ => ' ',
        })
        .collect();

    scrubbed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into meaningful word tokens.
///
/// Drops empty tokens, stopwords, tokens under [`MIN_TOKEN_CHARS`], and
/// pure-numeric tokens. Order is preserved.
#[must_use]
pub fn tokenize(text: &str, stopwords: &StopwordSet) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|token| is_meaningful_token(token, stopwords))
        .map(str::to_string)
        .collect()
}

/// Token filter shared by the tokenizer and the n-gram counter.
pub(super) fn is_meaningful_token(token: &str, stopwords: &StopwordSet) -> bool {
    !token.is_empty()
        && token.len() >= MIN_TOKEN_CHARS
        && !stopwords.contains(token)
        && !token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn test_normalize_keeps_hashtags_and_mentions() {
        assert_eq!(
            normalize("Big #GIVEAWAY with @brand!!!"),
            "big #giveaway with @brand"
        );
    }

    #[test]
    fn test_normalize_strips_urls() {
        assert_eq!(
            normalize("check https://example.com/p/abc?x=1 now"),
            "check now"
        );
        assert_eq!(normalize("http://a.b/c"), "");
    }

    #[test]
    fn test_normalize_collapses_line_breaks_and_whitespace() {
        assert_eq!(normalize("one\r\n\r\ntwo\n  three\t four"), "one two three four");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "Hello, World!",
            "Big #GIVEAWAY with @brand at https://example.com 🚀🚀",
            "MiXeD CaSe\r\nand\tlines",
            "",
            "déjà vu, with accents",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_tokenize_drops_stopwords_and_short_tokens() {
        let stopwords = StopwordSet::english();
        assert!(tokenize("the cat sat on it", &stopwords).is_empty());
    }

    #[test]
    fn test_tokenize_drops_numeric_tokens() {
        let stopwords = StopwordSet::english();
        assert_eq!(
            tokenize("2024 brings 10000 new trends", &stopwords),
            vec!["brings", "trends"]
        );
    }

    #[test]
    fn test_tokenize_preserves_order() {
        let stopwords = StopwordSet::english();
        assert_eq!(
            tokenize("Love this #summer trend", &stopwords),
            vec!["love", "#summer", "trend"]
        );
    }

    #[test]
    fn test_tokenize_empty_input() {
        let stopwords = StopwordSet::english();
        assert!(tokenize("", &stopwords).is_empty());
    }
}
