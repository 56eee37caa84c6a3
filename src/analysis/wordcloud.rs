use serde::Deserialize;
use serde::Serialize;

use super::count_terms;
use super::CountOptions;
use super::StopwordSet;
use super::TermCounts;

/// Weighting and truncation for [`build_word_cloud`]
#[derive(Debug, Clone, Copy)]
pub struct CloudOptions {
    /// Comments weigh this much relative to captions in the merged table
    pub comment_weight: u64,
    /// Ranked tables are truncated to this many entries
    pub top_terms_limit: usize,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            comment_weight: 2,
            top_terms_limit: 200,
        }
    }
}

/// Ranked conversation-term summary for one batch of captions and comments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordCloud {
    /// Distinct terms in the merged table, counted before truncation
    pub total_terms: usize,
    pub top_overall: TermCounts,
    pub top_comments: TermCounts,
    pub top_captions: TermCounts,
}

/// Build the weighted word cloud for a batch of comment and caption texts.
///
/// Caption and comment counts are computed independently, then merged
/// additively with comments scaled by `comment_weight` (audience replies are
/// a stronger engagement signal than the creator's own captions).
/// `total_terms` reflects the full merged table; the three top tables are
/// each truncated to `top_terms_limit` entries.
#[must_use]
pub fn build_word_cloud<S: AsRef<str>>(
    comment_texts: &[S],
    caption_texts: &[S],
    stopwords: &StopwordSet,
    options: &CloudOptions,
) -> WordCloud {
    let count_options = CountOptions::default();
    let comment_counts = count_terms(comment_texts, stopwords, &count_options);
    let caption_counts = count_terms(caption_texts, stopwords, &count_options);

    // Merge starts from captions so caption terms keep first-insertion
    // priority on ties; comment-only terms append behind them.
    let mut merged = caption_counts.clone();
    merged.add_weighted(&comment_counts, options.comment_weight);

    WordCloud {
        total_terms: merged.len(),
        top_overall: merged.top(options.top_terms_limit),
        top_comments: comment_counts.top(options.top_terms_limit),
        top_captions: caption_counts.top(options.top_terms_limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(comments: &[&str], captions: &[&str]) -> WordCloud {
        build_word_cloud(
            comments,
            captions,
            &StopwordSet::english(),
            &CloudOptions::default(),
        )
    }

    #[test]
    fn test_empty_batches_yield_empty_cloud() {
        let cloud = build(&[], &[]);
        assert_eq!(cloud.total_terms, 0);
        assert!(cloud.top_overall.is_empty());
        assert!(cloud.top_comments.is_empty());
        assert!(cloud.top_captions.is_empty());
    }

    #[test]
    fn test_comment_weighting_law() {
        // One caption occurrence (x1) plus one comment occurrence (x2)
        let cloud = build(&["giveaway"], &["giveaway"]);
        assert_eq!(cloud.top_overall.get("giveaway"), 3);
        assert_eq!(cloud.top_comments.get("giveaway"), 1);
        assert_eq!(cloud.top_captions.get("giveaway"), 1);
    }

    #[test]
    fn test_merged_scenario_counts() {
        let cloud = build(
            &["love this trend"],
            &["love this trend", "love this trend"],
        );
        // 2 caption occurrences x1 + 1 comment occurrence x2
        assert_eq!(cloud.top_overall.get("trend"), 4);
        assert_eq!(cloud.top_overall.get("love"), 4);
        // stopword removal must not splice "love trend" into existence
        assert_eq!(cloud.top_overall.get("love trend"), 0);
        assert_eq!(cloud.total_terms, 2);
    }

    #[test]
    fn test_total_terms_counts_before_truncation() {
        let captions: Vec<String> = (0..500).map(|i| format!("unique{i:03}word")).collect();
        let cloud = build_word_cloud(
            &[] as &[String],
            &captions,
            &StopwordSet::english(),
            &CloudOptions::default(),
        );
        assert_eq!(cloud.total_terms, 500);
        assert_eq!(cloud.top_overall.len(), 200);
        assert_eq!(cloud.top_captions.len(), 200);
        assert!(cloud.top_comments.is_empty());
    }

    #[test]
    fn test_truncation_limit_is_configurable() {
        let captions: Vec<String> = (0..50).map(|i| format!("unique{i:02}word")).collect();
        let options = CloudOptions {
            comment_weight: 2,
            top_terms_limit: 10,
        };
        let cloud =
            build_word_cloud(&[] as &[String], &captions, &StopwordSet::english(), &options);
        assert_eq!(cloud.total_terms, 50);
        assert_eq!(cloud.top_overall.len(), 10);
    }

    #[test]
    fn test_tie_break_keeps_caption_terms_first() {
        // "alpha" (caption-only) and "bravo" (comment-only) both end up with
        // count 2; the caption term was inserted first in the merge
        let cloud = build(&["bravo"], &["alpha", "alpha"]);
        let top = cloud.top_overall.clone();
        let ranked: Vec<(&str, u64)> = top.iter().collect();
        assert_eq!(ranked, vec![("alpha", 2), ("bravo", 2)]);
    }

    #[test]
    fn test_side_tables_are_unmerged() {
        let cloud = build(&["style tips"], &["style goals"]);
        assert_eq!(cloud.top_comments.get("style"), 1);
        assert_eq!(cloud.top_captions.get("style"), 1);
        assert_eq!(cloud.top_overall.get("style"), 3);
        assert_eq!(cloud.top_comments.get("goals"), 0);
        assert_eq!(cloud.top_captions.get("tips"), 0);
    }

    #[test]
    fn test_custom_comment_weight() {
        let options = CloudOptions {
            comment_weight: 5,
            top_terms_limit: 200,
        };
        let cloud = build_word_cloud(
            &["giveaway"],
            &["giveaway"],
            &StopwordSet::english(),
            &options,
        );
        assert_eq!(cloud.top_overall.get("giveaway"), 6);
    }
}
