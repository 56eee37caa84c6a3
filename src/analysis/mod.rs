//! Conversation-term aggregation pipeline.
//!
//! Pure text processing: normalization, tokenization, n-gram term counting,
//! and the weighted word-cloud merge. Everything here is deterministic,
//! infallible, and free of I/O; the fan-out over live platforms lives in
//! [`crate::conversation`].

mod stopwords;
mod terms;
mod text;
mod wordcloud;

pub use stopwords::StopwordSet;
pub use terms::count_terms;
pub use terms::ngrams;
pub use terms::CountOptions;
pub use terms::TermCounts;
pub use text::normalize;
pub use text::tokenize;
pub use text::MIN_TOKEN_CHARS;
pub use wordcloud::build_word_cloud;
pub use wordcloud::CloudOptions;
pub use wordcloud::WordCloud;
