//! Conversation-cloud refresh orchestration.
//!
//! Fans out post retrieval across every platform a creator has configured,
//! partitions the results, fans out comment retrieval per platform, and runs
//! the aggregation pipeline once globally and once per platform. A failing or
//! unconfigured platform contributes empty data; partial results are the
//! expected steady state, not an error.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use futures::future;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;
use tracing::warn;

use crate::analysis::build_word_cloud;
use crate::analysis::CloudOptions;
use crate::analysis::StopwordSet;
use crate::analysis::TermCounts;
use crate::analysis::WordCloud;
use crate::fetch::CommentFetcher;
use crate::fetch::PostFetcher;
use crate::models::Comment;
use crate::models::Creator;
use crate::models::Platform;
use crate::models::Post;

/// Result of one refresh run, ready to persist and report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationSnapshot {
    /// Platforms that contributed at least one comment
    pub platforms: Vec<String>,
    /// Cloud over the combined corpora of every platform
    pub summary: WordCloud,
    /// Independent per-platform overall term tables; never cross-merged
    pub terms_by_platform: IndexMap<String, TermCounts>,
    /// Posts with a non-empty caption, per platform
    pub caption_posts_by_platform: IndexMap<String, usize>,
    /// Comments retrieved, per platform
    pub comment_samples_by_platform: IndexMap<String, usize>,
    /// Wall-clock time of the whole fan-out and aggregation
    pub fetched_in_ms: u64,
}

/// Orchestrates post/comment fan-out and the aggregation pipeline.
pub struct ConversationService {
    posts: Arc<dyn PostFetcher>,
    comments: Arc<dyn CommentFetcher>,
    stopwords: StopwordSet,
    options: CloudOptions,
}

impl ConversationService {
    pub fn new(
        posts: Arc<dyn PostFetcher>,
        comments: Arc<dyn CommentFetcher>,
        stopwords: StopwordSet,
        options: CloudOptions,
    ) -> Self {
        Self {
            posts,
            comments,
            stopwords,
            options,
        }
    }

    /// The aggregation tuning this service runs with
    #[must_use]
    pub const fn cloud_options(&self) -> CloudOptions {
        self.options
    }

    /// The stopword set this service runs with
    #[must_use]
    pub const fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Fetch, aggregate, and summarize the conversation around a creator.
    ///
    /// Pure with respect to storage; persisting the snapshot is the caller's
    /// job so the write stays all-or-nothing.
    pub async fn refresh(&self, creator: &Creator) -> ConversationSnapshot {
        let started = Instant::now();
        let handles = creator.platform_handles();
        info!(
            "Refreshing conversation cloud for {} across {} platform(s)",
            creator.full_name,
            handles.len()
        );

        let posts = self.fetch_all_posts(&handles).await;
        let by_platform = partition_by_platform(posts);
        let comments_by_platform = self.fetch_all_comments(&by_platform).await;

        let snapshot = self.aggregate(&by_platform, &comments_by_platform, started);
        info!(
            "Conversation cloud for {} ready: {} distinct terms from {} platform(s) in {}ms",
            creator.full_name,
            snapshot.summary.total_terms,
            snapshot.platforms.len(),
            snapshot.fetched_in_ms
        );
        snapshot
    }

    /// Concurrent post fetch across platforms; a failed branch becomes an
    /// empty contribution and never cancels its siblings.
    async fn fetch_all_posts(&self, handles: &[(Platform, String)]) -> Vec<Post> {
        let fetches = handles.iter().map(|(platform, handle)| {
            let fetcher = Arc::clone(&self.posts);
            async move {
                match fetcher.fetch_posts(*platform, handle).await {
                    Ok(posts) => {
                        info!("[{platform}] Retrieved {} post(s)", posts.len());
                        posts
                    }
                    Err(e) => {
                        warn!("[{platform}] Post fetch failed, contributing no posts: {e}");
                        Vec::new()
                    }
                }
            }
        });

        future::join_all(fetches).await.into_iter().flatten().collect()
    }

    /// Concurrent comment fetch for every platform present in the partition.
    async fn fetch_all_comments(
        &self,
        by_platform: &BTreeMap<Platform, Vec<Post>>,
    ) -> BTreeMap<Platform, Vec<Comment>> {
        let fetches = by_platform.iter().map(|(platform, posts)| {
            let fetcher = Arc::clone(&self.comments);
            async move {
                let comments = match fetcher.fetch_comments(*platform, posts).await {
                    Ok(comments) => {
                        info!("[{platform}] Retrieved {} comment(s)", comments.len());
                        comments
                    }
                    Err(e) => {
                        warn!("[{platform}] Comment fetch failed, contributing no comments: {e}");
                        Vec::new()
                    }
                };
                (*platform, comments)
            }
        });

        future::join_all(fetches).await.into_iter().collect()
    }

    fn aggregate(
        &self,
        by_platform: &BTreeMap<Platform, Vec<Post>>,
        comments_by_platform: &BTreeMap<Platform, Vec<Comment>>,
        started: Instant,
    ) -> ConversationSnapshot {
        let mut snapshot = ConversationSnapshot::default();

        let mut all_captions: Vec<String> = Vec::new();
        let mut all_comments: Vec<String> = Vec::new();

        for (platform, posts) in by_platform {
            let captions = caption_texts(posts);
            let comment_texts: Vec<String> = comments_by_platform
                .get(platform)
                .map(|comments| {
                    comments
                        .iter()
                        .filter(|c| !c.text.is_empty())
                        .map(|c| c.text.clone())
                        .collect()
                })
                .unwrap_or_default();

            if !comment_texts.is_empty() {
                snapshot.platforms.push(platform.to_string());
            }
            snapshot
                .caption_posts_by_platform
                .insert(platform.to_string(), captions.len());
            snapshot
                .comment_samples_by_platform
                .insert(platform.to_string(), comment_texts.len());

            // Each platform gets its own full pipeline run; rankings are
            // never cross-pollinated between platforms
            let platform_cloud =
                build_word_cloud(&comment_texts, &captions, &self.stopwords, &self.options);
            snapshot
                .terms_by_platform
                .insert(platform.to_string(), platform_cloud.top_overall);

            all_captions.extend(captions);
            all_comments.extend(comment_texts);
        }

        snapshot.summary =
            build_word_cloud(&all_comments, &all_captions, &self.stopwords, &self.options);
        snapshot.fetched_in_ms = started.elapsed().as_millis() as u64;
        snapshot
    }
}

fn partition_by_platform(posts: Vec<Post>) -> BTreeMap<Platform, Vec<Post>> {
    let mut by_platform: BTreeMap<Platform, Vec<Post>> = BTreeMap::new();
    for post in posts {
        by_platform.entry(post.platform).or_default().push(post);
    }
    by_platform
}

fn caption_texts(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .map(|post| post.caption.clone())
        .filter(|caption| !caption.is_empty())
        .collect()
}
