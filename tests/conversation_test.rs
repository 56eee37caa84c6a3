//! Orchestrator tests with mock providers.
//!
//! No network or database: providers are trait objects returning canned
//! (or failing) results, exercising the fan-out, partitioning, degradation,
//! and per-platform isolation rules.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use creatorhub::analysis::CloudOptions;
use creatorhub::analysis::StopwordSet;
use creatorhub::conversation::ConversationService;
use creatorhub::fetch::CommentFetcher;
use creatorhub::fetch::PostFetcher;
use creatorhub::models::Comment;
use creatorhub::models::Creator;
use creatorhub::models::MediaType;
use creatorhub::models::Platform;
use creatorhub::models::Post;
use creatorhub::CreatorHubError;
use creatorhub::Result;
use uuid::Uuid;

fn test_post(platform: Platform, id: &str, caption: &str) -> Post {
    Post {
        id: id.to_string(),
        platform,
        caption: caption.to_string(),
        post_url: format!("https://example.com/{id}"),
        media_url: None,
        likes: 0,
        comments: 0,
        posted_at: Utc::now(),
        media_type: MediaType::Image,
    }
}

fn test_creator(instagram: Option<&str>, tiktok: Option<&str>) -> Creator {
    Creator {
        id: Uuid::new_v4(),
        full_name: "Test Creator".to_string(),
        email: None,
        phone: None,
        instagram: instagram.map(str::to_string),
        tiktok: tiktok.map(str::to_string),
        youtube: None,
        twitter: None,
        primary_content_type: None,
        audience_size: None,
        engagement_rate: None,
        notes: None,
        tags: Vec::new(),
        verified: false,
        conversation_terms: serde_json::json!({}),
        conversation_terms_by_platform: serde_json::json!({}),
        analysis_metadata: serde_json::json!({}),
        last_comment_fetch_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Post provider serving canned posts per platform; unknown platforms error
/// when `fail_unknown` is set, otherwise they are empty.
struct MockPosts {
    posts: HashMap<Platform, Vec<Post>>,
    fail: Vec<Platform>,
}

impl MockPosts {
    fn new(posts: HashMap<Platform, Vec<Post>>) -> Self {
        Self {
            posts,
            fail: Vec::new(),
        }
    }

    fn failing_on(mut self, platform: Platform) -> Self {
        self.fail.push(platform);
        self
    }
}

#[async_trait]
impl PostFetcher for MockPosts {
    async fn fetch_posts(&self, platform: Platform, _handle: &str) -> Result<Vec<Post>> {
        if self.fail.contains(&platform) {
            return Err(CreatorHubError::Custom(format!(
                "{platform} provider down"
            )));
        }
        Ok(self.posts.get(&platform).cloned().unwrap_or_default())
    }
}

/// Comment provider serving canned comments per platform
struct MockComments {
    comments: HashMap<Platform, Vec<Comment>>,
}

impl MockComments {
    fn empty() -> Self {
        Self {
            comments: HashMap::new(),
        }
    }

    fn with(platform: Platform, texts: &[&str]) -> Self {
        let mut comments = HashMap::new();
        comments.insert(
            platform,
            texts
                .iter()
                .map(|text| Comment {
                    platform,
                    post_id: "post".to_string(),
                    text: (*text).to_string(),
                })
                .collect(),
        );
        Self { comments }
    }
}

#[async_trait]
impl CommentFetcher for MockComments {
    async fn fetch_comments(&self, platform: Platform, _posts: &[Post]) -> Result<Vec<Comment>> {
        Ok(self.comments.get(&platform).cloned().unwrap_or_default())
    }
}

fn service(posts: MockPosts, comments: MockComments) -> ConversationService {
    ConversationService::new(
        Arc::new(posts),
        Arc::new(comments),
        StopwordSet::english(),
        CloudOptions::default(),
    )
}

#[tokio::test]
async fn test_creator_with_no_posts_yields_empty_cloud_not_error() {
    // Instagram handle configured but the provider has nothing; no other
    // platform is configured at all
    let svc = service(MockPosts::new(HashMap::new()), MockComments::empty());
    let creator = test_creator(Some("@quiet"), None);

    let snapshot = svc.refresh(&creator).await;

    assert_eq!(snapshot.summary.total_terms, 0);
    assert!(snapshot.summary.top_overall.is_empty());
    assert!(snapshot.platforms.is_empty());
    assert!(snapshot.terms_by_platform.is_empty());
}

#[tokio::test]
async fn test_platform_counts_are_never_cross_merged() {
    // Both platforms mention "giveaway" five times in captions, no comments
    let mut posts = HashMap::new();
    posts.insert(
        Platform::Instagram,
        (0..5)
            .map(|i| test_post(Platform::Instagram, &format!("ig{i}"), "giveaway"))
            .collect(),
    );
    posts.insert(
        Platform::Tiktok,
        (0..5)
            .map(|i| test_post(Platform::Tiktok, &format!("tt{i}"), "giveaway"))
            .collect(),
    );

    let svc = service(MockPosts::new(posts), MockComments::empty());
    let creator = test_creator(Some("@handle"), Some("@handle"));

    let snapshot = svc.refresh(&creator).await;

    assert_eq!(snapshot.summary.top_overall.get("giveaway"), 10);
    assert_eq!(
        snapshot.terms_by_platform["instagram"].get("giveaway"),
        5
    );
    assert_eq!(snapshot.terms_by_platform["tiktok"].get("giveaway"), 5);
    // Captions only: no platform contributed comment data
    assert!(snapshot.platforms.is_empty());
}

#[tokio::test]
async fn test_failing_platform_does_not_abort_the_batch() {
    let mut posts = HashMap::new();
    posts.insert(
        Platform::Instagram,
        vec![test_post(Platform::Instagram, "ig0", "summer giveaway")],
    );

    let svc = service(
        MockPosts::new(posts).failing_on(Platform::Tiktok),
        MockComments::empty(),
    );
    let creator = test_creator(Some("@handle"), Some("@handle"));

    let snapshot = svc.refresh(&creator).await;

    // TikTok's failure degrades to an empty contribution
    assert_eq!(snapshot.summary.top_overall.get("giveaway"), 1);
    assert_eq!(snapshot.summary.top_overall.get("summer"), 1);
    assert!(!snapshot.terms_by_platform.contains_key("tiktok"));
}

#[tokio::test]
async fn test_comments_weigh_double_through_the_pipeline() {
    let mut posts = HashMap::new();
    posts.insert(
        Platform::Instagram,
        vec![test_post(Platform::Instagram, "ig0", "love this trend")],
    );

    let svc = service(
        MockPosts::new(posts),
        MockComments::with(Platform::Instagram, &["love this trend"]),
    );
    let creator = test_creator(Some("@handle"), None);

    let snapshot = svc.refresh(&creator).await;

    // 1 caption occurrence x1 + 1 comment occurrence x2
    assert_eq!(snapshot.summary.top_overall.get("trend"), 3);
    assert_eq!(snapshot.summary.top_comments.get("trend"), 1);
    assert_eq!(snapshot.summary.top_captions.get("trend"), 1);
    // Instagram contributed comment data
    assert_eq!(snapshot.platforms, vec!["instagram".to_string()]);
}

#[tokio::test]
async fn test_empty_captions_and_comments_are_filtered() {
    let mut posts = HashMap::new();
    posts.insert(
        Platform::Instagram,
        vec![
            test_post(Platform::Instagram, "ig0", ""),
            test_post(Platform::Instagram, "ig1", "fresh looks"),
        ],
    );

    let svc = service(MockPosts::new(posts), MockComments::empty());
    let creator = test_creator(Some("@handle"), None);

    let snapshot = svc.refresh(&creator).await;

    assert_eq!(snapshot.caption_posts_by_platform["instagram"], 1);
    assert_eq!(snapshot.summary.top_overall.get("fresh"), 1);
}

#[tokio::test]
async fn test_unconfigured_platforms_are_not_fetched() {
    // The handle-less TikTok platform must not even reach the provider;
    // a provider that fails on TikTok proves it was never called
    let mut posts = HashMap::new();
    posts.insert(
        Platform::Instagram,
        vec![test_post(Platform::Instagram, "ig0", "summer looks")],
    );

    let svc = service(
        MockPosts::new(posts).failing_on(Platform::Tiktok),
        MockComments::empty(),
    );
    let creator = test_creator(Some("@handle"), None);

    let snapshot = svc.refresh(&creator).await;
    assert_eq!(snapshot.summary.top_overall.get("summer looks"), 1);
    assert_eq!(snapshot.terms_by_platform.len(), 1);
}
