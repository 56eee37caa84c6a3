//! HTTP comment retrieval per platform.
//!
//! Only Instagram and TikTok have wired scraping providers; YouTube and
//! Twitter degrade to empty results until a provider is configured. A missing
//! credential is a logged skip, never an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::handles::instagram_shortcode;
use super::posts::first_array;
use super::CommentFetcher;
use crate::config::ProvidersConfig;
use crate::models::Comment;
use crate::models::Platform;
use crate::models::Post;
use crate::Result;

/// Comment fetcher backed by the live provider APIs
#[derive(Debug, Clone)]
pub struct HttpCommentFetcher {
    client: Client,
    config: ProvidersConfig,
}

impl HttpCommentFetcher {
    pub fn new(config: &ProvidersConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn fetch_instagram_comments(&self, posts: &[Post]) -> Result<Vec<Comment>> {
        let Some(key) = self.config.rapidapi_key.clone() else {
            warn!("[instagram] RapidAPI key not configured; skipping comments");
            return Ok(Vec::new());
        };
        let host = self.config.instagram_comments_host.clone();
        let url = format!("https://{host}/api/instagram/post/comments");
        let count = self.config.max_comments_per_post.to_string();

        let mut comments = Vec::new();
        for post in posts {
            // Providers key on the shortcode; the media id is the fallback
            let Some(post_ref) = instagram_shortcode(&post.post_url).or_else(|| {
                if post.id.is_empty() {
                    None
                } else {
                    Some(post.id.clone())
                }
            }) else {
                continue;
            };

            let response = self
                .client
                .get(&url)
                .query(&[("shortcode", post_ref.as_str()), ("count", count.as_str())])
                .header("X-RapidAPI-Key", &key)
                .header("X-RapidAPI-Host", &host)
                .send()
                .await;

            let body: Value = match response {
                Ok(r) if r.status().is_success() => r.json().await?,
                Ok(r) => {
                    debug!(
                        "[instagram] comments for {post_ref} returned HTTP {}",
                        r.status()
                    );
                    continue;
                }
                Err(e) => {
                    debug!("[instagram] comments request for {post_ref} failed: {e}");
                    continue;
                }
            };

            let items = first_array(&body, &[
                &["data", "comments"],
                &["comments"],
                &["data", "items"],
            ]);
            if items.is_empty() {
                info!("[instagram] No comments returned for post {post_ref}");
                continue;
            }

            comments.extend(
                items
                    .iter()
                    .take(self.config.max_comments_per_post)
                    .filter_map(|item| comment_text(item).map(|text| Comment {
                        platform: Platform::Instagram,
                        post_id: post_ref.clone(),
                        text,
                    })),
            );
        }
        Ok(comments)
    }

    async fn fetch_tiktok_comments(&self, posts: &[Post]) -> Result<Vec<Comment>> {
        let Some(key) = self.config.rapidapi_key.clone() else {
            warn!("[tiktok] RapidAPI key not configured; skipping comments");
            return Ok(Vec::new());
        };
        let host = self.config.tiktok_host.clone();
        let url = format!("https://{host}/post/comments");
        let count = self.config.max_comments_per_post.to_string();

        let mut comments = Vec::new();
        for post in posts {
            if post.id.is_empty() {
                continue;
            }
            let video_id = post.id.clone();

            let response = self
                .client
                .get(&url)
                .query(&[("video_id", video_id.as_str()), ("count", count.as_str())])
                .header("X-RapidAPI-Key", &key)
                .header("X-RapidAPI-Host", &host)
                .send()
                .await;

            let body: Value = match response {
                Ok(r) if r.status().is_success() => r.json().await?,
                Ok(r) => {
                    debug!(
                        "[tiktok] comments for {video_id} returned HTTP {}",
                        r.status()
                    );
                    continue;
                }
                Err(e) => {
                    debug!("[tiktok] comments request for {video_id} failed: {e}");
                    continue;
                }
            };

            let items = first_array(&body, &[
                &["data", "comments"],
                &["comments"],
                &["data", "list"],
            ]);
            if items.is_empty() {
                info!("[tiktok] No comments returned for video {video_id}");
                continue;
            }

            comments.extend(
                items
                    .iter()
                    .take(self.config.max_comments_per_post)
                    .filter_map(|item| comment_text(item).map(|text| Comment {
                        platform: Platform::Tiktok,
                        post_id: video_id.clone(),
                        text,
                    })),
            );
        }
        Ok(comments)
    }
}

#[async_trait]
impl CommentFetcher for HttpCommentFetcher {
    async fn fetch_comments(&self, platform: Platform, posts: &[Post]) -> Result<Vec<Comment>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        match platform {
            Platform::Instagram => self.fetch_instagram_comments(posts).await,
            Platform::Tiktok => self.fetch_tiktok_comments(posts).await,
            Platform::Youtube | Platform::Twitter => {
                info!("[{platform}] Comment scraping not configured with a provider; returning empty list");
                Ok(Vec::new())
            }
        }
    }
}

/// Comment text under the field names the scraping providers use
fn comment_text(item: &Value) -> Option<String> {
    item["text"]
        .as_str()
        .or_else(|| item["content"].as_str())
        .or_else(|| item["comment"].as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_text_probes_field_names() {
        assert_eq!(
            comment_text(&serde_json::json!({"text": "so cool"})),
            Some("so cool".to_string())
        );
        assert_eq!(
            comment_text(&serde_json::json!({"content": "love it"})),
            Some("love it".to_string())
        );
        assert_eq!(
            comment_text(&serde_json::json!({"comment": "nice"})),
            Some("nice".to_string())
        );
        assert_eq!(comment_text(&serde_json::json!({"text": ""})), None);
        assert_eq!(comment_text(&serde_json::json!({"likes": 3})), None);
    }
}
