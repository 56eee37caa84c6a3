//! HTTP post retrieval for each supported platform.
//!
//! Instagram and TikTok go through RapidAPI scraping hosts, YouTube through
//! the Data API v3, Twitter through the v2 API. Scraping providers answer in
//! several envelope shapes, so parsing probes the known ones instead of
//! binding a strict schema.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use tracing::warn;

use super::handles::canonical_handle;
use super::PostFetcher;
use crate::config::ProvidersConfig;
use crate::models::MediaType;
use crate::models::Platform;
use crate::models::Post;
use crate::Result;

/// Post fetcher backed by the live provider APIs
#[derive(Debug, Clone)]
pub struct HttpPostFetcher {
    client: Client,
    config: ProvidersConfig,
}

impl HttpPostFetcher {
    pub fn new(config: &ProvidersConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn fetch_instagram_posts(&self, username: &str) -> Result<Vec<Post>> {
        let Some(key) = self.config.rapidapi_key.clone() else {
            warn!("[instagram] RapidAPI key not configured; skipping post fetch");
            return Ok(Vec::new());
        };
        let host = self.config.instagram_host.clone();

        let url = format!("https://{host}/api/instagram/posts");
        let response = self
            .client
            .get(&url)
            .query(&[("username", username)])
            .header("X-RapidAPI-Key", &key)
            .header("X-RapidAPI-Host", &host)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(crate::CreatorHubError::Custom(format!(
                "Instagram provider returned HTTP {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let items = first_array(&body, &[
            &["posts"],
            &["data", "items"],
            &["media"],
            &["items"],
        ]);

        let posts = items
            .iter()
            .take(self.config.max_posts_per_platform)
            .filter_map(parse_instagram_post)
            .collect();
        Ok(posts)
    }

    async fn fetch_youtube_posts(&self, handle: &str) -> Result<Vec<Post>> {
        let Some(key) = self.config.youtube_api_key.clone() else {
            warn!("[youtube] API key not configured; skipping post fetch");
            return Ok(Vec::new());
        };

        let channel_id = if handle.starts_with("UC") {
            Some(handle.to_string())
        } else {
            self.resolve_youtube_channel(&key, handle).await?
        };
        let Some(channel_id) = channel_id else {
            warn!("[youtube] Could not resolve channel for handle {handle}");
            return Ok(Vec::new());
        };

        let max_results = self.config.max_posts_per_platform.to_string();
        let response = self
            .client
            .get("https://www.googleapis.com/youtube/v3/search")
            .query(&[
                ("key", key.as_str()),
                ("channelId", channel_id.as_str()),
                ("part", "snippet"),
                ("order", "date"),
                ("maxResults", max_results.as_str()),
                ("type", "video"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(crate::CreatorHubError::Custom(format!(
                "YouTube search returned HTTP {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let items = first_array(&body, &[&["items"]]);

        let mut posts: Vec<Post> = items
            .iter()
            .filter_map(|item| {
                let video_id = item["id"]["videoId"].as_str()?;
                let snippet = &item["snippet"];
                let title = snippet["title"].as_str().unwrap_or_default();
                let description = snippet["description"].as_str().unwrap_or_default();

                Some(Post {
                    id: video_id.to_string(),
                    platform: Platform::Youtube,
                    caption: format!("{title} {description}").trim().to_string(),
                    post_url: format!("https://www.youtube.com/watch?v={video_id}"),
                    media_url: snippet["thumbnails"]["high"]["url"]
                        .as_str()
                        .map(str::to_string),
                    likes: 0,
                    comments: 0,
                    posted_at: parse_rfc3339(snippet["publishedAt"].as_str()),
                    media_type: MediaType::Video,
                })
            })
            .collect();

        self.attach_youtube_statistics(&key, &mut posts).await;
        Ok(posts)
    }

    /// Resolve a username/handle to a channel id via forUsername lookup,
    /// falling back to channel search.
    async fn resolve_youtube_channel(&self, key: &str, handle: &str) -> Result<Option<String>> {
        let bare = handle.trim_start_matches('@');

        let response = self
            .client
            .get("https://www.googleapis.com/youtube/v3/channels")
            .query(&[("key", key), ("forUsername", bare), ("part", "id")])
            .send()
            .await?;
        if response.status().is_success() {
            let body: Value = response.json().await?;
            if let Some(id) = body["items"][0]["id"].as_str() {
                return Ok(Some(id.to_string()));
            }
        }

        let response = self
            .client
            .get("https://www.googleapis.com/youtube/v3/search")
            .query(&[
                ("key", key),
                ("q", bare),
                ("type", "channel"),
                ("part", "snippet"),
                ("maxResults", "1"),
            ])
            .send()
            .await?;
        if response.status().is_success() {
            let body: Value = response.json().await?;
            if let Some(id) = body["items"][0]["snippet"]["channelId"].as_str() {
                return Ok(Some(id.to_string()));
            }
        }

        Ok(None)
    }

    /// Best-effort like/comment counts; statistics failures leave zeros.
    async fn attach_youtube_statistics(&self, key: &str, posts: &mut [Post]) {
        if posts.is_empty() {
            return;
        }
        let ids = posts
            .iter()
            .map(|p| p.id.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get("https://www.googleapis.com/youtube/v3/videos")
            .query(&[("key", key), ("id", ids.as_str()), ("part", "statistics")])
            .send()
            .await;

        let body: Value = match response {
            Ok(r) if r.status().is_success() => match r.json().await {
                Ok(v) => v,
                Err(e) => {
                    debug!("[youtube] statistics parse failed: {e}");
                    return;
                }
            },
            Ok(r) => {
                debug!("[youtube] statistics returned HTTP {}", r.status());
                return;
            }
            Err(e) => {
                debug!("[youtube] statistics request failed: {e}");
                return;
            }
        };

        for item in first_array(&body, &[&["items"]]) {
            let Some(id) = item["id"].as_str() else {
                continue;
            };
            if let Some(post) = posts.iter_mut().find(|p| p.id == id) {
                // The Data API reports statistics as decimal strings
                post.likes = string_count(&item["statistics"]["likeCount"]);
                post.comments = string_count(&item["statistics"]["commentCount"]);
            }
        }
    }

    async fn fetch_tiktok_posts(&self, username: &str) -> Result<Vec<Post>> {
        let Some(key) = self.config.rapidapi_key.clone() else {
            warn!("[tiktok] RapidAPI key not configured; skipping post fetch");
            return Ok(Vec::new());
        };
        let host = self.config.tiktok_host.clone();

        let count = self.config.max_posts_per_platform.to_string();
        let url = format!("https://{host}/user/posts");
        let response = self
            .client
            .get(&url)
            .query(&[("username", username), ("count", count.as_str())])
            .header("X-RapidAPI-Key", &key)
            .header("X-RapidAPI-Host", &host)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(crate::CreatorHubError::Custom(format!(
                "TikTok provider returned HTTP {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let videos = first_array(&body, &[&["data", "videos"], &["data", "itemList"]]);

        let posts = videos
            .iter()
            .take(self.config.max_posts_per_platform)
            .filter_map(|video| {
                let id = value_to_id(&video["id"])?;
                Some(Post {
                    platform: Platform::Tiktok,
                    caption: video["desc"].as_str().unwrap_or_default().to_string(),
                    post_url: format!("https://tiktok.com/@{username}/video/{id}"),
                    media_url: video["video"]["cover"].as_str().map(str::to_string),
                    likes: int_at(video, &[&["stats", "diggCount"]]),
                    comments: int_at(video, &[&["stats", "commentCount"]]),
                    posted_at: parse_unix_seconds(video["createTime"].as_i64()),
                    media_type: MediaType::Video,
                    id,
                })
            })
            .collect();
        Ok(posts)
    }

    async fn fetch_twitter_posts(&self, username: &str) -> Result<Vec<Post>> {
        let Some(token) = self.config.twitter_bearer_token.clone() else {
            warn!("[twitter] Bearer token not configured; skipping post fetch");
            return Ok(Vec::new());
        };

        // Resolve the numeric user id first
        let url = format!("https://api.twitter.com/2/users/by/username/{username}");
        let response = self.client.get(&url).bearer_auth(&token).send().await?;
        if !response.status().is_success() {
            return Err(crate::CreatorHubError::Custom(format!(
                "Twitter user lookup returned HTTP {}",
                response.status()
            )));
        }
        let body: Value = response.json().await?;
        let Some(user_id) = body["data"]["id"].as_str().map(str::to_string) else {
            warn!("[twitter] User not found: {username}");
            return Ok(Vec::new());
        };

        // v2 requires max_results between 5 and 100
        let max_results = self.config.max_posts_per_platform.clamp(5, 100).to_string();
        let url = format!("https://api.twitter.com/2/users/{user_id}/tweets");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("max_results", max_results.as_str()),
                ("tweet.fields", "created_at,public_metrics"),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(crate::CreatorHubError::Custom(format!(
                "Twitter timeline returned HTTP {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let tweets = first_array(&body, &[&["data"]]);

        let posts = tweets
            .iter()
            .take(self.config.max_posts_per_platform)
            .filter_map(|tweet| {
                let id = tweet["id"].as_str()?.to_string();
                let metrics = &tweet["public_metrics"];
                Some(Post {
                    platform: Platform::Twitter,
                    caption: tweet["text"].as_str().unwrap_or_default().to_string(),
                    post_url: format!("https://twitter.com/{username}/status/{id}"),
                    media_url: None,
                    likes: metrics["like_count"].as_i64().unwrap_or(0),
                    comments: metrics["reply_count"].as_i64().unwrap_or(0),
                    posted_at: parse_rfc3339(tweet["created_at"].as_str()),
                    media_type: MediaType::Text,
                    id,
                })
            })
            .collect();
        Ok(posts)
    }
}

#[async_trait]
impl PostFetcher for HttpPostFetcher {
    async fn fetch_posts(&self, platform: Platform, handle: &str) -> Result<Vec<Post>> {
        let Some(username) = canonical_handle(platform, handle) else {
            return Ok(Vec::new());
        };
        debug!("[{platform}] Fetching posts for {username}");

        match platform {
            Platform::Instagram => self.fetch_instagram_posts(&username).await,
            Platform::Youtube => self.fetch_youtube_posts(&username).await,
            Platform::Tiktok => self.fetch_tiktok_posts(&username).await,
            Platform::Twitter => self.fetch_twitter_posts(&username).await,
        }
    }
}

fn parse_instagram_post(item: &Value) -> Option<Post> {
    let id = value_to_id(&item["id"]).or_else(|| value_to_id(&item["pk"]))?;

    let caption = item["caption"]["text"]
        .as_str()
        .or_else(|| item["caption"].as_str())
        .or_else(|| item["text"].as_str())
        .unwrap_or_default()
        .to_string();

    let post_url = item["permalink"].as_str().map_or_else(
        || {
            let code = item["code"]
                .as_str()
                .or_else(|| item["shortcode"].as_str())
                .unwrap_or(&id);
            format!("https://instagram.com/p/{code}")
        },
        str::to_string,
    );

    let is_image = item["media_type"].as_i64() == Some(1) || item["type"].as_str() == Some("image");

    Some(Post {
        platform: Platform::Instagram,
        caption,
        post_url,
        media_url: item["media_url"]
            .as_str()
            .or_else(|| item["image_versions2"]["candidates"][0]["url"].as_str())
            .map(str::to_string),
        likes: int_at(item, &[&["like_count"], &["likes"]]),
        comments: int_at(item, &[&["comment_count"], &["comments"]]),
        posted_at: parse_unix_seconds(item["taken_at"].as_i64()),
        media_type: if is_image {
            MediaType::Image
        } else {
            MediaType::Video
        },
        id,
    })
}

/// First array found at the value itself or under one of the given key paths
pub(super) fn first_array<'a>(value: &'a Value, paths: &[&[&str]]) -> &'a [Value] {
    if let Some(array) = value.as_array() {
        return array;
    }
    for path in paths {
        let mut current = value;
        for key in *path {
            current = &current[*key];
        }
        if let Some(array) = current.as_array() {
            return array;
        }
    }
    &[]
}

pub(super) fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int_at(value: &Value, paths: &[&[&str]]) -> i64 {
    for path in paths {
        let mut current = value;
        for key in *path {
            current = &current[*key];
        }
        if let Some(n) = current.as_i64() {
            return n;
        }
    }
    0
}

/// Decimal-string count fields ("123") used by the YouTube Data API
fn string_count(value: &Value) -> i64 {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| value.as_i64())
        .unwrap_or(0)
}

fn parse_unix_seconds(seconds: Option<i64>) -> DateTime<Utc> {
    seconds
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .unwrap_or_else(Utc::now)
}

fn parse_rfc3339(value: Option<&str>) -> DateTime<Utc> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map_or_else(Utc::now, |dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_array_probes_shapes() {
        let direct = serde_json::json!([1, 2]);
        assert_eq!(first_array(&direct, &[]).len(), 2);

        let nested = serde_json::json!({"data": {"items": [1, 2, 3]}});
        assert_eq!(first_array(&nested, &[&["posts"], &["data", "items"]]).len(), 3);

        let missing = serde_json::json!({"other": 1});
        assert!(first_array(&missing, &[&["posts"]]).is_empty());
    }

    #[test]
    fn test_parse_instagram_post_scraper_shape() {
        let item = serde_json::json!({
            "pk": 12345,
            "caption": {"text": "Summer looks #ootd"},
            "code": "Cxyz",
            "like_count": 10,
            "comment_count": 4,
            "taken_at": 1_700_000_000,
            "media_type": 1
        });

        let post = parse_instagram_post(&item).expect("post should parse");
        assert_eq!(post.id, "12345");
        assert_eq!(post.caption, "Summer looks #ootd");
        assert_eq!(post.post_url, "https://instagram.com/p/Cxyz");
        assert_eq!(post.likes, 10);
        assert_eq!(post.media_type, MediaType::Image);
    }

    #[test]
    fn test_parse_instagram_post_requires_id() {
        let item = serde_json::json!({"caption": "no id"});
        assert!(parse_instagram_post(&item).is_none());
    }

    #[test]
    fn test_string_count_accepts_both_encodings() {
        assert_eq!(string_count(&serde_json::json!("123")), 123);
        assert_eq!(string_count(&serde_json::json!(7)), 7);
        assert_eq!(string_count(&serde_json::json!(null)), 0);
    }
}
