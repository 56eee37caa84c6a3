use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Social platforms the CRM can track for a creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Youtube,
    Tiktok,
    Twitter,
}

impl Platform {
    pub const ALL: [Self; 4] = [Self::Instagram, Self::Youtube, Self::Tiktok, Self::Twitter];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
            Self::Twitter => "twitter",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media type of a fetched post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Text,
}

/// A post retrieved from a social platform.
///
/// Produced by the external fetchers and immutable once retrieved; only the
/// caption text and platform tag feed the conversation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub platform: Platform,
    pub caption: String,
    pub post_url: String,
    pub media_url: Option<String>,
    pub likes: i64,
    pub comments: i64,
    pub posted_at: DateTime<Utc>,
    pub media_type: MediaType,
}

/// An audience comment attached to a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub platform: Platform,
    pub post_id: String,
    pub text: String,
}

/// Creator record (one row in the `creators` table)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Creator {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub primary_content_type: Option<String>,
    pub audience_size: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub verified: bool,
    pub conversation_terms: serde_json::Value,
    pub conversation_terms_by_platform: serde_json::Value,
    pub analysis_metadata: serde_json::Value,
    pub last_comment_fetch_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Creator {
    /// Handles for every platform the creator has configured.
    ///
    /// Blank handles count as unconfigured.
    #[must_use]
    pub fn platform_handles(&self) -> Vec<(Platform, String)> {
        let candidates = [
            (Platform::Instagram, &self.instagram),
            (Platform::Youtube, &self.youtube),
            (Platform::Tiktok, &self.tiktok),
            (Platform::Twitter, &self.twitter),
        ];

        candidates
            .into_iter()
            .filter_map(|(platform, handle)| {
                handle
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .map(|h| (platform, h.to_string()))
            })
            .collect()
    }
}

/// Contact-history record for a creator
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Interaction {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub interaction_type: String,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Create creator request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCreatorRequest {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub primary_content_type: Option<String>,
    pub audience_size: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

/// Update creator request; unset fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCreatorRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub primary_content_type: Option<String>,
    pub audience_size: Option<i64>,
    pub engagement_rate: Option<f64>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub verified: Option<bool>,
}

/// Creator list query filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatorQuery {
    pub search: Option<String>,
    pub verified: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Record interaction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInteractionRequest {
    pub interaction_type: String,
    pub notes: Option<String>,
    pub date: Option<DateTime<Utc>>,
}
