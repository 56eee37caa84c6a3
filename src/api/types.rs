//! API request and response types

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::WordCloud;
use crate::models::Creator;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Creator list query parameters
#[derive(Debug, Deserialize)]
pub struct CreatorListParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

/// Paged creator list response
#[derive(Debug, Serialize)]
pub struct CreatorListResponse {
    pub creators: Vec<Creator>,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Conversation-cloud refresh response
#[derive(Debug, Serialize)]
pub struct ConversationRefreshResponse {
    pub creator_id: Uuid,
    pub creator_name: String,
    pub fetched_in_ms: u64,
    pub platforms: Vec<String>,
    pub summary: WordCloud,
}

/// Standalone word-cloud request over arbitrary text batches
#[derive(Debug, Deserialize)]
pub struct WordCloudRequest {
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub captions: Vec<String>,
}

/// Statistics response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_creators: i64,
    pub verified_creators: i64,
    pub total_interactions: i64,
    pub creators_with_conversation_terms: i64,
}
