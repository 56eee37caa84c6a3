/// API request handlers
use std::sync::Arc;

use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::conversation::ConversationService;
use crate::database::Database;

// Re-export sub-modules
pub mod conversations;
pub mod creators;
pub mod stats;

// Re-export handlers
pub use conversations::*;
pub use creators::*;
pub use stats::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Database>,
    pub conversation: Arc<ConversationService>,
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
