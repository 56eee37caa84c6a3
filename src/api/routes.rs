//! API route definitions

use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Creator endpoints
        .route("/creators", get(handlers::list_creators))
        .route("/creators", post(handlers::create_creator))
        .route("/creators/:id", get(handlers::get_creator))
        .route("/creators/:id", put(handlers::update_creator))
        .route("/creators/:id", delete(handlers::delete_creator))
        .route("/creators/:id/interactions", post(handlers::add_interaction))
        // Conversation analysis
        .route(
            "/creators/:id/conversations/refresh",
            post(handlers::refresh_conversation_cloud),
        )
        .route("/analysis/wordcloud", post(handlers::build_cloud))
        // Statistics
        .route("/stats", get(handlers::get_stats))
        .with_state(state)
}
