//! HTTP server implementation

use std::sync::Arc;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::StopwordSet;
use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::conversation::ConversationService;
use crate::database::Database;
use crate::fetch::HttpCommentFetcher;
use crate::fetch::HttpPostFetcher;
use crate::Result;

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting CreatorHub API server...");

    // Initialize services
    let database = Arc::new(Database::from_config(config).await?);
    if !database.is_schema_initialized().await? {
        database.init_schema().await?;
    }

    let post_fetcher = Arc::new(HttpPostFetcher::new(&config.providers)?);
    let comment_fetcher = Arc::new(HttpCommentFetcher::new(&config.providers)?);
    let conversation = Arc::new(ConversationService::new(
        post_fetcher,
        comment_fetcher,
        StopwordSet::english(),
        config.cloud_options(),
    ));

    let state = AppState {
        database,
        conversation,
    };

    // Build API routes
    let api_router = routes::api_routes(state);

    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    // Add CORS if enabled
    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Start server
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("📋 RESTful API available at http://{}/api", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET    /api/health                             - Health check");
    info!("  GET    /api/creators                           - List creators");
    info!("  POST   /api/creators                           - Create creator");
    info!("  GET    /api/creators/:id                       - Get creator by id");
    info!("  PUT    /api/creators/:id                       - Update creator");
    info!("  DELETE /api/creators/:id                       - Delete creator");
    info!("  POST   /api/creators/:id/interactions          - Record interaction");
    info!("  POST   /api/creators/:id/conversations/refresh - Refresh conversation cloud");
    info!("  POST   /api/analysis/wordcloud                 - Word cloud for a text batch");
    info!("  GET    /api/stats                              - Statistics");

    axum::serve(listener, app).await?;

    Ok(())
}
