/// Stats-related API handlers
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::StatsResponse;

/// Get stats
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatsResponse>>, StatusCode> {
    info!("GET /api/stats");

    let total_creators = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM creators")
        .fetch_one(state.database.pool())
        .await
        .unwrap_or(0);

    let verified_creators =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM creators WHERE verified")
            .fetch_one(state.database.pool())
            .await
            .unwrap_or(0);

    let total_interactions = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM interactions")
        .fetch_one(state.database.pool())
        .await
        .unwrap_or(0);

    let creators_with_conversation_terms = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM creators WHERE conversation_terms != '{}'::jsonb",
    )
    .fetch_one(state.database.pool())
    .await
    .unwrap_or(0);

    Ok(Json(ApiResponse::success(StatsResponse {
        total_creators,
        verified_creators,
        total_interactions,
        creators_with_conversation_terms,
    })))
}
