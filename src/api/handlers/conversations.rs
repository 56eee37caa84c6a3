/// Conversation-analysis handlers
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::analysis::build_word_cloud;
use crate::analysis::WordCloud;
use crate::api::types::ApiResponse;
use crate::api::types::ConversationRefreshResponse;
use crate::api::types::WordCloudRequest;

/// Refresh the conversation cloud for a creator
/// (POST /api/creators/:id/conversations/refresh)
pub async fn refresh_conversation_cloud(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ConversationRefreshResponse>>, StatusCode> {
    info!("POST /api/creators/{}/conversations/refresh", id);

    let creator = match state.database.get_creator(id).await {
        Ok(Some(creator)) => creator,
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Error fetching creator {}: {}", id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let snapshot = state.conversation.refresh(&creator).await;

    // Persist before reporting; a failed write must not pretend success
    if let Err(e) = state
        .database
        .update_conversation_cloud(creator.id, &snapshot)
        .await
    {
        error!("Error persisting conversation cloud for {}: {}", id, e);
        return Ok(Json(ApiResponse::error(format!(
            "Failed to store conversation cloud: {e}"
        ))));
    }

    Ok(Json(ApiResponse::success(ConversationRefreshResponse {
        creator_id: creator.id,
        creator_name: creator.full_name,
        fetched_in_ms: snapshot.fetched_in_ms,
        platforms: snapshot.platforms,
        summary: snapshot.summary,
    })))
}

/// Build a word cloud over an arbitrary text batch
/// (POST /api/analysis/wordcloud)
pub async fn build_cloud(
    State(state): State<AppState>,
    Json(request): Json<WordCloudRequest>,
) -> Json<ApiResponse<WordCloud>> {
    info!(
        "POST /api/analysis/wordcloud - {} comment(s), {} caption(s)",
        request.comments.len(),
        request.captions.len()
    );

    let cloud = build_word_cloud(
        &request.comments,
        &request.captions,
        state.conversation.stopwords(),
        &state.conversation.cloud_options(),
    );

    Json(ApiResponse::success(cloud))
}
