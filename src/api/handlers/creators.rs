/// Creator CRUD handlers
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::CreatorListParams;
use crate::api::types::CreatorListResponse;
use crate::models::CreateCreatorRequest;
use crate::models::CreateInteractionRequest;
use crate::models::Creator;
use crate::models::CreatorQuery;
use crate::models::Interaction;
use crate::models::UpdateCreatorRequest;

/// List creators (GET /api/creators)
pub async fn list_creators(
    State(state): State<AppState>,
    Query(params): Query<CreatorListParams>,
) -> Result<Json<ApiResponse<CreatorListResponse>>, StatusCode> {
    info!("GET /api/creators?page={}&limit={}", params.page, params.limit);

    let page = params.page.max(1);
    let limit = params.limit.clamp(1, 100);
    let query = CreatorQuery {
        search: params.search,
        verified: params.verified,
        limit: Some(limit),
        offset: Some((page - 1) * limit),
    };

    let total = match state.database.count_creators(&query).await {
        Ok(total) => total,
        Err(e) => {
            error!("Error counting creators: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match state.database.list_creators(query).await {
        Ok(creators) => Ok(Json(ApiResponse::success(CreatorListResponse {
            creators,
            total,
            total_pages: (total + limit - 1) / limit,
            current_page: page,
        }))),
        Err(e) => {
            error!("Error listing creators: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get creator by id (GET /api/creators/:id)
pub async fn get_creator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Creator>>, StatusCode> {
    info!("GET /api/creators/{}", id);

    match state.database.get_creator(id).await {
        Ok(Some(creator)) => Ok(Json(ApiResponse::success(creator))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Error fetching creator {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Create creator (POST /api/creators)
pub async fn create_creator(
    State(state): State<AppState>,
    Json(request): Json<CreateCreatorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Creator>>), StatusCode> {
    info!("POST /api/creators - {}", request.full_name);

    if request.full_name.trim().is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("full_name is required")),
        ));
    }

    match state.database.create_creator(request).await {
        Ok(creator) => Ok((StatusCode::CREATED, Json(ApiResponse::success(creator)))),
        Err(e) => {
            error!("Error creating creator: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update creator (PUT /api/creators/:id)
pub async fn update_creator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCreatorRequest>,
) -> Result<Json<ApiResponse<Creator>>, StatusCode> {
    info!("PUT /api/creators/{}", id);

    match state.database.update_creator(id, request).await {
        Ok(Some(creator)) => Ok(Json(ApiResponse::success(creator))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Error updating creator {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete creator (DELETE /api/creators/:id)
pub async fn delete_creator(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    info!("DELETE /api/creators/{}", id);

    match state.database.delete_creator(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Error deleting creator {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Record an interaction (POST /api/creators/:id/interactions)
pub async fn add_interaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateInteractionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Interaction>>), StatusCode> {
    info!("POST /api/creators/{}/interactions", id);

    // Creator must exist; FK violation would otherwise surface as a 500
    match state.database.get_creator(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(StatusCode::NOT_FOUND),
        Err(e) => {
            error!("Error fetching creator {}: {}", id, e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match state.database.add_interaction(id, request).await {
        Ok(interaction) => Ok((StatusCode::CREATED, Json(ApiResponse::success(interaction)))),
        Err(e) => {
            error!("Error recording interaction for {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
