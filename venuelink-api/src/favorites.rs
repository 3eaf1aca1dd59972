use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    pub user_id: Uuid,
    pub venue_id: Uuid,
}

#[derive(Debug, Serialize)]
struct ToggleFavoriteResponse {
    favorite: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/favorites/toggle", post(toggle_favorite))
        .route("/v1/favorites/{user_id}", get(list_favorites))
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Json(req): Json<ToggleFavoriteRequest>,
) -> Result<Json<ToggleFavoriteResponse>, AppError> {
    let favorite = state
        .favorites
        .toggle(req.user_id, req.venue_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    state.session.lock().await.toggle_favorite(req.venue_id);

    Ok(Json(ToggleFavoriteResponse { favorite }))
}

async fn list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Uuid>>, AppError> {
    let favorites = state
        .favorites
        .list_for_user(user_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(favorites))
}
