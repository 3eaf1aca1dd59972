use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use venuelink_domain::venue::Venue;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/venues", get(list_venues))
        .route("/v1/venues/{id}", get(get_venue))
}

async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<Venue>>, AppError> {
    let venues = state
        .venues
        .list()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    Ok(Json(venues))
}

async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Venue>, AppError> {
    let venue = state
        .venues
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("Venue not found: {}", id)))?;
    Ok(Json(venue))
}
