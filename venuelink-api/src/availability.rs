use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use venuelink_availability::{bookable_dates, bookable_slots};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DatesQuery {
    /// Override the configured look-ahead horizon.
    pub horizon: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    /// ISO calendar date to list slots for.
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct DatesResponse {
    dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct SlotsResponse {
    slots: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/venues/{id}/availability/dates", get(list_dates))
        .route("/v1/venues/{id}/availability/slots", get(list_slots))
}

/// Bookable dates for a venue, starting tomorrow. An empty list means
/// no availability, not an error.
async fn list_dates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DatesQuery>,
) -> Result<Json<DatesResponse>, AppError> {
    let venue = state
        .venues
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("Venue not found: {}", id)))?;

    let horizon = query.horizon.unwrap_or(state.booking_rules.horizon_days);
    let today = chrono::Local::now().date_naive();

    Ok(Json(DatesResponse {
        dates: bookable_dates(&venue.schedule, today, horizon),
    }))
}

/// Slot starts for one chosen date; empty when the weekday is closed.
async fn list_slots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let venue = state
        .venues
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("Venue not found: {}", id)))?;

    Ok(Json(SlotsResponse {
        slots: bookable_slots(&venue.schedule, query.date),
    }))
}
