use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, patch, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use venuelink_booking::{ReservationForm, SubmissionWorkflow, SubmitError};
use venuelink_domain::reservation::{
    ContentType, GuestOption, Reservation, ReservationStatus, Timeframe,
};

use crate::error::AppError;
use crate::state::AppState;

/// Wire shape of a submission. Required fields arrive as options so the
/// form-validity predicate, not serde, decides what "incomplete" means.
#[derive(Debug, Deserialize)]
pub struct SubmitReservationRequest {
    pub venue_id: Uuid,
    pub requester_id: Uuid,
    pub requester_name: String,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub guests: Option<GuestOption>,
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    pub timeframe: Option<Timeframe>,
    #[serde(default)]
    pub special_request: String,
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    reservation: Reservation,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub requester_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ReservationStatus,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/reservations", post(submit_reservation).get(list_reservations))
        .route("/v1/reservations/{id}/status", patch(update_status))
        .route("/v1/reservations/{id}", delete(delete_reservation))
}

async fn submit_reservation(
    State(state): State<AppState>,
    Json(req): Json<SubmitReservationRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    let form = ReservationForm {
        date: req.date,
        time: req.time,
        guests: req.guests,
        content_types: req.content_types,
        timeframe: req.timeframe,
        special_request: req.special_request,
    };

    // The submit control is disabled client-side on an invalid form;
    // enforce the same invariant at this boundary.
    if !form.is_valid() {
        return Err(AppError::ValidationError(
            "Reservation form is incomplete".to_string(),
        ));
    }

    let mut workflow = SubmissionWorkflow::new(
        state.reservations.clone(),
        state.venues.clone(),
        state.push.clone(),
    );
    workflow.set_form(form);

    let mut session = state.session.lock().await;
    let reservation = workflow
        .submit(req.venue_id, req.requester_id, &req.requester_name, &mut session)
        .await
        .map_err(|e| match e {
            SubmitError::IncompleteForm | SubmitError::AlreadyInFlight => {
                AppError::ValidationError(e.to_string())
            }
            SubmitError::Persistence(msg) => AppError::InternalServerError(msg),
        })?;
    drop(session);

    // Mirror the client-side 2s success display; the detached task just
    // runs the workflow to its Idle reset.
    tokio::spawn(async move {
        workflow.finish_success_display().await;
    });

    info!("Reservation created: {}", reservation.id);
    Ok((StatusCode::CREATED, Json(SubmitResponse { reservation })))
}

/// Read-path refresh: list from the store and reconcile the in-memory
/// mirror wholesale.
async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let reservations = state
        .reservations
        .list_for_requester(query.requester_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    state.session.lock().await.set_reservations(reservations.clone());

    Ok(Json(reservations))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<StatusCode, AppError> {
    let updated = state
        .reservations
        .update_status(id, req.status)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !updated {
        return Err(AppError::NotFoundError(format!("Reservation not found: {}", id)));
    }

    state.session.lock().await.update_reservation_status(id, req.status);
    info!("Reservation {} moved to {}", id, req.status);
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = state
        .reservations
        .delete(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    if !deleted {
        return Err(AppError::NotFoundError(format!("Reservation not found: {}", id)));
    }

    state.session.lock().await.remove_reservation(id);
    Ok(StatusCode::NO_CONTENT)
}
