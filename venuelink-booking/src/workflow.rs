use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;
use venuelink_domain::notify::{PushMessage, PushRelay};
use venuelink_domain::repository::{ReservationRepository, VenueRepository};
use venuelink_domain::reservation::Reservation;

use crate::form::ReservationForm;
use crate::session::SessionState;

/// How long the success indicator is shown before the form resets and
/// the caller is redirected.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(2);

/// State of one in-flight submission. Steps are strictly sequential on
/// a single logical thread; there is no cancellation after submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Notifying,
    Failed,
    Succeeded,
}

/// Where the UI navigates once the success display ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    ReservationList,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Reservation form is incomplete")]
    IncompleteForm,

    #[error("A submission is already in flight")]
    AlreadyInFlight,

    #[error("Failed to persist reservation: {0}")]
    Persistence(String),
}

/// Drives one reservation submission: persist, then best-effort push
/// notification to the venue owner, then reconcile the local list.
///
/// Only the persistence step is fatal; notification problems are logged
/// and swallowed so they can never block or reverse a stored
/// reservation.
pub struct SubmissionWorkflow {
    reservations: Arc<dyn ReservationRepository>,
    venues: Arc<dyn VenueRepository>,
    push: Arc<dyn PushRelay>,
    form: ReservationForm,
    state: SubmissionState,
}

impl SubmissionWorkflow {
    pub fn new(
        reservations: Arc<dyn ReservationRepository>,
        venues: Arc<dyn VenueRepository>,
        push: Arc<dyn PushRelay>,
    ) -> Self {
        Self {
            reservations,
            venues,
            push,
            form: ReservationForm::new(),
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn form(&self) -> &ReservationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ReservationForm {
        &mut self.form
    }

    pub fn set_form(&mut self, form: ReservationForm) {
        self.form = form;
    }

    /// Submit the current form for `venue_id` on behalf of the requester.
    ///
    /// Refuses to start unless the form-validity invariant holds and no
    /// earlier attempt is still showing its success indicator. On
    /// persistence failure the workflow parks in `Failed` and the form
    /// stays editable for a retry.
    pub async fn submit(
        &mut self,
        venue_id: Uuid,
        requester_id: Uuid,
        requester_name: &str,
        session: &mut SessionState,
    ) -> Result<Reservation, SubmitError> {
        if !matches!(self.state, SubmissionState::Idle | SubmissionState::Failed) {
            return Err(SubmitError::AlreadyInFlight);
        }
        let Some(reservation) = self.form.build(venue_id, requester_id, requester_name) else {
            return Err(SubmitError::IncompleteForm);
        };

        // 1. Persist. The only fatal step.
        self.state = SubmissionState::Submitting;
        if let Err(e) = self.reservations.insert(&reservation).await {
            tracing::error!("Failed to persist reservation {}: {}", reservation.id, e);
            self.state = SubmissionState::Failed;
            return Err(SubmitError::Persistence(e.to_string()));
        }

        // 2. Notify the venue owner, best-effort. At most one send, no retry.
        self.state = SubmissionState::Notifying;
        match self.venues.push_token(venue_id).await {
            Ok(Some(token)) => {
                let message = PushMessage {
                    token,
                    title: "New collaboration request".to_string(),
                    body: format!(
                        "{} requested a booking for {} at {}",
                        requester_name, reservation.date, reservation.time
                    ),
                    data: serde_json::json!({ "reservationId": reservation.id }),
                };
                if let Err(e) = self.push.send(&message).await {
                    tracing::warn!("Push notification for reservation {} failed: {}", reservation.id, e);
                }
            }
            Ok(None) => {
                tracing::warn!("Venue {} has no push token registered", venue_id);
            }
            Err(e) => {
                tracing::warn!("Failed to look up push token for venue {}: {}", venue_id, e);
            }
        }

        // 3. Reconcile local state so the UI shows the reservation
        //    without a reload.
        session.add_reservation(reservation.clone());
        self.state = SubmissionState::Succeeded;

        tracing::info!("Reservation submitted: {}", reservation.id);
        Ok(reservation)
    }

    /// Hold the success indicator for the fixed display window, then
    /// clear the form, return to `Idle` and hand back the redirect
    /// target.
    pub async fn finish_success_display(&mut self) -> Redirect {
        tokio::time::sleep(SUCCESS_DISPLAY).await;
        self.form.clear();
        self.state = SubmissionState::Idle;
        Redirect::ReservationList
    }
}
