use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use venuelink_domain::reservation::{
    display_date, ContentType, GuestOption, Reservation, ReservationStatus, Timeframe,
};

/// The in-progress booking form. Fields stay empty until the user picks
/// them; `is_valid` gates the submit action, so the presentation layer
/// can disable its control from the same predicate the workflow checks.
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub guests: Option<GuestOption>,
    pub content_types: Vec<ContentType>,
    pub timeframe: Option<Timeframe>,
    pub special_request: String,
}

impl ReservationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only when date, time, party size, at least one content type
    /// and a timeframe are all chosen.
    pub fn is_valid(&self) -> bool {
        self.date.is_some()
            && self.time.is_some()
            && self.guests.is_some()
            && !self.content_types.is_empty()
            && self.timeframe.is_some()
    }

    /// Picking a date invalidates the previously chosen slot, since the
    /// slot grid depends on the date's weekday.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.time = None;
    }

    pub fn select_time(&mut self, time: impl Into<String>) {
        self.time = Some(time.into());
    }

    /// Multi-select toggle: add if absent, remove if present.
    pub fn toggle_content_type(&mut self, content_type: ContentType) {
        if let Some(pos) = self.content_types.iter().position(|ct| *ct == content_type) {
            self.content_types.remove(pos);
        } else {
            self.content_types.push(content_type);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Materialize a pending reservation from the form, or `None` when
    /// the validity invariant does not hold.
    pub fn build(
        &self,
        venue_id: Uuid,
        requester_id: Uuid,
        requester_name: &str,
    ) -> Option<Reservation> {
        if !self.is_valid() {
            return None;
        }
        let special_request = self.special_request.trim();
        Some(Reservation {
            id: Uuid::new_v4(),
            venue_id,
            requester_id,
            requester_name: requester_name.to_string(),
            date: display_date(self.date?),
            time: self.time.clone()?,
            guests: self.guests?,
            content_types: self.content_types.clone(),
            timeframe: self.timeframe?,
            special_request: (!special_request.is_empty()).then(|| special_request.to_string()),
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        })
    }
}
