use uuid::Uuid;
use venuelink_domain::reservation::{Reservation, ReservationStatus};

/// In-memory per-session application state: the reservation list the UI
/// renders and the user's favorite venues. Owned by one coordinating
/// module and passed explicitly to consumers; all mutation goes through
/// the methods here.
#[derive(Debug, Default)]
pub struct SessionState {
    reservations: Vec<Reservation>,
    favorite_venues: Vec<Uuid>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn add_reservation(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    /// Replace the list wholesale, e.g. after a read-path refresh.
    pub fn set_reservations(&mut self, reservations: Vec<Reservation>) {
        self.reservations = reservations;
    }

    pub fn update_reservation_status(&mut self, id: Uuid, status: ReservationStatus) -> bool {
        match self.reservations.iter_mut().find(|r| r.id == id) {
            Some(reservation) => {
                reservation.status = status;
                true
            }
            None => false,
        }
    }

    pub fn remove_reservation(&mut self, id: Uuid) -> bool {
        let before = self.reservations.len();
        self.reservations.retain(|r| r.id != id);
        self.reservations.len() < before
    }

    pub fn favorites(&self) -> &[Uuid] {
        &self.favorite_venues
    }

    pub fn is_favorite(&self, venue_id: Uuid) -> bool {
        self.favorite_venues.contains(&venue_id)
    }

    /// Toggle semantics; returns whether the venue is a favorite after
    /// the call.
    pub fn toggle_favorite(&mut self, venue_id: Uuid) -> bool {
        if let Some(pos) = self.favorite_venues.iter().position(|id| *id == venue_id) {
            self.favorite_venues.remove(pos);
            false
        } else {
            self.favorite_venues.push(venue_id);
            true
        }
    }
}
