use std::sync::Arc;
use tokio::sync::Mutex;
use venuelink_booking::SessionState;
use venuelink_domain::notify::PushRelay;
use venuelink_domain::repository::{FavoriteRepository, ReservationRepository, VenueRepository};
use venuelink_store::config::BookingRules;

#[derive(Clone)]
pub struct AppState {
    pub reservations: Arc<dyn ReservationRepository>,
    pub venues: Arc<dyn VenueRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub push: Arc<dyn PushRelay>,
    /// In-memory reservation/favorite list mirror. One logical event
    /// loop mutates it; the mutex only serializes handler turns.
    pub session: Arc<Mutex<SessionState>>,
    pub booking_rules: BookingRules,
}
