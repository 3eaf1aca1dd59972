use async_trait::async_trait;
use uuid::Uuid;

use crate::reservation::{Reservation, ReservationStatus};
use crate::venue::Venue;

/// Repository trait for reservation data access
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn insert(
        &self,
        reservation: &Reservation,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn list_for_requester(
        &self,
        requester_id: Uuid,
    ) -> Result<Vec<Reservation>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn delete(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for venue data access
#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Venue>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Venue>, Box<dyn std::error::Error + Send + Sync>>;

    /// Push token of the venue owner's device, if one is registered.
    async fn push_token(
        &self,
        id: Uuid,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Repository trait for per-user favorite venues
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Add if absent, remove if present. Returns whether the venue is a
    /// favorite after the call.
    async fn toggle(
        &self,
        user_id: Uuid,
        venue_id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>, Box<dyn std::error::Error + Send + Sync>>;
}
