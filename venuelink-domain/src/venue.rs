use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::WeeklySchedule;

/// A business offering collaboration slots to creators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub venue_type: String,
    pub category: String,
    pub location: String,
    /// What the venue offers creators in exchange for content.
    pub offer: String,
    pub photos: Vec<String>,
    /// Push token of the owner's device, when one is registered.
    pub push_token: Option<String>,
    pub schedule: WeeklySchedule,
}
