use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A collaboration booking request from a creator to a venue.
///
/// Created client-side at submission time; status transitions after
/// insert are driven by the venue owner, never by the requester's
/// submission workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub requester_id: Uuid,
    pub requester_name: String,
    /// Displayed date string, DD/MM/YYYY.
    pub date: String,
    /// Slot start, zero-padded "HH:MM".
    pub time: String,
    pub guests: GuestOption,
    pub content_types: Vec<ContentType>,
    pub timeframe: Timeframe,
    pub special_request: Option<String>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Render a date the way reservations display and persist it.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "completed" => Ok(ReservationStatus::Completed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(UnknownVariant("status", s.to_string())),
        }
    }
}

/// Party size: the creator comes alone or brings one guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestOption {
    Solo,
    PlusOne,
}

impl GuestOption {
    pub fn label(self) -> &'static str {
        match self {
            GuestOption::Solo => "Solo",
            GuestOption::PlusOne => "With a +1",
        }
    }
}

impl std::fmt::Display for GuestOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GuestOption::Solo => "solo",
            GuestOption::PlusOne => "plus_one",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for GuestOption {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solo" => Ok(GuestOption::Solo),
            "plus_one" => Ok(GuestOption::PlusOne),
            _ => Err(UnknownVariant("guests", s.to_string())),
        }
    }
}

/// Deliverable the creator commits to publishing. Multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    StoriesThreeToFour,
    StoriesFivePlus,
    Reel,
    Carousel,
    Post,
    TiktokReel,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::StoriesThreeToFour => "3-4 stories",
            ContentType::StoriesFivePlus => "5+ stories",
            ContentType::Reel => "1 reel",
            ContentType::Carousel => "1 carousel",
            ContentType::Post => "1 post",
            ContentType::TiktokReel => "1 TikTok reel",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentType::StoriesThreeToFour => "stories_three_to_four",
            ContentType::StoriesFivePlus => "stories_five_plus",
            ContentType::Reel => "reel",
            ContentType::Carousel => "carousel",
            ContentType::Post => "post",
            ContentType::TiktokReel => "tiktok_reel",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ContentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stories_three_to_four" => Ok(ContentType::StoriesThreeToFour),
            "stories_five_plus" => Ok(ContentType::StoriesFivePlus),
            "reel" => Ok(ContentType::Reel),
            "carousel" => Ok(ContentType::Carousel),
            "post" => Ok(ContentType::Post),
            "tiktok_reel" => Ok(ContentType::TiktokReel),
            _ => Err(UnknownVariant("content_type", s.to_string())),
        }
    }
}

/// How soon after the visit the content must be published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    OneToThreeDays,
    ThreeToSevenDays,
    SevenToFifteenDays,
}

impl Timeframe {
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::OneToThreeDays => "Within 1-3 days",
            Timeframe::ThreeToSevenDays => "Within 3-7 days",
            Timeframe::SevenToFifteenDays => "Within 7-15 days",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Timeframe::OneToThreeDays => "one_to_three_days",
            Timeframe::ThreeToSevenDays => "three_to_seven_days",
            Timeframe::SevenToFifteenDays => "seven_to_fifteen_days",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Timeframe {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_to_three_days" => Ok(Timeframe::OneToThreeDays),
            "three_to_seven_days" => Ok(Timeframe::ThreeToSevenDays),
            "seven_to_fifteen_days" => Ok(Timeframe::SevenToFifteenDays),
            _ => Err(UnknownVariant("timeframe", s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown {0} value: {1}")]
pub struct UnknownVariant(pub &'static str, pub String);
