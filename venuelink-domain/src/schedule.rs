use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Weekday labels in Monday-first order.
///
/// Calendar libraries index Sunday-first; `from_date` remaps so that
/// Monday=0 ... Sunday=6, which is the order venue schedules are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Weekday of a calendar date, Monday-first.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_monday() as usize]
    }

    /// Monday-first index, 0..=6.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a stored day label. Venue rows imported from the legacy
    /// dataset carry French labels, newer rows English ones.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "monday" | "lundi" => Some(Weekday::Monday),
            "tuesday" | "mardi" => Some(Weekday::Tuesday),
            "wednesday" | "mercredi" => Some(Weekday::Wednesday),
            "thursday" | "jeudi" => Some(Weekday::Thursday),
            "friday" | "vendredi" => Some(Weekday::Friday),
            "saturday" | "samedi" => Some(Weekday::Saturday),
            "sunday" | "dimanche" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

/// A wall-clock time within a single day. Venue-local, no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime(format!("{}:{}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    /// Parse "HH:MM" (also accepts a single-digit hour).
    pub fn parse(s: &str) -> Result<Self, ScheduleError> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| ScheduleError::InvalidTime(s.to_string()))?;
        let hour: u8 = h
            .parse()
            .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;
        let minute: u8 = m
            .parse()
            .map_err(|_| ScheduleError::InvalidTime(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One contiguous service window within a day, e.g. 12:00-14:30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningPeriod {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl OpeningPeriod {
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }
}

/// Opening hours for a single weekday: closed, or zero-or-more service
/// periods in day order (lunch and dinner service are separate periods).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayHours {
    Closed,
    Open(Vec<OpeningPeriod>),
}

impl DayHours {
    pub fn is_closed(&self) -> bool {
        matches!(self, DayHours::Closed)
    }

    /// Parse the compact per-day encoding: "12:00-14:30, 19:00-22:30",
    /// or a closed sentinel.
    pub fn parse(s: &str) -> Result<Self, ScheduleError> {
        if is_closed_sentinel(s) {
            return Ok(DayHours::Closed);
        }
        let mut periods = Vec::new();
        for part in s.split(',') {
            let (start, end) = part
                .trim()
                .split_once('-')
                .ok_or_else(|| ScheduleError::InvalidPeriodString(part.trim().to_string()))?;
            periods.push(OpeningPeriod::new(
                ClockTime::parse(start)?,
                ClockTime::parse(end)?,
            )?);
        }
        Ok(DayHours::Open(periods))
    }
}

/// The legacy dataset stores "Fermé"; newer rows use "Closed".
fn is_closed_sentinel(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "closed" | "fermé" | "ferme"
    )
}

/// Weekly opening hours: exactly one entry per weekday, Monday-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    days: [DayHours; 7],
}

impl WeeklySchedule {
    /// All seven days closed.
    pub fn closed() -> Self {
        Self {
            days: std::array::from_fn(|_| DayHours::Closed),
        }
    }

    pub fn set(&mut self, day: Weekday, hours: DayHours) {
        self.days[day.index()] = hours;
    }

    pub fn hours_for(&self, day: Weekday) -> &DayHours {
        &self.days[day.index()]
    }

    pub fn is_closed_on(&self, day: Weekday) -> bool {
        self.days[day.index()].is_closed()
    }

    /// Build from compact per-day strings, Monday-first. Missing days
    /// default to closed.
    pub fn from_compact<'a, I>(entries: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = (Weekday, &'a str)>,
    {
        let mut schedule = Self::closed();
        for (day, hours) in entries {
            schedule.set(day, DayHours::parse(hours)?);
        }
        Ok(schedule)
    }

    /// Build from the loosely-typed per-day JSON rows the venue table
    /// stores. Malformed rows are logged and treated as closed rather
    /// than failing the whole venue.
    pub fn from_rows(rows: &[serde_json::Value]) -> Self {
        let mut schedule = Self::closed();
        for row in rows {
            let parsed: OpeningHoursRow = match serde_json::from_value(row.clone()) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("skipping malformed opening-hours row: {}", e);
                    continue;
                }
            };
            let Some(day) = Weekday::parse(&parsed.day) else {
                tracing::warn!("skipping opening-hours row with unknown day {:?}", parsed.day);
                continue;
            };
            if parsed.is_closed {
                schedule.set(day, DayHours::Closed);
                continue;
            }
            let mut periods = Vec::new();
            for slot in &parsed.time_slots {
                match parse_slot(slot) {
                    Ok(period) => periods.push(period),
                    Err(e) => {
                        tracing::warn!("skipping malformed time slot on {}: {}", day.label(), e);
                    }
                }
            }
            schedule.set(day, DayHours::Open(periods));
        }
        schedule
    }
}

fn parse_slot(slot: &TimeSlotRow) -> Result<OpeningPeriod, ScheduleError> {
    OpeningPeriod::new(ClockTime::parse(&slot.open)?, ClockTime::parse(&slot.close)?)
}

/// Wire shape of one per-day row in the venue table's opening-hours
/// column: `{"day": "...", "isClosed": bool, "timeSlots": [{"open", "close"}]}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursRow {
    pub day: String,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub time_slots: Vec<TimeSlotRow>,
}

#[derive(Debug, Deserialize)]
pub struct TimeSlotRow {
    pub open: String,
    pub close: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid period: start {start} is not before end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("Invalid period string: {0}")]
    InvalidPeriodString(String),
}
