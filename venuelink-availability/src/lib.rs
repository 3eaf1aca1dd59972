pub mod engine;

pub use engine::{bookable_dates, bookable_slots, DEFAULT_HORIZON_DAYS, SLOT_INTERVAL_MINUTES};
