//! Calendar-correct date utilities
//!
//! Everything here works on `chrono::NaiveDate` at day granularity: no
//! time-of-day, no DST, no leap seconds. Two dates are "consecutive" iff
//! their day difference is exactly 1, and all ranges are inclusive on
//! both ends.

use chrono::{Datelike, Duration, NaiveDate, Utc};

/// Signed day count `b - a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Whether `b` is exactly the day after `a`.
pub fn is_consecutive(a: NaiveDate, b: NaiveDate) -> bool {
    days_between(a, b) == 1
}

/// The Sunday on or before January 1 of `year`.
///
/// Used as the origin of the 53-week heatmap grid so every year's grid
/// starts on a Sunday regardless of what weekday January 1 falls on.
pub fn start_of_week_aligned(year: i32) -> NaiveDate {
    // Jan 1 always exists for any in-range year chrono can represent.
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    let days_since_sunday = jan_first.weekday().num_days_from_sunday() as i64;
    jan_first - Duration::days(days_since_sunday)
}

/// First and last calendar day of `month` in `year` (month 1-12).
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first - Duration::days(1)))
}

/// Request-scoped "now" captured once.
///
/// The clock is read exactly once per request and passed down explicitly,
/// so a computation that straddles midnight stays internally consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestClock {
    /// Today's date in the service's UTC date-only convention
    pub today: NaiveDate,
    /// The day before `today`
    pub yesterday: NaiveDate,
}

impl RequestClock {
    /// Capture the current UTC date.
    pub fn capture() -> Self {
        Self::fixed(Utc::now().date_naive())
    }

    /// Build a clock anchored at an arbitrary date (for tests).
    pub fn fixed(today: NaiveDate) -> Self {
        Self {
            today,
            yesterday: today - Duration::days(1),
        }
    }
}
