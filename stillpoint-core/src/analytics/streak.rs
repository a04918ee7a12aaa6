//! Streak detection over practice dates
//!
//! The single streak implementation for the whole system: the overview,
//! the CLI, and any other consumer read these results rather than
//! re-deriving their own, so "current streak" can never disagree with
//! itself across surfaces.

use super::datemath::{is_consecutive, RequestClock};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Historical streaks shorter than this are not reported as intervals.
/// The current-streak scalar has no floor.
pub const MIN_REPORTED_STREAK_DAYS: i64 = 7;

/// A maximal run of consecutive practice dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInterval {
    /// First date of the run
    pub start: NaiveDate,
    /// Last date of the run
    pub end: NaiveDate,
    /// Number of days, `days_between(start, end) + 1`
    pub length: i64,
}

/// Everything the detector derives from one date set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakReport {
    /// All maximal runs of length >= [`MIN_REPORTED_STREAK_DAYS`]
    pub intervals: Vec<StreakInterval>,
    /// Longest run length regardless of the reporting floor
    pub longest_days: i64,
    /// Current streak anchored at today or yesterday; 0 when neither
    /// date has practice
    pub current_days: i64,
}

/// Scan a set of practice dates and report streaks.
///
/// Input order and duplicates are irrelevant; dates are deduplicated and
/// sorted internally, so the result is idempotent under reordering.
pub fn detect(dates: impl IntoIterator<Item = NaiveDate>, clock: RequestClock) -> StreakReport {
    let unique: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut intervals = Vec::new();
    let mut longest_days = 0i64;

    let mut run_start: Option<NaiveDate> = None;
    let mut prev: Option<NaiveDate> = None;

    let flush = |start: Option<NaiveDate>, end: Option<NaiveDate>,
                     intervals: &mut Vec<StreakInterval>,
                     longest: &mut i64| {
        if let (Some(start), Some(end)) = (start, end) {
            let length = (end - start).num_days() + 1;
            *longest = (*longest).max(length);
            if length >= MIN_REPORTED_STREAK_DAYS {
                intervals.push(StreakInterval { start, end, length });
            }
        }
    };

    for &date in &unique {
        match prev {
            Some(p) if is_consecutive(p, date) => {}
            _ => {
                flush(run_start, prev, &mut intervals, &mut longest_days);
                run_start = Some(date);
            }
        }
        prev = Some(date);
    }
    flush(run_start, prev, &mut intervals, &mut longest_days);

    StreakReport {
        intervals,
        longest_days,
        current_days: current_streak(&unique, clock),
    }
}

/// Backward walk from today (or yesterday when today has no practice yet).
///
/// A single missing date ends the walk immediately; the walk never skips
/// a day.
fn current_streak(dates: &BTreeSet<NaiveDate>, clock: RequestClock) -> i64 {
    let anchor = if dates.contains(&clock.today) {
        clock.today
    } else if dates.contains(&clock.yesterday) {
        clock.yesterday
    } else {
        return 0;
    };

    let mut count = 0i64;
    let mut cursor = anchor;
    while dates.contains(&cursor) {
        count += 1;
        cursor = cursor - Duration::days(1);
    }
    count
}
