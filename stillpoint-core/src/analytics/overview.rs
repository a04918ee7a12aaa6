//! Overview summarization
//!
//! Composes totals, streaks, mood averages, and favorite tools into one
//! response. Every sub-aggregation runs independently with no
//! cross-validation: a user with journals but no sessions gets zero
//! streak and duration alongside non-zero mood averages, which is correct.

use super::aggregate::{rank_tools, round1, ToolRank};
use super::datemath::RequestClock;
use super::streak;
use crate::types::{JournalEntry, PracticeSession};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary statistics for one user across all their records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    /// Count of unique dates with at least one session
    pub practice_days: i64,
    /// Sum of practice seconds
    pub total_duration_secs: i64,
    /// Total session count
    pub total_sessions: i64,
    /// Current streak per the streak detector
    pub current_streak_days: i64,
    /// Longest run of consecutive practice dates
    pub longest_streak_days: i64,
    /// Average mood over all journal entries, 0 when none exist
    pub avg_mood: f64,
    /// Average focus over all journal entries, 0 when none exist
    pub avg_focus: f64,
    /// Total journal entry count
    pub journal_count: i64,
    /// Favorite tools ranked by count, duration, then name
    pub favorite_tools: Vec<ToolRank>,
}

impl OverviewStats {
    /// Format total duration for display (e.g. "12h 45m").
    pub fn duration_display(&self) -> String {
        let hours = self.total_duration_secs / 3600;
        let mins = (self.total_duration_secs % 3600) / 60;
        if hours > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}m", mins)
        }
    }
}

/// Compose the overview from pre-fetched records.
pub fn summarize(
    sessions: &[PracticeSession],
    journals: &[JournalEntry],
    clock: RequestClock,
    top_tools_count: usize,
) -> OverviewStats {
    let unique_dates: BTreeSet<_> = sessions.iter().map(|s| s.date).collect();
    let streaks = streak::detect(unique_dates.iter().copied(), clock);

    let (avg_mood, avg_focus) = if journals.is_empty() {
        (0.0, 0.0)
    } else {
        let n = journals.len() as f64;
        let mood_sum: i64 = journals.iter().map(|j| j.mood).sum();
        let focus_sum: i64 = journals.iter().map(|j| j.focus).sum();
        (round1(mood_sum as f64 / n), round1(focus_sum as f64 / n))
    };

    OverviewStats {
        practice_days: unique_dates.len() as i64,
        total_duration_secs: sessions.iter().map(|s| s.duration_secs).sum(),
        total_sessions: sessions.len() as i64,
        current_streak_days: streaks.current_days,
        longest_streak_days: streaks.longest_days,
        avg_mood,
        avg_focus,
        journal_count: journals.len() as i64,
        favorite_tools: rank_tools(sessions, top_tools_count),
    }
}
