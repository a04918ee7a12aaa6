//! Time-series aggregation
//!
//! Groups dated records into per-day buckets and reduces each bucket with
//! a configurable metric. Only dates with at least one record are emitted;
//! zero-filling of gaps is the grid generator's job, done as an explicit
//! lookup-with-default rather than sparse access.

use crate::types::{DateRange, JournalEntry, PracticeSession};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Metric selector for per-day reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Sum of practice seconds (over sessions)
    DurationSum,
    /// Record count (over sessions)
    SessionCount,
    /// Average mood, rounded to 1 decimal (over journals)
    MoodAvg,
    /// Average focus, rounded to 1 decimal (over journals)
    FocusAvg,
}

/// One aggregated day: emitted only for dates with at least one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatedPoint {
    /// The calendar date of the bucket
    pub date: NaiveDate,
    /// Reduced value (whole seconds for sums, counts as-is, averages
    /// rounded half-up to 1 decimal)
    pub value: f64,
    /// Number of records that contributed to the bucket
    pub secondary_count: i64,
}

/// Round half-up to 1 decimal place.
///
/// Shared by every average in the engine so the aggregator and the emotion
/// calendar cannot drift apart. Inputs are never negative.
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Aggregate records into one point per distinct date in `range`.
///
/// Session metrics read `sessions`, journal metrics read `journals`; the
/// other stream is ignored. An inverted range yields an empty result, not
/// an error: analytics reads never break the surrounding page.
pub fn aggregate(
    metric: Metric,
    sessions: &[PracticeSession],
    journals: &[JournalEntry],
    range: DateRange,
) -> Vec<AggregatedPoint> {
    if range.is_empty() {
        return Vec::new();
    }

    match metric {
        Metric::DurationSum => reduce(
            sessions
                .iter()
                .filter(|s| range.contains(s.date))
                .map(|s| (s.date, s.duration_secs as f64)),
            Reducer::Sum,
        ),
        Metric::SessionCount => reduce(
            sessions
                .iter()
                .filter(|s| range.contains(s.date))
                .map(|s| (s.date, 1.0)),
            Reducer::Sum,
        ),
        Metric::MoodAvg => reduce(
            journals
                .iter()
                .filter(|j| range.contains(j.date))
                .map(|j| (j.date, j.mood as f64)),
            Reducer::Average,
        ),
        Metric::FocusAvg => reduce(
            journals
                .iter()
                .filter(|j| range.contains(j.date))
                .map(|j| (j.date, j.focus as f64)),
            Reducer::Average,
        ),
    }
}

enum Reducer {
    Sum,
    Average,
}

fn reduce(samples: impl Iterator<Item = (NaiveDate, f64)>, reducer: Reducer) -> Vec<AggregatedPoint> {
    // BTreeMap keeps the output ordered by date.
    let mut buckets: BTreeMap<NaiveDate, (f64, i64)> = BTreeMap::new();
    for (date, value) in samples {
        let bucket = buckets.entry(date).or_insert((0.0, 0));
        bucket.0 += value;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(date, (sum, count))| {
            let value = match reducer {
                Reducer::Sum => sum,
                Reducer::Average => round1(sum / count as f64),
            };
            AggregatedPoint {
                date,
                value,
                secondary_count: count,
            }
        })
        .collect()
}

// ============================================
// Tool ranking
// ============================================

/// One tool's usage totals, for favorite-tool rankings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToolRank {
    /// Tool name as recorded on sessions
    pub tool: String,
    /// Number of sessions using the tool
    pub count: i64,
    /// Total practice seconds with the tool
    pub total_duration_secs: i64,
}

/// Rank tools by session count.
///
/// Ties break by total duration descending, then tool name ascending, so
/// the ordering is deterministic rather than insertion order.
pub fn rank_tools(sessions: &[PracticeSession], limit: usize) -> Vec<ToolRank> {
    let mut totals: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for session in sessions {
        let entry = totals.entry(&session.tool).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += session.duration_secs;
    }

    let mut ranks: Vec<ToolRank> = totals
        .into_iter()
        .map(|(tool, (count, total_duration_secs))| ToolRank {
            tool: tool.to_string(),
            count,
            total_duration_secs,
        })
        .collect();

    ranks.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(b.total_duration_secs.cmp(&a.total_duration_secs))
            .then(a.tool.cmp(&b.tool))
    });
    ranks.truncate(limit);
    ranks
}
