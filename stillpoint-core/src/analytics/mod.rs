//! Practice analytics engine
//!
//! Turns raw per-session practice records and per-day mood/focus journals
//! into derived views:
//! - Year heatmaps (53x7 Sunday-aligned calendar grids)
//! - Emotion calendars (per-date mood/focus averages)
//! - Streak detection (>=7-day intervals plus the current streak)
//! - Overview summaries (totals, averages, favorite tools)
//!
//! The engine is a stateless, read-time aggregator: it fetches records,
//! buckets them by day, and composes views. "Today" is captured once per
//! request ([`RequestClock`]) and passed down explicitly so a computation
//! that straddles midnight stays consistent. All date comparisons happen
//! at calendar-day granularity with ranges inclusive on both ends.

pub mod aggregate;
pub mod datemath;
pub mod emotion;
pub mod grid;
pub mod intensity;
pub mod overview;
pub mod service;
pub mod streak;

pub use aggregate::{aggregate, rank_tools, AggregatedPoint, Metric, ToolRank};
pub use datemath::{days_between, is_consecutive, start_of_week_aligned, RequestClock};
pub use emotion::{build_emotion_calendar, EmotionDay};
pub use grid::{generate_year_grid, grid_max, HeatmapCell, GRID_DAYS, GRID_WEEKS};
pub use intensity::{band, intensity};
pub use overview::{summarize, OverviewStats};
pub use service::{AnalyticsService, Window};
pub use streak::{detect, StreakInterval, StreakReport, MIN_REPORTED_STREAK_DAYS};
