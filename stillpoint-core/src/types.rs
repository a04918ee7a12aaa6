//! Core domain types for stillpoint
//!
//! These types represent the canonical practice-journal data model that the
//! analytics engine aggregates over.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **PracticeSession** | One completed meditation/practice activity (tool, date, duration) |
//! | **JournalEntry** | A reflective note tied to a date, carrying mood/focus scores and tags |
//! | **Tool** | The practice aid used for a session (breathing, timer, body scan, ...) |
//! | **Streak** | A maximal run of consecutive calendar dates with at least one session |
//! | **View mode** | The metric a heatmap aggregates (duration, session count, mood) |
//!
//! A session and a journal entry may share a date but are not required to
//! align 1:1; the engine treats them as independent record streams.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Mood and focus scores are constrained to this inclusive range.
pub const SCORE_MIN: i64 = 1;
/// Upper bound for mood and focus scores.
pub const SCORE_MAX: i64 = 5;

// ============================================
// Practice sessions
// ============================================

/// One completed practice activity.
///
/// Sessions are immutable once created: they are recorded on practice
/// completion and never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSession {
    /// Unique identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Calendar date of the practice (date-only, UTC convention)
    pub date: NaiveDate,
    /// Practice aid used (e.g. "breathing", "timer")
    pub tool: String,
    /// Duration in seconds, never negative
    pub duration_secs: i64,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl PracticeSession {
    /// Create a new session record with a generated id.
    pub fn new(user_id: &str, date: NaiveDate, tool: &str, duration_secs: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            date,
            tool: tool.to_string(),
            duration_secs: duration_secs.max(0),
            created_at: Utc::now(),
        }
    }
}

// ============================================
// Journal entries
// ============================================

/// Who can see a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Only the author
    Private,
    /// Author's followers
    Followers,
    /// Anyone
    Public,
}

impl Visibility {
    /// Returns the identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Followers => "followers",
            Visibility::Public => "public",
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Visibility::Private),
            "followers" => Ok(Visibility::Followers),
            "public" => Ok(Visibility::Public),
            _ => Err(format!("unknown visibility: {}", s)),
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reflective journal note tied to a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Calendar date the entry reflects on
    pub date: NaiveDate,
    /// Mood score, 1-5
    pub mood: i64,
    /// Focus score, 1-5
    pub focus: i64,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Free-text body
    pub body: String,
    /// Who can see this entry
    pub visibility: Visibility,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Create a new journal entry with a generated id.
    pub fn new(user_id: &str, date: NaiveDate, mood: i64, focus: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            date,
            mood,
            focus,
            tags: Vec::new(),
            body: String::new(),
            visibility: Visibility::Private,
            created_at: Utc::now(),
        }
    }
}

// ============================================
// View mode
// ============================================

/// Metric selector for heatmap aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Sum of practice seconds per day
    Duration,
    /// Session count per day
    Sessions,
    /// Average journal mood per day
    Mood,
}

impl ViewMode {
    /// Returns the identifier used in cache keys and CLI arguments
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Duration => "duration",
            ViewMode::Sessions => "sessions",
            ViewMode::Mood => "mood",
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duration" => Ok(ViewMode::Duration),
            "sessions" => Ok(ViewMode::Sessions),
            "mood" => Ok(ViewMode::Mood),
            _ => Err(format!("unknown view mode: {}", s)),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// Date ranges
// ============================================

/// An inclusive calendar-date range `[start, end]`.
///
/// An inverted range (`start > end`) is representable and treated as empty
/// by consumers rather than rejected; analytics reads never fail on a
/// malformed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date in the range
    pub start: NaiveDate,
    /// Last date in the range
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from both endpoints.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether the range contains no dates.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
