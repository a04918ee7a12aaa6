//! Repository layer over SQLite
//!
//! Supplies the two record streams the analytics engine aggregates over:
//! practice sessions and journal entries. Both fetch calls return records
//! unsorted; the engine sorts as needed.

use crate::error::{Error, Result};
use crate::types::{DateRange, JournalEntry, PracticeSession, Visibility, SCORE_MAX, SCORE_MIN};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

const DATE_FMT: &str = "%Y-%m-%d";

/// Database handle with connection pooling (single connection for now)
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for better concurrency
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    // ============================================
    // Practice session operations
    // ============================================

    /// Insert a practice session. Sessions are immutable once created.
    pub fn insert_session(&self, session: &PracticeSession) -> Result<()> {
        if session.duration_secs < 0 {
            return Err(Error::InvalidInput(format!(
                "duration must be >= 0, got {}",
                session.duration_secs
            )));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO practice_sessions (id, user_id, date, tool, duration_secs, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                session.id,
                session.user_id,
                session.date.format(DATE_FMT).to_string(),
                session.tool,
                session.duration_secs,
                session.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch all sessions for a user, optionally restricted to an inclusive
    /// date range. `None` means all-time. An inverted range returns nothing.
    pub fn fetch_sessions(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<PracticeSession>> {
        if let Some(r) = range {
            if r.is_empty() {
                return Ok(Vec::new());
            }
        }

        let conn = self.conn.lock().unwrap();
        let mut sessions = Vec::new();

        match range {
            Some(r) => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM practice_sessions
                     WHERE user_id = ?1 AND date >= ?2 AND date <= ?3",
                )?;
                let rows = stmt.query_map(
                    params![
                        user_id,
                        r.start.format(DATE_FMT).to_string(),
                        r.end.format(DATE_FMT).to_string(),
                    ],
                    Self::row_to_session,
                )?;
                for row in rows {
                    sessions.push(row?);
                }
            }
            None => {
                let mut stmt =
                    conn.prepare("SELECT * FROM practice_sessions WHERE user_id = ?1")?;
                let rows = stmt.query_map([user_id], Self::row_to_session)?;
                for row in rows {
                    sessions.push(row?);
                }
            }
        }

        Ok(sessions)
    }

    fn row_to_session(row: &Row) -> rusqlite::Result<PracticeSession> {
        let date_str: String = row.get("date")?;
        let created_at_str: String = row.get("created_at")?;

        Ok(PracticeSession {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: NaiveDate::parse_from_str(&date_str, DATE_FMT)
                .unwrap_or_else(|_| Utc::now().date_naive()),
            tool: row.get("tool")?,
            duration_secs: row.get("duration_secs")?,
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }

    // ============================================
    // Journal entry operations
    // ============================================

    /// Insert a journal entry. Mood and focus must be within 1-5.
    pub fn insert_journal(&self, entry: &JournalEntry) -> Result<()> {
        for (name, score) in [("mood", entry.mood), ("focus", entry.focus)] {
            if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
                return Err(Error::InvalidInput(format!(
                    "{} must be between {} and {}, got {}",
                    name, SCORE_MIN, SCORE_MAX, score
                )));
            }
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO journal_entries
                (id, user_id, date, mood, focus, tags, body, visibility, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                entry.id,
                entry.user_id,
                entry.date.format(DATE_FMT).to_string(),
                entry.mood,
                entry.focus,
                serde_json::to_string(&entry.tags)?,
                entry.body,
                entry.visibility.as_str(),
                entry.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Fetch all journal entries for a user, optionally restricted to an
    /// inclusive date range. `None` means all-time.
    pub fn fetch_journals(
        &self,
        user_id: &str,
        range: Option<DateRange>,
    ) -> Result<Vec<JournalEntry>> {
        if let Some(r) = range {
            if r.is_empty() {
                return Ok(Vec::new());
            }
        }

        let conn = self.conn.lock().unwrap();
        let mut entries = Vec::new();

        match range {
            Some(r) => {
                let mut stmt = conn.prepare(
                    "SELECT * FROM journal_entries
                     WHERE user_id = ?1 AND date >= ?2 AND date <= ?3",
                )?;
                let rows = stmt.query_map(
                    params![
                        user_id,
                        r.start.format(DATE_FMT).to_string(),
                        r.end.format(DATE_FMT).to_string(),
                    ],
                    Self::row_to_journal,
                )?;
                for row in rows {
                    entries.push(row?);
                }
            }
            None => {
                let mut stmt = conn.prepare("SELECT * FROM journal_entries WHERE user_id = ?1")?;
                let rows = stmt.query_map([user_id], Self::row_to_journal)?;
                for row in rows {
                    entries.push(row?);
                }
            }
        }

        Ok(entries)
    }

    fn row_to_journal(row: &Row) -> rusqlite::Result<JournalEntry> {
        let date_str: String = row.get("date")?;
        let created_at_str: String = row.get("created_at")?;
        let tags_str: String = row.get("tags")?;
        let visibility_str: String = row.get("visibility")?;

        Ok(JournalEntry {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: NaiveDate::parse_from_str(&date_str, DATE_FMT)
                .unwrap_or_else(|_| Utc::now().date_naive()),
            mood: row.get("mood")?,
            focus: row.get("focus")?,
            tags: serde_json::from_str(&tags_str).unwrap_or_default(),
            body: row.get("body")?,
            visibility: Visibility::from_str(&visibility_str).unwrap_or(Visibility::Private),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}
