//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: Initial schema
    r#"
    CREATE TABLE IF NOT EXISTS practice_sessions (
        id               TEXT PRIMARY KEY,
        user_id          TEXT NOT NULL,
        date             TEXT NOT NULL,     -- ISO YYYY-MM-DD, date-only
        tool             TEXT NOT NULL,
        duration_secs    INTEGER NOT NULL CHECK (duration_secs >= 0),
        created_at       DATETIME NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_sessions_user_date
        ON practice_sessions(user_id, date);

    CREATE TABLE IF NOT EXISTS journal_entries (
        id               TEXT PRIMARY KEY,
        user_id          TEXT NOT NULL,
        date             TEXT NOT NULL,     -- ISO YYYY-MM-DD, date-only
        mood             INTEGER NOT NULL CHECK (mood BETWEEN 1 AND 5),
        focus            INTEGER NOT NULL CHECK (focus BETWEEN 1 AND 5),
        tags             JSON NOT NULL DEFAULT '[]',
        body             TEXT NOT NULL DEFAULT '',
        visibility       TEXT NOT NULL DEFAULT 'private',
        created_at       DATETIME NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_journals_user_date
        ON journal_entries(user_id, date);
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrations complete"
        );
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        // Run migrations twice - should be idempotent
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }

    #[test]
    fn test_tables_created() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        for table in ["practice_sessions", "journal_entries"] {
            let exists: i32 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
                    [table],
                    |r| r.get(0),
                )
                .unwrap();
            assert_eq!(exists, 1, "Table {} should exist", table);
        }
    }

    #[test]
    fn test_score_bounds_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO journal_entries (id, user_id, date, mood, focus, created_at)
             VALUES ('j1', 'u1', '2026-01-01', 9, 3, '2026-01-01T00:00:00Z')",
            [],
        );
        assert!(result.is_err(), "mood outside 1-5 should be rejected");
    }
}
