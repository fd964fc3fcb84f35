//! SQL schema for the Wont SQLite store.
//!
//! Executed at every connection startup; the DDL is idempotent. Future
//! migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS habits (
    name              TEXT PRIMARY KEY,
    description       TEXT NOT NULL,
    periodicity       TEXT NOT NULL,   -- 'daily' | 'weekly'
    created_at        TEXT NOT NULL,   -- ISO 8601 UTC
    current_streak    INTEGER NOT NULL DEFAULT 0,
    last_completed_at TEXT             -- ISO 8601 UTC; NULL before the first completion
);

-- Completion events are strictly append-only.
-- No UPDATE is ever issued against this table; rows are removed only when
-- the owning habit is deleted, and then all of them together.
CREATE TABLE IF NOT EXISTS events (
    habit_name  TEXT NOT NULL REFERENCES habits(name),
    occurred_at TEXT NOT NULL,         -- ISO 8601 UTC; caller-supplied
    streak      INTEGER NOT NULL       -- streak snapshot computed at insertion
);

CREATE INDEX IF NOT EXISTS events_habit_idx  ON events(habit_name);
CREATE INDEX IF NOT EXISTS events_streak_idx ON events(streak);

PRAGMA user_version = 1;
";
