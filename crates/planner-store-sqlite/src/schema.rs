//! SQL schema for the planner SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS tasks (
    task_id              INTEGER PRIMARY KEY AUTOINCREMENT,
    title                TEXT NOT NULL,
    description          TEXT,
    is_recurring         INTEGER NOT NULL DEFAULT 0,
    is_completed         INTEGER NOT NULL DEFAULT 0,
    due_date             TEXT,            -- ISO calendar date; compares as text
    start_time           TEXT,            -- RFC 3339 UTC
    end_time             TEXT,
    time_tracked_seconds INTEGER NOT NULL DEFAULT 0,
    created_at           TEXT NOT NULL,   -- server-assigned
    recurrence_type      TEXT,            -- cadence tag, stored verbatim
    recurrence_group_id  TEXT             -- shared by a template and its siblings
);

CREATE TABLE IF NOT EXISTS events (
    event_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT,
    start_time  TEXT NOT NULL,
    end_time    TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS journal_entries (
    entry_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    entry_type TEXT NOT NULL,
    content    TEXT NOT NULL,    -- JSON payload, opaque to the store
    timestamp  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS tasks_group_idx       ON tasks(recurrence_group_id);
CREATE INDEX IF NOT EXISTS journal_timestamp_idx ON journal_entries(timestamp);

PRAGMA user_version = 1;
";
