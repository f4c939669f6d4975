//! Canonical SQLite schema for the activity ledger.
//!
//! One row per tracked user:
//! - `user_activity` keeps only the most recent activity instant; upserts
//!   overwrite in place, nothing is appended or deleted
//! - `ledger_meta` tracks the applied schema version for diagnostics

/// Migration v1: the activity table plus ledger metadata.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS user_activity (
    user_id TEXT PRIMARY KEY CHECK (length(trim(user_id)) > 0),
    last_activity_ms INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS ledger_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL
);

INSERT OR IGNORE INTO ledger_meta (id, schema_version) VALUES (1, 1);
";

/// Migration v2: index the activity instant for threshold scans.
pub const MIGRATION_V2_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_user_activity_last_activity
    ON user_activity(last_activity_ms);
";

/// Indexes that must exist after migrating to the latest version.
pub const REQUIRED_INDEXES: &[&str] = &["idx_user_activity_last_activity"];
