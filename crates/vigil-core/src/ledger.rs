//! Activity ledger: one last-activity instant per user.
//!
//! Provides typed Rust structs over the `user_activity` table (never raw
//! rows). Upserts overwrite in place; the ledger never appends history and
//! never deletes. "Never active" is an explicit [`None`] from
//! [`ActivityLedger::get_last_activity`], not a zero sentinel, so a user
//! active at the epoch stays distinguishable from one never seen.

use crate::db;
use crate::error::StorageError;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// A projected row from the `user_activity` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecord {
    pub user_id: String,
    /// Epoch milliseconds of the most recent observed activity.
    pub last_activity_ms: i64,
}

/// Durable mapping `user_id -> last_activity_ms`.
///
/// The connection sits behind a mutex: upserts for the same user serialize
/// (last writer wins by arrival order), and readers always observe a
/// committed row, never a torn one. Upserts for different users contend on
/// the same lock, which is acceptable at this table's write rates.
#[derive(Debug)]
pub struct ActivityLedger {
    conn: Mutex<Connection>,
}

impl ActivityLedger {
    /// Open (or create) the ledger at `path` and migrate it to the latest
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened,
    /// configured, or migrated.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = db::open_ledger(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already-opened (and migrated) connection.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Insert a record for `user_id`, or overwrite `last_activity_ms` if one
    /// exists.
    ///
    /// Idempotent under retries: recording the same `(user_id, at_ms)` twice
    /// leaves the same final state as recording it once. An older timestamp
    /// overwrites a newer one by design (arrival order wins, not value).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] if the upsert fails; failed writes are
    /// never silently dropped.
    pub fn record_activity(&self, user_id: &str, at_ms: i64) -> Result<(), StorageError> {
        let conn = self.lock_conn();
        conn.execute(
            "INSERT INTO user_activity (user_id, last_activity_ms)
             VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET last_activity_ms = excluded.last_activity_ms",
            params![user_id, at_ms],
        )
        .map_err(|source| StorageError::Write {
            user_id: user_id.to_string(),
            source,
        })?;

        debug!(user_id, at_ms, "recorded activity");
        Ok(())
    }

    /// Return the stored instant for `user_id`, or `None` when the user has
    /// never been observed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the lookup fails.
    pub fn get_last_activity(&self, user_id: &str) -> Result<Option<i64>, StorageError> {
        let conn = self.lock_conn();
        conn.query_row(
            "SELECT last_activity_ms FROM user_activity WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| StorageError::Read {
            user_id: user_id.to_string(),
            source,
        })
    }

    /// Return a snapshot of every activity record, ordered by `user_id`.
    ///
    /// The ordering is not part of the contract, but a stable snapshot is:
    /// callers paginate over the returned vector and never re-query per row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::List`] if the scan fails.
    pub fn list_all(&self) -> Result<Vec<ActivityRecord>, StorageError> {
        let conn = self.lock_conn();
        let mut stmt = conn
            .prepare(
                "SELECT user_id, last_activity_ms FROM user_activity ORDER BY user_id ASC",
            )
            .map_err(StorageError::List)?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ActivityRecord {
                    user_id: row.get(0)?,
                    last_activity_ms: row.get(1)?,
                })
            })
            .map_err(StorageError::List)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StorageError::List)
    }

    /// Number of tracked users.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::List`] if the count fails.
    pub fn len(&self) -> Result<usize, StorageError> {
        let conn = self.lock_conn();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM user_activity", [], |row| row.get(0))
            .map_err(StorageError::List)?;
        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    /// True when no users are tracked yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::List`] if the count fails.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    fn lock_conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned mutex only means another thread panicked mid-call; the
        // connection itself is still transactionally consistent.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
