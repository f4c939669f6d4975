use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    LedgerOpenFailed,
    LedgerReadFailed,
    LedgerWriteFailed,
    SnapshotUnavailable,
    InvalidTimestamp,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::LedgerOpenFailed => "E2001",
            Self::LedgerReadFailed => "E2002",
            Self::LedgerWriteFailed => "E2003",
            Self::SnapshotUnavailable => "E3001",
            Self::InvalidTimestamp => "E4001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Project not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::LedgerOpenFailed => "Activity ledger open failed",
            Self::LedgerReadFailed => "Activity ledger read failed",
            Self::LedgerWriteFailed => "Activity ledger write failed",
            Self::SnapshotUnavailable => "Membership snapshot unavailable",
            Self::InvalidTimestamp => "Invalid activity timestamp",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `vg init` to initialize this directory."),
            Self::ConfigParseError => Some("Fix syntax in .vigil/config.toml and retry."),
            Self::LedgerOpenFailed => Some("Check that .vigil/activity.db is readable and writable."),
            Self::LedgerReadFailed => None,
            Self::LedgerWriteFailed => Some("Check disk space and write permissions."),
            Self::SnapshotUnavailable => {
                Some("Check .vigil/roster.toml exists and lists current members.")
            }
            Self::InvalidTimestamp => Some("Pass --at as an RFC 3339 timestamp."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the activity ledger.
///
/// Writes are never silently dropped: every failed upsert surfaces here and
/// the caller decides whether to retry or report.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("open activity ledger at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("read activity record for {user_id}: {source}")]
    Read {
        user_id: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("write activity record for {user_id}: {source}")]
    Write {
        user_id: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("list activity records: {0}")]
    List(#[source] rusqlite::Error),
}

impl StorageError {
    /// Machine-readable code associated with this storage error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Open { .. } => ErrorCode::LedgerOpenFailed,
            Self::Read { .. } | Self::List(_) => ErrorCode::LedgerReadFailed,
            Self::Write { .. } => ErrorCode::LedgerWriteFailed,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

/// Membership enumeration failed; the evaluation run that requested the
/// snapshot is aborted and reported.
#[derive(Debug, thiserror::Error)]
#[error("membership snapshot unavailable: {reason}")]
pub struct SnapshotError {
    pub reason: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SnapshotError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Machine-readable code associated with snapshot failures.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::SnapshotUnavailable
    }
}
