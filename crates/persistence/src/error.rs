// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorInformation;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Checking out a pooled connection failed or timed out.
    PoolExhausted(String),
    /// The database or one of its tables is locked by a concurrent
    /// connection. Transient; the operation can be retried.
    Locked(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// The requested record was not found.
    NotFound(String),
    /// A stored value could not be decoded into its domain type.
    DataCorruption(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::PoolExhausted(msg) => write!(f, "Connection pool exhausted: {msg}"),
            Self::Locked(msg) => write!(f, "Database locked: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DataCorruption(msg) => write!(f, "Stored data is invalid: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl PersistenceError {
    /// Wraps a diesel error as `QueryFailed` with the failing operation's
    /// name, keeping lock contention distinct so it stays retryable.
    pub(crate) fn query_failed(operation: &str, err: &diesel::result::Error) -> Self {
        if let diesel::result::Error::DatabaseError(_, info) = err {
            if is_lock_contention(info.message()) {
                return Self::Locked(info.message().to_string());
            }
        }
        Self::QueryFailed(format!("{operation}: {err}"))
    }
}

/// Whether a database error message reports `SQLite` lock contention.
///
/// `SQLITE_BUSY` ("database is locked") and `SQLITE_LOCKED` ("database
/// table is locked", raised between shared-cache connections) both mean a
/// concurrent connection holds a lock right now. `PRAGMA busy_timeout`
/// retries the former but not the latter, so both must be recognized here
/// and surfaced as retryable.
#[must_use]
pub fn is_lock_contention(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database table is locked")
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(_, ref info)
                if is_lock_contention(info.message()) =>
            {
                Self::Locked(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for PersistenceError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::PoolExhausted(err.to_string())
    }
}
