// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the ledger boundary.

use classbook_domain::DomainError;
use classbook_persistence::PersistenceError;
use tracing::error;

/// Request-facing errors of the booking ledger.
///
/// Every error is terminal for the current request: a failed operation
/// commits nothing, so the invariants are exactly as they were before the
/// call. `Busy` is the only variant callers are expected to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The requested template, date, or booking does not exist — or the
    /// booking does not belong to the caller. Deliberately conflated so
    /// the existence of other members' bookings cannot be probed.
    NotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The member already holds an active booking for this instance.
    DuplicateBooking {
        /// The member attempting the duplicate booking.
        member_id: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The template is inactive or the date misses its weekday.
    InactiveClass {
        /// A human-readable description of the mismatch.
        message: String,
    },
    /// The instance lock could not be acquired within the bounded wait.
    /// Retry with backoff.
    Busy {
        /// The contended instance, for diagnostics.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An internal (storage) error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { message } => write!(f, "Not found: {message}"),
            Self::DuplicateBooking { member_id, message } => {
                write!(f, "Duplicate booking for member '{member_id}': {message}")
            }
            Self::InactiveClass { message } => write!(f, "Class not bookable: {message}"),
            Self::Busy { message } => write!(f, "Instance busy, retry: {message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Translates a domain error into its request-facing form.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> LedgerError {
    match err {
        DomainError::TemplateNotFound(id) => LedgerError::NotFound {
            message: format!("class template {id}"),
        },
        DomainError::InactiveTemplate(_) | DomainError::WeekdayMismatch { .. } => {
            LedgerError::InactiveClass {
                message: err.to_string(),
            }
        }
        DomainError::InvalidMemberId(_) => LedgerError::InvalidInput {
            field: String::from("member_id"),
            message: err.to_string(),
        },
        DomainError::InvalidCapacity { .. } => LedgerError::InvalidInput {
            field: String::from("capacity"),
            message: err.to_string(),
        },
        DomainError::InvalidTimeRange { .. } => LedgerError::InvalidInput {
            field: String::from("end_time"),
            message: err.to_string(),
        },
        DomainError::InvalidStatus(_) => LedgerError::InvalidInput {
            field: String::from("status"),
            message: err.to_string(),
        },
        DomainError::InvalidDateRange { .. } => LedgerError::InvalidInput {
            field: String::from("date_range"),
            message: err.to_string(),
        },
    }
}

impl From<PersistenceError> for LedgerError {
    fn from(err: PersistenceError) -> Self {
        match err {
            // Pool exhaustion and SQLite lock contention are contention
            // conditions, not faults: callers retry them exactly like a
            // lost lock race.
            PersistenceError::PoolExhausted(msg) => Self::Busy {
                message: format!("no database connection available: {msg}"),
            },
            PersistenceError::Locked(msg) => Self::Busy {
                message: format!("database lock contention: {msg}"),
            },
            _ => {
                error!(error = %err, "Persistence error");
                Self::Internal {
                    message: err.to_string(),
                }
            }
        }
    }
}

impl From<diesel::result::Error> for LedgerError {
    fn from(err: diesel::result::Error) -> Self {
        // Funnel through the persistence classification so a locked
        // database inside a transaction closure also surfaces as `Busy`.
        Self::from(PersistenceError::from(err))
    }
}
