// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::LedgerError;
use classbook_persistence::PersistenceError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

#[test]
fn test_locked_persistence_error_maps_to_busy() {
    let err: LedgerError =
        PersistenceError::Locked(String::from("database table is locked")).into();
    assert!(matches!(err, LedgerError::Busy { .. }));
}

#[test]
fn test_pool_exhausted_maps_to_busy() {
    let err: LedgerError = PersistenceError::PoolExhausted(String::from("timed out")).into();
    assert!(matches!(err, LedgerError::Busy { .. }));
}

#[test]
fn test_locked_diesel_error_maps_to_busy() {
    // The message SQLite raises between shared-cache connections, which
    // busy_timeout does not retry.
    let diesel_err = DieselError::DatabaseError(
        DatabaseErrorKind::Unknown,
        Box::new(String::from("database table is locked")),
    );
    let err: LedgerError = diesel_err.into();
    assert!(matches!(err, LedgerError::Busy { .. }));
}

#[test]
fn test_other_database_errors_map_to_internal() {
    let diesel_err = DieselError::DatabaseError(
        DatabaseErrorKind::UniqueViolation,
        Box::new(String::from("UNIQUE constraint failed: bookings.created_seq")),
    );
    let err: LedgerError = diesel_err.into();
    assert!(matches!(err, LedgerError::Internal { .. }));
}
