// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation operations.
//!
//! All invariant-checking writes are composed into transactions by the
//! booking ledger; these functions perform single statements.

use crate::data_models::{NewBooking, NewClassTemplate};
use crate::diesel_schema::{bookings, class_templates};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;
use classbook_domain::BookingStatus;
use diesel::prelude::*;

/// Inserts a class template and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_template(
    conn: &mut SqliteConnection,
    record: &NewClassTemplate,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(class_templates::table)
        .values(record)
        .execute(conn)
        .map_err(|e| PersistenceError::query_failed("insert_template", &e))?;

    get_last_insert_rowid(conn)
}

/// Inserts a booking row and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    record: &NewBooking,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(bookings::table)
        .values(record)
        .execute(conn)
        .map_err(|e| PersistenceError::query_failed("insert_booking", &e))?;

    get_last_insert_rowid(conn)
}

/// Sets a template's active flag.
///
/// Returns the number of rows updated (0 if the template does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_template_active(
    conn: &mut SqliteConnection,
    template_id: i64,
    active: bool,
) -> Result<usize, PersistenceError> {
    diesel::update(class_templates::table.filter(class_templates::template_id.eq(template_id)))
        .set(class_templates::active.eq(i32::from(active)))
        .execute(conn)
        .map_err(|e| PersistenceError::query_failed("set_template_active", &e))
}

/// Transitions a booking to a new status, replacing its note.
///
/// Returns the number of rows updated (0 if the booking does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_booking_status(
    conn: &mut SqliteConnection,
    booking_id: i64,
    new_status: BookingStatus,
    note: Option<&str>,
) -> Result<usize, PersistenceError> {
    diesel::update(bookings::table.filter(bookings::booking_id.eq(booking_id)))
        .set((
            bookings::status.eq(new_status.as_str()),
            bookings::note.eq(note),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::query_failed("set_booking_status", &e))
}
