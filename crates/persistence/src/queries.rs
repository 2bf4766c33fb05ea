// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query operations.
//!
//! Callers that need a consistent snapshot across several of these queries
//! must run them inside one transaction; the functions themselves do not
//! open transactions.

use crate::data_models::{BookingRow, ClassTemplateRow};
use crate::diesel_schema::{bookings, class_templates};
use crate::error::PersistenceError;
use classbook_domain::{Booking, BookingStatus, ClassTemplate};
use diesel::dsl::max;
use diesel::prelude::*;

/// Looks up a class template by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_template(
    conn: &mut SqliteConnection,
    template_id: i64,
) -> Result<Option<ClassTemplate>, PersistenceError> {
    let row: Option<ClassTemplateRow> = class_templates::table
        .filter(class_templates::template_id.eq(template_id))
        .first::<ClassTemplateRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::query_failed("get_template", &e))?;

    row.map(ClassTemplateRow::into_domain).transpose()
}

/// Lists all class templates in the catalog.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_templates(
    conn: &mut SqliteConnection,
) -> Result<Vec<ClassTemplate>, PersistenceError> {
    let rows: Vec<ClassTemplateRow> = class_templates::table
        .order(class_templates::template_id.asc())
        .load::<ClassTemplateRow>(conn)
        .map_err(|e| PersistenceError::query_failed("list_templates", &e))?;

    rows.into_iter()
        .map(ClassTemplateRow::into_domain)
        .collect()
}

/// Counts bookings with the given status for one class instance.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_with_status(
    conn: &mut SqliteConnection,
    template_id: i64,
    class_date: &str,
    status: BookingStatus,
) -> Result<u32, PersistenceError> {
    let count: i64 = bookings::table
        .filter(bookings::template_id.eq(template_id))
        .filter(bookings::class_date.eq(class_date))
        .filter(bookings::status.eq(status.as_str()))
        .count()
        .get_result::<i64>(conn)
        .map_err(|e| PersistenceError::query_failed("count_with_status", &e))?;

    u32::try_from(count)
        .map_err(|_| PersistenceError::DataCorruption(format!("negative count {count}")))
}

/// Counts CONFIRMED bookings for one class instance.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_confirmed(
    conn: &mut SqliteConnection,
    template_id: i64,
    class_date: &str,
) -> Result<u32, PersistenceError> {
    count_with_status(conn, template_id, class_date, BookingStatus::Confirmed)
}

/// Finds a member's active (CONFIRMED or WAITLIST) booking for one instance.
///
/// At most one such booking can exist per the uniqueness invariant; this
/// query is how the ledger enforces it on create.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn find_active_booking(
    conn: &mut SqliteConnection,
    member_id: &str,
    template_id: i64,
    class_date: &str,
) -> Result<Option<Booking>, PersistenceError> {
    let row: Option<BookingRow> = bookings::table
        .filter(bookings::member_id.eq(member_id))
        .filter(bookings::template_id.eq(template_id))
        .filter(bookings::class_date.eq(class_date))
        .filter(bookings::status.ne(BookingStatus::Cancelled.as_str()))
        .first::<BookingRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::query_failed("find_active_booking", &e))?;

    row.map(BookingRow::into_domain).transpose()
}

/// Looks up a booking by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    let row: Option<BookingRow> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .first::<BookingRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::query_failed("get_booking", &e))?;

    row.map(BookingRow::into_domain).transpose()
}

/// Returns the WAITLIST bookings for one instance in arrival order.
///
/// Arrival order is ascending `created_seq`; FIFO promotion depends on it.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn waitlist_in_arrival_order(
    conn: &mut SqliteConnection,
    template_id: i64,
    class_date: &str,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::template_id.eq(template_id))
        .filter(bookings::class_date.eq(class_date))
        .filter(bookings::status.eq(BookingStatus::Waitlist.as_str()))
        .order(bookings::created_seq.asc())
        .load::<BookingRow>(conn)
        .map_err(|e| PersistenceError::query_failed("waitlist_in_arrival_order", &e))?;

    rows.into_iter().map(BookingRow::into_domain).collect()
}

/// Allocates the next logical sequence number.
///
/// Must be called inside the same transaction as the insert that uses it;
/// the transaction makes `max + 1` race-free.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn next_created_seq(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    let current_max: Option<i64> = bookings::table
        .select(max(bookings::created_seq))
        .first::<Option<i64>>(conn)
        .map_err(|e| PersistenceError::query_failed("next_created_seq", &e))?;

    Ok(current_max.unwrap_or(0) + 1)
}
