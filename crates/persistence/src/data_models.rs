// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and the text codecs between stored columns and domain types.
//!
//! Dates, times, and weekdays are stored as ISO-style TEXT columns; the
//! codecs here are the single place those representations are decided.

use crate::error::PersistenceError;
use classbook_domain::{
    Booking, BookingId, BookingStatus, Capacity, ClassTemplate, MemberId, TemplateId,
};
use diesel::prelude::*;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time, Weekday};

/// Stored date format (`2026-01-05`).
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Stored time-of-day format (`18:00`).
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Formats a date for storage.
///
/// # Errors
///
/// Returns an error if formatting fails (the format is infallible for
/// calendar dates, but the API is fallible).
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("format_date: {e}")))
}

/// Parses a stored date column.
///
/// # Errors
///
/// Returns `DataCorruption` if the stored text is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, &DATE_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid date '{text}': {e}")))
}

/// Formats a time-of-day for storage.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_time(t: Time) -> Result<String, PersistenceError> {
    t.format(&TIME_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("format_time: {e}")))
}

/// Parses a stored time-of-day column.
///
/// # Errors
///
/// Returns `DataCorruption` if the stored text is not a valid time.
pub fn parse_time(text: &str) -> Result<Time, PersistenceError> {
    Time::parse(text, &TIME_FORMAT)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid time '{text}': {e}")))
}

/// Formats a weekday for storage.
#[must_use]
pub fn format_weekday(weekday: Weekday) -> String {
    weekday.to_string()
}

/// Parses a stored weekday column.
///
/// # Errors
///
/// Returns `DataCorruption` if the stored text is not an English weekday name.
pub fn parse_weekday(text: &str) -> Result<Weekday, PersistenceError> {
    match text {
        "Monday" => Ok(Weekday::Monday),
        "Tuesday" => Ok(Weekday::Tuesday),
        "Wednesday" => Ok(Weekday::Wednesday),
        "Thursday" => Ok(Weekday::Thursday),
        "Friday" => Ok(Weekday::Friday),
        "Saturday" => Ok(Weekday::Saturday),
        "Sunday" => Ok(Weekday::Sunday),
        _ => Err(PersistenceError::DataCorruption(format!(
            "invalid weekday '{text}'"
        ))),
    }
}

/// A stored class template row.
#[derive(Debug, Clone, Queryable)]
pub struct ClassTemplateRow {
    pub template_id: i64,
    pub weekday: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: i32,
    pub active: i32,
}

impl ClassTemplateRow {
    /// Converts the row into its domain type.
    ///
    /// # Errors
    ///
    /// Returns `DataCorruption` if a stored column fails to decode.
    pub fn into_domain(self) -> Result<ClassTemplate, PersistenceError> {
        let capacity: Capacity =
            Capacity::new(u32::try_from(self.capacity).unwrap_or(0)).map_err(|e| {
                PersistenceError::DataCorruption(format!(
                    "template {}: {e}",
                    self.template_id
                ))
            })?;

        Ok(ClassTemplate {
            id: TemplateId::new(self.template_id),
            weekday: parse_weekday(&self.weekday)?,
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
            capacity,
            active: self.active != 0,
        })
    }
}

/// An insertable class template.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::class_templates)]
pub struct NewClassTemplate {
    pub weekday: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: i32,
    pub active: i32,
}

/// A stored booking row.
#[derive(Debug, Clone, Queryable)]
pub struct BookingRow {
    pub booking_id: i64,
    pub member_id: String,
    pub template_id: i64,
    pub class_date: String,
    pub status: String,
    pub created_seq: i64,
    pub created_at: String,
    pub note: Option<String>,
}

impl BookingRow {
    /// Converts the row into its domain type.
    ///
    /// # Errors
    ///
    /// Returns `DataCorruption` if a stored column fails to decode.
    pub fn into_domain(self) -> Result<Booking, PersistenceError> {
        let status: BookingStatus = BookingStatus::from_str(&self.status).map_err(|e| {
            PersistenceError::DataCorruption(format!("booking {}: {e}", self.booking_id))
        })?;

        Ok(Booking {
            id: BookingId::new(self.booking_id),
            member_id: MemberId::new(self.member_id),
            template_id: TemplateId::new(self.template_id),
            date: parse_date(&self.class_date)?,
            status,
            created_seq: self.created_seq,
            created_at: self.created_at,
            note: self.note,
        })
    }
}

/// An insertable booking.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::bookings)]
pub struct NewBooking {
    pub member_id: String,
    pub template_id: i64,
    pub class_date: String,
    pub status: String,
    pub created_seq: i64,
    pub created_at: String,
    pub note: Option<String>,
}
