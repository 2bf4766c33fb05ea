// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire-facing request and response types.
//!
//! The transport layer deserializes into these and converts to domain
//! types at the boundary; nothing below this module sees raw strings for
//! dates, times, or weekdays.

use crate::ledger::{CancellationSummary, DayAvailability};
use classbook_domain::{Booking, ClassTemplate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time, Weekday};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]");

/// A request parameter that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    /// The date parameter is not `YYYY-MM-DD`.
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected value.
        value: String,
    },
    /// The time parameter is not `HH:MM`.
    #[error("invalid time '{value}': expected HH:MM")]
    InvalidTime {
        /// The rejected value.
        value: String,
    },
    /// The weekday parameter is not an English weekday name.
    #[error("invalid weekday '{value}': expected Monday..Sunday")]
    InvalidWeekday {
        /// The rejected value.
        value: String,
    },
}

/// Parses a `YYYY-MM-DD` request parameter.
///
/// # Errors
///
/// Returns `InvalidDate` if the value does not parse.
pub fn parse_date_param(value: &str) -> Result<Date, RequestValidationError> {
    Date::parse(value, &DATE_FORMAT).map_err(|_| RequestValidationError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parses an `HH:MM` request parameter.
///
/// # Errors
///
/// Returns `InvalidTime` if the value does not parse.
pub fn parse_time_param(value: &str) -> Result<Time, RequestValidationError> {
    Time::parse(value, &TIME_FORMAT).map_err(|_| RequestValidationError::InvalidTime {
        value: value.to_string(),
    })
}

/// Parses an English weekday name request parameter.
///
/// # Errors
///
/// Returns `InvalidWeekday` if the value is not a weekday name.
pub fn parse_weekday_param(value: &str) -> Result<Weekday, RequestValidationError> {
    match value {
        "Monday" => Ok(Weekday::Monday),
        "Tuesday" => Ok(Weekday::Tuesday),
        "Wednesday" => Ok(Weekday::Wednesday),
        "Thursday" => Ok(Weekday::Thursday),
        "Friday" => Ok(Weekday::Friday),
        "Saturday" => Ok(Weekday::Saturday),
        "Sunday" => Ok(Weekday::Sunday),
        _ => Err(RequestValidationError::InvalidWeekday {
            value: value.to_string(),
        }),
    }
}

fn date_text(date: Date) -> String {
    date.format(&DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

fn time_text(time: Time) -> String {
    time.format(&TIME_FORMAT)
        .unwrap_or_else(|_| time.to_string())
}

/// Request to create a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// The booking member.
    pub member_id: String,
    /// The class template to book.
    pub template_id: i64,
    /// The occurrence date, `YYYY-MM-DD`.
    pub date: String,
    /// Join the waitlist even if a seat is free.
    #[serde(default)]
    pub waitlist_only: bool,
}

/// Response to a successful booking creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    /// The created booking.
    pub booking: BookingInfo,
}

/// Request to cancel a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    /// The booking to cancel.
    pub booking_id: i64,
    /// The member requesting the cancellation; must own the booking.
    pub member_id: String,
}

/// Response to a successful cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelBookingResponse {
    /// The cancelled booking.
    pub booking_id: i64,
    /// Whether the booking had held a confirmed seat.
    pub was_confirmed: bool,
    /// Bookings promoted from the waitlist by this cancellation, in order.
    pub promoted_booking_ids: Vec<i64>,
}

impl From<&CancellationSummary> for CancelBookingResponse {
    fn from(summary: &CancellationSummary) -> Self {
        Self {
            booking_id: summary.booking_id.value(),
            was_confirmed: summary.was_confirmed,
            promoted_booking_ids: summary
                .promoted
                .iter()
                .map(|p| p.booking_id.value())
                .collect(),
        }
    }
}

/// One day of availability in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityDay {
    /// The occurrence date, `YYYY-MM-DD`.
    pub date: String,
    /// Current CONFIRMED bookings.
    pub confirmed_count: u32,
    /// Instance capacity.
    pub capacity: u32,
    /// Current WAITLIST bookings.
    pub waitlist_count: u32,
    /// The caller's booking status for the day, if any.
    pub caller_status: Option<String>,
}

impl From<&DayAvailability> for AvailabilityDay {
    fn from(day: &DayAvailability) -> Self {
        Self {
            date: date_text(day.date),
            confirmed_count: day.confirmed_count,
            capacity: day.capacity,
            waitlist_count: day.waitlist_count,
            caller_status: day.caller_status.map(|s| s.as_str().to_string()),
        }
    }
}

/// Response to an availability query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAvailabilityResponse {
    /// The queried template.
    pub template_id: i64,
    /// One entry per occurrence in the queried range, in date order.
    pub days: Vec<AvailabilityDay>,
}

/// Request to register a class template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterTemplateRequest {
    /// English weekday name, e.g. `Monday`.
    pub weekday: String,
    /// Class start time, `HH:MM`.
    pub start_time: String,
    /// Class end time, `HH:MM`.
    pub end_time: String,
    /// Seat capacity per occurrence; must be positive.
    pub capacity: u32,
}

/// Response to a successful template registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterTemplateResponse {
    /// The registered template.
    pub template: TemplateInfo,
}

/// Response listing the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTemplatesResponse {
    /// All templates, active and inactive, in id order.
    pub templates: Vec<TemplateInfo>,
}

/// A class template in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// The catalog identifier.
    pub template_id: i64,
    /// English weekday name.
    pub weekday: String,
    /// Class start time, `HH:MM`.
    pub start_time: String,
    /// Class end time, `HH:MM`.
    pub end_time: String,
    /// Seat capacity per occurrence.
    pub capacity: u32,
    /// Whether the template currently spawns occurrences.
    pub active: bool,
}

/// Converts a domain template into its response form.
#[must_use]
pub fn template_info(template: &ClassTemplate) -> TemplateInfo {
    TemplateInfo {
        template_id: template.id.value(),
        weekday: template.weekday.to_string(),
        start_time: time_text(template.start_time),
        end_time: time_text(template.end_time),
        capacity: template.capacity.seats(),
        active: template.active,
    }
}

/// A booking in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingInfo {
    /// The ledger-assigned identifier.
    pub booking_id: i64,
    /// The member who holds this booking.
    pub member_id: String,
    /// The owning template of the booked instance.
    pub template_id: i64,
    /// The date of the booked instance, `YYYY-MM-DD`.
    pub date: String,
    /// Current lifecycle status.
    pub status: String,
    /// Wall-clock creation timestamp (ISO 8601).
    pub created_at: String,
    /// Optional origin/reason note.
    pub note: Option<String>,
}

/// Converts a domain booking into its response form.
#[must_use]
pub fn booking_info(booking: &Booking) -> BookingInfo {
    BookingInfo {
        booking_id: booking.id.value(),
        member_id: booking.member_id.value().to_string(),
        template_id: booking.template_id.value(),
        date: date_text(booking.date),
        status: booking.status.as_str().to_string(),
        created_at: booking.created_at.clone(),
        note: booking.note.clone(),
    }
}
