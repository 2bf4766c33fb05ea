// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and instance resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Capacity must be a positive integer.
    InvalidCapacity {
        /// The rejected capacity value.
        capacity: u32,
    },
    /// Member identifier is empty or malformed.
    InvalidMemberId(String),
    /// Class end time is not after its start time.
    InvalidTimeRange {
        /// The class start time.
        start: time::Time,
        /// The class end time.
        end: time::Time,
    },
    /// No template exists with the given identifier.
    TemplateNotFound(i64),
    /// The template exists but is not active.
    InactiveTemplate(i64),
    /// The requested date does not fall on the template's weekday.
    WeekdayMismatch {
        /// The requested date.
        date: time::Date,
        /// The weekday the template runs on.
        template_weekday: time::Weekday,
    },
    /// Booking status string is not one of CONFIRMED/WAITLIST/CANCELLED.
    InvalidStatus(String),
    /// A date range query has `from` after `to`.
    InvalidDateRange {
        /// Range start.
        from: time::Date,
        /// Range end.
        to: time::Date,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCapacity { capacity } => {
                write!(f, "Invalid capacity: {capacity}. Must be greater than 0")
            }
            Self::InvalidMemberId(msg) => write!(f, "Invalid member id: {msg}"),
            Self::InvalidTimeRange { start, end } => {
                write!(f, "Class end time {end} must be after start time {start}")
            }
            Self::TemplateNotFound(id) => write!(f, "Class template {id} not found"),
            Self::InactiveTemplate(id) => write!(f, "Class template {id} is not active"),
            Self::WeekdayMismatch {
                date,
                template_weekday,
            } => {
                write!(
                    f,
                    "Date {date} is a {}, but the class runs on {template_weekday}",
                    date.weekday()
                )
            }
            Self::InvalidStatus(s) => write!(f, "Invalid booking status: '{s}'"),
            Self::InvalidDateRange { from, to } => {
                write!(f, "Invalid date range: {from} is after {to}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
