// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time, Weekday};

/// Represents a class template identifier (catalog-assigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(i64);

impl TemplateId {
    /// Creates a new template identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a booking identifier (ledger-assigned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(i64);

impl BookingId {
    /// Creates a new booking identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a member identifier.
///
/// Member identity is owned by an external directory; the core treats the
/// identifier as an opaque string. See [`crate::validate_member_id`] for the
/// constraints enforced at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    /// Creates a new member identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a class capacity (always positive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capacity(u32);

impl Capacity {
    /// Creates a new capacity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCapacity` if `seats` is zero.
    pub const fn new(seats: u32) -> Result<Self, DomainError> {
        if seats == 0 {
            return Err(DomainError::InvalidCapacity { capacity: seats });
        }
        Ok(Self(seats))
    }

    /// Returns the number of seats.
    #[must_use]
    pub const fn seats(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents the lifecycle state of a booking.
///
/// Transitions are one-way: `Waitlist` → `Confirmed` only via promotion,
/// anything → `Cancelled` only via explicit cancellation, and `Cancelled`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// The member holds a confirmed seat.
    Confirmed,
    /// The member is queued behind capacity, in arrival order.
    Waitlist,
    /// The booking was cancelled. Terminal.
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(Self::Confirmed),
            "WAITLIST" => Ok(Self::Waitlist),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BookingStatus {
    /// Converts this status to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Waitlist => "WAITLIST",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns whether this booking still claims a seat or queue position.
    ///
    /// Active bookings count toward the per-member uniqueness rule;
    /// cancelled bookings are history and do not.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Waitlist)
    }
}

/// A recurring weekly class definition.
///
/// Owned by the catalog collaborator; the ledger never mutates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTemplate {
    /// The catalog identifier.
    pub id: TemplateId,
    /// The weekday this class occurs on.
    pub weekday: Weekday,
    /// Class start time.
    pub start_time: Time,
    /// Class end time.
    pub end_time: Time,
    /// Seat capacity per occurrence.
    pub capacity: Capacity,
    /// Whether the template currently spawns occurrences.
    pub active: bool,
}

/// A resolved class instance: one dated occurrence of a template.
///
/// Instances are virtual — they are never persisted as their own rows.
/// The pair `(template_id, date)` is the unit capacity is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceRef {
    /// The owning template.
    pub template_id: TemplateId,
    /// The occurrence date.
    pub date: Date,
    capacity: Capacity,
}

impl InstanceRef {
    /// Creates an instance reference.
    ///
    /// Use [`crate::resolve`] instead of constructing one directly; the
    /// resolver enforces the weekday and active-template rules.
    #[must_use]
    pub const fn new(template_id: TemplateId, date: Date, capacity: Capacity) -> Self {
        Self {
            template_id,
            date,
            capacity,
        }
    }

    /// Returns the seat capacity of this instance (delegated to the template).
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity.seats()
    }
}

impl std::fmt::Display for InstanceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "template {} on {}", self.template_id, self.date)
    }
}

/// A member's claim on a seat (or queue position) in one class instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The ledger-assigned identifier.
    pub id: BookingId,
    /// The member who holds this booking.
    pub member_id: MemberId,
    /// The owning template of the booked instance.
    pub template_id: TemplateId,
    /// The date of the booked instance.
    pub date: Date,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Monotonic logical sequence number; total-orders same-instance
    /// bookings for FIFO promotion. Wall clocks can collide, this cannot.
    pub created_seq: i64,
    /// Wall-clock creation timestamp (ISO 8601), for display only.
    pub created_at: String,
    /// Optional origin/reason note (e.g. "promoted from waitlist").
    pub note: Option<String>,
}
