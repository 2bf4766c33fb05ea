// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking ledger.
//!
//! Single source of truth for booking state and the only writer of it.
//! Each write runs inside the lock for its class instance and an
//! immediate transaction, so the capacity check and the row it justifies
//! commit atomically; the invariants in the domain model hold after every
//! committed transaction.

use crate::error::{LedgerError, translate_domain_error};
use crate::locks::{InstanceGuard, InstanceLocks};
use crate::promotion::{PromotedBooking, promote};
use classbook::decide_seat;
use classbook_domain::{
    Booking, BookingId, BookingStatus, ClassTemplate, InstanceRef, MemberId, TemplateId,
    resolve, validate_member_id,
};
use classbook_persistence::{
    NewBooking, Persistence, format_date, mutations, queries,
};
use diesel::connection::Connection;
use diesel::SqliteConnection;
use std::sync::Arc;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

/// Default bounded wait for a per-instance lock.
pub const DEFAULT_LOCK_WAIT: Duration = Duration::from_secs(2);

/// Attempts per write transaction before lock contention surfaces as `Busy`.
const WRITE_ATTEMPTS: u32 = 8;

/// Base delay between write transaction attempts, scaled by attempt number.
const WRITE_RETRY_DELAY: Duration = Duration::from_millis(10);

/// The outcome of a cancellation, including any promotion sweep it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationSummary {
    /// The cancelled booking.
    pub booking_id: BookingId,
    /// The affected instance's template.
    pub template_id: TemplateId,
    /// The affected instance's date.
    pub date: Date,
    /// Whether the cancelled booking had held a confirmed seat.
    pub was_confirmed: bool,
    /// Waitlisted bookings promoted into the vacated seats, in order.
    pub promoted: Vec<PromotedBooking>,
}

/// A consistent read of one class instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSnapshot {
    /// Current CONFIRMED bookings.
    pub confirmed_count: u32,
    /// Instance capacity.
    pub capacity: u32,
    /// WAITLIST bookings in arrival order.
    pub waitlist: Vec<Booking>,
    /// The caller's active booking, if any.
    pub caller_booking: Option<Booking>,
}

/// One day of availability for a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAvailability {
    /// The occurrence date.
    pub date: Date,
    /// Current CONFIRMED bookings.
    pub confirmed_count: u32,
    /// Instance capacity.
    pub capacity: u32,
    /// Current WAITLIST bookings.
    pub waitlist_count: u32,
    /// The caller's booking status for the day, if any.
    pub caller_status: Option<BookingStatus>,
}

/// The booking ledger.
///
/// Cheap to share behind an [`Arc`]; all methods take `&self`.
pub struct BookingLedger {
    persistence: Arc<Persistence>,
    locks: InstanceLocks,
}

impl BookingLedger {
    /// Creates a ledger with the default lock wait.
    #[must_use]
    pub fn new(persistence: Arc<Persistence>) -> Self {
        Self::with_lock_wait(persistence, DEFAULT_LOCK_WAIT)
    }

    /// Creates a ledger whose lock acquisitions wait at most `lock_wait`.
    #[must_use]
    pub fn with_lock_wait(persistence: Arc<Persistence>, lock_wait: Duration) -> Self {
        Self {
            persistence,
            locks: InstanceLocks::new(lock_wait),
        }
    }

    /// Creates a booking for a member in one class instance.
    ///
    /// Inside the instance's critical section: rejects duplicates, counts
    /// confirmed seats, and persists the booking as CONFIRMED if a seat is
    /// free (and the caller did not ask for the waitlist) or as WAITLIST
    /// appended behind all existing queue entries otherwise.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - malformed member id
    /// * `NotFound` - unknown template
    /// * `InactiveClass` - inactive template or weekday mismatch
    /// * `DuplicateBooking` - the member already holds an active booking
    /// * `Busy` - instance lock not acquired within the bounded wait
    /// * `Internal` - storage failure
    pub fn create_booking(
        &self,
        member_id: &MemberId,
        template_id: TemplateId,
        date: Date,
        waitlist_only: bool,
    ) -> Result<Booking, LedgerError> {
        validate_member_id(member_id).map_err(translate_domain_error)?;

        let mut conn = self.persistence.conn()?;
        let template: ClassTemplate = load_template(&mut conn, template_id)?;
        let instance: InstanceRef = resolve(&template, date).map_err(translate_domain_error)?;

        let _guard: InstanceGuard = self.locks.acquire(&instance)?;
        let class_date: String = format_date(date)?;

        let booking: Booking = run_write_transaction(&mut conn, |conn| {
            let existing: Option<Booking> = queries::find_active_booking(
                conn,
                member_id.value(),
                template_id.value(),
                &class_date,
            )?;
            if existing.is_some() {
                return Err(LedgerError::DuplicateBooking {
                    member_id: member_id.value().to_string(),
                    message: format!("already booked for {instance}"),
                });
            }

            let confirmed_count: u32 =
                queries::count_confirmed(conn, template_id.value(), &class_date)?;
            let status: BookingStatus = decide_seat(&instance, confirmed_count, waitlist_only);

            let created_seq: i64 = queries::next_created_seq(conn)?;
            let record: NewBooking = NewBooking {
                member_id: member_id.value().to_string(),
                template_id: template_id.value(),
                class_date: class_date.clone(),
                status: status.as_str().to_string(),
                created_seq,
                created_at: now_rfc3339()?,
                note: None,
            };
            let booking_id: i64 = mutations::insert_booking(conn, &record)?;

            queries::get_booking(conn, booking_id)?.ok_or_else(|| LedgerError::Internal {
                message: format!("booking {booking_id} vanished after insert"),
            })
        })?;

        info!(
            booking_id = booking.id.value(),
            member_id = %booking.member_id,
            instance = %instance,
            status = %booking.status,
            "Created booking"
        );
        Ok(booking)
    }

    /// Cancels a member's booking and redistributes a vacated seat.
    ///
    /// When the cancelled booking held a CONFIRMED seat, the promotion
    /// sweep runs inside the same transaction, so either both commit or
    /// neither does.
    ///
    /// A booking that does not exist, is already cancelled, or belongs to
    /// another member all fail identically with `NotFound`.
    ///
    /// # Errors
    ///
    /// * `NotFound` - see above
    /// * `Busy` - instance lock not acquired within the bounded wait
    /// * `Internal` - storage failure
    pub fn cancel_booking(
        &self,
        booking_id: BookingId,
        requesting_member: &MemberId,
    ) -> Result<CancellationSummary, LedgerError> {
        let mut conn = self.persistence.conn()?;

        // Unlocked peek to learn which instance to lock; ownership and
        // status are re-checked under the lock before anything is written.
        let peek: Booking = queries::get_booking(&mut conn, booking_id.value())?
            .ok_or_else(|| booking_not_found(booking_id))?;
        if peek.member_id != *requesting_member || !peek.status.is_active() {
            return Err(booking_not_found(booking_id));
        }

        // Cancellation must keep working after a template is deactivated,
        // so the instance is rebuilt from the stored booking rather than
        // passed through the resolver's active/weekday checks.
        let template: ClassTemplate = queries::get_template(&mut conn, peek.template_id.value())?
            .ok_or_else(|| LedgerError::Internal {
                message: format!("booking {booking_id} references missing template"),
            })?;
        let instance: InstanceRef = InstanceRef::new(template.id, peek.date, template.capacity);

        let _guard: InstanceGuard = self.locks.acquire(&instance)?;

        let summary: CancellationSummary =
            run_write_transaction(&mut conn, |conn| {
                let current: Booking = queries::get_booking(conn, booking_id.value())?
                    .ok_or_else(|| booking_not_found(booking_id))?;
                if current.member_id != *requesting_member || !current.status.is_active() {
                    return Err(booking_not_found(booking_id));
                }

                let was_confirmed: bool = current.status == BookingStatus::Confirmed;
                mutations::set_booking_status(
                    conn,
                    booking_id.value(),
                    BookingStatus::Cancelled,
                    current.note.as_deref(),
                )?;

                let promoted: Vec<PromotedBooking> = if was_confirmed {
                    promote(conn, &instance)?
                } else {
                    Vec::new()
                };

                Ok(CancellationSummary {
                    booking_id,
                    template_id: instance.template_id,
                    date: instance.date,
                    was_confirmed,
                    promoted,
                })
            })?;

        info!(
            booking_id = booking_id.value(),
            member_id = %requesting_member,
            instance = %instance,
            was_confirmed = summary.was_confirmed,
            promoted = summary.promoted.len(),
            "Cancelled booking"
        );
        Ok(summary)
    }

    /// Reads a consistent snapshot of one class instance.
    ///
    /// # Errors
    ///
    /// * `NotFound` - unknown template
    /// * `InactiveClass` - inactive template or weekday mismatch
    /// * `Internal` - storage failure
    pub fn query_instance(
        &self,
        template_id: TemplateId,
        date: Date,
        caller: Option<&MemberId>,
    ) -> Result<InstanceSnapshot, LedgerError> {
        let mut conn = self.persistence.conn()?;
        let template: ClassTemplate = load_template(&mut conn, template_id)?;
        let instance: InstanceRef = resolve(&template, date).map_err(translate_domain_error)?;
        let class_date: String = format_date(date)?;

        conn.transaction::<InstanceSnapshot, LedgerError, _>(|conn| {
            let confirmed_count: u32 =
                queries::count_confirmed(conn, template_id.value(), &class_date)?;
            let waitlist: Vec<Booking> =
                queries::waitlist_in_arrival_order(conn, template_id.value(), &class_date)?;
            let caller_booking: Option<Booking> = match caller {
                Some(member) => queries::find_active_booking(
                    conn,
                    member.value(),
                    template_id.value(),
                    &class_date,
                )?,
                None => None,
            };

            Ok(InstanceSnapshot {
                confirmed_count,
                capacity: instance.capacity(),
                waitlist,
                caller_booking,
            })
        })
    }

    /// Reads availability for every occurrence of a template in a range.
    ///
    /// Inactive templates have no occurrences and yield an empty list.
    ///
    /// # Errors
    ///
    /// * `NotFound` - unknown template
    /// * `InvalidInput` - inverted date range
    /// * `Internal` - storage failure
    pub fn get_availability(
        &self,
        template_id: TemplateId,
        from: Date,
        to: Date,
        caller: Option<&MemberId>,
    ) -> Result<Vec<DayAvailability>, LedgerError> {
        let mut conn = self.persistence.conn()?;
        let template: ClassTemplate = load_template(&mut conn, template_id)?;
        let dates: Vec<Date> = classbook_domain::instance_dates(&template, from, to)
            .map_err(translate_domain_error)?;

        conn.transaction::<Vec<DayAvailability>, LedgerError, _>(|conn| {
            dates
                .into_iter()
                .map(|date| {
                    day_availability(conn, &template, date, caller)
                })
                .collect()
        })
    }
}

/// Runs a write inside an immediate transaction, retrying on transient
/// `SQLite` lock contention.
///
/// The per-instance lock serializes writers of one instance, but writers
/// of *different* instances share the database and can still collide on
/// its internal locks, which `PRAGMA busy_timeout` does not cover between
/// shared-cache connections. Each attempt rolls back cleanly before the
/// next, so retrying re-runs the closure against a consistent view; only
/// contention that outlasts every attempt surfaces as `Busy`.
fn run_write_transaction<T>(
    conn: &mut SqliteConnection,
    mut op: impl FnMut(&mut SqliteConnection) -> Result<T, LedgerError>,
) -> Result<T, LedgerError> {
    let mut attempt: u32 = 1;
    loop {
        match conn.immediate_transaction::<T, LedgerError, _>(&mut op) {
            Err(LedgerError::Busy { message }) if attempt < WRITE_ATTEMPTS => {
                warn!(attempt, %message, "Write transaction contended, retrying");
                std::thread::sleep(WRITE_RETRY_DELAY * attempt);
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Reads one day's counts and the caller's status.
fn day_availability(
    conn: &mut SqliteConnection,
    template: &ClassTemplate,
    date: Date,
    caller: Option<&MemberId>,
) -> Result<DayAvailability, LedgerError> {
    let class_date: String = format_date(date)?;
    let template_id: i64 = template.id.value();

    let confirmed_count: u32 = queries::count_confirmed(conn, template_id, &class_date)?;
    let waitlist_count: u32 =
        queries::count_with_status(conn, template_id, &class_date, BookingStatus::Waitlist)?;
    let caller_status: Option<BookingStatus> = match caller {
        Some(member) => {
            queries::find_active_booking(conn, member.value(), template_id, &class_date)?
                .map(|booking| booking.status)
        }
        None => None,
    };

    Ok(DayAvailability {
        date,
        confirmed_count,
        capacity: template.capacity.seats(),
        waitlist_count,
        caller_status,
    })
}

/// Looks up a template, translating absence to the request-facing error.
fn load_template(
    conn: &mut SqliteConnection,
    template_id: TemplateId,
) -> Result<ClassTemplate, LedgerError> {
    queries::get_template(conn, template_id.value())?.ok_or_else(|| LedgerError::NotFound {
        message: format!("class template {template_id}"),
    })
}

fn booking_not_found(booking_id: BookingId) -> LedgerError {
    LedgerError::NotFound {
        message: format!("booking {booking_id}"),
    }
}

fn now_rfc3339() -> Result<String, LedgerError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| LedgerError::Internal {
            message: format!("timestamp formatting failed: {e}"),
        })
}
