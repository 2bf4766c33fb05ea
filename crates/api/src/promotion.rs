// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The promotion engine.
//!
//! Restores the capacity invariant's tightness after confirmed seats are
//! vacated: every currently free seat is filled from the waitlist in
//! arrival order, in one sweep.

use crate::error::LedgerError;
use classbook::{WaitlistEntry, plan_promotions};
use classbook_domain::{Booking, BookingId, InstanceRef, MemberId};
use classbook_persistence::{format_date, mutations, queries};
use diesel::SqliteConnection;
use tracing::info;

/// Note recorded on bookings the engine confirms.
const PROMOTION_NOTE: &str = "promoted from waitlist";

/// A booking the promotion engine transitioned WAITLIST → CONFIRMED.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotedBooking {
    /// The promoted booking.
    pub booking_id: BookingId,
    /// The member who now holds a confirmed seat.
    pub member_id: MemberId,
}

/// Runs one promotion sweep for a class instance.
///
/// Must be called inside the caller's transaction, under the instance
/// lock: the sweep and the cancellation that triggered it commit as one
/// atomic unit of work. Calling it with no free seats or an empty
/// waitlist is a safe no-op, which makes back-to-back sweeps idempotent.
///
/// # Errors
///
/// Returns an error if a query or status transition fails; the enclosing
/// transaction then rolls back and no partial promotion is visible.
pub fn promote(
    conn: &mut SqliteConnection,
    instance: &InstanceRef,
) -> Result<Vec<PromotedBooking>, LedgerError> {
    let class_date: String = format_date(instance.date)?;
    let template_id: i64 = instance.template_id.value();

    let confirmed_count: u32 = queries::count_confirmed(conn, template_id, &class_date)?;
    let waitlist: Vec<Booking> =
        queries::waitlist_in_arrival_order(conn, template_id, &class_date)?;

    let entries: Vec<WaitlistEntry> = waitlist
        .iter()
        .map(|booking| WaitlistEntry {
            booking_id: booking.id,
            created_seq: booking.created_seq,
        })
        .collect();

    let plan: Vec<BookingId> = plan_promotions(instance, confirmed_count, &entries);

    let mut promoted: Vec<PromotedBooking> = Vec::with_capacity(plan.len());
    for booking_id in plan {
        let updated: usize = mutations::set_booking_status(
            conn,
            booking_id.value(),
            classbook_domain::BookingStatus::Confirmed,
            Some(PROMOTION_NOTE),
        )?;
        if updated != 1 {
            return Err(LedgerError::Internal {
                message: format!("promotion lost booking {booking_id}"),
            });
        }

        // The plan was drawn from the waitlist we just loaded, so the
        // member id lookup cannot miss.
        if let Some(booking) = waitlist.iter().find(|b| b.id == booking_id) {
            info!(
                booking_id = booking_id.value(),
                member_id = %booking.member_id,
                instance = %instance,
                "Promoted booking from waitlist"
            );
            promoted.push(PromotedBooking {
                booking_id,
                member_id: booking.member_id.clone(),
            });
        }
    }

    Ok(promoted)
}
