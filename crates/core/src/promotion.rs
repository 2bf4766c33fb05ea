// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use classbook_domain::{BookingId, InstanceRef};

/// One waitlisted booking, as seen by the promotion planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitlistEntry {
    /// The waitlisted booking.
    pub booking_id: BookingId,
    /// Arrival order; lower is earlier.
    pub created_seq: i64,
}

/// Plans a promotion sweep for one class instance.
///
/// Selects the earliest-queued waitlist entries, ascending `created_seq`,
/// until every currently free seat is filled or the waitlist is exhausted.
/// A single sweep therefore promotes up to N members when N seats free up
/// at once; sweeping again immediately is a no-op because the second call
/// observes zero free seats.
///
/// # Arguments
///
/// * `instance` - The resolved class instance (carries the capacity)
/// * `confirmed_count` - Current CONFIRMED bookings for the instance
/// * `waitlist` - All WAITLIST bookings for the instance, any order
///
/// # Returns
///
/// The booking ids to transition WAITLIST → CONFIRMED, in promotion order.
/// Empty when no seat is free or the waitlist is empty.
#[must_use]
pub fn plan_promotions(
    instance: &InstanceRef,
    confirmed_count: u32,
    waitlist: &[WaitlistEntry],
) -> Vec<BookingId> {
    let capacity: u32 = instance.capacity();
    if confirmed_count >= capacity || waitlist.is_empty() {
        return Vec::new();
    }

    let free_seats: usize = usize::try_from(capacity - confirmed_count).unwrap_or(usize::MAX);

    let mut queue: Vec<WaitlistEntry> = waitlist.to_vec();
    queue.sort_by_key(|entry| entry.created_seq);

    queue
        .into_iter()
        .take(free_seats)
        .map(|entry| entry.booking_id)
        .collect()
}
