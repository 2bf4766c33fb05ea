// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use classbook_domain::{BookingStatus, InstanceRef};

/// Decides the initial status of a new booking.
///
/// The decision is made against a confirmed-seat count read inside the same
/// per-instance critical section that will write the booking; two racing
/// requests can therefore never both observe the last free seat.
///
/// # Arguments
///
/// * `instance` - The resolved class instance (carries the capacity)
/// * `confirmed_count` - Current CONFIRMED bookings for the instance
/// * `waitlist_only` - Caller opted to queue even if a seat is free
///
/// # Returns
///
/// `BookingStatus::Confirmed` if a seat is free and the caller did not ask
/// for the waitlist, `BookingStatus::Waitlist` otherwise.
#[must_use]
pub fn decide_seat(instance: &InstanceRef, confirmed_count: u32, waitlist_only: bool) -> BookingStatus {
    if !waitlist_only && confirmed_count < instance.capacity() {
        BookingStatus::Confirmed
    } else {
        BookingStatus::Waitlist
    }
}
