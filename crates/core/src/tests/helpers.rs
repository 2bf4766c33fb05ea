// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::WaitlistEntry;
use classbook_domain::{BookingId, Capacity, InstanceRef, TemplateId};
use time::macros::date;

/// Builds an instance of a Monday class with the given capacity.
pub fn create_test_instance(capacity: u32) -> InstanceRef {
    InstanceRef::new(
        TemplateId::new(1),
        date!(2026 - 01 - 05),
        Capacity::new(capacity).unwrap(),
    )
}

/// Builds a waitlist entry.
pub fn entry(id: i64, seq: i64) -> WaitlistEntry {
    WaitlistEntry {
        booking_id: BookingId::new(id),
        created_seq: seq,
    }
}
