// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::register_template;
use crate::ledger::BookingLedger;
use classbook_domain::{ClassTemplate, MemberId};
use classbook_persistence::Persistence;
use std::sync::Arc;
use time::macros::{date, time};
use time::Date;

/// A Monday in January 2026, matching the seeded template's weekday.
pub const MONDAY: Date = date!(2026 - 01 - 05);

/// Creates a ledger over a fresh in-memory database.
pub fn create_test_ledger() -> (Arc<Persistence>, BookingLedger) {
    let persistence: Arc<Persistence> = Arc::new(Persistence::new_in_memory().unwrap());
    let ledger: BookingLedger = BookingLedger::new(Arc::clone(&persistence));
    (persistence, ledger)
}

/// Registers a Monday 18:00 class with the given capacity.
pub fn seed_monday_class(persistence: &Persistence, capacity: u32) -> ClassTemplate {
    register_template(
        persistence,
        time::Weekday::Monday,
        time!(18:00),
        time!(19:30),
        capacity,
    )
    .unwrap()
}

/// Shorthand for building a member id.
pub fn member(id: &str) -> MemberId {
    MemberId::new(id)
}
