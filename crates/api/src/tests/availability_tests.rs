// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{MONDAY, create_test_ledger, member, seed_monday_class};
use crate::catalog::set_template_active;
use crate::error::LedgerError;
use crate::ledger::DayAvailability;
use classbook_domain::BookingStatus;
use time::macros::date;

#[test]
fn test_availability_enumerates_occurrences() {
    let (persistence, ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 12);

    let days: Vec<DayAvailability> = ledger
        .get_availability(
            template.id,
            date!(2026 - 01 - 01),
            date!(2026 - 01 - 31),
            None,
        )
        .unwrap();

    let dates: Vec<_> = days.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![
            date!(2026 - 01 - 05),
            date!(2026 - 01 - 12),
            date!(2026 - 01 - 19),
            date!(2026 - 01 - 26),
        ]
    );
    assert!(days.iter().all(|d| d.capacity == 12));
    assert!(days.iter().all(|d| d.confirmed_count == 0));
    assert!(days.iter().all(|d| d.waitlist_count == 0));
    assert!(days.iter().all(|d| d.caller_status.is_none()));
}

#[test]
fn test_availability_counts_and_caller_status() {
    let (persistence, ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 1);
    ledger
        .create_booking(&member("alice"), template.id, MONDAY, false)
        .unwrap();
    ledger
        .create_booking(&member("bob"), template.id, MONDAY, false)
        .unwrap();

    let days = ledger
        .get_availability(template.id, MONDAY, MONDAY, Some(&member("bob")))
        .unwrap();

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].confirmed_count, 1);
    assert_eq!(days[0].waitlist_count, 1);
    assert_eq!(days[0].caller_status, Some(BookingStatus::Waitlist));
}

#[test]
fn test_availability_ignores_cancelled_bookings() {
    let (persistence, ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 5);
    let booking = ledger
        .create_booking(&member("alice"), template.id, MONDAY, false)
        .unwrap();
    ledger.cancel_booking(booking.id, &member("alice")).unwrap();

    let days = ledger
        .get_availability(template.id, MONDAY, MONDAY, Some(&member("alice")))
        .unwrap();

    assert_eq!(days[0].confirmed_count, 0);
    assert!(days[0].caller_status.is_none());
}

#[test]
fn test_availability_inactive_template_is_empty() {
    let (persistence, ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 5);
    set_template_active(&persistence, template.id, false).unwrap();

    let days = ledger
        .get_availability(
            template.id,
            date!(2026 - 01 - 01),
            date!(2026 - 01 - 31),
            None,
        )
        .unwrap();

    assert!(days.is_empty());
}

#[test]
fn test_availability_inverted_range_rejected() {
    let (persistence, ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 5);

    let result = ledger.get_availability(
        template.id,
        date!(2026 - 01 - 31),
        date!(2026 - 01 - 01),
        None,
    );

    assert!(matches!(result, Err(LedgerError::InvalidInput { .. })));
}

#[test]
fn test_query_instance_waitlist_in_arrival_order() {
    let (persistence, ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 1);
    ledger
        .create_booking(&member("alice"), template.id, MONDAY, false)
        .unwrap();
    let first = ledger
        .create_booking(&member("bob"), template.id, MONDAY, false)
        .unwrap();
    let second = ledger
        .create_booking(&member("carol"), template.id, MONDAY, false)
        .unwrap();

    let snapshot = ledger.query_instance(template.id, MONDAY, None).unwrap();

    assert_eq!(snapshot.confirmed_count, 1);
    assert_eq!(snapshot.capacity, 1);
    let waitlist_ids: Vec<_> = snapshot.waitlist.iter().map(|b| b.id).collect();
    assert_eq!(waitlist_ids, vec![first.id, second.id]);
}

#[test]
fn test_query_instance_weekday_mismatch_rejected() {
    let (persistence, ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 5);

    let result = ledger.query_instance(template.id, date!(2026 - 01 - 06), None);

    assert!(matches!(result, Err(LedgerError::InactiveClass { .. })));
}
