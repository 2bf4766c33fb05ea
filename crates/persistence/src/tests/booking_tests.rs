// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_persistence, seed_booking, seed_monday_template};
use crate::{Persistence, mutations, queries};
use classbook_domain::{Booking, BookingStatus};

const DATE: &str = "2026-01-05";
const OTHER_DATE: &str = "2026-01-12";

#[test]
fn test_count_confirmed_is_scoped_to_one_instance() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();
    let template_id: i64 = seed_monday_template(&mut conn, 20);

    seed_booking(&mut conn, "m1", template_id, DATE, BookingStatus::Confirmed, 1);
    seed_booking(&mut conn, "m2", template_id, DATE, BookingStatus::Waitlist, 2);
    seed_booking(&mut conn, "m3", template_id, DATE, BookingStatus::Cancelled, 3);
    seed_booking(
        &mut conn,
        "m4",
        template_id,
        OTHER_DATE,
        BookingStatus::Confirmed,
        4,
    );

    assert_eq!(
        queries::count_confirmed(&mut conn, template_id, DATE).unwrap(),
        1
    );
    assert_eq!(
        queries::count_with_status(&mut conn, template_id, DATE, BookingStatus::Waitlist).unwrap(),
        1
    );
}

#[test]
fn test_find_active_booking_ignores_cancelled_history() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();
    let template_id: i64 = seed_monday_template(&mut conn, 20);

    seed_booking(&mut conn, "m1", template_id, DATE, BookingStatus::Cancelled, 1);
    assert!(
        queries::find_active_booking(&mut conn, "m1", template_id, DATE)
            .unwrap()
            .is_none()
    );

    let active_id: i64 =
        seed_booking(&mut conn, "m1", template_id, DATE, BookingStatus::Waitlist, 2);
    let found: Booking = queries::find_active_booking(&mut conn, "m1", template_id, DATE)
        .unwrap()
        .unwrap();
    assert_eq!(found.id.value(), active_id);
    assert_eq!(found.status, BookingStatus::Waitlist);
}

#[test]
fn test_waitlist_is_returned_in_arrival_order() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();
    let template_id: i64 = seed_monday_template(&mut conn, 20);

    // Insert out of arrival order on purpose.
    seed_booking(&mut conn, "late", template_id, DATE, BookingStatus::Waitlist, 30);
    seed_booking(&mut conn, "early", template_id, DATE, BookingStatus::Waitlist, 10);
    seed_booking(&mut conn, "middle", template_id, DATE, BookingStatus::Waitlist, 20);

    let waitlist: Vec<Booking> =
        queries::waitlist_in_arrival_order(&mut conn, template_id, DATE).unwrap();
    let members: Vec<&str> = waitlist.iter().map(|b| b.member_id.value()).collect();
    assert_eq!(members, vec!["early", "middle", "late"]);
}

#[test]
fn test_next_created_seq_is_strictly_increasing() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();
    let template_id: i64 = seed_monday_template(&mut conn, 20);

    assert_eq!(queries::next_created_seq(&mut conn).unwrap(), 1);
    seed_booking(&mut conn, "m1", template_id, DATE, BookingStatus::Confirmed, 1);
    assert_eq!(queries::next_created_seq(&mut conn).unwrap(), 2);
    seed_booking(&mut conn, "m2", template_id, DATE, BookingStatus::Waitlist, 7);
    assert_eq!(queries::next_created_seq(&mut conn).unwrap(), 8);
}

#[test]
fn test_set_booking_status_updates_status_and_note() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();
    let template_id: i64 = seed_monday_template(&mut conn, 20);
    let booking_id: i64 =
        seed_booking(&mut conn, "m1", template_id, DATE, BookingStatus::Waitlist, 1);

    let updated: usize = mutations::set_booking_status(
        &mut conn,
        booking_id,
        BookingStatus::Confirmed,
        Some("promoted from waitlist"),
    )
    .unwrap();
    assert_eq!(updated, 1);

    let booking: Booking = queries::get_booking(&mut conn, booking_id).unwrap().unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.note.as_deref(), Some("promoted from waitlist"));
}

#[test]
fn test_set_booking_status_returns_zero_for_unknown_booking() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();

    let updated: usize =
        mutations::set_booking_status(&mut conn, 424_242, BookingStatus::Cancelled, None).unwrap();
    assert_eq!(updated, 0);
}
