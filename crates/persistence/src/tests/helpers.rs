// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::data_models::{NewBooking, NewClassTemplate};
use crate::{DbConnection, Persistence, mutations};
use classbook_domain::BookingStatus;

/// Creates an in-memory persistence adapter for a test.
pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

/// Seeds a Monday 18:00 class with the given capacity; returns its id.
pub fn seed_monday_template(conn: &mut DbConnection, capacity: i32) -> i64 {
    mutations::insert_template(
        conn,
        &NewClassTemplate {
            weekday: String::from("Monday"),
            start_time: String::from("18:00"),
            end_time: String::from("19:30"),
            capacity,
            active: 1,
        },
    )
    .unwrap()
}

/// Inserts a booking row with the given status and sequence number.
pub fn seed_booking(
    conn: &mut DbConnection,
    member_id: &str,
    template_id: i64,
    class_date: &str,
    status: BookingStatus,
    created_seq: i64,
) -> i64 {
    mutations::insert_booking(
        conn,
        &NewBooking {
            member_id: member_id.to_string(),
            template_id,
            class_date: class_date.to_string(),
            status: status.as_str().to_string(),
            created_seq,
            created_at: String::from("2026-01-01T00:00:00Z"),
            note: None,
        },
    )
    .unwrap()
}
