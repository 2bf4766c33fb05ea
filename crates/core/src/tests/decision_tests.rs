// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::decide_seat;
use crate::tests::helpers::create_test_instance;
use classbook_domain::{BookingStatus, InstanceRef};

#[test]
fn test_free_seat_confirms() {
    let instance: InstanceRef = create_test_instance(20);
    assert_eq!(decide_seat(&instance, 0, false), BookingStatus::Confirmed);
    assert_eq!(decide_seat(&instance, 19, false), BookingStatus::Confirmed);
}

#[test]
fn test_full_class_waitlists() {
    let instance: InstanceRef = create_test_instance(20);
    assert_eq!(decide_seat(&instance, 20, false), BookingStatus::Waitlist);
}

#[test]
fn test_overfull_class_waitlists() {
    // Counts above capacity should never happen, but the decision must
    // still not hand out a seat if they do.
    let instance: InstanceRef = create_test_instance(20);
    assert_eq!(decide_seat(&instance, 25, false), BookingStatus::Waitlist);
}

#[test]
fn test_waitlist_only_ignores_free_seats() {
    let instance: InstanceRef = create_test_instance(20);
    assert_eq!(decide_seat(&instance, 0, true), BookingStatus::Waitlist);
}

#[test]
fn test_capacity_one_boundary() {
    let instance: InstanceRef = create_test_instance(1);
    assert_eq!(decide_seat(&instance, 0, false), BookingStatus::Confirmed);
    assert_eq!(decide_seat(&instance, 1, false), BookingStatus::Waitlist);
}
