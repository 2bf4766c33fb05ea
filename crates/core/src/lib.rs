// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure seat-allocation logic.
//!
//! This crate decides, given a consistent snapshot of one class instance,
//! what the ledger should write: whether a new booking lands CONFIRMED or
//! WAITLIST, and which waitlisted bookings a promotion sweep lifts into
//! freed seats. It performs no I/O; the persistence layer supplies the
//! counts and queue, and the ledger applies the decisions inside the same
//! transaction that produced the snapshot.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod decision;
mod promotion;

#[cfg(test)]
mod tests;

pub use decision::decide_seat;
pub use promotion::{WaitlistEntry, plan_promotions};
