// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking ledger and promotion engine.
//!
//! This crate is the only writer of booking state. Every invariant-checking
//! write runs as: per-instance lock → pooled connection → immediate
//! transaction → pure decision (from the `classbook` core) → mutation.
//! Writes against different class instances proceed fully in parallel;
//! writes against the same instance are mutually exclusive, with a bounded
//! wait that fails as `Busy` rather than blocking indefinitely.

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

mod catalog;
mod error;
mod ledger;
mod locks;
mod promotion;
mod request_response;

#[cfg(test)]
mod tests;

pub use catalog::{list_templates, register_template, set_template_active};
pub use error::{LedgerError, translate_domain_error};
pub use ledger::{
    BookingLedger, CancellationSummary, DEFAULT_LOCK_WAIT, DayAvailability, InstanceSnapshot,
};
pub use promotion::PromotedBooking;
pub use request_response::{
    AvailabilityDay, BookingInfo, CancelBookingRequest, CancelBookingResponse,
    CreateBookingRequest, CreateBookingResponse, GetAvailabilityResponse, ListTemplatesResponse,
    RegisterTemplateRequest, RegisterTemplateResponse, RequestValidationError, TemplateInfo,
    booking_info, parse_date_param, parse_time_param, parse_weekday_param, template_info,
};
