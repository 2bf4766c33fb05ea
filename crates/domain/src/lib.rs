// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod error;
mod resolver;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use resolver::{instance_dates, resolve};
pub use types::{
    Booking, BookingId, BookingStatus, Capacity, ClassTemplate, InstanceRef, MemberId, TemplateId,
};
pub use validation::{validate_member_id, validate_template_fields};
