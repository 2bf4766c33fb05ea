// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The instance resolver.
//!
//! Class instances are virtual: a template spawns one occurrence per date
//! matching its weekday, for as long as the template is active. Resolution
//! is a pure function of template + date and is safe to call concurrently
//! without synchronization.

use crate::error::DomainError;
use crate::types::{ClassTemplate, InstanceRef};
use time::Date;

/// Resolves a dated occurrence of a class template.
///
/// # Arguments
///
/// * `template` - The class template (read-only catalog entry)
/// * `date` - The requested occurrence date
///
/// # Errors
///
/// Returns an error if:
/// - The template is not active
/// - `date` does not fall on the template's weekday
pub fn resolve(template: &ClassTemplate, date: Date) -> Result<InstanceRef, DomainError> {
    if !template.active {
        return Err(DomainError::InactiveTemplate(template.id.value()));
    }

    if date.weekday() != template.weekday {
        return Err(DomainError::WeekdayMismatch {
            date,
            template_weekday: template.weekday,
        });
    }

    Ok(InstanceRef::new(template.id, date, template.capacity))
}

/// Enumerates the occurrence dates of a template within an inclusive range.
///
/// Returns an empty vector for inactive templates. Used by availability
/// queries to expand a date range into resolvable instances.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `from` is after `to`.
pub fn instance_dates(
    template: &ClassTemplate,
    from: Date,
    to: Date,
) -> Result<Vec<Date>, DomainError> {
    if from > to {
        return Err(DomainError::InvalidDateRange { from, to });
    }

    if !template.active {
        return Ok(Vec::new());
    }

    let mut dates: Vec<Date> = Vec::new();
    let mut current: Date = from;
    // Skip ahead to the first matching weekday, then step a week at a time.
    while current.weekday() != template.weekday {
        match current.next_day() {
            Some(next) if next <= to => current = next,
            _ => return Ok(dates),
        }
    }
    while current <= to {
        dates.push(current);
        match current.checked_add(time::Duration::weeks(1)) {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(dates)
}
