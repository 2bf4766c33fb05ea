// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation rules.

use crate::error::DomainError;
use crate::types::{ClassTemplate, MemberId};

/// Maximum accepted length for a member identifier.
const MAX_MEMBER_ID_LENGTH: usize = 64;

/// Validates a member identifier.
///
/// Member ids come from an external directory; the ledger only rejects
/// values that cannot possibly be real identifiers.
///
/// # Errors
///
/// Returns an error if the id is empty, longer than 64 characters, or
/// contains control characters.
pub fn validate_member_id(member_id: &MemberId) -> Result<(), DomainError> {
    let value: &str = member_id.value();

    if value.trim().is_empty() {
        return Err(DomainError::InvalidMemberId(
            "must not be empty".to_string(),
        ));
    }

    if value.len() > MAX_MEMBER_ID_LENGTH {
        return Err(DomainError::InvalidMemberId(format!(
            "must be at most {MAX_MEMBER_ID_LENGTH} characters"
        )));
    }

    if value.chars().any(char::is_control) {
        return Err(DomainError::InvalidMemberId(
            "must not contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates the field constraints of a class template.
///
/// Capacity positivity is already enforced by the `Capacity` type; this
/// checks the remaining cross-field rules.
///
/// # Errors
///
/// Returns an error if the end time is not after the start time.
pub fn validate_template_fields(template: &ClassTemplate) -> Result<(), DomainError> {
    if template.end_time <= template.start_time {
        return Err(DomainError::InvalidTimeRange {
            start: template.start_time,
            end: template.end_time,
        });
    }

    Ok(())
}
