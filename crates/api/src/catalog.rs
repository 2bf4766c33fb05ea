// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Class template catalog operations.
//!
//! The catalog owns template definitions; the ledger only reads them.
//! Templates are append-only from this crate's point of view: bookings
//! reference them by id, so they are never deleted.

use crate::error::{LedgerError, translate_domain_error};
use classbook_domain::{
    Capacity, ClassTemplate, TemplateId, validate_template_fields,
};
use classbook_persistence::{
    NewClassTemplate, Persistence, format_time, format_weekday, mutations, queries,
};
use time::{Time, Weekday};
use tracing::info;

/// Registers a new class template and returns it with its assigned id.
///
/// New templates start active.
///
/// # Errors
///
/// * `InvalidInput` - zero capacity or an end time not after the start time
/// * `Busy` - no database connection available
/// * `Internal` - storage failure
pub fn register_template(
    persistence: &Persistence,
    weekday: Weekday,
    start_time: Time,
    end_time: Time,
    capacity: u32,
) -> Result<ClassTemplate, LedgerError> {
    let capacity: Capacity = Capacity::new(capacity).map_err(translate_domain_error)?;

    let candidate: ClassTemplate = ClassTemplate {
        // Placeholder until the database assigns the real id.
        id: TemplateId::new(0),
        weekday,
        start_time,
        end_time,
        capacity,
        active: true,
    };
    validate_template_fields(&candidate).map_err(translate_domain_error)?;

    let capacity_column: i32 =
        i32::try_from(capacity.seats()).map_err(|_| LedgerError::InvalidInput {
            field: String::from("capacity"),
            message: format!("capacity {capacity} is out of range"),
        })?;

    let record: NewClassTemplate = NewClassTemplate {
        weekday: format_weekday(weekday),
        start_time: format_time(start_time)?,
        end_time: format_time(end_time)?,
        capacity: capacity_column,
        active: 1,
    };

    let mut conn = persistence.conn()?;
    let template_id: i64 = mutations::insert_template(&mut conn, &record)?;
    let template: ClassTemplate =
        queries::get_template(&mut conn, template_id)?.ok_or_else(|| LedgerError::Internal {
            message: format!("template {template_id} vanished after insert"),
        })?;

    info!(
        template_id = template_id,
        weekday = %format_weekday(weekday),
        capacity = capacity.seats(),
        "Registered class template"
    );
    Ok(template)
}

/// Activates or deactivates a class template.
///
/// Deactivation stops new bookings; existing bookings remain cancellable.
///
/// # Errors
///
/// * `NotFound` - unknown template
/// * `Busy` - no database connection available
/// * `Internal` - storage failure
pub fn set_template_active(
    persistence: &Persistence,
    template_id: TemplateId,
    active: bool,
) -> Result<(), LedgerError> {
    let mut conn = persistence.conn()?;
    let updated: usize = mutations::set_template_active(&mut conn, template_id.value(), active)?;
    if updated == 0 {
        return Err(LedgerError::NotFound {
            message: format!("class template {template_id}"),
        });
    }

    info!(template_id = template_id.value(), active, "Updated template active flag");
    Ok(())
}

/// Lists all class templates in the catalog, active and inactive.
///
/// # Errors
///
/// * `Busy` - no database connection available
/// * `Internal` - storage failure
pub fn list_templates(persistence: &Persistence) -> Result<Vec<ClassTemplate>, LedgerError> {
    let mut conn = persistence.conn()?;
    Ok(queries::list_templates(&mut conn)?)
}
