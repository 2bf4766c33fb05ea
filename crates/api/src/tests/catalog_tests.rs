// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_ledger, seed_monday_class};
use crate::catalog::{list_templates, register_template, set_template_active};
use crate::error::LedgerError;
use crate::request_response::{template_info, TemplateInfo};
use classbook_domain::TemplateId;
use time::macros::time;
use time::Weekday;

#[test]
fn test_register_and_list_templates() {
    let (persistence, _ledger) = create_test_ledger();

    let monday = seed_monday_class(&persistence, 10);
    let friday = register_template(
        &persistence,
        Weekday::Friday,
        time!(07:30),
        time!(08:30),
        8,
    )
    .unwrap();

    assert!(monday.active);
    assert_eq!(friday.weekday, Weekday::Friday);
    assert_eq!(friday.capacity.seats(), 8);

    let templates = list_templates(&persistence).unwrap();
    let ids: Vec<TemplateId> = templates.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![monday.id, friday.id]);
}

#[test]
fn test_register_zero_capacity_rejected() {
    let (persistence, _ledger) = create_test_ledger();

    let result = register_template(
        &persistence,
        Weekday::Monday,
        time!(18:00),
        time!(19:30),
        0,
    );

    assert!(matches!(result, Err(LedgerError::InvalidInput { .. })));
}

#[test]
fn test_register_end_not_after_start_rejected() {
    let (persistence, _ledger) = create_test_ledger();

    let result = register_template(
        &persistence,
        Weekday::Monday,
        time!(18:00),
        time!(18:00),
        10,
    );

    assert!(matches!(result, Err(LedgerError::InvalidInput { .. })));
}

#[test]
fn test_set_template_active_round_trip() {
    let (persistence, _ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 10);

    set_template_active(&persistence, template.id, false).unwrap();
    let templates = list_templates(&persistence).unwrap();
    assert!(!templates[0].active);

    set_template_active(&persistence, template.id, true).unwrap();
    let templates = list_templates(&persistence).unwrap();
    assert!(templates[0].active);
}

#[test]
fn test_set_template_active_unknown_not_found() {
    let (persistence, _ledger) = create_test_ledger();

    let result = set_template_active(&persistence, TemplateId::new(404), false);

    assert!(matches!(result, Err(LedgerError::NotFound { .. })));
}

#[test]
fn test_template_info_formats_times() {
    let (persistence, _ledger) = create_test_ledger();
    let template = seed_monday_class(&persistence, 10);

    let info: TemplateInfo = template_info(&template);

    assert_eq!(info.weekday, "Monday");
    assert_eq!(info.start_time, "18:00");
    assert_eq!(info.end_time, "19:30");
    assert!(info.active);
}
