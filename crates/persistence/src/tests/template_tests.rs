// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_persistence, seed_monday_template};
use crate::{Persistence, mutations, queries};
use classbook_domain::ClassTemplate;
use time::Weekday;
use time::macros::time;

#[test]
fn test_insert_and_get_template_round_trip() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();

    let template_id: i64 = seed_monday_template(&mut conn, 20);

    let template: ClassTemplate = queries::get_template(&mut conn, template_id)
        .unwrap()
        .unwrap();
    assert_eq!(template.id.value(), template_id);
    assert_eq!(template.weekday, Weekday::Monday);
    assert_eq!(template.start_time, time!(18:00));
    assert_eq!(template.end_time, time!(19:30));
    assert_eq!(template.capacity.seats(), 20);
    assert!(template.active);
}

#[test]
fn test_get_template_returns_none_for_unknown_id() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();

    let result: Option<ClassTemplate> = queries::get_template(&mut conn, 999).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_list_templates_orders_by_id() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();

    let first: i64 = seed_monday_template(&mut conn, 10);
    let second: i64 = seed_monday_template(&mut conn, 12);

    let templates: Vec<ClassTemplate> = queries::list_templates(&mut conn).unwrap();
    assert_eq!(templates.len(), 2);
    assert_eq!(templates[0].id.value(), first);
    assert_eq!(templates[1].id.value(), second);
}

#[test]
fn test_set_template_active_toggles_flag() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();

    let template_id: i64 = seed_monday_template(&mut conn, 10);

    let updated: usize = mutations::set_template_active(&mut conn, template_id, false).unwrap();
    assert_eq!(updated, 1);
    let template: ClassTemplate = queries::get_template(&mut conn, template_id)
        .unwrap()
        .unwrap();
    assert!(!template.active);

    mutations::set_template_active(&mut conn, template_id, true).unwrap();
    let template: ClassTemplate = queries::get_template(&mut conn, template_id)
        .unwrap()
        .unwrap();
    assert!(template.active);
}

#[test]
fn test_set_template_active_unknown_id_updates_nothing() {
    let persistence: Persistence = create_test_persistence();
    let mut conn = persistence.conn().unwrap();

    let updated: usize = mutations::set_template_active(&mut conn, 999, false).unwrap();
    assert_eq!(updated, 0);
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let first: Persistence = create_test_persistence();
    let second: Persistence = create_test_persistence();

    let mut conn_a = first.conn().unwrap();
    seed_monday_template(&mut conn_a, 20);

    let mut conn_b = second.conn().unwrap();
    assert!(queries::list_templates(&mut conn_b).unwrap().is_empty());
}
