// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_company, create_test_persistence};
use crate::PersistenceError;

#[test]
fn test_shift_with_breaks_round_trip() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");

    let mut scope = persistence.for_company(company_id);
    let shift_id: i64 = scope.create_shift("Day", "08:00", "16:00").unwrap();
    scope
        .create_shift_break(shift_id, "Lunch", "12:00", "12:30")
        .unwrap();
    scope
        .create_shift_break(shift_id, "Coffee", "10:00", "10:15")
        .unwrap();

    let breaks = scope.list_breaks_for_shift(shift_id).unwrap();
    assert_eq!(breaks.len(), 2);
    assert_eq!(breaks[0].name, "Lunch");
    assert_eq!(breaks[1].name, "Coffee");
}

#[test]
fn test_deleting_shift_cascades_breaks_manually() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");

    let mut scope = persistence.for_company(company_id);
    let shift_id: i64 = scope.create_shift("Night", "22:00", "06:00").unwrap();
    let break_id: i64 = scope
        .create_shift_break(shift_id, "Nap", "02:00", "02:20")
        .unwrap();

    scope.delete_shift(shift_id).unwrap();

    assert!(scope.get_shift(shift_id).unwrap().is_none());
    assert!(scope.get_shift_break(break_id).unwrap().is_none());
}

#[test]
fn test_break_creation_requires_owned_shift() {
    let mut persistence = create_test_persistence();
    let acme: i64 = create_test_company(&mut persistence, "ACME");
    let globex: i64 = create_test_company(&mut persistence, "GLOBEX");

    let shift_id: i64 = {
        let mut scope = persistence.for_company(acme);
        scope.create_shift("Day", "08:00", "16:00").unwrap()
    };

    let mut foreign = persistence.for_company(globex);
    let result = foreign.create_shift_break(shift_id, "Lunch", "12:00", "12:30");
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_update_shift_and_break_fields() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");

    let mut scope = persistence.for_company(company_id);
    let shift_id: i64 = scope.create_shift("Day", "08:00", "16:00").unwrap();
    let break_id: i64 = scope
        .create_shift_break(shift_id, "Lunch", "12:00", "12:30")
        .unwrap();

    scope
        .update_shift(shift_id, Some("Early"), Some("06:00"), None)
        .unwrap();
    scope
        .update_shift_break(break_id, None, Some("11:30"), Some("12:00"))
        .unwrap();

    let shift = scope.get_shift(shift_id).unwrap().unwrap();
    assert_eq!(shift.name, "Early");
    assert_eq!(shift.start_time, "06:00");
    assert_eq!(shift.end_time, "16:00");

    let shift_break = scope.get_shift_break(break_id).unwrap().unwrap();
    assert_eq!(shift_break.name, "Lunch");
    assert_eq!(shift_break.start_time, "11:30");
    assert_eq!(shift_break.end_time, "12:00");
}
