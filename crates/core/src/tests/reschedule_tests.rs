// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use taskcrew_domain::TimeWindow;

use crate::{CONFLICT_GAP, plan_pushes, push_back};

fn window(start_h: u8, start_m: u8, end_h: u8, end_m: u8) -> TimeWindow {
    let day = datetime!(2026-03-02 00:00:00 UTC);
    TimeWindow::new(
        day + time::Duration::minutes(i64::from(start_h) * 60 + i64::from(start_m)),
        day + time::Duration::minutes(i64::from(end_h) * 60 + i64::from(end_m)),
    )
}

#[test]
fn test_push_back_places_five_minutes_after_target_end() {
    // Target [10:00, 11:00), conflict [10:30, 11:30) → [11:05, 12:05).
    let target: TimeWindow = window(10, 0, 11, 0);
    let conflict: TimeWindow = window(10, 30, 11, 30);

    let pushed: TimeWindow = push_back(&target, &conflict);

    assert_eq!(pushed, window(11, 5, 12, 5));
    assert_eq!(pushed.duration(), conflict.duration());
}

#[test]
fn test_push_back_preserves_odd_durations() {
    let target: TimeWindow = window(9, 0, 9, 45);
    let conflict: TimeWindow = window(9, 15, 9, 37);

    let pushed: TimeWindow = push_back(&target, &conflict);

    assert_eq!(pushed.start, target.end + CONFLICT_GAP);
    assert_eq!(pushed.duration(), time::Duration::minutes(22));
}

#[test]
fn test_plan_pushes_skips_non_overlapping_candidates() {
    let target: TimeWindow = window(10, 0, 11, 0);
    let overlapping: TimeWindow = window(10, 30, 11, 30);
    let outside: TimeWindow = window(13, 0, 14, 0);

    let plan = plan_pushes(&target, &[(1, overlapping), (2, outside)]);

    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].0, 1);
    assert_eq!(plan[0].1, window(11, 5, 12, 5));
}

#[test]
fn test_plan_pushes_preserves_store_order() {
    let target: TimeWindow = window(10, 0, 12, 0);
    let first: TimeWindow = window(11, 0, 11, 30);
    let second: TimeWindow = window(10, 15, 10, 45);

    let plan = plan_pushes(&target, &[(8, first), (3, second)]);

    let ids: Vec<i64> = plan.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![8, 3]);
}

#[test]
fn test_plan_is_single_pass_and_non_cascading() {
    // Known boundary: both conflicts land on the same pushed window.
    // The plan never re-checks pushed windows against each other.
    let target: TimeWindow = window(10, 0, 11, 0);
    let first: TimeWindow = window(10, 0, 11, 0);
    let second: TimeWindow = window(10, 30, 11, 30);

    let plan = plan_pushes(&target, &[(1, first), (2, second)]);

    assert_eq!(plan[0].1, window(11, 5, 12, 5));
    assert_eq!(plan[1].1, window(11, 5, 12, 35));
    // The two pushed windows themselves overlap; that is the
    // documented best-effort behavior, not an accident.
    assert!(plan[0].1.overlaps(&plan[1].1));
}

#[test]
fn test_boundary_touching_window_is_not_a_conflict() {
    let target: TimeWindow = window(10, 0, 11, 0);
    let touching: TimeWindow = window(11, 0, 12, 0);

    let plan = plan_pushes(&target, &[(1, touching)]);

    assert!(plan.is_empty());
}
