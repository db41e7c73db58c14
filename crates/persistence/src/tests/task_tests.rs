// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use taskcrew_audit::ReasonEvent;
use taskcrew_domain::{ReasonKind, TimeWindow};

use crate::tests::helpers::{
    create_test_company, create_test_persistence, create_test_user, test_task,
};
use crate::{PersistenceError, TaskChanges, TaskData};

#[test]
fn test_create_and_get_task_round_trip() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let user_id: i64 = create_test_user(&mut persistence, company_id, "alice");

    let mut scope = persistence.for_company(company_id);
    let task_id: i64 = scope
        .create_task(&test_task(user_id, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"))
        .unwrap();

    let task: TaskData = scope.get_task(task_id).unwrap().expect("task should exist");
    assert_eq!(task.assigned_to, user_id);
    assert_eq!(task.status, "pending");
    assert_eq!(task.approval_status, "pending");
    assert_eq!(task.start, "2026-03-02T10:00:00Z");
    assert_eq!(task.end_time, "2026-03-02T11:00:00Z");
    assert_eq!(task.elapsed_seconds, 0);
    assert!(task.timer_start.is_none());
    assert!(!task.added_by_user);
}

#[test]
fn test_reassign_pushes_overlapping_task_by_five_minutes() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");
    let bob: i64 = create_test_user(&mut persistence, company_id, "bob");

    let mut scope = persistence.for_company(company_id);
    // T belongs to alice and will move onto bob's schedule.
    let t: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"))
        .unwrap();
    // U conflicts with T's new window; V is entirely outside it.
    let u: i64 = scope
        .create_task(&test_task(bob, "2026-03-02T10:30:00Z", "2026-03-02T11:30:00Z"))
        .unwrap();
    let v: i64 = scope
        .create_task(&test_task(bob, "2026-03-02T13:00:00Z", "2026-03-02T14:00:00Z"))
        .unwrap();

    let window: TimeWindow =
        TimeWindow::parse("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z").unwrap();
    let (updated, rescheduled): (TaskData, usize) = scope.reassign_task(t, bob, &window).unwrap();

    assert_eq!(rescheduled, 1);
    assert_eq!(updated.assigned_to, bob);
    assert_eq!(updated.start, "2026-03-02T10:00:00Z");
    assert_eq!(updated.end_time, "2026-03-02T11:00:00Z");

    // U moved to start 5 minutes after T's new end, keeping its
    // 60-minute duration.
    let u_task: TaskData = scope.get_task(u).unwrap().unwrap();
    assert_eq!(u_task.start, "2026-03-02T11:05:00Z");
    assert_eq!(u_task.end_time, "2026-03-02T12:05:00Z");

    // V untouched.
    let v_task: TaskData = scope.get_task(v).unwrap().unwrap();
    assert_eq!(v_task.start, "2026-03-02T13:00:00Z");
    assert_eq!(v_task.end_time, "2026-03-02T14:00:00Z");
}

#[test]
fn test_reassign_overwrites_title_with_assignee_department() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");
    let bob: i64 = create_test_user(&mut persistence, company_id, "bob");

    let mut scope = persistence.for_company(company_id);
    let t: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"))
        .unwrap();

    let window: TimeWindow =
        TimeWindow::parse("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z").unwrap();
    let (updated, _): (TaskData, usize) = scope.reassign_task(t, bob, &window).unwrap();

    // Preserved quirk: the title becomes the assignee's department.
    assert_eq!(updated.title, "Dept bob");
}

#[test]
fn test_reassign_boundary_touching_task_is_not_rescheduled() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");
    let bob: i64 = create_test_user(&mut persistence, company_id, "bob");

    let mut scope = persistence.for_company(company_id);
    let t: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"))
        .unwrap();
    // Starts exactly at the new window's end: half-open, no overlap.
    let w: i64 = scope
        .create_task(&test_task(bob, "2026-03-02T11:00:00Z", "2026-03-02T12:00:00Z"))
        .unwrap();

    let window: TimeWindow =
        TimeWindow::parse("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z").unwrap();
    let (_, rescheduled): (TaskData, usize) = scope.reassign_task(t, bob, &window).unwrap();

    assert_eq!(rescheduled, 0);
    let w_task: TaskData = scope.get_task(w).unwrap().unwrap();
    assert_eq!(w_task.start, "2026-03-02T11:00:00Z");
}

#[test]
fn test_reassign_unknown_assignee_fails_not_found() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");

    let mut scope = persistence.for_company(company_id);
    let t: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"))
        .unwrap();

    let window: TimeWindow =
        TimeWindow::parse("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z").unwrap();
    let result = scope.reassign_task(t, 9999, &window);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_successive_reassigns_leave_each_task_self_consistent() {
    // Two quick reassignments with overlapping target windows. The
    // outcome depends on execution order; the invariant is weaker:
    // no failure, and every task keeps a parseable window of its
    // original duration.
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");
    let bob: i64 = create_test_user(&mut persistence, company_id, "bob");

    let mut scope = persistence.for_company(company_id);
    let t1: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T07:00:00Z", "2026-03-02T08:00:00Z"))
        .unwrap();
    let t2: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"))
        .unwrap();
    let busy: i64 = scope
        .create_task(&test_task(bob, "2026-03-02T10:15:00Z", "2026-03-02T11:15:00Z"))
        .unwrap();

    let first: TimeWindow =
        TimeWindow::parse("2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z").unwrap();
    let second: TimeWindow =
        TimeWindow::parse("2026-03-02T10:30:00Z", "2026-03-02T11:30:00Z").unwrap();

    scope.reassign_task(t1, bob, &first).unwrap();
    scope.reassign_task(t2, bob, &second).unwrap();

    for task_id in [t1, t2, busy] {
        let task: TaskData = scope.get_task(task_id).unwrap().unwrap();
        let window: TimeWindow = TimeWindow::parse(&task.start, &task.end_time)
            .expect("every task must keep parseable bounds");
        assert!(window.is_ordered(), "task {task_id} window must stay ordered");
    }
}

#[test]
fn test_start_timer_overwrites_and_logs() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");

    let mut scope = persistence.for_company(company_id);
    let task_id: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"))
        .unwrap();

    scope
        .start_timer(task_id, alice, "2026-03-02T10:00:00Z")
        .unwrap();
    // A second start silently replaces the recorded instant.
    scope
        .start_timer(task_id, alice, "2026-03-02T10:10:00Z")
        .unwrap();

    let task: TaskData = scope.get_task(task_id).unwrap().unwrap();
    assert_eq!(task.timer_start.as_deref(), Some("2026-03-02T10:10:00Z"));

    let log = scope.list_time_updates(task_id).unwrap();
    assert_eq!(log.len(), 2);
    assert!(log.iter().all(|entry| entry.update_type == 1));
}

#[test]
fn test_pause_stores_elapsed_verbatim() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");

    let mut scope = persistence.for_company(company_id);
    let task_id: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"))
        .unwrap();

    scope.set_elapsed_seconds(task_id, 930).unwrap();

    let task: TaskData = scope.get_task(task_id).unwrap().unwrap();
    assert_eq!(task.elapsed_seconds, 930);
}

#[test]
fn test_stop_logs_event_without_touching_status() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");

    let mut scope = persistence.for_company(company_id);
    let task_id: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"))
        .unwrap();

    scope
        .record_stop(task_id, alice, "2026-03-02T11:00:00Z")
        .unwrap();

    let task: TaskData = scope.get_task(task_id).unwrap().unwrap();
    // No automatic transition; status moves only via explicit update.
    assert_eq!(task.status, "pending");

    let log = scope.list_time_updates(task_id).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].update_type, 2);
}

#[test]
fn test_record_reason_writes_both_surfaces() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");

    let mut scope = persistence.for_company(company_id);
    let task_id: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"))
        .unwrap();

    let event: ReasonEvent = ReasonEvent::new(
        task_id,
        alice,
        ReasonKind::Stop,
        "generator failed",
        String::from("2026-03-02T10:45:00Z"),
    )
    .unwrap();
    scope.record_reason(&event).unwrap();

    let task: TaskData = scope.get_task(task_id).unwrap().unwrap();
    assert_eq!(task.stop_reason.as_deref(), Some("generator failed"));

    let reasons = scope.list_reasons(task_id).unwrap();
    assert_eq!(reasons.len(), 1);
    assert_eq!(reasons[0].reason_type, ReasonKind::Stop.code());
    assert_eq!(reasons[0].reason_text, "generator failed");
    assert_eq!(reasons[0].user_id, alice);
}

#[test]
fn test_record_reason_unknown_task_writes_nothing() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");

    let mut scope = persistence.for_company(company_id);
    let event: ReasonEvent = ReasonEvent::new(
        4242,
        alice,
        ReasonKind::Pause,
        "no such task",
        String::from("2026-03-02T10:45:00Z"),
    )
    .unwrap();

    let result = scope.record_reason(&event);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
    assert!(scope.list_reasons(4242).unwrap().is_empty());
}

#[test]
fn test_reject_with_reason_fills_generic_column_and_audit_row() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");
    let admin: i64 = create_test_user(&mut persistence, company_id, "boss");

    let mut scope = persistence.for_company(company_id);
    let task_id: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"))
        .unwrap();

    scope
        .set_approval(
            task_id,
            admin,
            "rejected",
            Some("window conflicts with maintenance"),
            "2026-03-02T09:00:00Z",
        )
        .unwrap();

    let task: TaskData = scope.get_task(task_id).unwrap().unwrap();
    assert_eq!(task.approval_status, "rejected");
    assert_eq!(
        task.reason.as_deref(),
        Some("window conflicts with maintenance")
    );

    let reasons = scope.list_reasons(task_id).unwrap();
    assert_eq!(reasons.len(), 1);
    assert_eq!(reasons[0].reason_type, ReasonKind::Reject.code());
}

#[test]
fn test_update_task_self_scope_requires_assignee_match() {
    let mut persistence = create_test_persistence();
    let company_id: i64 = create_test_company(&mut persistence, "ACME");
    let alice: i64 = create_test_user(&mut persistence, company_id, "alice");
    let bob: i64 = create_test_user(&mut persistence, company_id, "bob");

    let mut scope = persistence.for_company(company_id);
    let task_id: i64 = scope
        .create_task(&test_task(alice, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"))
        .unwrap();

    let changes: TaskChanges = TaskChanges {
        status: Some(String::from("in-progress")),
        ..TaskChanges::default()
    };

    // Bob is not the assignee: the self-scoped update matches nothing.
    let result = scope.update_task(task_id, Some(bob), &changes);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));

    // Alice is: it goes through.
    scope.update_task(task_id, Some(alice), &changes).unwrap();
    let task: TaskData = scope.get_task(task_id).unwrap().unwrap();
    assert_eq!(task.status, "in-progress");
}
