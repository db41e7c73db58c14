// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use taskcrew_domain::TimeWindow;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{ReassignTaskRequest, ReassignTaskResponse, TaskResponse};
use crate::tests::helpers::{create_test_persistence, setup_tenant, task_request};

#[test]
fn test_reassign_reschedules_single_conflict() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "conflict");

    let mut scope = persistence.for_company(tenant.company_id);
    // T currently on the admin's own plate.
    let t: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.admin.user_id, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"),
    )
    .unwrap();
    // U occupies [10:30, 11:30) on the employee's schedule.
    let u: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T10:30:00Z", "2026-03-02T11:30:00Z"),
    )
    .unwrap();
    // V is entirely outside the incoming window.
    let v: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T13:00:00Z", "2026-03-02T14:00:00Z"),
    )
    .unwrap();

    let response: ReassignTaskResponse = handlers::reassign_task(
        &mut scope,
        &tenant.admin,
        t.task_id,
        &ReassignTaskRequest {
            assigned_to: tenant.employee.user_id,
            start: String::from("2026-03-02T10:00:00Z"),
            end_time: String::from("2026-03-02T11:00:00Z"),
        },
    )
    .unwrap();

    assert_eq!(response.rescheduled_conflicts, 1);
    assert_eq!(response.task.assigned_to, tenant.employee.user_id);
    assert_eq!(response.task.start, "2026-03-02T10:00:00Z");
    assert_eq!(response.task.end_time, "2026-03-02T11:00:00Z");

    // U keeps its 60-minute duration, 5 minutes after T's new end.
    let all = handlers::list_all_tasks(&mut scope, &tenant.admin).unwrap();
    let u_task = all.iter().find(|task| task.task_id == u.task_id).unwrap();
    assert_eq!(u_task.start, "2026-03-02T11:05:00Z");
    assert_eq!(u_task.end_time, "2026-03-02T12:05:00Z");

    let v_task = all.iter().find(|task| task.task_id == v.task_id).unwrap();
    assert_eq!(v_task.start, "2026-03-02T13:00:00Z");
    assert_eq!(v_task.end_time, "2026-03-02T14:00:00Z");
}

#[test]
fn test_reassign_overwrites_title_with_department() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "dept");

    // Give the employee a department to observe the overwrite.
    let mut scope = persistence.for_company(tenant.company_id);
    handlers::update_user(
        &mut scope,
        &tenant.admin,
        tenant.employee.user_id,
        &crate::request_response::UpdateUserRequest {
            department: Some(String::from("Maintenance")),
            ..crate::request_response::UpdateUserRequest::default()
        },
    )
    .unwrap();

    let t: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.admin.user_id, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"),
    )
    .unwrap();
    assert_eq!(t.title, "Inspect the line");

    let response: ReassignTaskResponse = handlers::reassign_task(
        &mut scope,
        &tenant.admin,
        t.task_id,
        &ReassignTaskRequest {
            assigned_to: tenant.employee.user_id,
            start: String::from("2026-03-02T10:00:00Z"),
            end_time: String::from("2026-03-02T11:00:00Z"),
        },
    )
    .unwrap();

    // Preserved quirk: the title becomes the assignee's department.
    assert_eq!(response.task.title, "Maintenance");
}

#[test]
fn test_reassign_is_admin_only() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "gatekeeping");

    let mut scope = persistence.for_company(tenant.company_id);
    let t: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"),
    )
    .unwrap();

    let result = handlers::reassign_task(
        &mut scope,
        &tenant.employee,
        t.task_id,
        &ReassignTaskRequest {
            assigned_to: tenant.employee.user_id,
            start: String::from("2026-03-02T10:00:00Z"),
            end_time: String::from("2026-03-02T11:00:00Z"),
        },
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_reassign_unknown_assignee_is_not_found() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "ghostassignee");

    let mut scope = persistence.for_company(tenant.company_id);
    let t: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"),
    )
    .unwrap();

    let result = handlers::reassign_task(
        &mut scope,
        &tenant.admin,
        t.task_id,
        &ReassignTaskRequest {
            assigned_to: 4242,
            start: String::from("2026-03-02T10:00:00Z"),
            end_time: String::from("2026-03-02T11:00:00Z"),
        },
    );

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[test]
fn test_two_quick_reassigns_leave_consistent_windows() {
    // The outcome of overlapping reassignments depends on execution
    // order (documented nondeterminism); the asserted invariant is
    // that nothing crashes and every task keeps an ordered window.
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "race");

    let mut scope = persistence.for_company(tenant.company_id);
    let t1: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.admin.user_id, "2026-03-02T07:00:00Z", "2026-03-02T08:00:00Z"),
    )
    .unwrap();
    let t2: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.admin.user_id, "2026-03-02T08:00:00Z", "2026-03-02T09:00:00Z"),
    )
    .unwrap();
    handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T10:15:00Z", "2026-03-02T11:15:00Z"),
    )
    .unwrap();

    handlers::reassign_task(
        &mut scope,
        &tenant.admin,
        t1.task_id,
        &ReassignTaskRequest {
            assigned_to: tenant.employee.user_id,
            start: String::from("2026-03-02T10:00:00Z"),
            end_time: String::from("2026-03-02T11:00:00Z"),
        },
    )
    .unwrap();
    handlers::reassign_task(
        &mut scope,
        &tenant.admin,
        t2.task_id,
        &ReassignTaskRequest {
            assigned_to: tenant.employee.user_id,
            start: String::from("2026-03-02T10:30:00Z"),
            end_time: String::from("2026-03-02T11:30:00Z"),
        },
    )
    .unwrap();

    for task in handlers::list_all_tasks(&mut scope, &tenant.admin).unwrap() {
        let window: TimeWindow = TimeWindow::parse(&task.start, &task.end_time)
            .expect("all windows stay parseable");
        assert!(window.is_ordered(), "task {} must stay ordered", task.task_id);
    }
}
