// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use taskcrew_domain::ReasonKind;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{ReasonRequest, TaskResponse};
use crate::tests::helpers::{create_test_persistence, setup_tenant, task_request};

#[test]
fn test_stop_reason_writes_both_surfaces() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "bothsurfaces");

    let mut scope = persistence.for_company(tenant.company_id);
    let task: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
    )
    .unwrap();

    handlers::submit_reason(
        &mut scope,
        &tenant.employee,
        task.task_id,
        ReasonKind::Stop,
        &ReasonRequest {
            reason: String::from("  press jammed  "),
        },
    )
    .unwrap();

    // Embedded column: latest value, trimmed.
    let all = handlers::list_all_tasks(&mut scope, &tenant.admin).unwrap();
    let stored = all.iter().find(|t| t.task_id == task.task_id).unwrap();
    assert_eq!(stored.stop_reason.as_deref(), Some("press jammed"));

    // Audit table: full history.
    let history = handlers::reason_history(&mut scope, &tenant.employee, task.task_id).unwrap();
    assert_eq!(history.reasons.len(), 1);
    assert_eq!(history.reasons[0].reason_type, ReasonKind::Stop.code());
    assert_eq!(history.reasons[0].reason_text, "press jammed");
    assert_eq!(history.reasons[0].user_id, tenant.employee.user_id);
}

#[test]
fn test_blank_reason_is_rejected_and_writes_nothing() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "blankreason");

    let mut scope = persistence.for_company(tenant.company_id);
    let task: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
    )
    .unwrap();

    for blank in ["", "   ", "\t\n"] {
        let result = handlers::submit_reason(
            &mut scope,
            &tenant.employee,
            task.task_id,
            ReasonKind::Stop,
            &ReasonRequest {
                reason: blank.to_string(),
            },
        );
        assert!(
            matches!(result, Err(ApiError::Validation { field, .. }) if field == "reason"),
            "expected rejection for blank reason {blank:?}"
        );
    }

    // Neither surface was touched.
    let all = handlers::list_all_tasks(&mut scope, &tenant.admin).unwrap();
    let stored = all.iter().find(|t| t.task_id == task.task_id).unwrap();
    assert!(stored.stop_reason.is_none());

    let history = handlers::reason_history(&mut scope, &tenant.employee, task.task_id).unwrap();
    assert!(history.reasons.is_empty());
}

#[test]
fn test_each_timer_kind_fills_its_own_column() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "fourkinds");

    let mut scope = persistence.for_company(tenant.company_id);
    let task: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
    )
    .unwrap();

    for (kind, text) in [
        (ReasonKind::StartEarly, "machine free early"),
        (ReasonKind::StartLate, "handover overran"),
        (ReasonKind::Pause, "lunch"),
        (ReasonKind::Stop, "end of shift"),
    ] {
        handlers::submit_reason(
            &mut scope,
            &tenant.employee,
            task.task_id,
            kind,
            &ReasonRequest {
                reason: text.to_string(),
            },
        )
        .unwrap();
    }

    let all = handlers::list_all_tasks(&mut scope, &tenant.admin).unwrap();
    let stored = all.iter().find(|t| t.task_id == task.task_id).unwrap();
    assert_eq!(stored.start_early_reason.as_deref(), Some("machine free early"));
    assert_eq!(stored.start_late_reason.as_deref(), Some("handover overran"));
    assert_eq!(stored.pause_reason.as_deref(), Some("lunch"));
    assert_eq!(stored.stop_reason.as_deref(), Some("end of shift"));

    let history = handlers::reason_history(&mut scope, &tenant.employee, task.task_id).unwrap();
    assert_eq!(history.reasons.len(), 4);
}

#[test]
fn test_repeated_reason_keeps_full_history_and_latest_column() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "latestwins");

    let mut scope = persistence.for_company(tenant.company_id);
    let task: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.employee.user_id, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
    )
    .unwrap();

    for text in ["first pause", "second pause"] {
        handlers::submit_reason(
            &mut scope,
            &tenant.employee,
            task.task_id,
            ReasonKind::Pause,
            &ReasonRequest {
                reason: text.to_string(),
            },
        )
        .unwrap();
    }

    let all = handlers::list_all_tasks(&mut scope, &tenant.admin).unwrap();
    let stored = all.iter().find(|t| t.task_id == task.task_id).unwrap();
    assert_eq!(stored.pause_reason.as_deref(), Some("second pause"));

    let history = handlers::reason_history(&mut scope, &tenant.employee, task.task_id).unwrap();
    let texts: Vec<&str> = history.reasons.iter().map(|r| r.reason_text.as_str()).collect();
    assert_eq!(texts, vec!["first pause", "second pause"]);
}

#[test]
fn test_reason_on_foreign_task_is_not_found() {
    let mut persistence = create_test_persistence();
    let tenant = setup_tenant(&mut persistence, "reasonscope");

    let mut scope = persistence.for_company(tenant.company_id);
    let admins_task: TaskResponse = handlers::create_task(
        &mut scope,
        &tenant.admin,
        &task_request(tenant.admin.user_id, "2026-03-02T10:00:00Z", "2026-03-02T11:00:00Z"),
    )
    .unwrap();

    let result = handlers::submit_reason(
        &mut scope,
        &tenant.employee,
        admins_task.task_id,
        ReasonKind::Pause,
        &ReasonRequest {
            reason: String::from("not my task"),
        },
    );

    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}
