// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task mutations, including the timer operations and the
//! conflict-rescheduling reassignment.

use diesel::prelude::*;
use tracing::{debug, info};

use taskcrew::plan_pushes;
use taskcrew_audit::{ReasonEvent, TimeLogKind};
use taskcrew_domain::{ReasonKind, TimeWindow};

use crate::data_models::{NewTask, TaskChanges, TaskData};
use crate::diesel_schema::{task_reasons, tasks, time_updates};
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite;

/// Creates a new task within a company.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_task(
    conn: &mut SqliteConnection,
    company_id: i64,
    task: &NewTask,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating task '{}' for assignee {} in company {}",
        task.title, task.assigned_to, company_id
    );

    diesel::insert_into(tasks::table)
        .values((
            tasks::company_id.eq(company_id),
            tasks::assigned_by.eq(task.assigned_by),
            tasks::assigned_to.eq(task.assigned_to),
            tasks::title.eq(&task.title),
            tasks::description.eq(&task.description),
            tasks::project_title.eq(&task.project_title),
            tasks::priority.eq(task.priority),
            tasks::status.eq(&task.status),
            tasks::approval_status.eq(&task.approval_status),
            tasks::start.eq(&task.start),
            tasks::end_time.eq(&task.end_time),
            tasks::duration_minutes.eq(task.duration_minutes),
            tasks::added_by_user.eq(i32::from(task.added_by_user)),
        ))
        .execute(conn)?;

    let task_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(task_id, "Task created successfully");
    Ok(task_id)
}

/// Applies partial updates to a task within a company.
///
/// When `assignee` is given the update is additionally scoped to
/// `assigned_to = assignee` (the self-service path); a mismatch
/// surfaces as `NotFound`, indistinguishable from a missing task.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when no row matches the scope,
/// or another error if the update fails.
pub fn update_task(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
    assignee: Option<i64>,
    changes: &TaskChanges,
) -> Result<(), PersistenceError> {
    debug!("Updating task {} in company {}", task_id, company_id);

    if changes.is_empty() {
        return Ok(());
    }

    let changeset = (
        changes.assigned_to.map(|v| tasks::assigned_to.eq(v)),
        changes.title.as_ref().map(|v| tasks::title.eq(v)),
        changes
            .description
            .as_ref()
            .map(|v| tasks::description.eq(v)),
        changes
            .project_title
            .as_ref()
            .map(|v| tasks::project_title.eq(v)),
        changes.priority.map(|v| tasks::priority.eq(v)),
        changes.status.as_ref().map(|v| tasks::status.eq(v)),
        changes.reason.as_ref().map(|v| tasks::reason.eq(v)),
        changes.start.as_ref().map(|v| tasks::start.eq(v)),
        changes.end_time.as_ref().map(|v| tasks::end_time.eq(v)),
        changes
            .duration_minutes
            .map(|v| tasks::duration_minutes.eq(v)),
    );

    let rows_affected: usize = match assignee {
        Some(assignee_id) => diesel::update(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::task_id.eq(task_id))
            .filter(tasks::assigned_to.eq(assignee_id))
            .set(changeset)
            .execute(conn)?,
        None => diesel::update(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::task_id.eq(task_id))
            .set(changeset)
            .execute(conn)?,
    };

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Task with ID {task_id} not found"
        )));
    }

    Ok(())
}

/// Starts (or restarts) a task timer: overwrites `timer_start` and
/// appends a start entry to the timer log, atomically.
///
/// A second start simply replaces the recorded instant; the original
/// one is lost. That matches the stored model and stays.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the task is outside the
/// company, or another error if a statement fails.
pub fn start_timer(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
    user_id: i64,
    now: &str,
) -> Result<(), PersistenceError> {
    debug!("Starting timer on task {} in company {}", task_id, company_id);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::update(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::task_id.eq(task_id))
            .set(tasks::timer_start.eq(now))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Task with ID {task_id} not found"
            )));
        }

        diesel::insert_into(time_updates::table)
            .values((
                time_updates::task_id.eq(task_id),
                time_updates::user_id.eq(user_id),
                time_updates::update_type.eq(TimeLogKind::Start.code()),
                time_updates::recorded_at.eq(now),
            ))
            .execute(conn)?;

        Ok(())
    })
}

/// Stores a pause figure: sets `elapsed_seconds` to exactly the value
/// the caller computed under the active trust policy.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the task is outside the
/// company, or another error if the update fails.
pub fn set_elapsed_seconds(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
    elapsed_seconds: i64,
) -> Result<(), PersistenceError> {
    debug!(
        "Setting elapsed_seconds={} on task {} in company {}",
        elapsed_seconds, task_id, company_id
    );

    let rows_affected: usize = diesel::update(tasks::table)
        .filter(tasks::company_id.eq(company_id))
        .filter(tasks::task_id.eq(task_id))
        .set(tasks::elapsed_seconds.eq(elapsed_seconds))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Task with ID {task_id} not found"
        )));
    }

    Ok(())
}

/// Records a stop event in the timer log.
///
/// Stopping changes no task column and performs no status transition;
/// status moves only through an explicit update call.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the task is outside the
/// company, or another error if the insert fails.
pub fn record_stop(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
    user_id: i64,
    now: &str,
) -> Result<(), PersistenceError> {
    debug!("Stopping timer on task {} in company {}", task_id, company_id);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if queries::tasks::get_task(conn, company_id, task_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Task with ID {task_id} not found"
            )));
        }

        diesel::insert_into(time_updates::table)
            .values((
                time_updates::task_id.eq(task_id),
                time_updates::user_id.eq(user_id),
                time_updates::update_type.eq(TimeLogKind::Stop.code()),
                time_updates::recorded_at.eq(now),
            ))
            .execute(conn)?;

        Ok(())
    })
}

/// Directly updates the flat timer columns (the PUT timer surface).
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the task is outside the
/// company, or another error if the update fails.
pub fn put_timer(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
    timer_start: Option<String>,
    elapsed_seconds: Option<i64>,
) -> Result<(), PersistenceError> {
    debug!("Putting timer fields on task {} in company {}", task_id, company_id);

    if timer_start.is_none() && elapsed_seconds.is_none() {
        return Ok(());
    }

    let rows_affected: usize = diesel::update(tasks::table)
        .filter(tasks::company_id.eq(company_id))
        .filter(tasks::task_id.eq(task_id))
        .set((
            timer_start.as_ref().map(|v| tasks::timer_start.eq(v)),
            elapsed_seconds.map(|v| tasks::elapsed_seconds.eq(v)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Task with ID {task_id} not found"
        )));
    }

    Ok(())
}

/// Records a reason on both surfaces atomically: the embedded column
/// (for the four timer kinds) and the reason audit table.
///
/// The event carries already-validated, trimmed text; a blank reason
/// never reaches this function.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the task is outside the
/// company (nothing is written), or another error if a statement fails.
pub fn record_reason(
    conn: &mut SqliteConnection,
    company_id: i64,
    event: &ReasonEvent,
) -> Result<i64, PersistenceError> {
    debug!(
        "Recording {:?} reason on task {} in company {}",
        event.kind, event.task_id, company_id
    );

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if event.kind.has_embedded_column() {
            let scoped = diesel::update(tasks::table)
                .filter(tasks::company_id.eq(company_id))
                .filter(tasks::task_id.eq(event.task_id));
            let rows_affected: usize = match event.kind {
                ReasonKind::StartEarly => scoped
                    .set(tasks::start_early_reason.eq(&event.text))
                    .execute(conn)?,
                ReasonKind::StartLate => scoped
                    .set(tasks::start_late_reason.eq(&event.text))
                    .execute(conn)?,
                ReasonKind::Pause => scoped
                    .set(tasks::pause_reason.eq(&event.text))
                    .execute(conn)?,
                _ => scoped
                    .set(tasks::stop_reason.eq(&event.text))
                    .execute(conn)?,
            };
            if rows_affected == 0 {
                return Err(PersistenceError::NotFound(format!(
                    "Task with ID {} not found",
                    event.task_id
                )));
            }
        } else if queries::tasks::get_task(conn, company_id, event.task_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Task with ID {} not found",
                event.task_id
            )));
        }

        diesel::insert_into(task_reasons::table)
            .values((
                task_reasons::task_id.eq(event.task_id),
                task_reasons::user_id.eq(event.user_id),
                task_reasons::reason_type.eq(event.kind.code()),
                task_reasons::reason_text.eq(&event.text),
                task_reasons::created_at.eq(&event.recorded_at),
            ))
            .execute(conn)?;

        sqlite::get_last_insert_rowid(conn)
    })
}

/// Sets the approval verdict; a rejection may carry a reason, stored
/// in the generic `reason` column and mirrored into the audit table.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the task is outside the
/// company, or another error if a statement fails.
pub fn set_approval(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
    actor_id: i64,
    approval_status: &str,
    reason: Option<&str>,
    now: &str,
) -> Result<(), PersistenceError> {
    info!(
        "Setting approval_status='{}' on task {} in company {}",
        approval_status, task_id, company_id
    );

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::update(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::task_id.eq(task_id))
            .set((
                tasks::approval_status.eq(approval_status),
                reason.map(|v| tasks::reason.eq(v)),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Task with ID {task_id} not found"
            )));
        }

        if approval_status == "rejected" {
            if let Some(text) = reason {
                diesel::insert_into(task_reasons::table)
                    .values((
                        task_reasons::task_id.eq(task_id),
                        task_reasons::user_id.eq(actor_id),
                        task_reasons::reason_type.eq(ReasonKind::Reject.code()),
                        task_reasons::reason_text.eq(text),
                        task_reasons::created_at.eq(now),
                    ))
                    .execute(conn)?;
            }
        }

        Ok(())
    })
}

/// Reassigns a task to a new assignee over a new window, pushing every
/// conflicting task of that assignee out of the way first.
///
/// The whole operation runs in one transaction (strengthened mode);
/// the placement itself stays single-pass and non-cascading:
///
/// 1. the new assignee must exist in the company;
/// 2. every OTHER task of that assignee overlapping the new window
///    (half-open test, store order) is pushed to a window starting
///    five minutes after the new end, keeping its duration;
/// 3. the task itself gets the new assignee, the new window, and its
///    title overwritten with the assignee's department string (a
///    preserved quirk of the original behavior).
///
/// Returns the updated task and the number of rescheduled conflicts.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` when the task or the assignee
/// is outside the company, or another error if a statement fails.
pub fn reassign_task(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
    new_assignee_id: i64,
    window: &TimeWindow,
) -> Result<(TaskData, usize), PersistenceError> {
    info!(
        "Reassigning task {} to user {} in company {}",
        task_id, new_assignee_id, company_id
    );

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if queries::tasks::get_task(conn, company_id, task_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Task with ID {task_id} not found"
            )));
        }

        let assignee = queries::users::get_user(conn, company_id, new_assignee_id)?.ok_or_else(
            || {
                PersistenceError::NotFound(format!(
                    "User with ID {new_assignee_id} not found"
                ))
            },
        )?;

        let window_start: String = window.start_string();
        let window_end: String = window.end_string();

        let overlapping: Vec<TaskData> = queries::tasks::find_overlapping_tasks(
            conn,
            company_id,
            new_assignee_id,
            task_id,
            &window_start,
            &window_end,
        )?;

        let mut candidates: Vec<(i64, TimeWindow)> = Vec::with_capacity(overlapping.len());
        for conflict in &overlapping {
            candidates.push((
                conflict.task_id,
                TimeWindow::parse(&conflict.start, &conflict.end_time)?,
            ));
        }

        let plan: Vec<(i64, TimeWindow)> = plan_pushes(window, &candidates);
        for (conflict_id, new_window) in &plan {
            debug!(
                "Pushing conflicting task {} to [{}, {})",
                conflict_id,
                new_window.start_string(),
                new_window.end_string()
            );
            diesel::update(tasks::table)
                .filter(tasks::company_id.eq(company_id))
                .filter(tasks::task_id.eq(*conflict_id))
                .set((
                    tasks::start.eq(new_window.start_string()),
                    tasks::end_time.eq(new_window.end_string()),
                ))
                .execute(conn)?;
        }

        // The title takes the new assignee's department string. This
        // mirrors the original behavior exactly; see DESIGN.md.
        let new_title: String = assignee.department.clone().unwrap_or_default();

        diesel::update(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::task_id.eq(task_id))
            .set((
                tasks::assigned_to.eq(new_assignee_id),
                tasks::title.eq(&new_title),
                tasks::start.eq(&window_start),
                tasks::end_time.eq(&window_end),
            ))
            .execute(conn)?;

        let updated: TaskData = queries::tasks::get_task(conn, company_id, task_id)?
            .ok_or_else(|| {
                PersistenceError::Other(format!(
                    "Task {task_id} disappeared during reassignment"
                ))
            })?;

        info!(
            task_id,
            rescheduled = plan.len(),
            "Task reassigned successfully"
        );

        Ok((updated, plan.len()))
    })
}

/// Hard-deletes a task within a company.
///
/// When the company's last task goes, the task id sequence is rewound
/// so the next created task receives id 1; deleting a non-last task
/// never touches the sequence.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the task is outside the
/// company, or another error if a statement fails.
pub fn delete_task(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting task {} in company {}", task_id, company_id);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::delete(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::task_id.eq(task_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Task with ID {task_id} not found"
            )));
        }

        let remaining: i64 = queries::tasks::count_tasks(conn, company_id)?;
        if remaining == 0 {
            debug!("Company {} has no tasks left; rewinding id sequence", company_id);
            sqlite::reset_task_sequence(conn)?;
        }

        Ok(())
    })
}
