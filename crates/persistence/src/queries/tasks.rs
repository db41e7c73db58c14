// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task queries.
//!
//! The overlap query compares the canonical RFC 3339 text timestamps
//! lexicographically, which matches chronological order because every
//! stored bound is UTC with whole-second precision.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::TaskData;
use crate::diesel_schema::tasks;
use crate::error::PersistenceError;

/// Diesel Queryable struct for task rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tasks)]
pub(crate) struct TaskRow {
    pub(crate) task_id: i64,
    pub(crate) company_id: i64,
    pub(crate) assigned_by: Option<i64>,
    pub(crate) assigned_to: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) project_title: Option<String>,
    pub(crate) priority: i32,
    pub(crate) status: String,
    pub(crate) approval_status: String,
    pub(crate) reason: Option<String>,
    pub(crate) start: String,
    pub(crate) end_time: String,
    pub(crate) duration_minutes: i32,
    pub(crate) timer_start: Option<String>,
    pub(crate) elapsed_seconds: i64,
    pub(crate) start_early_reason: Option<String>,
    pub(crate) start_late_reason: Option<String>,
    pub(crate) pause_reason: Option<String>,
    pub(crate) stop_reason: Option<String>,
    pub(crate) added_by_user: i32,
    pub(crate) created_at: String,
}

impl From<TaskRow> for TaskData {
    fn from(row: TaskRow) -> Self {
        Self {
            task_id: row.task_id,
            company_id: row.company_id,
            assigned_by: row.assigned_by,
            assigned_to: row.assigned_to,
            title: row.title,
            description: row.description,
            project_title: row.project_title,
            priority: row.priority,
            status: row.status,
            approval_status: row.approval_status,
            reason: row.reason,
            start: row.start,
            end_time: row.end_time,
            duration_minutes: row.duration_minutes,
            timer_start: row.timer_start,
            elapsed_seconds: row.elapsed_seconds,
            start_early_reason: row.start_early_reason,
            start_late_reason: row.start_late_reason,
            pause_reason: row.pause_reason,
            stop_reason: row.stop_reason,
            added_by_user: row.added_by_user != 0,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a task by id within a company.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the task does not exist in this company.
pub fn get_task(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
) -> Result<Option<TaskData>, PersistenceError> {
    debug!("Looking up task {} in company {}", task_id, company_id);

    let result: Result<TaskRow, diesel::result::Error> = tasks::table
        .filter(tasks::company_id.eq(company_id))
        .filter(tasks::task_id.eq(task_id))
        .select(TaskRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a task by id within a company, additionally requiring the
/// given assignee. The self-service mutation scope.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no task matches all three predicates.
pub fn get_task_for_assignee(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
    assignee_id: i64,
) -> Result<Option<TaskData>, PersistenceError> {
    debug!(
        "Looking up task {} in company {} for assignee {}",
        task_id, company_id, assignee_id
    );

    let result: Result<TaskRow, diesel::result::Error> = tasks::table
        .filter(tasks::company_id.eq(company_id))
        .filter(tasks::task_id.eq(task_id))
        .filter(tasks::assigned_to.eq(assignee_id))
        .select(TaskRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all tasks of a company, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_tasks(
    conn: &mut SqliteConnection,
    company_id: i64,
) -> Result<Vec<TaskData>, PersistenceError> {
    debug!("Listing tasks for company {}", company_id);

    let rows: Vec<TaskRow> = tasks::table
        .filter(tasks::company_id.eq(company_id))
        .order(tasks::task_id.asc())
        .select(TaskRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Lists the tasks of one assignee within a company, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_tasks_for_assignee(
    conn: &mut SqliteConnection,
    company_id: i64,
    assignee_id: i64,
) -> Result<Vec<TaskData>, PersistenceError> {
    debug!(
        "Listing tasks for assignee {} in company {}",
        assignee_id, company_id
    );

    let rows: Vec<TaskRow> = tasks::table
        .filter(tasks::company_id.eq(company_id))
        .filter(tasks::assigned_to.eq(assignee_id))
        .order(tasks::task_id.asc())
        .select(TaskRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Finds every OTHER task of an assignee whose interval `[start,
/// end_time)` overlaps `[window_start, window_end)`.
///
/// Half-open overlap: `existing.start < window_end AND
/// existing.end_time > window_start`. Result order is store order; the
/// conflict resolver deliberately inherits that nondeterminism.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_overlapping_tasks(
    conn: &mut SqliteConnection,
    company_id: i64,
    assignee_id: i64,
    exclude_task_id: i64,
    window_start: &str,
    window_end: &str,
) -> Result<Vec<TaskData>, PersistenceError> {
    debug!(
        "Finding tasks of assignee {} in company {} overlapping [{}, {})",
        assignee_id, company_id, window_start, window_end
    );

    let rows: Vec<TaskRow> = tasks::table
        .filter(tasks::company_id.eq(company_id))
        .filter(tasks::assigned_to.eq(assignee_id))
        .filter(tasks::task_id.ne(exclude_task_id))
        .filter(tasks::start.lt(window_end))
        .filter(tasks::end_time.gt(window_start))
        .select(TaskRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Counts the tasks remaining in a company.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_tasks(
    conn: &mut SqliteConnection,
    company_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(tasks::table
        .filter(tasks::company_id.eq(company_id))
        .count()
        .get_result(conn)?)
}
