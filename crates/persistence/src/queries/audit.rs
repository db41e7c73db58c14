// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reason and timer audit log queries.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{TaskReasonData, TimeUpdateData};
use crate::diesel_schema::{task_reasons, tasks, time_updates};
use crate::error::PersistenceError;

/// Diesel Queryable struct for task reason rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = task_reasons)]
struct TaskReasonRow {
    task_reason_id: i64,
    task_id: i64,
    user_id: i64,
    reason_type: i32,
    reason_text: String,
    created_at: String,
}

/// Diesel Queryable struct for time update rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = time_updates)]
struct TimeUpdateRow {
    time_update_id: i64,
    task_id: i64,
    user_id: i64,
    update_type: i32,
    recorded_at: String,
}

/// Lists the reason audit rows of a task, oldest first.
///
/// Tenant scoping rides on the task: the join restricts results to
/// tasks of the given company.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_reasons_for_task(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
) -> Result<Vec<TaskReasonData>, PersistenceError> {
    debug!("Listing reasons for task {} in company {}", task_id, company_id);

    let rows: Vec<TaskReasonRow> = task_reasons::table
        .inner_join(tasks::table)
        .filter(tasks::company_id.eq(company_id))
        .filter(task_reasons::task_id.eq(task_id))
        .order(task_reasons::task_reason_id.asc())
        .select(TaskReasonRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| TaskReasonData {
            task_reason_id: row.task_reason_id,
            task_id: row.task_id,
            user_id: row.user_id,
            reason_type: row.reason_type,
            reason_text: row.reason_text,
            created_at: row.created_at,
        })
        .collect())
}

/// Lists the timer log rows of a task, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_time_updates_for_task(
    conn: &mut SqliteConnection,
    company_id: i64,
    task_id: i64,
) -> Result<Vec<TimeUpdateData>, PersistenceError> {
    debug!(
        "Listing time updates for task {} in company {}",
        task_id, company_id
    );

    let rows: Vec<TimeUpdateRow> = time_updates::table
        .inner_join(tasks::table)
        .filter(tasks::company_id.eq(company_id))
        .filter(time_updates::task_id.eq(task_id))
        .order(time_updates::time_update_id.asc())
        .select(TimeUpdateRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| TimeUpdateData {
            time_update_id: row.time_update_id,
            task_id: row.task_id,
            user_id: row.user_id,
            update_type: row.update_type,
            recorded_at: row.recorded_at,
        })
        .collect())
}
