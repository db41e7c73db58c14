// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift and shift-break queries.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{ShiftBreakData, ShiftData};
use crate::diesel_schema::{shift_breaks, shifts};
use crate::error::PersistenceError;

/// Diesel Queryable struct for shift rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = shifts)]
struct ShiftRow {
    shift_id: i64,
    company_id: i64,
    name: String,
    start_time: String,
    end_time: String,
    created_at: String,
}

impl From<ShiftRow> for ShiftData {
    fn from(row: ShiftRow) -> Self {
        Self {
            shift_id: row.shift_id,
            company_id: row.company_id,
            name: row.name,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        }
    }
}

/// Diesel Queryable struct for shift break rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_breaks)]
struct ShiftBreakRow {
    shift_break_id: i64,
    shift_id: i64,
    name: String,
    start_time: String,
    end_time: String,
}

impl From<ShiftBreakRow> for ShiftBreakData {
    fn from(row: ShiftBreakRow) -> Self {
        Self {
            shift_break_id: row.shift_break_id,
            shift_id: row.shift_id,
            name: row.name,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}

/// Retrieves a shift by id within a company.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the shift does not exist in this company.
pub fn get_shift(
    conn: &mut SqliteConnection,
    company_id: i64,
    shift_id: i64,
) -> Result<Option<ShiftData>, PersistenceError> {
    debug!("Looking up shift {} in company {}", shift_id, company_id);

    let result: Result<ShiftRow, diesel::result::Error> = shifts::table
        .filter(shifts::company_id.eq(company_id))
        .filter(shifts::shift_id.eq(shift_id))
        .select(ShiftRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all shifts of a company, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_shifts(
    conn: &mut SqliteConnection,
    company_id: i64,
) -> Result<Vec<ShiftData>, PersistenceError> {
    debug!("Listing shifts for company {}", company_id);

    let rows: Vec<ShiftRow> = shifts::table
        .filter(shifts::company_id.eq(company_id))
        .order(shifts::shift_id.asc())
        .select(ShiftRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Retrieves a shift break, scoped through its parent shift's company.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no break matches within the company.
pub fn get_shift_break(
    conn: &mut SqliteConnection,
    company_id: i64,
    shift_break_id: i64,
) -> Result<Option<ShiftBreakData>, PersistenceError> {
    debug!(
        "Looking up shift break {} in company {}",
        shift_break_id, company_id
    );

    let result: Result<ShiftBreakRow, diesel::result::Error> = shift_breaks::table
        .inner_join(shifts::table)
        .filter(shifts::company_id.eq(company_id))
        .filter(shift_breaks::shift_break_id.eq(shift_break_id))
        .select(ShiftBreakRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the breaks of one shift, ordered by id.
///
/// The shift itself must belong to the company; an unknown or foreign
/// shift yields an empty list, matching the scope-conflating policy.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_breaks_for_shift(
    conn: &mut SqliteConnection,
    company_id: i64,
    shift_id: i64,
) -> Result<Vec<ShiftBreakData>, PersistenceError> {
    debug!(
        "Listing breaks for shift {} in company {}",
        shift_id, company_id
    );

    let rows: Vec<ShiftBreakRow> = shift_breaks::table
        .inner_join(shifts::table)
        .filter(shifts::company_id.eq(company_id))
        .filter(shift_breaks::shift_id.eq(shift_id))
        .order(shift_breaks::shift_break_id.asc())
        .select(ShiftBreakRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
