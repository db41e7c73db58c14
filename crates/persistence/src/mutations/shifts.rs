// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift and shift-break mutations.
//!
//! A shift owns its breaks 1:N, but the cascade on deletion is managed
//! here rather than by the database, matching how the handlers have
//! always cleaned up.

use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::{shift_breaks, shifts};
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite;

/// Creates a new shift within a company.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_shift(
    conn: &mut SqliteConnection,
    company_id: i64,
    name: &str,
    start_time: &str,
    end_time: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating shift '{}' in company {}", name, company_id);

    diesel::insert_into(shifts::table)
        .values((
            shifts::company_id.eq(company_id),
            shifts::name.eq(name),
            shifts::start_time.eq(start_time),
            shifts::end_time.eq(end_time),
        ))
        .execute(conn)?;

    let shift_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(shift_id, "Shift created successfully");
    Ok(shift_id)
}

/// Updates a shift's fields within a company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shift is outside the
/// company, or another error if the update fails.
pub fn update_shift(
    conn: &mut SqliteConnection,
    company_id: i64,
    shift_id: i64,
    name: Option<&str>,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<(), PersistenceError> {
    if name.is_none() && start_time.is_none() && end_time.is_none() {
        return Ok(());
    }

    let rows_affected: usize = diesel::update(shifts::table)
        .filter(shifts::company_id.eq(company_id))
        .filter(shifts::shift_id.eq(shift_id))
        .set((
            name.map(|v| shifts::name.eq(v)),
            start_time.map(|v| shifts::start_time.eq(v)),
            end_time.map(|v| shifts::end_time.eq(v)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Shift with ID {shift_id} not found"
        )));
    }

    Ok(())
}

/// Deletes a shift and its breaks within a company.
///
/// Break cleanup runs first in the same transaction (manual cascade).
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the shift is outside the
/// company, or another error if a statement fails.
pub fn delete_shift(
    conn: &mut SqliteConnection,
    company_id: i64,
    shift_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting shift {} in company {}", shift_id, company_id);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if queries::shifts::get_shift(conn, company_id, shift_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Shift with ID {shift_id} not found"
            )));
        }

        diesel::delete(shift_breaks::table)
            .filter(shift_breaks::shift_id.eq(shift_id))
            .execute(conn)?;

        diesel::delete(shifts::table)
            .filter(shifts::company_id.eq(company_id))
            .filter(shifts::shift_id.eq(shift_id))
            .execute(conn)?;

        Ok(())
    })
}

/// Creates a break under a shift of this company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the parent shift is outside
/// the company, or another error if the insert fails.
pub fn create_shift_break(
    conn: &mut SqliteConnection,
    company_id: i64,
    shift_id: i64,
    name: &str,
    start_time: &str,
    end_time: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating break '{}' under shift {} in company {}",
        name, shift_id, company_id
    );

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if queries::shifts::get_shift(conn, company_id, shift_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Shift with ID {shift_id} not found"
            )));
        }

        diesel::insert_into(shift_breaks::table)
            .values((
                shift_breaks::shift_id.eq(shift_id),
                shift_breaks::name.eq(name),
                shift_breaks::start_time.eq(start_time),
                shift_breaks::end_time.eq(end_time),
            ))
            .execute(conn)?;

        sqlite::get_last_insert_rowid(conn)
    })
}

/// Updates a break, scoped through its parent shift's company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no break matches within the
/// company, or another error if the update fails.
pub fn update_shift_break(
    conn: &mut SqliteConnection,
    company_id: i64,
    shift_break_id: i64,
    name: Option<&str>,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> Result<(), PersistenceError> {
    if name.is_none() && start_time.is_none() && end_time.is_none() {
        return Ok(());
    }

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if queries::shifts::get_shift_break(conn, company_id, shift_break_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Shift break with ID {shift_break_id} not found"
            )));
        }

        diesel::update(shift_breaks::table)
            .filter(shift_breaks::shift_break_id.eq(shift_break_id))
            .set((
                name.map(|v| shift_breaks::name.eq(v)),
                start_time.map(|v| shift_breaks::start_time.eq(v)),
                end_time.map(|v| shift_breaks::end_time.eq(v)),
            ))
            .execute(conn)?;

        Ok(())
    })
}

/// Deletes a break, scoped through its parent shift's company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no break matches within the
/// company, or another error if the delete fails.
pub fn delete_shift_break(
    conn: &mut SqliteConnection,
    company_id: i64,
    shift_break_id: i64,
) -> Result<(), PersistenceError> {
    info!(
        "Deleting shift break {} in company {}",
        shift_break_id, company_id
    );

    conn.transaction::<_, PersistenceError, _>(|conn| {
        if queries::shifts::get_shift_break(conn, company_id, shift_break_id)?.is_none() {
            return Err(PersistenceError::NotFound(format!(
                "Shift break with ID {shift_break_id} not found"
            )));
        }

        diesel::delete(shift_breaks::table)
            .filter(shift_breaks::shift_break_id.eq(shift_break_id))
            .execute(conn)?;

        Ok(())
    })
}
