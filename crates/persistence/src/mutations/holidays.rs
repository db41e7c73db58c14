// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Declared holiday mutations.

use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::declared_holidays;
use crate::error::PersistenceError;
use crate::sqlite;

/// Declares a holiday for a company.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_holiday(
    conn: &mut SqliteConnection,
    company_id: i64,
    holiday_date: &str,
    description: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Declaring holiday on {} for company {}",
        holiday_date, company_id
    );

    diesel::insert_into(declared_holidays::table)
        .values((
            declared_holidays::company_id.eq(company_id),
            declared_holidays::holiday_date.eq(holiday_date),
            declared_holidays::description.eq(description),
        ))
        .execute(conn)?;

    let holiday_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(holiday_id, "Holiday declared successfully");
    Ok(holiday_id)
}

/// Updates a declared holiday within a company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the holiday is outside the
/// company, or another error if the update fails.
pub fn update_holiday(
    conn: &mut SqliteConnection,
    company_id: i64,
    holiday_id: i64,
    holiday_date: Option<&str>,
    description: Option<&str>,
) -> Result<(), PersistenceError> {
    if holiday_date.is_none() && description.is_none() {
        return Ok(());
    }

    let rows_affected: usize = diesel::update(declared_holidays::table)
        .filter(declared_holidays::company_id.eq(company_id))
        .filter(declared_holidays::holiday_id.eq(holiday_id))
        .set((
            holiday_date.map(|v| declared_holidays::holiday_date.eq(v)),
            description.map(|v| declared_holidays::description.eq(v)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Holiday with ID {holiday_id} not found"
        )));
    }

    Ok(())
}

/// Deletes a declared holiday within a company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the holiday is outside the
/// company, or another error if the delete fails.
pub fn delete_holiday(
    conn: &mut SqliteConnection,
    company_id: i64,
    holiday_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting holiday {} in company {}", holiday_id, company_id);

    let rows_affected: usize = diesel::delete(declared_holidays::table)
        .filter(declared_holidays::company_id.eq(company_id))
        .filter(declared_holidays::holiday_id.eq(holiday_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Holiday with ID {holiday_id} not found"
        )));
    }

    Ok(())
}
