// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Declared holiday queries.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::HolidayData;
use crate::diesel_schema::declared_holidays;
use crate::error::PersistenceError;

/// Diesel Queryable struct for holiday rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = declared_holidays)]
struct HolidayRow {
    holiday_id: i64,
    company_id: i64,
    holiday_date: String,
    description: String,
    created_at: String,
}

impl From<HolidayRow> for HolidayData {
    fn from(row: HolidayRow) -> Self {
        Self {
            holiday_id: row.holiday_id,
            company_id: row.company_id,
            holiday_date: row.holiday_date,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a declared holiday by id within a company.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the holiday does not exist in this company.
pub fn get_holiday(
    conn: &mut SqliteConnection,
    company_id: i64,
    holiday_id: i64,
) -> Result<Option<HolidayData>, PersistenceError> {
    debug!("Looking up holiday {} in company {}", holiday_id, company_id);

    let result: Result<HolidayRow, diesel::result::Error> = declared_holidays::table
        .filter(declared_holidays::company_id.eq(company_id))
        .filter(declared_holidays::holiday_id.eq(holiday_id))
        .select(HolidayRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all declared holidays of a company, ordered by date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_holidays(
    conn: &mut SqliteConnection,
    company_id: i64,
) -> Result<Vec<HolidayData>, PersistenceError> {
    debug!("Listing holidays for company {}", company_id);

    let rows: Vec<HolidayRow> = declared_holidays::table
        .filter(declared_holidays::company_id.eq(company_id))
        .order(declared_holidays::holiday_date.asc())
        .select(HolidayRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
