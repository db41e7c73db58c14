// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Company queries.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::CompanyData;
use crate::diesel_schema::companies;
use crate::error::PersistenceError;

/// Diesel Queryable struct for company rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = companies)]
struct CompanyRow {
    company_id: i64,
    name: String,
    code: String,
    created_at: String,
}

impl From<CompanyRow> for CompanyData {
    fn from(row: CompanyRow) -> Self {
        Self {
            company_id: row.company_id,
            name: row.name,
            code: row.code,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a company by its unique code.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no company carries the code.
pub fn get_company_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<CompanyData>, PersistenceError> {
    debug!("Looking up company by code: {}", code);

    let result: Result<CompanyRow, diesel::result::Error> = companies::table
        .filter(companies::code.eq(code))
        .select(CompanyRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a company by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the company does not exist.
pub fn get_company_by_id(
    conn: &mut SqliteConnection,
    company_id: i64,
) -> Result<Option<CompanyData>, PersistenceError> {
    debug!("Looking up company by ID: {}", company_id);

    let result: Result<CompanyRow, diesel::result::Error> = companies::table
        .filter(companies::company_id.eq(company_id))
        .select(CompanyRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}
