// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Company mutations.

use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::companies;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new company.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The company display name
/// * `code` - The globally unique company code
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateField` if the code is taken, or
/// another error if the insert fails.
pub fn create_company(
    conn: &mut SqliteConnection,
    name: &str,
    code: &str,
) -> Result<i64, PersistenceError> {
    info!("Creating company '{}' with code '{}'", name, code);

    diesel::insert_into(companies::table)
        .values((companies::name.eq(name), companies::code.eq(code)))
        .execute(conn)?;

    let company_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(company_id, "Company created successfully");
    Ok(company_id)
}

/// Renames a company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the company does not exist,
/// or another error if the update fails.
pub fn update_company_name(
    conn: &mut SqliteConnection,
    company_id: i64,
    name: &str,
) -> Result<(), PersistenceError> {
    info!("Renaming company {} to '{}'", company_id, name);

    let rows_affected: usize = diesel::update(companies::table)
        .filter(companies::company_id.eq(company_id))
        .set(companies::name.eq(name))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Company with ID {company_id} not found"
        )));
    }

    Ok(())
}
