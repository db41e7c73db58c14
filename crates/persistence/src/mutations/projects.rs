// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project mutations.

use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::projects;
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new project within a company.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateField` when the code is already
/// used in this company, or another error if the insert fails.
pub fn create_project(
    conn: &mut SqliteConnection,
    company_id: i64,
    name: &str,
    code: &str,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating project '{}' with code '{}' in company {}",
        name, code, company_id
    );

    diesel::insert_into(projects::table)
        .values((
            projects::company_id.eq(company_id),
            projects::name.eq(name),
            projects::code.eq(code),
        ))
        .execute(conn)?;

    let project_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(project_id, "Project created successfully");
    Ok(project_id)
}

/// Updates a project's name and/or code within a company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project is outside the
/// company, `DuplicateField` on a code collision, or another error if
/// the update fails.
pub fn update_project(
    conn: &mut SqliteConnection,
    company_id: i64,
    project_id: i64,
    name: Option<&str>,
    code: Option<&str>,
) -> Result<(), PersistenceError> {
    if name.is_none() && code.is_none() {
        return Ok(());
    }

    let rows_affected: usize = diesel::update(projects::table)
        .filter(projects::company_id.eq(company_id))
        .filter(projects::project_id.eq(project_id))
        .set((
            name.map(|v| projects::name.eq(v)),
            code.map(|v| projects::code.eq(v)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Project with ID {project_id} not found"
        )));
    }

    Ok(())
}

/// Deletes a project within a company.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the project is outside the
/// company, or another error if the delete fails.
pub fn delete_project(
    conn: &mut SqliteConnection,
    company_id: i64,
    project_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting project {} in company {}", project_id, company_id);

    let rows_affected: usize = diesel::delete(projects::table)
        .filter(projects::company_id.eq(company_id))
        .filter(projects::project_id.eq(project_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Project with ID {project_id} not found"
        )));
    }

    Ok(())
}
