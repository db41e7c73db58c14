// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project queries.

use diesel::prelude::*;
use tracing::debug;

use crate::data_models::ProjectData;
use crate::diesel_schema::projects;
use crate::error::PersistenceError;

/// Diesel Queryable struct for project rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = projects)]
struct ProjectRow {
    project_id: i64,
    company_id: i64,
    name: String,
    code: String,
    created_at: String,
}

impl From<ProjectRow> for ProjectData {
    fn from(row: ProjectRow) -> Self {
        Self {
            project_id: row.project_id,
            company_id: row.company_id,
            name: row.name,
            code: row.code,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a project by id within a company.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the project does not exist in this company.
pub fn get_project(
    conn: &mut SqliteConnection,
    company_id: i64,
    project_id: i64,
) -> Result<Option<ProjectData>, PersistenceError> {
    debug!("Looking up project {} in company {}", project_id, company_id);

    let result: Result<ProjectRow, diesel::result::Error> = projects::table
        .filter(projects::company_id.eq(company_id))
        .filter(projects::project_id.eq(project_id))
        .select(ProjectRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all projects of a company, ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_projects(
    conn: &mut SqliteConnection,
    company_id: i64,
) -> Result<Vec<ProjectData>, PersistenceError> {
    debug!("Listing projects for company {}", company_id);

    let rows: Vec<ProjectRow> = projects::table
        .filter(projects::company_id.eq(company_id))
        .order(projects::project_id.asc())
        .select(ProjectRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Into::into).collect())
}
