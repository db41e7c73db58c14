// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.
//!
//! Passwords are hashed here, at the write boundary, so no plain-text
//! password ever reaches a row struct.

use diesel::prelude::*;
use tracing::{debug, info};

use taskcrew_domain::SelectedEmployees;

use crate::data_models::NewUser;
use crate::diesel_schema::{task_reasons, tasks, time_updates, users};
use crate::error::PersistenceError;
use crate::sqlite;

/// Creates a new user within a company.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `company_id` - The owning company
/// * `user` - The user fields; the password is hashed with bcrypt
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateField` when the username or
/// email is taken, or another error if the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    company_id: i64,
    user: &NewUser,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating user '{}' in company {} with role '{}'",
        user.username, company_id, user.role
    );

    let password_hash: String = bcrypt::hash(&user.password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::company_id.eq(company_id),
            users::username.eq(&user.username),
            users::email.eq(&user.email),
            users::password_hash.eq(&password_hash),
            users::first_name.eq(&user.first_name),
            users::last_name.eq(&user.last_name),
            users::role.eq(&user.role),
            users::department.eq(&user.department),
        ))
        .execute(conn)?;

    let user_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    info!(user_id, "User created successfully");
    Ok(user_id)
}

/// Updatable user fields for the admin update path.
///
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    /// Replacement password, hashed before storage.
    pub password: Option<String>,
    /// Normalized selected-employees list.
    pub selected_employees: Option<SelectedEmployees>,
}

impl UserChanges {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.department.is_none()
            && self.password.is_none()
            && self.selected_employees.is_none()
    }
}

/// Applies partial updates to a user within a company.
///
/// The selected-employees list is written in its canonical encoded
/// form regardless of how the caller supplied it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist in
/// this company, or another error if the update fails.
pub fn update_user(
    conn: &mut SqliteConnection,
    company_id: i64,
    user_id: i64,
    changes: &UserChanges,
) -> Result<(), PersistenceError> {
    debug!("Updating user {} in company {}", user_id, company_id);

    if changes.is_empty() {
        return Ok(());
    }

    let password_hash: Option<String> = match &changes.password {
        Some(password) => Some(
            bcrypt::hash(password, bcrypt::DEFAULT_COST)
                .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?,
        ),
        None => None,
    };
    let selected_encoded: Option<String> = changes
        .selected_employees
        .as_ref()
        .map(SelectedEmployees::encode);

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::company_id.eq(company_id))
        .filter(users::user_id.eq(user_id))
        .set((
            changes
                .first_name
                .as_ref()
                .map(|v| users::first_name.eq(v)),
            changes.last_name.as_ref().map(|v| users::last_name.eq(v)),
            changes.role.as_ref().map(|v| users::role.eq(v)),
            changes
                .department
                .as_ref()
                .map(|v| users::department.eq(v)),
            password_hash.as_ref().map(|v| users::password_hash.eq(v)),
            selected_encoded
                .as_ref()
                .map(|v| users::selected_employees.eq(v)),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }

    Ok(())
}

/// Deletes a user within a company, along with their assigned tasks.
///
/// Task cleanup is handler-style manual cascade: the user's assigned
/// tasks go first (their reason and timer rows cascade through the
/// schema), references as assigner are cleared, then the user row.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist in
/// this company, or another error if a delete fails.
pub fn delete_user(
    conn: &mut SqliteConnection,
    company_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    info!("Deleting user {} in company {}", user_id, company_id);

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::assigned_to.eq(user_id))
            .execute(conn)?;

        diesel::update(tasks::table)
            .filter(tasks::company_id.eq(company_id))
            .filter(tasks::assigned_by.eq(user_id))
            .set(tasks::assigned_by.eq(None::<i64>))
            .execute(conn)?;

        // Audit rows the user left on other people's tasks still
        // reference them; sweep those before the user row goes.
        diesel::delete(task_reasons::table)
            .filter(task_reasons::user_id.eq(user_id))
            .execute(conn)?;
        diesel::delete(time_updates::table)
            .filter(time_updates::user_id.eq(user_id))
            .execute(conn)?;

        let rows_affected: usize = diesel::delete(users::table)
            .filter(users::company_id.eq(company_id))
            .filter(users::user_id.eq(user_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "User with ID {user_id} not found"
            )));
        }

        Ok(())
    })?;

    info!("Deleted user {}", user_id);
    Ok(())
}
