// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Taskcrew task-management system.
//!
//! Built on Diesel over `SQLite`. The adapter exposes two surfaces:
//!
//! - a small unscoped one (`Persistence` methods) for the operations
//!   that run before a tenant is known: login lookup, registration,
//!   initialization;
//! - [`CompanyScope`], a per-request capability handle that closes over
//!   a `company_id` and supplies it to every query and mutation it
//!   builds. Handlers never pass a tenant id themselves, so a query
//!   without the tenant predicate cannot be expressed.
//!
//! In-memory databases get a unique name from an atomic counter so
//! tests are isolated without time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use taskcrew_audit::ReasonEvent;
use taskcrew_domain::TimeWindow;

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{
    CompanyData, HolidayData, NewTask, NewUser, ProjectData, ShiftBreakData, ShiftData,
    TaskChanges, TaskData, TaskReasonData, TimeUpdateData, UserData,
};
pub use error::PersistenceError;
pub use mutations::users::UserChanges;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter owning one `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates an adapter backed by a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:taskcrew_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates an adapter backed by a file database, enabling WAL.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Borrows a tenant-scoped capability handle for one company.
    ///
    /// Everything reachable through the handle carries the company
    /// predicate; this is the only way handlers touch tenant data.
    pub fn for_company(&mut self, company_id: i64) -> CompanyScope<'_> {
        CompanyScope {
            conn: &mut self.conn,
            company_id,
        }
    }

    /// Retrieves a company by its unique code (registration path).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_company_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<CompanyData>, PersistenceError> {
        queries::companies::get_company_by_code(&mut self.conn, code)
    }

    /// Creates a company (registration path).
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` when the code is taken.
    pub fn create_company(&mut self, name: &str, code: &str) -> Result<i64, PersistenceError> {
        mutations::companies::create_company(&mut self.conn, name, code)
    }

    /// Retrieves a user by email across tenants (login path).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Creates a user in a company (registration path; admin creation
    /// goes through [`CompanyScope::create_user`]).
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` when the username or email is taken.
    pub fn create_user(
        &mut self,
        company_id: i64,
        user: &NewUser,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, company_id, user)
    }

    /// Verifies a plain-text password against a stored bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash is malformed.
    pub fn verify_password(
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }
}

/// Tenant-scoped capability handle.
///
/// Constructed per request from the authenticated `company_id`; every
/// method it exposes filters by that id, so cross-tenant ids simply
/// match nothing and surface as `NotFound`.
pub struct CompanyScope<'a> {
    conn: &'a mut SqliteConnection,
    company_id: i64,
}

impl CompanyScope<'_> {
    /// The tenant this handle is bound to.
    #[must_use]
    pub const fn company_id(&self) -> i64 {
        self.company_id
    }

    // --- company ---

    /// Retrieves this company's details.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn company_details(&mut self) -> Result<Option<CompanyData>, PersistenceError> {
        queries::companies::get_company_by_id(self.conn, self.company_id)
    }

    /// Renames this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn rename_company(&mut self, name: &str) -> Result<(), PersistenceError> {
        mutations::companies::update_company_name(self.conn, self.company_id, name)
    }

    // --- users ---

    /// Retrieves a user of this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user(self.conn, self.company_id, user_id)
    }

    /// Lists this company's users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users(self.conn, self.company_id)
    }

    /// Creates a user in this company.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` when the username or email is taken.
    pub fn create_user(&mut self, user: &NewUser) -> Result<i64, PersistenceError> {
        mutations::users::create_user(self.conn, self.company_id, user)
    }

    /// Applies partial updates to a user of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the user is outside this company.
    pub fn update_user(
        &mut self,
        user_id: i64,
        changes: &UserChanges,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_user(self.conn, self.company_id, user_id, changes)
    }

    /// Deletes a user of this company along with their assigned tasks.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the user is outside this company.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(self.conn, self.company_id, user_id)
    }

    // --- tasks ---

    /// Creates a task in this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_task(&mut self, task: &NewTask) -> Result<i64, PersistenceError> {
        mutations::tasks::create_task(self.conn, self.company_id, task)
    }

    /// Retrieves a task of this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_task(&mut self, task_id: i64) -> Result<Option<TaskData>, PersistenceError> {
        queries::tasks::get_task(self.conn, self.company_id, task_id)
    }

    /// Retrieves a task of this company held by a specific assignee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_task_for_assignee(
        &mut self,
        task_id: i64,
        assignee_id: i64,
    ) -> Result<Option<TaskData>, PersistenceError> {
        queries::tasks::get_task_for_assignee(self.conn, self.company_id, task_id, assignee_id)
    }

    /// Lists this company's tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tasks(&mut self) -> Result<Vec<TaskData>, PersistenceError> {
        queries::tasks::list_tasks(self.conn, self.company_id)
    }

    /// Lists the tasks of one assignee in this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tasks_for_assignee(
        &mut self,
        assignee_id: i64,
    ) -> Result<Vec<TaskData>, PersistenceError> {
        queries::tasks::list_tasks_for_assignee(self.conn, self.company_id, assignee_id)
    }

    /// Applies partial updates to a task; `assignee` narrows the scope
    /// for the self-service path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row matches the scope.
    pub fn update_task(
        &mut self,
        task_id: i64,
        assignee: Option<i64>,
        changes: &TaskChanges,
    ) -> Result<(), PersistenceError> {
        mutations::tasks::update_task(self.conn, self.company_id, task_id, assignee, changes)
    }

    /// Starts (or restarts) a task timer and logs the start event.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is outside this company.
    pub fn start_timer(
        &mut self,
        task_id: i64,
        user_id: i64,
        now: &str,
    ) -> Result<(), PersistenceError> {
        mutations::tasks::start_timer(self.conn, self.company_id, task_id, user_id, now)
    }

    /// Stores a pause figure verbatim.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is outside this company.
    pub fn set_elapsed_seconds(
        &mut self,
        task_id: i64,
        elapsed_seconds: i64,
    ) -> Result<(), PersistenceError> {
        mutations::tasks::set_elapsed_seconds(self.conn, self.company_id, task_id, elapsed_seconds)
    }

    /// Logs a stop event; no column or status changes.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is outside this company.
    pub fn record_stop(
        &mut self,
        task_id: i64,
        user_id: i64,
        now: &str,
    ) -> Result<(), PersistenceError> {
        mutations::tasks::record_stop(self.conn, self.company_id, task_id, user_id, now)
    }

    /// Directly updates the flat timer columns.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is outside this company.
    pub fn put_timer(
        &mut self,
        task_id: i64,
        timer_start: Option<String>,
        elapsed_seconds: Option<i64>,
    ) -> Result<(), PersistenceError> {
        mutations::tasks::put_timer(
            self.conn,
            self.company_id,
            task_id,
            timer_start,
            elapsed_seconds,
        )
    }

    /// Records a reason on both surfaces atomically.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is outside this company;
    /// nothing is written in that case.
    pub fn record_reason(&mut self, event: &ReasonEvent) -> Result<i64, PersistenceError> {
        mutations::tasks::record_reason(self.conn, self.company_id, event)
    }

    /// Lists a task's reason audit rows, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reasons(
        &mut self,
        task_id: i64,
    ) -> Result<Vec<TaskReasonData>, PersistenceError> {
        queries::audit::list_reasons_for_task(self.conn, self.company_id, task_id)
    }

    /// Lists a task's timer log rows, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_time_updates(
        &mut self,
        task_id: i64,
    ) -> Result<Vec<TimeUpdateData>, PersistenceError> {
        queries::audit::list_time_updates_for_task(self.conn, self.company_id, task_id)
    }

    /// Sets a task's approval verdict.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is outside this company.
    pub fn set_approval(
        &mut self,
        task_id: i64,
        actor_id: i64,
        approval_status: &str,
        reason: Option<&str>,
        now: &str,
    ) -> Result<(), PersistenceError> {
        mutations::tasks::set_approval(
            self.conn,
            self.company_id,
            task_id,
            actor_id,
            approval_status,
            reason,
            now,
        )
    }

    /// Reassigns a task, pushing conflicting tasks out of the way.
    ///
    /// Returns the updated task plus the number of rescheduled
    /// conflicts.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task or assignee is outside this
    /// company.
    pub fn reassign_task(
        &mut self,
        task_id: i64,
        new_assignee_id: i64,
        window: &TimeWindow,
    ) -> Result<(TaskData, usize), PersistenceError> {
        mutations::tasks::reassign_task(
            self.conn,
            self.company_id,
            task_id,
            new_assignee_id,
            window,
        )
    }

    /// Hard-deletes a task, rewinding the id sequence if it was this
    /// company's last one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task is outside this company.
    pub fn delete_task(&mut self, task_id: i64) -> Result<(), PersistenceError> {
        mutations::tasks::delete_task(self.conn, self.company_id, task_id)
    }

    // --- projects ---

    /// Retrieves a project of this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_project(
        &mut self,
        project_id: i64,
    ) -> Result<Option<ProjectData>, PersistenceError> {
        queries::projects::get_project(self.conn, self.company_id, project_id)
    }

    /// Lists this company's projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_projects(&mut self) -> Result<Vec<ProjectData>, PersistenceError> {
        queries::projects::list_projects(self.conn, self.company_id)
    }

    /// Creates a project in this company.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateField` when the code is already used here.
    pub fn create_project(&mut self, name: &str, code: &str) -> Result<i64, PersistenceError> {
        mutations::projects::create_project(self.conn, self.company_id, name, code)
    }

    /// Updates a project of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the project is outside this company.
    pub fn update_project(
        &mut self,
        project_id: i64,
        name: Option<&str>,
        code: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::projects::update_project(self.conn, self.company_id, project_id, name, code)
    }

    /// Deletes a project of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the project is outside this company.
    pub fn delete_project(&mut self, project_id: i64) -> Result<(), PersistenceError> {
        mutations::projects::delete_project(self.conn, self.company_id, project_id)
    }

    // --- shifts ---

    /// Retrieves a shift of this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_shift(&mut self, shift_id: i64) -> Result<Option<ShiftData>, PersistenceError> {
        queries::shifts::get_shift(self.conn, self.company_id, shift_id)
    }

    /// Lists this company's shifts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_shifts(&mut self) -> Result<Vec<ShiftData>, PersistenceError> {
        queries::shifts::list_shifts(self.conn, self.company_id)
    }

    /// Creates a shift in this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_shift(
        &mut self,
        name: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::shifts::create_shift(self.conn, self.company_id, name, start_time, end_time)
    }

    /// Updates a shift of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the shift is outside this company.
    pub fn update_shift(
        &mut self,
        shift_id: i64,
        name: Option<&str>,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::shifts::update_shift(
            self.conn,
            self.company_id,
            shift_id,
            name,
            start_time,
            end_time,
        )
    }

    /// Deletes a shift of this company and its breaks (manual cascade).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the shift is outside this company.
    pub fn delete_shift(&mut self, shift_id: i64) -> Result<(), PersistenceError> {
        mutations::shifts::delete_shift(self.conn, self.company_id, shift_id)
    }

    /// Retrieves a break of a shift of this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_shift_break(
        &mut self,
        shift_break_id: i64,
    ) -> Result<Option<ShiftBreakData>, PersistenceError> {
        queries::shifts::get_shift_break(self.conn, self.company_id, shift_break_id)
    }

    /// Lists the breaks of one shift of this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_breaks_for_shift(
        &mut self,
        shift_id: i64,
    ) -> Result<Vec<ShiftBreakData>, PersistenceError> {
        queries::shifts::list_breaks_for_shift(self.conn, self.company_id, shift_id)
    }

    /// Creates a break under a shift of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the shift is outside this company.
    pub fn create_shift_break(
        &mut self,
        shift_id: i64,
        name: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::shifts::create_shift_break(
            self.conn,
            self.company_id,
            shift_id,
            name,
            start_time,
            end_time,
        )
    }

    /// Updates a break of a shift of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no break matches within this company.
    pub fn update_shift_break(
        &mut self,
        shift_break_id: i64,
        name: Option<&str>,
        start_time: Option<&str>,
        end_time: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::shifts::update_shift_break(
            self.conn,
            self.company_id,
            shift_break_id,
            name,
            start_time,
            end_time,
        )
    }

    /// Deletes a break of a shift of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no break matches within this company.
    pub fn delete_shift_break(&mut self, shift_break_id: i64) -> Result<(), PersistenceError> {
        mutations::shifts::delete_shift_break(self.conn, self.company_id, shift_break_id)
    }

    // --- holidays ---

    /// Retrieves a declared holiday of this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_holiday(
        &mut self,
        holiday_id: i64,
    ) -> Result<Option<HolidayData>, PersistenceError> {
        queries::holidays::get_holiday(self.conn, self.company_id, holiday_id)
    }

    /// Lists this company's declared holidays.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_holidays(&mut self) -> Result<Vec<HolidayData>, PersistenceError> {
        queries::holidays::list_holidays(self.conn, self.company_id)
    }

    /// Declares a holiday for this company.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_holiday(
        &mut self,
        holiday_date: &str,
        description: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::holidays::create_holiday(self.conn, self.company_id, holiday_date, description)
    }

    /// Updates a declared holiday of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the holiday is outside this company.
    pub fn update_holiday(
        &mut self,
        holiday_id: i64,
        holiday_date: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::holidays::update_holiday(
            self.conn,
            self.company_id,
            holiday_id,
            holiday_date,
            description,
        )
    }

    /// Deletes a declared holiday of this company.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the holiday is outside this company.
    pub fn delete_holiday(&mut self, holiday_id: i64) -> Result<(), PersistenceError> {
        mutations::holidays::delete_holiday(self.conn, self.company_id, holiday_id)
    }
}
