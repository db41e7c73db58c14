// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serializable row representations returned by the persistence layer.
//!
//! These are deliberately plain data structs: domain interpretation
//! (status parsing, window arithmetic, reason-kind decoding) happens in
//! the layers above.

use serde::{Deserialize, Serialize};

/// Serializable representation of a company row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyData {
    pub company_id: i64,
    pub name: String,
    pub code: String,
    pub created_at: String,
}

/// Serializable representation of a user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub company_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub department: Option<String>,
    /// Canonical JSON-encoded id list, or `None` when never set.
    pub selected_employees: Option<String>,
    pub created_at: String,
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Plain-text password; hashed inside the creation mutation.
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub department: Option<String>,
}

/// Serializable representation of a project row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    pub project_id: i64,
    pub company_id: i64,
    pub name: String,
    pub code: String,
    pub created_at: String,
}

/// Serializable representation of a task row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskData {
    pub task_id: i64,
    pub company_id: i64,
    pub assigned_by: Option<i64>,
    pub assigned_to: i64,
    pub title: String,
    pub description: Option<String>,
    pub project_title: Option<String>,
    pub priority: i32,
    pub status: String,
    pub approval_status: String,
    pub reason: Option<String>,
    pub start: String,
    pub end_time: String,
    pub duration_minutes: i32,
    pub timer_start: Option<String>,
    pub elapsed_seconds: i64,
    pub start_early_reason: Option<String>,
    pub start_late_reason: Option<String>,
    pub pause_reason: Option<String>,
    pub stop_reason: Option<String>,
    pub added_by_user: bool,
    pub created_at: String,
}

/// Fields accepted when creating a task.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub assigned_by: Option<i64>,
    pub assigned_to: i64,
    pub title: String,
    pub description: Option<String>,
    pub project_title: Option<String>,
    pub priority: i32,
    pub status: String,
    pub approval_status: String,
    /// Canonical RFC 3339 UTC start bound.
    pub start: String,
    /// Canonical RFC 3339 UTC end bound.
    pub end_time: String,
    pub duration_minutes: i32,
    pub added_by_user: bool,
}

/// Updatable task fields for the admin full-update path.
///
/// `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub assigned_to: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_title: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub start: Option<String>,
    pub end_time: Option<String>,
    pub duration_minutes: Option<i32>,
}

impl TaskChanges {
    /// Whether no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assigned_to.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.project_title.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.reason.is_none()
            && self.start.is_none()
            && self.end_time.is_none()
            && self.duration_minutes.is_none()
    }
}

/// Serializable representation of a task reason audit row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReasonData {
    pub task_reason_id: i64,
    pub task_id: i64,
    pub user_id: i64,
    pub reason_type: i32,
    pub reason_text: String,
    pub created_at: String,
}

/// Serializable representation of a timer log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeUpdateData {
    pub time_update_id: i64,
    pub task_id: i64,
    pub user_id: i64,
    pub update_type: i32,
    pub recorded_at: String,
}

/// Serializable representation of a shift row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftData {
    pub shift_id: i64,
    pub company_id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
}

/// Serializable representation of a shift break row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftBreakData {
    pub shift_break_id: i64,
    pub shift_id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

/// Serializable representation of a declared holiday row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayData {
    pub holiday_id: i64,
    pub company_id: i64,
    pub holiday_date: String,
    pub description: String,
    pub created_at: String,
}
