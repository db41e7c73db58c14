// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from persistence row structs and represent
//! the JSON contract. Responses never carry password hashes.

use serde::{Deserialize, Serialize};

use taskcrew_domain::{DomainError, SelectedEmployees};
use taskcrew_persistence::{
    HolidayData, ProjectData, ShiftBreakData, ShiftData, TaskData, TaskReasonData,
    TimeUpdateData, UserData,
};

/// API request to register an account (and possibly a company).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterRequest {
    /// The desired username.
    pub username: String,
    /// The account email.
    pub email: String,
    /// The password.
    pub password: String,
    /// The password confirmation.
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
    /// The company display name.
    #[serde(rename = "companyName")]
    pub company_name: String,
    /// The company code: joins the company when it exists, creates it
    /// otherwise.
    #[serde(rename = "companyCode")]
    pub company_code: String,
}

/// Public summary of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    /// The user id.
    pub user_id: i64,
    /// The username.
    pub username: String,
    /// The email.
    pub email: String,
    /// Optional first name.
    pub first_name: Option<String>,
    /// Optional last name.
    pub last_name: Option<String>,
    /// The role (`admin` / `user`).
    pub role: String,
    /// The company id.
    pub company_id: i64,
    /// Optional department string.
    pub department: Option<String>,
    /// Canonical encoded selected-employees list, if set.
    pub selected_employees: Option<String>,
}

impl From<UserData> for UserSummary {
    fn from(user: UserData) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            company_id: user.company_id,
            department: user.department,
            selected_employees: user.selected_employees,
        }
    }
}

/// API response for a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// A success message.
    pub message: String,
    /// The created account.
    pub user: UserSummary,
}

/// API request to log in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    /// The account email.
    pub email: String,
    /// The password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// A success message.
    pub message: String,
    /// The minted bearer token.
    pub token: String,
    /// The authenticated account.
    pub user: UserSummary,
}

/// Full task representation returned by every task endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task_id: i64,
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

impl From<TaskData> for TaskResponse {
    fn from(task: TaskData) -> Self {
        Self {
            task_id: task.task_id,
            assigned_by: task.assigned_by,
            assigned_to: task.assigned_to,
            title: task.title,
            description: task.description,
            project_title: task.project_title,
            priority: task.priority,
            status: task.status,
            approval_status: task.approval_status,
            reason: task.reason,
            start: task.start,
            end_time: task.end_time,
            duration_minutes: task.duration_minutes,
            timer_start: task.timer_start,
            elapsed_seconds: task.elapsed_seconds,
            start_early_reason: task.start_early_reason,
            start_late_reason: task.start_late_reason,
            pause_reason: task.pause_reason,
            stop_reason: task.stop_reason,
            added_by_user: task.added_by_user,
            created_at: task.created_at,
        }
    }
}

/// API request to create a task (admin).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTaskRequest {
    /// The assignee; mandatory.
    pub assigned_to: i64,
    /// The task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional free-text project title.
    pub project_title: Option<String>,
    /// Priority code: 1=High, 2=Medium, 3=Low.
    pub priority: i32,
    /// Scheduled start (RFC 3339).
    pub start: String,
    /// Scheduled end (RFC 3339).
    pub end_time: String,
    /// Planned duration in minutes.
    pub duration_minutes: i32,
}

/// API request for the admin full-update path (PUT).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateTaskRequest {
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

/// API request for the self-service update path (PATCH).
///
/// Only the fields an assignee may touch on their own task.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PatchTaskRequest {
    /// New status value.
    pub status: Option<String>,
    /// Updated description.
    pub description: Option<String>,
    /// Free-text justification, stored in the generic reason column.
    pub reason: Option<String>,
}

/// API request to reassign a task to a (possibly busy) employee.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReassignTaskRequest {
    /// The new assignee.
    pub assigned_to: i64,
    /// The new scheduled start (RFC 3339).
    pub start: String,
    /// The new scheduled end (RFC 3339).
    pub end_time: String,
}

/// API response for a reassignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignTaskResponse {
    /// The updated task.
    pub task: TaskResponse,
    /// How many conflicting tasks were pushed out of the way.
    pub rescheduled_conflicts: usize,
}

/// API request driving the task timer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimerActionRequest {
    /// One of `start`, `pause`, `stop`.
    pub action: String,
    /// Client-computed elapsed figure; required for `pause` under the
    /// client-supplied trust policy.
    pub elapsed_seconds: Option<i64>,
}

/// API response describing a task's timer columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerStateResponse {
    /// The task id.
    pub task_id: i64,
    /// The recorded start instant, if any.
    pub timer_start: Option<String>,
    /// The elapsed-seconds counter.
    pub elapsed_seconds: i64,
    /// The task's current status (informational; the timer is
    /// independent of it).
    pub status: String,
}

/// API request for the direct timer-column update (PUT).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PutTimerRequest {
    /// Replacement start instant (RFC 3339).
    pub timer_start: Option<String>,
    /// Replacement elapsed counter.
    pub elapsed_seconds: Option<i64>,
}

/// API request carrying a lifecycle justification.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReasonRequest {
    /// Free-text justification; must not be blank.
    pub reason: String,
}

/// API response for a recorded reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonResponse {
    /// The task the reason belongs to.
    pub task_id: i64,
    /// The numeric reason-type code (1..7).
    pub reason_type: i32,
    /// The stored (trimmed) text.
    pub reason: String,
    /// A success message.
    pub message: String,
}

/// One reason audit entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonHistoryEntry {
    /// The user who supplied the justification.
    pub user_id: i64,
    /// The numeric reason-type code (1..7).
    pub reason_type: i32,
    /// The stored text.
    pub reason_text: String,
    /// When it was recorded.
    pub created_at: String,
}

impl From<TaskReasonData> for ReasonHistoryEntry {
    fn from(row: TaskReasonData) -> Self {
        Self {
            user_id: row.user_id,
            reason_type: row.reason_type,
            reason_text: row.reason_text,
            created_at: row.created_at,
        }
    }
}

/// API response listing a task's reason history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonHistoryResponse {
    /// The task id.
    pub task_id: i64,
    /// All recorded reasons, oldest first.
    pub reasons: Vec<ReasonHistoryEntry>,
}

/// One timer log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeUpdateEntry {
    /// The user who drove the timer.
    pub user_id: i64,
    /// 1=start, 2=stop.
    pub update_type: i32,
    /// When it was recorded.
    pub recorded_at: String,
}

impl From<TimeUpdateData> for TimeUpdateEntry {
    fn from(row: TimeUpdateData) -> Self {
        Self {
            user_id: row.user_id,
            update_type: row.update_type,
            recorded_at: row.recorded_at,
        }
    }
}

/// API response listing a task's timer log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeLogResponse {
    /// The task id.
    pub task_id: i64,
    /// All recorded timer events, oldest first.
    pub entries: Vec<TimeUpdateEntry>,
}

/// API request to approve or reject a task (admin).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApprovalRequest {
    /// `approved` or `rejected` (`pending` resets the verdict).
    pub approval_status: String,
    /// Optional justification; stored in the generic reason column on
    /// rejection.
    pub reason: Option<String>,
}

/// API request to create a user (admin).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `admin` or `user`.
    pub role: String,
    pub department: Option<String>,
}

/// Selected-employees write forms: a real array or an already-encoded
/// string; both normalize to the canonical encoding.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SelectedEmployeesInput {
    /// The id list itself.
    List(Vec<i64>),
    /// An encoded form (canonical JSON array or legacy comma list).
    Encoded(String),
}

impl SelectedEmployeesInput {
    /// Normalizes either accepted form into the canonical list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSelectedEmployees` for an encoded
    /// form that fits neither encoding.
    pub fn normalize(&self) -> Result<SelectedEmployees, DomainError> {
        match self {
            Self::List(ids) => Ok(SelectedEmployees(ids.clone())),
            Self::Encoded(raw) => SelectedEmployees::decode(raw),
        }
    }
}

/// API request to update a user (admin).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    /// Replacement password.
    pub password: Option<String>,
    /// Replacement selected-employees list (array or encoded string).
    pub selected_employees: Option<SelectedEmployeesInput>,
}

/// API request to create or rename a project (admin).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectRequest {
    /// The project display name.
    pub name: String,
    /// The project code, unique per company.
    pub code: String,
}

/// API request for partial project updates (admin).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// Project representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub project_id: i64,
    pub name: String,
    pub code: String,
    pub created_at: String,
}

impl From<ProjectData> for ProjectResponse {
    fn from(project: ProjectData) -> Self {
        Self {
            project_id: project.project_id,
            name: project.name,
            code: project.code,
            created_at: project.created_at,
        }
    }
}

/// API request to create a shift (admin).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShiftRequest {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

/// API request for partial shift updates (admin).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateShiftRequest {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Shift representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftResponse {
    pub shift_id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
}

impl From<ShiftData> for ShiftResponse {
    fn from(shift: ShiftData) -> Self {
        Self {
            shift_id: shift.shift_id,
            name: shift.name,
            start_time: shift.start_time,
            end_time: shift.end_time,
            created_at: shift.created_at,
        }
    }
}

/// API request to create a shift break (admin).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShiftBreakRequest {
    /// The owning shift.
    pub shift_id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

/// API request for partial shift-break updates (admin).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateShiftBreakRequest {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Shift break representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftBreakResponse {
    pub shift_break_id: i64,
    pub shift_id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<ShiftBreakData> for ShiftBreakResponse {
    fn from(shift_break: ShiftBreakData) -> Self {
        Self {
            shift_break_id: shift_break.shift_break_id,
            shift_id: shift_break.shift_id,
            name: shift_break.name,
            start_time: shift_break.start_time,
            end_time: shift_break.end_time,
        }
    }
}

/// API request to declare a holiday (admin).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HolidayRequest {
    /// The holiday date (`YYYY-MM-DD`).
    pub holiday_date: String,
    /// A description.
    pub description: String,
}

/// API request for partial holiday updates (admin).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateHolidayRequest {
    pub holiday_date: Option<String>,
    pub description: Option<String>,
}

/// Declared holiday representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayResponse {
    pub holiday_id: i64,
    pub holiday_date: String,
    pub description: String,
}

impl From<HolidayData> for HolidayResponse {
    fn from(holiday: HolidayData) -> Self {
        Self {
            holiday_id: holiday.holiday_id,
            holiday_date: holiday.holiday_date,
            description: holiday.description,
        }
    }
}

/// Company details representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub company_id: i64,
    pub name: String,
    pub code: String,
}

/// API request to update company details (admin).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateCompanyRequest {
    /// The new display name.
    pub name: String,
}

/// API response for whoami.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The caller's account.
    pub user: UserSummary,
}

/// Generic message-only response (deletes and similar).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// A success message.
    pub message: String,
}
