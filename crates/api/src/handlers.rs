// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler receives the authenticated caller context and a
//! tenant-scoped persistence handle (or, for the two pre-auth
//! endpoints, the raw adapter), performs validation and authorization,
//! and returns a DTO or an [`ApiError`]. HTTP concerns stay in the
//! server crate.

use time::OffsetDateTime;
use tracing::info;

use taskcrew::{TrustPolicy, creation_approval, creation_status, pause_elapsed};
use taskcrew_audit::ReasonEvent;
use taskcrew_domain::{
    ApprovalStatus, Priority, ReasonKind, Role, TaskStatus, TimeWindow, format_timestamp,
    parse_timestamp, validate_email, validate_username,
};
use taskcrew_persistence::{
    CompanyScope, NewTask, NewUser, Persistence, TaskChanges, TaskData, UserChanges, UserData,
};

use crate::auth::{AuthenticatedUser, AuthorizationService, TokenService};
use crate::error::ApiError;
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    ApprovalRequest, CompanyResponse, CreateTaskRequest, CreateUserRequest, HolidayRequest,
    HolidayResponse, LoginRequest, LoginResponse, MessageResponse, PatchTaskRequest,
    ProjectRequest, ProjectResponse, PutTimerRequest, ReasonHistoryResponse, ReasonRequest,
    ReasonResponse, ReassignTaskRequest, ReassignTaskResponse, RegisterRequest, RegisterResponse,
    ShiftBreakRequest, ShiftBreakResponse, ShiftRequest, ShiftResponse, TaskResponse,
    TimeLogResponse, TimerActionRequest, TimerStateResponse, UpdateCompanyRequest,
    UpdateHolidayRequest,
    UpdateProjectRequest, UpdateShiftBreakRequest, UpdateShiftRequest, UpdateTaskRequest,
    UpdateUserRequest, UserSummary, WhoAmIResponse,
};

/// The canonical current-instant string for stored timestamps.
fn now_string() -> String {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Resolves a task under the caller's scope: admins see any task of
/// their company, users only tasks assigned to them.
///
/// Either miss surfaces as the same `NotFound`.
fn fetch_task_scoped(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
) -> Result<TaskData, ApiError> {
    let task: Option<TaskData> = match actor.role {
        Role::Admin => scope.get_task(task_id)?,
        Role::User => scope.get_task_for_assignee(task_id, actor.user_id)?,
    };
    task.ok_or_else(|| ApiError::NotFound {
        message: format!("Task with ID {task_id} not found"),
    })
}

/// Re-canonicalizes a request-supplied window so stored bounds always
/// compare lexicographically. Ordering is deliberately not checked.
fn canonical_window(start: &str, end: &str) -> Result<TimeWindow, ApiError> {
    Ok(TimeWindow::parse(start, end)?)
}

// --- auth ---

/// Registers an account.
///
/// A known company code joins that company as a regular user; an
/// unknown one creates the company and makes the registrant its admin.
///
/// # Errors
///
/// Validation failures (400), duplicate username/email/company (409).
pub fn register(
    persistence: &mut Persistence,
    req: &RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    info!(username = %req.username, "Handling registration");

    validate_username(&req.username)?;
    validate_email(&req.email)?;
    PasswordPolicy::default().validate(&req.password, &req.confirm_password)?;

    if req.company_code.trim().is_empty() {
        return Err(ApiError::Validation {
            field: String::from("companyCode"),
            message: String::from("Company code must not be empty"),
        });
    }

    let (company_id, role): (i64, Role) =
        match persistence.get_company_by_code(req.company_code.trim())? {
            Some(company) => (company.company_id, Role::User),
            None => {
                if req.company_name.trim().is_empty() {
                    return Err(ApiError::Validation {
                        field: String::from("companyName"),
                        message: String::from("Company name is required to create a company"),
                    });
                }
                let company_id: i64 = persistence
                    .create_company(req.company_name.trim(), req.company_code.trim())?;
                (company_id, Role::Admin)
            }
        };

    let user_id: i64 = persistence.create_user(
        company_id,
        &NewUser {
            username: req.username.clone(),
            email: req.email.clone(),
            password: req.password.clone(),
            first_name: None,
            last_name: None,
            role: role.as_str().to_string(),
            department: None,
        },
    )?;

    let user: UserData = persistence
        .for_company(company_id)
        .get_user(user_id)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("User {user_id} vanished after registration"),
        })?;

    info!(user_id, company_id, role = %role, "Registration complete");

    Ok(RegisterResponse {
        message: String::from("Registration successful"),
        user: user.into(),
    })
}

/// Logs an account in and mints a bearer token.
///
/// Unknown email and wrong password produce the identical generic
/// message, so account existence never leaks.
///
/// # Errors
///
/// `AuthenticationFailed` (400) on any credential failure.
pub fn login(
    persistence: &mut Persistence,
    tokens: &TokenService,
    req: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    info!("Handling login");

    let generic = || ApiError::AuthenticationFailed {
        reason: String::from("Invalid email or password"),
    };

    let user: UserData = persistence
        .get_user_by_email(&req.email)?
        .ok_or_else(generic)?;

    if !Persistence::verify_password(&req.password, &user.password_hash)? {
        return Err(generic());
    }

    let token: String = tokens.mint(&user)?;

    info!(user_id = user.user_id, company_id = user.company_id, "Login successful");

    Ok(LoginResponse {
        message: String::from("Login successful"),
        token,
        user: user.into(),
    })
}

/// Returns the caller's own account.
///
/// # Errors
///
/// `NotFound` if the account was deleted after the token was minted.
pub fn whoami(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
) -> Result<WhoAmIResponse, ApiError> {
    let user: UserData = scope.get_user(actor.user_id)?.ok_or_else(|| ApiError::NotFound {
        message: String::from("Account no longer exists"),
    })?;
    Ok(WhoAmIResponse { user: user.into() })
}

// --- tasks ---

/// Creates a task for an employee (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures, `NotFound` for an
/// unknown assignee.
pub fn create_task(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    req: &CreateTaskRequest,
) -> Result<TaskResponse, ApiError> {
    AuthorizationService::require_admin(actor, "create_task")?;

    Priority::from_code(req.priority)?;
    let window: TimeWindow = canonical_window(&req.start, &req.end_time)?;

    if scope.get_user(req.assigned_to)?.is_none() {
        return Err(ApiError::NotFound {
            message: format!("User with ID {} not found", req.assigned_to),
        });
    }

    let task_id: i64 = scope.create_task(&NewTask {
        assigned_by: Some(actor.user_id),
        assigned_to: req.assigned_to,
        title: req.title.clone(),
        description: req.description.clone(),
        project_title: req.project_title.clone(),
        priority: req.priority,
        status: creation_status(false).as_str().to_string(),
        approval_status: creation_approval().as_str().to_string(),
        start: window.start_string(),
        end_time: window.end_string(),
        duration_minutes: req.duration_minutes,
        added_by_user: false,
    })?;

    fetch_task_scoped(scope, actor, task_id).map(Into::into)
}

/// Creates a self-added task for the caller.
///
/// Self-added tasks start `unplanned` and carry the `added_by_user`
/// flag; the caller is both assigner and assignee.
///
/// # Errors
///
/// Validation failures.
pub fn create_my_task(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    req: &CreateTaskRequest,
) -> Result<TaskResponse, ApiError> {
    Priority::from_code(req.priority)?;
    let window: TimeWindow = canonical_window(&req.start, &req.end_time)?;

    let task_id: i64 = scope.create_task(&NewTask {
        assigned_by: Some(actor.user_id),
        assigned_to: actor.user_id,
        title: req.title.clone(),
        description: req.description.clone(),
        project_title: req.project_title.clone(),
        priority: req.priority,
        status: creation_status(true).as_str().to_string(),
        approval_status: creation_approval().as_str().to_string(),
        start: window.start_string(),
        end_time: window.end_string(),
        duration_minutes: req.duration_minutes,
        added_by_user: true,
    })?;

    let task: TaskData = scope.get_task(task_id)?.ok_or_else(|| ApiError::Internal {
        message: format!("Task {task_id} vanished after creation"),
    })?;
    Ok(task.into())
}

/// Lists the tasks visible to the caller: the whole company for
/// admins, their own for regular users.
///
/// # Errors
///
/// Propagates store failures.
pub fn list_tasks(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
) -> Result<Vec<TaskResponse>, ApiError> {
    let tasks: Vec<TaskData> = match actor.role {
        Role::Admin => scope.list_tasks()?,
        Role::User => scope.list_tasks_for_assignee(actor.user_id)?,
    };
    Ok(tasks.into_iter().map(Into::into).collect())
}

/// Lists the caller's own tasks.
///
/// # Errors
///
/// Propagates store failures.
pub fn list_my_tasks(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
) -> Result<Vec<TaskResponse>, ApiError> {
    let tasks: Vec<TaskData> = scope.list_tasks_for_assignee(actor.user_id)?;
    Ok(tasks.into_iter().map(Into::into).collect())
}

/// Lists every task of the company (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins.
pub fn list_all_tasks(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
) -> Result<Vec<TaskResponse>, ApiError> {
    AuthorizationService::require_admin(actor, "list_all_tasks")?;
    let tasks: Vec<TaskData> = scope.list_tasks()?;
    Ok(tasks.into_iter().map(Into::into).collect())
}

/// Applies a full update to a task (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures, `NotFound` outside
/// the tenant.
pub fn update_task(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
    req: &UpdateTaskRequest,
) -> Result<TaskResponse, ApiError> {
    AuthorizationService::require_admin(actor, "update_task")?;

    if let Some(priority) = req.priority {
        Priority::from_code(priority)?;
    }
    if let Some(status) = &req.status {
        TaskStatus::parse(status)?;
    }
    if let Some(assignee) = req.assigned_to {
        if scope.get_user(assignee)?.is_none() {
            return Err(ApiError::NotFound {
                message: format!("User with ID {assignee} not found"),
            });
        }
    }
    let start: Option<String> = match &req.start {
        Some(value) => Some(format_timestamp(parse_timestamp(value)?)),
        None => None,
    };
    let end_time: Option<String> = match &req.end_time {
        Some(value) => Some(format_timestamp(parse_timestamp(value)?)),
        None => None,
    };

    scope.update_task(
        task_id,
        None,
        &TaskChanges {
            assigned_to: req.assigned_to,
            title: req.title.clone(),
            description: req.description.clone(),
            project_title: req.project_title.clone(),
            priority: req.priority,
            status: req.status.clone(),
            reason: req.reason.clone(),
            start,
            end_time,
            duration_minutes: req.duration_minutes,
        },
    )?;

    fetch_task_scoped(scope, actor, task_id).map(Into::into)
}

/// Applies a self-service update to a task.
///
/// Regular users reach only tasks assigned to them; a mismatch is a
/// plain `NotFound`.
///
/// # Errors
///
/// Validation failures, `NotFound` outside the caller's scope.
pub fn patch_task(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
    req: &PatchTaskRequest,
) -> Result<TaskResponse, ApiError> {
    if let Some(status) = &req.status {
        TaskStatus::parse(status)?;
    }

    let assignee: Option<i64> = match actor.role {
        Role::Admin => None,
        Role::User => Some(actor.user_id),
    };

    scope.update_task(
        task_id,
        assignee,
        &TaskChanges {
            status: req.status.clone(),
            description: req.description.clone(),
            reason: req.reason.clone(),
            ..TaskChanges::default()
        },
    )?;

    fetch_task_scoped(scope, actor, task_id).map(Into::into)
}

/// Hard-deletes a task (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn delete_task(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::require_admin(actor, "delete_task")?;
    scope.delete_task(task_id)?;
    Ok(MessageResponse {
        message: format!("Task {task_id} deleted"),
    })
}

/// Reassigns a task, pushing conflicting tasks of the new assignee out
/// of the way (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures, `NotFound` when
/// the task or assignee is outside the tenant.
pub fn reassign_task(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
    req: &ReassignTaskRequest,
) -> Result<ReassignTaskResponse, ApiError> {
    AuthorizationService::require_admin(actor, "reassign_task")?;

    let window: TimeWindow = canonical_window(&req.start, &req.end_time)?;
    let (task, rescheduled_conflicts): (TaskData, usize) =
        scope.reassign_task(task_id, req.assigned_to, &window)?;

    info!(
        task_id,
        new_assignee = req.assigned_to,
        rescheduled_conflicts,
        "Task reassigned"
    );

    Ok(ReassignTaskResponse {
        task: task.into(),
        rescheduled_conflicts,
    })
}

/// Sets a task's approval verdict (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures, `NotFound` outside
/// the tenant.
pub fn set_approval(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
    req: &ApprovalRequest,
) -> Result<TaskResponse, ApiError> {
    AuthorizationService::require_admin(actor, "set_approval")?;

    let verdict: ApprovalStatus = ApprovalStatus::parse(&req.approval_status)?;
    scope.set_approval(
        task_id,
        actor.user_id,
        verdict.as_str(),
        req.reason.as_deref(),
        &now_string(),
    )?;

    fetch_task_scoped(scope, actor, task_id).map(Into::into)
}

// --- timer ---

/// Drives a task timer: `start`, `pause` or `stop`.
///
/// Start overwrites any recorded start instant. Pause stores the
/// elapsed figure dictated by the active trust policy: the client's
/// number verbatim by default, a server-computed one when configured.
/// Stop only appends to the timer log; status never changes here.
///
/// # Errors
///
/// Validation failures (including a missing client figure on pause),
/// `NotFound` outside the caller's scope.
pub fn timer_action(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    trust: TrustPolicy,
    task_id: i64,
    req: &TimerActionRequest,
) -> Result<TimerStateResponse, ApiError> {
    let task: TaskData = fetch_task_scoped(scope, actor, task_id)?;

    match req.action.as_str() {
        "start" => {
            scope.start_timer(task_id, actor.user_id, &now_string())?;
        }
        "pause" => {
            let timer_start: Option<OffsetDateTime> = match &task.timer_start {
                Some(value) => Some(parse_timestamp(value)?),
                None => None,
            };
            let elapsed: i64 = pause_elapsed(
                trust,
                OffsetDateTime::now_utc(),
                timer_start,
                task.elapsed_seconds,
                req.elapsed_seconds,
            )?;
            scope.set_elapsed_seconds(task_id, elapsed)?;
        }
        "stop" => {
            scope.record_stop(task_id, actor.user_id, &now_string())?;
        }
        other => {
            return Err(ApiError::Validation {
                field: String::from("action"),
                message: format!("Unknown timer action '{other}'. Use start, pause or stop"),
            });
        }
    }

    let task: TaskData = fetch_task_scoped(scope, actor, task_id)?;
    Ok(TimerStateResponse {
        task_id: task.task_id,
        timer_start: task.timer_start,
        elapsed_seconds: task.elapsed_seconds,
        status: task.status,
    })
}

/// Returns a task's timer columns.
///
/// # Errors
///
/// `NotFound` outside the caller's scope.
pub fn get_timer(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
) -> Result<TimerStateResponse, ApiError> {
    let task: TaskData = fetch_task_scoped(scope, actor, task_id)?;
    Ok(TimerStateResponse {
        task_id: task.task_id,
        timer_start: task.timer_start,
        elapsed_seconds: task.elapsed_seconds,
        status: task.status,
    })
}

/// Directly updates a task's timer columns (the PUT surface).
///
/// # Errors
///
/// Validation failures, `NotFound` outside the caller's scope.
pub fn put_timer(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
    req: &PutTimerRequest,
) -> Result<TimerStateResponse, ApiError> {
    fetch_task_scoped(scope, actor, task_id)?;

    let timer_start: Option<String> = match &req.timer_start {
        Some(value) => Some(format_timestamp(parse_timestamp(value)?)),
        None => None,
    };
    scope.put_timer(task_id, timer_start, req.elapsed_seconds)?;

    let task: TaskData = fetch_task_scoped(scope, actor, task_id)?;
    Ok(TimerStateResponse {
        task_id: task.task_id,
        timer_start: task.timer_start,
        elapsed_seconds: task.elapsed_seconds,
        status: task.status,
    })
}

// --- reasons ---

/// Records a lifecycle justification on both surfaces: the embedded
/// column for the four timer kinds, plus the reason audit table.
///
/// Blank or whitespace-only text is rejected before anything is
/// written.
///
/// # Errors
///
/// `Validation` for blank text, `NotFound` outside the caller's scope.
pub fn submit_reason(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
    kind: ReasonKind,
    req: &ReasonRequest,
) -> Result<ReasonResponse, ApiError> {
    fetch_task_scoped(scope, actor, task_id)?;

    let event: ReasonEvent =
        ReasonEvent::new(task_id, actor.user_id, kind, &req.reason, now_string())?;
    scope.record_reason(&event)?;

    info!(task_id, kind = ?kind, "Reason recorded");

    Ok(ReasonResponse {
        task_id,
        reason_type: kind.code(),
        reason: event.text,
        message: String::from("Reason recorded"),
    })
}

/// Lists a task's timer log, oldest first.
///
/// # Errors
///
/// `NotFound` outside the caller's scope.
pub fn time_log(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
) -> Result<TimeLogResponse, ApiError> {
    fetch_task_scoped(scope, actor, task_id)?;

    let entries = scope.list_time_updates(task_id)?;
    Ok(TimeLogResponse {
        task_id,
        entries: entries.into_iter().map(Into::into).collect(),
    })
}

/// Lists a task's reason audit history, oldest first.
///
/// # Errors
///
/// `NotFound` outside the caller's scope.
pub fn reason_history(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    task_id: i64,
) -> Result<ReasonHistoryResponse, ApiError> {
    fetch_task_scoped(scope, actor, task_id)?;

    let reasons = scope.list_reasons(task_id)?;
    Ok(ReasonHistoryResponse {
        task_id,
        reasons: reasons.into_iter().map(Into::into).collect(),
    })
}

// --- users ---

/// Creates an employee account (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures, duplicates.
pub fn create_user(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    req: &CreateUserRequest,
) -> Result<UserSummary, ApiError> {
    AuthorizationService::require_admin(actor, "create_user")?;

    validate_username(&req.username)?;
    validate_email(&req.email)?;
    let role: Role = Role::parse(&req.role)?;
    PasswordPolicy::default().validate(&req.password, &req.password)?;

    let user_id: i64 = scope.create_user(&NewUser {
        username: req.username.clone(),
        email: req.email.clone(),
        password: req.password.clone(),
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
        role: role.as_str().to_string(),
        department: req.department.clone(),
    })?;

    let user: UserData = scope.get_user(user_id)?.ok_or_else(|| ApiError::Internal {
        message: format!("User {user_id} vanished after creation"),
    })?;
    Ok(user.into())
}

/// Lists the company's users (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins.
pub fn list_users(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
) -> Result<Vec<UserSummary>, ApiError> {
    AuthorizationService::require_admin(actor, "list_users")?;
    let users: Vec<UserData> = scope.list_users()?;
    Ok(users.into_iter().map(Into::into).collect())
}

/// Updates an employee account (admin), including the selected
/// employees list in either accepted form.
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures, `NotFound` outside
/// the tenant.
pub fn update_user(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    user_id: i64,
    req: &UpdateUserRequest,
) -> Result<UserSummary, ApiError> {
    AuthorizationService::require_admin(actor, "update_user")?;

    if let Some(role) = &req.role {
        Role::parse(role)?;
    }
    let selected = match &req.selected_employees {
        Some(input) => Some(input.normalize()?),
        None => None,
    };

    scope.update_user(
        user_id,
        &UserChanges {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            role: req.role.clone(),
            department: req.department.clone(),
            password: req.password.clone(),
            selected_employees: selected,
        },
    )?;

    let user: UserData = scope.get_user(user_id)?.ok_or_else(|| ApiError::NotFound {
        message: format!("User with ID {user_id} not found"),
    })?;
    Ok(user.into())
}

/// Deletes an employee account and their assigned tasks (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn delete_user(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    user_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::require_admin(actor, "delete_user")?;
    scope.delete_user(user_id)?;
    Ok(MessageResponse {
        message: format!("User {user_id} deleted"),
    })
}

// --- projects ---

/// Lists the company's projects.
///
/// # Errors
///
/// Propagates store failures.
pub fn list_projects(scope: &mut CompanyScope<'_>) -> Result<Vec<ProjectResponse>, ApiError> {
    let projects = scope.list_projects()?;
    Ok(projects.into_iter().map(Into::into).collect())
}

/// Creates a project (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, duplicate code (409).
pub fn create_project(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    req: &ProjectRequest,
) -> Result<ProjectResponse, ApiError> {
    AuthorizationService::require_admin(actor, "create_project")?;

    if req.name.trim().is_empty() || req.code.trim().is_empty() {
        return Err(ApiError::Validation {
            field: String::from("name"),
            message: String::from("Project name and code must not be empty"),
        });
    }

    let project_id: i64 = scope.create_project(req.name.trim(), req.code.trim())?;
    let project = scope.get_project(project_id)?.ok_or_else(|| ApiError::Internal {
        message: format!("Project {project_id} vanished after creation"),
    })?;
    Ok(project.into())
}

/// Updates a project (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn update_project(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    project_id: i64,
    req: &UpdateProjectRequest,
) -> Result<ProjectResponse, ApiError> {
    AuthorizationService::require_admin(actor, "update_project")?;

    scope.update_project(project_id, req.name.as_deref(), req.code.as_deref())?;
    let project = scope.get_project(project_id)?.ok_or_else(|| ApiError::NotFound {
        message: format!("Project with ID {project_id} not found"),
    })?;
    Ok(project.into())
}

/// Deletes a project (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn delete_project(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    project_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::require_admin(actor, "delete_project")?;
    scope.delete_project(project_id)?;
    Ok(MessageResponse {
        message: format!("Project {project_id} deleted"),
    })
}

// --- shifts ---

/// Lists the company's shifts.
///
/// # Errors
///
/// Propagates store failures.
pub fn list_shifts(scope: &mut CompanyScope<'_>) -> Result<Vec<ShiftResponse>, ApiError> {
    let shifts = scope.list_shifts()?;
    Ok(shifts.into_iter().map(Into::into).collect())
}

/// Creates a shift (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures.
pub fn create_shift(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    req: &ShiftRequest,
) -> Result<ShiftResponse, ApiError> {
    AuthorizationService::require_admin(actor, "create_shift")?;

    if req.name.trim().is_empty() {
        return Err(ApiError::Validation {
            field: String::from("name"),
            message: String::from("Shift name must not be empty"),
        });
    }

    let shift_id: i64 = scope.create_shift(req.name.trim(), &req.start_time, &req.end_time)?;
    let shift = scope.get_shift(shift_id)?.ok_or_else(|| ApiError::Internal {
        message: format!("Shift {shift_id} vanished after creation"),
    })?;
    Ok(shift.into())
}

/// Updates a shift (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn update_shift(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    shift_id: i64,
    req: &UpdateShiftRequest,
) -> Result<ShiftResponse, ApiError> {
    AuthorizationService::require_admin(actor, "update_shift")?;

    scope.update_shift(
        shift_id,
        req.name.as_deref(),
        req.start_time.as_deref(),
        req.end_time.as_deref(),
    )?;
    let shift = scope.get_shift(shift_id)?.ok_or_else(|| ApiError::NotFound {
        message: format!("Shift with ID {shift_id} not found"),
    })?;
    Ok(shift.into())
}

/// Deletes a shift and its breaks (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn delete_shift(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    shift_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::require_admin(actor, "delete_shift")?;
    scope.delete_shift(shift_id)?;
    Ok(MessageResponse {
        message: format!("Shift {shift_id} deleted"),
    })
}

/// Lists the breaks of one shift.
///
/// # Errors
///
/// Propagates store failures.
pub fn list_shift_breaks(
    scope: &mut CompanyScope<'_>,
    shift_id: i64,
) -> Result<Vec<ShiftBreakResponse>, ApiError> {
    let breaks = scope.list_breaks_for_shift(shift_id)?;
    Ok(breaks.into_iter().map(Into::into).collect())
}

/// Creates a shift break (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` when the shift is outside
/// the tenant.
pub fn create_shift_break(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    req: &ShiftBreakRequest,
) -> Result<ShiftBreakResponse, ApiError> {
    AuthorizationService::require_admin(actor, "create_shift_break")?;

    let shift_break_id: i64 =
        scope.create_shift_break(req.shift_id, &req.name, &req.start_time, &req.end_time)?;
    let shift_break = scope
        .get_shift_break(shift_break_id)?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Shift break {shift_break_id} vanished after creation"),
        })?;
    Ok(shift_break.into())
}

/// Updates a shift break (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn update_shift_break(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    shift_break_id: i64,
    req: &UpdateShiftBreakRequest,
) -> Result<ShiftBreakResponse, ApiError> {
    AuthorizationService::require_admin(actor, "update_shift_break")?;

    scope.update_shift_break(
        shift_break_id,
        req.name.as_deref(),
        req.start_time.as_deref(),
        req.end_time.as_deref(),
    )?;
    let shift_break = scope
        .get_shift_break(shift_break_id)?
        .ok_or_else(|| ApiError::NotFound {
            message: format!("Shift break with ID {shift_break_id} not found"),
        })?;
    Ok(shift_break.into())
}

/// Deletes a shift break (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn delete_shift_break(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    shift_break_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::require_admin(actor, "delete_shift_break")?;
    scope.delete_shift_break(shift_break_id)?;
    Ok(MessageResponse {
        message: format!("Shift break {shift_break_id} deleted"),
    })
}

// --- holidays ---

/// Lists the company's declared holidays.
///
/// # Errors
///
/// Propagates store failures.
pub fn list_holidays(scope: &mut CompanyScope<'_>) -> Result<Vec<HolidayResponse>, ApiError> {
    let holidays = scope.list_holidays()?;
    Ok(holidays.into_iter().map(Into::into).collect())
}

/// Declares a holiday (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures.
pub fn create_holiday(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    req: &HolidayRequest,
) -> Result<HolidayResponse, ApiError> {
    AuthorizationService::require_admin(actor, "create_holiday")?;

    taskcrew_domain::parse_holiday_date(&req.holiday_date)?;
    let holiday_id: i64 = scope.create_holiday(&req.holiday_date, &req.description)?;
    let holiday = scope.get_holiday(holiday_id)?.ok_or_else(|| ApiError::Internal {
        message: format!("Holiday {holiday_id} vanished after creation"),
    })?;
    Ok(holiday.into())
}

/// Updates a declared holiday (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures, `NotFound` outside
/// the tenant.
pub fn update_holiday(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    holiday_id: i64,
    req: &UpdateHolidayRequest,
) -> Result<HolidayResponse, ApiError> {
    AuthorizationService::require_admin(actor, "update_holiday")?;

    if let Some(date) = &req.holiday_date {
        taskcrew_domain::parse_holiday_date(date)?;
    }
    scope.update_holiday(holiday_id, req.holiday_date.as_deref(), req.description.as_deref())?;
    let holiday = scope.get_holiday(holiday_id)?.ok_or_else(|| ApiError::NotFound {
        message: format!("Holiday with ID {holiday_id} not found"),
    })?;
    Ok(holiday.into())
}

/// Deletes a declared holiday (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, `NotFound` outside the tenant.
pub fn delete_holiday(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    holiday_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::require_admin(actor, "delete_holiday")?;
    scope.delete_holiday(holiday_id)?;
    Ok(MessageResponse {
        message: format!("Holiday {holiday_id} deleted"),
    })
}

// --- company ---

/// Returns the caller's company details.
///
/// # Errors
///
/// `NotFound` if the company row is missing.
pub fn company_details(scope: &mut CompanyScope<'_>) -> Result<CompanyResponse, ApiError> {
    let company = scope.company_details()?.ok_or_else(|| ApiError::NotFound {
        message: String::from("Company not found"),
    })?;
    Ok(CompanyResponse {
        company_id: company.company_id,
        name: company.name,
        code: company.code,
    })
}

/// Renames the caller's company (admin).
///
/// # Errors
///
/// `Forbidden` for non-admins, validation failures.
pub fn update_company(
    scope: &mut CompanyScope<'_>,
    actor: &AuthenticatedUser,
    req: &UpdateCompanyRequest,
) -> Result<CompanyResponse, ApiError> {
    AuthorizationService::require_admin(actor, "update_company")?;

    if req.name.trim().is_empty() {
        return Err(ApiError::Validation {
            field: String::from("name"),
            message: String::from("Company name must not be empty"),
        });
    }

    scope.rename_company(req.name.trim())?;
    company_details(scope)
}
