// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use taskcrew_api::{
    ApiError, ApprovalRequest, CompanyResponse, CreateTaskRequest, CreateUserRequest,
    HolidayRequest, HolidayResponse, LoginRequest, LoginResponse, MessageResponse,
    PatchTaskRequest, ProjectRequest, ProjectResponse, PutTimerRequest, ReasonHistoryResponse,
    ReasonKind, ReasonRequest, ReasonResponse, ReassignTaskRequest, ReassignTaskResponse,
    RegisterRequest, RegisterResponse, ShiftBreakRequest, ShiftBreakResponse, ShiftRequest,
    ShiftResponse, TaskResponse, TimeLogResponse, TimerActionRequest, TimerStateResponse,
    TokenService, TrustPolicy, UpdateCompanyRequest, UpdateHolidayRequest, UpdateProjectRequest,
    UpdateShiftBreakRequest, UpdateShiftRequest, UpdateTaskRequest, UpdateUserRequest,
    UserSummary, WhoAmIResponse,
};
use taskcrew_persistence::Persistence;

mod bearer;

use bearer::BearerUser;

/// Taskcrew Server - HTTP server for the Taskcrew task-management system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Host address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer wrapped in a Mutex for safe concurrent
    /// access; each request performs synchronous Diesel calls under it.
    pub(crate) persistence: Arc<Mutex<Persistence>>,
    /// The JWT mint/verify service.
    pub(crate) tokens: Arc<TokenService>,
    /// Who computes elapsed time when a timer pauses.
    pub(crate) trust: TrustPolicy,
}

/// Query parameters for listing shift breaks.
#[derive(Debug, Deserialize)]
struct ShiftBreaksQuery {
    /// The owning shift.
    shift_id: i64,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::Validation { .. } | ApiError::AuthenticationFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken { .. } | ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Duplicate { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// --- auth handlers ---

/// Handler for POST `/api/auth/register`.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), HttpError> {
    info!(username = %req.username, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterResponse = taskcrew_api::register(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!("Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse =
        taskcrew_api::login(&mut persistence, &app_state.tokens, &req)?;
    Ok(Json(response))
}

/// Handler for GET `/api/users/me`.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let response: WhoAmIResponse = taskcrew_api::whoami(&mut scope, &user)?;
    Ok(Json(response))
}

// --- task handlers ---

/// Handler for GET `/api/tasks`.
async fn handle_list_tasks(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<Vec<TaskResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::list_tasks(&mut scope, &user)?))
}

/// Handler for POST `/api/tasks`.
async fn handle_create_task(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), HttpError> {
    info!(assigned_to = req.assigned_to, "Handling create_task request");

    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let task: TaskResponse = taskcrew_api::create_task(&mut scope, &user, &req)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for GET `/api/tasks/my`.
async fn handle_list_my_tasks(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<Vec<TaskResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::list_my_tasks(&mut scope, &user)?))
}

/// Handler for POST `/api/tasks/my` (self-added tasks).
async fn handle_create_my_task(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let task: TaskResponse = taskcrew_api::create_my_task(&mut scope, &user, &req)?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for GET `/api/tasks/all`.
async fn handle_list_all_tasks(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<Vec<TaskResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::list_all_tasks(&mut scope, &user)?))
}

/// Handler for PUT `/api/tasks/{id}`.
async fn handle_update_task(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::update_task(&mut scope, &user, task_id, &req)?))
}

/// Handler for PATCH `/api/tasks/{id}`.
async fn handle_patch_task(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<PatchTaskRequest>,
) -> Result<Json<TaskResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::patch_task(&mut scope, &user, task_id, &req)?))
}

/// Handler for DELETE `/api/tasks/{id}`.
async fn handle_delete_task(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(task_id, "Handling delete_task request");

    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::delete_task(&mut scope, &user, task_id)?))
}

/// Handler for PATCH `/api/tasks/{id}/assign`.
///
/// Runs the conflict resolver: overlapping tasks of the new assignee
/// are pushed out of the way before the reassignment lands.
async fn handle_reassign_task(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<ReassignTaskRequest>,
) -> Result<Json<ReassignTaskResponse>, HttpError> {
    info!(task_id, new_assignee = req.assigned_to, "Handling reassign request");

    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::reassign_task(&mut scope, &user, task_id, &req)?))
}

/// Handler for PATCH `/api/tasks/{id}/approval`.
async fn handle_set_approval(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<ApprovalRequest>,
) -> Result<Json<TaskResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::set_approval(&mut scope, &user, task_id, &req)?))
}

// --- timer handlers ---

/// Handler for PATCH `/api/tasks/{id}/timer`.
async fn handle_timer_action(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<TimerActionRequest>,
) -> Result<Json<TimerStateResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::timer_action(
        &mut scope,
        &user,
        app_state.trust,
        task_id,
        &req,
    )?))
}

/// Handler for GET `/api/tasks/timer/{id}`.
async fn handle_get_timer(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
) -> Result<Json<TimerStateResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::get_timer(&mut scope, &user, task_id)?))
}

/// Handler for PUT `/api/tasks/timer/{id}`.
async fn handle_put_timer(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<PutTimerRequest>,
) -> Result<Json<TimerStateResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::put_timer(&mut scope, &user, task_id, &req)?))
}

// --- reason handlers ---

/// Shared body of the four reason-capture endpoints.
async fn submit_reason_impl(
    app_state: AppState,
    user: taskcrew_api::AuthenticatedUser,
    task_id: i64,
    kind: ReasonKind,
    req: ReasonRequest,
) -> Result<(StatusCode, Json<ReasonResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let response: ReasonResponse =
        taskcrew_api::submit_reason(&mut scope, &user, task_id, kind, &req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/api/tasks/timer/{id}/start_early_reason`.
async fn handle_start_early_reason(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<ReasonRequest>,
) -> Result<(StatusCode, Json<ReasonResponse>), HttpError> {
    submit_reason_impl(app_state, user, task_id, ReasonKind::StartEarly, req).await
}

/// Handler for POST `/api/tasks/timer/{id}/start_late_reason`.
async fn handle_start_late_reason(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<ReasonRequest>,
) -> Result<(StatusCode, Json<ReasonResponse>), HttpError> {
    submit_reason_impl(app_state, user, task_id, ReasonKind::StartLate, req).await
}

/// Handler for POST `/api/tasks/timer/{id}/pause_reason`.
async fn handle_pause_reason(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<ReasonRequest>,
) -> Result<(StatusCode, Json<ReasonResponse>), HttpError> {
    submit_reason_impl(app_state, user, task_id, ReasonKind::Pause, req).await
}

/// Handler for POST `/api/tasks/timer/{id}/stop_reason`.
async fn handle_stop_reason(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
    Json(req): Json<ReasonRequest>,
) -> Result<(StatusCode, Json<ReasonResponse>), HttpError> {
    submit_reason_impl(app_state, user, task_id, ReasonKind::Stop, req).await
}

/// Handler for GET `/api/tasks/{id}/time-updates`.
async fn handle_time_log(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
) -> Result<Json<TimeLogResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::time_log(&mut scope, &user, task_id)?))
}

/// Handler for GET `/api/tasks/{id}/reasons`.
async fn handle_reason_history(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(task_id): Path<i64>,
) -> Result<Json<ReasonHistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::reason_history(&mut scope, &user, task_id)?))
}

// --- user handlers ---

/// Handler for GET `/api/users`.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<Vec<UserSummary>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::list_users(&mut scope, &user)?))
}

/// Handler for POST `/api/users`.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserSummary>), HttpError> {
    info!(username = %req.username, "Handling create_user request");

    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let created: UserSummary = taskcrew_api::create_user(&mut scope, &user, &req)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for PUT `/api/users/{id}`.
async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserSummary>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::update_user(&mut scope, &user, user_id, &req)?))
}

/// Handler for DELETE `/api/users/{id}`.
async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(user_id, "Handling delete_user request");

    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::delete_user(&mut scope, &user, user_id)?))
}

// --- project handlers ---

/// Handler for GET `/api/projects`.
async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<Vec<ProjectResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::list_projects(&mut scope)?))
}

/// Handler for POST `/api/projects`.
async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Json(req): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let project: ProjectResponse = taskcrew_api::create_project(&mut scope, &user, &req)?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Handler for PUT `/api/projects/{id}`.
async fn handle_update_project(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(project_id): Path<i64>,
    Json(req): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::update_project(&mut scope, &user, project_id, &req)?))
}

/// Handler for DELETE `/api/projects/{id}`.
async fn handle_delete_project(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(project_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::delete_project(&mut scope, &user, project_id)?))
}

// --- shift handlers ---

/// Handler for GET `/api/shifts`.
async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<Vec<ShiftResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::list_shifts(&mut scope)?))
}

/// Handler for POST `/api/shifts`.
async fn handle_create_shift(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Json(req): Json<ShiftRequest>,
) -> Result<(StatusCode, Json<ShiftResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let shift: ShiftResponse = taskcrew_api::create_shift(&mut scope, &user, &req)?;
    Ok((StatusCode::CREATED, Json(shift)))
}

/// Handler for PUT `/api/shifts/{id}`.
async fn handle_update_shift(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(shift_id): Path<i64>,
    Json(req): Json<UpdateShiftRequest>,
) -> Result<Json<ShiftResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::update_shift(&mut scope, &user, shift_id, &req)?))
}

/// Handler for DELETE `/api/shifts/{id}`.
async fn handle_delete_shift(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(shift_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::delete_shift(&mut scope, &user, shift_id)?))
}

// --- shift break handlers ---

/// Handler for GET `/api/shift-breaks?shift_id={id}`.
async fn handle_list_shift_breaks(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Query(query): Query<ShiftBreaksQuery>,
) -> Result<Json<Vec<ShiftBreakResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::list_shift_breaks(&mut scope, query.shift_id)?))
}

/// Handler for POST `/api/shift-breaks`.
async fn handle_create_shift_break(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Json(req): Json<ShiftBreakRequest>,
) -> Result<(StatusCode, Json<ShiftBreakResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let shift_break: ShiftBreakResponse =
        taskcrew_api::create_shift_break(&mut scope, &user, &req)?;
    Ok((StatusCode::CREATED, Json(shift_break)))
}

/// Handler for PUT `/api/shift-breaks/{id}`.
async fn handle_update_shift_break(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(shift_break_id): Path<i64>,
    Json(req): Json<UpdateShiftBreakRequest>,
) -> Result<Json<ShiftBreakResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::update_shift_break(
        &mut scope,
        &user,
        shift_break_id,
        &req,
    )?))
}

/// Handler for DELETE `/api/shift-breaks/{id}`.
async fn handle_delete_shift_break(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(shift_break_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::delete_shift_break(&mut scope, &user, shift_break_id)?))
}

// --- holiday handlers ---

/// Handler for GET `/api/declare-holiday`.
async fn handle_list_holidays(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<Vec<HolidayResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::list_holidays(&mut scope)?))
}

/// Handler for POST `/api/declare-holiday`.
async fn handle_create_holiday(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Json(req): Json<HolidayRequest>,
) -> Result<(StatusCode, Json<HolidayResponse>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    let holiday: HolidayResponse = taskcrew_api::create_holiday(&mut scope, &user, &req)?;
    Ok((StatusCode::CREATED, Json(holiday)))
}

/// Handler for PUT `/api/declare-holiday/{id}`.
async fn handle_update_holiday(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(holiday_id): Path<i64>,
    Json(req): Json<UpdateHolidayRequest>,
) -> Result<Json<HolidayResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::update_holiday(&mut scope, &user, holiday_id, &req)?))
}

/// Handler for DELETE `/api/declare-holiday/{id}`.
async fn handle_delete_holiday(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Path(holiday_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::delete_holiday(&mut scope, &user, holiday_id)?))
}

// --- company handlers ---

/// Handler for GET `/api/companyDetails`.
async fn handle_company_details(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
) -> Result<Json<CompanyResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::company_details(&mut scope)?))
}

/// Handler for PUT `/api/companyDetails`.
async fn handle_update_company(
    AxumState(app_state): AxumState<AppState>,
    BearerUser(user): BearerUser,
    Json(req): Json<UpdateCompanyRequest>,
) -> Result<Json<CompanyResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mut scope = persistence.for_company(user.company_id);
    Ok(Json(taskcrew_api::update_company(&mut scope, &user, &req)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route("/api/tasks", get(handle_list_tasks).post(handle_create_task))
        .route(
            "/api/tasks/my",
            get(handle_list_my_tasks).post(handle_create_my_task),
        )
        .route("/api/tasks/all", get(handle_list_all_tasks))
        .route(
            "/api/tasks/{id}",
            put(handle_update_task)
                .patch(handle_patch_task)
                .delete(handle_delete_task),
        )
        .route("/api/tasks/{id}/assign", patch(handle_reassign_task))
        .route("/api/tasks/{id}/approval", patch(handle_set_approval))
        .route("/api/tasks/{id}/timer", patch(handle_timer_action))
        .route("/api/tasks/{id}/reasons", get(handle_reason_history))
        .route("/api/tasks/{id}/time-updates", get(handle_time_log))
        .route(
            "/api/tasks/timer/{id}",
            get(handle_get_timer).put(handle_put_timer),
        )
        .route(
            "/api/tasks/timer/{id}/start_early_reason",
            post(handle_start_early_reason),
        )
        .route(
            "/api/tasks/timer/{id}/start_late_reason",
            post(handle_start_late_reason),
        )
        .route("/api/tasks/timer/{id}/pause_reason", post(handle_pause_reason))
        .route("/api/tasks/timer/{id}/stop_reason", post(handle_stop_reason))
        .route("/api/users", get(handle_list_users).post(handle_create_user))
        .route("/api/users/me", get(handle_whoami))
        .route(
            "/api/users/{id}",
            put(handle_update_user).delete(handle_delete_user),
        )
        .route(
            "/api/projects",
            get(handle_list_projects).post(handle_create_project),
        )
        .route(
            "/api/projects/{id}",
            put(handle_update_project).delete(handle_delete_project),
        )
        .route("/api/shifts", get(handle_list_shifts).post(handle_create_shift))
        .route(
            "/api/shifts/{id}",
            put(handle_update_shift).delete(handle_delete_shift),
        )
        .route(
            "/api/shift-breaks",
            get(handle_list_shift_breaks).post(handle_create_shift_break),
        )
        .route(
            "/api/shift-breaks/{id}",
            put(handle_update_shift_break).delete(handle_delete_shift_break),
        )
        .route(
            "/api/declare-holiday",
            get(handle_list_holidays).post(handle_create_holiday),
        )
        .route(
            "/api/declare-holiday/{id}",
            put(handle_update_holiday).delete(handle_delete_holiday),
        )
        .route("/api/companyDetails", get(handle_company_details).put(handle_update_company))
        .with_state(app_state)
}

/// Builds the token service from the environment.
///
/// `TASKCREW_JWT_SECRET` must be set in production; a development
/// fallback is used (with a loud warning) when it is absent.
/// `TASKCREW_JWT_EXPIRY_SECS` overrides the one-day default.
fn token_service_from_env() -> Result<TokenService, Box<dyn std::error::Error>> {
    let secret: String = std::env::var("TASKCREW_JWT_SECRET").unwrap_or_else(|_| {
        warn!("TASKCREW_JWT_SECRET is not set; using an insecure development secret");
        String::from("taskcrew-development-secret-do-not-deploy")
    });

    let expiry_secs: i64 = std::env::var("TASKCREW_JWT_EXPIRY_SECS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(taskcrew_api::DEFAULT_TOKEN_EXPIRY_SECS);

    Ok(TokenService::from_secret(&secret, expiry_secs)?)
}

/// Reads the pause trust policy from the environment
/// (`TASKCREW_TRUST_POLICY`: `client` default, `server` opt-in).
fn trust_policy_from_env() -> TrustPolicy {
    std::env::var("TASKCREW_TRUST_POLICY")
        .map(|value| TrustPolicy::parse(&value))
        .unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Taskcrew server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let tokens: TokenService = token_service_from_env()?;
    let trust: TrustPolicy = trust_policy_from_env();

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        tokens: Arc::new(tokens),
        trust,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Helper to create a test app with in-memory persistence.
    fn create_test_app() -> Router {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        let tokens: TokenService =
            TokenService::from_secret("taskcrew-server-test-secret-0123456789", 3600)
                .expect("Failed to create token service");
        let app_state: AppState = AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            tokens: Arc::new(tokens),
            trust: TrustPolicy::ClientSupplied,
        };
        build_router(app_state)
    }

    /// Sends a JSON request and returns status plus parsed body.
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn register_body(tag: &str, code: &str) -> Value {
        json!({
            "username": format!("user-{tag}"),
            "email": format!("{tag}@example.com"),
            "password": "a sturdy password",
            "confirmPassword": "a sturdy password",
            "companyName": "Example Co",
            "companyCode": code,
        })
    }

    /// Registers an account and logs it in, returning the token.
    async fn register_and_login(app: &Router, tag: &str, code: &str) -> String {
        let (status, _) = send(
            app,
            "POST",
            "/api/auth/register",
            None,
            Some(register_body(tag, code)),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);

        let (status, body) = send(
            app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({
                "email": format!("{tag}@example.com"),
                "password": "a sturdy password",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_login_and_empty_listing() {
        let app: Router = create_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(register_body("founder", "EX-1")),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        assert_eq!(body["user"]["role"], "admin");

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "founder@example.com", "password": "a sturdy password"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let token: &str = body["token"].as_str().unwrap();

        let (status, body) = send(&app, "GET", "/api/tasks", Some(token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_registration_returns_conflict() {
        let app: Router = create_test_app();

        let (status, _) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(register_body("dup", "EX-2")),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(register_body("dup", "EX-2")),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn test_bad_login_is_generic_bad_request() {
        let app: Router = create_test_app();
        register_and_login(&app, "secretive", "EX-3").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "secretive@example.com", "password": "nope"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email or password");

        // Unknown email: identical shape, no existence leak.
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "nope"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_missing_token_is_401_and_bad_token_is_403() {
        let app: Router = create_test_app();

        let (status, _) = send(&app, "GET", "/api/tasks", None, None).await;
        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, "GET", "/api/tasks", Some("not.a.token"), None).await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_role_gating_on_task_creation() {
        let app: Router = create_test_app();
        register_and_login(&app, "boss", "EX-4").await;
        let employee_token: String = register_and_login(&app, "worker", "EX-4").await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(&employee_token),
            Some(json!({
                "assigned_to": 1,
                "title": "Sweep the floor",
                "priority": 2,
                "start": "2026-03-02T10:00:00Z",
                "end_time": "2026-03-02T11:00:00Z",
                "duration_minutes": 60,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_reassignment_flow_end_to_end() {
        let app: Router = create_test_app();
        let admin_token: String = register_and_login(&app, "chief", "EX-5").await;
        register_and_login(&app, "hand", "EX-5").await;

        // Find the employee's id via the admin user listing.
        let (status, users) = send(&app, "GET", "/api/users", Some(&admin_token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        let employee_id: i64 = users
            .as_array()
            .unwrap()
            .iter()
            .find(|u| u["username"] == "user-hand")
            .unwrap()["user_id"]
            .as_i64()
            .unwrap();
        let admin_id: i64 = users
            .as_array()
            .unwrap()
            .iter()
            .find(|u| u["username"] == "user-chief")
            .unwrap()["user_id"]
            .as_i64()
            .unwrap();

        // T on the admin, U occupying the employee's 10:30-11:30.
        let (status, t) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(&admin_token),
            Some(json!({
                "assigned_to": admin_id,
                "title": "Audit prep",
                "priority": 1,
                "start": "2026-03-02T08:00:00Z",
                "end_time": "2026-03-02T09:00:00Z",
                "duration_minutes": 60,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);

        let (status, _u) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(&admin_token),
            Some(json!({
                "assigned_to": employee_id,
                "title": "Stocktake",
                "priority": 2,
                "start": "2026-03-02T10:30:00Z",
                "end_time": "2026-03-02T11:30:00Z",
                "duration_minutes": 60,
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);

        let t_id: i64 = t["task_id"].as_i64().unwrap();
        let (status, body) = send(
            &app,
            "PATCH",
            &format!("/api/tasks/{t_id}/assign"),
            Some(&admin_token),
            Some(json!({
                "assigned_to": employee_id,
                "start": "2026-03-02T10:00:00Z",
                "end_time": "2026-03-02T11:00:00Z",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["rescheduled_conflicts"], 1);
        assert_eq!(body["task"]["assigned_to"], employee_id);

        // The pushed conflict sits 5 minutes after the new end.
        let (_, all) = send(&app, "GET", "/api/tasks/all", Some(&admin_token), None).await;
        let pushed = all
            .as_array()
            .unwrap()
            .iter()
            .find(|task| task["start"] == "2026-03-02T11:05:00Z")
            .expect("conflicting task must have been pushed");
        assert_eq!(pushed["end_time"], "2026-03-02T12:05:00Z");
    }

    #[tokio::test]
    async fn test_timer_pause_stores_verbatim_and_reason_round_trip() {
        let app: Router = create_test_app();
        let admin_token: String = register_and_login(&app, "lead", "EX-6").await;

        let (_, users) = send(&app, "GET", "/api/users", Some(&admin_token), None).await;
        let admin_id: i64 = users.as_array().unwrap()[0]["user_id"].as_i64().unwrap();

        let (_, task) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(&admin_token),
            Some(json!({
                "assigned_to": admin_id,
                "title": "Calibrate sensors",
                "priority": 2,
                "start": "2026-03-02T10:00:00Z",
                "end_time": "2026-03-02T11:00:00Z",
                "duration_minutes": 60,
            })),
        )
        .await;
        let task_id: i64 = task["task_id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/api/tasks/{task_id}/timer"),
            Some(&admin_token),
            Some(json!({"action": "start"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, state) = send(
            &app,
            "PATCH",
            &format!("/api/tasks/{task_id}/timer"),
            Some(&admin_token),
            Some(json!({"action": "pause", "elapsed_seconds": 930})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(state["elapsed_seconds"], 930);

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/tasks/timer/{task_id}/stop_reason"),
            Some(&admin_token),
            Some(json!({"reason": "end of shift"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);

        // Blank reason: rejected, nothing written.
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/tasks/timer/{task_id}/stop_reason"),
            Some(&admin_token),
            Some(json!({"reason": "   "})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);

        let (status, history) = send(
            &app,
            "GET",
            &format!("/api/tasks/{task_id}/reasons"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(history["reasons"].as_array().unwrap().len(), 1);
        assert_eq!(history["reasons"][0]["reason_text"], "end of shift");

        let (status, timer) = send(
            &app,
            "GET",
            &format!("/api/tasks/timer/{task_id}"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(timer["elapsed_seconds"], 930);
    }

    #[tokio::test]
    async fn test_cross_tenant_task_access_is_404() {
        let app: Router = create_test_app();
        let acme_token: String = register_and_login(&app, "acmeboss", "ACME").await;
        let globex_token: String = register_and_login(&app, "globexboss", "GLOBEX").await;

        let (_, users) = send(&app, "GET", "/api/users", Some(&acme_token), None).await;
        let acme_admin_id: i64 = users.as_array().unwrap()[0]["user_id"].as_i64().unwrap();

        let (_, task) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(&acme_token),
            Some(json!({
                "assigned_to": acme_admin_id,
                "title": "Confidential",
                "priority": 1,
                "start": "2026-03-02T10:00:00Z",
                "end_time": "2026-03-02T11:00:00Z",
                "duration_minutes": 60,
            })),
        )
        .await;
        let task_id: i64 = task["task_id"].as_i64().unwrap();

        // 404, not 403: existence must not leak across tenants.
        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/api/tasks/{task_id}"),
            Some(&globex_token),
            Some(json!({"status": "completed"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/tasks/{task_id}"),
            Some(&globex_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_holiday_shift_and_company_surfaces() {
        let app: Router = create_test_app();
        let admin_token: String = register_and_login(&app, "planner", "EX-7").await;

        let (status, holiday) = send(
            &app,
            "POST",
            "/api/declare-holiday",
            Some(&admin_token),
            Some(json!({"holiday_date": "2026-12-25", "description": "Christmas"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        let holiday_id: i64 = holiday["holiday_id"].as_i64().unwrap();

        let (status, shift) = send(
            &app,
            "POST",
            "/api/shifts",
            Some(&admin_token),
            Some(json!({"name": "Day", "start_time": "08:00", "end_time": "16:00"})),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        let shift_id: i64 = shift["shift_id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "POST",
            "/api/shift-breaks",
            Some(&admin_token),
            Some(json!({
                "shift_id": shift_id,
                "name": "Lunch",
                "start_time": "12:00",
                "end_time": "12:30",
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);

        let (status, breaks) = send(
            &app,
            "GET",
            &format!("/api/shift-breaks?shift_id={shift_id}"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(breaks.as_array().unwrap().len(), 1);

        let (status, company) = send(
            &app,
            "GET",
            "/api/companyDetails",
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(company["code"], "EX-7");

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/declare-holiday/{holiday_id}"),
            Some(&admin_token),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_whoami_reflects_token() {
        let app: Router = create_test_app();
        let token: String = register_and_login(&app, "me", "EX-8").await;

        let (status, body) = send(&app, "GET", "/api/users/me", Some(&token), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["user"]["username"], "user-me");
        assert_eq!(body["user"]["role"], "admin");
    }
}
