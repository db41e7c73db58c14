// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Taskcrew task-management system.
//!
//! This crate owns the API contract: authentication and authorization,
//! the error taxonomy the server maps to HTTP statuses, the DTOs, and
//! the handler functions that orchestrate domain logic against the
//! persistence layer. It knows nothing about HTTP itself.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedUser, AuthorizationService, Claims, DEFAULT_TOKEN_EXPIRY_SECS, TokenService,
    extract_bearer_token,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    company_details, create_holiday, create_my_task, create_project, create_shift,
    create_shift_break, create_task, create_user, delete_holiday, delete_project, delete_shift,
    delete_shift_break, delete_task, delete_user, get_timer, list_all_tasks, list_holidays,
    list_my_tasks, list_projects, list_shift_breaks, list_shifts, list_tasks, list_users, login,
    patch_task, put_timer, reason_history, reassign_task, register, set_approval, submit_reason,
    time_log, timer_action, update_company, update_holiday, update_project, update_shift,
    update_shift_break, update_task, update_user, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    ApprovalRequest, CompanyResponse, CreateTaskRequest, CreateUserRequest, HolidayRequest,
    HolidayResponse, LoginRequest, LoginResponse, MessageResponse, PatchTaskRequest,
    ProjectRequest, ProjectResponse, PutTimerRequest, ReasonHistoryEntry, ReasonHistoryResponse,
    ReasonRequest, ReasonResponse, ReassignTaskRequest, ReassignTaskResponse, RegisterRequest,
    RegisterResponse, SelectedEmployeesInput, ShiftBreakRequest, ShiftBreakResponse,
    ShiftRequest, ShiftResponse, TaskResponse, TimeLogResponse, TimeUpdateEntry,
    TimerActionRequest, TimerStateResponse, UpdateCompanyRequest, UpdateHolidayRequest,
    UpdateProjectRequest,
    UpdateShiftBreakRequest, UpdateShiftRequest, UpdateTaskRequest, UpdateUserRequest,
    UserSummary, WhoAmIResponse,
};

// Re-exported so the server depends on one crate for the common types.
pub use taskcrew::TrustPolicy;
pub use taskcrew_domain::{ReasonKind, Role};
