// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use taskcrew_domain::Role;
use taskcrew_persistence::Persistence;

use crate::auth::{AuthenticatedUser, TokenService};
use crate::handlers;
use crate::request_response::{CreateTaskRequest, RegisterRequest, RegisterResponse};

/// A deliberately long test signing secret.
pub const TEST_SECRET: &str = "taskcrew-test-signing-secret-0123456789abcdef";

/// Creates a token service with a one-hour expiry.
pub fn create_test_tokens() -> TokenService {
    TokenService::from_secret(TEST_SECRET, 3600).expect("Failed to create token service")
}

/// One registered company with an admin and a regular employee.
pub struct TestTenant {
    pub company_id: i64,
    pub admin: AuthenticatedUser,
    pub employee: AuthenticatedUser,
}

/// Registers a company (first registrant becomes admin) plus one
/// employee joining by code. `tag` must be unique per test database.
pub fn setup_tenant(persistence: &mut Persistence, tag: &str) -> TestTenant {
    let admin: RegisterResponse = handlers::register(
        persistence,
        &RegisterRequest {
            username: format!("admin-{tag}"),
            email: format!("admin-{tag}@example.com"),
            password: String::from("a sturdy password"),
            confirm_password: String::from("a sturdy password"),
            company_name: format!("Company {tag}"),
            company_code: format!("CODE-{tag}"),
        },
    )
    .expect("Failed to register admin");

    let employee: RegisterResponse = handlers::register(
        persistence,
        &RegisterRequest {
            username: format!("employee-{tag}"),
            email: format!("employee-{tag}@example.com"),
            password: String::from("a sturdy password"),
            confirm_password: String::from("a sturdy password"),
            company_name: String::new(),
            company_code: format!("CODE-{tag}"),
        },
    )
    .expect("Failed to register employee");

    TestTenant {
        company_id: admin.user.company_id,
        admin: AuthenticatedUser {
            user_id: admin.user.user_id,
            company_id: admin.user.company_id,
            role: Role::Admin,
        },
        employee: AuthenticatedUser {
            user_id: employee.user.user_id,
            company_id: employee.user.company_id,
            role: Role::User,
        },
    }
}

/// Creates a fresh in-memory persistence adapter.
pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// A task creation request over `[start, end)` for `assignee`.
pub fn task_request(assignee: i64, start: &str, end: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        assigned_to: assignee,
        title: String::from("Inspect the line"),
        description: Some(String::from("Walk the floor and log anomalies")),
        project_title: Some(String::from("Plant operations")),
        priority: 2,
        start: start.to_string(),
        end_time: end.to_string(),
        duration_minutes: 60,
    }
}
