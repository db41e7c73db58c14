// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{NewTask, NewUser, Persistence};

/// Creates a fresh in-memory persistence adapter.
pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates a company and returns its id.
pub fn create_test_company(persistence: &mut Persistence, code: &str) -> i64 {
    persistence
        .create_company(&format!("Company {code}"), code)
        .expect("Failed to create company")
}

/// Creates a user in the given company and returns their id.
///
/// Username and email are derived from `tag`, which must be unique
/// across the whole test database.
pub fn create_test_user(persistence: &mut Persistence, company_id: i64, tag: &str) -> i64 {
    persistence
        .create_user(
            company_id,
            &NewUser {
                username: format!("user-{tag}"),
                email: format!("{tag}@example.com"),
                password: String::from("correct horse battery staple"),
                first_name: Some(String::from("Test")),
                last_name: Some(String::from("User")),
                role: String::from("user"),
                department: Some(format!("Dept {tag}")),
            },
        )
        .expect("Failed to create user")
}

/// Builds a task for `assignee` over `[start, end)` (canonical RFC 3339
/// strings) with sensible defaults elsewhere.
pub fn test_task(assignee: i64, start: &str, end: &str) -> NewTask {
    NewTask {
        assigned_by: None,
        assigned_to: assignee,
        title: String::from("Test task"),
        description: Some(String::from("A task used in tests")),
        project_title: None,
        priority: 2,
        status: String::from("pending"),
        approval_status: String::from("pending"),
        start: start.to_string(),
        end_time: end.to_string(),
        duration_minutes: 60,
        added_by_user: false,
    }
}
