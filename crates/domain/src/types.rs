// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core domain types for the task-management system.
//!
//! All persisted enumerations round-trip through their stored database
//! representation (`as_str`/`parse` for text columns, `code`/`from_code`
//! for integer columns) so the persistence layer never interprets raw
//! values on its own.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Account roles within a company.
///
/// Roles gate route access: admins manage the company's users, projects,
/// schedules and task assignments; users operate only on their own tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Company administrator: full tenant-scoped management authority.
    Admin,
    /// Regular employee: self-scoped task operations only.
    User,
}

impl Role {
    /// The stored text form (`admin` / `user`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parses a stored or request-supplied role string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` for anything other than
    /// `admin` or `user` (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(DomainError::InvalidRole(value.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority, stored as an integer column (1 is highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Priority code 1.
    High,
    /// Priority code 2.
    Medium,
    /// Priority code 3.
    Low,
}

impl Priority {
    /// The stored integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Decodes a stored priority code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPriority` for codes outside 1..=3.
    pub const fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Self::High),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Low),
            _ => Err(DomainError::InvalidPriority(code)),
        }
    }
}

/// Task status, stored as a text column.
///
/// The stored field is flat: the timer runs independently of it, and
/// "paused" is a timer condition rather than a status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Self-added task not yet scheduled by an admin.
    Unplanned,
    /// Scheduled, not yet begun. The creation default.
    Pending,
    /// Work has begun.
    InProgress,
    /// Finished successfully.
    Completed,
    /// Closed without completion.
    Incomplete,
}

impl TaskStatus {
    /// The stored text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unplanned => "unplanned",
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Incomplete => "incomplete",
        }
    }

    /// Parses a stored or request-supplied status string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` for unknown values.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_lowercase().as_str() {
            "unplanned" => Ok(Self::Unplanned),
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "incomplete" => Ok(Self::Incomplete),
            _ => Err(DomainError::InvalidStatus(value.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin approval verdict on a task, stored as a text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting an admin verdict. The creation default.
    Pending,
    /// Approved by an admin.
    Approved,
    /// Rejected by an admin, optionally with a reason.
    Rejected,
}

impl ApprovalStatus {
    /// The stored text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a stored or request-supplied approval status string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidApprovalStatus` for unknown values.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidApprovalStatus(value.to_string())),
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Justification categories for task lifecycle events.
///
/// Codes 1 through 4 correspond to the four embedded reason columns on
/// the task row; 5 through 7 exist only in the reason audit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKind {
    /// Started earlier than scheduled (code 1).
    StartEarly,
    /// Started later than scheduled (code 2).
    StartLate,
    /// Timer paused (code 3).
    Pause,
    /// Timer stopped (code 4).
    Stop,
    /// Task closed as incomplete (code 5).
    Incomplete,
    /// Task rejected during approval (code 6).
    Reject,
    /// Uncategorized justification (code 7).
    Other,
}

impl ReasonKind {
    /// The stored integer code (1..=7).
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::StartEarly => 1,
            Self::StartLate => 2,
            Self::Pause => 3,
            Self::Stop => 4,
            Self::Incomplete => 5,
            Self::Reject => 6,
            Self::Other => 7,
        }
    }

    /// Decodes a stored reason-type code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReasonKind` for codes outside 1..=7.
    pub const fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Self::StartEarly),
            2 => Ok(Self::StartLate),
            3 => Ok(Self::Pause),
            4 => Ok(Self::Stop),
            5 => Ok(Self::Incomplete),
            6 => Ok(Self::Reject),
            7 => Ok(Self::Other),
            _ => Err(DomainError::InvalidReasonKind(code)),
        }
    }

    /// Whether this kind also has an embedded column on the task row.
    #[must_use]
    pub const fn has_embedded_column(self) -> bool {
        matches!(
            self,
            Self::StartEarly | Self::StartLate | Self::Pause | Self::Stop
        )
    }
}

/// Admin-curated ordered subset of same-company employee ids.
///
/// Stored as a JSON-encoded text attribute. Writers may supply either a
/// real array or an already-encoded string; both normalize to the
/// canonical encoded form, and readers always decode from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedEmployees(pub Vec<i64>);

impl SelectedEmployees {
    /// The canonical stored encoding: a JSON array of ids.
    #[must_use]
    pub fn encode(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| String::from("[]"))
    }

    /// Decodes a stored attribute value.
    ///
    /// Accepts the canonical JSON array form as well as a legacy
    /// comma-separated form, normalizing both to the id list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSelectedEmployees` if neither
    /// encoding applies.
    pub fn decode(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        if let Ok(ids) = serde_json::from_str::<Vec<i64>>(trimmed) {
            return Ok(Self(ids));
        }
        let ids: Result<Vec<i64>, _> = trimmed
            .split(',')
            .map(|part| part.trim().parse::<i64>())
            .collect();
        match ids {
            Ok(ids) => Ok(Self(ids)),
            Err(e) => Err(DomainError::InvalidSelectedEmployees(format!(
                "'{trimmed}' is neither a JSON array nor a comma-separated id list: {e}"
            ))),
        }
    }
}
