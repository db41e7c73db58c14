// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use taskcrew::CoreError;
use taskcrew_domain::DomainError;
use taskcrew_persistence::PersistenceError;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token accompanied the request.
    MissingToken,
    /// A token was present but failed verification (signature, expiry
    /// or payload shape).
    InvalidToken {
        /// Why verification failed.
        reason: String,
    },
    /// Credential check failed (login boundary).
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The authenticated caller's role does not permit the action.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Token service configuration is unusable (e.g. short secret).
    Configuration {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => write!(f, "Missing bearer token"),
            Self::InvalidToken { reason } => write!(f, "Invalid token: {reason}"),
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden {
                action,
                required_role,
            } => {
                write!(f, "Forbidden: '{action}' requires {required_role} role")
            }
            Self::Configuration { reason } => {
                write!(f, "Auth configuration error: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/persistence errors and represent the
/// API contract; the server maps each variant to one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing or malformed required input (400).
    Validation {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A unique field collided (409).
    Duplicate {
        /// A human-readable description of the collision.
        message: String,
    },
    /// Bad credentials at the login boundary (400, generic message).
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// No bearer token accompanied the request (401).
    MissingToken,
    /// A token was present but failed verification (403).
    InvalidToken {
        /// Why verification failed.
        reason: String,
    },
    /// The caller's role does not permit the action (403).
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The resource is absent within the caller's tenant scope (404).
    ///
    /// Deliberately indistinguishable from "exists, but in another
    /// company": existence must not leak across tenants.
    NotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred (500).
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Duplicate { message } => write!(f, "Duplicate value: {message}"),
            Self::AuthenticationFailed { reason } => {
                write!(f, "{reason}")
            }
            Self::MissingToken => write!(f, "Missing bearer token"),
            Self::InvalidToken { reason } => write!(f, "Invalid token: {reason}"),
            Self::Forbidden {
                action,
                required_role,
            } => {
                write!(f, "Forbidden: '{action}' requires {required_role} role")
            }
            Self::NotFound { message } => write!(f, "Not found: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => Self::MissingToken,
            AuthError::InvalidToken { reason } => Self::InvalidToken { reason },
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Forbidden {
                action,
                required_role,
            } => Self::Forbidden {
                action,
                required_role,
            },
            AuthError::Configuration { reason } => Self::Internal { message: reason },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::Validation {
            field: String::from("password"),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidPriority(_) => "priority",
        DomainError::InvalidStatus(_) => "status",
        DomainError::InvalidApprovalStatus(_) => "approval_status",
        DomainError::InvalidReasonKind(_) => "reason_type",
        DomainError::InvalidTimeLogKind(_) => "update_type",
        DomainError::InvalidTimestamp { .. } => "timestamp",
        DomainError::BlankReason => "reason",
        DomainError::InvalidEmail(_) => "email",
        DomainError::InvalidUsername(_) => "username",
        DomainError::InvalidSelectedEmployees(_) => "selected_employees",
        DomainError::InvalidHolidayDate(_) => "holiday_date",
    };
    ApiError::Validation {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::MissingElapsed => ApiError::Validation {
            field: String::from("elapsed_seconds"),
            message: err.to_string(),
        },
        CoreError::TimerNotStarted => ApiError::Validation {
            field: String::from("timer"),
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Scope-conflated `NotFound` passes through; unique violations become
/// duplicates; everything else is an internal failure the client gets
/// no detail about beyond the stored message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::NotFound { message },
        PersistenceError::DuplicateField(message) => ApiError::Duplicate { message },
        PersistenceError::SerializationError(message) => ApiError::Validation {
            field: String::from("body"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
