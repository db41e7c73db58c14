// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain rule violations.

/// Errors raised by domain type construction and rule validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A role string did not match a known role.
    InvalidRole(String),
    /// A priority code was outside 1..=3.
    InvalidPriority(i32),
    /// A status string did not match a known task status.
    InvalidStatus(String),
    /// An approval-status string did not match a known value.
    InvalidApprovalStatus(String),
    /// A reason-type code was outside 1..=7.
    InvalidReasonKind(i32),
    /// A timer-event code was neither start (1) nor stop (2).
    InvalidTimeLogKind(i32),
    /// A timestamp string could not be parsed as RFC 3339.
    InvalidTimestamp {
        /// The offending input.
        value: String,
        /// What went wrong while parsing.
        message: String,
    },
    /// A reason submission was empty or whitespace-only.
    BlankReason,
    /// An email address failed structural validation.
    InvalidEmail(String),
    /// A username failed structural validation.
    InvalidUsername(String),
    /// A selected-employees attribute could not be decoded.
    InvalidSelectedEmployees(String),
    /// A holiday date string could not be parsed as a calendar date.
    InvalidHolidayDate(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(value) => {
                write!(f, "Invalid role: '{value}'. Must be 'admin' or 'user'")
            }
            Self::InvalidPriority(code) => {
                write!(
                    f,
                    "Invalid priority: {code}. Must be 1 (High), 2 (Medium) or 3 (Low)"
                )
            }
            Self::InvalidStatus(value) => write!(f, "Invalid task status: '{value}'"),
            Self::InvalidApprovalStatus(value) => {
                write!(f, "Invalid approval status: '{value}'")
            }
            Self::InvalidReasonKind(code) => {
                write!(f, "Invalid reason type: {code}. Must be between 1 and 7")
            }
            Self::InvalidTimeLogKind(code) => {
                write!(
                    f,
                    "Invalid time log type: {code}. Must be 1 (start) or 2 (stop)"
                )
            }
            Self::InvalidTimestamp { value, message } => {
                write!(f, "Failed to parse timestamp '{value}': {message}")
            }
            Self::BlankReason => write!(f, "Reason text must not be empty"),
            Self::InvalidEmail(value) => write!(f, "Invalid email address: '{value}'"),
            Self::InvalidUsername(value) => write!(f, "Invalid username: '{value}'"),
            Self::InvalidSelectedEmployees(msg) => {
                write!(f, "Invalid selected employees attribute: {msg}")
            }
            Self::InvalidHolidayDate(value) => {
                write!(f, "Invalid holiday date: '{value}'. Expected YYYY-MM-DD")
            }
        }
    }
}

impl std::error::Error for DomainError {}
