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

use taskcrew_domain::{DomainError, ReasonKind, validate_reason_text};

/// The kind of a timer log entry.
///
/// Stored as an integer column: 1 for start, 2 for stop. The log is
/// append-only; timer endpoints write entries but nothing ever updates
/// or deletes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLogKind {
    /// The timer was started (code 1).
    Start,
    /// The timer was stopped (code 2).
    Stop,
}

impl TimeLogKind {
    /// The stored integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Start => 1,
            Self::Stop => 2,
        }
    }

    /// Decodes a stored timer-event code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeLogKind` for codes other than
    /// 1 and 2.
    pub const fn from_code(code: i32) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Self::Start),
            2 => Ok(Self::Stop),
            _ => Err(DomainError::InvalidTimeLogKind(code)),
        }
    }
}

/// One append-only timer event attributed to a task and a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLogEntry {
    /// The task whose timer changed.
    pub task_id: i64,
    /// The user who drove the timer.
    pub user_id: i64,
    /// Start or stop.
    pub kind: TimeLogKind,
    /// Canonical RFC 3339 UTC timestamp of the event.
    pub recorded_at: String,
}

impl TimeLogEntry {
    /// Creates a new timer log entry.
    #[must_use]
    pub const fn new(task_id: i64, user_id: i64, kind: TimeLogKind, recorded_at: String) -> Self {
        Self {
            task_id,
            user_id,
            kind,
            recorded_at,
        }
    }
}

/// One append-only reason event attributed to a task and a user.
///
/// This is the audit-table surface of reason capture; the four timer
/// reason kinds are additionally mirrored into embedded columns on the
/// task row by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonEvent {
    /// The task the justification belongs to.
    pub task_id: i64,
    /// The user who supplied the justification.
    pub user_id: i64,
    /// The lifecycle event being justified.
    pub kind: ReasonKind,
    /// Trimmed, non-blank justification text.
    pub text: String,
    /// Canonical RFC 3339 UTC timestamp of the submission.
    pub recorded_at: String,
}

impl ReasonEvent {
    /// Creates a reason event, enforcing the non-blank text invariant.
    ///
    /// The stored text is the trimmed form of the input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BlankReason` for empty or whitespace-only
    /// text; nothing may be recorded in that case.
    pub fn new(
        task_id: i64,
        user_id: i64,
        kind: ReasonKind,
        text: &str,
        recorded_at: String,
    ) -> Result<Self, DomainError> {
        let text: String = validate_reason_text(text)?;
        Ok(Self {
            task_id,
            user_id,
            kind,
            text,
            recorded_at,
        })
    }
}
