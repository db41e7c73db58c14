// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use taskcrew_domain::DomainError;

/// Errors that can occur in the lifecycle engine and conflict resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A pause was requested under the client-supplied trust policy
    /// without a client elapsed figure.
    MissingElapsed,
    /// A server-authoritative pause was requested while no start
    /// instant was on record.
    TimerNotStarted,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::MissingElapsed => {
                write!(f, "elapsed_seconds is required when pausing a task timer")
            }
            Self::TimerNotStarted => {
                write!(f, "Timer has no start instant to compute elapsed time from")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
