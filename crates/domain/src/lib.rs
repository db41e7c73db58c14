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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use schedule::{TimeWindow, format_timestamp, parse_timestamp};
pub use types::{ApprovalStatus, Priority, ReasonKind, Role, SelectedEmployees, TaskStatus};
pub use validation::{
    parse_holiday_date, validate_email, validate_reason_text, validate_username,
};
