// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field validation rules shared by registration and admin user management.

use chrono::NaiveDate;

use crate::error::DomainError;

/// Maximum accepted username length.
const MAX_USERNAME_LENGTH: usize = 64;

/// Validates a username: non-empty, at most 64 characters, limited to
/// ASCII alphanumerics plus `.`, `-` and `_`.
///
/// # Errors
///
/// Returns `DomainError::InvalidUsername` when the rules are violated.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
        return Err(DomainError::InvalidUsername(username.to_string()));
    }
    let acceptable = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_');
    if !username.chars().all(acceptable) {
        return Err(DomainError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

/// Validates an email address structurally: exactly one `@` with
/// non-empty local part and a dotted, non-empty domain.
///
/// Deliverability is not checked; this mirrors the shallow shape check
/// the registration form performs.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` when the shape is wrong.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DomainError::InvalidEmail(email.to_string()));
    };
    if local.is_empty() || domain.is_empty() {
        return Err(DomainError::InvalidEmail(email.to_string()));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(DomainError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Validates reason text: trims surrounding whitespace and rejects
/// blank submissions.
///
/// Returns the trimmed text, which is what both reason surfaces store.
///
/// # Errors
///
/// Returns `DomainError::BlankReason` for empty or whitespace-only input.
pub fn validate_reason_text(text: &str) -> Result<String, DomainError> {
    let trimmed: &str = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::BlankReason);
    }
    Ok(trimmed.to_string())
}

/// Parses a holiday date in the stored `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns `DomainError::InvalidHolidayDate` for anything else.
pub fn parse_holiday_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidHolidayDate(value.to_string()))
}
