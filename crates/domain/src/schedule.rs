// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Schedule windows and timestamp canonicalization.
//!
//! Timestamps are persisted as RFC 3339 UTC text with whole-second
//! precision. Canonicalizing every stored value this way keeps
//! lexicographic comparison in SQL identical to chronological order,
//! which the overlap queries rely on.

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, UtcOffset};

use crate::error::DomainError;

/// Parses a stored or request-supplied RFC 3339 timestamp.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimestamp` when the input is not valid
/// RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::InvalidTimestamp {
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Formats a timestamp into the canonical stored form.
///
/// The instant is normalized to UTC and truncated to whole seconds so
/// that every stored timestamp has the same shape and width.
#[must_use]
pub fn format_timestamp(instant: OffsetDateTime) -> String {
    let canonical: OffsetDateTime = instant
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .unwrap_or_else(|_| instant.to_offset(UtcOffset::UTC));
    canonical
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

/// A half-open scheduling interval `[start, end)`.
///
/// Construction does not require `start < end`: the stored schema never
/// enforced that ordering and callers depend on the permissiveness.
/// `is_ordered` exposes the check for callers that want it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive start instant.
    pub start: OffsetDateTime,
    /// Exclusive end instant.
    pub end: OffsetDateTime,
}

impl TimeWindow {
    /// Creates a window from two instants.
    #[must_use]
    pub const fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self { start, end }
    }

    /// Parses a window from two stored timestamp strings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if either bound fails to
    /// parse.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Ok(Self {
            start: parse_timestamp(start)?,
            end: parse_timestamp(end)?,
        })
    }

    /// Whether `start < end` actually holds for this window.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    /// Half-open overlap test: `[a, b)` and `[c, d)` overlap iff
    /// `a < d AND c < b`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The signed length of the window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The canonical stored form of the start bound.
    #[must_use]
    pub fn start_string(&self) -> String {
        format_timestamp(self.start)
    }

    /// The canonical stored form of the end bound.
    #[must_use]
    pub fn end_string(&self) -> String {
        format_timestamp(self.end)
    }
}
