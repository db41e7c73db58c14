// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-task timer bookkeeping.
//!
//! The stored representation is flat: a `timer_start` timestamp column
//! and an `elapsed_seconds` counter. This module gives those columns an
//! explicit state machine (`Stopped → Running → Paused`) and a pluggable
//! trust policy deciding who computes elapsed time on pause.
//!
//! Two preserved quirks of the stored model:
//! - starting an already-running timer silently overwrites the start
//!   instant, losing the original one;
//! - pausing and stopping leave `timer_start` in place, so the columns
//!   alone cannot distinguish paused from running. The machine is the
//!   authoritative interpretation; the columns are its projection.

use time::OffsetDateTime;

use crate::error::CoreError;

/// Who is trusted to compute elapsed seconds when a timer pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrustPolicy {
    /// The client supplies the figure and it is stored verbatim,
    /// never recomputed and never clamped. Source-compatible default.
    #[default]
    ClientSupplied,
    /// The server computes `accumulated + (now - since)` from its own
    /// clock and ignores any client figure.
    ServerAuthoritative,
}

impl TrustPolicy {
    /// Parses a configuration value (`client` / `server`).
    ///
    /// Unknown values fall back to the source-compatible default.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "server" => Self::ServerAuthoritative,
            _ => Self::ClientSupplied,
        }
    }
}

/// Logical timer state for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Not running; `accumulated` holds elapsed seconds so far.
    Stopped {
        /// Elapsed seconds accumulated across prior runs.
        accumulated: i64,
    },
    /// Running since `since`.
    Running {
        /// The recorded start instant.
        since: OffsetDateTime,
        /// Elapsed seconds accumulated before this run.
        accumulated: i64,
    },
    /// Paused with `accumulated` elapsed seconds.
    Paused {
        /// Elapsed seconds accumulated up to the pause.
        accumulated: i64,
    },
}

impl TimerState {
    /// Reconstructs the machine from the stored columns.
    ///
    /// A present `timer_start` reads as Running; the columns cannot
    /// represent Paused distinctly (see module docs).
    #[must_use]
    pub const fn from_columns(timer_start: Option<OffsetDateTime>, elapsed_seconds: i64) -> Self {
        match timer_start {
            Some(since) => Self::Running {
                since,
                accumulated: elapsed_seconds,
            },
            None => Self::Stopped {
                accumulated: elapsed_seconds,
            },
        }
    }

    /// Elapsed seconds currently on record.
    #[must_use]
    pub const fn accumulated(&self) -> i64 {
        match self {
            Self::Stopped { accumulated }
            | Self::Running { accumulated, .. }
            | Self::Paused { accumulated } => *accumulated,
        }
    }

    /// Starts (or restarts) the timer at `now`.
    ///
    /// Starting while already running overwrites the start instant and
    /// discards the original one. The stored model behaves the same
    /// way, so the machine does too.
    #[must_use]
    pub const fn start(self, now: OffsetDateTime) -> Self {
        Self::Running {
            since: now,
            accumulated: self.accumulated(),
        }
    }

    /// Pauses the timer, computing the accumulated figure per `policy`.
    ///
    /// # Errors
    ///
    /// - `CoreError::MissingElapsed` under `ClientSupplied` when no
    ///   client figure was given.
    /// - `CoreError::TimerNotStarted` under `ServerAuthoritative` when
    ///   the machine is not running.
    pub fn pause(
        self,
        policy: TrustPolicy,
        now: OffsetDateTime,
        client_elapsed: Option<i64>,
    ) -> Result<Self, CoreError> {
        let accumulated: i64 = match policy {
            TrustPolicy::ClientSupplied => client_elapsed.ok_or(CoreError::MissingElapsed)?,
            TrustPolicy::ServerAuthoritative => match self {
                Self::Running {
                    since, accumulated, ..
                } => accumulated + (now - since).whole_seconds().max(0),
                Self::Stopped { .. } | Self::Paused { .. } => {
                    return Err(CoreError::TimerNotStarted);
                }
            },
        };
        Ok(Self::Paused { accumulated })
    }

    /// Stops the timer.
    ///
    /// Stopping only freezes the accumulated figure; the caller logs
    /// the stop event and any status change happens through a separate
    /// explicit call.
    #[must_use]
    pub const fn stop(self) -> Self {
        Self::Stopped {
            accumulated: self.accumulated(),
        }
    }
}

/// Computes the elapsed figure a pause should store, without going
/// through the full machine.
///
/// This is the column-level helper the API layer uses: it receives the
/// stored `timer_start`/`elapsed_seconds` pair plus the optional client
/// figure and yields the new `elapsed_seconds` value.
///
/// # Errors
///
/// Same conditions as [`TimerState::pause`].
pub fn pause_elapsed(
    policy: TrustPolicy,
    now: OffsetDateTime,
    timer_start: Option<OffsetDateTime>,
    current_elapsed: i64,
    client_elapsed: Option<i64>,
) -> Result<i64, CoreError> {
    let state: TimerState = TimerState::from_columns(timer_start, current_elapsed);
    Ok(state.pause(policy, now, client_elapsed)?.accumulated())
}
