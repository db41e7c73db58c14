// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conflict placement for task reassignment.
//!
//! When a task moves onto a busy assignee, every already-assigned task
//! whose window overlaps the incoming one is pushed out of the way:
//! each conflict keeps its original duration and restarts a fixed gap
//! after the incoming window ends.
//!
//! The placement is single-pass and non-cascading: a pushed task's new
//! window is never re-checked against further conflicts, so two pushed
//! tasks of equal priority land on top of each other. That boundary is
//! deliberate and covered by tests rather than fixed.

use time::Duration;

use taskcrew_domain::TimeWindow;

/// Gap between the incoming window's end and each pushed task's new start.
pub const CONFLICT_GAP: Duration = Duration::minutes(5);

/// Computes the replacement window for one conflicting task.
///
/// The new window starts `CONFLICT_GAP` after `target.end` and keeps
/// the conflict's original duration.
#[must_use]
pub fn push_back(target: &TimeWindow, conflict: &TimeWindow) -> TimeWindow {
    let start = target.end + CONFLICT_GAP;
    TimeWindow::new(start, start + conflict.duration())
}

/// Plans replacement windows for every conflicting task.
///
/// `conflicts` is expected in store order; the plan preserves that
/// order. Entries that do not actually overlap `target` are skipped,
/// which lets callers pass an unfiltered candidate list.
#[must_use]
pub fn plan_pushes(
    target: &TimeWindow,
    conflicts: &[(i64, TimeWindow)],
) -> Vec<(i64, TimeWindow)> {
    conflicts
        .iter()
        .filter(|(_, window)| window.overlaps(target))
        .map(|(task_id, window)| (*task_id, push_back(target, window)))
        .collect()
}
