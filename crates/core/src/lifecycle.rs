// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task status lifecycle.
//!
//! The stored status field is flat and the update endpoints accept any
//! valid value; the forward-transition table here documents the
//! intended progression and lets callers opt into enforcement.

use taskcrew_domain::{ApprovalStatus, TaskStatus};

/// The status a freshly created task receives.
///
/// Admin-assigned tasks enter the schedule as `pending`; self-added
/// tasks start `unplanned` until an admin schedules them.
#[must_use]
pub const fn creation_status(added_by_user: bool) -> TaskStatus {
    if added_by_user {
        TaskStatus::Unplanned
    } else {
        TaskStatus::Pending
    }
}

/// The approval status a freshly created task receives.
#[must_use]
pub const fn creation_approval() -> ApprovalStatus {
    ApprovalStatus::Pending
}

/// Whether `from → to` follows the intended forward progression
/// `unplanned → pending → in-progress → completed | incomplete`.
///
/// Setting the same status again is treated as forward (the endpoints
/// are effectively idempotent on status). The update path does NOT
/// enforce this table; it mirrors the source, where status is a plain
/// column write.
#[must_use]
pub const fn is_forward_transition(from: TaskStatus, to: TaskStatus) -> bool {
    use TaskStatus::{Completed, InProgress, Incomplete, Pending, Unplanned};
    match (from, to) {
        (Unplanned, Pending)
        | (Pending, InProgress)
        | (InProgress, Completed | Incomplete) => true,
        _ => matches_same(from, to),
    }
}

const fn matches_same(from: TaskStatus, to: TaskStatus) -> bool {
    from as u8 == to as u8
}
