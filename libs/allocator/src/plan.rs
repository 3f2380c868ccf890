//! Group count planning.
//!
//! Before any person is placed, the requested group count is checked against
//! what the roster can support and lowered if needed:
//!
//! 1. **Capacity**: `groups * min_group_size` must not exceed the head count.
//! 2. **WRITER supply** (if required): one WRITER per group.
//! 3. **DP supply** (if required): one DP per group, checked against the
//!    count left by step 2.
//!
//! Each step that lowers the count records a [`Notice`]. A step that would
//! leave zero groups fails instead.
//!
//! Planning depends only on the roster and constraints, never on randomness.

use serde::Serialize;
use tracing::info;

use crewgroup_roster::{Role, Roster};

use crate::{AllocationError, Constraints};

/// An informational notice that the group count was lowered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Too few people for the requested groups at the minimum size.
    Capacity {
        requested: usize,
        min_group_size: usize,
        people: usize,
        reduced_to: usize,
    },

    /// Too few WRITERs to seat one per group.
    WriterShortage { from: usize, to: usize },

    /// Too few DPs to seat one per group.
    DpShortage { from: usize, to: usize },
}

impl Notice {
    /// Group count after this notice.
    pub fn reduced_to(&self) -> usize {
        match self {
            Notice::Capacity { reduced_to, .. } => *reduced_to,
            Notice::WriterShortage { to, .. } | Notice::DpShortage { to, .. } => *to,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Capacity {
                requested,
                min_group_size,
                reduced_to,
                ..
            } => write!(
                f,
                "Not enough people to form {} groups of size {}. Reducing to {} groups.",
                requested, min_group_size, reduced_to
            ),
            Notice::WriterShortage { from, to } => write!(
                f,
                "Not enough WRITERs to fill {} groups. Reducing to {} groups.",
                from, to
            ),
            Notice::DpShortage { from, to } => write!(
                f,
                "Not enough DPs to fill {} groups. Reducing to {} groups.",
                from, to
            ),
        }
    }
}

/// Outcome of planning: the group count to allocate and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Group count that was asked for.
    pub requested: usize,

    /// Group count that will be formed.
    pub group_count: usize,

    /// Reductions applied, in order.
    pub notices: Vec<Notice>,
}

impl Plan {
    /// Returns true if the group count was lowered.
    pub fn is_degraded(&self) -> bool {
        !self.notices.is_empty()
    }
}

/// Check preconditions and settle the group count for `roster`.
///
/// Fails with `EmptyRoster` before looking at the constraints.
pub fn plan_group_count(
    roster: &Roster,
    constraints: &Constraints,
) -> Result<Plan, AllocationError> {
    if roster.is_empty() {
        return Err(AllocationError::EmptyRoster);
    }
    constraints.validate()?;

    let people = roster.len();
    let min_group_size = constraints.min_group_size;
    let requested = constraints.group_count;
    let mut group_count = requested;
    let mut notices = Vec::new();

    if group_count.saturating_mul(min_group_size) > people {
        let feasible = people / min_group_size;
        if feasible < 1 {
            return Err(AllocationError::InsufficientPeople {
                people,
                min_group_size,
            });
        }
        let notice = Notice::Capacity {
            requested,
            min_group_size,
            people,
            reduced_to: feasible,
        };
        info!(requested, reduced_to = feasible, "{}", notice);
        notices.push(notice);
        group_count = feasible;
    }

    if constraints.require_writer {
        group_count = limit_by_role(
            roster,
            Role::Writer,
            group_count,
            AllocationError::NoWriterCandidate,
            |from, to| Notice::WriterShortage { from, to },
            &mut notices,
        )?;
    }

    if constraints.require_dp {
        group_count = limit_by_role(
            roster,
            Role::Dp,
            group_count,
            AllocationError::NoDpCandidate,
            |from, to| Notice::DpShortage { from, to },
            &mut notices,
        )?;
    }

    Ok(Plan {
        requested,
        group_count,
        notices,
    })
}

fn limit_by_role(
    roster: &Roster,
    role: Role,
    group_count: usize,
    missing: AllocationError,
    notice: impl FnOnce(usize, usize) -> Notice,
    notices: &mut Vec<Notice>,
) -> Result<usize, AllocationError> {
    let available = roster.count(role);
    if available >= group_count {
        return Ok(group_count);
    }
    if available == 0 {
        return Err(missing);
    }

    let notice = notice(group_count, available);
    info!(%role, from = group_count, to = available, "{}", notice);
    notices.push(notice);
    Ok(available)
}
