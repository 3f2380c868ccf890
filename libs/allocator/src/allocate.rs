//! Group allocation.
//!
//! Given the planned group count `G`, people are placed in four passes:
//!
//! 1. **WRITER seats** (if required): the WRITERs are shuffled and the first
//!    `G` are seated in groups `0..G`, one each.
//! 2. **DP seats** (if required): the same, independently, for DPs.
//! 3. **Fill**: each group in turn is topped up to the minimum size from the
//!    unplaced people, scanning in roster order for the first person that
//!    would not put a third DP in the group. When nobody qualifies the first
//!    unplaced person is taken anyway.
//! 4. **Drain**: anyone still unplaced is dealt round-robin from group 0.
//!
//! The DP cap only applies when DPs are required, and only during fill.
//! The fallback in fill and the drain pass may both exceed it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crewgroup_roster::{Person, Role, Roster};

use crate::{plan_group_count, AllocationError, Constraints, Notice};

/// Most DPs the fill pass will place in one group.
pub const DP_CAP: usize = 2;

/// One formed group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    label: usize,
    members: Vec<Person>,
}

impl Group {
    /// 1-based label used for display and export.
    pub fn label(&self) -> usize {
        self.label
    }

    /// Members in placement order.
    pub fn members(&self) -> &[Person] {
        &self.members
    }

    /// Get the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Count members holding `role`.
    pub fn count(&self, role: Role) -> usize {
        self.members.iter().filter(|p| p.role() == role).count()
    }
}

/// The result of a successful allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    requested_group_count: usize,
    groups: Vec<Group>,
    notices: Vec<Notice>,
}

impl Allocation {
    /// Groups in label order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Consume the allocation, returning the groups.
    pub fn into_groups(self) -> Vec<Group> {
        self.groups
    }

    /// Reductions applied to the requested group count.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Group count that was asked for.
    pub fn requested_group_count(&self) -> usize {
        self.requested_group_count
    }

    /// Group count that was formed.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if fewer groups were formed than requested.
    pub fn is_degraded(&self) -> bool {
        !self.notices.is_empty()
    }

    /// Render the plain-text export.
    ///
    /// ```text
    /// Group 1:
    /// Ada - WRITER
    /// Bo - DP
    ///
    /// Group 2:
    /// ...
    /// ```
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for group in &self.groups {
            out.push_str(&format!("Group {}:\n", group.label));
            for person in &group.members {
                out.push_str(&format!("{} - {}\n", person.name(), person.role()));
            }
            out.push('\n');
        }
        out
    }
}

/// Partition `roster` into groups using `rng` for the role shuffles.
///
/// The roster is only borrowed; every person is placed exactly once.
pub fn allocate<R: Rng + ?Sized>(
    roster: &Roster,
    constraints: &Constraints,
    rng: &mut R,
) -> Result<Allocation, AllocationError> {
    let plan = plan_group_count(roster, constraints)?;
    let people = roster.people();
    let group_count = plan.group_count;

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); group_count];
    let mut placed = vec![false; people.len()];

    if constraints.require_writer {
        seat_role(people, Role::Writer, &mut groups, &mut placed, rng);
    }
    if constraints.require_dp {
        seat_role(people, Role::Dp, &mut groups, &mut placed, rng);
    }

    let mut remaining: Vec<usize> = (0..people.len()).filter(|&i| !placed[i]).collect();

    fill(
        people,
        &mut groups,
        &mut remaining,
        constraints.min_group_size,
        constraints.require_dp,
    );

    debug!(leftover = remaining.len(), "draining round-robin");
    for (turn, index) in remaining.into_iter().enumerate() {
        groups[turn % group_count].push(index);
    }

    let groups = groups
        .into_iter()
        .enumerate()
        .map(|(i, members)| Group {
            label: i + 1,
            members: members.into_iter().map(|m| people[m].clone()).collect(),
        })
        .collect();

    Ok(Allocation {
        requested_group_count: plan.requested,
        groups,
        notices: plan.notices,
    })
}

/// Allocate with a generator seeded from the operating system.
///
/// Repeated calls on the same roster give different groupings.
pub fn allocate_with_entropy(
    roster: &Roster,
    constraints: &Constraints,
) -> Result<Allocation, AllocationError> {
    let mut rng = StdRng::from_os_rng();
    allocate(roster, constraints, &mut rng)
}

/// Allocate reproducibly from a fixed seed.
pub fn allocate_seeded(
    roster: &Roster,
    constraints: &Constraints,
    seed: u64,
) -> Result<Allocation, AllocationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    allocate(roster, constraints, &mut rng)
}

/// Seat one person of `role` in each group, chosen uniformly at random.
///
/// Planning guarantees at least `groups.len()` candidates.
fn seat_role<R: Rng + ?Sized>(
    people: &[Person],
    role: Role,
    groups: &mut [Vec<usize>],
    placed: &mut [bool],
    rng: &mut R,
) {
    let mut candidates: Vec<usize> = (0..people.len())
        .filter(|&i| people[i].role() == role && !placed[i])
        .collect();
    candidates.shuffle(rng);

    for (group, &index) in groups.iter_mut().zip(candidates.iter()) {
        group.push(index);
        placed[index] = true;
    }
    debug!(%role, seated = groups.len(), pool = candidates.len(), "seated required role");
}

/// Top each group up to `min_group_size` in group order.
fn fill(
    people: &[Person],
    groups: &mut [Vec<usize>],
    remaining: &mut Vec<usize>,
    min_group_size: usize,
    cap_dps: bool,
) {
    for group in groups.iter_mut() {
        while group.len() < min_group_size && !remaining.is_empty() {
            let dps = group.iter().filter(|&&m| people[m].role().is_dp()).count();
            let pick = remaining
                .iter()
                .position(|&i| !(cap_dps && people[i].role().is_dp() && dps >= DP_CAP))
                .unwrap_or(0);
            group.push(remaining.remove(pick));
        }
    }
}
