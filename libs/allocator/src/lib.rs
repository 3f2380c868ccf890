//! # crewgroup-allocator
//!
//! Partitions a crew roster into groups.
//!
//! ## Invariants
//!
//! - Every person in the roster lands in exactly one group
//! - At most the requested number of groups is formed, and at least one
//! - When the roster allows it, every group reaches the minimum size
//! - A required role is seated once in every group
//! - The allocator keeps no state; each call works on its own borrowed roster
//!
//! When the roster cannot support the request, the group count is lowered and
//! the reduction is reported as a [`Notice`] on the successful [`Allocation`].
//!
//! ## Example
//!
//! ```
//! use crewgroup_allocator::{allocate_seeded, Constraints};
//! use crewgroup_roster::Roster;
//!
//! let roster = Roster::parse("Ada,WRITER\nBo,DP\nCy,GRIP\nDi,WRITER\nEd,DP\nFi,EDITOR\n").unwrap();
//! let allocation = allocate_seeded(&roster, &Constraints::new(2, 3), 7).unwrap();
//!
//! assert_eq!(allocation.group_count(), 2);
//! assert!(allocation.groups().iter().all(|g| g.len() == 3));
//! ```

mod allocate;
mod constraints;
mod error;
mod plan;

pub use allocate::{allocate, allocate_seeded, allocate_with_entropy, Allocation, Group, DP_CAP};
pub use constraints::{Constraints, MIN_GROUP_SIZE};
pub use error::AllocationError;
pub use plan::{plan_group_count, Notice, Plan};
