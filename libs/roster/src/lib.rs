//! # crewgroup-roster
//!
//! Crew roles, people, and the roster file format.
//!
//! ## Design Principles
//!
//! - The role set is closed; anything but an exact label is normalized to `CREW`
//! - A person holds exactly one role, so role subsets never overlap
//! - Names are trimmed and never empty
//! - The file format is plain two-column CSV with no header
//!
//! ## Example
//!
//! ```
//! use crewgroup_roster::{Role, Roster};
//!
//! let roster = Roster::parse("Ada,WRITER\nGrace,DP\nAlan,boom op\nBo,writer\n").unwrap();
//! assert_eq!(roster.count(Role::Writer), 1);
//! assert_eq!(roster.people()[3].role(), Role::Crew);
//! assert_eq!(roster.people()[2].role(), Role::Crew);
//! ```

mod error;
mod macros;
mod person;
mod role;
mod roster;

pub use error::RosterError;
pub use person::Person;
pub use role::Role;
pub use roster::Roster;
