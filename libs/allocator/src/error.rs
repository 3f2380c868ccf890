//! Error types for group allocation.

use thiserror::Error;

/// Errors that abort an allocation.
///
/// None of these produce a partial result. Lowering the group count is not an
/// error; see [`crate::Notice`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The roster has no people.
    #[error("no persons added")]
    EmptyRoster,

    /// The group parameters are not usable integers.
    #[error("invalid group parameters: {0}")]
    InvalidParameters(String),

    /// The minimum group size is below 2.
    #[error("minimum group size must be at least 2, got {0}")]
    InvalidMinSize(i64),

    /// The roster cannot fill a single group of the minimum size.
    #[error("not enough people to form even one group of size {min_group_size} ({people} in roster)")]
    InsufficientPeople { people: usize, min_group_size: usize },

    /// One WRITER per group is required but the roster has none.
    #[error("no WRITERs available to form a group")]
    NoWriterCandidate,

    /// One DP per group is required but the roster has none.
    #[error("no DPs available to form a group")]
    NoDpCandidate,
}

impl AllocationError {
    /// Returns true if the caller should fix the group parameters.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            AllocationError::InvalidParameters(_) | AllocationError::InvalidMinSize(_)
        )
    }

    /// Returns true if a required role is missing from the roster.
    pub fn is_role_shortage(&self) -> bool {
        matches!(
            self,
            AllocationError::NoWriterCandidate | AllocationError::NoDpCandidate
        )
    }
}
