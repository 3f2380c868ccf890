//! Group formation constraints.

use serde::Serialize;

use crate::AllocationError;

/// Smallest allowed minimum group size.
pub const MIN_GROUP_SIZE: usize = 2;

/// Constraints for one allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Constraints {
    /// Number of groups asked for. The allocator may form fewer.
    pub group_count: usize,

    /// Minimum members per group.
    pub min_group_size: usize,

    /// Seat exactly one WRITER in every group.
    pub require_writer: bool,

    /// Seat exactly one DP in every group, and cap DPs at two per group.
    pub require_dp: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            group_count: 2,
            min_group_size: MIN_GROUP_SIZE,
            require_writer: true,
            require_dp: true,
        }
    }
}

impl Constraints {
    /// Create constraints with both role requirements enabled.
    pub fn new(group_count: usize, min_group_size: usize) -> Self {
        Self {
            group_count,
            min_group_size,
            ..Self::default()
        }
    }

    /// Set the WRITER requirement.
    pub fn with_require_writer(mut self, require: bool) -> Self {
        self.require_writer = require;
        self
    }

    /// Set the DP requirement.
    pub fn with_require_dp(mut self, require: bool) -> Self {
        self.require_dp = require;
        self
    }

    /// Parse the numeric parameters from text.
    ///
    /// A minimum size that parses but is below 2 reports `InvalidMinSize`
    /// even when the group count is also unusable.
    pub fn parse(group_count: &str, min_group_size: &str) -> Result<Self, AllocationError> {
        let groups = group_count.trim().parse::<i64>();
        let min_size = min_group_size.trim().parse::<i64>();

        if let Ok(min_size) = min_size {
            if min_size < MIN_GROUP_SIZE as i64 {
                return Err(AllocationError::InvalidMinSize(min_size));
            }
        }

        let (Ok(groups), Ok(min_size)) = (groups, min_size) else {
            return Err(AllocationError::InvalidParameters(format!(
                "group count '{}' and minimum group size '{}' must be integers",
                group_count.trim(),
                min_group_size.trim()
            )));
        };

        let groups = usize::try_from(groups)
            .ok()
            .filter(|g| *g >= 1)
            .ok_or_else(|| {
                AllocationError::InvalidParameters(format!(
                    "group count must be at least 1, got {}",
                    groups
                ))
            })?;
        let min_size = usize::try_from(min_size).map_err(|_| {
            AllocationError::InvalidParameters(format!(
                "minimum group size out of range: {}",
                min_size
            ))
        })?;

        Ok(Self::new(groups, min_size))
    }

    /// Check the numeric parameters.
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.min_group_size < MIN_GROUP_SIZE {
            return Err(AllocationError::InvalidMinSize(self.min_group_size as i64));
        }

        if self.group_count == 0 {
            return Err(AllocationError::InvalidParameters(
                "group count must be at least 1, got 0".to_string(),
            ));
        }

        Ok(())
    }
}
