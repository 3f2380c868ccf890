//! Error handling and display for the CLI.

use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

use crewgroup_allocator::AllocationError;
use crewgroup_roster::RosterError;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("No roster file specified.")]
    NoRosterPath,

    #[error("Roster file not found: {}", .0.display())]
    RosterNotFound(PathBuf),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("Aborted.")]
    Aborted,

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a config validation error.
    pub fn invalid_config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", format!("Hint: {}", hint).yellow());
    }
}

/// Pick a hint for errors the user can act on.
fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    let allocation = match err.downcast_ref::<CliError>() {
        Some(CliError::NoRosterPath) => {
            return Some("Use --roster <PATH> or run `crew config set roster_path <PATH>`.")
        }
        Some(CliError::RosterNotFound(_)) => {
            return Some("Add people with `crew roster add <NAME>` or `crew roster load <FILE>`.")
        }
        Some(CliError::Allocation(e)) => Some(e),
        Some(_) => None,
        None => err.downcast_ref::<AllocationError>(),
    }?;

    match allocation {
        AllocationError::EmptyRoster => Some("Add people with `crew roster add <NAME>`."),
        AllocationError::InvalidParameters(_) | AllocationError::InvalidMinSize(_) => {
            Some("--groups must be a whole number of at least 1 and --min-size at least 2.")
        }
        AllocationError::InsufficientPeople { .. } => {
            Some("Lower --min-size or add more people to the roster.")
        }
        AllocationError::NoWriterCandidate => {
            Some("Add a WRITER to the roster or pass --no-writer.")
        }
        AllocationError::NoDpCandidate => Some("Add a DP to the roster or pass --no-dp."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_for_direct_allocation_error() {
        let err = anyhow::Error::from(AllocationError::NoDpCandidate);
        assert_eq!(
            hint_for(&err),
            Some("Add a DP to the roster or pass --no-dp.")
        );
    }

    #[test]
    fn hint_for_wrapped_allocation_error() {
        let err = anyhow::Error::from(CliError::from(AllocationError::EmptyRoster));
        assert_eq!(hint_for(&err), Some("Add people with `crew roster add <NAME>`."));
    }

    #[test]
    fn hint_for_cli_errors() {
        assert!(hint_for(&anyhow::Error::from(CliError::NoRosterPath)).is_some());
        assert!(hint_for(&anyhow::Error::from(CliError::Aborted)).is_none());
        assert!(hint_for(&anyhow::anyhow!("something else")).is_none());
    }

    #[test]
    fn allocation_errors_display_transparently() {
        let err = CliError::from(AllocationError::NoWriterCandidate);
        assert_eq!(err.to_string(), "no WRITERs available to form a group");
    }
}
