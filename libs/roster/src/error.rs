//! Error types for roster handling.

use std::io;

use thiserror::Error;

/// Errors that can occur when building, editing, or reading a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A person's name is empty after trimming.
    #[error("name cannot be empty")]
    EmptyName,

    /// The role label is not one of the known roles.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// A 1-based roster position does not exist.
    #[error("no person at position {index} (roster has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The tabular file is malformed.
    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl RosterError {
    /// Returns true if this error came from reading or writing a file.
    pub fn is_io(&self) -> bool {
        matches!(self, RosterError::Io(_))
    }
}
