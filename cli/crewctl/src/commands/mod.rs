//! CLI commands.

mod config;
mod generate;
mod roles;
mod roster;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use crewgroup_roster::Roster;

use crate::config::Config;
use crate::error::CliError;
use crate::output::OutputFormat;

/// crew - Build crew rosters and split them into balanced groups.
#[derive(Debug, Parser)]
#[command(name = "crew")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table, json, or text).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Roster file (two-column CSV: name,role).
    #[arg(long, global = true, env = "CREW_ROSTER", value_name = "PATH")]
    roster: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show and edit the roster.
    Roster(roster::RosterCommand),

    /// List or search the known roles.
    Roles(roles::RolesCommand),

    /// Split the roster into groups.
    Generate(generate::GenerateCommand),

    /// Show or change saved defaults.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Whether logs should be emitted as JSON.
    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let format = OutputFormat::from_flag(&self.format);
        let config = Config::load()?;

        let ctx = CommandContext {
            config,
            format,
            roster: self.roster,
        };

        match self.command {
            Commands::Roster(cmd) => cmd.run(ctx),
            Commands::Roles(cmd) => cmd.run(ctx),
            Commands::Generate(cmd) => cmd.run(ctx),
            Commands::Config(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("crew {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub roster: Option<PathBuf>,
}

impl CommandContext {
    /// Resolve the roster file, preferring the flag over saved config.
    pub fn resolve_roster_path(&self) -> Option<&Path> {
        self.roster
            .as_deref()
            .or(self.config.roster_path.as_deref())
    }

    /// Require a roster file to be specified.
    pub fn require_roster_path(&self) -> Result<&Path, CliError> {
        self.resolve_roster_path().ok_or(CliError::NoRosterPath)
    }

    /// Load the roster, failing if the file does not exist.
    pub fn load_roster(&self) -> Result<Roster, CliError> {
        let path = self.require_roster_path()?;
        if !path.exists() {
            return Err(CliError::RosterNotFound(path.to_path_buf()));
        }
        let roster = Roster::read_from_file(path)?;
        debug!(path = %path.display(), people = roster.len(), "loaded roster");
        Ok(roster)
    }

    /// Load the roster, starting empty if the file does not exist yet.
    pub fn load_roster_or_default(&self) -> Result<Roster, CliError> {
        match self.load_roster() {
            Err(CliError::RosterNotFound(_)) => Ok(Roster::new()),
            other => other,
        }
    }

    /// Write the roster back to its file.
    pub fn save_roster(&self, roster: &Roster) -> Result<(), CliError> {
        let path = self.require_roster_path()?;
        roster.write_to_file(path)?;
        debug!(path = %path.display(), people = roster.len(), "saved roster");
        Ok(())
    }
}
