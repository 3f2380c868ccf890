//! Roles command (list or search the known roles).

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crewgroup_roster::Role;

use crate::output::{print_output, print_single, OutputFormat};

use super::CommandContext;

/// List the known roles, optionally filtered by a case-insensitive substring.
#[derive(Debug, Args)]
pub struct RolesCommand {
    /// Text to look for in role names.
    query: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    #[tabled(rename = "Role")]
    role: String,
}

impl RolesCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let matches = Role::search(self.query.as_deref().unwrap_or(""));

        match ctx.format {
            OutputFormat::Json => {
                let labels: Vec<&str> = matches.iter().map(Role::as_str).collect();
                print_single(&labels);
            }
            _ if matches.is_empty() => println!("{}", "No match found".dimmed()),
            OutputFormat::Text => {
                for role in &matches {
                    println!("{}", role);
                }
            }
            OutputFormat::Table => {
                let rows: Vec<RoleRow> = matches
                    .iter()
                    .map(|role| RoleRow {
                        role: role.to_string(),
                    })
                    .collect();
                print_output(&rows, ctx.format);
            }
        }

        Ok(())
    }
}
