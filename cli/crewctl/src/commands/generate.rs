//! Generate command (split the roster into groups).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crewgroup_allocator::{
    allocate_seeded, allocate_with_entropy, Allocation, AllocationError, Constraints,
};

use crate::config::Config;
use crate::output::{print_notice, print_output, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Generate command - split the roster into groups.
///
/// Flags left unset fall back to the saved config (`crew config show`).
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Number of groups to form (fewer are formed if the roster is too small).
    #[arg(long, short = 'g', env = "CREW_GROUPS", value_name = "N")]
    groups: Option<String>,

    /// Minimum members per group (at least 2).
    #[arg(long, short = 'm', env = "CREW_MIN_SIZE", value_name = "N")]
    min_size: Option<String>,

    /// Require one WRITER per group.
    #[arg(long, overrides_with = "no_writer")]
    writer: bool,

    /// Do not require a WRITER per group.
    #[arg(long, overrides_with = "writer")]
    no_writer: bool,

    /// Require one DP per group (at most two per group while filling).
    #[arg(long, overrides_with = "no_dp")]
    dp: bool,

    /// Do not require a DP per group.
    #[arg(long, overrides_with = "dp")]
    no_dp: bool,

    /// Seed for a reproducible grouping.
    #[arg(long, env = "CREW_SEED")]
    seed: Option<u64>,

    /// Also write the groups to this file as text.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

#[derive(Debug, Serialize, Tabled)]
struct MemberRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl GenerateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        // A roster file that does not exist yet holds nobody.
        let roster = ctx.load_roster_or_default()?;

        // An empty roster is reported before the parameters are looked at.
        if roster.is_empty() {
            return Err(AllocationError::EmptyRoster.into());
        }

        let constraints = self.constraints(&ctx.config)?;
        info!(
            people = roster.len(),
            groups = constraints.group_count,
            min_group_size = constraints.min_group_size,
            require_writer = constraints.require_writer,
            require_dp = constraints.require_dp,
            "generating groups"
        );

        let allocation = match self.seed {
            Some(seed) => allocate_seeded(&roster, &constraints, seed)?,
            None => allocate_with_entropy(&roster, &constraints)?,
        };

        for notice in allocation.notices() {
            print_notice(&notice.to_string());
        }

        if let Some(path) = &self.export {
            std::fs::write(path, allocation.to_text())
                .with_context(|| format!("Failed to export groups to {}", path.display()))?;
        }

        print_allocation(&allocation, ctx.format);

        if let Some(path) = &self.export {
            if ctx.format != OutputFormat::Json {
                print_success(&format!(
                    "Exported {} groups to {}",
                    allocation.group_count(),
                    path.display()
                ));
            }
        }

        Ok(())
    }

    /// Resolve constraints from flags, falling back to saved config.
    fn constraints(&self, config: &Config) -> Result<Constraints, AllocationError> {
        let groups = self
            .groups
            .clone()
            .unwrap_or_else(|| config.group_count.to_string());
        let min_size = self
            .min_size
            .clone()
            .unwrap_or_else(|| config.min_group_size.to_string());

        Ok(Constraints::parse(&groups, &min_size)?
            .with_require_writer(choose(self.writer, self.no_writer, config.require_writer))
            .with_require_dp(choose(self.dp, self.no_dp, config.require_dp)))
    }
}

/// Resolve an `--x` / `--no-x` pair against a default.
fn choose(on: bool, off: bool, default: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

fn print_allocation(allocation: &Allocation, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_single(allocation),
        OutputFormat::Text => print!("{}", allocation.to_text()),
        OutputFormat::Table => {
            for group in allocation.groups() {
                println!(
                    "{} {}",
                    format!("Group {}", group.label()).bold(),
                    format!("({} members)", group.len()).dimmed()
                );
                let rows: Vec<MemberRow> = group
                    .members()
                    .iter()
                    .enumerate()
                    .map(|(i, person)| MemberRow {
                        position: i + 1,
                        name: person.name().to_string(),
                        role: person.role().to_string(),
                    })
                    .collect();
                print_output(&rows, format);
                println!();
            }
        }
    }
}
