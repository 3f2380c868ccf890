//! Config commands (saved defaults for roster and group parameters).

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{config_path, Config};
use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Manage saved CLI defaults.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the saved defaults.
    Show,

    /// Change one default.
    Set {
        /// One of: roster_path, group_count, min_group_size, require_writer, require_dp.
        key: String,

        /// New value (an empty roster_path clears it).
        value: String,
    },

    /// Restore every default.
    Reset,

    /// Print the config file location.
    Path,
}

impl ConfigCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::Set { key, value } => set(ctx, &key, &value),
            ConfigSubcommand::Reset => reset(ctx),
            ConfigSubcommand::Path => path(ctx),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_single(&ctx.config),
        _ => print_config(&ctx.config),
    }
    Ok(())
}

fn set(mut ctx: CommandContext, key: &str, value: &str) -> Result<()> {
    ctx.config.set(key, value)?;
    ctx.config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&ctx.config),
        _ => print_success(&format!("Set {}", key)),
    }
    Ok(())
}

fn reset(ctx: CommandContext) -> Result<()> {
    let config = Config::default();
    config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&config),
        _ => print_success("Restored default settings"),
    }
    Ok(())
}

fn path(ctx: CommandContext) -> Result<()> {
    let path = config_path()?;
    match ctx.format {
        OutputFormat::Json => {
            print_single(&serde_json::json!({ "path": path.display().to_string() }))
        }
        _ => println!("{}", path.display()),
    }
    Ok(())
}

fn print_config(config: &Config) {
    println!(
        "roster_path: {}",
        config
            .roster_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("group_count: {}", config.group_count);
    println!("min_group_size: {}", config.min_group_size);
    println!("require_writer: {}", config.require_writer);
    println!("require_dp: {}", config.require_dp);
}
