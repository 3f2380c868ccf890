//! crew - CLI for building crew rosters and splitting them into groups.
//!
//! The roster lives in a two-column CSV file (`name,role`). `crew generate`
//! splits it into groups with at least one WRITER and one DP each when
//! those roles are required.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json());

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
