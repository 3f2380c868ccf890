//! Roster commands.
//!
//! These commands edit the roster file in place. `import` appends another
//! file's people; `load` replaces the roster with them.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crewgroup_roster::{Person, Role, Roster};

use crate::error::CliError;
use crate::output::{print_info, print_output, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Roster commands.
#[derive(Debug, Args)]
pub struct RosterCommand {
    #[command(subcommand)]
    command: RosterSubcommand,
}

#[derive(Debug, Subcommand)]
enum RosterSubcommand {
    /// List everyone on the roster.
    Show(ShowArgs),

    /// Add a person.
    Add(AddArgs),

    /// Remove a person by position (see `crew roster show`).
    Remove(RemoveArgs),

    /// Remove everyone.
    Clear(ConfirmArgs),

    /// Append people from another CSV file.
    Import(FileArgs),

    /// Replace the roster with another CSV file.
    Load(FileArgs),

    /// Write the roster to another CSV file.
    Save(FileArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Show head count per role instead of the full list.
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Person's name.
    name: String,

    /// Role (unrecognised roles become CREW; see `crew roles`).
    #[arg(long, short = 'r', default_value = "CREW")]
    role: String,
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// 1-based position.
    position: usize,

    #[command(flatten)]
    confirm: ConfirmArgs,
}

#[derive(Debug, Args)]
struct ConfirmArgs {
    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    yes: bool,
}

#[derive(Debug, Args)]
struct FileArgs {
    /// CSV file path.
    file: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct PersonRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
}

#[derive(Debug, Serialize, Tabled)]
struct RoleCountRow {
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Count")]
    count: usize,
}

impl RosterCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            RosterSubcommand::Show(args) => show(ctx, args),
            RosterSubcommand::Add(args) => add(ctx, args),
            RosterSubcommand::Remove(args) => remove(ctx, args),
            RosterSubcommand::Clear(args) => clear(ctx, args),
            RosterSubcommand::Import(args) => import(ctx, args),
            RosterSubcommand::Load(args) => load(ctx, args),
            RosterSubcommand::Save(args) => save(ctx, args),
        }
    }
}

fn show(ctx: CommandContext, args: ShowArgs) -> Result<()> {
    let roster = ctx.load_roster()?;

    if args.summary {
        let rows: Vec<RoleCountRow> = roster
            .role_counts()
            .into_iter()
            .map(|(role, count)| RoleCountRow {
                role: role.to_string(),
                count,
            })
            .collect();
        print_output(&rows, ctx.format);
        if ctx.format != OutputFormat::Json {
            print_info(&format!("{} people", roster.len()));
        }
        return Ok(());
    }

    print_output(&person_rows(&roster), ctx.format);
    Ok(())
}

fn add(ctx: CommandContext, args: AddArgs) -> Result<()> {
    let mut roster = ctx.load_roster_or_default()?;

    let role = match typed_role(&args.role) {
        Some(role) => role,
        None => {
            let role = Role::default();
            if !args.role.trim().is_empty() {
                print_info(&format!("Unknown role '{}', using {}", args.role.trim(), role));
            }
            role
        }
    };

    let person = Person::new(&args.name, role).map_err(CliError::from)?;
    roster.push(person.clone());
    ctx.save_roster(&roster)?;

    match ctx.format {
        OutputFormat::Json => print_single(&person),
        _ => print_success(&format!("Added {} (#{})", person, roster.len())),
    }
    Ok(())
}

fn remove(ctx: CommandContext, args: RemoveArgs) -> Result<()> {
    let mut roster = ctx.load_roster()?;
    let removed = roster.remove(args.position).map_err(CliError::from)?;

    if !args.confirm.yes && !confirm(&format!("Remove {}?", removed))? {
        return Err(CliError::Aborted.into());
    }

    ctx.save_roster(&roster)?;

    match ctx.format {
        OutputFormat::Json => print_single(&removed),
        _ => print_success(&format!("Removed {}", removed)),
    }
    Ok(())
}

fn clear(ctx: CommandContext, args: ConfirmArgs) -> Result<()> {
    let mut roster = ctx.load_roster_or_default()?;
    let count = roster.len();

    if !args.yes && !confirm(&format!("Remove all {} people?", count))? {
        return Err(CliError::Aborted.into());
    }

    roster.clear();
    ctx.save_roster(&roster)?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ "removed": count })),
        _ => print_success(&format!("Removed {} people", count)),
    }
    Ok(())
}

fn import(ctx: CommandContext, args: FileArgs) -> Result<()> {
    let incoming = read_csv(&args.file)?;
    let added = incoming.len();

    let mut roster = ctx.load_roster_or_default()?;
    roster.extend(incoming);
    ctx.save_roster(&roster)?;

    report_count(&ctx, "imported", added, roster.len());
    Ok(())
}

fn load(ctx: CommandContext, args: FileArgs) -> Result<()> {
    let roster = read_csv(&args.file)?;
    ctx.save_roster(&roster)?;

    report_count(&ctx, "loaded", roster.len(), roster.len());
    Ok(())
}

fn save(ctx: CommandContext, args: FileArgs) -> Result<()> {
    let roster = ctx.load_roster()?;
    roster
        .write_to_file(&args.file)
        .with_context(|| format!("Failed to save roster to {}", args.file.display()))?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "saved": roster.len(),
            "path": args.file.display().to_string(),
        })),
        _ => print_success(&format!(
            "Saved {} people to {}",
            roster.len(),
            args.file.display()
        )),
    }
    Ok(())
}

/// Resolve a role typed on the command line.
///
/// Unlike roster files, lower-case input is accepted here (`--role dp`).
fn typed_role(input: &str) -> Option<Role> {
    Role::parse(input)
        .or_else(|_| Role::parse(&input.to_uppercase()))
        .ok()
}

fn read_csv(path: &Path) -> Result<Roster> {
    Roster::read_from_file(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn report_count(ctx: &CommandContext, verb: &str, count: usize, total: usize) {
    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({ verb: count, "total": total })),
        _ => print_success(&format!(
            "{} {} people ({} on roster)",
            capitalize(verb),
            count,
            total
        )),
    }
}

fn person_rows(roster: &Roster) -> Vec<PersonRow> {
    roster
        .iter()
        .enumerate()
        .map(|(i, person)| PersonRow {
            position: i + 1,
            name: person.name().to_string(),
            role: person.role().to_string(),
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read from stdin")?;

    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_one_based() {
        let roster: Roster = vec![
            Person::new("Ada", Role::Writer).unwrap(),
            Person::new("Bo", Role::Dp).unwrap(),
        ]
        .into();

        let rows = person_rows(&roster);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].position, 1);
        assert_eq!(rows[1].name, "Bo");
        assert_eq!(rows[1].role, "DP");
    }

    #[test]
    fn typed_roles_fold_case() {
        assert_eq!(typed_role("dp"), Some(Role::Dp));
        assert_eq!(typed_role(" key grip "), Some(Role::KeyGrip));
        assert_eq!(typed_role("WRITER"), Some(Role::Writer));
        assert_eq!(typed_role("caterer"), None);
        assert_eq!(typed_role(""), None);
    }

    #[test]
    fn files_keep_exact_roles() {
        let roster = Roster::parse("Ada,writer\n").unwrap();
        assert_eq!(roster.people()[0].role(), Role::Crew);
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }

    #[test]
    fn capitalize_words() {
        assert_eq!(capitalize("imported"), "Imported");
        assert_eq!(capitalize(""), "");
    }
}
