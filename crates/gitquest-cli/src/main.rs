//! GitQuest - git challenge scenario builder
//!
//! Usage:
//!   gitquest                      # Build all twelve challenges
//!   gitquest --challenges 1,5,12  # Build a subset
//!   gitquest --cleanup            # Remove every challenge
//!   gitquest --list               # Show the catalogue

mod interactive;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitquest_core::prelude::*;

use crate::interactive::TerminalPrompt;

#[derive(Parser)]
#[command(name = "gitquest")]
#[command(about = "Build git challenge scenarios in an existing repository", long_about = None)]
struct Cli {
    /// Challenges to build: `all` or comma-separated ids from 1 to 12
    #[arg(short, long, default_value = "all", value_name = "LIST")]
    challenges: String,

    /// Remove every challenge branch, tag, stash and file, then exit
    #[arg(long, conflicts_with_all = ["challenges", "list"])]
    cleanup: bool,

    /// Replace existing challenge branches without asking
    #[arg(short = 'y', long)]
    yes: bool,

    /// Repository root (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR")]
    repo: Option<PathBuf>,

    /// Configuration file (defaults to .gitquest.toml, then the global config)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,

    /// Print the challenge catalogue and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// No output on success
    Quiet,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list {
        return print_catalogue(cli.format);
    }

    // Reject a bad selection before anything touches the repository.
    let selection = if cli.cleanup {
        None
    } else {
        Some(ChallengeSelection::parse(&cli.challenges)?)
    };

    let root = match cli.repo {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let store = match cli.config {
        Some(path) => ConfigStore::explicit(path),
        None => ConfigStore::for_repo(&root),
    };
    let config = store.load()?;
    tracing::debug!(root = %root.display(), main = %config.main_branch, "resolved repository");
    let builder = ScenarioBuilder::new(root, config);

    match selection {
        None => {
            let report = builder.cleanup()?;
            print_cleanup(&report, cli.format)
        }
        Some(selection) => {
            let report = if cli.yes {
                builder.build(&selection, &mut AssumeYes)?
            } else {
                builder.build(&selection, &mut TerminalPrompt::new())?
            };
            print_build(&report, cli.format)
        }
    }
}

fn print_catalogue(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!(
                "  {:<3} {:<24} {:<44} Branches",
                "ID", "Challenge", "Skill"
            );
            println!("  {}", "-".repeat(100));
            for challenge in Challenge::ALL {
                println!(
                    "  {:<3} {:<24} {:<44} {}",
                    challenge.id(),
                    challenge.title(),
                    challenge.skill(),
                    challenge.branches().join(", ")
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = Challenge::ALL
                .into_iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id(),
                        "title": c.title(),
                        "skill": c.skill(),
                        "branches": c.branches(),
                        "tags": c.tags(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn print_build(report: &BuildReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("Challenges built ({}):", report.challenges.len());
            for outcome in &report.challenges {
                println!(
                    "  {} {:<24} {}",
                    style(format!("{:02}", outcome.id)).green(),
                    outcome.title,
                    outcome.branches.join(", ")
                );
            }
            if !report.replaced_branches.is_empty() {
                println!();
                println!("Replaced branches:");
                for branch in &report.replaced_branches {
                    println!("  {}", style(branch).yellow());
                }
            }
            println!();
            println!("Branches:");
            for branch in &report.branches {
                println!("  {branch}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn print_cleanup(report: &CleanupReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if report.is_empty() {
                println!("Nothing to clean up.");
                return Ok(());
            }
            print_list("Deleted branches", &report.deleted_branches);
            print_list("Deleted tags", &report.deleted_tags);
            if report.dropped_stashes > 0 {
                println!("Dropped stash entries: {}", report.dropped_stashes);
            }
            print_list("Removed files", &report.removed_files);
            if let Some(commit) = &report.commit {
                println!("Committed removal as {}", &commit[..commit.len().min(12)]);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{} ({}):", heading, items.len());
    for item in items {
        println!("  {item}");
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_all_challenges() {
        let cli = Cli::try_parse_from(["gitquest"]).unwrap();
        assert_eq!(cli.challenges, "all");
        assert!(!cli.cleanup);
        assert!(!cli.yes);
        assert!(cli.repo.is_none());
    }

    #[test]
    fn parses_subset_and_repo() {
        let cli = Cli::try_parse_from(["gitquest", "-c", "1,5", "-C", "/tmp/repo", "-y"]).unwrap();
        assert_eq!(cli.challenges, "1,5");
        assert_eq!(cli.repo.unwrap().to_str(), Some("/tmp/repo"));
        assert!(cli.yes);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["gitquest", "--frobnicate"]).is_err());
    }

    #[test]
    fn cleanup_conflicts_with_selection() {
        assert!(Cli::try_parse_from(["gitquest", "--cleanup", "-c", "3"]).is_err());
        assert!(Cli::try_parse_from(["gitquest", "--cleanup"]).unwrap().cleanup);
    }
}
