mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, edit, new, show, CheckArgs, EditArgs, NewArgs, ShowArgs};

/// WarpDrive - weaving draft viewer and editor
#[derive(Parser, Debug)]
#[command(name = "warpdrive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a draft's grids and drawdown
    Show(ShowArgs),

    /// Validate a draft file
    Check(CheckArgs),

    /// Write a new empty draft
    New(NewArgs),

    /// Apply edits to a draft file
    Edit(EditArgs),
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Show(args) => show(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::New(args) => new(args),
        Command::Edit(args) => edit(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
