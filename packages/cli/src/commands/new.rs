use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use warpdrive_draft::{create_default, serialize};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs) -> Result<()> {
    let text = serialize(&create_default())?;

    let Some(path) = args.output else {
        println!("{}", text);
        return Ok(());
    };

    if path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), path.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    fs::write(&path, text).with_context(|| format!("Cannot write {}", path.display()))?;
    println!("  {} Created {}", "✓".green(), path.display());
    Ok(())
}
