use super::load_draft;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use warpdrive_draft::{Dimension, Dimensions, Draft};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Draft file (WIF JSON)
    pub file: PathBuf,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let draft = load_draft(&args.file)?;
    let dims = Dimensions::resolve(&draft, &config.dimensions);

    println!("  {} {} is a valid draft", "✓".green(), args.file.display());
    println!(
        "    {} threaded, {} treadles tied, {} picks treadled",
        draft.threading().len(),
        draft.tieup().len(),
        draft.treadling().len()
    );

    let ignored = ignored_entries(&draft, &dims);
    if ignored.is_empty() {
        return Ok(());
    }

    println!();
    println!(
        "{} {} entries fall outside the draft and are ignored:",
        "⚠️".yellow(),
        ignored.len()
    );
    for entry in ignored {
        println!("    {}", entry.dimmed());
    }
    Ok(())
}

/// Pattern entries that reference numbers beyond the resolved dimensions
fn ignored_entries(draft: &Draft, dims: &Dimensions) -> Vec<String> {
    let mut entries = Vec::new();

    for (thread, shaft) in draft.threading().iter() {
        if !dims.contains(Dimension::Thread, thread) || !dims.contains(Dimension::Shaft, shaft) {
            entries.push(format!("threading {} -> shaft {}", thread, shaft));
        }
    }
    for (treadle, shafts) in draft.tieup().iter() {
        for shaft in shafts {
            if !dims.contains(Dimension::Treadle, treadle)
                || !dims.contains(Dimension::Shaft, *shaft)
            {
                entries.push(format!("tieup {} -> shaft {}", treadle, shaft));
            }
        }
    }
    for (pick, treadle) in draft.treadling().iter() {
        if !dims.contains(Dimension::Pick, pick) || !dims.contains(Dimension::Treadle, treadle) {
            entries.push(format!("treadling {} -> treadle {}", pick, treadle));
        }
    }

    entries
}
