use super::{load_draft, render::render_grid};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use warpdrive_draft::GridKind;
use warpdrive_editor::Pipeline;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Draft file (WIF JSON)
    pub file: PathBuf,

    /// Grid to print (all, threading, tieup, treadling, drawdown)
    #[arg(short, long, default_value = "all")]
    pub grid: String,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let grids = selected_grids(&args.grid)?;

    let draft = load_draft(&args.file)?;
    let pipeline = Pipeline::with_config(draft, config.dimensions.clone());
    let dims = pipeline.dimensions();

    println!("{} {}", "Draft".bright_blue().bold(), args.file.display());
    println!(
        "  {} shafts, {} treadles, {} warp threads, {} weft picks",
        dims.shafts, dims.treadles, dims.warp_threads, dims.weft_threads
    );

    let settings = config.grid_settings();
    for grid in grids {
        println!();
        println!("{}", render_grid(&pipeline, grid, &config.glyphs, &settings));
    }

    Ok(())
}

fn selected_grids(name: &str) -> Result<Vec<GridKind>> {
    if name.eq_ignore_ascii_case("all") {
        return Ok(GridKind::ALL.to_vec());
    }
    let grid = name.parse::<GridKind>().map_err(anyhow::Error::msg)?;
    Ok(vec![grid])
}
