use super::{load_draft, render::render_grid};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use warpdrive_draft::{serialize, GridKind, VisualCell};
use warpdrive_editor::{Edit, Pipeline};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Draft file (WIF JSON)
    pub file: PathBuf,

    /// Write the result here instead of back to FILE
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Thread a warp end through a shaft (THREAD:SHAFT)
    #[arg(long = "thread", value_name = "THREAD:SHAFT")]
    pub thread: Vec<Pair>,

    /// Unthread a warp end
    #[arg(long = "unthread", value_name = "THREAD")]
    pub unthread: Vec<u32>,

    /// Tie a shaft to a treadle (TREADLE:SHAFT)
    #[arg(long = "tie", value_name = "TREADLE:SHAFT")]
    pub tie: Vec<Pair>,

    /// Untie a shaft from a treadle (TREADLE:SHAFT)
    #[arg(long = "untie", value_name = "TREADLE:SHAFT")]
    pub untie: Vec<Pair>,

    /// Weave a pick with a treadle (PICK:TREADLE)
    #[arg(long = "treadle", value_name = "PICK:TREADLE")]
    pub treadle: Vec<Pair>,

    /// Clear the treadle of a pick
    #[arg(long = "untreadle", value_name = "PICK")]
    pub untreadle: Vec<u32>,

    /// Click a grid cell by 0-based row and column (GRID:ROW:COL)
    #[arg(long = "click", value_name = "GRID:ROW:COL")]
    pub click: Vec<Target>,

    /// Click a grid at a pixel offset (GRID:X:Y)
    #[arg(long = "at", value_name = "GRID:X:Y")]
    pub at: Vec<Target>,

    /// Print the edited grids
    #[arg(long)]
    pub show: bool,
}

/// `A:B` pair of 1-based numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair(pub u32, pub u32);

impl FromStr for Pair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected A:B, found {}", s))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("Not a number: {}", part))
        };
        Ok(Pair(parse(a)?, parse(b)?))
    }
}

/// `GRID:A:B` grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    pub grid: GridKind,
    pub a: u32,
    pub b: u32,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (grid, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected GRID:A:B, found {}", s))?;
        let Pair(a, b) = rest.parse()?;
        Ok(Target {
            grid: grid.trim().parse()?,
            a,
            b,
        })
    }
}

impl EditArgs {
    /// Edits given as numbers, in usage-line order
    fn edits(&self) -> Vec<Edit> {
        let threading = self
            .thread
            .iter()
            .map(|Pair(thread, shaft)| Edit::SetThreading {
                thread: *thread,
                shaft: Some(*shaft),
            })
            .chain(self.unthread.iter().map(|thread| Edit::SetThreading {
                thread: *thread,
                shaft: None,
            }));
        let tieup = self
            .tie
            .iter()
            .map(|pair| (pair, true))
            .chain(self.untie.iter().map(|pair| (pair, false)))
            .map(|(Pair(treadle, shaft), selected)| Edit::SetTieup {
                treadle: *treadle,
                shaft: *shaft,
                selected,
            });
        let treadling = self
            .treadle
            .iter()
            .map(|Pair(pick, treadle)| Edit::SetTreadling {
                pick: *pick,
                treadle: Some(*treadle),
            })
            .chain(self.untreadle.iter().map(|pick| Edit::SetTreadling {
                pick: *pick,
                treadle: None,
            }));

        threading.chain(tieup).chain(treadling).collect()
    }

    fn has_edits(&self) -> bool {
        !(self.thread.is_empty()
            && self.unthread.is_empty()
            && self.tie.is_empty()
            && self.untie.is_empty()
            && self.treadle.is_empty()
            && self.untreadle.is_empty()
            && self.click.is_empty()
            && self.at.is_empty())
    }
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    if !args.has_edits() {
        return Err(anyhow!("Nothing to do. Pass at least one edit flag (see --help)"));
    }

    let config = Config::load(cwd)?;
    let settings = config.grid_settings();
    let draft = load_draft(&args.file)?;
    let mut pipeline = Pipeline::with_config(draft, config.dimensions.clone());

    let mut changed = 0;
    for edit in args.edits() {
        let result = pipeline
            .apply(edit)
            .with_context(|| format!("Cannot apply {:?}", edit))?;
        debug!(?edit, patches = result.patches.len(), "Applied edit");
        changed += usize::from(result.changed);
    }

    for target in &args.click {
        let cell = VisualCell::new(target.a, target.b);
        let result = pipeline.click(target.grid, cell)?;
        changed += usize::from(result.as_ref().map_or(false, |r| r.changed));
        if result.is_none() {
            println!(
                "  {} {}:{}:{} is not a clickable cell",
                "⚠️".yellow(),
                target.grid,
                target.a,
                target.b
            );
        }
    }

    for target in &args.at {
        let cell = settings.locate(f64::from(target.a), f64::from(target.b));
        let result = match cell {
            Some(cell) => pipeline.click(target.grid, cell)?,
            None => None,
        };
        changed += usize::from(result.as_ref().map_or(false, |r| r.changed));
        if result.is_none() {
            println!(
                "  {} {} at ({}, {}) is outside the grid",
                "⚠️".yellow(),
                target.grid,
                target.a,
                target.b
            );
        }
    }

    let output = args.output.clone().unwrap_or_else(|| args.file.clone());
    let text = serialize(pipeline.draft())?;
    fs::write(&output, text).with_context(|| format!("Cannot write {}", output.display()))?;

    println!(
        "  {} {} edits changed the draft → {}",
        "✓".green(),
        changed,
        output.display()
    );

    if args.show {
        for grid in GridKind::ALL {
            println!();
            println!("{}", render_grid(&pipeline, grid, &config.glyphs, &settings));
        }
    }

    Ok(())
}
