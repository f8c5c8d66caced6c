pub mod check;
pub mod edit;
pub mod new;
pub mod render;
pub mod show;

pub use check::{check, CheckArgs};
pub use edit::{edit, EditArgs};
pub use new::{new, NewArgs};
pub use show::{show, ShowArgs};

use anyhow::{Context, Result};
use std::path::Path;
use warpdrive_draft::{parse, Draft};

/// Read and ingest a draft file
pub fn load_draft(path: &Path) -> Result<Draft> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let draft = parse(&source).with_context(|| format!("{} is not a valid draft", path.display()))?;
    Ok(draft)
}
