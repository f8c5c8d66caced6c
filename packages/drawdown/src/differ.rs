use crate::engine::Drawdown;
use serde::{Deserialize, Serialize};

/// One drawdown cell that changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPatch {
    pub pick: u32,
    pub thread: u32,
    pub up: bool,
}

// Diff two drawdowns cell by cell.
// Returns None when the dimensions differ; the caller has to redraw everything.
pub fn diff(old: &Drawdown, new: &Drawdown) -> Option<Vec<CellPatch>> {
    if old.dimensions() != new.dimensions() {
        return None;
    }

    let mut patches = Vec::new();
    for pick in 1..=new.picks() {
        let (Some(before), Some(after)) = (old.row(pick), new.row(pick)) else {
            continue;
        };
        for (offset, (was, is)) in before.iter().zip(after).enumerate() {
            if was != is {
                patches.push(CellPatch {
                    pick,
                    thread: offset as u32 + 1,
                    up: *is,
                });
            }
        }
    }
    Some(patches)
}
