//! # Grid Clicks
//!
//! Turns a click on a grid cell into an [`Edit`].
//!
//! This is the one entry point that takes **visual coordinates** (0-based
//! row/column in render order). The cell is mapped to domain coordinates once,
//! here, and the resulting edit carries domain numbers only.
//!
//! - threading / treadling: clicking the filled cell clears it, clicking any
//!   other cell in the column/row moves the assignment there
//! - tieup: clicking flips membership
//! - drawdown: derived, not clickable

use crate::mutations::Edit;
use warpdrive_draft::{Dimensions, DomainCell, Draft, GridKind, VisualCell};

/// Edit for a click at a visual cell; `None` outside the grid or on the drawdown
pub fn edit_for_click(
    draft: &Draft,
    dims: &Dimensions,
    grid: GridKind,
    cell: VisualCell,
) -> Option<Edit> {
    match grid.to_domain(cell, dims)? {
        DomainCell::Threading { thread, shaft } => {
            let filled = draft.threading().shaft(thread) == Some(shaft);
            Some(Edit::SetThreading {
                thread,
                shaft: (!filled).then_some(shaft),
            })
        }
        DomainCell::Tieup { treadle, shaft } => Some(Edit::SetTieup {
            treadle,
            shaft,
            selected: !draft.tieup().engages(treadle, shaft),
        }),
        DomainCell::Treadling { pick, treadle } => {
            let filled = draft.treadling().treadle(pick) == Some(treadle);
            Some(Edit::SetTreadling {
                pick,
                treadle: (!filled).then_some(treadle),
            })
        }
        DomainCell::Drawdown { .. } => None,
    }
}
