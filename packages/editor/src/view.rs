//! Read side of the grids: which cells a painter fills.

use warpdrive_draft::{Dimensions, DomainCell, Draft, GridKind, VisualCell};
use warpdrive_drawdown::Drawdown;

/// Whether a domain cell is filled
pub fn cell_filled(draft: &Draft, drawdown: &Drawdown, cell: DomainCell) -> bool {
    match cell {
        DomainCell::Threading { thread, shaft } => draft.threading().shaft(thread) == Some(shaft),
        DomainCell::Tieup { treadle, shaft } => draft.tieup().engages(treadle, shaft),
        DomainCell::Treadling { pick, treadle } => draft.treadling().treadle(pick) == Some(treadle),
        DomainCell::Drawdown { pick, thread } => drawdown.is_up(pick, thread),
    }
}

/// Fill state of every cell of a grid, in render order (rows, then columns)
pub fn grid_cells(
    grid: GridKind,
    draft: &Draft,
    drawdown: &Drawdown,
    dims: &Dimensions,
) -> Vec<Vec<bool>> {
    let (rows, cols) = grid.extent(dims);
    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    grid.to_domain(VisualCell::new(row, col), dims)
                        .map_or(false, |cell| cell_filled(draft, drawdown, cell))
                })
                .collect()
        })
        .collect()
}
