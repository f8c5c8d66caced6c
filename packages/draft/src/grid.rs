//! # Grid Coordinates
//!
//! Maps between domain coordinates (1-based section numbers) and visual
//! coordinates (0-based row/column in render order) for every grid of the
//! draft view.
//!
//! ```text
//!   ┌──────────────────────┬──────────┐
//!   │ threading            │ tieup    │   rows: shafts, high → low
//!   │ cols: threads N → 1  │ 1 → T    │
//!   ├──────────────────────┼──────────┤
//!   │ drawdown             │ treadling│   rows: picks, 1 → P
//!   │ cols: threads N → 1  │ 1 → T    │
//!   └──────────────────────┴──────────┘
//! ```
//!
//! Each grid is described by two [`Axis`] values; all conversions go through
//! the same axis arithmetic. The shaft axis is reversed on both the threading
//! and the tieup grid (top row = highest shaft), on both the read and the
//! click path.

use crate::dimensions::{Dimension, Dimensions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CELL_SIZE: u32 = 15;
pub const MIN_CELL_SIZE: u32 = 10;
pub const MAX_CELL_SIZE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridKind {
    Threading,
    Tieup,
    Treadling,
    Drawdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Index 0 holds number 1
    Ascending,
    /// Index 0 holds the highest number
    Descending,
}

/// One axis of a grid: which dimension it counts and in which order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    pub dimension: Dimension,
    direction: Direction,
}

impl Axis {
    const fn ascending(dimension: Dimension) -> Self {
        Self {
            dimension,
            direction: Direction::Ascending,
        }
    }

    const fn descending(dimension: Dimension) -> Self {
        Self {
            dimension,
            direction: Direction::Descending,
        }
    }

    /// True when index 0 holds the highest number
    pub fn is_reversed(&self) -> bool {
        self.direction == Direction::Descending
    }

    pub fn len(&self, dims: &Dimensions) -> u32 {
        dims.count(self.dimension)
    }

    /// Visual index → domain number
    pub fn to_domain(&self, index: u32, dims: &Dimensions) -> Option<u32> {
        let total = self.len(dims);
        if index >= total {
            return None;
        }
        Some(match self.direction {
            Direction::Ascending => index + 1,
            Direction::Descending => total - index,
        })
    }

    /// Domain number → visual index
    pub fn to_visual(&self, value: u32, dims: &Dimensions) -> Option<u32> {
        if !dims.contains(self.dimension, value) {
            return None;
        }
        Some(match self.direction {
            Direction::Ascending => value - 1,
            Direction::Descending => self.len(dims) - value,
        })
    }
}

impl GridKind {
    pub const ALL: [GridKind; 4] = [
        GridKind::Threading,
        GridKind::Tieup,
        GridKind::Treadling,
        GridKind::Drawdown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GridKind::Threading => "threading",
            GridKind::Tieup => "tieup",
            GridKind::Treadling => "treadling",
            GridKind::Drawdown => "drawdown",
        }
    }

    /// The drawdown is derived and cannot be clicked
    pub fn is_editable(self) -> bool {
        !matches!(self, GridKind::Drawdown)
    }

    pub fn rows(self) -> Axis {
        match self {
            GridKind::Threading | GridKind::Tieup => Axis::descending(Dimension::Shaft),
            GridKind::Treadling | GridKind::Drawdown => Axis::ascending(Dimension::Pick),
        }
    }

    pub fn cols(self) -> Axis {
        match self {
            GridKind::Threading | GridKind::Drawdown => Axis::descending(Dimension::Thread),
            GridKind::Tieup | GridKind::Treadling => Axis::ascending(Dimension::Treadle),
        }
    }

    /// (rows, cols)
    pub fn extent(self, dims: &Dimensions) -> (u32, u32) {
        (self.rows().len(dims), self.cols().len(dims))
    }

    /// Canvas size in pixels as (width, height)
    pub fn pixel_size(self, dims: &Dimensions, settings: &GridSettings) -> (u32, u32) {
        let (rows, cols) = self.extent(dims);
        let size = settings.cell_size();
        (cols.saturating_mul(size), rows.saturating_mul(size))
    }

    /// Visual cell → domain cell; `None` outside the grid
    pub fn to_domain(self, cell: VisualCell, dims: &Dimensions) -> Option<DomainCell> {
        let row = self.rows().to_domain(cell.row, dims)?;
        let col = self.cols().to_domain(cell.col, dims)?;
        Some(DomainCell::from_axes(self, row, col))
    }

    /// Pointer position in pixels → domain cell; `None` outside the grid
    pub fn locate(
        self,
        x: f64,
        y: f64,
        dims: &Dimensions,
        settings: &GridSettings,
    ) -> Option<DomainCell> {
        settings
            .locate(x, y)
            .and_then(|cell| self.to_domain(cell, dims))
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GridKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Unknown grid: {}. Use: threading, tieup, treadling, or drawdown",
                    s
                )
            })
    }
}

/// 0-based cell position in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualCell {
    pub row: u32,
    pub col: u32,
}

impl VisualCell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// 1-based cell position in draft terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "grid", rename_all = "camelCase")]
pub enum DomainCell {
    Threading { thread: u32, shaft: u32 },
    Tieup { treadle: u32, shaft: u32 },
    Treadling { pick: u32, treadle: u32 },
    Drawdown { pick: u32, thread: u32 },
}

impl DomainCell {
    pub fn grid(&self) -> GridKind {
        match self {
            DomainCell::Threading { .. } => GridKind::Threading,
            DomainCell::Tieup { .. } => GridKind::Tieup,
            DomainCell::Treadling { .. } => GridKind::Treadling,
            DomainCell::Drawdown { .. } => GridKind::Drawdown,
        }
    }

    fn from_axes(grid: GridKind, row: u32, col: u32) -> Self {
        match grid {
            GridKind::Threading => DomainCell::Threading {
                thread: col,
                shaft: row,
            },
            GridKind::Tieup => DomainCell::Tieup {
                treadle: col,
                shaft: row,
            },
            GridKind::Treadling => DomainCell::Treadling {
                pick: row,
                treadle: col,
            },
            GridKind::Drawdown => DomainCell::Drawdown {
                pick: row,
                thread: col,
            },
        }
    }

    /// (row number, column number)
    fn axes(&self) -> (u32, u32) {
        match *self {
            DomainCell::Threading { thread, shaft } => (shaft, thread),
            DomainCell::Tieup { treadle, shaft } => (shaft, treadle),
            DomainCell::Treadling { pick, treadle } => (pick, treadle),
            DomainCell::Drawdown { pick, thread } => (pick, thread),
        }
    }

    /// Domain cell → visual cell; `None` outside the grid
    pub fn to_visual(&self, dims: &Dimensions) -> Option<VisualCell> {
        let grid = self.grid();
        let (row, col) = self.axes();
        Some(VisualCell {
            row: grid.rows().to_visual(row, dims)?,
            col: grid.cols().to_visual(col, dims)?,
        })
    }
}

/// Display settings shared by every grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    /// Cell edge in pixels; clamped to 10..=30 when used
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
}

fn default_cell_size() -> u32 {
    DEFAULT_CELL_SIZE
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GridSettings {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE),
        }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE)
    }

    /// Pixel offset within a canvas → visual cell (not bounds-checked)
    pub fn locate(&self, x: f64, y: f64) -> Option<VisualCell> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let size = f64::from(self.cell_size());
        let col = (x / size).floor();
        let row = (y / size).floor();
        if col > f64::from(u32::MAX) || row > f64::from(u32::MAX) {
            return None;
        }
        Some(VisualCell::new(row as u32, col as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions::new(4, 6, 10, 8)
    }

    #[test]
    fn test_threading_axes() {
        let dims = dims();
        // top-left is the highest thread on the highest shaft
        assert_eq!(
            GridKind::Threading.to_domain(VisualCell::new(0, 0), &dims),
            Some(DomainCell::Threading { thread: 10, shaft: 4 })
        );
        // bottom-right is thread 1 on shaft 1
        assert_eq!(
            GridKind::Threading.to_domain(VisualCell::new(3, 9), &dims),
            Some(DomainCell::Threading { thread: 1, shaft: 1 })
        );
    }

    #[test]
    fn test_tieup_axes() {
        let dims = dims();
        assert_eq!(
            GridKind::Tieup.to_domain(VisualCell::new(0, 0), &dims),
            Some(DomainCell::Tieup { treadle: 1, shaft: 4 })
        );
        assert_eq!(
            GridKind::Tieup.to_domain(VisualCell::new(3, 5), &dims),
            Some(DomainCell::Tieup { treadle: 6, shaft: 1 })
        );
    }

    #[test]
    fn test_treadling_and_drawdown_axes() {
        let dims = dims();
        assert_eq!(
            GridKind::Treadling.to_domain(VisualCell::new(2, 1), &dims),
            Some(DomainCell::Treadling { pick: 3, treadle: 2 })
        );
        assert_eq!(
            GridKind::Drawdown.to_domain(VisualCell::new(0, 9), &dims),
            Some(DomainCell::Drawdown { pick: 1, thread: 1 })
        );
    }

    #[test]
    fn test_out_of_bounds_is_no_cell() {
        let dims = dims();
        assert_eq!(GridKind::Threading.to_domain(VisualCell::new(4, 0), &dims), None);
        assert_eq!(GridKind::Threading.to_domain(VisualCell::new(0, 10), &dims), None);
        assert_eq!(GridKind::Tieup.to_domain(VisualCell::new(0, 6), &dims), None);
        assert_eq!(GridKind::Treadling.to_domain(VisualCell::new(8, 0), &dims), None);

        assert_eq!(DomainCell::Threading { thread: 0, shaft: 1 }.to_visual(&dims), None);
        assert_eq!(DomainCell::Tieup { treadle: 7, shaft: 1 }.to_visual(&dims), None);
        assert_eq!(DomainCell::Treadling { pick: 9, treadle: 1 }.to_visual(&dims), None);
    }

    #[test]
    fn test_inverse_law_every_cell() {
        let dims = dims();
        for grid in GridKind::ALL {
            let (rows, cols) = grid.extent(&dims);
            for row in 0..rows {
                for col in 0..cols {
                    let visual = VisualCell::new(row, col);
                    let domain = grid.to_domain(visual, &dims).unwrap();
                    assert_eq!(domain.grid(), grid);
                    assert_eq!(domain.to_visual(&dims), Some(visual), "{} {:?}", grid, visual);
                }
            }
        }
    }

    #[test]
    fn test_inverse_law_from_domain() {
        let dims = dims();
        for thread in 1..=dims.warp_threads {
            for shaft in 1..=dims.shafts {
                let cell = DomainCell::Threading { thread, shaft };
                let visual = cell.to_visual(&dims).unwrap();
                assert_eq!(GridKind::Threading.to_domain(visual, &dims), Some(cell));
            }
        }
        for pick in 1..=dims.weft_threads {
            for treadle in 1..=dims.treadles {
                let cell = DomainCell::Treadling { pick, treadle };
                let visual = cell.to_visual(&dims).unwrap();
                assert_eq!(GridKind::Treadling.to_domain(visual, &dims), Some(cell));
            }
        }
    }

    #[test]
    fn test_extent_and_pixel_size() {
        let dims = dims();
        assert_eq!(GridKind::Threading.extent(&dims), (4, 10));
        assert_eq!(GridKind::Tieup.extent(&dims), (4, 6));
        assert_eq!(GridKind::Treadling.extent(&dims), (8, 6));
        assert_eq!(GridKind::Drawdown.extent(&dims), (8, 10));
        assert_eq!(
            GridKind::Threading.pixel_size(&dims, &GridSettings::default()),
            (150, 60)
        );
    }

    #[test]
    fn test_pointer_location() {
        let dims = dims();
        let settings = GridSettings::default();
        assert_eq!(settings.locate(14.9, 15.0), Some(VisualCell::new(1, 0)));
        assert_eq!(settings.locate(-1.0, 3.0), None);
        assert_eq!(settings.locate(f64::NAN, 3.0), None);
        assert_eq!(
            GridKind::Tieup.locate(16.0, 1.0, &dims, &settings),
            Some(DomainCell::Tieup { treadle: 2, shaft: 4 })
        );
        assert_eq!(GridKind::Tieup.locate(500.0, 1.0, &dims, &settings), None);
    }

    #[test]
    fn test_cell_size_clamped() {
        assert_eq!(GridSettings::new(4).cell_size(), MIN_CELL_SIZE);
        assert_eq!(GridSettings::new(99).cell_size(), MAX_CELL_SIZE);
        assert_eq!(GridSettings { cell_size: 0 }.cell_size(), MIN_CELL_SIZE);
    }

    #[test]
    fn test_grid_kind_from_str() {
        assert_eq!("Tieup".parse::<GridKind>(), Ok(GridKind::Tieup));
        assert!("warp".parse::<GridKind>().is_err());
    }
}
