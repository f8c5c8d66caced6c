use crate::config::Glyphs;
use warpdrive_draft::{Dimensions, GridKind, GridSettings};
use warpdrive_editor::Pipeline;

/// One grid as text, one line per row, in render order
pub fn render_cells(cells: &[Vec<bool>], glyphs: &Glyphs) -> String {
    cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|up| if *up { glyphs.up.as_str() } else { glyphs.down.as_str() })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Title line for a grid: name, cell extent and canvas size
pub fn grid_heading(grid: GridKind, dims: &Dimensions, settings: &GridSettings) -> String {
    let (rows, cols) = grid.extent(dims);
    let (width, height) = grid.pixel_size(dims, settings);
    format!("{} ({}×{}, {}×{} px)", grid, rows, cols, width, height)
}

pub fn render_grid(
    pipeline: &Pipeline,
    grid: GridKind,
    glyphs: &Glyphs,
    settings: &GridSettings,
) -> String {
    format!(
        "{}\n{}",
        grid_heading(grid, pipeline.dimensions(), settings),
        render_cells(&pipeline.cells(grid), glyphs)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cells() {
        let glyphs = Glyphs {
            up: "#".to_string(),
            down: ".".to_string(),
        };
        let cells = vec![vec![true, false], vec![false, true]];
        assert_eq!(render_cells(&cells, &glyphs), "#.\n.#");
        assert_eq!(render_cells(&[], &glyphs), "");
    }

    #[test]
    fn test_grid_heading() {
        let dims = Dimensions::new(4, 6, 20, 10);
        let heading = grid_heading(GridKind::Tieup, &dims, &GridSettings::default());
        assert_eq!(heading, "tieup (4×6, 90×60 px)");
    }
}
