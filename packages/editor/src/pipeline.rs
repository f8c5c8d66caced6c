//! # Editing Pipeline
//!
//! Coordinates the edit lifecycle: Edit → Apply → Re-resolve → Update drawdown
//!
//! The Pipeline owns:
//! - The current draft (replaced, never mutated, on every edit)
//! - The resolved dimensions
//! - A live drawdown, kept current with incremental updates
//! - A version counter that moves only when the draft actually changes

use crate::mutations::Edit;
use crate::toggle::edit_for_click;
use crate::view::grid_cells;
use serde::Serialize;
use tracing::{debug, instrument};
use warpdrive_draft::{DimensionConfig, Dimensions, Draft, DraftResult, GridKind, VisualCell};
use warpdrive_drawdown::{CellPatch, Drawdown, Invalidation};

/// Manages the full edit → drawdown pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    draft: Draft,
    config: DimensionConfig,
    dims: Dimensions,
    drawdown: Drawdown,
    version: u64,
}

impl Pipeline {
    /// Create pipeline for a draft with default dimension resolution
    pub fn new(draft: Draft) -> Self {
        Self::with_config(draft, DimensionConfig::default())
    }

    pub fn with_config(draft: Draft, config: DimensionConfig) -> Self {
        let dims = Dimensions::resolve(&draft, &config);
        let drawdown = Drawdown::evaluate(&draft, &dims);
        Self {
            draft,
            config,
            dims,
            drawdown,
            version: 0,
        }
    }

    /// Apply an edit and bring the drawdown up to date
    ///
    /// This:
    /// 1. Applies the edit against the current dimensions
    /// 2. Re-resolves dimensions (inferred extents can shrink or grow)
    /// 3. Recomputes only the stale part of the drawdown
    /// 4. Returns the changed drawdown cells
    #[instrument(skip(self), fields(version = self.version))]
    pub fn apply(&mut self, edit: Edit) -> DraftResult<PipelineResult> {
        let next = edit.apply(&self.draft, &self.dims)?;

        if next.shares_all(&self.draft) {
            debug!("Edit changed nothing");
            return Ok(PipelineResult {
                version: self.version,
                changed: false,
                resized: false,
                patches: Vec::new(),
            });
        }

        let dims = Dimensions::resolve(&next, &self.config);
        let resized = dims != self.dims;
        let invalidation = if resized {
            Invalidation::All
        } else {
            edit.invalidation()
        };
        let patches = self.drawdown.update(&next, &dims, invalidation);

        self.draft = next;
        self.dims = dims;
        self.version += 1;

        Ok(PipelineResult {
            version: self.version,
            changed: true,
            resized,
            patches,
        })
    }

    /// Apply the edit a click at a visual cell stands for, if any
    pub fn click(&mut self, grid: GridKind, cell: VisualCell) -> DraftResult<Option<PipelineResult>> {
        match edit_for_click(&self.draft, &self.dims, grid, cell) {
            Some(edit) => self.apply(edit).map(Some),
            None => Ok(None),
        }
    }

    /// Swap in a different draft, e.g. after loading a file
    pub fn replace(&mut self, draft: Draft) {
        self.dims = Dimensions::resolve(&draft, &self.config);
        self.drawdown = Drawdown::evaluate(&draft, &self.dims);
        self.draft = draft;
        self.version += 1;
    }

    /// Full re-evaluation (for recovery/debugging)
    pub fn full_evaluate(&mut self) -> &Drawdown {
        self.drawdown = Drawdown::evaluate(&self.draft, &self.dims);
        &self.drawdown
    }

    /// Fill state of a grid in render order
    pub fn cells(&self, grid: GridKind) -> Vec<Vec<bool>> {
        grid_cells(grid, &self.draft, &self.drawdown, &self.dims)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    pub fn drawdown(&self) -> &Drawdown {
        &self.drawdown
    }

    pub fn config(&self) -> &DimensionConfig {
        &self.config
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Result of pipeline execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// Version after the edit
    pub version: u64,

    /// False when the edit left the draft as it was
    pub changed: bool,

    /// Dimensions moved; `patches` is empty and the drawdown must be redrawn
    pub resized: bool,

    /// Drawdown cells that flipped
    pub patches: Vec<CellPatch>,
}
