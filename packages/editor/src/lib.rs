//! # WarpDrive Editor
//!
//! Pure editing of weaving drafts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ draft: WIF JSON → Draft, grid coordinates   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: edits + clicks → new Draft          │
//! │  - Validate against resolved dimensions     │
//! │  - Replace only the edited section          │
//! │  - Keep the drawdown current                │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ drawdown: Draft → woven cells + patches     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Drafts are values**: an edit returns a new draft, the input is untouched
//! 2. **Structural sharing**: unedited sections are the same allocation
//! 3. **Domain coordinates in, domain coordinates out**: the only visual
//!    coordinates handled here are grid clicks, converted once in [`toggle`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warpdrive_draft::{create_default, Dimensions};
//! use warpdrive_editor::{set_threading, Edit, Pipeline};
//!
//! let draft = create_default();
//! let dims = Dimensions::of(&draft);
//! let threaded = set_threading(&draft, &dims, 1, Some(4))?;
//!
//! let mut pipeline = Pipeline::new(threaded);
//! let result = pipeline.apply(Edit::SetTieup { treadle: 1, shaft: 4, selected: true })?;
//! ```

pub mod mutations;
pub mod pipeline;
pub mod toggle;
pub mod view;

pub use mutations::{set_threading, set_tieup, set_treadling, Edit};
pub use pipeline::{Pipeline, PipelineResult};
pub use toggle::edit_for_click;
pub use view::{cell_filled, grid_cells};

// Re-export common types for convenience
pub use warpdrive_draft::{Dimensions, Draft, DraftError, DraftResult, GridKind, VisualCell};
pub use warpdrive_drawdown::{CellPatch, Drawdown};
