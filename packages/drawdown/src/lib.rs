//! # WarpDrive Drawdown
//!
//! Derives the woven cloth (the drawdown) from threading, tieup and treadling.
//!
//! ```rust,ignore
//! use warpdrive_draft::{parse, Dimensions};
//! use warpdrive_drawdown::{Drawdown, Invalidation};
//!
//! let draft = parse(&json_text)?;
//! let dims = Dimensions::of(&draft);
//! let mut drawdown = Drawdown::evaluate(&draft, &dims);
//!
//! // after editing thread 7's threading
//! let patches = drawdown.update(&edited, &dims, Invalidation::Thread(7));
//! ```

pub mod differ;
pub mod engine;

pub use differ::{diff, CellPatch};
pub use engine::{Drawdown, Invalidation};
