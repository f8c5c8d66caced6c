//! # WarpDrive Draft
//!
//! Weaving draft model for the WarpDrive designer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ WIF parser (external): .wif text → JSON     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ draft: JSON → Draft                         │
//! │  - Ingestion and validation                 │
//! │  - Typed pattern sections, shared via Arc   │
//! │  - Dimension resolution                     │
//! │  - Grid coordinate mapping                  │
//! │  - Serialization back to JSON               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor / drawdown                           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warpdrive_draft::{parse, serialize, Dimensions, GridKind, VisualCell};
//!
//! let draft = parse(&json_text)?;
//! let dims = Dimensions::of(&draft);
//!
//! // Which thread/shaft does the top-left threading cell show?
//! let cell = GridKind::Threading.to_domain(VisualCell::new(0, 0), &dims);
//!
//! let text = serialize(&draft)?;
//! ```

pub mod dimensions;
pub mod draft;
pub mod error;
pub mod grid;
pub mod ingest;
pub mod serializer;

pub use dimensions::{Dimension, DimensionConfig, Dimensions, InferencePolicy, MAX_COUNT};
pub use draft::{Draft, PatternKind, Section, Threading, Tieup, Treadling};
pub use error::{DraftError, DraftResult};
pub use grid::{Axis, DomainCell, GridKind, GridSettings, VisualCell};
pub use ingest::{create_default, create_default_on, ingest, ingest_ref, parse, validate};
pub use serializer::{serialize, to_value, Serializer};
