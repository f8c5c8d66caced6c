//! # Draft Dimensions
//!
//! Resolves the four counts that bound every grid: shafts, treadles, warp
//! threads and weft picks.
//!
//! Declared counts (`weaving.shafts`, `weaving.treadles`, `warp.threads`,
//! `weft.threads`) are authoritative. When a count is missing it can be
//! inferred from the pattern sections; how that happens is selected with an
//! [`InferencePolicy`] rather than being hard-wired.

use crate::draft::{Draft, WARP_SECTION, WEAVING_SECTION, WEFT_SECTION};
use crate::error::{DraftError, DraftResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_WARP_THREADS: u32 = 20;
pub const DEFAULT_WEFT_THREADS: u32 = 20;
pub const DEFAULT_SHAFTS: u32 = 4;
pub const DEFAULT_TREADLES: u32 = 4;

/// Largest count on any axis; keeps a drawdown matrix allocatable
pub const MAX_COUNT: u32 = 10_000;

/// One of the four numbered axes of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// Warp thread (end)
    Thread,
    /// Weft pick
    Pick,
    Shaft,
    Treadle,
}

impl Dimension {
    /// Section and field holding the declared count
    pub fn declared_field(self) -> (&'static str, &'static str) {
        match self {
            Dimension::Thread => (WARP_SECTION, "threads"),
            Dimension::Pick => (WEFT_SECTION, "threads"),
            Dimension::Shaft => (WEAVING_SECTION, "shafts"),
            Dimension::Treadle => (WEAVING_SECTION, "treadles"),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Thread => "thread",
            Dimension::Pick => "pick",
            Dimension::Shaft => "shaft",
            Dimension::Treadle => "treadle",
        };
        f.write_str(name)
    }
}

/// How missing counts are filled in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InferencePolicy {
    /// Declared count, else the configured default
    Declared,
    /// Declared count, else inferred from the pattern but never below the
    /// default, else the default
    #[default]
    DeclaredThenPattern,
    /// Inferred from the pattern, else declared, else the default
    PatternThenDeclared,
}

/// Dimension resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionConfig {
    #[serde(default)]
    pub policy: InferencePolicy,

    #[serde(default = "default_warp_threads")]
    pub default_warp_threads: u32,

    #[serde(default = "default_weft_threads")]
    pub default_weft_threads: u32,

    #[serde(default = "default_shafts")]
    pub default_shafts: u32,

    #[serde(default = "default_treadles")]
    pub default_treadles: u32,
}

fn default_warp_threads() -> u32 {
    DEFAULT_WARP_THREADS
}

fn default_weft_threads() -> u32 {
    DEFAULT_WEFT_THREADS
}

fn default_shafts() -> u32 {
    DEFAULT_SHAFTS
}

fn default_treadles() -> u32 {
    DEFAULT_TREADLES
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            policy: InferencePolicy::default(),
            default_warp_threads: DEFAULT_WARP_THREADS,
            default_weft_threads: DEFAULT_WEFT_THREADS,
            default_shafts: DEFAULT_SHAFTS,
            default_treadles: DEFAULT_TREADLES,
        }
    }
}

impl DimensionConfig {
    pub fn with_policy(policy: InferencePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    fn fallback(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Thread => self.default_warp_threads,
            Dimension::Pick => self.default_weft_threads,
            Dimension::Shaft => self.default_shafts,
            Dimension::Treadle => self.default_treadles,
        }
    }
}

/// Resolved grid extents of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub shafts: u32,
    pub treadles: u32,
    pub warp_threads: u32,
    pub weft_threads: u32,
}

impl Dimensions {
    pub fn new(shafts: u32, treadles: u32, warp_threads: u32, weft_threads: u32) -> Self {
        Self {
            shafts,
            treadles,
            warp_threads,
            weft_threads,
        }
    }

    /// Resolve with the default configuration
    pub fn of(draft: &Draft) -> Self {
        Self::resolve(draft, &DimensionConfig::default())
    }

    pub fn resolve(draft: &Draft, config: &DimensionConfig) -> Self {
        let count = |dimension: Dimension| {
            let declared = draft.declared(dimension);
            let resolved = match config.policy {
                InferencePolicy::Declared => declared,
                InferencePolicy::DeclaredThenPattern => declared.or_else(|| {
                    draft
                        .inferred(dimension)
                        .map(|count| count.max(config.fallback(dimension)))
                }),
                InferencePolicy::PatternThenDeclared => draft.inferred(dimension).or(declared),
            };
            resolved
                .unwrap_or_else(|| config.fallback(dimension))
                .clamp(1, MAX_COUNT)
        };

        Self {
            shafts: count(Dimension::Shaft),
            treadles: count(Dimension::Treadle),
            warp_threads: count(Dimension::Thread),
            weft_threads: count(Dimension::Pick),
        }
    }

    pub fn count(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Thread => self.warp_threads,
            Dimension::Pick => self.weft_threads,
            Dimension::Shaft => self.shafts,
            Dimension::Treadle => self.treadles,
        }
    }

    /// Whether `value` is a valid 1-based number on this axis
    pub fn contains(&self, dimension: Dimension, value: u32) -> bool {
        value >= 1 && value <= self.count(dimension)
    }

    /// Like [`contains`](Self::contains), but fails with `OutOfRange`
    pub fn check(&self, dimension: Dimension, value: u32) -> DraftResult<u32> {
        if self.contains(dimension, value) {
            Ok(value)
        } else {
            Err(DraftError::out_of_range(dimension, value, self.count(dimension)))
        }
    }
}

impl Draft {
    /// Count declared in the dimension sections, if present and positive
    pub fn declared(&self, dimension: Dimension) -> Option<u32> {
        let (section, field) = dimension.declared_field();
        self.field(section, field)
            .and_then(Value::as_u64)
            .and_then(|count| u32::try_from(count).ok())
            .filter(|count| *count > 0)
    }

    /// Count implied by the highest number referenced in the pattern sections
    pub fn inferred(&self, dimension: Dimension) -> Option<u32> {
        match dimension {
            Dimension::Thread => self.threading().max_thread(),
            Dimension::Pick => self.treadling().max_pick(),
            Dimension::Shaft => self
                .threading()
                .max_shaft()
                .max(self.tieup().max_shaft()),
            Dimension::Treadle => self
                .tieup()
                .max_treadle()
                .max(self.treadling().max_treadle()),
        }
    }
}
