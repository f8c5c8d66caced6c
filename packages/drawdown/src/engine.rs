//! # Drawdown Engine
//!
//! Derives which warp threads are raised on each weft pick.
//!
//! ## Algorithm
//!
//! For pick `p`, look up its treadle, then the shafts that treadle raises.
//! Thread `t` is up on pick `p` iff `t` is threaded on one of those shafts.
//! Picks without a treadle, treadles without shafts and unthreaded threads
//! contribute nothing. Numbers outside the resolved [`Dimensions`] are read as
//! absent.
//!
//! ## Determinism Contract
//!
//! The drawdown is a pure function of the three pattern sections and the
//! dimensions. Re-evaluating an unchanged draft yields an identical matrix,
//! which is what lets the incremental paths below be checked against a full
//! evaluation.
//!
//! ## Incremental Updates
//!
//! A single edit only touches one line of the matrix:
//!
//! | edit      | recompute                         |
//! |-----------|-----------------------------------|
//! | threading | one column (`recompute_thread`)   |
//! | treadling | one row (`recompute_pick`)        |
//! | tieup     | rows using the treadle            |

use crate::differ::{diff, CellPatch};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};
use warpdrive_draft::{Dimension, Dimensions, Draft};

/// Region of the drawdown made stale by an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    /// A treadling edit
    Pick(u32),
    /// A threading edit
    Thread(u32),
    /// A tieup edit
    Treadle(u32),
    /// Anything else, including a change of dimensions
    All,
}

/// Woven interlacement matrix, picks × warp threads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawdown {
    dims: Dimensions,
    /// Row-major: `(pick - 1) * threads + (thread - 1)`
    cells: Vec<bool>,
}

impl Drawdown {
    /// All-down matrix covering the given extent
    pub fn empty(dims: Dimensions) -> Self {
        let len = dims.weft_threads as usize * dims.warp_threads as usize;
        Self {
            dims,
            cells: vec![false; len],
        }
    }

    /// Full evaluation
    #[instrument(skip_all, fields(picks = dims.weft_threads, threads = dims.warp_threads))]
    pub fn evaluate(draft: &Draft, dims: &Dimensions) -> Self {
        let mut drawdown = Self::empty(*dims);
        for pick in 1..=dims.weft_threads {
            drawdown.fill_pick(draft, pick);
        }
        info!(up = drawdown.up_count(), "Drawdown evaluation complete");
        drawdown
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    pub fn picks(&self) -> u32 {
        self.dims.weft_threads
    }

    pub fn threads(&self) -> u32 {
        self.dims.warp_threads
    }

    /// Whether the matrix covers exactly the given dimensions
    pub fn matches(&self, dims: &Dimensions) -> bool {
        self.dims == *dims
    }

    /// Whether thread `thread` is raised on pick `pick`; false outside the matrix
    pub fn is_up(&self, pick: u32, thread: u32) -> bool {
        self.index(pick, thread)
            .map_or(false, |index| self.cells[index])
    }

    /// One pick, thread 1 first
    pub fn row(&self, pick: u32) -> Option<&[bool]> {
        let start = self.index(pick, 1)?;
        Some(&self.cells[start..start + self.threads() as usize])
    }

    /// Raised cells as (pick, thread), row-major
    pub fn up_cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let threads = self.threads().max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, up)| **up)
            .map(move |(index, _)| ((index / threads) as u32 + 1, (index % threads) as u32 + 1))
    }

    pub fn up_count(&self) -> usize {
        self.cells.iter().filter(|up| **up).count()
    }

    /// Bring the matrix up to date after an edit, returning changed cells
    ///
    /// When `dims` differs from the matrix extent the whole matrix is rebuilt
    /// and the returned list is empty; callers redraw from scratch.
    pub fn update(
        &mut self,
        draft: &Draft,
        dims: &Dimensions,
        invalidation: Invalidation,
    ) -> Vec<CellPatch> {
        if !self.matches(dims) {
            debug!(?dims, "Drawdown extent changed, rebuilding");
            *self = Self::evaluate(draft, dims);
            return Vec::new();
        }

        match invalidation {
            Invalidation::Pick(pick) => self.recompute_pick(draft, pick),
            Invalidation::Thread(thread) => self.recompute_thread(draft, thread),
            Invalidation::Treadle(treadle) => self.recompute_treadle(draft, treadle),
            Invalidation::All => {
                let fresh = Self::evaluate(draft, dims);
                let patches = diff(self, &fresh).unwrap_or_default();
                *self = fresh;
                patches
            }
        }
    }

    /// Recompute one row after its treadle changed
    pub fn recompute_pick(&mut self, draft: &Draft, pick: u32) -> Vec<CellPatch> {
        let mut patches = Vec::new();
        if !self.dims.contains(Dimension::Pick, pick) {
            return patches;
        }
        let engaged = self.engaged(draft, pick);
        for thread in 1..=self.threads() {
            let up = self.cell_state(draft, engaged, thread);
            self.set(pick, thread, up, &mut patches);
        }
        debug!(pick, changed = patches.len(), "Recomputed drawdown row");
        patches
    }

    /// Recompute one column after its threading changed
    pub fn recompute_thread(&mut self, draft: &Draft, thread: u32) -> Vec<CellPatch> {
        let mut patches = Vec::new();
        if !self.dims.contains(Dimension::Thread, thread) {
            return patches;
        }
        for pick in 1..=self.picks() {
            let engaged = self.engaged(draft, pick);
            let up = self.cell_state(draft, engaged, thread);
            self.set(pick, thread, up, &mut patches);
        }
        debug!(thread, changed = patches.len(), "Recomputed drawdown column");
        patches
    }

    /// Recompute the rows woven with a treadle after its tieup changed
    pub fn recompute_treadle(&mut self, draft: &Draft, treadle: u32) -> Vec<CellPatch> {
        let picks: Vec<u32> = draft
            .treadling()
            .picks_using(treadle)
            .filter(|pick| self.dims.contains(Dimension::Pick, *pick))
            .collect();

        let mut patches = Vec::new();
        for pick in picks {
            patches.extend(self.recompute_pick(draft, pick));
        }
        patches
    }

    fn fill_pick(&mut self, draft: &Draft, pick: u32) {
        let Some(engaged) = self.engaged(draft, pick) else {
            return;
        };
        for thread in 1..=self.threads() {
            if self.cell_state(draft, Some(engaged), thread) {
                if let Some(index) = self.index(pick, thread) {
                    self.cells[index] = true;
                }
            }
        }
    }

    /// Shafts raised on a pick, if its treadle is known and ties anything
    fn engaged<'a>(&self, draft: &'a Draft, pick: u32) -> Option<&'a BTreeSet<u32>> {
        let treadle = draft
            .treadling()
            .treadle(pick)
            .filter(|treadle| self.dims.contains(Dimension::Treadle, *treadle))?;
        draft
            .tieup()
            .shafts(treadle)
            .filter(|shafts| !shafts.is_empty())
    }

    fn cell_state(&self, draft: &Draft, engaged: Option<&BTreeSet<u32>>, thread: u32) -> bool {
        let Some(engaged) = engaged else {
            return false;
        };
        draft
            .threading()
            .shaft(thread)
            .filter(|shaft| self.dims.contains(Dimension::Shaft, *shaft))
            .map_or(false, |shaft| engaged.contains(&shaft))
    }

    fn set(&mut self, pick: u32, thread: u32, up: bool, patches: &mut Vec<CellPatch>) {
        if let Some(index) = self.index(pick, thread) {
            if self.cells[index] != up {
                self.cells[index] = up;
                patches.push(CellPatch { pick, thread, up });
            }
        }
    }

    fn index(&self, pick: u32, thread: u32) -> Option<usize> {
        if !self.dims.contains(Dimension::Pick, pick) || !self.dims.contains(Dimension::Thread, thread)
        {
            return None;
        }
        Some((pick as usize - 1) * self.threads() as usize + (thread as usize - 1))
    }
}

impl Serialize for Drawdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let up: Vec<(u32, u32)> = self.up_cells().collect();
        let mut state = serializer.serialize_struct("Drawdown", 3)?;
        state.serialize_field("picks", &self.picks())?;
        state.serialize_field("threads", &self.threads())?;
        state.serialize_field("up", &up)?;
        state.end()
    }
}
