//! # Draft Edits
//!
//! The three operations a user can perform on a draft, one per editable grid.
//!
//! All edits take **domain coordinates**: 1-based thread, pick, shaft and
//! treadle numbers exactly as they appear in the draft sections. Grid clicks
//! arrive in visual coordinates and go through [`crate::toggle`] first.
//!
//! ## Semantics
//!
//! ### SetThreading / SetTreadling
//! - `Some(n)` assigns, silently replacing any previous assignment
//! - `None` clears; clearing an unassigned thread/pick is a no-op
//!
//! ### SetTieup
//! - Set membership: tying an already tied shaft is a no-op
//! - A treadle left with no shafts disappears from the section
//!
//! ## Purity
//!
//! Applying an edit never touches the input draft. The result shares every
//! section except the one edited; an edit that changes nothing returns a draft
//! sharing all sections, so callers can detect no-ops by identity.

use serde::{Deserialize, Serialize};
use tracing::debug;
use warpdrive_draft::{Dimension, Dimensions, Draft, DraftResult, PatternKind};
use warpdrive_drawdown::Invalidation;

/// A single edit to one pattern section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Edit {
    /// Thread a warp end through a shaft, or unthread it
    SetThreading { thread: u32, shaft: Option<u32> },

    /// Assign a treadle to a weft pick, or clear it
    SetTreadling { pick: u32, treadle: Option<u32> },

    /// Tie or untie a shaft to a treadle
    SetTieup {
        treadle: u32,
        shaft: u32,
        selected: bool,
    },
}

impl Edit {
    /// Check every number against the draft's dimensions
    pub fn validate(&self, dims: &Dimensions) -> DraftResult<()> {
        match *self {
            Edit::SetThreading { thread, shaft } => {
                dims.check(Dimension::Thread, thread)?;
                if let Some(shaft) = shaft {
                    dims.check(Dimension::Shaft, shaft)?;
                }
            }
            Edit::SetTreadling { pick, treadle } => {
                dims.check(Dimension::Pick, pick)?;
                if let Some(treadle) = treadle {
                    dims.check(Dimension::Treadle, treadle)?;
                }
            }
            Edit::SetTieup { treadle, shaft, .. } => {
                dims.check(Dimension::Treadle, treadle)?;
                dims.check(Dimension::Shaft, shaft)?;
            }
        }
        Ok(())
    }

    /// Apply to a draft, producing a new draft
    pub fn apply(&self, draft: &Draft, dims: &Dimensions) -> DraftResult<Draft> {
        self.validate(dims)?;

        match *self {
            Edit::SetThreading { thread, shaft } => Ok(Self::apply_threading(draft, thread, shaft)),
            Edit::SetTreadling { pick, treadle } => {
                Ok(Self::apply_treadling(draft, pick, treadle))
            }
            Edit::SetTieup {
                treadle,
                shaft,
                selected,
            } => Ok(Self::apply_tieup(draft, treadle, shaft, selected)),
        }
    }

    /// Section this edit writes to
    pub fn section(&self) -> PatternKind {
        match self {
            Edit::SetThreading { .. } => PatternKind::Threading,
            Edit::SetTreadling { .. } => PatternKind::Treadling,
            Edit::SetTieup { .. } => PatternKind::Tieup,
        }
    }

    /// Part of the drawdown this edit can change
    pub fn invalidation(&self) -> Invalidation {
        match *self {
            Edit::SetThreading { thread, .. } => Invalidation::Thread(thread),
            Edit::SetTreadling { pick, .. } => Invalidation::Pick(pick),
            Edit::SetTieup { treadle, .. } => Invalidation::Treadle(treadle),
        }
    }

    fn apply_threading(draft: &Draft, thread: u32, shaft: Option<u32>) -> Draft {
        if draft.threading().shaft(thread) == shaft {
            return draft.clone();
        }

        let mut threading = draft.threading().clone();
        match shaft {
            Some(shaft) => {
                threading.assign(thread, shaft);
                debug!(thread, shaft, "Set threading");
            }
            None => {
                threading.unassign(thread);
                debug!(thread, "Cleared threading");
            }
        }
        draft.with_threading(threading)
    }

    fn apply_treadling(draft: &Draft, pick: u32, treadle: Option<u32>) -> Draft {
        if draft.treadling().treadle(pick) == treadle {
            return draft.clone();
        }

        let mut treadling = draft.treadling().clone();
        match treadle {
            Some(treadle) => {
                treadling.assign(pick, treadle);
                debug!(pick, treadle, "Set treadling");
            }
            None => {
                treadling.unassign(pick);
                debug!(pick, "Cleared treadling");
            }
        }
        draft.with_treadling(treadling)
    }

    fn apply_tieup(draft: &Draft, treadle: u32, shaft: u32, selected: bool) -> Draft {
        if draft.tieup().engages(treadle, shaft) == selected {
            return draft.clone();
        }

        let mut tieup = draft.tieup().clone();
        if selected {
            tieup.tie(treadle, shaft);
        } else {
            tieup.untie(treadle, shaft);
        }
        debug!(treadle, shaft, selected, "Set tieup");
        draft.with_tieup(tieup)
    }
}

/// Thread `thread` through `shaft`, or unthread it with `None` (domain coordinates)
pub fn set_threading(
    draft: &Draft,
    dims: &Dimensions,
    thread: u32,
    shaft: Option<u32>,
) -> DraftResult<Draft> {
    Edit::SetThreading { thread, shaft }.apply(draft, dims)
}

/// Weave pick `pick` with `treadle`, or clear it with `None` (domain coordinates)
pub fn set_treadling(
    draft: &Draft,
    dims: &Dimensions,
    pick: u32,
    treadle: Option<u32>,
) -> DraftResult<Draft> {
    Edit::SetTreadling { pick, treadle }.apply(draft, dims)
}

/// Tie (`selected`) or untie `shaft` on `treadle` (domain coordinates)
pub fn set_tieup(
    draft: &Draft,
    dims: &Dimensions,
    treadle: u32,
    shaft: u32,
    selected: bool,
) -> DraftResult<Draft> {
    Edit::SetTieup {
        treadle,
        shaft,
        selected,
    }
    .apply(draft, dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warpdrive_draft::{ingest, DraftError};

    fn draft() -> Draft {
        ingest(json!({ "sections": {
            "wif": { "version": 1.1 },
            "weaving": { "shafts": 4, "treadles": 4 },
            "warp": { "threads": 8 },
            "weft": { "threads": 8 },
            "threading": { "1": 1 },
            "tieup": { "1": [1] },
            "treadling": { "1": 1 }
        } }))
        .unwrap()
    }

    #[test]
    fn test_validate_rejects_zero_and_overflow() {
        let dims = Dimensions::new(4, 4, 8, 8);
        let zero = Edit::SetThreading { thread: 0, shaft: Some(1) };
        assert_eq!(
            zero.validate(&dims),
            Err(DraftError::out_of_range(Dimension::Thread, 0, 8))
        );

        let big_shaft = Edit::SetTieup { treadle: 1, shaft: 5, selected: true };
        assert_eq!(
            big_shaft.validate(&dims),
            Err(DraftError::out_of_range(Dimension::Shaft, 5, 4))
        );

        // clearing only checks the pick
        assert!(Edit::SetTreadling { pick: 8, treadle: None }.validate(&dims).is_ok());
        assert!(Edit::SetTreadling { pick: 9, treadle: None }.validate(&dims).is_err());
    }

    #[test]
    fn test_noop_edits_share_everything() {
        let draft = draft();
        let dims = Dimensions::of(&draft);

        let same = set_threading(&draft, &dims, 1, Some(1)).unwrap();
        assert!(same.shares_all(&draft));

        let cleared_absent = set_treadling(&draft, &dims, 5, None).unwrap();
        assert!(cleared_absent.shares_all(&draft));

        let untie_absent = set_tieup(&draft, &dims, 2, 3, false).unwrap();
        assert!(untie_absent.shares_all(&draft));
    }

    #[test]
    fn test_edit_serde_shape() {
        let edit = Edit::SetTieup { treadle: 2, shaft: 3, selected: true };
        let value = serde_json::to_value(edit).unwrap();
        assert_eq!(
            value,
            json!({ "type": "setTieup", "treadle": 2, "shaft": 3, "selected": true })
        );

        let parsed: Edit =
            serde_json::from_value(json!({ "type": "setThreading", "thread": 4, "shaft": null }))
                .unwrap();
        assert_eq!(parsed, Edit::SetThreading { thread: 4, shaft: None });
    }

    #[test]
    fn test_invalidation_targets() {
        assert_eq!(
            Edit::SetThreading { thread: 3, shaft: None }.invalidation(),
            Invalidation::Thread(3)
        );
        assert_eq!(
            Edit::SetTreadling { pick: 2, treadle: Some(1) }.invalidation(),
            Invalidation::Pick(2)
        );
        assert_eq!(
            Edit::SetTieup { treadle: 4, shaft: 1, selected: false }.invalidation(),
            Invalidation::Treadle(4)
        );
        assert_eq!(Edit::SetTieup { treadle: 4, shaft: 1, selected: false }.section(), PatternKind::Tieup);
    }
}
