//! Per-edit semantics: purity, sharing, no-ops and bounds

use serde_json::json;
use warpdrive_draft::{ingest, Dimension, PatternKind};
use warpdrive_editor::{set_threading, set_tieup, set_treadling, Dimensions, Draft, DraftError};

fn straight_draw() -> Draft {
    ingest(json!({ "sections": {
        "wif": { "version": 1.1 },
        "weaving": { "shafts": 4, "treadles": 4, "risingShed": true },
        "warp": { "threads": 8 },
        "weft": { "threads": 8 },
        "threading": { "1": 1, "2": 2, "3": 3, "4": 4 },
        "tieup": { "1": [1], "2": [2] },
        "treadling": { "1": 1, "2": 2 }
    } }))
    .unwrap()
}

#[test]
fn test_set_threading_leaves_input_untouched() -> anyhow::Result<()> {
    let draft = straight_draw();
    let dims = Dimensions::of(&draft);
    let snapshot = draft.threading().clone();

    let edited = set_threading(&draft, &dims, 2, Some(4))?;

    assert_eq!(draft.threading(), &snapshot);
    assert_eq!(draft.threading().shaft(2), Some(2));
    assert_eq!(edited.threading().shaft(2), Some(4));
    Ok(())
}

#[test]
fn test_edit_replaces_only_its_section() -> anyhow::Result<()> {
    let draft = straight_draw();
    let dims = Dimensions::of(&draft);

    let threaded = set_threading(&draft, &dims, 5, Some(1))?;
    assert!(!threaded.shares_section(&draft, PatternKind::Threading));
    assert!(threaded.shares_section(&draft, PatternKind::Tieup));
    assert!(threaded.shares_section(&draft, PatternKind::Treadling));

    let tied = set_tieup(&draft, &dims, 3, 3, true)?;
    assert!(tied.shares_section(&draft, PatternKind::Threading));
    assert!(!tied.shares_section(&draft, PatternKind::Tieup));
    assert!(tied.shares_section(&draft, PatternKind::Treadling));

    let treadled = set_treadling(&draft, &dims, 3, Some(3))?;
    assert!(treadled.shares_section(&draft, PatternKind::Threading));
    assert!(treadled.shares_section(&draft, PatternKind::Tieup));
    assert!(!treadled.shares_section(&draft, PatternKind::Treadling));

    // header sections survive any edit
    assert_eq!(treadled.rising_shed(), Some(true));
    assert_eq!(treadled.version(), Some(1.1));
    Ok(())
}

#[test]
fn test_reassigning_replaces_shaft() -> anyhow::Result<()> {
    let draft = straight_draw();
    let dims = Dimensions::of(&draft);

    let edited = set_threading(&draft, &dims, 1, Some(3))?;
    assert_eq!(edited.threading().shaft(1), Some(3));
    assert_eq!(edited.threading().len(), draft.threading().len());
    Ok(())
}

#[test]
fn test_clearing_threading_removes_entry() -> anyhow::Result<()> {
    let draft = straight_draw();
    let dims = Dimensions::of(&draft);

    let edited = set_threading(&draft, &dims, 4, None)?;
    assert_eq!(edited.threading().shaft(4), None);
    assert_eq!(edited.threading().len(), 3);
    Ok(())
}

#[test]
fn test_tieup_is_idempotent() -> anyhow::Result<()> {
    let draft = straight_draw();
    let dims = Dimensions::of(&draft);

    let once = set_tieup(&draft, &dims, 2, 3, true)?;
    let twice = set_tieup(&once, &dims, 2, 3, true)?;

    let shafts: Vec<u32> = twice.tieup().shafts(2).into_iter().flatten().copied().collect();
    assert_eq!(shafts, vec![2, 3]);
    assert!(twice.shares_all(&once));

    let json = warpdrive_draft::to_value(&twice)?;
    assert_eq!(json["sections"]["tieup"]["2"], json!([2, 3]));
    Ok(())
}

#[test]
fn test_untie_last_shaft_drops_treadle() -> anyhow::Result<()> {
    let draft = straight_draw();
    let dims = Dimensions::of(&draft);

    let edited = set_tieup(&draft, &dims, 1, 1, false)?;
    assert!(edited.tieup().shafts(1).is_none());

    let json = warpdrive_draft::to_value(&edited)?;
    assert!(json["sections"]["tieup"].get("1").is_none());
    Ok(())
}

#[test]
fn test_clearing_unassigned_pick_is_noop() -> anyhow::Result<()> {
    let draft = straight_draw();
    let dims = Dimensions::of(&draft);

    let edited = set_treadling(&draft, &dims, 5, None)?;
    assert!(edited.shares_all(&draft));
    assert_eq!(edited, draft);
    Ok(())
}

#[test]
fn test_out_of_range_writes_rejected() {
    let draft = straight_draw();
    let dims = Dimensions::of(&draft);

    assert_eq!(
        set_threading(&draft, &dims, 9, Some(1)),
        Err(DraftError::out_of_range(Dimension::Thread, 9, 8))
    );
    assert_eq!(
        set_threading(&draft, &dims, 1, Some(0)),
        Err(DraftError::out_of_range(Dimension::Shaft, 0, 4))
    );
    assert_eq!(
        set_treadling(&draft, &dims, 0, None),
        Err(DraftError::out_of_range(Dimension::Pick, 0, 8))
    );
    assert_eq!(
        set_treadling(&draft, &dims, 1, Some(5)),
        Err(DraftError::out_of_range(Dimension::Treadle, 5, 4))
    );
    assert_eq!(
        set_tieup(&draft, &dims, 5, 1, true),
        Err(DraftError::out_of_range(Dimension::Treadle, 5, 4))
    );
}

#[test]
fn test_edit_creates_missing_section() -> anyhow::Result<()> {
    let draft = ingest(json!({ "sections": { "wif": { "version": 1.1 } } }))?;
    let dims = Dimensions::of(&draft);
    assert!(!draft.has_pattern(PatternKind::Treadling));

    let edited = set_treadling(&draft, &dims, 3, Some(2))?;
    assert!(edited.has_pattern(PatternKind::Treadling));
    assert!(!draft.has_pattern(PatternKind::Treadling));

    let json = warpdrive_draft::to_value(&edited)?;
    assert_eq!(json["sections"]["treadling"], json!({ "3": 2 }));
    Ok(())
}
