use pretty_assertions::assert_eq;
use wordslot::{Location, PlacementEngine, PlacementError, Preview, Token};

fn abc() -> PlacementEngine {
    let tokens = vec![Token::new(0, "A"), Token::new(1, "B"), Token::new(2, "C")];
    PlacementEngine::with_one_slot_per_token(tokens).unwrap()
}

#[test]
fn preview_does_not_mutate() {
    let e = abc();
    let before = e.current_state().clone();
    let pending = e.begin_move(0, Location::Pool(0)).unwrap();
    assert_eq!(pending.dragged_over, None);
    let p = e.preview_move(&pending, Location::Slot(1)).unwrap();
    assert_eq!(p.dragged_over, Some(Location::Slot(1)));
    match &p.preview {
        Preview::Accepted(next) => assert_eq!(next.answer_ids(), vec![None, Some(0), None]),
        other => panic!("expected accepted preview, got {other:?}"),
    }
    assert_eq!(e.current_state(), &before);
    assert_eq!(e.commits(), 0);
}

#[test]
fn preview_over_origin_is_unchanged() {
    let e = abc();
    let pending = e.begin_move(2, Location::Pool(2)).unwrap();
    let p = e.preview_move(&pending, Location::Pool(2)).unwrap();
    assert_eq!(p.preview, Preview::Unchanged);
    assert_eq!(p.origin, Location::Pool(2));
}

#[test]
fn repeated_previews_then_commit_matches_last_preview() {
    let mut e = abc();
    let mut pending = e.begin_move(0, Location::Pool(0)).unwrap();
    for cand in [Location::Pool(1), Location::Slot(0), Location::Pool(2), Location::Slot(2)] {
        pending = e.preview_move(&pending, cand).unwrap();
    }
    // Hovering never moved the token, so the origin is still valid.
    assert_eq!(pending.origin, Location::Pool(0));
    let Preview::Accepted(expected) = pending.preview.clone() else { panic!("expected accepted preview") };
    let committed = e.commit_move(pending, Location::Slot(2)).unwrap();
    assert_eq!(committed, &expected);
}

#[test]
fn preview_reports_rejection() {
    let mut e = abc();
    let p = e.begin_move(0, Location::Pool(0)).unwrap();
    e.commit_move(p, Location::Slot(0)).unwrap();
    let pending = e.begin_move(1, Location::Pool(0)).unwrap();
    let p = e.preview_move(&pending, Location::Slot(0)).unwrap();
    assert_eq!(p.preview, Preview::Rejected(PlacementError::SlotOccupied { slot: 0, occupant: 0 }));
    let p = e.preview_move(&p, Location::Slot(7)).unwrap();
    assert_eq!(p.preview, Preview::Rejected(PlacementError::InvalidLocation { location: Location::Slot(7), len: 3 }));
}

#[test]
fn preview_of_stale_pending_fails() {
    let mut e = abc();
    let stale = e.begin_move(2, Location::Pool(2)).unwrap();
    let p = e.begin_move(0, Location::Pool(0)).unwrap();
    e.commit_move(p, Location::Slot(0)).unwrap();
    let err = e.preview_move(&stale, Location::Slot(1)).unwrap_err();
    assert_eq!(err, PlacementError::InconsistentState { token: 2, claimed: Location::Pool(2) });
    assert!(err.is_caller_bug());
}

#[test]
fn cancel_leaves_state_untouched() {
    let e = abc();
    let before = e.current_state().clone();
    let pending = e.begin_move(1, Location::Pool(1)).unwrap();
    let pending = e.preview_move(&pending, Location::Slot(0)).unwrap();
    e.cancel_move(pending);
    assert_eq!(e.current_state(), &before);
}
