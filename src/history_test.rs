use super::*;
use crate::doc::{Shape, ShapeKind, Style};

fn scene_with_rects(count: usize) -> Scene {
    let mut scene = Scene::new();
    for i in 0..count {
        let offset = i as f64 * 20.0;
        scene.push(Shape::new(
            Style::default(),
            ShapeKind::Rect { x: offset, y: offset, width: 10.0, height: 10.0 },
        ));
    }
    scene
}

// =============================================================
// Fresh history
// =============================================================

#[test]
fn new_history_is_at_sentinel() {
    let history = History::new();
    assert_eq!(history.cursor(), None);
    assert_eq!(history.depth(), 0);
    assert!(history.scene().is_empty());
}

#[test]
fn new_history_cannot_undo_or_redo() {
    let history = History::new();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn undo_at_sentinel_is_noop() {
    let mut history = History::new();
    assert!(!history.undo());
    assert_eq!(history.cursor(), None);
}

#[test]
fn redo_with_no_snapshots_is_noop() {
    let mut history = History::new();
    assert!(!history.redo());
}

// =============================================================
// Commit
// =============================================================

#[test]
fn commit_advances_cursor_and_sets_live() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(history.depth(), 1);
    assert_eq!(history.scene().len(), 1);

    history.commit(scene_with_rects(2));
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(history.depth(), 2);
    assert_eq!(history.scene().len(), 2);
}

#[test]
fn commit_snapshot_is_independent_of_live_mutation() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));

    // Mutate the live scene without committing, then undo/redo back.
    history.scene_mut().push(Shape::new(
        Style::default(),
        ShapeKind::Circle { cx: 0.0, cy: 0.0, radius: 5.0 },
    ));
    assert_eq!(history.scene().len(), 2);

    assert!(history.undo());
    assert!(history.redo());
    // The uncommitted circle is gone: the snapshot restored exactly.
    assert_eq!(history.scene().len(), 1);
}

// =============================================================
// Undo
// =============================================================

#[test]
fn undo_steps_back_one_snapshot() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    history.commit(scene_with_rects(2));

    assert!(history.undo());
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(history.scene().len(), 1);
}

#[test]
fn undo_past_first_snapshot_restores_empty_scene() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));

    assert!(history.undo());
    assert_eq!(history.cursor(), None);
    assert!(history.scene().is_empty());

    // A further undo is a no-op.
    assert!(!history.undo());
    assert_eq!(history.cursor(), None);
}

// =============================================================
// Redo
// =============================================================

#[test]
fn redo_reapplies_undone_snapshot() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    history.commit(scene_with_rects(2));
    history.undo();

    assert!(history.redo());
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(history.scene().len(), 2);
}

#[test]
fn redo_at_tip_is_noop() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    assert!(!history.redo());
    assert_eq!(history.cursor(), Some(0));
}

#[test]
fn redo_from_sentinel_restores_first_snapshot() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    history.undo();
    assert_eq!(history.cursor(), None);

    assert!(history.redo());
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(history.scene().len(), 1);
}

// =============================================================
// Truncation
// =============================================================

#[test]
fn commit_from_non_tip_discards_redo_tail() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    history.commit(scene_with_rects(2));
    history.commit(scene_with_rects(3));

    history.undo();
    assert_eq!(history.cursor(), Some(1));

    // Committing now discards snapshot 3 and appends at index 2.
    history.commit(scene_with_rects(5));
    assert_eq!(history.cursor(), Some(2));
    assert_eq!(history.depth(), 3);
    assert_eq!(history.scene().len(), 5);
    assert!(!history.can_redo());
}

#[test]
fn commit_from_sentinel_discards_everything() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    history.undo();

    history.commit(scene_with_rects(4));
    assert_eq!(history.depth(), 1);
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(history.scene().len(), 4);
}

// =============================================================
// Availability flags
// =============================================================

#[test]
fn availability_tracks_cursor() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    history.commit(scene_with_rects(2));

    assert!(history.can_undo());
    assert!(!history.can_redo());

    history.undo();
    assert!(history.can_undo());
    assert!(history.can_redo());

    history.undo();
    assert!(!history.can_undo());
    assert!(history.can_redo());
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_installs_single_base_snapshot() {
    let mut history = History::new();
    history.commit(scene_with_rects(1));
    history.commit(scene_with_rects(2));

    history.reset(scene_with_rects(7));
    assert_eq!(history.depth(), 1);
    assert_eq!(history.cursor(), Some(0));
    assert_eq!(history.scene().len(), 7);
    assert!(!history.can_redo());

    // Undo from the base yields the empty scene.
    assert!(history.undo());
    assert!(history.scene().is_empty());
}
