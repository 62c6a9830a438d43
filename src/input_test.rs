use super::*;
use crate::doc::{Shape, ShapeKind, Style};
use uuid::Uuid;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_select() {
    assert_eq!(Tool::default(), Tool::Select);
}

#[test]
fn tool_point_chain_classification() {
    assert!(Tool::Pen.is_point_chain());
    assert!(Tool::Curve.is_point_chain());
    assert!(!Tool::Rect.is_point_chain());
    assert!(!Tool::Select.is_point_chain());
}

#[test]
fn tool_two_corner_classification() {
    assert!(Tool::Rect.is_two_corner());
    assert!(Tool::Circle.is_two_corner());
    assert!(!Tool::Pen.is_two_corner());
    assert!(!Tool::Eraser.is_two_corner());
}

#[test]
fn tool_shortcuts_map_every_tool() {
    assert_eq!(Tool::from_shortcut("v"), Some(Tool::Select));
    assert_eq!(Tool::from_shortcut("p"), Some(Tool::Pen));
    assert_eq!(Tool::from_shortcut("b"), Some(Tool::Curve));
    assert_eq!(Tool::from_shortcut("r"), Some(Tool::Rect));
    assert_eq!(Tool::from_shortcut("c"), Some(Tool::Circle));
    assert_eq!(Tool::from_shortcut("e"), Some(Tool::Eraser));
}

#[test]
fn tool_unknown_shortcut_is_none() {
    assert_eq!(Tool::from_shortcut("q"), None);
    assert_eq!(Tool::from_shortcut(""), None);
}

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let mods = Modifiers::default();
    assert!(!mods.shift);
    assert!(!mods.ctrl);
    assert!(!mods.alt);
    assert!(!mods.meta);
}

#[test]
fn additive_from_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Default::default() }.additive());
    assert!(Modifiers { meta: true, ..Default::default() }.additive());
    assert!(!Modifiers { shift: true, ..Default::default() }.additive());
    assert!(!Modifiers::default().additive());
}

// =============================================================
// UiState selection
// =============================================================

fn id() -> ShapeId {
    Uuid::new_v4()
}

#[test]
fn ui_default_has_no_selection() {
    let ui = UiState::default();
    assert!(ui.selected_ids.is_empty());
    assert_eq!(ui.tool, Tool::Select);
}

#[test]
fn select_only_replaces_selection() {
    let mut ui = UiState::default();
    let (a, b) = (id(), id());
    ui.add(a);
    ui.select_only(b);
    assert_eq!(ui.selected_ids, vec![b]);
}

#[test]
fn toggle_adds_then_removes() {
    let mut ui = UiState::default();
    let a = id();
    ui.toggle(a);
    assert!(ui.is_selected(&a));
    ui.toggle(a);
    assert!(!ui.is_selected(&a));
}

#[test]
fn toggle_leaves_others_untouched() {
    let mut ui = UiState::default();
    let (a, b) = (id(), id());
    ui.add(a);
    ui.toggle(b);
    assert!(ui.is_selected(&a));
    assert!(ui.is_selected(&b));
    ui.toggle(b);
    assert!(ui.is_selected(&a));
}

#[test]
fn add_is_idempotent() {
    let mut ui = UiState::default();
    let a = id();
    ui.add(a);
    ui.add(a);
    assert_eq!(ui.selected_ids.len(), 1);
}

#[test]
fn retain_existing_drops_stale_ids() {
    let mut scene = Scene::new();
    let shape = Shape::new(
        Style::default(),
        ShapeKind::Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
    );
    let live_id = shape.id;
    scene.push(shape);

    let mut ui = UiState::default();
    ui.add(live_id);
    ui.add(id()); // never existed

    ui.retain_existing(&scene);
    assert_eq!(ui.selected_ids, vec![live_id]);
}

// =============================================================
// InputState / DrawingState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn drawing_state_two_corner_holds_both_points() {
    let state = DrawingState::TwoCorner {
        start: Point::new(1.0, 2.0),
        current: Point::new(3.0, 4.0),
    };
    match state {
        DrawingState::TwoCorner { start, current } => {
            assert_eq!(start, Point::new(1.0, 2.0));
            assert_eq!(current, Point::new(3.0, 4.0));
        }
        DrawingState::PointChain { .. } => panic!("expected TwoCorner"),
    }
}

#[test]
fn drawing_state_point_chain_accumulates() {
    let mut points = vec![Point::new(0.0, 0.0)];
    points.push(Point::new(10.0, 0.0));
    let state = DrawingState::PointChain { points, preview: Point::new(10.0, 10.0) };
    match state {
        DrawingState::PointChain { points, preview } => {
            assert_eq!(points.len(), 2);
            assert_eq!(preview, Point::new(10.0, 10.0));
        }
        DrawingState::TwoCorner { .. } => panic!("expected PointChain"),
    }
}
