//! Input model: tools, modifier keys, gesture state, and in-progress
//! drawing state.
//!
//! This module defines the types consumed by the input engine. `Tool` and
//! `Modifiers` capture the user's intent at the time of an event.
//! `InputState` is the active select-mode gesture being tracked between
//! pointer-down and pointer-up; `DrawingState` is the uncommitted progress
//! of a multi-step shape placement and exists only while a drawing tool
//! has an unfinished shape. `UiState` is the persistent state the renderer
//! reads back: the active tool and the multi-selection.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{Scene, ShapeId};
use crate::geom::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Draw a polyline point by point.
    Pen,
    /// Draw a smooth curve point by point.
    Curve,
    /// Draw a rectangle from two corners.
    Rect,
    /// Draw a circle from center and rim.
    Circle,
    /// Delete shapes under the pointer.
    Eraser,
}

impl Tool {
    /// Whether this tool accumulates points across clicks (pen, curve).
    #[must_use]
    pub fn is_point_chain(self) -> bool {
        matches!(self, Self::Pen | Self::Curve)
    }

    /// Whether this tool places a shape from two corner clicks.
    #[must_use]
    pub fn is_two_corner(self) -> bool {
        matches!(self, Self::Rect | Self::Circle)
    }

    /// The tool bound to a single-letter keyboard shortcut, if any.
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key {
            "v" => Some(Self::Select),
            "p" => Some(Self::Pen),
            "b" => Some(Self::Curve),
            "r" => Some(Self::Rect),
            "c" => Some(Self::Circle),
            "e" => Some(Self::Eraser),
            _ => None,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held (activates the ortho constraint).
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the additive-select modifier is held.
    #[must_use]
    pub fn additive(self) -> bool {
        self.ctrl || self.meta
    }

    /// Whether the primary command modifier is held (undo/redo chords).
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser
/// (e.g. `"Delete"`, `"Escape"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Selected shape ids, in selection order. Always a subset of the ids
    /// in the live scene; stale entries are filtered on scene changes.
    pub selected_ids: Vec<ShapeId>,
}

impl UiState {
    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selected_ids.contains(id)
    }

    /// Replace the selection with a single shape.
    pub fn select_only(&mut self, id: ShapeId) {
        self.selected_ids.clear();
        self.selected_ids.push(id);
    }

    /// Toggle membership of one shape without affecting others.
    pub fn toggle(&mut self, id: ShapeId) {
        if let Some(index) = self.selected_ids.iter().position(|s| *s == id) {
            self.selected_ids.remove(index);
        } else {
            self.selected_ids.push(id);
        }
    }

    /// Add a shape to the selection if not already present.
    pub fn add(&mut self, id: ShapeId) {
        if !self.is_selected(&id) {
            self.selected_ids.push(id);
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    /// Drop selected ids that no longer exist in `scene`.
    pub fn retain_existing(&mut self, scene: &Scene) {
        self.selected_ids.retain(|id| scene.contains(id));
    }
}

/// Internal state for the select-mode gesture machine.
///
/// Each active variant carries the context needed to compute incremental
/// deltas and decide on pointer-up whether a history snapshot is due.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas (middle-button drag).
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is moving every selected shape.
    DraggingShapes {
        /// World-space pointer position at the previous event; deltas are
        /// always computed against it, so replaying a position is a no-op.
        last_world: Point,
        /// Whether any nonzero delta was applied; a motionless click
        /// commits nothing.
        moved: bool,
    },
    /// The user is moving a single vertex of a selected shape.
    DraggingVertex {
        /// Shape owning the vertex.
        id: ShapeId,
        /// Index into the shape's control points.
        index: usize,
        /// Whether the vertex actually moved.
        moved: bool,
    },
    /// The user is dragging a rubber-band selection box from empty space.
    Marquee {
        /// World-space corner where the drag started.
        anchor: Point,
        /// World-space position of the opposite corner.
        current: Point,
        /// Whether the additive modifier was held at the start; without it
        /// the prior selection is cleared on release.
        additive: bool,
    },
    /// The eraser is held down; shapes under the pointer are deleted.
    Erasing,
}

/// Transient, uncommitted progress of a multi-step shape placement.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Rectangle/circle placement: a fixed start corner and the live
    /// opposite corner.
    TwoCorner {
        /// First click: rectangle corner or circle center.
        start: Point,
        /// Live position of the second corner / rim point.
        current: Point,
    },
    /// Pen/curve placement: committed points plus the live next-point
    /// preview.
    PointChain {
        /// Points committed by previous clicks, in order.
        points: Vec<Point>,
        /// Live preview of the next point.
        preview: Point,
    },
}
