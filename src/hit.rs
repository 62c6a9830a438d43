//! Hit-testing: point-in-shape, marquee intersection, and vertex grabbing.
//!
//! Point hits on polylines and curves use control-point bounding boxes
//! rather than distance-to-path — a deliberate approximation kept for
//! parity with the editor's established behavior. Marquee intersection is
//! strict: a shape whose bounds exactly touch the selection box is not
//! selected.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Scene, Shape, ShapeId, ShapeKind};
use crate::geom::{distance, Bounds, Point};

/// Whether `p` hits `shape`: bounds containment for rectangles, center
/// distance for circles, control-point bounds for polylines and curves.
#[must_use]
pub fn hit_shape(shape: &Shape, p: Point) -> bool {
    match &shape.kind {
        ShapeKind::Circle { cx, cy, radius } => {
            distance(Point::new(*cx, *cy), p) <= *radius
        }
        ShapeKind::Rect { .. } | ShapeKind::Polyline { .. } | ShapeKind::Curve { .. } => {
            shape.bounds().is_some_and(|b| b.contains(p))
        }
    }
}

/// The topmost shape under `p`, if any. Later shapes in paint order win.
#[must_use]
pub fn hit_test(scene: &Scene, p: Point) -> Option<ShapeId> {
    scene
        .iter()
        .rev()
        .find(|shape| hit_shape(shape, p))
        .map(|shape| shape.id)
}

/// Whether a shape's bounding box overlaps the marquee box, using strict
/// open-interval overlap on all four sides.
#[must_use]
pub fn box_intersects(shape: &Shape, marquee: &Bounds) -> bool {
    shape.bounds().is_some_and(|b| b.overlaps_open(marquee))
}

/// Index of the vertex of `shape` strictly within `radius` of `p`, if any.
/// Earlier vertices win ties.
#[must_use]
pub fn vertex_at(shape: &Shape, p: Point, radius: f64) -> Option<usize> {
    shape
        .vertices()
        .iter()
        .position(|v| distance(*v, p) < radius)
}

/// Search the selected shapes, topmost first, for a vertex under `p`.
#[must_use]
pub fn hit_selected_vertex(
    scene: &Scene,
    selection: &[ShapeId],
    p: Point,
    radius: f64,
) -> Option<(ShapeId, usize)> {
    scene
        .iter()
        .rev()
        .filter(|shape| selection.contains(&shape.id))
        .find_map(|shape| vertex_at(shape, p, radius).map(|index| (shape.id, index)))
}
