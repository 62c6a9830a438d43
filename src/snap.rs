//! Snapping: anchor-point snap, rectangle edge snap, and the ortho
//! constraint.
//!
//! Point snap and edge snap are governed by the host's `snapping` toggle —
//! the engine simply skips the calls when it is off. The ortho constraint
//! is independent of that toggle: it is modifier-activated per event.
//!
//! All comparisons against [`SNAP_RADIUS`] are strict `<`, so a cursor
//! exactly on the radius does not snap. Ties between equally distant
//! candidates keep the first one found in scene order; exact ties are
//! measure-zero in practice.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::consts::SNAP_RADIUS;
use crate::doc::{Scene, ShapeKind};
use crate::geom::{distance, Point};

/// Snap `cursor` to the closest anchor point of any shape in the scene, or
/// of the in-progress drawing (`extra`), when one lies strictly within
/// [`SNAP_RADIUS`]. Returns the cursor unchanged otherwise.
#[must_use]
pub fn snap_to_anchor(cursor: Point, scene: &Scene, extra: &[Point]) -> Point {
    let mut best: Option<(f64, Point)> = None;

    let candidates = scene
        .iter()
        .flat_map(|shape| shape.anchor_points())
        .chain(extra.iter().copied());
    for candidate in candidates {
        let dist = distance(cursor, candidate);
        if best.is_none_or(|(best_dist, _)| dist < best_dist) {
            best = Some((dist, candidate));
        }
    }

    match best {
        Some((dist, p)) if dist < SNAP_RADIUS => p,
        _ => cursor,
    }
}

/// Snap the moving corner of an in-progress rectangle onto the edges of
/// existing rectangles.
///
/// The horizontal and vertical extents snap independently: the corner's x
/// is pulled onto the nearest left/right edge strictly within
/// [`SNAP_RADIUS`], and its y onto the nearest top/bottom edge, so a drag
/// can align on one axis without the other.
#[must_use]
pub fn snap_rect_corner(corner: Point, scene: &Scene) -> Point {
    let mut out = corner;
    if let Some(x) = nearest_edge(corner.x, scene, |x, _y, width, _h| [x, x + width]) {
        out.x = x;
    }
    if let Some(y) = nearest_edge(corner.y, scene, |_x, y, _w, height| [y, y + height]) {
        out.y = y;
    }
    out
}

/// Closest edge coordinate of any existing rectangle strictly within
/// [`SNAP_RADIUS`] of `coord`, where `edges` extracts the two candidate
/// coordinates per rectangle.
fn nearest_edge(
    coord: f64,
    scene: &Scene,
    edges: impl Fn(f64, f64, f64, f64) -> [f64; 2],
) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for shape in scene {
        let ShapeKind::Rect { x, y, width, height } = &shape.kind else {
            continue;
        };
        for edge in edges(*x, *y, *width, *height) {
            let dist = (coord - edge).abs();
            if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                best = Some((dist, edge));
            }
        }
    }
    match best {
        Some((dist, edge)) if dist < SNAP_RADIUS => Some(edge),
        _ => None,
    }
}

/// Force `cursor` onto the horizontal or vertical through `reference`,
/// whichever axis carries the larger absolute delta. An exact diagonal
/// resolves horizontally.
#[must_use]
pub fn ortho_constrain(reference: Point, cursor: Point) -> Point {
    let dx = cursor.x - reference.x;
    let dy = cursor.y - reference.y;
    if dx.abs() >= dy.abs() {
        Point::new(cursor.x, reference.y)
    } else {
        Point::new(reference.x, cursor.y)
    }
}
