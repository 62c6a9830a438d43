//! Document model: shapes, styles, and the ordered scene.
//!
//! This module defines the core data types that describe what is on the
//! canvas (`Shape`, `ShapeKind`, `Style`, `Fill`), a sparse-update type for
//! property edits (`PartialShape`), the editor configuration applied to new
//! shapes (`EditorConfig`), and the ordered store that owns all live shapes
//! (`Scene`).
//!
//! Scene order is paint order — later shapes draw on top — and therefore
//! also hit-test priority. Data flows into this layer from the host
//! (JSON snapshot hydration) and from the input engine (mutations); the
//! renderer reads shapes back in order. Every type serializes losslessly so
//! the host can persist and reload a board.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_STROKE, DEFAULT_STROKE_WIDTH};
use crate::geom::{Bounds, Point};

/// Unique identifier for a shape. Generated once at creation, never reused.
pub type ShapeId = Uuid;

/// Errors crossing the document boundary (snapshot and config JSON).
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("scene parse failed: {0}")]
    SceneParse(serde_json::Error),
    #[error("scene serialize failed: {0}")]
    SceneSerialize(serde_json::Error),
    #[error("config parse failed: {0}")]
    ConfigParse(serde_json::Error),
}

/// How a shape's interior is painted.
///
/// On the wire this is a single string — `"none"`, a `#rrggbb` color, or a
/// named fill pattern resolved by the host compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Fill {
    /// No interior paint.
    None,
    /// A solid CSS color.
    Solid(String),
    /// A named pattern; the asset itself belongs to the host.
    Pattern(String),
}

impl From<String> for Fill {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("none") {
            Self::None
        } else if value.starts_with('#') {
            Self::Solid(value)
        } else {
            Self::Pattern(value)
        }
    }
}

impl From<Fill> for String {
    fn from(fill: Fill) -> Self {
        match fill {
            Fill::None => "none".to_owned(),
            Fill::Solid(color) | Fill::Pattern(color) => color,
        }
    }
}

impl Fill {
    /// The CSS color to fill with, if this fill paints directly.
    #[must_use]
    pub fn css(&self) -> Option<&str> {
        match self {
            Self::Solid(color) => Some(color),
            Self::None | Self::Pattern(_) => None,
        }
    }
}

/// Paint style shared by every shape variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Stroke color as a CSS color string.
    pub stroke: String,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Interior paint.
    pub fill: Fill,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: Fill::None,
            opacity: 1.0,
        }
    }
}

/// The geometry of a shape: a closed tagged union, one variant per tool.
///
/// Variant-only fields (the closed flag, arrowheads, radii) are reached
/// through pattern matches only — there is no dynamic property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    /// Ordered control points joined by straight segments. A closed
    /// polyline paints as a polygon; an open one may carry an arrowhead.
    Polyline {
        points: Vec<Point>,
        closed: bool,
        arrow: bool,
    },
    /// Axis-aligned rectangle with non-negative size.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Circle with non-negative radius.
    Circle { cx: f64, cy: f64, radius: f64 },
    /// Ordered control points rendered as a smooth spline (see
    /// [`crate::curve`]). May carry an arrowhead.
    Curve { points: Vec<Point>, arrow: bool },
}

/// A shape as stored in the scene and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier for this shape.
    pub id: ShapeId,
    #[serde(flatten)]
    pub style: Style,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    /// Create a shape with a fresh identifier.
    #[must_use]
    pub fn new(style: Style, kind: ShapeKind) -> Self {
        Self { id: Uuid::new_v4(), style, kind }
    }

    /// Axis-aligned bounding box. For polylines and curves this is the box
    /// of the control points (curves may overshoot it slightly; hit-testing
    /// accepts that approximation deliberately). `None` only for an empty
    /// point sequence, which no committed shape has.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        match &self.kind {
            ShapeKind::Polyline { points, .. } | ShapeKind::Curve { points, .. } => {
                Bounds::from_points(points)
            }
            ShapeKind::Rect { x, y, width, height } => {
                Some(Bounds::from_rect(*x, *y, *width, *height))
            }
            ShapeKind::Circle { cx, cy, radius } => Some(Bounds::from_circle(*cx, *cy, *radius)),
        }
    }

    /// Move the whole shape by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match &mut self.kind {
            ShapeKind::Polyline { points, .. } | ShapeKind::Curve { points, .. } => {
                for p in points {
                    p.x += dx;
                    p.y += dy;
                }
            }
            ShapeKind::Rect { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            ShapeKind::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
        }
    }

    /// Points the snap engine treats as interesting: control points for
    /// polylines and curves, corners plus edge midpoints for rectangles,
    /// center plus the four cardinal points for circles.
    #[must_use]
    pub fn anchor_points(&self) -> Vec<Point> {
        match &self.kind {
            ShapeKind::Polyline { points, .. } | ShapeKind::Curve { points, .. } => points.clone(),
            ShapeKind::Rect { x, y, width, height } => {
                let (x1, y1) = (*x + *width, *y + *height);
                let (mx, my) = (*x + *width / 2.0, *y + *height / 2.0);
                vec![
                    Point::new(*x, *y),
                    Point::new(x1, *y),
                    Point::new(x1, y1),
                    Point::new(*x, y1),
                    Point::new(mx, *y),
                    Point::new(x1, my),
                    Point::new(mx, y1),
                    Point::new(*x, my),
                ]
            }
            ShapeKind::Circle { cx, cy, radius } => vec![
                Point::new(*cx, *cy),
                Point::new(*cx + *radius, *cy),
                Point::new(*cx - *radius, *cy),
                Point::new(*cx, *cy + *radius),
                Point::new(*cx, *cy - *radius),
            ],
        }
    }

    /// Draggable control points: the vertices of a polyline or curve.
    /// Rectangles and circles expose none.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        match &self.kind {
            ShapeKind::Polyline { points, .. } | ShapeKind::Curve { points, .. } => points,
            ShapeKind::Rect { .. } | ShapeKind::Circle { .. } => &[],
        }
    }

    /// Move one vertex. Returns false for an out-of-range index or a shape
    /// without vertices.
    pub fn set_vertex(&mut self, index: usize, p: Point) -> bool {
        match &mut self.kind {
            ShapeKind::Polyline { points, .. } | ShapeKind::Curve { points, .. } => {
                match points.get_mut(index) {
                    Some(v) => {
                        *v = p;
                        true
                    }
                    None => false,
                }
            }
            ShapeKind::Rect { .. } | ShapeKind::Circle { .. } => false,
        }
    }
}

/// Sparse update for a shape. Only present fields are applied; fields that
/// do not apply to the target variant are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialShape {
    /// New stroke color, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// New stroke width, if being updated. Clamped to be non-negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// New fill, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    /// New opacity, if being updated. Clamped to `[0, 1]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// New closed flag. Applies to polylines only; closing drops the
    /// arrowhead, which is valid only on open paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    /// New arrowhead flag. Applies to open polylines and curves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow: Option<bool>,
}

/// Editor configuration supplied by the host. Applied as defaults to newly
/// created shapes; `snapping` gates the snap engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub stroke_width: f64,
    pub fill_color: Fill,
    pub snapping: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill_color: Fill::None,
            snapping: true,
        }
    }
}

impl EditorConfig {
    /// Parse a host configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::ConfigParse`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, DocError> {
        serde_json::from_str(json).map_err(DocError::ConfigParse)
    }

    /// The paint style for a newly created shape.
    #[must_use]
    pub fn style(&self) -> Style {
        Style {
            stroke: DEFAULT_STROKE.to_owned(),
            stroke_width: self.stroke_width,
            fill: self.fill_color.clone(),
            opacity: 1.0,
        }
    }
}

/// The ordered collection of all shapes on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the scene contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in paint order (first = bottom).
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Iterate shapes in paint order.
    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    /// Append a shape on top of the paint order.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Return a reference to a shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == *id)
    }

    /// Return a mutable reference to a shape by id.
    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == *id)
    }

    /// Whether a shape with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.iter().any(|s| s.id == *id)
    }

    /// Remove a shape by id, returning it if it was present. Paint order of
    /// the remaining shapes is preserved.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id == *id)?;
        Some(self.shapes.remove(index))
    }

    /// Remove every shape whose id appears in `ids`. Returns the number of
    /// shapes removed.
    pub fn remove_many(&mut self, ids: &[ShapeId]) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| !ids.contains(&s.id));
        before - self.shapes.len()
    }

    /// Apply a sparse update to a shape. Returns `true` if the shape exists
    /// and the update changed it.
    pub fn apply_partial(&mut self, id: &ShapeId, partial: &PartialShape) -> bool {
        let Some(shape) = self.get_mut(id) else {
            return false;
        };
        let before = shape.clone();

        if let Some(stroke) = &partial.stroke {
            shape.style.stroke = stroke.clone();
        }
        if let Some(width) = partial.stroke_width {
            shape.style.stroke_width = width.max(0.0);
        }
        if let Some(fill) = &partial.fill {
            shape.style.fill = fill.clone();
        }
        if let Some(opacity) = partial.opacity {
            shape.style.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(closed) = partial.closed {
            if let ShapeKind::Polyline { closed: c, arrow, .. } = &mut shape.kind {
                *c = closed;
                if closed {
                    *arrow = false;
                }
            }
        }
        if let Some(flag) = partial.arrow {
            match &mut shape.kind {
                ShapeKind::Polyline { closed: false, arrow, .. }
                | ShapeKind::Curve { arrow, .. } => *arrow = flag,
                ShapeKind::Polyline { .. } | ShapeKind::Rect { .. } | ShapeKind::Circle { .. } => {}
            }
        }

        before != *shape
    }

    /// Deserialize a scene from the host's JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::SceneParse`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, DocError> {
        serde_json::from_str(json).map_err(DocError::SceneParse)
    }

    /// Serialize the scene losslessly for host persistence.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::SceneSerialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocError> {
        serde_json::to_string(self).map_err(DocError::SceneSerialize)
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}
