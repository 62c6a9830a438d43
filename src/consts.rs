//! Shared numeric constants for the engine.

// ── Snapping ────────────────────────────────────────────────────

/// World-space radius within which a cursor snaps to an anchor point.
///
/// The comparison is a strict `<`: a cursor exactly at this distance does
/// not snap.
pub const SNAP_RADIUS: f64 = 10.0;

// ── Shape creation ──────────────────────────────────────────────

/// Minimum width and height for a committed rectangle. Smaller drags are
/// silently discarded.
pub const MIN_RECT_SIZE: f64 = 5.0;

/// Minimum radius for a committed circle. Smaller drags are silently
/// discarded.
pub const MIN_CIRCLE_RADIUS: f64 = 5.0;

// ── Curve sampling ──────────────────────────────────────────────

/// Number of samples per control-point segment when flattening a curve.
pub const CURVE_SAMPLES_PER_SEGMENT: usize = 50;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space grab radius in pixels for vertex handles on selected shapes.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 10.0;

/// Exponential zoom rate per wheel delta unit.
pub const ZOOM_STEP: f64 = 0.002;

// ── Style defaults ──────────────────────────────────────────────

/// Stroke color applied to newly created shapes.
pub const DEFAULT_STROKE: &str = "#1F1A17";

/// Stroke width applied to newly created shapes when the host has not
/// configured one.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
