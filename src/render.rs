//! Rendering: draws the full canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine state and produces pixels —
//! it does not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.
//!
//! A [`crate::doc::Fill::Pattern`] paints no fill here; named pattern assets
//! are resolved and composited by the host.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::HANDLE_RADIUS_PX;
use crate::curve;
use crate::doc::{Shape, ShapeKind, Style};
use crate::engine::EngineCore;
use crate::geom::{Bounds, Point, distance};
use crate::input::{DrawingState, InputState, Tool};

/// Arrowhead length in world units.
const ARROW_SIZE: f64 = 10.0;

/// Arrowhead half-angle in radians (~30°).
const ARROW_ANGLE: f64 = PI / 6.0;

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Accent color for selection UI and drawing previews.
const SELECTION_COLOR: &str = "#1E90FF";

/// Translucent marquee interior.
const MARQUEE_FILL: &str = "rgba(30, 144, 255, 0.12)";

/// Draw the full scene: committed shapes, selection UI, and transient
/// overlays (marquee, in-progress drawing preview).
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    // Layer 1: clear and set up transforms.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);
    ctx.translate(core.camera.pan_x, core.camera.pan_y)?;
    ctx.scale(core.camera.zoom, core.camera.zoom)?;

    // Layer 2: shapes in paint order (bottom first).
    for shape in core.scene() {
        draw_shape(ctx, shape)?;
    }

    // Layer 3: selection UI.
    for id in core.selection() {
        if let Some(shape) = core.scene().get(id) {
            draw_selection(ctx, shape, core.camera.zoom)?;
        }
    }

    // Layer 4: transient overlays.
    if let InputState::Marquee { anchor, current, .. } = core.input {
        draw_marquee(ctx, Bounds::from_corners(anchor, current), core.camera.zoom)?;
    }
    if let Some(drawing) = &core.drawing {
        draw_preview(ctx, drawing, core.ui.tool, core.camera.zoom)?;
    }

    Ok(())
}

// =============================================================
// Shape renderers
// =============================================================

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(shape.style.opacity);

    match &shape.kind {
        ShapeKind::Rect { x, y, width, height } => {
            if let Some(color) = shape.style.fill.css() {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(*x, *y, *width, *height);
            }
            apply_stroke_style(ctx, &shape.style);
            ctx.stroke_rect(*x, *y, *width, *height);
        }
        ShapeKind::Circle { cx, cy, radius } => {
            ctx.begin_path();
            ctx.arc(*cx, *cy, *radius, 0.0, 2.0 * PI)?;
            if let Some(color) = shape.style.fill.css() {
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
            apply_stroke_style(ctx, &shape.style);
            ctx.stroke();
        }
        ShapeKind::Polyline { points, closed, arrow } => {
            draw_path(ctx, &shape.style, points, *closed, *arrow);
        }
        ShapeKind::Curve { points, arrow } => {
            let samples: Vec<Point> = curve::sample_path(points).collect();
            draw_path(ctx, &shape.style, &samples, false, *arrow);
        }
    }

    ctx.restore();
    Ok(())
}

/// Stroke (and fill, when the style has one) a point path. An arrowhead,
/// if requested, points along the final segment.
fn draw_path(ctx: &CanvasRenderingContext2d, style: &Style, points: &[Point], closed: bool, arrow: bool) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    if closed {
        ctx.close_path();
    }

    if let Some(color) = style.fill.css() {
        ctx.set_fill_style_str(color);
        ctx.fill();
    }
    apply_stroke_style(ctx, style);
    ctx.stroke();

    if arrow && points.len() >= 2 {
        let tip = points[points.len() - 1];
        let prev = points[points.len() - 2];
        if distance(prev, tip) > 0.0 {
            let angle = (tip.y - prev.y).atan2(tip.x - prev.x);
            ctx.set_fill_style_str(&style.stroke);
            draw_arrowhead(ctx, tip.x, tip.y, angle);
        }
    }
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tip_x: f64, tip_y: f64, angle: f64) {
    let x1 = tip_x - ARROW_SIZE * (angle - ARROW_ANGLE).cos();
    let y1 = tip_y - ARROW_SIZE * (angle - ARROW_ANGLE).sin();
    let x2 = tip_x - ARROW_SIZE * (angle + ARROW_ANGLE).cos();
    let y2 = tip_y - ARROW_SIZE * (angle + ARROW_ANGLE).sin();

    ctx.begin_path();
    ctx.move_to(tip_x, tip_y);
    ctx.line_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.close_path();
    ctx.fill();
}

// =============================================================
// Selection UI
// =============================================================

fn draw_selection(ctx: &CanvasRenderingContext2d, shape: &Shape, zoom: f64) -> Result<(), JsValue> {
    let Some(bounds) = shape.bounds() else {
        return Ok(());
    };

    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0 / zoom);
    set_selection_dash(ctx, zoom)?;
    ctx.stroke_rect(bounds.min_x, bounds.min_y, bounds.width(), bounds.height());
    clear_dash(ctx)?;

    // Vertex handles on polylines and curves.
    let handle = HANDLE_RADIUS_PX / zoom * 0.75;
    ctx.set_fill_style_str("#fff");
    for v in shape.vertices() {
        ctx.fill_rect(v.x - handle / 2.0, v.y - handle / 2.0, handle, handle);
        ctx.stroke_rect(v.x - handle / 2.0, v.y - handle / 2.0, handle, handle);
    }

    ctx.restore();
    Ok(())
}

fn draw_marquee(ctx: &CanvasRenderingContext2d, marquee: Bounds, zoom: f64) -> Result<(), JsValue> {
    ctx.save();
    set_selection_dash(ctx, zoom)?;
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_fill_style_str(MARQUEE_FILL);
    ctx.set_line_width(1.0 / zoom);
    ctx.fill_rect(marquee.min_x, marquee.min_y, marquee.width(), marquee.height());
    ctx.stroke_rect(marquee.min_x, marquee.min_y, marquee.width(), marquee.height());
    clear_dash(ctx)?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Drawing previews
// =============================================================

fn draw_preview(
    ctx: &CanvasRenderingContext2d,
    drawing: &DrawingState,
    tool: Tool,
    zoom: f64,
) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0 / zoom);
    set_selection_dash(ctx, zoom)?;

    match drawing {
        DrawingState::TwoCorner { start, current } => match tool {
            Tool::Circle => {
                ctx.begin_path();
                ctx.arc(start.x, start.y, distance(*start, *current), 0.0, 2.0 * PI)?;
                ctx.stroke();
            }
            _ => {
                let b = Bounds::from_corners(*start, *current);
                ctx.stroke_rect(b.min_x, b.min_y, b.width(), b.height());
            }
        },
        DrawingState::PointChain { points, preview } => {
            let mut path = points.clone();
            path.push(*preview);
            let flattened: Vec<Point> = if tool == Tool::Curve && path.len() >= 3 {
                curve::sample_path(&path).collect()
            } else {
                path
            };
            if let Some((first, rest)) = flattened.split_first() {
                ctx.begin_path();
                ctx.move_to(first.x, first.y);
                for p in rest {
                    ctx.line_to(p.x, p.y);
                }
                ctx.stroke();
            }

            // Committed points get small markers so the next click's
            // close-the-loop target is visible.
            clear_dash(ctx)?;
            let handle = HANDLE_RADIUS_PX / zoom * 0.5;
            ctx.set_fill_style_str("#fff");
            for p in points {
                ctx.fill_rect(p.x - handle / 2.0, p.y - handle / 2.0, handle, handle);
                ctx.stroke_rect(p.x - handle / 2.0, p.y - handle / 2.0, handle, handle);
            }
        }
    }

    clear_dash(ctx)?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Apply stroke color and line width from a shape style.
fn apply_stroke_style(ctx: &CanvasRenderingContext2d, style: &Style) {
    ctx.set_stroke_style_str(&style.stroke);
    ctx.set_line_width(style.stroke_width);
}

/// Dash pattern that stays a constant on-screen length regardless of zoom.
fn set_selection_dash(ctx: &CanvasRenderingContext2d, zoom: f64) -> Result<(), JsValue> {
    let dash_world = SELECTION_DASH_PX / zoom;
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash_world.into());
    dash_array.push(&dash_world.into());
    ctx.set_line_dash(&dash_array)
}

fn clear_dash(ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
    ctx.set_line_dash(&js_sys::Array::new())
}
