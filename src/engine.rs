//! Engine: the single dispatch point for pointer and keyboard events.
//!
//! [`EngineCore`] owns the full editing state — history (which owns the
//! live scene), camera, selection, gesture state, and in-progress drawing
//! state — and advances it synchronously per event. Handlers return
//! [`Action`]s for the host to process; nothing suspends mid-handler.
//!
//! [`Engine`] wraps the core with the browser canvas element and is the
//! only type the host JavaScript layer talks to. The core is separated so
//! every transition is testable without WASM or a browser.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::Camera;
use crate::consts::{HANDLE_RADIUS_PX, MIN_CIRCLE_RADIUS, MIN_RECT_SIZE, SNAP_RADIUS, ZOOM_STEP};
use crate::doc::{DocError, EditorConfig, PartialShape, Scene, Shape, ShapeId, ShapeKind};
use crate::geom::{distance, Bounds, Point};
use crate::history::History;
use crate::input::{Button, DrawingState, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::render;
use crate::{hit, snap};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Visible state changed; the host should schedule a repaint.
    RenderNeeded,
    /// A history snapshot was committed; the host may persist the scene.
    SceneCommitted,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub history: History,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub drawing: Option<DrawingState>,
    pub config: EditorConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            history: History::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::Idle,
            drawing: None,
            config: EditorConfig::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Hydrate the document from a host snapshot, resetting history to a
    /// single base snapshot and discarding selection and gesture state.
    pub fn load_snapshot(&mut self, scene: Scene) {
        log::debug!("loading scene snapshot: {} shapes", scene.len());
        self.history.reset(scene);
        self.ui.clear_selection();
        self.drawing = None;
        self.input = InputState::Idle;
    }

    /// Hydrate the document from the host's JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::SceneParse`] if the JSON is malformed; the
    /// current scene is kept.
    pub fn load_snapshot_json(&mut self, json: &str) -> Result<(), DocError> {
        let scene = Scene::from_json(json)?;
        self.load_snapshot(scene);
        Ok(())
    }

    /// Serialize the live scene losslessly for host persistence.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::SceneSerialize`] if serialization fails.
    pub fn scene_json(&self) -> Result<String, DocError> {
        self.history.scene().to_json()
    }

    /// Replace the editor configuration.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
    }

    /// Replace the editor configuration from host JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::ConfigParse`] if the JSON is malformed; the
    /// previous configuration is kept.
    pub fn set_config_json(&mut self, json: &str) -> Result<(), DocError> {
        self.config = EditorConfig::from_json(json)?;
        Ok(())
    }

    /// Set the active tool. Switching tools discards any in-progress
    /// drawing, like escape, without committing anything.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.ui.tool != tool {
            self.drawing = None;
            self.input = InputState::Idle;
            self.ui.tool = tool;
        }
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    /// Apply a sparse property update to one shape, routed through a
    /// history commit. A missing shape or a no-op update commits nothing.
    pub fn update_shape(&mut self, id: &ShapeId, partial: &PartialShape) -> Vec<Action> {
        let mut next = self.history.scene().clone();
        if !next.apply_partial(id, partial) {
            return Vec::new();
        }
        self.commit(next)
    }

    // --- Queries ---

    /// The live scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.history.scene()
    }

    /// The selected shape ids, in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        &self.ui.selected_ids
    }

    /// Whether an undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, mods: Modifiers) -> Vec<Action> {
        if button == Button::Middle {
            self.input = InputState::Panning { last_screen: screen };
            return Vec::new();
        }
        if button != Button::Primary {
            return Vec::new();
        }

        let world = self.camera.screen_to_world(screen);
        match self.ui.tool {
            Tool::Select => self.select_down(world, mods),
            Tool::Pen | Tool::Curve => self.chain_down(world, mods),
            Tool::Rect | Tool::Circle => self.corner_down(world),
            Tool::Eraser => {
                self.input = InputState::Erasing;
                self.erase_at(world)
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen: Point, mods: Modifiers) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen);
        match self.input {
            InputState::Panning { last_screen } => {
                self.camera.pan_x += screen.x - last_screen.x;
                self.camera.pan_y += screen.y - last_screen.y;
                self.input = InputState::Panning { last_screen: screen };
                vec![Action::RenderNeeded]
            }
            InputState::DraggingShapes { last_world, moved } => {
                let dx = world.x - last_world.x;
                let dy = world.y - last_world.y;
                if dx != 0.0 || dy != 0.0 {
                    let ids = self.ui.selected_ids.clone();
                    let scene = self.history.scene_mut();
                    for id in &ids {
                        if let Some(shape) = scene.get_mut(id) {
                            shape.translate(dx, dy);
                        }
                    }
                }
                self.input = InputState::DraggingShapes {
                    last_world: world,
                    moved: moved || dx != 0.0 || dy != 0.0,
                };
                vec![Action::RenderNeeded]
            }
            InputState::DraggingVertex { id, index, moved } => {
                let changed = self.history.scene_mut().get_mut(&id).is_some_and(|shape| {
                    let old = shape.vertices().get(index).copied();
                    shape.set_vertex(index, world) && old != Some(world)
                });
                self.input = InputState::DraggingVertex { id, index, moved: moved || changed };
                vec![Action::RenderNeeded]
            }
            InputState::Marquee { anchor, additive, .. } => {
                self.input = InputState::Marquee { anchor, current: world, additive };
                vec![Action::RenderNeeded]
            }
            InputState::Erasing => self.erase_at(world),
            InputState::Idle => self.update_drawing_preview(world, mods),
        }
    }

    pub fn on_pointer_up(&mut self, _screen: Point, _button: Button, _mods: Modifiers) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::DraggingShapes { moved: true, .. }
            | InputState::DraggingVertex { moved: true, .. } => {
                // One snapshot for the whole drag.
                let snapshot = self.history.scene().clone();
                self.commit(snapshot)
            }
            InputState::Marquee { anchor, current, additive } => {
                if !additive {
                    self.ui.clear_selection();
                }
                let marquee = Bounds::from_corners(anchor, current);
                let hits: Vec<ShapeId> = self
                    .history
                    .scene()
                    .iter()
                    .filter(|shape| hit::box_intersects(shape, &marquee))
                    .map(|shape| shape.id)
                    .collect();
                for id in hits {
                    self.ui.add(id);
                }
                vec![Action::RenderNeeded]
            }
            InputState::Idle
            | InputState::Panning { .. }
            | InputState::Erasing
            | InputState::DraggingShapes { .. }
            | InputState::DraggingVertex { .. } => Vec::new(),
        }
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, mods: Modifiers) -> Vec<Action> {
        if mods.command() {
            let factor = (-delta.dy * ZOOM_STEP).exp();
            self.camera.zoom_about(screen, factor);
        } else {
            self.camera.pan_x -= delta.dx;
            self.camera.pan_y -= delta.dy;
        }
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, mods: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "z" | "Z" if mods.command() => {
                if mods.shift {
                    self.redo()
                } else {
                    self.undo()
                }
            }
            "y" | "Y" if mods.command() => self.redo(),
            "Delete" | "Backspace" => self.delete_selection(),
            "Escape" => self.escape(),
            "Enter" => self.finish_drawing(),
            shortcut if !mods.command() => match Tool::from_shortcut(shortcut) {
                Some(tool) => {
                    self.set_tool(tool);
                    vec![Action::RenderNeeded]
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    // --- History ---

    /// Step history back one snapshot, filtering the selection against the
    /// restored scene.
    pub fn undo(&mut self) -> Vec<Action> {
        if self.history.undo() {
            self.ui.retain_existing(self.history.scene());
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Step history forward one snapshot.
    pub fn redo(&mut self) -> Vec<Action> {
        if self.history.redo() {
            self.ui.retain_existing(self.history.scene());
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    fn commit(&mut self, scene: Scene) -> Vec<Action> {
        self.history.commit(scene);
        self.ui.retain_existing(self.history.scene());
        vec![Action::RenderNeeded, Action::SceneCommitted]
    }

    // --- Select mode ---

    fn select_down(&mut self, world: Point, mods: Modifiers) -> Vec<Action> {
        let grab = self.camera.screen_dist_to_world(HANDLE_RADIUS_PX);
        if let Some((id, index)) =
            hit::hit_selected_vertex(self.history.scene(), &self.ui.selected_ids, world, grab)
        {
            self.input = InputState::DraggingVertex { id, index, moved: false };
            return vec![Action::RenderNeeded];
        }

        if let Some(id) = hit::hit_test(self.history.scene(), world) {
            if mods.additive() {
                self.ui.toggle(id);
                if !self.ui.is_selected(&id) {
                    // Toggled off: nothing left to drag from this shape.
                    return vec![Action::RenderNeeded];
                }
            } else if !self.ui.is_selected(&id) {
                // Clicking a member of a multi-selection keeps it intact so
                // the whole group can be dragged.
                self.ui.select_only(id);
            }
            self.input = InputState::DraggingShapes { last_world: world, moved: false };
            return vec![Action::RenderNeeded];
        }

        self.input = InputState::Marquee {
            anchor: world,
            current: world,
            additive: mods.additive(),
        };
        vec![Action::RenderNeeded]
    }

    // --- Pen / curve ---

    fn chain_down(&mut self, world: Point, mods: Modifiers) -> Vec<Action> {
        let p = self.chain_point(world, mods);

        let closes_loop = match &self.drawing {
            Some(DrawingState::PointChain { points, .. }) => {
                points.len() > 2
                    && points.first().is_some_and(|first| distance(p, *first) < SNAP_RADIUS)
            }
            _ => false,
        };
        if closes_loop {
            if let Some(DrawingState::PointChain { points, .. }) = self.drawing.take() {
                return self.finish_chain(points, true);
            }
        }

        match &mut self.drawing {
            Some(DrawingState::PointChain { points, preview }) => {
                points.push(p);
                *preview = p;
            }
            _ => {
                self.drawing = Some(DrawingState::PointChain { points: vec![p], preview: p });
            }
        }
        vec![Action::RenderNeeded]
    }

    /// Commit the accumulated chain as a polyline or curve, select it, and
    /// revert to the select tool.
    fn finish_chain(&mut self, points: Vec<Point>, closed: bool) -> Vec<Action> {
        let kind = match self.ui.tool {
            Tool::Curve => {
                // Curves carry no closed flag; closing loops the path back
                // through its start.
                let mut points = points;
                if closed {
                    if let Some(&first) = points.first() {
                        points.push(first);
                    }
                }
                ShapeKind::Curve { points, arrow: false }
            }
            _ => ShapeKind::Polyline { points, closed, arrow: false },
        };

        let shape = Shape::new(self.config.style(), kind);
        let id = shape.id;
        let mut next = self.history.scene().clone();
        next.push(shape);
        let actions = self.commit(next);
        self.drawing = None;
        self.ui.select_only(id);
        self.ui.tool = Tool::Select;
        actions
    }

    /// The next chain point: ortho-constrained against the last committed
    /// point while shift is held, snapped otherwise.
    fn chain_point(&self, world: Point, mods: Modifiers) -> Point {
        if mods.shift {
            if let Some(DrawingState::PointChain { points, .. }) = &self.drawing {
                if let Some(&last) = points.last() {
                    return snap::ortho_constrain(last, world);
                }
            }
        }
        if self.config.snapping {
            let committed: &[Point] = match &self.drawing {
                Some(DrawingState::PointChain { points, .. }) => points,
                _ => &[],
            };
            snap::snap_to_anchor(world, self.history.scene(), committed)
        } else {
            world
        }
    }

    // --- Rectangle / circle ---

    fn corner_down(&mut self, world: Point) -> Vec<Action> {
        let p = self.corner_point(world);
        let started = match &self.drawing {
            Some(DrawingState::TwoCorner { start, .. }) => Some(*start),
            _ => None,
        };
        match started {
            Some(start) => self.finish_two_corner(start, p),
            None => {
                self.drawing = Some(DrawingState::TwoCorner { start: p, current: p });
                vec![Action::RenderNeeded]
            }
        }
    }

    fn finish_two_corner(&mut self, start: Point, end: Point) -> Vec<Action> {
        let kind = match self.ui.tool {
            Tool::Rect => {
                let width = (end.x - start.x).abs();
                let height = (end.y - start.y).abs();
                if width < MIN_RECT_SIZE || height < MIN_RECT_SIZE {
                    return self.reject_too_small(end);
                }
                ShapeKind::Rect {
                    x: start.x.min(end.x),
                    y: start.y.min(end.y),
                    width,
                    height,
                }
            }
            Tool::Circle => {
                let radius = distance(start, end);
                if radius < MIN_CIRCLE_RADIUS {
                    return self.reject_too_small(end);
                }
                ShapeKind::Circle { cx: start.x, cy: start.y, radius }
            }
            _ => return Vec::new(),
        };

        let shape = Shape::new(self.config.style(), kind);
        let mut next = self.history.scene().clone();
        next.push(shape);
        let actions = self.commit(next);
        self.drawing = None;
        self.ui.tool = Tool::Select;
        actions
    }

    /// Below-minimum shapes are dropped silently: no shape, no snapshot,
    /// and the gesture stays alive for another attempt.
    fn reject_too_small(&mut self, end: Point) -> Vec<Action> {
        if let Some(DrawingState::TwoCorner { current, .. }) = &mut self.drawing {
            *current = end;
        }
        vec![Action::RenderNeeded]
    }

    /// The live second corner: anchor-snapped, and pulled onto existing
    /// rectangle edges when drawing a rectangle.
    fn corner_point(&self, world: Point) -> Point {
        if !self.config.snapping {
            return world;
        }
        let p = snap::snap_to_anchor(world, self.history.scene(), &[]);
        if self.ui.tool == Tool::Rect {
            snap::snap_rect_corner(p, self.history.scene())
        } else {
            p
        }
    }

    fn update_drawing_preview(&mut self, world: Point, mods: Modifiers) -> Vec<Action> {
        match &self.drawing {
            Some(DrawingState::PointChain { .. }) => {
                let p = self.chain_point(world, mods);
                if let Some(DrawingState::PointChain { preview, .. }) = &mut self.drawing {
                    *preview = p;
                }
                vec![Action::RenderNeeded]
            }
            Some(DrawingState::TwoCorner { .. }) => {
                let p = self.corner_point(world);
                if let Some(DrawingState::TwoCorner { current, .. }) = &mut self.drawing {
                    *current = p;
                }
                vec![Action::RenderNeeded]
            }
            None => Vec::new(),
        }
    }

    // --- Eraser ---

    fn erase_at(&mut self, world: Point) -> Vec<Action> {
        let Some(id) = hit::hit_test(self.history.scene(), world) else {
            return Vec::new();
        };
        let mut next = self.history.scene().clone();
        next.remove(&id);
        self.commit(next)
    }

    // --- Keyboard commands ---

    fn delete_selection(&mut self) -> Vec<Action> {
        if self.ui.selected_ids.is_empty() {
            return Vec::new();
        }
        let mut next = self.history.scene().clone();
        next.remove_many(&self.ui.selected_ids);
        let actions = self.commit(next);
        self.ui.clear_selection();
        actions
    }

    /// Escape cancels an in-progress drawing first; with none active it
    /// clears the selection.
    fn escape(&mut self) -> Vec<Action> {
        if self.drawing.take().is_some() {
            return vec![Action::RenderNeeded];
        }
        if self.ui.selected_ids.is_empty() {
            return Vec::new();
        }
        self.ui.clear_selection();
        vec![Action::RenderNeeded]
    }

    /// The finish command commits an open chain of at least two points;
    /// anything else ignores it.
    fn finish_drawing(&mut self) -> Vec<Action> {
        match self.drawing.take() {
            Some(DrawingState::PointChain { points, .. }) if points.len() >= 2 => {
                self.finish_chain(points, false)
            }
            other => {
                self.drawing = other;
                Vec::new()
            }
        }
    }
}

/// The full canvas engine. Wraps [`EngineCore`] and owns the browser
/// canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn load_snapshot(&mut self, scene: Scene) {
        self.core.load_snapshot(scene);
    }

    /// # Errors
    ///
    /// Returns [`DocError::SceneParse`] if the JSON is malformed.
    pub fn load_snapshot_json(&mut self, json: &str) -> Result<(), DocError> {
        self.core.load_snapshot_json(json)
    }

    /// # Errors
    ///
    /// Returns [`DocError::SceneSerialize`] if serialization fails.
    pub fn scene_json(&self) -> Result<String, DocError> {
        self.core.scene_json()
    }

    /// # Errors
    ///
    /// Returns [`DocError::ConfigParse`] if the JSON is malformed.
    pub fn set_config_json(&mut self, json: &str) -> Result<(), DocError> {
        self.core.set_config_json(json)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn update_shape(&mut self, id: &ShapeId, partial: &PartialShape) -> Vec<Action> {
        self.core.update_shape(id, partial)
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio, resizing the
    /// canvas backing store to match.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((width_css * dpr) as u32);
        self.canvas.set_height((height_css * dpr) as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or any `Canvas2D`
    /// call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        self.core.selection()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        self.core.scene()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.core.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.core.can_redo()
    }
}
