use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, CanvasRenderingContext2d, HtmlCanvasElement, ImageBitmap};

use crate::consts::{DEFAULT_BACKGROUND_FILL, EXPORT_MIME};
use crate::hit;
use crate::input::{InputState, WheelDelta, first_touch};
use crate::render::{self, Scene};
use crate::surface::{Point, Surface};
use crate::transform::TransformState;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    /// The scene changed and should be repainted.
    RenderNeeded,
    /// The engine took the event; the host should suppress browser defaults
    /// (text selection, page scroll).
    ConsumeEvent,
    /// Push this value into the scale control.
    SyncScale(f64),
    /// Push this value into the rotation control.
    SyncRotation(f64),
}

/// Pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn of_bitmap(bitmap: &ImageBitmap) -> Self {
        Self { width: f64::from(bitmap.width()), height: f64::from(bitmap.height()) }
    }
}

/// Values the host mirrors into its control panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controls {
    pub scale: f64,
    pub rotation_deg: f64,
    pub mirrored: bool,
    pub background_color: String,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct EngineCore {
    pub transform: TransformState,
    pub input: InputState,
    pub surface: Surface,
    pub mirrored: bool,
    pub background_color: String,
    /// Photo slot. `None` until a decode finishes.
    pub background: Option<ImageSize>,
    /// Garment slot. `None` until a decode finishes.
    pub overlay: Option<ImageSize>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            transform: TransformState::default(),
            input: InputState::default(),
            surface: Surface::default(),
            mirrored: false,
            background_color: DEFAULT_BACKGROUND_FILL.to_owned(),
            background: None,
            overlay: None,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Viewport ---

    /// Update the displayed size and device pixel ratio.
    ///
    /// The overlay keeps its CSS-pixel position, so after a resize it may no
    /// longer sit over the same part of the photo.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.surface = Surface::new(width_css, height_css, dpr);
        vec![Action::RenderNeeded]
    }

    // --- Image slots ---

    pub fn set_background_image(&mut self, size: Option<ImageSize>) -> Vec<Action> {
        self.background = size;
        vec![Action::RenderNeeded]
    }

    /// Install a new garment and place it at the default anchor with an
    /// identity pose.
    pub fn set_overlay_image(&mut self, size: ImageSize) -> Vec<Action> {
        self.overlay = Some(size);
        self.transform.set_overlay(size.width, size.height, self.surface.default_anchor());
        self.input = InputState::Idle;
        vec![
            Action::SyncScale(self.transform.scale),
            Action::SyncRotation(self.transform.rotation_deg),
            Action::RenderNeeded,
        ]
    }

    /// Clear both images and return the overlay pose to defaults.
    pub fn reset(&mut self) -> Vec<Action> {
        self.background = None;
        self.overlay = None;
        self.transform.clear_overlay();
        self.input = InputState::Idle;
        vec![
            Action::SyncScale(self.transform.scale),
            Action::SyncRotation(self.transform.rotation_deg),
            Action::RenderNeeded,
        ]
    }

    // --- Controls ---

    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        let applied = self.transform.set_scale(scale);
        vec![Action::SyncScale(applied), Action::RenderNeeded]
    }

    pub fn set_rotation(&mut self, degrees: f64) -> Vec<Action> {
        let applied = self.transform.set_rotation(degrees);
        vec![Action::SyncRotation(applied), Action::RenderNeeded]
    }

    pub fn set_mirror(&mut self, mirrored: bool) -> Vec<Action> {
        self.mirrored = mirrored;
        vec![Action::RenderNeeded]
    }

    pub fn set_background_color(&mut self, color: String) -> Vec<Action> {
        self.background_color = color;
        vec![Action::RenderNeeded]
    }

    // --- Pointer input ---

    /// Start a drag if `screen_pt` lands on the overlay.
    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        if !self.hit(screen_pt) {
            return Vec::new();
        }
        let p = self.surface.mirror_point(screen_pt, self.mirrored);
        let grab_offset = Point::new(p.x - self.transform.center_x, p.y - self.transform.center_y);
        self.input = InputState::Dragging { grab_offset };
        vec![Action::ConsumeEvent]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Dragging { grab_offset } = self.input else {
            return Vec::new();
        };
        let p = self.surface.mirror_point(screen_pt, self.mirrored);
        self.transform.move_to(Point::new(p.x - grab_offset.x, p.y - grab_offset.y));
        vec![Action::RenderNeeded]
    }

    /// End any drag. Safe to call when nothing is being dragged.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        Vec::new()
    }

    /// The pointer left tracking (window blur, `pointercancel`).
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Touch input ---

    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        first_touch(touches).map_or_else(Vec::new, |pt| self.on_pointer_down(pt))
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        let Some(pt) = first_touch(touches) else {
            return Vec::new();
        };
        let mut actions = self.on_pointer_move(pt);
        if self.input.is_dragging() {
            actions.insert(0, Action::ConsumeEvent);
        }
        actions
    }

    pub fn on_touch_end(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Wheel ---

    /// Step the overlay scale by one notch. Ignored until an overlay is loaded.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        if self.overlay.is_none() {
            return Vec::new();
        }
        let Some(step) = delta.scale_step() else {
            return vec![Action::ConsumeEvent];
        };
        let applied = self.transform.nudge_scale(step);
        vec![Action::ConsumeEvent, Action::SyncScale(applied), Action::RenderNeeded]
    }

    // --- Queries ---

    /// Whether `screen_pt` (canvas-local CSS pixels) is on the overlay.
    #[must_use]
    pub fn hit(&self, screen_pt: Point) -> bool {
        hit::hit_test(screen_pt, &self.transform, &self.surface, self.mirrored, self.overlay.is_some())
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        Controls {
            scale: self.transform.scale,
            rotation_deg: self.transform.rotation_deg,
            mirrored: self.mirrored,
            background_color: self.background_color.clone(),
        }
    }
}

/// Decode an uploaded file into a bitmap the renderer can draw.
///
/// Until this resolves the caller's image slot stays empty and nothing is
/// drawn for it.
///
/// # Errors
///
/// Returns `Err` if there is no window or the browser cannot decode `blob`.
pub async fn decode_image(blob: &Blob) -> Result<ImageBitmap, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let promise = window.create_image_bitmap_with_blob(blob)?;
    let value = JsFuture::from(promise).await?;
    value.dyn_into::<ImageBitmap>().map_err(JsValue::from)
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    background: Option<ImageBitmap>,
    overlay: Option<ImageBitmap>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self { canvas, ctx, background: None, overlay: None, core: EngineCore::new() })
    }

    // --- Image slots ---

    pub fn set_background_image(&mut self, bitmap: ImageBitmap) -> Vec<Action> {
        let size = ImageSize::of_bitmap(&bitmap);
        if let Some(old) = self.background.replace(bitmap) {
            old.close();
        }
        self.core.set_background_image(Some(size))
    }

    pub fn set_overlay_image(&mut self, bitmap: ImageBitmap) -> Vec<Action> {
        let size = ImageSize::of_bitmap(&bitmap);
        if let Some(old) = self.overlay.replace(bitmap) {
            old.close();
        }
        self.core.set_overlay_image(size)
    }

    pub fn reset(&mut self) -> Vec<Action> {
        for bitmap in [self.background.take(), self.overlay.take()].into_iter().flatten() {
            bitmap.close();
        }
        self.core.reset()
    }

    // --- Delegated controls and input ---

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.core.set_viewport(width_css, height_css, dpr)
    }

    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        self.core.set_scale(scale)
    }

    pub fn set_rotation(&mut self, degrees: f64) -> Vec<Action> {
        self.core.set_rotation(degrees)
    }

    pub fn set_mirror(&mut self, mirrored: bool) -> Vec<Action> {
        self.core.set_mirror(mirrored)
    }

    pub fn set_background_color(&mut self, color: String) -> Vec<Action> {
        self.core.set_background_color(color)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.core.on_pointer_cancel()
    }

    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        self.core.on_touch_start(touches)
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        self.core.on_touch_move(touches)
    }

    pub fn on_touch_end(&mut self) -> Vec<Action> {
        self.core.on_touch_end()
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    // --- Render ---

    /// Match the backing store to the viewport, then draw the current state.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let surface = self.core.surface;
        if surface.needs_resize((self.canvas.width(), self.canvas.height())) {
            let (w, h) = surface.backing_size();
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
        let scene = Scene {
            background: self.background.as_ref(),
            overlay: self.overlay.as_ref(),
            transform: &self.core.transform,
            mirrored: self.core.mirrored,
            fill: &self.core.background_color,
        };
        render::draw(&self.ctx, &scene, &surface)
    }

    /// Repaint and encode the canvas as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if drawing fails or the canvas is tainted.
    pub fn export_png(&self) -> Result<String, JsValue> {
        self.render()?;
        self.canvas.to_data_url_with_type(EXPORT_MIME)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn controls(&self) -> Controls {
        self.core.controls()
    }

    #[must_use]
    pub fn hit(&self, screen_pt: Point) -> bool {
        self.core.hit(screen_pt)
    }
}
