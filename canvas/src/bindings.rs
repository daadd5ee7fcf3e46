//! JavaScript-facing surface of the engine.
//!
//! The host page wires DOM events to these methods. Each call applies the
//! event, repaints if the engine asked for it, and hands back the remaining
//! actions as JSON so the page can sync its sliders and suppress defaults.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use wasm_bindgen::prelude::*;
use web_sys::{Blob, HtmlCanvasElement, ImageBitmap};

use crate::engine::{self, Action, Engine};
use crate::input::WheelDelta;
use crate::surface::Point;

/// Split the actions the engine handles itself (repaint) from the ones the
/// host must act on. Returns whether a repaint was requested.
pub(crate) fn split_actions(actions: Vec<Action>) -> (bool, Vec<Action>) {
    let mut render = false;
    let mut host = Vec::with_capacity(actions.len());
    for action in actions {
        if action == Action::RenderNeeded {
            render = true;
        } else {
            host.push(action);
        }
    }
    (render, host)
}

/// Turn a flat `[x0, y0, x1, y1, ...]` list into touch points.
pub(crate) fn touch_points(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2).map(|xy| Point::new(xy[0], xy[1])).collect()
}

/// Decode an uploaded file. Resolve this before handing the bitmap to
/// [`FittingRoom::set_photo`] or [`FittingRoom::set_garment`].
///
/// # Errors
///
/// Rejects if the browser cannot decode the file.
#[wasm_bindgen(js_name = decodeImage)]
pub async fn decode_image(blob: Blob) -> Result<ImageBitmap, JsValue> {
    engine::decode_image(&blob).await
}

/// One compositing canvas.
#[wasm_bindgen]
pub struct FittingRoom {
    engine: Engine,
}

#[wasm_bindgen]
impl FittingRoom {
    /// # Errors
    ///
    /// Fails if the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<FittingRoom, JsValue> {
        Ok(Self { engine: Engine::new(canvas)? })
    }

    fn apply(&self, actions: Vec<Action>) -> Result<String, JsValue> {
        let (render, host) = split_actions(actions);
        if render {
            self.engine.render()?;
        }
        serde_json::to_string(&host).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Result<String, JsValue> {
        let actions = self.engine.set_viewport(width_css, height_css, dpr);
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = setPhoto)]
    pub fn set_photo(&mut self, bitmap: ImageBitmap) -> Result<String, JsValue> {
        let actions = self.engine.set_background_image(bitmap);
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = setGarment)]
    pub fn set_garment(&mut self, bitmap: ImageBitmap) -> Result<String, JsValue> {
        let actions = self.engine.set_overlay_image(bitmap);
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&mut self, scale: f64) -> Result<String, JsValue> {
        let actions = self.engine.set_scale(scale);
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = setRotation)]
    pub fn set_rotation(&mut self, degrees: f64) -> Result<String, JsValue> {
        let actions = self.engine.set_rotation(degrees);
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = setMirror)]
    pub fn set_mirror(&mut self, mirrored: bool) -> Result<String, JsValue> {
        let actions = self.engine.set_mirror(mirrored);
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = setBackgroundColor)]
    pub fn set_background_color(&mut self, color: String) -> Result<String, JsValue> {
        let actions = self.engine.set_background_color(color);
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    pub fn reset(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.reset();
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        let actions = self.engine.on_pointer_down(Point::new(x, y));
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        let actions = self.engine.on_pointer_move(Point::new(x, y));
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.on_pointer_up();
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.on_pointer_cancel();
        self.apply(actions)
    }

    /// `touches` is flattened `[x0, y0, x1, y1, ...]` in canvas-local CSS pixels.
    ///
    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, touches: Vec<f64>) -> Result<String, JsValue> {
        let actions = self.engine.on_touch_start(&touch_points(&touches));
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = touchMove)]
    pub fn touch_move(&mut self, touches: Vec<f64>) -> Result<String, JsValue> {
        let actions = self.engine.on_touch_move(&touch_points(&touches));
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.on_touch_end();
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    pub fn wheel(&mut self, dx: f64, dy: f64) -> Result<String, JsValue> {
        let actions = self.engine.on_wheel(WheelDelta { dx, dy });
        self.apply(actions)
    }

    /// # Errors
    ///
    /// Propagates render failures.
    pub fn render(&self) -> Result<(), JsValue> {
        self.engine.render()
    }

    /// PNG data URL of the composed canvas.
    ///
    /// # Errors
    ///
    /// Propagates render or encode failures.
    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(&self) -> Result<String, JsValue> {
        self.engine.export_png()
    }

    /// Suggested download name for [`Self::export_png`].
    #[wasm_bindgen(js_name = exportFileName)]
    #[must_use]
    pub fn export_file_name() -> String {
        crate::consts::EXPORT_FILE_NAME.to_owned()
    }

    /// Current control values as JSON.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn controls(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.controls()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
