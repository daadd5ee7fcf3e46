//! Rendering: draws the composed scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of the transform and image slots and produces
//! pixels; it never mutates engine state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, ImageBitmap};

use crate::consts::DEFAULT_BACKGROUND_FILL;
use crate::surface::Surface;
use crate::transform::TransformState;

/// Axis-aligned destination rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Fit an image over the whole surface, preserving aspect ratio and cropping
/// the overflow equally on both sides.
///
/// Returns `None` when either the image or the surface has no area.
#[must_use]
pub fn cover_rect(image_w: f64, image_h: f64, surface_w: f64, surface_h: f64) -> Option<DrawRect> {
    if image_w <= 0.0 || image_h <= 0.0 || surface_w <= 0.0 || surface_h <= 0.0 {
        return None;
    }
    let image_ar = image_w / image_h;
    let surface_ar = surface_w / surface_h;
    let (w, h) = if image_ar > surface_ar {
        (surface_h * image_ar, surface_h)
    } else {
        (surface_w, surface_w / image_ar)
    };
    Some(DrawRect { x: (surface_w - w) / 2.0, y: (surface_h - h) / 2.0, w, h })
}

/// Destination of the overlay in its own translated and rotated frame.
#[must_use]
pub fn overlay_rect(transform: &TransformState) -> DrawRect {
    let (w, h) = transform.draw_size();
    DrawRect { x: -w / 2.0, y: -h / 2.0, w, h }
}

/// Resolve the host's fill color, substituting the default for an empty string.
#[must_use]
pub fn fill_color(requested: &str) -> &str {
    let trimmed = requested.trim();
    if trimmed.is_empty() { DEFAULT_BACKGROUND_FILL } else { trimmed }
}

/// Read-only view of everything that gets painted.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub background: Option<&'a ImageBitmap>,
    pub overlay: Option<&'a ImageBitmap>,
    pub transform: &'a TransformState,
    pub mirrored: bool,
    pub fill: &'a str,
}

/// Draw the full scene: fill, photo, then overlay.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. a detached bitmap).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: &Scene<'_>, surface: &Surface) -> Result<(), JsValue> {
    let (backing_w, backing_h) = surface.backing_size();

    // Layer 0: wipe the backing store in device pixels.
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, f64::from(backing_w), f64::from(backing_h));

    // Everything below is in CSS pixels.
    ctx.set_transform(surface.dpr, 0.0, 0.0, surface.dpr, 0.0, 0.0)?;

    // Layer 1: solid fill.
    ctx.set_fill_style_str(fill_color(scene.fill));
    ctx.fill_rect(0.0, 0.0, surface.css_width, surface.css_height);

    // Layer 2: photo.
    if let Some(img) = scene.background {
        ctx.save();
        let result = draw_background(ctx, img, surface, scene.mirrored);
        ctx.restore();
        result?;
    }

    // Layer 3: overlay, in the same mirrored frame as the photo.
    if let Some(img) = scene.overlay {
        ctx.save();
        let result = draw_overlay(ctx, img, scene.transform, surface, scene.mirrored);
        ctx.restore();
        result?;
    }

    Ok(())
}

fn apply_mirror(ctx: &CanvasRenderingContext2d, surface: &Surface, mirrored: bool) -> Result<(), JsValue> {
    if mirrored {
        ctx.translate(surface.css_width, 0.0)?;
        ctx.scale(-1.0, 1.0)?;
    }
    Ok(())
}

fn draw_background(
    ctx: &CanvasRenderingContext2d,
    img: &ImageBitmap,
    surface: &Surface,
    mirrored: bool,
) -> Result<(), JsValue> {
    let Some(rect) = cover_rect(f64::from(img.width()), f64::from(img.height()), surface.css_width, surface.css_height)
    else {
        return Ok(());
    };
    apply_mirror(ctx, surface, mirrored)?;
    ctx.draw_image_with_image_bitmap_and_dw_and_dh(img, rect.x, rect.y, rect.w, rect.h)
}

fn draw_overlay(
    ctx: &CanvasRenderingContext2d,
    img: &ImageBitmap,
    transform: &TransformState,
    surface: &Surface,
    mirrored: bool,
) -> Result<(), JsValue> {
    let rect = overlay_rect(transform);
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return Ok(());
    }
    apply_mirror(ctx, surface, mirrored)?;
    ctx.translate(transform.center_x, transform.center_y)?;
    ctx.rotate(transform.rotation_rad())?;
    ctx.draw_image_with_image_bitmap_and_dw_and_dh(img, rect.x, rect.y, rect.w, rect.h)
}
