//! Overlay placement: where the garment sits on the photo and how it is
//! scaled and turned.
//!
//! Center coordinates are CSS pixels in the unmirrored frame. Rotation is
//! clockwise-positive degrees and is never normalized; the renderer and hit
//! tester only ever feed it through `sin`/`cos`, so 370° and 10° behave the
//! same.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::Serialize;

use crate::consts::{SCALE_MAX, SCALE_MIN};
use crate::surface::Point;

/// Clamp a requested overlay scale into the supported range.
///
/// Non-finite input falls back to 1.0, matching how an empty or garbled
/// slider value is treated.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_finite() { scale.clamp(SCALE_MIN, SCALE_MAX) } else { 1.0 }
}

/// Placement of the overlay image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformState {
    pub center_x: f64,
    pub center_y: f64,
    pub scale: f64,
    pub rotation_deg: f64,
    /// Decoded pixel width of the overlay. Only changed by [`Self::set_overlay`]
    /// and [`Self::clear_overlay`].
    pub intrinsic_width: f64,
    /// Decoded pixel height of the overlay.
    pub intrinsic_height: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self { center_x: 0.0, center_y: 0.0, scale: 1.0, rotation_deg: 0.0, intrinsic_width: 0.0, intrinsic_height: 0.0 }
    }
}

impl TransformState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a newly decoded overlay: record its size, reset scale and
    /// rotation, and move it to `anchor`.
    pub fn set_overlay(&mut self, width: f64, height: f64, anchor: Point) {
        self.intrinsic_width = width.max(0.0);
        self.intrinsic_height = height.max(0.0);
        self.reset_pose();
        self.center_x = anchor.x;
        self.center_y = anchor.y;
    }

    /// Forget the overlay's size. Position is left alone.
    pub fn clear_overlay(&mut self) {
        self.intrinsic_width = 0.0;
        self.intrinsic_height = 0.0;
        self.reset_pose();
    }

    /// Scale back to 1, rotation back to 0.
    pub fn reset_pose(&mut self) {
        self.scale = 1.0;
        self.rotation_deg = 0.0;
    }

    /// Set the scale, clamped. Returns the value actually applied.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.scale = clamp_scale(scale);
        self.scale
    }

    /// Add `delta` to the scale, clamped. Returns the value actually applied.
    pub fn nudge_scale(&mut self, delta: f64) -> f64 {
        self.set_scale(self.scale + delta)
    }

    /// Set the rotation in degrees. Non-finite input resets to 0.
    pub fn set_rotation(&mut self, degrees: f64) -> f64 {
        self.rotation_deg = if degrees.is_finite() { degrees } else { 0.0 };
        self.rotation_deg
    }

    /// Move the overlay center.
    pub fn move_to(&mut self, center: Point) {
        self.center_x = center.x;
        self.center_y = center.y;
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// On-screen size of the overlay in CSS pixels.
    #[must_use]
    pub fn draw_size(&self) -> (f64, f64) {
        (self.intrinsic_width * self.scale, self.intrinsic_height * self.scale)
    }

    #[must_use]
    pub fn rotation_rad(&self) -> f64 {
        self.rotation_deg.to_radians()
    }
}
