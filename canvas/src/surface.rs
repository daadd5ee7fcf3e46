#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::consts::{ANCHOR_X_FRAC, ANCHOR_Y_FRAC};

/// A point in canvas-local CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displayed size of the drawing surface plus the device pixel ratio.
///
/// All engine state is kept in CSS pixels. Only the renderer and the
/// backing-store resize ever look at `dpr`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub css_width: f64,
    pub css_height: f64,
    pub dpr: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self { css_width: 0.0, css_height: 0.0, dpr: 1.0 }
    }
}

impl Surface {
    /// Build a surface, falling back to a ratio of 1 when the browser reports
    /// something unusable.
    #[must_use]
    pub fn new(css_width: f64, css_height: f64, dpr: f64) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self { css_width: css_width.max(0.0), css_height: css_height.max(0.0), dpr }
    }

    /// Backing-store size in device pixels. Never smaller than 1x1.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.css_width * self.dpr).round().max(1.0);
        let h = (self.css_height * self.dpr).round().max(1.0);
        (w as u32, h as u32)
    }

    /// Whether a backing store of `current` size must be reallocated.
    #[must_use]
    pub fn needs_resize(&self, current: (u32, u32)) -> bool {
        self.backing_size() != current
    }

    /// Reflect `p` about the vertical midline when mirroring is on.
    ///
    /// Mirrored rendering draws everything through `translate(w, 0) scale(-1, 1)`,
    /// so this maps a pointer position back into the unmirrored frame. The
    /// reflection is its own inverse.
    #[must_use]
    pub fn mirror_point(&self, p: Point, mirrored: bool) -> Point {
        if mirrored { Point::new(self.css_width - p.x, p.y) } else { p }
    }

    /// Where a freshly loaded overlay is centered.
    #[must_use]
    pub fn default_anchor(&self) -> Point {
        Point::new(self.css_width * ANCHOR_X_FRAC, self.css_height * ANCHOR_Y_FRAC)
    }
}
