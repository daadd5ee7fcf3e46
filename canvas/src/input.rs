//! Input model: wheel deltas, touch points, and the drag state machine.
//!
//! Mouse and touch share one code path. A touch gesture is reduced to its
//! first active touch point; multi-finger pinch or twist is not recognised.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::WHEEL_SCALE_STEP;
use crate::surface::Point;

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels. Never scales the overlay; only
    /// vertical scroll does.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    /// Scale change for this notch: scrolling up grows the overlay, down
    /// shrinks it, and magnitude is ignored. Zero or NaN scroll yields `None`.
    #[must_use]
    pub fn scale_step(self) -> Option<f64> {
        if self.dy > 0.0 {
            Some(-WHEEL_SCALE_STEP)
        } else if self.dy < 0.0 {
            Some(WHEEL_SCALE_STEP)
        } else {
            None
        }
    }
}

/// Pick the point that drives a touch gesture.
#[must_use]
pub fn first_touch(touches: &[Point]) -> Option<Point> {
    touches.first().copied()
}

/// Drag state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The overlay is being moved.
    Dragging {
        /// Pointer minus overlay center at grab time, in the unmirrored frame.
        /// Keeps the grabbed spot under the pointer instead of snapping the
        /// center to it.
        grab_offset: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
