//! Shared numeric constants for the canvas crate.

// ── Overlay transform ───────────────────────────────────────────

/// Smallest scale the overlay can be shrunk to.
pub const SCALE_MIN: f64 = 0.1;

/// Largest scale the overlay can be grown to.
pub const SCALE_MAX: f64 = 3.0;

/// Scale change per wheel notch.
pub const WHEEL_SCALE_STEP: f64 = 0.05;

// ── Placement ───────────────────────────────────────────────────

/// Horizontal position of a freshly loaded overlay, as a fraction of surface width.
pub const ANCHOR_X_FRAC: f64 = 0.5;

/// Vertical position of a freshly loaded overlay, as a fraction of surface height.
/// Sits above center on the assumption of a portrait photo.
pub const ANCHOR_Y_FRAC: f64 = 0.35;

// ── Painting ────────────────────────────────────────────────────

/// Fill used behind the photo when the host supplies no color.
pub const DEFAULT_BACKGROUND_FILL: &str = "#111";

/// Suggested file name for the exported composite.
pub const EXPORT_FILE_NAME: &str = "virtual-fitting.png";

/// MIME type of the exported composite.
pub const EXPORT_MIME: &str = "image/png";
