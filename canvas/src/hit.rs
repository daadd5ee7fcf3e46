#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::surface::{Point, Surface};
use crate::transform::TransformState;

/// Express `pt` (unmirrored CSS pixels) in the overlay's local frame: origin at
/// the overlay center, axes aligned with the unrotated image.
#[must_use]
pub fn to_overlay_local(pt: Point, transform: &TransformState) -> Point {
    let dx = pt.x - transform.center_x;
    let dy = pt.y - transform.center_y;
    let (sin, cos) = (-transform.rotation_rad()).sin_cos();
    Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Whether the screen point `pt` lands on the overlay's rotated bounding box.
///
/// `pt` is canvas-local CSS pixels as reported by the pointer event. When
/// `mirrored` is set the point is reflected first so it lines up with the
/// frame the overlay was drawn in. Edges count as inside.
#[must_use]
pub fn hit_test(pt: Point, transform: &TransformState, surface: &Surface, mirrored: bool, overlay_loaded: bool) -> bool {
    if !overlay_loaded {
        return false;
    }
    let local = to_overlay_local(surface.mirror_point(pt, mirrored), transform);
    let (w, h) = transform.draw_size();
    local.x.abs() <= w / 2.0 && local.y.abs() <= h / 2.0
}
