#![allow(clippy::float_cmp)]

use super::*;
use crate::surface::Point;

const EPSILON: f64 = 1e-9;

fn rect_approx_eq(a: DrawRect, b: DrawRect) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.w - b.w).abs() < EPSILON && (a.h - b.h).abs() < EPSILON
}

// =============================================================
// cover_rect
// =============================================================

#[test]
fn cover_same_aspect_fills_exactly() {
    let r = cover_rect(800.0, 600.0, 400.0, 300.0);
    let expected = DrawRect { x: 0.0, y: 0.0, w: 400.0, h: 300.0 };
    assert!(r.is_some_and(|r| rect_approx_eq(r, expected)), "{r:?}");
}

#[test]
fn cover_wide_image_crops_sides() {
    // 2:1 image on a 1:1 surface -> height matches, width overflows.
    let r = cover_rect(200.0, 100.0, 300.0, 300.0);
    let expected = DrawRect { x: -150.0, y: 0.0, w: 600.0, h: 300.0 };
    assert!(r.is_some_and(|r| rect_approx_eq(r, expected)), "{r:?}");
}

#[test]
fn cover_tall_image_crops_top_and_bottom() {
    // 1:2 image on a 1:1 surface -> width matches, height overflows.
    let r = cover_rect(100.0, 200.0, 300.0, 300.0);
    let expected = DrawRect { x: 0.0, y: -150.0, w: 300.0, h: 600.0 };
    assert!(r.is_some_and(|r| rect_approx_eq(r, expected)), "{r:?}");
}

#[test]
fn cover_always_covers_surface() {
    let cases = [(640.0, 480.0), (480.0, 640.0), (1.0, 1000.0), (1000.0, 1.0), (333.0, 333.0)];
    for (iw, ih) in cases {
        let r = cover_rect(iw, ih, 360.0, 640.0).unwrap();
        assert!(r.x <= EPSILON && r.y <= EPSILON, "{iw}x{ih}: {r:?}");
        assert!(r.x + r.w >= 360.0 - EPSILON && r.y + r.h >= 640.0 - EPSILON, "{iw}x{ih}: {r:?}");
        assert!(((r.w / r.h) - (iw / ih)).abs() < 1e-6, "aspect preserved");
    }
}

#[test]
fn cover_is_centered() {
    let r = cover_rect(1920.0, 1080.0, 360.0, 640.0).unwrap();
    assert!((r.x + r.w / 2.0 - 180.0).abs() < EPSILON);
    assert!((r.y + r.h / 2.0 - 320.0).abs() < EPSILON);
}

#[test]
fn cover_degenerate_inputs_are_none() {
    assert_eq!(cover_rect(0.0, 10.0, 100.0, 100.0), None);
    assert_eq!(cover_rect(10.0, 0.0, 100.0, 100.0), None);
    assert_eq!(cover_rect(10.0, 10.0, 0.0, 100.0), None);
    assert_eq!(cover_rect(10.0, 10.0, 100.0, 0.0), None);
}

// =============================================================
// overlay_rect
// =============================================================

#[test]
fn overlay_rect_is_centered_on_origin() {
    let mut t = TransformState::new();
    t.set_overlay(120.0, 80.0, Point::new(10.0, 10.0));
    t.set_scale(0.5);
    assert_eq!(overlay_rect(&t), DrawRect { x: -30.0, y: -20.0, w: 60.0, h: 40.0 });
}

#[test]
fn overlay_rect_ignores_rotation() {
    let mut t = TransformState::new();
    t.set_overlay(120.0, 80.0, Point::new(10.0, 10.0));
    let before = overlay_rect(&t);
    t.set_rotation(45.0);
    assert_eq!(overlay_rect(&t), before);
}

// =============================================================
// fill_color
// =============================================================

#[test]
fn fill_color_defaults_when_empty() {
    assert_eq!(fill_color(""), "#111");
    assert_eq!(fill_color("   "), "#111");
}

#[test]
fn fill_color_passes_through() {
    assert_eq!(fill_color("#ffeedd"), "#ffeedd");
}
