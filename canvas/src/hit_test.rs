use super::*;

const EPSILON: f64 = 1e-9;

fn surface() -> Surface {
    Surface::new(400.0, 600.0, 2.0)
}

/// A 100x40 overlay centered at (150, 200).
fn overlay() -> TransformState {
    let mut t = TransformState::new();
    t.set_overlay(100.0, 40.0, Point::new(150.0, 200.0));
    t
}

// =============================================================
// to_overlay_local
// =============================================================

#[test]
fn local_of_center_is_origin() {
    let mut t = overlay();
    t.set_rotation(73.0);
    let l = to_overlay_local(t.center(), &t);
    assert!(l.x.abs() < EPSILON && l.y.abs() < EPSILON);
}

#[test]
fn local_without_rotation_is_translation() {
    let t = overlay();
    let l = to_overlay_local(Point::new(160.0, 190.0), &t);
    assert!((l.x - 10.0).abs() < EPSILON);
    assert!((l.y + 10.0).abs() < EPSILON);
}

#[test]
fn local_undoes_clockwise_quarter_turn() {
    // Rotated 90° clockwise, the image's +x axis points down the screen.
    let mut t = overlay();
    t.set_rotation(90.0);
    let l = to_overlay_local(Point::new(150.0, 230.0), &t);
    assert!((l.x - 30.0).abs() < EPSILON, "x = {}", l.x);
    assert!(l.y.abs() < EPSILON, "y = {}", l.y);
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn miss_without_overlay() {
    let t = overlay();
    assert!(!hit_test(t.center(), &t, &surface(), false, false));
}

#[test]
fn hit_at_center_for_any_rotation() {
    let mut t = overlay();
    for deg in [-720.0, -135.0, 0.0, 33.3, 90.0, 180.0, 359.0, 1000.0] {
        t.set_rotation(deg);
        assert!(hit_test(t.center(), &t, &surface(), false, true), "rotation {deg}");
    }
}

#[test]
fn hit_inside_and_miss_outside_unrotated() {
    let t = overlay();
    let s = surface();
    assert!(hit_test(Point::new(195.0, 215.0), &t, &s, false, true));
    assert!(!hit_test(Point::new(205.0, 200.0), &t, &s, false, true));
    assert!(!hit_test(Point::new(150.0, 225.0), &t, &s, false, true));
}

#[test]
fn edges_are_inclusive() {
    let t = overlay();
    let s = surface();
    assert!(hit_test(Point::new(200.0, 220.0), &t, &s, false, true));
    assert!(hit_test(Point::new(100.0, 180.0), &t, &s, false, true));
}

#[test]
fn rotation_swaps_extent() {
    let mut t = overlay();
    let s = surface();
    // Wide overlay: (150, 240) is outside vertically until it is turned 90°.
    assert!(!hit_test(Point::new(150.0, 240.0), &t, &s, false, true));
    t.set_rotation(90.0);
    assert!(hit_test(Point::new(150.0, 240.0), &t, &s, false, true));
    assert!(!hit_test(Point::new(190.0, 200.0), &t, &s, false, true));
}

#[test]
fn scale_grows_hit_area() {
    let mut t = overlay();
    let s = surface();
    let p = Point::new(220.0, 200.0);
    assert!(!hit_test(p, &t, &s, false, true));
    t.set_scale(2.0);
    assert!(hit_test(p, &t, &s, false, true));
}

#[test]
fn mirror_reflects_pointer() {
    let t = overlay();
    let s = surface();
    // Overlay drawn at x=150 in the mirrored frame shows up at 400-150 = 250 on screen.
    assert!(hit_test(Point::new(250.0, 200.0), &t, &s, true, true));
    assert!(!hit_test(Point::new(150.0, 200.0), &t, &s, true, true));
}

#[test]
fn mirror_off_again_restores_results() {
    let mut t = overlay();
    t.set_rotation(30.0);
    let s = surface();
    let probes = [
        Point::new(150.0, 200.0),
        Point::new(190.0, 230.0),
        Point::new(250.0, 200.0),
        Point::new(110.0, 170.0),
        Point::new(0.0, 0.0),
    ];
    let before: Vec<bool> = probes.iter().map(|p| hit_test(*p, &t, &s, false, true)).collect();
    let _mirrored: Vec<bool> = probes.iter().map(|p| hit_test(*p, &t, &s, true, true)).collect();
    let after: Vec<bool> = probes.iter().map(|p| hit_test(*p, &t, &s, false, true)).collect();
    assert_eq!(before, after);
}

#[test]
fn zero_sized_overlay_only_hits_center() {
    let mut t = overlay();
    t.set_overlay(0.0, 0.0, Point::new(50.0, 50.0));
    let s = surface();
    assert!(hit_test(Point::new(50.0, 50.0), &t, &s, false, true));
    assert!(!hit_test(Point::new(50.5, 50.0), &t, &s, false, true));
}
