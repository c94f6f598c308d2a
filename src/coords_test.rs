#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Point
// =============================================================

#[test]
fn midpoint_is_halfway() {
    let m = Point::new(0.0, 10.0).midpoint(Point::new(20.0, 30.0));
    assert_eq!(m, Point::new(10.0, 20.0));
}

#[test]
fn non_finite_point_detected() {
    assert!(Point::new(1.0, 2.0).is_finite());
    assert!(!Point::new(f64::NAN, 2.0).is_finite());
    assert!(!Point::new(1.0, f64::INFINITY).is_finite());
}

// =============================================================
// Rect
// =============================================================

#[test]
fn rect_contains_is_inclusive() {
    let r = Rect::new(10.0, 10.0, 20.0, 20.0);
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(r.contains(Point::new(30.0, 30.0)));
    assert!(r.contains(Point::new(20.0, 15.0)));
    assert!(!r.contains(Point::new(30.1, 15.0)));
    assert!(!r.contains(Point::new(15.0, 9.9)));
}

#[test]
fn centered_square_straddles_center() {
    let r = Rect::centered_square(Point::new(100.0, 50.0), 12.0);
    assert_eq!(r, Rect::new(94.0, 44.0, 12.0, 12.0));
    assert_eq!(r.center(), Point::new(100.0, 50.0));
}

#[test]
fn is_within_checks_all_edges() {
    assert!(Rect::new(0.0, 0.0, 100.0, 100.0).is_within(100.0, 100.0));
    assert!(!Rect::new(-1.0, 0.0, 50.0, 50.0).is_within(100.0, 100.0));
    assert!(!Rect::new(60.0, 0.0, 50.0, 50.0).is_within(100.0, 100.0));
    assert!(!Rect::new(0.0, 60.0, 50.0, 50.0).is_within(100.0, 100.0));
}

// =============================================================
// BoundingRect
// =============================================================

#[test]
fn client_to_canvas_subtracts_offset() {
    let rect = BoundingRect { left: 40.0, top: 25.0, width: 800.0, height: 600.0 };
    let p = rect.client_to_canvas(Point::new(140.0, 125.0), 800.0, 600.0);
    assert_eq!(p, Point::new(100.0, 100.0));
}

#[test]
fn client_to_canvas_scales_css_to_backing() {
    // Backing store is twice the CSS size (e.g. high-DPI).
    let rect = BoundingRect { left: 0.0, top: 0.0, width: 500.0, height: 400.0 };
    let p = rect.client_to_canvas(Point::new(250.0, 100.0), 1000.0, 800.0);
    assert_eq!(p, Point::new(500.0, 200.0));
}

#[test]
fn client_to_canvas_zero_css_size_uses_unit_scale() {
    let rect = BoundingRect { left: 10.0, top: 10.0, width: 0.0, height: 0.0 };
    let p = rect.client_to_canvas(Point::new(30.0, 40.0), 1000.0, 800.0);
    assert_eq!(p, Point::new(20.0, 30.0));
}

#[test]
fn identity_rect_is_passthrough() {
    let rect = BoundingRect::identity(300.0, 200.0);
    let p = rect.client_to_canvas(Point::new(12.5, 7.0), 300.0, 200.0);
    assert_eq!(p, Point::new(12.5, 7.0));
}
