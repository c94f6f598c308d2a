#![allow(clippy::float_cmp)]

use super::*;

fn brush(tool: Tool) -> BrushConfig {
    BrushConfig { tool, color: Color::BLACK, size: 4.0 }
}

// =============================================================
// Tool
// =============================================================

#[test]
fn pen_draws_source_over_eraser_punches_out() {
    assert_eq!(Tool::Pen.blend_mode(), BlendMode::SourceOver);
    assert_eq!(Tool::Eraser.blend_mode(), BlendMode::DestinationOut);
}

#[test]
fn tool_names_parse() {
    assert_eq!(Tool::from_name("pen"), Some(Tool::Pen));
    assert_eq!(Tool::from_name("eraser"), Some(Tool::Eraser));
    assert_eq!(Tool::from_name("marker"), None);
}

#[test]
fn tool_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Tool::Eraser).unwrap(), "\"eraser\"");
}

// =============================================================
// Curve flattening
// =============================================================

#[test]
fn quadratic_endpoints_are_exact() {
    let pts = quadratic_points(Point::new(0.0, 0.0), Point::new(5.0, 10.0), Point::new(10.0, 0.0), 4);
    assert_eq!(pts.len(), 5);
    assert_eq!(pts[0], Point::new(0.0, 0.0));
    assert_eq!(pts[4], Point::new(10.0, 0.0));
    // Peak of a symmetric quadratic is half the control height.
    assert_eq!(pts[2], Point::new(5.0, 5.0));
}

#[test]
fn quadratic_zero_steps_still_spans_endpoints() {
    let pts = quadratic_points(Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0), 0);
    assert_eq!(pts, vec![Point::new(1.0, 1.0), Point::new(3.0, 3.0)]);
}

// =============================================================
// StrokeState
// =============================================================

#[test]
fn advance_ends_at_midpoint_and_moves_last() {
    let mut s = StrokeState::begin(Point::new(0.0, 0.0));
    let pts = s.advance(Point::new(10.0, 0.0));
    assert_eq!(pts.first().copied(), Some(Point::new(0.0, 0.0)));
    assert_eq!(pts.last().copied(), Some(Point::new(5.0, 0.0)));
    assert_eq!(s.last_point(), Point::new(10.0, 0.0));
}

#[test]
fn successive_curves_are_continuous() {
    let mut s = StrokeState::begin(Point::new(0.0, 0.0));
    let a = s.advance(Point::new(10.0, 0.0));
    let b = s.advance(Point::new(10.0, 10.0));
    assert_eq!(a.last(), b.first());
    assert_eq!(b.last().copied(), Some(Point::new(10.0, 5.0)));
}

#[test]
fn tail_is_none_without_movement() {
    let s = StrokeState::begin(Point::new(3.0, 3.0));
    assert!(s.tail().is_none());
}

#[test]
fn tail_closes_to_last_sample() {
    let mut s = StrokeState::begin(Point::new(0.0, 0.0));
    s.advance(Point::new(10.0, 0.0));
    assert_eq!(s.tail(), Some([Point::new(5.0, 0.0), Point::new(10.0, 0.0)]));
}

#[test]
fn draw_records_touched() {
    let mut buf = PixelBuffer::blank(20, 20);
    let mut s = StrokeState::begin(Point::new(2.0, 10.0));
    assert!(!s.touched());
    let pts = s.advance(Point::new(18.0, 10.0));
    assert!(s.draw(&mut buf, &pts, &brush(Tool::Pen)));
    assert!(s.touched());
    assert_eq!(buf.pixel(6, 10), Some(Color::BLACK));
}

#[test]
fn draw_uses_live_brush_each_call() {
    let mut buf = PixelBuffer::blank(30, 30);
    let mut s = StrokeState::begin(Point::new(2.0, 5.0));
    let pts = s.advance(Point::new(28.0, 5.0));
    s.draw(&mut buf, &pts, &brush(Tool::Pen));
    let red = BrushConfig { tool: Tool::Pen, color: Color::rgba(255, 0, 0, 255), size: 4.0 };
    let pts = s.advance(Point::new(28.0, 25.0));
    s.draw(&mut buf, &pts, &red);
    assert_eq!(buf.pixel(8, 5), Some(Color::BLACK));
    assert_eq!(buf.pixel(28, 15), Some(Color::rgba(255, 0, 0, 255)));
}
