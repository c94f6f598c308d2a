//! Freehand stroke smoothing and the active brush.
//!
//! Raw pointer samples are smoothed with the midpoint technique: each new
//! sample closes a quadratic curve that starts where the previous curve ended
//! (the previous midpoint), bends through the last sample as its control
//! point, and ends halfway between the last and the new sample. The curve is
//! flattened into a short polyline and handed to [`PixelBuffer::stroke_polyline`].

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use serde::{Deserialize, Serialize};

use crate::consts::CURVE_STEPS;
use crate::coords::Point;
use crate::raster::{BlendMode, Color, PixelBuffer};

/// Which drawing tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

impl Tool {
    /// Compositing mode used when this tool touches the buffer.
    #[must_use]
    pub fn blend_mode(self) -> BlendMode {
        match self {
            Self::Pen => BlendMode::SourceOver,
            Self::Eraser => BlendMode::DestinationOut,
        }
    }

    /// Parse a tool name as sent by the host (`"pen"` / `"eraser"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pen" => Some(Self::Pen),
            "eraser" => Some(Self::Eraser),
            _ => None,
        }
    }
}

/// Tool, color, and width applied to each stroke segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    pub tool: Tool,
    pub color: Color,
    pub size: f64,
}

/// Per-stroke sampling state. Exists only while the pointer is down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeState {
    /// Most recent raw sample.
    last: Point,
    /// Where the previously emitted curve ended.
    anchor: Point,
    /// Whether any segment of this stroke changed pixels.
    touched: bool,
}

impl StrokeState {
    #[must_use]
    pub fn begin(start: Point) -> Self {
        Self { last: start, anchor: start, touched: false }
    }

    #[cfg(test)]
    #[must_use]
    pub fn last_point(&self) -> Point {
        self.last
    }

    #[must_use]
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// Accept a new sample and return the flattened curve to draw for it.
    pub fn advance(&mut self, next: Point) -> Vec<Point> {
        let mid = self.last.midpoint(next);
        let points = quadratic_points(self.anchor, self.last, mid, CURVE_STEPS);
        self.anchor = mid;
        self.last = next;
        points
    }

    /// The closing segment from the last midpoint to the last sample, if any.
    #[must_use]
    pub fn tail(&self) -> Option<[Point; 2]> {
        if self.anchor == self.last {
            None
        } else {
            Some([self.anchor, self.last])
        }
    }

    /// Draw `points` into `buffer` with the live brush and record the result.
    pub fn draw(&mut self, buffer: &mut PixelBuffer, points: &[Point], brush: &BrushConfig) -> bool {
        let touched = buffer.stroke_polyline(points, brush.size, brush.color, brush.tool.blend_mode());
        self.touched |= touched;
        touched
    }
}

/// Flatten the quadratic Bézier `p0 → ctrl → p1` into `steps + 1` points.
#[must_use]
pub fn quadratic_points(p0: Point, ctrl: Point, p1: Point, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let u = 1.0 - t;
            Point {
                x: u * u * p0.x + 2.0 * u * t * ctrl.x + t * t * p1.x,
                y: u * u * p0.y + 2.0 * u * t * ctrl.y + t * t * p1.y,
            }
        })
        .collect()
}
