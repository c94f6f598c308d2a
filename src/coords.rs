//! Coordinate mapping: points, rectangles, and client → canvas conversion.
//!
//! Pointer and touch events arrive in client (viewport) coordinates. The
//! canvas element may be laid out at a CSS size different from its backing
//! store, so conversion subtracts the element's bounding-rect origin and then
//! scales by `backing / css` on each axis.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

/// A point in either client or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point { x: (self.x + other.x) * 0.5, y: (self.y + other.y) * 0.5 }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square of edge `size` centered on `center`.
    #[must_use]
    pub fn centered_square(center: Point, size: f64) -> Self {
        let half = size * 0.5;
        Self { x: center.x - half, y: center.y - half, width: size, height: size }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Whether the rectangle lies entirely within `[0, width] × [0, height]`.
    #[must_use]
    pub fn is_within(&self, width: f64, height: f64) -> bool {
        const EPS: f64 = 1e-9;
        self.x >= -EPS && self.y >= -EPS && self.right() <= width + EPS && self.bottom() <= height + EPS
    }
}

/// The canvas element's bounding client rect, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    /// Bounding rect with no offset and CSS size equal to the backing size.
    #[must_use]
    pub fn identity(width: f64, height: f64) -> Self {
        Self { left: 0.0, top: 0.0, width, height }
    }

    /// Convert a client-space point to canvas-local backing-store coordinates.
    ///
    /// A zero or non-finite CSS extent maps with a scale of 1 on that axis.
    #[must_use]
    pub fn client_to_canvas(&self, client: Point, canvas_width: f64, canvas_height: f64) -> Point {
        let sx = axis_scale(canvas_width, self.width);
        let sy = axis_scale(canvas_height, self.height);
        Point { x: (client.x - self.left) * sx, y: (client.y - self.top) * sy }
    }
}

fn axis_scale(backing: f64, css: f64) -> f64 {
    if css > 0.0 && css.is_finite() && backing > 0.0 { backing / css } else { 1.0 }
}
