//! Software raster: the RGBA pixel buffer that strokes are drawn into.
//!
//! The base drawing layer is owned by Rust rather than by the browser canvas so
//! that history snapshots, undo round-trips, and eraser compositing can be
//! tested natively. The browser only ever receives finished pixels via
//! `putImageData`.
//!
//! Pixels are stored non-premultiplied. Two compositing modes are supported:
//! source-over for the pen, and destination-out for the eraser, which scales
//! destination alpha by `1 - coverage` and never paints a color.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use std::fmt;

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::coords::Point;
use crate::error::{ConfigError, ExportError};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    #[cfg(test)]
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    #[must_use]
    pub fn from_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let Ok(value) = u32::from_str_radix(hex, 16) else {
            return None;
        };
        match hex.len() {
            3 => {
                let nibble = |shift: u32| ((value >> shift) & 0xF) as u8 * 17;
                Some(Self::rgba(nibble(8), nibble(4), nibble(0), 255))
            }
            6 => Some(Self::rgba((value >> 16) as u8, (value >> 8) as u8, value as u8, 255)),
            8 => Some(Self::rgba((value >> 24) as u8, (value >> 16) as u8, (value >> 8) as u8, value as u8)),
            _ => None,
        }
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or(ConfigError::Color(value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// How stroke coverage combines with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Paint the source color over the destination.
    SourceOver,
    /// Punch through: reduce destination alpha by the source coverage.
    DestinationOut,
}

/// A full-canvas RGBA pixel buffer.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PixelBuffer {
    /// A buffer filled with `color`. Zero dimensions are raised to 1.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let image = RgbaImage::from_pixel(width.max(1), height.max(1), to_rgba(color));
        Self { image }
    }

    /// An opaque white buffer, the state of a fresh canvas.
    #[must_use]
    pub fn blank(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::WHITE)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Some(Color::rgba(r, g, b, a))
    }

    pub fn fill(&mut self, color: Color) {
        let px = to_rgba(color);
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    /// Rasterize a round-capped polyline of the given `width`.
    ///
    /// Each pixel is blended at most once per call, using its distance to the
    /// nearest segment for anti-aliased coverage. Returns whether any pixel
    /// received non-zero coverage.
    pub fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color, mode: BlendMode) -> bool {
        let Some(first) = points.first() else {
            return false;
        };
        let radius = (width * 0.5).max(0.5);
        let reach = radius + 1.0;

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let w = f64::from(self.width());
        let h = f64::from(self.height());
        let x0 = (min_x - reach).floor().max(0.0);
        let y0 = (min_y - reach).floor().max(0.0);
        let x1 = (max_x + reach).ceil().min(w - 1.0);
        let y1 = (max_y + reach).ceil().min(h - 1.0);
        if !(x0 <= x1 && y0 <= y1) {
            return false;
        }

        let mut touched = false;
        for py in (y0 as u32)..=(y1 as u32) {
            for px in (x0 as u32)..=(x1 as u32) {
                let cx = f64::from(px) + 0.5;
                let cy = f64::from(py) + 0.5;
                let dist = polyline_distance(points, cx, cy);
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                touched = true;
                let dst = self.image.get_pixel_mut(px, py);
                *dst = match mode {
                    BlendMode::SourceOver => source_over(*dst, color, coverage),
                    BlendMode::DestinationOut => destination_out(*dst, coverage),
                };
            }
        }
        touched
    }

    /// Resample to new dimensions. Lossy: detail is interpolated away.
    #[must_use]
    pub fn resampled(&self, width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.width() && height == self.height() {
            return self.clone();
        }
        Self { image: imageops::resize(&self.image, width, height, FilterType::Triangle) }
    }

    /// Encode the buffer as a PNG file.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Encode`] if the encoder rejects the buffer.
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(self.as_raw(), self.width(), self.height(), ColorType::Rgba8)?;
        Ok(out)
    }
}

fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn source_over(dst: Rgba<u8>, color: Color, coverage: f64) -> Rgba<u8> {
    let src_a = f64::from(color.a) / 255.0 * coverage;
    if src_a <= 0.0 {
        return dst;
    }
    let [dr, dg, db, da] = dst.0;
    let dst_a = f64::from(da) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mix = |s: u8, d: u8| {
        let s = f64::from(s) / 255.0;
        let d = f64::from(d) / 255.0;
        channel((s * src_a + d * dst_a * (1.0 - src_a)) / out_a)
    };
    Rgba([mix(color.r, dr), mix(color.g, dg), mix(color.b, db), channel(out_a)])
}

fn destination_out(dst: Rgba<u8>, coverage: f64) -> Rgba<u8> {
    let [r, g, b, a] = dst.0;
    let out_a = channel(f64::from(a) / 255.0 * (1.0 - coverage));
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    Rgba([r, g, b, out_a])
}

fn polyline_distance(points: &[Point], px: f64, py: f64) -> f64 {
    if let [only] = points {
        return (px - only.x).hypot(py - only.y);
    }
    points
        .windows(2)
        .map(|w| distance_to_segment(px, py, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

fn distance_to_segment(px: f64, py: f64, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < f64::EPSILON {
        return (px - a.x).hypot(py - a.y);
    }
    let t = (((px - a.x) * dx + (py - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    (px - (a.x + t * dx)).hypot(py - (a.y + t * dy))
}
