//! Shared numeric constants for the sketchpad crate.

// ── Media overlays ──────────────────────────────────────────────

/// Edge length of a square corner resize handle, in canvas pixels.
pub const HANDLE_SIZE_PX: f64 = 12.0;

/// Smallest width or height a media item may be resized to.
pub const MIN_MEDIA_SIDE_PX: f64 = 50.0;

/// Largest fraction of the canvas a freshly inserted item may occupy per axis.
pub const INSERT_MAX_FRACTION: f64 = 0.8;

/// Selection border width in canvas pixels.
pub const SELECTION_BORDER_PX: f64 = 2.0;

/// Selection highlight color.
pub const SELECTION_COLOR: &str = "#0078D7";

// ── Brush ───────────────────────────────────────────────────────

pub const MIN_BRUSH_SIZE: f64 = 2.0;
pub const MAX_BRUSH_SIZE: f64 = 50.0;
pub const DEFAULT_BRUSH_SIZE: f64 = 2.0;

/// Line segments per quadratic curve when flattening a stroke segment.
pub const CURVE_STEPS: usize = 8;

// ── History ─────────────────────────────────────────────────────

/// Snapshots kept before the oldest is evicted.
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;
