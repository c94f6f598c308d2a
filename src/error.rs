//! Error types for configuration, media decoding, and export.

/// Invalid or unparseable [`crate::config::CanvasConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("handle size must be positive, got {0}")]
    HandleSize(f64),
    #[error("minimum media side must be positive, got {0}")]
    MinMediaSide(f64),
    #[error("insert fraction must be in (0, 1], got {0}")]
    InsertFraction(f64),
    #[error("history capacity must be at least 2, got {0}")]
    HistoryCapacity(usize),
    #[error("invalid brush range: min {min}, max {max}")]
    BrushRange { min: f64, max: f64 },
    #[error("invalid color: {0}")]
    Color(String),
}

/// A media decode that completed without usable content.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("media failed to load: {0}")]
    Load(String),
    #[error("media reported empty dimensions {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
}

/// Failure while exporting the drawing.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("png encode failed: {0}")]
    Encode(#[from] image::ImageError),
}
