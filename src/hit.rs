#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::coords::Point;
use crate::media::{MediaId, MediaList};

/// Which part of a media item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(Corner),
}

/// One of the four corner resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    /// Handle test order.
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se];

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub media_id: MediaId,
    pub part: HitPart,
}

/// Find the media item under `pt`, top-most first.
///
/// Only the selected item exposes resize handles, and its handles are tested
/// before its body. An unselected item stacked above the selected one still
/// wins over the selected item's handles.
#[must_use]
pub fn hit_test(pt: Point, media: &MediaList, handle_size: f64) -> Option<Hit> {
    let selected = media.selected();
    for item in media.items().iter().rev() {
        if selected == Some(item.id) {
            for corner in Corner::ALL {
                if item.handle_rect(corner, handle_size).contains(pt) {
                    return Some(Hit { media_id: item.id, part: HitPart::ResizeHandle(corner) });
                }
            }
        }
        if item.rect.contains(pt) {
            return Some(Hit { media_id: item.id, part: HitPart::Body });
        }
    }
    None
}

/// Cursor for a hover result when no gesture is active.
#[must_use]
pub fn hover_cursor(hit: Option<Hit>) -> &'static str {
    match hit.map(|h| h.part) {
        Some(HitPart::ResizeHandle(corner)) => corner.cursor(),
        Some(HitPart::Body) => "move",
        None => "crosshair",
    }
}
