//! Media overlays: images and videos placed above the drawing.
//!
//! `MediaList` keeps items in paint order (last = top-most) and tracks the
//! single selected item. The geometry used by gestures (fitting a new item,
//! moving, corner resizing) is exposed as pure functions over [`Rect`] so it
//! can be tested in isolation; the list methods apply them to the selected
//! item and maintain the moving/resizing flags.
//!
//! Invariants:
//! - at most one item is selected;
//! - only the selected item may have `is_moving` or `is_resizing` set, and
//!   never both.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coords::{Point, Rect};
use crate::hit::Corner;

/// Unique identifier for a media item.
pub type MediaId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Whether a MIME type belongs to this kind (`image/*` or `video/*`).
    #[must_use]
    pub fn accepts_mime(self, mime: &str) -> bool {
        let prefix = match self {
            Self::Image => "image/",
            Self::Video => "video/",
        };
        mime.len() > prefix.len() && mime.to_ascii_lowercase().starts_with(prefix)
    }
}

/// Canvas dimensions in backing-store pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A placed image or video.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: MediaId,
    pub kind: MediaKind,
    pub rect: Rect,
    /// Natural width / natural height; locked for the item's lifetime.
    pub aspect: f64,
    pub natural_width: u32,
    pub natural_height: u32,
    pub is_moving: bool,
    pub is_resizing: bool,
    /// Video play state. Always false for images.
    pub playing: bool,
    /// Videos load muted.
    pub muted: bool,
    /// Audio volume in `[0, 1]`.
    pub volume: f64,
}

impl MediaItem {
    /// Geometric corner of the item's rectangle.
    #[must_use]
    pub fn corner_point(&self, corner: Corner) -> Point {
        let r = &self.rect;
        match corner {
            Corner::Nw => Point::new(r.x, r.y),
            Corner::Ne => Point::new(r.right(), r.y),
            Corner::Sw => Point::new(r.x, r.bottom()),
            Corner::Se => Point::new(r.right(), r.bottom()),
        }
    }

    /// Square hit zone of edge `size` centered on a corner.
    #[must_use]
    pub fn handle_rect(&self, corner: Corner, size: f64) -> Rect {
        Rect::centered_square(self.corner_point(corner), size)
    }
}

// =============================================================
// Geometry
// =============================================================

/// Size and center a new item of natural size `natural_w × natural_h`.
///
/// Scales down (never up) so the width is at most `max_fraction` of the canvas
/// width, then, if the height is still too large, so the height fits too.
#[must_use]
pub fn fit_insert(natural_w: f64, natural_h: f64, canvas: CanvasSize, max_fraction: f64) -> Rect {
    let aspect = natural_w / natural_h;
    let mut w = natural_w;
    let mut h = natural_h;
    let max_w = canvas.width * max_fraction;
    let max_h = canvas.height * max_fraction;
    if w > max_w {
        w = max_w;
        h = w / aspect;
    }
    if h > max_h {
        h = max_h;
        w = h * aspect;
    }
    Rect::new((canvas.width - w) * 0.5, (canvas.height - h) * 0.5, w, h)
}

/// Center the rectangle on `pointer`, keeping it fully inside the canvas.
#[must_use]
pub fn move_centered(rect: Rect, pointer: Point, canvas: CanvasSize) -> Rect {
    let x = (pointer.x - rect.width * 0.5).min(canvas.width - rect.width).max(0.0);
    let y = (pointer.y - rect.height * 0.5).min(canvas.height - rect.height).max(0.0);
    Rect { x, y, ..rect }
}

/// Resize by dragging `corner` to `pointer`, keeping `aspect` locked.
///
/// The opposite corner stays fixed. Width follows the pointer's horizontal
/// distance from the fixed edge and height is derived from it. The result is
/// floored at `min_side` on both axes and then clamped to the space left
/// between the fixed corner and the canvas edges. If that space is smaller
/// than the floor, the floor wins and the rectangle slides away from the
/// fixed corner to stay inside the canvas. The canvas bound always wins over
/// the floor when the canvas itself is smaller.
#[must_use]
pub fn resize_from_corner(
    rect: Rect,
    corner: Corner,
    pointer: Point,
    aspect: f64,
    canvas: CanvasSize,
    min_side: f64,
) -> Rect {
    let fixed_x = match corner {
        Corner::Nw | Corner::Sw => rect.right(),
        Corner::Ne | Corner::Se => rect.x,
    }
    .clamp(0.0, canvas.width);
    let fixed_y = match corner {
        Corner::Nw | Corner::Ne => rect.bottom(),
        Corner::Sw | Corner::Se => rect.y,
    }
    .clamp(0.0, canvas.height);
    let grows_left = matches!(corner, Corner::Nw | Corner::Sw);
    let grows_up = matches!(corner, Corner::Nw | Corner::Ne);

    let min_w = min_side.max(min_side * aspect);
    let raw_w = if grows_left { fixed_x - pointer.x } else { pointer.x - fixed_x };
    let mut w = raw_w.max(min_w);

    let room_w = if grows_left { fixed_x } else { canvas.width - fixed_x };
    let room_h = if grows_up { fixed_y } else { canvas.height - fixed_y };
    w = w.min(room_w);
    let mut h = w / aspect;
    if h > room_h {
        h = room_h;
        w = h * aspect;
    }

    if w < min_w {
        w = min_w.min(canvas.width);
        h = w / aspect;
        if h > canvas.height {
            h = canvas.height;
            w = h * aspect;
        }
    }

    let x = if grows_left { fixed_x - w } else { fixed_x };
    let y = if grows_up { fixed_y - h } else { fixed_y };
    Rect {
        x: x.min(canvas.width - w).max(0.0),
        y: y.min(canvas.height - h).max(0.0),
        width: w,
        height: h,
    }
}

// =============================================================
// MediaList
// =============================================================

/// Ordered media overlays plus the current selection.
#[derive(Debug, Default)]
pub struct MediaList {
    items: Vec<MediaItem>,
    selected: Option<MediaId>,
}

impl MediaList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit, center, append, and select a new item. Returns its id.
    pub fn insert(
        &mut self,
        kind: MediaKind,
        natural_width: u32,
        natural_height: u32,
        canvas: CanvasSize,
        max_fraction: f64,
    ) -> MediaId {
        let nw = f64::from(natural_width);
        let nh = f64::from(natural_height);
        let item = MediaItem {
            id: Uuid::new_v4(),
            kind,
            rect: fit_insert(nw, nh, canvas, max_fraction),
            aspect: nw / nh,
            natural_width,
            natural_height,
            is_moving: false,
            is_resizing: false,
            playing: false,
            muted: kind == MediaKind::Video,
            volume: 1.0,
        };
        let id = item.id;
        self.items.push(item);
        self.select(id);
        id
    }

    /// Items in paint order, bottom-most first.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &MediaId) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    fn get_mut(&mut self, id: &MediaId) -> Option<&mut MediaItem> {
        self.items.iter_mut().find(|item| item.id == *id)
    }

    #[must_use]
    pub fn selected(&self) -> Option<MediaId> {
        self.selected
    }

    #[must_use]
    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.selected.and_then(|id| self.get(&id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Select `id`, clearing gesture flags on every item. Returns false if
    /// `id` is unknown (selection is left unchanged).
    pub fn select(&mut self, id: MediaId) -> bool {
        if self.get(&id).is_none() {
            return false;
        }
        self.release();
        self.selected = Some(id);
        true
    }

    /// Clear the selection and any gesture flags.
    pub fn deselect(&mut self) {
        self.release();
        self.selected = None;
    }

    /// Mark the selected item as moving.
    pub fn begin_move(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(item) = self.get_mut(&id) else {
            return false;
        };
        item.is_moving = true;
        item.is_resizing = false;
        true
    }

    /// Mark the selected item as resizing.
    pub fn begin_resize(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(item) = self.get_mut(&id) else {
            return false;
        };
        item.is_resizing = true;
        item.is_moving = false;
        true
    }

    /// Move the selected item so its center follows `pointer`.
    pub fn move_selected(&mut self, pointer: Point, canvas: CanvasSize) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(item) = self.get_mut(&id) else {
            return false;
        };
        if !item.is_moving {
            return false;
        }
        item.rect = move_centered(item.rect, pointer, canvas);
        true
    }

    /// Resize the selected item from `corner` toward `pointer`.
    pub fn resize_selected(&mut self, corner: Corner, pointer: Point, canvas: CanvasSize, min_side: f64) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(item) = self.get_mut(&id) else {
            return false;
        };
        if !item.is_resizing {
            return false;
        }
        item.rect = resize_from_corner(item.rect, corner, pointer, item.aspect, canvas, min_side);
        true
    }

    /// Clear moving/resizing flags on every item. Selection is unchanged.
    pub fn release(&mut self) {
        for item in &mut self.items {
            item.is_moving = false;
            item.is_resizing = false;
        }
    }

    /// Flip a video's play state. Returns the new state, or `None` for images
    /// and unknown ids.
    pub fn toggle_playback(&mut self, id: &MediaId) -> Option<bool> {
        let item = self.video_mut(id)?;
        item.playing = !item.playing;
        Some(item.playing)
    }

    /// Set a video's muted flag. Returns false for images, unknown ids, and
    /// no-op changes.
    pub fn set_muted(&mut self, id: &MediaId, muted: bool) -> bool {
        let Some(item) = self.video_mut(id) else {
            return false;
        };
        if item.muted == muted {
            return false;
        }
        item.muted = muted;
        true
    }

    /// Set a video's volume, clamped to `[0, 1]`. Returns the stored value.
    pub fn set_volume(&mut self, id: &MediaId, volume: f64) -> Option<f64> {
        if !volume.is_finite() {
            return None;
        }
        let item = self.video_mut(id)?;
        item.volume = volume.clamp(0.0, 1.0);
        Some(item.volume)
    }

    fn video_mut(&mut self, id: &MediaId) -> Option<&mut MediaItem> {
        self.get_mut(id).filter(|item| item.kind == MediaKind::Video)
    }

    /// Whether any video is currently playing.
    #[must_use]
    pub fn any_playing(&self) -> bool {
        self.items.iter().any(|item| item.playing)
    }

    /// Move an item to the top of the paint order and select it.
    pub fn bring_to_front(&mut self, id: &MediaId) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == *id) else {
            return false;
        };
        let item = self.items.remove(index);
        self.items.push(item);
        self.select(*id)
    }

    /// Remove an item, dropping the selection if it was selected.
    pub fn remove(&mut self, id: &MediaId) -> Option<MediaItem> {
        let index = self.items.iter().position(|item| item.id == *id)?;
        if self.selected == Some(*id) {
            self.selected = None;
        }
        Some(self.items.remove(index))
    }

    /// Pull every item back inside `canvas`. Items larger than the canvas are
    /// scaled down with their aspect kept; the rest keep their size and slide.
    pub fn clamp_into(&mut self, canvas: CanvasSize) {
        for item in &mut self.items {
            let r = &mut item.rect;
            if r.width > canvas.width {
                r.width = canvas.width;
                r.height = r.width / item.aspect;
            }
            if r.height > canvas.height {
                r.height = canvas.height;
                r.width = r.height * item.aspect;
            }
            r.x = r.x.min(canvas.width - r.width).max(0.0);
            r.y = r.y.min(canvas.height - r.height).max(0.0);
        }
    }

    /// Remove all items and the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }
}
