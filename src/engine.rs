use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::CanvasConfig;
use crate::coords::{BoundingRect, Point};
use crate::decode::{DecodeToken, DecodeTracker};
use crate::error::{DecodeError, ExportError};
use crate::history::{HistoryStack, Snapshot};
use crate::hit::{self, HitPart};
use crate::input::{InputState, PointerInput};
use crate::media::{CanvasSize, MediaId, MediaKind, MediaList};
use crate::raster::{Color, PixelBuffer};
use crate::render::{self, MediaElement};
use crate::stroke::{BrushConfig, StrokeState, Tool};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RenderNeeded,
    SetCursor(String),
    MediaInserted { id: MediaId, token: DecodeToken },
    MediaRemoved { id: MediaId },
    PlaybackChanged { id: MediaId, playing: bool },
    AudioChanged { id: MediaId, muted: bool, volume: f64 },
    Seek { id: MediaId, seconds: f64 },
    DecodeFailed { token: DecodeToken, error: DecodeError },
    HistoryChanged { can_undo: bool, can_redo: bool },
}

/// Core engine state: everything that does not need the canvas element.
///
/// `Engine` wraps it with the browser side; this half is tested natively.
pub struct EngineCore {
    pub config: CanvasConfig,
    pub brush: BrushConfig,
    pub pixels: PixelBuffer,
    pub history: HistoryStack,
    pub media: MediaList,
    pub input: InputState,
    pub decodes: DecodeTracker,
    pub bounds: BoundingRect,
    cursor: String,
    last_decode_error: Option<DecodeError>,
}

impl EngineCore {
    /// A blank white canvas of `width × height` whose first history entry is
    /// the blank state.
    #[must_use]
    pub fn new(width: u32, height: u32, config: CanvasConfig) -> Self {
        let brush = BrushConfig {
            tool: Tool::Pen,
            color: config.default_color,
            size: config.clamp_brush_size(config.default_brush_size),
        };
        let pixels = PixelBuffer::blank(width, height);
        let history = HistoryStack::new(Snapshot { pixels: pixels.clone(), brush }, config.history_capacity);
        let bounds = BoundingRect::identity(f64::from(pixels.width()), f64::from(pixels.height()));
        Self {
            config,
            brush,
            pixels,
            history,
            media: MediaList::new(),
            input: InputState::default(),
            decodes: DecodeTracker::new(),
            bounds,
            cursor: hit::hover_cursor(None).to_owned(),
            last_decode_error: None,
        }
    }

    /// Actions that bring a freshly bound canvas in line with this state.
    #[must_use]
    pub fn initial_actions(&self) -> Vec<Action> {
        vec![Action::SetCursor(self.cursor.clone()), Action::RenderNeeded]
    }

    // --- Geometry ---

    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(f64::from(self.pixels.width()), f64::from(self.pixels.height()))
    }

    /// Record the canvas element's on-screen bounding rectangle.
    pub fn set_bounds(&mut self, bounds: BoundingRect) {
        self.bounds = bounds;
    }

    /// Map a client-space sample to canvas backing-store coordinates.
    #[must_use]
    pub fn to_canvas(&self, input: PointerInput) -> Point {
        let size = self.canvas_size();
        self.bounds.client_to_canvas(input.client, size.width, size.height)
    }

    // --- Brush ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.brush.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.brush.color = color;
    }

    /// Set the brush size, clamped to the configured range.
    pub fn set_brush_size(&mut self, size: f64) {
        self.brush.size = self.config.clamp_brush_size(size);
    }

    // --- Pointer input ---

    /// Start a gesture: resize from a handle, move or toggle media, or draw.
    pub fn on_pointer_down(&mut self, input: PointerInput) -> Vec<Action> {
        if !input.client.is_finite() {
            return Vec::new();
        }
        // A second press before release ends the first gesture.
        let mut actions = if self.input.is_idle() { Vec::new() } else { self.end_gesture() };
        let pt = self.to_canvas(input);

        match hit::hit_test(pt, &self.media, self.config.handle_size) {
            Some(found) => match found.part {
                HitPart::ResizeHandle(corner) => {
                    self.media.begin_resize();
                    self.input = InputState::Resizing { id: found.media_id, corner };
                    actions.extend(self.cursor_action(corner.cursor()));
                }
                HitPart::Body => {
                    let kind = self.media.get(&found.media_id).map(|item| item.kind);
                    if self.media.selected() == Some(found.media_id) && kind == Some(MediaKind::Video) {
                        actions.extend(self.toggle_playback(&found.media_id));
                        return actions;
                    }
                    self.media.select(found.media_id);
                    self.media.begin_move();
                    self.input = InputState::Moving { id: found.media_id };
                    actions.push(Action::RenderNeeded);
                    actions.extend(self.cursor_action("move"));
                }
            },
            None => {
                if self.media.selected().is_some() {
                    self.media.deselect();
                    actions.push(Action::RenderNeeded);
                }
                self.input = InputState::Drawing { stroke: StrokeState::begin(pt) };
            }
        }
        actions
    }

    /// Extend the active gesture, or update the hover cursor when idle.
    pub fn on_pointer_move(&mut self, input: PointerInput) -> Vec<Action> {
        if !input.client.is_finite() {
            return Vec::new();
        }
        let pt = self.to_canvas(input);
        if self.input.is_idle() {
            let cursor = hit::hover_cursor(hit::hit_test(pt, &self.media, self.config.handle_size));
            return self.cursor_action(cursor).into_iter().collect();
        }
        let canvas = self.canvas_size();

        match &mut self.input {
            InputState::Drawing { stroke } => {
                let points = stroke.advance(pt);
                if stroke.draw(&mut self.pixels, &points, &self.brush) {
                    return vec![Action::RenderNeeded];
                }
                Vec::new()
            }
            InputState::Moving { .. } => {
                if self.media.move_selected(pt, canvas) {
                    return vec![Action::RenderNeeded];
                }
                Vec::new()
            }
            InputState::Resizing { corner, .. } => {
                let corner = *corner;
                if self.media.resize_selected(corner, pt, canvas, self.config.min_media_side) {
                    return vec![Action::RenderNeeded];
                }
                Vec::new()
            }
            InputState::Idle => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// The pointer left the canvas. Ends the gesture like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// The platform cancelled the touch sequence.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let InputState::Drawing { mut stroke } = std::mem::take(&mut self.input) {
            if let Some(tail) = stroke.tail() {
                if stroke.draw(&mut self.pixels, &tail, &self.brush) {
                    actions.push(Action::RenderNeeded);
                }
            }
            if stroke.touched() {
                self.commit();
                actions.push(self.history_action());
            }
        }
        self.media.release();
        actions
    }

    /// Drop the active gesture without drawing or committing anything.
    fn abort_gesture(&mut self) {
        self.input = InputState::Idle;
        self.media.release();
    }

    fn cursor_action(&mut self, cursor: &str) -> Option<Action> {
        if self.cursor == cursor {
            return None;
        }
        cursor.clone_into(&mut self.cursor);
        Some(Action::SetCursor(self.cursor.clone()))
    }

    // --- History ---

    fn commit(&mut self) {
        self.history.commit(Snapshot { pixels: self.pixels.clone(), brush: self.brush });
    }

    fn history_action(&self) -> Action {
        Action::HistoryChanged { can_undo: self.history.can_undo(), can_redo: self.history.can_redo() }
    }

    /// Restore the previous snapshot and the brush that was active then.
    pub fn undo(&mut self) -> Vec<Action> {
        self.abort_gesture();
        let Some(snapshot) = self.history.undo() else {
            return Vec::new();
        };
        restore(&mut self.pixels, snapshot);
        self.brush = snapshot.brush;
        vec![Action::RenderNeeded, self.history_action()]
    }

    /// Re-apply the most recently undone snapshot. The brush is unchanged.
    pub fn redo(&mut self) -> Vec<Action> {
        self.abort_gesture();
        let Some(snapshot) = self.history.redo() else {
            return Vec::new();
        };
        restore(&mut self.pixels, snapshot);
        vec![Action::RenderNeeded, self.history_action()]
    }

    /// Wipe the drawing to white, remove all media, and cancel pending
    /// decodes. The cleared state is a new history entry.
    pub fn clear(&mut self) -> Vec<Action> {
        self.abort_gesture();
        self.pixels.fill(Color::WHITE);
        let mut actions: Vec<Action> =
            self.media.items().iter().map(|item| Action::MediaRemoved { id: item.id }).collect();
        self.media.clear();
        let cancelled = self.decodes.pending_len();
        self.decodes.cancel_all();
        self.commit();
        tracing::info!(removed = actions.len(), cancelled, "canvas cleared");
        actions.push(Action::RenderNeeded);
        actions.push(self.history_action());
        actions
    }

    // --- Media decoding ---

    /// Register an upload. Returns `None` if `mime` does not match `kind`.
    pub fn begin_decode(&mut self, kind: MediaKind, mime: &str) -> Option<DecodeToken> {
        self.decodes.begin(kind, mime)
    }

    /// A decode finished with the media's natural size. Inserts and selects
    /// the new item, unless the token is stale.
    pub fn complete_decode(&mut self, token: DecodeToken, width: u32, height: u32) -> Vec<Action> {
        let Some(kind) = self.decodes.finish(token) else {
            return Vec::new();
        };
        if width == 0 || height == 0 {
            return self.record_failure(token, DecodeError::EmptyDimensions { width, height });
        }
        let id = self.media.insert(kind, width, height, self.canvas_size(), self.config.insert_max_fraction);
        self.last_decode_error = None;
        tracing::info!(%id, ?kind, width, height, "media inserted");
        vec![Action::MediaInserted { id, token }, Action::RenderNeeded]
    }

    /// A decode failed. Stale failures are dropped.
    pub fn fail_decode(&mut self, token: DecodeToken, reason: &str) -> Vec<Action> {
        if self.decodes.finish(token).is_none() {
            return Vec::new();
        }
        self.record_failure(token, DecodeError::Load(reason.to_owned()))
    }

    pub fn cancel_decode(&mut self, token: DecodeToken) -> bool {
        self.decodes.cancel(token)
    }

    fn record_failure(&mut self, token: DecodeToken, error: DecodeError) -> Vec<Action> {
        tracing::warn!(id = token.id(), %error, "media decode failed");
        self.last_decode_error = Some(error.clone());
        vec![Action::DecodeFailed { token, error }]
    }

    /// The most recent decode failure since the last successful insert.
    #[must_use]
    pub fn last_decode_error(&self) -> Option<&DecodeError> {
        self.last_decode_error.as_ref()
    }

    // --- Media ordering ---

    pub fn bring_to_front(&mut self, id: &MediaId) -> Vec<Action> {
        if self.media.bring_to_front(id) {
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    pub fn delete_media(&mut self, id: &MediaId) -> Vec<Action> {
        if self.media.remove(id).is_none() {
            return Vec::new();
        }
        if matches!(self.input, InputState::Moving { id: active } | InputState::Resizing { id: active, .. } if active == *id)
        {
            self.abort_gesture();
        }
        tracing::debug!(%id, "media removed");
        vec![Action::MediaRemoved { id: *id }, Action::RenderNeeded]
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.media.selected() {
            Some(id) => self.delete_media(&id),
            None => Vec::new(),
        }
    }

    // --- Video ---

    /// Play or pause a video. Images and unknown ids are ignored.
    pub fn toggle_playback(&mut self, id: &MediaId) -> Vec<Action> {
        let Some(playing) = self.media.toggle_playback(id) else {
            return Vec::new();
        };
        tracing::debug!(%id, playing, "video playback toggled");
        vec![Action::PlaybackChanged { id: *id, playing }, Action::RenderNeeded]
    }

    pub fn set_muted(&mut self, id: &MediaId, muted: bool) -> Vec<Action> {
        if !self.media.set_muted(id, muted) {
            return Vec::new();
        }
        self.audio_action(id).into_iter().collect()
    }

    pub fn toggle_mute(&mut self, id: &MediaId) -> Vec<Action> {
        let Some(muted) = self.media.get(id).map(|item| !item.muted) else {
            return Vec::new();
        };
        self.set_muted(id, muted)
    }

    /// Set a video's volume, clamped to `[0, 1]`. Muting is left as is.
    pub fn set_volume(&mut self, id: &MediaId, volume: f64) -> Vec<Action> {
        if self.media.set_volume(id, volume).is_none() {
            return Vec::new();
        }
        self.audio_action(id).into_iter().collect()
    }

    /// Jump a video to `seconds` from its start. Negative times seek to the
    /// start; the element clamps past-the-end times to its duration.
    pub fn seek(&mut self, id: &MediaId, seconds: f64) -> Vec<Action> {
        if !seconds.is_finite() || self.media.get(id).is_none_or(|item| item.kind != MediaKind::Video) {
            return Vec::new();
        }
        vec![Action::Seek { id: *id, seconds: seconds.max(0.0) }, Action::RenderNeeded]
    }

    fn audio_action(&self, id: &MediaId) -> Option<Action> {
        let item = self.media.get(id)?;
        tracing::debug!(%id, muted = item.muted, volume = item.volume, "video audio changed");
        Some(Action::AudioChanged { id: *id, muted: item.muted, volume: item.volume })
    }

    // --- Canvas ---

    /// Resize the backing store, resampling the drawing to the new size.
    /// Media items keep their size and slide back inside where they fit.
    pub fn resize_canvas(&mut self, width: u32, height: u32) -> Vec<Action> {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.pixels.width() && height == self.pixels.height() {
            return Vec::new();
        }
        self.abort_gesture();
        self.pixels = self.pixels.resampled(width, height);
        self.media.clamp_into(self.canvas_size());
        tracing::info!(width, height, "canvas resized");
        vec![Action::RenderNeeded]
    }

    /// Encode the drawing layer as PNG.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the encoder fails.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        self.pixels.encode_png()
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<MediaId> {
        self.media.selected()
    }

    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn any_playing(&self) -> bool {
        self.media.any_playing()
    }
}

fn restore(pixels: &mut PixelBuffer, snapshot: &Snapshot) {
    let (w, h) = (pixels.width(), pixels.height());
    *pixels = snapshot.pixels.resampled(w, h);
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    elements: HashMap<MediaId, MediaElement>,
    staged: HashMap<DecodeToken, MediaElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    ///
    /// Without a 2D context the engine still tracks state but never paints.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: CanvasConfig) -> Self {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => Some(ctx),
                Err(_) => {
                    tracing::warn!("context is not a CanvasRenderingContext2d");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = ?err, "2d context unavailable");
                None
            }
        };
        let core = EngineCore::new(canvas.width(), canvas.height(), config);
        tracing::info!(width = canvas.width(), height = canvas.height(), has_context = ctx.is_some(), "engine created");
        Self { canvas, ctx, elements: HashMap::new(), staged: HashMap::new(), core }
    }

    /// Re-read the element's on-screen rectangle for pointer mapping.
    pub fn sync_bounds(&mut self) {
        let r = self.canvas.get_bounding_client_rect();
        self.core.set_bounds(BoundingRect { left: r.left(), top: r.top(), width: r.width(), height: r.height() });
    }

    /// Hold a browser element while its decode is in flight.
    pub fn stage_element(&mut self, token: DecodeToken, element: MediaElement) {
        self.staged.insert(token, element);
    }

    /// Carry out host-side effects for a batch of actions.
    pub fn apply(&mut self, actions: Vec<Action>) {
        let mut render = false;
        for action in actions {
            match action {
                Action::RenderNeeded => render = true,
                Action::SetCursor(cursor) => {
                    if let Err(err) = self.canvas.style().set_property("cursor", &cursor) {
                        tracing::warn!(error = ?err, "set cursor failed");
                    }
                }
                Action::MediaInserted { id, token } => {
                    if let Some(element) = self.staged.remove(&token) {
                        self.elements.insert(id, element);
                    }
                }
                Action::MediaRemoved { id } => {
                    if let Some(element) = self.elements.remove(&id) {
                        element.release();
                    }
                }
                Action::PlaybackChanged { id, playing } => {
                    if let Some(element) = self.elements.get(&id) {
                        element.set_playing(playing);
                    }
                }
                Action::AudioChanged { id, muted, volume } => {
                    if let Some(element) = self.elements.get(&id) {
                        element.set_audio(muted, volume);
                    }
                }
                Action::Seek { id, seconds } => {
                    if let Some(element) = self.elements.get(&id) {
                        element.seek(seconds);
                    }
                }
                Action::DecodeFailed { token, .. } => {
                    if let Some(element) = self.staged.remove(&token) {
                        element.release();
                    }
                }
                Action::HistoryChanged { .. } => {}
            }
        }
        // Anything still staged after a clear can never complete.
        self.staged.retain(|token, element| {
            let keep = self.core.decodes.is_pending(*token);
            if !keep {
                element.release();
            }
            keep
        });
        if render {
            self.render();
        }
    }

    /// Paint the current scene. No-op without a 2D context.
    pub fn render(&self) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        let ops = render::plan(&self.core);
        if let Err(err) = render::draw(ctx, &ops, &self.core.pixels, &self.elements) {
            tracing::warn!(error = ?err, "render failed");
        }
    }

    /// Resize the canvas element and the engine's backing store together.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width.max(1));
        self.canvas.set_height(height.max(1));
        let actions = self.core.resize_canvas(width, height);
        self.apply(actions);
        // Changing the element size wipes it, so always repaint.
        self.render();
    }
}
