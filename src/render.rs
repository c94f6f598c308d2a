//! Rendering: paints the drawing layer, media overlays, and selection UI.
//!
//! [`plan`] turns engine state into an ordered list of [`DrawOp`]s without
//! touching the browser, so paint order can be tested natively. [`draw`] is
//! the only place that touches [`web_sys::CanvasRenderingContext2d`]; it does
//! not mutate any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::HashMap;

use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, HtmlVideoElement, ImageData, Url};

use crate::consts::{SELECTION_BORDER_PX, SELECTION_COLOR};
use crate::coords::Rect;
use crate::engine::EngineCore;
use crate::hit::Corner;
use crate::media::MediaId;
use crate::raster::PixelBuffer;

/// One paint step, in the order it must be executed.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Wipe the visible canvas.
    Clear { width: f64, height: f64 },
    /// Blit the drawing layer at the origin.
    Drawing,
    /// Paint a media element scaled into `rect`.
    Media { id: MediaId, rect: Rect },
    SelectionBorder(Rect),
    Handle(Rect),
}

/// A decoded browser element backing a media item.
#[derive(Debug, Clone)]
pub enum MediaElement {
    Image { element: HtmlImageElement, url: String },
    Video { element: HtmlVideoElement, url: String },
}

impl MediaElement {
    /// Start or pause a video. Images ignore this.
    pub fn set_playing(&self, playing: bool) {
        let Self::Video { element, .. } = self else {
            return;
        };
        if playing {
            if let Err(err) = element.play() {
                tracing::warn!(error = ?err, "video play failed");
            }
        } else if let Err(err) = element.pause() {
            tracing::warn!(error = ?err, "video pause failed");
        }
    }

    pub fn set_audio(&self, muted: bool, volume: f64) {
        if let Self::Video { element, .. } = self {
            element.set_muted(muted);
            element.set_volume(volume);
        }
    }

    pub fn seek(&self, seconds: f64) {
        if let Self::Video { element, .. } = self {
            element.set_current_time(seconds);
        }
    }

    /// Stop playback and revoke the object URL the element was loaded from.
    pub fn release(&self) {
        let url = match self {
            Self::Image { url, .. } => url,
            Self::Video { element, url } => {
                if let Err(err) = element.pause() {
                    tracing::warn!(error = ?err, "video pause failed");
                }
                url
            }
        };
        if let Err(err) = Url::revoke_object_url(url) {
            tracing::warn!(error = ?err, "revoke object url failed");
        }
    }
}

/// Paint order for the current state: clear, drawing, media bottom to top,
/// then the selection border and its four handles.
#[must_use]
pub fn plan(core: &EngineCore) -> Vec<DrawOp> {
    let size = core.canvas_size();
    let mut ops = vec![DrawOp::Clear { width: size.width, height: size.height }, DrawOp::Drawing];
    ops.extend(core.media.items().iter().map(|item| DrawOp::Media { id: item.id, rect: item.rect }));
    if let Some(item) = core.media.selected_item() {
        ops.push(DrawOp::SelectionBorder(item.rect));
        ops.extend(Corner::ALL.iter().map(|&corner| DrawOp::Handle(item.handle_rect(corner, core.config.handle_size))));
    }
    ops
}

/// Execute a paint plan.
///
/// Media without a bound element (still decoding in the host) is skipped.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    ops: &[DrawOp],
    pixels: &PixelBuffer,
    elements: &HashMap<MediaId, MediaElement>,
) -> Result<(), JsValue> {
    for op in ops {
        match op {
            DrawOp::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawOp::Drawing => {
                let data =
                    ImageData::new_with_u8_clamped_array_and_sh(Clamped(pixels.as_raw()), pixels.width(), pixels.height())?;
                ctx.put_image_data(&data, 0.0, 0.0)?;
            }
            DrawOp::Media { id, rect } => {
                if let Some(element) = elements.get(id) {
                    draw_media(ctx, element, rect)?;
                }
            }
            DrawOp::SelectionBorder(rect) => {
                ctx.save();
                ctx.set_stroke_style_str(SELECTION_COLOR);
                ctx.set_line_width(SELECTION_BORDER_PX);
                ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
                ctx.restore();
            }
            DrawOp::Handle(rect) => {
                ctx.save();
                ctx.set_fill_style_str(SELECTION_COLOR);
                ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
                ctx.restore();
            }
        }
    }
    Ok(())
}

fn draw_media(ctx: &CanvasRenderingContext2d, element: &MediaElement, rect: &Rect) -> Result<(), JsValue> {
    match element {
        MediaElement::Image { element, .. } => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(element, rect.x, rect.y, rect.width, rect.height)
        }
        MediaElement::Video { element, .. } => {
            ctx.draw_image_with_html_video_element_and_dw_and_dh(element, rect.x, rect.y, rect.width, rect.height)
        }
    }
}
