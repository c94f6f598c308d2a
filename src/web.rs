//! Browser facade exported to JavaScript.
//!
//! `Sketchpad` binds an [`Engine`] to a `<canvas>` element, wires mouse and
//! touch listeners, decodes uploaded files through `HtmlImageElement` /
//! `HtmlVideoElement`, and keeps a `requestAnimationFrame` loop alive while
//! any video plays. The host page only calls the imperative methods.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, File, HtmlCanvasElement, HtmlImageElement, HtmlVideoElement, MouseEvent, TouchEvent, Url};

use crate::config::CanvasConfig;
use crate::decode::DecodeToken;
use crate::engine::{Action, Engine, EngineCore};
use crate::input::PointerInput;
use crate::media::{MediaId, MediaKind};
use crate::raster::Color;
use crate::render::MediaElement;
use crate::stroke::Tool;

struct Shared {
    engine: RefCell<Engine>,
    frame_pending: Cell<bool>,
}

/// Run `f` against the core, apply its actions, and keep the video loop going.
fn run(shared: &Rc<Shared>, f: impl FnOnce(&mut EngineCore) -> Vec<Action>) {
    {
        let mut engine = shared.engine.borrow_mut();
        let actions = f(&mut engine.core);
        engine.apply(actions);
    }
    schedule_frame(shared);
}

/// Run `f` against the selected item, if any.
fn run_selected(shared: &Rc<Shared>, f: impl FnOnce(&mut EngineCore, &MediaId) -> Vec<Action>) {
    run(shared, |core| match core.selection() {
        Some(id) => f(core, &id),
        None => Vec::new(),
    });
}

fn run_pointer(shared: &Rc<Shared>, f: impl FnOnce(&mut EngineCore) -> Vec<Action>) {
    shared.engine.borrow_mut().sync_bounds();
    run(shared, f);
}

fn schedule_frame(shared: &Rc<Shared>) {
    if shared.frame_pending.get() || !shared.engine.borrow().core.any_playing() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    shared.frame_pending.set(true);
    let next = Rc::clone(shared);
    let callback = Closure::once_into_js(move || {
        next.frame_pending.set(false);
        next.engine.borrow().render();
        schedule_frame(&next);
    });
    if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
        shared.frame_pending.set(false);
        tracing::warn!(error = ?err, "requestAnimationFrame failed");
    }
}

fn listen(canvas: &HtmlCanvasElement, name: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn mouse_input(event: &Event) -> Option<PointerInput> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(PointerInput::mouse(f64::from(mouse.client_x()), f64::from(mouse.client_y())))
}

/// First active touch; touch events never scroll the page while drawing.
fn touch_input(event: &Event) -> Option<PointerInput> {
    let touch_event = event.dyn_ref::<TouchEvent>()?;
    event.prevent_default();
    let touch = touch_event.touches().get(0)?;
    Some(PointerInput::touch(f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct Sketchpad {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl Sketchpad {
    /// Bind to `canvas` with an optional JSON config and attach input listeners.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or a listener cannot be added.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<Sketchpad, JsValue> {
        console_error_panic_hook::set_once();
        // A second Sketchpad on the page finds the logger already installed.
        if let Err(err) = console_log::init_with_level(log::Level::Debug) {
            tracing::debug!(%err, "console logger already installed");
        }
        let config = CanvasConfig::from_json(config_json.as_deref().unwrap_or("")).map_err(to_js)?;
        let engine = Engine::new(canvas.clone(), config);
        let shared = Rc::new(Shared { engine: RefCell::new(engine), frame_pending: Cell::new(false) });
        attach(&canvas, &shared)?;
        {
            let mut engine = shared.engine.borrow_mut();
            let actions = engine.core.initial_actions();
            engine.apply(actions);
        }
        Ok(Self { shared })
    }

    pub fn undo(&self) {
        run(&self.shared, EngineCore::undo);
    }

    pub fn redo(&self) {
        run(&self.shared, EngineCore::redo);
    }

    pub fn clear(&self) {
        run(&self.shared, EngineCore::clear);
    }

    /// # Errors
    ///
    /// Returns an error for names other than `pen` and `eraser`.
    pub fn set_tool(&self, name: &str) -> Result<(), JsValue> {
        let tool = Tool::from_name(name).ok_or_else(|| JsValue::from_str(&format!("unknown tool: {name}")))?;
        self.shared.engine.borrow_mut().core.set_tool(tool);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if `hex` is not `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    pub fn set_color(&self, hex: &str) -> Result<(), JsValue> {
        let color = Color::from_hex(hex).ok_or_else(|| JsValue::from_str(&format!("invalid color: {hex}")))?;
        self.shared.engine.borrow_mut().core.set_color(color);
        Ok(())
    }

    pub fn set_brush_size(&self, size: f64) {
        self.shared.engine.borrow_mut().core.set_brush_size(size);
    }

    /// Raise the selected item to the top of the paint order.
    pub fn bring_to_front(&self) {
        run_selected(&self.shared, EngineCore::bring_to_front);
    }

    pub fn delete_selected(&self) {
        run(&self.shared, EngineCore::delete_selected);
    }

    /// Play or pause the selected video.
    pub fn toggle_selected_playback(&self) {
        run_selected(&self.shared, EngineCore::toggle_playback);
    }

    pub fn toggle_selected_mute(&self) {
        run_selected(&self.shared, EngineCore::toggle_mute);
    }

    pub fn set_selected_muted(&self, muted: bool) {
        run_selected(&self.shared, |core, id| core.set_muted(id, muted));
    }

    /// Set the selected video's volume in `[0, 1]`.
    pub fn set_selected_volume(&self, volume: f64) {
        run_selected(&self.shared, |core, id| core.set_volume(id, volume));
    }

    /// Jump the selected video to `seconds`.
    pub fn seek_selected(&self, seconds: f64) {
        run_selected(&self.shared, |core, id| core.seek(id, seconds));
    }

    /// Resize the canvas backing store, e.g. after the window resizes.
    pub fn resize(&self, width: u32, height: u32) {
        self.shared.engine.borrow_mut().resize(width, height);
    }

    /// The drawing layer as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.shared.engine.borrow().core.export_png().map_err(to_js)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.shared.engine.borrow().core.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.shared.engine.borrow().core.can_redo()
    }

    /// Message for the latest failed upload, if any.
    #[must_use]
    pub fn last_decode_error(&self) -> Option<String> {
        self.shared.engine.borrow().core.last_decode_error().map(ToString::to_string)
    }

    /// Decode an image file and place it on the canvas. Non-image files are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the object URL or element cannot be created.
    pub fn handle_image_upload(&self, file: &File) -> Result<(), JsValue> {
        self.upload(MediaKind::Image, file, load_image)
    }

    /// Load a video file's metadata and place it on the canvas, paused.
    /// Non-video files are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the object URL or element cannot be created.
    pub fn handle_video_upload(&self, file: &File) -> Result<(), JsValue> {
        self.upload(MediaKind::Video, file, load_video)
    }

    /// Repaint the whole scene.
    pub fn render(&self) {
        self.shared.engine.borrow().render();
    }
}

impl Sketchpad {
    fn upload(
        &self,
        kind: MediaKind,
        file: &File,
        load: fn(&Rc<Shared>, DecodeToken, &File) -> Result<(), JsValue>,
    ) -> Result<(), JsValue> {
        let Some(token) = self.shared.engine.borrow_mut().core.begin_decode(kind, &file.type_()) else {
            return Ok(());
        };
        let loaded = load(&self.shared, token, file);
        if loaded.is_err() {
            self.shared.engine.borrow_mut().core.cancel_decode(token);
        }
        loaded
    }
}

fn load_image(shared: &Rc<Shared>, token: DecodeToken, file: &File) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    let url = Url::create_object_url_with_blob(file)?;

    let onload = {
        let shared = Rc::clone(shared);
        let image = image.clone();
        Closure::once_into_js(move || {
            let (w, h) = (image.natural_width(), image.natural_height());
            run(&shared, |core| core.complete_decode(token, w, h));
        })
    };
    let onerror = {
        let shared = Rc::clone(shared);
        Closure::once_into_js(move || run(&shared, |core| core.fail_decode(token, "image could not be decoded")))
    };
    image.set_onload(Some(onload.unchecked_ref()));
    image.set_onerror(Some(onerror.unchecked_ref()));

    shared
        .engine
        .borrow_mut()
        .stage_element(token, MediaElement::Image { element: image.clone(), url: url.clone() });
    image.set_src(&url);
    Ok(())
}

fn load_video(shared: &Rc<Shared>, token: DecodeToken, file: &File) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let video: HtmlVideoElement = document.create_element("video")?.dyn_into()?;
    let url = Url::create_object_url_with_blob(file)?;
    video.set_muted(true);
    video.set_loop(true);
    video.set_preload("auto");

    let onmetadata = {
        let shared = Rc::clone(shared);
        let video = video.clone();
        Closure::once_into_js(move || {
            let (w, h) = (video.video_width(), video.video_height());
            run(&shared, |core| core.complete_decode(token, w, h));
        })
    };
    // The first frame arrives after metadata; repaint so it shows while paused.
    let ondata = {
        let shared = Rc::clone(shared);
        Closure::once_into_js(move || {
            shared.engine.borrow().render();
        })
    };
    let onerror = {
        let shared = Rc::clone(shared);
        Closure::once_into_js(move || run(&shared, |core| core.fail_decode(token, "video could not be loaded")))
    };
    video.set_onloadedmetadata(Some(onmetadata.unchecked_ref()));
    video.set_onloadeddata(Some(ondata.unchecked_ref()));
    video.set_onerror(Some(onerror.unchecked_ref()));

    shared
        .engine
        .borrow_mut()
        .stage_element(token, MediaElement::Video { element: video.clone(), url: url.clone() });
    video.set_src(&url);
    Ok(())
}

fn attach(canvas: &HtmlCanvasElement, shared: &Rc<Shared>) -> Result<(), JsValue> {
    let s = Rc::clone(shared);
    listen(canvas, "mousedown", move |event| {
        if let Some(input) = mouse_input(&event) {
            run_pointer(&s, |core| core.on_pointer_down(input));
        }
    })?;
    let s = Rc::clone(shared);
    listen(canvas, "mousemove", move |event| {
        if let Some(input) = mouse_input(&event) {
            run_pointer(&s, |core| core.on_pointer_move(input));
        }
    })?;
    let s = Rc::clone(shared);
    listen(canvas, "mouseup", move |_| run(&s, EngineCore::on_pointer_up))?;
    let s = Rc::clone(shared);
    listen(canvas, "mouseleave", move |_| run(&s, EngineCore::on_pointer_leave))?;

    let s = Rc::clone(shared);
    listen(canvas, "touchstart", move |event| {
        if let Some(input) = touch_input(&event) {
            run_pointer(&s, |core| core.on_pointer_down(input));
        }
    })?;
    let s = Rc::clone(shared);
    listen(canvas, "touchmove", move |event| {
        if let Some(input) = touch_input(&event) {
            run_pointer(&s, |core| core.on_pointer_move(input));
        }
    })?;
    let s = Rc::clone(shared);
    listen(canvas, "touchend", move |event| {
        event.prevent_default();
        run(&s, EngineCore::on_pointer_up);
    })?;
    let s = Rc::clone(shared);
    listen(canvas, "touchcancel", move |_| run(&s, EngineCore::on_pointer_cancel))?;
    Ok(())
}
