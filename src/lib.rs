//! Browser sketchpad engine: freehand drawing with undo/redo plus movable,
//! resizable image and video overlays on a single `<canvas>`.
//!
//! The crate compiles to WebAssembly. All drawing happens in a software
//! RGBA buffer owned by the engine, so strokes, history, media geometry and
//! hit-testing are unit tested natively; the browser layer only wires DOM
//! events in and blits the result out. The host page is responsible for the
//! toolbar and for calling the [`web::Sketchpad`] methods.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`web`] | `#[wasm_bindgen]` facade: DOM listeners, uploads, video frame loop |
//! | [`render`] | Paint plan and its `Canvas2D` executor |
//! | [`raster`] | RGBA pixel buffer, colors, stroke rasterization, PNG export |
//! | [`stroke`] | Brush settings and midpoint-smoothed stroke sampling |
//! | [`history`] | Bounded undo/redo snapshot stacks |
//! | [`media`] | Media overlays and their fit/move/resize geometry |
//! | [`hit`] | Hit-testing media bodies and corner handles |
//! | [`input`] | Pointer samples and the gesture state machine |
//! | [`decode`] | Tokens for in-flight media decodes |
//! | [`coords`] | Points, rectangles, client-to-canvas mapping |
//! | [`config`] | JSON engine configuration |
//! | [`error`] | Error enums |
//! | [`consts`] | Shared numeric constants (handle size, brush limits, etc.) |

pub mod config;
pub mod consts;
pub mod coords;
pub mod decode;
pub mod engine;
pub mod error;
pub mod history;
pub mod hit;
pub mod input;
pub mod media;
pub mod raster;
pub mod render;
pub mod stroke;
pub mod web;
