#![allow(clippy::float_cmp)]

use super::*;
use crate::config::CanvasConfig;
use crate::media::MediaKind;

fn core() -> EngineCore {
    EngineCore::new(400, 300, CanvasConfig::default())
}

fn insert(core: &mut EngineCore, w: u32, h: u32) -> MediaId {
    let token = core.begin_decode(MediaKind::Image, "image/png").unwrap();
    core.complete_decode(token, w, h);
    core.selection().unwrap()
}

#[test]
fn empty_canvas_clears_then_blits() {
    let ops = plan(&core());
    assert_eq!(ops, vec![DrawOp::Clear { width: 400.0, height: 300.0 }, DrawOp::Drawing]);
}

#[test]
fn media_painted_bottom_to_top_after_drawing() {
    let mut core = core();
    let a = insert(&mut core, 40, 40);
    let b = insert(&mut core, 60, 30);
    let ops = plan(&core);
    let media: Vec<MediaId> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Media { id, .. } => Some(*id),
            _ => None,
        })
        .collect();
    assert_eq!(media, vec![a, b]);
    assert_eq!(ops[1], DrawOp::Drawing);
}

#[test]
fn selection_decorations_come_last() {
    let mut core = core();
    let id = insert(&mut core, 100, 50);
    let rect = core.media.get(&id).unwrap().rect;
    let ops = plan(&core);
    assert_eq!(ops.len(), 2 + 1 + 1 + 4);
    assert_eq!(ops[3], DrawOp::SelectionBorder(rect));
    let handles: Vec<&DrawOp> = ops[4..].iter().collect();
    assert!(handles.iter().all(|op| matches!(op, DrawOp::Handle(r) if r.width == 12.0 && r.height == 12.0)));
    assert_eq!(ops[4], DrawOp::Handle(Rect::new(rect.x - 6.0, rect.y - 6.0, 12.0, 12.0)));
}

#[test]
fn no_decorations_without_selection() {
    let mut core = core();
    insert(&mut core, 100, 50);
    core.media.deselect();
    let ops = plan(&core);
    assert_eq!(ops.len(), 3);
    assert!(!ops.iter().any(|op| matches!(op, DrawOp::SelectionBorder(_) | DrawOp::Handle(_))));
}
