use super::*;
use crate::raster::Color;
use crate::stroke::Tool;

// =============================================================
// Helpers
// =============================================================

fn brush() -> BrushConfig {
    BrushConfig { tool: Tool::Pen, color: Color::BLACK, size: 2.0 }
}

fn snap(fill: u8) -> Snapshot {
    Snapshot { pixels: PixelBuffer::filled(2, 2, Color::rgba(fill, fill, fill, 255)), brush: brush() }
}

fn fill_of(s: Option<&Snapshot>) -> Option<u8> {
    s.and_then(|s| s.pixels.pixel(0, 0)).map(|c| c.r)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_history_has_single_entry() {
    let h = HistoryStack::new(snap(0), 10);
    assert_eq!(h.undo_len(), 1);
    assert_eq!(h.redo_len(), 0);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert_eq!(fill_of(h.current()), Some(0));
}

#[test]
fn capacity_floor_is_two() {
    let h = HistoryStack::new(snap(0), 0);
    assert_eq!(h.capacity(), 2);
}

// =============================================================
// Undo / redo
// =============================================================

#[test]
fn undo_on_single_entry_is_noop() {
    let mut h = HistoryStack::new(snap(0), 10);
    assert!(h.undo().is_none());
    assert_eq!(h.undo_len(), 1);
    assert_eq!(h.redo_len(), 0);
}

#[test]
fn undo_returns_previous_state() {
    let mut h = HistoryStack::new(snap(0), 10);
    h.commit(snap(1));
    assert_eq!(fill_of(h.undo()), Some(0));
    assert_eq!(h.redo_len(), 1);
}

#[test]
fn second_undo_after_one_commit_is_noop() {
    let mut h = HistoryStack::new(snap(0), 10);
    h.commit(snap(1));
    assert!(h.undo().is_some());
    assert!(h.undo().is_none());
    assert_eq!(fill_of(h.current()), Some(0));
}

#[test]
fn redo_on_empty_is_noop() {
    let mut h = HistoryStack::new(snap(0), 10);
    assert!(h.redo().is_none());
    assert_eq!(h.undo_len(), 1);
}

#[test]
fn redo_replays_in_order() {
    let mut h = HistoryStack::new(snap(0), 10);
    for i in 1..=3 {
        h.commit(snap(i));
    }
    for _ in 0..3 {
        h.undo();
    }
    assert_eq!(fill_of(h.current()), Some(0));
    assert_eq!(fill_of(h.redo()), Some(1));
    assert_eq!(fill_of(h.redo()), Some(2));
    assert_eq!(fill_of(h.redo()), Some(3));
    assert!(h.redo().is_none());
}

#[test]
fn commit_clears_redo() {
    let mut h = HistoryStack::new(snap(0), 10);
    h.commit(snap(1));
    h.commit(snap(2));
    h.undo();
    h.undo();
    assert_eq!(h.redo_len(), 2);
    h.commit(snap(9));
    assert_eq!(h.redo_len(), 0);
    assert!(!h.can_redo());
    assert_eq!(fill_of(h.current()), Some(9));
}

#[test]
fn redo_is_empty_after_every_commit_in_any_sequence() {
    let mut h = HistoryStack::new(snap(0), 6);
    for round in 0..5u8 {
        h.commit(snap(round));
        assert_eq!(h.redo_len(), 0);
        if round % 2 == 0 {
            h.undo();
        }
    }
}

// =============================================================
// Capacity bound
// =============================================================

#[test]
fn capacity_evicts_oldest() {
    let mut h = HistoryStack::new(snap(0), 3);
    for i in 1..=5 {
        h.commit(snap(i));
        assert!(h.undo_len() <= 3);
    }
    assert_eq!(h.undo_len(), 3);
    h.undo();
    h.undo();
    // Oldest reachable state is 3; 0..=2 were evicted.
    assert_eq!(fill_of(h.current()), Some(3));
    assert!(h.undo().is_none());
}

#[test]
fn undo_restores_recorded_brush() {
    let mut h = HistoryStack::new(snap(0), 10);
    let eraser = BrushConfig { tool: Tool::Eraser, color: Color::WHITE, size: 30.0 };
    h.commit(Snapshot { pixels: PixelBuffer::blank(2, 2), brush: eraser });
    h.commit(snap(5));
    let restored = h.undo().map(|s| s.brush);
    assert_eq!(restored, Some(eraser));
}
