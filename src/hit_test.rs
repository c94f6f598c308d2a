use super::*;
use crate::media::{CanvasSize, MediaKind};

// =============================================================
// Helpers
// =============================================================

fn canvas() -> CanvasSize {
    CanvasSize::new(1000.0, 800.0)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Two centered 200×200 items: A inserted first, B on top of it.
fn stacked() -> (MediaList, MediaId, MediaId) {
    let mut list = MediaList::new();
    let a = list.insert(MediaKind::Image, 200, 200, canvas(), 0.8);
    let b = list.insert(MediaKind::Image, 200, 200, canvas(), 0.8);
    (list, a, b)
}

// =============================================================
// Corner
// =============================================================

#[test]
fn corner_cursors_follow_diagonals() {
    assert_eq!(Corner::Nw.cursor(), Corner::Se.cursor());
    assert_eq!(Corner::Ne.cursor(), Corner::Sw.cursor());
    assert_ne!(Corner::Nw.cursor(), Corner::Ne.cursor());
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn empty_list_hits_nothing() {
    assert!(hit_test(pt(500.0, 400.0), &MediaList::new(), 12.0).is_none());
}

#[test]
fn overlap_hits_topmost() {
    let (list, _, b) = stacked();
    let hit = hit_test(pt(500.0, 400.0), &list, 12.0).unwrap();
    assert_eq!(hit, Hit { media_id: b, part: HitPart::Body });
}

#[test]
fn lower_item_hit_outside_overlap() {
    let mut list = MediaList::new();
    let a = list.insert(MediaKind::Image, 400, 200, canvas(), 0.8);
    let b = list.insert(MediaKind::Image, 100, 100, canvas(), 0.8);
    list.deselect();
    // A spans x 300..700, B spans x 450..550.
    assert_eq!(hit_test(pt(320.0, 400.0), &list, 12.0).map(|h| h.media_id), Some(a));
    assert_eq!(hit_test(pt(500.0, 400.0), &list, 12.0).map(|h| h.media_id), Some(b));
}

#[test]
fn miss_outside_all_items() {
    let (list, _, _) = stacked();
    assert!(hit_test(pt(10.0, 10.0), &list, 12.0).is_none());
}

#[test]
fn selected_item_handles_are_hit() {
    let (list, _, b) = stacked();
    // B spans 400..600 × 300..500.
    let cases = [
        (pt(400.0, 300.0), Corner::Nw),
        (pt(600.0, 300.0), Corner::Ne),
        (pt(400.0, 500.0), Corner::Sw),
        (pt(605.0, 505.0), Corner::Se),
    ];
    for (p, corner) in cases {
        let hit = hit_test(p, &list, 12.0).unwrap();
        assert_eq!(hit, Hit { media_id: b, part: HitPart::ResizeHandle(corner) }, "at {p:?}");
    }
}

#[test]
fn handle_zone_extends_outside_body() {
    let (list, _, b) = stacked();
    // 5px outside the top-left corner: outside the body, inside the 12px handle.
    let hit = hit_test(pt(395.0, 295.0), &list, 12.0).unwrap();
    assert_eq!(hit.media_id, b);
    assert_eq!(hit.part, HitPart::ResizeHandle(Corner::Nw));
    assert!(hit_test(pt(393.0, 293.0), &list, 12.0).is_none());
}

#[test]
fn unselected_items_expose_no_handles() {
    let (mut list, _, b) = stacked();
    list.deselect();
    let hit = hit_test(pt(400.0, 300.0), &list, 12.0).unwrap();
    assert_eq!(hit, Hit { media_id: b, part: HitPart::Body });
    assert!(hit_test(pt(395.0, 295.0), &list, 12.0).is_none());
}

#[test]
fn item_above_selected_wins_over_its_handles() {
    let (mut list, a, b) = stacked();
    assert!(list.select(a));
    // A and B coincide; B is on top and unselected so its body wins.
    let hit = hit_test(pt(400.0, 300.0), &list, 12.0).unwrap();
    assert_eq!(hit, Hit { media_id: b, part: HitPart::Body });
}

#[test]
fn larger_handle_size_widens_zone() {
    let (list, _, _) = stacked();
    assert!(hit_test(pt(390.0, 290.0), &list, 12.0).is_none());
    assert!(matches!(
        hit_test(pt(390.0, 290.0), &list, 24.0).map(|h| h.part),
        Some(HitPart::ResizeHandle(Corner::Nw))
    ));
}

// =============================================================
// hover_cursor
// =============================================================

#[test]
fn hover_cursor_by_part() {
    let (list, _, _) = stacked();
    assert_eq!(hover_cursor(hit_test(pt(500.0, 400.0), &list, 12.0)), "move");
    assert_eq!(hover_cursor(hit_test(pt(400.0, 300.0), &list, 12.0)), "nwse-resize");
    assert_eq!(hover_cursor(hit_test(pt(600.0, 300.0), &list, 12.0)), "nesw-resize");
    assert_eq!(hover_cursor(None), "crosshair");
}
