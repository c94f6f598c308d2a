#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

#[test]
fn default_state_is_idle() {
    let state = InputState::default();
    assert!(state.is_idle());
    assert!(!state.is_drawing());
    assert!(state.active_corner().is_none());
}

#[test]
fn drawing_state_reports_drawing() {
    let state = InputState::Drawing { stroke: StrokeState::begin(Point::new(1.0, 2.0)) };
    assert!(state.is_drawing());
    assert!(!state.is_idle());
}

#[test]
fn resizing_state_exposes_corner() {
    let state = InputState::Resizing { id: Uuid::new_v4(), corner: Corner::Sw };
    assert_eq!(state.active_corner(), Some(Corner::Sw));
    let moving = InputState::Moving { id: Uuid::new_v4() };
    assert!(moving.active_corner().is_none());
}

#[test]
fn pointer_constructors_tag_kind() {
    let m = PointerInput::mouse(3.0, 4.0);
    assert_eq!(m.kind, PointerKind::Mouse);
    assert_eq!(m.client, Point::new(3.0, 4.0));
    let t = PointerInput::touch(5.0, 6.0);
    assert_eq!(t.kind, PointerKind::Touch);
    assert_eq!(t.client.x, 5.0);
}
