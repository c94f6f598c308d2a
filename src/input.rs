//! Input model: normalized pointer samples and the gesture state machine.
//!
//! Mouse and touch events are both reduced to a [`PointerInput`] carrying a
//! client-space point before the engine sees them. `InputState` is the gesture
//! tracked between pointer-down and pointer-up; drawing and media manipulation
//! are mutually exclusive for a single press.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::coords::Point;
use crate::hit::Corner;
use crate::media::MediaId;
use crate::stroke::StrokeState;

/// Device that produced a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// A pointer sample in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub client: Point,
}

impl PointerInput {
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Mouse, client: Point::new(x, y) }
    }

    #[must_use]
    pub fn touch(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Touch, client: Point::new(x, y) }
    }
}

/// Active gesture.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// Waiting for the next pointer-down.
    #[default]
    Idle,
    /// A freehand stroke is in progress.
    Drawing {
        stroke: StrokeState,
    },
    /// The selected media item follows the pointer.
    Moving {
        id: MediaId,
    },
    /// The selected media item is being resized from one corner.
    Resizing {
        id: MediaId,
        corner: Corner,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Resize corner of the active gesture, if resizing.
    #[must_use]
    pub fn active_corner(&self) -> Option<Corner> {
        match self {
            Self::Resizing { corner, .. } => Some(*corner),
            _ => None,
        }
    }
}
