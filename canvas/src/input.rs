//! Input model: abstracted pointer events and the gesture state machine.
//!
//! The host turns raw device events into [`InputEvent`]s; how they were
//! captured does not matter here. [`InputState`] is the gesture in progress
//! between a press and whatever ends it, carrying the context needed to
//! compute drag deltas and to finish a two-press connection.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::arrow::ConnectionEnd;
use crate::geom::Point;
use crate::square::SquareId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Event timestamp in milliseconds from an arbitrary, monotonic origin.
pub type Timestamp = f64;

/// One abstracted input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputEvent {
    /// Double-click (or equivalent) asking for a new square.
    Create { position: Point },
    /// Pointer button went down.
    Press { position: Point, button: Button, timestamp: Timestamp },
    /// Pointer moved, whether or not it is still over the canvas.
    Move { position: Point },
    /// Pointer button went up.
    Release { timestamp: Timestamp },
    /// Wheel notch; only the sign of `delta` matters, positive grows.
    Wheel { position: Point, delta: f64 },
}

/// The gesture in progress.
///
/// Every non-idle variant holds the pointer: the host must keep delivering
/// moves and releases to the engine until the state returns to idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next press.
    #[default]
    Idle,
    /// A square is following the pointer.
    DraggingSquare {
        /// Id of the square being dragged.
        id: SquareId,
        /// Pointer position at the press.
        start_pointer: Point,
        /// Square position at the press.
        start_position: Point,
        /// Press time, used to tell a quick click from a drag.
        pressed_at: Timestamp,
    },
    /// A source socket is picked; the next socket press completes the arrow.
    ConnectingArrow {
        /// Where the arrow will start.
        source: ConnectionEnd,
        /// Latest pointer position, for the preview line.
        pointer: Point,
    },
}

impl InputState {
    /// Whether this state needs pointer capture (transient move/up delivery).
    #[must_use]
    pub fn captures_pointer(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// The pending connection source, if any.
    #[must_use]
    pub fn pending_source(&self) -> Option<&ConnectionEnd> {
        match self {
            Self::ConnectingArrow { source, .. } => Some(source),
            _ => None,
        }
    }
}
