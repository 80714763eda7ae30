#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::board::Board;
use crate::geom::{Point, point_in_radius};
use crate::square::{SocketAlignment, Square, SquareId};

/// Which part of a square was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Socket(SocketAlignment),
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub square_id: SquareId,
    pub part: HitPart,
}

/// Whether a socket is drawn, and therefore hittable: every socket of the
/// selected square, plus enabled sockets anywhere.
#[must_use]
pub fn socket_visible(square: &Square, alignment: SocketAlignment, selected: bool) -> bool {
    selected || square.socket(alignment).enabled
}

/// Find the topmost square under `pt`.
///
/// Squares are tried newest first. Within a square, visible sockets are
/// tried before the body. Both tests use open intervals, so a point on an
/// edge misses.
#[must_use]
pub fn hit_test(pt: Point, board: &Board) -> Option<Hit> {
    let radius = board.options().socket_radius;
    for square in board.squares().rev() {
        let selected = board.is_selected(square.id());
        let socket = square.sockets().iter().find(|s| {
            socket_visible(square, s.alignment, selected) && point_in_radius(pt, s.position, radius)
        });
        if let Some(socket) = socket {
            return Some(Hit { square_id: square.id().clone(), part: HitPart::Socket(socket.alignment) });
        }
        if square.contains(pt) {
            return Some(Hit { square_id: square.id().clone(), part: HitPart::Body });
        }
    }
    None
}

/// Whether `pt` is over the body of the selected square. Wheel resizing only
/// applies there.
#[must_use]
pub fn over_selected(pt: Point, board: &Board) -> Option<SquareId> {
    board
        .selected_square()
        .filter(|sq| sq.contains(pt))
        .map(|sq| sq.id().clone())
}
