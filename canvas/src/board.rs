//! Board: the single owner of every square, arrow, and the selection.
//!
//! Squares keep insertion order, which doubles as draw order and hit-test
//! priority (later squares win). Arrows refer to squares by id only, and
//! every operation that could strand an arrow removes it in the same call.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use indexmap::IndexMap;

use crate::arrow::{self, ArrowId, ConnectionArrow, ConnectionEnd, Route};
use crate::geom::Point;
use crate::options::BoardOptions;
use crate::square::{SocketAlignment, Square, SquareId};

/// Why an arrow could not be attached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    #[error("square {0} does not exist")]
    UnknownSquare(SquareId),
    #[error("socket {alignment} of square {square_id} is disabled")]
    SocketDisabled { square_id: SquareId, alignment: SocketAlignment },
    #[error("an arrow cannot start and end on the same socket")]
    SelfConnection,
    #[error("arrow {0} already exists")]
    DuplicateId(ArrowId),
    #[error("square {square_id} has no socket named {alignment:?}")]
    UnknownAlignment { square_id: SquareId, alignment: String },
}

/// Everything taken off the board by [`Board::remove_square`].
#[derive(Debug, Clone)]
pub struct RemovedSquare {
    pub square: Square,
    pub arrows: Vec<ConnectionArrow>,
    pub was_selected: bool,
}

/// Squares, arrows, and the current selection.
#[derive(Debug, Clone, Default)]
pub struct Board {
    options: BoardOptions,
    squares: IndexMap<SquareId, Square>,
    arrows: IndexMap<ArrowId, ConnectionArrow>,
    selected: Option<SquareId>,
}

impl Board {
    #[must_use]
    pub fn new(options: BoardOptions) -> Self {
        Self { options, ..Self::default() }
    }

    #[must_use]
    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    // --- Queries ---

    /// Squares in insertion order (bottom of the stack first).
    pub fn squares(&self) -> impl DoubleEndedIterator<Item = &Square> {
        self.squares.values()
    }

    pub fn arrows(&self) -> impl Iterator<Item = &ConnectionArrow> {
        self.arrows.values()
    }

    #[must_use]
    pub fn square(&self, id: &SquareId) -> Option<&Square> {
        self.squares.get(id)
    }

    #[must_use]
    pub fn arrow(&self, id: &ArrowId) -> Option<&ConnectionArrow> {
        self.arrows.get(id)
    }

    #[must_use]
    pub fn square_count(&self) -> usize {
        self.squares.len()
    }

    #[must_use]
    pub fn arrow_count(&self) -> usize {
        self.arrows.len()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SquareId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn selected_square(&self) -> Option<&Square> {
        self.selected.as_ref().and_then(|id| self.squares.get(id))
    }

    #[must_use]
    pub fn is_selected(&self, id: &SquareId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Live center of the socket an endpoint refers to.
    #[must_use]
    pub fn socket_position(&self, end: &ConnectionEnd) -> Option<Point> {
        self.squares
            .get(&end.square_id)
            .map(|sq| sq.socket(end.alignment).position)
    }

    /// Route an arrow against the current socket positions.
    #[must_use]
    pub fn route(&self, arrow: &ConnectionArrow) -> Option<Route> {
        let from = self.socket_position(&arrow.from)?;
        let to = self.socket_position(&arrow.to)?;
        Some(arrow::route(from, to, &self.options))
    }

    #[must_use]
    pub fn arrows_touching_square(&self, id: &SquareId) -> Vec<ArrowId> {
        self.arrows
            .values()
            .filter(|a| a.touches_square(id))
            .map(|a| a.id.clone())
            .collect()
    }

    #[must_use]
    pub fn arrows_touching_socket(&self, end: &ConnectionEnd) -> Vec<ArrowId> {
        self.arrows
            .values()
            .filter(|a| a.touches_socket(end))
            .map(|a| a.id.clone())
            .collect()
    }

    // --- Squares ---

    /// Create a default square at `position` with every socket disabled.
    pub fn add_square(&mut self, position: Point) -> SquareId {
        let square = Square::spawn(position, &self.options);
        let id = square.id().clone();
        self.squares.insert(id.clone(), square);
        id
    }

    /// Insert a prebuilt square on top of the stack. Returns false, leaving
    /// the board untouched, if the id is already taken.
    pub fn insert_square(&mut self, square: Square) -> bool {
        if self.squares.contains_key(square.id()) {
            return false;
        }
        self.squares.insert(square.id().clone(), square);
        true
    }

    /// Remove a square together with every arrow attached to it.
    pub fn remove_square(&mut self, id: &SquareId) -> Option<RemovedSquare> {
        let square = self.squares.shift_remove(id)?;
        let arrows = self.take_arrows(|a| a.touches_square(id));
        let was_selected = self.is_selected(id);
        if was_selected {
            self.selected = None;
        }
        Some(RemovedSquare { square, arrows, was_selected })
    }

    /// Move a square toward `candidate`, clamped onto the canvas.
    pub fn move_square(&mut self, id: &SquareId, candidate: Point) -> bool {
        let Some(square) = self.squares.get_mut(id) else {
            return false;
        };
        square.move_to(candidate, &self.options)
    }

    /// Grow or shrink a square; out-of-range sizes are ignored.
    pub fn resize_square(&mut self, id: &SquareId, delta: f64) -> bool {
        let Some(square) = self.squares.get_mut(id) else {
            return false;
        };
        square.resize(delta, &self.options)
    }

    /// Flip a socket flag. Returns `None` when nothing changed, otherwise the
    /// arrows removed because the socket went dark (empty when enabling).
    pub fn set_socket_enabled(
        &mut self,
        id: &SquareId,
        alignment: SocketAlignment,
        enabled: bool,
    ) -> Option<Vec<ConnectionArrow>> {
        let square = self.squares.get_mut(id)?;
        if !square.set_socket_enabled(alignment, enabled) {
            return None;
        }
        if enabled {
            return Some(Vec::new());
        }
        let end = ConnectionEnd::new(id.clone(), alignment);
        Some(self.take_arrows(|a| a.touches_socket(&end)))
    }

    // --- Selection ---

    /// Change the selection. Ids that are not on the board clear it.
    /// Returns whether the selection changed.
    pub fn select(&mut self, id: Option<SquareId>) -> bool {
        let next = id.filter(|id| self.squares.contains_key(id));
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    // --- Arrows ---

    /// Connect two enabled sockets with a new arrow.
    ///
    /// # Errors
    ///
    /// See [`ConnectError`]; the board is unchanged on error.
    pub fn connect(&mut self, from: ConnectionEnd, to: ConnectionEnd) -> Result<ArrowId, ConnectError> {
        let id = ArrowId::random();
        self.insert_arrow(ConnectionArrow { id: id.clone(), from, to })?;
        Ok(id)
    }

    /// Insert an arrow after checking both ends resolve to enabled sockets.
    ///
    /// # Errors
    ///
    /// See [`ConnectError`]; the board is unchanged on error.
    pub fn insert_arrow(&mut self, arrow: ConnectionArrow) -> Result<(), ConnectError> {
        if arrow.from == arrow.to {
            return Err(ConnectError::SelfConnection);
        }
        if self.arrows.contains_key(&arrow.id) {
            return Err(ConnectError::DuplicateId(arrow.id));
        }
        self.check_end(&arrow.from)?;
        self.check_end(&arrow.to)?;
        self.arrows.insert(arrow.id.clone(), arrow);
        Ok(())
    }

    pub fn remove_arrow(&mut self, id: &ArrowId) -> Option<ConnectionArrow> {
        self.arrows.shift_remove(id)
    }

    fn check_end(&self, end: &ConnectionEnd) -> Result<(), ConnectError> {
        let square = self
            .squares
            .get(&end.square_id)
            .ok_or_else(|| ConnectError::UnknownSquare(end.square_id.clone()))?;
        if !square.socket(end.alignment).enabled {
            return Err(ConnectError::SocketDisabled { square_id: end.square_id.clone(), alignment: end.alignment });
        }
        Ok(())
    }

    fn take_arrows(&mut self, pred: impl Fn(&ConnectionArrow) -> bool) -> Vec<ConnectionArrow> {
        let mut removed = Vec::new();
        self.arrows.retain(|_, arrow| {
            if pred(arrow) {
                removed.push(arrow.clone());
                false
            } else {
                true
            }
        });
        removed
    }
}
