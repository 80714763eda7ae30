//! Persisted document: DTOs, validation, and the board mapping.
//!
//! Live entities never hit storage directly. [`to_document`] flattens a board
//! into plain records; [`from_document`] rebuilds one, re-deriving socket
//! geometry and skipping any arrow whose endpoints no longer resolve.
//!
//! A document that fails shape validation is discarded as a whole
//! ([`load_board`] returns `None`); a single bad arrow only costs that arrow.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::arrow::{ArrowId, ConnectionArrow};
use crate::board::Board;
use crate::geom::Point;
use crate::options::BoardOptions;
use crate::square::{SocketAlignment, Square, SquareId};

/// Why a persisted document was rejected.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("square {0} has non-finite geometry")]
    NonFinite(SquareId),
    #[error("square {square_id} has invalid size {size}")]
    InvalidSize { square_id: SquareId, size: f64 },
}

/// Enabled flags for the four sockets of a square.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocketFlags {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl SocketFlags {
    #[must_use]
    pub fn get(&self, alignment: SocketAlignment) -> bool {
        match alignment {
            SocketAlignment::Top => self.top,
            SocketAlignment::Right => self.right,
            SocketAlignment::Bottom => self.bottom,
            SocketAlignment::Left => self.left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SquareDto {
    pub id: SquareId,
    pub position: Point,
    pub size: f64,
    pub sockets: SocketFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndpointDto {
    pub square_id: SquareId,
    /// Kept as text: an unrecognised name costs only its arrow on load.
    pub socket_alignment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrowDto {
    pub id: ArrowId,
    pub from: EndpointDto,
    pub to: EndpointDto,
}

/// The whole board in storage form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Document {
    pub selected_square_id: Option<SquareId>,
    pub squares: Vec<SquareDto>,
    /// Absent in documents written before arrows existed.
    #[serde(default)]
    pub arrows: Vec<ArrowDto>,
}

impl Document {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError`] on malformed JSON, a shape mismatch, or
    /// geometry no square could have.
    pub fn parse(raw: &str) -> Result<Self, DocumentError> {
        let doc: Self = serde_json::from_str(raw)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Same as [`Document::parse`] for an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// See [`Document::parse`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        let doc: Self = serde_json::from_value(value)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Encode as compact JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check the geometry serde cannot: finite numbers and a positive size.
    ///
    /// # Errors
    ///
    /// Returns the first offending square.
    pub fn validate(&self) -> Result<(), DocumentError> {
        for sq in &self.squares {
            if !sq.position.is_finite() || !sq.size.is_finite() {
                return Err(DocumentError::NonFinite(sq.id.clone()));
            }
            if sq.size <= 0.0 {
                return Err(DocumentError::InvalidSize { square_id: sq.id.clone(), size: sq.size });
            }
        }
        Ok(())
    }
}

/// Flatten a board into its storage form.
#[must_use]
pub fn to_document(board: &Board) -> Document {
    Document {
        selected_square_id: board.selected().cloned(),
        squares: board.squares().map(Square::to_dto).collect(),
        arrows: board.arrows().map(ConnectionArrow::to_dto).collect(),
    }
}

/// Rebuild a board from a validated document.
///
/// Squares go in first, in document order. Arrows that reference a missing
/// square, a disabled socket, or the same socket twice are skipped with a
/// warning. A selection that names a missing square is dropped.
#[must_use]
pub fn from_document(doc: &Document, options: BoardOptions) -> Board {
    let mut board = Board::new(options);

    for dto in &doc.squares {
        let square = Square::from_dto(dto, board.options());
        if !board.insert_square(square) {
            warn!(square_id = %dto.id, "skipping square with duplicate id");
        }
    }

    for dto in &doc.arrows {
        if let Err(e) = ConnectionArrow::from_dto(dto).and_then(|arrow| board.insert_arrow(arrow)) {
            warn!(arrow_id = %dto.id, error = %e, "skipping arrow that does not resolve");
        }
    }

    if let Some(id) = &doc.selected_square_id {
        if !board.select(Some(id.clone())) {
            warn!(square_id = %id, "dropping selection of unknown square");
        }
    }

    board
}

/// Parse raw storage content into a board, or `None` when the content is
/// unusable. The caller starts from an empty board in that case.
#[must_use]
pub fn load_board(raw: &str, options: BoardOptions) -> Option<Board> {
    match Document::parse(raw) {
        Ok(doc) => Some(from_document(&doc, options)),
        Err(e) => {
            warn!(error = %e, "discarding persisted document");
            None
        }
    }
}
