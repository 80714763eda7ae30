//! Connection arrows and their orthogonal routing.
//!
//! An arrow stores only `(SquareId, SocketAlignment)` endpoint references.
//! The board resolves those against its live squares whenever a route is
//! needed, so no geometry is cached on the arrow itself.

#[cfg(test)]
#[path = "arrow_test.rs"]
mod arrow_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::ConnectError;
use crate::doc::{ArrowDto, EndpointDto};
use crate::geom::{Axis, Point, Segment, dominant_axis, orthogonal_path};
use crate::options::BoardOptions;
use crate::square::{SocketAlignment, SquareId};

/// Opaque unique identifier for a connection arrow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrowId(String);

impl ArrowId {
    /// Mint a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArrowId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ArrowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One end of an arrow: a square and one of its sockets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionEnd {
    pub square_id: SquareId,
    pub alignment: SocketAlignment,
}

impl ConnectionEnd {
    #[must_use]
    pub fn new(square_id: SquareId, alignment: SocketAlignment) -> Self {
        Self { square_id, alignment }
    }

    fn to_dto(&self) -> EndpointDto {
        EndpointDto { square_id: self.square_id.clone(), socket_alignment: self.alignment.as_str().to_owned() }
    }

    fn from_dto(dto: &EndpointDto) -> Result<Self, ConnectError> {
        let alignment = SocketAlignment::parse(&dto.socket_alignment).ok_or_else(|| ConnectError::UnknownAlignment {
            square_id: dto.square_id.clone(),
            alignment: dto.socket_alignment.clone(),
        })?;
        Ok(Self::new(dto.square_id.clone(), alignment))
    }
}

/// A directed link between two sockets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionArrow {
    pub id: ArrowId,
    pub from: ConnectionEnd,
    pub to: ConnectionEnd,
}

impl ConnectionArrow {
    /// Whether either end sits on the given square.
    #[must_use]
    pub fn touches_square(&self, square_id: &SquareId) -> bool {
        self.from.square_id == *square_id || self.to.square_id == *square_id
    }

    /// Whether either end sits on the given socket.
    #[must_use]
    pub fn touches_socket(&self, end: &ConnectionEnd) -> bool {
        self.from == *end || self.to == *end
    }

    #[must_use]
    pub fn to_dto(&self) -> ArrowDto {
        ArrowDto { id: self.id.clone(), from: self.from.to_dto(), to: self.to.to_dto() }
    }

    /// Rebuild endpoint references. Whether they resolve is the board's call.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::UnknownAlignment`] for an endpoint naming no
    /// known socket.
    pub fn from_dto(dto: &ArrowDto) -> Result<Self, ConnectError> {
        Ok(Self {
            id: dto.id.clone(),
            from: ConnectionEnd::from_dto(&dto.from)?,
            to: ConnectionEnd::from_dto(&dto.to)?,
        })
    }
}

/// Filled triangle at the destination end of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrowhead {
    pub tip: Point,
    pub left: Point,
    pub right: Point,
}

/// Drawable geometry for an arrow between two socket centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub segments: [Segment; 3],
    pub head: Arrowhead,
}

/// Route an arrow from the `from` socket center to the `to` socket center.
#[must_use]
pub fn route(from: Point, to: Point, options: &BoardOptions) -> Route {
    let [start, bend_a, bend_b, end] = orthogonal_path(from, to, options.arrow_spacing());
    let segments = [
        Segment { from: start, to: bend_a },
        Segment { from: bend_a, to: bend_b },
        Segment { from: bend_b, to: end },
    ];
    Route { segments, head: arrowhead(from, to, end, options.arrowhead_length) }
}

/// The approach direction follows the dominant axis rather than the last
/// segment, which can point backwards when the sockets are closer than two
/// spacings apart.
fn arrowhead(from: Point, to: Point, tip: Point, length: f64) -> Arrowhead {
    let (diff_x, diff_y) = match dominant_axis(from, to) {
        Axis::Horizontal => (if to.x < from.x { -length } else { length }, 0.0),
        Axis::Vertical => (0.0, if to.y < from.y { -length } else { length }),
    };
    let base = tip.offset(-diff_x, -diff_y);
    Arrowhead {
        tip,
        left: base.offset(0.5 * diff_y, -0.5 * diff_x),
        right: base.offset(-0.5 * diff_y, 0.5 * diff_x),
    }
}
