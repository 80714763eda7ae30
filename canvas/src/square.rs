//! Square entity: position, size, and four derived sockets.
//!
//! A square's socket positions are a pure function of its position, size,
//! and the configured socket radius. They are recomputed in full after every
//! geometry change and are never persisted.

#[cfg(test)]
#[path = "square_test.rs"]
mod square_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::doc::{SocketFlags, SquareDto};
use crate::geom::{Point, clamp, point_in_square};
use crate::options::BoardOptions;

/// Opaque unique identifier for a square.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareId(String);

impl SquareId {
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

impl From<&str> for SquareId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for SquareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which edge of the square a socket sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocketAlignment {
    Top,
    Right,
    Bottom,
    Left,
}

impl SocketAlignment {
    /// All alignments in storage and hit-test order.
    pub const ALL: [SocketAlignment; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Inverse of [`SocketAlignment::as_str`].
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for SocketAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connection point centered on one edge of a square.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Socket {
    pub alignment: SocketAlignment,
    /// Derived center; see [`socket_positions`].
    pub position: Point,
    pub enabled: bool,
}

/// Compute the four socket centers for a square, indexed like
/// [`SocketAlignment::ALL`].
///
/// # Panics
///
/// Asserts that the geometry is finite. Non-finite input means the clamping
/// logic let a bad value through, which is a bug rather than user error.
#[must_use]
pub fn socket_positions(position: Point, size: f64, radius: f64) -> [Point; 4] {
    assert!(
        position.is_finite() && size.is_finite() && radius.is_finite(),
        "non-finite square geometry: position={position:?} size={size} radius={radius}"
    );
    let Point { x, y } = position;
    let half = size / 2.0;
    [
        Point::new(x + half, y - radius),
        Point::new(x + size + radius, y + half),
        Point::new(x + half, y + size + radius),
        Point::new(x - radius, y + half),
    ]
}

/// Clamp a candidate top-left corner so a square of `size` stays on the
/// canvas with room for its border and sockets.
#[must_use]
pub fn clamp_position(candidate: Point, size: f64, options: &BoardOptions) -> Point {
    let margin = options.edge_margin();
    Point::new(
        clamp(candidate.x, margin, options.canvas_width - size - margin),
        clamp(candidate.y, margin, options.canvas_height - size - margin),
    )
}

/// A square on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    id: SquareId,
    position: Point,
    size: f64,
    sockets: [Socket; 4],
    socket_radius: f64,
}

impl Square {
    /// Build a square with the given geometry as-is. Socket flags start disabled.
    #[must_use]
    pub fn new(id: SquareId, position: Point, size: f64, options: &BoardOptions) -> Self {
        let radius = options.socket_radius;
        let positions = socket_positions(position, size, radius);
        let sockets = SocketAlignment::ALL.map(|alignment| Socket {
            alignment,
            position: positions[alignment.index()],
            enabled: false,
        });
        Self { id, position, size, sockets, socket_radius: radius }
    }

    /// Create a default-sized square at `position`, clamped onto the canvas.
    #[must_use]
    pub fn spawn(position: Point, options: &BoardOptions) -> Self {
        let size = options.default_square_size;
        Self::new(SquareId::random(), clamp_position(position, size, options), size, options)
    }

    #[must_use]
    pub fn id(&self) -> &SquareId {
        &self.id
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn sockets(&self) -> &[Socket; 4] {
        &self.sockets
    }

    #[must_use]
    pub fn socket(&self, alignment: SocketAlignment) -> &Socket {
        &self.sockets[alignment.index()]
    }

    /// Whether `point` is strictly inside the square body.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point_in_square(point, self.position, self.size)
    }

    /// Move toward `candidate`, clamped onto the canvas. Returns whether the
    /// position changed.
    pub fn move_to(&mut self, candidate: Point, options: &BoardOptions) -> bool {
        let next = clamp_position(candidate, self.size, options);
        if next == self.position {
            return false;
        }
        self.position = next;
        self.derive_sockets();
        true
    }

    /// Grow or shrink by `delta`. Sizes on or past either bound are rejected
    /// and leave the square untouched.
    pub fn resize(&mut self, delta: f64, options: &BoardOptions) -> bool {
        let proposed = self.size + delta;
        if !options.size_in_bounds(proposed) {
            return false;
        }
        self.size = proposed;
        self.position = clamp_position(self.position, self.size, options);
        self.derive_sockets();
        true
    }

    /// Toggle one socket. Returns whether the flag changed.
    pub fn set_socket_enabled(&mut self, alignment: SocketAlignment, enabled: bool) -> bool {
        let socket = &mut self.sockets[alignment.index()];
        if socket.enabled == enabled {
            return false;
        }
        socket.enabled = enabled;
        true
    }

    fn derive_sockets(&mut self) {
        let positions = socket_positions(self.position, self.size, self.socket_radius);
        for socket in &mut self.sockets {
            socket.position = positions[socket.alignment.index()];
        }
    }

    #[must_use]
    pub fn to_dto(&self) -> SquareDto {
        SquareDto {
            id: self.id.clone(),
            position: self.position,
            size: self.size,
            sockets: SocketFlags {
                top: self.socket(SocketAlignment::Top).enabled,
                right: self.socket(SocketAlignment::Right).enabled,
                bottom: self.socket(SocketAlignment::Bottom).enabled,
                left: self.socket(SocketAlignment::Left).enabled,
            },
        }
    }

    /// Rebuild a square from its persisted form, re-deriving socket positions.
    #[must_use]
    pub fn from_dto(dto: &SquareDto, options: &BoardOptions) -> Self {
        let mut square = Self::new(dto.id.clone(), dto.position, dto.size, options);
        for alignment in SocketAlignment::ALL {
            square.set_socket_enabled(alignment, dto.sockets.get(alignment));
        }
        square
    }
}
