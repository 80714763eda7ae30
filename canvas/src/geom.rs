//! Pure geometry helpers: points, clamping, containment, and orthogonal paths.
//!
//! Nothing in here touches entity state. Callers compute a value and decide
//! whether to commit it.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// The axis along which two points differ the most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Clamp `value` into `[min, max]`.
///
/// When `min > max` the upper bound wins, which keeps a square pinned to the
/// top-left margin on a canvas too small to hold it.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Whether `point` lies strictly inside the axis-aligned square at `origin`
/// with edge length `size`. Points on the edge are outside.
#[must_use]
pub fn point_in_square(point: Point, origin: Point, size: f64) -> bool {
    let x = point.x > origin.x && point.x < origin.x + size;
    let y = point.y > origin.y && point.y < origin.y + size;
    x && y
}

/// Whether `point` lies strictly inside the square of half-extent `radius`
/// centered at `center`.
#[must_use]
pub fn point_in_radius(point: Point, center: Point, radius: f64) -> bool {
    point_in_square(point, center.offset(-radius, -radius), radius * 2.0)
}

/// Pick the dominant axis between two points. Ties go vertical.
#[must_use]
pub fn dominant_axis(from: Point, to: Point) -> Axis {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    if dx > dy { Axis::Horizontal } else { Axis::Vertical }
}

/// Build the four corner points of a three-segment orthogonal path from
/// `from` to `to`.
///
/// The first point leaves `from` by `spacing` toward the destination along
/// the dominant axis, the path bends twice at the midpoint of that axis, and
/// the last point stops `spacing` short of `to`.
#[must_use]
pub fn orthogonal_path(from: Point, to: Point, spacing: f64) -> [Point; 4] {
    match dominant_axis(from, to) {
        Axis::Horizontal => {
            let dir = direction(to.x - from.x);
            let mid_x = (from.x + to.x) / 2.0;
            [
                Point::new(from.x + dir * spacing, from.y),
                Point::new(mid_x, from.y),
                Point::new(mid_x, to.y),
                Point::new(to.x - dir * spacing, to.y),
            ]
        }
        Axis::Vertical => {
            let dir = direction(to.y - from.y);
            let mid_y = (from.y + to.y) / 2.0;
            [
                Point::new(from.x, from.y + dir * spacing),
                Point::new(from.x, mid_y),
                Point::new(to.x, mid_y),
                Point::new(to.x, to.y - dir * spacing),
            ]
        }
    }
}

/// Unit direction of a signed delta; zero counts as positive.
fn direction(delta: f64) -> f64 {
    if delta < 0.0 { -1.0 } else { 1.0 }
}
