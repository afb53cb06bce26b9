use serde::{Deserialize, Serialize};

use crate::math::{Point2, TOLERANCE};

/// Axis-aligned rectangle in plan view.
///
/// `x` and `length` run along the curb length axis, `y` and `width` along the
/// curb width axis. Used for footprints, openings, corridors and the envelope
/// itself, in either local footprint coordinates or absolute assembly
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "L")]
    pub length: f64,
    #[serde(rename = "W")]
    pub width: f64,
}

impl Rect {
    /// Creates a rectangle from its minimum corner and extents.
    #[must_use]
    pub fn new(x: f64, y: f64, length: f64, width: f64) -> Self {
        Self {
            x,
            y,
            length,
            width,
        }
    }

    /// Creates the rectangle spanning two corner points, in any order.
    #[must_use]
    pub fn from_corners(a: &Point2, b: &Point2) -> Self {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Minimum x.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Maximum x.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.length
    }

    /// Minimum y.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Maximum y.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.width
    }

    /// Plan area in square inches.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.x + self.length / 2.0,
            self.y + self.width / 2.0,
        )
    }

    /// Returns this rectangle moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.length, self.width)
    }

    /// Returns this rectangle grown by `margin` on all four sides.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.length + 2.0 * margin,
            self.width + 2.0 * margin,
        )
    }

    /// Returns this rectangle rotated 180° about the center of a
    /// `length x width` frame whose origin is `(0, 0)`.
    #[must_use]
    pub fn rotated_180_in(&self, length: f64, width: f64) -> Self {
        Self::new(
            length - self.x - self.length,
            width - self.y - self.width,
            self.length,
            self.width,
        )
    }

    /// Returns `true` if `other` lies entirely inside this rectangle
    /// (boundaries may touch).
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left() - TOLERANCE
            && other.top() >= self.top() - TOLERANCE
            && other.right() <= self.right() + TOLERANCE
            && other.bottom() <= self.bottom() + TOLERANCE
    }

    /// Standard axis-aligned overlap check. Rectangles that only share an
    /// edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.left()
            || other.right() <= self.left()
            || self.bottom() <= other.top()
            || other.bottom() <= self.top())
    }

    /// Returns the overlapping region, if any.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        let x0 = self.left().max(other.left());
        let y0 = self.top().max(other.top());
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }
}
