use nalgebra::distance;
use serde::{Deserialize, Serialize};

use super::Rect;
use crate::math::Point2;

/// One straight leg of a duct route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub from: Point2,
    pub to: Point2,
    /// Vertical rise taken along this leg, in inches.
    pub rise: f64,
    /// Duct width, in inches.
    pub width: f64,
    /// Vertical extent available to the duct, in inches.
    pub height: f64,
}

impl PathSegment {
    /// Plan length of the leg.
    #[must_use]
    pub fn run(&self) -> f64 {
        distance(&self.from, &self.to)
    }
}

/// An L-shaped duct center-line plus its buffered corridor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctPath {
    pub segments: [PathSegment; 2],
    /// Bounding box of the center-line grown by half the corridor width.
    pub corridor: Rect,
}

impl DuctPath {
    /// Center-line vertices: start, elbow, end.
    #[must_use]
    pub fn points(&self) -> [Point2; 3] {
        [
            self.segments[0].from,
            self.segments[0].to,
            self.segments[1].to,
        ]
    }

    /// Total plan length of both legs.
    #[must_use]
    pub fn run(&self) -> f64 {
        self.segments.iter().map(PathSegment::run).sum()
    }

    /// Total vertical rise of both legs.
    #[must_use]
    pub fn rise(&self) -> f64 {
        self.segments.iter().map(|s| s.rise).sum()
    }
}

/// Orientation of a baffle plane in plan view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaffleKind {
    /// Constant x, spanning the envelope width.
    Vertical,
    /// Constant y, spanning the envelope length.
    Horizontal,
}

/// An internal partition plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baffle {
    pub kind: BaffleKind,
    pub from: Point2,
    pub to: Point2,
    pub thickness: f64,
}

impl Baffle {
    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.from, &self.to)
    }
}

/// Divider strip line separating supply and return in a rotated design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub from: Point2,
    pub to: Point2,
}

impl Divider {
    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.from, &self.to)
    }
}
