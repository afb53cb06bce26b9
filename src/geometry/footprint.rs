use serde::{Deserialize, Serialize};

use super::Rect;
use crate::error::ValidationErrors;

/// A curb footprint with its supply and return openings in local
/// coordinates (origin at the footprint's minimum corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    #[serde(rename = "L")]
    pub length: f64,
    #[serde(rename = "W")]
    pub width: f64,
    #[serde(rename = "H", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub supply: Rect,
    #[serde(rename = "return")]
    pub return_: Rect,
}

impl Footprint {
    /// Creates a footprint with no declared height.
    #[must_use]
    pub fn new(length: f64, width: f64, supply: Rect, return_: Rect) -> Self {
        Self {
            length,
            width,
            height: None,
            supply,
            return_,
        }
    }

    /// Sets the declared curb height.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// The footprint outline in its own frame.
    #[must_use]
    pub fn outline(&self) -> Rect {
        Rect::new(0.0, 0.0, self.length, self.width)
    }

    /// Appends a message to `errors` for every dimensional problem found.
    ///
    /// `name` prefixes each message ("Existing", "New").
    pub fn check(&self, name: &str, errors: &mut ValidationErrors) {
        if self.length <= 0.0 || self.width <= 0.0 {
            errors.push(format!("{name} curb: length and width must be positive."));
        }
        check_opening(self, &self.supply, &format!("{name} supply"), errors);
        check_opening(self, &self.return_, &format!("{name} return"), errors);
    }
}

fn check_opening(fp: &Footprint, opening: &Rect, name: &str, errors: &mut ValidationErrors) {
    if opening.length <= 0.0 || opening.width <= 0.0 {
        errors.push(format!("{name} width/length must be positive."));
    }
    if opening.x < 0.0 || opening.y < 0.0 {
        errors.push(format!("{name} x/y must be >= 0."));
    }
    if opening.right() > fp.length || opening.bottom() > fp.width {
        errors.push(format!("{name} cutout exceeds curb top frame bounds."));
    }
}

/// Outer adapter envelope dimensions, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "L")]
    pub length: f64,
    #[serde(rename = "W")]
    pub width: f64,
    #[serde(rename = "H")]
    pub height: f64,
}

impl Envelope {
    /// The plan outline, origin at `(0, 0)`.
    #[must_use]
    pub fn outline(&self) -> Rect {
        Rect::new(0.0, 0.0, self.length, self.width)
    }
}
