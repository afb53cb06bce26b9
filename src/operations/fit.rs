use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ValidationErrors;
use crate::geometry::{Envelope, Footprint, Rect};
use crate::math::{clamp, Vector2};
use crate::params::Parameters;
use crate::request::SiteConditions;

use super::site::pick_height;

/// Supply and return openings of both curbs in absolute assembly
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOpenings {
    pub bottom_supply: Rect,
    pub bottom_return: Rect,
    pub top_supply: Rect,
    pub top_return: Rect,
}

/// Both footprints centered in the outer envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FittedLayout {
    pub curb: Envelope,
    /// Existing curb placement.
    pub bottom_rect: Rect,
    /// New curb placement.
    pub seat: Rect,
    pub openings: PlacedOpenings,
    /// Displacement of the seat from its centered position.
    pub seat_offset: Vector2,
}

impl FittedLayout {
    /// The seat where the fitter centered it, before any offset.
    fn centered_seat(&self) -> Rect {
        self.seat.translated(-self.seat_offset.x, -self.seat_offset.y)
    }

    /// Openings in their own curb's frame, as declared before placement.
    #[must_use]
    pub fn local_openings(&self) -> PlacedOpenings {
        let b = self.bottom_rect;
        let s = self.centered_seat();
        PlacedOpenings {
            bottom_supply: self.openings.bottom_supply.translated(-b.x, -b.y),
            bottom_return: self.openings.bottom_return.translated(-b.x, -b.y),
            top_supply: self.openings.top_supply.translated(-s.x, -s.y),
            top_return: self.openings.top_return.translated(-s.x, -s.y),
        }
    }

    /// Returns a copy with the new curb's openings rotated 180° about the
    /// seat center.
    #[must_use]
    pub fn with_top_rotated(&self) -> Self {
        let seat = self.centered_seat();
        let rotate = |r: &Rect| {
            r.translated(-seat.x, -seat.y)
                .rotated_180_in(seat.length, seat.width)
                .translated(seat.x, seat.y)
        };
        let mut out = *self;
        out.openings.top_supply = rotate(&self.openings.top_supply);
        out.openings.top_return = rotate(&self.openings.top_return);
        out
    }

    /// Returns a copy with the seat moved by `(dx, dy)`. Openings and paths
    /// stay where they were routed.
    #[must_use]
    pub fn with_seat_offset(&self, dx: f64, dy: f64) -> Self {
        let mut out = *self;
        out.seat = self.seat.translated(dx, dy);
        out.seat_offset += Vector2::new(dx, dy);
        out
    }

    /// The new curb's openings at the current seat position.
    #[must_use]
    pub fn seated_top_openings(&self) -> [Rect; 2] {
        let d = self.seat_offset;
        [
            self.openings.top_supply.translated(d.x, d.y),
            self.openings.top_return.translated(d.x, d.y),
        ]
    }
}

/// Sizes the outer envelope and centers both footprints in it.
#[derive(Debug, Clone)]
pub struct FitEnvelope {
    old: Footprint,
    new: Footprint,
    margin: f64,
    height_min: f64,
    height_max: f64,
    requested_height: Option<f64>,
    site: SiteConditions,
}

impl FitEnvelope {
    /// Creates a new `FitEnvelope` operation.
    #[must_use]
    pub fn new(old: Footprint, new: Footprint, params: &Parameters) -> Self {
        Self {
            old,
            new,
            margin: params.strategy.envelope_margin(),
            height_min: params.envelope_min,
            height_max: params.envelope_max,
            requested_height: None,
            site: SiteConditions::default(),
        }
    }

    /// Requests an explicit adapter height. It must lie inside the envelope
    /// bounds.
    #[must_use]
    pub fn with_height(mut self, height: Option<f64>) -> Self {
        self.requested_height = height;
        self
    }

    /// Site conditions used when no height is requested or declared.
    #[must_use]
    pub fn with_site(mut self, site: SiteConditions) -> Self {
        self.site = site;
        self
    }

    /// Executes the fit.
    ///
    /// # Errors
    ///
    /// Returns every input problem found: non-positive dimensions, openings
    /// outside their footprint, or a requested height outside the envelope
    /// bounds.
    pub fn execute(&self) -> Result<FittedLayout, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.old.check("Existing", &mut errors);
        self.new.check("New", &mut errors);
        let height = self.resolve_height(&mut errors);
        if !errors.is_empty() {
            warn!(count = errors.messages().len(), "fit rejected input");
            return Err(errors);
        }

        let length = self.old.length.max(self.new.length) + self.margin;
        let width = self.old.width.max(self.new.width) + self.margin;
        let curb = Envelope {
            length,
            width,
            height,
        };

        let bottom_rect = centered(&curb, &self.old);
        let seat = centered(&curb, &self.new);
        let openings = PlacedOpenings {
            bottom_supply: self.old.supply.translated(bottom_rect.x, bottom_rect.y),
            bottom_return: self.old.return_.translated(bottom_rect.x, bottom_rect.y),
            top_supply: self.new.supply.translated(seat.x, seat.y),
            top_return: self.new.return_.translated(seat.x, seat.y),
        };
        debug!(
            length,
            width, height, seat_x = seat.x, seat_y = seat.y, "fitted envelope"
        );

        Ok(FittedLayout {
            curb,
            bottom_rect,
            seat,
            openings,
            seat_offset: Vector2::zeros(),
        })
    }

    fn resolve_height(&self, errors: &mut ValidationErrors) -> f64 {
        let (lo, hi) = (self.height_min, self.height_max);
        if let Some(h) = self.requested_height {
            if h < lo || h > hi {
                errors.push(format!("Height must be between {lo} and {hi} inches."));
            }
            return h;
        }
        match self.new.height.or(self.old.height) {
            Some(h) => clamp(h, lo, hi),
            None => pick_height(&self.site, lo, hi),
        }
    }
}

fn centered(curb: &Envelope, fp: &Footprint) -> Rect {
    Rect::new(
        (curb.length - fp.length) / 2.0,
        (curb.width - fp.width) / 2.0,
        fp.length,
        fp.width,
    )
}
