mod baffle;
mod rotation;

pub use baffle::{BaffleOutcome, InsertBaffles};
pub use rotation::{openings_cross, RotateOnCrossing, RotationOutcome};

use crate::geometry::{Baffle, Divider, DuctPath};
use crate::params::{MitigationStrategy, Parameters};

use super::fit::FittedLayout;
use super::route::RouteDuct;

/// Routed and de-conflicted supply/return ducting for one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The layout after mitigation (new openings possibly rotated).
    pub layout: FittedLayout,
    pub supply_path: DuctPath,
    pub return_path: DuctPath,
    pub rotated_180: bool,
    pub divider: Option<Divider>,
    pub baffles: Vec<Baffle>,
    /// Supply and return are kept apart after mitigation.
    pub separated: bool,
}

/// Routes both ducts and applies the configured crossing mitigation.
///
/// The rotation strategy decides on the opening center-lines before routing;
/// the baffle strategy decides on the routed corridors.
#[derive(Debug, Clone)]
pub struct ResolveCrossing<'a> {
    layout: FittedLayout,
    params: &'a Parameters,
}

impl<'a> ResolveCrossing<'a> {
    /// Creates a new `ResolveCrossing` operation.
    #[must_use]
    pub fn new(layout: FittedLayout, params: &'a Parameters) -> Self {
        Self { layout, params }
    }

    /// Executes routing and mitigation.
    #[must_use]
    pub fn execute(&self) -> Resolution {
        match self.params.strategy {
            MitigationStrategy::Rotation => {
                let out = RotateOnCrossing::new(self.layout).execute();
                let (supply_path, return_path) = self.route(&out.layout);
                Resolution {
                    layout: out.layout,
                    supply_path,
                    return_path,
                    rotated_180: out.rotated_180,
                    divider: Some(out.divider),
                    baffles: Vec::new(),
                    separated: !out.crossing,
                }
            }
            MitigationStrategy::Baffle => {
                let (supply_path, return_path) = self.route(&self.layout);
                let out = InsertBaffles::new(
                    supply_path,
                    return_path,
                    self.layout.curb,
                    self.params.baffle_thickness,
                )
                .execute();
                Resolution {
                    layout: self.layout,
                    supply_path,
                    return_path,
                    rotated_180: false,
                    divider: None,
                    baffles: out.baffles,
                    separated: out.separated,
                }
            }
        }
    }

    fn route(&self, layout: &FittedLayout) -> (DuctPath, DuctPath) {
        let o = &layout.openings;
        let p = self.params;
        let h = layout.curb.height;
        (
            RouteDuct::new(o.bottom_supply, o.top_supply, p.corridor_width, h, p.default_rise)
                .execute(),
            RouteDuct::new(o.bottom_return, o.top_return, p.corridor_width, h, p.default_rise)
                .execute(),
        )
    }
}
