use nalgebra::center;
use tracing::info;

use crate::geometry::Divider;
use crate::math::intersect_2d::segments_cross;
use crate::operations::fit::{FittedLayout, PlacedOpenings};

/// Returns `true` if the supply center-line (old supply center to new
/// supply center) crosses the return center-line.
///
/// Pass each curb's openings in its own frame, see
/// [`FittedLayout::local_openings`].
#[must_use]
pub fn openings_cross(o: &PlacedOpenings) -> bool {
    segments_cross(
        &o.bottom_supply.center(),
        &o.top_supply.center(),
        &o.bottom_return.center(),
        &o.top_return.center(),
    )
}

/// Result of [`RotateOnCrossing`].
#[derive(Debug, Clone, Copy)]
pub struct RotationOutcome {
    pub layout: FittedLayout,
    pub rotated_180: bool,
    /// Divider strip from the supply pair's midpoint to the return pair's.
    pub divider: Divider,
    /// Crossing test on the final layout.
    pub crossing: bool,
}

/// Flips the new curb's openings 180° when supply and return center-lines
/// cross. At most one flip is attempted.
#[derive(Debug, Clone)]
pub struct RotateOnCrossing {
    layout: FittedLayout,
}

impl RotateOnCrossing {
    /// Creates a new `RotateOnCrossing` operation.
    #[must_use]
    pub fn new(layout: FittedLayout) -> Self {
        Self { layout }
    }

    /// Executes the crossing test and the optional flip.
    ///
    /// Both tests compare the curbs in their own frames, so differently
    /// sized curbs are judged by how their openings are laid out, not by
    /// where the fitter centered them.
    #[must_use]
    pub fn execute(&self) -> RotationOutcome {
        let rotated_180 = openings_cross(&self.layout.local_openings());
        let layout = if rotated_180 {
            info!("supply/return center-lines cross; rotating new curb 180 degrees");
            self.layout.with_top_rotated()
        } else {
            self.layout
        };

        let o = &layout.openings;
        let divider = Divider {
            from: center(&o.bottom_supply.center(), &o.top_supply.center()),
            to: center(&o.bottom_return.center(), &o.top_return.center()),
        };
        RotationOutcome {
            layout,
            rotated_180,
            divider,
            crossing: openings_cross(&layout.local_openings()),
        }
    }
}
