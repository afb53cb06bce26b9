use serde::{Deserialize, Serialize};

use crate::geometry::{Envelope, Rect};
use crate::math::{Point2, Vector2};
use crate::params::MitigationStrategy;

/// Fraction of an opening's panel-area share that moves the center of
/// gravity.
const CUTOUT_WEIGHT: f64 = 0.01;

/// Estimated plan center of gravity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CogEstimate {
    pub point: Point2,
    /// Height of the center of gravity, at mid-height of the adapter.
    pub z: f64,
    /// Distance from the envelope's geometric center, inches.
    pub offset_in: f64,
}

impl CogEstimate {
    fn from_shift(curb: &Envelope, shift: Vector2) -> Self {
        Self {
            point: Point2::new(curb.length / 2.0, curb.width / 2.0) + shift,
            z: curb.height / 2.0,
            offset_in: shift.x.hypot(shift.y),
        }
    }
}

/// Seat-offset heuristic: half the seat center's displacement from the
/// envelope center.
#[must_use]
pub fn seat_offset_cog(curb: &Envelope, seat: &Rect) -> CogEstimate {
    let c = seat.center();
    let shift = Vector2::new(
        (c.x - curb.length / 2.0) / 2.0,
        (c.y - curb.width / 2.0) / 2.0,
    );
    CogEstimate::from_shift(curb, shift)
}

/// Opening-area-weighted shift: each cutout removes metal and pushes the
/// center away from itself in proportion to its share of the panel area.
#[must_use]
pub fn opening_weighted_cog(curb: &Envelope, openings: &[Rect]) -> CogEstimate {
    let panel_area = curb.length * curb.width;
    let center = Point2::new(curb.length / 2.0, curb.width / 2.0);
    let mut shift = Vector2::zeros();
    if panel_area > 0.0 {
        for o in openings.iter().filter(|o| o.area() > 0.0) {
            let weight_loss = CUTOUT_WEIGHT * (o.area() / panel_area);
            shift -= (o.center() - center) * weight_loss;
        }
    }
    CogEstimate::from_shift(curb, shift)
}

/// The formulation paired with each mitigation strategy.
#[must_use]
pub fn estimate_cog(
    strategy: MitigationStrategy,
    curb: &Envelope,
    seat: &Rect,
    top_openings: &[Rect],
) -> CogEstimate {
    match strategy {
        MitigationStrategy::Baffle => seat_offset_cog(curb, seat),
        MitigationStrategy::Rotation => opening_weighted_cog(curb, top_openings),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const CURB: Envelope = Envelope {
        length: 48.0,
        width: 38.0,
        height: 22.0,
    };

    #[test]
    fn centered_seat_has_zero_offset() {
        let est = seat_offset_cog(&CURB, &Rect::new(3.0, 3.0, 42.0, 32.0));
        assert_relative_eq!(est.offset_in, 0.0);
        assert_relative_eq!(est.point.x, 24.0);
        assert_relative_eq!(est.point.y, 19.0);
        assert_relative_eq!(est.z, 11.0);
    }

    #[test]
    fn seat_offset_is_halved() {
        let est = seat_offset_cog(&CURB, &Rect::new(5.0, 5.0, 42.0, 32.0));
        assert_relative_eq!(est.offset_in, 2.0_f64.sqrt());
        let est = seat_offset_cog(&CURB, &Rect::new(9.0, 3.0, 42.0, 32.0));
        assert_relative_eq!(est.offset_in, 3.0);
    }

    #[test]
    fn cutouts_push_center_away() {
        // One 8 x 6 cutout 10 in left of center along x.
        let cutout = Rect::new(10.0, 16.0, 8.0, 6.0);
        let est = opening_weighted_cog(&CURB, &[cutout]);
        let expected = 0.01 * (48.0 / (48.0 * 38.0)) * 10.0;
        assert_relative_eq!(est.point.x - 24.0, expected, epsilon = 1e-12);
        assert_relative_eq!(est.point.y, 19.0);
        assert_relative_eq!(est.offset_in, expected);
        // Cutouts in plan do not move the center vertically.
        assert_relative_eq!(est.z, 11.0);
    }

    #[test]
    fn symmetric_cutouts_cancel() {
        let a = Rect::new(10.0, 16.0, 8.0, 6.0);
        let b = Rect::new(30.0, 16.0, 8.0, 6.0);
        let est = opening_weighted_cog(&CURB, &[a, b]);
        assert_relative_eq!(est.offset_in, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_openings_are_ignored() {
        let est = opening_weighted_cog(&CURB, &[Rect::new(0.0, 0.0, 0.0, 6.0)]);
        assert_relative_eq!(est.offset_in, 0.0);
    }
}
