use tracing::{info, warn};

use crate::geometry::{Baffle, BaffleKind, DuctPath, Envelope};
use crate::math::intersect_2d::polylines_intersect;
use crate::math::{clamp, Point2};

/// Result of [`InsertBaffles`].
#[derive(Debug, Clone, PartialEq)]
pub struct BaffleOutcome {
    /// Empty, or exactly one vertical and one horizontal baffle.
    pub baffles: Vec<Baffle>,
    pub corridors_overlap: bool,
    /// Supply and return end up in separate compartments: either their
    /// corridors never met, or they met without the center-lines touching.
    pub separated: bool,
}

/// Partitions the envelope with internal baffles when the supply and return
/// corridors overlap. The exterior stays a plain rectangle.
#[derive(Debug, Clone)]
pub struct InsertBaffles {
    supply: DuctPath,
    return_: DuctPath,
    curb: Envelope,
    thickness: f64,
}

impl InsertBaffles {
    /// Creates a new `InsertBaffles` operation.
    #[must_use]
    pub fn new(supply: DuctPath, return_: DuctPath, curb: Envelope, thickness: f64) -> Self {
        Self {
            supply,
            return_,
            curb,
            thickness,
        }
    }

    /// Executes the overlap test and baffle placement.
    #[must_use]
    pub fn execute(&self) -> BaffleOutcome {
        let Some(overlap) = self.supply.corridor.intersection(&self.return_.corridor) else {
            return BaffleOutcome {
                baffles: Vec::new(),
                corridors_overlap: false,
                separated: true,
            };
        };

        let mid = overlap.center();
        let x = clamp(mid.x, 0.0, self.curb.length);
        let y = clamp(mid.y, 0.0, self.curb.width);
        let baffles = vec![
            Baffle {
                kind: BaffleKind::Vertical,
                from: Point2::new(x, 0.0),
                to: Point2::new(x, self.curb.width),
                thickness: self.thickness,
            },
            Baffle {
                kind: BaffleKind::Horizontal,
                from: Point2::new(0.0, y),
                to: Point2::new(self.curb.length, y),
                thickness: self.thickness,
            },
        ];

        let separated = !polylines_intersect(&self.supply.points(), &self.return_.points());
        if separated {
            info!(x, y, "corridors overlap; inserted baffles");
        } else {
            warn!(x, y, "supply and return center-lines meet; baffles cannot separate them");
        }
        BaffleOutcome {
            baffles,
            corridors_overlap: true,
            separated,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::Rect;
    use crate::operations::route::RouteDuct;

    const CURB: Envelope = Envelope {
        length: 48.0,
        width: 38.0,
        height: 22.0,
    };

    fn route(from: Rect, to: Rect, width: f64) -> DuctPath {
        RouteDuct::new(from, to, width, 22.0, 6.0).execute()
    }

    #[test]
    fn distant_corridors_need_no_baffles() {
        let s = route(Rect::new(9.0, 9.0, 8.0, 6.0), Rect::new(8.0, 8.0, 8.0, 6.0), 10.0);
        let r = route(Rect::new(24.0, 9.0, 8.0, 6.0), Rect::new(23.0, 8.0, 8.0, 6.0), 10.0);
        let out = InsertBaffles::new(s, r, CURB, 0.125).execute();
        assert!(out.baffles.is_empty());
        assert!(!out.corridors_overlap);
        assert!(out.separated);
    }

    #[test]
    fn overlapping_corridors_get_two_baffles() {
        let s = route(Rect::new(9.0, 9.0, 8.0, 6.0), Rect::new(8.0, 8.0, 8.0, 6.0), 16.0);
        let r = route(Rect::new(24.0, 9.0, 8.0, 6.0), Rect::new(23.0, 8.0, 8.0, 6.0), 16.0);
        let out = InsertBaffles::new(s, r, CURB, 0.125).execute();
        assert_eq!(out.baffles.len(), 2);
        assert!(out.separated);

        // Supply corridor x in [4, 21], return x in [19, 36]; overlap mid x = 20.
        let v = &out.baffles[0];
        assert_eq!(v.kind, BaffleKind::Vertical);
        assert_relative_eq!(v.from.x, 20.0);
        assert_relative_eq!(v.length(), 38.0);
        let h = &out.baffles[1];
        assert_eq!(h.kind, BaffleKind::Horizontal);
        assert_relative_eq!(h.from.y, 11.5);
        assert_relative_eq!(h.thickness, 0.125);
    }

    #[test]
    fn crossing_center_lines_are_not_separated() {
        // Supply runs right then up; return runs down through its elbow.
        let s = route(Rect::new(0.0, 10.0, 4.0, 4.0), Rect::new(20.0, 20.0, 4.0, 4.0), 4.0);
        let r = route(Rect::new(8.0, 0.0, 4.0, 4.0), Rect::new(8.0, 20.0, 4.0, 4.0), 4.0);
        let out = InsertBaffles::new(s, r, CURB, 0.125).execute();
        assert!(out.corridors_overlap);
        assert_eq!(out.baffles.len(), 2);
        assert!(!out.separated);
    }

    #[test]
    fn baffles_are_clamped_into_the_envelope() {
        // Overlap midpoint (61, 42) lies outside the 48 x 38 envelope.
        let s = route(Rect::new(60.0, 40.0, 4.0, 4.0), Rect::new(60.0, 40.0, 4.0, 4.0), 20.0);
        let r = route(Rect::new(58.0, 40.0, 4.0, 4.0), Rect::new(58.0, 40.0, 4.0, 4.0), 20.0);
        let out = InsertBaffles::new(s, r, CURB, 0.125).execute();
        assert_eq!(out.baffles.len(), 2);
        assert_relative_eq!(out.baffles[0].from.x, 48.0);
        assert_relative_eq!(out.baffles[1].from.y, 38.0);
        for b in &out.baffles {
            for p in [b.from, b.to] {
                assert!(p.x >= 0.0 && p.x <= CURB.length);
                assert!(p.y >= 0.0 && p.y <= CURB.width);
            }
        }
    }
}
