use tracing::debug;

use crate::geometry::{DuctPath, PathSegment, Rect};
use crate::math::Point2;

/// Plans an L-shaped duct center-line between an existing-curb opening and
/// its counterpart on the new curb.
///
/// The first leg runs along x from the old opening's center to the new
/// opening's x; the second leg runs along y to the new opening's center.
/// Ducting therefore stays rectilinear.
#[derive(Debug, Clone)]
pub struct RouteDuct {
    from: Rect,
    to: Rect,
    corridor_width: f64,
    height: f64,
    rise: f64,
}

impl RouteDuct {
    /// Creates a new `RouteDuct` operation.
    ///
    /// * `from`, `to` - Openings in absolute coordinates.
    /// * `corridor_width` - Duct width; the corridor is grown by half of it.
    /// * `height` - Vertical extent available to the duct.
    /// * `rise` - Total rise, split evenly between the two legs.
    #[must_use]
    pub fn new(from: Rect, to: Rect, corridor_width: f64, height: f64, rise: f64) -> Self {
        Self {
            from,
            to,
            corridor_width,
            height,
            rise,
        }
    }

    /// Executes the routing.
    #[must_use]
    pub fn execute(&self) -> DuctPath {
        let start = self.from.center();
        let end = self.to.center();
        let elbow = Point2::new(end.x, start.y);
        let leg = |from: Point2, to: Point2| PathSegment {
            from,
            to,
            rise: self.rise / 2.0,
            width: self.corridor_width,
            height: self.height,
        };
        let segments = [leg(start, elbow), leg(elbow, end)];

        // The elbow is a corner of the start/end box.
        let extent = Rect::from_corners(&start, &end);
        let corridor = extent.expanded(self.corridor_width / 2.0);
        debug!(
            start_x = start.x,
            start_y = start.y,
            end_x = end.x,
            end_y = end.y,
            "routed duct"
        );
        DuctPath { segments, corridor }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn l_shape_horizontal_then_vertical() {
        let path = RouteDuct::new(
            Rect::new(9.0, 9.0, 8.0, 6.0),
            Rect::new(8.0, 8.0, 8.0, 6.0),
            10.0,
            22.0,
            6.0,
        )
        .execute();
        let [a, b, c] = path.points();
        assert_eq!(a, Point2::new(13.0, 12.0));
        assert_eq!(b, Point2::new(12.0, 12.0));
        assert_eq!(c, Point2::new(12.0, 11.0));
        assert_relative_eq!(path.segments[0].rise, 3.0);
        assert_relative_eq!(path.segments[1].rise, 3.0);
        assert_relative_eq!(path.run(), 2.0);
        assert_relative_eq!(path.rise(), 6.0);
        assert_relative_eq!(path.segments[0].height, 22.0);
    }

    #[test]
    fn corridor_is_buffered_extent() {
        let path = RouteDuct::new(
            Rect::new(9.0, 9.0, 8.0, 6.0),
            Rect::new(8.0, 8.0, 8.0, 6.0),
            10.0,
            22.0,
            6.0,
        )
        .execute();
        assert_eq!(path.corridor, Rect::new(7.0, 6.0, 11.0, 11.0));
    }

    #[test]
    fn aligned_openings_give_zero_length_legs() {
        let r = Rect::new(10.0, 10.0, 4.0, 4.0);
        let path = RouteDuct::new(r, r, 4.0, 12.0, 0.0).execute();
        assert_relative_eq!(path.run(), 0.0);
        assert_eq!(path.corridor, Rect::new(10.0, 10.0, 4.0, 4.0));
    }
}
