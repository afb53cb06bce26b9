use super::{Point2, TOLERANCE};

/// Returns `true` when `a -> b -> c` turns counter-clockwise.
///
/// Collinear triples are not counter-clockwise.
#[must_use]
pub fn ccw(a: &Point2, b: &Point2, c: &Point2) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Orientation-based segment crossing test.
///
/// `a0-a1` and `b0-b1` cross iff each segment has the other's endpoints on
/// opposite sides. Touching and collinear configurations do not count as a
/// crossing.
#[must_use]
pub fn segments_cross(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    ccw(a0, b0, b1) != ccw(a1, b0, b1) && ccw(a0, a1, b0) != ccw(a0, a1, b1)
}

/// Twice the signed area of triangle `a, b, c`.
fn orient(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// `p` is assumed collinear with `a-b`.
fn within_box(a: &Point2, b: &Point2, p: &Point2) -> bool {
    p.x >= a.x.min(b.x) - TOLERANCE
        && p.x <= a.x.max(b.x) + TOLERANCE
        && p.y >= a.y.min(b.y) - TOLERANCE
        && p.y <= a.y.max(b.y) + TOLERANCE
}

/// Closed segment intersection: proper crossings, touching endpoints and
/// collinear overlaps all count.
#[must_use]
pub fn segments_intersect(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let d1 = orient(b0, b1, a0);
    let d2 = orient(b0, b1, a1);
    let d3 = orient(a0, a1, b0);
    let d4 = orient(a0, a1, b1);
    let opposite = |u: f64, v: f64| {
        (u > TOLERANCE && v < -TOLERANCE) || (u < -TOLERANCE && v > TOLERANCE)
    };
    if opposite(d1, d2) && opposite(d3, d4) {
        return true;
    }
    (d1.abs() <= TOLERANCE && within_box(b0, b1, a0))
        || (d2.abs() <= TOLERANCE && within_box(b0, b1, a1))
        || (d3.abs() <= TOLERANCE && within_box(a0, a1, b0))
        || (d4.abs() <= TOLERANCE && within_box(a0, a1, b1))
}

/// Returns `true` if any segment of polyline `a` meets any segment of `b`.
#[must_use]
pub fn polylines_intersect(a: &[Point2], b: &[Point2]) -> bool {
    a.windows(2).any(|sa| {
        b.windows(2)
            .any(|sb| segments_intersect(&sa[0], &sa[1], &sb[0], &sb[1]))
    })
}
