pub mod intersect_2d;

/// 2D point type, in inches, in the assembly plan frame.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Clamps `v` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics when `lo > hi`; the lower bound
/// wins, which keeps degenerate envelopes well defined.
#[must_use]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}

/// Rounds to `places` decimal places.
#[must_use]
pub fn round_to(v: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}
