//! Distance metric and distance matrix.
//!
//! Edge costs are plain Euclidean distances between planar points. The
//! matrix caches them so the exhaustive search never recomputes a square
//! root; cached values are bit-identical to direct evaluation.

mod matrix;

pub use matrix::DistanceMatrix;

use crate::models::Point;

/// Euclidean distance `sqrt((a.x - b.x)^2 + (a.y - b.y)^2)`.
///
/// Symmetric, zero iff `a == b`, and non-negative for finite inputs.
/// Computed with [`f64::hypot`], so squaring never overflows: the result
/// is finite whenever the true distance is representable.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::euclidean;
/// use u_delivery::models::Point;
///
/// let d = euclidean(&Point::new(1.0, 1.0), &Point::new(4.0, 5.0));
/// assert!((d - 5.0).abs() < 1e-10);
/// ```
pub fn euclidean(a: &Point, b: &Point) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx.hypot(dy)
}
