//! Point rotation about a pivot.

use crate::geometry::Point;
use crate::util::math::sin_cos_deg;

/// Rotates `p` about `pivot` by `angle_deg`.
///
/// Positive angles turn counter-clockwise in a y-up frame, which shows as
/// clockwise on a y-down raster:
/// `x' = cx + cos·(x − cx) − sin·(y − cy)`, `y' = cy + sin·(x − cx) + cos·(y − cy)`.
pub fn rotate_point(p: Point, pivot: Point, angle_deg: f64) -> Point {
    let (sin_a, cos_a) = sin_cos_deg(angle_deg);
    rotate_with(p, pivot, sin_a, cos_a)
}

#[inline]
pub(crate) fn rotate_with(p: Point, pivot: Point, sin_a: f64, cos_a: f64) -> Point {
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    Point::new(
        pivot.x + cos_a * dx - sin_a * dy,
        pivot.y + sin_a * dx + cos_a * dy,
    )
}
