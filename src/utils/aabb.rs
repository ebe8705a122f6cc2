use crate::math::Point;

/// Computes the axis-aligned bounding box of a set of points.
///
/// # Panics
///
/// Panics if the input slice is empty.
pub fn point_cloud_aabb(pts: &[Point]) -> (Point, Point) {
    let mut mins = pts[0].coords;
    let mut maxs = pts[0].coords;

    for pt in pts[1..].iter() {
        mins = mins.inf(&pt.coords);
        maxs = maxs.sup(&pt.coords);
    }

    (Point::from(mins), Point::from(maxs))
}
