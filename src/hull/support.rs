use crate::math::{Point, Real, Vector};
use crate::utils;

/// Returns the index of the support point of a list of points.
pub fn support_point_id(direction: &Vector, points: &[Point]) -> Option<usize> {
    let mut argmax = None;
    let mut max = -Real::MAX;

    for (id, pt) in points.iter().enumerate() {
        let dot = direction.dot(&pt.coords);

        if dot > max {
            argmax = Some(id);
            max = dot;
        }
    }

    argmax
}

/// Returns the index of the support point of an indexed list of points.
pub fn indexed_support_point_id<I>(direction: &Vector, points: &[Point], idx: I) -> Option<usize>
where
    I: Iterator<Item = usize>,
{
    let mut argmax = None;
    let mut max = -Real::MAX;

    for i in idx {
        let dot = direction.dot(&points[i].coords);

        if dot > max {
            argmax = Some(i);
            max = dot;
        }
    }

    argmax
}

/// Returns the number `n` such that `idx.nth(n)` indexes the support point.
pub fn indexed_support_point_nth<I>(direction: &Vector, points: &[Point], idx: I) -> Option<usize>
where
    I: Iterator<Item = usize>,
{
    let mut argmax = None;
    let mut max = -Real::MAX;

    for (k, i) in idx.enumerate() {
        let dot = direction.dot(&points[i].coords);

        if dot > max {
            argmax = Some(k);
            max = dot;
        }
    }

    argmax
}

/// Scales and centers the given set of points depending on their AABB.
///
/// Returns the center and the diagonal length of the original AABB.
pub fn normalize(coords: &mut [Point]) -> (Point, Real) {
    let (mins, maxs) = utils::point_cloud_aabb(coords);
    let diag = na::distance(&mins, &maxs);
    let center = na::center(&mins, &maxs);

    for c in coords.iter_mut() {
        *c = (*c + (-center.coords)) / diag;
    }

    (center, diag)
}
