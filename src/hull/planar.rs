use crate::math::{Point2, Real};
use ordered_float::OrderedFloat;

/// Computes the counter-clockwise convex hull of a set of 2D points, returned as
/// indices into `points`.
///
/// This is only used as the fallback for inputs that are coplanar within tolerance;
/// the public API of this crate stays 3D. Points within `eps` of a hull edge are
/// treated as collinear and do not become hull vertices.
pub fn convex_hull2_idx(points: &[Point2], eps: Real) -> Vec<usize> {
    let mut ids: Vec<usize> = (0..points.len()).collect();
    ids.sort_by_key(|&i| (OrderedFloat(points[i].x), OrderedFloat(points[i].y)));

    let turns_left = |o: usize, a: usize, b: usize| {
        let oa = points[a] - points[o];
        let ob = points[b] - points[o];
        // The cross product is twice the signed area, so the distance from `a` to the
        // segment [o, b] exceeds `eps` only if it exceeds `eps * |ob|`.
        oa.x * ob.y - oa.y * ob.x > eps * ob.norm()
    };

    let mut lower: Vec<usize> = Vec::new();
    for &i in ids.iter() {
        while lower.len() >= 2 && !turns_left(lower[lower.len() - 2], lower[lower.len() - 1], i) {
            let _ = lower.pop();
        }
        lower.push(i);
    }

    let mut upper: Vec<usize> = Vec::new();
    for &i in ids.iter().rev() {
        while upper.len() >= 2 && !turns_left(upper[upper.len() - 2], upper[upper.len() - 1], i) {
            let _ = upper.pop();
        }
        upper.push(i);
    }

    // The endpoints of each chain coincide with the start of the other.
    let _ = lower.pop();
    let _ = upper.pop();
    lower.append(&mut upper);
    lower
}

#[cfg(test)]
mod test {
    use super::convex_hull2_idx;
    use crate::math::Point2;

    #[test]
    fn square_with_interior_and_collinear_points() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.5, 0.5), // interior
            Point2::new(0.5, 0.0), // on an edge
        ];

        let idx = convex_hull2_idx(&points, 1.0e-6);
        assert_eq!(idx.len(), 4);
        assert!(!idx.contains(&4));
        assert!(!idx.contains(&5));
    }

    #[test]
    fn hull_is_counter_clockwise() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
        ];

        let idx = convex_hull2_idx(&points, 1.0e-6);
        let n = idx.len();
        let mut doubled_area = 0.0;
        for k in 0..n {
            let p1 = points[idx[k]];
            let p2 = points[idx[(k + 1) % n]];
            doubled_area += p1.x * p2.y - p2.x * p1.y;
        }
        assert!(doubled_area > 0.0);
    }
}
