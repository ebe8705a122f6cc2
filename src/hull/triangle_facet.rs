use crate::math::{Point, Real, Vector};
use crate::shape::Triangle;
use num::Bounded;

/// A triangular facet of a hull under construction.
///
/// Facets live in a growing arena (a `Vec`) and reference their neighbors by index.
/// Removal is expressed by clearing `valid` instead of deleting the entry, so that
/// adjacency links never dangle while the silhouette of a new point is recomputed.
#[derive(Debug)]
pub struct TriangleFacet {
    pub valid: bool,
    pub affinely_dependent: bool,
    pub normal: Vector,
    /// Adjacent facet indices, one per edge.
    pub adj: [usize; 3],
    /// For each edge, the id of that edge inside the adjacent facet.
    pub indirect_adj_id: [usize; 3],
    pub pts: [usize; 3],
    /// Conflict list: the points lying outside of this facet.
    pub visible_points: Vec<usize>,
    pub furthest_point: usize,
    pub furthest_distance: Real,
}

impl TriangleFacet {
    pub fn new(p1: usize, p2: usize, p3: usize, points: &[Point]) -> TriangleFacet {
        let tri = Triangle::new(points[p1], points[p2], points[p3]);
        let affinely_dependent = tri.is_affinely_dependent();
        let normal = tri
            .scaled_normal()
            .try_normalize(0.0)
            .unwrap_or_else(Vector::zeros);

        TriangleFacet {
            valid: true,
            affinely_dependent,
            normal,
            adj: [0, 0, 0],
            indirect_adj_id: [0, 0, 0],
            pts: [p1, p2, p3],
            visible_points: Vec::new(),
            furthest_point: Bounded::max_value(),
            furthest_distance: 0.0,
        }
    }

    pub fn add_visible_point(&mut self, pid: usize, points: &[Point]) {
        let distance = self.distance_to_point(pid, points);

        if distance > self.furthest_distance {
            self.furthest_distance = distance;
            self.furthest_point = pid;
        }

        self.visible_points.push(pid);
    }

    pub fn distance_to_point(&self, point: usize, points: &[Point]) -> Real {
        self.normal.dot(&(points[point] - points[self.pts[0]]))
    }

    pub fn set_adjacency(
        &mut self,
        adj1: usize,
        adj2: usize,
        adj3: usize,
        id_adj1: usize,
        id_adj2: usize,
        id_adj3: usize,
    ) {
        self.adj = [adj1, adj2, adj3];
        self.indirect_adj_id = [id_adj1, id_adj2, id_adj3];
    }

    pub fn first_point_from_edge(&self, id: usize) -> usize {
        self.pts[id]
    }

    pub fn second_point_from_edge(&self, id: usize) -> usize {
        self.pts[(id + 1) % 3]
    }

    /// Tests if `point` lies strictly outside of this facet, i.e., further than `eps`
    /// along the facet's outward normal. A point within `eps` of the support plane is
    /// never considered outside, so borderline points can never trigger a hull update.
    pub fn can_see_point(&self, point: usize, points: &[Point], eps: Real) -> bool {
        // An affinely-dependent facet cannot see any point.
        if self.affinely_dependent {
            return false;
        }

        let p0 = points[self.pts[0]];
        let pt = points[point];

        (pt - p0).dot(&self.normal) > eps
    }

    /// Tests if `point` can see this facet, in a way that does not depend on the
    /// order of the three facet vertices.
    pub fn order_independent_can_be_seen_by_point(&self, point: usize, points: &[Point]) -> bool {
        // An affinely-dependent facet can be seen by any point.
        if self.affinely_dependent {
            return true;
        }

        for i in 0..3 {
            let p0 = points[self.pts[i]];
            let pt = points[point];

            if (pt - p0).dot(&self.normal) >= 0.0 {
                return true;
            }
        }

        false
    }
}
