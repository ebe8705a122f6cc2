use super::merge::build_mesh_data;
use super::support::{indexed_support_point_id, indexed_support_point_nth, normalize};
use super::validation::check_convex_hull;
use super::{
    try_get_initial_mesh, ConvexHullError, HullOptions, InitialMesh, MeshData, TriangleFacet,
};
use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::utils;

/// Computes the convex hull of a set of 3D points.
///
/// # Panics
///
/// Panics if the computation fails; see [`try_convex_hull`] for the fallible version.
pub fn convex_hull(points: &[Point], tolerance: Real) -> MeshData {
    match try_convex_hull(points, tolerance) {
        Ok(mesh) => mesh,
        Err(err) => panic!("convex hull computation failed: {err}"),
    }
}

/// Computes the convex hull of a set of 3D points with the default options and the
/// given tolerance.
///
/// The result describes the smallest convex polyhedron enclosing `points`: the hull
/// vertices (a subset of the deduplicated input points), the faces as
/// counter-clockwise vertex-index loops, and the edges as vertex-index pairs, each
/// edge bordering exactly two faces.
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use hull3d::math::Point;
/// use hull3d::try_convex_hull;
///
/// let points = [
///     Point::origin(),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(0.0, 1.0, 0.0),
///     Point::new(0.0, 0.0, 1.0),
///     Point::new(0.25, 0.25, 0.25), // interior, not a hull vertex
/// ];
///
/// let mesh = try_convex_hull(&points, 1.0e-6).unwrap();
/// assert_eq!(mesh.vertices.len(), 4);
/// assert_eq!(mesh.faces.len(), 4);
/// assert_eq!(mesh.edges.len(), 6);
/// # }
/// ```
pub fn try_convex_hull(points: &[Point], tolerance: Real) -> Result<MeshData, ConvexHullError> {
    try_convex_hull_with(points, &HullOptions::with_tolerance(tolerance))
}

/// Computes the convex hull of a set of 3D points with explicit options.
pub fn try_convex_hull_with(
    points: &[Point],
    options: &HullOptions,
) -> Result<MeshData, ConvexHullError> {
    if !options.tolerance.is_finite() || options.tolerance < 0.0 {
        return Err(ConvexHullError::InvalidTolerance(options.tolerance));
    }

    if points.iter().any(|p| !p.coords.iter().all(|x| x.is_finite())) {
        return Err(ConvexHullError::DegenerateGeometry);
    }

    // Merge coincident points. The hull vertices are drawn from this set, so the
    // output coordinates are always exact copies of input coordinates.
    let distinct = dedup_points(points, options.tolerance);
    if distinct.len() < 3 {
        return Err(ConvexHullError::InsufficientPoints);
    }

    let mut normalized_points = distinct.clone();
    let (_, diag) = normalize(&mut normalized_points[..]);

    // All visibility decisions happen in the normalized space.
    let mut eps = (options.tolerance / diag).max(DEFAULT_EPSILON * 100.0);

    let mut undecidable_points = Vec::new();
    let mut silhouette_loop_facets_and_idx = Vec::new();
    let mut removed_facets = Vec::new();

    let mut triangles = match try_get_initial_mesh(
        &distinct,
        &mut normalized_points[..],
        &mut eps,
        options,
        &mut undecidable_points,
    )? {
        InitialMesh::Facets(facets) => facets,
        InitialMesh::ResultMesh(mesh) => {
            // Lower-dimensional hulls are complete already. Dimension reduction can
            // absorb more off-plane jitter than the caller tolerance (the flatness
            // decision is made on an eigenvalue, i.e. a variance, so a lone outlier
            // can deviate by up to sqrt(n) times the per-axis threshold), hence the
            // checks run with the subspace detection slack.
            let dim_eps = (eps * eps).max(super::initial_mesh::SUBSPACE_EPS);
            let flat_slack = ((distinct.len() as Real).sqrt() * 2.0 * dim_eps.sqrt() * diag)
                .max(world_tolerance(options.tolerance, diag) * 10.0);
            check_convex_hull(&mesh, &distinct, flat_slack)?;
            return Ok(mesh);
        }
    };

    let mut i = 0;
    while i != triangles.len() {
        silhouette_loop_facets_and_idx.clear();

        if !triangles[i].valid || triangles[i].affinely_dependent {
            i += 1;
            continue;
        }

        let pt_id = indexed_support_point_id(
            &triangles[i].normal,
            &normalized_points[..],
            triangles[i].visible_points.iter().copied(),
        );

        if let Some(point) = pt_id {
            triangles[i].valid = false;

            removed_facets.clear();
            removed_facets.push(i);

            for j in 0usize..3 {
                compute_silhouette(
                    triangles[i].adj[j],
                    triangles[i].indirect_adj_id[j],
                    point,
                    &mut silhouette_loop_facets_and_idx,
                    &normalized_points[..],
                    &mut removed_facets,
                    &mut triangles[..],
                );
            }

            // In some degenerate cases (because of float rounding problems), the
            // silhouette may contain self-intersections (a single vertex used by more
            // than two of its edges) or multiple disjoint but nested loops.
            fix_silhouette_topology(
                &normalized_points,
                &mut silhouette_loop_facets_and_idx,
                &mut removed_facets,
                &mut triangles[..],
            )?;

            if silhouette_loop_facets_and_idx.is_empty() {
                // Due to inaccuracies, the silhouette could not be computed (the
                // point seems to be visible from every facet).
                let mut any_valid = false;
                for facet in triangles[i + 1..].iter() {
                    if facet.valid && !facet.affinely_dependent {
                        any_valid = true;
                    }
                }

                if any_valid {
                    log::debug!(
                        "convex hull failure: the silhouette of point {point} is empty \
                         but valid facets remain"
                    );
                    return Err(ConvexHullError::DegenerateGeometry);
                }

                // Every remaining facet is degenerate anyway: keep the current one
                // and let the final checks decide whether the hull is acceptable.
                triangles[i].valid = true;
                break;
            }

            attach_and_push_facets(
                &silhouette_loop_facets_and_idx[..],
                point,
                &normalized_points[..],
                &mut triangles,
                &removed_facets[..],
                &mut undecidable_points,
                eps,
            )?;
        }

        i += 1;
    }

    let mut loops: Vec<Vec<u32>> = Vec::new();

    for facet in triangles.iter() {
        if facet.valid {
            loops.push(vec![
                facet.pts[0] as u32,
                facet.pts[1] as u32,
                facet.pts[2] as u32,
            ]);
        }
    }

    let mut vertices = distinct.clone();
    utils::remove_unused_points(&mut vertices, &mut loops[..]);

    if vertices.is_empty() {
        return Err(ConvexHullError::InternalError("empty output mesh"));
    }

    let world_eps = world_tolerance(options.tolerance, diag);
    let mesh = build_mesh_data(vertices, loops, world_eps, options.merge_coplanar_faces)?;

    // Never hand back a mesh that violates the manifold or containment invariants.
    check_convex_hull(&mesh, &distinct, world_eps * 10.0)?;

    Ok(mesh)
}

/// The effective tolerance in the input's coordinate scale.
fn world_tolerance(tolerance: Real, diag: Real) -> Real {
    tolerance.max(DEFAULT_EPSILON * 100.0 * diag)
}

/// Collapses points that are closer to each other than `tolerance`.
fn dedup_points(points: &[Point], tolerance: Real) -> Vec<Point> {
    let mut distinct: Vec<Point> = Vec::with_capacity(points.len());
    let sq_tol = tolerance * tolerance;

    for pt in points.iter() {
        if distinct.iter().all(|p| (pt - p).norm_squared() > sq_tol) {
            distinct.push(*pt);
        }
    }

    distinct
}

fn compute_silhouette(
    facet: usize,
    indirect_id: usize,
    point: usize,
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    points: &[Point],
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) {
    if triangles[facet].valid {
        if !triangles[facet].order_independent_can_be_seen_by_point(point, points) {
            out_facets_and_idx.push((facet, indirect_id));
        } else {
            // The facet is visible from the point: it is interior to the new cone and
            // must be removed from the hull.
            triangles[facet].valid = false;
            removed_facets.push(facet);

            compute_silhouette(
                triangles[facet].adj[(indirect_id + 1) % 3],
                triangles[facet].indirect_adj_id[(indirect_id + 1) % 3],
                point,
                out_facets_and_idx,
                points,
                removed_facets,
                triangles,
            );

            compute_silhouette(
                triangles[facet].adj[(indirect_id + 2) % 3],
                triangles[facet].indirect_adj_id[(indirect_id + 2) % 3],
                point,
                out_facets_and_idx,
                points,
                removed_facets,
                triangles,
            );
        }
    }
}

fn fix_silhouette_topology(
    points: &[Point],
    out_facets_and_idx: &mut Vec<(usize, usize)>,
    removed_facets: &mut Vec<usize>,
    triangles: &mut [TriangleFacet],
) -> Result<(), ConvexHullError> {
    let mut workspace = vec![0; points.len()];
    let mut needs_fixing = false;

    // NOTE: we work with the second point of each silhouette edge because the
    // traversal sees it before the first one.
    for (facet, adj_id) in out_facets_and_idx.iter() {
        let p = triangles[*facet].second_point_from_edge(*adj_id);
        workspace[p] += 1;

        if workspace[p] > 1 {
            needs_fixing = true;
        }
    }

    if !needs_fixing {
        return Ok(());
    }

    log::debug!("repairing a self-intersecting silhouette loop");

    // Find a vertex that belongs to the outermost loop, to start the traversal from.
    let mut loop_start = 0;
    for (facet, adj_id) in out_facets_and_idx.iter() {
        let p1 = points[triangles[*facet].second_point_from_edge(*adj_id)];
        let p2 = points[triangles[*facet].first_point_from_edge(*adj_id)];
        let supp = indexed_support_point_nth(
            &(p2 - p1),
            points,
            out_facets_and_idx
                .iter()
                .map(|(f, ai)| triangles[*f].second_point_from_edge(*ai)),
        )
        .ok_or(ConvexHullError::InternalError(
            "silhouette repair failed: no support point",
        ))?;

        let selected = &out_facets_and_idx[supp];
        if workspace[triangles[selected.0].second_point_from_edge(selected.1)] == 1 {
            // This is a valid vertex to start with.
            loop_start = supp;
            break;
        }
    }

    // Keep only the outer loop; facets bordering the nested loops are dropped from
    // the hull as well.
    let mut removing = None;
    let old_facets_and_idx = std::mem::take(out_facets_and_idx);

    for i in 0..old_facets_and_idx.len() {
        let facet_id = (loop_start + i) % old_facets_and_idx.len();
        let (facet, adj_id) = old_facets_and_idx[facet_id];

        match removing {
            Some(p) => {
                let p1 = triangles[facet].second_point_from_edge(adj_id);
                if p == p1 {
                    removing = None;
                }
            }
            _ => {
                let p1 = triangles[facet].second_point_from_edge(adj_id);
                if workspace[p1] > 1 {
                    removing = Some(p1);
                }
            }
        }

        if removing.is_some() {
            if triangles[facet].valid {
                triangles[facet].valid = false;
                removed_facets.push(facet);
            }
        } else {
            out_facets_and_idx.push((facet, adj_id));
        }
    }

    Ok(())
}

fn attach_and_push_facets(
    silhouette_loop_facets_and_idx: &[(usize, usize)],
    point: usize,
    points: &[Point],
    triangles: &mut Vec<TriangleFacet>,
    removed_facets: &[usize],
    undecidable: &mut Vec<usize>,
    eps: Real,
) -> Result<(), ConvexHullError> {
    // The silhouette is built to be in CCW order.
    let mut new_facets = Vec::with_capacity(silhouette_loop_facets_and_idx.len());

    // Create new facets, one per silhouette edge.
    for (adj_facet, indirect_id) in silhouette_loop_facets_and_idx.iter().copied() {
        let facet = TriangleFacet::new(
            point,
            triangles[adj_facet].second_point_from_edge(indirect_id),
            triangles[adj_facet].first_point_from_edge(indirect_id),
            points,
        );
        new_facets.push(facet);
    }

    // Link the new facets together and with the silhouette.
    for i in 0..silhouette_loop_facets_and_idx.len() {
        let prev_facet = if i == 0 {
            triangles.len() + silhouette_loop_facets_and_idx.len() - 1
        } else {
            triangles.len() + i - 1
        };

        let (middle_facet, middle_id) = silhouette_loop_facets_and_idx[i];
        let next_facet = triangles.len() + (i + 1) % silhouette_loop_facets_and_idx.len();

        new_facets[i].set_adjacency(prev_facet, middle_facet, next_facet, 2, middle_id, 0);

        if triangles[triangles[middle_facet].adj[middle_id]].valid {
            // We are about to overwrite a link to a valid facet: the silhouette was
            // not a proper boundary between the removed and the retained facets.
            return Err(ConvexHullError::InternalError(
                "attempted to overwrite a valid adjacency link",
            ));
        }

        triangles[middle_facet].adj[middle_id] = triangles.len() + i; // The future id of the new facet.
        triangles[middle_facet].indirect_adj_id[middle_id] = 1;
    }

    // Redistribute the conflict points of the removed facets onto the new ones.
    for curr_facet in removed_facets.iter() {
        for visible_point in triangles[*curr_facet].visible_points.iter() {
            if *visible_point == point {
                continue;
            }

            let mut furthest = usize::MAX;
            let mut furthest_dist = 0.0;

            for (i, curr_facet) in new_facets.iter_mut().enumerate() {
                if !curr_facet.affinely_dependent {
                    let distance = curr_facet.distance_to_point(*visible_point, points);

                    if distance > furthest_dist {
                        furthest = i;
                        furthest_dist = distance;
                    }
                }
            }

            if furthest != usize::MAX && new_facets[furthest].can_see_point(*visible_point, points, eps)
            {
                new_facets[furthest].add_visible_point(*visible_point, points);
            }

            // If none of the new facets can be seen from the point, it is now
            // interior to the hull and implicitly discarded.
        }
    }

    // Try to assign the undecidable points to one of the new facets.
    let mut i = 0;
    while i != undecidable.len() {
        let mut furthest = usize::MAX;
        let mut furthest_dist = 0.0;
        let undecidable_point = undecidable[i];

        for (j, curr_facet) in new_facets.iter_mut().enumerate() {
            if curr_facet.can_see_point(undecidable_point, points, eps) {
                let distance = curr_facet.distance_to_point(undecidable_point, points);

                if distance > furthest_dist {
                    furthest = j;
                    furthest_dist = distance;
                }
            }
        }

        if furthest != usize::MAX {
            new_facets[furthest].add_visible_point(undecidable_point, points);
            let _ = undecidable.swap_remove(i);
        } else {
            i += 1;
        }
    }

    triangles.append(&mut new_facets);

    Ok(())
}

#[cfg(test)]
mod test {
    use super::dedup_points;
    use crate::math::Point;

    #[test]
    fn dedup_collapses_points_within_tolerance() {
        let points = [
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0 + 1.0e-4, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];

        assert_eq!(dedup_points(&points, 1.0e-3).len(), 3);
        assert_eq!(dedup_points(&points, 0.0).len(), 4);
    }

    #[test]
    fn dedup_with_zero_tolerance_drops_exact_duplicates() {
        let points = [Point::origin(), Point::origin(), Point::origin()];
        assert_eq!(dedup_points(&points, 0.0).len(), 1);
    }
}
