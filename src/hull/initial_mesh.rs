use super::merge::derive_edges;
use super::planar::convex_hull2_idx;
use super::support::support_point_id;
use super::{
    ConvexHullError, DegeneratePolicy, Edge, Face, HullOptions, MeshData, TriangleFacet,
};
use crate::math::{Point, Point2, Real, DEFAULT_EPSILON};
use crate::shape::Triangle;
use crate::utils;
use std::cmp::Ordering;

/// Absolute eigenvalue threshold below which a principal direction of the normalized
/// point cloud is considered flat.
pub(super) const SUBSPACE_EPS: Real = 1.0e-7;

pub enum InitialMesh {
    /// The input spans a volume: the hull is seeded with these facets.
    Facets(Vec<TriangleFacet>),
    /// The input lives in a lower-dimensional subspace: the hull is already complete.
    ResultMesh(MeshData),
}

fn build_degenerate_mesh_point(point: Point) -> MeshData {
    MeshData {
        vertices: vec![point],
        faces: Vec::new(),
        edges: Vec::new(),
    }
}

fn build_degenerate_mesh_segment(dir: &na::Vector3<Real>, points: &[Point]) -> MeshData {
    let a = utils::point_cloud_support_point(dir, points);
    let b = utils::point_cloud_support_point(&-*dir, points);

    MeshData {
        vertices: vec![a, b],
        faces: Vec::new(),
        edges: vec![Edge {
            vertex_a: 0,
            vertex_b: 1,
        }],
    }
}

fn build_flat_mesh(
    original_points: &[Point],
    normalized_points: &[Point],
    axis1: &na::Vector3<Real>,
    axis2: &na::Vector3<Real>,
    eps: Real,
    options: &HullOptions,
) -> Result<MeshData, ConvexHullError> {
    // Project into the principal plane…
    let mut subspace_points = Vec::with_capacity(normalized_points.len());

    for point in normalized_points.iter() {
        subspace_points.push(Point2::new(
            point.coords.dot(axis1),
            point.coords.dot(axis2),
        ))
    }

    // … and compute the 2D convex hull, counter-clockwise.
    let idx = convex_hull2_idx(&subspace_points[..], eps);
    let npoints = idx.len();

    if npoints < 3 {
        return Err(ConvexHullError::DegenerateGeometry);
    }

    let vertices: Vec<Point> = idx.into_iter().map(|i| original_points[i]).collect();

    let faces = if options.merge_coplanar_faces {
        // One polygonal face per side.
        let front: Vec<u32> = (0..npoints as u32).collect();
        let back: Vec<u32> = (0..npoints as u32).rev().collect();
        vec![Face { indices: front }, Face { indices: back }]
    } else {
        // Triangulate both sides. The two fans start from different vertices so that
        // no edge ends up shared by more than two triangles.
        let mut faces = Vec::with_capacity(2 * npoints - 4);

        for id in 1u32..npoints as u32 - 1 {
            faces.push(Face {
                indices: vec![0, id, id + 1],
            });
        }

        let a = npoints as u32 - 1;
        for id in 0u32..npoints as u32 - 2 {
            faces.push(Face {
                indices: vec![a, id + 1, id],
            });
        }

        faces
    };

    let edges = derive_edges(&faces)?;

    Ok(MeshData {
        vertices,
        faces,
        edges,
    })
}

/// Detects the effective dimension of the (normalized) input cloud and either seeds
/// the incremental construction with two facets, or returns the finished
/// lower-dimensional hull right away.
///
/// For volumetric inputs the normalized points are re-centered and re-scaled for
/// conditioning; `eps` is rescaled along with them.
pub fn try_get_initial_mesh(
    original_points: &[Point],
    normalized_points: &mut [Point],
    eps: &mut Real,
    options: &HullOptions,
    undecidable: &mut Vec<usize>,
) -> Result<InitialMesh, ConvexHullError> {
    // Compute the eigenvectors to see if the input data live on a subspace.
    let cov_mat = utils::cov(normalized_points);
    let eig = cov_mat.symmetric_eigen();
    let eigvec = eig.eigenvectors;
    let eigval = eig.eigenvalues;

    let mut eigpairs = [
        (eigvec.column(0).into_owned(), eigval[0]),
        (eigvec.column(1).into_owned(), eigval[1]),
        (eigvec.column(2).into_owned(), eigval[2]),
    ];

    // Sort in decreasing order wrt. the eigenvalues.
    eigpairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    // Count the dimension the data lives in.
    let dim_eps = (*eps * *eps).max(SUBSPACE_EPS);
    let mut dimension = 0;
    while dimension < 3 {
        if relative_eq!(eigpairs[dimension].1, 0.0, epsilon = dim_eps) {
            break;
        }

        dimension += 1;
    }

    if dimension < 3 && options.degenerate_policy == DegeneratePolicy::RequireVolume {
        return Err(ConvexHullError::DegenerateGeometry);
    }

    match dimension {
        0 => {
            // The hull is a point.
            Ok(InitialMesh::ResultMesh(build_degenerate_mesh_point(
                original_points[0],
            )))
        }
        1 => {
            // The hull is a segment.
            Ok(InitialMesh::ResultMesh(build_degenerate_mesh_segment(
                &eigpairs[0].0,
                original_points,
            )))
        }
        2 => {
            // The hull is a flat polygon.
            let mesh = build_flat_mesh(
                original_points,
                normalized_points,
                &eigpairs[0].0,
                &eigpairs[1].0,
                *eps,
                options,
            )?;
            Ok(InitialMesh::ResultMesh(mesh))
        }
        3 => {
            // The hull is a polyhedron.
            // Re-center and re-scale for conditioning; `eps` follows the scaling.
            let center = utils::center(normalized_points);
            let scale = eigval.amax();

            for point in normalized_points.iter_mut() {
                *point = Point::from((*point - center) / scale);
            }

            *eps = (*eps / scale).max(DEFAULT_EPSILON * 100.0);

            // Find an initial triangle spanning the principal extent…
            let p1 = support_point_id(&eigpairs[0].0, normalized_points)
                .ok_or(ConvexHullError::InternalError("no support point found"))?;
            let p2 = support_point_id(&-eigpairs[0].0, normalized_points)
                .ok_or(ConvexHullError::InternalError("no support point found"))?;

            let mut max_area = 0.0;
            let mut p3 = usize::MAX;

            for (i, point) in normalized_points.iter().enumerate() {
                let area =
                    Triangle::new(normalized_points[p1], normalized_points[p2], *point).area();

                if area > max_area {
                    max_area = area;
                    p3 = i;
                }
            }

            if p3 == usize::MAX {
                return Err(ConvexHullError::DegenerateGeometry);
            }

            // … and build two facets with opposite normals from it.
            let mut f1 = TriangleFacet::new(p1, p2, p3, normalized_points);
            let mut f2 = TriangleFacet::new(p2, p1, p3, normalized_points);

            // Link the facets together.
            f1.set_adjacency(1, 1, 1, 0, 2, 1);
            f2.set_adjacency(0, 0, 0, 0, 2, 1);

            let mut facets = vec![f1, f2];

            // Attribute each remaining point to the facet it is the furthest outside of.
            for point in 0..normalized_points.len() {
                if point == p1 || point == p2 || point == p3 {
                    continue;
                }

                let mut furthest = usize::MAX;
                let mut furthest_dist = 0.0;

                for (i, curr_facet) in facets.iter().enumerate() {
                    if curr_facet.can_see_point(point, normalized_points, *eps) {
                        let distance = curr_facet.distance_to_point(point, normalized_points);

                        if distance > furthest_dist {
                            furthest = i;
                            furthest_dist = distance;
                        }
                    }
                }

                if furthest != usize::MAX {
                    facets[furthest].add_visible_point(point, normalized_points);
                } else {
                    // The point sees neither facet: it is coplanar with the seed
                    // triangle and will be re-examined once the hull gains volume.
                    undecidable.push(point);
                }
            }

            super::check_facet_links(0, &facets[..]);
            super::check_facet_links(1, &facets[..]);

            Ok(InitialMesh::Facets(facets))
        }
        _ => Err(ConvexHullError::InternalError(
            "unexpected subspace dimension",
        )),
    }
}
