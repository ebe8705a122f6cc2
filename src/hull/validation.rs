use super::{ConvexHullError, MeshData, TriangleFacet};
use crate::math::{Point, Real};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::SortedPair;

/// Checks the adjacency links of one facet of the hull under construction.
///
/// Panics on inconsistency; this is only used on the freshly seeded facets, where a
/// failure means a construction bug rather than an input problem.
pub(super) fn check_facet_links(ifacet: usize, facets: &[TriangleFacet]) {
    let facet = &facets[ifacet];

    for i in 0..3 {
        assert!(facets[facet.adj[i]].valid);
    }

    for i in 0..3 {
        let adj_facet = &facets[facet.adj[i]];

        assert_eq!(adj_facet.adj[facet.indirect_adj_id[i]], ifacet);
        assert_eq!(adj_facet.indirect_adj_id[facet.indirect_adj_id[i]], i);
        assert_eq!(
            adj_facet.first_point_from_edge(facet.indirect_adj_id[i]),
            facet.second_point_from_edge(i)
        );
        assert_eq!(
            adj_facet.second_point_from_edge(facet.indirect_adj_id[i]),
            facet.first_point_from_edge(i)
        );
    }
}

/// Checks that a computed hull is properly formed.
///
/// The structural invariants are verified first: every face is a loop of at least 3
/// in-bounds vertices, consistently oriented (each directed edge appears exactly
/// once), every undirected edge borders exactly two faces and appears exactly once in
/// the mesh's edge list, and the Euler characteristic `V - E + F` is 2. Then the
/// metric invariants are verified with the `tolerance` slack: every face is planar
/// and convex, and every point of `enclosed_points` lies inside or on the hull.
///
/// Meshes without faces (the degenerate point and segment results) are accepted
/// as-is; the manifold invariants do not apply to them.
///
/// This runs automatically at the end of every hull computation, so a mesh that
/// violates its invariants is never returned as a success. It is exported mostly for
/// tests and debugging.
pub fn check_convex_hull(
    mesh: &MeshData,
    enclosed_points: &[Point],
    tolerance: Real,
) -> Result<(), ConvexHullError> {
    if mesh.faces.is_empty() {
        return Ok(());
    }

    let nvtx = mesh.vertices.len() as u32;

    // Structure: loops, orientation, edge incidence.
    let mut directed: HashMap<(u32, u32), ()> = HashMap::default();
    let mut undirected: HashMap<SortedPair<u32>, u8> = HashMap::default();

    for face in mesh.faces.iter() {
        let n = face.indices.len();
        if n < 3 {
            return Err(ConvexHullError::InternalError(
                "face with fewer than 3 vertices",
            ));
        }

        for k in 0..n {
            let a = face.indices[k];
            let b = face.indices[(k + 1) % n];

            if a >= nvtx || b >= nvtx {
                return Err(ConvexHullError::InternalError(
                    "face references an out-of-bounds vertex",
                ));
            }

            if a == b || directed.insert((a, b), ()).is_some() {
                return Err(ConvexHullError::InternalError(
                    "inconsistent face orientations",
                ));
            }

            match undirected.entry(SortedPair::new(a, b)) {
                Entry::Vacant(e) => {
                    let _ = e.insert(1);
                }
                Entry::Occupied(mut e) => {
                    if *e.get() == 2 {
                        return Err(ConvexHullError::InternalError(
                            "edge shared by more than two faces",
                        ));
                    }
                    *e.get_mut() += 1;
                }
            }
        }
    }

    if undirected.values().any(|count| *count != 2) {
        return Err(ConvexHullError::InternalError(
            "edge bordered by a single face",
        ));
    }

    // The edge list must match the edges derived from the faces, each listed once.
    if mesh.edges.len() != undirected.len() {
        return Err(ConvexHullError::InternalError(
            "edge list does not match the face loops",
        ));
    }

    for edge in mesh.edges.iter() {
        match undirected.entry(SortedPair::new(edge.vertex_a, edge.vertex_b)) {
            Entry::Occupied(e) => {
                let _ = e.remove();
            }
            Entry::Vacant(_) => {
                return Err(ConvexHullError::InternalError(
                    "edge list does not match the face loops",
                ));
            }
        }
    }

    // Euler characteristic of a genus-0 closed surface.
    if mesh.vertices.len() + mesh.faces.len() != mesh.edges.len() + 2 {
        return Err(ConvexHullError::InternalError(
            "Euler characteristic is not 2",
        ));
    }

    // Metric invariants: planarity and convexity of every face, containment of every
    // enclosed point.
    for i in 0..mesh.faces.len() {
        let idx = &mesh.faces[i].indices;
        let normal = mesh
            .face_normal(i)
            .ok_or(ConvexHullError::DegenerateGeometry)?;
        let origin = mesh.vertices[idx[0] as usize];

        for &id in idx.iter() {
            let dist = normal.dot(&(mesh.vertices[id as usize] - origin));
            if dist.abs() > tolerance {
                return Err(ConvexHullError::DegenerateGeometry);
            }
        }

        for k in 0..idx.len() {
            let a = mesh.vertices[idx[k] as usize];
            let b = mesh.vertices[idx[(k + 1) % idx.len()] as usize];
            let c = mesh.vertices[idx[(k + 2) % idx.len()] as usize];
            let ab = b - a;
            let bc = c - b;

            // A reflex corner deviating by more than the tolerance makes the face
            // non-convex.
            if ab.cross(&bc).dot(&normal) < -tolerance * ab.norm().max(bc.norm()) {
                return Err(ConvexHullError::DegenerateGeometry);
            }
        }

        for pt in enclosed_points.iter() {
            if normal.dot(&(*pt - origin)) > tolerance {
                return Err(ConvexHullError::DegenerateGeometry);
            }
        }
    }

    Ok(())
}
