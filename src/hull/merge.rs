use super::{ConvexHullError, Edge, Face, MeshData};
use crate::math::{Point, Real};
use crate::shape::Triangle;
use crate::utils;
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::SortedPair;
use smallvec::SmallVec;

/// Assembles the final [`MeshData`] from the triangles produced by the incremental
/// construction: optionally merges coplanar adjacent triangles into polygonal faces,
/// then derives the edge list from the face loops.
pub fn build_mesh_data(
    mut vertices: Vec<Point>,
    mut loops: Vec<Vec<u32>>,
    plane_tol: Real,
    merge_faces: bool,
) -> Result<MeshData, ConvexHullError> {
    if merge_faces {
        loops = merge_coplanar_faces(&vertices, &loops, plane_tol)?;
        // Merging can orphan a vertex that was interior to a planar region.
        utils::remove_unused_points(&mut vertices, &mut loops[..]);
    }

    let faces: Vec<Face> = loops.into_iter().map(|indices| Face { indices }).collect();
    let edges = derive_edges(&faces)?;

    Ok(MeshData {
        vertices,
        faces,
        edges,
    })
}

/// Merges adjacent triangles that are coplanar within `plane_tol` into single
/// polygonal faces, preserving the counter-clockwise orientation of the loops.
fn merge_coplanar_faces(
    vertices: &[Point],
    tris: &[Vec<u32>],
    plane_tol: Real,
) -> Result<Vec<Vec<u32>>, ConvexHullError> {
    // Adjacency between triangles across shared edges.
    let mut tris_of_edge: HashMap<SortedPair<u32>, SmallVec<[usize; 2]>> = HashMap::default();

    for (tid, tri) in tris.iter().enumerate() {
        if tri.len() != 3 {
            return Err(ConvexHullError::InternalError(
                "non-triangular facet before face merging",
            ));
        }

        for k in 0..3 {
            let key = SortedPair::new(tri[k], tri[(k + 1) % 3]);
            tris_of_edge.entry(key).or_default().push(tid);
        }
    }

    for ids in tris_of_edge.values() {
        if ids.len() != 2 {
            return Err(ConvexHullError::InternalError(
                "edge not shared by exactly two facets",
            ));
        }
    }

    let mut normals = Vec::with_capacity(tris.len());
    for tri in tris.iter() {
        let normal = Triangle::new(
            vertices[tri[0] as usize],
            vertices[tri[1] as usize],
            vertices[tri[2] as usize],
        )
        .scaled_normal()
        .try_normalize(0.0)
        .ok_or(ConvexHullError::InternalError("degenerate facet normal"))?;
        normals.push(normal);
    }

    // Group the triangles into maximal coplanar regions, by region growth over the
    // adjacency graph. Coplanarity is always measured against the plane of the
    // region's seed triangle so that near-coplanarity cannot chain across a curved
    // area.
    let mut region_of = vec![usize::MAX; tris.len()];
    let mut regions: Vec<Vec<usize>> = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..tris.len() {
        if region_of[seed] != usize::MAX {
            continue;
        }

        let rid = regions.len();
        let seed_normal = normals[seed];
        let seed_origin = vertices[tris[seed][0] as usize];
        let mut members = vec![seed];

        region_of[seed] = rid;
        stack.push(seed);

        while let Some(t) = stack.pop() {
            for k in 0..3 {
                let key = SortedPair::new(tris[t][k], tris[t][(k + 1) % 3]);
                for &u in tris_of_edge[&key].iter() {
                    if u == t || region_of[u] != usize::MAX {
                        continue;
                    }

                    let coplanar = seed_normal.dot(&normals[u]) > 0.0
                        && tris[u].iter().all(|&i| {
                            let dist =
                                seed_normal.dot(&(vertices[i as usize] - seed_origin));
                            dist.abs() <= plane_tol
                        });

                    if coplanar {
                        region_of[u] = rid;
                        members.push(u);
                        stack.push(u);
                    }
                }
            }
        }

        regions.push(members);
    }

    // Extract the boundary loop of each region. The directed edges of the CCW
    // triangle loops directly give the CCW boundary loop of the region.
    let mut merged = Vec::with_capacity(regions.len());

    for (rid, members) in regions.iter().enumerate() {
        if members.len() == 1 {
            merged.push(tris[members[0]].clone());
            continue;
        }

        let mut next: HashMap<u32, u32> = HashMap::default();
        let mut boundary_len = 0usize;
        let mut start = None;

        for &t in members.iter() {
            for k in 0..3 {
                let a = tris[t][k];
                let b = tris[t][(k + 1) % 3];
                let pair = &tris_of_edge[&SortedPair::new(a, b)];
                let other = if pair[0] == t { pair[1] } else { pair[0] };

                if region_of[other] != rid {
                    if next.insert(a, b).is_some() {
                        return Err(ConvexHullError::InternalError(
                            "merged face boundary is not a simple loop",
                        ));
                    }

                    boundary_len += 1;
                    if start.is_none() {
                        start = Some(a);
                    }
                }
            }
        }

        let start = start.ok_or(ConvexHullError::InternalError(
            "merged face has no boundary",
        ))?;

        let mut loop_ids = Vec::with_capacity(boundary_len);
        let mut curr = start;

        loop {
            loop_ids.push(curr);
            curr = *next.get(&curr).ok_or(ConvexHullError::InternalError(
                "merged face boundary is broken",
            ))?;

            if curr == start {
                break;
            }

            if loop_ids.len() > boundary_len {
                return Err(ConvexHullError::InternalError(
                    "merged face boundary does not close",
                ));
            }
        }

        if loop_ids.len() != boundary_len {
            return Err(ConvexHullError::InternalError(
                "merged face boundary has multiple loops",
            ));
        }

        merged.push(loop_ids);
    }

    Ok(merged)
}

/// Derives the edge list of a hull from its face loops.
///
/// Every edge is reported once, in the orientation in which it was first seen, and
/// must be shared by exactly two faces.
pub fn derive_edges(faces: &[Face]) -> Result<Vec<Edge>, ConvexHullError> {
    let mut edges = Vec::new();
    let mut n_half_edges = 0usize;
    let mut sides_seen: HashMap<SortedPair<u32>, u8> = HashMap::default();

    for face in faces.iter() {
        let n = face.indices.len();
        if n < 3 {
            return Err(ConvexHullError::InternalError(
                "face with fewer than 3 vertices",
            ));
        }

        n_half_edges += n;

        for k in 0..n {
            let a = face.indices[k];
            let b = face.indices[(k + 1) % n];

            if a == b {
                return Err(ConvexHullError::InternalError("degenerate edge in a face"));
            }

            match sides_seen.entry(SortedPair::new(a, b)) {
                Entry::Vacant(e) => {
                    let _ = e.insert(1);
                    edges.push(Edge {
                        vertex_a: a,
                        vertex_b: b,
                    });
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

    if n_half_edges != edges.len() * 2 {
        return Err(ConvexHullError::InternalError(
            "edge bordered by a single face",
        ));
    }

    Ok(edges)
}

#[cfg(test)]
mod test {
    use super::{build_mesh_data, derive_edges};
    use crate::hull::Face;
    use crate::math::Point;

    fn tetrahedron() -> (Vec<Point>, Vec<Vec<u32>>) {
        let vertices = vec![
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ];
        let loops = vec![
            vec![0u32, 2, 1],
            vec![0, 1, 3],
            vec![0, 3, 2],
            vec![1, 2, 3],
        ];
        (vertices, loops)
    }

    #[test]
    fn tetrahedron_faces_are_not_merged() {
        let (vertices, loops) = tetrahedron();
        let mesh = build_mesh_data(vertices, loops, 1.0e-6, true).unwrap();

        assert_eq!(mesh.faces.len(), 4);
        assert_eq!(mesh.edges.len(), 6);
    }

    #[test]
    fn split_quad_is_merged_back_into_one_loop_per_side() {
        // A unit square split into two triangles, seen from both sides.
        let vertices = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        // The two sides use different diagonals so that no edge is shared by more
        // than two triangles.
        let loops = vec![
            vec![0u32, 1, 2],
            vec![0, 2, 3],
            vec![3, 2, 1],
            vec![3, 1, 0],
        ];

        let mesh = build_mesh_data(vertices, loops, 1.0e-6, true).unwrap();
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.edges.len(), 4);
        assert!(mesh.faces.iter().all(|f| f.indices.len() == 4));
    }

    #[test]
    fn open_face_set_is_rejected() {
        let faces = [
            Face {
                indices: vec![0, 1, 2],
            },
            Face {
                indices: vec![0, 2, 3],
            },
        ];
        assert!(derive_edges(&faces).is_err());
    }
}
