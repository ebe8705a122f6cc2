use crate::math::{Point, Vector};

/// An edge of a hull, joining two vertices.
///
/// On a full 3D hull every edge borders exactly two adjacent faces. The pair is
/// stored in the orientation in which it was first encountered while walking the
/// face loops, but consumers should treat it as unordered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Edge {
    /// The index of the edge's first vertex.
    pub vertex_a: u32,
    /// The index of the edge's second vertex.
    pub vertex_b: u32,
}

/// A planar convex face of a hull.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Face {
    /// The face's vertex loop: an ordered, cyclic sequence of indices into the hull's
    /// vertex array, counter-clockwise when seen from outside the hull.
    pub indices: Vec<u32>,
}

/// The mesh description of a computed convex hull.
///
/// A fresh `MeshData` is built by every hull computation and is entirely owned by the
/// caller afterwards; no state is shared between calls. The vertex array contains
/// only points that actually lie on the hull boundary (interior input points are
/// discarded), each one being one of the deduplicated input points.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MeshData {
    /// The hull vertices.
    pub vertices: Vec<Point>,
    /// The hull faces, as vertex-index loops.
    pub faces: Vec<Face>,
    /// The hull edges, as vertex-index pairs, each listed once.
    pub edges: Vec<Edge>,
}

impl MeshData {
    /// The outward unit normal of the `i`-th face, computed with Newell's method, or
    /// `None` if the face is degenerate.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds or if the face references an out-of-bounds
    /// vertex.
    pub fn face_normal(&self, i: usize) -> Option<Vector> {
        let idx = &self.faces[i].indices;
        let mut normal = Vector::zeros();

        for k in 0..idx.len() {
            let p1 = self.vertices[idx[k] as usize];
            let p2 = self.vertices[idx[(k + 1) % idx.len()] as usize];
            normal += Vector::new(
                (p1.y - p2.y) * (p1.z + p2.z),
                (p1.z - p2.z) * (p1.x + p2.x),
                (p1.x - p2.x) * (p1.y + p2.y),
            );
        }

        normal.try_normalize(0.0)
    }
}

#[cfg(test)]
mod test {
    use super::{Face, MeshData};
    use crate::math::Point;

    #[test]
    fn face_normal_of_ccw_square() {
        let mesh = MeshData {
            vertices: vec![
                Point::new(0.0, 0.0, 1.0),
                Point::new(1.0, 0.0, 1.0),
                Point::new(1.0, 1.0, 1.0),
                Point::new(0.0, 1.0, 1.0),
            ],
            faces: vec![Face {
                indices: vec![0, 1, 2, 3],
            }],
            edges: Vec::new(),
        };

        let normal = mesh.face_normal(0).unwrap();
        assert_relative_eq!(normal.z, 1.0, epsilon = 1.0e-6);
    }
}
