//! Translates a hull into the two buffers a typical debug renderer consumes: a flat
//! line-segment list built from the edges, and an indexed triangle mesh built by fan
//! triangulation of the faces.

use hull3d::math::Point;
use hull3d::{try_convex_hull, MeshData};

fn wireframe_lines(mesh: &MeshData) -> Vec<Point> {
    let mut lines = Vec::with_capacity(mesh.edges.len() * 2);
    for edge in mesh.edges.iter() {
        lines.push(mesh.vertices[edge.vertex_a as usize]);
        lines.push(mesh.vertices[edge.vertex_b as usize]);
    }
    lines
}

fn triangle_indices(mesh: &MeshData) -> Vec<u32> {
    let mut indices = Vec::new();
    for face in mesh.faces.iter() {
        let first_point = face.indices[0];
        for i in 1..face.indices.len() - 1 {
            indices.push(first_point);
            indices.push(face.indices[i]);
            indices.push(face.indices[i + 1]);
        }
    }
    indices
}

fn main() {
    let mut cube = Vec::new();
    for &x in &[0.0, 1.0] {
        for &y in &[0.0, 1.0] {
            for &z in &[0.0, 1.0] {
                cube.push(Point::new(x, y, z));
            }
        }
    }

    let mesh = try_convex_hull(&cube, 1.0e-6).unwrap();

    let lines = wireframe_lines(&mesh);
    let indices = triangle_indices(&mesh);
    println!(
        "wireframe: {} segments, solid: {} triangles",
        lines.len() / 2,
        indices.len() / 3
    );
}
