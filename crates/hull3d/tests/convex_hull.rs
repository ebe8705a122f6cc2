extern crate nalgebra as na;

use hull3d::math::{Point, Real};
use hull3d::{
    check_convex_hull, try_convex_hull, try_convex_hull_with, ConvexHullError, DegeneratePolicy,
    HullOptions, MeshData,
};

const TOL: Real = 1.0e-6;

fn euler_characteristic(mesh: &MeshData) -> isize {
    mesh.vertices.len() as isize - mesh.edges.len() as isize + mesh.faces.len() as isize
}

fn assert_well_formed(mesh: &MeshData, enclosed: &[Point], slack: Real) {
    if let Err(err) = check_convex_hull(mesh, enclosed, slack) {
        panic!("ill-formed hull: {err}");
    }
}

/// A canonical sort key for comparing vertex sets regardless of ordering.
fn sorted_vertex_keys(mesh: &MeshData) -> Vec<[u32; 3]> {
    let mut keys: Vec<[u32; 3]> = mesh
        .vertices
        .iter()
        .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
        .collect();
    keys.sort();
    keys
}

fn cube_corners() -> Vec<Point> {
    let mut corners = Vec::new();
    for &x in &[0.0, 1.0] {
        for &y in &[0.0, 1.0] {
            for &z in &[0.0, 1.0] {
                corners.push(Point::new(x, y, z));
            }
        }
    }
    corners
}

fn random_cloud(seed: u64, n: usize) -> Vec<Point> {
    let mut rng = oorandom::Rand32::new(seed);
    (0..n)
        .map(|_| {
            Point::new(
                rng.rand_float() as Real,
                rng.rand_float() as Real,
                rng.rand_float() as Real,
            )
        })
        .collect()
}

fn random_sphere_cloud(seed: u64, n: usize) -> Vec<Point> {
    let mut rng = oorandom::Rand32::new(seed);
    let mut points = Vec::with_capacity(n);
    while points.len() != n {
        let v = na::Vector3::new(
            rng.rand_float() as Real - 0.5,
            rng.rand_float() as Real - 0.5,
            rng.rand_float() as Real - 0.5,
        );
        if let Some(dir) = v.try_normalize(1.0e-3) {
            points.push(Point::from(dir));
        }
    }
    points
}

#[test]
fn fewer_than_three_distinct_points_are_rejected() {
    assert_eq!(
        try_convex_hull(&[], TOL),
        Err(ConvexHullError::InsufficientPoints)
    );
    assert_eq!(
        try_convex_hull(&[Point::origin()], TOL),
        Err(ConvexHullError::InsufficientPoints)
    );
    assert_eq!(
        try_convex_hull(&[Point::origin(), Point::new(1.0, 0.0, 0.0)], TOL),
        Err(ConvexHullError::InsufficientPoints)
    );

    // Five points, but all within tolerance of each other.
    let coincident = vec![Point::new(0.5, 0.5, 0.5); 5];
    assert_eq!(
        try_convex_hull(&coincident, TOL),
        Err(ConvexHullError::InsufficientPoints)
    );
}

#[test]
fn invalid_tolerances_are_rejected() {
    let points = cube_corners();

    assert!(matches!(
        try_convex_hull(&points, -1.0e-3),
        Err(ConvexHullError::InvalidTolerance(_))
    ));
    assert!(matches!(
        try_convex_hull(&points, Real::NAN),
        Err(ConvexHullError::InvalidTolerance(_))
    ));
    assert!(matches!(
        try_convex_hull(&points, Real::INFINITY),
        Err(ConvexHullError::InvalidTolerance(_))
    ));
}

#[test]
fn non_finite_points_are_rejected() {
    let mut points = cube_corners();
    points.push(Point::new(Real::NAN, 0.0, 0.0));
    assert_eq!(
        try_convex_hull(&points, TOL),
        Err(ConvexHullError::DegenerateGeometry)
    );
}

#[test]
fn tetrahedron_hull() {
    let points = [
        Point::origin(),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    ];

    let mesh = try_convex_hull(&points, TOL).unwrap();

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.faces.len(), 4);
    assert_eq!(mesh.edges.len(), 6);
    assert_eq!(euler_characteristic(&mesh), 2);
    assert!(mesh.faces.iter().all(|f| f.indices.len() == 3));
    assert_well_formed(&mesh, &points, 1.0e-4);
}

#[test]
fn interior_point_is_discarded() {
    let points = [
        Point::origin(),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
        Point::new(0.2, 0.2, 0.2),
    ];

    let mesh = try_convex_hull(&points, TOL).unwrap();

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.faces.len(), 4);
    assert_eq!(mesh.edges.len(), 6);
    assert!(!mesh.vertices.contains(&Point::new(0.2, 0.2, 0.2)));
}

#[test]
fn unit_cube_with_merged_faces() {
    let points = cube_corners();
    let mesh = try_convex_hull(&points, TOL).unwrap();

    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.faces.len(), 6);
    assert_eq!(mesh.edges.len(), 12);
    assert_eq!(euler_characteristic(&mesh), 2);
    assert!(mesh.faces.iter().all(|f| f.indices.len() == 4));
    assert_well_formed(&mesh, &points, 1.0e-4);
}

#[test]
fn unit_cube_without_merged_faces() {
    let points = cube_corners();
    let options = HullOptions {
        merge_coplanar_faces: false,
        ..HullOptions::with_tolerance(TOL)
    };
    let mesh = try_convex_hull_with(&points, &options).unwrap();

    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.faces.len(), 12);
    assert_eq!(mesh.edges.len(), 18);
    assert_eq!(euler_characteristic(&mesh), 2);
    assert!(mesh.faces.iter().all(|f| f.indices.len() == 3));
    assert_well_formed(&mesh, &points, 1.0e-4);
}

#[test]
fn duplicated_cube_corners_are_merged() {
    let mut points = cube_corners();
    points.extend(cube_corners());
    points.extend(
        cube_corners()
            .iter()
            .map(|p| *p + na::Vector3::repeat(1.0e-9)),
    );

    let mesh = try_convex_hull(&points, TOL).unwrap();
    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.faces.len(), 6);
    assert_eq!(mesh.edges.len(), 12);
}

#[test]
fn point_on_a_face_plane_is_not_a_vertex() {
    let mut points = cube_corners();
    // Within tolerance of the z = 1 face: never "outside", so never a hull vertex.
    points.push(Point::new(0.5, 0.5, 1.0 + 1.0e-8));

    let mesh = try_convex_hull(&points, 1.0e-4).unwrap();
    assert_eq!(mesh.vertices.len(), 8);
    assert_eq!(mesh.faces.len(), 6);
}

#[test]
fn hexagonal_prism_merges_into_polygons() {
    let mut points = Vec::new();
    for k in 0..6 {
        let angle = (k as Real) * std::f64::consts::FRAC_PI_3 as Real;
        points.push(Point::new(angle.cos(), angle.sin(), 0.0));
        points.push(Point::new(angle.cos(), angle.sin(), 1.0));
    }

    let mesh = try_convex_hull(&points, 1.0e-4).unwrap();

    // 2 hexagons + 6 side quadrilaterals.
    assert_eq!(mesh.vertices.len(), 12);
    assert_eq!(mesh.faces.len(), 8);
    assert_eq!(mesh.edges.len(), 18);
    assert_eq!(euler_characteristic(&mesh), 2);

    let mut hexagons = 0;
    let mut quads = 0;
    for face in mesh.faces.iter() {
        match face.indices.len() {
            6 => hexagons += 1,
            4 => quads += 1,
            n => panic!("unexpected face arity: {n}"),
        }
    }
    assert_eq!(hexagons, 2);
    assert_eq!(quads, 6);
    assert_well_formed(&mesh, &points, 1.0e-3);
}

#[test]
fn coplanar_grid_returns_a_flat_hull() {
    let mut points = Vec::new();
    for i in 0..5 {
        for j in 0..5 {
            points.push(Point::new(i as Real, j as Real, 0.0));
        }
    }

    let mesh = try_convex_hull(&points, TOL).unwrap();

    // The four grid corners, seen from the front and from the back.
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.faces.len(), 2);
    assert_eq!(mesh.edges.len(), 4);
    assert_eq!(euler_characteristic(&mesh), 2);
    assert_well_formed(&mesh, &points, 1.0e-3);

    let options = HullOptions {
        degenerate_policy: DegeneratePolicy::RequireVolume,
        ..HullOptions::with_tolerance(TOL)
    };
    assert_eq!(
        try_convex_hull_with(&points, &options),
        Err(ConvexHullError::DegenerateGeometry)
    );
}

#[test]
fn coplanar_grid_without_merge_is_triangulated() {
    let mut points = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            points.push(Point::new(i as Real, j as Real, 0.0));
        }
    }

    let options = HullOptions {
        merge_coplanar_faces: false,
        ..HullOptions::with_tolerance(TOL)
    };
    let mesh = try_convex_hull_with(&points, &options).unwrap();

    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.faces.len(), 4);
    assert_eq!(euler_characteristic(&mesh), 2);
    assert!(mesh.faces.iter().all(|f| f.indices.len() == 3));
}

#[test]
fn collinear_points_return_a_segment() {
    let points: Vec<_> = (0..5)
        .map(|i| Point::new(i as Real, 2.0 * i as Real, 0.0))
        .collect();

    let mesh = try_convex_hull(&points, TOL).unwrap();

    assert_eq!(mesh.vertices.len(), 2);
    assert!(mesh.faces.is_empty());
    assert_eq!(mesh.edges.len(), 1);
    assert!(mesh.vertices.contains(&points[0]));
    assert!(mesh.vertices.contains(&points[4]));

    let options = HullOptions {
        degenerate_policy: DegeneratePolicy::RequireVolume,
        ..HullOptions::with_tolerance(TOL)
    };
    assert_eq!(
        try_convex_hull_with(&points, &options),
        Err(ConvexHullError::DegenerateGeometry)
    );
}

#[test]
fn random_cloud_hull_is_well_formed() {
    let points = random_cloud(42, 500);
    let mesh = try_convex_hull(&points, TOL).unwrap();

    assert_eq!(euler_characteristic(&mesh), 2);
    // Every input point must be enclosed, not just the hull vertices.
    assert_well_formed(&mesh, &points, 1.0e-3);
    assert!(mesh.vertices.len() <= points.len());
}

#[test]
fn sphere_cloud_keeps_almost_every_point() {
    let points = random_sphere_cloud(1337, 200);
    let mesh = try_convex_hull(&points, TOL).unwrap();

    assert_eq!(euler_characteristic(&mesh), 2);
    assert_well_formed(&mesh, &points, 1.0e-3);
    // Every point of a sphere is extremal; only numerically borderline ones may be
    // absorbed.
    assert!(mesh.vertices.len() >= 190);
}

#[test]
fn permutation_invariance() {
    let points = random_cloud(7, 60);
    let mesh = try_convex_hull(&points, TOL).unwrap();

    let mut shuffled = points.clone();
    shuffled.reverse();
    shuffled.swap(3, 41);
    shuffled.swap(17, 29);
    let mesh2 = try_convex_hull(&shuffled, TOL).unwrap();

    assert_eq!(sorted_vertex_keys(&mesh), sorted_vertex_keys(&mesh2));
    assert_eq!(mesh.faces.len(), mesh2.faces.len());
    assert_eq!(mesh.edges.len(), mesh2.edges.len());
}

#[test]
fn hull_of_hull_is_idempotent() {
    let points = random_cloud(99, 120);
    let mesh = try_convex_hull(&points, TOL).unwrap();
    let mesh2 = try_convex_hull(&mesh.vertices, TOL).unwrap();

    assert_eq!(sorted_vertex_keys(&mesh), sorted_vertex_keys(&mesh2));
    assert_eq!(mesh.faces.len(), mesh2.faces.len());
    assert_eq!(mesh.edges.len(), mesh2.edges.len());
}

#[test]
fn scaling_preserves_the_hull_structure() {
    let points = random_cloud(5, 80);
    let scaled: Vec<_> = points.iter().map(|p| *p * 1000.0).collect();

    let mesh = try_convex_hull(&points, TOL).unwrap();
    let mesh2 = try_convex_hull(&scaled, TOL).unwrap();

    assert_eq!(mesh.vertices.len(), mesh2.vertices.len());
    assert_eq!(mesh.faces.len(), mesh2.faces.len());
    assert_eq!(mesh.edges.len(), mesh2.edges.len());
}

#[test]
fn hull_vertices_are_input_points() {
    let points = random_cloud(13, 100);
    let mesh = try_convex_hull(&points, TOL).unwrap();

    for vtx in mesh.vertices.iter() {
        assert!(points.contains(vtx));
    }
}
