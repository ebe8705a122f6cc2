//! Convex hull construction from a cloud of 3D points.

pub use self::convex_hull::{convex_hull, try_convex_hull, try_convex_hull_with};
pub use self::error::ConvexHullError;
pub use self::mesh_data::{Edge, Face, MeshData};
pub use self::options::{DegeneratePolicy, HullOptions};
pub use self::validation::check_convex_hull;

use self::initial_mesh::{try_get_initial_mesh, InitialMesh};
use self::triangle_facet::TriangleFacet;
use self::validation::check_facet_links;

mod convex_hull;
mod error;
mod initial_mesh;
mod merge;
mod mesh_data;
mod options;
mod planar;
mod support;
mod triangle_facet;
mod validation;
