/*!
hull3d
======

**hull3d** is a 3-dimensional convex hull construction library written with
the rust programming language. It computes the smallest convex polyhedron
enclosing a cloud of points, described as a closed manifold mesh: the hull
vertices, the faces as ordered vertex-index loops, and the edges as
vertex-index pairs.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod hull;
pub mod math;
pub mod shape;
pub mod utils;

pub use crate::hull::{
    check_convex_hull, convex_hull, try_convex_hull, try_convex_hull_with, ConvexHullError,
    DegeneratePolicy, Edge, Face, HullOptions, MeshData,
};
