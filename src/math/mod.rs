//! Compilation-flags dependent aliases for mathematical types.

/// The scalar type used throughout this crate.
#[cfg(feature = "f64")]
pub type Real = f64;

/// The scalar type used throughout this crate.
#[cfg(feature = "f32")]
pub type Real = f32;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The dimension of the ambient space.
pub const DIM: usize = 3;

/// The point type.
pub type Point = na::Point3<Real>;

/// The 2D point type.
pub type Point2 = na::Point2<Real>;

/// The vector type.
pub type Vector = na::Vector3<Real>;

/// The matrix type.
pub type Matrix = na::Matrix3<Real>;
