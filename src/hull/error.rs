use crate::math::Real;

/// Errors that can occur during convex hull computation.
///
/// The convex hull is built incrementally, one point at a time. The construction can
/// fail up-front if the input is unusable (bad tolerance, not enough distinct points)
/// or mid-way if the input is too degenerate for a consistent manifold to be
/// established within the tolerance. A partially-built hull is never returned: the
/// computation either succeeds with a complete, closed mesh, or reports one of these
/// errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConvexHullError {
    /// A negative or non-finite tolerance was supplied.
    ///
    /// The tolerance is a distance, so it must be a finite value `>= 0`.
    #[error("the tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(Real),

    /// Fewer than 3 distinct points remained after merging coincident points.
    ///
    /// Points closer to each other than the tolerance are collapsed to a single
    /// point before the construction starts. If fewer than 3 survive, no hull of any
    /// dimension can be built.
    #[error("fewer than 3 distinct points were given to the convex-hull algorithm")]
    InsufficientPoints,

    /// The input points do not span a volume and a full 3D hull was required, the
    /// coordinates are invalid (NaN or infinite), or the numerical construction of a
    /// consistent manifold failed.
    ///
    /// With [`DegeneratePolicy::ReduceDimension`](crate::DegeneratePolicy), collinear
    /// and coplanar inputs take a dimension-reduction path instead of reporting this
    /// error.
    #[error("the input points are too degenerate for a convex hull to be computed")]
    DegenerateGeometry,

    /// An internal invariant was broken during the construction.
    ///
    /// This indicates a bug in the convex hull algorithm itself, not a problem with
    /// the input. If you encounter this error, please report it with a minimal
    /// reproducible example.
    #[error("internal error: {0}")]
    InternalError(&'static str),
}
