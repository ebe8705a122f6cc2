use crate::math::Real;

/// The policy applied when the input points do not span a full 3D volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Build a lower-dimensional hull instead: a single point, a segment, or a flat
    /// polygon, depending on the effective dimension of the input.
    #[default]
    ReduceDimension,
    /// Fail with [`ConvexHullError::DegenerateGeometry`](crate::ConvexHullError) if the
    /// input is collinear or coplanar within the tolerance.
    RequireVolume,
}

/// Options controlling the convex hull construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HullOptions {
    /// The distance below which two coordinates, distances, or plane offsets are
    /// considered equal. Must be finite and `>= 0`.
    pub tolerance: Real,
    /// Whether adjacent coplanar faces are merged into a single polygonal face, so
    /// that the flat side of a box comes out as one quadrilateral rather than two
    /// triangles. Enabled by default.
    pub merge_coplanar_faces: bool,
    /// The policy applied to collinear or coplanar inputs.
    pub degenerate_policy: DegeneratePolicy,
}

impl HullOptions {
    /// Options with the given tolerance and the default policies.
    pub fn with_tolerance(tolerance: Real) -> Self {
        HullOptions {
            tolerance,
            ..HullOptions::default()
        }
    }
}

impl Default for HullOptions {
    fn default() -> Self {
        HullOptions {
            tolerance: 0.0,
            merge_coplanar_faces: true,
            degenerate_policy: DegeneratePolicy::default(),
        }
    }
}
