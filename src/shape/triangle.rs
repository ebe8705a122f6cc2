use crate::math::{Point, Real, Vector};

/// A triangle with three vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// The triangle's first vertex.
    pub a: Point,
    /// The triangle's second vertex.
    pub b: Point,
    /// The triangle's third vertex.
    pub c: Point,
}

impl Triangle {
    /// Creates a triangle from three vertices.
    #[inline]
    pub fn new(a: Point, b: Point, c: Point) -> Triangle {
        Triangle { a, b, c }
    }

    /// The non-normalized counter-clockwise normal of this triangle.
    #[inline]
    pub fn scaled_normal(&self) -> Vector {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The area of this triangle.
    #[inline]
    pub fn area(&self) -> Real {
        self.scaled_normal().norm() / 2.0
    }

    /// Tests if this triangle is degenerate, i.e., if its three vertices are almost collinear.
    pub fn is_affinely_dependent(&self) -> bool {
        const EPS: Real = crate::math::DEFAULT_EPSILON * 100.0;
        relative_eq!(self.scaled_normal().norm_squared(), 0.0, epsilon = EPS * EPS)
    }
}

#[cfg(test)]
mod test {
    use super::Triangle;
    use crate::math::Point;

    #[test]
    fn area_of_right_triangle() {
        let tri = Triangle::new(
            Point::origin(),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        );
        assert_relative_eq!(tri.area(), 2.0);
    }

    #[test]
    fn collinear_triangle_is_affinely_dependent() {
        let tri = Triangle::new(
            Point::origin(),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
        );
        assert!(tri.is_affinely_dependent());
    }
}
