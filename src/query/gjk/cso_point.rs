use crate::math::{Point, Real, Vector};
use crate::query::gjk::Margined;
use na::Unit;
use std::ops::Sub;

/// A point of a Configuration-Space Obstacle.
///
/// A Configuration-Space Obstacle (CSO) is the result of the Minkowski
/// difference of two solids: each of its points is the difference of two
/// points, one from each solid. Here both original points are kept in world
/// space so witness points can be reconstructed from barycentric weights.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CsoPoint {
    /// The point on the CSO. This is equal to `self.orig1 - self.orig2`,
    /// unless this point has been translated with `self.translate`.
    pub point: Point<Real>,
    /// The original support point on the first shape, in world space.
    pub orig1: Point<Real>,
    /// The original support point on the second shape, in world space.
    pub orig2: Point<Real>,
}

impl CsoPoint {
    /// Initializes a CSO point with `orig1 - orig2`.
    pub fn new(orig1: Point<Real>, orig2: Point<Real>) -> Self {
        let point = Point::from(orig1 - orig2);
        Self::new_with_point(point, orig1, orig2)
    }

    /// Initializes a CSO point with all information provided.
    ///
    /// It is assumed, but not checked, that `point == orig1 - orig2`.
    pub fn new_with_point(point: Point<Real>, orig1: Point<Real>, orig2: Point<Real>) -> Self {
        CsoPoint {
            point,
            orig1,
            orig2,
        }
    }

    /// CSO point where all components are set to zero.
    pub fn origin() -> Self {
        CsoPoint::new(Point::origin(), Point::origin())
    }

    /// Computes the support point of the CSO of two margin-expanded shapes
    /// toward the unit direction `dir`.
    pub fn from_margined(a: &Margined, b: &Margined, dir: &Unit<Vector<Real>>) -> Self {
        let neg_dir = Unit::new_unchecked(-**dir);
        CsoPoint::new(a.support_point(dir), b.support_point(&neg_dir))
    }
}

impl Sub<CsoPoint> for CsoPoint {
    type Output = Vector<Real>;

    #[inline]
    fn sub(self, rhs: CsoPoint) -> Vector<Real> {
        self.point - rhs.point
    }
}
