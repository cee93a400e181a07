use crate::math::{Point, Real, Vector};
use crate::shape::{ConvexShape, SupportMap};
use na::Unit;

/// A sphere shape.
///
/// The whole volume of the sphere is carried by its margin: the core shape is
/// the center point and `margin()` returns the radius. This makes the sphere
/// exact under margin-expanded support queries while keeping the GJK core
/// queries trivially cheap.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Sphere {
    /// The radius of the sphere.
    pub radius: Real,
}

impl Sphere {
    /// Creates a new sphere with the given radius.
    #[inline]
    pub fn new(radius: Real) -> Sphere {
        Sphere { radius }
    }

    /// Computes a version of this sphere scaled by the uniform factor `scale`.
    #[inline]
    pub fn scaled(self, scale: Real) -> Sphere {
        Sphere::new(self.radius * scale.abs())
    }
}

impl SupportMap for Sphere {
    #[inline]
    fn local_support_point(&self, _: &Vector<Real>) -> Point<Real> {
        Point::origin()
    }

    #[inline]
    fn local_support_point_toward(&self, _: &Unit<Vector<Real>>) -> Point<Real> {
        Point::origin()
    }
}

impl ConvexShape for Sphere {
    #[inline]
    fn margin(&self) -> Real {
        self.radius
    }
}
