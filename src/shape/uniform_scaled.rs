use crate::math::{Point, Real, Vector};
use crate::shape::{ConvexShape, Shape, SharedShape, SupportMap};
use na::Unit;

/// A convex shape scaled by a uniform positive factor.
///
/// Scaling a convex set scales its support points, so the child's core
/// support mapping is reused directly; the margin scales with the shape.
#[derive(Clone)]
pub struct UniformScaled {
    child: SharedShape,
    factor: Real,
}

impl UniformScaled {
    /// Creates a uniformly scaled version of `child`.
    ///
    /// Panics if `child` is not convex or if `factor` is not positive.
    pub fn new(child: SharedShape, factor: Real) -> UniformScaled {
        assert!(
            child.as_convex().is_some(),
            "the child of a uniformly-scaled shape must be convex"
        );
        assert!(factor > 0.0, "the scaling factor must be positive");
        UniformScaled { child, factor }
    }

    /// The wrapped child shape.
    #[inline]
    pub fn child(&self) -> &SharedShape {
        &self.child
    }

    /// The uniform scaling factor.
    #[inline]
    pub fn factor(&self) -> Real {
        self.factor
    }

    #[inline]
    pub(crate) fn child_convex(&self) -> &dyn ConvexShape {
        self.child.as_convex().expect("the child shape is convex")
    }
}

impl SupportMap for UniformScaled {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.child_convex().local_support_point(dir) * self.factor
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.child_convex().local_support_point_toward(dir) * self.factor
    }
}

impl ConvexShape for UniformScaled {
    #[inline]
    fn margin(&self) -> Real {
        self.child_convex().margin() * self.factor
    }

    fn batch_local_support_points(&self, dirs: &[Unit<Vector<Real>>], out: &mut [Point<Real>]) {
        self.child_convex().batch_local_support_points(dirs, out);
        for pt in out {
            *pt *= self.factor;
        }
    }
}
