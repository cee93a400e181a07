use crate::math::{Point, Real, Vector};
use crate::shape::{ConvexShape, Shape, SharedShape, SupportMap};
use na::Unit;

/// A convex shape constrained to a plane.
///
/// Wraps a child convex shape whose geometry is expected to be flat in its
/// local `z = 0` plane; useful for 2.5D worlds where motion happens in a
/// plane while the collision pipeline stays 3-dimensional. Support queries,
/// margin and inertia are delegated to the child.
#[derive(Clone)]
pub struct Convex2d {
    child: SharedShape,
}

impl Convex2d {
    /// Creates a planar convex shape wrapping `child`.
    ///
    /// Panics if `child` is not convex.
    pub fn new(child: SharedShape) -> Convex2d {
        assert!(
            child.as_convex().is_some(),
            "the child of a planar convex shape must be convex"
        );
        Convex2d { child }
    }

    /// The wrapped child shape.
    #[inline]
    pub fn child(&self) -> &SharedShape {
        &self.child
    }

    #[inline]
    pub(crate) fn child_convex(&self) -> &dyn ConvexShape {
        self.child.as_convex().expect("the child shape is convex")
    }
}

impl SupportMap for Convex2d {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.child_convex().local_support_point(dir)
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.child_convex().local_support_point_toward(dir)
    }
}

impl ConvexShape for Convex2d {
    #[inline]
    fn margin(&self) -> Real {
        self.child_convex().margin()
    }

    #[inline]
    fn batch_local_support_points(&self, dirs: &[Unit<Vector<Real>>], out: &mut [Point<Real>]) {
        self.child_convex().batch_local_support_points(dirs, out)
    }
}
