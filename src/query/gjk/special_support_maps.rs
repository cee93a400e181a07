use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{ConvexShape, SupportMap};
use na::Unit;

/// A convex shape positioned in the world, queried with its margin included.
///
/// The penetration-depth and convex-cast queries work on margin-expanded
/// geometry, so their witness points land on the surfaces actual contacts are
/// generated on.
#[derive(Copy, Clone)]
pub struct Margined<'a> {
    /// The margin-carrying convex shape.
    pub shape: &'a dyn ConvexShape,
    /// The world position of the shape.
    pub position: &'a Isometry<Real>,
}

impl<'a> Margined<'a> {
    /// Creates a margin-inclusive view of a positioned convex shape.
    pub fn new(shape: &'a dyn ConvexShape, position: &'a Isometry<Real>) -> Self {
        Margined { shape, position }
    }

    /// The world-space support point of the margin-expanded shape toward the
    /// world-space unit direction `dir`.
    pub fn support_point(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        let local_dir = Unit::new_unchecked(self.position.inverse_transform_vector(dir));
        let core = self.shape.local_support_point_toward(&local_dir);
        self.position * (core + *local_dir * self.shape.margin())
    }
}
