//! Penetration depth queries using the Expanding Polytope Algorithm.

pub use self::epa::Epa;

mod epa;

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::ConvexShape;
use na::Unit;

/// A pluggable strategy resolving the overlap of two convex shapes.
///
/// Invoked by the GJK detector when the shapes interpenetrate (or are too
/// degenerate for a separation result). A `None` result means the overlap
/// could not be resolved this step; the caller reports no contact and the
/// configuration self-corrects as positions change.
pub trait PenetrationDepthSolver {
    /// Computes the witness points and separating normal of two overlapping
    /// convex shapes, margins included.
    ///
    /// Returns the world-space witness points on each shape, the unit normal
    /// pointing from the second shape toward the first, and the positive
    /// penetration depth along that normal.
    fn pen_depth(
        &mut self,
        pos_a: &Isometry<Real>,
        shape_a: &dyn ConvexShape,
        pos_b: &Isometry<Real>,
        shape_b: &dyn ConvexShape,
        guess: &Vector<Real>,
    ) -> Option<(Point<Real>, Point<Real>, Unit<Vector<Real>>, Real)>;
}
