//! Traits for support mapping based shapes.

use crate::math::{Isometry, Point, Real, Vector};
use na::Unit;

/// The default collision margin wrapped around convex shapes.
///
/// The margin is a thin skin inflating the core geometry outward. It keeps the
/// GJK iteration away from exact-touch configurations and lets persistent
/// contacts form slightly before the core surfaces meet.
pub const COLLISION_MARGIN: Real = 0.04;

/// Traits of convex shapes representable by a support mapping function.
pub trait SupportMap {
    /// Evaluates the support function of the margin-reduced core of this shape.
    ///
    /// A support function associates a direction to the shape point which
    /// maximizes their dot product.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// Same as `self.local_support_point` except that `dir` is normalized.
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.local_support_point(dir.as_ref())
    }

    /// Evaluates the support function of this shape transformed by `transform`.
    fn support_point(&self, transform: &Isometry<Real>, dir: &Vector<Real>) -> Point<Real> {
        let local_dir = transform.inverse_transform_vector(dir);
        transform * self.local_support_point(&local_dir)
    }

    /// Same as `self.support_point` except that `dir` is normalized.
    fn support_point_toward(
        &self,
        transform: &Isometry<Real>,
        dir: &Unit<Vector<Real>>,
    ) -> Point<Real> {
        let local_dir = Unit::new_unchecked(transform.inverse_transform_vector(dir));
        transform * self.local_support_point_toward(&local_dir)
    }
}

/// A support-mapped shape wrapped in a collision margin.
///
/// This is the capability consumed by the GJK detector and the convex-cast
/// queries: a core support mapping plus the margin inflating it outward.
pub trait ConvexShape: SupportMap {
    /// The collision margin inflating the core shape outward.
    fn margin(&self) -> Real;

    /// Support point of the margin-expanded shape.
    ///
    /// Near-zero directions fall back to an arbitrary axis so that the margin
    /// is always applied along a unit vector.
    fn local_support_point_with_margin(&self, dir: &Vector<Real>) -> Point<Real> {
        let unit =
            Unit::try_new(*dir, crate::math::DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);
        self.local_support_point_toward(&unit) + *unit * self.margin()
    }

    /// Computes core support points for several unit directions at once.
    ///
    /// Used for bounding-volume computation, which queries the six axis
    /// directions in one batch. The default implementation loops over
    /// `local_support_point_toward`; shapes that scan a vertex list can
    /// override this to handle all directions in a single pass.
    fn batch_local_support_points(&self, dirs: &[Unit<Vector<Real>>], out: &mut [Point<Real>]) {
        for (dir, out) in dirs.iter().zip(out.iter_mut()) {
            *out = self.local_support_point_toward(dir);
        }
    }
}
