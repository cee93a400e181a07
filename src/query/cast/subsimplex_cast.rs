use crate::math::{Isometry, Point, Real, Vector};
use crate::query::gjk::{CsoPoint, Margined, VoronoiSimplex};
use crate::shape::ConvexShape;
use na::Unit;

const CAST_MAX_ITERATIONS: usize = 32;
const CAST_EPSILON: Real = 1.0e-4;

/// The result of a successful swept-convex cast.
#[derive(Debug, Copy, Clone)]
pub struct CastResult {
    /// The fraction of the sweep interval at which the shapes first touch,
    /// in `[0, 1]`.
    pub fraction: Real,
    /// The world-space contact normal at the time of impact, pointing from
    /// the second shape toward the first. Zero when the shapes touch at the
    /// start of the interval.
    pub normal: Vector<Real>,
    /// The world-space hit point on the second shape.
    pub hit_point: Point<Real>,
}

/// GJK-based ray cast on the Minkowski difference of two linearly moving
/// convex shapes.
///
/// Only the translational part of the motion is swept; rotations are taken
/// from the start transforms. The shapes must not overlap at the start of the
/// interval, otherwise the result is undefined.
pub struct SubsimplexConvexCast<'a> {
    simplex: &'a mut VoronoiSimplex,
}

impl<'a> SubsimplexConvexCast<'a> {
    /// Creates a caster reusing the given simplex.
    pub fn new(simplex: &'a mut VoronoiSimplex) -> Self {
        SubsimplexConvexCast { simplex }
    }

    /// Computes the time of impact of the linear sweep of two moving convex
    /// shapes.
    ///
    /// Returns `None` when the shapes never touch within the interval.
    pub fn cast(
        &mut self,
        shape_a: &dyn ConvexShape,
        from_a: &Isometry<Real>,
        to_a: &Isometry<Real>,
        shape_b: &dyn ConvexShape,
        from_b: &Isometry<Real>,
        to_b: &Isometry<Real>,
    ) -> Option<CastResult> {
        let lin_vel_a = to_a.translation.vector - from_a.translation.vector;
        let lin_vel_b = to_b.translation.vector - from_b.translation.vector;
        let r = lin_vel_a - lin_vel_b;

        let mut lambda: Real = 0.0;
        let mut pos_a = *from_a;
        let mut pos_b = *from_b;
        let mut n = Vector::zeros();

        let mut v = {
            let init_dir = Unit::try_new(-r, crate::math::DEFAULT_EPSILON)
                .unwrap_or_else(Vector::x_axis);
            let support =
                CsoPoint::from_margined(&Margined::new(shape_a, &pos_a), &Margined::new(shape_b, &pos_b), &init_dir);
            support.point.coords
        };

        let mut dist2 = v.norm_squared();
        let mut niter = 0;
        let mut first = true;

        while dist2 > CAST_EPSILON && niter < CAST_MAX_ITERATIONS {
            niter += 1;

            let dir = Unit::new_unchecked(-v / dist2.sqrt());
            let support = CsoPoint::from_margined(
                &Margined::new(shape_a, &pos_a),
                &Margined::new(shape_b, &pos_b),
                &dir,
            );
            let w = support.point.coords;
            let v_dot_w = v.dot(&w);

            if lambda > 1.0 {
                return None;
            }

            if v_dot_w > 0.0 {
                let v_dot_r = v.dot(&r);

                // Moving away: no impact within the interval.
                if v_dot_r >= -(crate::math::DEFAULT_EPSILON * crate::math::DEFAULT_EPSILON) {
                    return None;
                }

                lambda -= v_dot_w / v_dot_r;

                // Advance both shapes to the new candidate time of impact.
                pos_a.translation.vector = from_a.translation.vector + lin_vel_a * lambda;
                pos_b.translation.vector = from_b.translation.vector + lin_vel_b * lambda;
                n = v;
            }

            if first {
                self.simplex.reset(support);
                first = false;
            } else if !self.simplex.add_point(support) {
                break;
            }

            match self.simplex.project_origin_and_reduce() {
                Some(proj) => dist2 = proj.coords.norm_squared(),
                None => dist2 = 0.0,
            }
        }

        if lambda > 1.0 {
            return None;
        }

        let (_hit_a, hit_b) = self.simplex.compute_points();
        Some(CastResult {
            fraction: lambda,
            normal: Unit::try_new(n, crate::math::DEFAULT_EPSILON)
                .map(|n| *n)
                .unwrap_or_else(Vector::zeros),
            hit_point: hit_b,
        })
    }
}
