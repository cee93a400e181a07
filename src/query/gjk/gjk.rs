//! The GJK pair detector: iterative separating-axis closest-point queries
//! between two convex shapes.
//!
//! The detector walks the Minkowski difference of the two shapes with support
//! queries on their margin-reduced cores. When the cores touch or the simplex
//! degenerates, it escalates to the penetration-depth solver; when that also
//! fails, no contact is reported for this step, which is a recoverable
//! condition, not an error.

use crate::math::{Point, Real, Vector};
use crate::query::epa::PenetrationDepthSolver;
use crate::query::gjk::{CsoPoint, VoronoiSimplex};
use crate::query::{ClosestPointsInput, ClosestPointsSink};
use crate::shape::{ConvexShape, SupportMap};
use na::Unit;
use num::Bounded;

/// The iteration cap of the GJK loop.
///
/// This is the only timeout-like safeguard of the narrow phase: it converts a
/// would-be infinite loop on degenerate inputs into an early reported failure.
pub const GJK_MAX_ITERATIONS: usize = 1000;

const REL_ERROR2: Real = 1.0e-6;

/// GJK-based closest-point/penetration queries between two convex shapes.
///
/// The detector keeps the last separating axis across queries so a pair
/// re-tested on the next frame starts from a nearly-converged state
/// (temporal coherence).
pub struct GjkPairDetector<'a> {
    simplex: &'a mut VoronoiSimplex,
    penetration_solver: Option<&'a mut dyn PenetrationDepthSolver>,
    cached_separating_axis: Vector<Real>,
    ignore_margin: bool,
    catch_degeneracies: bool,
}

impl<'a> GjkPairDetector<'a> {
    /// Creates a detector from a simplex solver and an optional
    /// penetration-depth solver.
    pub fn new(
        simplex: &'a mut VoronoiSimplex,
        penetration_solver: Option<&'a mut dyn PenetrationDepthSolver>,
    ) -> Self {
        GjkPairDetector {
            simplex,
            penetration_solver,
            cached_separating_axis: Vector::y(),
            ignore_margin: false,
            catch_degeneracies: true,
        }
    }

    /// Warm-starts the detector with a separating axis cached from a previous
    /// query on the same pair. Near-zero axes are ignored.
    pub fn set_cached_separating_axis(&mut self, axis: Vector<Real>) {
        if axis.norm_squared() > REL_ERROR2 {
            self.cached_separating_axis = axis;
        }
    }

    /// The separating axis left by the last query, for warm-starting the next
    /// one.
    pub fn cached_separating_axis(&self) -> Vector<Real> {
        self.cached_separating_axis
    }

    /// Makes support queries skip the collision margins. Internal use only:
    /// margin-less queries lose the numerical robustness the margins provide.
    pub fn set_ignore_margin(&mut self, ignore_margin: bool) {
        self.ignore_margin = ignore_margin;
    }

    /// Computes the closest points between the two positioned shapes and
    /// reports them into `sink`.
    ///
    /// The reported normal points from `shape_b` toward `shape_a`; the depth
    /// is negative when the shapes (margins included) overlap. Nothing is
    /// reported when the shapes are farther apart than the input bound, or
    /// when the geometry is too degenerate to resolve.
    pub fn closest_points(
        &mut self,
        shape_a: &dyn ConvexShape,
        shape_b: &dyn ConvexShape,
        input: &ClosestPointsInput,
        sink: &mut dyn ClosestPointsSink,
    ) {
        let _eps = crate::math::DEFAULT_EPSILON;
        let (margin_a, margin_b) = if self.ignore_margin {
            (0.0, 0.0)
        } else {
            (shape_a.margin(), shape_b.margin())
        };

        let mut distance = 0.0;
        let mut squared_distance = Real::max_value();
        let mut normal_on_b = Vector::zeros();
        let mut point_on_b = Point::origin();
        let mut is_valid = false;
        let mut check_simplex = false;
        let mut check_penetration = true;
        let mut degenerate_simplex = 0;

        if self.cached_separating_axis.norm_squared() < REL_ERROR2 {
            self.cached_separating_axis = Vector::y();
        }

        let mut niter = 0;
        loop {
            let sep_axis = self.cached_separating_axis;

            // Support of the Minkowski difference along the separating axis:
            // deepest core point of A toward B, and of B toward A.
            let p = shape_a.support_point(&input.transform_a, &-sep_axis);
            let q = shape_b.support_point(&input.transform_b, &sep_axis);
            let w = p - q;
            let delta = sep_axis.dot(&w);

            // The shapes are proven farther apart than the query bound.
            if delta > 0.0 && delta * delta > squared_distance * input.maximum_distance_squared {
                degenerate_simplex = 10;
                check_simplex = true;
                check_penetration = false;
                break;
            }

            let cso_point = CsoPoint::new(p, q);
            if niter == 0 {
                self.simplex.reset(cso_point);
            } else if self.simplex.contains_point(&cso_point.point)
                || !self.simplex.add_point(cso_point)
            {
                // Re-adding a known support point: the iteration is cycling.
                degenerate_simplex = 1;
                check_simplex = true;
                break;
            }

            let closest = match self.simplex.project_origin_and_reduce() {
                Some(closest) => closest,
                None => {
                    degenerate_simplex = 3;
                    check_simplex = true;
                    break;
                }
            };

            let new_squared_distance = closest.coords.norm_squared();
            if new_squared_distance < REL_ERROR2 {
                // The origin lies on the simplex: the cores are touching or
                // overlapping, only the penetration solver can resolve this.
                self.cached_separating_axis = closest.coords;
                degenerate_simplex = 6;
                check_simplex = true;
                break;
            }

            let previous_squared_distance = squared_distance;
            squared_distance = new_squared_distance;

            // Converged: the projection stopped making progress.
            if previous_squared_distance - squared_distance <= _eps * previous_squared_distance {
                degenerate_simplex = 12;
                check_simplex = true;
                break;
            }

            self.cached_separating_axis = closest.coords;

            niter += 1;
            if niter >= GJK_MAX_ITERATIONS {
                log::debug!(
                    "GJK exceeded {} iterations, falling back to the penetration solver",
                    GJK_MAX_ITERATIONS
                );
                degenerate_simplex = 13;
                break;
            }
        }

        if check_simplex {
            let (_point_on_core_a, point_on_core_b) = self.simplex.compute_points();
            let len_sqr = self.cached_separating_axis.norm_squared();

            if len_sqr < REL_ERROR2 {
                // Can't normalize a vanishing axis.
                degenerate_simplex = 5;
            } else {
                let len = len_sqr.sqrt();
                let axis_unit = self.cached_separating_axis / len;

                // Push the witness back out of the core, onto the margin
                // surface the contact actually happens on.
                point_on_b = point_on_core_b + axis_unit * margin_b;
                normal_on_b = axis_unit;
                distance = len - (margin_a + margin_b);
                is_valid = true;
            }
        }

        let catch_degenerate_penetration = self.catch_degeneracies
            && degenerate_simplex != 0
            && distance + margin_a + margin_b < 0.01;

        if check_penetration && (!is_valid || catch_degenerate_penetration) {
            // GJK could not produce a separation result: the shapes overlap
            // (or are too degenerate to tell). Ask the penetration solver.
            if let Some(solver) = self.penetration_solver.as_deref_mut() {
                match solver.pen_depth(
                    &input.transform_a,
                    shape_a,
                    &input.transform_b,
                    shape_b,
                    &self.cached_separating_axis,
                ) {
                    Some((_witness_a, witness_b, normal, depth)) => {
                        let penetration_distance = -depth;
                        if !is_valid || penetration_distance < distance {
                            distance = penetration_distance;
                            point_on_b = witness_b;
                            normal_on_b = *normal;
                            self.cached_separating_axis = *normal;
                            is_valid = true;
                        }
                    }
                    None => {
                        log::debug!(
                            "penetration depth solver failed, no contact reported this step"
                        );
                    }
                }
            }
        }

        if is_valid && (distance < 0.0 || distance * distance <= input.maximum_distance_squared) {
            if let Some(normal) = Unit::try_new(normal_on_b, _eps) {
                sink.add_contact_point(normal, point_on_b, distance);
            }
        }
    }
}
