use crate::math::{Real, Vector};
use crate::narrow_phase::{CollisionAlgorithm, CollisionObjectRef, DispatchInfo, ManifoldResult};
use crate::query::epa::Epa;
use crate::query::gjk::{GjkPairDetector, VoronoiSimplex};
use crate::query::ClosestPointsInput;
use crate::shape::Shape;

/// Collision between two plane-constrained convex shapes.
///
/// Runs the same GJK/EPA machinery as the general convex pair; with both
/// shapes flat in the same plane the query effectively degenerates to the
/// planar case. No time-of-impact support.
pub struct Convex2dConvex2dAlgorithm {
    simplex: VoronoiSimplex,
    epa: Epa,
    cached_separating_axis: Vector<Real>,
    owns_manifold: bool,
}

impl Convex2dConvex2dAlgorithm {
    /// Creates the planar convex pair algorithm. `owns_manifold` is false
    /// for child algorithms writing into a compound pair's shared manifold.
    pub fn new(owns_manifold: bool) -> Self {
        Convex2dConvex2dAlgorithm {
            simplex: VoronoiSimplex::new(),
            epa: Epa::new(),
            cached_separating_axis: Vector::x(),
            owns_manifold,
        }
    }
}

impl CollisionAlgorithm for Convex2dConvex2dAlgorithm {
    fn process_collision(
        &mut self,
        body_a: &CollisionObjectRef,
        body_b: &CollisionObjectRef,
        _info: &DispatchInfo,
        result: &mut ManifoldResult,
    ) {
        let convex_a = body_a
            .shape
            .as_convex()
            .expect("planar convex pair dispatched on a non-convex shape");
        let convex_b = body_b
            .shape
            .as_convex()
            .expect("planar convex pair dispatched on a non-convex shape");

        let mut input = ClosestPointsInput::new(body_a.world_transform, body_b.world_transform);
        let bound = convex_a.margin()
            + convex_b.margin()
            + result.manifold().contact_breaking_threshold();
        input.maximum_distance_squared = bound * bound;

        let mut detector = GjkPairDetector::new(&mut self.simplex, Some(&mut self.epa));
        detector.set_cached_separating_axis(self.cached_separating_axis);
        detector.closest_points(convex_a, convex_b, &input, result);
        self.cached_separating_axis = detector.cached_separating_axis();

        if self.owns_manifold {
            result.refresh_contact_points();
        }
    }
}
