use crate::math::{Real, Vector};
use crate::narrow_phase::{CollisionAlgorithm, CollisionObjectRef, DispatchInfo, ManifoldResult};
use crate::query::cast::SubsimplexConvexCast;
use crate::query::epa::Epa;
use crate::query::gjk::{GjkPairDetector, VoronoiSimplex};
use crate::query::ClosestPointsInput;
use crate::shape::Shape;

/// General convex-convex collision through GJK, with EPA as the
/// penetration-depth fallback.
///
/// The separating axis found on one step seeds the next step's query on the
/// same pair, so a resting pair converges in very few iterations.
pub struct ConvexConvexAlgorithm {
    simplex: VoronoiSimplex,
    epa: Epa,
    cached_separating_axis: Vector<Real>,
    owns_manifold: bool,
}

impl ConvexConvexAlgorithm {
    /// Creates the convex-convex algorithm. `owns_manifold` is false for
    /// child algorithms writing into a compound pair's shared manifold.
    pub fn new(owns_manifold: bool) -> Self {
        ConvexConvexAlgorithm {
            simplex: VoronoiSimplex::new(),
            epa: Epa::new(),
            cached_separating_axis: Vector::y(),
            owns_manifold,
        }
    }
}

impl CollisionAlgorithm for ConvexConvexAlgorithm {
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
            .expect("convex-convex dispatched on a non-convex shape");
        let convex_b = body_b
            .shape
            .as_convex()
            .expect("convex-convex dispatched on a non-convex shape");

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

    fn time_of_impact(
        &mut self,
        body_a: &CollisionObjectRef,
        body_b: &CollisionObjectRef,
        info: &DispatchInfo,
    ) -> Real {
        if !info.use_continuous {
            return 1.0;
        }

        let convex_a = match body_a.shape.as_convex() {
            Some(convex) => convex,
            None => return 1.0,
        };
        let convex_b = match body_b.shape.as_convex() {
            Some(convex) => convex,
            None => return 1.0,
        };

        let mut simplex = VoronoiSimplex::new();
        let mut caster = SubsimplexConvexCast::new(&mut simplex);
        match caster.cast(
            convex_a,
            &body_a.world_transform,
            &body_a.predicted_transform,
            convex_b,
            &body_b.world_transform,
            &body_b.predicted_transform,
        ) {
            Some(result) => result.fraction.min(1.0),
            None => 1.0,
        }
    }
}
