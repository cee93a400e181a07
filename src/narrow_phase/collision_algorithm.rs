use crate::math::{Isometry, Real};
use crate::narrow_phase::{DispatchInfo, ManifoldResult};
use crate::shape::Shape;
use crate::world::CollisionObject;

/// A positioned shape handed to a pair algorithm.
///
/// For top-level objects this mirrors the collision object itself; compound
/// dispatch substitutes each child shape with its composed transform while
/// the result sink keeps localizing contacts against the root object.
pub struct CollisionObjectRef<'a> {
    /// The shape to collide.
    pub shape: &'a dyn Shape,
    /// The world transform of the shape.
    pub world_transform: Isometry<Real>,
    /// The predicted end-of-step transform, for time-of-impact queries.
    pub predicted_transform: Isometry<Real>,
}

impl<'a> CollisionObjectRef<'a> {
    /// Views a collision object as a positioned shape.
    pub fn from_object(object: &'a CollisionObject) -> Self {
        CollisionObjectRef {
            shape: object.shape().as_ref(),
            world_transform: *object.world_transform(),
            predicted_transform: *object.interpolation_world_transform(),
        }
    }
}

/// A narrow-phase algorithm bound to one collision-object pair.
///
/// One instance exists per pair, created from the dispatch table when the
/// broad phase first reports the pair, and dropped when the pair vanishes.
/// Instances may keep per-pair state (cached separating axis, child
/// algorithms) across steps.
pub trait CollisionAlgorithm: Send {
    /// Runs the geometric test for this pair.
    ///
    /// Implementations must add their contact points through `result` and
    /// call `result.refresh_contact_points()` before returning, so stale
    /// points are pruned even on steps producing no new contact.
    fn process_collision(
        &mut self,
        body_a: &CollisionObjectRef,
        body_b: &CollisionObjectRef,
        info: &DispatchInfo,
        result: &mut ManifoldResult,
    );

    /// Computes the fraction of the step interval at which the pair first
    /// touches, in `[0, 1]`; `1.0` means no impact (or not implemented,
    /// deferring to a generic fallback).
    fn time_of_impact(
        &mut self,
        _body_a: &CollisionObjectRef,
        _body_b: &CollisionObjectRef,
        _info: &DispatchInfo,
    ) -> Real {
        1.0
    }
}
