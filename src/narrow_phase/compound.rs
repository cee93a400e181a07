use crate::math::Real;
use crate::narrow_phase::{
    AlgorithmTable, CollisionAlgorithm, CollisionObjectRef, DispatchError, DispatchInfo,
    ManifoldResult,
};
use crate::query::ClosestPointsSink;
use crate::shape::Shape;

/// Compound against any other shape.
///
/// One child algorithm is created per child shape, at pair-creation time and
/// through the same dispatch table as top-level pairs. All children share the
/// pair's single manifold; the result sink localizes their contacts against
/// the compound's root transform and tags each point with its child index.
pub struct CompoundCollisionAlgorithm {
    child_algorithms: Vec<Box<dyn CollisionAlgorithm>>,
    swapped: bool,
    owns_manifold: bool,
}

impl CompoundCollisionAlgorithm {
    /// Creates child algorithms for every child of the compound; `swapped`
    /// when the compound is the second shape of the pair.
    ///
    /// Fails if any (child, other) pair has no registered algorithm.
    pub fn new(
        table: &AlgorithmTable,
        shape_a: &dyn Shape,
        shape_b: &dyn Shape,
        swapped: bool,
        owns_manifold: bool,
    ) -> Result<Self, DispatchError> {
        let compound = if swapped { shape_b } else { shape_a }
            .as_compound()
            .expect("compound algorithm dispatched on a non-compound shape");

        let mut child_algorithms = Vec::with_capacity(compound.children().len());
        for (_, child_shape) in compound.children() {
            // Children write into the pair's shared manifold; this compound
            // keeps the refresh responsibility.
            let child_algorithm = if swapped {
                table.create_algorithm_with(shape_a, child_shape.as_ref(), false)?
            } else {
                table.create_algorithm_with(child_shape.as_ref(), shape_b, false)?
            };
            child_algorithms.push(child_algorithm);
        }

        Ok(CompoundCollisionAlgorithm {
            child_algorithms,
            swapped,
            owns_manifold,
        })
    }

    fn compound_ref<'a, 'b>(
        &self,
        body_a: &'a CollisionObjectRef<'b>,
        body_b: &'a CollisionObjectRef<'b>,
    ) -> (&'a CollisionObjectRef<'b>, &'a CollisionObjectRef<'b>) {
        if self.swapped {
            (body_b, body_a)
        } else {
            (body_a, body_b)
        }
    }
}

impl CollisionAlgorithm for CompoundCollisionAlgorithm {
    fn process_collision(
        &mut self,
        body_a: &CollisionObjectRef,
        body_b: &CollisionObjectRef,
        info: &DispatchInfo,
        result: &mut ManifoldResult,
    ) {
        let (compound_body, other_body) = self.compound_ref(body_a, body_b);
        let compound = compound_body
            .shape
            .as_compound()
            .expect("compound algorithm dispatched on a non-compound shape");

        let other_aabb = other_body
            .shape
            .compute_aabb(&other_body.world_transform);

        for (i, ((child_pos, child_shape), child_algorithm)) in compound
            .children()
            .iter()
            .zip(self.child_algorithms.iter_mut())
            .enumerate()
        {
            let child_transform = compound_body.world_transform * child_pos;

            // Cheap per-child cull against the other object's bounds.
            if !child_shape
                .compute_aabb(&child_transform)
                .intersects(&other_aabb)
            {
                continue;
            }

            let child_ref = CollisionObjectRef {
                shape: child_shape.as_ref(),
                world_transform: child_transform,
                predicted_transform: compound_body.predicted_transform * child_pos,
            };

            if self.swapped {
                result.set_shape_identifiers_b(-1, i as i32);
                child_algorithm.process_collision(other_body, &child_ref, info, result);
            } else {
                result.set_shape_identifiers_a(-1, i as i32);
                child_algorithm.process_collision(&child_ref, other_body, info, result);
            }
        }

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
        let (compound_body, other_body) = if self.swapped {
            (body_b, body_a)
        } else {
            (body_a, body_b)
        };
        let compound = compound_body
            .shape
            .as_compound()
            .expect("compound algorithm dispatched on a non-compound shape");

        let mut fraction: Real = 1.0;
        for ((child_pos, child_shape), child_algorithm) in compound
            .children()
            .iter()
            .zip(self.child_algorithms.iter_mut())
        {
            let child_ref = CollisionObjectRef {
                shape: child_shape.as_ref(),
                world_transform: compound_body.world_transform * child_pos,
                predicted_transform: compound_body.predicted_transform * child_pos,
            };

            let child_fraction = if self.swapped {
                child_algorithm.time_of_impact(other_body, &child_ref, info)
            } else {
                child_algorithm.time_of_impact(&child_ref, other_body, info)
            };
            fraction = fraction.min(child_fraction);
        }

        fraction
    }
}
