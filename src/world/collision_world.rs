use crate::math::Real;
use crate::narrow_phase::{CollisionDispatcher, DispatchError, DispatchInfo};
use crate::world::{CollisionObject, ObjectHandle};

/// Owns the collision objects, the narrow-phase dispatcher, and the
/// constraint links consumed by the island manager.
///
/// Broad-phase pair generation stays external: each step the caller supplies
/// the candidate overlapping pairs, and the world runs the narrow phase over
/// them.
pub struct CollisionWorld {
    objects: Vec<CollisionObject>,
    dispatcher: CollisionDispatcher,
    constraint_links: Vec<(ObjectHandle, ObjectHandle)>,
}

impl CollisionWorld {
    /// Creates an empty world around the given dispatcher.
    pub fn new(dispatcher: CollisionDispatcher) -> Self {
        CollisionWorld {
            objects: Vec::new(),
            dispatcher,
            constraint_links: Vec::new(),
        }
    }

    /// Creates an empty world with the default dispatch table.
    pub fn with_default_dispatcher() -> Self {
        Self::new(CollisionDispatcher::with_default_table())
    }

    /// Adds a collision object and returns its handle.
    pub fn add_collision_object(&mut self, object: CollisionObject) -> ObjectHandle {
        self.objects.push(object);
        ObjectHandle(self.objects.len() - 1)
    }

    /// The object behind `handle`.
    #[inline]
    pub fn object(&self, handle: ObjectHandle) -> &CollisionObject {
        &self.objects[handle.0]
    }

    /// The object behind `handle`, mutably.
    #[inline]
    pub fn object_mut(&mut self, handle: ObjectHandle) -> &mut CollisionObject {
        &mut self.objects[handle.0]
    }

    /// All objects, in handle order.
    #[inline]
    pub fn objects(&self) -> &[CollisionObject] {
        &self.objects
    }

    /// All objects, mutably.
    #[inline]
    pub fn objects_mut(&mut self) -> &mut [CollisionObject] {
        &mut self.objects
    }

    /// The number of objects in this world.
    #[inline]
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// The narrow-phase dispatcher.
    #[inline]
    pub fn dispatcher(&self) -> &CollisionDispatcher {
        &self.dispatcher
    }

    /// The narrow-phase dispatcher, mutably.
    #[inline]
    pub fn dispatcher_mut(&mut self) -> &mut CollisionDispatcher {
        &mut self.dispatcher
    }

    /// Registers a solver-constraint link between two objects, so the island
    /// manager groups them together.
    pub fn add_constraint_link(&mut self, a: ObjectHandle, b: ObjectHandle) {
        self.constraint_links.push((a, b));
    }

    /// Removes every registered constraint link.
    pub fn clear_constraint_links(&mut self) {
        self.constraint_links.clear();
    }

    /// The registered constraint links.
    #[inline]
    pub fn constraint_links(&self) -> &[(ObjectHandle, ObjectHandle)] {
        &self.constraint_links
    }

    /// Computes the earliest time of impact among the live pairs, in
    /// `[0, 1]` of the step interval.
    ///
    /// Requires `info.use_continuous`; pairs must have been created by a
    /// prior `perform_discrete_collision_detection` call.
    pub fn calculate_time_of_impact(&mut self, info: &DispatchInfo) -> Real {
        self.dispatcher.calculate_time_of_impact(&self.objects, info)
    }

    /// Runs the narrow phase over the candidate pairs supplied by the
    /// (external) broad phase.
    ///
    /// Creates pair algorithms for new pairs, releases the manifolds of
    /// vanished pairs, then processes every surviving pair. Fails fast when
    /// a candidate pair has no registered collision algorithm.
    pub fn perform_discrete_collision_detection(
        &mut self,
        candidate_pairs: &[(ObjectHandle, ObjectHandle)],
        info: &DispatchInfo,
    ) -> Result<(), DispatchError> {
        for object in &mut self.objects {
            object.update_world_aabb();
        }

        self.dispatcher
            .update_pairs(candidate_pairs, &self.objects, info)?;
        self.dispatcher.dispatch_all(&self.objects, info);
        Ok(())
    }
}
