use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::{Shape, SharedShape};

/// The time a body must stay quiescent before it is allowed to sleep.
pub const DEACTIVATION_TIME_THRESHOLD: Real = 2.0;

bitflags::bitflags! {
    /// Flags qualifying a collision object's role in the pipeline.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct CollisionFlags: u32 {
        /// The object never moves; it never merges simulation islands.
        const STATIC_OBJECT = 1 << 0;
        /// The object is animated externally; like a static object it never
        /// merges islands.
        const KINEMATIC_OBJECT = 1 << 1;
        /// Contacts are generated but should not be solved.
        const NO_CONTACT_RESPONSE = 1 << 2;
        /// Route this object's new contact points through the contact-added
        /// callback.
        const CUSTOM_MATERIAL_CALLBACK = 1 << 3;
    }
}

/// The activation state of a collision object.
///
/// Sleeping is a performance optimization, not a correctness requirement: a
/// sleeping body keeps its last active transform and is woken the moment an
/// active body touches its island.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActivationState {
    /// Simulated every step.
    Active,
    /// Asleep within a quiescent island.
    IslandSleeping,
    /// Quiescent long enough; will sleep when its whole island agrees.
    WantsDeactivation,
    /// Simulated every step, never allowed to sleep.
    DisableDeactivation,
    /// Excluded from simulation entirely.
    DisableSimulation,
}

/// A shape reference paired with a world transform and the per-object
/// bookkeeping of the collision pipeline.
///
/// The island tag is written exclusively by the island manager during island
/// building; `-1` means not yet assigned.
pub struct CollisionObject {
    shape: SharedShape,
    world_transform: Isometry<Real>,
    interpolation_world_transform: Isometry<Real>,
    collision_flags: CollisionFlags,
    activation_state: ActivationState,
    deactivation_time: Real,
    island_tag: i32,
    friction: Real,
    restitution: Real,
    world_aabb: Option<Aabb>,
}

impl CollisionObject {
    /// Creates an active collision object at the identity transform.
    pub fn new(shape: SharedShape) -> Self {
        CollisionObject {
            shape,
            world_transform: Isometry::identity(),
            interpolation_world_transform: Isometry::identity(),
            collision_flags: CollisionFlags::empty(),
            activation_state: ActivationState::Active,
            deactivation_time: 0.0,
            island_tag: -1,
            friction: 0.5,
            restitution: 0.0,
            world_aabb: None,
        }
    }

    /// The shape of this object.
    #[inline]
    pub fn shape(&self) -> &SharedShape {
        &self.shape
    }

    /// Replaces the shape of this object, invalidating the cached AABB.
    pub fn set_shape(&mut self, shape: SharedShape) {
        self.shape = shape;
        self.world_aabb = None;
    }

    /// The world transform of this object.
    #[inline]
    pub fn world_transform(&self) -> &Isometry<Real> {
        &self.world_transform
    }

    /// Moves this object, invalidating the cached AABB.
    ///
    /// The predicted end-of-step transform follows along; continuous-motion
    /// users override it afterwards with
    /// `set_interpolation_world_transform`.
    pub fn set_world_transform(&mut self, transform: Isometry<Real>) {
        self.world_transform = transform;
        self.interpolation_world_transform = transform;
        self.world_aabb = None;
    }

    /// The predicted end-of-step transform, used by time-of-impact queries.
    #[inline]
    pub fn interpolation_world_transform(&self) -> &Isometry<Real> {
        &self.interpolation_world_transform
    }

    /// Sets the predicted end-of-step transform.
    pub fn set_interpolation_world_transform(&mut self, transform: Isometry<Real>) {
        self.interpolation_world_transform = transform;
    }

    /// The flags qualifying this object.
    #[inline]
    pub fn collision_flags(&self) -> CollisionFlags {
        self.collision_flags
    }

    /// Replaces the flags qualifying this object.
    pub fn set_collision_flags(&mut self, flags: CollisionFlags) {
        self.collision_flags = flags;
    }

    /// Is this object static or kinematic?
    #[inline]
    pub fn is_static_or_kinematic(&self) -> bool {
        self.collision_flags
            .intersects(CollisionFlags::STATIC_OBJECT | CollisionFlags::KINEMATIC_OBJECT)
    }

    /// Does this object participate in island merging?
    ///
    /// Static, kinematic and disabled objects never force two islands to
    /// merge solely through contacts with them.
    #[inline]
    pub fn merges_simulation_islands(&self) -> bool {
        !self.is_static_or_kinematic()
            && self.activation_state != ActivationState::DisableSimulation
    }

    /// Is this object currently simulated?
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(
            self.activation_state,
            ActivationState::IslandSleeping | ActivationState::DisableSimulation
        )
    }

    /// The activation state of this object.
    #[inline]
    pub fn activation_state(&self) -> ActivationState {
        self.activation_state
    }

    /// Requests a new activation state. Ignored when deactivation or the
    /// whole simulation is disabled for this object; use
    /// `force_activation_state` to override those.
    pub fn set_activation_state(&mut self, state: ActivationState) {
        if !matches!(
            self.activation_state,
            ActivationState::DisableDeactivation | ActivationState::DisableSimulation
        ) {
            self.activation_state = state;
        }
    }

    /// Sets the activation state unconditionally.
    pub fn force_activation_state(&mut self, state: ActivationState) {
        self.activation_state = state;
    }

    /// Wakes this object up. Static and kinematic objects are only woken
    /// when `force` is set.
    pub fn activate(&mut self, force: bool) {
        if force || !self.is_static_or_kinematic() {
            self.set_activation_state(ActivationState::Active);
            self.deactivation_time = 0.0;
        }
    }

    /// The island tag assigned by the island manager; `-1` when unassigned.
    #[inline]
    pub fn island_tag(&self) -> i32 {
        self.island_tag
    }

    /// Sets the island tag. Reserved to the island manager.
    pub fn set_island_tag(&mut self, tag: i32) {
        self.island_tag = tag;
    }

    /// The friction coefficient of this object.
    #[inline]
    pub fn friction(&self) -> Real {
        self.friction
    }

    /// Sets the friction coefficient of this object.
    pub fn set_friction(&mut self, friction: Real) {
        self.friction = friction;
    }

    /// The restitution coefficient of this object.
    #[inline]
    pub fn restitution(&self) -> Real {
        self.restitution
    }

    /// Sets the restitution coefficient of this object.
    pub fn set_restitution(&mut self, restitution: Real) {
        self.restitution = restitution;
    }

    /// The accumulated quiescent time of this object.
    #[inline]
    pub fn deactivation_time(&self) -> Real {
        self.deactivation_time
    }

    /// Advances the deactivation timer.
    ///
    /// `quiescent` is the caller's judgement (typically a velocity-threshold
    /// test) that the body barely moved this step.
    pub fn update_deactivation(&mut self, time_step: Real, quiescent: bool) {
        if !matches!(
            self.activation_state,
            ActivationState::Active | ActivationState::WantsDeactivation
        ) {
            return;
        }

        if quiescent {
            self.deactivation_time += time_step;
        } else {
            self.deactivation_time = 0.0;
            if self.activation_state == ActivationState::WantsDeactivation {
                self.activation_state = ActivationState::Active;
            }
        }
    }

    /// Whether this object has been quiescent for longer than `threshold`.
    pub fn wants_sleeping(&self, threshold: Real) -> bool {
        self.activation_state != ActivationState::DisableDeactivation
            && self.deactivation_time > threshold
    }

    /// Recomputes and caches the world-space AABB of this object.
    pub fn update_world_aabb(&mut self) {
        self.world_aabb = Some(self.shape.compute_aabb(&self.world_transform));
    }

    /// The cached world-space AABB, if up to date.
    #[inline]
    pub fn world_aabb(&self) -> Option<&Aabb> {
        self.world_aabb.as_ref()
    }
}
