//! Collision objects and the world container tying the pipeline together.

pub use self::collision_object::{
    ActivationState, CollisionFlags, CollisionObject, DEACTIVATION_TIME_THRESHOLD,
};
pub use self::collision_world::CollisionWorld;

mod collision_object;
mod collision_world;

/// A handle identifying a collision object inside a [`CollisionWorld`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectHandle(pub usize);
