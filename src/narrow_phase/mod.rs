//! Narrow-phase dispatch: persistent contact manifolds, per-pair collision
//! algorithms, and the double-dispatch table binding them to shape types.

pub use self::algorithm_table::{AlgorithmKind, AlgorithmTable};
pub use self::collision_algorithm::{CollisionAlgorithm, CollisionObjectRef};
pub use self::compound::CompoundCollisionAlgorithm;
pub use self::convex_2d_convex_2d::Convex2dConvex2dAlgorithm;
pub use self::convex_convex::ConvexConvexAlgorithm;
pub use self::dispatcher::{CollisionDispatcher, DispatchInfo, ManifoldHandle};
pub use self::error::DispatchError;
pub use self::manifold_point::ManifoldPoint;
pub use self::manifold_result::{ContactAddedCallback, ManifoldResult};
pub use self::persistent_manifold::{
    PersistentManifold, CONTACT_BREAKING_THRESHOLD, MAX_MANIFOLD_POINTS,
};
pub use self::sphere_sphere::SphereSphereAlgorithm;
pub use self::sphere_triangle::SphereTriangleAlgorithm;

mod algorithm_table;
mod collision_algorithm;
mod compound;
mod convex_2d_convex_2d;
mod convex_convex;
mod dispatcher;
mod error;
mod manifold_point;
mod manifold_result;
mod persistent_manifold;
mod sphere_sphere;
mod sphere_triangle;
