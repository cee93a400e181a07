/*!
riposte3d
=========

**riposte3d** is a 3-dimensional narrow-phase collision-detection core written
with the rust programming language. It provides:

- support-mapped convex shapes with collision margins;
- GJK closest-point queries with a pluggable penetration-depth fallback (EPA);
- persistent, warm-startable contact manifolds with area-based contact reduction;
- shape-pair dispatch into per-pair collision algorithms;
- union-find based simulation islands with activation bookkeeping;
- triangle-level raycast and swept-convex cast callbacks.

Broad-phase pair generation and constraint solving are external collaborators:
the narrow phase consumes candidate pairs and produces, per island, the body and
manifold sets a solver needs.
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)]

#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod island;
pub mod mass_properties;
pub mod narrow_phase;
pub mod query;
pub mod shape;
pub mod world;

/// Aliases for the mathematical types used throughout this crate.
pub mod math {
    /// The scalar type used throughout this crate.
    pub use f32 as Real;

    use na::UnitQuaternion;
    pub use na::{Isometry3, Matrix3, Point3, Translation3, UnitVector3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The matrix type.
    pub use Matrix3 as Matrix;

    /// The transformation matrix type.
    pub use Isometry3 as Isometry;

    /// The rotation type.
    pub type Rotation<N> = UnitQuaternion<N>;

    /// The translation type.
    pub use Translation3 as Translation;
}
