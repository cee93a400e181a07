//! Shapes usable by the narrow phase, and their support-mapping traits.

pub use self::compound::Compound;
pub use self::cone::Cone;
pub use self::convex_2d::Convex2d;
pub use self::convex_polyhedron::ConvexPolyhedron;
pub use self::multi_sphere::MultiSphere;
pub use self::segment::{Segment, SegmentPointLocation};
pub use self::shape::{Shape, ShapeType, SHAPE_TYPE_COUNT};
pub use self::shared_shape::SharedShape;
pub use self::sphere::Sphere;
pub use self::support_map::{ConvexShape, SupportMap, COLLISION_MARGIN};
pub use self::tetrahedron::{Tetrahedron, TetrahedronPointLocation};
pub use self::triangle::{Triangle, TrianglePointLocation};
pub use self::uniform_scaled::UniformScaled;

mod compound;
mod cone;
mod convex_2d;
mod convex_polyhedron;
mod multi_sphere;
mod segment;
mod shape;
mod shared_shape;
mod sphere;
mod support_map;
mod tetrahedron;
mod triangle;
mod uniform_scaled;
