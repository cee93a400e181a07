//! Swept-convex (linear cast) queries.

pub use self::subsimplex_cast::{CastResult, SubsimplexConvexCast};
pub use self::triangle_convexcast::{ConvexcastHitSink, TriangleConvexcaster};

mod subsimplex_cast;
mod triangle_convexcast;
