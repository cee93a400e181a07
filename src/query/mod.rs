//! Geometric queries: GJK closest points, penetration depth, ray and convex
//! casts.

pub use self::closest_points::{ClosestPointsInput, ClosestPointsSink, PointCollector};

pub mod cast;
pub mod epa;
pub mod gjk;
pub mod ray;

mod closest_points;
