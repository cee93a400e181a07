//! Ray casting against triangle geometry.

pub use self::triangle_raycast::{RayFlags, TriangleHitSink, TriangleRaycaster};

mod triangle_raycast;
