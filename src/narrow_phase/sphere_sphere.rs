use crate::math::{Point, Vector};
use crate::narrow_phase::{CollisionAlgorithm, CollisionObjectRef, DispatchInfo, ManifoldResult};
use crate::query::ClosestPointsSink;
use na::Unit;

/// Analytic sphere-sphere collision.
///
/// No iterative machinery is needed for this pair: the contact is derived
/// directly from the center distance.
pub struct SphereSphereAlgorithm {
    owns_manifold: bool,
}

impl SphereSphereAlgorithm {
    /// Creates the sphere-sphere algorithm. `owns_manifold` is false for
    /// child algorithms writing into a compound pair's shared manifold.
    pub fn new(owns_manifold: bool) -> Self {
        SphereSphereAlgorithm { owns_manifold }
    }
}

impl CollisionAlgorithm for SphereSphereAlgorithm {
    fn process_collision(
        &mut self,
        body_a: &CollisionObjectRef,
        body_b: &CollisionObjectRef,
        _info: &DispatchInfo,
        result: &mut ManifoldResult,
    ) {
        let sphere_a = body_a
            .shape
            .as_sphere()
            .expect("sphere-sphere dispatched on a non-sphere shape");
        let sphere_b = body_b
            .shape
            .as_sphere()
            .expect("sphere-sphere dispatched on a non-sphere shape");

        let diff = body_a.world_transform.translation.vector
            - body_b.world_transform.translation.vector;
        let len = diff.norm();
        let radius_a = sphere_a.radius;
        let radius_b = sphere_b.radius;

        // Separated: no new contact, but stale points must still break.
        if len > radius_a + radius_b {
            if self.owns_manifold {
                result.refresh_contact_points();
            }
            return;
        }

        let dist = len - (radius_a + radius_b);

        let normal_on_b = if len > crate::math::DEFAULT_EPSILON {
            Unit::new_unchecked(diff / len)
        } else {
            Vector::x_axis()
        };

        // Contact point on the surface of the second sphere.
        let point_on_b =
            Point::from(body_b.world_transform.translation.vector) + *normal_on_b * radius_b;

        result.add_contact_point(normal_on_b, point_on_b, dist);
        if self.owns_manifold {
            result.refresh_contact_points();
        }
    }
}
