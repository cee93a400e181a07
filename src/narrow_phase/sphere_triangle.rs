use crate::math::{Point, Real, Vector};
use crate::narrow_phase::{CollisionAlgorithm, CollisionObjectRef, DispatchInfo, ManifoldResult};
use crate::query::ClosestPointsSink;
use crate::shape::Triangle;
use na::Unit;

/// Sphere against a single triangle.
///
/// The swapped variant covers the `(triangle, sphere)` pair ordering; the
/// reported normal keeps the from-B-toward-A convention in both orderings.
pub struct SphereTriangleAlgorithm {
    swapped: bool,
    owns_manifold: bool,
}

impl SphereTriangleAlgorithm {
    /// Creates the sphere-triangle algorithm; `swapped` when the triangle is
    /// the first shape of the pair, `owns_manifold` false for compound
    /// children.
    pub fn new(swapped: bool, owns_manifold: bool) -> Self {
        SphereTriangleAlgorithm {
            swapped,
            owns_manifold,
        }
    }
}

/// Closest-point test between a sphere and a world-space triangle.
///
/// Returns the contact point on the triangle, the unit normal from the
/// triangle toward the sphere center, and the signed depth (negative when
/// overlapping). Contacts are generated slightly early, within
/// `contact_breaking_threshold` of the surface.
pub fn collide_sphere_triangle(
    center: Point<Real>,
    radius: Real,
    triangle: &Triangle,
    contact_breaking_threshold: Real,
) -> Option<(Point<Real>, Unit<Vector<Real>>, Real)> {
    let radius_with_threshold = radius + contact_breaking_threshold;

    let plane_normal = triangle.normal()?;
    let distance_from_plane = (center - triangle.a).dot(&plane_normal);

    // Orient the plane normal toward the sphere side.
    let facing_normal = if distance_from_plane < 0.0 {
        -plane_normal
    } else {
        plane_normal
    };

    if distance_from_plane.abs() >= radius_with_threshold {
        return None;
    }

    let (contact_point, _) = triangle.project_local_point_with_location(&center)?;
    let delta = center - contact_point;
    let distance_sqr = delta.norm_squared();

    if distance_sqr >= radius_with_threshold * radius_with_threshold {
        return None;
    }

    let eps = crate::math::DEFAULT_EPSILON;
    let (normal, distance) = if distance_sqr > eps * eps {
        let distance = distance_sqr.sqrt();
        (Unit::new_unchecked(delta / distance), distance)
    } else {
        // The center sits on the triangle; fall back to the plane normal.
        (facing_normal, 0.0)
    };

    Some((contact_point, normal, distance - radius))
}

impl CollisionAlgorithm for SphereTriangleAlgorithm {
    fn process_collision(
        &mut self,
        body_a: &CollisionObjectRef,
        body_b: &CollisionObjectRef,
        _info: &DispatchInfo,
        result: &mut ManifoldResult,
    ) {
        let (sphere_ref, triangle_ref) = if self.swapped {
            (body_b, body_a)
        } else {
            (body_a, body_b)
        };

        let sphere = sphere_ref
            .shape
            .as_sphere()
            .expect("sphere-triangle dispatched on a non-sphere shape");
        let triangle = triangle_ref
            .shape
            .as_triangle()
            .expect("sphere-triangle dispatched on a non-triangle shape");

        let world_triangle = Triangle::new(
            triangle_ref.world_transform * triangle.a,
            triangle_ref.world_transform * triangle.b,
            triangle_ref.world_transform * triangle.c,
        );
        let center = Point::from(sphere_ref.world_transform.translation.vector);

        let contact = collide_sphere_triangle(
            center,
            sphere.radius,
            &world_triangle,
            result.manifold().contact_breaking_threshold(),
        );

        if let Some((point_on_triangle, normal, depth)) = contact {
            if self.swapped {
                // Triangle is A, sphere is B: report the witness on the
                // sphere with the normal flipped toward the triangle.
                let point_on_sphere = center - *normal * sphere.radius;
                result.add_contact_point(-normal, point_on_sphere, depth);
            } else {
                result.add_contact_point(normal, point_on_triangle, depth);
            }
        }

        if self.owns_manifold {
            result.refresh_contact_points();
        }
    }
}
