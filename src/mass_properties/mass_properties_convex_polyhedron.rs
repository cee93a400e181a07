use crate::mass_properties::MassProperties;
use crate::math::{Real, Vector};
use crate::shape::ConvexPolyhedron;

impl MassProperties {
    /// Computes the mass properties of a convex polyhedron.
    ///
    /// Without face connectivity the exact volume integral is unavailable, so
    /// the inertia is approximated by the box matching the polyhedron's local
    /// bounds, margin included.
    pub fn from_convex_polyhedron(mass: Real, shape: &ConvexPolyhedron) -> Self {
        let aabb = shape.local_aabb();
        let he = aabb.half_extents();
        let lx = 2.0 * he.x;
        let ly = 2.0 * he.y;
        let lz = 2.0 * he.z;
        let principal = Vector::new(
            mass / 12.0 * (ly * ly + lz * lz),
            mass / 12.0 * (lx * lx + lz * lz),
            mass / 12.0 * (lx * lx + ly * ly),
        );

        Self::with_principal_inertia(aabb.center(), mass, principal)
    }
}
