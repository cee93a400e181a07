use crate::mass_properties::MassProperties;
use crate::math::{Point, Real, Vector};

impl MassProperties {
    /// Computes the mass properties of a solid sphere.
    pub fn from_sphere(mass: Real, radius: Real) -> Self {
        let diag = 0.4 * mass * radius * radius;
        Self::with_principal_inertia(Point::origin(), mass, Vector::repeat(diag))
    }
}
