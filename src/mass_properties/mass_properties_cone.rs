use crate::mass_properties::MassProperties;
use crate::math::{Point, Real, Vector};

impl MassProperties {
    /// Computes the mass properties of a solid cone aligned with the `y` axis.
    ///
    /// The center of mass sits a quarter of the height above the base disc.
    pub fn from_cone(mass: Real, half_height: Real, radius: Real) -> Self {
        let sq_radius = radius * radius;
        let sq_half_height = half_height * half_height;
        let off_principal = mass * (3.0 / 20.0) * (sq_radius + sq_half_height);
        let principal_y = mass * (3.0 / 10.0) * sq_radius;

        Self::with_principal_inertia(
            Point::new(0.0, -half_height * 0.5, 0.0),
            mass,
            Vector::new(off_principal, principal_y, off_principal),
        )
    }
}
