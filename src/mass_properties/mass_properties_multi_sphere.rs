use crate::mass_properties::MassProperties;
use crate::math::Real;
use crate::shape::MultiSphere;

impl MassProperties {
    /// Computes the mass properties of a multi-sphere shape.
    ///
    /// The total mass is distributed among the spheres proportionally to
    /// their volumes, ignoring overlaps.
    pub fn from_multi_sphere(mass: Real, shape: &MultiSphere) -> Self {
        let total_volume: Real = (0..shape.sphere_count())
            .map(|i| shape.sphere(i).1.powi(3))
            .sum();

        if total_volume <= 0.0 {
            return MassProperties::zero();
        }

        let parts: Vec<MassProperties> = (0..shape.sphere_count())
            .map(|i| {
                let (center, radius) = shape.sphere(i);
                let part_mass = mass * radius.powi(3) / total_volume;
                let mut part = MassProperties::from_sphere(part_mass, radius);
                part.local_com = center;
                part
            })
            .collect();

        MassProperties::sum(&parts)
    }
}
