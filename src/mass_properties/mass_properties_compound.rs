use crate::mass_properties::MassProperties;
use crate::math::Real;
use crate::shape::Compound;

impl MassProperties {
    /// Computes the mass properties of a compound shape.
    ///
    /// The total mass is split evenly among the children; each child tensor
    /// is rotated into the compound frame and shifted to the combined center
    /// of mass.
    pub fn from_compound(mass: Real, shape: &Compound) -> Self {
        let child_mass = mass / shape.children().len() as Real;
        let parts: Vec<MassProperties> = shape
            .children()
            .iter()
            .map(|(pos, child)| child.mass_properties(child_mass).transformed_by(pos))
            .collect();

        MassProperties::sum(&parts)
    }
}
