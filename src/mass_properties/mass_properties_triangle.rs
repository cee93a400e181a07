use crate::mass_properties::MassProperties;
use crate::math::{Matrix, Real};
use crate::shape::Triangle;

impl MassProperties {
    /// Computes the mass properties of a triangle.
    ///
    /// Triangles carry no volume; they are meant for static mesh geometry and
    /// get a zero inertia tensor.
    pub fn from_triangle(mass: Real, shape: &Triangle) -> Self {
        MassProperties {
            local_com: shape.center(),
            mass,
            inertia_tensor: Matrix::zeros(),
        }
    }
}
