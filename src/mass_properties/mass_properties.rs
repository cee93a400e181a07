use crate::math::{Isometry, Matrix, Point, Real, Vector};
use na;

/// The mass properties of a shape: mass, center-of-mass, and the inertia
/// tensor about the center-of-mass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MassProperties {
    /// The center of mass, in the shape's local frame.
    pub local_com: Point<Real>,
    /// The mass.
    pub mass: Real,
    /// The inertia tensor about the center of mass, in the shape's local frame.
    pub inertia_tensor: Matrix<Real>,
}

impl MassProperties {
    /// Initializes mass properties from a diagonal (principal) inertia.
    pub fn with_principal_inertia(
        local_com: Point<Real>,
        mass: Real,
        principal_inertia: Vector<Real>,
    ) -> Self {
        MassProperties {
            local_com,
            mass,
            inertia_tensor: Matrix::from_diagonal(&principal_inertia),
        }
    }

    /// Mass properties of a massless shape.
    pub fn zero() -> Self {
        MassProperties {
            local_com: Point::origin(),
            mass: 0.0,
            inertia_tensor: Matrix::zeros(),
        }
    }

    /// The principal inertia of this shape, extracted from the inertia tensor.
    pub fn principal_inertia(&self) -> Vector<Real> {
        na::linalg::SymmetricEigen::new(self.inertia_tensor).eigenvalues
    }

    /// Transforms the center-of-mass and rotates the inertia tensor by `m`.
    pub fn transformed_by(&self, m: &Isometry<Real>) -> Self {
        let rot = m.rotation.to_rotation_matrix().into_inner();
        MassProperties {
            local_com: m * self.local_com,
            mass: self.mass,
            inertia_tensor: rot * self.inertia_tensor * rot.transpose(),
        }
    }

    /// Mass properties of the same shape scaled uniformly by `factor`.
    ///
    /// The mass is kept; the inertia scales with the square of the factor.
    pub fn scaled_uniformly(&self, factor: Real) -> Self {
        MassProperties {
            local_com: self.local_com * factor,
            mass: self.mass,
            inertia_tensor: self.inertia_tensor * (factor * factor),
        }
    }

    /// Sums mass properties expressed in a common frame.
    ///
    /// Each part's tensor is shifted to the combined center of mass with the
    /// parallel-axis theorem before accumulation.
    pub fn sum(parts: &[MassProperties]) -> Self {
        let total_mass: Real = parts.iter().map(|p| p.mass).sum();
        if total_mass <= 0.0 {
            return MassProperties::zero();
        }

        let mut com = Vector::zeros();
        for part in parts {
            com += part.local_com.coords * part.mass;
        }
        let com = Point::from(com / total_mass);

        let mut tensor = Matrix::zeros();
        for part in parts {
            let d = part.local_com - com;
            let shift = Matrix::identity() * d.norm_squared() - d * d.transpose();
            tensor += part.inertia_tensor + shift * part.mass;
        }

        MassProperties {
            local_com: com,
            mass: total_mass,
            inertia_tensor: tensor,
        }
    }
}
