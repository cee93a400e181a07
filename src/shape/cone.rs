//! Support mapping based Cone shape.

use crate::math::{Point, Real, Vector};
use crate::shape::{ConvexShape, SupportMap, COLLISION_MARGIN};
use na;
use num::Zero;

/// Cone shape with its principal axis aligned with the `y` axis.
///
/// The apex points toward `+y`, the base disc lies at `-y`.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cone {
    /// The half-height of the cone.
    pub half_height: Real,
    /// The base radius of the cone.
    pub radius: Real,
    /// The collision margin of the cone.
    pub margin: Real,
}

impl Cone {
    /// Creates a new cone with the default collision margin.
    ///
    /// # Arguments:
    /// * `half_height` - the half length of the cone along the `y` axis.
    /// * `radius` - the base radius of the cone.
    pub fn new(half_height: Real, radius: Real) -> Cone {
        Cone {
            half_height,
            radius,
            margin: COLLISION_MARGIN,
        }
    }

    /// Sets the collision margin of this cone.
    pub fn with_margin(mut self, margin: Real) -> Cone {
        self.margin = margin;
        self
    }

    /// Computes a version of this cone scaled by the uniform factor `scale`.
    pub fn scaled(self, scale: Real) -> Cone {
        let scale = scale.abs();
        Cone {
            half_height: self.half_height * scale,
            radius: self.radius * scale,
            margin: self.margin * scale,
        }
    }
}

impl SupportMap for Cone {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let mut vres = *dir;

        vres[1] = 0.0;

        if vres.normalize_mut().is_zero() {
            vres = na::zero();
            vres[1] = self.half_height.copysign(dir[1]);
        } else {
            vres *= self.radius;
            vres[1] = -self.half_height;

            if dir.dot(&vres) < dir[1] * self.half_height {
                vres = na::zero();
                vres[1] = self.half_height
            }
        }

        Point::from(vres)
    }
}

impl ConvexShape for Cone {
    #[inline]
    fn margin(&self) -> Real {
        self.margin
    }
}
