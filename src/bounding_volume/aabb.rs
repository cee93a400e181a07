//! Axis Aligned Bounding Box.

use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::ConvexShape;
use na::{self, Unit};

/// An Axis-Aligned Bounding Box.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The minimum coordinates of this AABB.
    pub mins: Point<Real>,
    /// The maximum coordinates of this AABB.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// `mins` must be componentwise smaller than `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` and `maxs` swapped to the opposite
    /// infinities, so that enlarging it with any point yields that point.
    #[inline]
    pub fn new_invalid() -> Aabb {
        Aabb {
            mins: Point::from(Vector::repeat(Real::MAX)),
            maxs: Point::from(Vector::repeat(-Real::MAX)),
        }
    }

    /// Computes the AABB of a convex shape positioned by `pos`.
    ///
    /// The six world-axis directions are mapped into the shape's local frame
    /// and resolved with a single batched support query, then the collision
    /// margin inflates the result.
    pub fn from_convex_shape(pos: &Isometry<Real>, shape: &dyn ConvexShape) -> Aabb {
        let world_dirs = [
            Vector::x_axis(),
            Vector::y_axis(),
            Vector::z_axis(),
            -Vector::x_axis(),
            -Vector::y_axis(),
            -Vector::z_axis(),
        ];

        let local_dirs =
            world_dirs.map(|dir| Unit::new_unchecked(pos.inverse_transform_vector(&dir)));
        let mut supports = [Point::origin(); 6];
        shape.batch_local_support_points(&local_dirs, &mut supports);

        let mut mins = Point::origin();
        let mut maxs = Point::origin();
        for i in 0..3 {
            maxs[i] = (pos * supports[i])[i];
            mins[i] = (pos * supports[i + 3])[i];
        }

        let margin = Vector::repeat(shape.margin());
        Aabb {
            mins: mins - margin,
            maxs: maxs + margin,
        }
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half-extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// Computes the AABB bounding `self` transformed by `m`.
    pub fn transform_by(&self, m: &Isometry<Real>) -> Aabb {
        let ls_center = self.center();
        let center = m * ls_center;
        let ws_half_extents = m.rotation.to_rotation_matrix().into_inner().abs()
            * self.half_extents();

        Aabb::new(center + (-ws_half_extents), center + ws_half_extents)
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Enlarges this AABB so it contains `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// Grows this AABB by `amount` on every side.
    #[inline]
    pub fn loosened(&self, amount: Real) -> Aabb {
        let amount = Vector::repeat(amount);
        Aabb {
            mins: self.mins - amount,
            maxs: self.maxs + amount,
        }
    }

    /// Tests whether this AABB intersects `other`.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.mins.x <= other.maxs.x
            && other.mins.x <= self.maxs.x
            && self.mins.y <= other.maxs.y
            && other.mins.y <= self.maxs.y
            && self.mins.z <= other.maxs.z
            && other.mins.z <= self.maxs.z
    }
}
