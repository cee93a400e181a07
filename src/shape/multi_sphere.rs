use crate::math::{Point, Real, Vector};
use crate::shape::{ConvexShape, SupportMap, COLLISION_MARGIN};
use na::Unit;

/// The convex hull of a collection of spheres.
///
/// Useful for capsule-like and other smooth convex volumes. With the margin
/// applied, the shape is exactly the convex hull of the spheres: the core
/// support pulls each sphere radius back by the margin.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct MultiSphere {
    centers: Vec<Point<Real>>,
    radii: Vec<Real>,
    local_scaling: Vector<Real>,
    margin: Real,
}

impl MultiSphere {
    /// Creates a multi-sphere from sphere centers and radii.
    ///
    /// Panics if the slices are empty or of mismatched lengths.
    pub fn new(centers: Vec<Point<Real>>, radii: Vec<Real>) -> MultiSphere {
        assert!(
            !centers.is_empty() && centers.len() == radii.len(),
            "a multi-sphere requires one radius per center"
        );
        MultiSphere {
            centers,
            radii,
            local_scaling: Vector::repeat(1.0),
            margin: COLLISION_MARGIN,
        }
    }

    /// The number of spheres composing this shape.
    #[inline]
    pub fn sphere_count(&self) -> usize {
        self.centers.len()
    }

    /// The center and radius of the `i`-th sphere.
    #[inline]
    pub fn sphere(&self, i: usize) -> (Point<Real>, Real) {
        (self.centers[i], self.radii[i])
    }

    /// The non-uniform local scaling applied to the sphere centers.
    #[inline]
    pub fn local_scaling(&self) -> &Vector<Real> {
        &self.local_scaling
    }

    /// Sets the local scaling factor.
    pub fn set_local_scaling(&mut self, scaling: Vector<Real>) {
        self.local_scaling = scaling;
    }

    #[inline]
    fn scaled_center(&self, i: usize) -> Point<Real> {
        Point::from(self.centers[i].coords.component_mul(&self.local_scaling))
    }

    fn support_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        let mut best = 0;
        let mut best_score = -Real::MAX;

        for i in 0..self.centers.len() {
            let score = self.scaled_center(i).coords.dot(dir) + self.radii[i];
            if score > best_score {
                best_score = score;
                best = i;
            }
        }

        self.scaled_center(best) + **dir * (self.radii[best] - self.margin)
    }
}

impl SupportMap for MultiSphere {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let unit =
            Unit::try_new(*dir, crate::math::DEFAULT_EPSILON).unwrap_or_else(Vector::x_axis);
        self.support_toward(&unit)
    }

    #[inline]
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.support_toward(dir)
    }
}

impl ConvexShape for MultiSphere {
    #[inline]
    fn margin(&self) -> Real {
        self.margin
    }
}
