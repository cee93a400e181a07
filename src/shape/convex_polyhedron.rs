use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::{ConvexShape, SupportMap, COLLISION_MARGIN};
use na::Unit;

/// A convex polyhedron described by its vertex cloud.
///
/// No connectivity is stored: support queries scan the scaled vertices. The
/// vertices are assumed to form a convex set; interior points are harmless but
/// wasteful.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPolyhedron {
    points: Vec<Point<Real>>,
    local_scaling: Vector<Real>,
    margin: Real,
    local_aabb: Aabb,
}

impl ConvexPolyhedron {
    /// Creates a polyhedron from a vertex cloud, with the default collision
    /// margin.
    ///
    /// Returns `None` if `points` is empty.
    pub fn from_points(points: Vec<Point<Real>>) -> Option<ConvexPolyhedron> {
        if points.is_empty() {
            return None;
        }

        let mut res = ConvexPolyhedron {
            points,
            local_scaling: Vector::repeat(1.0),
            margin: COLLISION_MARGIN,
            local_aabb: Aabb::new_invalid(),
        };
        res.recompute_local_aabb();
        Some(res)
    }

    /// Sets the collision margin of this polyhedron.
    pub fn with_margin(mut self, margin: Real) -> ConvexPolyhedron {
        self.margin = margin;
        self.recompute_local_aabb();
        self
    }

    /// The vertices of this polyhedron, unscaled.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The non-uniform local scaling applied to the vertices.
    #[inline]
    pub fn local_scaling(&self) -> &Vector<Real> {
        &self.local_scaling
    }

    /// Sets the local scaling factor and recomputes the cached local bounds.
    pub fn set_local_scaling(&mut self, scaling: Vector<Real>) {
        self.local_scaling = scaling;
        self.recompute_local_aabb();
    }

    /// The cached local-space AABB, margin included.
    #[inline]
    pub fn local_aabb(&self) -> &Aabb {
        &self.local_aabb
    }

    #[inline]
    fn scaled_point(&self, i: usize) -> Point<Real> {
        Point::from(self.points[i].coords.component_mul(&self.local_scaling))
    }

    fn recompute_local_aabb(&mut self) {
        let mut aabb = Aabb::new_invalid();
        for i in 0..self.points.len() {
            aabb.take_point(self.scaled_point(i));
        }
        self.local_aabb = aabb.loosened(self.margin);
    }
}

impl SupportMap for ConvexPolyhedron {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let mut best = self.scaled_point(0);
        let mut best_dot = best.coords.dot(dir);

        for i in 1..self.points.len() {
            let pt = self.scaled_point(i);
            let dot = pt.coords.dot(dir);
            if dot > best_dot {
                best = pt;
                best_dot = dot;
            }
        }

        best
    }
}

impl ConvexShape for ConvexPolyhedron {
    #[inline]
    fn margin(&self) -> Real {
        self.margin
    }

    // One pass over the vertices updates every direction at once.
    fn batch_local_support_points(&self, dirs: &[Unit<Vector<Real>>], out: &mut [Point<Real>]) {
        let mut best_dots = vec![-Real::MAX; dirs.len()];

        for i in 0..self.points.len() {
            let pt = self.scaled_point(i);
            for (j, dir) in dirs.iter().enumerate() {
                let dot = pt.coords.dot(dir);
                if dot > best_dots[j] {
                    best_dots[j] = dot;
                    out[j] = pt;
                }
            }
        }
    }
}
