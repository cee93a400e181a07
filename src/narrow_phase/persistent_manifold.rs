use crate::math::{Isometry, Point, Real};
use crate::narrow_phase::ManifoldPoint;
use crate::world::ObjectHandle;
use arrayvec::ArrayVec;

/// The default distance past which a persisted contact point is discarded.
pub const CONTACT_BREAKING_THRESHOLD: Real = 0.02;

/// The maximum number of contact points kept per object pair.
pub const MAX_MANIFOLD_POINTS: usize = 4;

/// A bounded set of contact points persisting between two collision objects
/// across simulation steps.
///
/// Keeping at most four well-spread points per pair is enough for a stable
/// contact patch; the point-reduction step evicts whichever candidate's
/// removal preserves the largest contact polygon area. Iteration order over
/// the stored points is stable across frames, so warm-started solving stays
/// deterministic.
pub struct PersistentManifold {
    points: ArrayVec<ManifoldPoint, MAX_MANIFOLD_POINTS>,
    body_a: ObjectHandle,
    body_b: ObjectHandle,
    contact_breaking_threshold: Real,
    contact_processing_threshold: Real,
}

impl PersistentManifold {
    /// Creates an empty manifold for the given object pair.
    pub fn new(
        body_a: ObjectHandle,
        body_b: ObjectHandle,
        contact_breaking_threshold: Real,
        contact_processing_threshold: Real,
    ) -> Self {
        PersistentManifold {
            points: ArrayVec::new(),
            body_a,
            body_b,
            contact_breaking_threshold,
            contact_processing_threshold,
        }
    }

    /// The first object of the pair.
    #[inline]
    pub fn body_a(&self) -> ObjectHandle {
        self.body_a
    }

    /// The second object of the pair.
    #[inline]
    pub fn body_b(&self) -> ObjectHandle {
        self.body_b
    }

    /// The distance past which a persisted point is discarded.
    #[inline]
    pub fn contact_breaking_threshold(&self) -> Real {
        self.contact_breaking_threshold
    }

    /// The distance past which the solver should ignore a point.
    #[inline]
    pub fn contact_processing_threshold(&self) -> Real {
        self.contact_processing_threshold
    }

    /// The number of stored contact points.
    #[inline]
    pub fn num_contacts(&self) -> usize {
        self.points.len()
    }

    /// The `i`-th stored contact point.
    #[inline]
    pub fn point(&self, i: usize) -> &ManifoldPoint {
        &self.points[i]
    }

    /// The `i`-th stored contact point, mutably (solver impulse write-back).
    #[inline]
    pub fn point_mut(&mut self, i: usize) -> &mut ManifoldPoint {
        &mut self.points[i]
    }

    /// Iterates over the stored contact points in stable order.
    #[inline]
    pub fn points(&self) -> impl Iterator<Item = &ManifoldPoint> {
        self.points.iter()
    }

    /// Removes every stored point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Finds the stored point matching `pt`, if any.
    ///
    /// A point matches when its sub-shape identifiers agree (when set), or
    /// when its cached local position on the first body lies within the
    /// breaking threshold of the candidate's.
    pub fn cache_entry(&self, pt: &ManifoldPoint) -> Option<usize> {
        let has_ids = pt.part_id_a >= 0 || pt.part_id_b >= 0 || pt.index_a >= 0 || pt.index_b >= 0;
        if has_ids {
            for (i, old) in self.points.iter().enumerate() {
                if old.part_id_a == pt.part_id_a
                    && old.part_id_b == pt.part_id_b
                    && old.index_a == pt.index_a
                    && old.index_b == pt.index_b
                {
                    return Some(i);
                }
            }
        }

        let mut shortest = self.contact_breaking_threshold * self.contact_breaking_threshold;
        let mut nearest = None;

        for (i, old) in self.points.iter().enumerate() {
            let dist = (old.local_point_a - pt.local_point_a).norm_squared();
            if dist < shortest {
                shortest = dist;
                nearest = Some(i);
            }
        }

        nearest
    }

    /// Overwrites the `i`-th point with `pt`, preserving the accumulated
    /// impulses, friction frame and lifetime of the replaced point.
    pub fn replace_contact_point(&mut self, i: usize, mut pt: ManifoldPoint) {
        let old = &self.points[i];
        pt.applied_impulse = old.applied_impulse;
        pt.applied_impulse_lateral_1 = old.applied_impulse_lateral_1;
        pt.applied_impulse_lateral_2 = old.applied_impulse_lateral_2;
        pt.lateral_friction_dir_1 = old.lateral_friction_dir_1;
        pt.lateral_friction_dir_2 = old.lateral_friction_dir_2;
        pt.lateral_friction_initialized = old.lateral_friction_initialized;
        pt.lifetime = old.lifetime;
        self.points[i] = pt;
    }

    /// Inserts a new contact point, evicting an old one when the manifold is
    /// full.
    ///
    /// The eviction compares all five candidates (the four stored points and
    /// the new one) on equal footing and drops whichever removal leaves the
    /// largest contact polygon area. Returns the slot the point landed in, or
    /// `None` when keeping the existing four maximizes the area.
    pub fn add_manifold_point(&mut self, pt: ManifoldPoint) -> Option<usize> {
        if !self.points.is_full() {
            self.points.push(pt);
            return Some(self.points.len() - 1);
        }

        match self.widest_replacement(&pt) {
            Some(i) => {
                // The replaced slot keeps its position so the iteration
                // order over surviving points does not change.
                self.points[i] = pt;
                Some(i)
            }
            None => None,
        }
    }

    /// The slot whose replacement by `pt` yields the largest contact area,
    /// or `None` if dropping `pt` itself is the best choice.
    fn widest_replacement(&self, pt: &ManifoldPoint) -> Option<usize> {
        let p = [
            self.points[0].local_point_a,
            self.points[1].local_point_a,
            self.points[2].local_point_a,
            self.points[3].local_point_a,
        ];
        let new_pt = pt.local_point_a;

        let mut best_area = quad_area(p[0], p[1], p[2], p[3]);
        let mut best = None;

        for i in 0..MAX_MANIFOLD_POINTS {
            let mut q = p;
            q[i] = new_pt;
            let area = quad_area(q[0], q[1], q[2], q[3]);
            if area > best_area {
                best_area = area;
                best = Some(i);
            }
        }

        best
    }

    /// Re-derives every stored point's world data from the current body
    /// transforms, then prunes points that separated past the breaking
    /// threshold or drifted tangentially away from their contact spot.
    ///
    /// Removal shifts the surviving points without reordering them.
    pub fn refresh_contact_points(
        &mut self,
        transform_a: &Isometry<Real>,
        transform_b: &Isometry<Real>,
    ) {
        for pt in &mut self.points {
            pt.position_world_on_a = transform_a * pt.local_point_a;
            pt.position_world_on_b = transform_b * pt.local_point_b;
            pt.distance =
                (pt.position_world_on_a - pt.position_world_on_b).dot(&pt.normal_world_on_b);
            pt.lifetime += 1;
        }

        let threshold = self.contact_breaking_threshold;
        for i in (0..self.points.len()).rev() {
            let pt = &self.points[i];

            if pt.distance > threshold {
                // The bodies separated along the normal.
                let _ = self.points.remove(i);
            } else {
                // Check for tangential drift of the cached spots.
                let projected =
                    pt.position_world_on_a - *pt.normal_world_on_b * pt.distance;
                let drift = pt.position_world_on_b - projected;
                if drift.norm_squared() > threshold * threshold {
                    let _ = self.points.remove(i);
                }
            }
        }
    }
}

/// The squared area spanned by four contact points, taken as the largest of
/// the three possible diagonal pairings.
fn quad_area(p0: Point<Real>, p1: Point<Real>, p2: Point<Real>, p3: Point<Real>) -> Real {
    let a0 = (p0 - p1).cross(&(p2 - p3)).norm_squared();
    let a1 = (p0 - p2).cross(&(p1 - p3)).norm_squared();
    let a2 = (p0 - p3).cross(&(p1 - p2)).norm_squared();
    a0.max(a1).max(a2)
}
