use crate::math::{Isometry, Point, Real, Vector};
use crate::narrow_phase::{ManifoldPoint, PersistentManifold};
use crate::query::ClosestPointsSink;
use crate::world::{CollisionFlags, CollisionObject};
use na::Unit;

/// User hook invoked for every new contact point, before it enters the
/// manifold.
///
/// Arguments: the candidate point (mutable, so materials can be tagged), each
/// object with the part id and sub-shape index the contact belongs to.
/// Returning `false` vetoes the point.
pub type ContactAddedCallback =
    dyn Fn(&mut ManifoldPoint, &CollisionObject, i32, i32, &CollisionObject, i32, i32) -> bool
        + Send
        + Sync;

const MAX_FRICTION: Real = 10.0;

fn combined_friction(a: &CollisionObject, b: &CollisionObject) -> Real {
    (a.friction() * b.friction()).clamp(-MAX_FRICTION, MAX_FRICTION)
}

fn combined_restitution(a: &CollisionObject, b: &CollisionObject) -> Real {
    a.restitution() * b.restitution()
}

/// The sink binding detector output to a persistent manifold.
///
/// Converts world-space contacts into both bodies' local frames using the
/// pair's *root* transforms (so compound children localize against the
/// compound object, not the child), merges near-duplicates while preserving
/// their warm-start impulses, and applies the contact-added veto.
pub struct ManifoldResult<'a> {
    manifold: &'a mut PersistentManifold,
    object_a: &'a CollisionObject,
    object_b: &'a CollisionObject,
    root_transform_a: Isometry<Real>,
    root_transform_b: Isometry<Real>,
    part_id_a: i32,
    part_id_b: i32,
    index_a: i32,
    index_b: i32,
    contact_added_callback: Option<&'a ContactAddedCallback>,
}

impl<'a> ManifoldResult<'a> {
    /// Creates a result sink for one pair.
    ///
    /// `object_a` and `object_b` must be the manifold's bodies, in order.
    pub fn new(
        manifold: &'a mut PersistentManifold,
        object_a: &'a CollisionObject,
        object_b: &'a CollisionObject,
        contact_added_callback: Option<&'a ContactAddedCallback>,
    ) -> Self {
        let root_transform_a = *object_a.world_transform();
        let root_transform_b = *object_b.world_transform();
        ManifoldResult {
            manifold,
            object_a,
            object_b,
            root_transform_a,
            root_transform_b,
            part_id_a: -1,
            part_id_b: -1,
            index_a: -1,
            index_b: -1,
            contact_added_callback,
        }
    }

    /// The manifold this sink writes into.
    #[inline]
    pub fn manifold(&self) -> &PersistentManifold {
        self.manifold
    }

    /// The manifold this sink writes into, mutably.
    #[inline]
    pub fn manifold_mut(&mut self) -> &mut PersistentManifold {
        self.manifold
    }

    /// Re-projects the stored contact points onto the pair's current root
    /// transforms and prunes the stale ones.
    ///
    /// Every pair algorithm calls this before returning, even when it added
    /// no point this step, so separations break contacts promptly.
    pub fn refresh_contact_points(&mut self) {
        if self.manifold.num_contacts() == 0 {
            return;
        }

        self.manifold
            .refresh_contact_points(&self.root_transform_a, &self.root_transform_b);
    }
}

impl<'a> ClosestPointsSink for ManifoldResult<'a> {
    fn set_shape_identifiers_a(&mut self, part_id: i32, index: i32) {
        self.part_id_a = part_id;
        self.index_a = index;
    }

    fn set_shape_identifiers_b(&mut self, part_id: i32, index: i32) {
        self.part_id_b = part_id;
        self.index_b = index;
    }

    fn add_contact_point(
        &mut self,
        normal_on_b: Unit<Vector<Real>>,
        point_on_b: Point<Real>,
        depth: Real,
    ) {
        if depth > self.manifold.contact_breaking_threshold() {
            return;
        }

        let point_on_a = point_on_b + *normal_on_b * depth;
        let local_a = self.root_transform_a.inverse_transform_point(&point_on_a);
        let local_b = self.root_transform_b.inverse_transform_point(&point_on_b);

        let mut new_point = ManifoldPoint::new(local_a, local_b, normal_on_b, depth);
        new_point.position_world_on_a = point_on_a;
        new_point.position_world_on_b = point_on_b;
        new_point.part_id_a = self.part_id_a;
        new_point.part_id_b = self.part_id_b;
        new_point.index_a = self.index_a;
        new_point.index_b = self.index_b;
        new_point.combined_friction = combined_friction(self.object_a, self.object_b);
        new_point.combined_restitution = combined_restitution(self.object_a, self.object_b);

        if let Some(callback) = self.contact_added_callback {
            let wants_callback = self
                .object_a
                .collision_flags()
                .contains(CollisionFlags::CUSTOM_MATERIAL_CALLBACK)
                || self
                    .object_b
                    .collision_flags()
                    .contains(CollisionFlags::CUSTOM_MATERIAL_CALLBACK);

            if wants_callback
                && !callback(
                    &mut new_point,
                    self.object_a,
                    self.part_id_a,
                    self.index_a,
                    self.object_b,
                    self.part_id_b,
                    self.index_b,
                )
            {
                return;
            }
        }

        match self.manifold.cache_entry(&new_point) {
            Some(i) => self.manifold.replace_contact_point(i, new_point),
            None => {
                let _ = self.manifold.add_manifold_point(new_point);
            }
        }
    }
}
