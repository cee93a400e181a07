use crate::math::Real;
use crate::narrow_phase::{
    AlgorithmTable, CollisionAlgorithm, CollisionObjectRef, ContactAddedCallback, DispatchError,
    ManifoldResult, PersistentManifold, CONTACT_BREAKING_THRESHOLD,
};
use crate::world::{CollisionObject, ObjectHandle};
use slab::Slab;
use std::collections::{HashMap, HashSet};

/// A handle into the dispatcher's manifold pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManifoldHandle(pub(crate) usize);

impl ManifoldHandle {
    /// The pool index of this manifold.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-step narrow-phase parameters.
pub struct DispatchInfo {
    /// The simulation time step, in seconds.
    pub time_step: Real,
    /// Whether pair algorithms should answer time-of-impact queries.
    pub use_continuous: bool,
    /// The distance past which persisted contact points are discarded.
    pub contact_breaking_threshold: Real,
    /// The distance past which the solver should ignore contact points.
    pub contact_processing_threshold: Real,
    /// Optional per-contact user hook; see [`ContactAddedCallback`].
    pub contact_added_callback: Option<Box<ContactAddedCallback>>,
}

impl Default for DispatchInfo {
    fn default() -> Self {
        DispatchInfo {
            time_step: 1.0 / 60.0,
            use_continuous: false,
            contact_breaking_threshold: CONTACT_BREAKING_THRESHOLD,
            contact_processing_threshold: Real::MAX,
            contact_added_callback: None,
        }
    }
}

struct PairEntry {
    algorithm: Box<dyn CollisionAlgorithm>,
    manifold: ManifoldHandle,
}

/// Owns the persistent-manifold pool and the per-pair algorithm map.
///
/// Manifolds live in a pool addressed by handles; each is created lazily when
/// the broad phase first reports its pair and released when the pair stops
/// being reported. No algorithm ever mutates another pair's manifold.
pub struct CollisionDispatcher {
    table: AlgorithmTable,
    manifolds: Slab<PersistentManifold>,
    pairs: HashMap<(ObjectHandle, ObjectHandle), PairEntry>,
}

impl CollisionDispatcher {
    /// Creates a dispatcher around the given dispatch table.
    pub fn new(table: AlgorithmTable) -> Self {
        CollisionDispatcher {
            table,
            manifolds: Slab::new(),
            pairs: HashMap::new(),
        }
    }

    /// Creates a dispatcher with the default dispatch table.
    pub fn with_default_table() -> Self {
        Self::new(AlgorithmTable::with_defaults())
    }

    /// The dispatch table.
    #[inline]
    pub fn table(&self) -> &AlgorithmTable {
        &self.table
    }

    /// The number of live manifolds.
    #[inline]
    pub fn num_manifolds(&self) -> usize {
        self.manifolds.len()
    }

    /// The manifold behind `handle`, if still alive.
    #[inline]
    pub fn manifold(&self, handle: ManifoldHandle) -> Option<&PersistentManifold> {
        self.manifolds.get(handle.0)
    }

    /// The manifold behind `handle`, mutably (solver impulse write-back).
    #[inline]
    pub fn manifold_mut(&mut self, handle: ManifoldHandle) -> Option<&mut PersistentManifold> {
        self.manifolds.get_mut(handle.0)
    }

    /// Iterates over the live manifolds in pool order (deterministic).
    pub fn manifolds(&self) -> impl Iterator<Item = (ManifoldHandle, &PersistentManifold)> {
        self.manifolds
            .iter()
            .map(|(i, manifold)| (ManifoldHandle(i), manifold))
    }

    /// The manifold handle of a pair, if that pair is live.
    pub fn pair_manifold(&self, a: ObjectHandle, b: ObjectHandle) -> Option<ManifoldHandle> {
        self.pairs.get(&ordered(a, b)).map(|entry| entry.manifold)
    }

    /// Synchronizes the pair set with the broad phase's candidate pairs.
    ///
    /// Pairs no longer reported lose their algorithm and manifold; new pairs
    /// get an algorithm from the dispatch table and a fresh manifold. An
    /// unregistered shape pair fails here, before any geometry runs.
    pub fn update_pairs(
        &mut self,
        candidate_pairs: &[(ObjectHandle, ObjectHandle)],
        objects: &[CollisionObject],
        info: &DispatchInfo,
    ) -> Result<(), DispatchError> {
        let requested: HashSet<(ObjectHandle, ObjectHandle)> = candidate_pairs
            .iter()
            .map(|&(a, b)| ordered(a, b))
            .collect();

        let stale: Vec<_> = self
            .pairs
            .keys()
            .filter(|key| !requested.contains(key))
            .copied()
            .collect();
        for key in stale {
            if let Some(entry) = self.pairs.remove(&key) {
                let _ = self.manifolds.try_remove(entry.manifold.0);
            }
        }

        for key in requested {
            if self.pairs.contains_key(&key) {
                continue;
            }

            let object_a = &objects[key.0 .0];
            let object_b = &objects[key.1 .0];
            let algorithm = self
                .table
                .create_algorithm(object_a.shape().as_ref(), object_b.shape().as_ref())?;
            let manifold = ManifoldHandle(self.manifolds.insert(PersistentManifold::new(
                key.0,
                key.1,
                info.contact_breaking_threshold,
                info.contact_processing_threshold,
            )));

            let _ = self.pairs.insert(key, PairEntry { algorithm, manifold });
        }

        Ok(())
    }

    /// Runs every live pair's collision algorithm.
    ///
    /// Pairs where both objects are inactive, or both are
    /// static/kinematic, are skipped. Pairs are processed in handle order so
    /// a step is reproducible.
    pub fn dispatch_all(&mut self, objects: &[CollisionObject], info: &DispatchInfo) {
        let mut keys: Vec<_> = self.pairs.keys().copied().collect();
        keys.sort_unstable();

        for key in keys {
            let object_a = &objects[key.0 .0];
            let object_b = &objects[key.1 .0];
            if !needs_collision(object_a, object_b) {
                continue;
            }

            let entry = match self.pairs.get_mut(&key) {
                Some(entry) => entry,
                None => continue,
            };
            let manifold = match self.manifolds.get_mut(entry.manifold.0) {
                Some(manifold) => manifold,
                None => continue,
            };

            let mut result = ManifoldResult::new(
                manifold,
                object_a,
                object_b,
                info.contact_added_callback.as_deref(),
            );
            let ref_a = CollisionObjectRef::from_object(object_a);
            let ref_b = CollisionObjectRef::from_object(object_b);
            entry
                .algorithm
                .process_collision(&ref_a, &ref_b, info, &mut result);
        }
    }

    /// Computes the earliest time of impact among the live pairs, in
    /// `[0, 1]` of the step interval.
    pub fn calculate_time_of_impact(
        &mut self,
        objects: &[CollisionObject],
        info: &DispatchInfo,
    ) -> Real {
        let mut keys: Vec<_> = self.pairs.keys().copied().collect();
        keys.sort_unstable();

        let mut fraction: Real = 1.0;
        for key in keys {
            let object_a = &objects[key.0 .0];
            let object_b = &objects[key.1 .0];
            if !needs_collision(object_a, object_b) {
                continue;
            }

            if let Some(entry) = self.pairs.get_mut(&key) {
                let ref_a = CollisionObjectRef::from_object(object_a);
                let ref_b = CollisionObjectRef::from_object(object_b);
                fraction = fraction.min(entry.algorithm.time_of_impact(&ref_a, &ref_b, info));
            }
        }

        fraction
    }
}

#[inline]
fn ordered(a: ObjectHandle, b: ObjectHandle) -> (ObjectHandle, ObjectHandle) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn needs_collision(a: &CollisionObject, b: &CollisionObject) -> bool {
    if !a.is_active() && !b.is_active() {
        return false;
    }
    if a.is_static_or_kinematic() && b.is_static_or_kinematic() {
        return false;
    }
    true
}
