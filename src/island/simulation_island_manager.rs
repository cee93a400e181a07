use crate::math::Real;
use crate::narrow_phase::ManifoldHandle;
use crate::world::{ActivationState, CollisionObject, CollisionWorld, ObjectHandle};
use ena::unify::{InPlaceUnificationTable, UnifyKey};
use smallvec::SmallVec;

#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
struct BodyKey(u32);

impl UnifyKey for BodyKey {
    type Value = ();
    fn index(&self) -> u32 {
        self.0
    }
    fn from_index(u: u32) -> BodyKey {
        BodyKey(u)
    }
    fn tag() -> &'static str {
        "BodyKey"
    }
}

/// Receiver of per-island solve batches.
///
/// This is the hand-off point to the constraint solver: each island's bodies
/// and manifolds form an independent problem (they share no body with any
/// other island), so islands may in principle be solved in parallel. This
/// implementation invokes the callback sequentially.
pub trait IslandCallback {
    /// Processes one island. The solver reads contact data from the world's
    /// dispatcher through the manifold handles and writes accumulated
    /// impulses back into the manifold points for warm-starting.
    fn process_island(
        &mut self,
        world: &mut CollisionWorld,
        bodies: &[ObjectHandle],
        manifolds: &[ManifoldHandle],
        island_id: i32,
    );
}

/// Partitions the world into simulation islands, rebuilt every step with a
/// union-find forest.
///
/// Two bodies join the same island when a contact-carrying manifold or a
/// constraint links them, at least one of them is active, and both of them
/// merge islands (static and kinematic bodies never do). Sleeping pairs are
/// excluded from the union so a dormant region cannot dam activation
/// propagation through an island.
pub struct SimulationIslandManager {
    union: InPlaceUnificationTable<BodyKey>,
    island_manifolds: Vec<(i32, ManifoldHandle)>,
    island_bodies: Vec<(i32, ObjectHandle)>,
    split_islands: bool,
}

impl SimulationIslandManager {
    /// Creates an island manager.
    pub fn new() -> Self {
        SimulationIslandManager {
            union: InPlaceUnificationTable::new(),
            island_manifolds: Vec::new(),
            island_bodies: Vec::new(),
            split_islands: true,
        }
    }

    /// Whether islands are split and processed separately (the default), or
    /// the whole world is handed to the callback as a single batch.
    pub fn split_islands(&self) -> bool {
        self.split_islands
    }

    /// Enables or disables island splitting.
    pub fn set_split_islands(&mut self, split_islands: bool) {
        self.split_islands = split_islands;
    }

    /// Re-initializes the union-find forest with `n` singleton sets.
    pub fn init_union_find(&mut self, n: usize) {
        self.union = InPlaceUnificationTable::new();
        for _ in 0..n {
            let _ = self.union.new_key(());
        }
    }

    /// Unions the endpoints of every contact-carrying manifold and every
    /// constraint link of the world, subject to the merge rules.
    pub fn find_unions(&mut self, world: &CollisionWorld) {
        for (_, manifold) in world.dispatcher().manifolds() {
            if manifold.num_contacts() > 0 {
                self.union_pair(world, manifold.body_a(), manifold.body_b());
            }
        }

        for &(body_a, body_b) in world.constraint_links() {
            self.union_pair(world, body_a, body_b);
        }
    }

    fn union_pair(&mut self, world: &CollisionWorld, body_a: ObjectHandle, body_b: ObjectHandle) {
        let object_a = world.object(body_a);
        let object_b = world.object(body_b);

        // Sleeping-sleeping pairs stay apart so a dormant region cannot link
        // two otherwise independent islands.
        if object_a.merges_simulation_islands()
            && object_b.merges_simulation_islands()
            && (object_a.is_active() || object_b.is_active())
        {
            self.union
                .union(BodyKey(body_a.0 as u32), BodyKey(body_b.0 as u32));
        }
    }

    /// Rebuilds the union-find forest from the current manifold set and
    /// constraint links.
    pub fn update_activation_state(&mut self, world: &CollisionWorld) {
        self.init_union_find(world.num_objects());
        self.find_unions(world);
    }

    /// Writes every object's island tag: the canonical set id for bodies
    /// that merge islands, `-1` for static/kinematic/disabled bodies.
    pub fn store_island_activation_state(&mut self, world: &mut CollisionWorld) {
        for i in 0..world.num_objects() {
            let tag = if world.object(ObjectHandle(i)).merges_simulation_islands() {
                self.union.find(BodyKey(i as u32)).0 as i32
            } else {
                -1
            };
            world.object_mut(ObjectHandle(i)).set_island_tag(tag);
        }
    }

    /// Applies per-island sleep transitions and gathers the manifold set of
    /// each island.
    ///
    /// An island falls asleep only when every body in it wants to; otherwise
    /// its sleeping members are woken back up. Expects the union-find state
    /// from `update_activation_state` + `store_island_activation_state`.
    pub fn build_islands(&mut self, world: &mut CollisionWorld) {
        self.island_bodies.clear();
        for (i, object) in world.objects().iter().enumerate() {
            let tag = object.island_tag();
            if tag >= 0 {
                self.island_bodies.push((tag, ObjectHandle(i)));
            }
        }
        self.island_bodies.sort_unstable();

        let mut start = 0;
        while start < self.island_bodies.len() {
            let island_id = self.island_bodies[start].0;
            let mut end = start;
            while end < self.island_bodies.len() && self.island_bodies[end].0 == island_id {
                end += 1;
            }

            let all_sleeping = self.island_bodies[start..end].iter().all(|&(_, handle)| {
                matches!(
                    world.object(handle).activation_state(),
                    ActivationState::IslandSleeping | ActivationState::WantsDeactivation
                )
            });

            if all_sleeping {
                for &(_, handle) in &self.island_bodies[start..end] {
                    world
                        .object_mut(handle)
                        .set_activation_state(ActivationState::IslandSleeping);
                }
            } else {
                // The island stays up: wake any member that was asleep.
                for &(_, handle) in &self.island_bodies[start..end] {
                    let object = world.object_mut(handle);
                    if object.activation_state() == ActivationState::IslandSleeping {
                        object.activate(false);
                    }
                }
            }

            start = end;
        }

        self.island_manifolds.clear();
        for (handle, manifold) in world.dispatcher().manifolds() {
            if manifold.num_contacts() == 0 {
                continue;
            }

            let object_a = world.object(manifold.body_a());
            let object_b = world.object(manifold.body_b());
            if object_a.is_active() || object_b.is_active() {
                let island_id = island_id_of(object_a, object_b);
                self.island_manifolds.push((island_id, handle));
            }
        }
        self.island_manifolds.sort_unstable_by_key(|&(id, _)| id);
    }

    /// Rebuilds the islands and invokes `callback` once per awake island.
    ///
    /// With island splitting disabled the whole world is handed to the
    /// callback as one batch with island id `-1`.
    pub fn build_and_process_islands(
        &mut self,
        world: &mut CollisionWorld,
        callback: &mut dyn IslandCallback,
    ) {
        self.update_activation_state(world);
        self.store_island_activation_state(world);
        self.build_islands(world);

        if !self.split_islands {
            let bodies: Vec<ObjectHandle> = (0..world.num_objects()).map(ObjectHandle).collect();
            let manifolds: Vec<ManifoldHandle> =
                self.island_manifolds.iter().map(|&(_, h)| h).collect();
            callback.process_island(world, &bodies, &manifolds, -1);
            return;
        }

        let mut manifold_cursor = 0;
        let mut start = 0;
        while start < self.island_bodies.len() {
            let island_id = self.island_bodies[start].0;
            let mut end = start;
            while end < self.island_bodies.len() && self.island_bodies[end].0 == island_id {
                end += 1;
            }

            let bodies: SmallVec<[ObjectHandle; 32]> = self.island_bodies[start..end]
                .iter()
                .map(|&(_, handle)| handle)
                .collect();

            // Both lists are sorted by island id, so the matching manifold
            // range is a simple cursor advance.
            while manifold_cursor < self.island_manifolds.len()
                && self.island_manifolds[manifold_cursor].0 < island_id
            {
                manifold_cursor += 1;
            }
            let manifold_start = manifold_cursor;
            while manifold_cursor < self.island_manifolds.len()
                && self.island_manifolds[manifold_cursor].0 == island_id
            {
                manifold_cursor += 1;
            }
            let manifolds: SmallVec<[ManifoldHandle; 32]> = self.island_manifolds
                [manifold_start..manifold_cursor]
                .iter()
                .map(|&(_, handle)| handle)
                .collect();

            let island_sleeping = bodies
                .iter()
                .all(|&handle| !world.object(handle).is_active());

            if !island_sleeping {
                callback.process_island(world, &bodies, &manifolds, island_id);
            }

            start = end;
        }
    }

    /// Advances every dynamic body's deactivation timer and flags the ones
    /// that have been quiescent long enough as sleep candidates.
    ///
    /// `quiescent` is the caller's judgement of whether a body barely moved
    /// this step (typically a velocity-threshold test; velocities live with
    /// the out-of-scope solver). The actual transition to sleep happens in
    /// `build_islands`, once a whole island agrees.
    pub fn update_deactivation(
        &self,
        world: &mut CollisionWorld,
        time_step: Real,
        sleep_time_threshold: Real,
        quiescent: &dyn Fn(&CollisionObject) -> bool,
    ) {
        for object in world.objects_mut() {
            if object.is_static_or_kinematic() {
                continue;
            }

            let is_quiescent = quiescent(object);
            object.update_deactivation(time_step, is_quiescent);

            if object.activation_state() == ActivationState::Active
                && object.wants_sleeping(sleep_time_threshold)
            {
                object.set_activation_state(ActivationState::WantsDeactivation);
            }
        }
    }
}

impl Default for SimulationIslandManager {
    fn default() -> Self {
        Self::new()
    }
}

/// The island a manifold belongs to: the tag of whichever endpoint carries
/// one (static endpoints are tagged `-1`).
fn island_id_of(object_a: &CollisionObject, object_b: &CollisionObject) -> i32 {
    if object_a.island_tag() >= 0 {
        object_a.island_tag()
    } else {
        object_b.island_tag()
    }
}
