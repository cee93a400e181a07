use na::Isometry3;
use riposte3d::island::{IslandCallback, SimulationIslandManager};
use riposte3d::narrow_phase::{DispatchInfo, ManifoldHandle};
use riposte3d::shape::SharedShape;
use riposte3d::world::{
    ActivationState, CollisionFlags, CollisionObject, CollisionWorld, ObjectHandle,
    DEACTIVATION_TIME_THRESHOLD,
};

fn sphere_at(world: &mut CollisionWorld, x: f32, radius: f32) -> ObjectHandle {
    let mut object = CollisionObject::new(SharedShape::sphere(radius));
    object.set_world_transform(Isometry3::translation(x, 0.0, 0.0));
    world.add_collision_object(object)
}

fn build(world: &mut CollisionWorld, manager: &mut SimulationIslandManager) {
    // The split entry points mirror the step order of a dynamics loop.
    manager.update_activation_state(world);
    manager.store_island_activation_state(world);
    manager.build_islands(world);
}

struct CountingCallback {
    islands: Vec<(i32, usize, usize)>,
}

impl IslandCallback for CountingCallback {
    fn process_island(
        &mut self,
        _world: &mut CollisionWorld,
        bodies: &[ObjectHandle],
        manifolds: &[ManifoldHandle],
        island_id: i32,
    ) {
        self.islands.push((island_id, bodies.len(), manifolds.len()));
    }
}

#[test]
fn chain_of_active_bodies_forms_one_island() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = sphere_at(&mut world, 0.0, 0.5);
    let b = sphere_at(&mut world, 0.8, 0.5);
    let c = sphere_at(&mut world, 1.6, 0.5);
    let lonely = sphere_at(&mut world, 10.0, 0.5);

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(a, b), (b, c), (c, lonely)], &info)
        .unwrap();

    let mut manager = SimulationIslandManager::new();
    build(&mut world, &mut manager);

    let tag_a = world.object(a).island_tag();
    assert_eq!(tag_a, world.object(b).island_tag());
    assert_eq!(tag_a, world.object(c).island_tag());
    assert_ne!(tag_a, world.object(lonely).island_tag());
    assert!(world.object(lonely).island_tag() >= 0);
}

#[test]
fn static_bodies_never_merge_islands() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let left = sphere_at(&mut world, -0.8, 0.5);
    let anchor = sphere_at(&mut world, 0.0, 0.5);
    let right = sphere_at(&mut world, 0.8, 0.5);
    world
        .object_mut(anchor)
        .set_collision_flags(CollisionFlags::STATIC_OBJECT);

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(left, anchor), (anchor, right)], &info)
        .unwrap();

    let mut manager = SimulationIslandManager::new();
    build(&mut world, &mut manager);

    // Both dynamics touch the static anchor, yet stay in separate islands.
    assert_eq!(world.object(anchor).island_tag(), -1);
    assert_ne!(
        world.object(left).island_tag(),
        world.object(right).island_tag()
    );
}

#[test]
fn sleeping_pair_stays_apart_until_woken() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = sphere_at(&mut world, 0.0, 0.5);
    let b = sphere_at(&mut world, 0.8, 0.5);

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(a, b)], &info)
        .unwrap();

    world
        .object_mut(a)
        .force_activation_state(ActivationState::IslandSleeping);
    world
        .object_mut(b)
        .force_activation_state(ActivationState::IslandSleeping);

    let mut manager = SimulationIslandManager::new();
    build(&mut world, &mut manager);
    assert_ne!(world.object(a).island_tag(), world.object(b).island_tag());

    // Waking one body reconnects the island and pulls the other one awake.
    world.object_mut(a).activate(false);
    build(&mut world, &mut manager);
    assert_eq!(world.object(a).island_tag(), world.object(b).island_tag());
    assert_ne!(
        world.object(b).activation_state(),
        ActivationState::IslandSleeping
    );
}

#[test]
fn constraint_links_merge_islands() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = sphere_at(&mut world, 0.0, 0.5);
    let b = sphere_at(&mut world, 10.0, 0.5);
    world.add_constraint_link(a, b);

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[], &info)
        .unwrap();

    let mut manager = SimulationIslandManager::new();
    build(&mut world, &mut manager);
    assert_eq!(world.object(a).island_tag(), world.object(b).island_tag());
}

#[test]
fn islands_are_processed_independently() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = sphere_at(&mut world, 0.0, 0.5);
    let b = sphere_at(&mut world, 0.8, 0.5);
    let c = sphere_at(&mut world, 1.6, 0.5);
    let _lonely = sphere_at(&mut world, 10.0, 0.5);

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(a, b), (b, c)], &info)
        .unwrap();

    let mut manager = SimulationIslandManager::new();
    let mut callback = CountingCallback {
        islands: Vec::new(),
    };
    manager.build_and_process_islands(&mut world, &mut callback);

    assert_eq!(callback.islands.len(), 2);

    let chain = callback
        .islands
        .iter()
        .find(|(_, bodies, _)| *bodies == 3)
        .expect("missing the three-body island");
    assert_eq!(chain.2, 2);

    let singleton = callback
        .islands
        .iter()
        .find(|(_, bodies, _)| *bodies == 1)
        .expect("missing the lonely island");
    assert_eq!(singleton.2, 0);
}

#[test]
fn quiescent_island_falls_asleep_together() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = sphere_at(&mut world, 0.0, 0.5);
    let b = sphere_at(&mut world, 0.8, 0.5);

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(a, b)], &info)
        .unwrap();

    let mut manager = SimulationIslandManager::new();

    // Two seconds of quiescence pushes both bodies past the sleep timer.
    for _ in 0..130 {
        manager.update_deactivation(&mut world, 1.0 / 60.0, DEACTIVATION_TIME_THRESHOLD, &|_| true);
    }
    assert_eq!(
        world.object(a).activation_state(),
        ActivationState::WantsDeactivation
    );

    build(&mut world, &mut manager);
    assert_eq!(
        world.object(a).activation_state(),
        ActivationState::IslandSleeping
    );
    assert_eq!(
        world.object(b).activation_state(),
        ActivationState::IslandSleeping
    );

    // One body starts moving again: the whole island wakes.
    world.object_mut(a).activate(false);
    build(&mut world, &mut manager);
    assert!(world.object(b).is_active());
}
