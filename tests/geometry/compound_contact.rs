use approx::assert_relative_eq;
use na::Isometry3;
use riposte3d::narrow_phase::DispatchInfo;
use riposte3d::shape::SharedShape;
use riposte3d::world::{CollisionObject, CollisionWorld};

fn dumbbell() -> SharedShape {
    let ball = SharedShape::sphere(0.5);
    SharedShape::compound(vec![
        (Isometry3::identity(), ball.clone()),
        (Isometry3::translation(2.0, 0.0, 0.0), ball),
    ])
}

#[test]
fn compound_children_write_into_one_manifold() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let compound = world.add_collision_object(CollisionObject::new(dumbbell()));
    let ball = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.6)));
    world
        .object_mut(ball)
        .set_world_transform(Isometry3::translation(1.0, 0.0, 0.0));

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(compound, ball)], &info)
        .unwrap();

    // Both children overlap the ball by 0.1: two contacts, one shared
    // manifold, each point tagged with its child index.
    assert_eq!(world.dispatcher().num_manifolds(), 1);
    let handle = world.dispatcher().pair_manifold(compound, ball).unwrap();
    let manifold = world.dispatcher().manifold(handle).unwrap();
    assert_eq!(manifold.num_contacts(), 2);

    let mut child_indices: Vec<i32> = manifold.points().map(|pt| pt.index_a).collect();
    child_indices.sort_unstable();
    assert_eq!(child_indices, vec![0, 1]);

    for pt in manifold.points() {
        assert_relative_eq!(pt.distance, -0.1, epsilon = 1.0e-5);
    }
}

#[test]
fn compound_contacts_persist_instead_of_accumulating() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let compound = world.add_collision_object(CollisionObject::new(dumbbell()));
    let ball = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.6)));
    world
        .object_mut(ball)
        .set_world_transform(Isometry3::translation(1.0, 0.0, 0.0));

    let info = DispatchInfo::default();
    for _ in 0..5 {
        world
            .perform_discrete_collision_detection(&[(compound, ball)], &info)
            .unwrap();
    }

    let handle = world.dispatcher().pair_manifold(compound, ball).unwrap();
    let manifold = world.dispatcher().manifold(handle).unwrap();

    // Re-reported child contacts merge through their sub-shape identifiers.
    assert_eq!(manifold.num_contacts(), 2);
    assert!(manifold.points().all(|pt| pt.lifetime >= 4));
}

#[test]
fn distant_children_are_culled() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let compound = world.add_collision_object(CollisionObject::new(dumbbell()));
    let ball = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.6)));
    // Overlaps only the second child.
    world
        .object_mut(ball)
        .set_world_transform(Isometry3::translation(2.9, 0.0, 0.0));

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(compound, ball)], &info)
        .unwrap();

    let handle = world.dispatcher().pair_manifold(compound, ball).unwrap();
    let manifold = world.dispatcher().manifold(handle).unwrap();
    assert_eq!(manifold.num_contacts(), 1);
    assert_eq!(manifold.point(0).index_a, 1);
}
