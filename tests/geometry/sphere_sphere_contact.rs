use approx::assert_relative_eq;
use na::Isometry3;
use riposte3d::narrow_phase::DispatchInfo;
use riposte3d::shape::SharedShape;
use riposte3d::world::{CollisionObject, CollisionWorld};

#[test]
fn two_unit_spheres_end_to_end() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    let b = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    world
        .object_mut(b)
        .set_world_transform(Isometry3::translation(0.0, 0.0, 1.2));

    let info = DispatchInfo::default();
    let pairs = [(a, b)];

    // Separated by 0.2: no contact point.
    world
        .perform_discrete_collision_detection(&pairs, &info)
        .unwrap();
    let manifold_handle = world.dispatcher().pair_manifold(a, b).unwrap();
    let manifold = world.dispatcher().manifold(manifold_handle).unwrap();
    assert_eq!(manifold.num_contacts(), 0);

    // Overlapping by 0.2: exactly one contact point.
    world
        .object_mut(b)
        .set_world_transform(Isometry3::translation(0.0, 0.0, 0.8));
    world
        .perform_discrete_collision_detection(&pairs, &info)
        .unwrap();
    let manifold = world.dispatcher().manifold(manifold_handle).unwrap();
    assert_eq!(manifold.num_contacts(), 1);

    let point = manifold.point(0);
    assert_relative_eq!(point.distance, -0.2, epsilon = 1.0e-5);
    // B sits above A along +z, so the normal on B points down toward A.
    assert_relative_eq!(point.normal_world_on_b.z, -1.0, epsilon = 1.0e-5);
    assert_relative_eq!(point.position_world_on_b.z, 0.3, epsilon = 1.0e-5);
    assert_relative_eq!(point.position_world_on_a.z, 0.5, epsilon = 1.0e-5);

    // Separating again breaks the persisted point.
    world
        .object_mut(b)
        .set_world_transform(Isometry3::translation(0.0, 0.0, 5.0));
    world
        .perform_discrete_collision_detection(&pairs, &info)
        .unwrap();
    let manifold = world.dispatcher().manifold(manifold_handle).unwrap();
    assert_eq!(manifold.num_contacts(), 0);
}

#[test]
fn touching_spheres_keep_a_single_persistent_point() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    let b = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    world
        .object_mut(b)
        .set_world_transform(Isometry3::translation(0.0, 0.0, 0.9));

    let info = DispatchInfo::default();
    let pairs = [(a, b)];

    for _ in 0..10 {
        world
            .perform_discrete_collision_detection(&pairs, &info)
            .unwrap();
    }

    let manifold_handle = world.dispatcher().pair_manifold(a, b).unwrap();
    let manifold = world.dispatcher().manifold(manifold_handle).unwrap();

    // The same spot is re-reported every step and must merge into the cached
    // point rather than accumulate.
    assert_eq!(manifold.num_contacts(), 1);
    assert!(manifold.point(0).lifetime >= 9);
}

#[test]
fn vanished_pair_releases_its_manifold() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    let b = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    world
        .object_mut(b)
        .set_world_transform(Isometry3::translation(0.0, 0.0, 0.8));

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(a, b)], &info)
        .unwrap();
    assert_eq!(world.dispatcher().num_manifolds(), 1);

    // The broad phase stops reporting the pair: its manifold dies with it.
    world
        .perform_discrete_collision_detection(&[], &info)
        .unwrap();
    assert_eq!(world.dispatcher().num_manifolds(), 0);
    assert!(world.dispatcher().pair_manifold(a, b).is_none());
}
