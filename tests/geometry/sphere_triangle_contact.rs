use approx::assert_relative_eq;
use na::{Isometry3, Point3};
use riposte3d::narrow_phase::DispatchInfo;
use riposte3d::shape::SharedShape;
use riposte3d::world::{CollisionObject, CollisionWorld};

fn ground_triangle() -> SharedShape {
    SharedShape::triangle(
        Point3::new(-2.0, 0.0, -2.0),
        Point3::new(2.0, 0.0, -2.0),
        Point3::new(0.0, 0.0, 2.0),
    )
}

#[test]
fn sphere_resting_on_a_triangle() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let sphere = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    let triangle = world.add_collision_object(CollisionObject::new(ground_triangle()));
    world
        .object_mut(sphere)
        .set_world_transform(Isometry3::translation(0.0, 0.4, 0.0));

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(sphere, triangle)], &info)
        .unwrap();

    let handle = world.dispatcher().pair_manifold(sphere, triangle).unwrap();
    let manifold = world.dispatcher().manifold(handle).unwrap();
    assert_eq!(manifold.num_contacts(), 1);

    let point = manifold.point(0);
    assert_relative_eq!(point.distance, -0.1, epsilon = 1.0e-5);
    // The triangle is the second body: its normal points up toward the sphere.
    assert_relative_eq!(point.normal_world_on_b.y, 1.0, epsilon = 1.0e-5);
    assert_relative_eq!(point.position_world_on_b.y, 0.0, epsilon = 1.0e-5);
}

#[test]
fn swapped_pair_order_flips_the_reported_normal() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let triangle = world.add_collision_object(CollisionObject::new(ground_triangle()));
    let sphere = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    world
        .object_mut(sphere)
        .set_world_transform(Isometry3::translation(0.0, 0.4, 0.0));

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(triangle, sphere)], &info)
        .unwrap();

    let handle = world.dispatcher().pair_manifold(triangle, sphere).unwrap();
    let manifold = world.dispatcher().manifold(handle).unwrap();
    assert_eq!(manifold.num_contacts(), 1);

    let point = manifold.point(0);
    assert_relative_eq!(point.distance, -0.1, epsilon = 1.0e-5);
    // Now the sphere is the second body: the normal points down toward the
    // triangle, and the witness sits on the sphere surface.
    assert_relative_eq!(point.normal_world_on_b.y, -1.0, epsilon = 1.0e-5);
    assert_relative_eq!(point.position_world_on_b.y, -0.1, epsilon = 1.0e-5);
}

#[test]
fn separated_sphere_produces_no_contact() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let sphere = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    let triangle = world.add_collision_object(CollisionObject::new(ground_triangle()));
    world
        .object_mut(sphere)
        .set_world_transform(Isometry3::translation(0.0, 2.0, 0.0));

    let info = DispatchInfo::default();
    world
        .perform_discrete_collision_detection(&[(sphere, triangle)], &info)
        .unwrap();

    let handle = world.dispatcher().pair_manifold(sphere, triangle).unwrap();
    assert_eq!(world.dispatcher().manifold(handle).unwrap().num_contacts(), 0);
}
