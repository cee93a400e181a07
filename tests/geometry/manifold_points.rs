use approx::assert_relative_eq;
use na::{Isometry3, Point3, Vector3};
use riposte3d::narrow_phase::{ManifoldPoint, PersistentManifold};
use riposte3d::world::ObjectHandle;

fn contact_at(x: f32, y: f32) -> ManifoldPoint {
    ManifoldPoint::new(
        Point3::new(x, y, 0.0),
        Point3::new(x, y, -0.01),
        Vector3::z_axis(),
        -0.01,
    )
}

fn manifold() -> PersistentManifold {
    PersistentManifold::new(ObjectHandle(0), ObjectHandle(1), 0.02, f32::MAX)
}

fn stored_locals(manifold: &PersistentManifold) -> Vec<Point3<f32>> {
    manifold.points().map(|pt| pt.local_point_a).collect()
}

#[test]
fn fifth_point_evicts_the_area_minimizing_point() {
    let mut manifold = manifold();

    // Three corners of a 2x2 square plus an interior point.
    assert_eq!(manifold.add_manifold_point(contact_at(0.0, 0.0)), Some(0));
    assert_eq!(manifold.add_manifold_point(contact_at(2.0, 0.0)), Some(1));
    assert_eq!(manifold.add_manifold_point(contact_at(2.0, 2.0)), Some(2));
    assert_eq!(manifold.add_manifold_point(contact_at(1.0, 1.0)), Some(3));

    // The missing corner must push out the interior point, completing the
    // square: no other eviction leaves a larger contact polygon.
    let slot = manifold.add_manifold_point(contact_at(0.0, 2.0));
    assert_eq!(slot, Some(3));
    assert_eq!(manifold.num_contacts(), 4);

    let locals = stored_locals(&manifold);
    assert!(locals.contains(&Point3::new(0.0, 2.0, 0.0)));
    assert!(!locals.contains(&Point3::new(1.0, 1.0, 0.0)));
}

#[test]
fn redundant_fifth_point_is_rejected() {
    let mut manifold = manifold();

    // The four corners of a square.
    let _ = manifold.add_manifold_point(contact_at(0.0, 0.0));
    let _ = manifold.add_manifold_point(contact_at(2.0, 0.0));
    let _ = manifold.add_manifold_point(contact_at(2.0, 2.0));
    let _ = manifold.add_manifold_point(contact_at(0.0, 2.0));

    // A center point cannot improve the contact area; keeping the corners
    // wins, and the new point is dropped instead of any stored one.
    assert_eq!(manifold.add_manifold_point(contact_at(1.0, 1.0)), None);

    let locals = stored_locals(&manifold);
    assert_eq!(locals.len(), 4);
    assert!(!locals.contains(&Point3::new(1.0, 1.0, 0.0)));
}

#[test]
fn eviction_preserves_slot_order_of_survivors() {
    let mut manifold = manifold();
    let _ = manifold.add_manifold_point(contact_at(0.0, 0.0));
    let _ = manifold.add_manifold_point(contact_at(2.0, 0.0));
    let _ = manifold.add_manifold_point(contact_at(1.0, 1.0));
    let _ = manifold.add_manifold_point(contact_at(2.0, 2.0));

    let before = stored_locals(&manifold);
    let slot = manifold.add_manifold_point(contact_at(0.0, 2.0)).unwrap();
    let after = stored_locals(&manifold);

    for (i, local) in before.iter().enumerate() {
        if i != slot {
            assert_eq!(after[i], *local);
        }
    }
}

#[test]
fn refresh_is_idempotent_under_unchanged_transforms() {
    let mut manifold = manifold();
    let _ = manifold.add_manifold_point(contact_at(0.0, 0.0));
    let _ = manifold.add_manifold_point(contact_at(1.0, 0.0));
    manifold.point_mut(0).applied_impulse = 1.5;
    manifold.point_mut(1).applied_impulse = 0.25;

    let identity = Isometry3::identity();
    manifold.refresh_contact_points(&identity, &identity);
    let after_first: Vec<_> = manifold
        .points()
        .map(|pt| (pt.local_point_a, pt.distance, pt.applied_impulse))
        .collect();

    manifold.refresh_contact_points(&identity, &identity);
    let after_second: Vec<_> = manifold
        .points()
        .map(|pt| (pt.local_point_a, pt.distance, pt.applied_impulse))
        .collect();

    assert_eq!(after_first, after_second);
    assert_eq!(manifold.num_contacts(), 2);
}

#[test]
fn refresh_discards_separated_and_drifted_points() {
    let mut manifold = manifold();
    let _ = manifold.add_manifold_point(contact_at(0.0, 0.0));

    // Move the second body away along the normal: the recomputed distance
    // exceeds the breaking threshold and the point must break.
    let away = Isometry3::translation(0.0, 0.0, -1.0);
    manifold.refresh_contact_points(&Isometry3::identity(), &away);
    assert_eq!(manifold.num_contacts(), 0);

    let _ = manifold.add_manifold_point(contact_at(0.0, 0.0));

    // Slide the second body tangentially: the contact spots drift apart
    // laterally while staying in plane, which must also break the point.
    let slide = Isometry3::translation(0.5, 0.0, 0.0);
    manifold.refresh_contact_points(&Isometry3::identity(), &slide);
    assert_eq!(manifold.num_contacts(), 0);
}

#[test]
fn replacement_preserves_the_warm_start_cache() {
    let mut manifold = manifold();
    let _ = manifold.add_manifold_point(contact_at(0.0, 0.0));
    manifold.point_mut(0).applied_impulse = 3.0;
    manifold.point_mut(0).applied_impulse_lateral_1 = 0.5;

    // The narrow phase re-reports the same spot with a fresh depth.
    let mut update = contact_at(0.0, 0.0);
    update.distance = -0.005;
    let slot = manifold.cache_entry(&update).unwrap();
    manifold.replace_contact_point(slot, update);

    let point = manifold.point(0);
    assert_relative_eq!(point.applied_impulse, 3.0);
    assert_relative_eq!(point.applied_impulse_lateral_1, 0.5);
    assert_relative_eq!(point.distance, -0.005);
}
