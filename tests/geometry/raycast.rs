use approx::assert_relative_eq;
use na::{Point3, Unit, Vector3};
use riposte3d::math::Real;
use riposte3d::query::ray::{RayFlags, TriangleHitSink, TriangleRaycaster};
use riposte3d::shape::Triangle;

#[derive(Default)]
struct RecordingSink {
    hits: Vec<(Real, Vector3<Real>, i32)>,
}

impl TriangleHitSink for RecordingSink {
    fn report_hit(
        &mut self,
        normal: Unit<Vector3<Real>>,
        fraction: Real,
        _part_id: i32,
        triangle_index: i32,
    ) -> Real {
        self.hits.push((fraction, *normal, triangle_index));
        fraction
    }
}

fn xy_triangle() -> Triangle {
    Triangle::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    )
}

#[test]
fn front_face_hit() {
    let mut caster = TriangleRaycaster::new(
        Point3::new(0.2, 0.2, 1.0),
        Point3::new(0.2, 0.2, -1.0),
        RayFlags::empty(),
    );
    let mut sink = RecordingSink::default();
    caster.process_triangle(&xy_triangle(), 0, 7, &mut sink);

    assert_eq!(sink.hits.len(), 1);
    let (fraction, normal, index) = sink.hits[0];
    assert_relative_eq!(fraction, 0.5, epsilon = 1.0e-6);
    assert_relative_eq!(normal, Vector3::z(), epsilon = 1.0e-6);
    assert_eq!(index, 7);
    assert_relative_eq!(caster.hit_fraction, 0.5, epsilon = 1.0e-6);
}

#[test]
fn back_face_hit_flips_the_normal() {
    let mut caster = TriangleRaycaster::new(
        Point3::new(0.2, 0.2, -1.0),
        Point3::new(0.2, 0.2, 1.0),
        RayFlags::empty(),
    );
    let mut sink = RecordingSink::default();
    caster.process_triangle(&xy_triangle(), 0, 0, &mut sink);

    assert_eq!(sink.hits.len(), 1);
    let (_, normal, _) = sink.hits[0];
    // The reported normal opposes the ray.
    assert_relative_eq!(normal, -Vector3::z(), epsilon = 1.0e-6);
}

#[test]
fn back_face_hit_keeps_the_geometric_normal_on_request() {
    let mut caster = TriangleRaycaster::new(
        Point3::new(0.2, 0.2, -1.0),
        Point3::new(0.2, 0.2, 1.0),
        RayFlags::KEEP_UNFLIPPED_NORMAL,
    );
    let mut sink = RecordingSink::default();
    caster.process_triangle(&xy_triangle(), 0, 0, &mut sink);

    assert_eq!(sink.hits.len(), 1);
    assert_relative_eq!(sink.hits[0].1, Vector3::z(), epsilon = 1.0e-6);
}

#[test]
fn backface_filter_rejects_the_hit() {
    let mut caster = TriangleRaycaster::new(
        Point3::new(0.2, 0.2, -1.0),
        Point3::new(0.2, 0.2, 1.0),
        RayFlags::FILTER_BACKFACES,
    );
    let mut sink = RecordingSink::default();
    caster.process_triangle(&xy_triangle(), 0, 0, &mut sink);

    assert!(sink.hits.is_empty());
    assert_relative_eq!(caster.hit_fraction, 1.0);
}

#[test]
fn miss_outside_the_triangle() {
    let mut caster = TriangleRaycaster::new(
        Point3::new(2.0, 2.0, 1.0),
        Point3::new(2.0, 2.0, -1.0),
        RayFlags::empty(),
    );
    let mut sink = RecordingSink::default();
    caster.process_triangle(&xy_triangle(), 0, 0, &mut sink);

    assert!(sink.hits.is_empty());
}

#[test]
fn closer_triangles_clip_farther_ones() {
    let far = xy_triangle();
    let near = Triangle::new(
        Point3::new(0.0, 0.0, 0.5),
        Point3::new(1.0, 0.0, 0.5),
        Point3::new(0.0, 1.0, 0.5),
    );

    let mut caster = TriangleRaycaster::new(
        Point3::new(0.2, 0.2, 1.0),
        Point3::new(0.2, 0.2, -1.0),
        RayFlags::empty(),
    );
    let mut sink = RecordingSink::default();
    caster.process_triangle(&near, 0, 0, &mut sink);
    // The far triangle lies beyond the clipped fraction and is skipped.
    caster.process_triangle(&far, 0, 1, &mut sink);

    assert_eq!(sink.hits.len(), 1);
    assert_eq!(sink.hits[0].2, 0);
    assert_relative_eq!(caster.hit_fraction, 0.25, epsilon = 1.0e-6);
}
