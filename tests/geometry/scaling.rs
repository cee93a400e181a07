use approx::assert_relative_eq;
use na::{Point3, Vector3};
use riposte3d::shape::{
    ConvexPolyhedron, ConvexShape, Shape, SharedShape, Sphere, SupportMap, UniformScaled,
};

fn tetra_points() -> Vec<Point3<f32>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
        Point3::new(0.0, 0.0, 3.0),
    ]
}

fn probe_dirs() -> Vec<Vector3<f32>> {
    vec![
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(-1.0, 0.5, 0.0),
        Vector3::new(0.3, -0.7, 0.2),
        Vector3::new(-0.2, -0.2, -0.9),
        Vector3::new(0.5, 0.5, 0.5),
    ]
}

#[test]
fn polyhedron_scaling_round_trip_restores_supports() {
    let mut poly = ConvexPolyhedron::from_points(tetra_points())
        .unwrap()
        .with_margin(0.0);

    let originals: Vec<_> = probe_dirs()
        .iter()
        .map(|dir| poly.local_support_point(dir))
        .collect();

    poly.set_local_scaling(Vector3::new(2.0, 3.0, 0.5));
    poly.set_local_scaling(Vector3::new(1.0, 1.0, 1.0));

    for (dir, original) in probe_dirs().iter().zip(originals.iter()) {
        assert_relative_eq!(poly.local_support_point(dir), *original, epsilon = 1.0e-6);
    }
}

#[test]
fn polyhedron_scaling_rescales_the_cached_aabb() {
    let mut poly = ConvexPolyhedron::from_points(tetra_points())
        .unwrap()
        .with_margin(0.0);
    let unscaled = *poly.local_aabb();

    poly.set_local_scaling(Vector3::new(2.0, 2.0, 2.0));
    let scaled = *poly.local_aabb();

    assert_relative_eq!(scaled.mins, unscaled.mins * 2.0, epsilon = 1.0e-6);
    assert_relative_eq!(scaled.maxs, unscaled.maxs * 2.0, epsilon = 1.0e-6);
}

#[test]
fn uniform_scaling_round_trip_restores_supports() {
    let base = SharedShape::convex_polyhedron(tetra_points()).unwrap();
    let doubled = SharedShape::new(UniformScaled::new(base.clone(), 2.0));
    let round_trip = UniformScaled::new(doubled, 0.5);

    let reference = base.as_convex().unwrap();
    for dir in probe_dirs() {
        assert_relative_eq!(
            round_trip.local_support_point(&dir),
            reference.local_support_point(&dir),
            epsilon = 1.0e-6
        );
        assert_relative_eq!(
            round_trip.margin(),
            reference.margin(),
            epsilon = 1.0e-6
        );
    }
}

#[test]
fn uniform_scaling_scales_supports_and_margin() {
    let base = SharedShape::sphere(0.5);
    let scaled = UniformScaled::new(base, 3.0);

    // A sphere's volume is all margin; scaling must scale it.
    assert_relative_eq!(scaled.margin(), 1.5, epsilon = 1.0e-6);

    let poly = SharedShape::convex_polyhedron(tetra_points()).unwrap();
    let scaled_poly = UniformScaled::new(poly.clone(), 2.0);
    let reference = poly.as_convex().unwrap();
    for dir in probe_dirs() {
        assert_relative_eq!(
            scaled_poly.local_support_point(&dir),
            reference.local_support_point(&dir) * 2.0,
            epsilon = 1.0e-6
        );
    }
}

#[test]
fn scaled_sphere_stays_a_sphere() {
    let sphere = Sphere::new(0.5);
    assert_relative_eq!(sphere.scaled(2.0).radius, 1.0);
    assert_relative_eq!(sphere.scaled(2.0).scaled(0.5).radius, sphere.radius);
}
