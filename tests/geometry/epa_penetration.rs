use approx::assert_relative_eq;
use na::{Isometry3, Point3};
use riposte3d::query::epa::Epa;
use riposte3d::query::gjk::{GjkPairDetector, VoronoiSimplex};
use riposte3d::query::{ClosestPointsInput, PointCollector};
use riposte3d::shape::{ConvexPolyhedron, Sphere};

fn cuboid(hx: f32, hy: f32, hz: f32) -> ConvexPolyhedron {
    let mut points = Vec::new();
    for &x in &[-hx, hx] {
        for &y in &[-hy, hy] {
            for &z in &[-hz, hz] {
                points.push(Point3::new(x, y, z));
            }
        }
    }
    ConvexPolyhedron::from_points(points)
        .unwrap()
        .with_margin(0.0)
}

#[test]
fn overlapping_spheres_report_penetration_depth() {
    // Sphere volumes are carried by their margins, so this shallow overlap
    // resolves through the margin arithmetic alone.
    let sphere = Sphere::new(1.0);
    let input = ClosestPointsInput::new(
        Isometry3::identity(),
        Isometry3::translation(1.5, 0.0, 0.0),
    );

    let mut simplex = VoronoiSimplex::new();
    let mut epa = Epa::new();
    let mut detector = GjkPairDetector::new(&mut simplex, Some(&mut epa));
    let mut collector = PointCollector::new();
    detector.closest_points(&sphere, &sphere, &input, &mut collector);

    assert!(collector.has_result);
    assert_relative_eq!(collector.distance, -0.5, epsilon = 1.0e-4);
    assert_relative_eq!(collector.normal_on_b.x, -1.0, epsilon = 1.0e-4);
}

#[test]
fn cuboid_cuboid_penetration_through_epa() {
    // Margin-less cores overlapping by 0.5 along x: only the penetration
    // solver can produce this result.
    let c = cuboid(2.0, 1.0, 1.0);
    let input = ClosestPointsInput::new(
        Isometry3::translation(3.5, 0.0, 0.0),
        Isometry3::identity(),
    );

    let mut simplex = VoronoiSimplex::new();
    let mut epa = Epa::new();
    let mut detector = GjkPairDetector::new(&mut simplex, Some(&mut epa));
    let mut collector = PointCollector::new();
    detector.closest_points(&c, &c, &input, &mut collector);

    assert!(collector.has_result);
    assert_relative_eq!(collector.distance, -0.5, epsilon = 1.0e-3);
    // The first cuboid sits on the +x side: the normal on B points toward it.
    assert_relative_eq!(collector.normal_on_b.x, 1.0, epsilon = 1.0e-3);
}

#[test]
fn penetration_depth_shrinks_with_separation() {
    let c = cuboid(1.0, 1.0, 1.0);

    let mut depths = Vec::new();
    for offset in [1.2, 1.5, 1.8] {
        let input = ClosestPointsInput::new(
            Isometry3::translation(offset, 0.0, 0.0),
            Isometry3::identity(),
        );

        let mut simplex = VoronoiSimplex::new();
        let mut epa = Epa::new();
        let mut detector = GjkPairDetector::new(&mut simplex, Some(&mut epa));
        let mut collector = PointCollector::new();
        detector.closest_points(&c, &c, &input, &mut collector);

        assert!(collector.has_result);
        assert!(collector.distance < 0.0);
        depths.push(collector.distance);
    }

    assert!(depths[0] < depths[1] && depths[1] < depths[2]);
}
