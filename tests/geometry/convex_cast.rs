use approx::assert_relative_eq;
use na::{Isometry3, Point3, Unit, Vector3};
use riposte3d::math::Real;
use riposte3d::narrow_phase::DispatchInfo;
use riposte3d::query::cast::{
    ConvexcastHitSink, SubsimplexConvexCast, TriangleConvexcaster,
};
use riposte3d::query::gjk::VoronoiSimplex;
use riposte3d::shape::{SharedShape, Sphere, Triangle};
use riposte3d::world::{CollisionObject, CollisionWorld};

#[test]
fn sphere_cast_toward_a_static_sphere() {
    let moving = Sphere::new(0.5);
    let target = Sphere::new(0.5);

    let from_a = Isometry3::identity();
    let to_a = Isometry3::translation(8.0, 0.0, 0.0);
    let pos_b = Isometry3::translation(5.0, 0.0, 0.0);

    let mut simplex = VoronoiSimplex::new();
    let mut caster = SubsimplexConvexCast::new(&mut simplex);
    let result = caster
        .cast(&moving, &from_a, &to_a, &target, &pos_b, &pos_b)
        .expect("the sweep must hit");

    // Surfaces meet once the centers are 1.0 apart, i.e. at x = 4.
    assert_relative_eq!(result.fraction, 0.5, epsilon = 2.0e-2);
    assert!(result.normal.x < -0.9);
    assert_relative_eq!(result.hit_point.x, 4.5, epsilon = 5.0e-2);
}

#[test]
fn sphere_cast_moving_away_misses() {
    let moving = Sphere::new(0.5);
    let target = Sphere::new(0.5);

    let from_a = Isometry3::identity();
    let to_a = Isometry3::translation(-8.0, 0.0, 0.0);
    let pos_b = Isometry3::translation(5.0, 0.0, 0.0);

    let mut simplex = VoronoiSimplex::new();
    let mut caster = SubsimplexConvexCast::new(&mut simplex);
    assert!(caster
        .cast(&moving, &from_a, &to_a, &target, &pos_b, &pos_b)
        .is_none());
}

#[test]
fn sphere_cast_falling_short_misses() {
    let moving = Sphere::new(0.5);
    let target = Sphere::new(0.5);

    let from_a = Isometry3::identity();
    let to_a = Isometry3::translation(2.0, 0.0, 0.0);
    let pos_b = Isometry3::translation(5.0, 0.0, 0.0);

    let mut simplex = VoronoiSimplex::new();
    let mut caster = SubsimplexConvexCast::new(&mut simplex);
    assert!(caster
        .cast(&moving, &from_a, &to_a, &target, &pos_b, &pos_b)
        .is_none());
}

#[derive(Default)]
struct BestHit {
    hit: Option<(Real, Point3<Real>, Vector3<Real>)>,
}

impl ConvexcastHitSink for BestHit {
    fn report_hit(
        &mut self,
        normal: Unit<Vector3<Real>>,
        hit_point: Point3<Real>,
        fraction: Real,
        _part_id: i32,
        _triangle_index: i32,
    ) -> Real {
        self.hit = Some((fraction, hit_point, *normal));
        fraction
    }
}

#[test]
fn sphere_swept_onto_a_triangle() {
    let sphere = Sphere::new(0.5);
    let triangle = Triangle::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(2.0, 0.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
    );

    let mut caster = TriangleConvexcaster::new(
        &sphere,
        Isometry3::translation(0.5, 0.5, 2.0),
        Isometry3::translation(0.5, 0.5, 0.0),
        Isometry3::identity(),
        0.0,
    );

    let mut sink = BestHit::default();
    caster.process_triangle(&triangle, 0, 0, &mut sink);

    let (fraction, _, _) = sink.hit.expect("the sweep must hit the triangle");
    // The sphere surface reaches the plane once its center is at z = 0.5.
    assert_relative_eq!(fraction, 0.75, epsilon = 2.0e-2);
    assert!(caster.hit_fraction < 1.0);
}

fn cube_points() -> Vec<Point3<Real>> {
    let mut points = Vec::new();
    for &x in &[-0.5, 0.5] {
        for &y in &[-0.5, 0.5] {
            for &z in &[-0.5, 0.5] {
                points.push(Point3::new(x, y, z));
            }
        }
    }
    points
}

#[test]
fn time_of_impact_through_the_dispatcher() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let cube = SharedShape::convex_polyhedron(cube_points()).unwrap();
    let a = world.add_collision_object(CollisionObject::new(cube.clone()));
    let b = world.add_collision_object(CollisionObject::new(cube));
    world
        .object_mut(b)
        .set_world_transform(Isometry3::translation(5.0, 0.0, 0.0));
    world
        .object_mut(a)
        .set_interpolation_world_transform(Isometry3::translation(8.0, 0.0, 0.0));

    let info = DispatchInfo {
        use_continuous: true,
        ..Default::default()
    };
    world
        .perform_discrete_collision_detection(&[(a, b)], &info)
        .unwrap();

    // The cubes touch (margins included) once the centers are 1.08 apart,
    // i.e. after 3.92 of the 8-unit sweep.
    let fraction = world.calculate_time_of_impact(&info);
    assert_relative_eq!(fraction, 3.92 / 8.0, epsilon = 3.0e-2);
}

#[test]
fn primitive_pairs_defer_time_of_impact() {
    let mut world = CollisionWorld::with_default_dispatcher();
    let a = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    let b = world.add_collision_object(CollisionObject::new(SharedShape::sphere(0.5)));
    world
        .object_mut(b)
        .set_world_transform(Isometry3::translation(5.0, 0.0, 0.0));
    world
        .object_mut(a)
        .set_interpolation_world_transform(Isometry3::translation(8.0, 0.0, 0.0));

    let info = DispatchInfo {
        use_continuous: true,
        ..Default::default()
    };
    world
        .perform_discrete_collision_detection(&[(a, b)], &info)
        .unwrap();

    // The analytic sphere-sphere algorithm leaves continuous queries to the
    // generic fallback and reports "no impact within the interval".
    assert_relative_eq!(world.calculate_time_of_impact(&info), 1.0);
}
