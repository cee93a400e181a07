use approx::assert_relative_eq;
use na::{Isometry3, Point3};
use riposte3d::shape::{Compound, MultiSphere, Shape, SharedShape, Sphere};

#[test]
fn sphere_inertia_is_analytic() {
    let props = Sphere::new(2.0).mass_properties(5.0);
    let expected = 0.4 * 5.0 * 4.0;

    assert_relative_eq!(props.mass, 5.0);
    assert_relative_eq!(props.local_com, Point3::origin());
    for value in props.principal_inertia().iter() {
        assert_relative_eq!(*value, expected, epsilon = 1.0e-4);
    }
}

#[test]
fn symmetric_compound_balances_its_center_of_mass() {
    let sphere = SharedShape::sphere(0.5);
    let compound = Compound::new(vec![
        (Isometry3::translation(-1.0, 0.0, 0.0), sphere.clone()),
        (Isometry3::translation(1.0, 0.0, 0.0), sphere),
    ]);

    let props = compound.mass_properties(4.0);
    assert_relative_eq!(props.mass, 4.0);
    assert_relative_eq!(props.local_com, Point3::origin(), epsilon = 1.0e-6);

    // Two equal spheres on the x axis: the transverse inertia picks up the
    // parallel-axis term, the axial one does not.
    let sphere_term = 0.4 * 2.0 * 0.25;
    let transverse = 2.0 * (sphere_term + 2.0 * 1.0);
    let axial = 2.0 * sphere_term;
    assert_relative_eq!(props.inertia_tensor[(0, 0)], axial, epsilon = 1.0e-4);
    assert_relative_eq!(props.inertia_tensor[(1, 1)], transverse, epsilon = 1.0e-4);
    assert_relative_eq!(props.inertia_tensor[(2, 2)], transverse, epsilon = 1.0e-4);
}

#[test]
fn multi_sphere_matches_the_equivalent_compound() {
    let centers = vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
    let radii = vec![0.5, 0.5];
    let multi = MultiSphere::new(centers, radii);

    let props = multi.mass_properties(4.0);

    let sphere = SharedShape::sphere(0.5);
    let compound = Compound::new(vec![
        (Isometry3::translation(-1.0, 0.0, 0.0), sphere.clone()),
        (Isometry3::translation(1.0, 0.0, 0.0), sphere),
    ]);
    let expected = compound.mass_properties(4.0);

    assert_relative_eq!(props.local_com, expected.local_com, epsilon = 1.0e-5);
    assert_relative_eq!(
        props.inertia_tensor,
        expected.inertia_tensor,
        epsilon = 1.0e-4
    );
}
