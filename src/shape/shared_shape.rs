use crate::math::{Isometry, Point, Real};
use crate::shape::{
    Compound, Cone, Convex2d, ConvexPolyhedron, MultiSphere, Shape, Sphere, Triangle,
    UniformScaled,
};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A reference-counted, shareable shape.
///
/// Shapes are created once by scene loading, then referenced by any number of
/// collision objects. They are immutable once shared: adjust scaling or
/// margins before wrapping a shape in a `SharedShape`. A shape always outlives
/// the collision objects referencing it.
#[derive(Clone)]
pub struct SharedShape(pub Arc<dyn Shape>);

impl Deref for SharedShape {
    type Target = dyn Shape;
    fn deref(&self) -> &dyn Shape {
        &*self.0
    }
}

impl AsRef<dyn Shape> for SharedShape {
    fn as_ref(&self) -> &dyn Shape {
        &*self.0
    }
}

impl fmt::Debug for SharedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedShape({:?})", self.shape_type())
    }
}

impl SharedShape {
    /// Wraps the given shape as a shared shape.
    pub fn new(shape: impl Shape) -> SharedShape {
        SharedShape(Arc::new(shape))
    }

    /// Initializes a shared sphere shape.
    pub fn sphere(radius: Real) -> SharedShape {
        SharedShape::new(Sphere::new(radius))
    }

    /// Initializes a shared cone shape.
    pub fn cone(half_height: Real, radius: Real) -> SharedShape {
        SharedShape::new(Cone::new(half_height, radius))
    }

    /// Initializes a shared triangle shape.
    pub fn triangle(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> SharedShape {
        SharedShape::new(Triangle::new(a, b, c))
    }

    /// Initializes a shared convex polyhedron from its vertex cloud.
    ///
    /// Returns `None` if `points` is empty.
    pub fn convex_polyhedron(points: Vec<Point<Real>>) -> Option<SharedShape> {
        ConvexPolyhedron::from_points(points).map(SharedShape::new)
    }

    /// Initializes a shared multi-sphere shape.
    pub fn multi_sphere(centers: Vec<Point<Real>>, radii: Vec<Real>) -> SharedShape {
        SharedShape::new(MultiSphere::new(centers, radii))
    }

    /// Initializes a shared planar convex shape wrapping `child`.
    pub fn convex_2d(child: SharedShape) -> SharedShape {
        SharedShape::new(Convex2d::new(child))
    }

    /// Initializes a shared uniformly-scaled shape wrapping `child`.
    pub fn uniform_scaled(child: SharedShape, factor: Real) -> SharedShape {
        SharedShape::new(UniformScaled::new(child, factor))
    }

    /// Initializes a shared compound shape.
    pub fn compound(children: Vec<(Isometry<Real>, SharedShape)>) -> SharedShape {
        SharedShape::new(Compound::new(children))
    }
}
