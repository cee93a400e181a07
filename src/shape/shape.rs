use crate::bounding_volume::Aabb;
use crate::mass_properties::MassProperties;
use crate::math::{Isometry, Real};
use crate::shape::{
    Compound, Cone, Convex2d, ConvexPolyhedron, ConvexShape, MultiSphere, Sphere, Triangle,
    UniformScaled,
};
use downcast_rs::{impl_downcast, DowncastSync};

/// Enum representing the type of a shape.
///
/// This is the key of the narrow-phase double-dispatch table: every supported
/// shape maps to exactly one variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeType {
    /// A sphere shape.
    Sphere = 0,
    /// A cone shape.
    Cone,
    /// A convex polyhedron.
    ConvexPolyhedron,
    /// A convex shape constrained to a plane.
    Convex2d,
    /// The convex hull of a collection of spheres.
    MultiSphere,
    /// A uniformly-scaled convex shape.
    UniformScaled,
    /// A triangle shape.
    Triangle,
    /// A compound shape.
    Compound,
}

/// The number of shape type variants.
pub const SHAPE_TYPE_COUNT: usize = 8;

/// Trait implemented by shapes usable by the collision pipeline.
pub trait Shape: DowncastSync {
    /// Computes the AABB of this shape in its local frame.
    fn compute_local_aabb(&self) -> Aabb;

    /// Computes the AABB of this shape with the given position.
    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        self.compute_local_aabb().transform_by(position)
    }

    /// Computes the mass properties of this shape given its total mass.
    fn mass_properties(&self, mass: Real) -> MassProperties;

    /// Gets the type tag of this shape.
    fn shape_type(&self) -> ShapeType;

    /// Is this shape known to be convex?
    fn is_convex(&self) -> bool {
        false
    }

    /// Converts this shape to its convex capability, if it has one.
    fn as_convex(&self) -> Option<&dyn ConvexShape> {
        None
    }

    /// Converts this shape to a compound, if it is one.
    fn as_compound(&self) -> Option<&Compound> {
        None
    }
}

impl_downcast!(sync Shape);

impl dyn Shape {
    /// Converts this abstract shape to the given concrete shape, if it is one.
    pub fn as_shape<T: Shape>(&self) -> Option<&T> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a sphere, if it is one.
    pub fn as_sphere(&self) -> Option<&Sphere> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a cone, if it is one.
    pub fn as_cone(&self) -> Option<&Cone> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a convex polyhedron, if it is one.
    pub fn as_convex_polyhedron(&self) -> Option<&ConvexPolyhedron> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a planar convex shape, if it is one.
    pub fn as_convex_2d(&self) -> Option<&Convex2d> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a multi-sphere, if it is one.
    pub fn as_multi_sphere(&self) -> Option<&MultiSphere> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a uniformly-scaled shape, if it is one.
    pub fn as_uniform_scaled(&self) -> Option<&UniformScaled> {
        self.downcast_ref()
    }

    /// Converts this abstract shape to a triangle, if it is one.
    pub fn as_triangle(&self) -> Option<&Triangle> {
        self.downcast_ref()
    }
}

impl Shape for Sphere {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_convex_shape(&Isometry::identity(), self)
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        Aabb::from_convex_shape(position, self)
    }

    fn mass_properties(&self, mass: Real) -> MassProperties {
        MassProperties::from_sphere(mass, self.radius)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Sphere
    }

    fn is_convex(&self) -> bool {
        true
    }

    fn as_convex(&self) -> Option<&dyn ConvexShape> {
        Some(self as &dyn ConvexShape)
    }
}

impl Shape for Cone {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_convex_shape(&Isometry::identity(), self)
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        Aabb::from_convex_shape(position, self)
    }

    fn mass_properties(&self, mass: Real) -> MassProperties {
        MassProperties::from_cone(mass, self.half_height, self.radius)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Cone
    }

    fn is_convex(&self) -> bool {
        true
    }

    fn as_convex(&self) -> Option<&dyn ConvexShape> {
        Some(self as &dyn ConvexShape)
    }
}

impl Shape for ConvexPolyhedron {
    fn compute_local_aabb(&self) -> Aabb {
        *self.local_aabb()
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        self.local_aabb().transform_by(position)
    }

    fn mass_properties(&self, mass: Real) -> MassProperties {
        MassProperties::from_convex_polyhedron(mass, self)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::ConvexPolyhedron
    }

    fn is_convex(&self) -> bool {
        true
    }

    fn as_convex(&self) -> Option<&dyn ConvexShape> {
        Some(self as &dyn ConvexShape)
    }
}

impl Shape for Convex2d {
    fn compute_local_aabb(&self) -> Aabb {
        self.child().compute_local_aabb()
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        self.child().compute_aabb(position)
    }

    fn mass_properties(&self, mass: Real) -> MassProperties {
        self.child().mass_properties(mass)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Convex2d
    }

    fn is_convex(&self) -> bool {
        true
    }

    fn as_convex(&self) -> Option<&dyn ConvexShape> {
        Some(self as &dyn ConvexShape)
    }
}

impl Shape for MultiSphere {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_convex_shape(&Isometry::identity(), self)
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        Aabb::from_convex_shape(position, self)
    }

    fn mass_properties(&self, mass: Real) -> MassProperties {
        MassProperties::from_multi_sphere(mass, self)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::MultiSphere
    }

    fn is_convex(&self) -> bool {
        true
    }

    fn as_convex(&self) -> Option<&dyn ConvexShape> {
        Some(self as &dyn ConvexShape)
    }
}

impl Shape for UniformScaled {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_convex_shape(&Isometry::identity(), self)
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        Aabb::from_convex_shape(position, self)
    }

    fn mass_properties(&self, mass: Real) -> MassProperties {
        self.child()
            .mass_properties(mass)
            .scaled_uniformly(self.factor())
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::UniformScaled
    }

    fn is_convex(&self) -> bool {
        true
    }

    fn as_convex(&self) -> Option<&dyn ConvexShape> {
        Some(self as &dyn ConvexShape)
    }
}

impl Shape for Triangle {
    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_convex_shape(&Isometry::identity(), self)
    }

    fn compute_aabb(&self, position: &Isometry<Real>) -> Aabb {
        Aabb::from_convex_shape(position, self)
    }

    fn mass_properties(&self, mass: Real) -> MassProperties {
        MassProperties::from_triangle(mass, self)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Triangle
    }

    fn is_convex(&self) -> bool {
        true
    }

    fn as_convex(&self) -> Option<&dyn ConvexShape> {
        Some(self as &dyn ConvexShape)
    }
}

impl Shape for Compound {
    fn compute_local_aabb(&self) -> Aabb {
        *self.local_aabb()
    }

    fn mass_properties(&self, mass: Real) -> MassProperties {
        MassProperties::from_compound(mass, self)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Compound
    }

    fn as_compound(&self) -> Option<&Compound> {
        Some(self)
    }
}
