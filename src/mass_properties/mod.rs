//! Mass properties (mass, center-of-mass, inertia tensor) of shapes.

pub use self::mass_properties::MassProperties;

mod mass_properties;
mod mass_properties_compound;
mod mass_properties_cone;
mod mass_properties_convex_polyhedron;
mod mass_properties_multi_sphere;
mod mass_properties_sphere;
mod mass_properties_triangle;
