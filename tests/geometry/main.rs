extern crate nalgebra as na;

mod compound_contact;
mod convex_cast;
mod epa_penetration;
mod islands;
mod manifold_points;
mod mass_properties;
mod raycast;
mod scaling;
mod sphere_sphere_contact;
mod sphere_triangle_contact;
