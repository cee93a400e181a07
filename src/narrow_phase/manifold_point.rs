use crate::math::{Point, Real, Vector};
use na::Unit;

/// A single persistent contact point between two collision objects.
///
/// The local points are the authoritative data: world positions and distance
/// are re-derived from them on every refresh. The accumulated impulses are
/// the warm-start cache written back by the constraint solver; they survive
/// point replacement so the solver keeps its convergence state across frames.
#[derive(Copy, Clone, Debug)]
pub struct ManifoldPoint {
    /// The contact point in the first body's local frame.
    pub local_point_a: Point<Real>,
    /// The contact point in the second body's local frame.
    pub local_point_b: Point<Real>,
    /// The contact point on the first body, in world space.
    pub position_world_on_a: Point<Real>,
    /// The contact point on the second body, in world space.
    pub position_world_on_b: Point<Real>,
    /// The contact normal in world space, pointing from the second body
    /// toward the first.
    pub normal_world_on_b: Unit<Vector<Real>>,
    /// The signed contact distance; negative means penetration.
    pub distance: Real,
    /// The combined friction coefficient of the two bodies.
    pub combined_friction: Real,
    /// The combined restitution coefficient of the two bodies.
    pub combined_restitution: Real,
    /// The sub-shape part id on the first body, `-1` if not applicable.
    pub part_id_a: i32,
    /// The sub-shape part id on the second body, `-1` if not applicable.
    pub part_id_b: i32,
    /// The triangle/child index on the first body, `-1` if not applicable.
    pub index_a: i32,
    /// The triangle/child index on the second body, `-1` if not applicable.
    pub index_b: i32,
    /// Accumulated normal impulse (warm-start cache).
    pub applied_impulse: Real,
    /// Accumulated impulse along the first lateral friction direction.
    pub applied_impulse_lateral_1: Real,
    /// Accumulated impulse along the second lateral friction direction.
    pub applied_impulse_lateral_2: Real,
    /// The first lateral friction direction, filled by the solver.
    pub lateral_friction_dir_1: Vector<Real>,
    /// The second lateral friction direction, filled by the solver.
    pub lateral_friction_dir_2: Vector<Real>,
    /// Whether the lateral friction directions have been initialized.
    pub lateral_friction_initialized: bool,
    /// The number of frames this contact point has persisted.
    pub lifetime: u32,
}

impl ManifoldPoint {
    /// Creates a contact point from its local positions, world normal, and
    /// signed distance.
    pub fn new(
        local_point_a: Point<Real>,
        local_point_b: Point<Real>,
        normal_world_on_b: Unit<Vector<Real>>,
        distance: Real,
    ) -> Self {
        ManifoldPoint {
            local_point_a,
            local_point_b,
            position_world_on_a: local_point_a,
            position_world_on_b: local_point_b,
            normal_world_on_b,
            distance,
            combined_friction: 0.0,
            combined_restitution: 0.0,
            part_id_a: -1,
            part_id_b: -1,
            index_a: -1,
            index_b: -1,
            applied_impulse: 0.0,
            applied_impulse_lateral_1: 0.0,
            applied_impulse_lateral_2: 0.0,
            lateral_friction_dir_1: Vector::zeros(),
            lateral_friction_dir_2: Vector::zeros(),
            lateral_friction_initialized: false,
            lifetime: 0,
        }
    }
}
