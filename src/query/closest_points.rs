use crate::math::{Isometry, Point, Real, Vector};
use na::Unit;
use num::Bounded;

/// Input of a closest-points query between two positioned convex shapes.
#[derive(Clone, Debug)]
pub struct ClosestPointsInput {
    /// The world position of the first shape.
    pub transform_a: Isometry<Real>,
    /// The world position of the second shape.
    pub transform_b: Isometry<Real>,
    /// Queries may bail out once the shapes are proven farther apart than
    /// the square root of this bound.
    pub maximum_distance_squared: Real,
}

impl ClosestPointsInput {
    /// Creates a query input with an unbounded distance.
    pub fn new(transform_a: Isometry<Real>, transform_b: Isometry<Real>) -> Self {
        ClosestPointsInput {
            transform_a,
            transform_b,
            maximum_distance_squared: Real::max_value(),
        }
    }
}

/// Sink receiving the results of a closest-points query.
///
/// Contact data is reported in world space. The normal always points from the
/// second shape toward the first; the depth is a signed distance along that
/// normal, negative when the shapes overlap.
pub trait ClosestPointsSink {
    /// Identifies the sub-shape (part id and triangle index) the next contact
    /// belongs to, on the first shape. `-1` means not applicable.
    fn set_shape_identifiers_a(&mut self, _part_id: i32, _index: i32) {}

    /// Identifies the sub-shape the next contact belongs to, on the second
    /// shape.
    fn set_shape_identifiers_b(&mut self, _part_id: i32, _index: i32) {}

    /// Reports a contact.
    fn add_contact_point(
        &mut self,
        normal_on_b: Unit<Vector<Real>>,
        point_on_b: Point<Real>,
        depth: Real,
    );
}

/// A sink keeping only the deepest reported contact.
pub struct PointCollector {
    /// The world-space normal of the deepest contact, pointing from the
    /// second shape toward the first.
    pub normal_on_b: Unit<Vector<Real>>,
    /// The world-space contact point on the second shape.
    pub point_in_world: Point<Real>,
    /// The signed distance of the deepest contact; negative means penetration.
    pub distance: Real,
    /// Whether any contact was reported.
    pub has_result: bool,
}

impl PointCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        PointCollector {
            normal_on_b: Vector::y_axis(),
            point_in_world: Point::origin(),
            distance: Real::max_value(),
            has_result: false,
        }
    }
}

impl Default for PointCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ClosestPointsSink for PointCollector {
    fn add_contact_point(
        &mut self,
        normal_on_b: Unit<Vector<Real>>,
        point_on_b: Point<Real>,
        depth: Real,
    ) {
        if depth < self.distance {
            self.has_result = true;
            self.normal_on_b = normal_on_b;
            self.point_in_world = point_on_b;
            self.distance = depth;
        }
    }
}
