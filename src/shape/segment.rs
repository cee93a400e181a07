use crate::math::{Point, Real};

/// A segment shape.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Segment {
    /// The segment first point.
    pub a: Point<Real>,
    /// The segment second point.
    pub b: Point<Real>,
}

/// Description of the location of a point on a segment.
#[derive(Copy, Clone, Debug)]
pub enum SegmentPointLocation {
    /// The point lies on the vertex with the given index.
    OnVertex(u32),
    /// The point lies on the segment interior, with the given barycentric coordinates.
    OnEdge([Real; 2]),
}

impl Segment {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// Projects a point on this segment and reports where the projection landed.
    pub fn project_local_point_with_location(
        &self,
        pt: &Point<Real>,
    ) -> (Point<Real>, SegmentPointLocation) {
        let ab = self.b - self.a;
        let ap = pt - self.a;
        let ab_ap = ab.dot(&ap);
        let sqnab = ab.norm_squared();

        if ab_ap <= 0.0 || sqnab <= crate::math::DEFAULT_EPSILON {
            // Voronoï region of vertex 'a', or a zero-length segment.
            (self.a, SegmentPointLocation::OnVertex(0))
        } else if ab_ap >= sqnab {
            // Voronoï region of vertex 'b'.
            (self.b, SegmentPointLocation::OnVertex(1))
        } else {
            let u = ab_ap / sqnab;
            (self.a + ab * u, SegmentPointLocation::OnEdge([1.0 - u, u]))
        }
    }
}
