use crate::math::{Isometry, Point, Real, Vector};
use crate::query::cast::SubsimplexConvexCast;
use crate::query::gjk::VoronoiSimplex;
use crate::shape::{ConvexShape, Triangle};
use na::Unit;

/// Receiver of swept-convex triangle hits.
pub trait ConvexcastHitSink {
    /// Reports a hit and returns the updated clipping fraction.
    fn report_hit(
        &mut self,
        normal: Unit<Vector<Real>>,
        hit_point: Point<Real>,
        fraction: Real,
        part_id: i32,
        triangle_index: i32,
    ) -> Real;
}

/// Sweeps a convex shape against individual triangles, keeping the earliest
/// hit.
///
/// Like the raycaster, mesh traversal stays external; the owner of the
/// triangle geometry drives `process_triangle`.
pub struct TriangleConvexcaster<'a> {
    /// The swept convex shape.
    pub convex_shape: &'a dyn ConvexShape,
    /// The shape transform at the start of the sweep.
    pub convex_from: Isometry<Real>,
    /// The shape transform at the end of the sweep.
    pub convex_to: Isometry<Real>,
    /// The transform from triangle space to world space.
    pub triangle_to_world: Isometry<Real>,
    /// The collision margin applied to the triangles.
    pub triangle_margin: Real,
    /// The current clipping fraction; hits beyond it are ignored.
    pub hit_fraction: Real,
}

impl<'a> TriangleConvexcaster<'a> {
    /// Creates a convex caster for the given sweep.
    pub fn new(
        convex_shape: &'a dyn ConvexShape,
        convex_from: Isometry<Real>,
        convex_to: Isometry<Real>,
        triangle_to_world: Isometry<Real>,
        triangle_margin: Real,
    ) -> Self {
        TriangleConvexcaster {
            convex_shape,
            convex_from,
            convex_to,
            triangle_to_world,
            triangle_margin,
            hit_fraction: 1.0,
        }
    }

    /// Sweeps the convex shape against one triangle, reporting into `sink`
    /// when it is the earliest hit so far.
    pub fn process_triangle(
        &mut self,
        triangle: &Triangle,
        part_id: i32,
        triangle_index: i32,
        sink: &mut dyn ConvexcastHitSink,
    ) {
        let tri = triangle.with_margin(self.triangle_margin);

        let mut simplex = VoronoiSimplex::new();
        let mut caster = SubsimplexConvexCast::new(&mut simplex);
        let result = caster.cast(
            self.convex_shape,
            &self.convex_from,
            &self.convex_to,
            &tri,
            &self.triangle_to_world,
            &self.triangle_to_world,
        );

        if let Some(result) = result {
            if result.fraction < self.hit_fraction {
                if let Some(normal) = Unit::try_new(result.normal, crate::math::DEFAULT_EPSILON) {
                    self.hit_fraction = sink.report_hit(
                        normal,
                        result.hit_point,
                        result.fraction,
                        part_id,
                        triangle_index,
                    );
                }
            }
        }
    }
}
