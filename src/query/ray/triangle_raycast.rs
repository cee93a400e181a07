use crate::math::{Point, Real, Vector};
use crate::shape::Triangle;
use na::Unit;

bitflags::bitflags! {
    /// Flags controlling triangle ray casts.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct RayFlags: u32 {
        /// Ignore triangles hit from their back side.
        const FILTER_BACKFACES = 1 << 0;
        /// Report the geometric face normal even when the triangle is hit
        /// from its back side.
        const KEEP_UNFLIPPED_NORMAL = 1 << 1;
    }
}

/// Receiver of triangle ray-cast hits.
pub trait TriangleHitSink {
    /// Reports a hit and returns the updated clipping fraction (usually the
    /// hit fraction itself, to keep only the closest hit).
    fn report_hit(
        &mut self,
        normal: Unit<Vector<Real>>,
        fraction: Real,
        part_id: i32,
        triangle_index: i32,
    ) -> Real;
}

/// Casts a segment against individual triangles, keeping the closest hit.
///
/// Mesh traversal stays external: whatever owns the triangles (a triangle
/// mesh, a heightfield, a streamed soup) feeds them to `process_triangle`
/// with their part and triangle indices, and hits funnel through the sink.
pub struct TriangleRaycaster {
    /// The segment start, in the triangles' frame.
    pub from: Point<Real>,
    /// The segment end, in the triangles' frame.
    pub to: Point<Real>,
    /// Back-face filtering and normal-flipping behavior.
    pub flags: RayFlags,
    /// The current clipping fraction; hits beyond it are ignored.
    pub hit_fraction: Real,
}

impl TriangleRaycaster {
    /// Creates a raycaster for the segment going from `from` to `to`.
    pub fn new(from: Point<Real>, to: Point<Real>, flags: RayFlags) -> Self {
        TriangleRaycaster {
            from,
            to,
            flags,
            hit_fraction: 1.0,
        }
    }

    /// Tests one triangle, reporting into `sink` when it is the closest hit
    /// so far.
    pub fn process_triangle(
        &mut self,
        triangle: &Triangle,
        part_id: i32,
        triangle_index: i32,
        sink: &mut dyn TriangleHitSink,
    ) {
        let v10 = triangle.b - triangle.a;
        let v20 = triangle.c - triangle.a;
        let triangle_normal = v10.cross(&v20);

        let dist = triangle.a.coords.dot(&triangle_normal);
        let dist_a = triangle_normal.dot(&self.from.coords) - dist;
        let dist_b = triangle_normal.dot(&self.to.coords) - dist;

        // The segment does not cross the triangle plane. Degenerate triangles
        // fall out here too: their normal vanishes and both distances are
        // zero.
        if dist_a * dist_b >= 0.0 {
            return;
        }

        if self.flags.contains(RayFlags::FILTER_BACKFACES) && dist_a <= 0.0 {
            return;
        }

        let proj_length = dist_a - dist_b;
        let fraction = dist_a / proj_length;
        if fraction >= self.hit_fraction {
            return;
        }

        let point = self.from + (self.to - self.from) * fraction;
        let edge_tolerance = -1.0e-4 * triangle_normal.norm_squared();
        let verts = [triangle.a, triangle.b, triangle.c];

        for i in 0..3 {
            let p0 = verts[i];
            let p1 = verts[(i + 1) % 3];
            let cp = (p1 - p0).cross(&(point - p0));
            if cp.dot(&triangle_normal) < edge_tolerance {
                return;
            }
        }

        let normal = if dist_a > 0.0 || self.flags.contains(RayFlags::KEEP_UNFLIPPED_NORMAL) {
            triangle_normal
        } else {
            // The ray entered through the back: flip so the reported normal
            // opposes it.
            -triangle_normal
        };

        self.hit_fraction = sink.report_hit(
            Unit::new_normalize(normal),
            fraction,
            part_id,
            triangle_index,
        );
    }
}
