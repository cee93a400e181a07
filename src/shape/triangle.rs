use crate::math::{Point, Real, Vector};
use crate::shape::{ConvexShape, SupportMap, COLLISION_MARGIN};
use na::Unit;

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
    /// The collision margin of the triangle.
    pub margin: Real,
}

/// Description of the location of a point on a triangle.
///
/// Edge indices follow the vertex order: edge 0 is `(a, b)`, edge 1 is
/// `(b, c)`, edge 2 is `(c, a)`.
#[derive(Copy, Clone, Debug)]
pub enum TrianglePointLocation {
    /// The point lies on the vertex with the given index.
    OnVertex(u32),
    /// The point lies on an edge, with the given barycentric coordinates on
    /// that edge's vertex pair.
    OnEdge(u32, [Real; 2]),
    /// The point lies on the triangle interior, with the given barycentric
    /// coordinates.
    OnFace([Real; 3]),
}

impl TrianglePointLocation {
    /// The barycentric coordinates of this location, expressed on the
    /// triangle's three vertices.
    pub fn barycentric_coordinates(&self) -> [Real; 3] {
        match self {
            TrianglePointLocation::OnVertex(i) => {
                let mut bcoords = [0.0; 3];
                bcoords[*i as usize] = 1.0;
                bcoords
            }
            TrianglePointLocation::OnEdge(e, uv) => {
                let idx = match e {
                    0 => [0, 1],
                    1 => [1, 2],
                    _ => [2, 0],
                };
                let mut bcoords = [0.0; 3];
                bcoords[idx[0]] = uv[0];
                bcoords[idx[1]] = uv[1];
                bcoords
            }
            TrianglePointLocation::OnFace(bcoords) => *bcoords,
        }
    }
}

impl Triangle {
    /// Creates a triangle from three points, with the default collision margin.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle {
            a,
            b,
            c,
            margin: COLLISION_MARGIN,
        }
    }

    /// Sets the collision margin of this triangle.
    pub fn with_margin(mut self, margin: Real) -> Triangle {
        self.margin = margin;
        self
    }

    /// The normal of this triangle, if it is not degenerate.
    #[inline]
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        Unit::try_new(
            (self.b - self.a).cross(&(self.c - self.a)),
            crate::math::DEFAULT_EPSILON,
        )
    }

    /// The center of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// Tests whether the three vertices of this triangle are almost aligned.
    #[inline]
    pub fn is_affinely_dependent(&self) -> bool {
        (self.b - self.a)
            .cross(&(self.c - self.a))
            .norm_squared()
            <= 1.0e-10
    }

    /// Projects a point on this triangle and reports where the projection
    /// landed.
    ///
    /// Returns `None` when the triangle is too degenerate (near-zero area) for
    /// the face barycentric coordinates to be well-conditioned.
    pub fn project_local_point_with_location(
        &self,
        pt: &Point<Real>,
    ) -> Option<(Point<Real>, TrianglePointLocation)> {
        let _eps = crate::math::DEFAULT_EPSILON;
        let a = self.a;
        let b = self.b;
        let c = self.c;

        let ab = b - a;
        let ac = c - a;
        let ap = pt - a;

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return Some((a, TrianglePointLocation::OnVertex(0)));
        }

        let bp = pt - b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return Some((b, TrianglePointLocation::OnVertex(1)));
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let denom = d1 - d3;
            if denom <= _eps {
                return Some((a, TrianglePointLocation::OnVertex(0)));
            }
            let v = d1 / denom;
            return Some((a + ab * v, TrianglePointLocation::OnEdge(0, [1.0 - v, v])));
        }

        let cp = pt - c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return Some((c, TrianglePointLocation::OnVertex(2)));
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let denom = d2 - d6;
            if denom <= _eps {
                return Some((a, TrianglePointLocation::OnVertex(0)));
            }
            // Projection on edge 'ca', expressed on the (c, a) vertex pair.
            let w = d2 / denom;
            return Some((a + ac * w, TrianglePointLocation::OnEdge(2, [w, 1.0 - w])));
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let denom = (d4 - d3) + (d5 - d6);
            if denom <= _eps {
                return Some((b, TrianglePointLocation::OnVertex(1)));
            }
            let w = (d4 - d3) / denom;
            return Some((
                b + (c - b) * w,
                TrianglePointLocation::OnEdge(1, [1.0 - w, w]),
            ));
        }

        let denom = va + vb + vc;
        if denom.abs() < 1.0e-20 {
            // The triangle is flat, the face coordinates are meaningless.
            return None;
        }

        let denom = 1.0 / denom;
        let v = vb * denom;
        let w = vc * denom;
        Some((
            a + ab * v + ac * w,
            TrianglePointLocation::OnFace([1.0 - v - w, v, w]),
        ))
    }
}

impl SupportMap for Triangle {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let d1 = self.a.coords.dot(dir);
        let d2 = self.b.coords.dot(dir);
        let d3 = self.c.coords.dot(dir);

        if d1 > d2 {
            if d1 > d3 {
                self.a
            } else {
                self.c
            }
        } else if d2 > d3 {
            self.b
        } else {
            self.c
        }
    }
}

impl ConvexShape for Triangle {
    #[inline]
    fn margin(&self) -> Real {
        self.margin
    }
}
