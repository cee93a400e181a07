use crate::math::{Matrix, Point, Real};
use crate::shape::{Triangle, TrianglePointLocation};

/// A tetrahedron shape.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Tetrahedron {
    /// The tetrahedron first point.
    pub a: Point<Real>,
    /// The tetrahedron second point.
    pub b: Point<Real>,
    /// The tetrahedron third point.
    pub c: Point<Real>,
    /// The tetrahedron fourth point.
    pub d: Point<Real>,
}

/// Description of the location of a point on a tetrahedron.
///
/// Face indices: 0 is `(a, b, c)`, 1 is `(a, b, d)`, 2 is `(a, c, d)`,
/// 3 is `(b, c, d)`. Edge indices: 0 is `(a, b)`, 1 is `(a, c)`, 2 is
/// `(a, d)`, 3 is `(b, c)`, 4 is `(b, d)`, 5 is `(c, d)`.
#[derive(Copy, Clone, Debug)]
pub enum TetrahedronPointLocation {
    /// The point lies on the vertex with the given index.
    OnVertex(u32),
    /// The point lies on an edge, with the given barycentric coordinates on
    /// that edge's vertex pair.
    OnEdge(u32, [Real; 2]),
    /// The point lies on a face, with the given barycentric coordinates on
    /// that face's vertex triple.
    OnFace(u32, [Real; 3]),
    /// The point lies inside of the tetrahedron, with the given barycentric
    /// coordinates.
    Inside([Real; 4]),
}

const FACE_VERTS: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
const OPP_VERT: [usize; 4] = [3, 2, 1, 0];
const EDGE_VERTS: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];
// Edges of a face triangle, expressed on its local vertex indices.
const TRI_EDGES: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];

impl Tetrahedron {
    /// Creates a tetrahedron from four points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>, d: Point<Real>) -> Tetrahedron {
        Tetrahedron { a, b, c, d }
    }

    /// The `i`-th face of this tetrahedron.
    pub fn face(&self, i: usize) -> Triangle {
        let verts = [self.a, self.b, self.c, self.d];
        let f = FACE_VERTS[i];
        Triangle::new(verts[f[0]], verts[f[1]], verts[f[2]])
    }

    /// Projects a point on this tetrahedron and reports where the projection
    /// landed.
    ///
    /// Returns `None` when the tetrahedron is too flat for the projection to
    /// be numerically well-conditioned.
    pub fn project_local_point_with_location(
        &self,
        pt: &Point<Real>,
    ) -> Option<(Point<Real>, TetrahedronPointLocation)> {
        let verts = [self.a, self.b, self.c, self.d];
        let mut best: Option<(Real, Point<Real>, TetrahedronPointLocation)> = None;
        let mut inside = true;

        for (fid, f) in FACE_VERTS.iter().enumerate() {
            let fa = verts[f[0]];
            let n = (verts[f[1]] - fa).cross(&(verts[f[2]] - fa));
            if n.norm_squared() < 1.0e-20 {
                return None;
            }

            let side_opp = n.dot(&(verts[OPP_VERT[fid]] - fa));
            let side_pt = n.dot(&(pt - fa));

            // The point is outside this face when it lies on the opposite side
            // of the face plane from the remaining vertex.
            if side_pt * side_opp < 0.0 {
                inside = false;

                let tri = Triangle::new(verts[f[0]], verts[f[1]], verts[f[2]]);
                let (proj, loc) = tri.project_local_point_with_location(pt)?;
                let dist2 = (proj - pt).norm_squared();

                if best.map_or(true, |(d2, _, _)| dist2 < d2) {
                    best = Some((dist2, proj, map_face_location(fid, loc)));
                }
            }
        }

        if inside {
            let m = Matrix::from_columns(&[
                verts[1] - verts[0],
                verts[2] - verts[0],
                verts[3] - verts[0],
            ]);
            let inv = m.try_inverse()?;
            let coords = inv * (pt - verts[0]);
            let bcoords = [
                1.0 - coords.x - coords.y - coords.z,
                coords.x,
                coords.y,
                coords.z,
            ];
            return Some((*pt, TetrahedronPointLocation::Inside(bcoords)));
        }

        best.map(|(_, proj, loc)| (proj, loc))
    }
}

/// The index of the tetrahedron edge joining the vertices `i` and `j`, and
/// whether that pair is stored in reversed order.
fn edge_id(i: usize, j: usize) -> (u32, bool) {
    for (id, e) in EDGE_VERTS.iter().enumerate() {
        if e[0] == i && e[1] == j {
            return (id as u32, false);
        }
        if e[0] == j && e[1] == i {
            return (id as u32, true);
        }
    }
    unreachable!("invalid tetrahedron edge ({}, {})", i, j)
}

fn map_face_location(fid: usize, loc: TrianglePointLocation) -> TetrahedronPointLocation {
    let f = FACE_VERTS[fid];
    match loc {
        TrianglePointLocation::OnVertex(i) => {
            TetrahedronPointLocation::OnVertex(f[i as usize] as u32)
        }
        TrianglePointLocation::OnEdge(e, bcoords) => {
            let [i, j] = TRI_EDGES[e as usize];
            let (id, swapped) = edge_id(f[i], f[j]);
            let bcoords = if swapped {
                [bcoords[1], bcoords[0]]
            } else {
                bcoords
            };
            TetrahedronPointLocation::OnEdge(id, bcoords)
        }
        TrianglePointLocation::OnFace(bcoords) => TetrahedronPointLocation::OnFace(fid as u32, bcoords),
    }
}
