use crate::math::{Point, Real};
use crate::query::gjk::{self, CsoPoint};
use crate::shape::{
    Segment, SegmentPointLocation, Tetrahedron, TetrahedronPointLocation, Triangle,
    TrianglePointLocation,
};

// Vertex orders matching the location conventions documented on
// `TrianglePointLocation` and `TetrahedronPointLocation`.
const TRI_EDGE_VERTS: [[usize; 2]; 3] = [[0, 1], [1, 2], [2, 0]];
const TET_EDGE_VERTS: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];
const TET_FACE_VERTS: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// A simplex of dimension up to 3 using Voronoï regions for computing point
/// projections.
///
/// This is the state machine at the heart of GJK: candidate support points are
/// appended, and each projection of the origin reduces the simplex to the
/// smallest sub-simplex supporting that projection.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    vertices: [CsoPoint; 4],
    proj: [Real; 4],
    dim: usize,
}

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        VoronoiSimplex {
            vertices: [CsoPoint::origin(); 4],
            proj: [0.0; 4],
            dim: 0,
        }
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CsoPoint) {
        self.dim = 0;
        self.proj = [0.0; 4];
        self.vertices[0] = pt;
    }

    /// Adds a point to this simplex.
    ///
    /// Returns `false` without adding when the simplex is already full, or
    /// when the point duplicates a known vertex. The latter means the GJK
    /// iteration is cycling and must terminate.
    pub fn add_point(&mut self, pt: CsoPoint) -> bool {
        if self.dim >= 3 {
            return false;
        }

        for i in 0..self.dim + 1 {
            if (self.vertices[i].point - pt.point).norm_squared() < gjk::eps_tol() {
                return false;
            }
        }

        self.dim += 1;
        self.vertices[self.dim] = pt;
        true
    }

    /// Tests whether the given point is already a vertex of this simplex.
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        for i in 0..self.dim + 1 {
            if self.vertices[i].point == *pt {
                return true;
            }
        }

        false
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th vertex
    /// by the last call to `project_origin_and_reduce`.
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.dim, "index out of bounds");
        self.proj[i]
    }

    /// The `i`-th point of this simplex.
    pub fn point(&self, i: usize) -> &CsoPoint {
        assert!(i <= self.dim, "index out of bounds");
        &self.vertices[i]
    }

    /// The dimension of the smallest subspace that can contain this simplex.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Reconstructs the witness points on both original shapes from the
    /// barycentric coordinates of the last origin projection.
    pub fn compute_points(&self) -> (Point<Real>, Point<Real>) {
        let mut res = (Point::origin(), Point::origin());

        for i in 0..self.dim + 1 {
            res.0 += self.vertices[i].orig1.coords * self.proj[i];
            res.1 += self.vertices[i].orig2.coords * self.proj[i];
        }

        res
    }

    /// Projects the origin on this simplex and reduces `self` to the smallest
    /// sub-simplex containing the projection.
    ///
    /// Returns `None` when the projection is numerically ill-conditioned
    /// (near-degenerate simplex). The caller must treat this as inconclusive
    /// rather than as a touching contact.
    pub fn project_origin_and_reduce(&mut self) -> Option<Point<Real>> {
        let origin = Point::origin();

        match self.dim {
            0 => {
                self.proj[0] = 1.0;
                Some(self.vertices[0].point)
            }
            1 => {
                let seg = Segment::new(self.vertices[0].point, self.vertices[1].point);
                let (proj, loc) = seg.project_local_point_with_location(&origin);

                match loc {
                    SegmentPointLocation::OnVertex(0) => {
                        self.proj[0] = 1.0;
                        self.dim = 0;
                    }
                    SegmentPointLocation::OnVertex(_) => {
                        self.vertices[0] = self.vertices[1];
                        self.proj[0] = 1.0;
                        self.dim = 0;
                    }
                    SegmentPointLocation::OnEdge(coords) => {
                        self.proj[0] = coords[0];
                        self.proj[1] = coords[1];
                    }
                }

                Some(proj)
            }
            2 => {
                let tri = Triangle::new(
                    self.vertices[0].point,
                    self.vertices[1].point,
                    self.vertices[2].point,
                );
                let (proj, loc) = tri.project_local_point_with_location(&origin)?;

                match loc {
                    TrianglePointLocation::OnVertex(i) => {
                        self.vertices[0] = self.vertices[i as usize];
                        self.proj[0] = 1.0;
                        self.dim = 0;
                    }
                    TrianglePointLocation::OnEdge(e, coords) => {
                        let verts = self.vertices;
                        let [i, j] = TRI_EDGE_VERTS[e as usize];
                        self.vertices[0] = verts[i];
                        self.vertices[1] = verts[j];
                        self.proj[0] = coords[0];
                        self.proj[1] = coords[1];
                        self.dim = 1;
                    }
                    TrianglePointLocation::OnFace(coords) => {
                        self.proj[0] = coords[0];
                        self.proj[1] = coords[1];
                        self.proj[2] = coords[2];
                    }
                }

                Some(proj)
            }
            _ => {
                let tet = Tetrahedron::new(
                    self.vertices[0].point,
                    self.vertices[1].point,
                    self.vertices[2].point,
                    self.vertices[3].point,
                );
                let (proj, loc) = tet.project_local_point_with_location(&origin)?;

                match loc {
                    TetrahedronPointLocation::OnVertex(i) => {
                        self.vertices[0] = self.vertices[i as usize];
                        self.proj[0] = 1.0;
                        self.dim = 0;
                    }
                    TetrahedronPointLocation::OnEdge(e, coords) => {
                        let verts = self.vertices;
                        let [i, j] = TET_EDGE_VERTS[e as usize];
                        self.vertices[0] = verts[i];
                        self.vertices[1] = verts[j];
                        self.proj[0] = coords[0];
                        self.proj[1] = coords[1];
                        self.dim = 1;
                    }
                    TetrahedronPointLocation::OnFace(f, coords) => {
                        let verts = self.vertices;
                        let [i, j, k] = TET_FACE_VERTS[f as usize];
                        self.vertices[0] = verts[i];
                        self.vertices[1] = verts[j];
                        self.vertices[2] = verts[k];
                        self.proj[0] = coords[0];
                        self.proj[1] = coords[1];
                        self.proj[2] = coords[2];
                        self.dim = 2;
                    }
                    TetrahedronPointLocation::Inside(coords) => {
                        self.proj = coords;
                    }
                }

                Some(proj)
            }
        }
    }
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}
