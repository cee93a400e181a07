use crate::math::{Isometry, Point, Real, Vector};
use crate::query::epa::PenetrationDepthSolver;
use crate::query::gjk::{self, CsoPoint, Margined, VoronoiSimplex};
use crate::shape::{ConvexShape, Triangle, TrianglePointLocation};
use na::{self, Unit};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Copy, Clone, PartialEq)]
struct FaceId {
    id: usize,
    neg_dist: Real,
}

impl FaceId {
    fn new(id: usize, neg_dist: Real) -> Option<Self> {
        if neg_dist > gjk::eps_tol() {
            None
        } else {
            Some(FaceId { id, neg_dist })
        }
    }
}

impl Eq for FaceId {}

impl PartialOrd for FaceId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FaceId {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.neg_dist < other.neg_dist {
            Ordering::Less
        } else if self.neg_dist > other.neg_dist {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

#[derive(Clone, Debug)]
struct Face {
    pts: [usize; 3],
    adj: [usize; 3],
    normal: Unit<Vector<Real>>,
    bcoords: [Real; 3],
    deleted: bool,
}

impl Face {
    pub fn new_with_proj(
        vertices: &[CsoPoint],
        bcoords: [Real; 3],
        pts: [usize; 3],
        adj: [usize; 3],
    ) -> Self {
        let normal = ccw_face_normal([
            &vertices[pts[0]].point,
            &vertices[pts[1]].point,
            &vertices[pts[2]].point,
        ])
        // Degenerate faces get a zero normal; they are skipped during the
        // silhouette computation.
        .unwrap_or_else(|| Unit::new_unchecked(na::zero()));

        Face {
            pts,
            bcoords,
            adj,
            normal,
            deleted: false,
        }
    }

    pub fn new(vertices: &[CsoPoint], pts: [usize; 3], adj: [usize; 3]) -> (Self, bool) {
        let tri = Triangle::new(
            vertices[pts[0]].point,
            vertices[pts[1]].point,
            vertices[pts[2]].point,
        );

        match tri.project_local_point_with_location(&Point::origin()) {
            Some((proj, loc)) => {
                let bcoords = loc.barycentric_coordinates();
                let eps_tol = crate::math::DEFAULT_EPSILON * 100.0;
                let inside = match loc {
                    TrianglePointLocation::OnFace(_) => true,
                    _ => proj.coords.norm_squared() <= eps_tol * eps_tol,
                };
                (Self::new_with_proj(vertices, bcoords, pts, adj), inside)
            }
            None => (Self::new_with_proj(vertices, [0.0; 3], pts, adj), false),
        }
    }

    pub fn closest_points(&self, vertices: &[CsoPoint]) -> (Point<Real>, Point<Real>) {
        (
            vertices[self.pts[0]].orig1 * self.bcoords[0]
                + vertices[self.pts[1]].orig1.coords * self.bcoords[1]
                + vertices[self.pts[2]].orig1.coords * self.bcoords[2],
            vertices[self.pts[0]].orig2 * self.bcoords[0]
                + vertices[self.pts[1]].orig2.coords * self.bcoords[1]
                + vertices[self.pts[2]].orig2.coords * self.bcoords[2],
        )
    }

    pub fn contains_point(&self, id: usize) -> bool {
        self.pts[0] == id || self.pts[1] == id || self.pts[2] == id
    }

    pub fn next_ccw_pt_id(&self, id: usize) -> usize {
        if self.pts[0] == id {
            1
        } else if self.pts[1] == id {
            2
        } else {
            if self.pts[2] != id {
                log::debug!(
                    "hit unexpected state in EPA: found index {}, expected {}",
                    self.pts[2],
                    id
                );
            }

            0
        }
    }

    pub fn can_be_seen_by(&self, vertices: &[CsoPoint], point: usize, opp_pt_id: usize) -> bool {
        let p0 = &vertices[self.pts[opp_pt_id]].point;
        let p1 = &vertices[self.pts[(opp_pt_id + 1) % 3]].point;
        let p2 = &vertices[self.pts[(opp_pt_id + 2) % 3]].point;
        let pt = &vertices[point].point;

        // A zero dot product must count as visible: degenerate faces have a
        // zero normal and get skipped during the silhouette computation.
        (*pt - *p0).dot(&self.normal) >= -gjk::eps_tol()
            || Triangle::new(*p1, *p2, *pt).is_affinely_dependent()
    }
}

struct SilhouetteEdge {
    face_id: usize,
    opp_pt_id: usize,
}

impl SilhouetteEdge {
    pub fn new(face_id: usize, opp_pt_id: usize) -> Self {
        SilhouetteEdge { face_id, opp_pt_id }
    }
}

fn ccw_face_normal(pts: [&Point<Real>; 3]) -> Option<Unit<Vector<Real>>> {
    let p1p2 = pts[1] - pts[0];
    let p1p3 = pts[2] - pts[0];
    Unit::try_new(p1p2.cross(&p1p3), crate::math::DEFAULT_EPSILON)
}

/// The Expanding Polytope Algorithm.
///
/// Once GJK establishes that two margin-expanded shapes overlap, `Epa` grows a
/// convex polytope inside their Minkowski difference until its face closest to
/// the origin stops improving. That face yields the penetration depth, the
/// separating normal, and the witness points.
///
/// The internal buffers are reused across queries; keep one instance per pair
/// algorithm.
#[derive(Default)]
pub struct Epa {
    vertices: Vec<CsoPoint>,
    faces: Vec<Face>,
    silhouette: Vec<SilhouetteEdge>,
    heap: BinaryHeap<FaceId>,
}

impl Epa {
    /// Creates a new instance of the Expanding Polytope Algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.heap.clear();
        self.silhouette.clear();
    }

    /// Expands the given origin-enclosing simplex and computes the closest
    /// boundary points of the Minkowski difference of `a` and `b`.
    ///
    /// Returns the world-space witness points on both shapes and the CSO face
    /// normal, or `None` when the expansion fails (shapes not actually
    /// overlapping, or degenerate geometry).
    pub fn closest_points(
        &mut self,
        a: &Margined,
        b: &Margined,
        simplex: &VoronoiSimplex,
    ) -> Option<(Point<Real>, Point<Real>, Unit<Vector<Real>>)> {
        let _eps = crate::math::DEFAULT_EPSILON;
        let _eps_tol = _eps * 100.0;

        self.reset();

        /*
         * Initialization.
         */
        for i in 0..simplex.dimension() + 1 {
            self.vertices.push(*simplex.point(i));
        }

        if simplex.dimension() == 0 {
            let mut n: Vector<Real> = na::zero();
            n[1] = 1.0;
            return Some((Point::origin(), Point::origin(), Unit::new_unchecked(n)));
        } else if simplex.dimension() == 3 {
            let dp1 = self.vertices[1] - self.vertices[0];
            let dp2 = self.vertices[2] - self.vertices[0];
            let dp3 = self.vertices[3] - self.vertices[0];

            if dp1.cross(&dp2).dot(&dp3) > 0.0 {
                self.vertices.swap(1, 2)
            }

            let pts1 = [0, 1, 2];
            let pts2 = [1, 3, 2];
            let pts3 = [0, 2, 3];
            let pts4 = [0, 3, 1];

            let adj1 = [3, 1, 2];
            let adj2 = [3, 2, 0];
            let adj3 = [0, 1, 3];
            let adj4 = [2, 1, 0];

            let (face1, proj_inside1) = Face::new(&self.vertices, pts1, adj1);
            let (face2, proj_inside2) = Face::new(&self.vertices, pts2, adj2);
            let (face3, proj_inside3) = Face::new(&self.vertices, pts3, adj3);
            let (face4, proj_inside4) = Face::new(&self.vertices, pts4, adj4);

            self.faces.push(face1);
            self.faces.push(face2);
            self.faces.push(face3);
            self.faces.push(face4);

            if proj_inside1 {
                let dist1 = self.faces[0].normal.dot(&self.vertices[0].point.coords);
                self.heap.push(FaceId::new(0, -dist1)?);
            }

            if proj_inside2 {
                let dist2 = self.faces[1].normal.dot(&self.vertices[1].point.coords);
                self.heap.push(FaceId::new(1, -dist2)?);
            }

            if proj_inside3 {
                let dist3 = self.faces[2].normal.dot(&self.vertices[2].point.coords);
                self.heap.push(FaceId::new(2, -dist3)?);
            }

            if proj_inside4 {
                let dist4 = self.faces[3].normal.dot(&self.vertices[3].point.coords);
                self.heap.push(FaceId::new(3, -dist4)?);
            }

            if !(proj_inside1 || proj_inside2 || proj_inside3 || proj_inside4) {
                log::debug!("hit unexpected state in EPA: failed to project the origin on the initial simplex");
                return None;
            }
        } else {
            if simplex.dimension() == 1 {
                let dpt = self.vertices[1] - self.vertices[0];

                Vector::orthonormal_subspace_basis(&[dpt], |dir| {
                    let dir = Unit::new_unchecked(*dir);
                    self.vertices.push(CsoPoint::from_margined(a, b, &dir));
                    false
                });
            }

            let pts1 = [0, 1, 2];
            let pts2 = [0, 2, 1];

            let adj1 = [1, 1, 1];
            let adj2 = [0, 0, 0];

            let (face1, _) = Face::new(&self.vertices, pts1, adj1);
            let (face2, _) = Face::new(&self.vertices, pts2, adj2);
            self.faces.push(face1);
            self.faces.push(face2);

            self.heap.push(FaceId::new(0, 0.0)?);
            self.heap.push(FaceId::new(1, 0.0)?);
        }

        let mut niter = 0;
        let mut max_dist = Real::MAX;
        let mut best_face_id = *self.heap.peek()?;
        let mut old_dist = 0.0;

        /*
         * Run the expansion.
         */
        while let Some(face_id) = self.heap.pop() {
            // Create new faces.
            let face = self.faces[face_id.id].clone();

            if face.deleted {
                continue;
            }

            let cso_point = CsoPoint::from_margined(a, b, &face.normal);
            let support_point_id = self.vertices.len();
            self.vertices.push(cso_point);

            let candidate_max_dist = cso_point.point.coords.dot(&face.normal);

            if candidate_max_dist < max_dist {
                best_face_id = face_id;
                max_dist = candidate_max_dist;
            }

            let curr_dist = -face_id.neg_dist;

            if max_dist - curr_dist < _eps_tol ||
                // Accept the current result when the algorithm is stuck on
                // numerical noise and no new point improves the polytope.
                ((curr_dist - old_dist).abs() < _eps && candidate_max_dist < max_dist)
            {
                let best_face = &self.faces[best_face_id.id];
                let points = best_face.closest_points(&self.vertices);
                return Some((points.0, points.1, best_face.normal));
            }

            old_dist = curr_dist;

            self.faces[face_id.id].deleted = true;

            let adj_opp_pt_id1 = self.faces[face.adj[0]].next_ccw_pt_id(face.pts[0]);
            let adj_opp_pt_id2 = self.faces[face.adj[1]].next_ccw_pt_id(face.pts[1]);
            let adj_opp_pt_id3 = self.faces[face.adj[2]].next_ccw_pt_id(face.pts[2]);

            self.compute_silhouette(support_point_id, face.adj[0], adj_opp_pt_id1);
            self.compute_silhouette(support_point_id, face.adj[1], adj_opp_pt_id2);
            self.compute_silhouette(support_point_id, face.adj[2], adj_opp_pt_id3);

            let first_new_face_id = self.faces.len();

            if self.silhouette.is_empty() {
                // The silhouette extraction failed, the polytope topology is
                // broken beyond repair.
                return None;
            }

            for edge in &self.silhouette {
                if !self.faces[edge.face_id].deleted {
                    let new_face_id = self.faces.len();

                    let face_adj = &mut self.faces[edge.face_id];
                    let pt_id1 = face_adj.pts[(edge.opp_pt_id + 2) % 3];
                    let pt_id2 = face_adj.pts[(edge.opp_pt_id + 1) % 3];

                    let pts = [pt_id1, pt_id2, support_point_id];
                    let adj = [edge.face_id, new_face_id + 1, new_face_id - 1];
                    let new_face = Face::new(&self.vertices, pts, adj);

                    face_adj.adj[(edge.opp_pt_id + 1) % 3] = new_face_id;

                    self.faces.push(new_face.0);

                    if new_face.1 {
                        let pt = self.vertices[self.faces[new_face_id].pts[0]].point.coords;
                        let dist = self.faces[new_face_id].normal.dot(&pt);
                        if dist < curr_dist {
                            // Numerical errors shrank the polytope; the
                            // previous face is the best answer available.
                            let points = face.closest_points(&self.vertices);
                            return Some((points.0, points.1, face.normal));
                        }

                        self.heap.push(FaceId::new(new_face_id, -dist)?);
                    }
                }
            }

            if first_new_face_id == self.faces.len() {
                // Every silhouette edge belonged to a deleted face.
                return None;
            }

            self.faces[first_new_face_id].adj[2] = self.faces.len() - 1;
            let last_face_id = self.faces.len() - 1;
            self.faces[last_face_id].adj[1] = first_new_face_id;

            self.silhouette.clear();

            niter += 1;
            if niter > 100 {
                // No convergence to the target precision; the current best
                // face is still close enough to be useful.
                break;
            }
        }

        let best_face = &self.faces[best_face_id.id];
        let points = best_face.closest_points(&self.vertices);
        Some((points.0, points.1, best_face.normal))
    }

    fn compute_silhouette(&mut self, point: usize, id: usize, opp_pt_id: usize) {
        if !self.faces[id].deleted {
            if !self.faces[id].can_be_seen_by(&self.vertices, point, opp_pt_id) {
                self.silhouette.push(SilhouetteEdge::new(id, opp_pt_id));
            } else {
                self.faces[id].deleted = true;

                let adj_pt_id1 = (opp_pt_id + 2) % 3;
                let adj_pt_id2 = opp_pt_id;

                let adj1 = self.faces[id].adj[adj_pt_id1];
                let adj2 = self.faces[id].adj[adj_pt_id2];

                let adj_opp_pt_id1 =
                    self.faces[adj1].next_ccw_pt_id(self.faces[id].pts[adj_pt_id1]);
                let adj_opp_pt_id2 =
                    self.faces[adj2].next_ccw_pt_id(self.faces[id].pts[adj_pt_id2]);

                self.compute_silhouette(point, adj1, adj_opp_pt_id1);
                self.compute_silhouette(point, adj2, adj_opp_pt_id2);
            }
        }
    }
}

/// Runs a margin-inclusive GJK pass growing `simplex` until it encloses the
/// origin of the Minkowski difference.
///
/// Returns `false` when the shapes turn out to be separated or the iteration
/// degenerates.
fn enclose_origin(a: &Margined, b: &Margined, simplex: &mut VoronoiSimplex, guess: &Vector<Real>) -> bool {
    let init_dir =
        Unit::try_new(*guess, crate::math::DEFAULT_EPSILON).unwrap_or_else(Vector::y_axis);
    simplex.reset(CsoPoint::from_margined(a, b, &init_dir));

    for _ in 0..100 {
        let proj = match simplex.project_origin_and_reduce() {
            Some(proj) => proj,
            None => return false,
        };

        if simplex.dimension() == 3 {
            return true;
        }

        let sq_norm = proj.coords.norm_squared();
        if sq_norm < gjk::eps_tol() {
            // The origin lies on the partial simplex; the polytope
            // initialization handles dimensions below 3.
            return true;
        }

        let dir = Unit::new_unchecked(-proj.coords / sq_norm.sqrt());
        let support = CsoPoint::from_margined(a, b, &dir);

        // The support plane does not reach past the origin: separated.
        if support.point.coords.dot(&dir) < 0.0 {
            return false;
        }

        if !simplex.add_point(support) {
            return false;
        }
    }

    false
}

impl PenetrationDepthSolver for Epa {
    fn pen_depth(
        &mut self,
        pos_a: &Isometry<Real>,
        shape_a: &dyn ConvexShape,
        pos_b: &Isometry<Real>,
        shape_b: &dyn ConvexShape,
        guess: &Vector<Real>,
    ) -> Option<(Point<Real>, Point<Real>, Unit<Vector<Real>>, Real)> {
        let a = Margined::new(shape_a, pos_a);
        let b = Margined::new(shape_b, pos_b);

        // The detector's terminal simplex lives on the margin-less cores, so
        // a fresh margin-inclusive pass is needed to seed the polytope.
        let mut simplex = VoronoiSimplex::new();
        if !enclose_origin(&a, &b, &mut simplex, guess) {
            return None;
        }

        let (witness_a, witness_b, face_normal) = self.closest_points(&a, &b, &simplex)?;
        let depth = (witness_a - witness_b).dot(&face_normal);

        // The face normal pushes the Minkowski difference away from the
        // origin; the contact normal on B points the opposite way.
        let normal_on_b = Unit::new_unchecked(-*face_normal);
        Some((witness_a, witness_b, normal_on_b, depth.max(0.0)))
    }
}
