//! The Gilbert-Johnson-Keerthi distance algorithm and its simplex machinery.

pub use self::cso_point::CsoPoint;
pub use self::gjk::{GjkPairDetector, GJK_MAX_ITERATIONS};
pub use self::special_support_maps::Margined;
pub use self::voronoi_simplex::VoronoiSimplex;

mod cso_point;
mod gjk;
mod special_support_maps;
mod voronoi_simplex;

use crate::math::Real;

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    crate::math::DEFAULT_EPSILON * 10.0
}
