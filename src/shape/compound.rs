use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::{Shape, SharedShape};

/// A compound shape: child shapes placed by local transforms.
///
/// The children are shared, not owned, and the compound never nests: a child
/// may be any shape except another compound. Narrow-phase dispatch unrolls a
/// compound into one sub-query per child.
#[derive(Clone)]
pub struct Compound {
    children: Vec<(Isometry<Real>, SharedShape)>,
    local_aabb: Aabb,
}

impl Compound {
    /// Creates a compound from child shapes and their local placements.
    ///
    /// Panics if `children` is empty or if any child is itself a compound.
    pub fn new(children: Vec<(Isometry<Real>, SharedShape)>) -> Compound {
        assert!(
            !children.is_empty(),
            "a compound shape must contain at least one child shape"
        );

        let mut local_aabb = Aabb::new_invalid();
        for (pos, shape) in &children {
            assert!(
                shape.as_compound().is_none(),
                "nested compound shapes are not supported"
            );
            local_aabb = local_aabb.merged(&shape.compute_aabb(pos));
        }

        Compound {
            children,
            local_aabb,
        }
    }

    /// The child shapes and their local placements.
    #[inline]
    pub fn children(&self) -> &[(Isometry<Real>, SharedShape)] {
        &self.children
    }

    /// The AABB of this compound in its local frame.
    #[inline]
    pub fn local_aabb(&self) -> &Aabb {
        &self.local_aabb
    }
}
