use crate::narrow_phase::{
    CollisionAlgorithm, CompoundCollisionAlgorithm, Convex2dConvex2dAlgorithm,
    ConvexConvexAlgorithm, DispatchError, SphereSphereAlgorithm, SphereTriangleAlgorithm,
};
use crate::shape::{Shape, ShapeType, SHAPE_TYPE_COUNT};

/// The collision algorithm selected for an ordered shape-type pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// Analytic sphere-sphere test.
    SphereSphere,
    /// Sphere against a triangle; `swapped` when the triangle comes first.
    SphereTriangle {
        /// The triangle is the first shape of the pair.
        swapped: bool,
    },
    /// General GJK/EPA convex pair.
    ConvexConvex,
    /// GJK between two plane-constrained convex shapes.
    Convex2dConvex2d,
    /// Compound against anything; `swapped` when the compound comes second.
    Compound {
        /// The compound is the second shape of the pair.
        swapped: bool,
    },
}

/// The static double-dispatch table of the narrow phase.
///
/// A matrix indexed by the ordered pair of shape types, resolved once at
/// pair-creation time. An unregistered entry is a configuration error, not a
/// runtime geometry condition: it fails fast when the pair first appears.
pub struct AlgorithmTable {
    entries: [[Option<AlgorithmKind>; SHAPE_TYPE_COUNT]; SHAPE_TYPE_COUNT],
}

const CONVEX_TYPES: [ShapeType; 7] = [
    ShapeType::Sphere,
    ShapeType::Cone,
    ShapeType::ConvexPolyhedron,
    ShapeType::Convex2d,
    ShapeType::MultiSphere,
    ShapeType::UniformScaled,
    ShapeType::Triangle,
];

impl AlgorithmTable {
    /// Creates a table with no registered pair.
    pub fn new_empty() -> Self {
        AlgorithmTable {
            entries: [[None; SHAPE_TYPE_COUNT]; SHAPE_TYPE_COUNT],
        }
    }

    /// Creates the default table covering every supported shape pair.
    pub fn with_defaults() -> Self {
        let mut table = Self::new_empty();

        for a in CONVEX_TYPES {
            for b in CONVEX_TYPES {
                table.register(a, b, AlgorithmKind::ConvexConvex);
            }
        }

        table.register(ShapeType::Sphere, ShapeType::Sphere, AlgorithmKind::SphereSphere);
        table.register(
            ShapeType::Sphere,
            ShapeType::Triangle,
            AlgorithmKind::SphereTriangle { swapped: false },
        );
        table.register(
            ShapeType::Triangle,
            ShapeType::Sphere,
            AlgorithmKind::SphereTriangle { swapped: true },
        );
        table.register(
            ShapeType::Convex2d,
            ShapeType::Convex2d,
            AlgorithmKind::Convex2dConvex2d,
        );

        for other in CONVEX_TYPES {
            table.register(
                ShapeType::Compound,
                other,
                AlgorithmKind::Compound { swapped: false },
            );
            table.register(
                other,
                ShapeType::Compound,
                AlgorithmKind::Compound { swapped: true },
            );
        }
        table.register(
            ShapeType::Compound,
            ShapeType::Compound,
            AlgorithmKind::Compound { swapped: false },
        );

        table
    }

    /// Registers (or overrides) the algorithm for an ordered shape-type pair.
    pub fn register(&mut self, a: ShapeType, b: ShapeType, kind: AlgorithmKind) {
        self.entries[a as usize][b as usize] = Some(kind);
    }

    /// The algorithm registered for an ordered shape-type pair.
    pub fn lookup(&self, a: ShapeType, b: ShapeType) -> Option<AlgorithmKind> {
        self.entries[a as usize][b as usize]
    }

    /// Instantiates the pair algorithm for two shapes.
    ///
    /// Compound algorithms recursively instantiate one child algorithm per
    /// child shape, so an unregistered child pair also fails here, at
    /// creation time.
    pub fn create_algorithm(
        &self,
        shape_a: &dyn Shape,
        shape_b: &dyn Shape,
    ) -> Result<Box<dyn CollisionAlgorithm>, DispatchError> {
        self.create_algorithm_with(shape_a, shape_b, true)
    }

    // Child algorithms of a compound share the pair's manifold and must not
    // refresh it themselves; `owns_manifold` carries that responsibility.
    pub(crate) fn create_algorithm_with(
        &self,
        shape_a: &dyn Shape,
        shape_b: &dyn Shape,
        owns_manifold: bool,
    ) -> Result<Box<dyn CollisionAlgorithm>, DispatchError> {
        let type_a = shape_a.shape_type();
        let type_b = shape_b.shape_type();
        let kind = self
            .lookup(type_a, type_b)
            .ok_or(DispatchError::UnregisteredAlgorithm(type_a, type_b))?;

        Ok(match kind {
            AlgorithmKind::SphereSphere => Box::new(SphereSphereAlgorithm::new(owns_manifold)),
            AlgorithmKind::SphereTriangle { swapped } => {
                Box::new(SphereTriangleAlgorithm::new(swapped, owns_manifold))
            }
            AlgorithmKind::ConvexConvex => Box::new(ConvexConvexAlgorithm::new(owns_manifold)),
            AlgorithmKind::Convex2dConvex2d => {
                Box::new(Convex2dConvex2dAlgorithm::new(owns_manifold))
            }
            AlgorithmKind::Compound { swapped } => Box::new(CompoundCollisionAlgorithm::new(
                self,
                shape_a,
                shape_b,
                swapped,
                owns_manifold,
            )?),
        })
    }
}

impl Default for AlgorithmTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
