use crate::shape::ShapeType;
use thiserror::Error;

/// Errors raised while configuring narrow-phase dispatch.
///
/// Unlike degenerate-geometry conditions (which are recoverable and simply
/// produce no contact), these indicate a misconfigured dispatch table and are
/// reported at pair-creation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No collision algorithm is registered for this ordered shape-type pair.
    #[error("no collision algorithm registered for shape pair ({0:?}, {1:?})")]
    UnregisteredAlgorithm(ShapeType, ShapeType),
}
