use thiserror::Error;

use super::registry::DecalId;

/// Failures surfaced by decal core operations.
///
/// A missing selection is never an error: operations on the selected decal
/// return `None` when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecalError {
    #[error("no texture loaded; load an image before placing a decal")]
    InvalidTexture,
    #[error("surface normal is colinear with the up reference")]
    DegenerateOrientation,
    #[error("decal {0} does not exist")]
    UnknownDecal(DecalId),
}
