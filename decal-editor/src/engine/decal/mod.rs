//! Engine-agnostic decal core.
//!
//! Everything here is plain data plus math: no ECS queries, no assets beyond
//! the shared image handle. The Bevy side (`tools::decal_manager`) feeds
//! surface hits in and mirrors the resulting state into render entities.
//!
//! ```text
//! DecalRegistry
//!   └─> DecalEntity (creation order, at most one Selected)
//!         ├─> DecalGeometry   unit quad + collision bounds, local space
//!         ├─> OutlineGeometry lazily built on first select, hidden on deselect
//!         └─> DecalTransform  position + normal-derived rotation + clamped scale
//! ```

pub mod entity;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod outline;
pub mod registry;
pub mod texture;

pub use entity::{DecalEntity, DecalTransform, SelectionState};
pub use error::DecalError;
pub use geometry::{ColliderBounds, DecalGeometry, QuadMesh, clamp_decal_size};
pub use outline::OutlineGeometry;
pub use registry::{DecalId, DecalRegistry, SelectOutcome};
pub use texture::DecalTexture;
