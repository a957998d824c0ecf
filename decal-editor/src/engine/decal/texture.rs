use bevy::prelude::*;

/// Shared, read-only handle to a normalised decal image.
///
/// Cloning shares the same strong asset handle, so the image stays alive while
/// any decal (or the active-texture slot) still refers to it.
#[derive(Clone, Debug)]
pub struct DecalTexture {
    pub image: Handle<Image>,
    pub size: UVec2,
    pub source: String,
}

impl DecalTexture {
    pub fn new(image: Handle<Image>, size: UVec2, source: impl Into<String>) -> Self {
        Self {
            image,
            size,
            source: source.into(),
        }
    }
}
