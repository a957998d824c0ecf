//! Texture acquisition pipeline for decal images.
//!
//! A request names either a concrete location or asks the configured picker.
//! Bytes are fetched and decoded on the IO task pool; the normalised result
//! comes back over a channel and is uploaded on the next frame.
//!
//! ```text
//! LoadImageRequest
//!   └─> handle_load_requests()   mark Loading
//!       └─> IoTaskPool task      picker -> fetch -> decode -> downscale to max size
//!           └─> LoadReport -> TextureLoadChannel
//!               └─> receive_loaded_textures()  Image asset -> ActiveTexture
//! ```

pub mod error;

/// Image source providers (file dialog, fixed locations) and byte fetching.
pub mod image_source;

/// Decode and size normalisation to at most the configured edge length.
pub mod texture_normalize;

/// Request handling, background loading and upload of decal textures.
pub mod texture_loader;

pub use error::TextureLoadError;
pub use image_source::{ImageLocation, ImageSource, normalize_url};
pub use texture_loader::{
    ActiveTexture, ImageRequest, LoadImageRequest, LoadStatus, TextureLoadState,
    TextureLoadingPlugin,
};
