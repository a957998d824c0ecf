use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("download of {url} failed: {message}")]
    Http { url: String, message: String },
    #[error("image could not be decoded: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image URL is empty")]
    EmptyUrl,
    #[error("{0} is not available on this platform")]
    Unsupported(&'static str),
    #[error("another image is still loading")]
    Busy,
    #[error("image load was interrupted")]
    Interrupted,
}
