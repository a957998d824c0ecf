use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use constants::texture::MAX_DOWNLOAD_BYTES;

use super::error::TextureLoadError;
use crate::engine::core::config::PickerKind;

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLocation {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for ImageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Capability that lets the user choose an image.
///
/// Implementations are picked once at startup and resolved on the IO task
/// pool, so `resolve` may block until the user decides. `Ok(None)` means the
/// user cancelled.
pub trait ImageSource: Send + Sync + 'static {
    fn name(&self) -> &'static str;
    fn resolve(&self) -> Result<Option<ImageLocation>, TextureLoadError>;
}

/// Native open-file dialog.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileDialogSource;

#[cfg(not(target_arch = "wasm32"))]
impl ImageSource for FileDialogSource {
    fn name(&self) -> &'static str {
        "file dialog"
    }

    fn resolve(&self) -> Result<Option<ImageLocation>, TextureLoadError> {
        let dialog = rfd::AsyncFileDialog::new()
            .set_title("Select an image")
            .add_filter("Images", &constants::texture::IMAGE_EXTENSIONS)
            .pick_file();
        let picked = bevy::tasks::block_on(dialog);
        Ok(picked.map(|file| ImageLocation::File(file.path().to_path_buf())))
    }
}

/// Always yields the same location.
pub struct FixedSource(pub ImageLocation);

impl ImageSource for FixedSource {
    fn name(&self) -> &'static str {
        "fixed location"
    }

    fn resolve(&self) -> Result<Option<ImageLocation>, TextureLoadError> {
        Ok(Some(self.0.clone()))
    }
}

/// Stand-in for platforms or configs without an interactive picker.
pub struct NoPicker;

impl ImageSource for NoPicker {
    fn name(&self) -> &'static str {
        "no picker"
    }

    fn resolve(&self) -> Result<Option<ImageLocation>, TextureLoadError> {
        Err(TextureLoadError::Unsupported("interactive image picking"))
    }
}

/// Picker for this platform and config.
pub fn picker_for(kind: PickerKind) -> Arc<dyn ImageSource> {
    match kind {
        PickerKind::Disabled => Arc::new(NoPicker),
        #[cfg(not(target_arch = "wasm32"))]
        PickerKind::Dialog => Arc::new(FileDialogSource),
        #[cfg(target_arch = "wasm32")]
        PickerKind::Dialog => Arc::new(NoPicker),
    }
}

/// Trim the URL and default to https when no scheme is given.
pub fn normalize_url(url: &str) -> Result<String, TextureLoadError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(TextureLoadError::EmptyUrl);
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Ok(format!("https://{url}"))
    }
}

/// Read the raw image bytes. Blocking; run it off the main schedule.
pub fn fetch_bytes(location: &ImageLocation, timeout: Duration) -> Result<Vec<u8>, TextureLoadError> {
    match location {
        ImageLocation::File(path) => fs::read(path).map_err(|source| TextureLoadError::Io {
            path: path.clone(),
            source,
        }),
        ImageLocation::Url(url) => fetch_url(url, timeout),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>, TextureLoadError> {
    let url = normalize_url(url)?;
    let http_error = |err: ureq::Error| TextureLoadError::Http {
        url: url.clone(),
        message: err.to_string(),
    };

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    let agent = ureq::Agent::new_with_config(config);
    let mut response = agent.get(&url).call().map_err(http_error)?;
    response
        .body_mut()
        .with_config()
        .limit(MAX_DOWNLOAD_BYTES)
        .read_to_vec()
        .map_err(http_error)
}

#[cfg(target_arch = "wasm32")]
fn fetch_url(_url: &str, _timeout: Duration) -> Result<Vec<u8>, TextureLoadError> {
    Err(TextureLoadError::Unsupported("URL loading"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_without_scheme_default_to_https() {
        assert_eq!(normalize_url("example.com/a.png").unwrap(), "https://example.com/a.png");
        assert_eq!(normalize_url(" http://x/y.jpg ").unwrap(), "http://x/y.jpg");
        assert!(matches!(normalize_url("   "), Err(TextureLoadError::EmptyUrl)));
    }

    #[test]
    fn fixed_source_resolves_to_its_location() {
        let location = ImageLocation::File(PathBuf::from("decal.png"));
        let source = FixedSource(location.clone());
        assert_eq!(source.resolve().unwrap(), Some(location));
    }

    #[test]
    fn disabled_picker_reports_unsupported() {
        let picker = picker_for(PickerKind::Disabled);
        assert!(matches!(picker.resolve(), Err(TextureLoadError::Unsupported(_))));
    }

    #[test]
    fn reads_file_bytes() {
        let path = std::env::temp_dir().join("decal_editor_fetch_bytes_test.bin");
        fs::write(&path, [1u8, 2, 3]).unwrap();
        let bytes = fetch_bytes(&ImageLocation::File(path.clone()), Duration::from_secs(1)).unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let location = ImageLocation::File(PathBuf::from("no/such/decal.png"));
        let err = fetch_bytes(&location, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, TextureLoadError::Io { .. }));
    }
}
