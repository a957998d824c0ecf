use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use constants::decal::{DEFAULT_BORDER_WIDTH, DEFAULT_DECAL_SIZE};
use constants::input::SCROLL_SENSITIVITY;
use constants::texture::{MAX_TEXTURE_SIZE, URL_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "decal_editor.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Which image source provider backs the "Load Image" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerKind {
    /// Native open-file dialog.
    #[default]
    Dialog,
    /// No interactive picker; only configured paths and URLs load.
    Disabled,
}

/// Editor settings. Every field falls back to its default when omitted.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub default_decal_size: f32,
    pub border_width: f32,
    pub scroll_sensitivity: f32,
    pub max_texture_size: u32,
    pub preserve_aspect_ratio: bool,
    pub url_timeout_secs: u64,
    pub picker: PickerKind,
    /// Image loaded on startup, as a file path.
    pub startup_image: Option<PathBuf>,
    /// Image URL bound to the "Load URL" button.
    pub image_url: Option<String>,
    pub snapshot_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_decal_size: DEFAULT_DECAL_SIZE,
            border_width: DEFAULT_BORDER_WIDTH,
            scroll_sensitivity: SCROLL_SENSITIVITY,
            max_texture_size: MAX_TEXTURE_SIZE,
            preserve_aspect_ratio: true,
            url_timeout_secs: URL_TIMEOUT_SECS,
            picker: PickerKind::default(),
            startup_image: None,
            image_url: None,
            snapshot_dir: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the config at `path`. `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json).map(Some)
    }

    /// Config used by the app: the file if present and valid, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(config)) => {
                info!("Loaded editor config from {}", path.display());
                config
            }
            Ok(None) => Self::default(),
            Err(err) => {
                warn!("{err}; using default editor config");
                Self::default()
            }
        }
    }
}
