//! Core application setup and configuration.
//!
//! Handles plugin initialisation, window configuration and the editor config
//! file for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Loads the editor config and wires texture loading, the demo scene,
/// snapshots and the decal tool together.
pub mod app_setup;

/// Editor settings read from `decal_editor.json`.
pub mod config;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
