//! Shared tuning values for the decal editor.

pub mod decal;
pub mod input;
pub mod render_settings;
pub mod texture;
