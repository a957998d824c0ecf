//! Interactive decal placement editor built on Bevy.

pub mod engine;
pub mod tools;

pub use engine::core::app_setup::create_app;
