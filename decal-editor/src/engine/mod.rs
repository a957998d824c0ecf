pub mod camera;
pub mod core;
pub mod decal;
pub mod loading;
pub mod scene;
pub mod snapshot;
