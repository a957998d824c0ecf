/// Fly camera with mouse look, keyboard movement and wheel dolly.
pub mod viewport_camera;

pub use viewport_camera::{InputCapture, ViewportCamera, camera_controller};
