/// Multiplier applied to the scroll delta when resizing the selected decal.
pub const SCROLL_SENSITIVITY: f32 = 2.0;

/// Scroll delta produced by one wheel notch (line units).
pub const SCROLL_PER_LINE: f32 = 0.1;

/// Pixels that make up one line for touchpads reporting pixel deltas.
pub const PIXELS_PER_SCROLL_LINE: f32 = 16.0;

/// Maximum ray length for surface hits.
pub const RAYCAST_MAX_DISTANCE: f32 = 100.0;
