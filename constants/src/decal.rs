/// Smallest uniform scale a decal can be resized to.
pub const MIN_DECAL_SIZE: f32 = 0.05;

/// Largest uniform scale a decal can be resized to.
pub const MAX_DECAL_SIZE: f32 = 1.0;

/// Scale given to a freshly placed decal.
pub const DEFAULT_DECAL_SIZE: f32 = 0.2;

/// Distance a decal is pushed off the surface along the hit normal to avoid z-fighting.
pub const SURFACE_OFFSET: f32 = 0.01;

/// Outline border width in world units at unit scale.
pub const DEFAULT_BORDER_WIDTH: f32 = 0.005;
pub const MIN_BORDER_WIDTH: f32 = 0.001;
pub const MAX_BORDER_WIDTH: f32 = 0.1;

/// Depth of the decal collision box in local space; the quad itself is 1x1.
pub const DECAL_COLLIDER_DEPTH: f32 = 0.1;

/// Local-space offset of the outline behind the decal plane (decal front face is +Z).
pub const OUTLINE_LOCAL_DEPTH: f32 = -0.001;

/// Transparent queue indices. Outline must draw strictly before its decal.
pub const OUTLINE_RENDER_ORDER: i32 = 2999;
pub const DECAL_RENDER_ORDER: i32 = 3001;
pub const TRANSPARENT_QUEUE_BASE: i32 = 3000;

/// Border width change per panel button press.
pub const BORDER_WIDTH_STEP: f32 = 0.0025;
