/// Longest edge a loaded decal image may have before it is downscaled.
pub const MAX_TEXTURE_SIZE: u32 = 2048;

/// Timeout for fetching an image over HTTP(S), in seconds.
pub const URL_TIMEOUT_SECS: u64 = 10;

/// Upper bound on downloaded image bodies.
pub const MAX_DOWNLOAD_BYTES: u64 = 64 * 1024 * 1024;

/// File extensions offered by the image picker.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
