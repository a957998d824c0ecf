use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::RgbaImage;
use image::imageops::FilterType;

use super::error::TextureLoadError;

/// Target size for an image so neither edge exceeds `max_size`.
///
/// With `preserve_aspect` the longer edge becomes `max_size` and the other is
/// scaled by the aspect ratio; otherwise each edge is clamped on its own.
pub fn normalized_dimensions(width: u32, height: u32, max_size: u32, preserve_aspect: bool) -> UVec2 {
    if width <= max_size && height <= max_size {
        return UVec2::new(width, height);
    }
    if !preserve_aspect {
        return UVec2::new(width.min(max_size), height.min(max_size));
    }

    let ratio = width as f32 / height as f32;
    let (w, h) = if width > height {
        (max_size, (max_size as f32 / ratio).round() as u32)
    } else {
        ((max_size as f32 * ratio).round() as u32, max_size)
    };
    UVec2::new(w.max(1), h.max(1))
}

/// Convert to RGBA8 and downscale with a bilinear filter when oversized.
pub fn normalize_image(image: image::DynamicImage, max_size: u32, preserve_aspect: bool) -> RgbaImage {
    let rgba = image.into_rgba8();
    let target = normalized_dimensions(rgba.width(), rgba.height(), max_size, preserve_aspect);
    if target.x == rgba.width() && target.y == rgba.height() {
        return rgba;
    }
    debug!(
        "Resizing decal image {}x{} -> {}x{}",
        rgba.width(),
        rgba.height(),
        target.x,
        target.y
    );
    image::imageops::resize(&rgba, target.x, target.y, FilterType::Triangle)
}

pub fn decode_and_normalize(
    bytes: &[u8],
    max_size: u32,
    preserve_aspect: bool,
) -> Result<RgbaImage, TextureLoadError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(normalize_image(decoded, max_size, preserve_aspect))
}

/// Upload-ready sRGB texture for the render world.
pub fn to_bevy_image(rgba: RgbaImage) -> Image {
    let size = Extent3d {
        width: rgba.width(),
        height: rgba.height(),
        depth_or_array_layers: 1,
    };
    Image::new(
        size,
        TextureDimension::D2,
        rgba.into_raw(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .expect("png encode");
        bytes.into_inner()
    }

    #[test]
    fn small_images_keep_their_size() {
        assert_eq!(normalized_dimensions(640, 480, 2048, true), UVec2::new(640, 480));
        assert_eq!(normalized_dimensions(2048, 2048, 2048, true), UVec2::new(2048, 2048));
    }

    #[test]
    fn landscape_and_portrait_keep_aspect() {
        assert_eq!(normalized_dimensions(4096, 2048, 2048, true), UVec2::new(2048, 1024));
        assert_eq!(normalized_dimensions(1000, 3000, 2048, true), UVec2::new(683, 2048));
        assert_eq!(normalized_dimensions(3000, 3000, 2048, true), UVec2::new(2048, 2048));
    }

    #[test]
    fn extreme_aspect_never_collapses_to_zero() {
        assert_eq!(normalized_dimensions(100_000, 1, 2048, true), UVec2::new(2048, 1));
    }

    #[test]
    fn edges_clamp_independently_without_aspect() {
        assert_eq!(normalized_dimensions(4096, 100, 2048, false), UVec2::new(2048, 100));
    }

    #[test]
    fn decode_downscales_oversized_png() {
        let rgba = decode_and_normalize(&png_bytes(64, 32), 16, true).unwrap();
        assert_eq!((rgba.width(), rgba.height()), (16, 8));
        assert_eq!(rgba.get_pixel(3, 3).0, [200, 10, 10, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_and_normalize(b"not an image", 2048, true).unwrap_err();
        assert!(matches!(err, TextureLoadError::Decode(_)));
    }

    #[test]
    fn bevy_image_matches_pixels() {
        let image = to_bevy_image(RgbaImage::new(3, 2));
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.texture_descriptor.format, TextureFormat::Rgba8UnormSrgb);
    }
}
