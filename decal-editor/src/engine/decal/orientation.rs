use bevy::log::debug;
use bevy::math::{Mat3, Quat, Vec3};

use super::error::DecalError;

/// World up used to roll decals upright.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Secondary up reference when the surface normal is parallel to `WORLD_UP`.
pub const FALLBACK_UP: Vec3 = Vec3::NEG_Z;

/// Rotation whose local -Z (forward) points along `forward`, local +Y as close
/// to `up` as possible.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Result<Quat, DecalError> {
    let back = -forward.try_normalize().ok_or(DecalError::DegenerateOrientation)?;
    let right = up
        .cross(back)
        .try_normalize()
        .ok_or(DecalError::DegenerateOrientation)?;
    let up = back.cross(right);
    Ok(Quat::from_mat3(&Mat3::from_cols(right, up, back)))
}

/// Normalised surface normal; zero or non-finite normals fall back to world up.
pub fn surface_normal(normal: Vec3) -> Vec3 {
    normal.try_normalize().unwrap_or(WORLD_UP)
}

/// Orientation of a decal lying on a surface: forward = -normal, up = world up.
///
/// Never produces NaN: a normal parallel to world up is rolled against
/// `FALLBACK_UP` instead.
pub fn surface_orientation(normal: Vec3) -> Quat {
    let normal = surface_normal(normal);
    match look_rotation(-normal, WORLD_UP) {
        Ok(rotation) => rotation,
        Err(err) => {
            debug!("{err}; using fallback up reference for normal {normal}");
            look_rotation(-normal, FALLBACK_UP).unwrap_or(Quat::IDENTITY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decal_front_faces_along_normal() {
        let normal = Vec3::new(1.0, 0.0, 0.0);
        let rotation = surface_orientation(normal);
        assert!((rotation * Vec3::Z).abs_diff_eq(normal, 1e-5));
        assert!((rotation * Vec3::NEG_Z).abs_diff_eq(-normal, 1e-5));
        assert!((rotation * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn strict_builder_rejects_normal_parallel_to_up() {
        assert_eq!(
            look_rotation(Vec3::NEG_Y, WORLD_UP),
            Err(DecalError::DegenerateOrientation)
        );
        assert_eq!(
            look_rotation(Vec3::ZERO, WORLD_UP),
            Err(DecalError::DegenerateOrientation)
        );
    }

    #[test]
    fn floor_and_ceiling_normals_use_fallback_up() {
        for normal in [Vec3::Y, Vec3::NEG_Y, Vec3::new(0.0, 3.0, 0.0)] {
            let rotation = surface_orientation(normal);
            assert!(rotation.is_finite());
            assert!(rotation.is_normalized());
            assert!((rotation * Vec3::Z).abs_diff_eq(normal.normalize(), 1e-5));
        }
        let floor = surface_orientation(Vec3::Y);
        assert!((floor * Vec3::Y).abs_diff_eq(FALLBACK_UP, 1e-5));
    }

    #[test]
    fn invalid_normal_is_treated_as_world_up() {
        assert_eq!(surface_normal(Vec3::ZERO), WORLD_UP);
        assert_eq!(surface_normal(Vec3::splat(f32::NAN)), WORLD_UP);
        assert!(surface_orientation(Vec3::ZERO).is_finite());
    }
}
