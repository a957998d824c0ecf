use bevy::prelude::*;

use crate::engine::decal::{ColliderBounds, DecalEntity, DecalId, DecalRegistry};

/// Distance along the ray to a decal's collision box, if it is hit.
pub fn ray_hits_decal(origin: Vec3, dir: Vec3, decal: &DecalEntity) -> Option<f32> {
    ray_hits_obb(origin, dir, decal.transform().to_matrix(), decal.geometry().bounds)
}

pub fn ray_hits_obb(origin: Vec3, dir: Vec3, world_from_local: Mat4, bounds: ColliderBounds) -> Option<f32> {
    let inv = world_from_local.inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = bounds.size * 0.5;
    ray_aabb_hit_t(o_local, d_local, bounds.center - he, bounds.center + he)
}

/// Closest decal under the ray.
pub fn pick_decal(origin: Vec3, dir: Vec3, registry: &DecalRegistry) -> Option<(DecalId, f32)> {
    registry
        .iter()
        .filter_map(|decal| ray_hits_decal(origin, dir, decal).map(|t| (decal.id(), t)))
        .filter(|(_, t)| *t > 0.0)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;
    for axis in 0..3 {
        let (o, i) = (ray_origin[axis], inv[axis]);
        // Parallel to this slab: inside it or a miss.
        if i.is_infinite() {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let (mut t0, mut t1) = ((min[axis] - o) * i, (max[axis] - o) * i);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decal::DecalTexture;

    fn registry_with(points: &[Vec3]) -> (DecalRegistry, Vec<DecalId>) {
        let mut registry = DecalRegistry::default();
        let texture = DecalTexture::new(Handle::default(), UVec2::ONE, "test");
        let ids = points
            .iter()
            .map(|p| registry.create(*p, Vec3::Z, Some(texture.clone()), 0.2).unwrap())
            .collect();
        (registry, ids)
    }

    #[test]
    fn aabb_hit_from_outside_and_inside() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        assert_eq!(ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, min, max), Some(4.0));
        assert_eq!(ray_aabb_hit_t(Vec3::ZERO, Vec3::X, min, max), Some(1.0));
        assert_eq!(ray_aabb_hit_t(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, min, max), None);
        assert_eq!(ray_aabb_hit_t(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z, min, max), None);
    }

    #[test]
    fn picks_decal_through_scaled_box() {
        let (registry, ids) = registry_with(&[Vec3::ZERO]);
        let (id, t) = pick_decal(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, &registry).unwrap();
        assert_eq!(id, ids[0]);
        // Lifted 0.01 off the surface; box half depth is 0.05 * 0.2.
        assert!((t - 4.98).abs() < 1e-4, "t = {t}");

        // Half extent is 0.1 at size 0.2.
        assert!(pick_decal(Vec3::new(0.15, 0.0, 5.0), Vec3::NEG_Z, &registry).is_none());
    }

    #[test]
    fn closest_decal_wins() {
        let (registry, ids) = registry_with(&[Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)]);
        let (id, _) = pick_decal(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, &registry).unwrap();
        assert_eq!(id, ids[1]);

        let (id, _) = pick_decal(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &registry).unwrap();
        assert_eq!(id, ids[0]);
    }
}
