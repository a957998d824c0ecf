use bevy::math::{Vec2, Vec3};
use constants::decal::{DECAL_COLLIDER_DEPTH, MAX_DECAL_SIZE, MIN_DECAL_SIZE};

/// Corners of the unit quad in local space: bottom-left, bottom-right, top-left, top-right.
pub const QUAD_CORNERS: [Vec3; 4] = [
    Vec3::new(-0.5, -0.5, 0.0),
    Vec3::new(0.5, -0.5, 0.0),
    Vec3::new(-0.5, 0.5, 0.0),
    Vec3::new(0.5, 0.5, 0.0),
];

/// Two counter-clockwise triangles sharing the 1-2 diagonal; front face is +Z.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// Texture corner nearest to each quad corner. UV origin is the top-left of the image.
pub const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
];

/// Clamp a requested decal size into `[MIN_DECAL_SIZE, MAX_DECAL_SIZE]`.
///
/// NaN collapses to the minimum so the stored scale is always in range.
pub fn clamp_decal_size(size: f32) -> f32 {
    if size.is_nan() {
        return MIN_DECAL_SIZE;
    }
    size.clamp(MIN_DECAL_SIZE, MAX_DECAL_SIZE)
}

/// Planar quad as handed to the render layer.
#[derive(Clone, Debug, PartialEq)]
pub struct QuadMesh {
    pub positions: [Vec3; 4],
    pub normals: [Vec3; 4],
    pub uvs: [Vec2; 4],
    pub indices: [u32; 6],
}

impl QuadMesh {
    pub fn from_positions(positions: [Vec3; 4]) -> Self {
        Self {
            positions,
            normals: [Vec3::Z; 4],
            uvs: QUAD_UVS,
            indices: QUAD_INDICES,
        }
    }

    pub fn unit() -> Self {
        Self::from_positions(QUAD_CORNERS)
    }

    pub fn position_array(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }

    pub fn normal_array(&self) -> Vec<[f32; 3]> {
        self.normals.iter().map(|n| n.to_array()).collect()
    }

    pub fn uv_array(&self) -> Vec<[f32; 2]> {
        self.uvs.iter().map(|uv| uv.to_array()).collect()
    }
}

/// Local-space collision box of a decal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderBounds {
    pub center: Vec3,
    pub size: Vec3,
}

/// Mesh and collision bounds of a decal, defined once in local space.
///
/// Resizing never touches these vertices; only the owning transform's scale changes.
#[derive(Clone, Debug, PartialEq)]
pub struct DecalGeometry {
    pub mesh: QuadMesh,
    pub bounds: ColliderBounds,
}

impl DecalGeometry {
    /// Build the unit quad and return it together with the clamped initial scale.
    pub fn build(size: f32) -> (Self, f32) {
        let geometry = Self {
            mesh: QuadMesh::unit(),
            bounds: ColliderBounds {
                center: Vec3::ZERO,
                size: Vec3::new(1.0, 1.0, DECAL_COLLIDER_DEPTH),
            },
        };
        (geometry, clamp_decal_size(size))
    }
}
