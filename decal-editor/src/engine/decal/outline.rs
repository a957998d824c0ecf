use bevy::math::Vec3;
use constants::decal::{
    MAX_BORDER_WIDTH, MIN_BORDER_WIDTH, OUTLINE_LOCAL_DEPTH, OUTLINE_RENDER_ORDER,
};

use super::geometry::{QUAD_CORNERS, QuadMesh};

/// Expand the quad so the border keeps a constant world-space thickness.
///
/// The outline is drawn at its parent's scale, so the expansion is divided by
/// that scale. Only x and y grow; z is left unchanged.
pub fn expand_outline(base: &[Vec3; 4], border_width: f32, current_scale: f32) -> [Vec3; 4] {
    let expand_amount = border_width / current_scale;
    base.map(|v| Vec3::new(v.x * (1.0 + expand_amount), v.y * (1.0 + expand_amount), v.z))
}

pub fn clamp_border_width(border_width: f32) -> f32 {
    if border_width.is_nan() {
        return MIN_BORDER_WIDTH;
    }
    border_width.clamp(MIN_BORDER_WIDTH, MAX_BORDER_WIDTH)
}

/// Selection indicator drawn behind a decal.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlineGeometry {
    base: [Vec3; 4],
    border_width: f32,
    mesh: QuadMesh,
    visible: bool,
}

impl OutlineGeometry {
    /// Hidden outline built from the unit quad, already sized for `current_scale`.
    pub fn new(border_width: f32, current_scale: f32) -> Self {
        let mut outline = Self {
            base: QUAD_CORNERS,
            border_width: clamp_border_width(border_width),
            mesh: QuadMesh::unit(),
            visible: false,
        };
        outline.update(QUAD_CORNERS, border_width, current_scale);
        outline
    }

    /// Recompute the expanded vertices from `base_vertices`.
    pub fn update(&mut self, base_vertices: [Vec3; 4], border_width: f32, current_scale: f32) {
        self.base = base_vertices;
        self.border_width = clamp_border_width(border_width);
        self.mesh = QuadMesh::from_positions(expand_outline(
            &self.base,
            self.border_width,
            current_scale,
        ));
    }

    /// Recompute for a new parent scale with the current base and border.
    pub fn rescale(&mut self, current_scale: f32) {
        self.update(self.base, self.border_width, current_scale);
    }

    pub fn vertices(&self) -> &[Vec3; 4] {
        &self.mesh.positions
    }

    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn render_order(&self) -> i32 {
        OUTLINE_RENDER_ORDER
    }

    /// Offset from the decal origin in the decal's local space.
    pub fn local_offset(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, OUTLINE_LOCAL_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::decal::DECAL_RENDER_ORDER;

    #[test]
    fn expansion_matches_reference_values() {
        let base = [Vec3::new(0.5, 0.5, 0.0); 4];
        let expanded = expand_outline(&base, 0.005, 0.2);
        assert!(expanded[0].abs_diff_eq(Vec3::new(0.5125, 0.5125, 0.0), 1e-6));
    }

    #[test]
    fn z_is_untouched() {
        let base = [Vec3::new(-0.5, 0.5, 0.3); 4];
        let expanded = expand_outline(&base, 0.05, 0.1);
        assert_eq!(expanded[0].z, 0.3);
        assert!(expanded[0].x < -0.5 && expanded[0].y > 0.5);
    }

    #[test]
    fn world_border_thickness_is_scale_independent() {
        for scale in [0.05, 0.2, 0.7, 1.0] {
            let outline = OutlineGeometry::new(0.01, scale);
            let world_half_width = outline.vertices()[3].x * scale;
            assert!((world_half_width - (0.5 * scale + 0.5 * 0.01)).abs() < 1e-6);
        }
    }

    #[test]
    fn outline_draws_before_decal() {
        let outline = OutlineGeometry::new(0.005, 0.2);
        assert!(outline.render_order() < DECAL_RENDER_ORDER);
        assert!(outline.local_offset().z < 0.0);
        assert!(!outline.is_visible());
    }

    #[test]
    fn border_width_is_clamped() {
        let outline = OutlineGeometry::new(5.0, 1.0);
        assert_eq!(outline.border_width(), MAX_BORDER_WIDTH);
    }
}
