use bevy::math::{Mat4, Quat, Vec3};
use constants::decal::{DECAL_RENDER_ORDER, SURFACE_OFFSET};

use super::geometry::{DecalGeometry, QUAD_CORNERS, clamp_decal_size};
use super::orientation::{surface_normal, surface_orientation};
use super::outline::OutlineGeometry;
use super::registry::DecalId;
use super::texture::DecalTexture;

/// Selection state of a single decal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected,
}

/// World placement of a decal: uniform scale, orientation from the surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl DecalTransform {
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.translation)
    }
}

/// A placed decal with its geometry, outline and selection state.
#[derive(Debug, Clone)]
pub struct DecalEntity {
    id: DecalId,
    geometry: DecalGeometry,
    outline: Option<OutlineGeometry>,
    transform: DecalTransform,
    texture: DecalTexture,
    state: SelectionState,
    border_width: f32,
}

impl DecalEntity {
    pub fn new(
        id: DecalId,
        position: Vec3,
        normal: Vec3,
        texture: DecalTexture,
        size: f32,
        border_width: f32,
    ) -> Self {
        let (geometry, scale) = DecalGeometry::build(size);
        let mut entity = Self {
            id,
            geometry,
            outline: None,
            transform: DecalTransform {
                translation: position,
                rotation: Quat::IDENTITY,
                scale,
            },
            texture,
            state: SelectionState::Unselected,
            border_width,
        };
        entity.place(position, normal);
        entity
    }

    /// Move onto a surface point, lifted off the surface along its normal.
    pub fn place(&mut self, position: Vec3, normal: Vec3) {
        let normal = surface_normal(normal);
        self.transform.translation = position + normal * SURFACE_OFFSET;
        self.transform.rotation = surface_orientation(normal);
    }

    /// Clamp and apply a new uniform scale, returning the stored value.
    pub fn resize(&mut self, size: f32) -> f32 {
        self.transform.scale = clamp_decal_size(size);
        if self.is_selected() {
            self.refresh_outline();
        }
        self.transform.scale
    }

    pub fn select(&mut self) {
        let scale = self.transform.scale;
        let border_width = self.border_width;
        let outline = self
            .outline
            .get_or_insert_with(|| OutlineGeometry::new(border_width, scale));
        outline.update(QUAD_CORNERS, border_width, scale);
        outline.set_visible(true);
        self.state = SelectionState::Selected;
    }

    pub fn deselect(&mut self) {
        if let Some(outline) = self.outline.as_mut() {
            outline.set_visible(false);
        }
        self.state = SelectionState::Unselected;
    }

    /// Change the outline border width; a visible outline is rebuilt immediately.
    pub fn set_border_width(&mut self, border_width: f32) {
        self.border_width = border_width;
        if let Some(outline) = self.outline.as_mut() {
            outline.update(QUAD_CORNERS, border_width, self.transform.scale);
        }
    }

    /// Release geometry, outline and the texture reference.
    pub fn destroy(self) -> DecalId {
        self.id
    }

    fn refresh_outline(&mut self) {
        if let Some(outline) = self.outline.as_mut() {
            outline.rescale(self.transform.scale);
        }
    }

    pub fn id(&self) -> DecalId {
        self.id
    }

    pub fn size(&self) -> f32 {
        self.transform.scale
    }

    pub fn transform(&self) -> &DecalTransform {
        &self.transform
    }

    pub fn geometry(&self) -> &DecalGeometry {
        &self.geometry
    }

    pub fn outline(&self) -> Option<&OutlineGeometry> {
        self.outline.as_ref()
    }

    pub fn texture(&self) -> &DecalTexture {
        &self.texture
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        self.state == SelectionState::Selected
    }

    pub fn render_order(&self) -> i32 {
        DECAL_RENDER_ORDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::{Handle, UVec2};
    use constants::decal::{DEFAULT_BORDER_WIDTH, MIN_DECAL_SIZE};

    fn decal(size: f32) -> DecalEntity {
        let texture = DecalTexture::new(Handle::default(), UVec2::new(4, 4), "test");
        DecalEntity::new(DecalId(1), Vec3::ZERO, Vec3::Z, texture, size, DEFAULT_BORDER_WIDTH)
    }

    #[test]
    fn starts_unselected_without_outline() {
        let decal = decal(0.2);
        assert_eq!(decal.state(), SelectionState::Unselected);
        assert!(decal.outline().is_none());
    }

    #[test]
    fn placement_offsets_along_normal() {
        let mut decal = decal(0.2);
        decal.place(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 2.0));
        let t = decal.transform();
        assert!(t.translation.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0 + SURFACE_OFFSET), 1e-6));
        assert!((t.rotation * Vec3::NEG_Z).abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn select_builds_visible_outline_and_deselect_hides_it() {
        let mut decal = decal(0.2);
        decal.select();
        assert!(decal.outline().is_some_and(OutlineGeometry::is_visible));
        decal.deselect();
        let outline = decal.outline().expect("outline kept after deselect");
        assert!(!outline.is_visible());
        assert_eq!(decal.state(), SelectionState::Unselected);
    }

    #[test]
    fn reselect_reproduces_outline() {
        let mut once = decal(0.3);
        once.select();

        let mut cycled = decal(0.3);
        cycled.select();
        cycled.deselect();
        cycled.select();

        assert_eq!(once.outline(), cycled.outline());
    }

    #[test]
    fn resize_while_selected_refreshes_outline() {
        let mut resized = decal(0.2);
        resized.select();
        resized.resize(0.6);

        let mut fresh = decal(0.6);
        fresh.select();
        assert_eq!(resized.outline().map(|o| *o.vertices()), fresh.outline().map(|o| *o.vertices()));
    }

    #[test]
    fn resize_does_not_touch_mesh_vertices() {
        let mut decal = decal(0.2);
        let before = decal.geometry().clone();
        assert_eq!(decal.resize(0.01), MIN_DECAL_SIZE);
        assert_eq!(decal.geometry(), &before);
    }

    #[test]
    fn deselected_outline_catches_up_on_next_select() {
        let mut decal = decal(0.2);
        decal.select();
        decal.deselect();
        decal.resize(0.8);
        decal.select();

        let mut fresh = self::decal(0.8);
        fresh.select();
        assert_eq!(decal.outline(), fresh.outline());
    }
}
