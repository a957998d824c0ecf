use std::fmt;

use bevy::log::{debug, info};
use bevy::math::Vec3;
use constants::decal::DEFAULT_BORDER_WIDTH;

use super::entity::DecalEntity;
use super::error::DecalError;
use super::outline::clamp_border_width;
use super::texture::DecalTexture;

/// Stable identifier of a decal, never reused within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DecalId(pub u64);

impl fmt::Display for DecalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of a `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The decal was already selected; nothing changed.
    Unchanged,
    /// Selection moved to the decal, `previous` was deselected first.
    Selected { previous: Option<DecalId> },
}

/// Owner of every live decal plus the single current selection.
#[derive(Debug, Clone)]
pub struct DecalRegistry {
    decals: Vec<DecalEntity>,
    selected: Option<DecalId>,
    next_id: u64,
    border_width: f32,
}

impl Default for DecalRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BORDER_WIDTH)
    }
}

impl DecalRegistry {
    pub fn new(border_width: f32) -> Self {
        Self {
            decals: Vec::new(),
            selected: None,
            next_id: 1,
            border_width: clamp_border_width(border_width),
        }
    }

    /// Place a new decal. Nothing is added when `texture` is absent.
    pub fn create(
        &mut self,
        position: Vec3,
        normal: Vec3,
        texture: Option<DecalTexture>,
        size: f32,
    ) -> Result<DecalId, DecalError> {
        let texture = texture.ok_or(DecalError::InvalidTexture)?;
        let id = DecalId(self.next_id);
        self.next_id += 1;

        let decal = DecalEntity::new(id, position, normal, texture, size, self.border_width);
        info!(
            "Decal {} created at {} (size {:.3})",
            id,
            decal.transform().translation,
            decal.size()
        );
        self.decals.push(decal);
        Ok(id)
    }

    /// Select `id`, deselecting the previous selection first.
    pub fn select(&mut self, id: DecalId) -> Result<SelectOutcome, DecalError> {
        if self.selected == Some(id) {
            return Ok(SelectOutcome::Unchanged);
        }
        if self.index_of(id).is_none() {
            return Err(DecalError::UnknownDecal(id));
        }

        let previous = self.deselect();
        if let Some(decal) = self.get_mut(id) {
            decal.select();
        }
        self.selected = Some(id);
        debug!("Decal {} selected", id);
        Ok(SelectOutcome::Selected { previous })
    }

    /// Clear the selection, returning the decal that was deselected.
    pub fn deselect(&mut self) -> Option<DecalId> {
        let previous = self.selected.take()?;
        if let Some(decal) = self.get_mut(previous) {
            decal.deselect();
        }
        Some(previous)
    }

    /// Remove and destroy a decal, clearing the selection if it pointed at it.
    pub fn delete(&mut self, id: DecalId) -> Result<(), DecalError> {
        let index = self.index_of(id).ok_or(DecalError::UnknownDecal(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        let removed = self.decals.remove(index).destroy();
        info!("Decal {} deleted", removed);
        Ok(())
    }

    /// Destroy every decal, returning their ids in creation order.
    pub fn clear_all(&mut self) -> Vec<DecalId> {
        self.selected = None;
        let removed: Vec<DecalId> = self.decals.drain(..).map(DecalEntity::destroy).collect();
        info!("Cleared {} decals", removed.len());
        removed
    }

    /// Resize the selected decal. `None` when nothing is selected.
    pub fn resize_selected(&mut self, size: f32) -> Option<(DecalId, f32)> {
        let decal = self.selected_mut()?;
        let applied = decal.resize(size);
        Some((decal.id(), applied))
    }

    /// Move the selected decal onto a surface point. `None` when nothing is selected.
    pub fn move_selected(&mut self, position: Vec3, normal: Vec3) -> Option<DecalId> {
        let decal = self.selected_mut()?;
        decal.place(position, normal);
        Some(decal.id())
    }

    /// Change the border width for new decals and every existing outline.
    /// Returns the applied width and the decals whose outline was rebuilt.
    pub fn set_border_width(&mut self, border_width: f32) -> (f32, Vec<DecalId>) {
        let border_width = clamp_border_width(border_width);
        self.border_width = border_width;
        let rebuilt = self
            .decals
            .iter_mut()
            .filter_map(|decal| {
                decal.set_border_width(border_width);
                decal.outline().map(|_| decal.id())
            })
            .collect();
        info!("Outline border width set to {border_width:.4}");
        (border_width, rebuilt)
    }

    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    pub fn get(&self, id: DecalId) -> Option<&DecalEntity> {
        self.decals.iter().find(|d| d.id() == id)
    }

    pub fn get_mut(&mut self, id: DecalId) -> Option<&mut DecalEntity> {
        self.decals.iter_mut().find(|d| d.id() == id)
    }

    pub fn selected_id(&self) -> Option<DecalId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&DecalEntity> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut DecalEntity> {
        let id = self.selected?;
        self.get_mut(id)
    }

    /// Decals in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &DecalEntity> {
        self.decals.iter()
    }

    pub fn len(&self) -> usize {
        self.decals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decals.is_empty()
    }

    fn index_of(&self, id: DecalId) -> Option<usize> {
        self.decals.iter().position(|d| d.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::{Handle, UVec2};
    use constants::decal::{MAX_BORDER_WIDTH, MIN_BORDER_WIDTH};

    fn texture() -> Option<DecalTexture> {
        Some(DecalTexture::new(Handle::default(), UVec2::new(8, 8), "test"))
    }

    fn registry_with(count: usize) -> (DecalRegistry, Vec<DecalId>) {
        let mut registry = DecalRegistry::default();
        let ids = (0..count)
            .map(|i| {
                registry
                    .create(Vec3::new(i as f32, 0.0, 0.0), Vec3::Z, texture(), 0.2)
                    .expect("texture present")
            })
            .collect();
        (registry, ids)
    }

    #[test]
    fn create_without_texture_is_rejected() {
        let (mut registry, _) = registry_with(2);
        let result = registry.create(Vec3::ZERO, Vec3::Y, None, 0.2);
        assert_eq!(result, Err(DecalError::InvalidTexture));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn creation_order_is_preserved() {
        let (registry, ids) = registry_with(3);
        let order: Vec<_> = registry.iter().map(DecalEntity::id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn at_most_one_selection() {
        let (mut registry, ids) = registry_with(2);
        let (a, b) = (ids[0], ids[1]);

        registry.select(a).unwrap();
        assert_eq!(
            registry.select(b),
            Ok(SelectOutcome::Selected { previous: Some(a) })
        );

        assert!(!registry.get(a).unwrap().is_selected());
        assert!(registry.get(b).unwrap().is_selected());
        assert_eq!(registry.iter().filter(|d| d.is_selected()).count(), 1);
        assert_eq!(registry.selected_id(), Some(b));
    }

    #[test]
    fn selecting_current_selection_is_a_no_op() {
        let (mut registry, ids) = registry_with(1);
        registry.select(ids[0]).unwrap();
        assert_eq!(registry.select(ids[0]), Ok(SelectOutcome::Unchanged));
        assert!(registry.get(ids[0]).unwrap().is_selected());
    }

    #[test]
    fn selecting_unknown_id_keeps_selection() {
        let (mut registry, ids) = registry_with(1);
        registry.select(ids[0]).unwrap();
        assert_eq!(
            registry.select(DecalId(99)),
            Err(DecalError::UnknownDecal(DecalId(99)))
        );
        assert_eq!(registry.selected_id(), Some(ids[0]));
    }

    #[test]
    fn deleting_selection_clears_it_and_later_edits_are_ignored() {
        let (mut registry, ids) = registry_with(2);
        registry.select(ids[1]).unwrap();
        registry.delete(ids[1]).unwrap();

        assert_eq!(registry.selected_id(), None);
        assert!(registry.selected().is_none());
        assert_eq!(registry.resize_selected(0.5), None);
        assert_eq!(registry.move_selected(Vec3::ONE, Vec3::Y), None);
        assert_eq!(registry.get(ids[0]).unwrap().size(), 0.2);
    }

    #[test]
    fn deleting_other_decal_keeps_selection() {
        let (mut registry, ids) = registry_with(2);
        registry.select(ids[0]).unwrap();
        registry.delete(ids[1]).unwrap();
        assert_eq!(registry.selected_id(), Some(ids[0]));
        assert_eq!(registry.delete(ids[1]), Err(DecalError::UnknownDecal(ids[1])));
    }

    #[test]
    fn clear_all_empties_registry() {
        let (mut registry, ids) = registry_with(3);
        registry.select(ids[2]).unwrap();
        assert_eq!(registry.clear_all(), ids);
        assert!(registry.is_empty());
        assert_eq!(registry.selected_id(), None);
    }

    #[test]
    fn ids_are_not_reused() {
        let (mut registry, ids) = registry_with(1);
        registry.delete(ids[0]).unwrap();
        let next = registry.create(Vec3::ZERO, Vec3::Z, texture(), 0.2).unwrap();
        assert_ne!(next, ids[0]);
    }

    #[test]
    fn resize_selected_clamps() {
        let (mut registry, ids) = registry_with(1);
        registry.select(ids[0]).unwrap();
        assert_eq!(registry.resize_selected(7.0), Some((ids[0], 1.0)));
        assert_eq!(registry.resize_selected(-1.0), Some((ids[0], 0.05)));
    }

    #[test]
    fn border_width_change_rebuilds_existing_outlines() {
        let (mut registry, ids) = registry_with(3);
        registry.select(ids[0]).unwrap();
        registry.select(ids[1]).unwrap();

        let (applied, rebuilt) = registry.set_border_width(0.02);
        assert_eq!(applied, 0.02);
        assert_eq!(registry.border_width(), 0.02);
        // ids[2] was never selected, so it has no outline yet.
        assert_eq!(rebuilt, vec![ids[0], ids[1]]);

        let mut fresh = DecalRegistry::new(0.02);
        let fresh_id = fresh.create(Vec3::new(1.0, 0.0, 0.0), Vec3::Z, texture(), 0.2).unwrap();
        fresh.select(fresh_id).unwrap();
        assert_eq!(
            registry.get(ids[1]).and_then(DecalEntity::outline).map(|o| *o.vertices()),
            fresh.get(fresh_id).and_then(DecalEntity::outline).map(|o| *o.vertices())
        );

        registry.select(ids[2]).unwrap();
        assert_eq!(registry.selected().and_then(DecalEntity::outline).map(|o| o.border_width()), Some(0.02));
    }

    #[test]
    fn border_width_is_clamped() {
        let mut registry = DecalRegistry::default();
        assert_eq!(registry.set_border_width(5.0).0, MAX_BORDER_WIDTH);
        assert_eq!(registry.set_border_width(0.0).0, MIN_BORDER_WIDTH);
        assert_eq!(registry.set_border_width(f32::NAN).0, MIN_BORDER_WIDTH);
    }

    #[test]
    fn shared_texture_handle_is_reused() {
        let (registry, _) = registry_with(2);
        let handles: Vec<_> = registry.iter().map(|d| d.texture().image.id()).collect();
        assert_eq!(handles[0], handles[1]);
    }
}
