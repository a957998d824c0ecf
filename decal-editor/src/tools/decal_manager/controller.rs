use bevy::log::warn;
use bevy::math::Vec3;
use constants::decal::DEFAULT_DECAL_SIZE;
use constants::input::SCROLL_SENSITIVITY;

use crate::engine::decal::{DecalId, DecalRegistry, DecalTexture, SelectOutcome};

/// Point on a placeable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    pub normal: Vec3,
}

/// What the pointer ray found this frame.
///
/// `decal` is set when the ray reaches a decal before the surface behind it;
/// `surface` is the model hit used for placement and moves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerHit {
    pub decal: Option<DecalId>,
    pub surface: Option<SurfaceHit>,
}

/// Input snapshot for one frame. Only the latest frame is ever examined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub pointer_pressed: bool,
    pub pointer_held: bool,
    pub pointer_over_ui: bool,
    pub hit: Option<PointerHit>,
    pub scroll_delta: f32,
    pub modifier_held: bool,
    pub delete_pressed: bool,
    pub cancel_pressed: bool,
}

/// Registry changes reported back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum DecalNotification {
    Created(DecalId),
    Selected(DecalId),
    Deselected(DecalId),
    Moved(DecalId),
    Resized { id: DecalId, size: f32 },
    Deleted(DecalId),
    Cleared(Vec<DecalId>),
    /// Outline border width changed; `ids` are the decals whose outline was rebuilt.
    OutlinesChanged { border_width: f32, ids: Vec<DecalId> },
}

/// Maps per-frame pointer and key input onto registry operations.
#[derive(Debug, Clone, Copy)]
pub struct SelectionController {
    pub default_size: f32,
    pub scroll_sensitivity: f32,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_DECAL_SIZE,
            scroll_sensitivity: SCROLL_SENSITIVITY,
        }
    }
}

impl SelectionController {
    pub fn new(default_size: f32, scroll_sensitivity: f32) -> Self {
        Self {
            default_size,
            scroll_sensitivity,
        }
    }

    /// Run one frame of the decision table against `registry`.
    pub fn tick(
        &self,
        registry: &mut DecalRegistry,
        input: &FrameInput,
        texture: Option<&DecalTexture>,
    ) -> Vec<DecalNotification> {
        let mut out = Vec::new();

        if input.pointer_pressed && !input.pointer_over_ui {
            if let Some(hit) = input.hit {
                self.handle_press(registry, hit, texture, &mut out);
            }
        }

        if input.scroll_delta != 0.0 {
            if let Some(size) = registry.selected().map(|d| d.size()) {
                let target = size * (1.0 + input.scroll_delta * self.scroll_sensitivity);
                if let Some((id, size)) = registry.resize_selected(target) {
                    out.push(DecalNotification::Resized { id, size });
                }
            }
        }

        if input.modifier_held && input.pointer_held && !input.pointer_over_ui {
            if let Some(surface) = input.hit.and_then(|hit| hit.surface) {
                if let Some(id) = registry.move_selected(surface.point, surface.normal) {
                    out.push(DecalNotification::Moved(id));
                }
            }
        }

        if input.delete_pressed {
            if let Some(id) = registry.selected_id() {
                if registry.delete(id).is_ok() {
                    out.push(DecalNotification::Deleted(id));
                }
            }
        }

        if input.cancel_pressed {
            if let Some(id) = registry.deselect() {
                out.push(DecalNotification::Deselected(id));
            }
        }

        out
    }

    fn handle_press(
        &self,
        registry: &mut DecalRegistry,
        hit: PointerHit,
        texture: Option<&DecalTexture>,
        out: &mut Vec<DecalNotification>,
    ) {
        if let Some(id) = hit.decal {
            select_into(registry, id, out);
            return;
        }

        let (Some(surface), Some(texture)) = (hit.surface, texture) else {
            return;
        };

        match registry.create(
            surface.point,
            surface.normal,
            Some(texture.clone()),
            self.default_size,
        ) {
            Ok(id) => {
                out.push(DecalNotification::Created(id));
                select_into(registry, id, out);
            }
            Err(err) => warn!("Decal placement rejected: {err}"),
        }
    }
}

/// Apply a new outline border width to the registry and report the rebuilt outlines.
pub fn change_border_width(registry: &mut DecalRegistry, border_width: f32) -> DecalNotification {
    let (border_width, ids) = registry.set_border_width(border_width);
    DecalNotification::OutlinesChanged { border_width, ids }
}

fn select_into(registry: &mut DecalRegistry, id: DecalId, out: &mut Vec<DecalNotification>) {
    match registry.select(id) {
        Ok(SelectOutcome::Selected { previous }) => {
            if let Some(previous) = previous {
                out.push(DecalNotification::Deselected(previous));
            }
            out.push(DecalNotification::Selected(id));
        }
        Ok(SelectOutcome::Unchanged) => {}
        Err(err) => warn!("Decal selection rejected: {err}"),
    }
}
