//! Decal placement, selection and editing tool.
//!
//! Provides the per-frame controller that turns pointer, wheel and key input
//! into registry operations, the systems that mirror the registry onto render
//! entities, and a native side panel for loading images and clearing decals.
//!
//! ## Frame Flow
//!
//! ```text
//! ButtonInput / MouseWheel / MeshRayCast / decal OBB test
//!   └─> FrameInput
//!       └─> SelectionController::tick()
//!           └─> DecalRegistry (create, select, resize, move, delete)
//!               └─> DecalEvent(DecalNotification)
//!                   └─> sync_decal_visuals()  spawn / update / despawn meshes
//! ```
//!
//! ## Controls
//!
//! - Left click on a surface places the active image and selects it
//! - Left click on a decal selects it
//! - Mouse wheel resizes the selection (the camera dolly is locked meanwhile,
//!   and whenever the pointer is over the panel)
//! - Ctrl + left drag moves the selection across surfaces
//! - Delete / Backspace removes the selection, Escape deselects
//!
//! ## Raycasting
//!
//! Surfaces are hit with Bevy's mesh ray cast filtered to `DecalSurface`.
//! Decals are picked with an oriented box test in decal-local space, and
//! win only when they sit in front of the surface hit.

/// Frame input model and the selection state machine.
pub mod controller;

/// Pointer ray, wheel and key gathering feeding the controller.
pub mod input;

/// UI button and URL field interactions for the decal panel (native only).
pub mod interactions;

/// Ray intersection against decal collision boxes.
///
/// Slab method raycast in decal-local space.
pub mod ray;

/// Resources, events and components of the decal tool.
pub mod state;

/// Mirrors registry changes onto mesh and material entities.
pub mod sync;

/// Decal panel spawning and status reflection (native only).
pub mod ui;

use bevy::prelude::*;

pub use controller::{DecalNotification, FrameInput, PointerHit, SelectionController, SurfaceHit};
pub use state::{DecalEditor, DecalEvent, DecalManagerUiState, DecalVisuals, UrlInputState};
pub use sync::DecalRenderAssets;

use bevy::ui::UiSystem;

use crate::engine::camera::InputCapture;
use input::{capture_input, drive_decal_controller};
use sync::sync_decal_visuals;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecalSet {
    /// Anything that changes the registry and emits `DecalEvent`s.
    Edit,
    /// Render entity synchronisation.
    Sync,
}

// Registers the decal editor resources, systems and panel.
pub struct DecalManagerPlugin;

impl Plugin for DecalManagerPlugin {
    fn build(&self, app: &mut App) {
        app
            // init resources
            .init_resource::<DecalEditor>()
            .init_resource::<DecalVisuals>()
            .init_resource::<DecalRenderAssets>()
            .init_resource::<DecalManagerUiState>()
            .init_resource::<UrlInputState>()
            .init_resource::<InputCapture>()
            .add_event::<DecalEvent>()
            .configure_sets(Update, (DecalSet::Edit, DecalSet::Sync).chain())
            .add_systems(PreUpdate, capture_input.after(UiSystem::Focus))
            .add_systems(
                Update,
                (
                    drive_decal_controller.in_set(DecalSet::Edit),
                    sync_decal_visuals.in_set(DecalSet::Sync),
                ),
            );

        // Panel only for native builds.
        #[cfg(not(target_arch = "wasm32"))]
        {
            use interactions::*;
            use ui::*;

            app.add_systems(Startup, spawn_decal_manager_ui);
            app.add_systems(
                Update,
                (
                    collapse_button_interaction,
                    apply_collapse_state,
                    load_image_button_interaction,
                    load_url_button_interaction,
                    (url_field_interaction, url_field_typing)
                        .chain()
                        .after(DecalSet::Edit),
                    snapshot_button_interaction,
                    (border_width_button_interaction, clear_all_button_interaction)
                        .in_set(DecalSet::Edit),
                    reflect_load_status,
                    reflect_url_field.after(url_field_typing),
                    reflect_selected_decal_label.after(DecalSet::Edit),
                ),
            );
        }
    }
}
