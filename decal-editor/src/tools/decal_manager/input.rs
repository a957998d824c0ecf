use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::input::{PIXELS_PER_SCROLL_LINE, RAYCAST_MAX_DISTANCE, SCROLL_PER_LINE};

use super::controller::{FrameInput, PointerHit, SurfaceHit};
use super::ray::pick_decal;
use super::state::{DecalEditor, DecalEvent, DecalSurface, UrlInputState};
use crate::engine::camera::InputCapture;
use crate::engine::decal::{DecalId, DecalRegistry};
use crate::engine::loading::ActiveTexture;

const MODIFIER_KEYS: [KeyCode; 2] = [KeyCode::ControlLeft, KeyCode::ControlRight];
const DELETE_KEYS: [KeyCode; 2] = [KeyCode::Delete, KeyCode::Backspace];

/// Scroll notches from a wheel event, in line units.
pub fn scroll_amount(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => event.y * SCROLL_PER_LINE,
        MouseScrollUnit::Pixel => event.y / PIXELS_PER_SCROLL_LINE * SCROLL_PER_LINE,
    }
}

/// True while any UI node reports the pointer over or pressing it.
pub fn ui_captures_pointer<'a>(interactions: impl IntoIterator<Item = &'a Interaction>) -> bool {
    interactions
        .into_iter()
        .any(|interaction| *interaction != Interaction::None)
}

// Runs after UI focus so the camera sees this frame's panel hover
pub fn capture_input(
    editor: Res<DecalEditor>,
    url_input: Res<UrlInputState>,
    interactions: Query<&Interaction, With<Node>>,
    mut capture: ResMut<InputCapture>,
) {
    let next = InputCapture {
        lock_zoom_this_frame: editor.registry.selected_id().is_some()
            || ui_captures_pointer(&interactions),
        lock_keys_this_frame: url_input.focused,
    };
    capture.set_if_neq(next);
}

/// Combine a decal hit and a surface hit into what the pointer is over.
///
/// A decal counts only when it sits in front of the surface behind it.
pub fn resolve_pointer_hit(
    decal: Option<(DecalId, f32)>,
    surface: Option<(SurfaceHit, f32)>,
) -> Option<PointerHit> {
    let decal = match (decal, surface) {
        (Some((id, t)), Some((_, surface_t))) if t <= surface_t => Some(id),
        (Some((id, _)), None) => Some(id),
        _ => None,
    };
    let surface = surface.map(|(hit, _)| hit);
    (decal.is_some() || surface.is_some()).then_some(PointerHit { decal, surface })
}

fn cast_pointer(
    ray: Ray3d,
    registry: &DecalRegistry,
    ray_cast: &mut MeshRayCast,
    surfaces: &Query<(), With<DecalSurface>>,
) -> Option<PointerHit> {
    let origin = ray.origin;
    let dir = ray.direction.as_vec3();

    let filter = |entity: Entity| surfaces.contains(entity);
    let settings = MeshRayCastSettings::default().with_filter(&filter);
    let surface = ray_cast
        .cast_ray(ray, &settings)
        .first()
        .filter(|(_, hit)| hit.distance <= RAYCAST_MAX_DISTANCE)
        .map(|(_, hit)| {
            (
                SurfaceHit {
                    point: hit.point,
                    normal: hit.normal,
                },
                hit.distance,
            )
        });

    let decal = pick_decal(origin, dir, registry).filter(|(_, t)| *t <= RAYCAST_MAX_DISTANCE);
    resolve_pointer_hit(decal, surface)
}

// Gathers this frame's pointer, wheel and key state and runs the controller
pub fn drive_decal_controller(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    interactions: Query<&Interaction, With<Node>>,
    surfaces: Query<(), With<DecalSurface>>,
    mut ray_cast: MeshRayCast,
    texture: Res<ActiveTexture>,
    capture: Res<InputCapture>,
    mut editor: ResMut<DecalEditor>,
    mut events: EventWriter<DecalEvent>,
) {
    let pointer_over_ui = ui_captures_pointer(&interactions);

    let mut input = FrameInput {
        pointer_pressed: buttons.just_pressed(MouseButton::Left),
        pointer_held: buttons.pressed(MouseButton::Left),
        pointer_over_ui,
        ..FrameInput::default()
    };
    // Keys typed into the URL field never edit decals.
    if !capture.lock_keys_this_frame {
        input.modifier_held = keys.any_pressed(MODIFIER_KEYS);
        input.delete_pressed = keys.any_just_pressed(DELETE_KEYS);
        input.cancel_pressed = keys.just_pressed(KeyCode::Escape);
    }

    let scroll: f32 = wheel.read().map(scroll_amount).sum();
    if !pointer_over_ui {
        input.scroll_delta = scroll;
    }

    let wants_hit = !pointer_over_ui
        && (input.pointer_pressed || (input.modifier_held && input.pointer_held));
    if wants_hit {
        let cursor = windows.single().ok().and_then(|window| window.cursor_position());
        if let (Some(cursor), Ok((cam_xf, camera))) = (cursor, cameras.single()) {
            if let Ok(ray) = camera.viewport_to_world(cam_xf, cursor) {
                input.hit = cast_pointer(ray, &editor.registry, &mut ray_cast, &surfaces);
            }
        }
    }

    if input == FrameInput::default() {
        return;
    }

    let editor = &mut *editor;
    let notifications = editor
        .controller
        .tick(&mut editor.registry, &input, texture.0.as_ref());
    events.write_batch(notifications.into_iter().map(DecalEvent));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(unit: MouseScrollUnit, y: f32) -> MouseWheel {
        MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        }
    }

    #[test]
    fn scroll_units_are_normalised() {
        assert!((scroll_amount(&wheel(MouseScrollUnit::Line, 1.0)) - 0.1).abs() < 1e-6);
        assert!((scroll_amount(&wheel(MouseScrollUnit::Pixel, 32.0)) - 0.2).abs() < 1e-6);
        assert!((scroll_amount(&wheel(MouseScrollUnit::Line, -2.0)) + 0.2).abs() < 1e-6);
    }

    #[test]
    fn decal_behind_surface_is_ignored() {
        let surface = SurfaceHit {
            point: Vec3::ZERO,
            normal: Vec3::Y,
        };
        let hit = resolve_pointer_hit(Some((DecalId(1), 5.0)), Some((surface, 2.0))).unwrap();
        assert_eq!(hit.decal, None);
        assert_eq!(hit.surface, Some(surface));

        let hit = resolve_pointer_hit(Some((DecalId(1), 1.9)), Some((surface, 2.0))).unwrap();
        assert_eq!(hit.decal, Some(DecalId(1)));

        assert!(resolve_pointer_hit(None, None).is_none());
    }

    fn capture_app() -> App {
        let mut app = App::new();
        app.init_resource::<DecalEditor>()
            .init_resource::<UrlInputState>()
            .init_resource::<InputCapture>()
            .add_systems(Update, capture_input);
        app
    }

    #[test]
    fn hovered_panel_locks_camera_zoom() {
        let mut app = capture_app();
        let panel = app.world_mut().spawn((Node::default(), Interaction::None)).id();
        app.update();
        assert_eq!(*app.world().resource::<InputCapture>(), InputCapture::default());

        app.world_mut().entity_mut(panel).insert(Interaction::Hovered);
        app.update();
        assert!(app.world().resource::<InputCapture>().lock_zoom_this_frame);
        assert!(!app.world().resource::<InputCapture>().lock_keys_this_frame);
    }

    #[test]
    fn focused_url_field_locks_keys() {
        let mut app = capture_app();
        app.world_mut().resource_mut::<UrlInputState>().focused = true;
        app.update();
        assert!(app.world().resource::<InputCapture>().lock_keys_this_frame);
        assert!(!app.world().resource::<InputCapture>().lock_zoom_this_frame);
    }

    #[test]
    fn idle_interactions_do_not_capture() {
        assert!(!ui_captures_pointer(&[Interaction::None, Interaction::None]));
        assert!(ui_captures_pointer(&[Interaction::None, Interaction::Pressed]));
    }
}
