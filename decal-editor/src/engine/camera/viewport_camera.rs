use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;

const YAW_SENSITIVITY: f32 = 0.0035;
const PITCH_SENSITIVITY: f32 = 0.0030;
const PITCH_LIMIT: f32 = 1.55;

/// Fly camera state; the camera transform eases towards it every frame.
#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub move_speed: f32,
    pub dolly_speed: f32,
}

impl ViewportCamera {
    /// Camera at `position` looking at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or(Vec3::NEG_Z);
        Self {
            focus_point: position,
            pitch: dir.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT),
            yaw: (-dir.x).atan2(-dir.z),
            ..default()
        }
    }

    pub fn view_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn look(&mut self, mouse_delta: Vec2) {
        self.yaw += -mouse_delta.x * YAW_SENSITIVITY;
        self.pitch = (self.pitch - mouse_delta.y * PITCH_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move along the view direction; positive scroll moves forward.
    pub fn dolly(&mut self, scroll: f32) {
        let forward = self.view_rotation() * Vec3::NEG_Z;
        self.focus_point += forward * scroll * self.dolly_speed;
    }
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            focus_point: Vec3::new(0.0, 1.5, 4.0),
            pitch: 0.0,
            yaw: 0.0,
            move_speed: 2.5,
            dolly_speed: 0.4,
        }
    }
}

/// Set by tools that consume the wheel or the keyboard this frame.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputCapture {
    pub lock_zoom_this_frame: bool,
    pub lock_keys_this_frame: bool,
}

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut viewport: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    capture: Res<InputCapture>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else { return };

    // Right drag looks around
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
        viewport.look(mouse_delta);
    }

    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();
    if !capture.lock_zoom_this_frame && scroll.abs() > f32::EPSILON {
        viewport.dolly(scroll);
    }

    let mut move_input = Vec3::ZERO;
    if !capture.lock_keys_this_frame {
        if keyboard.pressed(KeyCode::KeyW) { move_input.z -= 1.0; }
        if keyboard.pressed(KeyCode::KeyS) { move_input.z += 1.0; }
        if keyboard.pressed(KeyCode::KeyD) { move_input.x += 1.0; }
        if keyboard.pressed(KeyCode::KeyA) { move_input.x -= 1.0; }
        if keyboard.pressed(KeyCode::KeyE) { move_input.y += 1.0; }
        if keyboard.pressed(KeyCode::KeyQ) { move_input.y -= 1.0; }
    }

    if move_input != Vec3::ZERO {
        let view_rot = viewport.view_rotation();
        let world_delta = view_rot * Vec3::X * move_input.x
            + Vec3::Y * move_input.y
            + view_rot * Vec3::Z * move_input.z;
        let mut speed = viewport.move_speed;
        if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) { speed *= 3.5; }
        viewport.focus_point += world_delta.normalize_or_zero() * speed * time.delta_secs();
    }

    let lerp_speed = (12.0 * time.delta_secs()).min(1.0);
    let target_rot = viewport.view_rotation();
    camera_transform.translation = camera_transform.translation.lerp(viewport.focus_point, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, lerp_speed);
}
