//! Demo scene the editor starts with.
//!
//! A handful of primitive meshes stand in for the model decals are placed on.
//! Only entities tagged [`DecalSurface`] are hit by the placement ray.

/// Flat reference grid drawn over the ground plane.
pub mod grid;

use bevy::prelude::*;

use crate::engine::camera::ViewportCamera;
use grid::create_ground_grid;

/// Meshes decals can be placed on.
#[derive(Component, Default)]
pub struct DecalSurface;

const GROUND_HALF_EXTENT: f32 = 4.0;
const CAMERA_START: Vec3 = Vec3::new(0.0, 2.0, 5.0);
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 0.5, 0.0);

fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
    commands.insert_resource(AmbientLight {
        brightness: 300.0,
        ..default()
    });
}

fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_START).looking_at(CAMERA_TARGET, Vec3::Y),
    ));
    commands.insert_resource(ViewportCamera::looking_at(CAMERA_START, CAMERA_TARGET));
}

fn spawn_surface(
    commands: &mut Commands,
    name: &'static str,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    transform: Transform,
) {
    commands.spawn((
        DecalSurface,
        Name::new(name),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        transform,
    ));
}

pub fn spawn_demo_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_lighting(&mut commands);
    spawn_camera(&mut commands);

    let ground = materials.add(StandardMaterial {
        base_color: Color::srgb(0.32, 0.34, 0.36),
        perceptual_roughness: 0.9,
        ..default()
    });
    let model = materials.add(StandardMaterial {
        base_color: Color::srgb(0.75, 0.72, 0.68),
        perceptual_roughness: 0.6,
        ..default()
    });

    spawn_surface(
        &mut commands,
        "Ground",
        meshes.add(Plane3d::default().mesh().size(2.0 * GROUND_HALF_EXTENT, 2.0 * GROUND_HALF_EXTENT)),
        ground,
        Transform::IDENTITY,
    );
    spawn_surface(
        &mut commands,
        "Crate",
        meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        model.clone(),
        Transform::from_xyz(-1.4, 0.5, 0.0).with_rotation(Quat::from_rotation_y(0.4)),
    );
    spawn_surface(
        &mut commands,
        "Sphere",
        meshes.add(Sphere::new(0.6).mesh().uv(48, 24)),
        model.clone(),
        Transform::from_xyz(0.2, 0.6, 0.3),
    );
    spawn_surface(
        &mut commands,
        "Column",
        meshes.add(Cylinder::new(0.35, 1.6)),
        model.clone(),
        Transform::from_xyz(1.6, 0.8, -0.4),
    );
    spawn_surface(
        &mut commands,
        "Wall",
        meshes.add(Cuboid::new(4.0, 2.0, 0.2)),
        model,
        Transform::from_xyz(0.0, 1.0, -2.0),
    );

    create_ground_grid(&mut commands, &mut meshes, &mut materials, GROUND_HALF_EXTENT);
    info!("Demo scene ready; load an image to start placing decals");
}

pub struct DemoScenePlugin;

impl Plugin for DemoScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_demo_scene);
    }
}
