use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;

#[derive(Component)]
pub struct GroundGrid;

/// Line-list vertices for a square grid centred on the origin at height `y`.
pub fn grid_line_positions(half_extent: f32, cell_size: f32, y: f32) -> Vec<[f32; 3]> {
    let cells = ((2.0 * half_extent) / cell_size).round().max(1.0) as u32;
    let step = 2.0 * half_extent / cells as f32;

    let mut positions = Vec::with_capacity((cells as usize + 1) * 4);
    for i in 0..=cells {
        let offset = -half_extent + i as f32 * step;
        // Along X
        positions.push([-half_extent, y, offset]);
        positions.push([half_extent, y, offset]);
        // Along Z
        positions.push([offset, y, -half_extent]);
        positions.push([offset, y, half_extent]);
    }
    positions
}

/// Reference grid just above the ground plane; not a placement surface.
pub fn create_ground_grid(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    half_extent: f32,
) {
    let grid_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.25),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    let mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, grid_line_positions(half_extent, 0.5, 0.002));

    commands.spawn((
        GroundGrid,
        Name::new("GroundGrid"),
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(grid_material),
        Transform::IDENTITY,
    ));
}
