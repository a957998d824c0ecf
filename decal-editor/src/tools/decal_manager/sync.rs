use std::collections::BTreeSet;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::decal::{OUTLINE_RENDER_ORDER, TRANSPARENT_QUEUE_BASE};
use constants::render_settings::OUTLINE_COLOUR;

use super::controller::DecalNotification;
use super::state::{
    DecalEditor, DecalEvent, DecalOutlineVisual, DecalVisual, DecalVisualEntities, DecalVisuals,
};
use crate::engine::decal::{DecalEntity, DecalId, DecalTransform, OutlineGeometry, QuadMesh};

/// Shared render assets for every decal.
#[derive(Resource)]
pub struct DecalRenderAssets {
    pub quad: Handle<Mesh>,
    pub outline_material: Handle<StandardMaterial>,
}

impl FromWorld for DecalRenderAssets {
    fn from_world(world: &mut World) -> Self {
        let quad = world
            .resource_mut::<Assets<Mesh>>()
            .add(quad_mesh(&QuadMesh::unit()));
        let outline_material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(outline_material());
        Self {
            quad,
            outline_material,
        }
    }
}

pub fn quad_mesh(quad: &QuadMesh) -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, quad.position_array())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, quad.normal_array())
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, quad.uv_array())
        .with_inserted_indices(Indices::U32(quad.indices.to_vec()))
}

/// Transparent queue index mapped onto the material depth bias.
pub fn render_depth_bias(render_order: i32) -> f32 {
    (render_order - TRANSPARENT_QUEUE_BASE) as f32
}

pub fn decal_material(decal: &DecalEntity) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(decal.texture().image.clone()),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        depth_bias: render_depth_bias(decal.render_order()),
        ..default()
    }
}

fn outline_material() -> StandardMaterial {
    StandardMaterial {
        base_color: OUTLINE_COLOUR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        depth_bias: render_depth_bias(OUTLINE_RENDER_ORDER),
        ..default()
    }
}

pub fn decal_transform(transform: &DecalTransform) -> Transform {
    Transform {
        translation: transform.translation,
        rotation: transform.rotation,
        scale: Vec3::splat(transform.scale),
    }
}

fn outline_visibility(outline: &OutlineGeometry) -> Visibility {
    if outline.is_visible() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Decals whose render entities may be stale after `notification`.
pub fn affected_decals(notification: &DecalNotification) -> Vec<DecalId> {
    match notification {
        DecalNotification::Created(id)
        | DecalNotification::Selected(id)
        | DecalNotification::Deselected(id)
        | DecalNotification::Moved(id)
        | DecalNotification::Deleted(id)
        | DecalNotification::Resized { id, .. } => vec![*id],
        DecalNotification::Cleared(ids) | DecalNotification::OutlinesChanged { ids, .. } => {
            ids.clone()
        }
    }
}

// Mirrors registry changes onto mesh entities: spawn, update, despawn
pub fn sync_decal_visuals(
    mut events: EventReader<DecalEvent>,
    editor: Res<DecalEditor>,
    assets: Res<DecalRenderAssets>,
    mut visuals: ResMut<DecalVisuals>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let touched: BTreeSet<DecalId> = events
        .read()
        .flat_map(|DecalEvent(notification)| affected_decals(notification))
        .collect();

    for id in touched {
        let Some(decal) = editor.registry.get(id) else {
            if let Some(entities) = visuals.entities.remove(&id) {
                commands.entity(entities.decal).despawn();
                debug!("Despawned render entities for decal {id}");
            }
            continue;
        };

        let entities = visuals.entities.entry(id).or_insert_with(|| {
            let decal_entity = commands
                .spawn((
                    DecalVisual(id),
                    Name::new(format!("decal_{}", id.0)),
                    Mesh3d(assets.quad.clone()),
                    MeshMaterial3d(materials.add(decal_material(decal))),
                    decal_transform(decal.transform()),
                ))
                .id();
            DecalVisualEntities {
                decal: decal_entity,
                outline: None,
                outline_mesh: None,
            }
        });

        commands
            .entity(entities.decal)
            .insert(decal_transform(decal.transform()));

        let Some(outline) = decal.outline() else {
            continue;
        };
        match (entities.outline, entities.outline_mesh.as_ref()) {
            (Some(outline_entity), Some(mesh)) => {
                if let Some(mesh) = meshes.get_mut(mesh) {
                    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, outline.mesh().position_array());
                }
                commands
                    .entity(outline_entity)
                    .insert(outline_visibility(outline));
            }
            _ => {
                let mesh = meshes.add(quad_mesh(outline.mesh()));
                let outline_entity = commands
                    .spawn((
                        DecalOutlineVisual(id),
                        Name::new(format!("decal_{}_outline", id.0)),
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(assets.outline_material.clone()),
                        Transform::from_translation(outline.local_offset()),
                        outline_visibility(outline),
                    ))
                    .id();
                commands.entity(entities.decal).add_child(outline_entity);
                entities.outline = Some(outline_entity);
                entities.outline_mesh = Some(mesh);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::decal::DECAL_RENDER_ORDER;

    #[test]
    fn outline_draws_before_decal() {
        assert!(render_depth_bias(OUTLINE_RENDER_ORDER) < render_depth_bias(DECAL_RENDER_ORDER));
        assert_eq!(render_depth_bias(TRANSPARENT_QUEUE_BASE), 0.0);
    }

    #[test]
    fn quad_mesh_carries_all_attributes() {
        let mesh = quad_mesh(&QuadMesh::unit());
        assert_eq!(mesh.count_vertices(), 4);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
        assert_eq!(mesh.indices().map(|i| i.len()), Some(6));
    }

    #[test]
    fn cleared_notification_touches_every_decal() {
        let ids = vec![DecalId(1), DecalId(2)];
        assert_eq!(affected_decals(&DecalNotification::Cleared(ids.clone())), ids);
        assert_eq!(
            affected_decals(&DecalNotification::Resized {
                id: DecalId(3),
                size: 0.4
            }),
            vec![DecalId(3)]
        );
        assert_eq!(
            affected_decals(&DecalNotification::OutlinesChanged {
                border_width: 0.01,
                ids: vec![DecalId(4)]
            }),
            vec![DecalId(4)]
        );
    }
}
