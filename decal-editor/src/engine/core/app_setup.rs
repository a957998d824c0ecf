use std::path::Path;

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;

use crate::engine::core::config::{CONFIG_FILE_NAME, EditorConfig};
use crate::engine::core::window_config::create_window_config;
use crate::engine::camera::{InputCapture, camera_controller};
use crate::engine::loading::TextureLoadingPlugin;
use crate::engine::scene::DemoScenePlugin;
use crate::engine::snapshot::SnapshotPlugin;
use crate::tools::decal_manager::DecalManagerPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins());

    // Loaded after the log plugin so config warnings are visible.
    let config = EditorConfig::load_or_default(Path::new(CONFIG_FILE_NAME));
    info!(
        "Editor config: default size {}, border {}, max texture {}px",
        config.default_decal_size, config.border_width, config.max_texture_size
    );

    // Config must be in place before the plugins read it.
    app.insert_resource(config)
        .init_resource::<InputCapture>()
        .add_plugins(TextureLoadingPlugin)
        .add_plugins(SnapshotPlugin)
        .add_plugins(DemoScenePlugin);

    // Plugin for decal editing and its UI panel
    app.add_plugins(DecalManagerPlugin);

    app.add_systems(Update, camera_controller);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
