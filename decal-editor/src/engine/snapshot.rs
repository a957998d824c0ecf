use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, save_to_disk};

use crate::engine::core::config::EditorConfig;

/// Capture the primary window to a PNG in the snapshot directory.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SnapshotRequest;

pub fn snapshot_file_name(unix_secs: u64) -> String {
    format!("snapshot_{unix_secs}.png")
}

pub fn snapshot_path(dir: &Path, now: SystemTime) -> PathBuf {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    dir.join(snapshot_file_name(secs))
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_target(dir: &Path, _time: &Time) -> Option<PathBuf> {
    if let Err(err) = std::fs::create_dir_all(dir) {
        error!("Cannot create snapshot directory {}: {err}", dir.display());
        return None;
    }
    Some(snapshot_path(dir, SystemTime::now()))
}

// No wall clock on the web; the browser downloads the file by name.
#[cfg(target_arch = "wasm32")]
fn snapshot_target(dir: &Path, time: &Time) -> Option<PathBuf> {
    Some(dir.join(snapshot_file_name(time.elapsed().as_secs())))
}

pub fn take_snapshots(
    mut commands: Commands,
    mut requests: EventReader<SnapshotRequest>,
    config: Res<EditorConfig>,
    time: Res<Time>,
) {
    // Several requests in one frame would write the same file.
    if requests.read().count() == 0 {
        return;
    }

    let Some(path) = snapshot_target(&config.snapshot_dir, &time) else {
        return;
    };
    info!("Saving snapshot to {}", path.display());
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(path));
}

pub fn snapshot_on_key(keys: Res<ButtonInput<KeyCode>>, mut requests: EventWriter<SnapshotRequest>) {
    if keys.just_pressed(KeyCode::F12) {
        requests.write(SnapshotRequest);
    }
}

pub struct SnapshotPlugin;

impl Plugin for SnapshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SnapshotRequest>()
            .add_systems(Update, (snapshot_on_key, take_snapshots).chain());
    }
}
