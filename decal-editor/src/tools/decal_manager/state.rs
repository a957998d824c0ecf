use std::collections::HashMap;

use bevy::input::keyboard::Key;
use bevy::prelude::*;
use constants::render_settings::{PANEL_CLOSED_WIDTH, PANEL_OPEN_WIDTH};

use super::controller::{DecalNotification, SelectionController};
use crate::engine::core::config::EditorConfig;
use crate::engine::decal::{DecalId, DecalRegistry};
use crate::engine::loading::{
    ImageLocation, ImageRequest, LoadImageRequest, TextureLoadError, normalize_url,
};
pub use crate::engine::scene::DecalSurface;

// Resources
#[derive(Resource)]
pub struct DecalEditor {
    pub registry: DecalRegistry,
    pub controller: SelectionController,
}

impl DecalEditor {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            registry: DecalRegistry::new(config.border_width),
            controller: SelectionController::new(config.default_decal_size, config.scroll_sensitivity),
        }
    }
}

impl FromWorld for DecalEditor {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource::<EditorConfig>().cloned().unwrap_or_default();
        Self::from_config(&config)
    }
}

/// Render entities spawned for each live decal.
#[derive(Resource, Default)]
pub struct DecalVisuals {
    pub entities: HashMap<DecalId, DecalVisualEntities>,
}

#[derive(Clone, Debug)]
pub struct DecalVisualEntities {
    pub decal: Entity,
    pub outline: Option<Entity>,
    pub outline_mesh: Option<Handle<Mesh>>,
}

#[derive(Resource)]
pub struct DecalManagerUiState {
    pub collapsed: bool,
    pub open_width: f32,
    pub closed_width: f32,
}
impl Default for DecalManagerUiState {
    fn default() -> Self {
        Self {
            collapsed: false,
            open_width: PANEL_OPEN_WIDTH,
            closed_width: PANEL_CLOSED_WIDTH,
        }
    }
}

/// Text typed into the panel's URL field.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct UrlInputState {
    pub text: String,
    /// Keyboard input goes to the field instead of the scene.
    pub focused: bool,
}

/// What a key press did to the URL field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlInputAction {
    Edited,
    Submit,
    Blur,
    Ignored,
}

impl UrlInputState {
    pub fn apply_key(&mut self, key: &Key) -> UrlInputAction {
        if !self.focused {
            return UrlInputAction::Ignored;
        }
        match key {
            Key::Character(typed) if !typed.chars().any(char::is_control) => {
                self.text.push_str(typed);
                UrlInputAction::Edited
            }
            Key::Space => {
                self.text.push(' ');
                UrlInputAction::Edited
            }
            Key::Backspace => {
                self.text.pop();
                UrlInputAction::Edited
            }
            Key::Enter => {
                self.focused = false;
                UrlInputAction::Submit
            }
            Key::Escape => {
                self.focused = false;
                UrlInputAction::Blur
            }
            _ => UrlInputAction::Ignored,
        }
    }

    /// Load request for the typed URL; `EmptyUrl` when only whitespace was typed.
    pub fn request(&self) -> Result<LoadImageRequest, TextureLoadError> {
        let url = normalize_url(&self.text)?;
        Ok(LoadImageRequest(ImageRequest::Location(ImageLocation::Url(url))))
    }
}

impl FromWorld for UrlInputState {
    fn from_world(world: &mut World) -> Self {
        let text = world
            .get_resource::<EditorConfig>()
            .and_then(|config| config.image_url.clone())
            .unwrap_or_default();
        Self { text, focused: false }
    }
}

// Events
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DecalEvent(pub DecalNotification);

// Components
#[derive(Component)]
pub struct DecalVisual(pub DecalId);
#[derive(Component)]
pub struct DecalOutlineVisual(pub DecalId);

// Panel components
#[derive(Component)]
pub struct DecalManagerRoot;
/// Panel nodes whose layout follows the collapse state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPart {
    Root,
    Header,
    Title,
    CollapseButton,
    Body,
}
#[derive(Component)]
pub struct CollapseButton;
#[derive(Component)]
pub struct CollapseLabel;
#[derive(Component)]
pub struct LoadImageButton;
#[derive(Component)]
pub struct LoadUrlButton;
#[derive(Component)]
pub struct UrlInputField;
#[derive(Component)]
pub struct UrlInputText;
/// Border width change applied on press.
#[derive(Component)]
pub struct BorderWidthButton(pub f32);
#[derive(Component)]
pub struct ClearAllButton;
#[derive(Component)]
pub struct SnapshotButton;
#[derive(Component)]
pub struct StatusText;
#[derive(Component)]
pub struct SelectedDecalLabel;
