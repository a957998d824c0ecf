use std::mem;
use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use crossbeam_channel::{Receiver, Sender, unbounded};
use image::RgbaImage;

use super::error::TextureLoadError;
use super::image_source::{ImageLocation, ImageSource, fetch_bytes, picker_for};
use super::texture_normalize::{decode_and_normalize, to_bevy_image};
use crate::engine::core::config::EditorConfig;
use crate::engine::decal::DecalTexture;

/// What the user asked to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRequest {
    /// Ask the configured picker for a location.
    Pick,
    Location(ImageLocation),
}

#[derive(Event, Debug, Clone)]
pub struct LoadImageRequest(pub ImageRequest);

/// Result of a background load, delivered once per request.
#[derive(Debug)]
pub enum TextureLoadMessage {
    Loaded { source: String, image: RgbaImage },
    Failed { source: String, error: TextureLoadError },
    /// The picker was closed without choosing an image.
    Cancelled,
}

/// Fire-and-forget channel from loader tasks back to the frame loop.
#[derive(Resource)]
pub struct TextureLoadChannel {
    pub sender: Sender<TextureLoadMessage>,
    pub receiver: Receiver<TextureLoadMessage>,
}

impl Default for TextureLoadChannel {
    fn default() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }
}

/// Image picker selected at startup.
#[derive(Resource)]
pub struct ImageSources {
    pub picker: Arc<dyn ImageSource>,
}

/// Most recently loaded texture, used for every new decal.
#[derive(Resource, Default, Clone, Debug)]
pub struct ActiveTexture(pub Option<DecalTexture>);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading(String),
    Ready(String),
    Failed(String),
}

#[derive(Resource, Default, Debug)]
pub struct TextureLoadState {
    pub status: LoadStatus,
}

impl TextureLoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading(_))
    }

    pub fn fail(&mut self, error: &TextureLoadError) {
        error!("Image load failed: {error}");
        self.status = LoadStatus::Failed(error.to_string());
    }
}

/// Limits applied to every load, read from the editor config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSettings {
    pub timeout: Duration,
    pub max_size: u32,
    pub preserve_aspect: bool,
}

impl From<&EditorConfig> for LoadSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.url_timeout_secs),
            max_size: config.max_texture_size,
            preserve_aspect: config.preserve_aspect_ratio,
        }
    }
}

/// Fetch, decode and normalise an image. Blocking.
pub fn load_rgba(location: &ImageLocation, settings: LoadSettings) -> Result<RgbaImage, TextureLoadError> {
    let bytes = fetch_bytes(location, settings.timeout)?;
    decode_and_normalize(&bytes, settings.max_size, settings.preserve_aspect)
}

/// Sends exactly one message per load. Dropped unsent, e.g. while a task
/// unwinds, it reports `Interrupted` so the frame loop leaves `Loading`.
pub struct LoadReport {
    sender: Sender<TextureLoadMessage>,
    source: String,
    sent: bool,
}

impl LoadReport {
    pub fn new(sender: Sender<TextureLoadMessage>, source: impl Into<String>) -> Self {
        Self {
            sender,
            source: source.into(),
            sent: false,
        }
    }

    pub fn send(mut self, message: TextureLoadMessage) {
        self.sent = true;
        // The receiver only goes away on shutdown.
        let _ = self.sender.send(message);
    }
}

impl Drop for LoadReport {
    fn drop(&mut self) {
        if self.sent {
            return;
        }
        let _ = self.sender.send(TextureLoadMessage::Failed {
            source: mem::take(&mut self.source),
            error: TextureLoadError::Interrupted,
        });
    }
}

fn request_label(request: &ImageRequest, picker: &dyn ImageSource) -> String {
    match request {
        ImageRequest::Location(location) => location.to_string(),
        ImageRequest::Pick => format!("image from {}", picker.name()),
    }
}

/// Resolve the request and load it, reporting through `report`. Blocking.
pub fn run_texture_load(
    request: ImageRequest,
    picker: Arc<dyn ImageSource>,
    settings: LoadSettings,
    report: LoadReport,
) {
    let location = match request {
        ImageRequest::Location(location) => location,
        ImageRequest::Pick => match picker.resolve() {
            Ok(Some(location)) => location,
            Ok(None) => return report.send(TextureLoadMessage::Cancelled),
            Err(error) => {
                let source = picker.name().to_string();
                return report.send(TextureLoadMessage::Failed { source, error });
            }
        },
    };

    let source = location.to_string();
    let message = match load_rgba(&location, settings) {
        Ok(image) => TextureLoadMessage::Loaded { source, image },
        Err(error) => TextureLoadMessage::Failed { source, error },
    };
    report.send(message);
}

pub fn handle_load_requests(
    mut requests: EventReader<LoadImageRequest>,
    sources: Res<ImageSources>,
    config: Res<EditorConfig>,
    channel: Res<TextureLoadChannel>,
    mut state: ResMut<TextureLoadState>,
) {
    for LoadImageRequest(request) in requests.read() {
        if state.is_loading() {
            warn!("{}", TextureLoadError::Busy);
            continue;
        }

        let label = request_label(request, sources.picker.as_ref());
        info!("Loading {label}");
        state.status = LoadStatus::Loading(label.clone());

        let request = request.clone();
        let picker = Arc::clone(&sources.picker);
        let settings = LoadSettings::from(config.as_ref());
        let report = LoadReport::new(channel.sender.clone(), label);
        IoTaskPool::get()
            .spawn(async move { run_texture_load(request, picker, settings, report) })
            .detach();
    }
}

/// Drain finished loads once per frame.
pub fn receive_loaded_textures(
    channel: Res<TextureLoadChannel>,
    mut images: ResMut<Assets<Image>>,
    mut active: ResMut<ActiveTexture>,
    mut state: ResMut<TextureLoadState>,
) {
    for message in channel.receiver.try_iter() {
        apply_load_message(message, &mut images, &mut active, &mut state);
    }
}

pub fn apply_load_message(
    message: TextureLoadMessage,
    images: &mut Assets<Image>,
    active: &mut ActiveTexture,
    state: &mut TextureLoadState,
) {
    match message {
        TextureLoadMessage::Loaded { source, image } => {
            let size = UVec2::new(image.width(), image.height());
            let handle = images.add(to_bevy_image(image));
            info!(
                "Image loaded from {} ({}x{}); click the model to place it",
                source, size.x, size.y
            );
            active.0 = Some(DecalTexture::new(handle, size, source.clone()));
            state.status = LoadStatus::Ready(source);
        }
        TextureLoadMessage::Failed { source, error } => {
            warn!("Could not load {source}");
            state.fail(&error);
        }
        TextureLoadMessage::Cancelled => {
            info!("Image selection cancelled");
            state.status = match &active.0 {
                Some(texture) => LoadStatus::Ready(texture.source.clone()),
                None => LoadStatus::Idle,
            };
        }
    }
}

pub fn request_startup_image(config: Res<EditorConfig>, mut requests: EventWriter<LoadImageRequest>) {
    if let Some(path) = &config.startup_image {
        requests.write(LoadImageRequest(ImageRequest::Location(ImageLocation::File(
            path.clone(),
        ))));
    }
}

/// Registers the texture acquisition pipeline.
pub struct TextureLoadingPlugin;

impl Plugin for TextureLoadingPlugin {
    fn build(&self, app: &mut App) {
        let picker = app
            .world()
            .get_resource::<EditorConfig>()
            .map(|config| config.picker)
            .unwrap_or_default();

        app.init_resource::<EditorConfig>()
            .init_resource::<TextureLoadChannel>()
            .init_resource::<TextureLoadState>()
            .init_resource::<ActiveTexture>()
            .insert_resource(ImageSources {
                picker: picker_for(picker),
            })
            .add_event::<LoadImageRequest>()
            .add_systems(Startup, request_startup_image)
            .add_systems(Update, (handle_load_requests, receive_loaded_textures).chain());
    }
}
