use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;
use constants::render_settings::*;

use super::controller::{DecalNotification, change_border_width};
use super::state::*;
use crate::engine::loading::{ImageRequest, LoadImageRequest, TextureLoadState};
use crate::engine::snapshot::SnapshotRequest;

type ButtonInteractions<'w, 's, M> =
    Query<'w, 's, (&'static Interaction, &'static mut BackgroundColor), (Changed<Interaction>, With<Button>, With<M>)>;

// Shared hover/press colouring, returns true on press
fn pressed(interaction: Interaction, bg: &mut BackgroundColor, idle: Color, hovered: Color, down: Color) -> bool {
    match interaction {
        Interaction::Pressed => { *bg = BackgroundColor(down); true }
        Interaction::Hovered => { *bg = BackgroundColor(hovered); false }
        Interaction::None    => { *bg = BackgroundColor(idle); false }
    }
}

// Chevron icon toggles collapse state
pub fn collapse_button_interaction(
    mut q: ButtonInteractions<CollapseButton>,
    mut state: ResMut<DecalManagerUiState>,
) {
    for (interaction, mut bg) in &mut q {
        if pressed(*interaction, &mut bg, BUTTON_IDLE, BUTTON_HOVERED, BUTTON_PRESSED) {
            state.collapsed = !state.collapsed;
        }
    }
}

// Opens the configured image picker
pub fn load_image_button_interaction(
    mut q: ButtonInteractions<LoadImageButton>,
    mut requests: EventWriter<LoadImageRequest>,
) {
    for (interaction, mut bg) in &mut q {
        if pressed(*interaction, &mut bg, BUTTON_IDLE, BUTTON_HOVERED, BUTTON_PRESSED) {
            requests.write(LoadImageRequest(ImageRequest::Pick));
        }
    }
}

// Submitting an empty field surfaces EmptyUrl on the status line
fn submit_url(
    url: &UrlInputState,
    requests: &mut EventWriter<LoadImageRequest>,
    load: &mut TextureLoadState,
) {
    match url.request() {
        Ok(request) => {
            requests.write(request);
        }
        Err(err) => load.fail(&err),
    }
}

// Loads whatever is typed in the URL field
pub fn load_url_button_interaction(
    mut q: ButtonInteractions<LoadUrlButton>,
    mut url: ResMut<UrlInputState>,
    mut load: ResMut<TextureLoadState>,
    mut requests: EventWriter<LoadImageRequest>,
) {
    for (interaction, mut bg) in &mut q {
        if !pressed(*interaction, &mut bg, BUTTON_IDLE, BUTTON_HOVERED, BUTTON_PRESSED) {
            continue;
        }
        url.focused = false;
        submit_url(&url, &mut requests, &mut load);
    }
}

// Clicking the field takes keyboard focus unless a load is running
pub fn url_field_interaction(
    fields: Query<&Interaction, (Changed<Interaction>, With<UrlInputField>)>,
    load: Res<TextureLoadState>,
    mut url: ResMut<UrlInputState>,
) {
    for interaction in &fields {
        if *interaction == Interaction::Pressed && !load.is_loading() && !url.focused {
            url.focused = true;
        }
    }
}

pub fn url_field_typing(
    mut keys: EventReader<KeyboardInput>,
    buttons: Res<ButtonInput<MouseButton>>,
    fields: Query<&Interaction, With<UrlInputField>>,
    mut url: ResMut<UrlInputState>,
    mut load: ResMut<TextureLoadState>,
    mut requests: EventWriter<LoadImageRequest>,
) {
    if !url.focused {
        keys.clear();
        return;
    }
    let clicked_elsewhere = buttons.just_pressed(MouseButton::Left)
        && fields.iter().all(|interaction| *interaction == Interaction::None);
    if load.is_loading() || clicked_elsewhere {
        url.focused = false;
        keys.clear();
        return;
    }

    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        if url.apply_key(&event.logical_key) == UrlInputAction::Submit {
            submit_url(&url, &mut requests, &mut load);
        }
    }
}

// Thinner / thicker outline for every decal
pub fn border_width_button_interaction(
    mut q: Query<(&Interaction, &mut BackgroundColor, &BorderWidthButton), (Changed<Interaction>, With<Button>)>,
    mut editor: ResMut<DecalEditor>,
    mut events: EventWriter<DecalEvent>,
) {
    for (interaction, mut bg, BorderWidthButton(step)) in &mut q {
        if !pressed(*interaction, &mut bg, BUTTON_IDLE, BUTTON_HOVERED, BUTTON_PRESSED) {
            continue;
        }
        let target = editor.registry.border_width() + step;
        events.write(DecalEvent(change_border_width(&mut editor.registry, target)));
    }
}

pub fn snapshot_button_interaction(
    mut q: ButtonInteractions<SnapshotButton>,
    mut requests: EventWriter<SnapshotRequest>,
) {
    for (interaction, mut bg) in &mut q {
        if pressed(*interaction, &mut bg, BUTTON_IDLE, BUTTON_HOVERED, BUTTON_PRESSED) {
            requests.write(SnapshotRequest);
        }
    }
}

// Clear All removes every decal and its render entities
pub fn clear_all_button_interaction(
    mut q: ButtonInteractions<ClearAllButton>,
    mut editor: ResMut<DecalEditor>,
    mut events: EventWriter<DecalEvent>,
) {
    for (interaction, mut bg) in &mut q {
        if !pressed(*interaction, &mut bg, DANGER_IDLE, DANGER_HOVERED, DANGER_PRESSED) {
            continue;
        }
        let cleared = editor.registry.clear_all();
        if !cleared.is_empty() {
            events.write(DecalEvent(DecalNotification::Cleared(cleared)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::keyboard::Key;
    use crate::engine::loading::LoadStatus;

    fn typing_app(url: UrlInputState) -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<TextureLoadState>()
            .insert_resource(url)
            .add_event::<KeyboardInput>()
            .add_event::<LoadImageRequest>()
            .add_systems(Update, url_field_typing);
        app
    }

    fn press(app: &mut App, key: Key, key_code: KeyCode) {
        app.world_mut().send_event(KeyboardInput {
            key_code,
            logical_key: key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
    }

    #[test]
    fn enter_on_blank_field_reports_empty_url() {
        let mut app = typing_app(UrlInputState {
            text: "  ".into(),
            focused: true,
        });
        press(&mut app, Key::Enter, KeyCode::Enter);
        app.update();

        let status = &app.world().resource::<TextureLoadState>().status;
        assert_eq!(*status, LoadStatus::Failed("image URL is empty".into()));
        assert!(app.world().resource::<Events<LoadImageRequest>>().is_empty());
        assert!(!app.world().resource::<UrlInputState>().focused);
    }

    #[test]
    fn typed_url_is_requested_on_enter() {
        let mut app = typing_app(UrlInputState {
            text: "example.com/".into(),
            focused: true,
        });
        press(&mut app, Key::Character("a".into()), KeyCode::KeyA);
        press(&mut app, Key::Enter, KeyCode::Enter);
        app.update();

        let events = app.world().resource::<Events<LoadImageRequest>>();
        let requests: Vec<_> = events.iter_current_update_events().map(|r| r.0.clone()).collect();
        assert_eq!(
            requests,
            vec![ImageRequest::Location(crate::engine::loading::ImageLocation::Url(
                "https://example.com/a".into()
            ))]
        );
    }

    #[test]
    fn field_ignores_keys_while_loading() {
        let mut app = typing_app(UrlInputState {
            text: "x.io".into(),
            focused: true,
        });
        app.world_mut().resource_mut::<TextureLoadState>().status = LoadStatus::Loading("x.io".into());
        press(&mut app, Key::Character("z".into()), KeyCode::KeyZ);
        app.update();

        let url = app.world().resource::<UrlInputState>();
        assert_eq!(url.text, "x.io");
        assert!(!url.focused);
    }
}
