use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use constants::decal::BORDER_WIDTH_STEP;
use constants::render_settings::*;

use super::state::*;
use crate::engine::decal::DecalRegistry;
use crate::engine::loading::{LoadStatus, TextureLoadState};

const HELP_TEXT: &str = "Click a surface to place the loaded image.\n\
Click a decal to select it, scroll to resize.\n\
Ctrl + drag moves the selection.\n\
Delete removes it, Escape deselects.\n\
Type a URL in the field, Enter loads it.";

const URL_FIELD_VISIBLE_CHARS: usize = 32;

fn button_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Px(36.0),
        display: Display::Flex,
        align_items: AlignItems::Center,
        justify_content: JustifyContent::Center,
        border: UiRect::all(Val::Px(1.0)),
        ..default()
    }
}

fn spawn_button(body: &mut ChildSpawnerCommands, marker: impl Component, name: &'static str, label: &str, colour: Color) {
    body.spawn((
        marker,
        Button,
        Name::new(name),
        BackgroundColor(colour),
        BorderColor(BUTTON_BORDER),
        button_node(),
    ))
    .with_children(|btn| {
        btn.spawn((
            Text::new(label),
            TextFont { font_size: 16.0, ..default() },
            TextColor(Color::WHITE),
        ));
    });
}

/// Collapse-dependent layout shared by panel spawning and toggling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub width: f32,
    pub content_display: Display,
    pub header_padding: f32,
    pub header_justify: JustifyContent,
    pub collapse_button_size: f32,
    pub chevron: &'static str,
}

impl PanelLayout {
    pub fn for_state(state: &DecalManagerUiState) -> Self {
        if state.collapsed {
            Self {
                width: state.closed_width,
                content_display: Display::None,
                header_padding: 4.0,
                header_justify: JustifyContent::FlexEnd,
                collapse_button_size: 24.0,
                chevron: ">",
            }
        } else {
            Self {
                width: state.open_width,
                content_display: Display::Flex,
                header_padding: 12.0,
                header_justify: JustifyContent::SpaceBetween,
                collapse_button_size: 28.0,
                chevron: "<",
            }
        }
    }

    pub fn apply(&self, part: PanelPart, node: &mut Node) {
        match part {
            PanelPart::Root => node.width = Val::Px(self.width),
            PanelPart::Header => {
                node.padding = UiRect::all(Val::Px(self.header_padding));
                node.justify_content = self.header_justify;
            }
            PanelPart::Title | PanelPart::Body => node.display = self.content_display,
            PanelPart::CollapseButton => {
                node.width = Val::Px(self.collapse_button_size);
                node.height = Val::Px(self.collapse_button_size);
            }
        }
    }

    fn laid_out(&self, part: PanelPart, mut node: Node) -> (PanelPart, Node) {
        self.apply(part, &mut node);
        (part, node)
    }
}

// Spawns the Decal Editor panel with header, actions and status lines
pub fn spawn_decal_manager_ui(
    mut commands: Commands,
    state: Res<DecalManagerUiState>,
    url: Res<UrlInputState>,
) {
    let layout = PanelLayout::for_state(&state);

    commands
        .spawn((
            DecalManagerRoot,
            Name::new("DecalManagerPanel"),
            BackgroundColor(PANEL_BACKGROUND),
            // Hovering the background counts as over the UI.
            Interaction::default(),
            FocusPolicy::Block,
            layout.laid_out(
                PanelPart::Root,
                Node {
                    min_width: Val::Px(0.0),
                    height: Val::Percent(100.0),
                    position_type: PositionType::Absolute,
                    right: Val::Px(0.0),
                    top: Val::Px(0.0),
                    bottom: Val::Px(0.0),
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Stretch,
                    overflow: Overflow::clip(),
                    ..default()
                },
            ),
        ))
        .with_children(|parent| {
            spawn_header(parent, &layout);
            spawn_body(parent, &layout, &url);
        });
}

fn spawn_header(parent: &mut ChildSpawnerCommands, layout: &PanelLayout) {
    parent
        .spawn((
            Name::new("Header"),
            BackgroundColor(PANEL_HEADER),
            layout.laid_out(
                PanelPart::Header,
                Node {
                    width: Val::Percent(100.0),
                    display: Display::Flex,
                    align_items: AlignItems::Center,
                    ..default()
                },
            ),
        ))
        .with_children(|header| {
            header.spawn((
                Name::new("Title"),
                Text::new("Decal Editor"),
                TextFont { font_size: 18.0, ..default() },
                TextColor(Color::WHITE),
                layout.laid_out(PanelPart::Title, Node::default()),
            ));

            header
                .spawn((
                    CollapseButton,
                    Name::new("CollapseButton"),
                    Button,
                    BackgroundColor(BUTTON_IDLE),
                    BorderColor(BUTTON_BORDER),
                    layout.laid_out(PanelPart::CollapseButton, button_node()),
                ))
                .with_children(|button| {
                    button.spawn((
                        CollapseLabel,
                        Text::new(layout.chevron),
                        TextFont { font_size: 18.0, ..default() },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

fn spawn_body(parent: &mut ChildSpawnerCommands, layout: &PanelLayout, url: &UrlInputState) {
    parent
        .spawn((
            Name::new("Body"),
            BackgroundColor(PANEL_BODY),
            layout.laid_out(
                PanelPart::Body,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                    row_gap: Val::Px(8.0),
                    flex_direction: FlexDirection::Column,
                    overflow: Overflow::clip_y(),
                    ..default()
                },
            ),
        ))
        .with_children(|body| {
            spawn_button(body, LoadImageButton, "LoadImageButton", "Load Image", BUTTON_IDLE);
            spawn_url_field(body, url);
            spawn_button(body, LoadUrlButton, "LoadUrlButton", "Load Image URL", BUTTON_IDLE);

            body.spawn((
                Name::new("BorderWidthRow"),
                Node {
                    width: Val::Percent(100.0),
                    column_gap: Val::Px(8.0),
                    ..default()
                },
            ))
            .with_children(|row| {
                spawn_button(row, BorderWidthButton(-BORDER_WIDTH_STEP), "BorderThinnerButton", "Border -", BUTTON_IDLE);
                spawn_button(row, BorderWidthButton(BORDER_WIDTH_STEP), "BorderThickerButton", "Border +", BUTTON_IDLE);
            });

            spawn_button(body, SnapshotButton, "SnapshotButton", "Save Snapshot", BUTTON_IDLE);
            spawn_button(body, ClearAllButton, "ClearAllButton", "Clear All Decals", DANGER_IDLE);

            body.spawn((
                StatusText,
                Name::new("Status"),
                Text::new("No image loaded"),
                TextFont { font_size: 14.0, ..default() },
                TextColor(STATUS_OK),
            ));
            body.spawn((
                SelectedDecalLabel,
                Name::new("Selection"),
                Text::new("No decal selected"),
                TextFont { font_size: 14.0, ..default() },
                TextColor(STATUS_OK),
            ));
            body.spawn((
                Text::new(HELP_TEXT),
                TextFont { font_size: 12.0, ..default() },
                TextColor(Color::srgb(0.6, 0.62, 0.66)),
            ));
        });
}

fn spawn_url_field(body: &mut ChildSpawnerCommands, url: &UrlInputState) {
    let (label, colour) = url_field_text(url);
    body.spawn((
        UrlInputField,
        Button,
        Name::new("UrlField"),
        BackgroundColor(FIELD_IDLE),
        BorderColor(BUTTON_BORDER),
        Node {
            justify_content: JustifyContent::FlexStart,
            padding: UiRect::horizontal(Val::Px(8.0)),
            overflow: Overflow::clip(),
            ..button_node()
        },
    ))
    .with_children(|field| {
        field.spawn((
            UrlInputText,
            Text::new(label),
            TextFont { font_size: 14.0, ..default() },
            TextColor(colour),
        ));
    });
}

pub fn apply_collapse_state(
    state: Res<DecalManagerUiState>,
    mut parts: Query<(&PanelPart, &mut Node)>,
    mut chevrons: Query<&mut Text, With<CollapseLabel>>,
) {
    if !state.is_changed() { return; }

    let layout = PanelLayout::for_state(&state);
    for (part, mut node) in &mut parts {
        layout.apply(*part, &mut node);
    }
    for mut t in &mut chevrons {
        t.0 = layout.chevron.to_string();
    }
}

/// Visible field text: the tail of long URLs, a caret while focused.
pub fn url_field_text(url: &UrlInputState) -> (String, Color) {
    if url.text.is_empty() && !url.focused {
        return ("Type an image URL".to_string(), PLACEHOLDER_TEXT);
    }
    let count = url.text.chars().count();
    let mut shown: String = if count > URL_FIELD_VISIBLE_CHARS {
        let tail: String = url.text.chars().skip(count - URL_FIELD_VISIBLE_CHARS).collect();
        format!("...{tail}")
    } else {
        url.text.clone()
    };
    if url.focused {
        shown.push('|');
    }
    (shown, Color::WHITE)
}

pub fn reflect_url_field(
    url: Res<UrlInputState>,
    load: Res<TextureLoadState>,
    mut text: Query<(&mut Text, &mut TextColor), With<UrlInputText>>,
    mut field: Query<&mut BackgroundColor, With<UrlInputField>>,
) {
    if !url.is_changed() && !load.is_changed() { return; }

    let (label, colour) = url_field_text(&url);
    if let Ok((mut t, mut c)) = text.single_mut() {
        if t.0 != label { t.0 = label; }
        *c = TextColor(colour);
    }
    let background = match (load.is_loading(), url.focused) {
        (true, _) => BUTTON_BUSY,
        (false, true) => FIELD_FOCUSED,
        (false, false) => FIELD_IDLE,
    };
    for mut bg in &mut field {
        *bg = BackgroundColor(background);
    }
}

/// Status line text and colour for a load state.
pub fn status_line(status: &LoadStatus) -> (String, Color) {
    match status {
        LoadStatus::Idle => ("No image loaded".to_string(), STATUS_OK),
        LoadStatus::Loading(source) => (format!("Loading {source}..."), STATUS_OK),
        LoadStatus::Ready(source) => (format!("Image: {source}"), STATUS_OK),
        LoadStatus::Failed(message) => (format!("Load failed: {message}"), STATUS_ERROR),
    }
}

pub fn reflect_load_status(
    load: Res<TextureLoadState>,
    mut text: Query<(&mut Text, &mut TextColor), With<StatusText>>,
    mut buttons: Query<&mut BackgroundColor, Or<(With<LoadImageButton>, With<LoadUrlButton>)>>,
) {
    if !load.is_changed() { return; }

    let (label, colour) = status_line(&load.status);
    if let Ok((mut t, mut c)) = text.single_mut() {
        if t.0 != label { *t = Text::new(label); }
        *c = TextColor(colour);
    }
    for mut bg in &mut buttons {
        *bg = BackgroundColor(if load.is_loading() { BUTTON_BUSY } else { BUTTON_IDLE });
    }
}

/// Selection summary shown under the status line.
pub fn selection_line(registry: &DecalRegistry) -> String {
    let count = registry.len();
    let border = registry.border_width();
    match registry.selected() {
        Some(decal) => format!(
            "Selected {} (size {:.2}) of {count}\nBorder {border:.4}",
            decal.id(),
            decal.size()
        ),
        None => format!("No decal selected ({count} placed)\nBorder {border:.4}"),
    }
}

pub fn reflect_selected_decal_label(
    editor: Res<DecalEditor>,
    mut q: Query<&mut Text, With<SelectedDecalLabel>>,
) {
    if !editor.is_changed() { return; }

    let label = selection_line(&editor.registry);
    if let Ok(mut t) = q.single_mut() {
        if t.0 != label { t.0 = label; }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::decal_manager::input::ui_captures_pointer;

    #[test]
    fn failed_status_is_highlighted() {
        let (label, colour) = status_line(&LoadStatus::Failed("image URL is empty".into()));
        assert_eq!(label, "Load failed: image URL is empty");
        assert_eq!(colour, STATUS_ERROR);
        assert_eq!(status_line(&LoadStatus::Idle).1, STATUS_OK);
    }

    fn panel_app(collapsed: bool) -> App {
        let mut app = App::new();
        app.insert_resource(DecalManagerUiState {
            collapsed,
            ..default()
        })
        .init_resource::<UrlInputState>()
        .add_systems(Startup, spawn_decal_manager_ui)
        .add_systems(Update, apply_collapse_state);
        app.update();
        app
    }

    fn node_of(app: &mut App, part: PanelPart) -> Node {
        let world = app.world_mut();
        let mut query = world.query::<(&PanelPart, &Node)>();
        query
            .iter(world)
            .find(|(p, _)| **p == part)
            .map(|(_, node)| node.clone())
            .expect("panel part spawned")
    }

    #[test]
    fn panel_background_blocks_the_pointer() {
        let mut app = panel_app(false);
        let world = app.world_mut();
        let (root, policy) = world
            .query_filtered::<(Entity, &FocusPolicy), With<DecalManagerRoot>>()
            .single(world)
            .map(|(entity, policy)| (entity, *policy))
            .unwrap();
        assert_eq!(policy, FocusPolicy::Block);

        let mut interactions = world.query_filtered::<&Interaction, With<Node>>();
        assert!(!ui_captures_pointer(interactions.iter(world)));

        world.entity_mut(root).insert(Interaction::Hovered);
        assert!(ui_captures_pointer(interactions.iter(world)));
    }

    #[test]
    fn toggling_matches_a_panel_spawned_collapsed() {
        let mut toggled = panel_app(false);
        toggled.world_mut().resource_mut::<DecalManagerUiState>().collapsed = true;
        toggled.update();
        let mut fresh = panel_app(true);

        for part in [
            PanelPart::Root,
            PanelPart::Header,
            PanelPart::Title,
            PanelPart::CollapseButton,
            PanelPart::Body,
        ] {
            assert_eq!(node_of(&mut toggled, part), node_of(&mut fresh, part), "{part:?}");
        }
        assert_eq!(node_of(&mut toggled, PanelPart::Body).display, Display::None);

        let world = toggled.world_mut();
        let mut chevrons = world.query_filtered::<&Text, With<CollapseLabel>>();
        let chevron: Vec<_> = chevrons.iter(world).map(|t| t.0.clone()).collect();
        assert_eq!(chevron, vec![">".to_string()]);
    }

    #[test]
    fn url_field_shows_placeholder_caret_and_tail() {
        let empty = UrlInputState {
            text: String::new(),
            focused: false,
        };
        let (label, colour) = url_field_text(&empty);
        assert_eq!(label, "Type an image URL");
        assert_eq!(colour, PLACEHOLDER_TEXT);

        let focused = UrlInputState {
            text: String::new(),
            focused: true,
        };
        assert_eq!(url_field_text(&focused).0, "|");

        let long = UrlInputState {
            text: format!("https://example.com/{}.png", "a".repeat(40)),
            focused: false,
        };
        let (label, _) = url_field_text(&long);
        assert!(label.starts_with("..."));
        assert!(label.ends_with("aaa.png"));
        assert_eq!(label.chars().count(), URL_FIELD_VISIBLE_CHARS + 3);
    }

    #[test]
    fn selection_line_reports_border_width() {
        let mut registry = DecalRegistry::new(0.01);
        assert_eq!(selection_line(&registry), "No decal selected (0 placed)\nBorder 0.0100");
        registry.set_border_width(0.02);
        assert!(selection_line(&registry).ends_with("Border 0.0200"));
    }
}
