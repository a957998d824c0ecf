use bevy::prelude::*;

pub const OUTLINE_COLOUR: Color = Color::srgb(1.0, 1.0, 0.0);

pub const PANEL_BACKGROUND: Color = Color::srgb(0.10, 0.11, 0.13);
pub const PANEL_HEADER: Color = Color::srgb(0.14, 0.16, 0.20);
pub const PANEL_BODY: Color = Color::srgb(0.12, 0.13, 0.15);
pub const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
pub const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
pub const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
pub const BUTTON_BUSY: Color = Color::srgb(0.30, 0.34, 0.40);
pub const DANGER_IDLE: Color = Color::srgb(0.28, 0.10, 0.10);
pub const DANGER_HOVERED: Color = Color::srgb(0.34, 0.14, 0.14);
pub const DANGER_PRESSED: Color = Color::srgb(0.20, 0.12, 0.12);
pub const BUTTON_BORDER: Color = Color::srgba(0.0, 0.0, 0.0, 0.25);
pub const STATUS_ERROR: Color = Color::srgb(1.0, 0.45, 0.45);
pub const STATUS_OK: Color = Color::srgb(0.85, 0.88, 0.92);

pub const PANEL_OPEN_WIDTH: f32 = 280.0;
pub const PANEL_CLOSED_WIDTH: f32 = 32.0;

pub const FIELD_IDLE: Color = Color::srgb(0.08, 0.09, 0.10);
pub const FIELD_FOCUSED: Color = Color::srgb(0.16, 0.20, 0.26);
pub const PLACEHOLDER_TEXT: Color = Color::srgb(0.5, 0.52, 0.56);
