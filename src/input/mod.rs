//! Input module - mini panel hotkeys and pointer tracking

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::mini_panel::{MiniPanel, MiniPanelCommand, PanelKind, PanelToggleRequest};
use crate::settings::HudSettings;
use crate::widgets::WidgetGroup;

/// Key bindings for the panel toggles
#[derive(Resource, Debug, Clone)]
pub struct MiniPanelHotkeys {
    /// Opens/closes the mini panel itself
    pub toggle: Option<KeyCode>,
    pub panels: Vec<(KeyCode, PanelKind)>,
}

impl MiniPanelHotkeys {
    pub fn from_settings(settings: &HudSettings) -> Self {
        let toggle = parse_key_code(&settings.toggle_key);
        if toggle.is_none() {
            warn!("Unknown toggle key '{}', mini panel has no hotkey", settings.toggle_key);
        }

        let mut panels = vec![
            (KeyCode::KeyC, PanelKind::Character),
            (KeyCode::KeyI, PanelKind::Inventory),
            (KeyCode::KeyT, PanelKind::SkillTree),
            (KeyCode::Tab, PanelKind::Automap),
            (KeyCode::KeyM, PanelKind::MessageLog),
            (KeyCode::KeyQ, PanelKind::QuestLog),
            (KeyCode::Escape, PanelKind::Menu),
        ];
        // No party screen in single player games
        if !settings.single_player {
            panels.push((KeyCode::KeyP, PanelKind::Party));
        }

        Self { toggle, panels }
    }
}

/// Map a key name from the settings file to a key code
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let key = match name.trim() {
        "Backquote" | "`" => KeyCode::Backquote,
        "Tab" => KeyCode::Tab,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "F5" => KeyCode::F5,
        "F6" => KeyCode::F6,
        "F7" => KeyCode::F7,
        "F8" => KeyCode::F8,
        "F9" => KeyCode::F9,
        "F10" => KeyCode::F10,
        "F11" => KeyCode::F11,
        "F12" => KeyCode::F12,
        other => {
            let mut chars = other.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return None;
            };
            letter_key(c.to_ascii_uppercase())?
        }
    };
    Some(key)
}

fn letter_key(c: char) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    if c.is_ascii_uppercase() {
        Some(LETTERS[(c as u8 - b'A') as usize])
    } else {
        None
    }
}

/// Write toggle requests/commands for pressed hotkeys
pub fn panel_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    hotkeys: Res<MiniPanelHotkeys>,
    mut requests: MessageWriter<PanelToggleRequest>,
    mut commands: MessageWriter<MiniPanelCommand>,
) {
    if let Some(toggle) = hotkeys.toggle
        && keyboard.just_pressed(toggle)
    {
        commands.write(MiniPanelCommand::Toggle);
    }

    for (key, target) in &hotkeys.panels {
        if keyboard.just_pressed(*key) {
            requests.write(PanelToggleRequest { target: *target });
        }
    }
}

/// Whether the cursor is over the visible mini panel
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerOverMiniPanel(pub bool);

/// Convert a logical cursor position to virtual-screen pixels
pub fn to_virtual(cursor: Vec2, ui_scale: f32) -> IVec2 {
    let scale = if ui_scale > 0.0 { ui_scale } else { 1.0 };
    (cursor / scale).floor().as_ivec2()
}

/// Update `PointerOverMiniPanel` from the primary window cursor
pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_scale: Option<Res<UiScale>>,
    mini_panel: Res<MiniPanel>,
    groups: Query<&WidgetGroup>,
    mut over: ResMut<PointerOverMiniPanel>,
) {
    let cursor = windows.single().ok().and_then(|w| w.cursor_position());
    let panel = mini_panel.panel_group.and_then(|e| groups.get(e).ok());

    let inside = match (cursor, panel) {
        (Some(cursor), Some(panel)) if panel.is_visible() => {
            let point = to_virtual(cursor, ui_scale.map(|s| s.0).unwrap_or(1.0));
            mini_panel.is_in_rect(panel, point.x, point.y)
        }
        _ => false,
    };

    if over.0 != inside {
        over.0 = inside;
    }
}
