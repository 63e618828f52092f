//! Sprite-sheet toggle buttons

use bevy::prelude::*;

use super::group::{GroupMember, WidgetGroup, WidgetVisible};

/// Every button kind the HUD knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonType {
    MinipanelCharacter,
    MinipanelInventory,
    MinipanelSkill,
    MinipanelParty,
    MinipanelAutomap,
    MinipanelMessage,
    MinipanelQuest,
    MinipanelMenu,
}

/// Frames and behavior of a button type on its sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLayout {
    pub base_frame: usize,
    pub pressed_frame: usize,
    pub toggleable: bool,
}

impl ButtonType {
    pub const ALL: [ButtonType; 8] = [
        ButtonType::MinipanelCharacter,
        ButtonType::MinipanelInventory,
        ButtonType::MinipanelSkill,
        ButtonType::MinipanelParty,
        ButtonType::MinipanelAutomap,
        ButtonType::MinipanelMessage,
        ButtonType::MinipanelQuest,
        ButtonType::MinipanelMenu,
    ];

    /// Position of this button's frame pair on the mini panel sheet
    fn sheet_slot(self) -> usize {
        match self {
            ButtonType::MinipanelCharacter => 0,
            ButtonType::MinipanelInventory => 1,
            ButtonType::MinipanelSkill => 2,
            ButtonType::MinipanelParty => 3,
            ButtonType::MinipanelAutomap => 4,
            ButtonType::MinipanelMessage => 5,
            ButtonType::MinipanelQuest => 6,
            ButtonType::MinipanelMenu => 7,
        }
    }

    pub fn layout(self) -> ButtonLayout {
        let slot = self.sheet_slot();
        ButtonLayout {
            base_frame: slot * 2,
            pressed_frame: slot * 2 + 1,
            toggleable: true,
        }
    }
}

/// A HUD button widget
#[derive(Component, Debug, Clone)]
pub struct HudButton {
    pub kind: ButtonType,
    pub tooltip: Option<Entity>,
    /// Held down by the game (e.g. its panel is open)
    pub toggled: bool,
    /// Mouse went down on the button and has not been released yet
    pub pressed: bool,
}

impl HudButton {
    pub fn new(kind: ButtonType) -> Self {
        Self {
            kind,
            tooltip: None,
            toggled: false,
            pressed: false,
        }
    }

    pub fn with_tooltip(mut self, tooltip: Entity) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Frame the button should show right now
    pub fn current_frame(&self) -> usize {
        let layout = self.kind.layout();
        if self.pressed || (layout.toggleable && self.toggled) {
            layout.pressed_frame
        } else {
            layout.base_frame
        }
    }
}

/// Written when a button is clicked (press then release over the button)
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonActivated {
    pub button: Entity,
    pub kind: ButtonType,
}

/// Track press/release and hover, activate on release, show tooltips on hover
pub fn button_interaction(
    mut buttons: Query<(Entity, &Interaction, &mut HudButton, Option<&GroupMember>), Changed<Interaction>>,
    groups: Query<&WidgetGroup>,
    mut tooltips: Query<&mut WidgetVisible>,
    mut activated: MessageWriter<ButtonActivated>,
) {
    for (entity, interaction, mut button, member) in &mut buttons {
        let group_visible = member
            .and_then(|m| groups.get(m.0).ok())
            .is_none_or(|g| g.is_visible());

        match interaction {
            Interaction::Pressed => {
                button.pressed = true;
            }
            Interaction::Hovered => {
                if button.pressed && group_visible {
                    debug!("Button {:?} activated", button.kind);
                    activated.write(ButtonActivated {
                        button: entity,
                        kind: button.kind,
                    });
                }
                button.pressed = false;
            }
            Interaction::None => {
                button.pressed = false;
            }
        }

        if let Some(mut shown) = button.tooltip.and_then(|t| tooltips.get_mut(t).ok()) {
            shown.0 = group_visible && *interaction != Interaction::None;
        }
    }
}

/// Drop hover and press state of buttons whose group was hidden under the
/// cursor. Hidden nodes get no further `Interaction` changes.
pub fn reset_hidden_buttons(
    mut buttons: Query<(&mut HudButton, Option<&GroupMember>)>,
    groups: Query<&WidgetGroup>,
    mut tooltips: Query<&mut WidgetVisible>,
) {
    for (mut button, member) in &mut buttons {
        let group_visible = member
            .and_then(|m| groups.get(m.0).ok())
            .is_none_or(|g| g.is_visible());
        if group_visible {
            continue;
        }
        if button.pressed {
            button.pressed = false;
        }
        if let Some(mut shown) = button.tooltip.and_then(|t| tooltips.get_mut(t).ok())
            && shown.0
        {
            shown.0 = false;
        }
    }
}

/// Point each button's atlas at its current frame
pub fn update_button_frames(mut buttons: Query<(&HudButton, &mut ImageNode), Changed<HudButton>>) {
    for (button, mut image) in &mut buttons {
        let frame = button.current_frame();
        if let Some(atlas) = image.texture_atlas.as_mut()
            && atlas.index != frame
        {
            atlas.index = frame;
        }
    }
}
