//! Messages connecting the mini panel to the rest of the game
//!
//! Button clicks go out as `PanelToggleRequest`; the game answers with
//! `PanelStateChanged` and `SidePanelChanged`, and can drive the panel itself
//! with `MiniPanelCommand`.

use bevy::prelude::*;

use super::state::{MiniPanel, PanelGroups, PanelStatus};
use crate::widgets::{ButtonActivated, ButtonType, HudButton, WidgetGroup};

/// Game panels the mini panel buttons open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Character,
    Inventory,
    SkillTree,
    Party,
    Automap,
    MessageLog,
    QuestLog,
    Menu,
}

/// Screen half a side panel occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelSide {
    Left,
    Right,
}

impl PanelKind {
    pub const ALL: [PanelKind; 8] = [
        PanelKind::Character,
        PanelKind::Inventory,
        PanelKind::SkillTree,
        PanelKind::Party,
        PanelKind::Automap,
        PanelKind::MessageLog,
        PanelKind::QuestLog,
        PanelKind::Menu,
    ];

    pub fn button(self) -> ButtonType {
        match self {
            PanelKind::Character => ButtonType::MinipanelCharacter,
            PanelKind::Inventory => ButtonType::MinipanelInventory,
            PanelKind::SkillTree => ButtonType::MinipanelSkill,
            PanelKind::Party => ButtonType::MinipanelParty,
            PanelKind::Automap => ButtonType::MinipanelAutomap,
            PanelKind::MessageLog => ButtonType::MinipanelMessage,
            PanelKind::QuestLog => ButtonType::MinipanelQuest,
            PanelKind::Menu => ButtonType::MinipanelMenu,
        }
    }

    /// Half of the screen the panel covers, if it is a side panel
    pub fn side(self) -> Option<PanelSide> {
        match self {
            PanelKind::Character | PanelKind::QuestLog | PanelKind::Party => Some(PanelSide::Left),
            PanelKind::Inventory | PanelKind::SkillTree => Some(PanelSide::Right),
            PanelKind::Automap | PanelKind::MessageLog | PanelKind::Menu => None,
        }
    }
}

impl From<ButtonType> for PanelKind {
    fn from(button: ButtonType) -> Self {
        match button {
            ButtonType::MinipanelCharacter => PanelKind::Character,
            ButtonType::MinipanelInventory => PanelKind::Inventory,
            ButtonType::MinipanelSkill => PanelKind::SkillTree,
            ButtonType::MinipanelParty => PanelKind::Party,
            ButtonType::MinipanelAutomap => PanelKind::Automap,
            ButtonType::MinipanelMessage => PanelKind::MessageLog,
            ButtonType::MinipanelQuest => PanelKind::QuestLog,
            ButtonType::MinipanelMenu => PanelKind::Menu,
        }
    }
}

/// A mini panel button (or its hotkey) asks for a panel to be toggled
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelToggleRequest {
    pub target: PanelKind,
}

/// Open/close the mini panel itself
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiniPanelCommand {
    Open,
    Close,
    Toggle,
}

/// A side panel opened or closed
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidePanelChanged {
    pub side: PanelSide,
    pub open: bool,
}

/// The game reports whether a panel is open, so its button can stay pressed
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStateChanged {
    pub target: PanelKind,
    pub open: bool,
}

/// Turn button clicks into toggle requests
pub fn forward_button_activations(
    mut activated: MessageReader<ButtonActivated>,
    mut requests: MessageWriter<PanelToggleRequest>,
) {
    for activation in activated.read() {
        let target = PanelKind::from(activation.kind);
        info!("Mini panel requests {:?}", target);
        requests.write(PanelToggleRequest { target });
    }
}

/// Group entities of a panel whose widgets exist
fn ready_groups(mini_panel: &MiniPanel) -> Option<[Entity; 2]> {
    if mini_panel.status != PanelStatus::Ready {
        return None;
    }
    mini_panel.groups()
}

/// Apply open/close/toggle commands
pub fn apply_panel_commands(
    mut commands: MessageReader<MiniPanelCommand>,
    mut mini_panel: ResMut<MiniPanel>,
    mut groups: Query<&mut WidgetGroup>,
) {
    if commands.is_empty() {
        return;
    }
    let Some(entities) = ready_groups(&mini_panel) else {
        debug!("Ignoring mini panel commands, panel not ready");
        commands.clear();
        return;
    };
    let Ok([mut panel, mut tooltips]) = groups.get_many_mut(entities) else {
        warn!("Mini panel widget groups are missing");
        commands.clear();
        return;
    };
    let mut panel_groups = PanelGroups {
        panel: &mut *panel,
        tooltips: &mut *tooltips,
    };

    for command in commands.read() {
        match command {
            MiniPanelCommand::Open => mini_panel.open(&mut panel_groups),
            MiniPanelCommand::Close => mini_panel.close(&mut panel_groups),
            MiniPanelCommand::Toggle => mini_panel.toggle(&mut panel_groups),
        }
        debug!("Mini panel {:?} -> open={}", command, mini_panel.is_open());
    }
}

/// Move the panel out of the way of side panels
pub fn apply_side_panel_changes(
    mut changes: MessageReader<SidePanelChanged>,
    mut mini_panel: ResMut<MiniPanel>,
    mut groups: Query<&mut WidgetGroup>,
) {
    if changes.is_empty() {
        return;
    }
    let Some(entities) = ready_groups(&mini_panel) else {
        debug!("Ignoring side panel changes, panel not ready");
        changes.clear();
        return;
    };
    let Ok([mut panel, mut tooltips]) = groups.get_many_mut(entities) else {
        warn!("Mini panel widget groups are missing");
        changes.clear();
        return;
    };
    let mut panel_groups = PanelGroups {
        panel: &mut *panel,
        tooltips: &mut *tooltips,
    };

    for change in changes.read() {
        // A panel on the right pushes the mini panel left and vice versa
        match change.side {
            PanelSide::Right => mini_panel.set_moved_left(change.open, &mut panel_groups),
            PanelSide::Left => mini_panel.set_moved_right(change.open, &mut panel_groups),
        }
    }
}

/// Keep toggleable buttons pressed while their panel is open
pub fn apply_panel_state(mut changes: MessageReader<PanelStateChanged>, mut buttons: Query<&mut HudButton>) {
    for change in changes.read() {
        let kind = change.target.button();
        for mut button in &mut buttons {
            if button.kind == kind && button.toggled != change.open {
                button.toggled = change.open;
            }
        }
    }
}
