//! Open/closed and left/right displacement state of the mini panel

use bevy::prelude::*;

use crate::constants::{PANEL_OFFSET_LEFT, PANEL_OFFSET_RIGHT};
use crate::widgets::WidgetGroup;

/// Where the panel is in its build lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Unloaded,
    Loading,
    Ready,
    Failed,
}

/// The two widget groups the panel drives
pub struct PanelGroups<'a> {
    pub panel: &'a mut WidgetGroup,
    pub tooltips: &'a mut WidgetGroup,
}

/// Mini panel state
///
/// `open` and `close` show and hide the panel group directly. Side panels
/// opening on both halves of the screen hide it; when one of them closes
/// again the panel comes back only if it is open.
#[derive(Resource, Debug, Clone)]
pub struct MiniPanel {
    is_open: bool,
    is_single_player: bool,
    moved_left: bool,
    moved_right: bool,
    pub panel_group: Option<Entity>,
    pub tooltip_group: Option<Entity>,
    pub status: PanelStatus,
}

impl MiniPanel {
    pub fn new(is_single_player: bool) -> Self {
        Self {
            is_open: false,
            is_single_player,
            moved_left: false,
            moved_right: false,
            panel_group: None,
            tooltip_group: None,
            status: PanelStatus::Unloaded,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_single_player(&self) -> bool {
        self.is_single_player
    }

    pub fn moved_left(&self) -> bool {
        self.moved_left
    }

    pub fn moved_right(&self) -> bool {
        self.moved_right
    }

    /// Both group entities once the widgets exist
    pub fn groups(&self) -> Option<[Entity; 2]> {
        Some([self.panel_group?, self.tooltip_group?])
    }

    pub fn toggle(&mut self, groups: &mut PanelGroups) {
        if self.is_open {
            self.close(groups);
        } else {
            self.open(groups);
        }
    }

    pub fn open(&mut self, groups: &mut PanelGroups) {
        self.is_open = true;
        groups.panel.set_visible(true);
    }

    pub fn close(&mut self, groups: &mut PanelGroups) {
        self.is_open = false;
        groups.panel.set_visible(false);
    }

    /// Whether a virtual-screen point lies inside the panel region
    pub fn is_in_rect(&self, panel: &WidgetGroup, px: i32, py: i32) -> bool {
        panel.contains(px, py)
    }

    /// Hide for a side panel on each half, or show again if still open
    fn squeeze(&self, squeezed: bool, groups: &mut PanelGroups) {
        if squeezed {
            groups.panel.set_visible(false);
        } else if self.is_open {
            groups.panel.set_visible(true);
        }
    }

    fn move_right(groups: &mut PanelGroups) {
        groups.panel.offset_position(PANEL_OFFSET_RIGHT, 0);
        groups.tooltips.offset_position(PANEL_OFFSET_RIGHT, 0);
    }

    fn undo_move_right(groups: &mut PanelGroups) {
        groups.panel.offset_position(-PANEL_OFFSET_RIGHT, 0);
        groups.tooltips.offset_position(-PANEL_OFFSET_RIGHT, 0);
    }

    fn move_left(groups: &mut PanelGroups) {
        groups.panel.offset_position(-PANEL_OFFSET_LEFT, 0);
        groups.tooltips.offset_position(-PANEL_OFFSET_LEFT, 0);
    }

    fn undo_move_left(groups: &mut PanelGroups) {
        groups.panel.offset_position(PANEL_OFFSET_LEFT, 0);
        groups.tooltips.offset_position(PANEL_OFFSET_LEFT, 0);
    }

    /// Shift the panel left to make room for a panel on the right half.
    /// If it was already shifted right, the two shifts cancel and the panel
    /// is hidden instead.
    pub fn set_moved_left(&mut self, move_left: bool, groups: &mut PanelGroups) {
        if self.moved_left == move_left {
            return;
        }

        if self.moved_right {
            if move_left {
                Self::undo_move_right(groups);
            } else {
                Self::move_right(groups);
            }
            self.squeeze(move_left, groups);
        } else if move_left {
            Self::move_left(groups);
        } else {
            Self::undo_move_left(groups);
        }

        self.moved_left = move_left;
    }

    /// Mirror image of `set_moved_left`
    pub fn set_moved_right(&mut self, move_right: bool, groups: &mut PanelGroups) {
        if self.moved_right == move_right {
            return;
        }

        if self.moved_left {
            if move_right {
                Self::undo_move_left(groups);
            } else {
                Self::move_left(groups);
            }
            self.squeeze(move_right, groups);
        } else if move_right {
            Self::move_right(groups);
        } else {
            Self::undo_move_right(groups);
        }

        self.moved_right = move_right;
    }

    /// Horizontal displacement implied by the moved flags
    pub fn expected_offset(&self) -> i32 {
        let mut offset = 0;
        if self.moved_right {
            offset += PANEL_OFFSET_RIGHT;
        }
        if self.moved_left {
            offset -= PANEL_OFFSET_LEFT;
        }
        offset
    }
}
