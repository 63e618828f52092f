//! Mini panel position math

use bevy::prelude::*;

use crate::constants::*;
use crate::error::MiniPanelError;
use crate::widgets::{ButtonType, WidgetRect};

/// Frame sizes of the sprites the layout depends on
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetMetrics {
    pub button_frame: UVec2,
    /// Frame 0 of the selected container variant
    pub container: UVec2,
    /// Number of frames on the button sheet
    pub button_frames: usize,
}

/// Content of one panel button: what it is and its tooltip key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiniPanelContent {
    pub kind: ButtonType,
    pub tooltip_key: &'static str,
}

const fn content(kind: ButtonType, tooltip_key: &'static str) -> MiniPanelContent {
    MiniPanelContent { kind, tooltip_key }
}

/// Buttons left of the (optional) party button
pub const BUTTONS_FIRST: [MiniPanelContent; 3] = [
    content(ButtonType::MinipanelCharacter, "minipanelchar"),
    content(ButtonType::MinipanelInventory, "minipanelinv"),
    content(ButtonType::MinipanelSkill, "minipaneltree"),
];

/// Only present in multiplayer games
pub const BUTTON_PARTY: MiniPanelContent = content(ButtonType::MinipanelParty, "minipanelparty");

pub const BUTTONS_LAST: [MiniPanelContent; 4] = [
    content(ButtonType::MinipanelAutomap, "minipanelautomap"),
    content(ButtonType::MinipanelMessage, "minipanelmessage"),
    content(ButtonType::MinipanelQuest, "minipanelquest"),
    content(ButtonType::MinipanelMenu, "minipanelmenubtn"),
];

/// A positioned button and its tooltip anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSlot {
    pub content: MiniPanelContent,
    pub slot: usize,
    pub rect: WidgetRect,
    pub tooltip_origin: IVec2,
}

/// Every widget position of the mini panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniPanelLayout {
    pub container: WidgetRect,
    pub button_width: i32,
    pub button_height: i32,
    pub buttons: Vec<ButtonSlot>,
}

impl MiniPanelLayout {
    /// Lay out the panel for a screen of `screen` pixels
    pub fn compute(screen: IVec2, metrics: &SheetMetrics, single_player: bool) -> Result<Self, MiniPanelError> {
        if metrics.container.x == 0 || metrics.container.y == 0 {
            return Err(MiniPanelError::InvalidFrame {
                sprite: "container".to_string(),
                width: metrics.container.x,
                height: metrics.container.y,
            });
        }
        if metrics.button_frame.x == 0 || metrics.button_frame.y == 0 {
            return Err(MiniPanelError::InvalidFrame {
                sprite: "button sheet".to_string(),
                width: metrics.button_frame.x,
                height: metrics.button_frame.y,
            });
        }

        // Container sprite is anchored by its bottom-left corner
        let container_x = screen.x / 2 + CONTAINER_OFFSET_X;
        let container_bottom = screen.y + CONTAINER_OFFSET_Y;
        let container = WidgetRect::new(
            container_x,
            container_bottom - metrics.container.y as i32,
            metrics.container.x as i32,
            metrics.container.y as i32,
        );

        let button_width = metrics.button_frame.x as i32 + BUTTON_SPACING;
        let button_height = metrics.button_frame.y as i32;
        let x = screen.x / 2 + BUTTON_OFFSET_X;
        let y = screen.y + BUTTON_OFFSET_Y - button_height;

        let mut contents: Vec<MiniPanelContent> = BUTTONS_FIRST.to_vec();
        if !single_player {
            contents.push(BUTTON_PARTY);
        }
        contents.extend(BUTTONS_LAST);

        let mut buttons = Vec::with_capacity(contents.len());
        for (slot, content) in contents.into_iter().enumerate() {
            let pressed_frame = content.kind.layout().pressed_frame;
            if pressed_frame >= metrics.button_frames {
                return Err(MiniPanelError::MissingFrame {
                    sprite: "button sheet".to_string(),
                    frame: pressed_frame,
                    frames: metrics.button_frames,
                });
            }

            let bx = x + slot as i32 * button_width;
            buttons.push(ButtonSlot {
                content,
                slot,
                rect: WidgetRect::new(bx, y, metrics.button_frame.x as i32, button_height),
                tooltip_origin: IVec2::new(bx, y - button_height),
            });
        }

        Ok(Self {
            container,
            button_width,
            button_height,
            buttons,
        })
    }

    pub fn slot_of(&self, kind: ButtonType) -> Option<&ButtonSlot> {
        self.buttons.iter().find(|b| b.content.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: IVec2 = IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    fn metrics() -> SheetMetrics {
        SheetMetrics {
            button_frame: UVec2::new(20, 20),
            container: UVec2::new(174, 26),
            button_frames: 16,
        }
    }

    #[test]
    fn test_multiplayer_has_party_at_slot_three() {
        let layout = MiniPanelLayout::compute(SCREEN, &metrics(), false).unwrap();
        assert_eq!(layout.buttons.len(), 8);

        let party = layout.slot_of(ButtonType::MinipanelParty).unwrap();
        assert_eq!(party.slot, 3);
        assert_eq!(party.rect.x, 328 + 3 * 21);

        let menu = layout.slot_of(ButtonType::MinipanelMenu).unwrap();
        assert_eq!(menu.slot, 7);
        assert_eq!(menu.rect.x, 328 + 7 * 21);
    }

    #[test]
    fn test_single_player_omits_party() {
        let layout = MiniPanelLayout::compute(SCREEN, &metrics(), true).unwrap();
        assert_eq!(layout.buttons.len(), 7);
        assert!(layout.slot_of(ButtonType::MinipanelParty).is_none());

        let automap = layout.slot_of(ButtonType::MinipanelAutomap).unwrap();
        assert_eq!(automap.slot, 3);
        assert_eq!(automap.rect.x, 328 + 3 * 21);
    }

    #[test]
    fn test_positions() {
        let layout = MiniPanelLayout::compute(SCREEN, &metrics(), false).unwrap();

        // 800/2 - 75, bottom edge at 600 - 49
        assert_eq!(layout.container, WidgetRect::new(325, 525, 174, 26));

        assert_eq!(layout.button_width, 21);
        assert_eq!(layout.button_height, 20);

        let first = &layout.buttons[0];
        assert_eq!(first.content.kind, ButtonType::MinipanelCharacter);
        assert_eq!(first.rect, WidgetRect::new(328, 528, 20, 20));
        assert_eq!(first.tooltip_origin, IVec2::new(328, 508));
    }

    #[test]
    fn test_tooltip_keys_follow_buttons() {
        let layout = MiniPanelLayout::compute(SCREEN, &metrics(), false).unwrap();
        let keys: Vec<&str> = layout.buttons.iter().map(|b| b.content.tooltip_key).collect();
        assert_eq!(
            keys,
            vec![
                "minipanelchar",
                "minipanelinv",
                "minipaneltree",
                "minipanelparty",
                "minipanelautomap",
                "minipanelmessage",
                "minipanelquest",
                "minipanelmenubtn",
            ]
        );
    }

    #[test]
    fn test_zero_frame_is_an_error() {
        let mut bad = metrics();
        bad.button_frame = UVec2::new(0, 20);
        assert!(matches!(
            MiniPanelLayout::compute(SCREEN, &bad, false),
            Err(MiniPanelError::InvalidFrame { .. })
        ));
    }

    #[test]
    fn test_short_sheet_is_an_error() {
        let mut bad = metrics();
        bad.button_frames = 8;
        let err = MiniPanelLayout::compute(SCREEN, &bad, true).unwrap_err();
        assert_eq!(
            err,
            MiniPanelError::MissingFrame {
                sprite: "button sheet".to_string(),
                frame: 9,
                frames: 8,
            }
        );
    }
}
