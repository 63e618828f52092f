//! Text tooltips anchored to a point

use bevy::prelude::*;

use super::group::{GroupMember, WidgetGroup};
use crate::strings::StringTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipXAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipYAlign {
    Top,
    Center,
    Bottom,
}

/// Tooltip widget: `origin` is the anchor point the alignment refers to
#[derive(Component, Debug, Clone)]
pub struct Tooltip {
    pub origin: IVec2,
    pub x_align: TooltipXAlign,
    pub y_align: TooltipYAlign,
    /// Translation key of the text
    pub text_key: String,
}

impl Tooltip {
    pub fn new(text_key: impl Into<String>, x_align: TooltipXAlign, y_align: TooltipYAlign) -> Self {
        Self {
            origin: IVec2::ZERO,
            x_align,
            y_align,
            text_key: text_key.into(),
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.origin = IVec2::new(x, y);
        self
    }
}

/// Top-left corner of a box of `size` whose anchor sits at `origin`
pub fn tooltip_top_left(origin: Vec2, size: Vec2, x_align: TooltipXAlign, y_align: TooltipYAlign) -> Vec2 {
    let x = match x_align {
        TooltipXAlign::Left => origin.x,
        TooltipXAlign::Center => origin.x - size.x / 2.0,
        TooltipXAlign::Right => origin.x - size.x,
    };
    let y = match y_align {
        TooltipYAlign::Top => origin.y,
        TooltipYAlign::Center => origin.y - size.y / 2.0,
        TooltipYAlign::Bottom => origin.y - size.y,
    };
    Vec2::new(x, y)
}

/// Place tooltips using their measured size and their group's offset
pub fn position_tooltips(
    groups: Query<&WidgetGroup>,
    mut tooltips: Query<(&Tooltip, &ComputedNode, Option<&GroupMember>, &mut Node)>,
) {
    for (tooltip, computed, member, mut node) in &mut tooltips {
        let offset = member
            .and_then(|m| groups.get(m.0).ok())
            .map(|g| g.offset())
            .unwrap_or(IVec2::ZERO);
        let size = computed.size() * computed.inverse_scale_factor();
        let origin = (tooltip.origin + offset).as_vec2();
        let top_left = tooltip_top_left(origin, size, tooltip.x_align, tooltip.y_align);

        let left = Val::Px(top_left.x.round());
        let top = Val::Px(top_left.y.round());
        if node.left != left || node.top != top {
            node.left = left;
            node.top = top;
        }
    }
}

/// Re-translate tooltip texts after the string table changed
pub fn refresh_tooltip_text(strings: Res<StringTable>, mut tooltips: Query<(&Tooltip, &mut Text)>) {
    if !strings.is_changed() {
        return;
    }
    for (tooltip, mut text) in &mut tooltips {
        let translated = strings.translate(&tooltip.text_key);
        if text.0 != translated {
            text.0 = translated.to_string();
        }
    }
}
