//! Widget layer - groups, sprite buttons and tooltips on top of bevy_ui

mod button;
mod group;
mod tooltip;

pub use button::*;
pub use group::*;
pub use tooltip::*;
