//! Minipanel - the bottom-screen HUD strip of panel toggle buttons, built with Bevy
//!
//! This crate provides the widget layer, the mini panel state and layout, and
//! the plugin wiring them into an app.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod debug_logging;
pub mod error;
pub mod headless;
pub mod settings;
pub mod strings;

// HUD modules
pub mod input;
pub mod mini_panel;
pub mod widgets;

// Re-export commonly used types for convenience
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use debug_logging::DebugLogConfig;
pub use error::MiniPanelError;
pub use headless::HeadlessAppBuilder;
pub use input::{MiniPanelHotkeys, PointerOverMiniPanel};
pub use mini_panel::{
    MiniPanel, MiniPanelCommand, MiniPanelLayout, MiniPanelPlugin, MiniPanelSet, PanelKind, PanelSide,
    PanelStateChanged, PanelStatus, PanelToggleRequest, SheetMetrics, SidePanelChanged,
};
pub use settings::{HudSettings, SETTINGS_FILE};
pub use strings::StringTable;
pub use widgets::{ButtonType, HudButton, RenderPriority, Tooltip, WidgetGroup, WidgetRect};
