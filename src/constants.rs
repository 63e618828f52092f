//! Layout constants for the mini panel
//!
//! All positions are in virtual-screen pixels: an 800x600 space with the
//! origin at the top-left corner and y growing downwards.

use bevy::prelude::*;

// =============================================================================
// VIRTUAL SCREEN
// =============================================================================

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

// =============================================================================
// PANEL PLACEMENT
// =============================================================================

/// Initial position of the panel widget group
pub const MINI_PANEL_X: i32 = 325;
pub const MINI_PANEL_Y: i32 = 526;

/// Horizontal displacement when a side panel covers one half of the screen
pub const PANEL_OFFSET_LEFT: i32 = 130;
pub const PANEL_OFFSET_RIGHT: i32 = 130;

/// Container sprite anchor relative to (screen center, screen bottom)
pub const CONTAINER_OFFSET_X: i32 = -75;
pub const CONTAINER_OFFSET_Y: i32 = -49;

/// First button anchor relative to (screen center, screen bottom)
pub const BUTTON_OFFSET_X: i32 = -72;
pub const BUTTON_OFFSET_Y: i32 = -52;

/// Gap between two neighbouring buttons
pub const BUTTON_SPACING: i32 = 1;

// =============================================================================
// DEFAULT SHEET METRICS (used until/unless images report their real size)
// =============================================================================

pub const DEFAULT_BUTTON_FRAME_WIDTH: u32 = 20;
pub const DEFAULT_BUTTON_FRAME_HEIGHT: u32 = 20;
pub const DEFAULT_CONTAINER_WIDTH: u32 = 174;
pub const DEFAULT_CONTAINER_SMALL_WIDTH: u32 = 153;
pub const DEFAULT_CONTAINER_HEIGHT: u32 = 26;

/// Button sheet holds a normal and a pressed frame for each of the 8 buttons
pub const DEFAULT_BUTTON_SHEET_COLUMNS: u32 = 16;
pub const DEFAULT_BUTTON_SHEET_ROWS: u32 = 1;

// =============================================================================
// TEXT/UI COLORS
// =============================================================================

pub const TOOLTIP_FONT_SIZE: f32 = 16.0;
pub const TOOLTIP_TEXT: Color = Color::srgb(0.95, 0.9, 0.8); // Bone white/cream
pub const TOOLTIP_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.75);
pub const TOOLTIP_PADDING: f32 = 3.0;
