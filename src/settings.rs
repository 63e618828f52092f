//! Persistent HUD settings
//!
//! Loads user-facing options (single player flag, window scale, asset paths,
//! sheet metrics) from a hud_settings.json file in the config directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/hud_settings.json";

/// Path to the default string table
pub const STRINGS_FILE: &str = "assets/strings/minipanel.toml";

// Serde default functions so older settings files keep loading
fn default_window_scale() -> f32 {
    1.0
}
fn default_container_path() -> String {
    "ui/panel/minipanel.png".to_string()
}
fn default_container_small_path() -> String {
    "ui/panel/minipanel_s.png".to_string()
}
fn default_button_sheet_path() -> String {
    "ui/panel/minipanelbtn.png".to_string()
}
fn default_font_path() -> String {
    "fonts/font16.ttf".to_string()
}
fn default_sheet_columns() -> u32 {
    DEFAULT_BUTTON_SHEET_COLUMNS
}
fn default_sheet_rows() -> u32 {
    DEFAULT_BUTTON_SHEET_ROWS
}
fn default_toggle_key() -> String {
    "Backquote".to_string()
}
fn default_strings_file() -> String {
    STRINGS_FILE.to_string()
}

/// Frame sizes used for layout when the images themselves are not available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultMetrics {
    pub button_frame: [u32; 2],
    pub container: [u32; 2],
    pub container_small: [u32; 2],
}

impl Default for DefaultMetrics {
    fn default() -> Self {
        Self {
            button_frame: [DEFAULT_BUTTON_FRAME_WIDTH, DEFAULT_BUTTON_FRAME_HEIGHT],
            container: [DEFAULT_CONTAINER_WIDTH, DEFAULT_CONTAINER_HEIGHT],
            container_small: [DEFAULT_CONTAINER_SMALL_WIDTH, DEFAULT_CONTAINER_HEIGHT],
        }
    }
}

/// Settings that shape the mini panel at startup
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct HudSettings {
    /// Single player games use the small container and have no party button
    #[serde(default)]
    pub single_player: bool,
    /// Window size multiplier over the 800x600 virtual screen
    #[serde(default = "default_window_scale")]
    pub window_scale: f32,
    #[serde(default = "default_container_path")]
    pub container: String,
    #[serde(default = "default_container_small_path")]
    pub container_small: String,
    #[serde(default = "default_button_sheet_path")]
    pub button_sheet: String,
    #[serde(default = "default_font_path")]
    pub font: String,
    #[serde(default = "default_sheet_columns")]
    pub button_sheet_columns: u32,
    #[serde(default = "default_sheet_rows")]
    pub button_sheet_rows: u32,
    #[serde(default)]
    pub default_metrics: DefaultMetrics,
    /// Key that opens/closes the mini panel (see `input::parse_key_code`)
    #[serde(default = "default_toggle_key")]
    pub toggle_key: String,
    #[serde(default = "default_strings_file")]
    pub strings_file: String,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            single_player: true,
            window_scale: default_window_scale(),
            container: default_container_path(),
            container_small: default_container_small_path(),
            button_sheet: default_button_sheet_path(),
            font: default_font_path(),
            button_sheet_columns: default_sheet_columns(),
            button_sheet_rows: default_sheet_rows(),
            default_metrics: DefaultMetrics::default(),
            toggle_key: default_toggle_key(),
            strings_file: default_strings_file(),
        }
    }
}

impl HudSettings {
    /// Load settings from the default file
    pub fn load() -> Self {
        Self::load_from(SETTINGS_FILE)
    }

    /// Load settings from `path`, or return defaults if it is missing or broken
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(SETTINGS_FILE)
    }

    /// Save settings to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Apply command-line overrides (`--single-player`, `--multiplayer`, `--scale <f>`)
    pub fn apply_args(&mut self, args: &[String]) {
        if args.iter().any(|a| a == "--single-player") {
            self.single_player = true;
        }
        if args.iter().any(|a| a == "--multiplayer") {
            self.single_player = false;
        }
        if let Some(scale) = args
            .iter()
            .position(|a| a == "--scale")
            .and_then(|i| args.get(i + 1).and_then(|s| s.parse::<f32>().ok()))
        {
            if scale > 0.0 {
                self.window_scale = scale;
            } else {
                warn!("Ignoring non-positive --scale {}", scale);
            }
        }
    }

    /// Container image path for the current mode
    pub fn container_path(&self) -> &str {
        if self.single_player {
            &self.container_small
        } else {
            &self.container
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: HudSettings = serde_json::from_str(r#"{ "single_player": false }"#).unwrap();
        assert!(!settings.single_player);
        assert_eq!(settings.window_scale, 1.0);
        assert_eq!(settings.button_sheet_columns, DEFAULT_BUTTON_SHEET_COLUMNS);
        assert_eq!(settings.default_metrics, DefaultMetrics::default());
        assert_eq!(settings.toggle_key, "Backquote");
    }

    #[test]
    fn test_container_path_follows_mode() {
        let mut settings = HudSettings::default();
        settings.single_player = true;
        assert_eq!(settings.container_path(), settings.container_small);
        settings.single_player = false;
        assert_eq!(settings.container_path(), settings.container);
    }

    #[test]
    fn test_apply_args() {
        let mut settings = HudSettings::default();
        settings.apply_args(&args(&["minipanel", "--multiplayer", "--scale", "2"]));
        assert!(!settings.single_player);
        assert_eq!(settings.window_scale, 2.0);

        settings.apply_args(&args(&["minipanel", "--single-player", "--scale", "-1"]));
        assert!(settings.single_player);
        assert_eq!(settings.window_scale, 2.0);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("minipanel_settings_{}", std::process::id()));
        let path = dir.join("hud_settings.json");

        let mut settings = HudSettings::default();
        settings.single_player = false;
        settings.toggle_key = "F2".to_string();
        settings.save_to(&path).unwrap();

        let loaded = HudSettings::load_from(&path);
        assert!(!loaded.single_player);
        assert_eq!(loaded.toggle_key, "F2");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("minipanel_broken_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hud_settings.json");
        fs::write(&path, "{ not json").unwrap();

        let loaded = HudSettings::load_from(&path);
        assert!(loaded.single_player);

        let _ = fs::remove_dir_all(&dir);
    }
}
