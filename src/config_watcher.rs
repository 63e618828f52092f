//! Config file auto-reload system
//!
//! Polls the string table and HUD settings every few seconds and reloads
//! what can change at runtime (tooltip texts, hotkeys).

use bevy::prelude::*;
use std::fs;
use std::time::SystemTime;

use crate::input::MiniPanelHotkeys;
use crate::mini_panel::MiniPanel;
use crate::settings::{HudSettings, SETTINGS_FILE};
use crate::strings::StringTable;

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 5.0;

/// Tracks modification times of config files for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    pub strings_path: String,
    pub settings_path: String,
    pub strings_mtime: Option<SystemTime>,
    pub settings_mtime: Option<SystemTime>,
}

impl ConfigWatcher {
    pub fn new(strings_path: impl Into<String>, settings_path: impl Into<String>) -> Self {
        let strings_path = strings_path.into();
        let settings_path = settings_path.into();
        Self {
            timer: 0.0,
            strings_mtime: get_mtime(&strings_path),
            settings_mtime: get_mtime(&settings_path),
            strings_path,
            settings_path,
        }
    }

    pub fn from_settings(settings: &HudSettings) -> Self {
        Self::new(settings.strings_file.clone(), SETTINGS_FILE)
    }

    /// Advance the poll timer; true when a check is due
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        self.timer += delta_secs;
        if self.timer < CHECK_INTERVAL {
            return false;
        }
        self.timer = 0.0;
        true
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &str) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Record the new mtime of `path`; true if it differs from `last`
fn changed(path: &str, last: &mut Option<SystemTime>) -> bool {
    let current = get_mtime(path);
    if current != *last {
        *last = current;
        current.is_some()
    } else {
        false
    }
}

/// Check for config file changes and reload as needed.
pub fn check_config_changes(
    time: Res<Time>,
    mut watcher: ResMut<ConfigWatcher>,
    mut strings: ResMut<StringTable>,
    mut hotkeys: ResMut<MiniPanelHotkeys>,
    mini_panel: Res<MiniPanel>,
) {
    if !watcher.tick(time.delta_secs()) {
        return;
    }

    let watcher = &mut *watcher;
    if changed(&watcher.strings_path, &mut watcher.strings_mtime) {
        info!("Reloading strings from {}", watcher.strings_path);
        *strings = StringTable::load_from_file(&watcher.strings_path);
    }

    if changed(&watcher.settings_path, &mut watcher.settings_mtime) {
        let settings = HudSettings::load_from(&watcher.settings_path);
        *hotkeys = MiniPanelHotkeys::from_settings(&HudSettings {
            single_player: mini_panel.is_single_player(),
            ..settings.clone()
        });
        info!("Reloaded hotkeys from {}", watcher.settings_path);
        if settings.single_player != mini_panel.is_single_player() {
            warn!("Single player mode changed in settings, restart to apply");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_waits_for_interval() {
        let mut watcher = ConfigWatcher::new("nope.toml", "nope.json");
        assert!(!watcher.tick(1.0));
        assert!(!watcher.tick(3.0));
        assert!(watcher.tick(1.5));
        assert_eq!(watcher.timer, 0.0);
    }

    #[test]
    fn test_changed_detects_new_file() {
        let dir = std::env::temp_dir().join(format!("minipanel_watch_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("strings.toml");
        let path_str = path.to_string_lossy().to_string();

        let mut last = get_mtime(&path_str);
        assert!(last.is_none());
        assert!(!changed(&path_str, &mut last));

        fs::write(&path, "minipanelchar = \"Held (C)\"").unwrap();
        assert!(changed(&path_str, &mut last));
        assert!(!changed(&path_str, &mut last));

        let _ = fs::remove_dir_all(&dir);
    }
}
