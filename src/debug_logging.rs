//! Debug logging configuration for the HUD binary.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEBUG_LOG_SETTINGS_FILE: &str = "config/debug_logging.json";

#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct DebugLogConfig {
    pub enabled: bool,
    /// Log every computed button/tooltip position when the panel is built
    #[serde(default)]
    pub log_layout: bool,
}

impl Default for DebugLogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_layout: false,
        }
    }
}

impl DebugLogConfig {
    pub fn load() -> Self {
        let path = Path::new(DEBUG_LOG_SETTINGS_FILE);
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn enabled_from_args(args: &[String]) -> bool {
        args.iter().any(|arg| arg == "--debug-log")
    }

    pub fn load_with_args(args: &[String]) -> Self {
        let mut config = Self::load();
        if Self::enabled_from_args(args) {
            config.enabled = true;
        }
        config
    }

    /// Log filter: this crate at debug when enabled, wgpu/naga kept quiet
    pub fn filter(&self) -> String {
        let crate_level = if self.enabled { "debug" } else { "info" };
        format!("wgpu=error,naga=warn,minipanel={}", crate_level)
    }

    pub fn log_plugin(&self) -> LogPlugin {
        LogPlugin {
            filter: self.filter(),
            level: Level::INFO,
            ..Default::default()
        }
    }
}
