//! Translation table for HUD text

use bevy::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Built-in English strings for the mini panel tooltips
const DEFAULT_STRINGS: [(&str, &str); 8] = [
    ("minipanelchar", "Character (C)"),
    ("minipanelinv", "Inventory (I)"),
    ("minipaneltree", "Skill Tree (T)"),
    ("minipanelparty", "Party Screen (P)"),
    ("minipanelautomap", "Automap (Tab)"),
    ("minipanelmessage", "Message Log (M)"),
    ("minipanelquest", "Quest Log (Q)"),
    ("minipanelmenubtn", "Game Menu (Esc)"),
];

/// Key -> display text lookup
#[derive(Resource, Debug, Clone)]
pub struct StringTable {
    entries: HashMap<String, String>,
}

impl Default for StringTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_STRINGS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl StringTable {
    /// Load overrides from a TOML file of `key = "text"` pairs.
    /// Keys missing from the file keep their built-in text.
    pub fn load_from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(table) => {
                    info!("Loaded {} strings from {}", table.len(), path.display());
                    table
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to load strings from {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse TOML content on top of the defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let overrides: HashMap<String, String> = toml::from_str(content)?;
        let mut table = Self::default();
        table.entries.extend(overrides);
        Ok(table)
    }

    /// Translated text for `key`, or the key itself when unknown
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
