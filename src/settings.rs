//! User settings persistence.
//!
//! This module handles loading and saving user preferences across sessions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::controls::{GroupField, Selection};

/// User settings that persist across sessions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Dataset opened most recently
    #[serde(default)]
    pub last_dataset: Option<PathBuf>,
    /// Signal shown when the dataset was last closed
    #[serde(default)]
    pub last_signal: Option<String>,
    /// Grouping dimension shown when the dataset was last closed
    #[serde(default)]
    pub last_group: Option<GroupField>,
    /// Draw the mean ± sd band behind each curve
    #[serde(default)]
    pub show_spread: bool,
    /// Use the colorblind-friendly palette
    #[serde(default)]
    pub color_blind_mode: bool,
}

fn default_version() -> u32 {
    1
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: 1,
            last_dataset: None,
            last_signal: None,
            last_group: None,
            show_spread: false,
            color_blind_mode: false,
        }
    }
}

impl UserSettings {
    /// Get the config directory path for VitalView
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(any(target_os = "macos", target_os = "windows"))]
        {
            dirs::config_dir().map(|p| p.join("VitalView"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("vitalview"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Selection saved from the previous session, if complete
    pub fn last_selection(&self) -> Option<Selection> {
        Some(Selection {
            signal: self.last_signal.clone()?,
            group: self.last_group?,
        })
    }

    /// Remember the selection currently shown
    pub fn remember_selection(&mut self, selection: &Selection) {
        self.last_signal = Some(selection.signal.clone());
        self.last_group = Some(selection.group);
    }

    /// Load settings from disk
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable settings file: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
