//! Player preferences
//!
//! Persisted as JSON next to the high score. Only cosmetic output depends on
//! these; gameplay is identical at every preset. Hosts change them with
//! `key=value` options (`quality=high`, `sparks=off`, `text=off`) taken from
//! the command line or the page's query string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{KeyValueStore, StorageError};
use crate::sim::Effects;

/// Rejected settings option
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for setting `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Effect detail level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Live spark cap for this preset
    pub fn max_sparks(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for QualityPreset {
    type Err = ();

    /// Case-insensitive; `med` is accepted for medium
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(()),
        }
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Split `a=1&b=2` (optionally starting with `?`) into pairs. Pieces without
/// `=` are skipped.
pub fn parse_query(query: &str) -> Vec<(&str, &str)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .collect()
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,
    /// Impact sparks
    pub sparks: bool,
    /// Damage numbers and life bonus labels
    pub floating_text: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            sparks: true,
            floating_text: true,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "shoot_the_obstacle_settings";

    /// Effective spark cap
    pub fn max_sparks(&self) -> usize {
        if self.sparks {
            self.quality.max_sparks()
        } else {
            0
        }
    }

    /// Simulation-side view of these settings
    pub fn effects(&self) -> Effects {
        Effects {
            sparks: self.sparks,
            floating_text: self.floating_text,
            max_sparks: self.max_sparks(),
        }
    }

    /// Apply one `key=value` option
    pub fn apply_option(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let invalid = || SettingsError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        match key {
            "quality" => self.quality = value.parse::<QualityPreset>().map_err(|_| invalid())?,
            "sparks" => self.sparks = parse_switch(value).ok_or_else(invalid)?,
            "text" | "floating_text" => {
                self.floating_text = parse_switch(value).ok_or_else(invalid)?
            }
            _ => return Err(SettingsError::UnknownKey(key.to_owned())),
        }
        Ok(())
    }

    /// Apply options, skipping (and logging) bad ones. Saves when anything
    /// changed. Returns true if the settings changed.
    pub fn apply_and_save<'a>(
        &mut self,
        options: impl IntoIterator<Item = (&'a str, &'a str)>,
        store: &mut dyn KeyValueStore,
    ) -> bool {
        let before = self.clone();
        for (key, value) in options {
            if let Err(e) = self.apply_option(key, value) {
                log::warn!("Ignoring setting: {}", e);
            }
        }
        if *self == before {
            return false;
        }
        log::info!(
            "Settings: quality {}, sparks {}, text {}",
            self.quality,
            self.sparks,
            self.floating_text
        );
        if let Err(e) = self.save(store) {
            log::warn!("Failed to save settings: {}", e);
        }
        true
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(self).map_err(|e| StorageError::Backend(e.to_string()))?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
