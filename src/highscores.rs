//! Best score tracking
//!
//! A single non-negative integer persisted under a fixed key. Stored text is
//! read by its leading digits (`"12.5"` is 12); missing values or text with
//! no leading digit read as 0.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError};

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub value: u64,
}

/// `"12.5"` -> `"12"`, `" 7abc"` -> `"7"`, `"-5"` -> `""`
fn leading_digits(raw: &str) -> &str {
    let raw = raw.trim_start();
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    &raw[..end]
}

impl HighScore {
    /// Storage key shared with earlier releases of the game
    pub const STORAGE_KEY: &'static str = "High_Score_Of_The_Game";

    /// Read the stored value; an absent slot is initialised to 0
    pub fn load(store: &mut dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match leading_digits(&raw).parse::<u64>() {
                Ok(value) => {
                    log::info!("Loaded high score {}", value);
                    Self { value }
                }
                Err(_) => {
                    log::warn!("Ignoring malformed high score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                if let Err(e) = store.set(Self::STORAGE_KEY, "0") {
                    log::warn!("Failed to initialise high score: {}", e);
                }
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read high score: {}", e);
                Self::default()
            }
        }
    }

    /// Keep `score` if it strictly beats the current best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &self.value.to_string())?;
        log::info!("High score saved ({})", self.value);
        Ok(())
    }

    /// Record and persist a finished round's score. Storage failures are
    /// logged; the in-memory value is still updated.
    pub fn record_and_save(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        let improved = self.record(score);
        if improved {
            if let Err(e) = self.save(store) {
                log::warn!("Failed to save high score: {}", e);
            }
        }
        improved
    }
}
