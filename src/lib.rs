//! Shoot The Obstacle - a single-screen canvas shooter
//!
//! Core modules:
//! - `sim`: Frame simulation (entities, collisions, waves, scoring)
//! - `renderer`: Drawing surface abstraction and the 2D canvas backend
//! - `platform`: Input capture and device detection
//! - `persistence`: Key-value storage backends
//! - `tuning`: Data-driven game balance
//! - `highscores`, `settings`: Persisted best score and effect preferences
//! - `ui`: Result panel text

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings, SettingsError};
pub use tuning::Tuning;

use serde::{Deserialize, Serialize};

/// Host-level constants (gameplay balance lives in [`Tuning`])
pub mod consts {
    /// Frame duration used when no display refresh drives the loop (60 Hz)
    pub const HEADLESS_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frame cap for the native headless run
    pub const HEADLESS_MAX_FRAMES: u64 = 60 * 60 * 5;
    /// Viewport used by the native headless run
    pub const HEADLESS_VIEWPORT: (f32, f32) = (1280.0, 720.0);
}

/// Size of the drawing surface in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
