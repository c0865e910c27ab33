//! Game balance constants
//!
//! Everything the simulation treats as a magic number lives here so a
//! balance pass never touches gameplay code. Defaults match the shipped game.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Player paddle balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal pixels per frame while an arrow key is held
    pub speed: f32,
    pub start_life: i32,
    /// Resting height measured up from the bottom edge
    pub rest_offset: f32,
    /// Life granted every `bonus_interval` frames of the inter-wave countdown
    pub bonus_life: i32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 10.0,
            speed: 15.0,
            start_life: 85,
            rest_offset: 120.0,
            bonus_life: 1,
        }
    }
}

/// Shot balance, shared by player bullets and enemy projectiles.
/// A shot table in JSON must be given in full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotTuning {
    pub width: f32,
    pub height: f32,
    /// Pixels per frame
    pub speed: f32,
    /// Life removed from whatever the shot hits
    pub hit_point: i32,
}

impl ShotTuning {
    fn bullet() -> Self {
        Self {
            width: 5.0,
            height: 50.0,
            speed: 20.0,
            hit_point: 80,
        }
    }

    fn projectile() -> Self {
        Self {
            width: 5.0,
            height: 50.0,
            speed: 10.0,
            hit_point: 15,
        }
    }
}

/// Enemy block balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub start_life: i32,
    /// Resting height is `fall_min + rand * fall_span`
    pub fall_min: f32,
    pub fall_span: f32,
    /// Horizontal speed magnitude is `speed_min + rand * speed_span`
    pub speed_min: f32,
    pub speed_span: f32,
    /// Spawn x keeps this far from both walls
    pub spawn_margin: f32,
    /// Width lost per frame once life hits zero
    pub shrink_per_frame: f32,
    /// Per-frame chance that an enemy tries to fire
    pub fire_chance: f64,
    pub saturation: u8,
    pub lightness: u8,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 10.0,
            start_life: 100,
            fall_min: 50.0,
            fall_span: 100.0,
            speed_min: 5.0,
            speed_span: 5.0,
            spawn_margin: 100.0,
            shrink_per_frame: 10.0,
            fire_chance: 0.015,
            saturation: 50,
            lightness: 50,
        }
    }
}

/// Wave pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub start_enemies: u32,
    pub enemies_per_level: u32,
    /// Frames between the pool emptying and the next wave
    pub countdown: u32,
    pub bonus_interval: u32,
    pub banner_size: f32,
    pub banner_growth: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            start_enemies: 5,
            enemies_per_level: 2,
            countdown: 240,
            bonus_interval: 16,
            banner_size: 60.0,
            banner_growth: 7.0,
        }
    }
}

/// Hit scoring: center hits earn `max`, edge hits earn `min`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub max: u32,
    pub min: u32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self { max: 50, min: 20 }
    }
}

/// Cosmetic effect parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectTuning {
    pub sparks_per_hit: u32,
    pub fade_per_frame: f32,
    pub text_size: f32,
}

impl Default for EffectTuning {
    fn default() -> Self {
        Self {
            sparks_per_hit: 10,
            fade_per_frame: 0.01,
            text_size: 25.0,
        }
    }
}

/// Small-screen layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    /// Viewports narrower than this use the compact widths
    pub narrow_width: f32,
    pub narrow_player_width: f32,
    pub narrow_enemy_width: f32,
    pub floor_offset: f32,
    pub floor_height: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            narrow_width: 411.0,
            narrow_player_width: 50.0,
            narrow_enemy_width: 75.0,
            floor_offset: 100.0,
            floor_height: 10.0,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fall accumulator increment per frame
    pub gravity: f32,
    /// Minimum seconds between two shots of the same shooter
    pub fire_interval_secs: f64,
    pub player: PlayerTuning,
    pub bullet: ShotTuning,
    pub projectile: ShotTuning,
    pub enemy: EnemyTuning,
    pub wave: WaveTuning,
    pub score: ScoreTuning,
    pub effects: EffectTuning,
    pub layout: LayoutTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            fire_interval_secs: 0.1,
            player: PlayerTuning::default(),
            bullet: ShotTuning::bullet(),
            projectile: ShotTuning::projectile(),
            enemy: EnemyTuning::default(),
            wave: WaveTuning::default(),
            score: ScoreTuning::default(),
            effects: EffectTuning::default(),
            layout: LayoutTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning table from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Fire cooldown in milliseconds
    pub fn fire_interval_ms(&self) -> f64 {
        self.fire_interval_secs * 1000.0
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(0.0..=1.0).contains(&self.enemy.fire_chance) {
            return Err(TuningError::Invalid {
                field: "enemy.fire_chance",
                reason: "must be within [0, 1]",
            });
        }
        if self.wave.bonus_interval == 0 {
            return Err(TuningError::Invalid {
                field: "wave.bonus_interval",
                reason: "must be positive",
            });
        }
        if self.wave.countdown == 0 {
            return Err(TuningError::Invalid {
                field: "wave.countdown",
                reason: "must be positive",
            });
        }
        if self.score.min > self.score.max {
            return Err(TuningError::Invalid {
                field: "score.min",
                reason: "must not exceed score.max",
            });
        }
        if self.effects.fade_per_frame <= 0.0 {
            return Err(TuningError::Invalid {
                field: "effects.fade_per_frame",
                reason: "must be positive",
            });
        }
        if self.enemy.shrink_per_frame <= 0.0 {
            return Err(TuningError::Invalid {
                field: "enemy.shrink_per_frame",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}
