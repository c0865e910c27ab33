//! Enemy spawning

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState};
use crate::renderer::Color;

/// Optional overrides for a single spawn; `None` fields are randomized
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnemySpawn {
    /// Left edge. Default: uniform in `[margin, width - margin]`
    pub x: Option<f32>,
    /// Top edge. Default: 0 (top of the screen)
    pub y: Option<f32>,
    /// Default: random hue at the tuned saturation/lightness
    pub color: Option<Color>,
    /// Horizontal speed. Default: magnitude in `[min, min + span]`, random sign
    pub velocity: Option<f32>,
}

/// Add one enemy to the pool
pub fn spawn_enemy<R: Rng + ?Sized>(
    state: &mut GameState,
    spawn: EnemySpawn,
    rng: &mut R,
    now_ms: f64,
) {
    let t = &state.tuning.enemy;

    let x = spawn.x.unwrap_or_else(|| {
        let room = (state.viewport.width - 2.0 * t.spawn_margin).max(0.0);
        rng.random::<f32>() * room + t.spawn_margin
    });
    let y = spawn.y.unwrap_or(0.0);
    let color = spawn.color.unwrap_or_else(|| {
        let hue = (rng.random::<f32>() * 360.0).round() as u16;
        Color::hsl(hue, t.saturation, t.lightness)
    });
    let velocity = spawn.velocity.unwrap_or_else(|| {
        let magnitude = rng.random::<f32>() * t.speed_span + t.speed_min;
        if rng.random_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    });
    let fall_target = rng.random::<f32>() * t.fall_span + t.fall_min;

    let enemy = Enemy::new(
        Vec2::new(x, y),
        color,
        velocity,
        fall_target,
        &state.tuning,
        now_ms,
    );
    state.enemies.push(enemy);
}

/// Spawn `count` fully randomized enemies
pub fn generate_wave<R: Rng + ?Sized>(state: &mut GameState, count: u32, rng: &mut R, now_ms: f64) {
    for _ in 0..count {
        spawn_enemy(state, EnemySpawn::default(), rng, now_ms);
    }
    log::info!(
        "Level {}: spawned {} enemies ({} in pool)",
        state.level,
        count,
        state.enemies.len()
    );
}
