//! Per-frame simulation step
//!
//! One call advances the round by exactly one display frame. The step order
//! is fixed: later steps observe the effects of earlier ones, and the draw
//! order on the canvas follows it.

use glam::Vec2;
use rand::Rng;

use super::collision::{Bounds, Rect, collision};
use super::spawn::generate_wave;
use super::state::{Burst, FloatingText, GameEvent, GamePhase, GameState, Projectile, Steer};
use crate::renderer::{Canvas, Label, TextAlign, colors};
use crate::tuning::ScoreTuning;

/// Input sampled for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Last reported touch position (persists between touches)
    pub touch_x: Option<f32>,
    /// Fire request (Space press or touch drag)
    pub fire: bool,
    /// Wall-clock timestamp in milliseconds
    pub now_ms: f64,
}

impl TickInput {
    /// Keys win over touch; left wins over right
    pub fn steer(&self) -> Steer {
        if self.left {
            Steer::Left
        } else if self.right {
            Steer::Right
        } else if let Some(x) = self.touch_x {
            Steer::Touch(x)
        } else {
            Steer::None
        }
    }
}

/// Advance the round by one frame, drawing it onto `canvas`.
///
/// Does nothing once the round is over; the host should stop scheduling
/// frames when it sees [`GameEvent::GameOver`].
pub fn tick<R, C>(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut R,
    canvas: &mut C,
) -> Vec<GameEvent>
where
    R: Rng + ?Sized,
    C: Canvas + ?Sized,
{
    let mut events = Vec::new();
    if state.phase == GamePhase::GameOver {
        return events;
    }
    state.frame += 1;

    clear_frame(state, canvas);
    draw_hud(state, canvas);
    if state.enemies.is_empty() {
        advance_countdown(state, input.now_ms, rng, canvas, &mut events);
    }
    update_projectiles(state, rng, canvas, &mut events);
    update_enemies(state, input.now_ms, rng, canvas, &mut events);
    update_sparks(state, canvas);
    update_player(state, input, canvas);
    update_bullets(state, canvas);
    update_texts(state, canvas);
    apply_compact_layout(state);
    draw_floor(state, canvas);

    events
}

/// Points for a bullet hit: `max` at the enemy's center, falling linearly to
/// `min` at its edge, rounded to the nearest integer
pub fn hit_score(enemy: &Rect, bullet: &Rect, score: &ScoreTuning) -> u64 {
    let half = enemy.size.x / 2.0;
    if half <= 0.0 {
        return score.min as u64;
    }
    let offset = ((enemy.center_x() - bullet.center_x()) / half)
        .abs()
        .min(1.0);
    let span = score.max.saturating_sub(score.min) as f32;
    (score.max as f32 - span * offset).round() as u64
}

fn clear_frame<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    canvas.fill_rect(
        Vec2::ZERO,
        Vec2::new(state.viewport.width, state.viewport.height),
        colors::BACKGROUND,
    );
}

fn draw_hud<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let lines = [
        (format!("Score: {}", state.score), 18.0),
        (format!("High Score: {}", state.high_score), 40.0),
    ];
    for (text, y) in &lines {
        canvas.fill_text(&Label {
            text,
            pos: Vec2::new(0.0, *y),
            size: 18.0,
            color: state.player.color,
            align: TextAlign::Left,
            alpha: 1.0,
        });
    }
}

/// Inter-wave countdown: life bonus, level banner and the next wave
fn advance_countdown<R, C>(
    state: &mut GameState,
    now_ms: f64,
    rng: &mut R,
    canvas: &mut C,
    events: &mut Vec<GameEvent>,
) where
    R: Rng + ?Sized,
    C: Canvas + ?Sized,
{
    if state.spawn_countdown % state.tuning.wave.bonus_interval == 0 {
        let bonus = state.tuning.player.bonus_life;
        state.player.life += bonus;
        let text = FloatingText::drifting(
            state.life_text_anchor(),
            format!("+{}", bonus),
            state.tuning.effects.text_size,
            state.player.color,
            Vec2::new(0.0, 1.0),
        );
        state.push_text(text);
    }
    state.spawn_countdown = state.spawn_countdown.saturating_sub(1);

    state.level_banner.text = format!("Level: {}", state.level);
    let fade = state.tuning.effects.fade_per_frame;
    state.level_banner.update_size(fade, canvas);

    if state.spawn_countdown == 0 {
        let count = state.enemy_count;
        generate_wave(state, count, rng, now_ms);

        let wave = &state.tuning.wave;
        state.level_banner.size = wave.banner_size;
        state.level_banner.alpha = 1.0;
        state.level += 1;
        state.enemy_count += wave.enemies_per_level;
        state.spawn_countdown = wave.countdown;

        events.push(GameEvent::WaveSpawned {
            level: state.level,
            enemies: count,
        });
    }
}

/// Enemy shots: move, cull, and resolve hits on the player
fn update_projectiles<R, C>(
    state: &mut GameState,
    rng: &mut R,
    canvas: &mut C,
    events: &mut Vec<GameEvent>,
) where
    R: Rng + ?Sized,
    C: Canvas + ?Sized,
{
    let mut projectiles = std::mem::take(&mut state.projectiles);
    projectiles.retain_mut(|projectile| {
        projectile.update(canvas);
        if projectile.is_offscreen(state.viewport) {
            return false;
        }
        if !collision(&*projectile, &state.player) {
            return true;
        }
        player_hit(state, projectile, rng, events);
        false
    });
    state.projectiles = projectiles;
}

fn player_hit<R: Rng + ?Sized>(
    state: &mut GameState,
    projectile: &Projectile,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let died = state.player.take_damage(projectile.hit_point);
    log::debug!(
        "Player hit for {} (life {})",
        projectile.hit_point,
        state.player.life
    );

    let text = FloatingText::drifting(
        state.life_text_anchor(),
        format!("-{}", projectile.hit_point),
        state.tuning.effects.text_size,
        state.player.color,
        Vec2::new(0.0, 1.0),
    );
    state.push_text(text);

    let impact = Vec2::new(projectile.bounds().center_x(), state.player.pos.y);
    let color = state.player.color;
    state.emit_sparks(rng, impact, color, Burst::Up);

    events.push(GameEvent::PlayerHit {
        damage: projectile.hit_point,
        life: state.player.life,
    });

    if died && state.phase == GamePhase::Playing {
        game_over(state, events);
    }
}

fn game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
    }
    log::info!(
        "Game over at level {} with score {} (high score {})",
        state.level,
        state.score,
        state.high_score
    );
    events.push(GameEvent::GameOver {
        score: state.score,
        high_score: state.high_score,
        new_high_score,
    });
}

/// Enemy motion, enemy fire, bullet hits and the death shrink
fn update_enemies<R, C>(
    state: &mut GameState,
    now_ms: f64,
    rng: &mut R,
    canvas: &mut C,
    events: &mut Vec<GameEvent>,
) where
    R: Rng + ?Sized,
    C: Canvas + ?Sized,
{
    let mut enemies = std::mem::take(&mut state.enemies);
    let mut bullets = std::mem::take(&mut state.bullets);
    let gravity = state.tuning.gravity;
    let text_size = state.tuning.effects.text_size;
    let fire_interval = state.tuning.fire_interval_ms();

    for enemy in enemies.iter_mut() {
        enemy.update(state.viewport, gravity, canvas, text_size);

        // The roll happens every frame so the random stream doesn't depend
        // on cooldown state
        if rng.random_bool(state.tuning.enemy.fire_chance)
            && enemy.cooldown.try_fire(now_ms, fire_interval)
        {
            let projectile = Projectile::from_enemy(enemy, &state.tuning.projectile);
            state.projectiles.push(projectile);
        }

        bullets.retain(|bullet| {
            if !collision(bullet, &*enemy) {
                return true;
            }
            enemy.life -= bullet.hit_point;

            let points = hit_score(&enemy.bounds(), &bullet.bounds(), &state.tuning.score);
            state.score += points;
            log::debug!("Enemy hit for {} points (life {})", points, enemy.life);

            let impact = Vec2::new(bullet.bounds().center_x(), enemy.bounds().bottom());
            state.emit_sparks(rng, impact, enemy.color, Burst::Down);

            let text = FloatingText::drifting(
                Vec2::new(enemy.pos.x + enemy.size.x * (5.0 / 6.0), enemy.pos.y - 20.0),
                format!("-{}", bullet.hit_point),
                text_size,
                enemy.color,
                Vec2::new(0.0, -1.0),
            );
            state.push_text(text);

            events.push(GameEvent::EnemyHit { points });
            false
        });

        if enemy.is_dying() {
            enemy.life = 0;
            enemy.size.x -= state.tuning.enemy.shrink_per_frame;
            if enemy.is_gone() {
                events.push(GameEvent::EnemyDestroyed);
            }
        }
    }

    enemies.retain(|enemy| !enemy.is_gone());
    state.enemies = enemies;
    state.bullets = bullets;
}

fn update_sparks<C: Canvas + ?Sized>(state: &mut GameState, canvas: &mut C) {
    let fade = state.tuning.effects.fade_per_frame;
    state.sparks.retain_mut(|spark| {
        if spark.is_expired() {
            return false;
        }
        spark.update(fade, canvas);
        true
    });
}

fn update_player<C: Canvas + ?Sized>(state: &mut GameState, input: &TickInput, canvas: &mut C) {
    if input.fire {
        state.fire_bullet(input.now_ms);
    }
    let viewport = state.viewport;
    let gravity = state.tuning.gravity;
    let text_size = state.tuning.effects.text_size;
    state
        .player
        .update(input.steer(), viewport, gravity, canvas, text_size);
}

fn update_bullets<C: Canvas + ?Sized>(state: &mut GameState, canvas: &mut C) {
    state.bullets.retain_mut(|bullet| {
        bullet.update(canvas);
        !bullet.is_offscreen()
    });
}

fn update_texts<C: Canvas + ?Sized>(state: &mut GameState, canvas: &mut C) {
    let fade = state.tuning.effects.fade_per_frame;
    state.texts.retain_mut(|text| {
        if text.is_expired() {
            return false;
        }
        text.update(fade, canvas);
        true
    });
}

/// Small screens get narrower paddles and blocks
fn apply_compact_layout(state: &mut GameState) {
    let layout = &state.tuning.layout;
    if state.viewport.width >= layout.narrow_width {
        return;
    }
    state.player.size.x = layout.narrow_player_width;
    for enemy in state.enemies.iter_mut().filter(|e| !e.is_dying()) {
        enemy.size.x = layout.narrow_enemy_width;
    }
}

fn draw_floor<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) {
    let layout = &state.tuning.layout;
    canvas.fill_rect(
        Vec2::new(0.0, state.viewport.height - layout.floor_offset),
        Vec2::new(state.viewport.width, layout.floor_height),
        state.player.color,
    );
}
