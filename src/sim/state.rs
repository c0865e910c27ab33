//! Game state and entity types
//!
//! Every entity owns its per-frame motion (`update`) and its drawing
//! (`draw`); `update` always ends by drawing, so calling it inside the frame
//! step keeps the paint order equal to the update order.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use crate::Viewport;
use crate::renderer::{Canvas, Color, Label, TextAlign, colors};
use crate::tuning::{ShotTuning, Tuning};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames are being simulated
    Playing,
    /// Player life reached zero; the loop is stopped until a reset
    GameOver,
}

/// Things that happened during a frame, for the host to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new wave entered; `level` is the counter after the increment
    WaveSpawned { level: u32, enemies: u32 },
    PlayerHit { damage: i32, life: i32 },
    EnemyHit { points: u64 },
    /// An enemy finished shrinking and left the pool
    EnemyDestroyed,
    GameOver {
        score: u64,
        high_score: u64,
        new_high_score: bool,
    },
}

/// Falling-then-resting vertical motion
///
/// The accumulator grows by `gravity` each frame while `y + weight` has not
/// yet passed the target (`<=`), and drops back to zero once it has. Near the target
/// this makes the entity hover a few pixels around it instead of settling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fall {
    /// Resting y coordinate
    pub target: f32,
    /// Current per-frame drop
    pub weight: f32,
}

impl Fall {
    pub fn new(target: f32) -> Self {
        Self {
            target,
            weight: 0.0,
        }
    }

    /// Advance one frame and return the new y
    pub fn step(&mut self, y: f32, gravity: f32) -> f32 {
        if y + self.weight <= self.target {
            self.weight += gravity;
        } else {
            self.weight = 0.0;
        }
        y + self.weight
    }
}

/// Per-shooter fire throttle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Timestamp (ms) of the last shot, or of creation
    pub last_ms: f64,
}

impl Cooldown {
    pub fn new(now_ms: f64) -> Self {
        Self { last_ms: now_ms }
    }

    pub fn ready(&self, now_ms: f64, interval_ms: f64) -> bool {
        now_ms - self.last_ms >= interval_ms
    }

    /// Consume the cooldown if it has elapsed
    pub fn try_fire(&mut self, now_ms: f64, interval_ms: f64) -> bool {
        if self.ready(now_ms, interval_ms) {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Cosmetic output limits (from user settings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    pub sparks: bool,
    pub floating_text: bool,
    pub max_sparks: usize,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            sparks: true,
            floating_text: true,
            max_sparks: 500,
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Horizontal pixels per frame
    pub speed: f32,
    pub life: i32,
    pub fall: Fall,
    pub cooldown: Cooldown,
}

impl Player {
    /// Centered at the top of the screen, falling toward its rest height
    pub fn new(viewport: Viewport, tuning: &Tuning, now_ms: f64) -> Self {
        let t = &tuning.player;
        Self {
            pos: Vec2::new(viewport.width / 2.0 - t.width / 2.0, 0.0),
            size: Vec2::new(t.width, t.height),
            color: colors::PLAYER,
            speed: t.speed,
            life: t.start_life,
            fall: Fall::new(viewport.height - t.rest_offset),
            cooldown: Cooldown::new(now_ms),
        }
    }

    /// Gravity, steering and wall clamping, then draw.
    ///
    /// Arrow keys win over touch; a touch position places the paddle's
    /// left edge directly.
    pub fn update(
        &mut self,
        steer: Steer,
        viewport: Viewport,
        gravity: f32,
        canvas: &mut (impl Canvas + ?Sized),
        text_size: f32,
    ) {
        self.pos.y = self.fall.step(self.pos.y, gravity);

        match steer {
            Steer::Left => self.pos.x -= self.speed,
            Steer::Right => self.pos.x += self.speed,
            Steer::Touch(x) => self.pos.x = x,
            Steer::None => {}
        }

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        } else if self.pos.x + self.size.x > viewport.width {
            self.pos.x = viewport.width - self.size.x;
        }

        self.draw(canvas, viewport, text_size);
    }

    pub fn draw(&self, canvas: &mut (impl Canvas + ?Sized), viewport: Viewport, text_size: f32) {
        canvas.fill_rect(self.pos, self.size, self.color);
        canvas.fill_text(&Label {
            text: &self.life.to_string(),
            pos: Vec2::new(self.pos.x + self.size.x / 2.0, viewport.height - 60.0),
            size: text_size,
            color: self.color,
            align: TextAlign::Center,
            alpha: 1.0,
        });
    }

    /// Subtract damage, clamping at zero. Returns true if the player is dead.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.life -= damage;
        if self.life <= 0 {
            self.life = 0;
            true
        } else {
            false
        }
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Resolved horizontal steering for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steer {
    None,
    Left,
    Right,
    Touch(f32),
}

/// A player bullet, travelling up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub speed: f32,
    pub hit_point: i32,
}

impl Bullet {
    /// Spawned above the middle of the paddle
    pub fn from_player(player: &Player, shot: &ShotTuning) -> Self {
        Self {
            pos: Vec2::new(player.pos.x + player.size.x / 2.0, player.pos.y - 20.0),
            size: Vec2::new(shot.width, shot.height),
            color: player.color,
            speed: shot.speed,
            hit_point: shot.hit_point,
        }
    }

    pub fn update(&mut self, canvas: &mut (impl Canvas + ?Sized)) {
        self.pos.y -= self.speed;
        canvas.fill_rect(self.pos, self.size, self.color);
    }

    /// Fully past the top edge
    pub fn is_offscreen(&self) -> bool {
        self.pos.y < 0.0
    }
}

impl Bounds for Bullet {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An enemy shot, travelling down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub speed: f32,
    pub hit_point: i32,
}

impl Projectile {
    /// Spawned at the middle of the enemy's top edge
    pub fn from_enemy(enemy: &Enemy, shot: &ShotTuning) -> Self {
        Self {
            pos: Vec2::new(enemy.pos.x + enemy.size.x / 2.0, enemy.pos.y),
            size: Vec2::new(shot.width, shot.height),
            color: enemy.color,
            speed: shot.speed,
            hit_point: shot.hit_point,
        }
    }

    pub fn update(&mut self, canvas: &mut (impl Canvas + ?Sized)) {
        self.pos.y += self.speed;
        canvas.fill_rect(self.pos, self.size, self.color);
    }

    pub fn is_offscreen(&self, viewport: Viewport) -> bool {
        self.pos.y > viewport.height
    }
}

impl Bounds for Projectile {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An enemy block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Horizontal pixels per frame; sign flips at the walls
    pub velocity: f32,
    pub life: i32,
    pub fall: Fall,
    pub cooldown: Cooldown,
}

impl Enemy {
    pub fn new(
        pos: Vec2,
        color: Color,
        velocity: f32,
        fall_target: f32,
        tuning: &Tuning,
        now_ms: f64,
    ) -> Self {
        Self {
            pos,
            size: Vec2::new(tuning.enemy.width, tuning.enemy.height),
            color,
            velocity,
            life: tuning.enemy.start_life,
            fall: Fall::new(fall_target),
            cooldown: Cooldown::new(now_ms),
        }
    }

    /// Gravity, wall bounce and horizontal motion, then draw
    pub fn update(
        &mut self,
        viewport: Viewport,
        gravity: f32,
        canvas: &mut (impl Canvas + ?Sized),
        text_size: f32,
    ) {
        self.pos.y = self.fall.step(self.pos.y, gravity);

        if self.pos.x < 0.0 || self.pos.x + self.size.x > viewport.width {
            self.velocity = -self.velocity;
        }
        self.pos.x += self.velocity;

        self.draw(canvas, text_size);
    }

    pub fn draw(&self, canvas: &mut (impl Canvas + ?Sized), text_size: f32) {
        canvas.fill_rect(self.pos, self.size, self.color);
        canvas.fill_text(&Label {
            text: &self.life.to_string(),
            pos: Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y - 20.0),
            size: text_size,
            color: self.color,
            align: TextAlign::Center,
            alpha: 1.0,
        });
    }

    pub fn is_dying(&self) -> bool {
        self.life <= 0
    }

    /// Dead and fully shrunk
    pub fn is_gone(&self) -> bool {
        self.is_dying() && self.size.x <= 0.0
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Vertical direction of a spark burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    /// Sparks fall (enemy hit)
    Down,
    /// Sparks rise (player hit)
    Up,
}

/// Decorative impact particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spark {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub vel: Vec2,
    pub alpha: f32,
}

impl Spark {
    /// Random radius in [0.5, 3) and a random spray velocity
    pub fn random<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, color: Color, burst: Burst) -> Self {
        let radius = rng.random::<f32>() * 2.5 + 0.5;
        let vx = (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * 15.0);
        let vy = rng.random::<f32>() * (rng.random::<f32>() * 7.5);
        let vy = match burst {
            Burst::Down => vy,
            Burst::Up => -vy,
        };
        Self {
            pos,
            radius,
            color,
            vel: Vec2::new(vx, vy),
            alpha: 1.0,
        }
    }

    pub fn update(&mut self, fade: f32, canvas: &mut (impl Canvas + ?Sized)) {
        self.pos += self.vel;
        self.alpha -= fade;
        canvas.fill_circle(self.pos, self.radius, self.color, self.alpha);
    }

    pub fn is_expired(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Short-lived label (damage numbers, life bonus, level banner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub size: f32,
    pub color: Color,
    pub vel: Vec2,
    /// Font size gained per frame by [`FloatingText::update_size`]
    pub growth: f32,
    pub alpha: f32,
}

impl FloatingText {
    /// A drifting label
    pub fn drifting(pos: Vec2, text: String, size: f32, color: Color, vel: Vec2) -> Self {
        Self {
            pos,
            text,
            size,
            color,
            vel,
            growth: 0.0,
            alpha: 1.0,
        }
    }

    /// A stationary label that grows while fading
    pub fn growing(pos: Vec2, text: String, size: f32, color: Color, growth: f32) -> Self {
        Self {
            pos,
            text,
            size,
            color,
            vel: Vec2::ZERO,
            growth,
            alpha: 1.0,
        }
    }

    /// Drift and fade, then draw
    pub fn update(&mut self, fade: f32, canvas: &mut (impl Canvas + ?Sized)) {
        self.pos += self.vel;
        self.alpha -= fade;
        self.draw(canvas);
    }

    /// Grow and fade (alpha floors at zero), then draw
    pub fn update_size(&mut self, fade: f32, canvas: &mut (impl Canvas + ?Sized)) {
        self.size += self.growth;
        self.alpha = (self.alpha - fade).max(0.0);
        self.draw(canvas);
    }

    /// Centered on `pos`, nudged down by a quarter of the font size
    pub fn draw(&self, canvas: &mut (impl Canvas + ?Sized)) {
        canvas.fill_text(&Label {
            text: &self.text,
            pos: Vec2::new(self.pos.x, self.pos.y + self.size / 4.0),
            size: self.size,
            color: self.color,
            align: TextAlign::Center,
            alpha: self.alpha,
        });
    }

    pub fn is_expired(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Complete round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub effects: Effects,
    pub phase: GamePhase,
    /// Frames simulated since the last reset
    pub frame: u64,
    pub score: u64,
    /// Best score seen by this session (mirrors the persisted value)
    pub high_score: u64,
    /// Level announced by the banner; incremented when a wave spawns
    pub level: u32,
    /// Size of the next wave
    pub enemy_count: u32,
    /// Frames left before the next wave once the pool is empty
    pub spawn_countdown: u32,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub sparks: Vec<Spark>,
    pub texts: Vec<FloatingText>,
    pub level_banner: FloatingText,
}

impl GameState {
    /// Create a fresh round
    pub fn new(viewport: Viewport, tuning: Tuning, high_score: u64, now_ms: f64) -> Self {
        let level = 1;
        Self {
            viewport,
            effects: Effects::default(),
            phase: GamePhase::Playing,
            frame: 0,
            score: 0,
            high_score,
            level,
            enemy_count: tuning.wave.start_enemies,
            spawn_countdown: tuning.wave.countdown,
            player: Player::new(viewport, &tuning, now_ms),
            bullets: Vec::new(),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            sparks: Vec::new(),
            texts: Vec::new(),
            level_banner: Self::banner(viewport, &tuning, level),
            tuning,
        }
    }

    /// Restart the round, keeping viewport, tuning, effects and high score
    pub fn reset(&mut self, now_ms: f64) {
        let effects = self.effects;
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::new(self.viewport, tuning, self.high_score, now_ms);
        self.effects = effects;
    }

    /// Track a viewport resize. Entities keep their positions and rest heights.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.level_banner.pos = Vec2::new(viewport.width / 2.0, viewport.height / 2.0);
    }

    fn banner(viewport: Viewport, tuning: &Tuning, level: u32) -> FloatingText {
        FloatingText::growing(
            Vec2::new(viewport.width / 2.0, viewport.height / 2.0),
            format!("Level: {}", level),
            tuning.wave.banner_size,
            colors::LEVEL_BANNER,
            tuning.wave.banner_growth,
        )
    }

    /// Fire a player bullet if the cooldown allows it
    pub fn fire_bullet(&mut self, now_ms: f64) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let interval = self.tuning.fire_interval_ms();
        if !self.player.cooldown.try_fire(now_ms, interval) {
            return false;
        }
        self.bullets
            .push(Bullet::from_player(&self.player, &self.tuning.bullet));
        true
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Where player life deltas (`-15`, `+1`) appear
    pub fn life_text_anchor(&self) -> Vec2 {
        Vec2::new(
            self.player.pos.x + self.player.size.x * (5.0 / 6.0),
            self.viewport.height - 65.0,
        )
    }

    /// Queue a floating label unless texts are disabled
    pub fn push_text(&mut self, text: FloatingText) {
        if self.effects.floating_text {
            self.texts.push(text);
        }
    }

    /// Emit a burst of sparks, respecting the effect settings
    pub fn emit_sparks<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        at: Vec2,
        color: Color,
        burst: Burst,
    ) {
        if !self.effects.sparks {
            return;
        }
        for _ in 0..self.tuning.effects.sparks_per_hit {
            if self.sparks.len() >= self.effects.max_sparks {
                break;
            }
            self.sparks.push(Spark::random(rng, at, color, burst));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_fall_accelerates_then_resets_at_target() {
        let mut fall = Fall::new(10.0);
        let mut y = 0.0;
        y = fall.step(y, 1.0);
        assert_eq!((y, fall.weight), (1.0, 1.0));
        y = fall.step(y, 1.0);
        assert_eq!((y, fall.weight), (3.0, 2.0));
        y = fall.step(y, 1.0);
        assert_eq!((y, fall.weight), (6.0, 3.0));
        y = fall.step(y, 1.0);
        assert_eq!((y, fall.weight), (10.0, 4.0));
        // 10 + 4 > 10: the accumulator resets and y stays put
        y = fall.step(y, 1.0);
        assert_eq!((y, fall.weight), (10.0, 0.0));
        // Then it creeps down again by one gravity unit
        y = fall.step(y, 1.0);
        assert_eq!((y, fall.weight), (11.0, 1.0));
    }

    #[test]
    fn test_cooldown_threshold() {
        let mut cd = Cooldown::new(1000.0);
        assert!(!cd.try_fire(1050.0, 100.0));
        assert!(cd.try_fire(1100.0, 100.0));
        assert!(!cd.try_fire(1199.0, 100.0));
        assert!(cd.try_fire(1200.0, 100.0));
    }

    #[test]
    fn test_player_starts_centered_with_85_life() {
        let player = Player::new(viewport(), &Tuning::default(), 0.0);
        assert_eq!(player.pos, Vec2::new(350.0, 0.0));
        assert_eq!(player.life, 85);
        assert_eq!(player.fall.target, 480.0);
        assert_eq!(player.fall.weight, 0.0);
    }

    #[test]
    fn test_player_damage_clamps_at_zero() {
        let mut player = Player::new(viewport(), &Tuning::default(), 0.0);
        assert!(!player.take_damage(15));
        assert_eq!(player.life, 70);
        assert!(player.take_damage(100));
        assert_eq!(player.life, 0);
    }

    #[test]
    fn test_player_steering_and_wall_clamp() {
        let mut canvas = DrawList::new();
        let mut player = Player::new(viewport(), &Tuning::default(), 0.0);

        player.update(Steer::Left, viewport(), 1.0, &mut canvas, 25.0);
        assert_eq!(player.pos.x, 335.0);
        player.update(Steer::Right, viewport(), 1.0, &mut canvas, 25.0);
        assert_eq!(player.pos.x, 350.0);

        player.update(Steer::Touch(-40.0), viewport(), 1.0, &mut canvas, 25.0);
        assert_eq!(player.pos.x, 0.0);
        player.update(Steer::Touch(790.0), viewport(), 1.0, &mut canvas, 25.0);
        assert_eq!(player.pos.x, 700.0);
    }

    #[test]
    fn test_enemy_bounces_off_walls() {
        let tuning = Tuning::default();
        let mut canvas = DrawList::new();
        let mut enemy = Enemy::new(
            Vec2::new(705.0, 0.0),
            Color::hsl(10, 50, 50),
            8.0,
            100.0,
            &tuning,
            0.0,
        );
        // Right edge at 805 > 800: reverse before moving
        enemy.update(viewport(), 1.0, &mut canvas, 25.0);
        assert_eq!(enemy.velocity, -8.0);
        assert_eq!(enemy.pos.x, 697.0);

        enemy.pos.x = -3.0;
        enemy.update(viewport(), 1.0, &mut canvas, 25.0);
        assert_eq!(enemy.velocity, 8.0);
        assert_eq!(enemy.pos.x, 5.0);
    }

    #[test]
    fn test_shots_spawn_from_shooter_center() {
        let tuning = Tuning::default();
        let player = Player::new(viewport(), &tuning, 0.0);
        let bullet = Bullet::from_player(&player, &tuning.bullet);
        assert_eq!(bullet.pos, Vec2::new(400.0, -20.0));
        assert_eq!(bullet.size, Vec2::new(5.0, 50.0));
        assert_eq!(bullet.hit_point, 80);

        let enemy = Enemy::new(
            Vec2::new(100.0, 60.0),
            Color::hsl(10, 50, 50),
            5.0,
            100.0,
            &tuning,
            0.0,
        );
        let projectile = Projectile::from_enemy(&enemy, &tuning.projectile);
        assert_eq!(projectile.pos, Vec2::new(150.0, 60.0));
        assert_eq!(projectile.hit_point, 15);
        assert_eq!(projectile.color, enemy.color);
    }

    #[test]
    fn test_spark_burst_direction() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let down = Spark::random(&mut rng, Vec2::ZERO, colors::PLAYER, Burst::Down);
            let up = Spark::random(&mut rng, Vec2::ZERO, colors::PLAYER, Burst::Up);
            assert!(down.vel.y >= 0.0);
            assert!(up.vel.y <= 0.0);
            assert!((0.5..3.0).contains(&down.radius));
            assert!(down.vel.x.abs() <= 7.5);
        }
    }

    #[test]
    fn test_floating_text_fades_out() {
        let mut canvas = DrawList::new();
        let mut text = FloatingText::drifting(
            Vec2::ZERO,
            "-80".into(),
            25.0,
            colors::PLAYER,
            Vec2::new(0.0, -1.0),
        );
        let mut frames = 0;
        while !text.is_expired() {
            text.update(0.01, &mut canvas);
            frames += 1;
            assert!(frames <= 101);
        }
        assert!(frames >= 100);
        assert!(text.pos.y <= -100.0);
    }

    #[test]
    fn test_banner_grows_and_floors_alpha() {
        let mut canvas = DrawList::new();
        let mut banner =
            FloatingText::growing(Vec2::ZERO, "Level: 1".into(), 60.0, colors::LEVEL_BANNER, 7.0);
        for _ in 0..150 {
            banner.update_size(0.01, &mut canvas);
        }
        assert_eq!(banner.alpha, 0.0);
        assert_eq!(banner.size, 60.0 + 150.0 * 7.0);
    }

    #[test]
    fn test_fire_bullet_respects_cooldown() {
        let mut state = GameState::new(viewport(), Tuning::default(), 0, 0.0);
        assert!(!state.fire_bullet(50.0));
        assert!(state.fire_bullet(100.0));
        assert!(!state.fire_bullet(150.0));
        assert!(state.fire_bullet(200.0));
        assert_eq!(state.bullets.len(), 2);
    }

    #[test]
    fn test_emit_sparks_respects_effects() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(viewport(), Tuning::default(), 0, 0.0);
        state.emit_sparks(&mut rng, Vec2::ZERO, colors::PLAYER, Burst::Down);
        assert_eq!(state.sparks.len(), 10);

        state.effects.max_sparks = 15;
        state.emit_sparks(&mut rng, Vec2::ZERO, colors::PLAYER, Burst::Down);
        assert_eq!(state.sparks.len(), 15);

        state.effects.sparks = false;
        state.sparks.clear();
        state.emit_sparks(&mut rng, Vec2::ZERO, colors::PLAYER, Burst::Down);
        assert!(state.sparks.is_empty());
    }

    #[test]
    fn test_resize_recenters_banner_only() {
        let mut state = GameState::new(viewport(), Tuning::default(), 0, 0.0);
        state.resize(Viewport::new(400.0, 300.0));
        assert_eq!(state.level_banner.pos, Vec2::new(200.0, 150.0));
        assert_eq!(state.player.fall.target, 480.0);
    }

    #[test]
    fn test_reset_keeps_high_score_and_effects() {
        let mut state = GameState::new(viewport(), Tuning::default(), 120, 0.0);
        state.effects.floating_text = false;
        state.score = 300;
        state.level = 4;
        state.enemy_count = 11;
        state.player.life = 0;
        state.phase = GamePhase::GameOver;
        assert!(state.is_over());

        state.reset(5000.0);
        assert!(!state.is_over());
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.enemy_count, 5);
        assert_eq!(state.player.life, 85);
        assert_eq!(state.high_score, 120);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.effects.floating_text);
        assert_eq!(state.player.cooldown.last_ms, 5000.0);
    }
}
