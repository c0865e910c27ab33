//! Demo player for headless runs
//!
//! Fires continuously, sidesteps enemy shots that are about to land and
//! otherwise lines up under the closest living enemy.

use super::collision::Bounds;
use super::state::GameState;
use super::tick::TickInput;

/// How far above the paddle (px) a shot counts as incoming
const THREAT_RANGE: f32 = 200.0;
/// Extra horizontal clearance kept around incoming shots
const DODGE_MARGIN: f32 = 10.0;

/// Pick this frame's input from the current state
pub fn autopilot_input(state: &GameState, now_ms: f64) -> TickInput {
    let mut input = TickInput {
        fire: true,
        now_ms,
        ..Default::default()
    };

    let player = state.player.bounds();
    let center = player.center_x();

    // Dodge first: the closest shot that will land on the paddle
    let threat = state
        .projectiles
        .iter()
        .map(|p| p.bounds())
        .filter(|p| {
            p.bottom() <= player.top() + player.size.y
                && player.top() - p.bottom() < THREAT_RANGE
                && p.right() + DODGE_MARGIN >= player.left()
                && p.left() - DODGE_MARGIN <= player.right()
        })
        .max_by(|a, b| {
            a.bottom()
                .partial_cmp(&b.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(shot) = threat {
        let room_left = player.left();
        let room_right = state.viewport.width - player.right();
        // Step away from the shot unless the wall is in the way
        if (shot.center_x() >= center && room_left > 0.0) || room_right <= 0.0 {
            input.left = true;
        } else {
            input.right = true;
        }
        return input;
    }

    let target = state
        .enemies
        .iter()
        .filter(|e| !e.is_dying())
        .map(|e| e.bounds().center_x())
        .min_by(|a, b| {
            (a - center)
                .abs()
                .partial_cmp(&(b - center).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(x) = target {
        // Within one step the paddle would overshoot
        if x < center - state.player.speed {
            input.left = true;
        } else if x > center + state.player.speed {
            input.right = true;
        }
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::renderer::Color;
    use crate::sim::state::{Enemy, Projectile};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state() -> GameState {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), Tuning::default(), 0, 0.0);
        // Paddle spans 350..450 at its rest height
        state.player.pos.y = 480.0;
        state
    }

    fn enemy_at(state: &mut GameState, x: f32) {
        let enemy = Enemy::new(
            Vec2::new(x, 100.0),
            Color::hsl(200, 50, 50),
            0.0,
            100.0,
            &state.tuning,
            0.0,
        );
        state.enemies.push(enemy);
    }

    fn shot_at(state: &mut GameState, x: f32, y: f32) {
        state.projectiles.push(Projectile {
            pos: Vec2::new(x, y),
            size: Vec2::new(5.0, 50.0),
            color: Color::hsl(0, 50, 50),
            speed: 10.0,
            hit_point: 15,
        });
    }

    #[test]
    fn test_always_fires() {
        let input = autopilot_input(&state(), 42.0);
        assert!(input.fire);
        assert_eq!(input.now_ms, 42.0);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_chases_nearest_enemy() {
        let mut state = state();
        enemy_at(&mut state, 600.0);
        enemy_at(&mut state, 50.0);
        // 650 is closer to 400 than 100 is
        let input = autopilot_input(&state, 0.0);
        assert!(input.right && !input.left);

        state.enemies[0].life = 0;
        let input = autopilot_input(&state, 0.0);
        assert!(input.left && !input.right);
    }

    #[test]
    fn test_holds_when_lined_up() {
        let mut state = state();
        enemy_at(&mut state, 355.0);
        let input = autopilot_input(&state, 0.0);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_dodges_incoming_shot() {
        let mut state = state();
        enemy_at(&mut state, 350.0);
        // Shot over the right half of the paddle
        shot_at(&mut state, 420.0, 380.0);
        let input = autopilot_input(&state, 0.0);
        assert!(input.left);

        state.projectiles.clear();
        shot_at(&mut state, 370.0, 380.0);
        let input = autopilot_input(&state, 0.0);
        assert!(input.right);
    }

    #[test]
    fn test_ignores_distant_or_passed_shots() {
        let mut state = state();
        shot_at(&mut state, 400.0, 50.0);
        shot_at(&mut state, 400.0, 560.0);
        shot_at(&mut state, 700.0, 400.0);
        let input = autopilot_input(&state, 0.0);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_dodges_away_from_wall() {
        let mut state = state();
        state.player.pos.x = 0.0;
        shot_at(&mut state, 60.0, 380.0);
        let input = autopilot_input(&state, 0.0);
        assert!(input.right);
    }
}
