//! Keyboard and touch state
//!
//! Event listeners write into [`InputState`]; the frame loop samples it once
//! per frame with [`InputState::take_tick_input`].

use std::collections::HashSet;

use crate::sim::TickInput;

pub const KEY_LEFT: &str = "ArrowLeft";
pub const KEY_RIGHT: &str = "ArrowRight";
pub const KEY_FIRE: &str = "Space";

/// Pressed keys, last touch position and a pending fire request
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pressed: HashSet<String>,
    /// Horizontal position of the last touch; kept after the finger lifts
    touch_x: Option<f32>,
    /// One-shot: raised by Space keydown or a touch drag, consumed per frame
    fire: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `code` is the physical key code (`KeyboardEvent.code`)
    pub fn key_down(&mut self, code: &str) {
        self.pressed.insert(code.to_owned());
        if code == KEY_FIRE {
            self.fire = true;
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.remove(code);
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    /// Dragging places the paddle and fires
    pub fn touch_move(&mut self, x: f32) {
        self.touch_x = Some(x);
        self.fire = true;
    }

    /// Snapshot for one frame, consuming the fire request
    pub fn take_tick_input(&mut self, now_ms: f64) -> TickInput {
        TickInput {
            left: self.is_pressed(KEY_LEFT),
            right: self.is_pressed(KEY_RIGHT),
            touch_x: self.touch_x,
            fire: std::mem::take(&mut self.fire),
            now_ms,
        }
    }

    /// Forget everything (restart)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_held_until_released() {
        let mut input = InputState::new();
        input.key_down(KEY_LEFT);
        let tick = input.take_tick_input(10.0);
        assert!(tick.left && !tick.right && !tick.fire);
        assert_eq!(tick.now_ms, 10.0);

        // Still held on the next frame
        assert!(input.take_tick_input(26.0).left);
        input.key_up(KEY_LEFT);
        assert!(!input.take_tick_input(42.0).left);
    }

    #[test]
    fn test_space_fires_once_per_press() {
        let mut input = InputState::new();
        input.key_down(KEY_FIRE);
        assert!(input.take_tick_input(0.0).fire);
        assert!(!input.take_tick_input(16.0).fire);

        // Key repeat raises it again
        input.key_down(KEY_FIRE);
        assert!(input.take_tick_input(32.0).fire);
    }

    #[test]
    fn test_touch_position_persists() {
        let mut input = InputState::new();
        input.touch_move(120.0);
        let tick = input.take_tick_input(0.0);
        assert_eq!(tick.touch_x, Some(120.0));
        assert!(tick.fire);

        let tick = input.take_tick_input(16.0);
        assert_eq!(tick.touch_x, Some(120.0));
        assert!(!tick.fire);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut input = InputState::new();
        input.key_down(KEY_RIGHT);
        input.key_down(KEY_FIRE);
        input.touch_move(5.0);
        input.clear();

        let tick = input.take_tick_input(0.0);
        assert!(!tick.left && !tick.right && !tick.fire);
        assert_eq!(tick.touch_x, None);
    }
}
