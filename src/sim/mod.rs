//! Frame simulation
//!
//! All gameplay lives here and never touches the platform: drawing goes
//! through [`crate::renderer::Canvas`], randomness through an injected
//! [`rand::Rng`] and time through the timestamp in [`TickInput`]. With a
//! seeded RNG and fixed timestamps a run is fully reproducible.

pub mod autopilot;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Bounds, Rect, collision};
pub use spawn::{EnemySpawn, generate_wave, spawn_enemy};
pub use state::{
    Bullet, Burst, Cooldown, Effects, Enemy, Fall, FloatingText, GameEvent, GamePhase, GameState,
    Player, Projectile, Spark, Steer,
};
pub use tick::{TickInput, hit_score, tick};
