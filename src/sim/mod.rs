//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Timers count nominal frames, not wall-clock time
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    Boss, Bullet, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle, PendingShot,
    Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, player_volley, tick};
