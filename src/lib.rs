//! Neon Barrage - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `game`: Frame loop controller that owns the run and dispatches notifications
//! - `renderer`: 2D surface rendering (canvas on the web, recorder for headless runs)
//! - `audio`: Fire-and-forget sound cues
//! - `settings`: Player preferences

pub mod audio;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Game, GameListener};
pub use settings::{QualityPreset, Settings};

/// RGBA color, each channel in 0.0 - 1.0
pub type Color = [f32; 4];

/// Build an opaque color from a `0xRRGGBB` literal
pub const fn hex(rgb: u32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration used by countdown timers (ms)
    pub const NOMINAL_FRAME_MS: f32 = 16.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Distance of the spawn point above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 80.0;
    /// Fraction of the pointer gap closed each frame
    pub const PLAYER_EASING: f32 = 0.15;
    pub const FIRE_COOLDOWN_MS: f64 = 180.0;
    pub const TRIPLE_FIRE_COOLDOWN_MS: f64 = 120.0;
    pub const TRIPLE_SHOT_ANGLES: [f32; 3] = [-0.15, 0.0, 0.15];

    /// Player bullets
    pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 15.0;
    pub const PLAYER_BULLET_SPEED: f32 = 12.0;
    pub const PLAYER_BULLET_DAMAGE: f32 = 1.0;
    pub const PLAYER_BULLET_MARGIN: f32 = 20.0;
    pub const ENEMY_BULLET_MARGIN: f32 = 50.0;

    /// Damage taken by the player
    pub const BODY_CONTACT_DAMAGE: f32 = 20.0;
    /// Shield time consumed by one body contact (ms)
    pub const SHIELD_CONTACT_COST_MS: f32 = 1000.0;

    /// Camera shake pulses
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const SHAKE_CUTOFF: f32 = 0.1;
    pub const SHAKE_RENDER_THRESHOLD: f32 = 0.5;
    pub const SHAKE_BULLET_HIT: f32 = 8.0;
    pub const SHAKE_BODY_HIT: f32 = 15.0;
    pub const SHAKE_BOSS_SPAWN: f32 = 20.0;
    pub const SHAKE_BOSS_DEATH: f32 = 40.0;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 25.0;
    pub const POWER_UP_FALL_SPEED: f32 = 2.0;
    pub const POWER_UP_DURATION_MS: f32 = 8000.0;
    pub const POWER_UP_DROP_CHANCE: f32 = 0.1;

    /// Minion spawning
    pub const SPAWN_CHANCE_BASE: f32 = 0.02;
    pub const SPAWN_CHANCE_PER_LEVEL: f32 = 0.005;
    pub const HEAVY_ROLL: f32 = 0.85;
    pub const FAST_ROLL: f32 = 0.70;

    /// Scoring
    pub const KILL_SCORE_PER_LEVEL: u64 = 25;
    pub const BOSS_SCORE: u64 = 5000;
    pub const LEVEL_SCORE_STEP: u64 = 2000;

    /// Boss
    pub const BOSS_LEVEL_INTERVAL: u32 = 5;
    pub const BOSS_SIZE: f32 = 120.0;
    pub const BOSS_HEALTH_PER_LEVEL: f32 = 150.0;
    pub const BOSS_ENTRY_Y: f32 = 100.0;
    pub const BOSS_DESCENT_SPEED: f32 = 1.0;
    pub const BOSS_PHASE_STEP: f32 = 0.015;
    pub const BOSS_SPREAD_CHANCE: f32 = 0.6;
    pub const BOSS_SPREAD_STEP: f32 = 0.25;
    pub const BOSS_SPREAD_SPEED: f32 = 4.0;
    pub const BOSS_SPREAD_SIZE: f32 = 10.0;
    pub const BOSS_SPREAD_DAMAGE: f32 = 10.0;
    pub const BOSS_AIMED_SHOTS: u32 = 4;
    pub const BOSS_AIMED_INTERVAL_MS: f64 = 120.0;
    pub const BOSS_AIMED_SPEED: f32 = 8.0;
    pub const BOSS_AIMED_SIZE: f32 = 12.0;
    pub const BOSS_AIMED_DAMAGE: f32 = 15.0;
    pub const BOSS_MIN_COOLDOWN_MS: f64 = 500.0;
    pub const BOSS_BASE_COOLDOWN_MS: f64 = 1500.0;
    pub const BOSS_COOLDOWN_PER_LEVEL_MS: f64 = 100.0;

    /// Particle bursts
    pub const BURST_DEFLECT: u32 = 3;
    pub const BURST_HIT: u32 = 5;
    pub const BURST_CONTACT: u32 = 15;
    pub const BURST_PICKUP: u32 = 20;
    pub const BURST_KILL: u32 = 25;
    pub const BURST_BOSS_DEATH: u32 = 120;
}

/// Entity colors
pub mod palette {
    use super::{Color, hex};

    pub const BACKGROUND: Color = hex(0x0f172a);
    pub const STAR_DIM: Color = hex(0x1e293b);
    pub const STAR_BRIGHT: Color = hex(0x334155);
    pub const PLAYER: Color = hex(0x38bdf8);
    pub const PLAYER_BULLET: Color = hex(0x7dd3fc);
    pub const TRIPLE_SHOT: Color = hex(0xfbbf24);
    pub const SHIELD: Color = hex(0xa855f7);
    pub const BASIC: Color = hex(0xf87171);
    pub const FAST: Color = hex(0xfbbf24);
    pub const HEAVY: Color = hex(0xef4444);
    pub const BOSS: Color = hex(0xf472b6);
    pub const BOSS_AIMED: Color = hex(0xec4899);
    pub const WHITE: Color = hex(0xffffff);
    pub const HIGHLIGHT: Color = [1.0, 1.0, 1.0, 0.2];
    pub const HEALTH_GOOD: Color = hex(0x4ade80);
    pub const HEALTH_LOW: Color = hex(0xfbbf24);
    pub const HEALTH_CRITICAL: Color = hex(0xf87171);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_channels() {
        let c = hex(0xff8000);
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 1.0);
    }
}
