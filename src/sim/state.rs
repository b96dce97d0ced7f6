//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]. The renderer only
//! ever sees it through a shared reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spawn;
use crate::Color;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::palette;

/// External run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu, nothing advances
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    TripleShot,
    Shield,
}

impl PowerUpKind {
    pub fn color(self) -> Color {
        match self {
            PowerUpKind::TripleShot => palette::TRIPLE_SHOT,
            PowerUpKind::Shield => palette::SHIELD,
        }
    }

    /// Letter drawn on the falling pickup
    pub fn glyph(self) -> &'static str {
        match self {
            PowerUpKind::TripleShot => "T",
            PowerUpKind::Shield => "S",
        }
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Fast,
    Heavy,
    Boss,
}

impl EnemyKind {
    /// Pick a minion variant from a uniform roll in [0, 1)
    pub fn from_roll(roll: f32) -> Self {
        if roll > HEAVY_ROLL {
            EnemyKind::Heavy
        } else if roll > FAST_ROLL {
            EnemyKind::Fast
        } else {
            EnemyKind::Basic
        }
    }

    /// (health multiplier, speed multiplier, size, color)
    pub fn profile(self) -> (f32, f32, f32, Color) {
        match self {
            EnemyKind::Basic => (1.0, 1.0, 30.0, palette::BASIC),
            EnemyKind::Fast => (0.7, 1.7, 25.0, palette::FAST),
            EnemyKind::Heavy => (4.0, 0.5, 50.0, palette::HEAVY),
            EnemyKind::Boss => (1.0, 1.0, BOSS_SIZE, palette::BOSS),
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// 0 - 100, clamped at 0
    pub health: f32,
    pub score: u64,
    /// Timestamp of the last shot (ms)
    pub last_shot_ms: f64,
    pub power_up: Option<PowerUpKind>,
    /// Remaining power-up time (ms)
    pub power_up_ms: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(PLAYER_SIZE),
            color: palette::PLAYER,
            health: PLAYER_MAX_HEALTH,
            score: 0,
            last_shot_ms: 0.0,
            power_up: None,
            power_up_ms: 0.0,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn shielded(&self) -> bool {
        self.power_up == Some(PowerUpKind::Shield)
    }

    /// Grant a power-up for the full duration
    pub fn grant(&mut self, kind: PowerUpKind) {
        self.power_up = Some(kind);
        self.power_up_ms = POWER_UP_DURATION_MS;
    }

    /// Count down the power-up timer; the power-up ends when it reaches zero
    pub fn drain_power_up(&mut self, ms: f32) {
        if self.power_up_ms > 0.0 {
            self.power_up_ms = (self.power_up_ms - ms).max(0.0);
            if self.power_up_ms == 0.0 {
                self.power_up = None;
            }
        }
    }

    /// Minimum time between shots with the current power-up
    pub fn fire_cooldown_ms(&self) -> f64 {
        if self.power_up == Some(PowerUpKind::TripleShot) {
            TRIPLE_FIRE_COOLDOWN_MS
        } else {
            FIRE_COOLDOWN_MS
        }
    }
}

/// A regular enemy (minion) or the body of the boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub kind: EnemyKind,
    pub health: f32,
    pub max_health: f32,
    /// Fall speed (px per frame)
    pub speed: f32,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// One deferred shot of an aimed burst
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingShot {
    pub fire_at_ms: f64,
    pub origin: Vec2,
    pub vel: Vec2,
}

/// The boss singleton
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub body: Enemy,
    /// Timestamp of the last volley (ms)
    pub last_shot_ms: f64,
    /// Weave phase angle (radians)
    pub phase: f32,
    /// Aimed-burst shots not yet released; dropped with the boss
    pub pending_shots: Vec<PendingShot>,
}

impl Boss {
    /// Still entering from above the screen
    pub fn descending(&self) -> bool {
        self.body.pos.y < BOSS_ENTRY_Y
    }
}

/// A projectile. Straight shots are just vertical velocities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    /// Displacement per frame
    pub vel: Vec2,
    pub damage: f32,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub kind: PowerUpKind,
    pub speed: f32,
}

impl PowerUp {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Color,
    pub vel: Vec2,
    /// Frames lived
    pub age: u32,
    /// Frames until removal
    pub max_age: f32,
}

impl Particle {
    /// 1.0 when born, 0.0 at end of life
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age as f32 / self.max_age).clamp(0.0, 1.0)
    }
}

/// Notifications produced by a tick, drained by the loop controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LevelUp(u32),
    GameOver { final_score: u64 },
    Sound(SoundCue),
}

/// Complete run state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Every gameplay random draw comes from here
    #[serde(skip)]
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current level (starts at 1)
    pub level: u32,
    /// Simulation frame counter
    pub frame: u64,
    /// Playfield size (px)
    pub bounds: Vec2,
    /// Last known pointer position, the player's movement target
    pub pointer: Vec2,
    /// Camera shake magnitude, decays toward 0
    pub screen_shake: f32,
    pub player: Player,
    /// Regular enemies, unordered
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    /// Travelling upward
    pub player_bullets: Vec<Bullet>,
    /// Travelling downward or radially from the boss
    pub enemy_bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    #[serde(skip)]
    events: Vec<GameEvent>,
    game_over_sent: bool,
}

impl GameState {
    /// Fresh run: player near the bottom center, level 1, everything empty
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        let start = Vec2::new(bounds.x / 2.0, bounds.y - PLAYER_SPAWN_OFFSET);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            level: 1,
            frame: 0,
            bounds,
            pointer: start,
            screen_shake: 0.0,
            player: Player::new(start),
            enemies: Vec::new(),
            boss: None,
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            game_over_sent: false,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn add_score(&mut self, points: u64) {
        self.player.score += points;
        self.emit(GameEvent::ScoreChanged(self.player.score));
    }

    pub fn level_up(&mut self) {
        self.level += 1;
        log::info!("Level up: {}", self.level);
        self.emit(GameEvent::LevelUp(self.level));
        self.play(SoundCue::LevelUp);
    }

    /// Apply unshielded damage to the player
    pub fn hurt_player(&mut self, amount: f32, shake: f32) {
        self.player.health = (self.player.health - amount).max(0.0);
        self.screen_shake = shake;
        self.play(SoundCue::Damage);
        self.check_game_over();
    }

    /// Signal game over once, with the score at the moment of the lethal hit
    pub fn check_game_over(&mut self) {
        if self.player.health <= 0.0 && !self.game_over_sent {
            self.game_over_sent = true;
            let final_score = self.player.score;
            log::info!("Game over at level {} with score {}", self.level, final_score);
            self.emit(GameEvent::GameOver { final_score });
        }
    }

    pub fn game_over_sent(&self) -> bool {
        self.game_over_sent
    }

    /// Emit a burst of particles at a point
    pub fn burst(&mut self, at: Vec2, color: Color, count: u32) {
        spawn::burst(&mut self.particles, &mut self.rng, at, color, count);
    }
}
