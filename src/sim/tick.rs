//! Per-frame simulation tick
//!
//! Advances the run by one display frame. Countdown timers use the nominal
//! frame duration rather than the real elapsed time; the timestamp only drives
//! weapon cooldowns and the boss burst schedule.

use glam::Vec2;

use super::boss;
use super::collision::{enemy_bullet_gone, fell_off, player_bullet_gone};
use super::spawn;
use super::state::{Bullet, Enemy, GamePhase, GameState, Player, PowerUpKind};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::palette;

/// Inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic frame timestamp (ms)
    pub now_ms: f64,
    /// Latest pointer position, if it moved since the last frame
    pub pointer: Option<Vec2>,
    /// New playfield size, if it was resized since the last frame
    pub bounds: Option<Vec2>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    if let Some(bounds) = input.bounds {
        state.bounds = bounds;
    }
    if let Some(pointer) = input.pointer {
        state.pointer = pointer;
    }

    // Degenerate playfield: skip, retry next frame
    if state.bounds.x <= 0.0 || state.bounds.y <= 0.0 {
        return;
    }

    let now = input.now_ms;
    state.frame += 1;

    decay_shake(state);

    let target = state.pointer;
    state.player.pos += (target - state.player.pos) * PLAYER_EASING;
    state.player.drain_power_up(NOMINAL_FRAME_MS);

    fire_player_weapon(state, now);
    update_player_bullets(state);
    update_enemy_bullets(state);
    update_power_ups(state);
    boss::update(state, now);
    update_minions(state);
    update_particles(state);

    if state.game_over_sent() {
        state.phase = GamePhase::GameOver;
    }
}

fn decay_shake(state: &mut GameState) {
    if state.screen_shake > SHAKE_CUTOFF {
        state.screen_shake *= SHAKE_DECAY;
    } else {
        state.screen_shake = 0.0;
    }
}

/// Bullets for one trigger pull from the player's current position
pub fn player_volley(player: &Player) -> Vec<Bullet> {
    let origin = Vec2::new(
        player.pos.x + player.size.x / 2.0 - PLAYER_BULLET_WIDTH / 2.0,
        player.pos.y,
    );
    let bullet = |vel: Vec2, color| Bullet {
        pos: origin,
        size: Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
        color,
        vel,
        damage: PLAYER_BULLET_DAMAGE,
    };

    if player.power_up == Some(PowerUpKind::TripleShot) {
        TRIPLE_SHOT_ANGLES
            .iter()
            .map(|a| {
                let vel = Vec2::new(a.sin(), -a.cos()) * PLAYER_BULLET_SPEED;
                bullet(vel, palette::TRIPLE_SHOT)
            })
            .collect()
    } else {
        vec![bullet(
            Vec2::new(0.0, -PLAYER_BULLET_SPEED),
            palette::PLAYER_BULLET,
        )]
    }
}

fn fire_player_weapon(state: &mut GameState, now: f64) {
    if now - state.player.last_shot_ms > state.player.fire_cooldown_ms() {
        let volley = player_volley(&state.player);
        state.player_bullets.extend(volley);
        state.player.last_shot_ms = now;
        state.play(SoundCue::Shoot);
    }
}

fn update_player_bullets(state: &mut GameState) {
    let bounds = state.bounds;
    for bullet in &mut state.player_bullets {
        bullet.pos += bullet.vel;
    }
    state
        .player_bullets
        .retain(|b| !player_bullet_gone(b.pos, bounds));
}

fn update_enemy_bullets(state: &mut GameState) {
    let bounds = state.bounds;
    let bullets = std::mem::take(&mut state.enemy_bullets);
    let mut kept = Vec::with_capacity(bullets.len());

    for mut bullet in bullets {
        bullet.pos += bullet.vel;

        if bullet.aabb().overlaps(&state.player.aabb()) {
            if state.player.shielded() {
                state.burst(bullet.pos, palette::SHIELD, BURST_DEFLECT);
            } else {
                state.hurt_player(bullet.damage, SHAKE_BULLET_HIT);
            }
            state.burst(bullet.pos, bullet.color, BURST_HIT);
            continue;
        }

        if !enemy_bullet_gone(bullet.pos, bounds) {
            kept.push(bullet);
        }
    }

    state.enemy_bullets = kept;
}

fn update_power_ups(state: &mut GameState) {
    let bounds = state.bounds;
    let power_ups = std::mem::take(&mut state.power_ups);
    let mut kept = Vec::with_capacity(power_ups.len());

    for mut power_up in power_ups {
        power_up.pos.y += power_up.speed;

        if power_up.aabb().overlaps(&state.player.aabb()) {
            state.player.grant(power_up.kind);
            state.play(SoundCue::PowerUp);
            state.burst(power_up.center(), power_up.color, BURST_PICKUP);
            continue;
        }

        if !fell_off(power_up.pos, bounds) {
            kept.push(power_up);
        }
    }

    state.power_ups = kept;
}

/// Shielded body contact: no damage, but the shield wears down
fn absorb_contact(player: &mut Player) {
    player.power_up_ms = (player.power_up_ms - SHIELD_CONTACT_COST_MS).max(0.0);
    if player.power_up_ms == 0.0 {
        player.power_up = None;
    }
}

fn update_minions(state: &mut GameState) {
    if spawn::roll_enemy_spawn(state.level, state.boss.is_some(), &mut state.rng) {
        let enemy = spawn::spawn_enemy(state.level, state.bounds.x, &mut state.rng);
        state.enemies.push(enemy);
    }

    let bounds = state.bounds;
    let enemies = std::mem::take(&mut state.enemies);
    let mut kept = Vec::with_capacity(enemies.len());

    for mut enemy in enemies {
        enemy.pos.y += enemy.speed;

        if enemy.aabb().overlaps(&state.player.aabb()) {
            if state.player.shielded() {
                absorb_contact(&mut state.player);
            } else {
                state.hurt_player(BODY_CONTACT_DAMAGE, SHAKE_BODY_HIT);
            }
            state.burst(enemy.center(), enemy.color, BURST_CONTACT);
            continue;
        }

        if shoot_minion(state, &mut enemy) {
            kill_minion(state, &enemy);
            continue;
        }

        if !fell_off(enemy.pos, bounds) {
            kept.push(enemy);
        }
    }

    // Minions never spawn mid-loop, so nothing else was added meanwhile
    state.enemies = kept;
}

/// Apply every overlapping player bullet until the minion dies.
/// Returns true if it died.
fn shoot_minion(state: &mut GameState, enemy: &mut Enemy) -> bool {
    let hitbox = enemy.aabb();
    loop {
        let Some(idx) = state
            .player_bullets
            .iter()
            .position(|b| b.aabb().overlaps(&hitbox))
        else {
            return false;
        };
        let bullet = state.player_bullets.swap_remove(idx);
        enemy.health -= bullet.damage;
        if enemy.health <= 0.0 {
            return true;
        }
        state.burst(bullet.pos, enemy.color, BURST_HIT);
    }
}

fn kill_minion(state: &mut GameState, enemy: &Enemy) {
    state.add_score(KILL_SCORE_PER_LEVEL * state.level as u64);
    state.burst(enemy.center(), enemy.color, BURST_KILL);
    state.play(SoundCue::Explosion { large: false });

    if let Some(power_up) = spawn::roll_power_up(enemy.pos, &mut state.rng) {
        state.power_ups.push(power_up);
    }

    if state.player.score >= state.level as u64 * LEVEL_SCORE_STEP {
        state.level_up();
    }
}

fn update_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.age += 1;
    }
    state.particles.retain(|p| p.age as f32 <= p.max_age);
}
