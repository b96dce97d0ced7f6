//! Boss behavior
//!
//! Two movement states: descending until the entry line, then weaving around
//! the horizontal center. Volleys alternate between an instant spread fan and a
//! four-shot aimed burst whose shots are queued on the boss itself, so they die
//! with it.

use glam::Vec2;
use rand::Rng;

use super::spawn;
use super::state::{Boss, Bullet, GameState, PendingShot};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::palette;

/// Milliseconds between volleys at a given level
pub fn attack_cooldown_ms(level: u32) -> f64 {
    (BOSS_BASE_COOLDOWN_MS - level as f64 * BOSS_COOLDOWN_PER_LEVEL_MS).max(BOSS_MIN_COOLDOWN_MS)
}

/// One frame of boss movement
pub fn move_boss(boss: &mut Boss, width: f32) {
    if boss.descending() {
        boss.body.pos.y += boss.body.speed;
    } else {
        boss.phase += BOSS_PHASE_STEP;
        let home_x = width / 2.0 - boss.body.size.x / 2.0;
        boss.body.pos.x = home_x + boss.phase.sin() * (width / 3.0);
    }
}

/// Seven bullets fanned evenly around straight down
pub fn spread_fan(origin: Vec2) -> Vec<Bullet> {
    (-3..=3)
        .map(|i| {
            let angle = std::f32::consts::FRAC_PI_2 + i as f32 * BOSS_SPREAD_STEP;
            Bullet {
                pos: origin,
                size: Vec2::splat(BOSS_SPREAD_SIZE),
                color: palette::BOSS,
                vel: Vec2::from_angle(angle) * BOSS_SPREAD_SPEED,
                damage: BOSS_SPREAD_DAMAGE,
            }
        })
        .collect()
}

/// Queue an aimed burst toward `target`, one shot every interval starting now
pub fn aimed_burst(origin: Vec2, target: Vec2, now_ms: f64) -> Vec<PendingShot> {
    let to_target = target - origin;
    let angle = to_target.y.atan2(to_target.x);
    let vel = Vec2::from_angle(angle) * BOSS_AIMED_SPEED;
    (0..BOSS_AIMED_SHOTS)
        .map(|i| PendingShot {
            fire_at_ms: now_ms + i as f64 * BOSS_AIMED_INTERVAL_MS,
            origin,
            vel,
        })
        .collect()
}

fn aimed_bullet(shot: &PendingShot) -> Bullet {
    Bullet {
        pos: shot.origin,
        size: Vec2::splat(BOSS_AIMED_SIZE),
        color: palette::BOSS_AIMED,
        vel: shot.vel,
        damage: BOSS_AIMED_DAMAGE,
    }
}

/// Move due pending shots out of the boss queue and into play
fn release_due_shots(boss: &mut Boss, now_ms: f64, out: &mut Vec<Bullet>) {
    boss.pending_shots.retain(|shot| {
        if shot.fire_at_ms <= now_ms {
            out.push(aimed_bullet(shot));
            false
        } else {
            true
        }
    });
}

/// Boss step of the frame: spawn, move, shoot, take hits
pub fn update(state: &mut GameState, now_ms: f64) {
    if spawn::boss_due(state.level, state.boss.is_some()) {
        state.boss = Some(spawn::spawn_boss(state.level, state.bounds.x));
        state.screen_shake = SHAKE_BOSS_SPAWN;
        log::info!("Boss incoming at level {}", state.level);
    }

    let Some(mut boss) = state.boss.take() else {
        return;
    };

    move_boss(&mut boss, state.bounds.x);
    release_due_shots(&mut boss, now_ms, &mut state.enemy_bullets);

    if now_ms - boss.last_shot_ms > attack_cooldown_ms(state.level) {
        boss.last_shot_ms = now_ms;
        state.play(SoundCue::BossShot);
        let origin = boss.body.center();
        if state.rng.random::<f32>() < BOSS_SPREAD_CHANCE {
            log::debug!("Boss volley: spread fan");
            state.enemy_bullets.extend(spread_fan(origin));
        } else {
            log::debug!("Boss volley: aimed burst");
            boss.pending_shots
                .extend(aimed_burst(origin, state.player.pos, now_ms));
        }
    }

    let hitbox = boss.body.aabb();
    while boss.body.health > 0.0 {
        let Some(idx) = state
            .player_bullets
            .iter()
            .position(|b| b.aabb().overlaps(&hitbox))
        else {
            break;
        };
        let bullet = state.player_bullets.swap_remove(idx);
        boss.body.health -= bullet.damage;
        state.burst(bullet.pos, palette::BOSS, BURST_HIT);
    }

    if boss.body.health <= 0.0 {
        log::info!("Boss defeated at level {}", state.level);
        state.add_score(BOSS_SCORE);
        state.burst(boss.body.center(), boss.body.color, BURST_BOSS_DEATH);
        state.play(SoundCue::Explosion { large: true });
        state.screen_shake = SHAKE_BOSS_DEATH;
        // Dropping the boss discards its queued shots
        state.level_up();
    } else {
        state.boss = Some(boss);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_floor() {
        assert_eq!(attack_cooldown_ms(1), 1400.0);
        assert_eq!(attack_cooldown_ms(5), 1000.0);
        assert_eq!(attack_cooldown_ms(10), 500.0);
        assert_eq!(attack_cooldown_ms(40), 500.0);
    }

    #[test]
    fn test_descend_then_weave() {
        let mut boss = spawn::spawn_boss(5, 900.0);
        let start_x = boss.body.pos.x;
        for _ in 0..230 {
            move_boss(&mut boss, 900.0);
        }
        assert!(!boss.descending());
        assert_eq!(boss.body.pos.y, BOSS_ENTRY_Y);
        assert!(boss.phase > 0.0);
        assert!((boss.body.pos.x - (start_x + boss.phase.sin() * 300.0)).abs() < 1e-3);
    }

    #[test]
    fn test_spread_fan_is_symmetric_around_down() {
        let fan = spread_fan(Vec2::new(100.0, 100.0));
        assert_eq!(fan.len(), 7);
        let middle = &fan[3];
        assert!(middle.vel.x.abs() < 1e-5);
        assert!((middle.vel.y - BOSS_SPREAD_SPEED).abs() < 1e-5);
        for i in 0..3 {
            assert!((fan[i].vel.x + fan[6 - i].vel.x).abs() < 1e-5);
            assert!(fan[i].vel.y > 0.0);
        }
    }

    #[test]
    fn test_aimed_burst_schedule() {
        let shots = aimed_burst(Vec2::ZERO, Vec2::new(0.0, 100.0), 1000.0);
        let times: Vec<f64> = shots.iter().map(|s| s.fire_at_ms).collect();
        assert_eq!(times, vec![1000.0, 1120.0, 1240.0, 1360.0]);
        assert!((shots[0].vel - Vec2::new(0.0, BOSS_AIMED_SPEED)).length() < 1e-4);
    }

    #[test]
    fn test_release_only_due_shots() {
        let mut boss = spawn::spawn_boss(5, 800.0);
        boss.pending_shots = aimed_burst(Vec2::ZERO, Vec2::Y, 0.0);
        let mut out = Vec::new();
        release_due_shots(&mut boss, 130.0, &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(boss.pending_shots.len(), 2);
        assert!(out.iter().all(|b| b.damage == BOSS_AIMED_DAMAGE));
    }
}
