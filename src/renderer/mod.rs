//! 2D rendering
//!
//! [`render`] reads the game state and issues draw calls against a [`Surface`].
//! It never mutates the simulation: shake jitter comes from a throwaway RNG
//! seeded by the frame counter, so drawing the same state twice yields the
//! same frame.

pub mod recorder;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recorder::{CommandRecorder, DrawCommand};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SHAKE_RENDER_THRESHOLD;
use crate::palette;
use crate::settings::Settings;
use crate::sim::{EnemyKind, GamePhase, GameState};
use crate::Color;

/// A 2D drawing target with canvas-style state (transform, glow, alpha)
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Vec2;
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn clear_rect(&mut self, min: Vec2, size: Vec2);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Color, line_width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, line_width: f32);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    /// Centered bold monospace text
    fn fill_text(&mut self, text: &str, at: Vec2, size_px: f32, color: Color);
    /// Shadow blur halo for subsequent fills; blur 0 turns it off
    fn set_glow(&mut self, blur: f32, color: Color);
    fn set_alpha(&mut self, alpha: f32);
}

/// Random camera offset for a shake magnitude, stable for a given frame
pub fn shake_offset(frame: u64, time_ms: f64, magnitude: f32) -> Vec2 {
    let mut rng = Pcg32::seed_from_u64(frame ^ time_ms.to_bits());
    Vec2::new(
        (rng.random::<f32>() - 0.5) * magnitude,
        (rng.random::<f32>() - 0.5) * magnitude,
    )
}

struct Painter<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    glow: bool,
}

impl<S: Surface + ?Sized> Painter<'_, S> {
    fn glow(&mut self, blur: f32, color: Color) {
        if self.glow {
            self.surface.set_glow(blur, color);
        }
    }

    fn no_glow(&mut self) {
        if self.glow {
            self.surface.set_glow(0.0, [0.0; 4]);
        }
    }
}

/// Draw one frame
pub fn render<S: Surface + ?Sized>(
    state: &GameState,
    settings: &Settings,
    surface: &mut S,
    time_ms: f64,
) {
    let size = surface.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }

    let mut p = Painter {
        surface,
        glow: settings.quality.glow_enabled(),
    };

    p.surface.save();

    let shake = if settings.effective_screen_shake() {
        state.screen_shake
    } else {
        0.0
    };
    if shake > SHAKE_RENDER_THRESHOLD {
        p.surface
            .translate(shake_offset(state.frame, time_ms, shake));
    }
    p.surface
        .clear_rect(Vec2::splat(-50.0), size + Vec2::splat(100.0));

    draw_background(&mut p, settings, size, time_ms);

    if state.phase != GamePhase::Playing {
        p.surface.restore();
        return;
    }

    draw_power_ups(&mut p, state);
    draw_boss(&mut p, state, settings, size, time_ms);
    draw_player(&mut p, state);
    draw_bullets(&mut p, state);
    draw_enemies(&mut p, state);
    draw_particles(&mut p, state, settings.max_particles());
    if settings.show_health_bars {
        draw_health_bar(&mut p, state);
    }

    p.surface.restore();
}

fn draw_background<S: Surface + ?Sized>(
    p: &mut Painter<'_, S>,
    settings: &Settings,
    size: Vec2,
    time_ms: f64,
) {
    p.surface.fill_rect(Vec2::ZERO, size, palette::BACKGROUND);
    if !settings.quality.starfield_enabled() {
        return;
    }
    for star in shapes::starfield(size, time_ms) {
        p.surface
            .fill_rect(star.pos, Vec2::splat(star.size), star.color);
    }
}

fn draw_power_ups<S: Surface + ?Sized>(p: &mut Painter<'_, S>, state: &GameState) {
    for power_up in &state.power_ups {
        let center = power_up.center();
        p.glow(15.0, power_up.color);
        p.surface
            .fill_circle(center, power_up.size.x / 2.0, power_up.color);
        p.surface.fill_text(
            power_up.kind.glyph(),
            center + Vec2::new(0.0, 4.0),
            12.0,
            palette::WHITE,
        );
        p.no_glow();
    }
}

fn draw_boss<S: Surface + ?Sized>(
    p: &mut Painter<'_, S>,
    state: &GameState,
    settings: &Settings,
    size: Vec2,
    time_ms: f64,
) {
    let Some(boss) = &state.boss else {
        return;
    };
    let body = &boss.body;
    let center = body.center();

    p.glow(30.0, body.color);
    p.surface.fill_polygon(
        &shapes::boss_outline(center, body.size.x, time_ms),
        body.color,
    );
    p.surface
        .fill_circle(center, shapes::boss_core_radius(time_ms), palette::WHITE);
    p.no_glow();

    if !settings.show_health_bars {
        return;
    }
    let bar_width = size.x * 0.7;
    let bar_min = Vec2::new((size.x - bar_width) / 2.0, 40.0);
    let ratio = (body.health / body.max_health).clamp(0.0, 1.0);
    p.surface
        .fill_rect(bar_min, Vec2::new(bar_width, 12.0), palette::STAR_DIM);
    p.surface
        .fill_rect(bar_min, Vec2::new(ratio * bar_width, 12.0), palette::BOSS);
    p.surface
        .stroke_rect(bar_min, Vec2::new(bar_width, 12.0), palette::WHITE, 2.0);
}

fn draw_player<S: Surface + ?Sized>(p: &mut Painter<'_, S>, state: &GameState) {
    let player = &state.player;
    if player.shielded() {
        p.glow(20.0, palette::SHIELD);
        p.surface
            .stroke_circle(player.center(), 40.0, palette::SHIELD, 3.0);
        p.no_glow();
    }

    p.glow(20.0, player.color);
    p.surface
        .fill_polygon(&shapes::ship(player.pos, player.size), player.color);
    p.no_glow();
}

fn draw_bullets<S: Surface + ?Sized>(p: &mut Painter<'_, S>, state: &GameState) {
    for bullet in state.player_bullets.iter().chain(&state.enemy_bullets) {
        p.glow(8.0, bullet.color);
        p.surface.fill_rect(bullet.pos, bullet.size, bullet.color);
        p.no_glow();
    }
}

fn draw_enemies<S: Surface + ?Sized>(p: &mut Painter<'_, S>, state: &GameState) {
    for enemy in &state.enemies {
        p.glow(15.0, enemy.color);
        match enemy.kind {
            EnemyKind::Heavy => {
                p.surface.fill_rect(enemy.pos, enemy.size, enemy.color);
                p.surface.fill_rect(
                    enemy.pos + Vec2::splat(5.0),
                    enemy.size - Vec2::splat(10.0),
                    palette::HIGHLIGHT,
                );
            }
            EnemyKind::Fast => {
                p.surface
                    .fill_polygon(&shapes::dart(enemy.pos, enemy.size), enemy.color);
            }
            EnemyKind::Basic => {
                p.surface
                    .fill_circle(enemy.center(), enemy.size.x / 2.0, enemy.color);
            }
            // The boss lives in its own slot and is drawn by `draw_boss`
            EnemyKind::Boss => {}
        }
        p.no_glow();
    }
}

fn draw_particles<S: Surface + ?Sized>(p: &mut Painter<'_, S>, state: &GameState, cap: usize) {
    for particle in state.particles.iter().take(cap) {
        p.surface.set_alpha(particle.alpha());
        p.surface
            .fill_rect(particle.pos, particle.size, particle.color);
        p.surface.set_alpha(1.0);
    }
}

fn draw_health_bar<S: Surface + ?Sized>(p: &mut Painter<'_, S>, state: &GameState) {
    let player = &state.player;
    let bar = Vec2::new(80.0, 6.0);
    let min = Vec2::new(
        player.pos.x + player.size.x / 2.0 - bar.x / 2.0,
        player.pos.y + player.size.y + 15.0,
    );
    p.surface.fill_rect(min, bar, palette::STAR_DIM);
    let filled = Vec2::new(player.health / 100.0 * bar.x, bar.y);
    p.surface
        .fill_rect(min, filled, shapes::health_color(player.health));
}
