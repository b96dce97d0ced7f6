//! Shape generation for 2D primitives
//!
//! Pure geometry: everything here returns points for the surface to fill.

use glam::Vec2;
use std::f32::consts::PI;

use crate::Color;
use crate::palette;

/// Number of background stars
pub const STAR_COUNT: usize = 60;

/// Star scroll speed (px per ms)
const STAR_SPEED: f64 = 0.08;

/// One background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
}

/// Deterministic dot field scrolling downward with wall-clock time
pub fn starfield(bounds: Vec2, time_ms: f64) -> Vec<Star> {
    (0..STAR_COUNT)
        .map(|i| {
            let x = ((i as f32 * 123.0).sin() * 0.5 + 0.5) * bounds.x;
            let y = (time_ms * STAR_SPEED + i as f64 * 200.0) % bounds.y as f64;
            Star {
                pos: Vec2::new(x, y as f32),
                size: (i % 3 + 1) as f32,
                color: if i % 2 == 0 {
                    palette::STAR_DIM
                } else {
                    palette::STAR_BRIGHT
                },
            }
        })
        .collect()
}

/// Upward-pointing ship triangle inside a box
pub fn ship(min: Vec2, size: Vec2) -> [Vec2; 3] {
    [
        Vec2::new(min.x + size.x / 2.0, min.y),
        Vec2::new(min.x, min.y + size.y),
        Vec2::new(min.x + size.x, min.y + size.y),
    ]
}

/// Downward-pointing dart inside a box
pub fn dart(min: Vec2, size: Vec2) -> [Vec2; 3] {
    [
        Vec2::new(min.x + size.x / 2.0, min.y + size.y),
        Vec2::new(min.x, min.y),
        Vec2::new(min.x + size.x, min.y),
    ]
}

/// Rotating eight-point outline whose spikes pulse with time
pub fn boss_outline(center: Vec2, width: f32, time_ms: f64) -> [Vec2; 8] {
    let t = time_ms as f32;
    std::array::from_fn(|i| {
        let angle = (i as f32 * PI * 2.0) / 8.0 + t * 0.001;
        let r = width / 2.0 + (t * 0.005 + i as f32).sin() * 10.0;
        center + Vec2::from_angle(angle) * r
    })
}

/// Radius of the boss core
pub fn boss_core_radius(time_ms: f64) -> f32 {
    20.0 + ((time_ms as f32) * 0.01).sin() * 8.0
}

/// Color of the player health bar
pub fn health_color(health: f32) -> Color {
    if health > 40.0 {
        palette::HEALTH_GOOD
    } else if health > 20.0 {
        palette::HEALTH_LOW
    } else {
        palette::HEALTH_CRITICAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starfield_stays_in_bounds() {
        let bounds = Vec2::new(640.0, 480.0);
        for t in [0.0, 1234.5, 98765.0] {
            let stars = starfield(bounds, t);
            assert_eq!(stars.len(), STAR_COUNT);
            for star in stars {
                assert!(star.pos.x >= 0.0 && star.pos.x <= bounds.x);
                assert!(star.pos.y >= 0.0 && star.pos.y < bounds.y);
                assert!((1.0..=3.0).contains(&star.size));
            }
        }
    }

    #[test]
    fn test_starfield_is_deterministic() {
        let bounds = Vec2::new(640.0, 480.0);
        assert_eq!(starfield(bounds, 500.0), starfield(bounds, 500.0));
    }

    #[test]
    fn test_ship_points_up_and_dart_down() {
        let ship = ship(Vec2::new(10.0, 10.0), Vec2::splat(40.0));
        assert_eq!(ship[0], Vec2::new(30.0, 10.0));
        let dart = dart(Vec2::new(10.0, 10.0), Vec2::splat(25.0));
        assert_eq!(dart[0], Vec2::new(22.5, 35.0));
    }

    #[test]
    fn test_boss_outline_radius_range() {
        let center = Vec2::new(200.0, 200.0);
        for point in boss_outline(center, 120.0, 4321.0) {
            let r = point.distance(center);
            assert!(r >= 49.9 && r <= 70.1);
        }
    }

    #[test]
    fn test_health_colors() {
        assert_eq!(health_color(100.0), palette::HEALTH_GOOD);
        assert_eq!(health_color(30.0), palette::HEALTH_LOW);
        assert_eq!(health_color(20.0), palette::HEALTH_CRITICAL);
    }
}
