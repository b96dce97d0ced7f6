//! Collision detection and off-screen culling
//!
//! Everything in the playfield is an axis-aligned box anchored at its top-left
//! corner. Overlap uses open intervals, so boxes that merely touch do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ENEMY_BULLET_MARGIN, PLAYER_BULLET_MARGIN};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// Player bullets leave through the top or the sides
#[inline]
pub fn player_bullet_gone(pos: Vec2, bounds: Vec2) -> bool {
    pos.y < -PLAYER_BULLET_MARGIN
        || pos.x < -PLAYER_BULLET_MARGIN
        || pos.x > bounds.x + PLAYER_BULLET_MARGIN
}

/// Enemy bullets leave through the bottom edge or a wider margin elsewhere
#[inline]
pub fn enemy_bullet_gone(pos: Vec2, bounds: Vec2) -> bool {
    pos.y > bounds.y
        || pos.y < -ENEMY_BULLET_MARGIN
        || pos.x < -ENEMY_BULLET_MARGIN
        || pos.x > bounds.x + ENEMY_BULLET_MARGIN
}

/// Falling entities (minions, power-ups) leave through the bottom edge
#[inline]
pub fn fell_off(pos: Vec2, bounds: Vec2) -> bool {
    pos.y > bounds.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 30.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_bullet_margins() {
        let bounds = Vec2::new(800.0, 600.0);
        assert!(!player_bullet_gone(Vec2::new(400.0, -19.0), bounds));
        assert!(player_bullet_gone(Vec2::new(400.0, -21.0), bounds));
        assert!(player_bullet_gone(Vec2::new(821.0, 300.0), bounds));
        // Player bullets never cull at the bottom
        assert!(!player_bullet_gone(Vec2::new(400.0, 900.0), bounds));

        assert!(!enemy_bullet_gone(Vec2::new(-49.0, 300.0), bounds));
        assert!(enemy_bullet_gone(Vec2::new(-51.0, 300.0), bounds));
        assert!(enemy_bullet_gone(Vec2::new(400.0, 601.0), bounds));
        assert!(!enemy_bullet_gone(Vec2::new(849.0, -49.0), bounds));
    }
}
