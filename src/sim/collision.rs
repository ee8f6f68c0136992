//! Collision detection between the player and drifting entities
//!
//! Everything on screen is a circle for collision purposes. With the small
//! entity counts here a plain pairwise pass beats any spatial structure.

use glam::Vec2;

/// Circle-circle overlap: centers closer than the mean of the two sizes
#[inline]
pub fn circles_collide(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    a_pos.distance(b_pos) < (a_size + b_size) / 2.0
}

/// How an obstacle hit is absorbed, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleHit {
    /// Active shield ate the hit
    Shielded,
    /// A phase charge was consumed
    Phased,
    /// Neither protection applied
    LifeLost,
}

/// Classify a hit against the player's current protections
pub fn classify_obstacle_hit(has_shield: bool, phase_charges: u32) -> ObstacleHit {
    if has_shield {
        ObstacleHit::Shielded
    } else if phase_charges > 0 {
        ObstacleHit::Phased
    } else {
        ObstacleHit::LifeLost
    }
}
