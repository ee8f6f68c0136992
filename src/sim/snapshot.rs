//! Render-ready view of the game state
//!
//! The presentation collaborator draws from this snapshot and never touches
//! the live simulation. Everything visual (positions, sizes, colors, spin,
//! pulse, fade) is precomputed here.

use glam::Vec2;

use super::state::{GamePhase, GameState, Player};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSprite {
    pub pos: Vec2,
    pub size: f32,
    pub color: &'static str,
    /// Draw the shield ring
    pub shield: bool,
    /// Draw the magnet ring
    pub magnet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSprite {
    pub pos: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpSprite {
    pub pos: Vec2,
    /// Base size already scaled by the pulse
    pub size: f32,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub size: f32,
    /// Opacity, fading with remaining life
    pub alpha: f32,
    pub color: &'static str,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    /// Background scroll speed for parallax effects
    pub scroll_speed: f32,
    pub modifier_name: Option<&'static str>,
    /// Names and descriptions of the offered modifiers (ModifierSelect)
    pub offered: Vec<(&'static str, &'static str)>,
    /// Present only during a run
    pub player: Option<PlayerSprite>,
    pub obstacles: Vec<ObstacleSprite>,
    pub power_ups: Vec<PowerUpSprite>,
    pub particles: Vec<ParticleSprite>,
}

impl GameState {
    /// Build the render snapshot for the current frame
    pub fn snapshot(&self) -> RenderSnapshot {
        let in_run = matches!(self.phase, GamePhase::Playing | GamePhase::GameOver);

        RenderSnapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            lives: self.lives,
            scroll_speed: self.current_speed,
            modifier_name: self.active_modifier.as_ref().map(|m| m.name),
            offered: self
                .offered
                .iter()
                .map(|m| (m.name, m.description))
                .collect(),
            player: in_run.then(|| PlayerSprite {
                pos: self.player.pos,
                size: self.player.size,
                color: Player::COLOR,
                shield: self.player.has_shield,
                magnet: self.player.has_magnet,
            }),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleSprite {
                    pos: o.pos,
                    size: o.size,
                    rotation: o.rotation,
                    color: super::state::Obstacle::COLOR,
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpSprite {
                    pos: p.pos,
                    size: p.size * (1.0 + p.pulse.sin() * 0.2),
                    color: p.kind.color(),
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleSprite {
                    pos: p.pos,
                    size: p.size,
                    alpha: p.alpha(),
                    color: p.color,
                })
                .collect(),
        }
    }
}
