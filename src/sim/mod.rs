//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering, storage, or platform dependencies
//! - Single writer: a tick runs to completion before the next is scheduled

pub mod collision;
pub mod modifier;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ObstacleHit, circles_collide};
pub use modifier::{ActiveModifier, MODIFIERS, Modifier, ModifierEffect, ResolvedEffects};
pub use snapshot::RenderSnapshot;
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, Particle, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
