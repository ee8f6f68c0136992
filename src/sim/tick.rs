//! Per-frame simulation tick and phase state machine
//!
//! One invocation advances the game by one rendered frame. All mutation of
//! the run happens inside this call; timed effects are counters decayed
//! here, never scheduled callbacks.

use glam::Vec2;

use super::collision::{self, ObstacleHit};
use super::spawn;
use super::state::{GamePhase, GameState, Obstacle, PowerUpKind};
use crate::audio::{AudioCue, Sfx};
use crate::consts::*;

/// Explosion tints for absorbed hits
const SHIELD_BURST_COLOR: &str = "#00FFFF";
const PHASE_BURST_COLOR: &str = "#FFD700";

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Merged movement intent, diagonal magnitude <= 1
    pub move_dir: Vec2,
    /// Start action (title screen)
    pub start: bool,
    /// Restart action (game-over screen)
    pub restart: bool,
    /// Modifier selection index (0-2)
    pub select: Option<usize>,
}

/// Advance the game by one frame. `dt_ms` is wall-clock and gets clamped
/// before use.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let dt = dt_ms.min(MAX_FRAME_DELTA_MS);
    state.frame_count += 1;

    match state.phase {
        GamePhase::Start => {
            if input.start {
                state.enter_modifier_select();
            }
        }
        GamePhase::ModifierSelect => {
            if let Some(index) = input.select {
                state.choose_modifier(index);
            }
            state.tick_selection(dt);
        }
        GamePhase::Playing => update_playing(state, input, dt),
        GamePhase::GameOver => {
            if input.restart {
                state.reset_to_start();
            }
        }
    }
}

/// The Playing-phase frame, in fixed order: time bookkeeping, player,
/// dilation scan, spawn trials, world update, particles, collisions,
/// difficulty and score accrual.
fn update_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    let scaled = dt * state.time_scale;

    if state.slow_time_ms > 0.0 {
        state.slow_time_ms = (state.slow_time_ms - scaled).max(0.0);
    }
    let speed_factor = if state.slow_time_ms > 0.0 {
        SLOW_SPEED_FACTOR
    } else {
        1.0
    };
    state.current_speed = state.game_speed * speed_factor;

    let arena = state.arena;
    state.player.update(scaled, input.move_dir, arena);

    let effects = state.effects();
    if effects.time_dilation {
        update_time_dilation(state);
    }

    let speed = state.current_speed;
    spawn::run_spawn_trials(state, scaled);
    spawn::update_entities(state, scaled, speed);
    spawn::enforce_particle_cap(state);
    spawn::emit_trail(state);

    resolve_collisions(state);
    if state.phase != GamePhase::Playing {
        // The run ended this frame; nothing left to accrue
        return;
    }

    state.game_speed += SPEED_RAMP_PER_MS * scaled;
    state.score += (SCORE_RATE_PER_MS * scaled * effects.point_multiplier) as u32;
}

/// Scan obstacle proximity and set the time scale read by the next tick
fn update_time_dilation(state: &mut GameState) {
    let player_pos = state.player.pos;
    let near = state
        .obstacles
        .iter()
        .any(|o| o.pos.distance(player_pos) < DILATION_RADIUS);
    state.time_scale = if near { DILATION_TIME_SCALE } else { 1.0 };
}

/// Run the pairwise player-vs-entity collision pass and apply outcomes
fn resolve_collisions(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_size = state.player.size;

    let hit_obstacles: Vec<usize> = state
        .obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| collision::circles_collide(player_pos, player_size, o.pos, o.size))
        .map(|(i, _)| i)
        .collect();

    for index in hit_obstacles.into_iter().rev() {
        let obstacle = state.obstacles.remove(index);
        let phase_charges = state.effects().phase_charges;
        match collision::classify_obstacle_hit(state.player.has_shield, phase_charges) {
            ObstacleHit::Shielded => {
                spawn::spawn_explosion(state, obstacle.pos, SHIELD_BURST_COLOR);
            }
            ObstacleHit::Phased => {
                if let Some(modifier) = state.active_modifier.as_mut() {
                    modifier.effects.phase_charges -= 1;
                }
                spawn::spawn_explosion(state, obstacle.pos, PHASE_BURST_COLOR);
            }
            ObstacleHit::LifeLost => {
                state.lives = state.lives.saturating_sub(1);
                spawn::spawn_explosion(state, obstacle.pos, Obstacle::COLOR);
                state.push_cue(AudioCue::Sfx(Sfx::Obstacle));
                if state.lives == 0 {
                    state.game_over();
                    return;
                }
            }
        }
    }

    let hit_power_ups: Vec<usize> = state
        .power_ups
        .iter()
        .enumerate()
        .filter(|(_, p)| collision::circles_collide(player_pos, player_size, p.pos, p.size))
        .map(|(i, _)| i)
        .collect();

    for index in hit_power_ups.into_iter().rev() {
        let power_up = state.power_ups.remove(index);
        apply_power_up(state, power_up.kind);
        spawn::spawn_explosion(state, power_up.pos, power_up.kind.color());
        state.push_cue(AudioCue::Sfx(Sfx::PowerUp));
        log::debug!("collected {:?}", power_up.kind);
    }
}

/// Apply a collected power-up's effect
fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Score => {
            let points = kind.points().unwrap_or(0) as f32;
            state.score += (points * state.effects().point_multiplier) as u32;
        }
        PowerUpKind::Speed => {
            state
                .player
                .activate_speed_boost(kind.duration_ms().unwrap_or(0.0));
        }
        PowerUpKind::Shield => {
            state.player.activate_shield(kind.duration_ms().unwrap_or(0.0));
        }
        PowerUpKind::Magnet => {
            state.player.activate_magnet(kind.duration_ms().unwrap_or(0.0));
        }
        PowerUpKind::ExtraLife => {
            state.lives += 1;
        }
        PowerUpKind::Slow => {
            state.slow_time_ms = kind.duration_ms().unwrap_or(0.0);
        }
        PowerUpKind::Nuke => {
            let positions: Vec<Vec2> = state.obstacles.drain(..).map(|o| o.pos).collect();
            for pos in positions {
                spawn::spawn_explosion(state, pos, Obstacle::COLOR);
            }
        }
    }
}
