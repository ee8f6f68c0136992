//! Neon Dash - a single-screen endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `audio`: Cue vocabulary and music sequencing (synthesis is external)
//! - `input`: Keyboard/analog merging into a per-tick intent vector
//! - `settings`: Performance tier and preferences
//! - `highscores`: Best-score persistence
//! - `game`: Controller wiring the sim to its collaborators

pub mod audio;
pub mod game;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::{PerfTier, Settings};

/// Game configuration constants
pub mod consts {
    /// Speeds are expressed in units per 16 ms frame
    pub const FRAME_UNIT_MS: f32 = 16.0;
    /// Maximum frame delta (tab-stall protection, ~30 fps floor)
    pub const MAX_FRAME_DELTA_MS: f32 = 32.0;

    /// Arena defaults (collaborator may resize)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;
    /// Entities are culled once fully past the left edge
    pub const DESPAWN_X: f32 = -100.0;

    /// Player defaults
    pub const PLAYER_BASE_SIZE: f32 = 20.0;
    pub const PLAYER_BASE_SPEED: f32 = 5.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    /// Speed power-up multiplier while the boost timer runs
    pub const SPEED_BOOST_MULT: f32 = 1.5;

    /// Run defaults
    pub const START_LIVES: u32 = 1;
    pub const START_GAME_SPEED: f32 = 2.0;
    /// Difficulty ramp per ms of scaled delta (unbounded)
    pub const SPEED_RAMP_PER_MS: f32 = 0.0005;
    /// Passive score per ms of scaled delta, before the point multiplier
    pub const SCORE_RATE_PER_MS: f32 = 0.1;

    /// Obstacle defaults
    pub const OBSTACLE_MIN_SIZE: f32 = 30.0;
    pub const OBSTACLE_SIZE_SPREAD: f32 = 40.0;
    pub const OBSTACLE_ROT_PER_MS: f32 = 0.02;

    /// Power-up defaults
    pub const POWER_UP_SIZE: f32 = 15.0;
    pub const POWER_UP_RATE: f32 = 0.005;
    pub const POWER_UP_PULSE_PER_MS: f32 = 0.005;
    /// Spawn-height margin keeping power-ups fully on screen
    pub const POWER_UP_SPAWN_MARGIN: f32 = 40.0;

    /// Magnet attraction
    pub const MAGNET_BASE_RADIUS: f32 = 150.0;
    pub const MAGNET_PULL_STEP: f32 = 2.0;

    /// Time dilation (Time Dilator modifier)
    pub const DILATION_RADIUS: f32 = 150.0;
    pub const DILATION_TIME_SCALE: f32 = 0.3;

    /// Slow power-up halves obstacle/power-up speed while active
    pub const SLOW_SPEED_FACTOR: f32 = 0.5;

    /// Delay between committing a modifier and entering play
    pub const SELECT_FEEDBACK_MS: f32 = 200.0;

    /// Particle tuning
    pub const TRAIL_LIFE_MS: f32 = 500.0;
    pub const EXPLOSION_LIFE_MS: f32 = 1000.0;
    pub const PARTICLE_FRICTION: f32 = 0.99;
}

/// Initialize logging on the web target (call once from the bootstrap)
#[cfg(target_arch = "wasm32")]
pub fn init_wasm_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Module load hook for the browser; the JS bootstrap constructs and drives
/// the game afterwards
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    init_wasm_logging();
    log::info!("Neon Dash core loaded");
}
