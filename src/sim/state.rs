//! Game state and core simulation types
//!
//! Entities are plain data with their own per-tick behavior; `GameState`
//! owns the collections and the phase machine's bookkeeping.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::modifier::{self, ActiveModifier, Modifier, ResolvedEffects};
use crate::audio::{AudioCue, Sfx, Theme};
use crate::consts::*;
use crate::settings::PerfTier;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start action
    Start,
    /// Picking one of three offered modifiers
    ModifierSelect,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// Events emitted by the simulation for the collaborators to drain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Audio cue (theme change or one-shot sfx)
    Cue(AudioCue),
    /// Score beat the previous best and should be persisted
    NewHighScore(u32),
}

/// The player avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    /// Base movement speed (units per 16 ms frame)
    pub speed: f32,
    pub shield_ms: f32,
    pub magnet_ms: f32,
    pub speed_boost_ms: f32,
    pub has_shield: bool,
    pub has_magnet: bool,
    pub has_speed_boost: bool,
}

impl Player {
    pub const COLOR: &'static str = "#00BFFF";

    /// Construct a fresh player from the resolved modifier overlay
    pub fn new(pos: Vec2, effects: &ResolvedEffects) -> Self {
        Self {
            pos,
            size: PLAYER_BASE_SIZE * effects.size_mult,
            speed: PLAYER_BASE_SPEED * effects.speed_mult,
            shield_ms: 0.0,
            magnet_ms: 0.0,
            speed_boost_ms: 0.0,
            has_shield: false,
            has_magnet: false,
            has_speed_boost: false,
        }
    }

    /// Move along the merged intent vector, clamp to the arena, decay boosts.
    ///
    /// The speed-boost flag is read before the timers decay, so a boost that
    /// expires this tick still applies to this tick's movement.
    pub fn update(&mut self, dt: f32, intent: Vec2, arena: Vec2) {
        let move_speed = if self.has_speed_boost {
            self.speed * SPEED_BOOST_MULT
        } else {
            self.speed
        };
        self.pos += intent * move_speed * (dt / FRAME_UNIT_MS);

        self.pos.x = self.pos.x.clamp(self.size, arena.x - self.size);
        self.pos.y = self.pos.y.clamp(self.size, arena.y - self.size);

        self.shield_ms = (self.shield_ms - dt).max(0.0);
        self.magnet_ms = (self.magnet_ms - dt).max(0.0);
        self.speed_boost_ms = (self.speed_boost_ms - dt).max(0.0);

        self.has_shield = self.shield_ms > 0.0;
        self.has_magnet = self.magnet_ms > 0.0;
        self.has_speed_boost = self.speed_boost_ms > 0.0;
    }

    pub fn activate_shield(&mut self, duration_ms: f32) {
        self.shield_ms = duration_ms;
        self.has_shield = true;
    }

    pub fn activate_magnet(&mut self, duration_ms: f32) {
        self.magnet_ms = duration_ms;
        self.has_magnet = true;
    }

    pub fn activate_speed_boost(&mut self, duration_ms: f32) {
        self.speed_boost_ms = duration_ms;
        self.has_speed_boost = true;
    }
}

/// A spinning obstacle drifting right to left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: f32,
    /// Visual spin, monotonically increasing
    pub rotation: f32,
}

impl Obstacle {
    pub const COLOR: &'static str = "#FF4500";

    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32) {
        self.pos.x -= speed * (dt / FRAME_UNIT_MS);
        self.rotation += OBSTACLE_ROT_PER_MS * dt;
    }
}

/// The fixed power-up catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Score,
    Speed,
    Shield,
    Magnet,
    ExtraLife,
    Slow,
    Nuke,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 7] = [
        PowerUpKind::Score,
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::Magnet,
        PowerUpKind::ExtraLife,
        PowerUpKind::Slow,
        PowerUpKind::Nuke,
    ];

    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::Score => "#FFD700",
            PowerUpKind::Speed => "#00FF00",
            PowerUpKind::Shield => "#00FFFF",
            PowerUpKind::Magnet => "#FF69B4",
            PowerUpKind::ExtraLife => "#FFA500",
            PowerUpKind::Slow => "#8A2BE2",
            PowerUpKind::Nuke => "#FF4500",
        }
    }

    /// Immediate point value, for kinds that grant one
    pub fn points(&self) -> Option<u32> {
        match self {
            PowerUpKind::Score => Some(100),
            _ => None,
        }
    }

    /// Timed-effect duration, for kinds that grant one
    pub fn duration_ms(&self) -> Option<f32> {
        match self {
            PowerUpKind::Speed => Some(3000.0),
            PowerUpKind::Shield => Some(5000.0),
            PowerUpKind::Magnet => Some(4000.0),
            PowerUpKind::Slow => Some(4000.0),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PowerUpKind::Score => "Score boost",
            PowerUpKind::Speed => "Speed boost",
            PowerUpKind::Shield => "Temporary invincibility",
            PowerUpKind::Magnet => "Attract power-ups",
            PowerUpKind::ExtraLife => "Gain an extra life",
            PowerUpKind::Slow => "Slow down obstacles",
            PowerUpKind::Nuke => "Destroy all obstacles",
        }
    }
}

/// A collectible drifting right to left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
    /// Phase of the visual pulse, monotonically increasing
    pub pulse: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            size: POWER_UP_SIZE,
            kind,
            pulse: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32) {
        self.pos.x -= speed * (dt / FRAME_UNIT_MS);
        self.pulse += POWER_UP_PULSE_PER_MS * dt;
    }
}

/// A short-lived visual particle (trail or explosion debris)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: &'static str,
    pub life_ms: f32,
    pub max_life_ms: f32,
    pub size: f32,
}

impl Particle {
    /// Trail particle: gentle scatter, short life
    pub fn trail(pos: Vec2, color: &'static str, rng: &mut Pcg32) -> Self {
        Self::scattered(pos, color, TRAIL_LIFE_MS, 2.0, rng)
    }

    /// Explosion debris: wider scatter, longer life
    pub fn burst(pos: Vec2, color: &'static str, rng: &mut Pcg32) -> Self {
        Self::scattered(pos, color, EXPLOSION_LIFE_MS, 4.0, rng)
    }

    fn scattered(pos: Vec2, color: &'static str, life_ms: f32, spread: f32, rng: &mut Pcg32) -> Self {
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
        );
        Self {
            pos,
            vel,
            color,
            life_ms,
            max_life_ms: life_ms,
            size: rng.random::<f32>() * 3.0 + 1.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * (dt / FRAME_UNIT_MS);
        self.life_ms -= dt;
        // Friction is per tick, not per ms
        self.vel *= PARTICLE_FRICTION;
    }

    /// Render opacity, fading with remaining life
    pub fn alpha(&self) -> f32 {
        (self.life_ms / self.max_life_ms).clamp(0.0, 1.0)
    }
}

/// Complete game state, owned by one controller and mutated only in `tick`
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    /// Base scroll speed; ramps up while playing (units per 16 ms frame)
    pub game_speed: f32,
    /// Scroll speed after the slow-time factor, derived each tick
    pub current_speed: f32,
    /// Time-scale applied to the frame delta, set by time dilation
    pub time_scale: f32,
    /// Remaining slow-time countdown
    pub slow_time_ms: f32,
    /// Play-area extent
    pub arena: Vec2,
    pub tier: PerfTier,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// The three modifiers offered this ModifierSelect entry
    pub offered: Vec<&'static Modifier>,
    pub active_modifier: Option<ActiveModifier>,
    pending_modifier: Option<ActiveModifier>,
    select_countdown_ms: f32,
    events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    pub frame_count: u64,
}

impl GameState {
    /// Create a fresh state on the title screen
    pub fn new(seed: u64) -> Self {
        let effects = ResolvedEffects::default();
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            high_score: 0,
            lives: START_LIVES,
            game_speed: START_GAME_SPEED,
            current_speed: START_GAME_SPEED,
            time_scale: 1.0,
            slow_time_ms: 0.0,
            arena,
            tier: PerfTier::default(),
            player: Player::new(Vec2::new(PLAYER_SPAWN_X, arena.y / 2.0), &effects),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            offered: Vec::new(),
            active_modifier: None,
            pending_modifier: None,
            select_countdown_ms: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            frame_count: 0,
        }
    }

    /// Resize the play area (window/orientation change)
    pub fn set_arena(&mut self, width: f32, height: f32) {
        self.arena = Vec2::new(width, height);
    }

    /// Resolved effects of the active modifier, neutral when none is active
    pub fn effects(&self) -> ResolvedEffects {
        self.active_modifier
            .as_ref()
            .map(|m| m.effects)
            .unwrap_or_default()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn push_cue(&mut self, cue: AudioCue) {
        self.events.push(GameEvent::Cue(cue));
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start → ModifierSelect: draw three options from the catalog
    pub fn enter_modifier_select(&mut self) {
        self.offered = modifier::draw_choices(&mut self.rng);
        self.pending_modifier = None;
        self.select_countdown_ms = 0.0;
        self.phase = GamePhase::ModifierSelect;
        self.push_cue(AudioCue::Sfx(Sfx::Select));
        log::info!(
            "offering modifiers: {:?}",
            self.offered.iter().map(|m| m.name).collect::<Vec<_>>()
        );
    }

    /// Commit a selection (0-2). Returns false for an out-of-range index,
    /// leaving state untouched.
    pub fn choose_modifier(&mut self, index: usize) -> bool {
        let Some(modifier) = self.offered.get(index) else {
            log::warn!("modifier selection index {index} out of range");
            return false;
        };
        self.pending_modifier = Some(modifier.activate());
        self.select_countdown_ms = SELECT_FEEDBACK_MS;
        self.push_cue(AudioCue::Sfx(Sfx::Select));
        true
    }

    /// Whether a committed selection is waiting out its feedback delay
    pub fn selection_pending(&self) -> bool {
        self.pending_modifier.is_some()
    }

    /// Decay the selection-feedback countdown; begin the run at zero
    pub(crate) fn tick_selection(&mut self, dt: f32) {
        if self.pending_modifier.is_none() {
            return;
        }
        self.select_countdown_ms -= dt;
        if self.select_countdown_ms <= 0.0 {
            self.begin_run();
        }
    }

    /// ModifierSelect → Playing: reset the run and build the player
    pub(crate) fn begin_run(&mut self) {
        let Some(active) = self.pending_modifier.take() else {
            return;
        };
        let effects = active.effects;

        self.score = 0;
        self.lives = START_LIVES + effects.extra_lives;
        self.game_speed = START_GAME_SPEED;
        self.current_speed = START_GAME_SPEED;
        self.time_scale = 1.0;
        self.slow_time_ms = 0.0;
        self.obstacles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.player = Player::new(Vec2::new(PLAYER_SPAWN_X, self.arena.y / 2.0), &effects);
        self.active_modifier = Some(active);
        self.offered.clear();
        self.phase = GamePhase::Playing;

        self.push_cue(AudioCue::Theme(Theme::Game));
        self.push_cue(AudioCue::Sfx(Sfx::Start));
        log::info!(
            "run started: modifier={} lives={}",
            self.active_modifier.as_ref().map(|m| m.name).unwrap_or("-"),
            self.lives
        );
    }

    /// Playing → GameOver: record the best and stop the run
    pub(crate) fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.push_cue(AudioCue::Theme(Theme::GameOver));
        if self.score > self.high_score {
            self.high_score = self.score;
            self.push_event(GameEvent::NewHighScore(self.score));
        }
        log::info!("game over: score={} best={}", self.score, self.high_score);
    }

    /// GameOver → Start: clear the discarded run synchronously so nothing
    /// stale survives into the next one
    pub(crate) fn reset_to_start(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.game_speed = START_GAME_SPEED;
        self.current_speed = START_GAME_SPEED;
        self.time_scale = 1.0;
        self.slow_time_ms = 0.0;
        self.obstacles.clear();
        self.power_ups.clear();
        self.particles.clear();
        self.offered.clear();
        self.active_modifier = None;
        self.pending_modifier = None;
        self.select_countdown_ms = 0.0;
        self.phase = GamePhase::Start;
        self.push_cue(AudioCue::Theme(Theme::Ambient));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn player_boost_timers_decay_and_clear_flags() {
        let mut player = Player::new(Vec2::new(100.0, 100.0), &ResolvedEffects::default());
        player.activate_shield(30.0);
        player.activate_magnet(10.0);
        assert!(player.has_shield && player.has_magnet);

        player.update(16.0, Vec2::ZERO, Vec2::new(1280.0, 720.0));
        assert!(player.has_shield);
        assert!(!player.has_magnet, "10 ms magnet expires within one frame");

        player.update(16.0, Vec2::ZERO, Vec2::new(1280.0, 720.0));
        assert!(!player.has_shield);
        assert_eq!(player.shield_ms, 0.0);
    }

    #[test]
    fn player_clamped_to_arena() {
        let arena = Vec2::new(800.0, 600.0);
        let mut player = Player::new(Vec2::new(30.0, 300.0), &ResolvedEffects::default());
        for _ in 0..200 {
            player.update(16.0, Vec2::new(-1.0, 0.0), arena);
        }
        assert_eq!(player.pos.x, player.size);
    }

    #[test]
    fn speed_boost_applies_before_timer_decay() {
        let arena = Vec2::new(1280.0, 720.0);
        let mut player = Player::new(Vec2::new(100.0, 100.0), &ResolvedEffects::default());
        player.activate_speed_boost(16.0);
        let x0 = player.pos.x;
        player.update(16.0, Vec2::new(1.0, 0.0), arena);
        // Boost expires this tick but still covers this tick's movement
        assert!((player.pos.x - x0 - player.speed * SPEED_BOOST_MULT).abs() < 1e-4);
        assert!(!player.has_speed_boost);
    }

    #[test]
    fn obstacle_moves_left_and_spins() {
        let mut ob = Obstacle::new(Vec2::new(500.0, 100.0), 40.0);
        ob.update(16.0, 2.0);
        assert_eq!(ob.pos.x, 498.0);
        assert!(ob.rotation > 0.0);
    }

    #[test]
    fn particle_decays_and_fades() {
        let mut rng = rng();
        let mut p = Particle::trail(Vec2::ZERO, Player::COLOR, &mut rng);
        assert_eq!(p.alpha(), 1.0);
        for _ in 0..20 {
            p.update(16.0);
        }
        assert!(p.life_ms > 0.0 && p.alpha() < 1.0);
        for _ in 0..20 {
            p.update(16.0);
        }
        assert!(p.life_ms <= 0.0);
    }

    #[test]
    fn power_up_catalog_is_consistent() {
        for kind in PowerUpKind::ALL {
            // Exactly one of points/duration for timed and scored kinds
            match kind {
                PowerUpKind::Score => {
                    assert_eq!(kind.points(), Some(100));
                    assert_eq!(kind.duration_ms(), None);
                }
                PowerUpKind::Speed | PowerUpKind::Shield | PowerUpKind::Magnet
                | PowerUpKind::Slow => {
                    assert!(kind.duration_ms().is_some());
                    assert_eq!(kind.points(), None);
                }
                PowerUpKind::ExtraLife | PowerUpKind::Nuke => {
                    assert_eq!(kind.points(), None);
                    assert_eq!(kind.duration_ms(), None);
                }
            }
            assert!(kind.color().starts_with('#'));
        }
    }

    #[test]
    fn reset_to_start_clears_everything() {
        let mut state = GameState::new(1);
        state.enter_modifier_select();
        state.choose_modifier(0);
        state.begin_run();
        state.obstacles.push(Obstacle::new(Vec2::new(500.0, 100.0), 40.0));
        state.score = 1234;
        state.game_over();
        state.reset_to_start();

        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.active_modifier.is_none());
        assert!(!state.selection_pending());
        // High score survives the reset
        assert_eq!(state.high_score, 1234);
    }
}
