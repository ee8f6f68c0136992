//! Controller wiring the simulation to its collaborators
//!
//! One `Game` value owns the explicit state; there are no ambient globals.
//! Audio and persistence are fire-and-forget: an inert sink or a missing
//! storage handle never affects game logic.

use crate::audio::{AudioCue, AudioSink, Theme, ThemeSequencer};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, RenderSnapshot, TickInput, tick};

pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    pub high_scores: HighScores,
    sequencer: ThemeSequencer,
}

impl Game {
    /// Build a game from persisted settings and high scores
    pub fn new(seed: u64) -> Self {
        Self::with_parts(seed, Settings::load(), HighScores::load())
    }

    pub fn with_parts(seed: u64, settings: Settings, high_scores: HighScores) -> Self {
        let mut state = GameState::new(seed);
        state.tier = settings.tier;
        state.high_score = high_scores.best;

        let mut sequencer = ThemeSequencer::new();
        sequencer.set_theme(Theme::Ambient);

        log::info!("game created: seed={seed} tier={}", settings.tier.as_str());
        Self {
            state,
            settings,
            high_scores,
            sequencer,
        }
    }

    /// Run one frame: tick the simulation, then drain its events into the
    /// collaborators
    pub fn frame(&mut self, input: &TickInput, dt_ms: f32, audio: &mut dyn AudioSink) {
        let dt = dt_ms.min(MAX_FRAME_DELTA_MS);
        tick(&mut self.state, input, dt);

        for event in self.state.drain_events() {
            match event {
                GameEvent::Cue(cue) => {
                    if let AudioCue::Theme(theme) = cue {
                        self.sequencer.set_theme(theme);
                    }
                    if self.settings.audio_enabled {
                        audio.cue(cue);
                    }
                }
                GameEvent::NewHighScore(score) => {
                    self.high_scores.record(score);
                    self.high_scores.save();
                }
            }
        }

        if self.settings.audio_enabled {
            for note in self.sequencer.advance(dt) {
                audio.note(note);
            }
        }
    }

    /// Render-ready view of the current frame
    pub fn snapshot(&self) -> RenderSnapshot {
        self.state.snapshot()
    }

    /// Propagate a window/orientation resize to the play area
    pub fn set_arena(&mut self, width: f32, height: f32) {
        self.state.set_arena(width, height);
    }

    /// Toggle audio, persisting the preference
    pub fn toggle_audio(&mut self) -> bool {
        let enabled = self.settings.toggle_audio();
        self.settings.save();
        enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{NoteCue, Sfx};
    use crate::sim::GamePhase;
    use glam::Vec2;

    /// Records everything it is sent
    #[derive(Default)]
    struct RecordingSink {
        cues: Vec<AudioCue>,
        notes: Vec<NoteCue>,
    }

    impl AudioSink for RecordingSink {
        fn cue(&mut self, cue: AudioCue) {
            self.cues.push(cue);
        }
        fn note(&mut self, note: NoteCue) {
            self.notes.push(note);
        }
    }

    fn test_game(seed: u64) -> Game {
        Game::with_parts(seed, Settings::default(), HighScores::new())
    }

    fn start_input() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    #[test]
    fn cues_reach_the_sink() {
        let mut game = test_game(1);
        let mut sink = RecordingSink::default();

        game.frame(&start_input(), 16.0, &mut sink);
        assert!(sink.cues.contains(&AudioCue::Sfx(Sfx::Select)));
        // Ambient music plays from the first frame
        assert!(!sink.notes.is_empty());
    }

    #[test]
    fn muted_audio_silences_the_sink_but_not_the_game() {
        let mut game = test_game(2);
        game.settings.audio_enabled = false;
        let mut sink = RecordingSink::default();

        game.frame(&start_input(), 16.0, &mut sink);
        assert!(sink.cues.is_empty());
        assert!(sink.notes.is_empty());
        assert_eq!(game.state.phase, GamePhase::ModifierSelect);
    }

    #[test]
    fn theme_cue_switches_the_sequencer() {
        let mut game = test_game(3);
        let mut sink = RecordingSink::default();

        game.frame(&start_input(), 16.0, &mut sink);
        let select = TickInput {
            select: Some(0),
            ..Default::default()
        };
        game.frame(&select, 16.0, &mut sink);
        for _ in 0..13 {
            game.frame(&TickInput::default(), 16.0, &mut sink);
        }
        assert_eq!(game.state.phase, GamePhase::Playing);
        assert!(sink.cues.contains(&AudioCue::Theme(Theme::Game)));
    }

    #[test]
    fn game_over_persists_a_new_best() {
        let mut game = test_game(4);
        let mut sink = RecordingSink::default();

        game.frame(&start_input(), 16.0, &mut sink);
        let select = TickInput {
            select: Some(0),
            ..Default::default()
        };
        game.frame(&select, 16.0, &mut sink);
        for _ in 0..13 {
            game.frame(&TickInput::default(), 16.0, &mut sink);
        }

        game.state.score = 777;
        // Keep hitting until the run ends, whatever protections the randomly
        // drawn modifier granted
        for _ in 0..5 {
            let player_pos = game.state.player.pos;
            game.state
                .obstacles
                .push(crate::sim::Obstacle::new(player_pos, 60.0));
            game.frame(&TickInput::default(), 0.0, &mut sink);
            if game.state.phase == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(game.state.phase, GamePhase::GameOver);
        assert_eq!(game.high_scores.best, 777);
        assert!(sink.cues.contains(&AudioCue::Theme(Theme::GameOver)));
    }

    #[test]
    fn frame_clamps_the_delta() {
        let mut game = test_game(5);
        let mut sink = RecordingSink::default();
        game.frame(&start_input(), 16.0, &mut sink);
        let select = TickInput {
            select: Some(0),
            ..Default::default()
        };
        game.frame(&select, 16.0, &mut sink);
        for _ in 0..13 {
            game.frame(&TickInput::default(), 16.0, &mut sink);
        }

        let x0 = game.state.player.pos.x;
        let speed = game.state.player.speed;
        let boosted = game.state.player.has_speed_boost;
        let input = TickInput {
            move_dir: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        game.frame(&input, 10_000.0, &mut sink);
        let max_step = speed
            * (if boosted { crate::consts::SPEED_BOOST_MULT } else { 1.0 })
            * crate::consts::MAX_FRAME_DELTA_MS
            / crate::consts::FRAME_UNIT_MS;
        assert!(game.state.player.pos.x - x0 <= max_step + 1e-3);
    }
}
