//! Audio cue vocabulary and music sequencing
//!
//! The core emits discrete named cues at transition and event points; a
//! collaborator synthesizes them. Music is driven by `ThemeSequencer`: each
//! theme compiles to an explicit schedule of (offset, note) steps under the
//! single frame clock, replaced atomically when the theme changes so no
//! stale note from the previous theme can fire.

/// Music themes, one active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Title and modifier-select screens
    Ambient,
    /// Active gameplay
    Game,
    /// Run ended
    GameOver,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    PowerUp,
    Obstacle,
    Select,
    Start,
}

/// A discrete cue emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Theme(Theme),
    Sfx(Sfx),
}

/// Sequencer voices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    /// Sustained chord tones
    Pad,
    Bass,
    Melody,
    Arpeggio,
}

/// A scheduled note for the synthesizing collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteCue {
    pub voice: Voice,
    pub freq_hz: f32,
    pub duration_ms: f32,
}

/// Receives cues and notes; failures must not affect game logic
pub trait AudioSink {
    fn cue(&mut self, cue: AudioCue);

    /// Music notes from the sequencer; sinks without a music layer can
    /// ignore them
    fn note(&mut self, note: NoteCue) {
        let _ = note;
    }
}

/// Sink that drops everything (headless runs, muted audio)
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn cue(&mut self, _cue: AudioCue) {}
}

/// One entry in a compiled theme schedule
#[derive(Debug, Clone, Copy)]
struct Step {
    at_ms: f32,
    voice: Voice,
    freq_hz: f32,
    duration_ms: f32,
}

/// Compiles themes to note schedules and drains them against the frame clock
#[derive(Debug, Default)]
pub struct ThemeSequencer {
    theme: Option<Theme>,
    steps: Vec<Step>,
    /// Loop length; None means one-shot
    loop_ms: Option<f32>,
    cursor: usize,
    clock_ms: f32,
}

impl ThemeSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Replace the schedule with the given theme's. The previous schedule is
    /// dropped as a unit; none of its remaining steps will fire.
    pub fn set_theme(&mut self, theme: Theme) {
        let (mut steps, loop_ms) = compile_theme(theme);
        steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        self.theme = Some(theme);
        self.steps = steps;
        self.loop_ms = loop_ms;
        self.cursor = 0;
        self.clock_ms = 0.0;
    }

    /// Silence the sequencer entirely
    pub fn stop(&mut self) {
        self.theme = None;
        self.steps.clear();
        self.loop_ms = None;
        self.cursor = 0;
        self.clock_ms = 0.0;
    }

    /// Advance the clock, returning every note whose offset has elapsed
    pub fn advance(&mut self, dt_ms: f32) -> Vec<NoteCue> {
        let mut due = Vec::new();
        if self.steps.is_empty() {
            return due;
        }
        self.clock_ms += dt_ms;
        loop {
            while let Some(step) = self.steps.get(self.cursor) {
                if step.at_ms > self.clock_ms {
                    break;
                }
                due.push(NoteCue {
                    voice: step.voice,
                    freq_hz: step.freq_hz,
                    duration_ms: step.duration_ms,
                });
                self.cursor += 1;
            }
            match self.loop_ms {
                Some(len) if self.clock_ms >= len => {
                    self.clock_ms -= len;
                    self.cursor = 0;
                }
                _ => break,
            }
        }
        due
    }
}

/// Note offsets within one game-theme loop
const GAME_LOOP_MS: f32 = 2000.0;
const BASS_INTERVAL_MS: f32 = 500.0;
const MELODY_INTERVAL_MS: f32 = 250.0;
const ARPEGGIO_INTERVAL_MS: f32 = 125.0;

// C2, F2, G2, D2
const BASS_FREQS: [f32; 4] = [65.41, 87.31, 98.00, 73.42];
// C4 to C5
const MELODY_FREQS: [f32; 8] = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88, 523.25];
// Cm chord
const ARPEGGIO_FREQS: [f32; 4] = [130.81, 164.81, 196.00, 246.94];
// C3, E3, G3
const AMBIENT_FREQS: [f32; 3] = [130.81, 164.81, 196.00];
// G2, A2, B2
const GAME_OVER_FREQS: [f32; 3] = [98.00, 110.00, 123.47];

fn compile_theme(theme: Theme) -> (Vec<Step>, Option<f32>) {
    match theme {
        Theme::Ambient => {
            let loop_ms = 4000.0;
            let steps = AMBIENT_FREQS
                .iter()
                .map(|&freq_hz| Step {
                    at_ms: 0.0,
                    voice: Voice::Pad,
                    freq_hz,
                    duration_ms: loop_ms,
                })
                .collect();
            (steps, Some(loop_ms))
        }
        Theme::Game => {
            let mut steps = Vec::new();
            for (i, &freq_hz) in BASS_FREQS.iter().enumerate() {
                steps.push(Step {
                    at_ms: i as f32 * BASS_INTERVAL_MS,
                    voice: Voice::Bass,
                    freq_hz,
                    duration_ms: 800.0,
                });
            }
            for (i, &freq_hz) in MELODY_FREQS.iter().enumerate() {
                steps.push(Step {
                    at_ms: i as f32 * MELODY_INTERVAL_MS,
                    voice: Voice::Melody,
                    freq_hz,
                    duration_ms: 300.0,
                });
            }
            // Arpeggio enters halfway through the first bass note
            let arpeggio_start = 500.0;
            let arpeggio_count =
                ((GAME_LOOP_MS - arpeggio_start) / ARPEGGIO_INTERVAL_MS) as usize;
            for i in 0..arpeggio_count {
                steps.push(Step {
                    at_ms: arpeggio_start + i as f32 * ARPEGGIO_INTERVAL_MS,
                    voice: Voice::Arpeggio,
                    freq_hz: ARPEGGIO_FREQS[i % ARPEGGIO_FREQS.len()],
                    duration_ms: 200.0,
                });
            }
            (steps, Some(GAME_LOOP_MS))
        }
        Theme::GameOver => {
            let steps = GAME_OVER_FREQS
                .iter()
                .map(|&freq_hz| Step {
                    at_ms: 0.0,
                    voice: Voice::Pad,
                    freq_hz,
                    duration_ms: 6000.0,
                })
                .collect();
            (steps, None)
        }
    }
}
