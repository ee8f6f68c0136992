//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

/// Performance tier, detected from the display or chosen by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PerfTier {
    Low,
    #[default]
    Medium,
    High,
}

impl PerfTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerfTier::Low => "Low",
            PerfTier::Medium => "Medium",
            PerfTier::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(PerfTier::Low),
            "medium" | "med" => Some(PerfTier::Medium),
            "high" => Some(PerfTier::High),
            _ => None,
        }
    }

    /// Pick a tier from display size and pixel ratio
    pub fn detect(screen_width: f32, screen_height: f32, pixel_ratio: f32) -> Self {
        let area = screen_width * screen_height;
        if area < 500_000.0 || pixel_ratio < 1.5 {
            PerfTier::Low
        } else if area < 2_000_000.0 {
            PerfTier::Medium
        } else {
            PerfTier::High
        }
    }

    /// Per-tick obstacle spawn rate (per 16 ms frame)
    pub fn obstacle_rate(&self) -> f32 {
        match self {
            PerfTier::Low => 0.015,
            PerfTier::Medium | PerfTier::High => 0.02,
        }
    }

    /// Particle cap; the most recent particles are kept
    pub fn max_particles(&self) -> usize {
        match self {
            PerfTier::Low => 50,
            PerfTier::Medium | PerfTier::High => 200,
        }
    }

    /// Per-tick chance of emitting a player trail particle
    pub fn trail_chance(&self) -> f32 {
        match self {
            PerfTier::Low => 0.1,
            PerfTier::Medium | PerfTier::High => 0.3,
        }
    }

    /// Particles per explosion burst
    pub fn explosion_particles(&self) -> usize {
        match self {
            PerfTier::Low => 5,
            PerfTier::Medium | PerfTier::High => 10,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Performance tier
    pub tier: PerfTier,

    // === Audio ===
    pub audio_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Controls ===
    /// Use the virtual joystick instead of drag steering
    pub virtual_joystick: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tier: PerfTier::Medium,
            audio_enabled: true,
            master_volume: 0.3,
            music_volume: 0.4,
            sfx_volume: 0.6,
            virtual_joystick: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_dash_settings";

    /// Flip the audio toggle, returning the new value
    pub fn toggle_audio(&mut self) -> bool {
        self.audio_enabled = !self.audio_enabled;
        self.audio_enabled
    }

    /// Flip the control scheme, returning whether the joystick is now on
    pub fn toggle_joystick(&mut self) -> bool {
        self.virtual_joystick = !self.virtual_joystick;
        self.virtual_joystick
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
