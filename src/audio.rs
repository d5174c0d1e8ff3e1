//! Outcome sounds
//!
//! The simulation only names the sound; the host decides how to play it.

use serde::{Deserialize, Serialize};

use crate::settings::GameSettings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Countdown survived
    Win,
    /// Fell in the water or missed the safe mushroom
    Lose,
}

impl SoundEffect {
    /// Clip identifier for asset lookup
    pub fn clip_id(&self) -> &'static str {
        match self {
            SoundEffect::Win => "win_fanfare",
            SoundEffect::Lose => "lose_splash",
        }
    }
}

/// Anything that can fire a one-shot clip
pub trait AudioSink {
    fn play_one_shot(&mut self, effect: SoundEffect);
}

/// Volume-aware sink for hosts without an audio backend; logs each clip
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: Vec<SoundEffect>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: Vec::new(),
        }
    }

    /// Manager using the volume and mute settings
    pub fn from_settings(settings: &GameSettings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Clips played so far (audible or not)
    pub fn played(&self) -> &[SoundEffect] {
        &self.played
    }
}

impl AudioSink for AudioManager {
    fn play_one_shot(&mut self, effect: SoundEffect) {
        self.played.push(effect);

        let vol = self.effective_volume();
        if vol <= 0.0 {
            log::debug!("Muted: {}", effect.clip_id());
            return;
        }
        log::info!("Playing {} at volume {:.2}", effect.clip_id(), vol);
    }
}
