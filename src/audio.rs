//! Audio cue routing
//!
//! The simulation never plays sound itself. `AudioManager` turns game events
//! into sound effects and music changes, applies volume settings, and hands
//! the result to whatever `AudioBackend` the host provides.

use crate::settings::Settings;
use crate::sim::{AttackKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Collectible picked up
    CollectCoin,
    /// Player ran into an obstacle
    ObstacleHit,
    /// Player caught in a lethal lane
    KilledByEnemy,
    /// Warned lanes turned lethal
    RedLanes,
    /// Light attack released
    PlayerAttack,
    /// Charged attack released
    Flashbang,
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Runner,
    Chase,
}

/// Host-provided sound output
pub trait AudioBackend {
    /// Fire-and-forget one-shot
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    /// Start `track` from the beginning, replacing any current track
    fn play_music(&mut self, track: MusicTrack, volume: f32);
    fn stop_music(&mut self);
}

/// Backend that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {effect:?} @ {volume:.2}");
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) {
        log::debug!("music {track:?} @ {volume:.2}");
    }

    fn stop_music(&mut self) {
        log::debug!("music stopped");
    }
}

/// Sound for a game event, if it has one
pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Collected { .. } => Some(SoundEffect::CollectCoin),
        GameEvent::ObstacleHit { .. } => Some(SoundEffect::ObstacleHit),
        GameEvent::LaneDangerHit { .. } => Some(SoundEffect::KilledByEnemy),
        GameEvent::LaneDanger { .. } => Some(SoundEffect::RedLanes),
        GameEvent::AttackFired {
            kind: AttackKind::Light,
            ..
        } => Some(SoundEffect::PlayerAttack),
        GameEvent::AttackFired {
            kind: AttackKind::Charged,
            ..
        } => Some(SoundEffect::Flashbang),
        _ => None,
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    current_music: Option<MusicTrack>,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            current_music: None,
        }
    }

    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
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

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(self.sfx_volume);
        if vol <= 0.0 {
            return;
        }
        self.backend.play_effect(effect, vol);
    }

    /// Switch background music, restarting it from the top
    pub fn play_music(&mut self, track: MusicTrack) {
        let vol = self.effective_volume(self.music_volume);
        self.backend.play_music(track, vol);
        self.current_music = Some(track);
    }

    pub fn stop_music(&mut self) {
        if self.current_music.take().is_some() {
            self.backend.stop_music();
        }
    }

    pub fn current_music(&self) -> Option<MusicTrack> {
        self.current_music
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = effect_for(event) {
            self.play(effect);
        }
        match event {
            GameEvent::ChaseStarted => self.play_music(MusicTrack::Chase),
            GameEvent::Reset => self.play_music(MusicTrack::Runner),
            GameEvent::GameOver { .. } => self.stop_music(),
            _ => {}
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
