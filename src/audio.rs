//! Sound effect requests
//!
//! The core never touches audio devices. It asks an [`AudioSink`] to play
//! effects; the host decides how.

use crate::sim::{DeathCause, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jumper bounced off a platform
    Jump,
    /// Breakable platform gave way
    PlatformBreak,
    /// Ball fired
    Shoot,
    /// Ball hit a monster
    MonsterHit,
    /// Jumper touched a monster
    MonsterBite,
    /// Jumper fell off the screen
    Fall,
    /// A button was pressed
    Click,
}

impl SoundEffect {
    /// Effect for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Jumped => SoundEffect::Jump,
            GameEvent::PlatformBroke { .. } => SoundEffect::PlatformBreak,
            GameEvent::BallFired { .. } => SoundEffect::Shoot,
            GameEvent::MonsterKilled { .. } => SoundEffect::MonsterHit,
            GameEvent::Died(DeathCause::Monster) => SoundEffect::MonsterBite,
            GameEvent::Died(DeathCause::Fell) => SoundEffect::Fall,
        }
    }
}

/// Fire-and-forget audio collaborator
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Audio manager for the game
///
/// Applies the mute switch before forwarding to the host's sink.
pub struct AudioManager<S: AudioSink> {
    sink: S,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, muted: false }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.sink.play(effect);
    }

    pub fn play_events(&mut self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Logs requests at debug level (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {:?}", effect);
    }
}

/// Keeps every request, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}
