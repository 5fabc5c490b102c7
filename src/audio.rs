//! Audio: game events to short note sequences
//!
//! Everything is fire-and-forget. The game hands notes to an `AudioSink` and
//! never waits; whatever plays them (a MIDI synth thread, a test recorder)
//! lives outside the core.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::platform::AudioSink;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player shot
    PlayerFire,
    /// Invader shot
    EnemyFire,
    /// Invader destroyed
    InvaderExplode,
    /// Player ship hit
    PlayerHit,
    /// Formation marched one step (index into the four-note bass line)
    March(u32),
    /// Player out of health
    GameOver,
}

/// Descending bass line of the marching formation (G2, F2, Eb2, D2)
const MARCH_NOTES: [i32; 4] = [43, 41, 39, 38];

impl SoundEffect {
    /// Which effect, if any, an event should trigger
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerFired => Some(SoundEffect::PlayerFire),
            GameEvent::EnemyFired { .. } => Some(SoundEffect::EnemyFire),
            GameEvent::InvaderDestroyed { .. } => Some(SoundEffect::InvaderExplode),
            GameEvent::PlayerHit { .. } => Some(SoundEffect::PlayerHit),
            GameEvent::PlayerDefeated => Some(SoundEffect::GameOver),
            GameEvent::FormationStepped { step } => Some(SoundEffect::March(*step)),
            GameEvent::FormationReversed => None,
        }
    }

    /// (note id, duration ms) pairs, played back to back
    pub fn notes(self) -> Vec<(i32, i32)> {
        match self {
            // Quick high blip
            SoundEffect::PlayerFire => vec![(84, 40)],
            // Lower, shorter blip so it doesn't drown out the player's
            SoundEffect::EnemyFire => vec![(67, 25)],
            // Falling three-note crunch
            SoundEffect::InvaderExplode => vec![(60, 30), (55, 30), (48, 60)],
            // Low thud
            SoundEffect::PlayerHit => vec![(40, 120), (36, 200)],
            SoundEffect::March(step) => vec![(MARCH_NOTES[step as usize % MARCH_NOTES.len()], 60)],
            // Slow descending phrase
            SoundEffect::GameOver => vec![(55, 200), (50, 200), (45, 400)],
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Clone, Default)]
pub struct AudioManager {
    muted: bool,
}

impl AudioManager {
    pub fn new(enabled: bool) -> Self {
        Self { muted: !enabled }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect, sink: &dyn AudioSink) {
        if self.is_muted() {
            return;
        }
        for (note, ms) in effect.notes() {
            sink.play_note(note, ms);
        }
    }

    /// Play whatever the given events call for
    pub fn play_events(&self, events: &[GameEvent], sink: &dyn AudioSink) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect, sink);
        }
    }
}

/// A note handed to the playback thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicNote {
    /// 7-bit MIDI note number (0 = rest)
    pub note_id: u8,
    pub duration: Duration,
}

/// Non-blocking hand-off to a playback loop over an mpsc channel
#[derive(Debug, Clone)]
pub struct NoteQueue {
    tx: Sender<MusicNote>,
}

impl NoteQueue {
    /// Create the queue and the receiving end for the playback loop
    pub fn channel() -> (Self, Receiver<MusicNote>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl AudioSink for NoteQueue {
    fn play_note(&self, note_id: i32, duration_ms: i32) {
        if note_id < 0 || duration_ms < 0 {
            log::warn!("Ignoring invalid note {} ({} ms)", note_id, duration_ms);
            return;
        }

        let note = MusicNote {
            note_id: (note_id & 0x7F) as u8,
            duration: Duration::from_millis(duration_ms as u64),
        };
        // Playback loop gone: nothing left to hear it
        let _ = self.tx.send(note);
    }
}
