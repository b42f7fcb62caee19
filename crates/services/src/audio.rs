//! Fire-and-forget sound cue dispatch.
//!
//! Synthesis is a presentation concern; the core only names the cue. Sinks
//! must never fail and never block.

use std::sync::Mutex;

/// Event vocabulary understood by the audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Correct,
    Wrong,
    Click,
    Success,
    LevelUp,
}

/// A destination for sound cues. No return value, no surfaced errors.
pub trait SoundSink: Send + Sync {
    fn play(&self, cue: SoundCue);
}

/// Discards every cue. The default sink for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&self, _cue: SoundCue) {}
}

/// Remembers every cue in order. Used by tests to assert dispatch.
#[derive(Debug, Default)]
pub struct RecordingSink {
    cues: Mutex<Vec<SoundCue>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cues played so far, in order.
    #[must_use]
    pub fn played(&self) -> Vec<SoundCue> {
        self.cues.lock().map(|cues| cues.clone()).unwrap_or_default()
    }
}

impl SoundSink for RecordingSink {
    fn play(&self, cue: SoundCue) {
        if let Ok(mut cues) = self.cues.lock() {
            cues.push(cue);
        }
    }
}
