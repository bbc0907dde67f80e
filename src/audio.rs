use std::time::Duration;

/// The three sound effects the game triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Cue {
    /// Tick at the start of each swap.
    Shuffle,
    Win,
    Lose,
}

impl Cue {
    /// Nominal clip length; the mixer holds a voice for this long.
    pub const fn length(self) -> Duration {
        match self {
            Cue::Shuffle => Duration::from_millis(400),
            Cue::Win => Duration::from_millis(1200),
            Cue::Lose => Duration::from_millis(900),
        }
    }
}

/// Playback backend seam. The shipped binary wires a silent sink; tests
/// record calls.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Sink that discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _cue: Cue) {}
}

/// Fixed-capacity mixer: at most [`Mixer::MAX_VOICES`] cues sound at once,
/// and nothing reaches the sink while sound is disabled. Saturated plays
/// are dropped, not queued.
#[derive(Debug)]
pub struct Mixer<S> {
    sink: S,
    enabled: bool,
    voices: Vec<Duration>,
}

impl<S: AudioSink> Mixer<S> {
    pub const MAX_VOICES: usize = 6;

    pub fn new(sink: S, enabled: bool) -> Self {
        Self { sink, enabled, voices: Vec::with_capacity(Self::MAX_VOICES) }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Number of voices still sounding.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Play a cue. Returns whether it actually reached the sink.
    pub fn play(&mut self, cue: Cue) -> bool {
        if !self.enabled || self.voices.len() >= Self::MAX_VOICES {
            return false;
        }
        self.voices.push(cue.length());
        self.sink.play(cue);
        true
    }

    /// Retire voices whose clip has finished.
    pub fn tick(&mut self, dt: Duration) {
        self.voices.retain_mut(|remaining| {
            *remaining = remaining.saturating_sub(dt);
            !remaining.is_zero()
        });
    }
}
