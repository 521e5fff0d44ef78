//! Confirmation chime played when the synthesizer retry loop ends.

use crate::host::TonePlayer;
use std::thread;
use std::time::Duration;

/// A single tone of a chime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Three ascending tones.
pub const CONFIRMATION_CHIME: [Tone; 3] = [
    Tone::new(300, 100),
    Tone::new(500, 80),
    Tone::new(700, 60),
];

/// Silence after each tone.
pub const CHIME_PAUSE: Duration = Duration::from_millis(100);

/// A tone sequence with a fixed pause after every tone.
#[derive(Debug, Clone, Copy)]
pub struct Chime<'a> {
    tones: &'a [Tone],
    pause: Duration,
}

impl<'a> Chime<'a> {
    pub fn new(tones: &'a [Tone], pause: Duration) -> Self {
        Self { tones, pause }
    }

    pub fn confirmation() -> Chime<'static> {
        Chime::new(&CONFIRMATION_CHIME, CHIME_PAUSE)
    }

    pub fn with_pause(self, pause: Duration) -> Self {
        Self { pause, ..self }
    }

    pub fn tones(&self) -> &[Tone] {
        self.tones
    }

    /// Play every tone in order, blocking the calling thread.
    pub fn play<P: TonePlayer + ?Sized>(&self, player: &P) {
        for tone in self.tones {
            player.play_tone(tone.frequency_hz, tone.duration_ms);
            if !self.pause.is_zero() {
                thread::sleep(self.pause);
            }
        }
    }
}
