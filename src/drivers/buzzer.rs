//! Piezo buzzer tone driver.
//!
//! One LEDC channel produces a square wave at the note frequency with
//! 50% duty. Playback is non-blocking: `start()` begins the tone and
//! records a deadline, `tick()` (called at control-tick rate) silences
//! the channel once the duration elapses.
//!
//! On ESP-IDF: drives the LEDC channel via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

/// Notes the alert choreography plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    /// Concert A, 440 Hz — the "flash on" half-cycle tone.
    A4,
    /// G below concert A, 392 Hz — the "flash off" half-cycle tone.
    G4,
}

impl Note {
    pub fn freq_hz(self) -> u32 {
        match self {
            Note::A4 => 440,
            Note::G4 => 392,
        }
    }
}

pub struct Buzzer {
    /// Milliseconds of playback left; 0 = silent.
    remaining_ms: u32,
    playing: Option<Note>,
}

impl Buzzer {
    pub fn new() -> Self {
        Self {
            remaining_ms: 0,
            playing: None,
        }
    }

    /// Begin a tone. Replaces any tone already playing.
    pub fn start(&mut self, note: Note, duration_ms: u16) {
        hw_init::buzzer_tone(note.freq_hz());
        self.remaining_ms = u32::from(duration_ms);
        self.playing = Some(note);
    }

    /// Advance playback time; silences the channel when the tone ends.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.playing.is_none() {
            return;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        if self.remaining_ms == 0 {
            self.off();
        }
    }

    /// Force the channel silent immediately.
    pub fn off(&mut self) {
        hw_init::buzzer_silence();
        self.remaining_ms = 0;
        self.playing = None;
    }

    pub fn playing(&self) -> Option<Note> {
        self.playing
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}
