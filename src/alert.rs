//! The alert choreography — a millisecond-driven phase machine.
//!
//! ```text
//!  BANNER (3000 ms, "Intruder/Detected" on the LCD)
//!    └─▶ FLASH-ON  (LEDs on,  tone A4, 300 ms) ─┐
//!        FLASH-OFF (LEDs off, tone G4, 300 ms) ─┴─ × 10 cycles
//!            └─▶ DONE
//! ```
//!
//! Once started the sequence always runs its configured cycle count to
//! completion — there is no cancel path. The atomicity is deliberate:
//! an intruder alarm that can be silenced mid-wail by a button press is
//! not much of an alarm. Callers enforce this by ignoring commands while
//! the sequence is live.
//!
//! The sequence owns no hardware. Each [`advance`](AlertSequence::advance)
//! returns an [`AlertStep`] describing the desired LED level and any
//! one-shot tone; the service maps that onto the output ports.

use crate::config::SystemConfig;
use crate::drivers::buzzer::Note;

/// Desired outputs for the current instant of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertStep {
    /// LED panel level for this phase.
    pub leds_on: bool,
    /// Tone to start now, if a phase boundary was just crossed. One-shot.
    pub tone: Option<Note>,
    /// True once the whole choreography has run its course.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Banner,
    Flash { cycle: u8, leds_on: bool },
    Done,
}

/// Fixed flash/tone choreography, parameterised from [`SystemConfig`].
pub struct AlertSequence {
    banner_hold_ms: u32,
    flash_cycles: u8,
    /// Tone duration + pause: the length of one flash half-cycle.
    half_cycle_ms: u32,

    phase: Phase,
    in_phase_ms: u32,
    pending_tone: Option<Note>,
    completed_cycles: u8,
}

impl AlertSequence {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            banner_hold_ms: config.alert_banner_hold_ms,
            flash_cycles: config.alert_flash_cycles,
            half_cycle_ms: u32::from(config.alert_tone_ms) + config.alert_pause_ms,
            phase: Phase::Banner,
            in_phase_ms: 0,
            pending_tone: None,
            completed_cycles: 0,
        }
    }

    /// Reset to the banner phase with (possibly updated) timing.
    pub fn restart(&mut self, config: &SystemConfig) {
        *self = Self::new(config);
    }

    /// Advance the choreography by `dt_ms` and report the desired outputs.
    ///
    /// Handles `dt_ms` larger than a phase by crossing as many boundaries
    /// as the elapsed time covers; every crossed boundary queues its tone,
    /// but only the most recent one is reported (tones are 50 ms — if the
    /// caller ticks slower than that, earlier tones are already over).
    pub fn advance(&mut self, dt_ms: u32) -> AlertStep {
        self.in_phase_ms = self.in_phase_ms.saturating_add(dt_ms);

        // A zero-length phase (`in_phase_ms >= 0 == len`) completes
        // immediately; the loop terminates because Done breaks out and
        // every Flash chain ends in Done.
        loop {
            if self.phase == Phase::Done {
                break;
            }
            let len = self.phase_len();
            if self.in_phase_ms < len {
                break;
            }
            self.in_phase_ms -= len;
            self.enter_next_phase();
        }

        AlertStep {
            leds_on: matches!(
                self.phase,
                Phase::Flash { leds_on: true, .. }
            ),
            tone: self.pending_tone.take(),
            finished: self.phase == Phase::Done,
        }
    }

    /// True once the final pause has elapsed.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Number of full flash cycles (on + off) executed so far.
    pub fn cycles_completed(&self) -> u8 {
        self.completed_cycles
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn phase_len(&self) -> u32 {
        match self.phase {
            Phase::Banner => self.banner_hold_ms,
            Phase::Flash { .. } => self.half_cycle_ms,
            Phase::Done => 0,
        }
    }

    fn enter_next_phase(&mut self) {
        self.phase = match self.phase {
            Phase::Banner => {
                if self.flash_cycles == 0 {
                    Phase::Done
                } else {
                    self.pending_tone = Some(Note::A4);
                    Phase::Flash {
                        cycle: 0,
                        leds_on: true,
                    }
                }
            }
            Phase::Flash {
                cycle,
                leds_on: true,
            } => {
                self.pending_tone = Some(Note::G4);
                Phase::Flash {
                    cycle,
                    leds_on: false,
                }
            }
            Phase::Flash {
                cycle,
                leds_on: false,
            } => {
                self.completed_cycles = cycle + 1;
                if cycle + 1 >= self.flash_cycles {
                    self.pending_tone = None;
                    Phase::Done
                } else {
                    self.pending_tone = Some(Note::A4);
                    Phase::Flash {
                        cycle: cycle + 1,
                        leds_on: true,
                    }
                }
            }
            Phase::Done => Phase::Done,
        };
    }
}
