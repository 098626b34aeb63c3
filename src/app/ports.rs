//! Port traits — the hexagonal boundary between the security core and
//! the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (the ranging link, the LED/buzzer panel, the LCD, the
//! event log) implement these traits. The
//! [`SecurityService`](super::service::SecurityService) consumes them via
//! generics, so the domain core never touches hardware directly and the
//! whole state machine is testable with fakes on the host.

use crate::drivers::buzzer::Note;
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Ranging port (driven adapter: sensor → domain)
// ───────────────────────────────────────────────────────────────

/// Non-blocking access to the distance sensor.
///
/// The service decides *when* to range (the armed cadence); the adapter
/// handles *how* (the US-100 byte protocol and its timeout).
pub trait SensorPort {
    /// Kick off one ranging request.
    fn begin_ranging(&mut self) -> Result<(), SensorError>;

    /// Poll the in-flight request. `elapsed_ms` is the time since the
    /// previous poll. `None` = still pending.
    fn poll_ranging(&mut self, elapsed_ms: u32) -> Option<Result<u16, SensorError>>;
}

// ───────────────────────────────────────────────────────────────
// Panel port (driven adapter: domain → LEDs and buzzer)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the indicator hardware.
pub trait PanelPort {
    /// Drive all four LEDs high or low as one pattern.
    fn set_leds(&mut self, all_on: bool);

    /// Start a tone; playback length is `duration_ms`.
    fn play_tone(&mut self, note: Note, duration_ms: u16);

    /// Force the buzzer output low.
    fn buzzer_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → 16x2 LCD)
// ───────────────────────────────────────────────────────────────

/// Two-row character display.
pub trait DisplayPort {
    /// Blank the display and home the cursor.
    fn clear(&mut self);

    /// Write `text` starting at column 0 of `row` (0 or 1).
    fn write_line(&mut self, row: u8, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
