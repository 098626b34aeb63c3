//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to. It carries the latest distance reading, the output commands
//! the handlers request, the running alert sequence, configuration, and
//! timing. Think of it as the blackboard the whole security core works on.

use crate::alert::AlertSequence;
use crate::config::SystemConfig;
use crate::drivers::buzzer::Note;

// ---------------------------------------------------------------------------
// Sensor snapshot (written by the service's poll driver, consumed by Armed)
// ---------------------------------------------------------------------------

/// The most recent distance measurement and its bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorSnapshot {
    /// Last completed reading, raw 16-bit value as the US-100 returned it.
    pub distance_mm: u16,
    /// True until the Armed handler has evaluated this reading.
    /// Each reading is compared against the threshold exactly once.
    pub fresh: bool,
    /// Count of poll cycles abandoned due to sensor faults since boot.
    pub faults: u32,
}

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// What the LCD should show next. One-shot: applied once, then reset to
/// `None` so the display is not rewritten every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayRequest {
    #[default]
    None,
    /// "Arm System" / "Disarm System".
    MainMenu,
    /// A transient status line, held for `status_hold_ms` then replaced
    /// by the main menu.
    Status(&'static str),
    /// "Intruder" / "Detected".
    AlertBanner,
}

/// Commands that state handlers write to request output actions.
/// The service applies these through the port traits after each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputCommands {
    /// Desired LED panel pattern: all four on, or all off.
    pub leds_all_on: bool,
    /// One-shot tone request (note, duration in ms). Taken when applied.
    pub tone: Option<(Note, u16)>,
    /// One-shot request to force the buzzer output low.
    pub silence_buzzer: bool,
    /// One-shot LCD update request.
    pub display: DisplayRequest,
}

impl OutputCommands {
    /// Everything off — safe default.
    pub fn all_off() -> Self {
        Self {
            silence_buzzer: true,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,
    /// Duration of one control tick in milliseconds.
    pub tick_period_ms: u32,

    // -- Sensor data --
    /// Latest distance reading. Written before each FSM tick while armed.
    pub sensors: SensorSnapshot,

    // -- Outputs --
    /// Commands to be applied to LEDs / buzzer / LCD after the FSM tick.
    pub commands: OutputCommands,

    // -- Alert choreography --
    /// The running alert sequence. Restarted on every Alerting entry.
    pub alert: AlertSequence,
    /// True when the current/next alert was requested via the manual
    /// trigger button rather than a sensor breach.
    pub alert_manual: bool,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            tick_period_ms: config.control_loop_interval_ms,
            sensors: SensorSnapshot::default(),
            commands: OutputCommands::all_off(),
            alert: AlertSequence::new(&config),
            alert_manual: false,
            config,
        }
    }

    /// Milliseconds elapsed since the current state was entered.
    pub fn ms_in_state(&self) -> u64 {
        self.ticks_in_state * u64::from(self.tick_period_ms)
    }
}
