//! System configuration parameters.
//!
//! All tunable parameters for the HomeSentry alarm. Values are fixed at
//! boot — the system deliberately carries no persistent settings, so a
//! reset always returns to these defaults.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Intrusion detection ---
    /// Distance at or below which an object counts as a breach.
    ///
    /// Compared against the raw 16-bit value the US-100 returns (the
    /// datasheet specifies millimetres; the inherited threshold of 50 was
    /// written as "50 cm" in the bench notes, so the unit mismatch is
    /// preserved here rather than silently corrected).
    pub distance_threshold: u16,
    /// Pause between completed sensor reads while armed (milliseconds).
    pub sensor_poll_interval_ms: u32,
    /// How long to wait for the two-byte sensor response before giving up
    /// (milliseconds). Raise this if a slow sensor needs more headroom.
    pub sensor_timeout_ms: u32,

    // --- Alert choreography ---
    /// How long the "Intruder / Detected" banner is held before the
    /// flash/tone loop starts (milliseconds). Zero skips the banner.
    pub alert_banner_hold_ms: u32,
    /// Number of flash/tone iterations. The sequence always runs this many
    /// cycles to completion — it is not cancellable once started.
    pub alert_flash_cycles: u8,
    /// Duration of each alert tone (milliseconds).
    pub alert_tone_ms: u16,
    /// Pause after each tone before the LEDs flip (milliseconds).
    pub alert_pause_ms: u32,

    // --- User interface ---
    /// How long status messages ("System Armed", ...) stay on the LCD
    /// before the main menu is redrawn (milliseconds).
    pub status_hold_ms: u32,
    /// Button mask must be stable for this long before it is accepted
    /// (milliseconds).
    pub button_debounce_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Heartbeat / status log interval (seconds).
    pub heartbeat_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Intrusion detection
            distance_threshold: 50,
            sensor_poll_interval_ms: 100,
            sensor_timeout_ms: 500,

            // Alert choreography
            alert_banner_hold_ms: 3000,
            alert_flash_cycles: 10,
            alert_tone_ms: 50,
            alert_pause_ms: 250,

            // User interface
            status_hold_ms: 3000,
            button_debounce_ms: 20,

            // Timing
            control_loop_interval_ms: 10, // 100 Hz
            heartbeat_interval_secs: 60,  // 1/min
        }
    }
}

impl SystemConfig {
    /// Reject configurations that would wedge the control loop or make the
    /// alert sequence degenerate. Called once at boot.
    pub fn validate(&self) -> Result<(), Error> {
        if self.distance_threshold == 0 {
            return Err(Error::Config("distance_threshold must be > 0"));
        }
        if self.alert_flash_cycles == 0 {
            return Err(Error::Config("alert_flash_cycles must be > 0"));
        }
        if self.alert_tone_ms == 0 && self.alert_pause_ms == 0 {
            return Err(Error::Config(
                "alert_tone_ms + alert_pause_ms must be > 0",
            ));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be > 0"));
        }
        if self.sensor_poll_interval_ms < self.control_loop_interval_ms {
            return Err(Error::Config(
                "sensor_poll_interval_ms must be >= control_loop_interval_ms",
            ));
        }
        if self.sensor_timeout_ms == 0 {
            return Err(Error::Config("sensor_timeout_ms must be > 0"));
        }
        Ok(())
    }
}
