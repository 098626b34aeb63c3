//! Unified error types for the HomeSentry firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level control loop's error handling uniform. All variants are
//! `Copy` so they can be passed through the FSM and event sink without
//! allocation.
//!
//! Redundant user commands (arming an already-armed system) are NOT
//! errors — they surface as informational status messages and
//! [`AppEvent`](crate::app::events::AppEvent)s.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The distance sensor could not produce a reading.
    Sensor(SensorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Failures on the US-100 ranging link.
///
/// `Timeout` is recoverable by design: the armed monitor logs it, abandons
/// the poll cycle, and stays armed. The original bench firmware blocked
/// forever on a silent sensor; the timeout makes that failure explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The two-byte response did not arrive within the configured window.
    Timeout,
    /// The response frame was malformed or arrived out of sync.
    Framing,
    /// The underlying byte channel rejected a read or write.
    Channel,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "response timeout"),
            Self::Framing => write!(f, "framing error"),
            Self::Channel => write!(f, "byte channel error"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

impl std::error::Error for Error {}
impl std::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_error_converts_to_top_level() {
        let e: Error = SensorError::Timeout.into();
        assert_eq!(e, Error::Sensor(SensorError::Timeout));
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(
            Error::Sensor(SensorError::Timeout).to_string(),
            "sensor: response timeout"
        );
        assert_eq!(Error::Init("uart").to_string(), "init: uart");
    }
}
