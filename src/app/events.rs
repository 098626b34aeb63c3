//! Outbound application events.
//!
//! The [`SecurityService`](super::service::SecurityService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them — the stock adapter logs
//! to the serial console.

use super::commands::MenuCommand;
use crate::error::SensorError;
use crate::fsm::StateId;

/// Structured events emitted by the security core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A reading inside the threshold was observed while armed.
    Breach { distance_mm: u16 },

    /// A poll cycle was abandoned; the system stays armed.
    SensorFault(SensorError),

    /// The alert choreography has started.
    AlertStarted { manual: bool },

    /// The alert choreography ran its full cycle count and disarmed.
    AlertCompleted,

    /// A transient status line was shown on the LCD.
    StatusShown(&'static str),

    /// A command arrived while the alert sequence was running and was
    /// dropped — the choreography is not interruptible.
    CommandIgnored(MenuCommand),

    /// Periodic liveness snapshot.
    Heartbeat(HeartbeatData),
}

/// A point-in-time liveness snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatData {
    pub state: StateId,
    pub total_ticks: u64,
    pub last_distance_mm: u16,
    pub sensor_faults: u32,
}
