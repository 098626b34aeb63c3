//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future network-notification adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Breach { distance_mm } => {
                warn!("BREACH | distance={}mm", distance_mm);
            }
            AppEvent::SensorFault(e) => {
                warn!("SENSOR | fault: {}, staying armed", e);
            }
            AppEvent::AlertStarted { manual } => {
                warn!("ALERT | sequence started (manual={})", manual);
            }
            AppEvent::AlertCompleted => {
                info!("ALERT | sequence complete, system disarmed");
            }
            AppEvent::StatusShown(msg) => {
                info!("LCD | status \"{}\"", msg);
            }
            AppEvent::CommandIgnored(cmd) => {
                warn!("CMD | {:?} ignored while alert runs", cmd);
            }
            AppEvent::Heartbeat(hb) => {
                info!(
                    "HEART | state={:?} | ticks={} | last_distance={}mm | faults={}",
                    hb.state, hb.total_ticks, hb.last_distance_mm, hb.sensor_faults,
                );
            }
        }
    }
}
