//! Security service — the hexagonal core.
//!
//! [`SecurityService`] owns the FSM, the alert choreography and the armed
//! polling cadence. It exposes a clean, hardware-agnostic API; all I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌───────────────────────┐ ──▶ EventSink
//!                  │    SecurityService    │
//!    PanelPort ◀── │  FSM · AlertSequence  │ ──▶ DisplayPort
//!                  └───────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::fsm::context::{DisplayRequest, FsmContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::commands::MenuCommand;
use super::events::{AppEvent, HeartbeatData};
use super::ports::{DisplayPort, EventSink, PanelPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct SecurityService {
    fsm: Fsm,
    ctx: FsmContext,
    /// Milliseconds per control tick (derived from config).
    tick_ms: u32,
    tick_count: u64,
    /// Countdown until the next ranging request while armed.
    ranging_wait_ms: u32,
    /// True while a ranging request is in flight.
    ranging_open: bool,
    /// Tick at which the pending status message is replaced by the menu.
    status_expires_at: Option<u64>,
    /// Last LED level written to the panel, to avoid rewriting each tick.
    last_leds: Option<bool>,
}

impl SecurityService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let tick_ms = config.control_loop_interval_ms.max(1);
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Disarmed);

        Self {
            fsm,
            ctx,
            tick_ms,
            tick_count: 0,
            ranging_wait_ms: 0,
            ranging_open: false,
            status_expires_at: None,
            last_leds: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in Disarmed. The main menu is drawn on the first tick.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("SecurityService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: drive the ranging cadence (while
    /// armed) → FSM tick → apply outputs → emit transition events.
    ///
    /// The `hw` parameter satisfies all three hardware ports — this
    /// avoids a double mutable borrow while keeping the boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + PanelPort + DisplayPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        let prev = self.fsm.current_state();

        // 1. Sensor cadence — only the Armed state ranges. Entering the
        //    alert (or disarming) halts polling structurally: this branch
        //    is simply never taken again until re-armed.
        if prev == StateId::Armed {
            self.drive_sensor(hw, sink);
        }

        // 2. FSM tick (pure state logic).
        self.fsm.tick(&mut self.ctx);

        // 3. Transition bookkeeping and events.
        let state = self.fsm.current_state();
        if state != prev {
            if prev == StateId::Armed {
                self.reset_ranging();
            }
            if state == StateId::Alerting {
                // A pending status hold must not repaint over the banner.
                self.status_expires_at = None;
                if !self.ctx.alert_manual {
                    sink.emit(&AppEvent::Breach {
                        distance_mm: self.ctx.sensors.distance_mm,
                    });
                }
            }
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: state,
            });
            if state == StateId::Alerting {
                sink.emit(&AppEvent::AlertStarted {
                    manual: self.ctx.alert_manual,
                });
            }
            if prev == StateId::Alerting && state == StateId::Disarmed {
                sink.emit(&AppEvent::AlertCompleted);
            }
        }

        // 4. Status message hold expiry → menu redraw.
        if let Some(expires) = self.status_expires_at {
            if self.tick_count >= expires {
                self.status_expires_at = None;
                if state != StateId::Alerting {
                    self.ctx.commands.display = DisplayRequest::MainMenu;
                }
            }
        }

        // 5. Apply output commands via the ports.
        self.apply_outputs(hw);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a decoded panel command.
    ///
    /// While the alert choreography runs, every command is dropped — the
    /// sequence is deliberately not interruptible. Redundant arm/disarm
    /// requests produce a status message, never an error.
    pub fn handle_command(
        &mut self,
        cmd: MenuCommand,
        hw: &mut (impl PanelPort + DisplayPort),
        sink: &mut impl EventSink,
    ) {
        let state = self.fsm.current_state();

        if state == StateId::Alerting {
            // The menu contract still answers an arm request; everything
            // else is silently dropped until the sequence completes.
            if cmd == MenuCommand::Arm {
                sink.emit(&AppEvent::StatusShown("Already Armed"));
            } else {
                sink.emit(&AppEvent::CommandIgnored(cmd));
            }
            return;
        }

        match cmd {
            MenuCommand::Arm => {
                if state == StateId::Disarmed {
                    self.fsm.force_transition(StateId::Armed, &mut self.ctx);
                    self.reset_ranging();
                    sink.emit(&AppEvent::StateChanged {
                        from: state,
                        to: StateId::Armed,
                    });
                    self.show_status("System Armed", sink);
                } else {
                    self.show_status("Already Armed", sink);
                }
            }

            MenuCommand::Disarm => {
                if state == StateId::Armed {
                    self.fsm.force_transition(StateId::Disarmed, &mut self.ctx);
                    self.reset_ranging();
                    sink.emit(&AppEvent::StateChanged {
                        from: state,
                        to: StateId::Disarmed,
                    });
                    self.show_status("System Disarmed", sink);
                } else {
                    self.show_status("Already Disarmed", sink);
                }
            }

            MenuCommand::TriggerAlert => {
                // Manual test path: fires from any non-alerting state.
                self.ctx.alert_manual = true;
                self.fsm.force_transition(StateId::Alerting, &mut self.ctx);
                self.reset_ranging();
                self.status_expires_at = None;
                sink.emit(&AppEvent::StateChanged {
                    from: state,
                    to: StateId::Alerting,
                });
                sink.emit(&AppEvent::AlertStarted { manual: true });
            }

            MenuCommand::RedrawMenu => {
                self.ctx.commands.display = DisplayRequest::MainMenu;
                self.status_expires_at = None;
            }
        }

        self.apply_outputs(hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Poll cycles abandoned due to sensor faults since boot.
    pub fn sensor_faults(&self) -> u32 {
        self.ctx.sensors.faults
    }

    /// Build a liveness snapshot from the current context.
    pub fn build_heartbeat(&self) -> HeartbeatData {
        HeartbeatData {
            state: self.fsm.current_state(),
            total_ticks: self.tick_count,
            last_distance_mm: self.ctx.sensors.distance_mm,
            sensor_faults: self.ctx.sensors.faults,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Drive the armed ranging cadence: begin a request when the pause
    /// elapses, poll the in-flight one, and recover from faults by
    /// scheduling the next cycle.
    fn drive_sensor(&mut self, hw: &mut impl SensorPort, sink: &mut impl EventSink) {
        if self.ranging_open {
            match hw.poll_ranging(self.tick_ms) {
                Some(Ok(distance)) => {
                    self.ctx.sensors.distance_mm = distance;
                    self.ctx.sensors.fresh = true;
                    self.finish_ranging_cycle();
                }
                Some(Err(e)) => {
                    // Recoverable: abandon this cycle, stay armed.
                    self.ctx.sensors.faults += 1;
                    warn!("ranging cycle abandoned: {e}");
                    sink.emit(&AppEvent::SensorFault(e));
                    self.finish_ranging_cycle();
                }
                None => {}
            }
            return;
        }

        if self.ranging_wait_ms > 0 {
            self.ranging_wait_ms = self.ranging_wait_ms.saturating_sub(self.tick_ms);
            return;
        }

        match hw.begin_ranging() {
            Ok(()) => self.ranging_open = true,
            Err(e) => {
                self.ctx.sensors.faults += 1;
                warn!("ranging request failed: {e}");
                sink.emit(&AppEvent::SensorFault(e));
                self.ranging_wait_ms = self.ctx.config.sensor_poll_interval_ms;
            }
        }
    }

    fn finish_ranging_cycle(&mut self) {
        self.ranging_open = false;
        self.ranging_wait_ms = self.ctx.config.sensor_poll_interval_ms;
    }

    fn reset_ranging(&mut self) {
        self.ranging_open = false;
        self.ranging_wait_ms = 0;
    }

    fn show_status(&mut self, msg: &'static str, sink: &mut impl EventSink) {
        self.ctx.commands.display = DisplayRequest::Status(msg);
        let hold_ticks = u64::from(self.ctx.config.status_hold_ms / self.tick_ms);
        self.status_expires_at = Some(self.tick_count + hold_ticks);
        sink.emit(&AppEvent::StatusShown(msg));
    }

    /// Translate the context's output commands into port calls.
    /// Tone / buzzer / display requests are one-shot; the LED level is
    /// written only when it changes.
    fn apply_outputs(&mut self, hw: &mut (impl PanelPort + DisplayPort)) {
        let leds = self.ctx.commands.leds_all_on;
        if self.last_leds != Some(leds) {
            hw.set_leds(leds);
            self.last_leds = Some(leds);
        }

        if let Some((note, duration_ms)) = self.ctx.commands.tone.take() {
            hw.play_tone(note, duration_ms);
        }

        if core::mem::take(&mut self.ctx.commands.silence_buzzer) {
            hw.buzzer_off();
        }

        match core::mem::take(&mut self.ctx.commands.display) {
            DisplayRequest::None => {}
            DisplayRequest::MainMenu => {
                hw.clear();
                hw.write_line(0, "Arm System");
                hw.write_line(1, "Disarm System");
            }
            DisplayRequest::Status(msg) => {
                hw.clear();
                hw.write_line(0, msg);
            }
            DisplayRequest::AlertBanner => {
                hw.clear();
                hw.write_line(0, "Intruder");
                hw.write_line(1, "Detected");
            }
        }
    }
}
