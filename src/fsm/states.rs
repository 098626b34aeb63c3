//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap. This is the classic embedded C FSM pattern expressed
//! in safe Rust.
//!
//! ```text
//!  DISARMED ──[arm cmd]──▶ ARMED ──[0 < d <= threshold]──▶ ALERTING
//!      ▲                     │                                 │
//!      ├──────[disarm cmd]───┘                                 │
//!      └──────────────[sequence complete]──────────────────────┘
//!
//!  Any state ──[manual trigger cmd]──▶ ALERTING
//! ```
//!
//! Arm, disarm and manual trigger are pushed in by the command dispatcher
//! via `force_transition`; only the breach detection and the alert
//! completion are decided here, per tick.

use super::context::{DisplayRequest, FsmContext, OutputCommands};
use super::{StateDescriptor, StateId};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Disarmed
        StateDescriptor {
            id: StateId::Disarmed,
            name: "Disarmed",
            on_enter: Some(disarmed_enter),
            on_exit: None,
            on_update: disarmed_update,
        },
        // Index 1 — Armed
        StateDescriptor {
            id: StateId::Armed,
            name: "Armed",
            on_enter: Some(armed_enter),
            on_exit: None,
            on_update: armed_update,
        },
        // Index 2 — Alerting
        StateDescriptor {
            id: StateId::Alerting,
            name: "Alerting",
            on_enter: Some(alerting_enter),
            on_exit: Some(alerting_exit),
            on_update: alerting_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  DISARMED state
// ═══════════════════════════════════════════════════════════════════════════

fn disarmed_enter(ctx: &mut FsmContext) {
    // Everything off, main menu back on the LCD.
    ctx.commands = OutputCommands::all_off();
    ctx.commands.display = DisplayRequest::MainMenu;
    info!("DISARMED: outputs off, sensor idle");
}

fn disarmed_update(_ctx: &mut FsmContext) -> Option<StateId> {
    // Nothing to decide: arming happens via the command dispatcher.
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ARMED state — polling the distance sensor for intrusions
// ═══════════════════════════════════════════════════════════════════════════

fn armed_enter(ctx: &mut FsmContext) {
    // Discard anything left over from a previous armed period.
    ctx.sensors.fresh = false;
    info!(
        "ARMED: monitoring, threshold={} (raw sensor units)",
        ctx.config.distance_threshold
    );
}

fn armed_update(ctx: &mut FsmContext) -> Option<StateId> {
    if !ctx.sensors.fresh {
        return None;
    }
    ctx.sensors.fresh = false;

    // d = 0 is the US-100's "no echo" answer and is not a breach.
    let d = ctx.sensors.distance_mm;
    if d > 0 && d <= ctx.config.distance_threshold {
        warn!(
            "ARMED: object at {} <= {} — breach",
            d, ctx.config.distance_threshold
        );
        ctx.alert_manual = false;
        return Some(StateId::Alerting);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALERTING state — fixed choreography, runs to completion
// ═══════════════════════════════════════════════════════════════════════════

fn alerting_enter(ctx: &mut FsmContext) {
    ctx.alert.restart(&ctx.config);
    ctx.commands.leds_all_on = false;
    ctx.commands.tone = None;
    ctx.commands.display = DisplayRequest::AlertBanner;
    warn!(
        "ALERTING: {} flash cycles queued ({})",
        ctx.config.alert_flash_cycles,
        if ctx.alert_manual { "manual trigger" } else { "breach" }
    );
}

fn alerting_update(ctx: &mut FsmContext) -> Option<StateId> {
    let step = ctx.alert.advance(ctx.tick_period_ms);

    ctx.commands.leds_all_on = step.leds_on;
    if let Some(note) = step.tone {
        ctx.commands.tone = Some((note, ctx.config.alert_tone_ms));
    }

    if step.finished {
        info!(
            "ALERTING: sequence complete after {} cycles, forcing disarm",
            ctx.alert.cycles_completed()
        );
        return Some(StateId::Disarmed);
    }

    None
}

fn alerting_exit(ctx: &mut FsmContext) {
    // LEDs off and buzzer silenced unconditionally; the Disarmed entry
    // handler redraws the menu.
    ctx.commands.leds_all_on = false;
    ctx.commands.tone = None;
    ctx.commands.silence_buzzer = true;
    ctx.alert_manual = false;
}
