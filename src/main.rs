//! HomeSentry firmware — main entry point.
//!
//! Hexagonal architecture with event-driven execution:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter                 LogEventSink            │
//! │  (Sensor+Panel+Display)          (EventSink)             │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          SecurityService (pure logic)          │      │
//! │  │  FSM · AlertSequence · ranging cadence         │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  ButtonScanner → MenuController → commands               │
//! └──────────────────────────────────────────────────────────┘
//! ```

use anyhow::Result;
use log::{error, info};

use homesentry::adapters::hardware::HardwareAdapter;
use homesentry::adapters::log_sink::LogEventSink;
use homesentry::app::events::AppEvent;
use homesentry::app::ports::EventSink;
use homesentry::app::service::SecurityService;
use homesentry::config::SystemConfig;
use homesentry::drivers::buttons::{self, ButtonScanner};
use homesentry::drivers::hw_init;
use homesentry::events::{self, push_event, Event};
use homesentry::menu::MenuController;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HomeSentry v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(&config);
    let mut log_sink = LogEventSink::new();

    let mut scanner = ButtonScanner::new(config.button_debounce_ms);
    let mut menu = MenuController::new();

    // ── 5. Construct app service ──────────────────────────────
    let mut app = SecurityService::new(config.clone());
    app.start(&mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    let tick_ms = config.control_loop_interval_ms;
    let heartbeat_ticks =
        (u64::from(config.heartbeat_interval_secs) * 1000 / u64::from(tick_ms)).max(1);
    let mut heartbeat_counter: u64 = 0;
    let mut now_ms: u32 = 0;

    loop {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(tick_ms)));
        now_ms = now_ms.wrapping_add(tick_ms);

        push_event(Event::ButtonScanTick);
        push_event(Event::ControlTick);

        heartbeat_counter += 1;
        if heartbeat_counter >= heartbeat_ticks {
            push_event(Event::HeartbeatTick);
            heartbeat_counter = 0;
        }

        // Process all pending events.
        events::drain_events(|event| match event {
            Event::ButtonScanTick => {
                let mask = scanner.sample(buttons::read_raw_mask(), now_ms);
                if let Some(cmd) = menu.decode(mask) {
                    info!("Panel: {:?}", cmd);
                    app.handle_command(cmd, &mut hw, &mut log_sink);
                }
            }

            Event::ControlTick => {
                app.tick(&mut hw, &mut log_sink);
                // Timed hardware state (tone playback deadline).
                hw.tick(tick_ms);
            }

            Event::HeartbeatTick => {
                log_sink.emit(&AppEvent::Heartbeat(app.build_heartbeat()));
            }
        });
    }
}
