//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the US-100 link and all actuator drivers, exposing them through
//! [`SensorPort`], [`PanelPort`] and [`DisplayPort`]. This is the only
//! module in the system that touches actual hardware. On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs, so
//! the adapter itself compiles and runs everywhere.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::app::ports::{DisplayPort, PanelPort, SensorPort};
use crate::config::SystemConfig;
use crate::drivers::buzzer::{Buzzer, Note};
use crate::drivers::hw_init;
use crate::drivers::lcd::Lcd;
use crate::drivers::led_panel::LedPanel;
use crate::error::SensorError;
use crate::link::us100::Us100Link;
use crate::link::Transport;
use crate::pins;

// ── Raw GPIO output pin ───────────────────────────────────────

/// An `OutputPin` over the raw GPIO write helper. Infallible: the pin
/// direction was fixed during peripheral init.
pub struct RawOutputPin {
    gpio: i32,
}

impl RawOutputPin {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }
}

impl ErrorType for RawOutputPin {
    type Error = Infallible;
}

impl OutputPin for RawOutputPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.gpio, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.gpio, true);
        Ok(())
    }
}

// ── UART1 transport for the US-100 ────────────────────────────

/// Byte channel over the installed UART driver. The driver-level
/// helpers swallow esp-idf return codes, so reads and writes cannot
/// fail here; a silent sensor surfaces as a link-level timeout instead.
pub struct Us100Uart;

impl Transport for Us100Uart {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        Ok(hw_init::uart_read(buf))
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Infallible> {
        Ok(hw_init::uart_write(data))
    }

    fn available(&self) -> bool {
        hw_init::uart_available() > 0
    }
}

// ── The adapter ───────────────────────────────────────────────

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    link: Us100Link<Us100Uart>,
    panel: LedPanel<RawOutputPin>,
    buzzer: Buzzer,
    lcd: Lcd,
}

impl HardwareAdapter {
    /// Build the adapter. Assumes [`hw_init::init_peripherals`] already
    /// ran; initializes the LCD controller.
    pub fn new(config: &SystemConfig) -> Self {
        let panel = LedPanel::new([
            RawOutputPin::new(pins::LED0_GPIO),
            RawOutputPin::new(pins::LED1_GPIO),
            RawOutputPin::new(pins::LED2_GPIO),
            RawOutputPin::new(pins::LED3_GPIO),
        ]);

        let mut lcd = Lcd::new();
        lcd.init();

        Self {
            link: Us100Link::new(Us100Uart, config.sensor_timeout_ms),
            panel,
            buzzer: Buzzer::new(),
            lcd,
        }
    }

    /// Advance timed hardware state (tone playback). Call once per
    /// control tick.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.buzzer.tick(elapsed_ms);
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn begin_ranging(&mut self) -> Result<(), SensorError> {
        self.link.begin_request()
    }

    fn poll_ranging(&mut self, elapsed_ms: u32) -> Option<Result<u16, SensorError>> {
        self.link.poll(elapsed_ms)
    }
}

// ── PanelPort implementation ──────────────────────────────────

impl PanelPort for HardwareAdapter {
    fn set_leds(&mut self, all_on: bool) {
        if let Err(e) = self.panel.set_all(all_on) {
            match e {}
        }
    }

    fn play_tone(&mut self, note: Note, duration_ms: u16) {
        self.buzzer.start(note, duration_ms);
    }

    fn buzzer_off(&mut self) {
        self.buzzer.off();
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn clear(&mut self) {
        self.lcd.clear();
    }

    fn write_line(&mut self, row: u8, text: &str) {
        self.lcd.write_line(row, text);
    }
}
