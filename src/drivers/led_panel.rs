//! Indicator LED panel.
//!
//! Four discrete LEDs driven as a single pattern — the alert flash
//! turns them all on or all off together. Generic over
//! [`embedded_hal::digital::OutputPin`] so the panel runs against real
//! GPIO on the device and fake pins in tests.

use embedded_hal::digital::OutputPin;

pub const LED_COUNT: usize = 4;

pub struct LedPanel<P: OutputPin> {
    pins: [P; LED_COUNT],
    lit: bool,
}

impl<P: OutputPin> LedPanel<P> {
    /// Takes ownership of the four LED pins, assumed to start low.
    pub fn new(pins: [P; LED_COUNT]) -> Self {
        Self { pins, lit: false }
    }

    /// Drive every LED high or low as one pattern.
    pub fn set_all(&mut self, on: bool) -> Result<(), P::Error> {
        for pin in &mut self.pins {
            if on {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        self.lit = on;
        Ok(())
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
