//! Button panel scanner with mask debouncing.
//!
//! ## Hardware
//!
//! Four active-low momentary switches with external pull-ups, read as a
//! 4-bit mask (bit 0 = trigger, bit 1 = redraw, bit 2 = disarm,
//! bit 3 = arm). The scanner is polled at control-tick rate; a raw mask
//! must hold steady for the debounce window before it becomes the
//! stable mask. Edge detection and command decoding live in
//! [`MenuController`](crate::menu::MenuController) — this driver only
//! produces clean samples.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::menu;
#[cfg(target_os = "espidf")]
use crate::pins;

pub struct ButtonScanner {
    debounce_ms: u32,
    stable_mask: u8,
    candidate_mask: u8,
    candidate_since_ms: u32,
}

impl ButtonScanner {
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            stable_mask: 0,
            candidate_mask: 0,
            candidate_since_ms: 0,
        }
    }

    /// Feed one raw mask sample taken at `now_ms` (monotonic).
    /// Returns the debounced stable mask.
    pub fn sample(&mut self, raw_mask: u8, now_ms: u32) -> u8 {
        if raw_mask != self.candidate_mask {
            // New candidate level — restart the debounce window.
            self.candidate_mask = raw_mask;
            self.candidate_since_ms = now_ms;
        } else if raw_mask != self.stable_mask
            && now_ms.wrapping_sub(self.candidate_since_ms) >= self.debounce_ms
        {
            self.stable_mask = raw_mask;
        }
        self.stable_mask
    }

    pub fn stable_mask(&self) -> u8 {
        self.stable_mask
    }
}

/// Read the raw (undebounced) panel mask from the GPIOs.
/// Buttons are active-low: a pressed button reads 0 and sets its bit.
#[cfg(target_os = "espidf")]
pub fn read_raw_mask() -> u8 {
    let mut mask = 0u8;
    if !hw_init::gpio_read(pins::BUTTON_TRIGGER_GPIO) {
        mask |= menu::MASK_TRIGGER;
    }
    if !hw_init::gpio_read(pins::BUTTON_REDRAW_GPIO) {
        mask |= menu::MASK_REDRAW;
    }
    if !hw_init::gpio_read(pins::BUTTON_DISARM_GPIO) {
        mask |= menu::MASK_DISARM;
    }
    if !hw_init::gpio_read(pins::BUTTON_ARM_GPIO) {
        mask |= menu::MASK_ARM;
    }
    mask
}

#[cfg(not(target_os = "espidf"))]
pub fn read_raw_mask() -> u8 {
    0
}
