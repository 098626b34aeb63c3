//! Hardware drivers.
//!
//! Each driver runs on the device through the raw ESP-IDF calls in
//! [`hw_init`] and degrades to an in-memory simulation on the host, so
//! everything above this layer is testable without hardware.

pub mod buttons;
pub mod buzzer;
pub mod hw_init;
pub mod lcd;
pub mod led_panel;
