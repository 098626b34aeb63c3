//! HomeSentry firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alert;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod link;
pub mod menu;

mod pins;

// Hardware-facing modules; the espidf implementations are guarded by
// cfg attributes inside, the pure-logic parts compile everywhere.
pub mod adapters;
pub mod drivers;
