//! The application core — hexagonal, hardware-free.
//!
//! [`service::SecurityService`] owns the FSM and alert choreography and
//! talks to the outside world exclusively through the port traits in
//! [`ports`]. Everything in this module runs unchanged on the host.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
