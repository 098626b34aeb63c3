//! Adapters — concrete implementations of the port traits in
//! [`crate::app::ports`]. The hardware adapter is the only code path
//! that reaches real peripherals; the log sink writes structured events
//! to the console logger.

pub mod hardware;
pub mod log_sink;
