//! Inbound commands to the security core.
//!
//! These are what the button panel's mask edges decode into (see
//! [`MenuController`](crate::menu::MenuController)); the
//! [`SecurityService`](super::service::SecurityService) interprets them.

/// User commands from the four-button panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Arm the system and start monitoring (no-op status if already armed).
    Arm,

    /// Disarm and stop monitoring (no-op status if already disarmed).
    Disarm,

    /// Run the alert sequence immediately, regardless of armed state.
    /// Manual test/override path — deliberately not gated on Armed.
    TriggerAlert,

    /// Clear the LCD and redraw the main menu.
    RedrawMenu,
}
