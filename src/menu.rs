//! Button-mask decoding — raw panel reads to menu commands.
//!
//! The panel is four momentary switches presented as a 4-bit mask.
//! Decoding is deliberately conservative, matching the bench hardware's
//! behaviour exactly:
//!
//! - **Exact one-hot match only.** Simultaneous presses and any other
//!   unexpected mask are silently ignored.
//! - **Edge-triggered.** A command fires only when the mask *changes* to a
//!   one-hot value; holding a button fires once, and releasing back to a
//!   previously seen mask produces nothing.

use crate::app::commands::MenuCommand;

/// Bit positions on the 4-bit panel mask.
pub const MASK_TRIGGER: u8 = 0x01;
pub const MASK_REDRAW: u8 = 0x02;
pub const MASK_DISARM: u8 = 0x04;
pub const MASK_ARM: u8 = 0x08;

/// Edge-triggered mask-to-command decoder.
pub struct MenuController {
    last_mask: u8,
}

impl MenuController {
    pub fn new() -> Self {
        Self { last_mask: 0 }
    }

    /// Feed the latest debounced mask; returns a command on a rising edge
    /// to a recognised one-hot pattern.
    pub fn decode(&mut self, mask: u8) -> Option<MenuCommand> {
        if mask == self.last_mask {
            return None;
        }
        self.last_mask = mask;

        match mask {
            MASK_ARM => Some(MenuCommand::Arm),
            MASK_DISARM => Some(MenuCommand::Disarm),
            MASK_TRIGGER => Some(MenuCommand::TriggerAlert),
            MASK_REDRAW => Some(MenuCommand::RedrawMenu),
            _ => None,
        }
    }
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new()
    }
}
