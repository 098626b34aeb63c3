//! GPIO / peripheral pin assignments for the HomeSentry main board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers.  Change a pin here and it propagates
//! everywhere.

// ---------------------------------------------------------------------------
// Button panel (active-low momentary switches with external pull-ups)
// ---------------------------------------------------------------------------

/// Trigger-alert button — panel mask bit 0.
pub const BUTTON_TRIGGER_GPIO: i32 = 4;
/// Redraw-menu button — panel mask bit 1.
pub const BUTTON_REDRAW_GPIO: i32 = 5;
/// Disarm button — panel mask bit 2.
pub const BUTTON_DISARM_GPIO: i32 = 6;
/// Arm button — panel mask bit 3.
pub const BUTTON_ARM_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Indicator LEDs (driven as one pattern, all on or all off)
// ---------------------------------------------------------------------------

pub const LED0_GPIO: i32 = 10;
pub const LED1_GPIO: i32 = 11;
pub const LED2_GPIO: i32 = 12;
pub const LED3_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Piezo buzzer (LEDC square wave, 50% duty)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 14;
/// LEDC timer resolution (bits).  10-bit keeps the divider valid down
/// to the lowest note frequency.
pub const BUZZER_PWM_RESOLUTION_BITS: u32 = 10;

// ---------------------------------------------------------------------------
// 16x2 character LCD (HD44780, 4-bit parallel)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 15;
pub const LCD_EN_GPIO: i32 = 16;
pub const LCD_D4_GPIO: i32 = 17;
pub const LCD_D5_GPIO: i32 = 18;
pub const LCD_D6_GPIO: i32 = 21;
pub const LCD_D7_GPIO: i32 = 38;

// ---------------------------------------------------------------------------
// US-100 ultrasonic ranging module (UART1, 9600 8N1)
// ---------------------------------------------------------------------------

pub const US100_UART_TX_GPIO: i32 = 47;
pub const US100_UART_RX_GPIO: i32 = 48;
pub const US100_UART_BAUD: u32 = 9600;
