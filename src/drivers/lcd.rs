//! 16x2 character LCD driver (HD44780, 4-bit parallel).
//!
//! Bit-banged through the raw GPIO helpers in [`hw_init`], which are
//! no-ops on the host — the driver compiles everywhere but only moves
//! real pins on the device. Timing follows the HD44780 datasheet:
//! commands settle in ~40µs except clear/home, which need ~1.6ms.

use crate::drivers::hw_init;
use crate::pins;

pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: u8 = 2;

/// DDRAM address of the first column of each row.
const ROW_OFFSETS: [u8; LCD_ROWS as usize] = [0x00, 0x40];

/// Truncate or right-pad `text` to exactly one display row.
/// Padding with spaces avoids a clear/rewrite flicker when a shorter
/// line replaces a longer one.
pub fn pad_line(text: &str) -> heapless::String<LCD_COLS> {
    let mut line = heapless::String::new();
    for ch in text.chars().take(LCD_COLS) {
        if line.push(ch).is_err() {
            break;
        }
    }
    while line.push(' ').is_ok() {}
    line
}

pub struct Lcd {
    initialized: bool,
}

impl Lcd {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    /// Run the HD44780 4-bit wake-up dance. Call once after power-on.
    pub fn init(&mut self) {
        // >40ms after Vcc rise before the controller accepts commands.
        delay_us(50_000);

        // Reset sequence: three 8-bit function-set nibbles, then switch
        // to 4-bit mode (datasheet figure 24).
        self.write_nibble(0x03, false);
        delay_us(4_500);
        self.write_nibble(0x03, false);
        delay_us(4_500);
        self.write_nibble(0x03, false);
        delay_us(150);
        self.write_nibble(0x02, false);

        self.command(0x28); // 4-bit, 2 lines, 5x8 font
        self.command(0x0c); // display on, cursor off, blink off
        self.command(0x06); // entry mode: increment, no shift
        self.initialized = true;
        self.clear();
    }

    /// Blank the display and home the cursor.
    pub fn clear(&mut self) {
        self.command(0x01);
        delay_us(1_600);
    }

    /// Write `text` starting at column 0 of `row`, padded to the full
    /// row width. Rows beyond the panel are ignored.
    pub fn write_line(&mut self, row: u8, text: &str) {
        if row >= LCD_ROWS {
            return;
        }
        self.command(0x80 | ROW_OFFSETS[row as usize]);
        for byte in pad_line(text).bytes() {
            self.write_data(byte);
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ── Internal ──────────────────────────────────────────────

    fn command(&mut self, byte: u8) {
        self.write_byte(byte, false);
    }

    fn write_data(&mut self, byte: u8) {
        self.write_byte(byte, true);
    }

    fn write_byte(&mut self, byte: u8, is_data: bool) {
        self.write_nibble(byte >> 4, is_data);
        self.write_nibble(byte & 0x0f, is_data);
        delay_us(40);
    }

    fn write_nibble(&mut self, nibble: u8, is_data: bool) {
        hw_init::gpio_write(pins::LCD_RS_GPIO, is_data);
        hw_init::gpio_write(pins::LCD_D4_GPIO, nibble & 0x01 != 0);
        hw_init::gpio_write(pins::LCD_D5_GPIO, nibble & 0x02 != 0);
        hw_init::gpio_write(pins::LCD_D6_GPIO, nibble & 0x04 != 0);
        hw_init::gpio_write(pins::LCD_D7_GPIO, nibble & 0x08 != 0);

        // Latch on the falling edge of E (min pulse width 450ns).
        hw_init::gpio_write(pins::LCD_EN_GPIO, true);
        delay_us(1);
        hw_init::gpio_write(pins::LCD_EN_GPIO, false);
        delay_us(1);
    }
}

impl Default for Lcd {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
fn delay_us(us: u32) {
    // SAFETY: esp_rom_delay_us busy-waits; safe from the main task.
    unsafe { esp_idf_svc::sys::esp_rom_delay_us(us) };
}

#[cfg(not(target_os = "espidf"))]
fn delay_us(_us: u32) {}
