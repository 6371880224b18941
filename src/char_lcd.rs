//! A driver for HD44780-compatible character LCDs behind a PCF8574 I2C backpack.
//!
//! Generic over any blocking `embedded-hal` I2C bus and any async delay, so the same driver runs
//! on the Pico's shared I2C0 and against a recording bus in host tests.

use embedded_hal::i2c::I2c;
use embedded_hal_async::delay::DelayNs;

use crate::panel::TextPanel;

/// The usual PCF8574 backpack address. Some boards use 0x3F.
pub const CHAR_LCD_ADDRESS: u8 = 0x27;

// PCF8574 pin mapping: P0=RS, P1=RW, P2=E, P3=Backlight, P4-P7=Data
pub const LCD_BACKLIGHT: u8 = 0x08;
pub const LCD_ENABLE: u8 = 0x04;
pub const LCD_RS: u8 = 0x01;

const CLEAR_DISPLAY: u8 = 0x01;
const ENTRY_MODE_INCREMENT: u8 = 0x06;
const DISPLAY_ON: u8 = 0x0C;
const FUNCTION_4BIT_2LINE: u8 = 0x28;
const SET_DDRAM_ADDRESS: u8 = 0x80;

/// An HD44780 in 4-bit mode. Call [`CharLcd::init`] once before anything else.
pub struct CharLcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> CharLcd<I2C, D> {
    /// Use the default backpack address (0x27).
    #[must_use]
    pub const fn new(i2c: I2C, delay: D) -> Self {
        Self::new_with_address(i2c, delay, CHAR_LCD_ADDRESS)
    }

    #[must_use]
    pub const fn new_with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Give back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Power-on sequence: force 4-bit mode, then two lines, display on, cleared, cursor
    /// moving right.
    pub async fn init(&mut self) {
        self.delay.delay_ms(50).await;

        self.write_nibble(0x03, false).await;
        self.delay.delay_ms(5).await;
        self.write_nibble(0x03, false).await;
        self.delay.delay_us(150).await;
        self.write_nibble(0x03, false).await;
        self.write_nibble(0x02, false).await;

        self.write_byte(FUNCTION_4BIT_2LINE, false).await;
        self.write_byte(DISPLAY_ON, false).await;
        self.write_byte(CLEAR_DISPLAY, false).await;
        self.delay.delay_ms(2).await;
        self.write_byte(ENTRY_MODE_INCREMENT, false).await;
    }

    // Bus errors are dropped; a missing display must not stop the dispenser.
    async fn write_nibble(&mut self, nibble: u8, rs: bool) {
        let rs_bit = if rs { LCD_RS } else { 0 };
        let data = (nibble << 4) | LCD_BACKLIGHT | rs_bit;

        let _ = self.i2c.write(self.address, &[data | LCD_ENABLE]);
        self.delay.delay_us(1).await;

        let _ = self.i2c.write(self.address, &[data]);
        self.delay.delay_us(50).await;
    }

    async fn write_byte(&mut self, byte: u8, rs: bool) {
        self.write_nibble(byte >> 4, rs).await;
        self.write_nibble(byte & 0x0F, rs).await;
    }
}

/// DDRAM address of the first column of each row (20x4 layout; 16x2 uses the first two).
const fn row_offset(row: u8) -> u8 {
    match row {
        1 => 0x40,
        2 => 0x14,
        3 => 0x54,
        _ => 0x00,
    }
}

impl<I2C: I2c, D: DelayNs> TextPanel for CharLcd<I2C, D> {
    async fn clear(&mut self) {
        self.write_byte(CLEAR_DISPLAY, false).await;
        self.delay.delay_ms(2).await;
    }

    async fn set_cursor(&mut self, column: u8, row: u8) {
        let address = row_offset(row).wrapping_add(column);
        self.write_byte(SET_DDRAM_ADDRESS | address, false).await;
    }

    async fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            self.write_byte(byte, true).await;
        }
    }
}
