//! HD44780 character LCD driver (16x4, 4-bit parallel bus).
//!
//! Write-only: R/W is tied to ground, so every command is followed by a
//! fixed delay instead of a busy-flag poll.  The 16x4 panel maps its rows
//! onto DDRAM at 0x00, 0x40, 0x10, 0x50.
//!
//! Generic over [`OutputPin`] and [`DelayNs`] so the bus timing can be
//! checked on the host with recording pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::DisplayError;

pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: usize = 4;

const ROW_OFFSETS: [u8; LCD_ROWS] = [0x00, 0x40, LCD_COLS as u8, 0x40 + LCD_COLS as u8];

// Instruction set
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CONTROL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM_ADDR: u8 = 0x80;

// Flags
const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const TWO_LINE: u8 = 0x08;

pub struct Lcd<P, D> {
    rs: P,
    en: P,
    /// D4..D7, least significant bit first.
    data: [P; 4],
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Lcd<P, D> {
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self { rs, en, data, delay }
    }

    /// Power-on initialisation by instruction (datasheet figure 24).
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Wait for Vcc to rise above 2.7 V.
        self.delay.delay_ms(50);
        drive(&mut self.rs, false)?;
        drive(&mut self.en, false)?;

        // Three 8-bit function sets force a known state, then switch to 4-bit.
        self.write_nibble(0x03)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x03)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02)?;

        self.command(CMD_FUNCTION_SET | TWO_LINE)?;
        self.command(CMD_DISPLAY_CONTROL | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        let offset = ROW_OFFSETS
            .get(usize::from(row))
            .ok_or(DisplayError::RowOutOfRange(row))?;
        let col = col.min(LCD_COLS as u8 - 1);
        self.command(CMD_SET_DDRAM_ADDR | (offset + col))
    }

    /// Characters outside printable ASCII are shown as `?`.
    pub fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
            self.send(byte, true)?;
        }
        Ok(())
    }

    /// Write `text` from column 0 of `row`.
    pub fn show_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        self.set_cursor(0, row)?;
        self.write_str(text)
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, false)
    }

    fn send(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError> {
        drive(&mut self.rs, is_data)?;
        self.write_nibble(value >> 4)?;
        self.write_nibble(value & 0x0F)
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            drive(pin, (nibble >> bit) & 1 != 0)?;
        }
        self.pulse_enable()
    }

    fn pulse_enable(&mut self) -> Result<(), DisplayError> {
        drive(&mut self.en, false)?;
        self.delay.delay_us(1);
        drive(&mut self.en, true)?;
        // Enable pulse must be >450 ns.
        self.delay.delay_us(1);
        drive(&mut self.en, false)?;
        // Commands need >37 us to settle.
        self.delay.delay_us(100);
        Ok(())
    }
}

fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), DisplayError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| DisplayError::BusWriteFailed)
}
