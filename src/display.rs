//! Status display layout.
//!
//! Renders one cycle's measurements as four fixed-width rows for the
//! 16x4 LCD.  Every row is exactly [`LCD_COLS`] characters: shorter text
//! is space padded so nothing from a longer previous value survives, and
//! longer text is cut at the panel edge.  Rows live in `heapless`
//! strings, so rendering never allocates.
//!
//! ```text
//! Rho 47.124 Ohm.m
//! Rg 249.568 Ohm
//! Ileak 0.002 A
//! Continuous
//! ```

use core::fmt::{self, Write};

use heapless::String;

use crate::drivers::lcd::{LCD_COLS, LCD_ROWS};
use crate::error::Error;
use crate::measurement::{Measurements, Reading};
use crate::policy::{AlarmPolicy, ContinuityStatus};

pub type Row = String<LCD_COLS>;

/// Value text for a quantity that has no measured value.
pub const UNDEFINED_TEXT: &str = "UNDEFINED";
/// Value text for a quantity whose input could not be read.
pub const SENSOR_FAULT_TEXT: &str = "SENSOR ERR";

/// Four rendered LCD rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFrame {
    rows: [Row; LCD_ROWS],
}

impl DisplayFrame {
    pub fn rows(&self) -> &[Row; LCD_ROWS] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(Row::as_str)
    }
}

/// Lay out `m` for the LCD.  Continuity text follows `policy` so the
/// panel always agrees with the continuity buzzer.
pub fn format_frame(m: &Measurements, policy: &AlarmPolicy) -> DisplayFrame {
    let continuity = match m.continuity_raw {
        Ok(raw) => match policy.continuity_status(raw) {
            ContinuityStatus::Continuous => fit(format_args!("Continuous")),
            ContinuityStatus::Discontinuous => fit(format_args!("Discontinuous")),
        },
        Err(e) => fit(format_args!("Cont {}", fault_text(&e))),
    };

    DisplayFrame {
        rows: [
            value_row("Rho", &m.resistivity_ohm_m, "Ohm.m"),
            value_row("Rg", &m.earth_resistance_ohm, "Ohm"),
            value_row("Ileak", &m.leakage_current_a, "A"),
            continuity,
        ],
    }
}

/// Shown while the peripherals settle at boot.
pub fn splash_row() -> Row {
    fit(format_args!("Initializing..."))
}

fn value_row(label: &str, reading: &Reading, unit: &str) -> Row {
    match reading {
        Ok(value) => fit(format_args!("{label} {value:.3} {unit}")),
        Err(e) => fit(format_args!("{label} {}", fault_text(e))),
    }
}

fn fault_text(e: &Error) -> &'static str {
    if e.is_sensor_fault() {
        SENSOR_FAULT_TEXT
    } else {
        UNDEFINED_TEXT
    }
}

/// Render `args` into exactly one panel row.
fn fit(args: fmt::Arguments<'_>) -> Row {
    let mut row = Row::new();
    // Truncation is not an error here, so the result is always Ok.
    let _ = Truncate(&mut row).write_fmt(args);
    while row.push(' ').is_ok() {}
    row
}

/// `fmt::Write` that drops whatever does not fit instead of failing.
struct Truncate<'a>(&'a mut Row);

impl Write for Truncate<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            let ch = if ch.is_ascii() { ch } else { '?' };
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}
