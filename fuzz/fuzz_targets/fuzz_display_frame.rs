//! Fuzz target: `display::format_frame`
//!
//! Decodes arbitrary bytes into a cycle's measurements (raw f32 bit
//! patterns included, so NaN, inf and subnormals all show up) and asserts
//! that every rendered row is exactly one panel width of printable ASCII.
//!
//! cargo fuzz run fuzz_display_frame

#![no_main]

use groundcheck::config::TesterConfig;
use groundcheck::display::format_frame;
use groundcheck::drivers::lcd::LCD_COLS;
use groundcheck::error::{Error, MeasurementError, SensorError};
use groundcheck::measurement::{Measurements, Reading};
use groundcheck::policy::AlarmPolicy;
use libfuzzer_sys::fuzz_target;

/// Tag byte picks the variant, the next four bytes are the value.
fn reading(chunk: &[u8]) -> Reading {
    let mut bits = [0u8; 4];
    bits.copy_from_slice(&chunk[1..5]);
    match chunk[0] % 3 {
        0 => Err(Error::Measurement(MeasurementError::ZeroExcitationCurrent)),
        1 => Err(Error::Sensor(SensorError::BusReadFailed)),
        _ => Ok(f32::from_le_bytes(bits)),
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 28 {
        return;
    }
    let mut chunks = data.chunks_exact(5);
    let mut next = || chunks.next().map(reading).unwrap_or(Ok(0.0));
    let m = Measurements {
        resistivity_current_a: next(),
        leakage_current_a: next(),
        bus_voltage_v: next(),
        resistivity_ohm_m: next(),
        earth_resistance_ohm: next(),
        continuity_raw: if data[25] & 1 == 0 {
            Ok(u16::from_le_bytes([data[26], data[27]]))
        } else {
            Err(Error::Sensor(SensorError::BusTimeout))
        },
    };

    let frame = format_frame(&m, &AlarmPolicy::new(&TesterConfig::default()));
    for row in frame.rows() {
        assert_eq!(row.len(), LCD_COLS, "row not panel width: {:?}", row);
        assert!(row.bytes().all(|b| (0x20..0x7f).contains(&b)));
    }
});
