//! Mock hardware adapter for integration tests.
//!
//! Serves fixed raw inputs per channel and records every output call so
//! tests can assert on the full command history without touching real
//! GPIO or I2C.

use std::collections::{HashMap, HashSet};

use embedded_hal::delay::DelayNs;
use groundcheck::app::events::AppEvent;
use groundcheck::app::ports::{AlarmPort, AnalogPort, BusVoltagePort, DisplayPort, EventSink};
use groundcheck::config::TesterConfig;
use groundcheck::error::{ActuatorError, Error, SensorError};
use groundcheck::policy::Alarm;
use groundcheck::sensors::AnalogChannel;

// ── Input / output records ────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Analog(AnalogChannel),
    Bus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputCall {
    SetAlarm { alarm: Alarm, on: bool },
    Clear,
    ShowRow { row: u8, text: String },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub raw: HashMap<AnalogChannel, u16>,
    pub failing: HashSet<AnalogChannel>,
    pub bus: Result<i16, SensorError>,
    pub broken_alarm: Option<Alarm>,
    pub reads: Vec<Input>,
    pub calls: Vec<OutputCall>,
}

#[allow(dead_code)]
impl MockHardware {
    /// Inputs for a healthy bench setup under [`linear_config`]:
    /// I1 = 0.1 A, I2 = 0.002 A, Vbus = 1.5 V, continuity intact.
    pub fn bench() -> Self {
        let raw = HashMap::from([
            (AnalogChannel::ResistivityCurrent, 100),
            (AnalogChannel::LeakageCurrent, 2),
            (AnalogChannel::Continuity, 800),
        ]);
        Self {
            raw,
            failing: HashSet::new(),
            bus: Ok(500),
            broken_alarm: None,
            reads: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn set_raw(&mut self, channel: AnalogChannel, raw: u16) {
        self.raw.insert(channel, raw);
    }

    /// Last level written to `alarm`, if any.
    pub fn alarm_level(&self, alarm: Alarm) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::SetAlarm { alarm: a, on } if *a == alarm => Some(*on),
            _ => None,
        })
    }

    /// Text last written to `row`.
    pub fn row_text(&self, row: u8) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::ShowRow { row: r, text } if *r == row => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
        self.reads.clear();
    }
}

impl AnalogPort for MockHardware {
    fn read_raw(&mut self, channel: AnalogChannel) -> Result<u16, SensorError> {
        self.reads.push(Input::Analog(channel));
        if self.failing.contains(&channel) {
            return Err(SensorError::AdcReadFailed(channel));
        }
        Ok(self.raw.get(&channel).copied().unwrap_or(0))
    }
}

impl BusVoltagePort for MockHardware {
    fn read_bus_raw(&mut self) -> Result<i16, SensorError> {
        self.reads.push(Input::Bus);
        self.bus
    }
}

impl AlarmPort for MockHardware {
    fn set_alarm(&mut self, alarm: Alarm, on: bool) -> Result<(), Error> {
        if self.broken_alarm == Some(alarm) {
            return Err(ActuatorError::GpioWriteFailed(alarm).into());
        }
        self.calls.push(OutputCall::SetAlarm { alarm, on });
        Ok(())
    }
}

impl DisplayPort for MockHardware {
    fn clear(&mut self) -> Result<(), Error> {
        self.calls.push(OutputCall::Clear);
        Ok(())
    }

    fn show_row(&mut self, row: u8, text: &str) -> Result<(), Error> {
        self.calls.push(OutputCall::ShowRow {
            row,
            text: text.to_owned(),
        });
        Ok(())
    }
}

// ── Recording delay ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Config helpers ────────────────────────────────────────────

/// Calibration where one raw count is exactly 1 mA, so test inputs map
/// to round currents.
pub fn linear_config() -> TesterConfig {
    TesterConfig {
        adc_reference_mv: 1023.0,
        sensor_zero_point_mv: 0.0,
        sensitivity_mv_per_a: 1000.0,
        offset_current_a: 0.0,
        ..TesterConfig::default()
    }
}
