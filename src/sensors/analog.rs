//! Built-in ADC front end for the two ACS712 current sensors and the
//! continuity probe.
//!
//! Presents every channel at the resolution named by
//! `TesterConfig::adc_full_scale`, so thresholds expressed in raw counts
//! stay meaningful whatever the native ADC width is.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init)
//! and rescales the native 12-bit count.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use crate::app::ports::AnalogPort;
use crate::error::SensorError;

use super::AnalogChannel;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Native full-scale count of the ESP32-S3 SAR ADC (12-bit).
#[cfg(target_os = "espidf")]
const NATIVE_FULL_SCALE: u32 = 4095;

#[cfg(not(target_os = "espidf"))]
static SIM_RAW: [AtomicU16; 3] = [AtomicU16::new(512), AtomicU16::new(512), AtomicU16::new(1023)];
#[cfg(not(target_os = "espidf"))]
static SIM_FAIL: [AtomicBool; 3] = [AtomicBool::new(false), AtomicBool::new(false), AtomicBool::new(false)];

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_raw(channel: AnalogChannel, raw: u16) {
    SIM_RAW[channel.index()].store(raw, Ordering::Relaxed);
}

/// Make every subsequent read on `channel` fail until cleared.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_failing(channel: AnalogChannel, failing: bool) {
    SIM_FAIL[channel.index()].store(failing, Ordering::Relaxed);
}

pub struct AnalogFrontEnd {
    full_scale: u16,
}

impl AnalogFrontEnd {
    pub fn new(full_scale: u16) -> Self {
        Self { full_scale }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self, channel: AnalogChannel) -> Result<u16, SensorError> {
        let adc_channel = match channel {
            AnalogChannel::ResistivityCurrent => hw_init::ADC1_CH_RESISTIVITY,
            AnalogChannel::LeakageCurrent => hw_init::ADC1_CH_LEAKAGE,
            AnalogChannel::Continuity => hw_init::ADC1_CH_CONTINUITY,
        };
        let native = hw_init::adc1_read(adc_channel).map_err(|rc| {
            log::warn!("ADC1 CH{} read failed (rc={})", adc_channel, rc);
            SensorError::AdcReadFailed(channel)
        })?;
        Ok((u32::from(native) * u32::from(self.full_scale) / NATIVE_FULL_SCALE) as u16)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self, channel: AnalogChannel) -> Result<u16, SensorError> {
        if SIM_FAIL[channel.index()].load(Ordering::Relaxed) {
            return Err(SensorError::AdcReadFailed(channel));
        }
        Ok(SIM_RAW[channel.index()].load(Ordering::Relaxed))
    }
}

impl AnalogPort for AnalogFrontEnd {
    fn read_raw(&mut self, channel: AnalogChannel) -> Result<u16, SensorError> {
        let raw = self.read_adc(channel)?;
        if raw > self.full_scale {
            return Err(SensorError::OutOfRange(channel));
        }
        Ok(raw)
    }
}
