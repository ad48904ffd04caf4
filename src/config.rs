//! Tester configuration parameters
//!
//! Calibration constants, electrode/rod geometry, alarm thresholds and
//! timing for the GroundCheck tester.  Built once at boot and passed by
//! reference into the sampler, calculator and alarm policy; nothing
//! mutates it afterwards.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core tester configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TesterConfig {
    // --- Sampling ---
    /// Raw readings averaged per current measurement
    pub samples_per_reading: u8,
    /// Settling delay between raw readings (milliseconds)
    pub sample_interval_ms: u32,

    // --- Timing ---
    /// Sleep between measurement cycles (milliseconds)
    pub cycle_interval_ms: u32,
    /// How long the boot splash stays on the LCD (milliseconds)
    pub splash_duration_ms: u32,
    /// Telemetry report interval (cycles)
    pub telemetry_interval_cycles: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,

    // --- Analog front end (built-in ADC + ACS712) ---
    /// Highest raw count the built-in ADC can return
    pub adc_full_scale: u16,
    /// ADC reference voltage (mV)
    pub adc_reference_mv: f32,
    /// ACS712 output at zero current (mV)
    pub sensor_zero_point_mv: f32,
    /// ACS712 sensitivity (mV per A)
    pub sensitivity_mv_per_a: f32,
    /// Measured standing offset subtracted from every sample (A)
    pub offset_current_a: f32,

    // --- External ADC (ADS1015) ---
    /// Volts per ADS1015 count at the configured PGA range
    pub bus_volts_per_count: f32,

    // --- Geometry ---
    /// Distance between test electrodes (m)
    pub electrode_spacing_m: f32,
    /// Ground rod length (m)
    pub rod_length_m: f32,
    /// Ground rod diameter (m)
    pub rod_diameter_m: f32,
    /// Excitation current magnitude below which resistivity is undefined (A).
    /// Never taken lower than one ADC step of the current sensor.
    pub min_excitation_current_a: f32,

    // --- Alarm thresholds ---
    /// Leakage current magnitude that sounds the leakage alarm (A)
    pub leakage_threshold_a: f32,
    /// Earth resistance at or above which the earth alarm sounds (Ohm)
    pub earth_resistance_threshold_ohm: f32,
    /// Raw continuity reading below which the path counts as broken
    pub continuity_threshold_raw: u16,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            // Sampling
            samples_per_reading: 10,
            sample_interval_ms: 10, // 100 ms settling per channel

            // Timing
            cycle_interval_ms: 1000, // 1 Hz refresh
            splash_duration_ms: 1000,
            telemetry_interval_cycles: 10,
            watchdog_timeout_ms: 10_000,

            // Analog front end (10-bit ADC, 5 V reference, ACS712-05B)
            adc_full_scale: 1023,
            adc_reference_mv: 5000.0,
            sensor_zero_point_mv: 2500.0,
            sensitivity_mv_per_a: 100.0,
            offset_current_a: 0.024,

            // ADS1015 at PGA ±6.144 V
            bus_volts_per_count: 0.003,

            // Geometry
            electrode_spacing_m: 0.5,
            rod_length_m: 0.15,   // 15 cm
            rod_diameter_m: 0.003, // 0.3 cm
            min_excitation_current_a: 0.05, // ~one ADC step plus offset noise

            // Thresholds
            leakage_threshold_a: 0.01,
            earth_resistance_threshold_ohm: 2.0,
            continuity_threshold_raw: 500,
        }
    }
}

impl TesterConfig {
    /// Worst-case duration of one full cycle (ms): two sampled channels
    /// plus the inter-cycle sleep.
    pub fn cycle_budget_ms(&self) -> u32 {
        2 * u32::from(self.samples_per_reading) * self.sample_interval_ms + self.cycle_interval_ms
    }

    /// Reject values that would make the measurement formulas meaningless.
    pub fn validate(&self) -> Result<(), Error> {
        if self.samples_per_reading == 0 {
            return Err(Error::Config("samples_per_reading must be at least 1"));
        }
        if self.adc_full_scale == 0 {
            return Err(Error::Config("adc_full_scale must be non-zero"));
        }
        if !(self.adc_reference_mv > 0.0) {
            return Err(Error::Config("adc_reference_mv must be positive"));
        }
        if !(self.sensitivity_mv_per_a > 0.0) {
            return Err(Error::Config("sensitivity_mv_per_a must be positive"));
        }
        if !(self.bus_volts_per_count > 0.0) {
            return Err(Error::Config("bus_volts_per_count must be positive"));
        }
        if !(self.electrode_spacing_m > 0.0) {
            return Err(Error::Config("electrode_spacing_m must be positive"));
        }
        if !(self.rod_length_m > 0.0) || !(self.rod_diameter_m > 0.0) {
            return Err(Error::Config("rod geometry must be positive"));
        }
        // ln(8L/d) - 1 must stay positive or earth resistance flips sign.
        if !(8.0 * self.rod_length_m / self.rod_diameter_m > core::f32::consts::E) {
            return Err(Error::Config("rod too short for its diameter (8L/d must exceed e)"));
        }
        if !(self.min_excitation_current_a > 0.0) {
            return Err(Error::Config("min_excitation_current_a must be positive"));
        }
        if !(self.leakage_threshold_a >= 0.0) || !(self.earth_resistance_threshold_ohm >= 0.0) {
            return Err(Error::Config("alarm thresholds must be non-negative"));
        }
        if self.continuity_threshold_raw > self.adc_full_scale {
            return Err(Error::Config("continuity_threshold_raw exceeds ADC full scale"));
        }
        if self.cycle_interval_ms == 0 || self.telemetry_interval_cycles == 0 {
            return Err(Error::Config("cycle and telemetry intervals must be non-zero"));
        }
        if self.watchdog_timeout_ms <= self.cycle_budget_ms() {
            return Err(Error::Config("watchdog_timeout_ms must exceed one full cycle"));
        }
        Ok(())
    }
}
