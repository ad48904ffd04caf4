//! Soil resistivity and earth resistance.
//!
//! Wenner four-electrode resistivity, then the single driven-rod formula:
//!
//! ```text
//! rho = 2 * pi * a * V / I1
//! R   = rho / (2 * pi * L) * (ln(8L / d) - 1)
//! ```
//!
//! Both are pure functions of their inputs and the fixed geometry.  An
//! excitation current too small to divide by, a resistivity that is not
//! positive, or any non-finite result is an explicit [`MeasurementError`]
//! rather than a number.

use core::f32::consts::PI;

use crate::config::TesterConfig;
use crate::error::MeasurementError;
use crate::sensors::current::Calibration;

#[derive(Debug, Clone, Copy)]
pub struct Calculator {
    electrode_spacing_m: f32,
    rod_length_m: f32,
    rod_diameter_m: f32,
    min_excitation_current_a: f32,
}

impl Calculator {
    pub fn new(config: &TesterConfig) -> Self {
        Self {
            electrode_spacing_m: config.electrode_spacing_m,
            rod_length_m: config.rod_length_m,
            rod_diameter_m: config.rod_diameter_m,
            // An average can never resolve less than one ADC step.
            min_excitation_current_a: config
                .min_excitation_current_a
                .max(Calibration::from_config(config).amps_per_count()),
        }
    }

    /// Soil resistivity (Ohm·m) from the bus voltage and excitation current.
    ///
    /// Soil cannot have zero or negative resistivity.  Such a result means
    /// a reversed clamp or an open loop, and is undefined rather than a
    /// low reading that would pass as good grounding.
    pub fn compute_resistivity(
        &self,
        voltage_v: f32,
        current1_a: f32,
    ) -> Result<f32, MeasurementError> {
        if current1_a.is_nan() || current1_a.abs() < self.min_excitation_current_a {
            return Err(MeasurementError::ZeroExcitationCurrent);
        }
        let rho = finite(2.0 * PI * self.electrode_spacing_m * (voltage_v / current1_a))?;
        if rho <= 0.0 {
            return Err(MeasurementError::NonPositiveResistivity);
        }
        Ok(rho)
    }

    /// Smallest excitation current magnitude accepted as a divisor (A).
    pub fn min_excitation_current_a(&self) -> f32 {
        self.min_excitation_current_a
    }

    /// Earth resistance (Ohm) of the driven rod for a given resistivity.
    pub fn compute_earth_resistance(&self, resistivity_ohm_m: f32) -> Result<f32, MeasurementError> {
        finite(resistivity_ohm_m / (2.0 * PI * self.rod_length_m) * self.shape_factor())
    }

    /// `ln(8L/d) - 1` for the configured rod.
    pub fn shape_factor(&self) -> f32 {
        (8.0 * self.rod_length_m / self.rod_diameter_m).ln() - 1.0
    }
}

fn finite(value: f32) -> Result<f32, MeasurementError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MeasurementError::NonFinite)
    }
}
