//! Per-cycle measurement record.
//!
//! Every quantity is a `Result`: a faulted or undefined value is carried
//! through the cycle as an error, never as a zero or a NaN.  The record is
//! built fresh by each cycle and dropped at the end of it.

use core::fmt;

use crate::error::Error;

/// A measured or derived value, or the reason it has none this cycle.
pub type Reading<T = f32> = Result<T, Error>;

/// Everything one cycle measured and derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    /// Averaged excitation-loop current I1 (A).
    pub resistivity_current_a: Reading,
    /// Averaged protective-earth leakage current I2 (A).
    pub leakage_current_a: Reading,
    /// Bus voltage from the external ADC (V, non-negative).
    pub bus_voltage_v: Reading,
    /// Soil resistivity (Ohm·m).
    pub resistivity_ohm_m: Reading,
    /// Earth resistance (Ohm).
    pub earth_resistance_ohm: Reading,
    /// Raw continuity probe count.
    pub continuity_raw: Reading<u16>,
}

/// Names each field of [`Measurements`] for fault reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    ResistivityCurrent,
    LeakageCurrent,
    BusVoltage,
    Resistivity,
    EarthResistance,
    Continuity,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResistivityCurrent => write!(f, "I1"),
            Self::LeakageCurrent => write!(f, "I2"),
            Self::BusVoltage => write!(f, "Vbus"),
            Self::Resistivity => write!(f, "rho"),
            Self::EarthResistance => write!(f, "Rg"),
            Self::Continuity => write!(f, "continuity"),
        }
    }
}

impl Measurements {
    /// Every quantity that has no value this cycle, in pipeline order.
    pub fn faults(&self) -> impl Iterator<Item = (Quantity, Error)> {
        [
            (Quantity::ResistivityCurrent, self.resistivity_current_a.err()),
            (Quantity::LeakageCurrent, self.leakage_current_a.err()),
            (Quantity::BusVoltage, self.bus_voltage_v.err()),
            (Quantity::Resistivity, self.resistivity_ohm_m.err()),
            (Quantity::EarthResistance, self.earth_resistance_ohm.err()),
            (Quantity::Continuity, self.continuity_raw.err()),
        ]
        .into_iter()
        .filter_map(|(quantity, error)| error.map(|e| (quantity, e)))
    }
}
