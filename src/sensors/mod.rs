//! Sensor subsystem — analog front end, current sampler, bus-voltage ADC.
//!
//! Raw counts come in through [`AnalogPort`](crate::app::ports::AnalogPort)
//! and [`BusVoltagePort`](crate::app::ports::BusVoltagePort); the modules
//! here turn them into amps and volts.

pub mod analog;
pub mod bus_voltage;
pub mod current;

use core::fmt;

/// Built-in ADC inputs of the tester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalogChannel {
    /// ACS712 in the earth-test excitation loop (I1).
    ResistivityCurrent,
    /// ACS712 on the protective-earth conductor (I2).
    LeakageCurrent,
    /// Continuity probe divider.
    Continuity,
}

impl AnalogChannel {
    /// Slot in the host simulation tables.
    #[cfg(not(target_os = "espidf"))]
    pub(crate) fn index(self) -> usize {
        match self {
            Self::ResistivityCurrent => 0,
            Self::LeakageCurrent => 1,
            Self::Continuity => 2,
        }
    }
}

impl fmt::Display for AnalogChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResistivityCurrent => write!(f, "resistivity current"),
            Self::LeakageCurrent => write!(f, "leakage current"),
            Self::Continuity => write!(f, "continuity"),
        }
    }
}
