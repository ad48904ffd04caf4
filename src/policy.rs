//! Threshold alarm policy.
//!
//! Each buzzer is a pure function of the current cycle's measurements.
//! There is no latching and no hysteresis: the same inputs always give
//! the same outputs, and a fault clears the moment its input recovers.
//!
//! Polarity per alarm:
//!
//! | Alarm            | Sounds when                      |
//! |------------------|----------------------------------|
//! | Leakage          | \|I2\| > leakage threshold       |
//! | Earth resistance | R >= earth threshold             |
//! | Continuity       | raw < continuity threshold       |
//!
//! A faulted, undefined or NaN input sounds its alarm.

use core::fmt;

use crate::config::TesterConfig;
use crate::measurement::{Measurements, Reading};

/// The three alarm outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alarm {
    Leakage,
    Continuity,
    EarthResistance,
}

impl Alarm {
    pub const ALL: [Self; 3] = [Self::Leakage, Self::Continuity, Self::EarthResistance];
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leakage => write!(f, "leakage"),
            Self::Continuity => write!(f, "continuity"),
            Self::EarthResistance => write!(f, "earth resistance"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuityStatus {
    Continuous,
    Discontinuous,
}

/// Commanded level of every alarm for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmStates {
    pub leakage: bool,
    pub continuity: bool,
    pub earth_resistance: bool,
}

impl AlarmStates {
    pub fn get(&self, alarm: Alarm) -> bool {
        match alarm {
            Alarm::Leakage => self.leakage,
            Alarm::Continuity => self.continuity,
            Alarm::EarthResistance => self.earth_resistance,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AlarmPolicy {
    leakage_threshold_a: f32,
    earth_resistance_threshold_ohm: f32,
    continuity_threshold_raw: u16,
}

impl AlarmPolicy {
    pub fn new(config: &TesterConfig) -> Self {
        Self {
            leakage_threshold_a: config.leakage_threshold_a,
            earth_resistance_threshold_ohm: config.earth_resistance_threshold_ohm,
            continuity_threshold_raw: config.continuity_threshold_raw,
        }
    }

    /// A reading exactly at the threshold counts as continuous.
    pub fn continuity_status(&self, raw: u16) -> ContinuityStatus {
        if raw < self.continuity_threshold_raw {
            ContinuityStatus::Discontinuous
        } else {
            ContinuityStatus::Continuous
        }
    }

    pub fn leakage_alarm(&self, leakage_current_a: &Reading) -> bool {
        match leakage_current_a {
            Ok(amps) => amps.is_nan() || amps.abs() > self.leakage_threshold_a,
            Err(_) => true,
        }
    }

    pub fn earth_resistance_alarm(&self, earth_resistance_ohm: &Reading) -> bool {
        match earth_resistance_ohm {
            Ok(ohms) => ohms.is_nan() || *ohms >= self.earth_resistance_threshold_ohm,
            Err(_) => true,
        }
    }

    pub fn continuity_alarm(&self, continuity_raw: &Reading<u16>) -> bool {
        match continuity_raw {
            Ok(raw) => self.continuity_status(*raw) == ContinuityStatus::Discontinuous,
            Err(_) => true,
        }
    }

    pub fn evaluate(&self, m: &Measurements) -> AlarmStates {
        AlarmStates {
            leakage: self.leakage_alarm(&m.leakage_current_a),
            continuity: self.continuity_alarm(&m.continuity_raw),
            earth_resistance: self.earth_resistance_alarm(&m.earth_resistance_ohm),
        }
    }
}
