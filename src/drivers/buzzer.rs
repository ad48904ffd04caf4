//! Piezo alarm buzzer driver.
//!
//! One active-HIGH output per alarm.  The driver is a dumb actuator: the
//! alarm policy decides, this module only drives the line and remembers
//! what it last commanded.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;
use crate::policy::Alarm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding,
}

pub struct Buzzer<P> {
    alarm: Alarm,
    pin: P,
    state: BuzzerState,
}

impl<P: OutputPin> Buzzer<P> {
    pub fn new(alarm: Alarm, pin: P) -> Self {
        Self {
            alarm,
            pin,
            state: BuzzerState::Silent,
        }
    }

    /// Drive the line.  Written every call, even if the level is unchanged.
    pub fn set(&mut self, sounding: bool) -> Result<(), ActuatorError> {
        let result = if sounding {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ActuatorError::GpioWriteFailed(self.alarm))?;
        self.state = if sounding {
            BuzzerState::Sounding
        } else {
            BuzzerState::Silent
        };
        Ok(())
    }

    pub fn silence(&mut self) -> Result<(), ActuatorError> {
        self.set(false)
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        self.state == BuzzerState::Sounding
    }
}
