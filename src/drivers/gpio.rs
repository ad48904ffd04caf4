//! `embedded-hal` output pin over a raw GPIO number.
//!
//! Lets the LCD and buzzer drivers stay generic over [`OutputPin`] while
//! the board keeps its numeric pin map in [`crate::pins`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes through `gpio_set_level` via hw_init.
//! On host/test: every write succeeds and goes nowhere.

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};

use crate::drivers::hw_init;

/// ESP-IDF return code from a failed `gpio_set_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A GPIO already configured as an output by `hw_init::init_peripherals`.
pub struct GpioOutput {
    pin: i32,
}

impl GpioOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }

    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        hw_init::gpio_write(self.pin, high).map_err(GpioError)
    }
}

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}
