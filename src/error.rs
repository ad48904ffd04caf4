//! Unified error types for the GroundCheck firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the cycle
//! orchestrator can carry a fault per measured quantity without caring
//! where it came from.  All variants are `Copy` and allocation-free: a
//! faulted reading is just a `Result<f32, Error>` that lives for one cycle.

use core::fmt;

use crate::drivers::hw_init::HwInitError;
use crate::sensors::AnalogChannel;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An input could not be read or returned an impossible value.
    Sensor(SensorError),
    /// A derived quantity has no defined value this cycle.
    Measurement(MeasurementError),
    /// An alarm output could not be driven.
    Actuator(ActuatorError),
    /// The LCD could not be written.
    Display(DisplayError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl Error {
    /// True for faults caused by an unreadable input rather than by the
    /// arithmetic on valid inputs.
    pub fn is_sensor_fault(&self) -> bool {
        matches!(self, Self::Sensor(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Measurement(e) => write!(f, "measurement: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Built-in ADC read returned an error on this channel.
    AdcReadFailed(AnalogChannel),
    /// Built-in ADC returned a count above its full scale.
    OutOfRange(AnalogChannel),
    /// I2C transfer to the external ADC failed.
    BusReadFailed,
    /// External ADC never reported a finished conversion.
    BusTimeout,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed(ch) => write!(f, "ADC read failed on {ch}"),
            Self::OutOfRange(ch) => write!(f, "reading out of range on {ch}"),
            Self::BusReadFailed => write!(f, "ADS1015 I2C transfer failed"),
            Self::BusTimeout => write!(f, "ADS1015 conversion timed out"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Measurement errors
// ---------------------------------------------------------------------------

/// A derived quantity that cannot be given a meaningful value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementError {
    /// Excitation current is zero (or below the configured minimum), so
    /// V / I has no finite value.
    ZeroExcitationCurrent,
    /// The formula produced inf or NaN from its inputs.
    NonFinite,
    /// Resistivity came out zero or negative.
    NonPositiveResistivity,
}

impl fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroExcitationCurrent => write!(f, "excitation current too small"),
            Self::NonFinite => write!(f, "non-finite result"),
            Self::NonPositiveResistivity => write!(f, "resistivity not positive"),
        }
    }
}

impl From<MeasurementError> for Error {
    fn from(e: MeasurementError) -> Self {
        Self::Measurement(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO write to a buzzer failed.
    GpioWriteFailed(crate::policy::Alarm),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed(alarm) => write!(f, "GPIO write failed for {alarm} buzzer"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// A control or data line of the LCD bus could not be driven.
    BusWriteFailed,
    /// Row index beyond the panel geometry.
    RowOutOfRange(u8),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusWriteFailed => write!(f, "LCD bus write failed"),
            Self::RowOutOfRange(row) => write!(f, "row {row} out of range"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(_) => Self::Init("ADC1 oneshot init failed"),
            HwInitError::GpioConfigFailed(_) => Self::Init("GPIO output config failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
