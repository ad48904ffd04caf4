//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the analog front end, the ADS1015, the LCD and the three buzzers,
//! exposing them through [`AnalogPort`], [`BusVoltagePort`], [`AlarmPort`]
//! and [`DisplayPort`].  This is the only module in the system that
//! holds peripherals; the service borrows it mutably for one cycle at a
//! time.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::ports::{AlarmPort, AnalogPort, BusVoltagePort, DisplayPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::lcd::Lcd;
use crate::error::{Error, SensorError};
use crate::policy::Alarm;
use crate::sensors::AnalogChannel;

/// Concrete adapter that combines all hardware behind port traits.
///
/// Generic over the ADC front ends so the same adapter runs on the board
/// and against host fakes.
pub struct HardwareAdapter<A, B, P, D> {
    analog: A,
    bus: B,
    lcd: Lcd<P, D>,
    leakage: Buzzer<P>,
    continuity: Buzzer<P>,
    earth: Buzzer<P>,
}

impl<A, B, P: OutputPin, D: DelayNs> HardwareAdapter<A, B, P, D> {
    /// `buzzers` are leakage, continuity, earth-resistance, in that order.
    pub fn new(analog: A, bus: B, lcd: Lcd<P, D>, buzzers: [P; 3]) -> Self {
        let [leakage, continuity, earth] = buzzers;
        Self {
            analog,
            bus,
            lcd,
            leakage: Buzzer::new(Alarm::Leakage, leakage),
            continuity: Buzzer::new(Alarm::Continuity, continuity),
            earth: Buzzer::new(Alarm::EarthResistance, earth),
        }
    }

    /// Run the LCD power-on sequence.  Call once before the first cycle.
    pub fn init_display(&mut self) -> Result<(), Error> {
        self.lcd.init().map_err(Error::from)
    }

    pub fn buzzer(&self, alarm: Alarm) -> &Buzzer<P> {
        match alarm {
            Alarm::Leakage => &self.leakage,
            Alarm::Continuity => &self.continuity,
            Alarm::EarthResistance => &self.earth,
        }
    }

    fn buzzer_mut(&mut self, alarm: Alarm) -> &mut Buzzer<P> {
        match alarm {
            Alarm::Leakage => &mut self.leakage,
            Alarm::Continuity => &mut self.continuity,
            Alarm::EarthResistance => &mut self.earth,
        }
    }
}

// ── Sensor port implementations ───────────────────────────────

impl<A: AnalogPort, B, P, D> AnalogPort for HardwareAdapter<A, B, P, D> {
    fn read_raw(&mut self, channel: AnalogChannel) -> Result<u16, SensorError> {
        self.analog.read_raw(channel)
    }
}

impl<A, B: BusVoltagePort, P, D> BusVoltagePort for HardwareAdapter<A, B, P, D> {
    fn read_bus_raw(&mut self) -> Result<i16, SensorError> {
        self.bus.read_bus_raw()
    }
}

// ── Output port implementations ───────────────────────────────

impl<A, B, P: OutputPin, D: DelayNs> AlarmPort for HardwareAdapter<A, B, P, D> {
    fn set_alarm(&mut self, alarm: Alarm, on: bool) -> Result<(), Error> {
        self.buzzer_mut(alarm).set(on).map_err(Error::from)
    }
}

impl<A, B, P: OutputPin, D: DelayNs> DisplayPort for HardwareAdapter<A, B, P, D> {
    fn clear(&mut self) -> Result<(), Error> {
        self.lcd.clear().map_err(Error::from)
    }

    fn show_row(&mut self, row: u8, text: &str) -> Result<(), Error> {
        self.lcd.show_row(row, text).map_err(Error::from)
    }
}
