//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TesterService (domain)
//! ```
//!
//! Driven adapters (ADCs, buzzers, LCD, event sinks) implement these
//! traits.  The [`TesterService`](super::service::TesterService) consumes
//! them via generics, so the measurement core never touches hardware
//! directly and every cycle can be replayed against mocks on the host.

use crate::error::{Error, SensorError};
use crate::policy::Alarm;
use crate::sensors::AnalogChannel;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Built-in ADC: one raw conversion in `0..=adc_full_scale`.
pub trait AnalogPort {
    fn read_raw(&mut self, channel: AnalogChannel) -> Result<u16, SensorError>;
}

/// External ADS1015: one signed single-ended count from the bus-voltage input.
pub trait BusVoltagePort {
    fn read_bus_raw(&mut self) -> Result<i16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Output ports (driven adapters: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The three alarm buzzers.
pub trait AlarmPort {
    /// Drive one alarm output.  Writes the level every call, so a glitched
    /// output is corrected on the next cycle.
    fn set_alarm(&mut self, alarm: Alarm, on: bool) -> Result<(), Error>;

    /// Silence every alarm.  Attempts all outputs even if one fails and
    /// returns the first error.
    fn all_off(&mut self) -> Result<(), Error> {
        let mut first = Ok(());
        for alarm in Alarm::ALL {
            let result = self.set_alarm(alarm, false);
            if first.is_ok() {
                first = result;
            }
        }
        first
    }
}

/// Character display, one row at a time.
pub trait DisplayPort {
    fn clear(&mut self) -> Result<(), Error>;

    /// Write `text` from column 0 of `row`.
    fn show_row(&mut self, row: u8, text: &str) -> Result<(), Error>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
