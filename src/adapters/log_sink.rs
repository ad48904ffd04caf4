//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC on the tester).  One line per event,
//! tagged so a serial capture can be grepped by kind.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::measurement::Reading;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                let m = &t.measurements;
                info!(
                    "TELEM | cycle={} | I1={}A I2={}A Vbus={}V | rho={}Ohm.m Rg={}Ohm | \
                     cont={} | alarms leak={} cont={} earth={}",
                    t.cycle,
                    Fmt(&m.resistivity_current_a),
                    Fmt(&m.leakage_current_a),
                    Fmt(&m.bus_voltage_v),
                    Fmt(&m.resistivity_ohm_m),
                    Fmt(&m.earth_resistance_ohm),
                    match m.continuity_raw {
                        Ok(raw) => raw.to_string(),
                        Err(_) => "ERR".into(),
                    },
                    on_off(t.alarms.leakage),
                    on_off(t.alarms.continuity),
                    on_off(t.alarms.earth_resistance),
                );
            }
            AppEvent::Fault { quantity, error } => {
                warn!("FAULT | {} | {}", quantity, error);
            }
            AppEvent::OutputFailed(error) => {
                warn!("OUTPUT | {}", error);
            }
            AppEvent::Started => {
                info!("START | measuring");
            }
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "off" }
}

/// Three-decimal value, or `ERR` for a missing one.
struct Fmt<'a>(&'a Reading);

impl core::fmt::Display for Fmt<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Ok(v) => write!(f, "{v:.3}"),
            Err(_) => write!(f, "ERR"),
        }
    }
}
