//! Outbound application events.
//!
//! The [`TesterService`](super::service::TesterService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; on the device they go to the serial
//! log.

use crate::display::DisplayFrame;
use crate::error::Error;
use crate::measurement::{Measurements, Quantity};
use crate::policy::AlarmStates;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Startup finished; the measurement loop is about to run.
    Started,

    /// Periodic snapshot of one cycle.
    Telemetry(CycleReport),

    /// A quantity had no value this cycle.  Emitted every cycle the
    /// fault is present.
    Fault { quantity: Quantity, error: Error },

    /// An alarm output or the display could not be driven.
    OutputFailed(Error),
}

/// Everything one cycle measured, decided and showed.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// 1-based cycle number since start.
    pub cycle: u64,
    pub measurements: Measurements,
    pub alarms: AlarmStates,
    pub frame: DisplayFrame,
}
