//! Tester service — the hexagonal core.
//!
//! [`TesterService`] owns the sampler, calculator and alarm policy, all
//! built once from the immutable [`TesterConfig`].  Every cycle runs the
//! same fixed pipeline and nothing but a cycle counter survives from one
//! cycle to the next.  All I/O flows through port traits injected at
//! call sites, so whole cycles run on the host against mock adapters.
//!
//! ```text
//!  AnalogPort ─────┐  ┌──────────────────────────┐ ──▶ AlarmPort
//!                  ├─▶│       TesterService      │ ──▶ DisplayPort
//!  BusVoltagePort ─┘  │ sample · compute · alarm │ ──▶ EventSink
//!                     └──────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::TesterConfig;
use crate::display::{self, DisplayFrame};
use crate::error::Error;
use crate::measurement::Measurements;
use crate::physics::Calculator;
use crate::policy::{Alarm, AlarmPolicy, AlarmStates};
use crate::sensors::AnalogChannel;
use crate::sensors::bus_voltage::counts_to_volts;
use crate::sensors::current::CurrentSampler;

use super::events::{AppEvent, CycleReport};
use super::ports::{AlarmPort, AnalogPort, BusVoltagePort, DisplayPort, EventSink};

// ───────────────────────────────────────────────────────────────
// TesterService
// ───────────────────────────────────────────────────────────────

pub struct TesterService {
    config: TesterConfig,
    sampler: CurrentSampler,
    calculator: Calculator,
    policy: AlarmPolicy,
    cycle_count: u64,
}

impl TesterService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware. Call [`start`](Self::start) next.
    pub fn new(config: TesterConfig) -> Self {
        Self {
            sampler: CurrentSampler::new(&config),
            calculator: Calculator::new(&config),
            policy: AlarmPolicy::new(&config),
            config,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot splash, then a blank panel and every alarm silent.
    pub fn start(
        &mut self,
        hw: &mut (impl AlarmPort + DisplayPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        report_output(sink, hw.show_row(0, &display::splash_row()));
        delay.delay_ms(self.config.splash_duration_ms);
        report_output(sink, hw.clear());
        report_output(sink, hw.all_off());

        info!(
            "TesterService started (N={}, {} ms/sample, {} ms/cycle)",
            self.config.samples_per_reading,
            self.config.sample_interval_ms,
            self.config.cycle_interval_ms,
        );
        sink.emit(&AppEvent::Started);
    }

    /// Run forever: one cycle, `after_cycle`, then the inter-cycle sleep.
    pub fn run(
        &mut self,
        hw: &mut (impl AnalogPort + BusVoltagePort + AlarmPort + DisplayPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
        mut after_cycle: impl FnMut(&CycleReport),
    ) -> ! {
        loop {
            let report = self.run_cycle(hw, delay, sink);
            after_cycle(&report);
            self.sleep_until_next_cycle(delay);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One full cycle: measure → derive → alarms → display.
    ///
    /// Output failures are reported through `sink` and never stop the
    /// cycle; the next cycle drives every output again.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl AnalogPort + BusVoltagePort + AlarmPort + DisplayPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;

        // 1–4. Sample, read, derive
        let measurements = self.measure(hw, delay);
        for (quantity, error) in measurements.faults() {
            warn!("Cycle {}: {} unavailable ({})", self.cycle_count, quantity, error);
            sink.emit(&AppEvent::Fault { quantity, error });
        }

        // 5. Alarms
        let alarms = self.policy.evaluate(&measurements);
        self.apply_alarms(hw, &alarms, sink);

        // 6. Display
        let frame = display::format_frame(&measurements, &self.policy);
        self.show_frame(hw, &frame, sink);

        let report = CycleReport {
            cycle: self.cycle_count,
            measurements,
            alarms,
            frame,
        };
        if self.cycle_count % u64::from(self.config.telemetry_interval_cycles.max(1)) == 0 {
            sink.emit(&AppEvent::Telemetry(report.clone()));
        }
        report
    }

    /// Read every input and derive both quantities.  Inputs are read in a
    /// fixed order: I1, I2, bus voltage, continuity.
    pub fn measure(
        &self,
        hw: &mut (impl AnalogPort + BusVoltagePort),
        delay: &mut impl DelayNs,
    ) -> Measurements {
        let resistivity_current_a = self
            .sampler
            .sample_current(hw, delay, AnalogChannel::ResistivityCurrent)
            .map_err(Error::from);
        let leakage_current_a = self
            .sampler
            .sample_current(hw, delay, AnalogChannel::LeakageCurrent)
            .map_err(Error::from);
        let bus_voltage_v = hw
            .read_bus_raw()
            .map(|raw| counts_to_volts(raw, self.config.bus_volts_per_count))
            .map_err(Error::from);

        let resistivity_ohm_m = resistivity_current_a.and_then(|i1| {
            bus_voltage_v.and_then(|v| {
                self.calculator
                    .compute_resistivity(v, i1)
                    .map_err(Error::from)
            })
        });
        let earth_resistance_ohm = resistivity_ohm_m.and_then(|rho| {
            self.calculator
                .compute_earth_resistance(rho)
                .map_err(Error::from)
        });

        let continuity_raw = hw.read_raw(AnalogChannel::Continuity).map_err(Error::from);

        Measurements {
            resistivity_current_a,
            leakage_current_a,
            bus_voltage_v,
            resistivity_ohm_m,
            earth_resistance_ohm,
            continuity_raw,
        }
    }

    pub fn sleep_until_next_cycle(&self, delay: &mut impl DelayNs) {
        delay.delay_ms(self.config.cycle_interval_ms);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    /// Cycles completed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Drive every alarm to its commanded level, even after a failure.
    fn apply_alarms(
        &self,
        hw: &mut impl AlarmPort,
        alarms: &AlarmStates,
        sink: &mut impl EventSink,
    ) {
        for alarm in Alarm::ALL {
            report_output(sink, hw.set_alarm(alarm, alarms.get(alarm)));
        }
    }

    fn show_frame(&self, hw: &mut impl DisplayPort, frame: &DisplayFrame, sink: &mut impl EventSink) {
        for (row, text) in frame.rows().iter().enumerate() {
            report_output(sink, hw.show_row(row as u8, text));
        }
    }
}

fn report_output(sink: &mut impl EventSink, result: Result<(), Error>) {
    if let Err(e) = result {
        warn!("Output failed: {}", e);
        sink.emit(&AppEvent::OutputFailed(e));
    }
}
