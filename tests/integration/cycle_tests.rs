//! Full measurement cycles against the mock hardware.

use groundcheck::app::events::AppEvent;
use groundcheck::app::service::TesterService;
use groundcheck::config::TesterConfig;
use groundcheck::error::{Error, MeasurementError, SensorError};
use groundcheck::measurement::Quantity;
use groundcheck::policy::Alarm;
use groundcheck::sensors::AnalogChannel;

use crate::mock_hw::{Input, MockHardware, OutputCall, RecordingDelay, RecordingSink, linear_config};

fn run_one(hw: &mut MockHardware, config: TesterConfig) -> (groundcheck::app::events::CycleReport, RecordingSink) {
    let mut app = TesterService::new(config);
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::default();
    let report = app.run_cycle(hw, &mut delay, &mut sink);
    (report, sink)
}

fn faults(sink: &RecordingSink) -> Vec<Quantity> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Fault { quantity, .. } => Some(*quantity),
            _ => None,
        })
        .collect()
}

// ── Happy path ────────────────────────────────────────────────

#[test]
fn bench_cycle_measures_alarms_and_displays() {
    let mut hw = MockHardware::bench();
    let (report, sink) = run_one(&mut hw, linear_config());

    let m = &report.measurements;
    assert!((m.resistivity_current_a.unwrap() - 0.1).abs() < 1e-5);
    assert!((m.bus_voltage_v.unwrap() - 1.5).abs() < 1e-5);
    assert!((m.resistivity_ohm_m.unwrap() - 47.124).abs() < 1e-2);
    assert!((m.earth_resistance_ohm.unwrap() - 249.7).abs() < 0.5);

    // 249.6 Ohm is far above 2 Ohm; leakage and continuity are fine.
    assert_eq!(hw.alarm_level(Alarm::EarthResistance), Some(true));
    assert_eq!(hw.alarm_level(Alarm::Leakage), Some(false));
    assert_eq!(hw.alarm_level(Alarm::Continuity), Some(false));

    assert_eq!(hw.row_text(0), Some("Rho 47.124 Ohm.m"));
    assert!(hw.row_text(1).unwrap().starts_with("Rg 249."));
    assert_eq!(hw.row_text(2), Some("Ileak 0.002 A   "));
    assert_eq!(hw.row_text(3), Some("Continuous      "));

    assert!(faults(&sink).is_empty());
}

#[test]
fn inputs_are_read_in_pipeline_order() {
    let mut hw = MockHardware::bench();
    run_one(&mut hw, linear_config());

    let n = usize::from(TesterConfig::default().samples_per_reading);
    let mut expected = vec![Input::Analog(AnalogChannel::ResistivityCurrent); n];
    expected.extend(vec![Input::Analog(AnalogChannel::LeakageCurrent); n]);
    expected.push(Input::Bus);
    expected.push(Input::Analog(AnalogChannel::Continuity));
    assert_eq!(hw.reads, expected);
}

#[test]
fn alarms_are_driven_before_the_display() {
    let mut hw = MockHardware::bench();
    run_one(&mut hw, linear_config());

    let first_row = hw
        .calls
        .iter()
        .position(|c| matches!(c, OutputCall::ShowRow { .. }))
        .unwrap();
    let last_alarm = hw
        .calls
        .iter()
        .rposition(|c| matches!(c, OutputCall::SetAlarm { .. }))
        .unwrap();
    assert!(last_alarm < first_row);
    assert_eq!(first_row, 3);
}

// ── Undefined quantities ──────────────────────────────────────

#[test]
fn zero_excitation_current_is_undefined_not_nan() {
    let mut hw = MockHardware::bench();
    hw.set_raw(AnalogChannel::ResistivityCurrent, 0);
    let (report, sink) = run_one(&mut hw, linear_config());

    let undefined = Err(Error::Measurement(MeasurementError::ZeroExcitationCurrent));
    assert_eq!(report.measurements.resistivity_ohm_m, undefined);
    assert_eq!(report.measurements.earth_resistance_ohm, undefined);

    assert_eq!(hw.row_text(0), Some("Rho UNDEFINED   "));
    assert_eq!(hw.row_text(1), Some("Rg UNDEFINED    "));
    // Fail-safe: an earth resistance we cannot compute sounds the alarm.
    assert_eq!(hw.alarm_level(Alarm::EarthResistance), Some(true));
    assert_eq!(faults(&sink), vec![Quantity::Resistivity, Quantity::EarthResistance]);
}

#[test]
fn open_excitation_loop_at_sensor_zero_point_is_undefined() {
    // Default calibration: ACS712 zero point sits between raw 511 and 512.
    for (raw, bus) in [(512, 0), (512, 500), (511, 0), (511, 500)] {
        let mut hw = MockHardware::bench();
        hw.set_raw(AnalogChannel::ResistivityCurrent, raw);
        hw.bus = Ok(bus);
        let (report, _) = run_one(&mut hw, TesterConfig::default());

        let undefined = Err(Error::Measurement(MeasurementError::ZeroExcitationCurrent));
        assert_eq!(report.measurements.resistivity_ohm_m, undefined, "raw={raw} bus={bus}");
        assert_eq!(report.measurements.earth_resistance_ohm, undefined, "raw={raw} bus={bus}");
        assert_eq!(hw.alarm_level(Alarm::EarthResistance), Some(true), "raw={raw} bus={bus}");
        assert_eq!(hw.row_text(1), Some("Rg UNDEFINED    "), "raw={raw} bus={bus}");
    }
}

#[test]
fn reversed_excitation_current_is_undefined() {
    let mut hw = MockHardware::bench();
    hw.set_raw(AnalogChannel::ResistivityCurrent, 400);
    let (report, _) = run_one(&mut hw, TesterConfig::default());

    let undefined = Err(Error::Measurement(MeasurementError::NonPositiveResistivity));
    assert_eq!(report.measurements.resistivity_ohm_m, undefined);
    assert_eq!(report.measurements.earth_resistance_ohm, undefined);
    assert_eq!(hw.alarm_level(Alarm::EarthResistance), Some(true));
    assert_eq!(hw.row_text(0), Some("Rho UNDEFINED   "));
}

#[test]
fn bus_timeout_propagates_into_both_derived_quantities() {
    let mut hw = MockHardware::bench();
    hw.bus = Err(SensorError::BusTimeout);
    let (report, sink) = run_one(&mut hw, linear_config());

    let fault = Err(Error::Sensor(SensorError::BusTimeout));
    assert_eq!(report.measurements.resistivity_ohm_m, fault);
    assert_eq!(report.measurements.earth_resistance_ohm, fault);
    assert_eq!(hw.row_text(0), Some("Rho SENSOR ERR  "));
    assert_eq!(
        faults(&sink),
        vec![Quantity::BusVoltage, Quantity::Resistivity, Quantity::EarthResistance]
    );
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn leakage_sensor_fault_sounds_leakage_alarm() {
    let mut hw = MockHardware::bench();
    hw.failing.insert(AnalogChannel::LeakageCurrent);
    let (report, sink) = run_one(&mut hw, linear_config());

    assert_eq!(
        report.measurements.leakage_current_a,
        Err(Error::Sensor(SensorError::AdcReadFailed(AnalogChannel::LeakageCurrent)))
    );
    assert_eq!(hw.alarm_level(Alarm::Leakage), Some(true));
    assert_eq!(hw.row_text(2), Some("Ileak SENSOR ERR"));
    assert_eq!(faults(&sink), vec![Quantity::LeakageCurrent]);
    // The other channels are unaffected.
    assert!(report.measurements.resistivity_ohm_m.is_ok());
}

#[test]
fn fault_clears_on_the_next_good_cycle() {
    let mut app = TesterService::new(linear_config());
    let mut hw = MockHardware::bench();
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::default();

    hw.failing.insert(AnalogChannel::Continuity);
    app.run_cycle(&mut hw, &mut delay, &mut sink);
    assert_eq!(hw.alarm_level(Alarm::Continuity), Some(true));
    assert_eq!(hw.row_text(3), Some("Cont SENSOR ERR "));

    hw.failing.clear();
    sink.events.clear();
    app.run_cycle(&mut hw, &mut delay, &mut sink);
    assert_eq!(hw.alarm_level(Alarm::Continuity), Some(false));
    assert_eq!(hw.row_text(3), Some("Continuous      "));
    assert!(faults(&sink).is_empty());
}

// ── Thresholds through the whole pipeline ─────────────────────

#[test]
fn continuity_boundary_end_to_end() {
    let mut hw = MockHardware::bench();
    hw.set_raw(AnalogChannel::Continuity, 499);
    run_one(&mut hw, linear_config());
    assert_eq!(hw.alarm_level(Alarm::Continuity), Some(true));
    assert_eq!(hw.row_text(3), Some("Discontinuous   "));

    let mut hw = MockHardware::bench();
    hw.set_raw(AnalogChannel::Continuity, 500);
    run_one(&mut hw, linear_config());
    assert_eq!(hw.alarm_level(Alarm::Continuity), Some(false));
}

#[test]
fn leakage_over_threshold_end_to_end() {
    let mut hw = MockHardware::bench();
    hw.set_raw(AnalogChannel::LeakageCurrent, 11);
    run_one(&mut hw, linear_config());
    assert_eq!(hw.alarm_level(Alarm::Leakage), Some(true));

    let mut hw = MockHardware::bench();
    hw.set_raw(AnalogChannel::LeakageCurrent, 9);
    run_one(&mut hw, linear_config());
    assert_eq!(hw.alarm_level(Alarm::Leakage), Some(false));
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn identical_inputs_give_identical_outputs() {
    let mut app = TesterService::new(linear_config());
    let mut hw = MockHardware::bench();
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::default();

    let first = app.run_cycle(&mut hw, &mut delay, &mut sink);
    let first_calls = hw.calls.clone();
    hw.clear_calls();
    let second = app.run_cycle(&mut hw, &mut delay, &mut sink);

    assert_eq!(first.alarms, second.alarms);
    assert_eq!(first.frame, second.frame);
    assert_eq!(first.measurements, second.measurements);
    assert_eq!(first_calls, hw.calls);
    assert_eq!(second.cycle, 2);
}

// ── Output failures ───────────────────────────────────────────

#[test]
fn broken_buzzer_is_reported_and_cycle_continues() {
    let mut hw = MockHardware::bench();
    hw.broken_alarm = Some(Alarm::Leakage);
    let (_, sink) = run_one(&mut hw, linear_config());

    assert!(sink.events.iter().any(|e| matches!(e, AppEvent::OutputFailed(Error::Actuator(_)))));
    // The remaining alarms and all four rows were still written.
    assert_eq!(hw.alarm_level(Alarm::Continuity), Some(false));
    assert_eq!(hw.alarm_level(Alarm::EarthResistance), Some(true));
    assert!((0..4).all(|row| hw.row_text(row).is_some()));
}

// ── Timing ────────────────────────────────────────────────────

#[test]
fn cycle_costs_two_readings_plus_sleep() {
    let mut app = TesterService::new(TesterConfig::default());
    let mut hw = MockHardware::bench();
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::default();

    app.run_cycle(&mut hw, &mut delay, &mut sink);
    assert_eq!(delay.total_ms(), 200);
    app.sleep_until_next_cycle(&mut delay);
    assert_eq!(delay.total_ms(), 1200);
    assert_eq!(u64::from(app.config().cycle_budget_ms()), delay.total_ms());
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_splashes_clears_and_silences() {
    let mut app = TesterService::new(TesterConfig::default());
    let mut hw = MockHardware::bench();
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::default();

    app.start(&mut hw, &mut delay, &mut sink);

    assert_eq!(
        hw.calls[0],
        OutputCall::ShowRow {
            row: 0,
            text: "Initializing... ".into()
        }
    );
    assert_eq!(hw.calls[1], OutputCall::Clear);
    for alarm in Alarm::ALL {
        assert_eq!(hw.alarm_level(alarm), Some(false));
    }
    assert_eq!(delay.total_ms(), 1000);
    assert!(matches!(sink.events.last(), Some(AppEvent::Started)));
    assert_eq!(app.cycle_count(), 0);
}

#[test]
fn telemetry_carries_the_cycle_report() {
    let config = TesterConfig {
        telemetry_interval_cycles: 1,
        ..linear_config()
    };
    let mut hw = MockHardware::bench();
    let (report, sink) = run_one(&mut hw, config);

    let telemetry = sink.events.iter().find_map(|e| match e {
        AppEvent::Telemetry(t) => Some(t),
        _ => None,
    });
    assert_eq!(telemetry, Some(&report));
}
