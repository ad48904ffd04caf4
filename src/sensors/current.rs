//! ACS712 hall-effect current sampler.
//!
//! Each measurement averages `samples_per_reading` raw conversions taken
//! `sample_interval_ms` apart.  The spacing is settling time for the
//! sensor's output filter and is part of the measurement, not an
//! incidental wait: a 10 x 10 ms reading always costs 100 ms.
//!
//! Conversion per sample:
//!
//! ```text
//! mV = raw / full_scale * reference_mV
//! A  = (mV - zero_point_mV) / sensitivity_mV_per_A - offset_A
//! ```

use embedded_hal::delay::DelayNs;

use crate::app::ports::AnalogPort;
use crate::config::TesterConfig;
use crate::error::SensorError;

use super::AnalogChannel;

#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    pub full_scale: u16,
    pub reference_mv: f32,
    pub zero_point_mv: f32,
    pub sensitivity_mv_per_a: f32,
    pub offset_current_a: f32,
}

impl Calibration {
    pub fn from_config(config: &TesterConfig) -> Self {
        Self {
            full_scale: config.adc_full_scale,
            reference_mv: config.adc_reference_mv,
            zero_point_mv: config.sensor_zero_point_mv,
            sensitivity_mv_per_a: config.sensitivity_mv_per_a,
            offset_current_a: config.offset_current_a,
        }
    }

    pub fn raw_to_millivolts(&self, raw: u16) -> f32 {
        f32::from(raw) / f32::from(self.full_scale) * self.reference_mv
    }

    /// Current represented by one raw ADC count (A).
    pub fn amps_per_count(&self) -> f32 {
        self.reference_mv / f32::from(self.full_scale) / self.sensitivity_mv_per_a
    }

    /// Offset-corrected current for one raw sample (signed).
    pub fn raw_to_amps(&self, raw: u16) -> f32 {
        let mv = self.raw_to_millivolts(raw);
        (mv - self.zero_point_mv) / self.sensitivity_mv_per_a - self.offset_current_a
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::from_config(&TesterConfig::default())
    }
}

pub struct CurrentSampler {
    cal: Calibration,
    samples: u8,
    sample_interval_ms: u32,
}

impl CurrentSampler {
    pub fn new(config: &TesterConfig) -> Self {
        Self {
            cal: Calibration::from_config(config),
            samples: config.samples_per_reading.max(1),
            sample_interval_ms: config.sample_interval_ms,
        }
    }

    pub fn calibration(&self) -> &Calibration {
        &self.cal
    }

    /// Total settling time spent per successful reading (ms).
    pub fn latency_ms(&self) -> u32 {
        u32::from(self.samples) * self.sample_interval_ms
    }

    /// Average of `samples` offset-corrected conversions on `channel`.
    ///
    /// The first failed conversion aborts the reading: a partial average
    /// would look like a valid, smaller current.
    pub fn sample_current(
        &self,
        adc: &mut impl AnalogPort,
        delay: &mut impl DelayNs,
        channel: AnalogChannel,
    ) -> Result<f32, SensorError> {
        let mut total = 0.0_f32;
        for _ in 0..self.samples {
            let raw = adc.read_raw(channel)?;
            total += self.cal.raw_to_amps(raw);
            delay.delay_ms(self.sample_interval_ms);
        }
        Ok(total / f32::from(self.samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed sequence of raw counts, cycling when exhausted.
    struct Replay {
        values: Vec<u16>,
        next: usize,
        fail_at: Option<usize>,
    }

    impl Replay {
        fn new(values: &[u16]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
                fail_at: None,
            }
        }
    }

    impl AnalogPort for Replay {
        fn read_raw(&mut self, channel: AnalogChannel) -> Result<u16, SensorError> {
            if self.fail_at == Some(self.next) {
                return Err(SensorError::AdcReadFailed(channel));
            }
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            Ok(v)
        }
    }

    #[derive(Default)]
    struct TotalDelay {
        ns: u64,
        calls: u32,
    }

    impl DelayNs for TotalDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.ns += u64::from(ns);
            self.calls += 1;
        }
    }

    #[test]
    fn midscale_reads_near_zero_after_offset() {
        let cal = Calibration::default();
        // 512/1023 * 5000 = 2502.44 mV → 0.02444 A - 0.024 A
        assert!((cal.raw_to_amps(512) - 0.000_44).abs() < 1e-4);
        assert!((cal.raw_to_amps(1023) - 24.976).abs() < 1e-3);
        assert!((cal.raw_to_amps(0) + 25.024).abs() < 1e-3);
    }

    #[test]
    fn average_equals_mean_of_corrected_samples() {
        let config = TesterConfig {
            samples_per_reading: 4,
            ..TesterConfig::default()
        };
        let sampler = CurrentSampler::new(&config);
        let raws = [520, 530, 510, 540];
        let mut adc = Replay::new(&raws);
        let mut delay = TotalDelay::default();

        let amps = sampler
            .sample_current(&mut adc, &mut delay, AnalogChannel::ResistivityCurrent)
            .unwrap();

        let cal = sampler.calibration();
        let expected: f32 = raws.iter().map(|&r| cal.raw_to_amps(r)).sum::<f32>() / 4.0;
        assert!((amps - expected).abs() < 1e-5, "got {amps}, want {expected}");
        assert_eq!(adc.next, 4);
    }

    #[test]
    fn settling_delay_is_n_times_interval() {
        let sampler = CurrentSampler::new(&TesterConfig::default());
        let mut adc = Replay::new(&[512]);
        let mut delay = TotalDelay::default();
        sampler
            .sample_current(&mut adc, &mut delay, AnalogChannel::LeakageCurrent)
            .unwrap();
        assert_eq!(delay.ns, 100_000_000);
        assert_eq!(sampler.latency_ms(), 100);
    }

    #[test]
    fn failed_conversion_is_a_fault_not_zero() {
        let sampler = CurrentSampler::new(&TesterConfig::default());
        let mut adc = Replay::new(&[600]);
        adc.fail_at = Some(3);
        let mut delay = TotalDelay::default();
        assert_eq!(
            sampler.sample_current(&mut adc, &mut delay, AnalogChannel::LeakageCurrent),
            Err(SensorError::AdcReadFailed(AnalogChannel::LeakageCurrent))
        );
    }

    #[test]
    fn reverse_current_is_negative() {
        let sampler = CurrentSampler::new(&TesterConfig::default());
        let mut adc = Replay::new(&[400]);
        let mut delay = TotalDelay::default();
        let amps = sampler
            .sample_current(&mut adc, &mut delay, AnalogChannel::LeakageCurrent)
            .unwrap();
        assert!(amps < 0.0);
    }
}
