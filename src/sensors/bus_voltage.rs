//! ADS1015 12-bit I²C ADC — bus-voltage input.
//!
//! Single-shot conversions on AIN0 against GND at the ±6.144 V PGA range,
//! where one count is 3 mV.  A conversion takes ~625 us at 1600 SPS; the
//! driver polls the OS bit a bounded number of times and reports a
//! timeout rather than returning a stale conversion register.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::app::ports::BusVoltagePort;
use crate::error::SensorError;

/// ADDR pin tied to GND.
pub const ADS1015_ADDRESS: u8 = 0x48;
/// Single-ended input carrying the bus voltage.
pub const BUS_VOLTAGE_INPUT: u8 = 0;

const REG_CONVERSION: u8 = 0x00;
const REG_CONFIG: u8 = 0x01;

const CONFIG_OS_SINGLE: u16 = 0x8000;
const CONFIG_MUX_SINGLE_BASE: u16 = 0x4000;
const CONFIG_PGA_6_144V: u16 = 0x0000;
const CONFIG_MODE_SINGLE: u16 = 0x0100;
const CONFIG_DR_1600SPS: u16 = 0x0080;
const CONFIG_CQUE_NONE: u16 = 0x0003;

const POLL_INTERVAL_US: u32 = 200;
const MAX_POLLS: u8 = 10;

/// Scale a signed ADS1015 count to volts.  Single-ended inputs cannot go
/// below ground, so negative counts (offset noise) read as 0 V.
pub fn counts_to_volts(raw: i16, volts_per_count: f32) -> f32 {
    f32::from(raw.max(0)) * volts_per_count
}

pub struct Ads1015<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Ads1015<I2C, D> {
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self { i2c, delay, address }
    }

    /// Start a conversion on `input` (0–3) and return the signed 12-bit count.
    pub fn read_single_ended(&mut self, input: u8) -> Result<i16, SensorError> {
        let config = CONFIG_OS_SINGLE
            | (CONFIG_MUX_SINGLE_BASE | (u16::from(input & 0x03) << 12))
            | CONFIG_PGA_6_144V
            | CONFIG_MODE_SINGLE
            | CONFIG_DR_1600SPS
            | CONFIG_CQUE_NONE;
        self.write_register(REG_CONFIG, config)?;
        self.wait_for_conversion()?;
        let raw = self.read_register(REG_CONVERSION)?;
        // Result is left-aligned; arithmetic shift keeps the sign.
        Ok((raw as i16) >> 4)
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn wait_for_conversion(&mut self) -> Result<(), SensorError> {
        for _ in 0..MAX_POLLS {
            self.delay.delay_us(POLL_INTERVAL_US);
            // OS reads back as 1 once the device is idle again.
            if self.read_register(REG_CONFIG)? & CONFIG_OS_SINGLE != 0 {
                return Ok(());
            }
        }
        log::warn!("ADS1015: conversion not ready after {} polls", MAX_POLLS);
        Err(SensorError::BusTimeout)
    }

    fn write_register(&mut self, reg: u8, value: u16) -> Result<(), SensorError> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[reg, hi, lo])
            .map_err(|_| SensorError::BusReadFailed)
    }

    fn read_register(&mut self, reg: u8) -> Result<u16, SensorError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(|_| SensorError::BusReadFailed)?;
        Ok(u16::from_be_bytes(buf))
    }
}

impl<I2C: I2c, D: DelayNs> BusVoltagePort for Ads1015<I2C, D> {
    fn read_bus_raw(&mut self) -> Result<i16, SensorError> {
        self.read_single_ended(BUS_VOLTAGE_INPUT)
    }
}
