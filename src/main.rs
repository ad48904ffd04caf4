//! GroundCheck Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single fixed-cadence measurement loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                         LogEventSink          │
//! │  (Analog + BusVoltage + Alarm + Display) (EventSink)           │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            TesterService (pure logic)                  │    │
//! │  │  Sampler · Calculator · AlarmPolicy · Display layout   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info, warn};

use esp_idf_svc::hal::delay::{Ets, FreeRtos};
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;

use groundcheck::adapters::hardware::HardwareAdapter;
use groundcheck::adapters::log_sink::LogEventSink;
use groundcheck::app::service::TesterService;
use groundcheck::config::TesterConfig;
use groundcheck::drivers::gpio::GpioOutput;
use groundcheck::drivers::hw_init;
use groundcheck::drivers::lcd::Lcd;
use groundcheck::drivers::watchdog::Watchdog;
use groundcheck::error::Error;
use groundcheck::pins;
use groundcheck::sensors::analog::AnalogFrontEnd;
use groundcheck::sensors::bus_voltage::{ADS1015_ADDRESS, Ads1015};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  GroundCheck v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    // Calibration is compiled in; a bad build must not reach the loop.
    let config = TesterConfig::default();
    config.validate().context("built-in configuration invalid")?;
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config serialisation failed: {}", e),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(|e| {
        error!("HAL init failed: {}", e);
        Error::from(e)
    })?;

    let peripherals = Peripherals::take().context("peripherals already taken")?;
    // SDA/SCL must match pins::I2C_SDA_GPIO / pins::I2C_SCL_GPIO.
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ)),
    )
    .context("I2C driver init failed")?;
    let ads = Ads1015::new(i2c, Ets, ADS1015_ADDRESS);

    let lcd = Lcd::new(
        GpioOutput::new(pins::LCD_RS_GPIO),
        GpioOutput::new(pins::LCD_EN_GPIO),
        [
            GpioOutput::new(pins::LCD_D4_GPIO),
            GpioOutput::new(pins::LCD_D5_GPIO),
            GpioOutput::new(pins::LCD_D6_GPIO),
            GpioOutput::new(pins::LCD_D7_GPIO),
        ],
        Ets,
    );

    let mut hw = HardwareAdapter::new(
        AnalogFrontEnd::new(config.adc_full_scale),
        ads,
        lcd,
        [
            GpioOutput::new(pins::LEAKAGE_BUZZER_GPIO),
            GpioOutput::new(pins::CONTINUITY_BUZZER_GPIO),
            GpioOutput::new(pins::EARTH_BUZZER_GPIO),
        ],
    );
    if let Err(e) = hw.init_display() {
        // The tester is still useful by its buzzers alone.
        warn!("LCD init failed ({}), continuing without display", e);
    }

    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    let mut log_sink = LogEventSink::new();
    let mut delay = FreeRtos;

    // ── 4. Run ────────────────────────────────────────────────
    let mut app = TesterService::new(config);
    app.start(&mut hw, &mut delay, &mut log_sink);
    watchdog.feed();

    info!("System ready. Entering measurement loop.");
    app.run(&mut hw, &mut delay, &mut log_sink, |_| watchdog.feed())
}
