//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to                     |
//! |------------|----------------|---------------------------------|
//! | `hardware` | AnalogPort     | ESP32 ADC1 (ACS712, continuity) |
//! |            | BusVoltagePort | ADS1015 over I2C                |
//! |            | AlarmPort      | Buzzer GPIOs                    |
//! |            | DisplayPort    | HD44780 16x4 LCD                |
//! | `log_sink` | EventSink      | Serial log output               |

pub mod hardware;
pub mod log_sink;
