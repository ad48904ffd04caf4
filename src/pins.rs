//! GPIO / peripheral pin assignments for the GroundCheck main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Analog inputs (ADC1, oneshot)
// ---------------------------------------------------------------------------

/// ACS712 on the earth-test excitation loop (I1, resistivity current).
/// ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const RESISTIVITY_CURRENT_ADC_GPIO: i32 = 2;
/// ACS712 on the protective-earth conductor (I2, leakage current).
/// ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const LEAKAGE_CURRENT_ADC_GPIO: i32 = 1;
/// Continuity probe divider.  HIGH reading = closed path.
/// ADC1 channel 2 (GPIO 3 on ESP32-S3).
pub const CONTINUITY_ADC_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Alarm buzzers (active HIGH)
// ---------------------------------------------------------------------------

pub const LEAKAGE_BUZZER_GPIO: i32 = 8;
pub const EARTH_BUZZER_GPIO: i32 = 9;
pub const CONTINUITY_BUZZER_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// HD44780 16x4 LCD, 4-bit parallel bus
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 11;
pub const LCD_EN_GPIO: i32 = 12;
pub const LCD_D4_GPIO: i32 = 13;
pub const LCD_D5_GPIO: i32 = 14;
pub const LCD_D6_GPIO: i32 = 15;
pub const LCD_D7_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// I²C bus (ADS1015 bus-voltage ADC)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 17;
pub const I2C_SCL_GPIO: i32 = 18;
/// I²C bus clock.  The ADS1015 supports 400 kHz fast mode.
pub const I2C_FREQ_HZ: u32 = 400_000;

