//! GPIO / peripheral pin assignments for the RoomWatch board (ESP32-S3).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Joystick (ADC1): stands in for the room sensors
// ---------------------------------------------------------------------------

/// Joystick X → humidity.  ADC1 channel 0 is GPIO 1 on the ESP32-S3.
pub const ADC1_CH_JOYSTICK_X: u32 = 0;
/// Joystick Y → temperature.  ADC1 channel 1 is GPIO 2 on the ESP32-S3.
pub const ADC1_CH_JOYSTICK_Y: u32 = 1;

// ---------------------------------------------------------------------------
// Buttons (active-low, internal pull-up, falling-edge interrupt)
// ---------------------------------------------------------------------------

/// Button A: previous room.
pub const BTN_PREVIOUS_GPIO: i32 = 5;
/// Button B: next room.
pub const BTN_NEXT_GPIO: i32 = 6;
/// Joystick push switch: toggle full recording.
pub const BTN_RECORD_GPIO: i32 = 16;

// ---------------------------------------------------------------------------
// Buzzers (LEDC PWM, square wave at the alert frequency)
// ---------------------------------------------------------------------------

/// Low-temperature alert buzzer.
pub const BUZZER_LOW_GPIO: i32 = 21;
/// High-temperature alert buzzer.
pub const BUZZER_HIGH_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Status LED (discrete RGB, LEDC PWM)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 13;
pub const LED_G_GPIO: i32 = 11;
pub const LED_B_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// WS2812 5×5 matrix (RMT)
// ---------------------------------------------------------------------------

pub const LED_MATRIX_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// I²C bus (SSD1306 128×64 OLED)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
pub const OLED_I2C_ADDR: u8 = 0x3C;
pub const I2C_BAUDRATE_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Buzzer timers start here; `play` retunes them per alert.
pub const BUZZER_IDLE_FREQ_HZ: u32 = 1_000;
/// 50 % duty for a square-wave tone.
pub const BUZZER_TONE_DUTY: u8 = (1u32 << (PWM_RESOLUTION_BITS - 1)) as u8;
/// LEDC frequency for RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
