//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements        | Connects to                      |
//! |-------------|-------------------|----------------------------------|
//! | `hardware`  | AnalogPort        | ESP32 ADC1 (joystick)            |
//! |             | DisplayPort       | via `oled`                       |
//! |             | LedStripPort      | via `led_strip`                  |
//! |             | TonePort          | LEDC buzzers                     |
//! |             | TimerPort         | esp_timer one-shots              |
//! |             | StatusLedPort     | LEDC RGB LED                     |
//! | `oled`      | DisplayPort       | SSD1306 over I²C                 |
//! | `led_strip` | LedStripPort      | WS2812 over RMT                  |
//! | `log_sink`  | EventSink         | Serial log output                |
//! | `time`      | —                 | ESP32 system timer               |

pub mod hardware;
pub mod led_strip;
pub mod log_sink;
pub mod oled;
pub mod time;
