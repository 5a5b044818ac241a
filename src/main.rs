//! RoomWatch Firmware — Main Entry Point
//!
//! Hexagonal architecture: interrupt handlers commit state into atomics,
//! one cooperative cycle does everything else.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                      LogEventSink             │
//! │  (ADC · OLED · WS2812 · buzzers ·     (EventSink)              │
//! │   status LED · auto-off timers)                                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           MonitorService (pure logic)                  │    │
//! │  │  Rooms · Sampler · AlarmPolicy · Presenter             │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  SHARED (atomics + event queue) ◀── button ISRs, esp_timer     │
//! │  CycleScheduler (fixed cadence)                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{anyhow, Result};
use esp_idf_hal::delay::Ets;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::info;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};
use ws2812_esp32_rmt_driver::Ws2812Esp32Rmt;

use roomwatch::adapters::hardware::HardwareAdapter;
use roomwatch::adapters::led_strip::PixelStrip;
use roomwatch::adapters::log_sink::LogEventSink;
use roomwatch::adapters::oled::OledDisplay;
use roomwatch::adapters::time::MonotonicClock;
use roomwatch::app::service::MonitorService;
use roomwatch::config::MonitorConfig;
use roomwatch::drivers::hw_init;
use roomwatch::drivers::hw_timer::AutoOffTimer;
use roomwatch::pins;
use roomwatch::scheduler::CycleScheduler;
use roomwatch::shared::SHARED;

/// Log scheduler statistics every this many cycles (~1 min at 2 Hz).
const STATS_EVERY_CYCLES: u32 = 120;

// The HAL pins below are typed fields; keep them in step with `pins`.
const _: () = assert!(pins::I2C_SDA_GPIO == 14 && pins::I2C_SCL_GPIO == 15);
const _: () = assert!(pins::LED_MATRIX_GPIO == 7);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RoomWatch v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (build-time override or defaults) ────
    let config = MonitorConfig::load(option_env!("ROOMWATCH_CONFIG_JSON"))
        .map_err(roomwatch::error::Error::from)?;
    info!(
        "Config: thresholds low={} cool={} cam={} high={}, cycle={} ms",
        config.low_temp_threshold,
        config.cool_threshold,
        config.camera_threshold,
        config.high_temp_threshold,
        config.cycle_period_ms
    );

    // ── 3. Raw peripherals (ADC, buttons, LEDC) ───────────────
    hw_init::init_peripherals().map_err(roomwatch::error::Error::from)?;

    // ── 4. HAL-driven peripherals (OLED, LED matrix) ──────────
    let peripherals = Peripherals::take()?;

    let i2c_cfg = I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ));
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio14,
        peripherals.pins.gpio15,
        &i2c_cfg,
    )?;
    let mut oled = Ssd1306::new(
        I2CDisplayInterface::new_custom_address(i2c, pins::OLED_I2C_ADDR),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    )
    .into_buffered_graphics_mode();
    oled.init().map_err(|e| anyhow!("OLED init failed: {:?}", e))?;

    let matrix = Ws2812Esp32Rmt::new(peripherals.rmt.channel0, peripherals.pins.gpio7)
        .map_err(|e| anyhow!("LED matrix init failed: {:?}", e))?;

    let timer = AutoOffTimer::new().map_err(roomwatch::error::Error::from)?;

    let mut hw = HardwareAdapter::new(
        OledDisplay::new(oled),
        PixelStrip::new(matrix),
        timer,
        Ets,
        config.adc_settle_us,
    );
    hw.all_off();

    // ── 5. Service ────────────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut sched = CycleScheduler::new(config.cycle_period_ms);
    let mut sink = LogEventSink::new();
    let mut app = MonitorService::new(config);
    app.start(&SHARED, &mut sink);

    // ISRs last: the debounce window is configured and SHARED is live.
    hw_init::init_isr_service().map_err(roomwatch::error::Error::from)?;

    info!("System ready. Entering cycle loop.");

    // ── 6. Cycle loop ─────────────────────────────────────────
    loop {
        sched.begin(clock.uptime_ms());
        app.cycle(&SHARED, &mut hw, &mut sink);
        let sleep_ms = sched.finish(clock.uptime_ms());

        if sched.cycles() % STATS_EVERY_CYCLES == 0 {
            info!(
                "SCHED | cycles={} overruns={} worst={} ms",
                sched.cycles(),
                sched.overruns(),
                sched.worst_case_ms()
            );
        }

        std::thread::sleep(Duration::from_millis(u64::from(sleep_ms)));
    }
}
