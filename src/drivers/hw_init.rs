//! One-shot hardware peripheral initialization.
//!
//! Configures the joystick ADC channels, button GPIOs and LEDC
//! timers/channels using raw ESP-IDF sys calls. Called once from `main()`
//! before the cycle loop starts.  The OLED (I²C) and LED matrix (RMT) are
//! brought up through `esp-idf-hal` drivers in `main` instead.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real peripherals.
//! On host/test: ADC reads come from injectable atomics
//! ([`sim_set_adc`]); every write is a no-op.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.  Each carries the
/// ESP-IDF return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
    IsrInstallFailed(i32),
    TimerCreateFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::TimerCreateFailed(rc) => write!(f, "esp_timer create failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the cycle loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_inputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-cycle ADC read path.  `init_adc()` completes before the cycle
/// loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for ch in [pins::ADC1_CH_JOYSTICK_X, pins::ADC1_CH_JOYSTICK_Y] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), ch, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured (CH0=joystick X, CH1=joystick Y)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded main-cycle access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        log::warn!("adc1_read: channel {} failed (rc={})", channel, ret);
        return 0;
    }
    raw.max(0) as u16
}

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [core::sync::atomic::AtomicU16; 2] = [
    core::sync::atomic::AtomicU16::new(2048),
    core::sync::atomic::AtomicU16::new(2048),
];

/// Inject the next raw value for a joystick channel (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    if let Some(slot) = SIM_ADC.get(channel as usize) {
        slot.store(raw, core::sync::atomic::Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> u16 {
    SIM_ADC
        .get(channel as usize)
        .map_or(0, |slot| slot.load(core::sync::atomic::Ordering::Relaxed))
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const BUTTON_GPIOS: [i32; crate::drivers::button::InputId::COUNT] = [
    pins::BTN_PREVIOUS_GPIO,
    pins::BTN_NEXT_GPIO,
    pins::BTN_RECORD_GPIO,
];

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    for &pin in &BUTTON_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: button GPIOs configured");
    Ok(())
}

// ── LEDC PWM ─────────────────────────────────────────────────

pub const LEDC_CH_BUZZER_LOW: u32 = 0;
pub const LEDC_CH_BUZZER_HIGH: u32 = 1;
pub const LEDC_CH_LED_R: u32 = 2;
pub const LEDC_CH_LED_G: u32 = 3;
pub const LEDC_CH_LED_B: u32 = 4;

/// Each buzzer has its own timer so the two tones can differ.
pub const LEDC_TIMER_BUZZER_LOW: u32 = 0;
pub const LEDC_TIMER_BUZZER_HIGH: u32 = 1;
pub const LEDC_TIMER_LED: u32 = 2;

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    let timers = [
        (LEDC_TIMER_BUZZER_LOW, pins::BUZZER_IDLE_FREQ_HZ),
        (LEDC_TIMER_BUZZER_HIGH, pins::BUZZER_IDLE_FREQ_HZ),
        (LEDC_TIMER_LED, pins::LED_PWM_FREQ_HZ),
    ];
    for (timer_num, freq_hz) in timers {
        let cfg = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num,
            duty_resolution: pins::PWM_RESOLUTION_BITS,
            freq_hz,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        // SAFETY: Called from single main-task context via init_peripherals().
        let ret = unsafe { ledc_timer_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcInitFailed(ret));
        }
    }

    let channels = [
        (LEDC_CH_BUZZER_LOW, LEDC_TIMER_BUZZER_LOW, pins::BUZZER_LOW_GPIO),
        (LEDC_CH_BUZZER_HIGH, LEDC_TIMER_BUZZER_HIGH, pins::BUZZER_HIGH_GPIO),
        (LEDC_CH_LED_R, LEDC_TIMER_LED, pins::LED_R_GPIO),
        (LEDC_CH_LED_G, LEDC_TIMER_LED, pins::LED_G_GPIO),
        (LEDC_CH_LED_B, LEDC_TIMER_LED, pins::LED_B_GPIO),
    ];
    for (channel, timer_sel, gpio_num) in channels {
        let ret = unsafe {
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel,
                timer_sel,
                gpio_num,
                duty: 0,
                hpoint: 0,
                ..Default::default()
            })
        };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcInitFailed(ret));
        }
    }

    info!("hw_init: LEDC configured (buzzers=CH0-1, led=CH2-4)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main cycle calls this function.
    let ret = unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel)
    };
    if ret != ESP_OK as i32 {
        log::warn!("ledc_set: channel {} failed (rc={})", channel, ret);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}

/// Retune a LEDC timer.  Used to set the buzzer pitch.
#[cfg(target_os = "espidf")]
pub fn ledc_set_freq(timer: u32, freq_hz: u32) {
    // SAFETY: timer configured in init_ledc(); main cycle only.
    let ret = unsafe {
        esp_idf_svc::sys::ledc_set_freq(ledc_mode_t_LEDC_LOW_SPEED_MODE, timer, freq_hz)
    };
    if ret != ESP_OK as i32 {
        log::warn!("ledc_set_freq: timer {} -> {} Hz failed (rc={})", timer, freq_hz, ret);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set_freq(_timer: u32, _freq_hz: u32) {}

// ── GPIO ISR Service ──────────────────────────────────────────

/// Milliseconds since boot, truncated to u32.  ISR-safe.
#[cfg(target_os = "espidf")]
pub fn now_ms() -> u32 {
    // SAFETY: esp_timer_get_time is an RTC counter read; safe in ISR context.
    (unsafe { esp_timer_get_time() } / 1_000) as u32
}

/// Shared handler for all three buttons.  `arg` carries the
/// [`InputId`](crate::drivers::button::InputId) index.
#[cfg(target_os = "espidf")]
unsafe extern "C" fn button_gpio_isr(arg: *mut core::ffi::c_void) {
    use crate::drivers::button::InputId;
    if let Some(input) = InputId::from_index(arg as usize) {
        crate::shared::SHARED.on_edge(input, now_ms());
    }
}

/// Install per-pin GPIO ISR service and register the button handlers.
/// Call after init_peripherals() and before the cycle loop.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    use crate::drivers::button::InputId;

    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The handler only touches
    // atomics in SHARED.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        for input in InputId::ALL {
            let pin = BUTTON_GPIOS[input.index()];
            gpio_set_intr_type(pin, gpio_int_type_t_GPIO_INTR_NEGEDGE);
            let ret = gpio_isr_handler_add(
                pin,
                Some(button_gpio_isr),
                input.index() as *mut core::ffi::c_void,
            );
            if ret != ESP_OK {
                return Err(HwInitError::IsrInstallFailed(ret));
            }
            gpio_intr_enable(pin);
        }

        info!("hw_init: ISR service installed (previous, next, record)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
