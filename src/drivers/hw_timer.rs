//! Alert auto-off timers using ESP-IDF's esp_timer API.
//!
//! One one-shot timer per [`AlertChannel`].  The callback runs in the ESP
//! timer task context (not ISR) and calls
//! [`SharedState::on_auto_off`](crate::shared::SharedState::on_auto_off)
//! with [`buzzer::cut`], which silences the buzzer before the playing flag
//! is cleared.
//!
//! On simulation targets the timers are a deadline table that tests (or a
//! host loop) advance with [`AutoOffTimer::fire_due`].

use crate::alarm::AlertChannel;
use crate::app::ports::TimerPort;
use crate::drivers::buzzer;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init::HwInitError;

#[cfg(not(target_os = "espidf"))]
use crate::shared::SharedState;

// ── Device ────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn auto_off_cb(arg: *mut core::ffi::c_void) {
    if let Some(ch) = AlertChannel::from_index(arg as usize) {
        crate::shared::SHARED.on_auto_off(ch, buzzer::cut);
    }
}

#[cfg(target_os = "espidf")]
pub struct AutoOffTimer {
    handles: [esp_timer_handle_t; AlertChannel::COUNT],
}

#[cfg(target_os = "espidf")]
impl AutoOffTimer {
    /// Create (but do not start) one timer per alert channel.
    pub fn new() -> Result<Self, HwInitError> {
        const NAMES: [&[u8]; AlertChannel::COUNT] = [b"alert_low\0", b"alert_high\0"];
        let mut handles = [core::ptr::null_mut(); AlertChannel::COUNT];

        for ch in AlertChannel::ALL {
            let args = esp_timer_create_args_t {
                callback: Some(auto_off_cb),
                arg: ch.index() as *mut core::ffi::c_void,
                dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
                name: NAMES[ch.index()].as_ptr().cast(),
                skip_unhandled_events: false,
            };
            // SAFETY: handle slot is a local; the callback only touches SHARED atomics.
            let ret = unsafe { esp_timer_create(&args, &mut handles[ch.index()]) };
            if ret != ESP_OK {
                return Err(HwInitError::TimerCreateFailed(ret));
            }
        }

        log::info!("hw_timer: auto-off timers created");
        Ok(Self { handles })
    }

    /// Stop any pending auto-off timers.
    pub fn cancel_all(&mut self) {
        for &h in &self.handles {
            // SAFETY: handle created in new(); stopping an idle timer returns
            // ESP_ERR_INVALID_STATE, which is harmless.
            unsafe {
                esp_timer_stop(h);
            }
        }
    }
}

#[cfg(target_os = "espidf")]
impl TimerPort for AutoOffTimer {
    fn schedule_once(&mut self, delay_ms: u32, channel: AlertChannel) {
        let h = self.handles[channel.index()];
        // SAFETY: handle created in new(); main cycle only.
        let ret = unsafe { esp_timer_start_once(h, u64::from(delay_ms) * 1_000) };
        if ret != ESP_OK {
            log::warn!("hw_timer: {} auto-off start failed (rc={})", channel, ret);
        }
    }
}

#[cfg(target_os = "espidf")]
impl Drop for AutoOffTimer {
    fn drop(&mut self) {
        self.cancel_all();
        for &h in &self.handles {
            // SAFETY: stopped above; handle is not used after this.
            unsafe {
                esp_timer_delete(h);
            }
        }
    }
}

// ── Simulation ────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
pub struct AutoOffTimer {
    now_ms: u32,
    deadlines: [Option<u32>; AlertChannel::COUNT],
}

#[cfg(not(target_os = "espidf"))]
impl AutoOffTimer {
    pub fn new() -> Self {
        log::info!("hw_timer(sim): auto-off timers driven by fire_due()");
        Self::default()
    }

    /// Advance simulated time to `now_ms` and fire every timer that is
    /// due.  Returns how many fired.
    pub fn fire_due(&mut self, now_ms: u32, shared: &SharedState) -> usize {
        self.now_ms = now_ms;
        let mut fired = 0;
        for ch in AlertChannel::ALL {
            let due = self.deadlines[ch.index()]
                .is_some_and(|deadline| now_ms.wrapping_sub(deadline) as i32 >= 0);
            if due {
                self.deadlines[ch.index()] = None;
                shared.on_auto_off(ch, buzzer::cut);
                fired += 1;
            }
        }
        fired
    }

    /// Absolute expiry time of a pending timer.
    pub fn pending(&self, ch: AlertChannel) -> Option<u32> {
        self.deadlines[ch.index()]
    }

    pub fn cancel_all(&mut self) {
        self.deadlines = [None; AlertChannel::COUNT];
    }
}

#[cfg(not(target_os = "espidf"))]
impl TimerPort for AutoOffTimer {
    fn schedule_once(&mut self, delay_ms: u32, channel: AlertChannel) {
        let slot = &mut self.deadlines[channel.index()];
        if slot.is_some() {
            // esp_timer_start_once refuses a running timer; mirror that.
            log::warn!("hw_timer(sim): {} auto-off already pending", channel);
            return;
        }
        *slot = Some(self.now_ms.wrapping_add(delay_ms));
    }
}
