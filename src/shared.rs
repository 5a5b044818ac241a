//! State shared between interrupt/timer context and the main cycle.
//!
//! | Field            | Writer                 | Reader        |
//! |------------------|------------------------|---------------|
//! | `nav`            | button ISRs            | main cycle    |
//! | `full_recording` | Record ISR             | main cycle    |
//! | `alerts`         | main cycle (CAS), timer| both          |
//! | `debouncer`      | button ISRs            | button ISRs   |
//! | `events`         | timer task             | main cycle    |
//!
//! All fields are atomics or a critical-section channel.  The ISR entry
//! point [`SharedState::on_edge`] touches atomics only.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::alarm::{AlertChannel, AlertFlags};
use crate::drivers::button::{Debouncer, InputId};
use crate::events::{Event, EventQueue};
use crate::rooms::ROOM_COUNT;

/// Default quiet window used until the service applies its configuration.
const DEFAULT_DEBOUNCE_MS: u32 = 250;

// ── Navigation ────────────────────────────────────────────────

/// Selected room index in `[0, count - 1]`, saturating at both ends.
pub struct Navigation {
    index: AtomicU8,
    count: u8,
}

impl Navigation {
    pub const fn new(count: u8) -> Self {
        Self {
            index: AtomicU8::new(0),
            count: if count == 0 { 1 } else { count },
        }
    }

    pub fn selected(&self) -> usize {
        self.index.load(Ordering::Acquire) as usize
    }

    fn last(&self) -> u8 {
        self.count - 1
    }

    /// Step back one room; stays at 0.  Returns the new index.
    pub fn previous(&self) -> usize {
        let prev = self
            .index
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| i.checked_sub(1))
            .unwrap_or_else(|i| i.saturating_add(1));
        prev.saturating_sub(1) as usize
    }

    /// Step forward one room; stays at the last room.  Returns the new index.
    pub fn next(&self) -> usize {
        let last = self.last();
        let prev = self
            .index
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| {
                (i < last).then_some(i + 1)
            })
            .unwrap_or_else(|i| i.saturating_sub(1));
        (prev + 1).min(last) as usize
    }

    /// Jump to `index`, clamped.
    pub fn select(&self, index: usize) -> usize {
        let i = index.min(self.last() as usize) as u8;
        self.index.store(i, Ordering::Release);
        i as usize
    }
}

// ── Shared state ──────────────────────────────────────────────

pub struct SharedState {
    pub nav: Navigation,
    full_recording: AtomicBool,
    pub alerts: AlertFlags,
    pub debouncer: Debouncer,
    pub events: EventQueue,
}

impl SharedState {
    pub const fn new(room_count: u8) -> Self {
        Self {
            nav: Navigation::new(room_count),
            full_recording: AtomicBool::new(false),
            alerts: AlertFlags::new(),
            debouncer: Debouncer::new(DEFAULT_DEBOUNCE_MS),
            events: EventQueue::new(),
        }
    }

    pub fn full_recording(&self) -> bool {
        self.full_recording.load(Ordering::Acquire)
    }

    /// Flip the override.  Returns the new value.
    pub fn toggle_full_recording(&self) -> bool {
        !self.full_recording.fetch_xor(true, Ordering::AcqRel)
    }

    /// Button edge entry point (interrupt context).  Returns whether the
    /// edge survived debouncing.
    pub fn on_edge(&self, input: InputId, now_ms: u32) -> bool {
        if !self.debouncer.accept(input, now_ms) {
            return false;
        }
        match input {
            InputId::Previous => {
                self.nav.previous();
            }
            InputId::Next => {
                self.nav.next();
            }
            InputId::Record => {
                self.toggle_full_recording();
            }
        }
        true
    }

    /// Auto-off timer entry point (timer task context).  Cuts the tone
    /// through `silence`, then releases the channel and reports the expiry
    /// to the main cycle.
    ///
    /// The flag is cleared only after the buzzer is silent, so the main
    /// cycle can never re-arm a channel whose tone is about to be cut.
    pub fn on_auto_off(&self, ch: AlertChannel, silence: impl FnOnce(AlertChannel)) {
        silence(ch);
        if self.alerts.release(ch) {
            // A full queue drops the report only; the buzzer is already
            // silent and the channel can rearm.
            let _ = self.events.push(Event::AlertExpired(ch));
        }
    }
}

/// Device-wide instance.  ISR and timer callbacks reach it directly.
pub static SHARED: SharedState = SharedState::new(ROOM_COUNT as u8);
