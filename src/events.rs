//! Notifications handed from timer context to the main cycle.
//!
//! The auto-off timer callback runs in the esp_timer task.  It silences
//! the buzzer and clears the alert flag itself, then reports the expiry
//! here so the main cycle can log it.
//!
//! ```text
//! ┌──────────────┐  AlertExpired  ┌──────────────┐
//! │ esp_timer    │───────────────▶│  Main Cycle  │
//! │ (auto-off)   │                │  (consumer)  │
//! └──────────────┘                └──────────────┘
//! ```
//!
//! GPIO ISRs never push here; they only touch atomics.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::alarm::AlertChannel;

/// Maximum number of pending events.
pub const EVENT_QUEUE_CAP: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The auto-off timer for this alert channel fired and silenced it.
    AlertExpired(AlertChannel),
}

/// Bounded MPMC queue of [`Event`]s.
pub struct EventQueue {
    inner: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_CAP>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self { inner: Channel::new() }
    }

    /// Push an event.  Returns `false` if the queue is full (event dropped).
    pub fn push(&self, event: Event) -> bool {
        self.inner.try_send(event).is_ok()
    }

    /// Pop the oldest event, if any.
    pub fn pop(&self) -> Option<Event> {
        self.inner.try_receive().ok()
    }

    /// Drain all pending events into a callback, FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
