//! ISR-side debouncing for the three navigation buttons.
//!
//! ## Hardware
//!
//! Active-low momentary switches with internal pull-ups. Each GPIO fires
//! on the falling edge; the ISR reads the monotonic clock and asks the
//! [`Debouncer`] whether the edge counts as a press.
//!
//! ## Debounce rule
//!
//! | Condition                                    | Result   |
//! |----------------------------------------------|----------|
//! | First edge ever seen on this input           | accepted |
//! | `now - last_accepted > window`               | accepted |
//! | `now - last_accepted <= window`              | rejected |
//!
//! Each input keeps its own timestamp. Only *accepted* edges move it, so a
//! burst of bounces cannot keep a held button locked out forever.
//!
//! Everything here is lock-free atomics; it is safe to call from
//! interrupt context.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// The physical buttons, indexed in GPIO ISR registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InputId {
    Previous = 0,
    Next = 1,
    Record = 2,
}

impl InputId {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::Previous, Self::Next, Self::Record];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index); used to decode the ISR argument.
    pub const fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Self::Previous),
            1 => Some(Self::Next),
            2 => Some(Self::Record),
            _ => None,
        }
    }
}

pub struct Debouncer {
    window_ms: AtomicU32,
    last: [AtomicU32; InputId::COUNT],
    seen: [AtomicBool; InputId::COUNT],
}

impl Debouncer {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms: AtomicU32::new(window_ms),
            last: [AtomicU32::new(0), AtomicU32::new(0), AtomicU32::new(0)],
            seen: [AtomicBool::new(false), AtomicBool::new(false), AtomicBool::new(false)],
        }
    }

    /// Decide whether an edge on `input` at `now_ms` is a real press.
    /// Accepted edges record `now_ms` as the input's new reference.
    pub fn accept(&self, input: InputId, now_ms: u32) -> bool {
        let i = input.index();
        let window = self.window_ms.load(Ordering::Relaxed);
        if self.seen[i].load(Ordering::Acquire) {
            let last = self.last[i].load(Ordering::Acquire);
            if now_ms.wrapping_sub(last) <= window {
                return false;
            }
        }
        self.last[i].store(now_ms, Ordering::Release);
        self.seen[i].store(true, Ordering::Release);
        true
    }

    pub fn set_window_ms(&self, window_ms: u32) {
        self.window_ms.store(window_ms, Ordering::Relaxed);
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms.load(Ordering::Relaxed)
    }
}
