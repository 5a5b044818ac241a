//! Fixed-cadence cycle pacing.
//!
//! The main loop brackets every cycle with [`CycleScheduler::begin`] and
//! [`CycleScheduler::finish`], then sleeps for the returned duration.
//!
//! ```text
//!   begin(t0)                  finish(t1)          next begin
//!      │◀──── cycle work ────▶│◀──── sleep ────▶│
//!      │◀───────────────── period ─────────────▶│
//! ```
//!
//! A cycle that runs longer than the period is counted as an overrun and
//! the next cycle starts immediately.  Missed periods are never replayed.

use log::warn;

pub struct CycleScheduler {
    period_ms: u32,
    cycle_start: u32,
    cycles: u32,
    overruns: u32,
    worst_case_ms: u32,
}

impl CycleScheduler {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            cycle_start: 0,
            cycles: 0,
            overruns: 0,
            worst_case_ms: 0,
        }
    }

    /// Mark the start of a cycle.
    pub fn begin(&mut self, now_ms: u32) {
        self.cycle_start = now_ms;
    }

    /// Mark the end of a cycle.  Returns how long to sleep before the next.
    pub fn finish(&mut self, now_ms: u32) -> u32 {
        let elapsed = now_ms.wrapping_sub(self.cycle_start);
        self.cycles = self.cycles.wrapping_add(1);
        self.worst_case_ms = self.worst_case_ms.max(elapsed);

        if elapsed > self.period_ms {
            self.overruns = self.overruns.saturating_add(1);
            warn!(
                "cycle {} overran: {} ms > {} ms period",
                self.cycles, elapsed, self.period_ms
            );
            0
        } else {
            self.period_ms - elapsed
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Longest cycle seen so far.
    pub fn worst_case_ms(&self) -> u32 {
        self.worst_case_ms
    }
}
