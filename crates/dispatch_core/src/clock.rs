//! Fixed-period tick clock driving the navigation animation.
//!
//! Wall-clock time is fed in by the caller (a render loop, a test) and
//! converted into a whole number of due ticks. Fractional leftovers carry
//! over to the next call. Cancelling drops the leftover budget, so once
//! [`TickClock::cancel`] returns no further tick is ever reported until the
//! clock is started again.

use std::time::Duration;

pub const DEFAULT_TICK_PERIOD_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TickClock {
    period_ms: u64,
    budget_us: u128,
    running: bool,
    ticks: u64,
}

impl TickClock {
    pub fn new(period_ms: u64) -> Self {
        debug_assert!(period_ms > 0, "tick period must be positive");
        Self {
            period_ms: period_ms.max(1),
            budget_us: 0,
            running: false,
            ticks: 0,
        }
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks reported since the last start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time since the last start, in whole ticks.
    pub fn now_ms(&self) -> u64 {
        self.ticks * self.period_ms
    }

    /// Start from zero. Restarting a running clock discards its state.
    pub fn start(&mut self) {
        self.budget_us = 0;
        self.ticks = 0;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.budget_us = 0;
    }

    /// Feed elapsed wall time; returns how many ticks fell due.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        if !self.running {
            return 0;
        }
        self.budget_us += elapsed.as_micros();
        let period_us = u128::from(self.period_ms) * 1000;
        let due = self.budget_us / period_us;
        self.budget_us -= due * period_us;
        let due = u64::try_from(due).unwrap_or(u64::MAX);
        self.ticks = self.ticks.saturating_add(due);
        due
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD_MS)
    }
}
