// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Millisecond timestamps for job creation.
//!
//! Jobs are stamped with Unix-epoch milliseconds and clock-keyed ids read the
//! same value, so a test that controls the clock controls both.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of Unix-epoch milliseconds.
pub trait Clock: Clone + Send + Sync {
    fn epoch_ms(&self) -> u64;
}

#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_millis() as u64)
    }
}

#[derive(Debug, Clone, Copy)]
struct Ticks {
    now_ms: u64,
    step_ms: u64,
}

/// Hand-driven clock. Clones share one reading.
///
/// Every reading moves time forward by the clock's step; a still clock
/// (step zero) only moves when told to.
#[derive(Clone)]
pub struct FakeClock {
    ticks: Arc<Mutex<Ticks>>,
}

impl FakeClock {
    /// A still clock at a fixed instant.
    pub fn at(epoch_ms: u64) -> Self {
        Self::stepping(epoch_ms, 0)
    }

    /// Starts at `epoch_ms` and moves `step_ms` after each reading, so
    /// consecutive jobs get distinct timestamps.
    pub fn stepping(epoch_ms: u64, step_ms: u64) -> Self {
        Self { ticks: Arc::new(Mutex::new(Ticks { now_ms: epoch_ms, step_ms })) }
    }

    pub fn advance(&self, by: Duration) {
        let mut ticks = self.ticks.lock();
        ticks.now_ms = ticks.now_ms.saturating_add(by.as_millis() as u64);
    }

    /// Step backwards, as a wall clock does after an NTP correction.
    pub fn rewind(&self, by: Duration) {
        let mut ticks = self.ticks.lock();
        ticks.now_ms = ticks.now_ms.saturating_sub(by.as_millis() as u64);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::at(1_000_000)
    }
}

impl Clock for FakeClock {
    fn epoch_ms(&self) -> u64 {
        let mut ticks = self.ticks.lock();
        let now = ticks.now_ms;
        ticks.now_ms = now.saturating_add(ticks.step_ms);
        now
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
