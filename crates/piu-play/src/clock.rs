// Tick clock and real-time pacing.
//
// Game time is an integer millisecond count that advances by a fixed period per
// tick, independent of wall-clock time. `Pacer` optionally slows the loop down to
// real time.

use std::time::{Duration, Instant};

/// Fixed-period game clock starting at 0ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickClock {
    period_ms: i64,
    elapsed_ms: i64,
}

impl TickClock {
    /// A non-positive period is treated as 1ms.
    pub fn new(period_ms: i64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
        }
    }

    /// Returns the time of the tick to run now and moves the clock one period forward.
    pub fn next_tick(&mut self) -> i64 {
        let now = self.elapsed_ms;
        self.elapsed_ms += self.period_ms;
        now
    }

    /// Time of the next tick to be handed out.
    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms
    }

    pub fn period_ms(&self) -> i64 {
        self.period_ms
    }
}

impl Iterator for TickClock {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some(self.next_tick())
    }
}

/// Sleeps between ticks to hold a wall-clock cadence.
#[derive(Debug, Clone)]
pub struct Pacer {
    period: Duration,
    next: Instant,
}

impl Pacer {
    pub fn new(period_ms: i64) -> Self {
        let period = Duration::from_millis(period_ms.max(1) as u64);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Block until the next deadline. Returns `true` if the deadline had already
    /// passed, in which case the schedule restarts from now instead of catching up.
    pub fn wait(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.next {
            self.next = now + self.period;
            return true;
        }
        std::thread::sleep(self.next - now);
        self.next += self.period;
        false
    }
}
