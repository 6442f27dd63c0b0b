use std::time::{Duration, Instant};

const TIMER_DEC_PER_SECOND: u64 = 60;
const TICK: Duration = Duration::from_nanos(1_000_000_000 / TIMER_DEC_PER_SECOND);

/// An 8-bit countdown register floored at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    pub count: u8,
}

impl Timer {
    pub fn new(init_count: u8) -> Self {
        Self { count: init_count }
    }

    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    pub fn decrement(&mut self, ticks: u32) {
        let ticks = ticks.min(u8::MAX as u32) as u8;
        self.count = self.count.saturating_sub(ticks);
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Converts elapsed wall-clock time into whole 60 Hz ticks, carrying the
/// fractional remainder to the next call.
#[derive(Debug, Clone)]
pub struct TimerClock {
    last_updated: Instant,
    carry: Duration,
}

impl TimerClock {
    pub fn new(now: Instant) -> Self {
        Self {
            last_updated: now,
            carry: Duration::ZERO,
        }
    }

    pub fn sync(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_updated) + self.carry;
        self.last_updated = now;

        let ticks = elapsed.as_nanos() / TICK.as_nanos();
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        self.carry = elapsed.saturating_sub(TICK * ticks);
        ticks
    }
}
