use std::time::{Duration, Instant};

pub const TIMER_DEC_PER_SECOND: u64 = 60;

const MIN_INTERVAL: Duration = Duration::from_nanos(1);

// one of the two 60 Hz down-counters; whoever drives the clock decrements it
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
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

    // returns whether the timer is still running afterwards
    pub fn tick(&mut self) -> bool {
        self.count = self.count.saturating_sub(1);
        self.count > 0
    }
}

/// Fixed-rate scheduling for the driving loop. The interval is never shorter
/// than one nanosecond.
#[derive(Debug)]
pub struct Cadence {
    interval: Duration,
    last_tick: Instant,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            last_tick: Instant::now(),
        }
    }

    pub fn per_second(rate: u64) -> Self {
        Self::new(Duration::from_nanos(1_000_000_000 / rate.max(1)))
    }

    // whole intervals elapsed since the last call; leftover time carries over
    pub fn due(&mut self) -> u32 {
        self.due_at(Instant::now())
    }

    pub fn due_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        let ticks = elapsed.as_nanos() / self.interval.as_nanos();
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        self.last_tick += self.interval * ticks;
        ticks
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
