use std::{thread::sleep, time::{Duration, Instant}};

pub trait FrameClock {
    /// Wait out whatever is left of `budget` since the previous tick.
    fn tick(&mut self, budget: Duration);
}

/// Paces frames with `thread::sleep`.
pub struct SleepClock {
    last_tick: Instant,
}

impl SleepClock {
    pub fn new() -> Self {
        SleepClock { last_tick: Instant::now() }
    }

    fn remaining(&self, budget: Duration, now: Instant) -> Duration {
        budget.saturating_sub(now.duration_since(self.last_tick))
    }
}

impl Default for SleepClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SleepClock {
    fn tick(&mut self, budget: Duration) {
        let wait = self.remaining(budget, Instant::now());
        if !wait.is_zero() {
            sleep(wait);
        }
        self.last_tick = Instant::now();
    }
}
