/*!
 * Simulated Clock
 * Monotonic virtual time, optionally paced against the wall clock
 */

use std::thread;
use std::time::Duration;

/// How advancing the clock relates to real time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    /// Time jumps forward instantly
    #[default]
    Virtual,
    /// Each advance also sleeps for the same duration
    RealTime,
}

/// Single simulated-time source for a run
#[derive(Debug, Clone, Default)]
pub struct Clock {
    elapsed: Duration,
    pacing: Pacing,
}

impl Clock {
    pub fn virtual_time() -> Self {
        Self::default()
    }

    /// Clock that sleeps through every delay it is advanced by
    pub fn paced() -> Self {
        Self {
            elapsed: Duration::ZERO,
            pacing: Pacing::RealTime,
        }
    }

    /// Simulated time since the run started
    #[inline(always)]
    pub fn now(&self) -> Duration {
        self.elapsed
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn advance(&mut self, by: Duration) {
        if self.pacing == Pacing::RealTime && !by.is_zero() {
            thread::sleep(by);
        }
        self.elapsed = self.elapsed.saturating_add(by);
    }
}
