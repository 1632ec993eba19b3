use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Periodic wall timer.
///
/// The first tick fires one full period after creation. When the caller falls
/// behind, missed ticks are skipped rather than fired in a burst, so a slow
/// callback never sees back-to-back invocations.
///
/// Must be created inside a Tokio runtime.
#[derive(Debug)]
pub struct ZTimer {
    period: Duration,
    interval: Interval,
    fired: u64,
}

impl ZTimer {
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            period,
            interval,
            fired: 0,
        }
    }

    /// Wait for the next tick. Cancel-safe.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
        self.fired += 1;
        tracing::trace!("Timer tick #{} (period {:?})", self.fired, self.period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let start = Instant::now();
        let mut timer = ZTimer::new(Duration::from_secs(1));
        timer.tick().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(timer.fired, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn missed_ticks_are_skipped() {
        let start = Instant::now();
        let mut timer = ZTimer::new(Duration::from_secs(1));
        // Fall behind by several periods
        tokio::time::sleep(Duration::from_millis(3500)).await;
        timer.tick().await;
        timer.tick().await;
        // The second tick realigns to the schedule instead of firing at once
        assert!(start.elapsed() >= Duration::from_secs(4));
        assert_eq!(timer.fired, 2);
    }
}
