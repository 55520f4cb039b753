//! One-second tick source.
//!
//! Both the deletion board and the sequencer are plain state machines; a
//! single [`Ticker`] drives them. Dropping the ticker stops all timing, so
//! whoever owns it owns every pending countdown too.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Resolution of every countdown in the crate.
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Ticker {
    interval: Interval,
    ticks: u64,
}

impl Ticker {
    /// A ticker whose first tick lands one period from now.
    pub fn new() -> Self {
        Self::with_period(TICK)
    }

    pub fn with_period(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval, ticks: 0 }
    }

    /// Wait for the next tick and return how many have elapsed so far.
    pub async fn tick(&mut self) -> u64 {
        self.interval.tick().await;
        self.ticks += 1;
        self.ticks
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_a_full_period() {
        let start = Instant::now();
        let mut ticker = Ticker::new();
        assert_eq!(ticker.tick().await, 1);
        assert_eq!(start.elapsed(), TICK);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_are_one_second_apart() {
        let start = Instant::now();
        let mut ticker = Ticker::new();
        for _ in 0..7 {
            ticker.tick().await;
        }
        assert_eq!(ticker.ticks(), 7);
        assert_eq!(start.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_period() {
        let mut ticker = Ticker::with_period(Duration::from_millis(250));
        assert_eq!(ticker.period(), Duration::from_millis(250));
        let start = Instant::now();
        ticker.tick().await;
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(500));
    }
}
