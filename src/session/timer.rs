//! Video-phase countdown

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::machine::Event;

/// Result of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Seconds left after this tick
    Running(u32),
    /// Time ran out; the countdown is already back at its ceiling
    Expired,
}

/// Per-question answer countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    ceiling: u32,
    remaining: u32,
}

impl Countdown {
    /// A countdown starting full. A zero ceiling is treated as one second.
    pub fn new(ceiling: u32) -> Self {
        let ceiling = ceiling.max(1);
        Self {
            ceiling,
            remaining: ceiling,
        }
    }

    pub fn tick(&mut self) -> CountdownTick {
        if self.remaining <= 1 {
            self.remaining = self.ceiling;
            CountdownTick::Expired
        } else {
            self.remaining -= 1;
            CountdownTick::Running(self.remaining)
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.ceiling;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }
}

/// Format seconds as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Spawn a ticker that sends `Tick { epoch }` every `period` until aborted
pub(crate) fn spawn_ticker(epoch: u64, period: Duration, tx: mpsc::Sender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticks.tick().await;
            if tx.send(Event::Tick { epoch }).await.is_err() {
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_once_and_resets() {
        let mut countdown = Countdown::new(3);

        assert_eq!(countdown.tick(), CountdownTick::Running(2));
        assert_eq!(countdown.tick(), CountdownTick::Running(1));
        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert_eq!(countdown.remaining(), 3);
        assert_eq!(countdown.tick(), CountdownTick::Running(2));
    }

    #[test]
    fn test_countdown_zero_ceiling() {
        let mut countdown = Countdown::new(0);
        assert_eq!(countdown.ceiling(), 1);
        assert_eq!(countdown.tick(), CountdownTick::Expired);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(120), "2:00");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(9), "0:09");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_sends_epoch() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = spawn_ticker(7, Duration::from_secs(1), tx);

        let start = Instant::now();
        assert!(matches!(rx.recv().await, Some(Event::Tick { epoch: 7 })));
        assert!(start.elapsed() >= Duration::from_secs(1));

        handle.abort();
    }
}
