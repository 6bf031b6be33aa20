//! The game clock.

use core::time::Duration;
use std::{sync::Arc, time::Instant};
use crate::{Scheduler, Store, TaskHandle};

/// How often a running clock publishes its value.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A source of monotonic time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The wall clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
    #[inline(always)]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Counts the time spent playing.
///
/// The clock only runs while a game is being played. Elapsed time is computed on demand from the start instant; additionally, a tick registered with a [`Scheduler`][scheduler] publishes the whole elapsed seconds once per [`TICK_PERIOD`][period]. Stopping freezes the value and cancels the tick.
///
/// Both starting and stopping are idempotent: starting a running clock and stopping a stopped one do nothing.
///
/// [scheduler]: trait.Scheduler.html "Scheduler — runs deferred and recurring tasks"
/// [period]: constant.TICK_PERIOD.html "TICK_PERIOD — how often a running clock publishes its value"
pub struct GameTimer {
    clock: Arc<dyn Clock>,
    started_at: Option<Instant>,
    frozen: Duration,
    tick: Option<TaskHandle>,
}
impl GameTimer {
    /// Creates a stopped clock reading zero.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, started_at: None, frozen: Duration::ZERO, tick: None }
    }
    /// Returns `true` between `start` and `stop`.
    #[inline]
    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
    /// Starts the clock from zero and registers the tick publishing into `published`.
    pub fn start(&mut self, scheduler: &dyn Scheduler, published: Store<u64>) {
        if self.is_running() {
            return;
        }
        let started_at = self.clock.now();
        self.started_at = Some(started_at);
        self.frozen = Duration::ZERO;

        let clock = Arc::clone(&self.clock);
        self.tick = Some(scheduler.repeat(TICK_PERIOD, Box::new(move || {
            let elapsed = clock.now().saturating_duration_since(started_at);
            published.set(elapsed.as_secs());
        })));
    }
    /// Stops the clock, freezing and returning the elapsed time.
    pub fn stop(&mut self) -> Duration {
        if let Some(started_at) = self.started_at.take() {
            self.frozen = self.clock.now().saturating_duration_since(started_at);
        }
        self.cancel_tick();
        self.frozen
    }
    /// Stops the clock and sets it back to zero.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.frozen = Duration::ZERO;
        self.cancel_tick();
    }
    /// Returns the time elapsed since the start, or the frozen value if the clock is stopped.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self.clock.now().saturating_duration_since(started_at),
            None => self.frozen,
        }
    }
    /// Returns the whole seconds of [`elapsed`](#method.elapsed).
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }
    fn cancel_tick(&mut self) {
        if let Some(mut tick) = self.tick.take() {
            tick.cancel();
        }
    }
}
impl Drop for GameTimer {
    fn drop(&mut self) {
        self.cancel_tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualScheduler;

    fn timer() -> (Arc<ManualScheduler>, GameTimer, Store<u64>) {
        let scheduler = Arc::new(ManualScheduler::new());
        let timer = GameTimer::new(scheduler.clone());
        (scheduler, timer, Store::new(0))
    }

    #[test]
    fn reads_zero_before_start() {
        let (scheduler, timer, _) = timer();
        scheduler.advance(Duration::from_secs(5));
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed(), Duration::ZERO);
    }

    #[test]
    fn ticks_publish_whole_seconds() {
        let (scheduler, mut timer, store) = timer();
        timer.start(scheduler.as_ref(), store.clone());
        scheduler.advance(Duration::from_millis(2500));
        assert_eq!(store.get(), 2);
        assert_eq!(store.revision(), 2);
        assert_eq!(timer.elapsed(), Duration::from_millis(2500));
        assert_eq!(timer.elapsed_secs(), 2);
    }

    #[test]
    fn stop_freezes_and_cancels_the_tick() {
        let (scheduler, mut timer, store) = timer();
        timer.start(scheduler.as_ref(), store.clone());
        scheduler.advance(Duration::from_millis(3200));
        assert_eq!(timer.stop(), Duration::from_millis(3200));
        scheduler.advance(Duration::from_secs(10));
        assert_eq!(timer.elapsed(), Duration::from_millis(3200));
        assert_eq!(store.get(), 3);
        assert_eq!(scheduler.pending(), 0);
        // Stopping again changes nothing.
        assert_eq!(timer.stop(), Duration::from_millis(3200));
    }

    #[test]
    fn starting_twice_keeps_the_first_start() {
        let (scheduler, mut timer, store) = timer();
        timer.start(scheduler.as_ref(), store.clone());
        scheduler.advance(Duration::from_secs(2));
        timer.start(scheduler.as_ref(), store.clone());
        assert_eq!(timer.elapsed(), Duration::from_secs(2));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn reset_goes_back_to_zero() {
        let (scheduler, mut timer, store) = timer();
        timer.start(scheduler.as_ref(), store);
        scheduler.advance(Duration::from_secs(4));
        timer.reset();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert!(!timer.is_running());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn dropping_cancels_the_tick() {
        let (scheduler, mut timer, store) = timer();
        timer.start(scheduler.as_ref(), store);
        drop(timer);
        assert_eq!(scheduler.pending(), 0);
    }
}
