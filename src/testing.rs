//! Deterministic collaborators for tests.
//!
//! Games driven by the tokio runtime or the wall clock are hard to pin down in a test. The [`ManualScheduler`][manual] here replaces both: it only moves time forward when told to, so tick counts, elapsed seconds and delayed sound cues come out the same on every run. Nothing in the engine depends on this module.
//!
//! [manual]: struct.ManualScheduler.html "ManualScheduler — runs tasks in virtual time, only when told to"

use core::{
    fmt::{self, Debug, Formatter},
    time::Duration,
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Instant,
};
use crate::{Clock, OneShotTask, RepeatingTask, Scheduler, TaskHandle};

enum Task {
    Once(OneShotTask),
    Repeat(RepeatingTask, Duration),
}
struct Scheduled {
    id: u64,
    due: Duration,
    task: Task,
    cancelled: Arc<AtomicBool>,
}
#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    queue: Vec<Scheduled>,
}

/// Runs tasks in virtual time, only when told to.
///
/// The scheduler doubles as a [`Clock`][clock] reading the same virtual time, so a game driven by it is fully deterministic: `advance` moves the clock forward and runs every task which came due on the way, in order.
///
/// [clock]: trait.Clock.html "Clock — a source of monotonic time"
pub struct ManualScheduler {
    origin: Instant,
    state: Mutex<ManualState>,
}
impl ManualScheduler {
    /// Creates a scheduler whose virtual time starts now.
    pub fn new() -> Self {
        Self { origin: Instant::now(), state: Mutex::new(ManualState::default()) }
    }
    fn lock(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn push(&self, delay: Duration, task: Task) -> TaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay;
        state.queue.push(Scheduled { id, due, task, cancelled: Arc::clone(&cancelled) });
        TaskHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
    /// Returns how much virtual time has passed since creation.
    pub fn elapsed(&self) -> Duration {
        self.lock().now
    }
    /// Returns the number of tasks which are neither cancelled nor finished.
    pub fn pending(&self) -> usize {
        self.lock().queue.iter()
            .filter(|scheduled| !scheduled.cancelled.load(Ordering::SeqCst))
            .count()
    }
    /// Moves virtual time forward by `by`, running every task which comes due.
    ///
    /// Tasks run outside of the internal lock, so they may schedule more work.
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;
        loop {
            let next = {
                let mut state = self.lock();
                state.queue.retain(|scheduled| !scheduled.cancelled.load(Ordering::SeqCst));
                let position = state.queue.iter()
                    .enumerate()
                    .filter(|(_, scheduled)| scheduled.due <= target)
                    .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.id))
                    .map(|(position, _)| position);
                match position {
                    Some(position) => {
                        let scheduled = state.queue.swap_remove(position);
                        state.now = scheduled.due;
                        scheduled
                    }
                    None => {
                        state.now = target;
                        break;
                    }
                }
            };
            match next.task {
                Task::Once(task) => task(),
                Task::Repeat(mut task, period) => {
                    task();
                    if !next.cancelled.load(Ordering::SeqCst) {
                        let mut state = self.lock();
                        state.queue.push(Scheduled {
                            id: next.id,
                            due: next.due + period,
                            task: Task::Repeat(task, period),
                            cancelled: next.cancelled,
                        });
                    }
                }
            }
        }
    }
}
impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}
impl Debug for ManualScheduler {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("elapsed", &self.elapsed())
            .field("pending", &self.pending())
            .finish()
    }
}
impl Scheduler for ManualScheduler {
    fn repeat(&self, period: Duration, task: RepeatingTask) -> TaskHandle {
        assert!(!period.is_zero(), "a repeating task needs a non-zero period");
        self.push(period, Task::Repeat(task, period))
    }
    fn once(&self, delay: Duration, task: OneShotTask) -> TaskHandle {
        self.push(delay, Task::Once(task))
    }
}
impl Clock for ManualScheduler {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}
