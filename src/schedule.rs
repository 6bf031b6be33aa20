//! Deferred and recurring work: the clock tick and the delayed sound cues.
//!
//! The engine never sleeps or spawns on its own. It hands closures to a [`Scheduler`][scheduler] and keeps the returned [`TaskHandle`][handle]s, which it cancels when the game ends, restarts or is dropped.
//!
//! [scheduler]: trait.Scheduler.html "Scheduler — runs deferred and recurring tasks"
//! [handle]: struct.TaskHandle.html "TaskHandle — cancels a scheduled task"

use core::{
    fmt::{self, Debug, Formatter},
    time::Duration,
};
use tokio::runtime::Handle;

/// A task which runs every time its period elapses.
pub type RepeatingTask = Box<dyn FnMut() + Send + 'static>;
/// A task which runs once after its delay elapses.
pub type OneShotTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs deferred and recurring tasks on behalf of a game.
pub trait Scheduler: Send + Sync {
    /// Runs `task` every `period`, starting one period from now, until the handle is cancelled.
    ///
    /// # Panics
    /// Implementations may panic if `period` is zero.
    fn repeat(&self, period: Duration, task: RepeatingTask) -> TaskHandle;
    /// Runs `task` once, `delay` from now, unless the handle is cancelled first.
    fn once(&self, delay: Duration, task: OneShotTask) -> TaskHandle;
}

/// Cancels a scheduled task.
///
/// Dropping a handle does **not** cancel the task: fire-and-forget work simply drops its handle.
pub struct TaskHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}
impl TaskHandle {
    /// Creates a handle which runs `cancel` the first time it is cancelled.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }
    /// Creates a handle with nothing to cancel.
    pub const fn detached() -> Self {
        Self { cancel: None }
    }
    /// Cancels the task. Cancelling twice, or after the task already ran, does nothing.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
    /// Returns `true` if `cancel` has not been called yet.
    pub const fn is_armed(&self) -> bool {
        self.cancel.is_some()
    }
}
impl Debug for TaskHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("armed", &self.is_armed())
            .finish()
    }
}

/// Runs tasks on a tokio runtime.
///
/// Repeating tasks are driven by `tokio::time::interval` and one-shot tasks by `tokio::time::sleep`; cancelling aborts the spawned task. The runtime must have its time driver enabled.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
}
impl TokioScheduler {
    /// Creates a scheduler spawning onto the given runtime.
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }
    /// Creates a scheduler spawning onto the runtime of the calling context, or `None` outside of one.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}
impl Scheduler for TokioScheduler {
    fn repeat(&self, period: Duration, mut task: RepeatingTask) -> TaskHandle {
        let join = self.handle.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                task();
            }
        });
        TaskHandle::new(move || join.abort())
    }
    fn once(&self, delay: Duration, task: OneShotTask) -> TaskHandle {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        TaskHandle::new(move || join.abort())
    }
}

/// Drops every task without running it.
///
/// Used when no runtime is available: the game still works, but the clock only updates when asked and delayed sound cues never play.
#[derive(Copy, Clone, Debug, Default)]
pub struct InertScheduler;
impl Scheduler for InertScheduler {
    fn repeat(&self, _period: Duration, _task: RepeatingTask) -> TaskHandle {
        TaskHandle::detached()
    }
    fn once(&self, _delay: Duration, _task: OneShotTask) -> TaskHandle {
        TaskHandle::detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
        let count = Arc::new(AtomicUsize::new(0));
        let read = Arc::clone(&count);
        (count, move || read.load(Ordering::SeqCst))
    }

    #[test]
    fn inert_scheduler_drops_tasks() {
        let (count, read) = counter();
        let handle = InertScheduler.once(Duration::ZERO, Box::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        }));
        assert!(!handle.is_armed());
        assert_eq!(read(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_repeat_ticks_until_cancelled() {
        let scheduler = TokioScheduler::try_current().unwrap();
        let (count, read) = counter();
        let mut handle = scheduler.repeat(Duration::from_secs(1), Box::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        }));
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(read(), 3);
        handle.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(read(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_once_runs_after_delay() {
        let scheduler = TokioScheduler::try_current().unwrap();
        let (count, read) = counter();
        let _handle = scheduler.once(Duration::from_millis(300), Box::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        }));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(read(), 0);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(read(), 1);
    }

    #[test]
    fn no_runtime_no_tokio_scheduler() {
        assert!(TokioScheduler::try_current().is_none());
    }
}
