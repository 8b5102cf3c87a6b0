//! Deferred-task capability for the mismatch flip-back.
//!
//! The session never sleeps. It asks a [`Scheduler`] to hand a
//! [`DeferredTask`] back after a delay, and the driver feeds the task to
//! [`GameSession::fire`](crate::GameSession::fire) when it comes due.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Work the session deferred to a later point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeferredTask {
    /// Flip a mismatched pair back face down and unlock the board.
    ResolveMismatch {
        /// Game the mismatch belongs to. Tasks from earlier games are stale.
        generation: u64,
    },
}

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

/// Schedules tasks to be delivered back to the session after a delay.
pub trait Scheduler {
    /// Schedules `task` to come due after `delay`.
    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskHandle;

    /// Cancels a scheduled task. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}

#[derive(Debug, Clone)]
struct Pending {
    due: Duration,
    handle: TaskHandle,
    task: DeferredTask,
}

/// Fake clock for tests and headless drivers.
///
/// Time only moves when [`ManualScheduler::advance`] is called.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    pending: Vec<Pending>,
}

impl ManualScheduler {
    /// Creates a clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed fake time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward and returns the tasks that came due, earliest first.
    #[instrument(skip(self), fields(now = ?self.now))]
    pub fn advance(&mut self, by: Duration) -> Vec<DeferredTask> {
        self.now += by;
        let now = self.now;
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by_key(|p| (p.due, p.handle));
        debug!(fired = due.len(), remaining = self.pending.len(), "Clock advanced");
        due.into_iter().map(|p| p.task).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending {
            due: self.now + delay,
            handle,
            task,
        });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|p| p.handle != handle);
    }
}
