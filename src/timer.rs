//! Tokio-backed scheduler for the mismatch flip-back.

use std::collections::HashMap;
use std::time::Duration;
use strictly_memory::{DeferredTask, Scheduler, TaskHandle};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Delivers deferred tasks over a channel once their delay elapses.
///
/// Must be used from inside a tokio runtime. The UI loop drains the
/// receiver returned by [`TokioScheduler::channel`] and feeds each task to the
/// session.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: UnboundedSender<DeferredTask>,
    next_handle: u64,
    timers: HashMap<TaskHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiving end of its task channel.
    pub fn channel() -> (Self, UnboundedReceiver<DeferredTask>) {
        let (tx, rx) = unbounded_channel();
        let scheduler = Self {
            tx,
            next_handle: 0,
            timers: HashMap::new(),
        };
        (scheduler, rx)
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn active(&self) -> usize {
        self.timers.values().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    #[instrument(skip(self))]
    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskHandle {
        self.timers.retain(|_, timer| !timer.is_finished());

        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;

        let tx = self.tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the UI shut down; nothing left to resolve.
            let _ = tx.send(task);
        });
        self.timers.insert(handle, timer);
        debug!(?handle, "Timer started");
        handle
    }

    #[instrument(skip(self))]
    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(timer) = self.timers.remove(&handle) {
            timer.abort();
            debug!("Timer aborted");
        }
    }
}
