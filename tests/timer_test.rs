//! Tests for the tokio scheduler.

use std::time::Duration;
use strictly_match::TokioScheduler;
use strictly_memory::{DeferredTask, Scheduler};
use tokio::time::timeout;

const TASK: DeferredTask = DeferredTask::ResolveMismatch { generation: 3 };

#[tokio::test]
async fn test_task_delivered_after_delay() {
    let (mut scheduler, mut rx) = TokioScheduler::channel();
    scheduler.schedule_after(Duration::from_millis(20), TASK);

    assert!(rx.try_recv().is_err());
    let delivered = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("delivered in time");
    assert_eq!(delivered, Some(TASK));
}

#[tokio::test]
async fn test_cancelled_task_not_delivered() {
    let (mut scheduler, mut rx) = TokioScheduler::channel();
    let handle = scheduler.schedule_after(Duration::from_millis(20), TASK);
    scheduler.cancel(handle);
    assert_eq!(scheduler.active(), 0);

    let waited = timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(waited.is_err(), "cancelled task was delivered");
}
