use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::control::schedule::PeriodicTask;

fn counting_task(period: Duration) -> (PeriodicTask, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let task_count = Arc::clone(&count);
    let task = PeriodicTask::spawn("test-counter", period, move || {
        let count = Arc::clone(&task_count);
        async move {
            count.fetch_add(1, Ordering::SeqCst);
        }
    });
    (task, count)
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_after_one_period() {
    let (task, count) = counting_task(Duration::from_secs(5));
    settle().await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    advance(4).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    advance(1).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    advance(5).await;
    advance(5).await;
    assert_eq!(count.load(Ordering::SeqCst), 3);

    assert_eq!(task.name(), "test-counter");
    assert!(task.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_ticks() {
    let (task, count) = counting_task(Duration::from_secs(5));
    advance(5).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);

    task.cancel().await;
    advance(60).await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts() {
    let (task, count) = counting_task(Duration::from_secs(5));

    drop(task);
    advance(60).await;

    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_zero_period_does_not_spin() {
    let (task, count) = counting_task(Duration::ZERO);

    tokio::time::advance(Duration::from_millis(3)).await;
    settle().await;

    assert!(count.load(Ordering::SeqCst) >= 1);
    task.cancel().await;
}
