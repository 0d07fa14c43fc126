//! Periodic background work owned by a session

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// A task that runs a callback on a fixed period until cancelled
///
/// The first run happens one full period after spawning. Dropping the handle
/// aborts the task, so the work never outlives its owner.
pub struct PeriodicTask {
    name: &'static str,
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Spawn `tick` every `period` on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        // Measured from the spawn call, not from the task's first poll.
        let start = Instant::now() + period;

        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval_at(start, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = timer.tick() => tick().await,
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!(task = name, "Periodic task stopped");
        });

        tracing::debug!(task = name, ?period, "Periodic task started");

        Self {
            name,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Name used in logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the task is still scheduled
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the task and wait for an in-flight tick to finish
    pub async fn cancel(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::warn!(task = self.name, "Periodic task panicked: {}", e);
                }
            }
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for PeriodicTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicTask")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .finish()
    }
}
