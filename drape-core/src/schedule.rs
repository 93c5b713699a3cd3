use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Run `callback` once after `delay` on the current tokio runtime.
///
/// The returned handle owns the pending call: cancelling or dropping it before the delay
/// elapses means the callback never runs.
pub fn schedule<F>(delay: Duration, callback: F) -> ScheduledHandle
where
    F: FnOnce() + Send + 'static,
{
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        callback();
    });

    ScheduledHandle { task: Some(task) }
}

/// Handle to a callback registered with [`schedule`].
#[derive(Debug)]
pub struct ScheduledHandle {
    task: Option<JoinHandle<()>>,
}

impl ScheduledHandle {
    /// Cancel the pending callback. No-op if it already ran.
    pub fn cancel(mut self) {
        self.abort();
    }

    /// Whether the callback has run (or the task was cancelled).
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!("Cancelling scheduled callback");
            }
            task.abort();
        }
    }
}

impl Drop for ScheduledHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_callback_fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();

        let handle = schedule(Duration::from_secs(3), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_callback_never_fires() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();

        let handle = schedule(Duration::from_secs(3), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();

        drop(schedule(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
