use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

/// Handle for an active change subscription. The subscription stops when the
/// handle is cancelled or dropped.
pub struct SubscriptionHandle {
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Polls `query` on an interval and invokes `callback` with the fully
/// materialized result set once on start and again whenever the set changes.
/// Delivery is at-least-once; a failed poll is logged and retried on the next
/// tick, so there is no missed-update guarantee across outages.
pub fn watch<T, Q, Fut, F>(poll_interval: Duration, query: Q, callback: F) -> SubscriptionHandle
where
    T: Clone + PartialEq + Send + 'static,
    Q: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Vec<T>, String>> + Send,
    F: Fn(Vec<T>) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(poll_interval);
        let mut last: Option<Vec<T>> = None;
        loop {
            interval.tick().await;
            match query().await {
                Ok(items) => {
                    if last.as_ref() != Some(&items) {
                        last = Some(items.clone());
                        callback(items);
                    }
                }
                Err(e) => warn!("Subscription query failed: {}", e),
            }
        }
    });
    SubscriptionHandle { task }
}
