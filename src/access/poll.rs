//! Polling-based subscription primitives.
//!
//! Self-hosted deployments expose no change feed, so subscriptions are
//! emulated: a background task re-fetches the resource at a fixed cadence
//! and notifies the callback, optionally suppressing deliveries when the
//! serialized result is unchanged. There is no backoff — a failing endpoint
//! is retried at the same cadence indefinitely, logging each failure.

use crate::error::{Error, Result};
use futures::future::BoxFuture;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

/// Cadence for live agent status (deploy progress surfaces want this fast).
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(2);
/// Default cadence for most resources.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Cadence for slow-moving resources such as deployment history.
pub const HISTORY_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Callback invoked with each delivered value.
pub type ValueCallback<T> = Box<dyn Fn(T) + Send + Sync + 'static>;
/// Callback invoked with each fetch failure.
pub type ErrorCallback = Box<dyn Fn(Error) + Send + Sync + 'static>;

/// Handle to one active subscription (polling loop or realtime listener).
///
/// The handle exclusively owns the background task. Cancelling — explicitly
/// or by dropping the handle — aborts the task, including any in-flight
/// fetch, so no callback fires after cancellation. Cancelling twice is a
/// no-op.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    handle: JoinHandle<()>,
    cancelled: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(id: Uuid, handle: JoinHandle<()>) -> Self {
        Self {
            id,
            handle,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Identifier of this subscription, for correlation with logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Stop the subscription. Idempotent.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.handle.abort();
            tracing::debug!(subscription = %self.id, "subscription cancelled");
        }
    }

    /// Whether the background task is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst) && !self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawner for polling loops.
pub(crate) struct Poller;

impl Poller {
    /// Start a repeating fetch task.
    ///
    /// The first fetch happens immediately; afterwards the resource is
    /// re-fetched every `interval`. With `dedup` set, a tick whose
    /// serialized result equals the previous one does not invoke
    /// `on_value`. The comparison is a whole-JSON string equality check —
    /// O(size) per tick, and it does not recognize semantically equal but
    /// differently ordered data.
    pub(crate) fn spawn<T, F>(
        interval: Duration,
        dedup: bool,
        mut fetch: F,
        on_value: ValueCallback<T>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription
    where
        T: Serialize + Send + 'static,
        F: FnMut() -> BoxFuture<'static, Result<T>> + Send + 'static,
    {
        let id = Uuid::new_v4();
        tracing::debug!(
            subscription = %id,
            interval_ms = interval.as_millis() as u64,
            dedup,
            "starting polling subscription"
        );

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last_snapshot: Option<String> = None;

            loop {
                ticker.tick().await;
                match fetch().await {
                    Ok(value) => {
                        if dedup {
                            if let Ok(snapshot) = serde_json::to_string(&value) {
                                if last_snapshot.as_deref() == Some(snapshot.as_str()) {
                                    continue;
                                }
                                last_snapshot = Some(snapshot);
                            }
                        }
                        on_value(value);
                    }
                    Err(err) => {
                        tracing::error!(subscription = %id, error = %err, "poll fetch failed");
                        if let Some(callback) = &on_error {
                            callback(err);
                        }
                    }
                }
            }
        });

        Subscription::new(id, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use serde_json::{Value, json};
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};

    struct Harness {
        value: Arc<Mutex<Value>>,
        seen: Arc<Mutex<Vec<Value>>>,
    }

    impl Harness {
        fn new(initial: Value) -> Self {
            Self {
                value: Arc::new(Mutex::new(initial)),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn set(&self, value: Value) {
            *self.value.lock().unwrap() = value;
        }

        fn deliveries(&self) -> Vec<Value> {
            self.seen.lock().unwrap().clone()
        }

        fn subscribe(&self, dedup: bool) -> Subscription {
            let value = Arc::clone(&self.value);
            let seen = Arc::clone(&self.seen);
            Poller::spawn(
                DEFAULT_POLL_INTERVAL,
                dedup,
                move || {
                    let current = value.lock().unwrap().clone();
                    async move { Ok(current) }.boxed()
                },
                Box::new(move |v| seen.lock().unwrap().push(v)),
                None,
            )
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_fetch_delivers_immediately() {
        let harness = Harness::new(json!({"state": "running"}));
        let _sub = harness.subscribe(true);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(harness.deliveries(), vec![json!({"state": "running"})]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_value_not_redelivered() {
        let harness = Harness::new(json!({"count": 1}));
        let _sub = harness.subscribe(true);

        // Three ticks' worth of identical results: one delivery.
        tokio::time::sleep(Duration::from_secs(16)).await;
        assert_eq!(harness.deliveries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_propagates_by_next_tick() {
        let harness = Harness::new(json!({"count": 1}));
        let _sub = harness.subscribe(true);

        tokio::time::sleep(Duration::from_millis(10)).await;
        harness.set(json!({"count": 2}));
        tokio::time::sleep(DEFAULT_POLL_INTERVAL).await;

        assert_eq!(
            harness.deliveries(),
            vec![json!({"count": 1}), json!({"count": 2})]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_dedup_every_tick_delivers() {
        let harness = Harness::new(json!(1));
        let _sub = harness.subscribe(false);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(harness.deliveries().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_future_ticks() {
        let harness = Harness::new(json!(1));
        let sub = harness.subscribe(false);

        tokio::time::sleep(Duration::from_millis(10)).await;
        sub.cancel();
        assert!(!sub.is_active());
        sub.cancel(); // second call is a no-op

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(harness.deliveries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let harness = Harness::new(json!(1));
        let sub = harness.subscribe(false);

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(sub);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(harness.deliveries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_keep_fixed_cadence_no_backoff() {
        let errors = Arc::new(AtomicUsize::new(0));
        let errors_cb = Arc::clone(&errors);
        let _sub = Poller::spawn(
            DEFAULT_POLL_INTERVAL,
            true,
            move || {
                async move {
                    Err::<Value, _>(Error::Api {
                        status: 500,
                        message: "boom".to_string(),
                    })
                }
                .boxed()
            },
            Box::new(|_: Value| panic!("no value expected")),
            Some(Box::new(move |_| {
                errors_cb.fetch_add(1, Ordering::SeqCst);
            })),
        );

        // t = 0s, 5s, 10s: three failures at the unchanged interval.
        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(errors.load(Ordering::SeqCst), 3);
    }
}
