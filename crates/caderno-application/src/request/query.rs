//! Auto-running remote read bound to one UI site.

use std::future::Future;
use std::sync::Arc;

use caderno_core::remote::RemoteResult;
use tokio::sync::RwLock;

use super::{
    BoxedProducer, ErrorNotifier, LOAD_FALLBACK, RequestState, Site, box_producer,
    tracing_notifier,
};

/// A remote read with the uniform `{data, loading, error}` lifecycle.
///
/// The producer runs once on construction with the initial arguments. The
/// arguments double as the dependency values of the site: [`Query::sync_args`]
/// re-runs the producer only when they change, [`Query::refetch`] and
/// [`Query::refetch_with`] re-run on demand. Overlapping invocations follow
/// the supersession rule of the shared lifecycle: the state always reflects
/// the most recently started call that has resolved.
pub struct Query<A, T> {
    site: Site<T>,
    producer: BoxedProducer<A, T>,
    /// The current dependency values, also the producer's arguments.
    args: RwLock<A>,
}

impl<A, T> Query<A, T>
where
    A: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates the query and starts its initial run.
    pub fn new<F, Fut>(producer: F, args: A) -> Arc<Self>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RemoteResult<T>> + Send + 'static,
    {
        Self::with_notifier(producer, args, tracing_notifier())
    }

    /// Same as [`Query::new`] with a custom notification callback.
    pub fn with_notifier<F, Fut>(producer: F, args: A, notifier: ErrorNotifier) -> Arc<Self>
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RemoteResult<T>> + Send + 'static,
    {
        let query = Arc::new(Self {
            site: Site::new(true, LOAD_FALLBACK, notifier),
            producer: box_producer(producer),
            args: RwLock::new(args),
        });

        let initial = Arc::clone(&query);
        tokio::spawn(async move { initial.refetch().await });

        query
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> RequestState<T> {
        self.site.snapshot().await
    }

    /// Re-runs the producer with the current arguments.
    pub async fn refetch(&self) {
        let args = self.args.read().await.clone();
        self.run(args).await;
    }

    /// Re-runs the producer with explicit arguments, keeping them current.
    pub async fn refetch_with(&self, args: A) {
        *self.args.write().await = args.clone();
        self.run(args).await;
    }

    /// Updates the dependency values, re-running only when they changed.
    pub async fn sync_args(&self, args: A)
    where
        A: PartialEq,
    {
        {
            let mut current = self.args.write().await;
            if *current == args {
                return;
            }
            *current = args.clone();
        }
        self.run(args).await;
    }

    async fn run(&self, args: A) {
        let ticket = self.site.begin().await;
        let result = (self.producer)(args).await;
        let _ = self.site.resolve(ticket, result).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caderno_core::remote::RemoteError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Notifier that counts how many notifications were surfaced.
    fn counting_notifier() -> (ErrorNotifier, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let notifier: ErrorNotifier = Arc::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (notifier, count)
    }

    async fn wait_settled<A, T>(query: &Query<A, T>) -> RequestState<T>
    where
        A: Clone + Send + Sync + 'static,
        T: Clone + Send + Sync + 'static,
    {
        for _ in 0..200 {
            let state = query.state().await;
            if !state.loading {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("query did not settle");
    }

    async fn wait_for(calls: &AtomicUsize, at_least: usize) {
        for _ in 0..200 {
            if calls.load(Ordering::SeqCst) >= at_least {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("producer was not invoked");
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let gate = Arc::new(Notify::new());
        let producer = {
            let gate = Arc::clone(&gate);
            move |_: ()| {
                let gate = Arc::clone(&gate);
                async move {
                    gate.notified().await;
                    Ok(1u32)
                }
            }
        };

        let query = Query::new(producer, ());

        let state = query.state().await;
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());

        gate.notify_one();
        wait_settled(&query).await;
    }

    #[tokio::test]
    async fn test_auto_run_resolves_data() {
        let query = Query::new(|_: ()| async { Ok(42u32) }, ());

        let state = wait_settled(&query).await;
        assert_eq!(state.data, Some(42));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_sets_error_and_notifies_once() {
        let (notifier, notifications) = counting_notifier();
        let query = Query::with_notifier(
            |_: ()| async {
                Err::<u32, _>(RemoteError::api(403, Some("Not allowed".to_string())))
            },
            (),
            notifier,
        );

        let state = wait_settled(&query).await;
        let error = state.error.expect("error should be set");
        assert_eq!(error.message, "Not allowed");
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_without_detail_uses_fallback() {
        let (notifier, _) = counting_notifier();
        let query = Query::with_notifier(
            |_: ()| async { Err::<u32, _>(RemoteError::transport("connection refused")) },
            (),
            notifier,
        );

        let state = wait_settled(&query).await;
        assert_eq!(state.error.unwrap().message, LOAD_FALLBACK);
    }

    #[tokio::test]
    async fn test_refetch_clears_previous_error() {
        let (notifier, _) = counting_notifier();
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let calls = Arc::clone(&calls);
            move |_: ()| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n == 1 {
                        Err(RemoteError::api(500, None))
                    } else {
                        Ok(7u32)
                    }
                }
            }
        };

        let query = Query::with_notifier(producer, (), notifier);
        let state = wait_settled(&query).await;
        assert!(state.error.is_some());

        query.refetch().await;

        let state = query.state().await;
        assert_eq!(state.data, Some(7));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_data_is_kept_while_reloading() {
        let gate = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let gate = Arc::clone(&gate);
            let calls = Arc::clone(&calls);
            move |_: ()| {
                let gate = Arc::clone(&gate);
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n == 2 {
                        gate.notified().await;
                    }
                    Ok(n)
                }
            }
        };

        let query = Query::new(producer, ());
        let state = wait_settled(&query).await;
        assert_eq!(state.data, Some(1));

        // Start a reload that blocks on the gate, then look at the state
        // while it is in flight.
        let reloading = Arc::clone(&query);
        let handle = tokio::spawn(async move { reloading.refetch().await });
        wait_for(&calls, 2).await;

        let state = query.state().await;
        assert!(state.loading);
        assert_eq!(state.data, Some(1), "stale data stays visible");

        gate.notify_one();
        handle.await.unwrap();
        assert_eq!(query.state().await.data, Some(2));
    }

    #[tokio::test]
    async fn test_superseded_result_is_discarded() {
        let gate = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let gate = Arc::clone(&gate);
            let calls = Arc::clone(&calls);
            move |tag: String| {
                let gate = Arc::clone(&gate);
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    // The first-issued call resolves only after the gate
                    // opens, i.e. after the second call has already won.
                    if n == 1 {
                        gate.notified().await;
                    }
                    Ok(format!("result-{tag}"))
                }
            }
        };

        let query = Query::new(producer, "first".to_string());
        wait_for(&calls, 1).await;

        query.refetch_with("second".to_string()).await;
        assert_eq!(query.state().await.data.as_deref(), Some("result-second"));

        // Let the first call resolve; its result must be dropped.
        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let state = query.state().await;
        assert_eq!(state.data.as_deref(), Some("result-second"));
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_sync_args_reruns_only_on_change() {
        let calls = Arc::new(AtomicUsize::new(0));
        let producer = {
            let calls = Arc::clone(&calls);
            move |period: u8| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok(u32::from(period)) }
            }
        };

        let query = Query::new(producer, 1u8);
        wait_settled(&query).await;
        let after_initial = calls.load(Ordering::SeqCst);

        // Same value: no new invocation.
        query.sync_args(1).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_initial);

        // Changed value: re-run with the new arguments.
        query.sync_args(3).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_initial + 1);
        assert_eq!(query.state().await.data, Some(3));
    }
}
