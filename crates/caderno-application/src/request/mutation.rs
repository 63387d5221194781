//! On-demand remote write bound to one UI site.

use std::future::Future;
use std::sync::Arc;

use caderno_core::remote::RemoteResult;

use super::{
    BoxedProducer, ErrorNotifier, OPERATION_FALLBACK, RequestError, RequestState, Site,
    box_producer, tracing_notifier,
};

/// A remote write with the uniform `{loading, error}` lifecycle.
///
/// Unlike [`super::Query`], a mutation never runs by itself: the screen
/// calls [`Mutation::mutate`] on submit and receives the outcome directly,
/// so it can branch without re-reading the shared state. The state is
/// updated all the same, following the lifecycle and supersession rules.
pub struct Mutation<A, T> {
    site: Site<T>,
    producer: BoxedProducer<A, T>,
}

impl<A, T> Mutation<A, T>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates the mutation; nothing runs until [`Mutation::mutate`].
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RemoteResult<T>> + Send + 'static,
    {
        Self::with_notifier(producer, tracing_notifier())
    }

    /// Same as [`Mutation::new`] with a custom notification callback.
    pub fn with_notifier<F, Fut>(producer: F, notifier: ErrorNotifier) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RemoteResult<T>> + Send + 'static,
    {
        Self {
            site: Site::new(false, OPERATION_FALLBACK, notifier),
            producer: box_producer(producer),
        }
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> RequestState<T> {
        self.site.snapshot().await
    }

    /// Runs the operation and returns its outcome.
    ///
    /// After resolution the returned value and the exposed state agree:
    /// `Err` here means `error` is set, `Ok` means it is clear.
    pub async fn mutate(&self, args: A) -> Result<T, RequestError> {
        let ticket = self.site.begin().await;
        let result = (self.producer)(args).await;
        self.site.resolve(ticket, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caderno_core::remote::RemoteError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_notifier() -> (ErrorNotifier, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let notifier: ErrorNotifier = Arc::new(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (notifier, count)
    }

    #[tokio::test]
    async fn test_initial_state_is_idle() {
        let mutation: Mutation<(), u32> = Mutation::new(|_| async { Ok(1) });

        let state = mutation.state().await;
        assert!(!state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_mutate_success_agrees_with_state() {
        let mutation = Mutation::new(|n: u32| async move { Ok(n * 2) });

        let outcome = mutation.mutate(21).await;

        assert_eq!(outcome.unwrap(), 42);
        let state = mutation.state().await;
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_mutate_failure_agrees_with_state() {
        let (notifier, notifications) = counting_notifier();
        let mutation: Mutation<(), u32> = Mutation::with_notifier(
            |_| async { Err(RemoteError::api(422, Some("Title is required".to_string()))) },
            notifier,
        );

        let outcome = mutation.mutate(()).await;

        let returned = outcome.unwrap_err();
        assert_eq!(returned.message, "Title is required");

        let state = mutation.state().await;
        assert_eq!(state.error, Some(returned));
        assert_eq!(notifications.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mutate_failure_without_detail_uses_fallback() {
        let (notifier, _) = counting_notifier();
        let mutation: Mutation<(), u32> =
            Mutation::with_notifier(|_| async { Err(RemoteError::api(500, None)) }, notifier);

        let outcome = mutation.mutate(()).await;

        assert_eq!(outcome.unwrap_err().message, OPERATION_FALLBACK);
    }

    #[tokio::test]
    async fn test_new_attempt_clears_previous_error() {
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
        let (notifier, _) = counting_notifier();
        let mutation = Mutation::with_notifier(producer, notifier);

        assert!(mutation.mutate(()).await.is_err());
        assert!(mutation.state().await.error.is_some());

        assert_eq!(mutation.mutate(()).await.unwrap(), 7);
        assert!(mutation.state().await.error.is_none());
    }
}
