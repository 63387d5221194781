//! Uniform loading/error lifecycle for remote calls.
//!
//! Screens do not keep their own loading flags and error slots; they wrap
//! each remote call in a [`Query`] (auto-running read) or a [`Mutation`]
//! (on-demand write) and read the lifecycle state back from it.
//!
//! Both wrappers follow the same transition rules: starting an invocation
//! sets `loading` and clears the previous error while leaving `data` in
//! place, and resolving sets exactly one of `data` or `error`. Each site
//! carries a monotonically increasing invocation ticket; a resolution whose
//! ticket is no longer the latest is dropped at the state-update boundary,
//! so a slow early call can never overwrite a later one. The underlying
//! HTTP call is not cancelled, only its result is discarded.

pub mod mutation;
pub mod query;

pub use mutation::Mutation;
pub use query::Query;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use caderno_core::remote::{RemoteError, RemoteResult};
use tokio::sync::RwLock;

/// Fallback shown when a read fails without a service detail.
pub const LOAD_FALLBACK: &str = "failed to load data";
/// Fallback shown when a write fails without a service detail.
pub const OPERATION_FALLBACK: &str = "operation failed";

/// Callback that surfaces one transient notification to the user.
///
/// The UI installs a toast here; the default logs a warning instead.
pub type ErrorNotifier = Arc<dyn Fn(String) + Send + Sync>;

pub(crate) fn tracing_notifier() -> ErrorNotifier {
    Arc::new(|message| tracing::warn!("request failed: {message}"))
}

/// A remote failure normalized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestError {
    /// The message to show: the service detail when present, else the
    /// site's fallback phrase.
    pub message: String,
    /// The failure as the remote layer reported it.
    pub source: RemoteError,
}

impl RequestError {
    fn normalize(source: RemoteError, fallback: &str) -> Self {
        Self {
            message: source.message_or(fallback),
            source,
        }
    }
}

/// Lifecycle state of one invocation site.
#[derive(Debug, Clone)]
pub struct RequestState<T> {
    /// The last successful result. Kept during reloads so the screen does
    /// not flicker back to empty.
    pub data: Option<T>,
    /// Whether an invocation is in flight.
    pub loading: bool,
    /// The failure of the most recent resolved invocation, if it failed.
    pub error: Option<RequestError>,
}

impl<T> RequestState<T> {
    fn initial(loading: bool) -> Self {
        Self {
            data: None,
            loading,
            error: None,
        }
    }
}

/// Boxed producer function shared by both wrapper shapes.
pub(crate) type BoxedProducer<A, T> =
    Arc<dyn Fn(A) -> Pin<Box<dyn Future<Output = RemoteResult<T>> + Send>> + Send + Sync>;

pub(crate) fn box_producer<A, T, F, Fut>(producer: F) -> BoxedProducer<A, T>
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RemoteResult<T>> + Send + 'static,
{
    Arc::new(
        move |args| -> Pin<Box<dyn Future<Output = RemoteResult<T>> + Send>> {
            Box::pin(producer(args))
        },
    )
}

/// Shared bookkeeping of one invocation site.
pub(crate) struct Site<T> {
    state: RwLock<RequestState<T>>,
    /// Latest issued invocation ticket.
    ticket: AtomicU64,
    notifier: ErrorNotifier,
    fallback: &'static str,
}

impl<T: Clone> Site<T> {
    pub(crate) fn new(loading: bool, fallback: &'static str, notifier: ErrorNotifier) -> Self {
        Self {
            state: RwLock::new(RequestState::initial(loading)),
            ticket: AtomicU64::new(0),
            notifier,
            fallback,
        }
    }

    pub(crate) async fn snapshot(&self) -> RequestState<T> {
        self.state.read().await.clone()
    }

    /// Starts a new invocation: bumps the ticket, flags loading, clears the
    /// previous error. `data` stays as-is until resolution.
    pub(crate) async fn begin(&self) -> u64 {
        let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
        ticket
    }

    /// Applies a resolution, unless a newer invocation has started since.
    ///
    /// Returns the normalized outcome either way so `mutate` can hand it to
    /// its caller; a stale resolution leaves the shared state and the
    /// notifier untouched.
    pub(crate) async fn resolve(
        &self,
        ticket: u64,
        result: RemoteResult<T>,
    ) -> Result<T, RequestError> {
        let outcome = result.map_err(|err| RequestError::normalize(err, self.fallback));

        let mut state = self.state.write().await;
        if self.ticket.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "dropping superseded result");
            return outcome;
        }

        state.loading = false;
        let mut notify = None;
        match &outcome {
            Ok(data) => state.data = Some(data.clone()),
            Err(err) => {
                state.error = Some(err.clone());
                notify = Some(err.message.clone());
            }
        }
        drop(state);

        if let Some(message) = notify {
            (self.notifier)(message);
        }
        outcome
    }
}
