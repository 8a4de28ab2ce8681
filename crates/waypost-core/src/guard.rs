//! Route guards
//!
//! A guard is a predicate evaluated before a matched route is shown. Guards
//! may be synchronous or asynchronous; both are stored as functions returning
//! a boxed future so the chain awaits them uniformly.
//!
//! A chain runs its guards strictly in registration order:
//! - each guard starts only after the previous one resolved `true`
//! - the first `false` or error ends the chain as failed
//! - a navigation superseded mid-chain ends it as cancelled

use crate::error::BoxError;
use crate::navigation::{NavigationDetail, NavigationToken};
use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

type GuardFn =
    dyn Fn(&NavigationDetail) -> BoxFuture<'static, Result<bool, BoxError>> + Send + Sync;

/// Typed navigation predicate
#[derive(Clone)]
pub struct Guard {
    check: Arc<GuardFn>,
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

impl Guard {
    /// Synchronous predicate
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&NavigationDetail) -> bool + Send + Sync + 'static,
    {
        Self::from_fn(move |detail| future::ready(Ok(predicate(detail))).boxed())
    }

    /// Synchronous predicate that may fail
    pub fn fallible<F, E>(predicate: F) -> Self
    where
        F: Fn(&NavigationDetail) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::from_fn(move |detail| future::ready(predicate(detail).map_err(Into::into)).boxed())
    }

    /// Asynchronous predicate
    ///
    /// The future receives its own copy of the detail so it can outlive the
    /// call that started it.
    pub fn from_async<F, Fut>(predicate: F) -> Self
    where
        F: Fn(NavigationDetail) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self::from_fn(move |detail| predicate(detail.clone()).map(Ok).boxed())
    }

    /// Asynchronous predicate that may fail
    pub fn try_async<F, Fut, E>(predicate: F) -> Self
    where
        F: Fn(NavigationDetail) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        Self::from_fn(move |detail| {
            predicate(detail.clone())
                .map(|result| result.map_err(Into::into))
                .boxed()
        })
    }

    fn from_fn<F>(check: F) -> Self
    where
        F: Fn(&NavigationDetail) -> BoxFuture<'static, Result<bool, BoxError>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            check: Arc::new(check),
        }
    }

    /// Start evaluating this guard
    pub fn check(&self, detail: &NavigationDetail) -> BoxFuture<'static, Result<bool, BoxError>> {
        (self.check)(detail)
    }
}

/// State of a chain evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Guards still running
    Pending,
    /// Every guard resolved `true`
    Passed,
    /// A guard resolved `false` or failed
    Failed,
}

impl GuardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuardState::Pending => "pending",
            GuardState::Passed => "passed",
            GuardState::Failed => "failed",
        }
    }
}

/// Terminal outcome of [`GuardChain::evaluate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    Passed,
    Failed {
        /// Position of the guard that stopped the chain
        index: usize,
        /// Error message when the guard failed instead of returning `false`
        error: Option<String>,
    },
    /// Navigation superseded; the result must be discarded
    Cancelled,
}

impl ChainOutcome {
    /// State the chain ended in; cancelled chains never left `Pending`
    pub fn state(&self) -> GuardState {
        match self {
            ChainOutcome::Passed => GuardState::Passed,
            ChainOutcome::Failed { .. } => GuardState::Failed,
            ChainOutcome::Cancelled => GuardState::Pending,
        }
    }
}

/// Ordered guards of one route
#[derive(Debug, Clone, Default)]
pub struct GuardChain {
    guards: Vec<Guard>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, guard: Guard) {
        self.guards.push(guard);
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Run the guards in order for one navigation attempt
    pub async fn evaluate(
        &self,
        detail: &NavigationDetail,
        token: &NavigationToken,
    ) -> ChainOutcome {
        for (index, guard) in self.guards.iter().enumerate() {
            if !token.is_current() {
                return ChainOutcome::Cancelled;
            }

            let result = guard.check(detail).await;

            if !token.is_current() {
                tracing::debug!(
                    navigation = token.id(),
                    guard = index,
                    "navigation superseded while guard was pending"
                );
                return ChainOutcome::Cancelled;
            }

            match result {
                Ok(true) => {
                    tracing::debug!(route = %detail.route, guard = index, "guard passed");
                }
                Ok(false) => {
                    tracing::debug!(route = %detail.route, guard = index, "guard rejected navigation");
                    return ChainOutcome::Failed { index, error: None };
                }
                Err(err) => {
                    tracing::warn!(route = %detail.route, guard = index, error = %err, "guard failed");
                    return ChainOutcome::Failed {
                        index,
                        error: Some(err.to_string()),
                    };
                }
            }
        }
        ChainOutcome::Passed
    }
}

impl FromIterator<Guard> for GuardChain {
    fn from_iter<I: IntoIterator<Item = Guard>>(iter: I) -> Self {
        Self {
            guards: iter.into_iter().collect(),
        }
    }
}

impl Extend<Guard> for GuardChain {
    fn extend<I: IntoIterator<Item = Guard>>(&mut self, iter: I) {
        self.guards.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Generation;
    use parking_lot::Mutex;
    use std::time::Duration;
    use waypost_router::Params;

    fn detail(querystring: &str) -> NavigationDetail {
        NavigationDetail {
            route: "/lucky".to_string(),
            location: "/lucky".to_string(),
            querystring: querystring.to_string(),
            user_data: None,
            params: Params::default(),
        }
    }

    fn recording(calls: &Arc<Mutex<Vec<usize>>>, index: usize, pass: bool) -> Guard {
        let calls = Arc::clone(calls);
        Guard::new(move |_| {
            calls.lock().push(index);
            pass
        })
    }

    #[tokio::test]
    async fn test_empty_chain_passes() {
        let chain = GuardChain::new();
        let outcome = chain.evaluate(&detail(""), &NavigationToken::detached()).await;
        assert_eq!(outcome, ChainOutcome::Passed);
        assert_eq!(outcome.state(), GuardState::Passed);
    }

    #[tokio::test]
    async fn test_runs_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain: GuardChain = (0..3).map(|i| recording(&calls, i, true)).collect();

        let outcome = chain.evaluate(&detail(""), &NavigationToken::detached()).await;
        assert_eq!(outcome, ChainOutcome::Passed);
        assert_eq!(*calls.lock(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_stops_at_first_rejection() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain: GuardChain = vec![recording(&calls, 0, false), recording(&calls, 1, true)]
            .into_iter()
            .collect();

        let outcome = chain.evaluate(&detail(""), &NavigationToken::detached()).await;
        assert_eq!(outcome, ChainOutcome::Failed { index: 0, error: None });
        assert_eq!(outcome.state(), GuardState::Failed);
        assert_eq!(*calls.lock(), vec![0]);
    }

    #[tokio::test]
    async fn test_query_override() {
        let gate = Guard::new(|d| d.query_param("pass").as_deref() == Some("1"));
        let chain: GuardChain = std::iter::once(gate).collect();
        let token = NavigationToken::detached();

        assert_eq!(chain.evaluate(&detail("pass=1"), &token).await, ChainOutcome::Passed);
        assert!(matches!(
            chain.evaluate(&detail("pass=0"), &token).await,
            ChainOutcome::Failed { index: 0, .. }
        ));
    }

    #[tokio::test]
    async fn test_async_guards_awaited_sequentially() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let slow = {
            let calls = Arc::clone(&calls);
            Guard::from_async(move |_| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.lock().push("slow-start");
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    calls.lock().push("slow-end");
                    true
                }
            })
        };
        let fast = {
            let calls = Arc::clone(&calls);
            Guard::new(move |_| {
                calls.lock().push("fast");
                true
            })
        };
        let chain: GuardChain = vec![slow, fast].into_iter().collect();

        let outcome = chain.evaluate(&detail(""), &NavigationToken::detached()).await;
        assert_eq!(outcome, ChainOutcome::Passed);
        assert_eq!(*calls.lock(), vec!["slow-start", "slow-end", "fast"]);
    }

    #[tokio::test]
    async fn test_error_counts_as_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let broken = Guard::try_async(|_| async { Err::<bool, _>("session store unreachable") });
        let chain: GuardChain = vec![broken, recording(&calls, 1, true)]
            .into_iter()
            .collect();

        let outcome = chain.evaluate(&detail(""), &NavigationToken::detached()).await;
        assert_eq!(
            outcome,
            ChainOutcome::Failed {
                index: 0,
                error: Some("session store unreachable".to_string())
            }
        );
        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_fallible_sync_guard() {
        let guard = Guard::fallible(|d| {
            d.query_param("pass")
                .ok_or("missing pass")
                .map(|v| v == "1")
        });
        let chain: GuardChain = std::iter::once(guard).collect();
        let token = NavigationToken::detached();

        assert_eq!(chain.evaluate(&detail("pass=1"), &token).await, ChainOutcome::Passed);
        assert_eq!(
            chain.evaluate(&detail(""), &token).await,
            ChainOutcome::Failed {
                index: 0,
                error: Some("missing pass".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_superseded_mid_chain() {
        let generation = Generation::new();
        let token = generation.begin();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let superseding = {
            let generation = generation.clone();
            Guard::new(move |_| {
                generation.begin();
                true
            })
        };
        let chain: GuardChain = vec![superseding, recording(&calls, 1, true)]
            .into_iter()
            .collect();

        let outcome = chain.evaluate(&detail(""), &token).await;
        assert_eq!(outcome, ChainOutcome::Cancelled);
        assert_eq!(outcome.state(), GuardState::Pending);
        assert!(calls.lock().is_empty());
    }
}
