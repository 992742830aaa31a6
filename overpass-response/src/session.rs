//! At most one query in flight
//!
//! Submitting a query while another one is still running aborts the older
//! request. The older caller gets [`SessionOutcome::Superseded`] and never
//! sees a late response.

use crate::error::Result;
use crate::traits::Transport;
use crate::types::RawResponse;
use futures::future::{AbortHandle, Abortable};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(RawResponse),
    /// A later submission or an explicit cancel replaced this query
    Superseded,
}

#[derive(Default)]
struct SessionState {
    generation: u64,
    in_flight: Option<AbortHandle>,
}

/// Query session over a [`Transport`]
#[derive(Clone)]
pub struct QuerySession<T: Transport> {
    transport: T,
    kill_on_abort: bool,
    state: Arc<Mutex<SessionState>>,
}

impl<T: Transport> QuerySession<T> {
    pub fn new(transport: T, kill_on_abort: bool) -> Self {
        Self {
            transport,
            kill_on_abort,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether a query is currently running
    pub fn is_busy(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    /// Submit a query, aborting whatever was running before
    pub async fn submit(&self, query: &str) -> Result<SessionOutcome> {
        let (handle, registration) = AbortHandle::new_pair();
        let (generation, previous) = {
            let mut state = self.lock();
            state.generation += 1;
            (state.generation, state.in_flight.replace(handle))
        };

        if let Some(previous) = previous {
            tracing::debug!(generation, "aborting superseded query");
            previous.abort();
            self.kill_running_queries().await;
        }

        let result = Abortable::new(self.transport.execute(query), registration).await;

        {
            let mut state = self.lock();
            if state.generation != generation {
                return Ok(SessionOutcome::Superseded);
            }
            state.in_flight = None;
        }

        match result {
            Ok(response) => response.map(SessionOutcome::Completed),
            Err(_aborted) => Ok(SessionOutcome::Superseded),
        }
    }

    /// Abort the running query, if any. Returns whether something was aborted.
    pub async fn cancel(&self) -> bool {
        let previous = {
            let mut state = self.lock();
            state.generation += 1;
            state.in_flight.take()
        };

        match previous {
            Some(handle) => {
                handle.abort();
                self.kill_running_queries().await;
                true
            }
            None => false,
        }
    }

    async fn kill_running_queries(&self) {
        if !self.kill_on_abort {
            return;
        }
        if let Err(e) = self.transport.kill_queries().await {
            tracing::warn!(error = %e, "failed to kill query");
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use std::time::Duration;

    #[tokio::test]
    async fn test_submit_completes() {
        let transport = MockTransport::new().with_response(RawResponse::new(
            r#"{"elements":[]}"#,
            200,
            Some("application/json"),
        ));
        let session = QuerySession::new(transport, true);

        let outcome = session.submit("out;").await.unwrap();
        assert!(matches!(outcome, SessionOutcome::Completed(ref r) if r.http_status == 200));
        assert!(!session.is_busy());
        assert_eq!(session.transport().kill_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated() {
        let transport = MockTransport::new().with_failure("connection refused");
        let session = QuerySession::new(transport, true);

        assert!(session.submit("out;").await.is_err());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_newer_submission_supersedes_older() {
        let transport = MockTransport::new()
            .with_response(RawResponse::new("first", 200, None))
            .with_delay(Duration::from_millis(200));
        let session = QuerySession::new(transport, true);

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.submit("first").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = session.submit("second").await.unwrap();
        let first = first.await.unwrap().unwrap();

        assert_eq!(first, SessionOutcome::Superseded);
        assert!(matches!(second, SessionOutcome::Completed(_)));
        assert_eq!(session.transport().kill_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel() {
        let transport = MockTransport::new()
            .with_response(RawResponse::new("late", 200, None))
            .with_delay(Duration::from_millis(200));
        let session = QuerySession::new(transport, false);

        let pending = {
            let session = session.clone();
            tokio::spawn(async move { session.submit("out;").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(session.cancel().await);
        assert_eq!(pending.await.unwrap().unwrap(), SessionOutcome::Superseded);
        assert!(!session.cancel().await);
        assert_eq!(session.transport().kill_count(), 0);
    }
}
