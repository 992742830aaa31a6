use crate::error::{OverpassError, Result};
use crate::traits::Transport;
use crate::types::RawResponse;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock transport for testing
#[derive(Clone)]
pub struct MockTransport {
    pub response: Option<RawResponse>,
    pub should_fail: bool,
    pub failure_message: String,
    pub delay: Option<Duration>,
    queries: Arc<Mutex<Vec<String>>>,
    kills: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            response: None,
            should_fail: false,
            failure_message: "Mock failure".to_string(),
            delay: None,
            queries: Arc::new(Mutex::new(Vec::new())),
            kills: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_response(mut self, response: RawResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_failure<S: Into<String>>(mut self, message: S) -> Self {
        self.should_fail = true;
        self.failure_message = message.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queries submitted so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Number of `kill_my_queries` calls
    pub fn kill_count(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    async fn execute(&self, query: &str) -> Result<RawResponse> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail {
            return Err(OverpassError::transport(None, self.failure_message.clone()));
        }

        self.response
            .clone()
            .ok_or_else(|| OverpassError::general("Mock response not configured"))
    }

    async fn kill_queries(&self) -> Result<()> {
        self.kills.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
