use crate::types::DEFAULT_LARGE_RESPONSE_THRESHOLD;
use serde::{Deserialize, Serialize};
use url::Url;

/// Public instance used when nothing else is configured
pub const DEFAULT_SERVER: &str = "https://overpass-api.de/api/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 180;

/// Client configuration for talking to an Overpass API instance
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OverpassConfig {
    /// Base URL of the API; `interpreter` and `kill_my_queries` are resolved against it
    pub server: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent sent with every request
    pub user_agent: String,
    /// Ask the server to kill our running queries when a query is aborted
    pub kill_on_abort: bool,
    /// Responses larger than this (bytes) are reported as huge
    pub large_response_threshold: usize,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("turbo/{}", env!("CARGO_PKG_VERSION")),
            kill_on_abort: true,
            large_response_threshold: DEFAULT_LARGE_RESPONSE_THRESHOLD,
        }
    }
}

impl OverpassConfig {
    /// Server base URL, always ending with a slash so endpoints join below it
    pub fn server_url(&self) -> crate::error::Result<Url> {
        let server = if self.server.ends_with('/') {
            self.server.clone()
        } else {
            format!("{}/", self.server)
        };
        Ok(Url::parse(&server)?)
    }

    /// Replace the server, keeping everything else
    pub fn with_server<S: Into<String>>(mut self, server: S) -> Self {
        self.server = server.into();
        self
    }
}
