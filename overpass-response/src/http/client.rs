use crate::config::OverpassConfig;
use crate::error::{OverpassError, Result};
use crate::http::{RequestBuilderImpl, ResponseConverterImpl};
use crate::traits::{RequestBuilder, ResponseConverter, Transport};
use crate::types::RawResponse;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Error statuses whose body still goes through classification:
/// 400 is most likely a syntax error, 429 and 504 carry the rate limit and
/// timeout messages of the dispatcher.
pub const CLASSIFIED_ERROR_STATUSES: [StatusCode; 3] = [
    StatusCode::BAD_REQUEST,
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::GATEWAY_TIMEOUT,
];

/// HTTP transport for an Overpass API instance
#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    request_builder: RequestBuilderImpl,
    response_converter: ResponseConverterImpl,
}

impl OverpassClient {
    /// Create a new client with configuration
    pub fn new(config: &OverpassConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()?;

        let request_builder = RequestBuilderImpl::new(client.clone(), config)?;
        let response_converter = ResponseConverterImpl::new();

        Ok(Self {
            client,
            request_builder,
            response_converter,
        })
    }

    /// Whether a response with this status should be classified rather than failed
    pub fn is_classifiable(status: StatusCode) -> bool {
        status.is_success() || CLASSIFIED_ERROR_STATUSES.contains(&status)
    }
}

impl Transport for OverpassClient {
    async fn execute(&self, query: &str) -> Result<RawResponse> {
        let request = self.request_builder.build_interpreter_request(query)?;
        tracing::debug!(url = %request.url(), bytes = query.len(), "submitting query");

        let response = self.client.execute(request).await.map_err(|e| {
            tracing::warn!(error = %e, "request to Overpass API failed");
            OverpassError::Http(e)
        })?;

        let status = response.status();
        if !Self::is_classifiable(status) {
            return Err(OverpassError::transport(
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("Unknown status"),
            ));
        }

        self.response_converter.convert_response(response).await
    }

    async fn kill_queries(&self) -> Result<()> {
        let request = self.request_builder.build_kill_request()?;
        self.client.execute(request).await?.error_for_status()?;
        Ok(())
    }
}
