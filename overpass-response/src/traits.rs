use crate::error::Result;
use crate::types::RawResponse;
use reqwest::{Request, Response};
use std::future::Future;

/// Trait for submitting queries to an Overpass API instance
pub trait Transport: Send + Sync + Clone {
    /// Submit one query and return the response to classify.
    ///
    /// Responses that carry a query error in their body (400, 429, 504) are
    /// returned as `Ok`; network failures and other statuses are `Err`.
    fn execute(&self, query: &str) -> impl Future<Output = Result<RawResponse>> + Send;

    /// Ask the server to stop every query running on behalf of this client
    fn kill_queries(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Trait for building requests against the API endpoints
pub trait RequestBuilder: Send + Sync {
    /// POST request submitting `query` to the interpreter
    fn build_interpreter_request(&self, query: &str) -> Result<Request>;

    /// GET request to the `kill_my_queries` endpoint
    fn build_kill_request(&self) -> Result<Request>;
}

/// Trait for turning transport responses into raw responses
pub trait ResponseConverter: Send + Sync {
    fn convert_response(
        &self,
        response: Response,
    ) -> impl Future<Output = Result<RawResponse>> + Send;
}
