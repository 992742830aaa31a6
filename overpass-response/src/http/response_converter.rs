use crate::error::Result;
use crate::traits::ResponseConverter;
use crate::types::RawResponse;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;

/// Implementation of ResponseConverter trait
#[derive(Clone)]
pub struct ResponseConverterImpl;

impl ResponseConverterImpl {
    /// Create a new response converter
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResponseConverterImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseConverter for ResponseConverterImpl {
    async fn convert_response(&self, response: Response) -> Result<RawResponse> {
        let http_status = response.status().as_u16();

        // Header values that are not valid UTF-8 are treated as absent
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body_text = response.text().await?;

        Ok(RawResponse {
            body_text,
            http_status,
            content_type,
        })
    }
}
