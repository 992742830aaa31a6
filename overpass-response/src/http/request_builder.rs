use crate::config::OverpassConfig;
use crate::error::Result;
use crate::traits::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Request};
use url::Url;

/// Implementation of RequestBuilder trait
#[derive(Clone)]
pub struct RequestBuilderImpl {
    client: Client,
    server: Url,
}

impl RequestBuilderImpl {
    /// Create a new request builder for the configured server
    pub fn new(client: Client, config: &OverpassConfig) -> Result<Self> {
        Ok(Self {
            client,
            server: config.server_url()?,
        })
    }

    /// Form body the interpreter expects: `data=<query>`
    pub fn form_body(query: &str) -> String {
        format!("data={}", urlencoding::encode(query))
    }
}

impl RequestBuilder for RequestBuilderImpl {
    fn build_interpreter_request(&self, query: &str) -> Result<Request> {
        let url = self.server.join("interpreter")?;

        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=UTF-8")
            .body(Self::form_body(query))
            .build()
            .map_err(Into::into)
    }

    fn build_kill_request(&self) -> Result<Request> {
        let url = self.server.join("kill_my_queries")?;
        self.client.get(url).build().map_err(Into::into)
    }
}
