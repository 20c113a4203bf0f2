//! HTTP client for the backend under test

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};

use super::check::{Check, Method, Outcome, Reply};
use crate::common::Result;

/// Sends checks to `{base_url}/api/{path}`
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for a normalized base URL (no trailing slash)
    ///
    /// Without a timeout, requests wait for the backend indefinitely.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    /// Send one check and evaluate the reply
    ///
    /// Every request is sent exactly once. Failures to connect or to read the
    /// body come back as [`Outcome::Transport`].
    pub async fn execute(&self, check: &Check) -> Outcome {
        match self.send(check).await {
            Ok(reply) => Outcome::evaluate(check, reply),
            Err(e) => Outcome::Transport(describe_transport_error(&e)),
        }
    }

    async fn send(&self, check: &Check) -> reqwest::Result<Reply> {
        let url = self.endpoint_url(&check.path);
        let request = match check.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Delete => self.http.delete(&url),
        };
        let request = match &check.body {
            Some(body) => request.json(body),
            None => request.header(CONTENT_TYPE, HeaderValue::from_static("application/json")),
        };

        tracing::debug!(method = %check.method, url = %url, "Sending request");
        let response = request.send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            status,
            content_type = content_type.as_deref().unwrap_or(""),
            bytes = body.len(),
            "Received response"
        );

        Ok(Reply {
            status,
            content_type,
            body,
        })
    }
}

/// Render a reqwest error with its full source chain
///
/// reqwest's own message ("error sending request for url") hides the cause
/// (connection refused, DNS failure, timeout).
fn describe_transport_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = StdError::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
