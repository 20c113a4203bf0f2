//! Check definitions and their typed outcomes
//!
//! A [`Check`] describes one HTTP request plus the expectations its response
//! must meet. Evaluating a response against a check is pure, so the rules
//! here are testable without a live backend.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// HTTP method of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One HTTP request and the expectations on its response
#[derive(Debug, Clone)]
pub struct Check {
    /// Name shown in the report
    pub name: String,
    pub method: Method,
    /// Path below `{base}/api/`, without a leading slash
    pub path: String,
    pub expected_status: u16,
    /// JSON body sent with the request
    pub body: Option<Value>,
    /// Substring the response `Content-Type` must contain
    pub content_type: Option<String>,
    /// Require a non-empty response body
    pub non_empty: bool,
}

impl Check {
    /// Create a check expecting status 200 and nothing else
    pub fn new(name: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            expected_status: 200,
            body: None,
            content_type: None,
            non_empty: false,
        }
    }

    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Get, path)
    }

    pub fn post(name: impl Into<String>, path: impl Into<String>, body: Value) -> Self {
        Self::new(name, Method::Post, path).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn expect_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn expect_non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// List every expectation the reply violates; empty means the check passed
    pub fn violations(&self, reply: &Reply) -> Vec<String> {
        let mut violations = Vec::new();

        if reply.status != self.expected_status {
            violations.push(format!(
                "Expected status {}, got {}",
                self.expected_status, reply.status
            ));
        }

        if let Some(expected) = &self.content_type {
            let actual = reply.content_type.as_deref().unwrap_or("");
            if !actual.contains(expected.as_str()) {
                violations.push(format!(
                    "Expected Content-Type containing '{}', got '{}'",
                    expected, actual
                ));
            }
        }

        if self.non_empty && reply.body.is_empty() {
            violations.push("Expected non-empty response content".to_string());
        }

        violations
    }
}

/// What the backend answered
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Reply {
    /// Whether the declared content type is JSON
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    /// Decode the body against a schema
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// Why a check could not produce a verdict on the response
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The request never completed
    Transport,
    /// The response did not match the endpoint's schema
    Decode,
}

/// Typed result of running one check
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The server answered and every expectation held
    Passed(Reply),
    /// The server answered but violated at least one expectation
    Failed {
        reply: Reply,
        violations: Vec<String>,
    },
    /// The request could not be completed
    Transport(String),
    /// The server answered as expected but the body did not decode
    Decode { reply: Reply, message: String },
}

impl Outcome {
    /// Evaluate a reply against the check's expectations
    pub fn evaluate(check: &Check, reply: Reply) -> Self {
        let violations = check.violations(&reply);
        if violations.is_empty() {
            Outcome::Passed(reply)
        } else {
            Outcome::Failed { reply, violations }
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, Outcome::Passed(_))
    }

    /// The backend's reply, when there was one
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Outcome::Passed(reply)
            | Outcome::Failed { reply, .. }
            | Outcome::Decode { reply, .. } => Some(reply),
            Outcome::Transport(_) => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Transport(_) => Some(ErrorKind::Transport),
            Outcome::Decode { .. } => Some(ErrorKind::Decode),
            _ => None,
        }
    }

    /// Decode a passed reply into `T`
    ///
    /// A body that does not match the schema turns the outcome into
    /// [`Outcome::Decode`]. Other outcomes are returned unchanged.
    pub fn decode<T: DeserializeOwned>(self) -> (Self, Option<T>) {
        match self {
            Outcome::Passed(reply) => match reply.json::<T>() {
                Ok(value) => (Outcome::Passed(reply), Some(value)),
                Err(e) => (
                    Outcome::Decode {
                        reply,
                        message: format!("Failed to decode response: {}", e),
                    },
                    None,
                ),
            },
            other => (other, None),
        }
    }
}
