#![deny(clippy::all, clippy::pedantic)]

use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

/// Relative location below the base URL, kept as unencoded segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            segments: vec![collection.into()],
        }
    }

    #[must_use]
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Classify raw response bytes: empty, JSON when it parses, text otherwise.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

/// A request that did not produce a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub message: String,
}

impl RemoteFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build a failure from an error status, preferring the server's own message.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &ResponseBody) -> Self {
        let message = failure_message(body).unwrap_or_else(|| status.to_string());
        Self { message }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RemoteFailure {}

fn failure_message(body: &ResponseBody) -> Option<String> {
    match body {
        ResponseBody::Empty => None,
        ResponseBody::Text(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        ResponseBody::Json(value) => match value.get("message") {
            Some(Value::String(message)) => Some(message.clone()),
            Some(Value::Array(messages)) => {
                let parts: Vec<&str> = messages.iter().filter_map(Value::as_str).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string),
        },
    }
}

/// HTTP operations a resource command needs. Paths are relative to the configured base URL.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        path: &ResourcePath,
        query: &[(&'static str, String)],
    ) -> Result<ApiResponse, RemoteFailure>;

    async fn post(&self, path: &ResourcePath, body: &Value) -> Result<ApiResponse, RemoteFailure>;

    async fn patch(&self, path: &ResourcePath, body: &Value)
    -> Result<ApiResponse, RemoteFailure>;

    async fn delete(&self, path: &ResourcePath) -> Result<ApiResponse, RemoteFailure>;
}
