#![deny(clippy::all, clippy::pedantic)]

use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::error::CliError;
use crate::transport::{ApiResponse, RemoteFailure, ResourcePath, ResponseBody, Transport};

/// [`Transport`] backed by reqwest, rooted at the configured base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// # Errors
    ///
    /// Fails when the base URL cannot carry a path or the HTTP client cannot be built.
    pub fn new(base: Url) -> Result<Self, CliError> {
        if base.cannot_be_a_base() {
            return Err(CliError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    #[must_use]
    pub fn user_agent() -> &'static str {
        concat!("restcmd/", env!("CARGO_PKG_VERSION"))
    }

    /// Append `path` to the base URL, percent-encoding each segment.
    #[must_use]
    pub fn url(&self, path: &ResourcePath) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.segments());
        }
        url
    }

    async fn request(
        &self,
        method: Method,
        path: &ResourcePath,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse, RemoteFailure> {
        let mut url = self.url(path);
        if !query.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (k, v) in query {
                qp.append_pair(k, v);
            }
        }

        debug!(%method, %url, "sending request");
        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|err| transport_failure(&err))?;
        Self::handle(resp).await
    }

    async fn handle(resp: Response) -> Result<ApiResponse, RemoteFailure> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|err| transport_failure(&err))?;
        debug!(status = status.as_u16(), len = bytes.len(), "received response");
        let body = ResponseBody::from_bytes(&bytes);
        if !status.is_success() {
            return Err(RemoteFailure::from_response(status, &body));
        }
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn get(
        &self,
        path: &ResourcePath,
        query: &[(&'static str, String)],
    ) -> Result<ApiResponse, RemoteFailure> {
        self.request(Method::GET, path, query, None).await
    }

    async fn post(&self, path: &ResourcePath, body: &Value) -> Result<ApiResponse, RemoteFailure> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    async fn patch(
        &self,
        path: &ResourcePath,
        body: &Value,
    ) -> Result<ApiResponse, RemoteFailure> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    async fn delete(&self, path: &ResourcePath) -> Result<ApiResponse, RemoteFailure> {
        self.request(Method::DELETE, path, &[], None).await
    }
}

/// Message for errors raised before any response arrived, including the source chain.
fn transport_failure(error: &reqwest::Error) -> RemoteFailure {
    let mut messages = vec![error.to_string()];
    let mut current = error.source();
    while let Some(inner) = current {
        let text = inner.to_string();
        if !messages.contains(&text) {
            messages.push(text);
        }
        current = inner.source();
    }
    RemoteFailure::new(messages.join(": "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).expect("url")).expect("client")
    }

    #[test]
    fn url_appends_below_base_path() {
        let c = client("http://localhost:3000/api");
        let url = c.url(&ResourcePath::new("brands").child("42"));
        assert_eq!(url.as_str(), "http://localhost:3000/api/brands/42");

        let c = client("http://localhost:3000/api/");
        let url = c.url(&ResourcePath::new("cars"));
        assert_eq!(url.as_str(), "http://localhost:3000/api/cars");

        let c = client("http://localhost:3000");
        let url = c.url(&ResourcePath::new("cars"));
        assert_eq!(url.as_str(), "http://localhost:3000/cars");
    }

    #[test]
    fn url_encodes_id_segment() {
        let c = client("http://localhost:3000");
        let url = c.url(&ResourcePath::new("brands").child("a b/c"));
        assert_eq!(url.as_str(), "http://localhost:3000/brands/a%20b%2Fc");
    }

    #[test]
    fn rejects_base_without_path() {
        let err = ApiClient::new(Url::parse("mailto:someone@example.com").expect("url"))
            .expect_err("cannot be a base");
        assert!(matches!(err, CliError::Url(_)));
    }

    #[test]
    fn user_agent_names_the_tool() {
        assert!(ApiClient::user_agent().starts_with("restcmd/"));
    }
}
