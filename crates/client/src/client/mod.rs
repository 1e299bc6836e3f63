//! Resource Client: the transport seam between the engine and the server.
//!
//! This module provides the [`ResourceClient`] trait consumed by
//! [`crate::Model`] and [`crate::Collection`], and [`HttpClient`], the default
//! implementation backed by `reqwest`.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - URI resolution and parameter serialization (handled by [`crate::resource`])
//! - Authentication, sessions, retries or backoff
//!
//! # Invariants
//! - Paths passed to the trait methods are relative to the configured base URL
//! - Every call either returns the decoded response body or fails; status codes
//!   are never inspected beyond success/failure by callers

pub mod builder;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::endpoints::{read_json, send_request};
use crate::error::Result;
use crate::metrics::MetricsCollector;

/// Performs HTTP calls against a configured base URL.
///
/// Implementations return the parsed response body (`Value::Null` when the
/// body is empty) or fail on transport errors and non-success statuses.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// GET `path` with query parameters.
    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<Value>;

    /// POST a JSON body to `path`.
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    /// PUT a JSON body to `path`.
    async fn put(&self, path: &str, body: &Value) -> Result<Value>;

    /// DELETE `path` with query parameters.
    async fn delete(&self, path: &str, params: &[(String, String)]) -> Result<Value>;
}

/// `reqwest`-backed [`ResourceClient`].
///
/// # Creating a Client
///
/// ```rust,ignore
/// use cytomine_client::HttpClient;
///
/// let client = HttpClient::builder()
///     .base_url("https://cytomine.example.com/api".to_string())
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) metrics: Option<MetricsCollector>,
}

impl HttpClient {
    /// Create a new client builder.
    pub fn builder() -> builder::HttpClientBuilder {
        builder::HttpClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ResourceClient for HttpClient {
    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<Value> {
        debug!(method = "GET", path, params = params.len(), "Sending request");
        let builder = self.http.get(self.url(path)).query(params);
        let response = send_request(builder, path, "GET", self.metrics.as_ref()).await?;
        read_json(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        debug!(method = "POST", path, "Sending request");
        let builder = self.http.post(self.url(path)).json(body);
        let response = send_request(builder, path, "POST", self.metrics.as_ref()).await?;
        read_json(response).await
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        debug!(method = "PUT", path, "Sending request");
        let builder = self.http.put(self.url(path)).json(body);
        let response = send_request(builder, path, "PUT", self.metrics.as_ref()).await?;
        read_json(response).await
    }

    async fn delete(&self, path: &str, params: &[(String, String)]) -> Result<Value> {
        debug!(method = "DELETE", path, "Sending request");
        let builder = self.http.delete(self.url(path)).query(params);
        let response = send_request(builder, path, "DELETE", self.metrics.as_ref()).await?;
        read_json(response).await
    }
}
