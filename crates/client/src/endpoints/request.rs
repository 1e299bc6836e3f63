//! Request execution shared by every transport call.
//!
//! Sends one HTTP request, records metrics, and maps non-success statuses to
//! [`ClientError::ApiError`]. No retry or backoff happens here:
//! remote failures are surfaced to the caller unchanged.

use std::time::Instant;

use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;

/// Sends an HTTP request and returns the response if its status is a success.
///
/// # Errors
///
/// Returns `ClientError::HttpError` on transport failure and
/// `ClientError::ApiError` on any non-2xx status.
pub async fn send_request(
    builder: RequestBuilder,
    endpoint: &str,
    method: &str,
    metrics: Option<&MetricsCollector>,
) -> Result<Response> {
    let start = Instant::now();
    if let Some(m) = metrics {
        m.record_request(endpoint, method);
    }

    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
            let err = ClientError::from(e);
            if let Some(m) = metrics {
                m.record_request_duration(endpoint, method, start.elapsed(), None);
                m.record_client_error(endpoint, method, &err);
            }
            debug!(endpoint, method, error = %err, "Request failed before a response");
            return Err(err);
        }
    };

    let status = response.status().as_u16();
    if let Some(m) = metrics {
        m.record_request_duration(endpoint, method, start.elapsed(), Some(status));
    }

    if response.status().is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let err = ClientError::ApiError {
        status,
        url,
        message: error_message(&body),
    };
    if let Some(m) = metrics {
        m.record_client_error(endpoint, method, &err);
    }
    debug!(endpoint, method, status, "Request returned a non-success status");
    Err(err)
}

/// Decode a response body as JSON. An empty body decodes to `Value::Null`.
pub async fn read_json(response: Response) -> Result<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text)
        .map_err(|e| ClientError::InvalidResponse(format!("Response body is not JSON: {}", e)))
}

/// Extract a readable message from an error body.
///
/// The server reports failures as `{"errors": "..."}` or `{"message": "..."}`;
/// anything else is returned verbatim.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    for key in ["errors", "message"] {
        match value.get(key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
            }
            _ => {}
        }
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_errors_field() {
        let body = r#"{"success": false, "errors": "Project 42 not found"}"#;
        assert_eq!(error_message(body), "Project 42 not found");
    }

    #[test]
    fn test_error_message_from_message_field() {
        let body = r#"{"message": "Access denied"}"#;
        assert_eq!(error_message(body), "Access denied");
    }

    #[test]
    fn test_error_message_from_error_list() {
        let body = r#"{"errors": ["name is required", "ontology is required"]}"#;
        assert_eq!(
            error_message(body),
            "name is required; ontology is required"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"code": 3}"#), r#"{"code": 3}"#);
    }
}
