//! HTTP plumbing shared by the platform publishers.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::PublishError;

/// Upper bound on any single API call made by a publisher.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Slowest sustained throughput a media transfer may run at: 64 KiB/s.
pub const MIN_TRANSFER_RATE: u64 = 64 * 1024;

/// Build an HTTP client whose connect phase and every request are bounded
/// by `timeout`.
///
/// The request bound is a total deadline that includes the body, so calls
/// that move media bytes replace it per request with [`transfer_timeout`].
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .expect("failed to build HTTP client")
}

/// Deadline for a request carrying `size` bytes of media: [`DEFAULT_TIMEOUT`]
/// plus the time those bytes take at [`MIN_TRANSFER_RATE`].
pub fn transfer_timeout(size: u64) -> Duration {
    DEFAULT_TIMEOUT.saturating_add(Duration::from_secs(size.div_ceil(MIN_TRANSFER_RATE)))
}

/// A fully-read HTTP response.
#[derive(Debug)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body. An empty body is `Null`; a non-JSON body is kept
    /// as a `String` so error text is never lost.
    pub body: Value,
}

impl JsonResponse {
    /// Read the whole body of `response` and parse it leniently.
    pub async fn read(response: reqwest::Response) -> Result<Self, PublishError> {
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Best-effort human-readable error text carried by the body.
    pub fn error_message(&self) -> Option<String> {
        error_message(&self.body)
    }

    /// Error for a response the protocol treats as a failure. The upstream
    /// message is kept verbatim; without one, a bare `429` is
    /// [`PublishError::RateLimited`] and anything else gets `fallback`.
    pub fn into_error(self, fallback: &str) -> PublishError {
        match self.error_message() {
            Some(message) => PublishError::Api(message),
            None if self.status == StatusCode::TOO_MANY_REQUESTS => PublishError::RateLimited,
            None => PublishError::Api(fallback.to_owned()),
        }
    }
}

/// Extract an error message from the common upstream error shapes:
/// `{"error": {"message": ..}}`, `{"message": ..}`,
/// `{"error_description": ..}`, `{"error": ".."}` or a plain-text body.
pub fn error_message(body: &Value) -> Option<String> {
    let candidates = [
        body.pointer("/error/message"),
        body.get("message"),
        body.get("error_description"),
        body.get("error"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_str)
        .or_else(|| body.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}
