//! Client for the FarmaLink REST API.
//!
//! The API is the system of record for products, purchases, staff and
//! payments; the panel only renders and forwards forms to it.
//!
//! # API Reference
//!
//! - Base URL: `FARMALINK_API_URL` (default `https://metodologia-api.onrender.com`)
//! - JSON in and out, no authentication
//! - Collection paths end with a slash (`/api/productos/`)

mod resources;
mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;

/// Longest response body kept in an error.
const MAX_ERROR_BODY: usize = 500;

/// Errors from a call to the REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// The request never got an answer (DNS, connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered 2xx with a body we could not decode.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, for `Status` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Structured description for the alert log.
    #[must_use]
    pub fn details(&self) -> Value {
        match self {
            Self::Status { status, body } => json!({ "status": status, "respuesta": body }),
            Self::Network(e) => json!({ "red": true, "mensaje": e.to_string() }),
            Self::Decode(message) => json!({ "decodificacion": message }),
        }
    }

    /// `" (status: 500)"` for status errors, empty otherwise.
    #[must_use]
    pub fn status_suffix(&self) -> String {
        self.status()
            .map(|status| format!(" (status: {status})"))
            .unwrap_or_default()
    }
}

/// FarmaLink REST API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`. Trailing slashes are dropped.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("farmalink-panel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Execute a GET request.
    pub(crate) async fn get<T: DeserializeOwned + Default>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.inner.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned + Default, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.inner.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request. Any 2xx (including 204) is success.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let response = self.inner.client.delete(&url).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Decode a response. An empty 2xx body is `T::default()`.
    async fn handle_response<T: DeserializeOwned + Default>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        let text = response.text().await?;
        decode_body(&text)
    }

    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status, body = %body, "API returned an error");
        ApiError::Status {
            status,
            body: truncate_body(body),
        }
    }
}

fn decode_body<T: DeserializeOwned + Default>(text: &str) -> Result<T, ApiError> {
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
}

fn truncate_body(mut body: String) -> String {
    if let Some((idx, _)) = body.char_indices().nth(MAX_ERROR_BODY) {
        body.truncate(idx);
        body.push('…');
    }
    body
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slashes_are_dropped() {
        let client = ApiClient::new("https://api.farmalink.cl///", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://api.farmalink.cl");
        assert_eq!(
            client.url("/api/productos/"),
            "https://api.farmalink.cl/api/productos/"
        );
    }

    #[test]
    fn empty_body_decodes_to_default() {
        let products: Vec<Product> = decode_body("").unwrap();
        assert!(products.is_empty());
        let summary: AlertSummary = decode_body("  \n").unwrap();
        assert_eq!(summary, AlertSummary::default());
    }

    #[test]
    fn bad_body_is_decode_error() {
        let result: Result<Vec<Product>, _> = decode_body("<html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn status_error_helpers() {
        let err = ApiError::Status {
            status: 422,
            body: "{\"detail\":\"invalid\"}".to_string(),
        };
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.status_suffix(), " (status: 422)");
        assert_eq!(err.details()["status"], 422);

        let err = ApiError::Decode("x".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.status_suffix(), "");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = truncate_body("ñ".repeat(MAX_ERROR_BODY + 10));
        assert_eq!(body.chars().count(), MAX_ERROR_BODY + 1);
        assert!(body.ends_with('…'));
        assert_eq!(truncate_body("corto".to_string()), "corto");
    }
}
