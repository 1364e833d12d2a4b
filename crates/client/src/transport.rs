//! Low-level HTTP transport for the series store.
//!
//! One method per REST operation on the `/series` resource, using
//! [`reqwest`]. Failures are classified so callers can tell an
//! unreachable store apart from a missing record or a server-side
//! fault. Requests are sent once; there is no retry.

use std::time::Duration;

use showlog_core::SeriesId;

use crate::wire::{WireSeries, WireSeriesDraft};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// HTTP request timeout for a single store call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the store transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The TCP connection to the store could not be established.
    #[error("Store unreachable at {url}, check that it is running: {source}")]
    Unreachable {
        /// URL the request was addressed to.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The store answered 404 for the requested resource.
    #[error("Not found: {url}")]
    NotFound {
        /// URL the request was addressed to.
        url: String,
    },

    /// The store itself failed (5xx).
    #[error("Store internal error ({status}): {body}")]
    ServerFault {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The store answered with any other non-success status code.
    #[error("Store error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The HTTP request itself failed (timeout, protocol, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl TransportError {
    /// True when the store itself reported a 5xx fault.
    pub fn is_server_fault(&self) -> bool {
        matches!(self, TransportError::ServerFault { .. })
    }
}

// ---------------------------------------------------------------------------
// StoreTransport
// ---------------------------------------------------------------------------

/// HTTP client for a single series store.
pub struct StoreTransport {
    client: reqwest::Client,
    base_url: String,
}

impl StoreTransport {
    /// Create a transport for the store at `base_url` with the default
    /// request timeout.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:3001`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a transport with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the whole collection.
    ///
    /// Sends a `GET /series` request. The body is returned as raw JSON
    /// so the caller can decode elements individually.
    pub async fn list(&self) -> Result<serde_json::Value, TransportError> {
        let url = format!("{}/series", self.base_url);
        let response = self.send(self.client.get(&url), &url).await?;
        Self::parse_response(&url, response).await
    }

    /// Fetch a single record.
    ///
    /// Sends a `GET /series/{id}` request.
    pub async fn fetch(&self, id: SeriesId) -> Result<WireSeries, TransportError> {
        let url = format!("{}/series/{}", self.base_url, id);
        let response = self.send(self.client.get(&url), &url).await?;
        Self::parse_response(&url, response).await
    }

    /// Create a record.
    ///
    /// Sends a `POST /series` request. The payload carries no `id`;
    /// the store assigns one and echoes the stored record back.
    pub async fn create(&self, draft: &WireSeriesDraft) -> Result<WireSeries, TransportError> {
        let url = format!("{}/series", self.base_url);
        let response = self.send(self.client.post(&url).json(draft), &url).await?;
        Self::parse_response(&url, response).await
    }

    /// Replace a record.
    ///
    /// Sends a `PUT /series` request with the full record, `id`
    /// included. The store addresses the record by the id in the body
    /// and echoes the stored version back.
    pub async fn update(&self, record: &WireSeries) -> Result<WireSeries, TransportError> {
        let url = format!("{}/series", self.base_url);
        let response = self.send(self.client.put(&url).json(record), &url).await?;
        Self::parse_response(&url, response).await
    }

    /// Delete a record.
    ///
    /// Sends a `DELETE /series/{id}` request and discards the body.
    pub async fn delete(&self, id: SeriesId) -> Result<(), TransportError> {
        let url = format!("{}/series/{}", self.base_url, id);
        let response = self.send(self.client.delete(&url), &url).await?;
        Self::check_status(&url, response).await
    }

    // ---- private helpers ----

    /// Send one request, classifying connect failures separately from
    /// other request errors.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, TransportError> {
        request.send().await.map_err(|source| {
            if source.is_connect() {
                TransportError::Unreachable {
                    url: url.to_string(),
                    source,
                }
            } else {
                TransportError::Request(source)
            }
        })
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success; 404 becomes
    /// [`TransportError::NotFound`], 5xx becomes
    /// [`TransportError::ServerFault`], every other failure status
    /// becomes [`TransportError::Status`] with the body text attached.
    async fn ensure_success(
        url: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(if status.is_server_error() {
                TransportError::ServerFault {
                    status: status.as_u16(),
                    body,
                }
            } else {
                TransportError::Status {
                    status: status.as_u16(),
                    body,
                }
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let response = Self::ensure_success(url, response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(url: &str, response: reqwest::Response) -> Result<(), TransportError> {
        Self::ensure_success(url, response).await?;
        Ok(())
    }
}
